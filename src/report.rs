//! 终端输出
//!
//! traceroute 风格的输出行，以及把运行事件写到终端的观察者。

use std::io::{self, Write};

use crate::net::Presenter;
use crate::sim::{HopOutcome, PhaseChange, RunConfig, RunObserver, RunStatus};
use crate::topo::Topology;

/// 模拟的探测包大小
pub const PACKET_BYTES: u32 = 60;

pub fn header_line(topology: &Topology, max_hops: u32) -> String {
    format!(
        "traceroute to {} ({}), {max_hops} hops max, {PACKET_BYTES} byte packets",
        topology.destination_label, topology.destination.address
    )
}

/// ` 3  10.0.2.1 (ISP Router 2)  11.6ms  12.4ms  12ms`
pub fn hop_line(outcome: &HopOutcome) -> String {
    let node = outcome.responder.node();
    let rtts = outcome
        .latencies_ms
        .iter()
        .map(|ms| format!("{}ms", format_ms(*ms)))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{:>2}  {} ({})  {rtts}", outcome.hop, node.address, node.name)
}

pub fn footer_lines(status: RunStatus) -> [&'static str; 2] {
    match status {
        RunStatus::Complete => ["", "Traceroute complete!"],
        RunStatus::MaxHopsReached => ["", "*** Maximum hops reached ***"],
        RunStatus::Cancelled => ["", "*** Traceroute cancelled ***"],
    }
}

/// 最短的十进制表示：`5`、`5.3`
pub fn format_ms(ms: f64) -> String {
    format!("{ms}")
}

/// 把运行事件写到 `out`
pub struct TerminalPrinter<W: Write> {
    out: W,
    topology: Topology,
    config: RunConfig,
    show_steps: bool,
    show_packets: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPrinter<W> {
    pub fn new(out: W, topology: Topology) -> Self {
        Self {
            out,
            topology,
            config: RunConfig::default(),
            show_steps: false,
            show_packets: false,
            error: None,
        }
    }

    /// 打印每个阶段的 `Step N: ...` 行
    pub fn show_steps(mut self, on: bool) -> Self {
        self.show_steps = on;
        self
    }

    /// 打印每个阶段涉及的数据包头部与十六进制转储
    pub fn show_packets(mut self, on: bool) -> Self {
        self.show_packets = on;
        self
    }

    /// 取回输出；返回写入过程中遇到的第一个错误
    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> RunObserver for TerminalPrinter<W> {
    fn on_start(&mut self, config: &RunConfig) {
        self.config = *config;
    }

    fn on_phase(&mut self, change: &PhaseChange) {
        if self.show_steps {
            let line = format!(
                "    [{}] {}",
                change.phase.title(self.config.mode),
                change.phase.step_line(self.config.mode, change.hop)
            );
            self.write_line(&line);
            // 第一跳附带 TTL=1 的讲解
            if change.hop == 1 {
                let explanation = change.phase.explanation(self.config.mode);
                self.write_line(&format!("      {explanation}"));
            }
        }
        if self.show_packets {
            let presenter = Presenter::new(&self.topology, self.config.mode);
            let mut lines = vec![format!("    {}", change.packet.describe())];
            lines.extend(
                presenter
                    .fields(&change.packet)
                    .iter()
                    .map(|field| format!("      {field}")),
            );
            lines.extend(
                presenter
                    .hex_dump(&change.packet)
                    .to_string()
                    .lines()
                    .map(|row| format!("      {row}")),
            );
            for line in lines {
                self.write_line(&line);
            }
        }
    }

    fn on_line(&mut self, line: &str) {
        self.write_line(line);
    }
}
