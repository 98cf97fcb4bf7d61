//! traceroute 仿真命令行
//!
//! 在固定拓扑上逐跳演示 traceroute：探测包发出、路由器处理、TTL 耗尽丢弃、ICMP 响应返回。
//! 运行期间从 stdin 读取控制命令：
//! 回车 / `n` 单步推进，`p` 暂停 / 继续，`s` 切换单步模式，`q` 重置。

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, info, warn};
use traceroute_sim::net::ProbeMode;
use traceroute_sim::report::TerminalPrinter;
use traceroute_sim::sim::{
    DEFAULT_MAX_HOPS, PhaseTimings, RunConfig, RunHandle, SimError, Tracer,
};
use traceroute_sim::topo::Topology;
use traceroute_sim::viz::VizLogger;

#[derive(Debug, Parser)]
#[command(
    name = "traceroute-sim",
    about = "Step through a simulated traceroute over a fixed topology"
)]
struct Args {
    /// Maximum TTL to probe (1-255)
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS)]
    max_hops: u32,

    /// Probe protocol: udp or icmp
    #[arg(long, default_value = "udp")]
    mode: ProbeMode,

    /// Wait for Enter before every phase instead of using timed delays
    #[arg(long)]
    step: bool,

    /// Multiply every phase delay by this factor (0 runs instantly)
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Seed for the latency jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Print the step line for every phase (always on with --step)
    #[arg(long)]
    show_steps: bool,

    /// Print header fields and a hex dump for every phase
    #[arg(long)]
    show_packets: bool,

    /// Output viz JSON file
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize viz events: {0}")]
    Json(#[from] serde_json::Error),
}

type Observer = (TerminalPrinter<io::Stdout>, Option<VizLogger>);

fn main() {
    // 日志写到 stderr，stdout 只保留 traceroute 输出
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let topology = Topology::classic();
    let timings = PhaseTimings::default().scaled(args.time_scale);
    let config = RunConfig {
        max_hops: args.max_hops,
        mode: args.mode,
        step_mode: args.step,
    };
    debug!(?config, ?timings, "运行参数");

    let printer = TerminalPrinter::new(io::stdout(), topology.clone())
        .show_steps(args.show_steps || args.step)
        .show_packets(args.show_packets);
    let viz = args
        .viz_json
        .as_ref()
        .map(|_| VizLogger::new(topology.clone()));

    let mut tracer: Tracer<Observer> = Tracer::new(topology, timings);
    if let Some(seed) = args.seed {
        tracer = tracer.with_seed(seed);
    }

    let handle = tracer.start(config, (printer, viz))?;
    if args.step {
        eprintln!("step mode: press Enter to advance, p pause, s toggle step, q quit");
    }
    spawn_stdin_controls(handle);

    let Some((report, (printer, viz))) = tracer.wait()? else {
        return Ok(());
    };
    printer.into_inner()?;
    info!(status = report.status.label(), hops = report.outcomes.len(), "运行结束");

    if let (Some(path), Some(viz)) = (args.viz_json, viz) {
        let json = serde_json::to_string_pretty(&viz.events)?;
        fs::write(&path, json)?;
        info!(path = %path.display(), events = viz.events.len(), "已写出 viz JSON");
    }
    Ok(())
}

/// 把 stdin 的每一行映射为控制命令
fn spawn_stdin_controls(handle: RunHandle) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "" | "n" => {
                    handle.advance_step();
                }
                "p" => {
                    handle.toggle_pause();
                    eprintln!("{}", handle.state().label());
                }
                "s" => {
                    let on = !handle.state().step_mode;
                    handle.set_step_mode(on);
                }
                "q" => {
                    handle.reset();
                    return;
                }
                other => warn!(command = other, "未知命令"),
            }
            if !handle.state().running {
                return;
            }
        }
        // stdin 已关闭：不会再有推进或继续信号
        let state = handle.state();
        if state.running && (state.step_mode || state.paused) {
            debug!(step_mode = state.step_mode, paused = state.paused, "stdin 关闭，重置运行");
            handle.reset();
        }
    });
}
