use std::time::Instant;

use serde::Serialize;

use crate::net::{HeaderField, Packet, Presenter};
use crate::sim::{HopOutcome, PhaseChange, RunConfig, RunObserver, RunStatus};
use crate::topo::{Responder, RouterHop, SourceHost, Topology};

/// 可视化事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 运行配置与拓扑（总是第一条事件）
    Meta {
        config: RunConfig,
        source: SourceHost,
        routers: Vec<RouterHop>,
        destination: RouterHop,
    },
    /// 某一跳进入新阶段
    Phase {
        hop: u32,
        phase: crate::sim::Phase,
        title: String,
        description: String,
        /// TTL=1 时这一阶段的讲解
        explanation: String,
        packet: Packet,
        fields: Vec<HeaderField>,
        /// 空格分隔的十六进制字节
        hex: String,
        ttl_offset: usize,
    },
    /// 一跳完成
    Outcome {
        hop: u32,
        responder: Responder,
        latencies_ms: Vec<f64>,
    },
    /// 终端输出行
    Line { text: String },
    /// 运行结束
    Finished { status: RunStatus },
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize)]
pub struct VizEvent {
    /// 距运行开始的墙钟时间（毫秒）
    pub t_ms: u64,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 事件收集器（存内存，运行结束写 JSON 文件）
#[derive(Debug)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
    topology: Topology,
    config: RunConfig,
    started: Option<Instant>,
}

impl VizLogger {
    pub fn new(topology: Topology) -> Self {
        Self {
            events: Vec::new(),
            topology,
            config: RunConfig::default(),
            started: None,
        }
    }

    pub fn push(&mut self, kind: VizEventKind) {
        let t_ms = self
            .started
            .map(|t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.events.push(VizEvent { t_ms, kind });
    }
}

impl RunObserver for VizLogger {
    fn on_start(&mut self, config: &RunConfig) {
        self.started = Some(Instant::now());
        self.config = *config;
        self.push(VizEventKind::Meta {
            config: *config,
            source: self.topology.source.clone(),
            routers: self.topology.routers.clone(),
            destination: self.topology.destination.clone(),
        });
    }

    fn on_phase(&mut self, change: &PhaseChange) {
        let presenter = Presenter::new(&self.topology, self.config.mode);
        let dump = presenter.hex_dump(&change.packet);
        let kind = VizEventKind::Phase {
            hop: change.hop,
            phase: change.phase,
            title: change.phase.title(self.config.mode).to_string(),
            description: change.description.clone(),
            explanation: change.phase.explanation(self.config.mode),
            packet: change.packet,
            fields: presenter.fields(&change.packet),
            hex: dump.compact(),
            ttl_offset: dump.ttl_offset,
        };
        self.push(kind);
    }

    fn on_outcome(&mut self, outcome: &HopOutcome) {
        self.push(VizEventKind::Outcome {
            hop: outcome.hop,
            responder: outcome.responder.clone(),
            latencies_ms: outcome.latencies_ms.to_vec(),
        });
    }

    fn on_line(&mut self, line: &str) {
        self.push(VizEventKind::Line {
            text: line.to_string(),
        });
    }

    fn on_finish(&mut self, status: RunStatus) {
        self.push(VizEventKind::Finished { status });
    }
}
