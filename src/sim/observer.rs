//! 运行观察者
//!
//! 控制器与序列器通过此 trait 向展示层报告阶段变化、单跳结果和输出行。
//! 所有回调都有空的默认实现。

use super::config::RunConfig;
use super::outcome::{HopOutcome, RunStatus};
use super::phase::Phase;
use crate::net::Packet;

/// 阶段变化事件
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseChange {
    pub hop: u32,
    pub phase: Phase,
    /// 该阶段涉及的数据包：前三个阶段为探测包，Respond 为 ICMP 响应
    pub packet: Packet,
    pub description: String,
}

pub trait RunObserver {
    fn on_start(&mut self, _config: &RunConfig) {}
    fn on_phase(&mut self, _change: &PhaseChange) {}
    fn on_outcome(&mut self, _outcome: &HopOutcome) {}
    fn on_line(&mut self, _line: &str) {}
    fn on_finish(&mut self, _status: RunStatus) {}
}

impl RunObserver for () {}

// 两个观察者依次收到同一事件
impl<A: RunObserver, B: RunObserver> RunObserver for (A, B) {
    fn on_start(&mut self, config: &RunConfig) {
        self.0.on_start(config);
        self.1.on_start(config);
    }
    fn on_phase(&mut self, change: &PhaseChange) {
        self.0.on_phase(change);
        self.1.on_phase(change);
    }
    fn on_outcome(&mut self, outcome: &HopOutcome) {
        self.0.on_outcome(outcome);
        self.1.on_outcome(outcome);
    }
    fn on_line(&mut self, line: &str) {
        self.0.on_line(line);
        self.1.on_line(line);
    }
    fn on_finish(&mut self, status: RunStatus) {
        self.0.on_finish(status);
        self.1.on_finish(status);
    }
}

impl<T: RunObserver> RunObserver for Option<T> {
    fn on_start(&mut self, config: &RunConfig) {
        if let Some(inner) = self {
            inner.on_start(config);
        }
    }
    fn on_phase(&mut self, change: &PhaseChange) {
        if let Some(inner) = self {
            inner.on_phase(change);
        }
    }
    fn on_outcome(&mut self, outcome: &HopOutcome) {
        if let Some(inner) = self {
            inner.on_outcome(outcome);
        }
    }
    fn on_line(&mut self, line: &str) {
        if let Some(inner) = self {
            inner.on_line(line);
        }
    }
    fn on_finish(&mut self, status: RunStatus) {
        if let Some(inner) = self {
            inner.on_finish(status);
        }
    }
}
