use crate::sim::{HopOutcome, Phase, PhaseChange, RunConfig, RunObserver, RunStatus};
use parking_lot::Mutex;
use std::sync::Arc;

mod controller;
mod packet;
mod phase;
mod rtt;
mod topologies;

/// 记录所有回调，供断言使用
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub started: Option<RunConfig>,
    pub phases: Vec<(u32, Phase)>,
    pub outcomes: Vec<HopOutcome>,
    pub lines: Vec<String>,
    pub finished: Option<RunStatus>,
}

impl RunObserver for Recording {
    fn on_start(&mut self, config: &RunConfig) {
        self.started = Some(*config);
    }
    fn on_phase(&mut self, change: &PhaseChange) {
        self.phases.push((change.hop, change.phase));
    }
    fn on_outcome(&mut self, outcome: &HopOutcome) {
        self.outcomes.push(outcome.clone());
    }
    fn on_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
    fn on_finish(&mut self, status: RunStatus) {
        self.finished = Some(status);
    }
}

/// 跨线程共享的记录器，测试线程可以在运行过程中查看
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedRecording(pub Arc<Mutex<Recording>>);

impl SharedRecording {
    pub fn phases(&self) -> Vec<(u32, Phase)> {
        self.0.lock().phases.clone()
    }

    pub fn outcome_count(&self) -> usize {
        self.0.lock().outcomes.len()
    }
}

impl RunObserver for SharedRecording {
    fn on_start(&mut self, config: &RunConfig) {
        self.0.lock().on_start(config);
    }
    fn on_phase(&mut self, change: &PhaseChange) {
        self.0.lock().on_phase(change);
    }
    fn on_outcome(&mut self, outcome: &HopOutcome) {
        self.0.lock().on_outcome(outcome);
    }
    fn on_line(&mut self, line: &str) {
        self.0.lock().on_line(line);
    }
    fn on_finish(&mut self, status: RunStatus) {
        self.0.lock().on_finish(status);
    }
}

/// 每跳四个阶段按顺序出现
pub(crate) fn expected_phases(hops: u32) -> Vec<(u32, Phase)> {
    (1..=hops)
        .flat_map(|hop| Phase::HOP_SEQUENCE.into_iter().map(move |p| (hop, p)))
        .collect()
}
