//! 运行控制器
//!
//! 从第 1 跳开始反复调用序列器，判断何时到达目的主机，并汇总输出行。

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::config::RunConfig;
use super::control::RunControl;
use super::observer::RunObserver;
use super::outcome::{RunReport, RunStatus};
use super::sequencer::HopSequencer;
use super::time::PhaseTimings;
use crate::report;
use crate::topo::Topology;

pub struct RunController {
    topology: Topology,
    timings: PhaseTimings,
    rng: StdRng,
}

impl RunController {
    pub fn new(topology: Topology, timings: PhaseTimings) -> Self {
        Self {
            topology,
            timings,
            rng: StdRng::from_entropy(),
        }
    }

    /// 固定随机种子，便于复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 运行直到到达目的主机、跳数用尽或被取消。
    ///
    /// 目的主机恰好在第 `max_hops` 跳到达时，结果为 `Complete`。
    #[tracing::instrument(skip(self, config, control, observer), fields(max_hops = config.max_hops, mode = %config.mode))]
    pub fn run<O: RunObserver + ?Sized>(
        &mut self,
        config: &RunConfig,
        control: &RunControl,
        observer: &mut O,
    ) -> RunReport {
        info!("▶️  开始 traceroute");
        let mut lines = Vec::new();
        let mut outcomes = Vec::new();

        observer.on_start(config);
        emit(
            &mut lines,
            observer,
            report::header_line(&self.topology, config.max_hops),
        );

        let sequencer = HopSequencer::new(&self.topology, &self.timings, control);
        let mut status = RunStatus::MaxHopsReached;

        for hop in 1..=config.max_hops {
            if control.begin_hop(hop).is_err() {
                status = RunStatus::Cancelled;
                break;
            }
            let Ok(outcome) = sequencer.run_hop(hop, config.mode, &mut self.rng, observer) else {
                status = RunStatus::Cancelled;
                break;
            };

            observer.on_outcome(&outcome);
            emit(&mut lines, observer, report::hop_line(&outcome));
            let reached = outcome.responder.is_destination();
            outcomes.push(outcome);

            if reached {
                status = RunStatus::Complete;
                break;
            }
            if hop < config.max_hops
                && control
                    .gate_between_hops(self.timings.inter_hop)
                    .is_err()
            {
                status = RunStatus::Cancelled;
                break;
            }
        }

        for line in report::footer_lines(status) {
            emit(&mut lines, observer, line.to_string());
        }
        control.finish();
        observer.on_finish(status);

        info!(
            status = status.label(),
            hops = outcomes.len(),
            "✅ traceroute 结束"
        );
        debug!(lines = lines.len(), "输出行数");

        RunReport {
            status,
            outcomes,
            lines,
        }
    }
}

fn emit<O: RunObserver + ?Sized>(lines: &mut Vec<String>, observer: &mut O, line: String) {
    observer.on_line(&line);
    lines.push(line);
}
