//! 单跳序列器
//!
//! 驱动一跳依次经过 Send、Process、Discard、Respond 四个阶段。
//! 每个阶段结束前经过一次挂起点；在任何挂起点被取消都直接放弃本跳，不产生结果。

use rand::Rng;
use tracing::{debug, trace};

use super::control::RunControl;
use super::error::Cancelled;
use super::observer::{PhaseChange, RunObserver};
use super::outcome::HopOutcome;
use super::phase::Phase;
use super::time::PhaseTimings;
use crate::net::{Packet, ProbeMode, rtt};
use crate::topo::Topology;

pub struct HopSequencer<'a> {
    topology: &'a Topology,
    timings: &'a PhaseTimings,
    control: &'a RunControl,
}

impl<'a> HopSequencer<'a> {
    pub fn new(topology: &'a Topology, timings: &'a PhaseTimings, control: &'a RunControl) -> Self {
        Self {
            topology,
            timings,
            control,
        }
    }

    /// 运行第 `hop` 跳（从 1 开始）
    #[tracing::instrument(skip(self, mode, rng, observer), fields(mode = %mode))]
    pub fn run_hop<R, O>(
        &self,
        hop: u32,
        mode: ProbeMode,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<HopOutcome, Cancelled>
    where
        R: Rng + ?Sized,
        O: RunObserver + ?Sized,
    {
        let responder = self.topology.responder(hop);
        let probe = Packet::probe(mode, hop);
        let response = Packet::time_exceeded(responder.node().address);
        trace!(responder = responder.node().address, "确定响应方");

        for phase in Phase::HOP_SEQUENCE {
            self.control.enter_phase(phase)?;
            let packet = if phase == Phase::Respond {
                response
            } else {
                probe
            };
            debug!(phase = ?phase, "进入阶段");
            observer.on_phase(&PhaseChange {
                hop,
                phase,
                packet,
                description: phase.description(mode, hop),
            });
            self.control.gate_phase(self.timings.for_phase(phase))?;
        }

        let latencies_ms = rtt::sample_probes(responder.node().baseline_ms, rng);
        debug!(?latencies_ms, "采样往返时延");
        Ok(HopOutcome {
            hop,
            responder,
            latencies_ms,
        })
    }
}
