//! 阶段时长
//!
//! 普通模式下每个阶段结束前的固定等待；单步模式下不使用。

use std::time::Duration;

use super::phase::Phase;

/// `scaled` 允许的最大倍率
const MAX_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    pub send: Duration,
    pub process: Duration,
    pub discard: Duration,
    pub respond: Duration,
    /// 两跳之间的间隔
    pub inter_hop: Duration,
}

impl PhaseTimings {
    pub const ZERO: PhaseTimings = PhaseTimings {
        send: Duration::ZERO,
        process: Duration::ZERO,
        discard: Duration::ZERO,
        respond: Duration::ZERO,
        inter_hop: Duration::ZERO,
    };

    /// 所有阶段使用同一时长
    pub fn uniform(phase: Duration, inter_hop: Duration) -> Self {
        Self {
            send: phase,
            process: phase,
            discard: phase,
            respond: phase,
            inter_hop,
        }
    }

    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Idle => Duration::ZERO,
            Phase::Send => self.send,
            Phase::Process => self.process,
            Phase::Discard => self.discard,
            Phase::Respond => self.respond,
        }
    }

    /// 按倍率缩放；非有限值或非正数得到 `ZERO`
    pub fn scaled(&self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::ZERO;
        }
        let factor = factor.min(MAX_SCALE);
        Self {
            send: self.send.mul_f64(factor),
            process: self.process.mul_f64(factor),
            discard: self.discard.mul_f64(factor),
            respond: self.respond.mul_f64(factor),
            inter_hop: self.inter_hop.mul_f64(factor),
        }
    }
}

impl Default for PhaseTimings {
    // 步骤展示 800ms，加上探测包/响应包的动画时间
    fn default() -> Self {
        Self {
            send: Duration::from_millis(2400),
            process: Duration::from_millis(1300),
            discard: Duration::from_millis(1100),
            respond: Duration::from_millis(2100),
            inter_hop: Duration::from_millis(1200),
        }
    }
}
