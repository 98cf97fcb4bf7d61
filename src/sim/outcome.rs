//! 单跳结果与运行报告

use serde::Serialize;

use crate::net::rtt::PROBES_PER_HOP;
use crate::topo::Responder;

/// 一跳完成后产生的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HopOutcome {
    pub hop: u32,
    pub responder: Responder,
    pub latencies_ms: [f64; PROBES_PER_HOP],
}

/// 运行的终止状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// 到达目的主机
    Complete,
    /// 跳数用尽仍未到达目的主机
    MaxHopsReached,
    /// 被外部取消
    Cancelled,
}

impl RunStatus {
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Complete => "Complete",
            RunStatus::MaxHopsReached => "Max Hops Reached",
            RunStatus::Cancelled => "Cancelled",
        }
    }
}

/// 一次运行的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub outcomes: Vec<HopOutcome>,
    /// 终端输出的全部行（含首行和结束行）
    pub lines: Vec<String>,
}

impl RunReport {
    pub fn reached_destination(&self) -> bool {
        self.outcomes
            .last()
            .is_some_and(|o| o.responder.is_destination())
    }
}
