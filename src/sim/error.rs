//! 错误类型
//!
//! 取消与跳数耗尽都是正常的终止状态，不在这里；这里只有调用方误用和工作线程故障。

use thiserror::Error;

/// TTL 字段的上限
pub const MAX_TTL: u32 = 255;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("max_hops must be between 1 and 255, got {0}")]
    InvalidMaxHops(u32),
    #[error("a traceroute run is already in progress")]
    AlreadyRunning,
    #[error("failed to spawn simulation worker")]
    Spawn(#[source] std::io::Error),
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

/// 运行在挂起点被取消。只用于让 `?` 提前返回，不是错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;
