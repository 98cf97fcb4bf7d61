//! 仿真核心模块
//!
//! 此模块包含 traceroute 仿真的核心组件：运行配置、阶段、运行控制（暂停 / 单步 / 取消）、
//! 单跳序列器、运行控制器以及在工作线程上驱动它们的会话。

// 子模块声明
mod config;
mod control;
mod controller;
mod error;
mod observer;
mod outcome;
mod phase;
mod sequencer;
mod session;
mod time;

// 重新导出公共接口
pub use config::{DEFAULT_MAX_HOPS, RunConfig};
pub use control::{RunControl, RunState};
pub use controller::RunController;
pub use error::{Cancelled, MAX_TTL, SimError};
pub use observer::{PhaseChange, RunObserver};
pub use outcome::{HopOutcome, RunReport, RunStatus};
pub use phase::Phase;
pub use sequencer::HopSequencer;
pub use session::{RunHandle, Session, Tracer};
pub use time::PhaseTimings;
