//! 可视化事件记录（用于离线回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析终端输出
//! - **可回放**：每个阶段都带上数据包字段与十六进制转储，支持逐阶段回放

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger};
