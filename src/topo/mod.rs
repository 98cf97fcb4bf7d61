//! 拓扑模块
//!
//! 提供 traceroute 演示用的固定拓扑表。

pub mod chain;

pub use chain::{Responder, RouterHop, SourceHost, Topology};
