//! 数据包模块
//!
//! 此模块包含仿真数据包类型、数据包展示（头部字段与十六进制转储）以及往返时延采样。

// 子模块声明
mod packet;
mod presenter;
pub mod rtt;

// 重新导出公共接口
pub use packet::{
    BASE_UDP_PORT, ICMP_ECHO_REQUEST, ICMP_TIME_EXCEEDED, ICMP_TTL_EXCEEDED_IN_TRANSIT,
    IPPROTO_ICMP, IPPROTO_UDP, Packet, ProbeMode, RESPONSE_TTL, UDP_SOURCE_PORT,
    UnknownProbeMode,
};
pub use presenter::{HeaderField, HexDump, Layer, Presenter, TTL_OFFSET};
