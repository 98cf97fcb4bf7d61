//! 数据包类型
//!
//! 探测包与 ICMP 响应包的封闭枚举，以及相关协议常量。

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// UDP 探测的起始目的端口（第 1 跳使用）
pub const BASE_UDP_PORT: u16 = 33434;
pub const UDP_SOURCE_PORT: u16 = 54321;

pub const IPPROTO_ICMP: u8 = 1;
pub const IPPROTO_UDP: u8 = 17;

pub const ICMP_ECHO_REQUEST: u8 = 8;
pub const ICMP_TIME_EXCEEDED: u8 = 11;
/// Time Exceeded 的 code 0：TTL 在传输中耗尽
pub const ICMP_TTL_EXCEEDED_IN_TRANSIT: u8 = 0;

/// 路由器发出响应包时使用的 TTL
pub const RESPONSE_TTL: u8 = 64;

/// 探测方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMode {
    #[default]
    Udp,
    Icmp,
}

impl ProbeMode {
    /// IP 头中的协议号
    pub fn protocol(self) -> u8 {
        match self {
            ProbeMode::Udp => IPPROTO_UDP,
            ProbeMode::Icmp => IPPROTO_ICMP,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProbeMode::Udp => "UDP",
            ProbeMode::Icmp => "ICMP",
        }
    }
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown probe mode `{0}`, expected `udp` or `icmp`")]
pub struct UnknownProbeMode(pub String);

impl FromStr for ProbeMode {
    type Err = UnknownProbeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "udp" => Ok(ProbeMode::Udp),
            "icmp" => Ok(ProbeMode::Icmp),
            _ => Err(UnknownProbeMode(s.to_string())),
        }
    }
}

/// 仿真中出现的数据包
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Packet {
    /// 出站探测包（与探测方式相关）
    Probe { mode: ProbeMode, ttl: u8 },
    /// 路由器返回的 ICMP 响应
    Response {
        from: &'static str,
        icmp_type: u8,
        icmp_code: u8,
    },
}

impl Packet {
    /// 第 `hop` 跳的探测包，TTL 等于跳数（超过 255 时截断）
    pub fn probe(mode: ProbeMode, hop: u32) -> Self {
        Packet::Probe {
            mode,
            ttl: u8::try_from(hop).unwrap_or(u8::MAX),
        }
    }

    /// ICMP Time Exceeded（type 11, code 0）
    pub fn time_exceeded(from: &'static str) -> Self {
        Packet::Response {
            from,
            icmp_type: ICMP_TIME_EXCEEDED,
            icmp_code: ICMP_TTL_EXCEEDED_IN_TRANSIT,
        }
    }

    pub fn is_probe(&self) -> bool {
        matches!(self, Packet::Probe { .. })
    }

    pub fn ttl(&self) -> u8 {
        match self {
            Packet::Probe { ttl, .. } => *ttl,
            Packet::Response { .. } => RESPONSE_TTL,
        }
    }

    pub fn protocol(&self) -> u8 {
        match self {
            Packet::Probe { mode, .. } => mode.protocol(),
            Packet::Response { .. } => IPPROTO_ICMP,
        }
    }

    /// UDP 探测的目的端口：33434 + hop - 1
    pub fn dst_port(&self) -> Option<u16> {
        match self {
            Packet::Probe {
                mode: ProbeMode::Udp,
                ttl,
            } => Some(BASE_UDP_PORT.wrapping_add(u16::from(ttl.saturating_sub(1)))),
            _ => None,
        }
    }

    /// ICMP (type, code)；UDP 探测没有
    pub fn icmp(&self) -> Option<(u8, u8)> {
        match self {
            Packet::Probe {
                mode: ProbeMode::Icmp,
                ..
            } => Some((ICMP_ECHO_REQUEST, 0)),
            Packet::Probe { .. } => None,
            Packet::Response {
                icmp_type,
                icmp_code,
                ..
            } => Some((*icmp_type, *icmp_code)),
        }
    }

    /// 一句话描述，用于检查面板
    pub fn describe(&self) -> String {
        match self {
            Packet::Probe {
                mode: ProbeMode::Udp,
                ttl,
            } => format!(
                "UDP probe packet with TTL={ttl} to port {}",
                self.dst_port().unwrap_or(BASE_UDP_PORT)
            ),
            Packet::Probe {
                mode: ProbeMode::Icmp,
                ttl,
            } => format!("ICMP Echo Request probe with TTL={ttl}"),
            Packet::Response {
                from, icmp_type, ..
            } => format!("ICMP Time Exceeded (Type {icmp_type}) response from {from}"),
        }
    }
}
