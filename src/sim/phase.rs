//! 单跳阶段
//!
//! 每一跳严格按 Send -> Process -> Discard -> Respond 推进。

use serde::Serialize;

use crate::net::{BASE_UDP_PORT, ProbeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Send,
    Process,
    Discard,
    Respond,
}

impl Phase {
    /// 一跳内的阶段顺序
    pub const HOP_SEQUENCE: [Phase; 4] = [Phase::Send, Phase::Process, Phase::Discard, Phase::Respond];

    /// 1..=4；Idle 没有编号
    pub fn step_number(self) -> Option<u8> {
        match self {
            Phase::Idle => None,
            Phase::Send => Some(1),
            Phase::Process => Some(2),
            Phase::Discard => Some(3),
            Phase::Respond => Some(4),
        }
    }

    pub fn title(self, mode: ProbeMode) -> &'static str {
        match (self, mode) {
            (Phase::Idle, _) => "Ready",
            (Phase::Send, ProbeMode::Udp) => "UDP Probe Packet Sent",
            (Phase::Send, ProbeMode::Icmp) => "ICMP Echo Request Sent",
            (Phase::Process, _) => "Router Processes Packet",
            (Phase::Discard, _) => "Packet Discarded",
            (Phase::Respond, _) => "ICMP Time Exceeded",
        }
    }

    /// 当前阶段正在发生什么
    pub fn description(self, mode: ProbeMode, ttl: u32) -> String {
        match self {
            Phase::Idle => "Waiting to start".to_string(),
            Phase::Send => format!("Sending {mode} probe with TTL={ttl}"),
            Phase::Process => "Router decrements TTL and checks value".to_string(),
            Phase::Discard => "TTL reaches 0, packet discarded".to_string(),
            Phase::Respond => "Router sends ICMP Time Exceeded response".to_string(),
        }
    }

    /// 以 TTL=1 为例的讲解
    pub fn explanation(self, mode: ProbeMode) -> String {
        match (self, mode) {
            (Phase::Idle, _) => String::new(),
            (Phase::Send, ProbeMode::Udp) => {
                format!("Sending UDP packet to port {BASE_UDP_PORT} with TTL=1")
            }
            (Phase::Send, ProbeMode::Icmp) => "Sending ICMP Echo Request with TTL=1".to_string(),
            (Phase::Process, _) => "Router decrements TTL from 1 to 0".to_string(),
            (Phase::Discard, _) => "TTL=0, packet is discarded".to_string(),
            (Phase::Respond, _) => "Router generates ICMP Type 11 response".to_string(),
        }
    }

    /// 形如 `Step 1: Sending UDP probe with TTL=3`
    pub fn step_line(self, mode: ProbeMode, ttl: u32) -> String {
        match self.step_number() {
            Some(n) => format!("Step {n}: {}", self.description(mode, ttl)),
            None => "Ready".to_string(),
        }
    }
}
