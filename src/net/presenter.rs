//! 数据包展示
//!
//! 把 `Packet` 投影为头部字段列表与十六进制转储。纯函数，不修改任何运行状态。
//! 字节来自固定模板，只改写 TTL、协议号、端口和地址；校验和保持模板值。

use std::fmt;
use std::net::Ipv4Addr;
use std::ops::Range;

use serde::Serialize;

use super::packet::{ICMP_ECHO_REQUEST, Packet, ProbeMode, UDP_SOURCE_PORT};
use crate::topo::Topology;

/// IPv4 头中 TTL 字节的偏移
pub const TTL_OFFSET: usize = 8;
const PROTOCOL_OFFSET: usize = 9;
const SRC_ADDR: Range<usize> = 12..16;
const DST_ADDR: Range<usize> = 16..20;
const IPV4_HEADER_LEN: usize = 20;

/// 探测包 IPv4 头模板（total length 60，DF）
const PROBE_IPV4: [u8; IPV4_HEADER_LEN] = [
    0x45, 0x00, 0x00, 0x3c, 0x12, 0x34, 0x40, 0x00, 0x01, 0x11, 0x7a, 0x2b, 0xc0, 0xa8, 0x01,
    0x64, 0x08, 0x08, 0x08, 0x08,
];
/// 54321 -> 33434，length 40
const UDP_HEADER: [u8; 8] = [0xd4, 0x31, 0x82, 0x9a, 0x00, 0x28, 0x8f, 0x3a];
/// id 0x1234，seq 运行时改写为 TTL
const ICMP_ECHO_HEADER: [u8; 8] = [ICMP_ECHO_REQUEST, 0x00, 0xf7, 0xfe, 0x12, 0x34, 0x00, 0x01];
const PAYLOAD: &[u8; 32] = b"abcdefghijklmnopqrstuvwabcdefghi";

/// 响应包 IPv4 头模板（total length 56，TTL 64，ICMP）
const RESPONSE_IPV4: [u8; IPV4_HEADER_LEN] = [
    0x45, 0x00, 0x00, 0x38, 0x00, 0x00, 0x40, 0x00, 0x40, 0x01, 0xb6, 0xcc, 0xc0, 0xa8, 0x01,
    0x01, 0xc0, 0xa8, 0x01, 0x64,
];
const TIME_EXCEEDED_HEADER: [u8; 8] = [0x0b, 0x00, 0x1f, 0x4a, 0x00, 0x00, 0x00, 0x00];

/// 被引用的原始头部到达过期路由器时的 TTL
const QUOTED_TTL: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Ipv4,
    Udp,
    Icmp,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layer::Ipv4 => "IPv4",
            Layer::Udp => "UDP",
            Layer::Icmp => "ICMP",
        })
    }
}

/// 头部中的一个字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub layer: Layer,
    pub name: &'static str,
    pub value: String,
}

impl HeaderField {
    fn new(layer: Layer, name: &'static str, value: impl ToString) -> Self {
        Self {
            layer,
            name,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {:<20} {}", self.layer.to_string(), self.name, self.value)
    }
}

/// 十六进制转储，附带 TTL 字节位置以便高亮
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDump {
    pub bytes: Vec<u8>,
    pub ttl_offset: usize,
}

impl HexDump {
    /// 单行、空格分隔
    pub fn compact(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for HexDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.bytes.chunks(16).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{:04x} ", row * 16)?;
            for (i, b) in chunk.iter().enumerate() {
                let offset = row * 16 + i;
                if offset == self.ttl_offset {
                    write!(f, "[{b:02x}]")?;
                } else {
                    write!(f, " {b:02x} ")?;
                }
            }
        }
        Ok(())
    }
}

/// 数据包展示器；`mode` 决定响应包中引用的原始探测包格式
#[derive(Debug, Clone, Copy)]
pub struct Presenter<'a> {
    topology: &'a Topology,
    mode: ProbeMode,
}

impl<'a> Presenter<'a> {
    pub fn new(topology: &'a Topology, mode: ProbeMode) -> Self {
        Self { topology, mode }
    }

    /// 逐层的头部字段
    pub fn fields(&self, packet: &Packet) -> Vec<HeaderField> {
        let mut fields = Vec::new();
        match packet {
            Packet::Probe { mode, ttl } => {
                fields.extend(self.ip_fields(
                    60,
                    *ttl,
                    packet.protocol(),
                    self.topology.source.address,
                    self.topology.destination.address,
                ));
                match mode {
                    ProbeMode::Udp => {
                        let port = packet.dst_port().unwrap_or_default();
                        fields.push(HeaderField::new(Layer::Udp, "Source Port", UDP_SOURCE_PORT));
                        fields.push(HeaderField::new(Layer::Udp, "Destination Port", port));
                        fields.push(HeaderField::new(Layer::Udp, "Length", 40));
                        fields.push(HeaderField::new(Layer::Udp, "Checksum", "0x8f3a"));
                    }
                    ProbeMode::Icmp => {
                        fields.push(HeaderField::new(
                            Layer::Icmp,
                            "Type",
                            format!("{ICMP_ECHO_REQUEST} (Echo Request)"),
                        ));
                        fields.push(HeaderField::new(Layer::Icmp, "Code", 0));
                        fields.push(HeaderField::new(Layer::Icmp, "Identifier", "0x1234"));
                        fields.push(HeaderField::new(Layer::Icmp, "Sequence", ttl));
                    }
                }
            }
            Packet::Response {
                from,
                icmp_type,
                icmp_code,
            } => {
                fields.extend(self.ip_fields(
                    56,
                    packet.ttl(),
                    packet.protocol(),
                    from,
                    self.topology.source.address,
                ));
                fields.push(HeaderField::new(
                    Layer::Icmp,
                    "Type",
                    format!("{icmp_type} (Time Exceeded)"),
                ));
                fields.push(HeaderField::new(
                    Layer::Icmp,
                    "Code",
                    format!("{icmp_code} (TTL exceeded in transit)"),
                ));
                fields.push(HeaderField::new(Layer::Icmp, "Checksum", "0x1f4a"));
                fields.push(HeaderField::new(
                    Layer::Icmp,
                    "Original Datagram",
                    "IPv4 header + first 8 bytes",
                ));
            }
        }
        fields
    }

    fn ip_fields(
        &self,
        total_len: u16,
        ttl: u8,
        protocol: u8,
        src: &str,
        dst: &str,
    ) -> Vec<HeaderField> {
        let proto_name = match protocol {
            super::packet::IPPROTO_UDP => "UDP",
            _ => "ICMP",
        };
        vec![
            HeaderField::new(Layer::Ipv4, "Version", 4),
            HeaderField::new(Layer::Ipv4, "IHL", 5),
            HeaderField::new(Layer::Ipv4, "Total Length", total_len),
            HeaderField::new(Layer::Ipv4, "Flags", "0x02 (DF)"),
            HeaderField::new(Layer::Ipv4, "TTL", ttl),
            HeaderField::new(Layer::Ipv4, "Protocol", format!("{protocol} ({proto_name})")),
            HeaderField::new(Layer::Ipv4, "Source", src),
            HeaderField::new(Layer::Ipv4, "Destination", dst),
        ]
    }

    /// 数据包的完整字节
    pub fn bytes(&self, packet: &Packet) -> Vec<u8> {
        match packet {
            Packet::Probe { .. } => {
                let mut out = self.probe_header(packet);
                out.extend_from_slice(&self.transport_header(packet));
                out.extend_from_slice(PAYLOAD);
                out
            }
            Packet::Response { from, .. } => {
                let mut out = RESPONSE_IPV4.to_vec();
                patch_addr(&mut out, SRC_ADDR, from);
                patch_addr(&mut out, DST_ADDR, self.topology.source.address);
                out.extend_from_slice(&TIME_EXCEEDED_HEADER);

                // 被引用的是当前跳的探测包；它的 TTL 到这里已是 1
                let probe = self.quoted_probe(from);
                let mut quoted = self.probe_header(&probe);
                quoted[TTL_OFFSET] = QUOTED_TTL;
                out.extend_from_slice(&quoted);
                out.extend_from_slice(&self.transport_header(&probe));
                out
            }
        }
    }

    pub fn hex_dump(&self, packet: &Packet) -> HexDump {
        HexDump {
            bytes: self.bytes(packet),
            ttl_offset: TTL_OFFSET,
        }
    }

    fn probe_header(&self, packet: &Packet) -> Vec<u8> {
        let mut header = PROBE_IPV4.to_vec();
        header[TTL_OFFSET] = packet.ttl();
        header[PROTOCOL_OFFSET] = packet.protocol();
        patch_addr(&mut header, SRC_ADDR, self.topology.source.address);
        patch_addr(&mut header, DST_ADDR, self.topology.destination.address);
        header
    }

    fn transport_header(&self, packet: &Packet) -> [u8; 8] {
        match packet {
            Packet::Probe {
                mode: ProbeMode::Udp,
                ..
            } => {
                let mut header = UDP_HEADER;
                if let Some(port) = packet.dst_port() {
                    header[2..4].copy_from_slice(&port.to_be_bytes());
                }
                header
            }
            Packet::Probe {
                mode: ProbeMode::Icmp,
                ttl,
            } => {
                let mut header = ICMP_ECHO_HEADER;
                header[6..8].copy_from_slice(&u16::from(*ttl).to_be_bytes());
                header
            }
            Packet::Response { .. } => TIME_EXCEEDED_HEADER,
        }
    }

    /// 响应方所在跳对应的探测包；未知地址按第 1 跳处理
    fn quoted_probe(&self, from: &str) -> Packet {
        let hop = self
            .topology
            .routers
            .iter()
            .position(|r| r.address == from)
            .map(|i| i + 1)
            .or_else(|| {
                (self.topology.destination.address == from)
                    .then(|| self.topology.routers.len() + 1)
            })
            .unwrap_or(1);
        Packet::probe(self.mode, u32::try_from(hop).unwrap_or(u32::MAX))
    }
}

fn patch_addr(buf: &mut [u8], range: Range<usize>, address: &str) {
    if let Ok(addr) = address.parse::<Ipv4Addr>() {
        buf[range].copy_from_slice(&addr.octets());
    }
}
