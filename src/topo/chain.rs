//! 链式拓扑
//!
//! traceroute 演示使用的固定路径：
//! 源主机 -> 网关 -> ISP 路由器 1 -> ISP 路由器 2 -> 骨干路由器 -> 目的主机（Google DNS）。

use serde::Serialize;

/// 源主机（发出探测包的一端）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceHost {
    pub address: &'static str,
    pub name: &'static str,
    pub mac: &'static str,
}

/// 路径上的一跳（路由器或目的主机）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterHop {
    pub address: &'static str,
    pub name: &'static str,
    pub mac: &'static str,
    /// 基准往返时延（毫秒）
    pub baseline_ms: f64,
}

impl RouterHop {
    pub const fn new(
        address: &'static str,
        name: &'static str,
        mac: &'static str,
        baseline_ms: f64,
    ) -> Self {
        Self {
            address,
            name,
            mac,
            baseline_ms,
        }
    }
}

/// 某一跳的响应方
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Responder {
    Router(RouterHop),
    Destination(RouterHop),
}

impl Responder {
    pub fn node(&self) -> &RouterHop {
        match self {
            Responder::Router(node) | Responder::Destination(node) => node,
        }
    }

    pub fn is_destination(&self) -> bool {
        matches!(self, Responder::Destination(_))
    }
}

/// 固定拓扑表，运行期间不可变。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topology {
    pub source: SourceHost,
    pub routers: Vec<RouterHop>,
    pub destination: RouterHop,
    /// 终端输出中目的主机的域名
    pub destination_label: &'static str,
}

impl Topology {
    pub fn new(
        source: SourceHost,
        routers: Vec<RouterHop>,
        destination: RouterHop,
        destination_label: &'static str,
    ) -> Self {
        Self {
            source,
            routers,
            destination,
            destination_label,
        }
    }

    /// 演示拓扑：4 个路由器 + 目的主机
    pub fn classic() -> Self {
        Self::new(
            SourceHost {
                address: "192.168.1.100",
                name: "Your Computer",
                mac: "00:1a:2b:3c:4d:5e",
            },
            vec![
                RouterHop::new("192.168.1.1", "Gateway Router", "00:50:56:12:34:56", 1.0),
                RouterHop::new("10.0.1.1", "ISP Router 1", "00:90:f5:ab:cd:ef", 5.0),
                RouterHop::new("10.0.2.1", "ISP Router 2", "00:d0:59:12:ab:cd", 12.0),
                RouterHop::new("203.0.113.1", "Backbone Router", "00:a0:24:ef:12:34", 25.0),
            ],
            RouterHop::new("8.8.8.8", "Google DNS", "00:1f:f3:56:78:9a", 45.0),
            "google.com",
        )
    }

    pub fn router_count(&self) -> usize {
        self.routers.len()
    }

    /// 到达目的主机所需的跳数（路由器数 + 1）
    pub fn path_len(&self) -> u32 {
        u32::try_from(self.routers.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    /// 第 `hop` 跳（从 1 开始）的响应方；超出路由器数量时为目的主机。
    pub fn responder(&self, hop: u32) -> Responder {
        let index = hop.saturating_sub(1) as usize;
        match self.routers.get(index) {
            Some(router) => Responder::Router(router.clone()),
            None => Responder::Destination(self.destination.clone()),
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::classic()
    }
}
