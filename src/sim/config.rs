//! 运行配置

use serde::Serialize;

use super::error::{MAX_TTL, SimError};
use crate::net::ProbeMode;

pub const DEFAULT_MAX_HOPS: u32 = 8;

/// 一次运行的配置。运行期间只有 `step_mode` 可以通过控制句柄切换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub max_hops: u32,
    pub mode: ProbeMode,
    pub step_mode: bool,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_hops == 0 || self.max_hops > MAX_TTL {
            return Err(SimError::InvalidMaxHops(self.max_hops));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            mode: ProbeMode::Udp,
            step_mode: false,
        }
    }
}
