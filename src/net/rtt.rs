//! 往返时延采样
//!
//! 在基准值上叠加 ±20% 的均匀抖动，保留一位小数，下限 0.1ms。

use rand::Rng;

pub const JITTER_FRACTION: f64 = 0.2;
pub const MIN_RTT_MS: f64 = 0.1;

/// 每一跳采样的次数（与 traceroute 默认的 3 个探测一致）
pub const PROBES_PER_HOP: usize = 3;

/// 从基准值采样一次时延（毫秒）
pub fn sample<R: Rng + ?Sized>(baseline_ms: f64, rng: &mut R) -> f64 {
    let jitter = rng.gen_range(-JITTER_FRACTION..=JITTER_FRACTION);
    let raw = baseline_ms + baseline_ms * jitter;
    ((raw * 10.0).round() / 10.0).max(MIN_RTT_MS)
}

/// 使用线程本地 RNG 采样
pub fn sample_default(baseline_ms: f64) -> f64 {
    sample(baseline_ms, &mut rand::thread_rng())
}

/// 一跳的三次采样
pub fn sample_probes<R: Rng + ?Sized>(baseline_ms: f64, rng: &mut R) -> [f64; PROBES_PER_HOP] {
    std::array::from_fn(|_| sample(baseline_ms, &mut *rng))
}
