//! 运行控制
//!
//! 单次运行的共享状态 `RunState` 以及暂停 / 单步 / 取消信号。
//! 工作线程在挂起点等待条件变量；控制端修改状态后 `notify_all`。
//! 单步信号是单槽的：等待者消费之前的多次推进会合并成一次。

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace};

use super::config::RunConfig;
use super::error::Cancelled;
use super::phase::Phase;

/// 运行状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    pub running: bool,
    pub paused: bool,
    pub step_mode: bool,
    /// 单步模式下正阻塞等待推进信号
    pub awaiting_advance: bool,
    pub current_hop: u32,
    pub phase: Phase,
}

impl RunState {
    /// 状态栏文字：`Ready`、`Running`、`Paused`
    pub fn label(&self) -> &'static str {
        if self.paused {
            "Paused"
        } else if self.running {
            "Running"
        } else {
            "Ready"
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: RunState,
    advance_pending: bool,
}

/// 一次运行的控制对象，由工作线程与控制句柄共享
#[derive(Debug, Default)]
pub struct RunControl {
    shared: Mutex<Shared>,
    wake: Condvar,
}

impl RunControl {
    /// 新运行：`running = true`，单步模式取自配置
    pub fn new(config: &RunConfig) -> Self {
        Self {
            shared: Mutex::new(Shared {
                state: RunState {
                    running: true,
                    step_mode: config.step_mode,
                    ..RunState::default()
                },
                advance_pending: false,
            }),
            wake: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock()
    }

    fn update(&self, f: impl FnOnce(&mut Shared) -> bool) -> bool {
        let mut shared = self.lock();
        let changed = f(&mut shared);
        if changed {
            self.wake.notify_all();
        }
        changed
    }

    pub fn snapshot(&self) -> RunState {
        self.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.lock().state.running
    }

    /// 暂停；单步模式或未运行时无效。返回状态是否改变。
    pub fn pause(&self) -> bool {
        self.update(|s| {
            if !s.state.running || s.state.step_mode || s.state.paused {
                return false;
            }
            s.state.paused = true;
            debug!(hop = s.state.current_hop, phase = ?s.state.phase, "⏸️  暂停");
            true
        })
    }

    pub fn resume(&self) -> bool {
        self.update(|s| {
            if !s.state.paused {
                return false;
            }
            s.state.paused = false;
            debug!(hop = s.state.current_hop, phase = ?s.state.phase, "▶️  继续");
            true
        })
    }

    /// 切换暂停，返回切换后的 `paused`
    pub fn toggle_pause(&self) -> bool {
        if !self.pause() {
            self.resume();
        }
        self.snapshot().paused
    }

    /// 切换单步模式；打开时清除暂停，关闭时丢弃未消费的推进信号
    pub fn set_step_mode(&self, on: bool) {
        self.update(|s| {
            s.state.step_mode = on;
            if on {
                s.state.paused = false;
            } else {
                s.advance_pending = false;
            }
            debug!(step_mode = on, "切换单步模式");
            true
        });
    }

    /// 发送推进信号；只在运行中的单步模式下有效
    pub fn advance_step(&self) -> bool {
        self.update(|s| {
            if !s.state.running || !s.state.step_mode {
                return false;
            }
            s.advance_pending = true;
            trace!(hop = s.state.current_hop, phase = ?s.state.phase, "推进信号");
            true
        })
    }

    /// 取消运行；在下一个挂起点生效
    pub fn cancel(&self) {
        self.update(|s| {
            s.state.running = false;
            s.state.paused = false;
            s.advance_pending = false;
            true
        });
    }

    /// 取消并把跳数、阶段清零
    pub fn reset(&self) {
        self.update(|s| {
            s.state = RunState {
                step_mode: s.state.step_mode,
                ..RunState::default()
            };
            s.advance_pending = false;
            true
        });
    }

    /// 运行结束（任何终止状态）
    pub(crate) fn finish(&self) {
        self.update(|s| {
            s.state.running = false;
            s.state.paused = false;
            s.state.awaiting_advance = false;
            s.state.phase = Phase::Idle;
            true
        });
    }

    /// 进入第 `hop` 跳；跳数只增不减
    pub(crate) fn begin_hop(&self, hop: u32) -> Result<(), Cancelled> {
        let mut shared = self.lock();
        if !shared.state.running {
            return Err(Cancelled);
        }
        debug_assert!(hop >= shared.state.current_hop, "hop index went backwards");
        shared.state.current_hop = shared.state.current_hop.max(hop);
        self.wake.notify_all();
        Ok(())
    }

    pub(crate) fn enter_phase(&self, phase: Phase) -> Result<(), Cancelled> {
        let mut shared = self.lock();
        if !shared.state.running {
            return Err(Cancelled);
        }
        shared.state.phase = phase;
        self.wake.notify_all();
        Ok(())
    }

    /// 阶段挂起点：单步模式等待推进信号，否则等待 `delay`（暂停时冻结）
    pub(crate) fn gate_phase(&self, delay: Duration) -> Result<(), Cancelled> {
        self.gate(delay, true)
    }

    /// 两跳之间的挂起点：单步模式下不等待
    pub(crate) fn gate_between_hops(&self, delay: Duration) -> Result<(), Cancelled> {
        self.gate(delay, false)
    }

    fn gate(&self, delay: Duration, step_gated: bool) -> Result<(), Cancelled> {
        let mut shared = self.lock();
        let mut remaining = delay;
        loop {
            if !shared.state.running {
                shared.state.awaiting_advance = false;
                return Err(Cancelled);
            }
            if shared.state.step_mode {
                if !step_gated {
                    return Ok(());
                }
                if shared.advance_pending {
                    shared.advance_pending = false;
                    shared.state.awaiting_advance = false;
                    self.wake.notify_all();
                    return Ok(());
                }
                if !shared.state.awaiting_advance {
                    shared.state.awaiting_advance = true;
                    self.wake.notify_all();
                }
                self.wake.wait(&mut shared);
                continue;
            }
            if shared.state.awaiting_advance {
                // 等待期间切回了普通模式
                shared.state.awaiting_advance = false;
                self.wake.notify_all();
            }
            if shared.state.paused {
                self.wake.wait(&mut shared);
                continue;
            }
            if remaining.is_zero() {
                return Ok(());
            }
            let started = Instant::now();
            self.wake.wait_for(&mut shared, remaining);
            remaining = remaining.saturating_sub(started.elapsed());
        }
    }

    /// 阻塞直到 `pred` 成立或超时；返回满足条件时的快照
    pub fn wait_until(
        &self,
        timeout: Duration,
        mut pred: impl FnMut(&RunState) -> bool,
    ) -> Option<RunState> {
        let deadline = Instant::now() + timeout;
        let mut shared = self.lock();
        loop {
            if pred(&shared.state) {
                return Some(shared.state);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            self.wake.wait_for(&mut shared, deadline - now);
        }
    }
}
