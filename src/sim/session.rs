//! 运行会话
//!
//! 在工作线程上运行控制器，并向展示层暴露控制入口：
//! 开始、暂停 / 继续、重置、单步推进、切换单步模式、状态快照。

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::RunConfig;
use super::control::{RunControl, RunState};
use super::controller::RunController;
use super::error::SimError;
use super::observer::RunObserver;
use super::outcome::RunReport;
use super::time::PhaseTimings;
use crate::topo::Topology;

/// 可在任意线程使用的控制句柄
#[derive(Debug, Clone)]
pub struct RunHandle {
    control: Arc<RunControl>,
}

impl RunHandle {
    pub fn state(&self) -> RunState {
        self.control.snapshot()
    }

    pub fn pause(&self) -> bool {
        self.control.pause()
    }

    pub fn resume(&self) -> bool {
        self.control.resume()
    }

    pub fn toggle_pause(&self) -> bool {
        self.control.toggle_pause()
    }

    pub fn advance_step(&self) -> bool {
        self.control.advance_step()
    }

    pub fn set_step_mode(&self, on: bool) {
        self.control.set_step_mode(on);
    }

    /// 取消运行并清零状态
    pub fn reset(&self) {
        self.control.reset();
    }

    pub fn wait_until(
        &self,
        timeout: Duration,
        pred: impl FnMut(&RunState) -> bool,
    ) -> Option<RunState> {
        self.control.wait_until(timeout, pred)
    }
}

/// 一次运行：工作线程 + 控制句柄
pub struct Session<O> {
    handle: RunHandle,
    worker: JoinHandle<(RunReport, O)>,
}

impl<O: RunObserver + Send + 'static> Session<O> {
    pub fn start(
        config: RunConfig,
        mut controller: RunController,
        mut observer: O,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let control = Arc::new(RunControl::new(&config));
        let worker_control = Arc::clone(&control);

        let worker = thread::Builder::new()
            .name("traceroute-sim".to_string())
            .spawn(move || {
                let report = controller.run(&config, &worker_control, &mut observer);
                (report, observer)
            })
            .map_err(SimError::Spawn)?;

        debug!(?config, "会话已启动");
        Ok(Self {
            handle: RunHandle { control },
            worker,
        })
    }

    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> RunState {
        self.handle.state()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// 等待运行结束，取回报告与观察者
    pub fn join(self) -> Result<(RunReport, O), SimError> {
        self.worker.join().map_err(|_| SimError::WorkerPanicked)
    }

    /// 取消、清零并等待工作线程退出
    pub fn reset(self) -> Result<(RunReport, O), SimError> {
        self.handle.reset();
        self.join()
    }
}

/// 长生命周期的入口：同一时刻最多一个活动会话
pub struct Tracer<O> {
    topology: Topology,
    timings: PhaseTimings,
    seed: Option<u64>,
    runs: u64,
    active: Option<Session<O>>,
}

impl<O: RunObserver + Send + 'static> Tracer<O> {
    pub fn new(topology: Topology, timings: PhaseTimings) -> Self {
        Self {
            topology,
            timings,
            seed: None,
            runs: 0,
            active: None,
        }
    }

    /// 第 n 次运行使用 `seed + n`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.state().running && !s.is_finished())
    }

    pub fn start(&mut self, config: RunConfig, observer: O) -> Result<RunHandle, SimError> {
        if self.is_running() {
            warn!("已有运行中的 traceroute，忽略 start");
            return Err(SimError::AlreadyRunning);
        }
        config.validate()?;
        if let Some(previous) = self.active.take() {
            // 上一次运行已结束，只回收线程
            previous.join()?;
        }

        let mut controller = RunController::new(self.topology.clone(), self.timings);
        if let Some(seed) = self.seed {
            controller = controller.with_seed(seed.wrapping_add(self.runs));
        }
        self.runs = self.runs.wrapping_add(1);

        let session = Session::start(config, controller, observer)?;
        let handle = session.handle();
        self.active = Some(session);
        info!(run = self.runs, "🚀 开始新的运行");
        Ok(handle)
    }

    pub fn handle(&self) -> Option<RunHandle> {
        self.active.as_ref().map(Session::handle)
    }

    /// 当前状态；没有会话时为默认的空闲状态
    pub fn state(&self) -> RunState {
        self.active
            .as_ref()
            .map(Session::state)
            .unwrap_or_default()
    }

    /// 等待当前运行结束
    pub fn wait(&mut self) -> Result<Option<(RunReport, O)>, SimError> {
        self.active.take().map(Session::join).transpose()
    }

    /// 取消当前运行并回到初始状态
    pub fn reset(&mut self) -> Result<Option<(RunReport, O)>, SimError> {
        self.active.take().map(Session::reset).transpose()
    }
}
