//! 监控控制器模块
//!
//! # 设计思路
//!
//! `MonitorController` 持有 `Idle` / `Running` 状态机，负责启停后台监控线程，
//! 并通过 `StatusListener` 把状态事件交给界面层：
//!
//! ```text
//!  Idle ──start()──▶ Running ──stop()──▶ Idle
//!   │                   │
//!   └─stop() → NotRunning └─start() → AlreadyRunning
//! ```
//!
//! # 实现思路
//!
//! - 停止是协作式的：`stop()` 只设置 `AtomicBool` 并立即返回、立即发出 `Idle`，
//!   线程最多再跑完当前周期（一个轮询间隔加一次 I/O）后自行退出，调用方不等待。
//! - 每次 `start()` 都新建一个停止标志，上一轮尚未退出的线程只看得到自己的标志。
//! - 去重基线不随 `stop()` / `start()` 清空，非图片内容也不会重置它。
//!   基线始终归当前线程私有：线程退出时经一次性通道按值交给下一轮线程，
//!   下一轮线程在自己的线程上等待交接后才开始轮询，`start()` 本身不阻塞。
//! - 因为要先等交接，快速 `stop()` → `start()` 时新旧两轮线程不会同时轮询，
//!   不会因为重叠而对同一张图片各存一份。
//! - 控制器被 `Drop` 时若仍在运行，会设置停止标志，避免遗留线程。

mod status;
mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use serde::Serialize;

use crate::clipboard::ClipboardSource;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::storage;

pub use status::{StatusEvent, StatusListener};
pub use worker::CycleOutcome;

/// 监控状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MonitorState {
    Idle,
    Running,
}

/// 剪贴板图片监控控制器
pub struct MonitorController {
    config: Arc<MonitorConfig>,
    source: Arc<dyn ClipboardSource>,
    listener: Arc<dyn StatusListener>,
    state: MonitorState,
    stop_flag: Option<Arc<AtomicBool>>,
    /// 最近一轮线程退出时交出的去重基线
    baseline_rx: Option<mpsc::Receiver<worker::Baseline>>,
}

impl MonitorController {
    /// 创建控制器，初始状态为 `Idle`
    ///
    /// # 参数
    /// * `config` - 输出目录、轮询间隔等固定参数
    /// * `source` - 剪贴板读取端，生产环境使用 `ArboardReader`
    /// * `listener` - 状态事件接收方
    pub fn new(
        config: MonitorConfig,
        source: Arc<dyn ClipboardSource>,
        listener: Arc<dyn StatusListener>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            source,
            listener,
            state: MonitorState::Idle,
            stop_flag: None,
            baseline_rx: None,
        }
    }

    /// 创建控制器，并返回接收状态事件的通道
    pub fn with_channel(
        config: MonitorConfig,
        source: Arc<dyn ClipboardSource>,
    ) -> (Self, mpsc::Receiver<StatusEvent>) {
        let (tx, rx) = mpsc::channel();
        let listener = Arc::new(status::channel_listener(tx));
        (Self::new(config, source, listener), rx)
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// 开始监控
    ///
    /// 仅允许在 `Idle` 状态调用。输出目录不存在时会先创建，
    /// 创建失败或线程无法启动时保持 `Idle` 并返回错误。
    pub fn start(&mut self) -> Result<(), MonitorError> {
        if self.state == MonitorState::Running {
            log::warn!("监控已在运行，忽略重复的 start 调用");
            return Err(MonitorError::AlreadyRunning);
        }

        storage::ensure_output_dir(&self.config.output_dir)?;

        let stop_flag = Arc::new(AtomicBool::new(false));
        let (handoff_tx, handoff_rx) = mpsc::channel();
        let worker = worker::Worker::new(
            Arc::clone(&self.config),
            Arc::clone(&self.source),
            Arc::clone(&self.listener),
            Arc::clone(&stop_flag),
        )
        .with_handoff(self.baseline_rx.take(), handoff_tx);

        thread::Builder::new()
            .name("clipboard-image-monitor".to_string())
            .spawn(move || worker.run())
            .map_err(MonitorError::Spawn)?;

        self.stop_flag = Some(stop_flag);
        self.baseline_rx = Some(handoff_rx);
        self.state = MonitorState::Running;
        log::info!("▶️ 开始监控剪贴板图片");
        self.listener.on_status(StatusEvent::Running);
        Ok(())
    }

    /// 停止监控
    ///
    /// 仅允许在 `Running` 状态调用。立即返回并发出 `Idle`，不等待线程退出。
    pub fn stop(&mut self) -> Result<(), MonitorError> {
        if self.state == MonitorState::Idle {
            log::warn!("监控未在运行，忽略 stop 调用");
            return Err(MonitorError::NotRunning);
        }

        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::Release);
        }
        self.state = MonitorState::Idle;
        log::info!("⏹️ 已请求停止监控");
        self.listener.on_status(StatusEvent::Idle);
        Ok(())
    }
}

impl Drop for MonitorController {
    fn drop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardSample;

    struct AlwaysEmpty;

    impl ClipboardSource for AlwaysEmpty {
        fn read_once(&self) -> ClipboardSample {
            ClipboardSample::Empty
        }
    }

    fn controller(dir: &std::path::Path) -> (MonitorController, mpsc::Receiver<StatusEvent>) {
        MonitorController::with_channel(MonitorConfig::new(dir), Arc::new(AlwaysEmpty))
    }

    #[test]
    fn starts_idle_and_emits_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (controller, rx) = controller(dir.path());
        assert_eq!(controller.state(), MonitorState::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stop_from_idle_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mut controller, rx) = controller(dir.path());
        assert!(matches!(controller.stop(), Err(MonitorError::NotRunning)));
        assert_eq!(controller.state(), MonitorState::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn start_twice_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mut controller, rx) = controller(dir.path());
        controller.start().expect("first start");
        assert!(matches!(controller.start(), Err(MonitorError::AlreadyRunning)));
        assert_eq!(controller.state(), MonitorState::Running);
        assert_eq!(rx.try_recv().expect("running event"), StatusEvent::Running);
        assert!(rx.try_recv().is_err());
        controller.stop().expect("stop");
    }

    #[test]
    fn start_stop_cycle_emits_events_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mut controller, rx) = controller(dir.path());

        for _ in 0..2 {
            controller.start().expect("start");
            controller.stop().expect("stop");
        }

        let events: Vec<StatusEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                StatusEvent::Running,
                StatusEvent::Idle,
                StatusEvent::Running,
                StatusEvent::Idle,
            ]
        );
        assert_eq!(controller.state(), MonitorState::Idle);
    }

    #[test]
    fn start_creates_missing_output_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("pictures");
        let (mut controller, _rx) = controller(&out);
        controller.start().expect("start");
        assert!(out.is_dir());
        controller.stop().expect("stop");
    }

    #[test]
    fn unusable_output_dir_keeps_controller_idle() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").expect("write file");
        let (mut controller, rx) = controller(&file);

        assert!(matches!(controller.start(), Err(MonitorError::Storage(_))));
        assert_eq!(controller.state(), MonitorState::Idle);
        assert!(rx.try_recv().is_err());
    }
}
