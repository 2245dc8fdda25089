//! 轮询工作线程
//!
//! 每个周期：读取剪贴板 → 去重 → 分配序号 → 编码写盘 → 通知界面，
//! 然后无论走了哪个分支都固定休眠一个轮询间隔，再检查停止标志。
//!
//! 周期内任何失败都只记日志，不会让循环退出；
//! 编码失败时不更新去重基线，下个周期会重试同一张图片。
//!
//! 去重基线跨会话保留：线程退出时把基线发给下一轮线程，
//! 下一轮线程开始轮询前先等上一轮交接完成，两轮之间不会并行。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use super::status::{StatusEvent, StatusListener};
use crate::clipboard::{self, ClipboardSample, ClipboardSource};
use crate::config::MonitorConfig;
use crate::storage::{self, SavedFile};

/// 单个周期的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 剪贴板里没有图片
    NoImage,
    /// 与上次保存的图片相同
    Duplicate,
    /// 保存成功
    Saved(SavedFile),
    /// 分配或编码失败，已记录日志
    Failed,
}

/// 去重基线：上一次成功保存的原始像素
pub(crate) type Baseline = Option<Vec<u8>>;

/// 监控线程的执行上下文
///
/// `last_saved` 只在本线程读写，无需同步；跨会话只通过通道按值交接。
pub(crate) struct Worker {
    config: Arc<MonitorConfig>,
    source: Arc<dyn ClipboardSource>,
    listener: Arc<dyn StatusListener>,
    stop_flag: Arc<AtomicBool>,
    last_saved: Baseline,
    predecessor: Option<mpsc::Receiver<Baseline>>,
    handoff: Option<mpsc::Sender<Baseline>>,
}

impl Worker {
    pub(crate) fn new(
        config: Arc<MonitorConfig>,
        source: Arc<dyn ClipboardSource>,
        listener: Arc<dyn StatusListener>,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            source,
            listener,
            stop_flag,
            last_saved: None,
            predecessor: None,
            handoff: None,
        }
    }

    /// 设置基线交接通道
    ///
    /// * `predecessor` - 上一轮线程退出时发来的基线，首轮为 `None`
    /// * `handoff` - 本线程退出时把基线发往下一轮
    pub(crate) fn with_handoff(
        mut self,
        predecessor: Option<mpsc::Receiver<Baseline>>,
        handoff: mpsc::Sender<Baseline>,
    ) -> Self {
        self.predecessor = predecessor;
        self.handoff = Some(handoff);
        self
    }

    /// 轮询直到观察到停止标志
    pub(crate) fn run(mut self) {
        if let Some(predecessor) = self.predecessor.take() {
            // 上一轮最多再跑一个周期
            match predecessor.recv() {
                Ok(baseline) => self.last_saved = baseline,
                Err(_) => log::warn!("上一轮监控线程未交接去重基线，从空基线开始"),
            }
        }

        log::info!("📋 剪贴板图片监控线程已启动: {}", self.config.output_dir.display());

        while !self.stop_flag.load(Ordering::Acquire) {
            let outcome = self.poll_once();
            log::trace!("⏱️ 周期结果: {:?}", outcome);
            thread::sleep(self.config.poll_interval);
        }

        if let Some(handoff) = self.handoff.take() {
            if handoff.send(self.last_saved.take()).is_err() {
                log::debug!("去重基线无人接收，丢弃");
            }
        }

        log::info!("📋 剪贴板图片监控线程已退出");
    }

    /// 执行一个轮询周期（不含休眠）
    pub(crate) fn poll_once(&mut self) -> CycleOutcome {
        let sample = self.source.read_once();
        self.process(sample)
    }

    fn process(&mut self, sample: ClipboardSample) -> CycleOutcome {
        if !clipboard::should_save(&sample, self.last_saved.as_deref()) {
            return match sample {
                ClipboardSample::Image(_) => {
                    log::trace!("⏭️  与上次保存的图片相同，跳过");
                    CycleOutcome::Duplicate
                }
                ClipboardSample::Empty | ClipboardSample::NonImage => CycleOutcome::NoImage,
            };
        }
        let ClipboardSample::Image(image) = sample else {
            return CycleOutcome::NoImage;
        };

        let target = match storage::allocate(&self.config.output_dir, &self.config.extension) {
            Ok(target) => target,
            Err(err) => {
                log::error!("分配文件序号失败: {}", err);
                return CycleOutcome::Failed;
            }
        };

        if let Err(err) = clipboard::encode_image(&image, &target.path, self.config.jpeg_quality) {
            log::error!("保存图片 {} 失败: {}", target.path.display(), err);
            return CycleOutcome::Failed;
        }

        log::info!("💾 已保存: {}", target.path.display());
        self.last_saved = Some(image.bytes);
        self.listener.on_status(StatusEvent::Saved {
            file_name: target.file_name(),
        });
        CycleOutcome::Saved(target)
    }
}
