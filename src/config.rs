//! # 监控配置模块
//!
//! ## 设计思路
//!
//! 监控器的可调参数（输出目录、轮询间隔、扩展名、JPEG 质量）集中到
//! `MonitorConfig`，由界面层在构造控制器时一次性给定，之后不再变化。
//! 核心本身不读取配置文件，也不解析命令行参数。
//!
//! ## 实现思路
//!
//! - `Default` 提供与桌面版一致的固定值：图片目录、500ms、`jpg`、质量 75。
//! - 图片目录通过 `dirs` 解析，取不到时依次回退到 `~/Pictures` 与当前目录。

use std::path::PathBuf;
use std::time::Duration;

/// 默认轮询间隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 默认输出扩展名（有损压缩格式）
pub const DEFAULT_EXTENSION: &str = "jpg";

/// 默认 JPEG 质量
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// 剪贴板图片监控配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// 图片保存目录。
    pub output_dir: PathBuf,
    /// 两次轮询之间的固定间隔。
    pub poll_interval: Duration,
    /// 文件扩展名（不含点）。
    pub extension: String,
    /// JPEG 编码质量（1-100）。
    pub jpeg_quality: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(default_output_dir())
    }
}

impl MonitorConfig {
    /// 使用指定输出目录，其余参数取默认值。
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            extension: DEFAULT_EXTENSION.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }
}

/// 用户图片目录
///
/// 优先 `dirs::picture_dir()`，其次 `<home>/Pictures`，最后当前目录。
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}
