//! 剪贴板管理模块
//!
//! # 设计思路
//!
//! 统一管理监控链路中与剪贴板内容相关的能力：
//! - **读取**：每个轮询周期查询一次系统剪贴板，得到一份 `ClipboardSample`
//! - **去重**：与上一次成功保存的像素内容比较，决定是否需要保存
//! - **保存**：将位图编码为 JPEG 写入磁盘
//!
//! # 实现思路
//!
//! - `ClipboardSource` 是读取端的抽象，生产环境使用 `ArboardReader`，
//!   测试中可注入脚本化的样本序列。
//! - 采样结果每周期新建、用完即弃，只有去重基线会跨周期保留（由监控线程独占）。
//! - 子模块按职责拆分：读取归 `reader`，去重归 `dedup`，编码落盘归 `save`。

pub mod dedup;
pub mod reader;
pub mod save;

pub use dedup::should_save;
pub use reader::ArboardReader;
pub use save::encode_image;

// ============================================================================
// 采样数据模型
// ============================================================================

/// 原始像素排列方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 每像素 4 字节，R G B A
    Rgba8,
    /// 每像素 4 字节，B G R A（Windows DIB 常见排列）
    Bgra8,
    /// 每像素 3 字节，R G B
    Rgb8,
}

impl PixelFormat {
    /// 每像素字节数
    pub fn channels(self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
            Self::Rgb8 => 3,
        }
    }
}

/// 从剪贴板解码出的位图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    /// 原始像素字节，去重即基于此比较
    pub bytes: Vec<u8>,
    pub format: PixelFormat,
}

impl ClipboardImage {
    pub fn new(width: usize, height: usize, bytes: Vec<u8>, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            bytes,
            format,
        }
    }

    /// 缓冲区长度是否与宽高、通道数一致
    pub fn has_consistent_layout(&self) -> bool {
        self.width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(self.format.channels()))
            .is_some_and(|expected| expected == self.bytes.len())
    }
}

/// 一次剪贴板查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSample {
    /// 剪贴板为空或只有空白文本
    Empty,
    /// 有内容但不是位图（文本、文件等），或读取失败
    NonImage,
    /// 位图
    Image(ClipboardImage),
}

impl ClipboardSample {
    pub fn as_image(&self) -> Option<&ClipboardImage> {
        match self {
            Self::Image(image) => Some(image),
            Self::Empty | Self::NonImage => None,
        }
    }
}

// ============================================================================
// 读取端抽象
// ============================================================================

/// 剪贴板读取端
///
/// 实现方不得返回错误：任何系统级失败都折算为 `ClipboardSample::NonImage`。
/// 监控线程会跨线程持有实现，因此要求 `Send + Sync`。
pub trait ClipboardSource: Send + Sync {
    /// 查询一次剪贴板
    fn read_once(&self) -> ClipboardSample;
}
