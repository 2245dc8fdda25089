//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `MonitorError` 枚举，覆盖监控链路中所有可能失败的环节：
//! 状态机误用、输出目录不可用、序号耗尽、图片编码与文件写入。
//!
//! 轮询周期内部的错误只会被记录日志后丢弃，不会终止监控线程；
//! 调用方唯一能直接看到的是 `start` / `stop` 的误用与目录/线程创建失败。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `std::io::Error` 与 `image::ImageError` 提供 `From` 转换，`?` 直接传播。
//! - 实现 `Serialize` 将错误序列化为字符串，界面层可原样转发。

use serde::Serialize;

/// 监控器统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// 监控已在运行时再次调用 `start`
    #[error("监控已在运行中")]
    AlreadyRunning,

    /// 监控未运行时调用 `stop`
    #[error("监控未在运行")]
    NotRunning,

    /// 输出目录不可用
    #[error("输出目录不可用: {0}")]
    Storage(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 图片编码失败
    #[error("图片编码失败: {0}")]
    Image(#[from] image::ImageError),

    /// 像素缓冲区与宽高/通道数不匹配
    #[error("不支持的像素布局: {width}x{height} {format:?}，实际 {actual} 字节")]
    UnsupportedLayout {
        width: usize,
        height: usize,
        format: crate::clipboard::PixelFormat,
        actual: usize,
    },

    /// 四位序号已用尽
    #[error("序号已用尽（上限 {max}）")]
    SequenceExhausted { max: u32 },

    /// 无法创建监控线程
    #[error("创建监控线程失败: {0}")]
    Spawn(std::io::Error),
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for MonitorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
