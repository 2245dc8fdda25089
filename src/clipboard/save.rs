//! 剪贴板图片保存模块
//!
//! # 设计思路
//!
//! 将剪贴板位图统一转换为 3 通道 RGB（丢弃 alpha），以有损 JPEG 写入目标路径。
//! 目标文件存在时直接覆盖：正常分配序号的情况下不会发生，这里不做额外防护。
//!
//! # 实现思路
//!
//! - 先校验缓冲区长度，不合法时返回 `UnsupportedLayout`，不会留下空文件。
//! - RGBA 走 `image` 的通道转换，BGRA 手动重排，RGB 直接包装。
//! - 使用 `BufWriter` + `JpegEncoder`，结束后显式 `flush`，写盘错误不被 `Drop` 吞掉。
//! - 文件已创建但编码或写盘失败时删除残留文件，避免半截的 `NNNN.jpg` 占用序号。
//! - 所有失败都以 `MonitorError` 返回给调用方，由监控线程记录日志后继续。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};

use super::{ClipboardImage, PixelFormat};
use crate::error::MonitorError;

fn layout_error(image: &ClipboardImage) -> MonitorError {
    MonitorError::UnsupportedLayout {
        width: image.width,
        height: image.height,
        format: image.format,
        actual: image.bytes.len(),
    }
}

/// 转换为 RGB8 缓冲区
fn to_rgb(image: &ClipboardImage) -> Result<RgbImage, MonitorError> {
    if !image.has_consistent_layout() {
        return Err(layout_error(image));
    }
    let width = u32::try_from(image.width).map_err(|_| layout_error(image))?;
    let height = u32::try_from(image.height).map_err(|_| layout_error(image))?;

    let rgb = match image.format {
        PixelFormat::Rgb8 => RgbImage::from_raw(width, height, image.bytes.clone()),
        PixelFormat::Rgba8 => RgbaImage::from_raw(width, height, image.bytes.clone())
            .map(|rgba| DynamicImage::ImageRgba8(rgba).into_rgb8()),
        PixelFormat::Bgra8 => {
            let swapped = image
                .bytes
                .chunks_exact(4)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect();
            RgbImage::from_raw(width, height, swapped)
        }
    };

    rgb.ok_or_else(|| layout_error(image))
}

fn write_jpeg(file: File, rgb: &RgbImage, quality: u8) -> Result<(), MonitorError> {
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(rgb)?;
    writer.flush()?;
    Ok(())
}

// ============================================================================
// 编码并写入
// ============================================================================

/// 将位图编码为 JPEG 写入 `path`
///
/// # 参数
/// * `image` - 剪贴板位图
/// * `path` - 目标文件，存在时覆盖
/// * `quality` - JPEG 质量（1-100）
pub fn encode_image(image: &ClipboardImage, path: &Path, quality: u8) -> Result<(), MonitorError> {
    let rgb = to_rgb(image)?;

    let file = File::create(path)?;
    if let Err(err) = write_jpeg(file, &rgb, quality) {
        if let Err(remove_err) = fs::remove_file(path) {
            log::warn!("清理未写完的文件 {} 失败: {}", path.display(), remove_err);
        }
        return Err(err);
    }

    log::debug!(
        "🖼️ 已编码 {}x{} 图片 -> {}",
        rgb.width(),
        rgb.height(),
        path.display()
    );
    Ok(())
}
