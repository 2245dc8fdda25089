//! 系统剪贴板读取（arboard）
//!
//! 每次轮询新建一个 `arboard::Clipboard`，读取完立即释放，
//! 不在两次轮询之间占用系统剪贴板。
//!
//! 图片判断依赖 arboard 的格式协商（类型判断），不看内容：
//! - `get_image` 成功 → `Image`（RGBA8）
//! - 没有图片格式 → 再探测文本：空白或不存在为 `Empty`，否则 `NonImage`
//! - 其他系统错误（被占用、转换失败等）→ `NonImage`，仅记 debug 日志

use super::{ClipboardImage, ClipboardSample, ClipboardSource, PixelFormat};

/// 基于 `arboard` 的剪贴板读取端
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardReader;

impl ArboardReader {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSource for ArboardReader {
    fn read_once(&self) -> ClipboardSample {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(err) => {
                log::debug!("打开剪贴板失败，本周期视为无图片: {}", err);
                return ClipboardSample::NonImage;
            }
        };

        match clipboard.get_image() {
            Ok(image_data) => sample_from_image(image_data),
            Err(arboard::Error::ContentNotAvailable) => sample_from_text(clipboard.get_text()),
            Err(err) => {
                log::debug!("读取剪贴板图片失败，本周期视为无图片: {}", err);
                ClipboardSample::NonImage
            }
        }
    }
}

fn sample_from_image(image_data: arboard::ImageData<'_>) -> ClipboardSample {
    ClipboardSample::Image(ClipboardImage::new(
        image_data.width,
        image_data.height,
        image_data.bytes.into_owned(),
        PixelFormat::Rgba8,
    ))
}

fn sample_from_text(text: Result<String, arboard::Error>) -> ClipboardSample {
    match text {
        Ok(text) if text.trim().is_empty() => ClipboardSample::Empty,
        Ok(_) => ClipboardSample::NonImage,
        Err(arboard::Error::ContentNotAvailable) => ClipboardSample::Empty,
        Err(err) => {
            log::debug!("探测剪贴板文本失败: {}", err);
            ClipboardSample::NonImage
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn image_data_becomes_rgba_sample() {
        let sample = sample_from_image(arboard::ImageData {
            width: 1,
            height: 2,
            bytes: Cow::Owned(vec![1, 2, 3, 4, 5, 6, 7, 8]),
        });
        let image = sample.as_image().expect("image sample");
        assert_eq!((image.width, image.height), (1, 2));
        assert_eq!(image.format, PixelFormat::Rgba8);
        assert_eq!(image.bytes, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(image.has_consistent_layout());
    }

    #[test]
    fn blank_or_missing_text_is_empty() {
        assert_eq!(sample_from_text(Ok(String::new())), ClipboardSample::Empty);
        assert_eq!(sample_from_text(Ok(" \n\t".to_string())), ClipboardSample::Empty);
        assert_eq!(
            sample_from_text(Err(arboard::Error::ContentNotAvailable)),
            ClipboardSample::Empty
        );
    }

    #[test]
    fn text_content_is_non_image() {
        assert_eq!(sample_from_text(Ok("hello".to_string())), ClipboardSample::NonImage);
    }

    #[test]
    fn os_failures_are_non_image() {
        assert_eq!(
            sample_from_text(Err(arboard::Error::ClipboardOccupied)),
            ClipboardSample::NonImage
        );
    }
}
