//! 去重判定
//!
//! 只比较原始像素字节。非图片样本永远不触发保存，也不会改动基线：
//! 复制一段文字后再复制回同一张图片，仍会被识别为重复。

use super::ClipboardSample;

/// 判断样本是否需要保存
///
/// 仅当样本为图片，且像素与上次保存的内容不同（或尚未保存过）时返回 `true`。
pub fn should_save(sample: &ClipboardSample, last_saved: Option<&[u8]>) -> bool {
    match sample {
        ClipboardSample::Image(image) => last_saved != Some(image.bytes.as_slice()),
        ClipboardSample::Empty | ClipboardSample::NonImage => false,
    }
}
