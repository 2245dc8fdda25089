//! 输出目录与连番文件名管理模块
//!
//! # 设计思路
//!
//! 保存的图片按 `0001.jpg`、`0002.jpg` … 顺序命名。下一个序号不单独持久化，
//! 每次分配时重新扫描输出目录，取现有合法序号的最大值加一，
//! 因此进程重启、外部删除文件后都能自然接续。
//!
//! # 实现思路
//!
//! - 文件名必须是「恰好四位 ASCII 数字 + `.` + 扩展名」，其余条目一律静默跳过。
//! - 扩展名按 ASCII 忽略大小写匹配，避免大小写不敏感的文件系统上覆盖 `0007.JPG`。
//! - 已有空洞（外部删除）不回填，只取最大值加一。
//! - 最大值为 9999 时返回 `SequenceExhausted`，既不回绕也不加宽字段。
//! - 扫描与写入之间不加锁：两次分配之间若没有落盘，会拿到同一个序号。
//!   单目录只有一个监控线程，这个窗口在当前设计下不会触发。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::MonitorError;

/// 序号位数
pub const SEQUENCE_DIGITS: usize = 4;

/// 四位序号上限
pub const MAX_SEQUENCE: u32 = 9999;

/// 一次成功分配的保存目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    pub sequence_number: u32,
    pub path: PathBuf,
}

impl SavedFile {
    /// 不含目录的文件名，例如 `0008.jpg`
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// 生成序号对应的文件名
pub fn sequence_file_name(sequence_number: u32, extension: &str) -> String {
    format!("{:0width$}.{}", sequence_number, extension, width = SEQUENCE_DIGITS)
}

/// 解析连番文件名，不符合命名规则时返回 `None`
pub fn parse_sequence_name(file_name: &str, extension: &str) -> Option<u32> {
    let (stem, ext) = file_name.split_once('.')?;
    if !ext.eq_ignore_ascii_case(extension) {
        return None;
    }
    if stem.len() != SEQUENCE_DIGITS || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// 计算目录中下一个可用序号
///
/// # 返回
/// - `Ok(n)`：现有最大序号加一；没有任何合法文件时为 1
/// - `Err(MonitorError::Io)`：目录无法读取
/// - `Err(MonitorError::SequenceExhausted)`：已存在 `9999`
pub fn next_sequence_number(dir: &Path, extension: &str) -> Result<u32, MonitorError> {
    let mut max_found = 0;

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("跳过无法读取的目录条目: {}", err);
                continue;
            }
        };
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(number) = parse_sequence_name(name, extension) {
            max_found = max_found.max(number);
        }
    }

    if max_found >= MAX_SEQUENCE {
        return Err(MonitorError::SequenceExhausted { max: MAX_SEQUENCE });
    }
    Ok(max_found + 1)
}

/// 分配下一个保存目标（仅计算路径，不创建文件）
pub fn allocate(dir: &Path, extension: &str) -> Result<SavedFile, MonitorError> {
    let sequence_number = next_sequence_number(dir, extension)?;
    Ok(SavedFile {
        sequence_number,
        path: dir.join(sequence_file_name(sequence_number, extension)),
    })
}

/// 确保输出目录存在
///
/// 目录不存在时自动 `create_dir_all`；路径存在但不是目录时报错。
pub fn ensure_output_dir(dir: &Path) -> Result<(), MonitorError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(MonitorError::Storage(format!(
            "'{}' 不是目录",
            dir.display()
        )));
    }
    fs::create_dir_all(dir).map_err(|e| {
        MonitorError::Storage(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
    })
}
