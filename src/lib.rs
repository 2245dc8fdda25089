//! # 剪贴板图片保存工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              界面层（按钮 / 状态栏，外部协作者）          │
//! │                start() / stop()   ↑ StatusEvent          │
//! └──────────────────────┼────────────┼──────────────────────┘
//!                        ↓            │ (StatusListener / mpsc)
//! ┌──────────────────────┼────────────┼──────────────────────┐
//! │  monitor ── MonitorController (Idle ⇄ Running)           │
//! │     └─ worker ── 轮询线程：读取 → 去重 → 分配 → 编码      │
//! │                                                          │
//! │  clipboard ── ClipboardSample / ClipboardSource          │
//! │     ├─ reader   arboard 读取                             │
//! │     ├─ dedup    像素去重                                 │
//! │     └─ save     JPEG 编码写盘                            │
//! │                                                          │
//! │  storage ──── 四位连番文件名分配                          │
//! │  config ───── 输出目录 / 轮询间隔 / 质量                  │
//! │  error ────── MonitorError                               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `MonitorError` |
//! | [`config`] | 构造时确定的固定参数 `MonitorConfig` |
//! | [`clipboard`] | 剪贴板采样模型、arboard 读取、去重判定、JPEG 保存 |
//! | [`storage`] | 扫描输出目录，计算下一个 `NNNN.jpg` |
//! | [`monitor`] | 启停状态机、后台轮询线程、状态事件 |

pub mod clipboard;
pub mod config;
pub mod error;
pub mod monitor;
pub mod storage;

pub use clipboard::{ArboardReader, ClipboardImage, ClipboardSample, ClipboardSource, PixelFormat};
pub use config::MonitorConfig;
pub use error::MonitorError;
pub use monitor::{CycleOutcome, MonitorController, MonitorState, StatusEvent, StatusListener};
pub use storage::SavedFile;
