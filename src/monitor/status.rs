//! 状态通知
//!
//! 监控线程从不直接改动界面状态，只把 `StatusEvent` 交给 `StatusListener`，
//! 由界面层自行决定在哪个线程上渲染（事件队列、主线程回调等）。

use std::fmt;
use std::sync::mpsc;

/// 发给界面层的状态事件
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatusEvent {
    /// 已停止 / 待机
    Idle,
    /// 监控中
    Running,
    /// 已保存新图片
    #[serde(rename_all = "camelCase")]
    Saved { file_name: String },
}

/// 状态栏文案
impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("已停止"),
            Self::Running => f.write_str("监控中..."),
            Self::Saved { file_name } => write!(f, "已保存: {}", file_name),
        }
    }
}

/// 状态事件接收方
///
/// 可能在监控线程上被调用，实现方需自行保证线程安全。
pub trait StatusListener: Send + Sync {
    fn on_status(&self, event: StatusEvent);
}

impl<F> StatusListener for F
where
    F: Fn(StatusEvent) + Send + Sync,
{
    fn on_status(&self, event: StatusEvent) {
        self(event)
    }
}

/// 将事件转发到 `mpsc` 通道的监听器
///
/// 接收端被丢弃后事件静默丢弃，不影响监控线程。
pub(crate) fn channel_listener(
    tx: mpsc::Sender<StatusEvent>,
) -> impl StatusListener + 'static {
    move |event: StatusEvent| {
        if tx.send(event).is_err() {
            log::debug!("状态事件接收端已关闭，丢弃事件");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let idle = serde_json::to_value(StatusEvent::Idle).expect("serialize");
        assert_eq!(idle, serde_json::json!({ "kind": "idle" }));

        let saved = serde_json::to_value(StatusEvent::Saved {
            file_name: "0008.jpg".to_string(),
        })
        .expect("serialize");
        assert_eq!(saved, serde_json::json!({ "kind": "saved", "fileName": "0008.jpg" }));
    }

    #[test]
    fn display_renders_label_text() {
        assert_eq!(StatusEvent::Running.to_string(), "监控中...");
        assert_eq!(
            StatusEvent::Saved { file_name: "0001.jpg".to_string() }.to_string(),
            "已保存: 0001.jpg"
        );
    }

    #[test]
    fn channel_listener_survives_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        let listener = channel_listener(tx);
        listener.on_status(StatusEvent::Running);
        assert_eq!(rx.recv().expect("event"), StatusEvent::Running);

        drop(rx);
        listener.on_status(StatusEvent::Idle);
    }
}
