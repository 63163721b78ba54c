//! 查询进度通知
//!
//! 每个数据源在请求前后各发出一次事件，仅供展示层观察，不影响控制流。

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LookupEvent {
    /// 即将请求某个数据源
    Querying { provider: String },
    /// 数据源返回了可用的响应
    Succeeded { provider: String },
    /// 数据源失败（状态码 / 响应体 / 网络错误 / 超时）
    Failed { provider: String, reason: String },
}

impl LookupEvent {
    pub fn provider(&self) -> &str {
        match self {
            LookupEvent::Querying { provider }
            | LookupEvent::Succeeded { provider }
            | LookupEvent::Failed { provider, .. } => provider,
        }
    }
}

/// 进度事件接收方
pub trait ProgressSink: Send + Sync {
    fn notify(&self, event: &LookupEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&LookupEvent) + Send + Sync,
{
    fn notify(&self, event: &LookupEvent) {
        self(event)
    }
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn notify(&self, _event: &LookupEvent) {}
}

/// 把事件写入 tracing 日志（库调用方的默认选择）
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn notify(&self, event: &LookupEvent) {
        match event {
            LookupEvent::Querying { provider } => debug!("Querying {} API...", provider),
            LookupEvent::Succeeded { provider } => debug!("{} - Success", provider),
            LookupEvent::Failed { provider, reason } => warn!("{} - {}", provider, reason),
        }
    }
}

/// 按到达顺序记录事件，供轮询式展示层（或测试）读取
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<LookupEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前已记录事件的快照
    pub fn events(&self) -> Vec<LookupEvent> {
        self.events.lock().clone()
    }

    /// 取出并清空已记录的事件
    pub fn take(&self) -> Vec<LookupEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl ProgressSink for RecordingProgress {
    fn notify(&self, event: &LookupEvent) {
        self.events.lock().push(event.clone());
    }
}
