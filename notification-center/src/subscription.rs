//! 订阅记录（Subscription）
//!
//! 一次注册对应一条记录：事件名、可选的订阅者标识与回调。
//! 同名、同标识的两次注册是两条互不相干的记录。
//!
use crate::subscriber::SubscriberId;
use std::fmt;
use std::sync::Arc;

/// 回调：接收事件名，返回 `Err` 表示本次处理失败
pub type Callback = Arc<dyn Fn(&str) -> anyhow::Result<()> + Send + Sync>;

/// 单条订阅记录
#[derive(Clone)]
pub struct Subscription {
    event_name: String,
    subscriber: Option<SubscriberId>,
    callback: Callback,
}

impl Subscription {
    pub fn new(
        event_name: impl Into<String>,
        subscriber: Option<SubscriberId>,
        callback: Callback,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            subscriber,
            callback,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn subscriber(&self) -> Option<SubscriberId> {
        self.subscriber
    }

    /// 是否属于给定订阅者；未提供标识的记录不属于任何订阅者
    pub fn is_owned_by(&self, subscriber: SubscriberId) -> bool {
        self.subscriber == Some(subscriber)
    }

    /// 以事件名调用回调
    pub fn invoke(&self, event_name: &str) -> anyhow::Result<()> {
        (self.callback)(event_name)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.event_name)
            .field("subscriber", &self.subscriber)
            .finish_non_exhaustive()
    }
}
