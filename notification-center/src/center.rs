//! 通知中心（NotificationCenter）
//!
//! 按事件名登记回调，`publish` 时在调用线程上同步、按注册顺序依次调用：
//! - `subscribe`：向事件名对应的序列追加一条订阅，不去重、不会失败；
//! - `publish`：对调用开始时的订阅快照逐个分发，未注册的事件名视为空序列；
//! - `unsubscribe`：移除某事件名下属于指定订阅者的全部订阅，保持其余顺序不变。
//!
//! 并发：每个操作只触及一个事件名，并在该键所在分片的锁内完成；
//! 分发前先克隆快照并释放锁，因此回调内可以再次订阅/退订/发布而不会死锁，
//! 且本次分发看不到期间新增的订阅。
//!
use crate::config::{CenterConfig, DispatchMode};
use crate::error::{CallbackFailure, NotifyError, NotifyResult};
use crate::subscriber::SubscriberId;
use crate::subscription::Subscription;
use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

static DEFAULT_CENTER: OnceLock<NotificationCenter> = OnceLock::new();

/// 进程内的发布/订阅中心
pub struct NotificationCenter {
    config: CenterConfig,
    subscriptions: DashMap<String, Vec<Arc<Subscription>>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_config(CenterConfig::default())
    }
}

impl NotificationCenter {
    /// 创建一个独立实例（测试中应优先使用，而不是共享的默认实例）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CenterConfig) -> Self {
        Self {
            config,
            subscriptions: DashMap::new(),
        }
    }

    /// 进程级默认实例
    ///
    /// 首次访问时惰性构造，之后每次返回同一实例；并发首访也只会构造一次。
    pub fn default_center() -> &'static NotificationCenter {
        DEFAULT_CENTER.get_or_init(NotificationCenter::new)
    }

    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    /// 注册回调
    ///
    /// - `event_name`：要观察的事件名
    /// - `subscriber`：可选的订阅者标识，仅用于之后的 `unsubscribe`
    /// - `callback`：以事件名为参数的回调，在 `publish` 的调用线程上执行
    pub fn subscribe<F>(
        &self,
        event_name: impl Into<String>,
        subscriber: Option<SubscriberId>,
        callback: F,
    ) where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe_fallible(event_name, subscriber, move |name| {
            callback(name);
            Ok(())
        });
    }

    /// 注册可能失败的回调，`Err` 会作为 `publish` 的失败返回
    pub fn subscribe_fallible<F>(
        &self,
        event_name: impl Into<String>,
        subscriber: Option<SubscriberId>,
        callback: F,
    ) where
        F: Fn(&str) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let subscription = Subscription::new(event_name, subscriber, Arc::new(callback));
        let event_name = subscription.event_name().to_string();

        debug!(
            center = %self.config.label,
            event = %event_name,
            subscriber = ?subscriber,
            "subscribe"
        );

        self.subscriptions
            .entry(event_name)
            .or_default()
            .push(Arc::new(subscription));
    }

    /// 发布事件，按配置的分发模式通知订阅者
    pub fn publish(&self, event_name: &str) -> NotifyResult<()> {
        match self.config.dispatch_mode {
            DispatchMode::FailFast => self.publish_fail_fast(event_name),
            DispatchMode::Isolated => self.publish_isolated(event_name),
        }
    }

    /// 快速失败分发：首个失败的回调中止本次分发
    pub fn publish_fail_fast(&self, event_name: &str) -> NotifyResult<()> {
        let snapshot = self.snapshot(event_name);
        trace!(
            center = %self.config.label,
            event = %event_name,
            subscribers = snapshot.len(),
            "publish"
        );

        for (position, subscription) in snapshot.iter().enumerate() {
            subscription
                .invoke(event_name)
                .map_err(|source| self.failure(event_name, position, subscription, source))?;
        }
        Ok(())
    }

    /// 隔离分发：快照中的每个订阅者都会被通知，失败汇总为 `NotifyError::Aggregate`
    pub fn publish_isolated(&self, event_name: &str) -> NotifyResult<()> {
        let snapshot = self.snapshot(event_name);
        trace!(
            center = %self.config.label,
            event = %event_name,
            subscribers = snapshot.len(),
            "publish isolated"
        );

        let failures: Vec<CallbackFailure> = snapshot
            .iter()
            .enumerate()
            .filter_map(|(position, subscription)| {
                subscription
                    .invoke(event_name)
                    .err()
                    .map(|source| self.failure(event_name, position, subscription, source))
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Aggregate {
                event: event_name.to_string(),
                attempted: snapshot.len(),
                failures,
            })
        }
    }

    /// 移除 `event_name` 下属于 `subscriber` 的全部订阅；未注册的事件名直接返回
    pub fn unsubscribe(&self, subscriber: SubscriberId, event_name: &str) {
        let Some(mut list) = self.subscriptions.get_mut(event_name) else {
            trace!(
                center = %self.config.label,
                event = %event_name,
                "unsubscribe from unknown event"
            );
            return;
        };

        let before = list.len();
        list.retain(|s| !s.is_owned_by(subscriber));
        let removed = before - list.len();
        let now_empty = list.is_empty();
        // 必须先释放分片锁，remove_if 会再次获取同一分片
        drop(list);

        if now_empty {
            self.subscriptions.remove_if(event_name, |_, l| l.is_empty());
        }

        debug!(
            center = %self.config.label,
            event = %event_name,
            subscriber = ?subscriber,
            removed,
            "unsubscribe"
        );
    }

    /// 事件名下当前的订阅数
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscriptions
            .get(event_name)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    pub fn has_subscribers(&self, event_name: &str) -> bool {
        self.subscriber_count(event_name) > 0
    }

    /// 当前至少有一条订阅的事件名（按字典序）
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .subscriptions
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    fn snapshot(&self, event_name: &str) -> Vec<Arc<Subscription>> {
        self.subscriptions
            .get(event_name)
            .map(|list| list.value().clone())
            .unwrap_or_default()
    }

    fn failure(
        &self,
        event_name: &str,
        position: usize,
        subscription: &Subscription,
        source: anyhow::Error,
    ) -> CallbackFailure {
        warn!(
            center = %self.config.label,
            event = %event_name,
            position,
            subscriber = ?subscription.subscriber(),
            error = %source,
            "callback failed"
        );
        CallbackFailure {
            event: event_name.to_string(),
            position,
            subscriber: subscription.subscriber(),
            source,
        }
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("config", &self.config)
            .field("events", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Recorder = Box<dyn Fn(&str) + Send + Sync>;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) -> Recorder) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let make = move |tag: &'static str| -> Recorder {
            let sink = sink.clone();
            Box::new(move |name: &str| sink.lock().unwrap().push(format!("{tag}:{name}")))
        };
        (log, make)
    }

    #[test]
    fn center_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NotificationCenter>();
    }

    #[test]
    fn subscribe_appends_without_dedup() {
        let center = NotificationCenter::new();
        let id = SubscriberId::unique();
        center.subscribe("evt", Some(id), |_| {});
        center.subscribe("evt", Some(id), |_| {});
        assert_eq!(center.subscriber_count("evt"), 2);
        assert_eq!(center.event_names(), vec!["evt".to_string()]);
    }

    #[test]
    fn publish_runs_in_registration_order() {
        let center = NotificationCenter::new();
        let (log, make) = recorder();
        center.subscribe("evt", None, make("a"));
        center.subscribe("evt", None, make("b"));
        center.subscribe("evt", None, make("c"));

        center.publish("evt").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a:evt", "b:evt", "c:evt"]);
    }

    #[test]
    fn unknown_event_is_noop() {
        let center = NotificationCenter::new();
        center.publish("never").unwrap();
        center.unsubscribe(SubscriberId::unique(), "never");
        assert!(!center.has_subscribers("never"));
    }

    #[test]
    fn emptied_event_is_pruned() {
        let center = NotificationCenter::new();
        let id = SubscriberId::unique();
        center.subscribe("evt", Some(id), |_| {});
        center.unsubscribe(id, "evt");
        assert!(center.event_names().is_empty());
        assert!(format!("{center:?}").contains("events: 0"));
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let center = NotificationCenter::new();
        let (log, make) = recorder();
        center.subscribe("evt", None, make("a"));
        center.subscribe_fallible("evt", None, |_| anyhow::bail!("broken"));
        center.subscribe("evt", None, make("c"));

        let err = center.publish("evt").unwrap_err();
        assert!(matches!(&err, NotifyError::Callback(f) if f.position == 1));
        assert_eq!(*log.lock().unwrap(), vec!["a:evt"]);
    }

    #[test]
    fn isolated_mode_from_config() {
        let center = NotificationCenter::with_config(
            CenterConfig::builder()
                .dispatch_mode(DispatchMode::Isolated)
                .build(),
        );
        let (log, make) = recorder();
        center.subscribe_fallible("evt", None, |_| anyhow::bail!("first"));
        center.subscribe("evt", None, make("b"));

        let err = center.publish("evt").unwrap_err();
        match err {
            NotifyError::Aggregate {
                attempted,
                failures,
                ..
            } => {
                assert_eq!(attempted, 2);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].position, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["b:evt"]);
    }
}
