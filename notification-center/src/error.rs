//! 通知中心错误定义
//!
//! 订阅与退订不会失败，未注册的事件名也不是错误；
//! 唯一的失败来源是回调在分发过程中返回 `Err`。
//!
use crate::subscriber::SubscriberId;
use thiserror::Error;

/// 单个回调的失败记录
#[derive(Debug, Error)]
#[error("callback failed: event={event}, position={position}, subscriber={subscriber:?}")]
pub struct CallbackFailure {
    /// 触发分发的事件名
    pub event: String,
    /// 回调在本次快照中的位置（即注册顺序）
    pub position: usize,
    /// 回调所属的订阅者（若注册时提供）
    pub subscriber: Option<SubscriberId>,
    #[source]
    pub source: anyhow::Error,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 快速失败：首个失败的回调中止本次分发，其后的订阅者不会被通知
    #[error(transparent)]
    Callback(#[from] CallbackFailure),

    /// 隔离分发：所有订阅者都被通知，失败汇总返回
    #[error("{} of {attempted} callbacks failed: event={event}", .failures.len())]
    Aggregate {
        event: String,
        attempted: usize,
        failures: Vec<CallbackFailure>,
    },
}

impl NotifyError {
    /// 失败涉及的事件名
    pub fn event(&self) -> &str {
        match self {
            NotifyError::Callback(failure) => &failure.event,
            NotifyError::Aggregate { event, .. } => event,
        }
    }

    /// 展开为逐个回调的失败记录
    pub fn failures(&self) -> &[CallbackFailure] {
        match self {
            NotifyError::Callback(failure) => std::slice::from_ref(failure),
            NotifyError::Aggregate { failures, .. } => failures,
        }
    }
}

/// 统一 Result 类型别名
pub type NotifyResult<T> = Result<T, NotifyError>;
