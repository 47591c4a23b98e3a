//! 进程内通知中心（notification-center）
//!
//! 以字符串事件名为键登记回调，发布时在调用线程上同步、按注册顺序分发：
//! - `NotificationCenter`：订阅、发布、退订三项操作与进程级默认实例；
//! - `SubscriberId`：退订时用于比较的订阅者身份，不持有订阅者；
//! - `Subscription`：强类型的订阅记录；
//! - `CenterConfig`：实例标签与分发模式（快速失败 / 隔离）。
//!
//! 典型用法：
//! ```rust
//! use notification_center::{NotificationCenter, SubscriberId};
//!
//! let center = NotificationCenter::new();
//! let me = SubscriberId::unique();
//!
//! center.subscribe("user.created", Some(me), |name| println!("raised by {name}"));
//! center.publish("user.created").unwrap();
//! center.unsubscribe(me, "user.created");
//! assert!(!center.has_subscribers("user.created"));
//! ```
//!
pub mod center;
pub mod config;
pub mod error;
pub mod subscriber;
pub mod subscription;

pub use center::NotificationCenter;
pub use config::{CenterConfig, DispatchMode};
pub use error::{CallbackFailure, NotifyError, NotifyResult};
pub use subscriber::SubscriberId;
pub use subscription::{Callback, Subscription};
