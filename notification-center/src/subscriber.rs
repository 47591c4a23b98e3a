//! 订阅者标识（SubscriberId）
//!
//! 仅用于退订时的相等比较，不持有订阅者本身：
//! - `of`：取一个存活值的地址与类型作为标识（引用相等语义）；
//! - `unique`：为没有天然身份的调用方分配进程内唯一的令牌。
//!
//! 注意：地址标识在原值释放后可能被新分配复用，调用方应在订阅者析构前完成退订。
//!
use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Addr(usize, TypeId),
    Token(u64),
}

/// 订阅者身份：比较的是“是谁”，而不是“内容是什么”
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Repr);

impl SubscriberId {
    /// 以值的内存地址与类型作为标识
    ///
    /// 同一对象多次调用得到相同标识；内容相同的两个不同对象得到不同标识。
    /// 结构体与其首个字段地址相同，但类型不同，因此标识也不同。
    ///
    /// 零尺寸类型的值没有独立地址，此时退化为 [`SubscriberId::unique`]：
    /// 每次调用都得到新令牌，调用方需保存订阅时使用的标识用于退订。
    pub fn of<T: ?Sized + 'static>(value: &T) -> Self {
        if std::mem::size_of_val(value) == 0 {
            return Self::unique();
        }
        let addr = value as *const T as *const () as usize;
        Self(Repr::Addr(addr, TypeId::of::<T>()))
    }

    /// 分配一个进程内唯一的令牌
    pub fn unique() -> Self {
        Self(Repr::Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)))
    }
}

impl fmt::Debug for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Addr(addr, _) => write!(f, "SubscriberId(addr={addr:#x})"),
            Repr::Token(token) => write!(f, "SubscriberId(token={token})"),
        }
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
