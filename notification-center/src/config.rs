//! 通知中心配置
//!
use bon::Builder;
use serde::{Deserialize, Serialize};

/// 分发模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// 首个失败的回调中止分发并返回错误
    #[default]
    FailFast,
    /// 通知全部订阅者，失败汇总后返回
    Isolated,
}

/// 通知中心配置
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    /// 日志中的实例标签，用于区分多个通知中心
    #[builder(into, default = CenterConfig::DEFAULT_LABEL.to_string())]
    pub label: String,
    /// `publish` 使用的分发模式
    #[builder(default)]
    pub dispatch_mode: DispatchMode,
}

impl CenterConfig {
    pub const DEFAULT_LABEL: &'static str = "default";
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            label: Self::DEFAULT_LABEL.to_string(),
            dispatch_mode: DispatchMode::default(),
        }
    }
}
