//! # Error 模块
//!
//! 宿主层的错误类型。动画器本身没有失败路径，错误只来自配置和输入解析。

use std::path::PathBuf;

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取失败
    #[error("读取配置文件失败: {path} - {source}")]
    Io {
        /// 配置文件路径
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("解析配置文件失败: {path} - {source}")]
    Parse {
        /// 配置文件路径
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 配置值无效
    #[error("配置项 '{field}' 无效: {message}")]
    Invalid { field: &'static str, message: String },

    /// 配置中的输入事件无效
    #[error("配置中的输入事件无效: {0}")]
    Event(#[from] EventParseError),
}

/// 输入事件解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventParseError {
    /// 缺少 `=`
    #[error("'{input}' 缺少 '='，期望形如 set=25@0.5")]
    MissingValue { input: String },

    /// 未知动作
    #[error("未知动作 '{action}'，可用: set, damage, heal, max, style")]
    UnknownAction { action: String },

    /// 数值无效
    #[error("'{input}' 不是有效的数值")]
    InvalidNumber { input: String },

    /// 未知风格
    #[error("未知风格 '{style}'，可用: smooth, fixed-speed")]
    UnknownStyle { style: String },

    /// 未知缓动曲线
    #[error("未知缓动曲线 '{easing}'，如 health, linear, ease_out_back")]
    UnknownEasing { easing: String },

    /// 时间无效
    #[error("时间 '{input}' 无效，必须是非负数")]
    InvalidTime { input: String },
}
