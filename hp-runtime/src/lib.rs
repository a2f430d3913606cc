//! # HP Runtime
//!
//! 血条动画的核心运行时库。
//!
//! ## 架构概述
//!
//! `hp-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 宿主层（Host）负责采集输入、驱动帧循环和绘制：
//!
//! ```text
//! Host                              Runtime
//!   │                                  │
//!   │──── set_health / hard_set ─────►│
//!   │──── update(dt) (每帧) ─────────►│
//!   │◄─── on_update(显示值) ──────────│
//!   │                                  │
//! ```
//!
//! ## 核心类型
//!
//! - [`HealthBar`]：血条动画器，持有真实血量、锚点和进度
//! - [`Easing`] / [`EasingFunction`]：缓动函数
//! - [`HealthGauge`]：带上限和风格切换的宿主侧封装
//!
//! ## 模块结构
//!
//! - [`easing`]：缓动函数与三次贝塞尔求解
//! - [`health_bar`]：动画器
//! - [`gauge`]：上限、截断、风格

pub mod easing;
pub mod gauge;
pub mod health_bar;

// 重导出核心类型
pub use easing::{CubicBezier, Easing, EasingFunction, cubic_bezier};
pub use gauge::{BarFrame, BarStyle, HealthGauge};
pub use health_bar::{HealthBar, HealthBarConfig, HealthBarConfigPatch, UpdateCallback};
