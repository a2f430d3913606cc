//! # Host 层
//!
//! 血条动画的宿主层实现，代替交互界面和画布驱动 `hp-runtime`。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载
//! - 输入采集（时间轴）
//! - 帧循环调度
//! - 绘制
//!
//! Host 层不包含动画逻辑，只负责把输入和时间交给 Runtime，再把显示值画出来。

pub mod config;
pub mod driver;
pub mod error;
pub mod surface;
pub mod timeline;

pub use config::HostConfig;
pub use driver::{FrameDriver, RunSummary, StopReason};
pub use error::{ConfigError, EventParseError};
pub use surface::{BarLayout, Color, Rect, Surface, TextSurface, draw_bar};
pub use timeline::{Action, InputEvent, Timeline};
