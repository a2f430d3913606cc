//! # Easing 模块
//!
//! 缓动函数库，用于把归一化的时间进度映射为插值系数。
//!
//! ## 核心概念
//!
//! - [`Easing`]：任意纯函数 `f64 -> f64` 的句柄，血条配置里保存的就是它
//! - [`EasingFunction`]：可序列化的预设曲线，平滑风格的血条通过名字选择
//! - [`CubicBezier`]：两端固定在 (0,0)/(1,1) 的三次贝塞尔曲线
//!
//! 缓动函数只限制输入范围，不限制输出范围：回弹类曲线的越界值会原样
//! 传递给插值计算。

mod bezier;

use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use bezier::{CubicBezier, cubic_bezier};

/// 血条默认曲线的控制点
pub const HEALTH_CURVE: (f64, f64, f64, f64) = (0.33, 0.57, 0.21, 1.0);

/// 缓动函数句柄
///
/// 包装任意 `Fn(f64) -> f64`，克隆只增加引用计数。
#[derive(Clone)]
pub struct Easing(Rc<dyn Fn(f64) -> f64>);

impl Easing {
    /// 从闭包创建
    pub fn new(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// 线性（恒等函数）
    pub fn linear() -> Self {
        Self::new(|t| t)
    }

    /// 三次贝塞尔曲线
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(cubic_bezier(x1, y1, x2, y2))
    }

    /// 血条默认曲线
    pub fn health() -> Self {
        let (x1, y1, x2, y2) = HEALTH_CURVE;
        Self::cubic_bezier(x1, y1, x2, y2)
    }

    /// 计算缓动值
    pub fn apply(&self, t: f64) -> f64 {
        (self.0)(t)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::health()
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Easing(..)")
    }
}

impl From<EasingFunction> for Easing {
    fn from(preset: EasingFunction) -> Self {
        match preset {
            EasingFunction::Linear => Self::linear(),
            EasingFunction::CubicBezier { x1, y1, x2, y2 } => {
                Self::new(CubicBezier::new(x1, y1, x2, y2).into_fn())
            }
            other => Self::new(move |t| other.apply(t)),
        }
    }
}

/// 缓动函数预设
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 血条默认曲线（先快后慢）
    #[default]
    Health,
    /// 缓入（先慢后快）
    EaseIn,
    /// 缓出（先快后慢）
    EaseOut,
    /// 缓入缓出（两头慢中间快）
    EaseInOut,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 正弦缓入
    EaseInSine,
    /// 正弦缓出
    EaseOutSine,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 回拉缓出（会越过终点再回来）
    EaseOutBack,
    /// 弹性缓出
    EaseOutElastic,
    /// 弹跳缓出
    EaseOutBounce,
    /// 自定义三次贝塞尔曲线
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度，超出 0.0 - 1.0 的部分会被截断
    ///
    /// # 返回
    /// - 缓动后的系数，回弹类曲线可能超出 0.0 - 1.0
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::Health => {
                let (x1, y1, x2, y2) = HEALTH_CURVE;
                CubicBezier::new(x1, y1, x2, y2).sample(t)
            }
            EasingFunction::EaseIn => t * t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::EaseOutBack => ease_out_back(t),
            EasingFunction::EaseOutElastic => ease_out_elastic(t),
            EasingFunction::EaseOutBounce => ease_out_bounce(t),
            EasingFunction::CubicBezier { x1, y1, x2, y2 } => {
                CubicBezier::new(*x1, *y1, *x2, *y2).sample(t)
            }
        }
    }

    /// 预设名称（与配置文件中的 `kind` 一致）
    pub fn name(&self) -> &'static str {
        match self {
            EasingFunction::Linear => "linear",
            EasingFunction::Health => "health",
            EasingFunction::EaseIn => "ease_in",
            EasingFunction::EaseOut => "ease_out",
            EasingFunction::EaseInOut => "ease_in_out",
            EasingFunction::EaseInQuad => "ease_in_quad",
            EasingFunction::EaseOutQuad => "ease_out_quad",
            EasingFunction::EaseInOutQuad => "ease_in_out_quad",
            EasingFunction::EaseInSine => "ease_in_sine",
            EasingFunction::EaseOutSine => "ease_out_sine",
            EasingFunction::EaseInOutSine => "ease_in_out_sine",
            EasingFunction::EaseOutBack => "ease_out_back",
            EasingFunction::EaseOutElastic => "ease_out_elastic",
            EasingFunction::EaseOutBounce => "ease_out_bounce",
            EasingFunction::CubicBezier { .. } => "cubic_bezier",
        }
    }

    /// 按名称查找无参数预设
    ///
    /// 接受 `ease_out_back` 与 `ease-out-back` 两种写法；
    /// `cubic_bezier` 需要控制点，只能通过配置文件指定。
    pub fn from_name(name: &str) -> Option<Self> {
        let preset = match name.trim().replace('-', "_").as_str() {
            "linear" => EasingFunction::Linear,
            "health" => EasingFunction::Health,
            "ease_in" => EasingFunction::EaseIn,
            "ease_out" => EasingFunction::EaseOut,
            "ease_in_out" => EasingFunction::EaseInOut,
            "ease_in_quad" => EasingFunction::EaseInQuad,
            "ease_out_quad" => EasingFunction::EaseOutQuad,
            "ease_in_out_quad" => EasingFunction::EaseInOutQuad,
            "ease_in_sine" => EasingFunction::EaseInSine,
            "ease_out_sine" => EasingFunction::EaseOutSine,
            "ease_in_out_sine" => EasingFunction::EaseInOutSine,
            "ease_out_back" => EasingFunction::EaseOutBack,
            "ease_out_elastic" => EasingFunction::EaseOutElastic,
            "ease_out_bounce" => EasingFunction::EaseOutBounce,
            _ => return None,
        };
        Some(preset)
    }
}

/// 回拉缓出
fn ease_out_back(t: f64) -> f64 {
    let c1 = 1.70158;
    let c3 = c1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
}

/// 弹性缓出
fn ease_out_elastic(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        let c4 = (2.0 * PI) / 3.0;
        2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

/// 弹跳缓出
fn ease_out_bounce(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}
