//! 三次贝塞尔缓动
//!
//! 曲线端点固定为 (0,0) 和 (1,1)，由两个内部控制点决定形状。
//! 输入 `t` 被当作曲线的 X 坐标，先求出 X(s) = t 的参数 s，再返回 Y(s)。

/// 牛顿迭代次数上限
const NEWTON_ITERATIONS: usize = 8;
/// 二分迭代次数上限
const BISECTION_ITERATIONS: usize = 32;
/// 收敛容差
const EPSILON: f64 = 1e-6;
/// 导数过小时放弃牛顿迭代
const MIN_SLOPE: f64 = 1e-6;

/// 三次贝塞尔曲线
///
/// 纯值类型，求值不分配内存。x 控制值会被限制在 0.0 - 1.0，
/// 保证 X(s) 单调；y 控制值不受限制，可以产生越界效果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// 创建曲线
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// 控制点 `(x1, y1, x2, y2)`
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// 在 X = t 处取 Y 值
    pub fn sample(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        axis_value(s, self.y1, self.y2)
    }

    /// 转换为闭包
    pub fn into_fn(self) -> impl Fn(f64) -> f64 + Clone + 'static {
        move |t| self.sample(t)
    }

    /// 求 X(s) = x 的参数 s
    ///
    /// 先做牛顿迭代，导数消失或未收敛时退回二分法，结果限制在 0.0 - 1.0。
    fn solve_x(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = axis_value(s, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return s.clamp(0.0, 1.0);
            }
            let slope = axis_derivative(s, self.x1, self.x2);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = axis_value(s, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s.clamp(0.0, 1.0)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        let (x1, y1, x2, y2) = super::HEALTH_CURVE;
        Self::new(x1, y1, x2, y2)
    }
}

/// 缓动函数提供者：返回 `t -> Y` 的闭包
pub fn cubic_bezier(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
) -> impl Fn(f64) -> f64 + Clone + 'static {
    CubicBezier::new(x1, y1, x2, y2).into_fn()
}

/// 单轴分量：B(s) = 3(1-s)²s·p1 + 3(1-s)s²·p2 + s³
fn axis_value(s: f64, p1: f64, p2: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}

/// 单轴导数
fn axis_derivative(s: f64, p1: f64, p2: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * p1 + 6.0 * ms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
