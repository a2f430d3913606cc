//! # Gauge 模块
//!
//! 宿主侧的血条逻辑：血量上限、输入截断、动画风格切换。
//!
//! [`HealthBar`] 本身不做校验，也不知道血量上限；`HealthGauge` 负责把用户
//! 输入截断到 `[0, max]`，在上限缩小时硬设血量，并按风格推导动画时长。

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::easing::{Easing, EasingFunction};
use crate::health_bar::{DEFAULT_DURATION, HealthBar, HealthBarConfigPatch};

/// 血量上限的最小值
pub const MIN_MAX_HEALTH: f64 = 1.0;

/// 动画风格
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BarStyle {
    /// 固定时长，曲线可选（默认血条曲线）
    Smooth {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default)]
        easing: EasingFunction,
    },
    /// 匀速变化：时长随变化量增长，线性曲线
    FixedSpeed {
        #[serde(default = "default_units_per_second")]
        units_per_second: f64,
        #[serde(default = "default_duration")]
        min_duration: f64,
    },
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_units_per_second() -> f64 {
    100.0
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::smooth()
    }
}

impl BarStyle {
    /// 默认平滑风格
    pub fn smooth() -> Self {
        Self::Smooth {
            duration: default_duration(),
            easing: EasingFunction::Health,
        }
    }

    /// 使用指定曲线的平滑风格
    pub fn smooth_with(easing: EasingFunction) -> Self {
        Self::Smooth {
            duration: default_duration(),
            easing,
        }
    }

    /// 默认匀速风格
    pub fn fixed_speed() -> Self {
        Self::FixedSpeed {
            units_per_second: default_units_per_second(),
            min_duration: default_duration(),
        }
    }

    /// 风格名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Smooth { .. } => "smooth",
            Self::FixedSpeed { .. } => "fixed-speed",
        }
    }

    /// 该风格使用的缓动函数
    pub fn easing(&self) -> Easing {
        match *self {
            Self::Smooth { easing, .. } => easing.into(),
            Self::FixedSpeed { .. } => Easing::linear(),
        }
    }

    /// 从 `from` 变化到 `to` 的动画时长
    pub fn duration_for(&self, from: f64, to: f64) -> f64 {
        match *self {
            Self::Smooth { duration, .. } => duration,
            Self::FixedSpeed {
                units_per_second,
                min_duration,
            } => ((from - to).abs() / units_per_second).max(min_duration),
        }
    }
}

/// 一帧的绘制数据
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    /// 显示血量
    pub shown: f64,
    /// 血量上限
    pub max_health: f64,
    /// 填充比例（0.0 - 1.0）
    pub fill_ratio: f64,
    /// 数字标签，如 `25/50`
    pub label: String,
    /// 动画是否已完成
    pub settled: bool,
}

/// 带上限的血条
#[derive(Debug)]
pub struct HealthGauge {
    bar: HealthBar,
    max_health: f64,
    style: BarStyle,
    /// 回调最近一次交付的显示值
    shown: Rc<Cell<f64>>,
}

impl HealthGauge {
    /// 创建满血的血条
    pub fn new(max_health: f64, style: BarStyle) -> Self {
        let max_health = max_health.max(MIN_MAX_HEALTH);
        let shown = Rc::new(Cell::new(max_health));
        let sink = Rc::clone(&shown);
        let bar = HealthBar::new(
            max_health,
            HealthBarConfigPatch::new()
                .with_duration(style.duration_for(max_health, max_health))
                .with_easing(style.easing())
                .with_callback(move |value| sink.set(value)),
        );
        Self {
            bar,
            max_health,
            style,
            shown,
        }
    }

    /// 设置目标血量（截断到 `[0, max]`）
    pub fn set_target(&mut self, health: f64) {
        let health = health.clamp(0.0, self.max_health);
        self.bar.set_health(health);
        let duration = self
            .style
            .duration_for(self.bar.prev_health(), self.bar.health());
        self.bar
            .update_config(HealthBarConfigPatch::new().with_duration(duration));
    }

    /// 扣血
    pub fn damage(&mut self, amount: f64) {
        self.set_target(self.bar.health() - amount);
    }

    /// 回血
    pub fn heal(&mut self, amount: f64) {
        self.set_target(self.bar.health() + amount);
    }

    /// 修改血量上限
    ///
    /// 上限缩小到当前血量以下时直接硬设，不播放动画。
    pub fn set_max_health(&mut self, max_health: f64) {
        self.max_health = max_health.max(MIN_MAX_HEALTH);
        if self.bar.health() > self.max_health {
            self.bar.hard_set_health(self.max_health);
        }
    }

    /// 切换动画风格
    pub fn set_style(&mut self, style: BarStyle) {
        self.style = style;
        self.bar
            .update_config(HealthBarConfigPatch::new().with_easing(style.easing()));
    }

    /// 每帧更新
    pub fn tick(&mut self, dt: f64) {
        self.bar.update(dt);
    }

    /// 回调交付的显示值
    pub fn shown(&self) -> f64 {
        self.shown.get()
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn style(&self) -> BarStyle {
        self.style
    }

    pub fn bar(&self) -> &HealthBar {
        &self.bar
    }

    /// 填充比例，绘制用，截断到 0.0 - 1.0
    pub fn fill_ratio(&self) -> f64 {
        (self.shown() / self.max_health).clamp(0.0, 1.0)
    }

    /// 数字标签
    pub fn label(&self) -> String {
        // 先转整数，负零不会显示成 "-0"
        let shown = self.shown().round() as i64;
        format!("{}/{}", shown, self.max_health)
    }

    /// 当前帧的绘制数据
    pub fn frame(&self) -> BarFrame {
        BarFrame {
            shown: self.shown(),
            max_health: self.max_health,
            fill_ratio: self.fill_ratio(),
            label: self.label(),
            settled: self.bar.is_animation_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(gauge: &mut HealthGauge, seconds: f64) {
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            gauge.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_new_gauge_is_full() {
        let gauge = HealthGauge::new(50.0, BarStyle::smooth());
        assert_eq!(gauge.shown(), 50.0);
        assert_eq!(gauge.fill_ratio(), 1.0);
        assert_eq!(gauge.label(), "50/50");
        assert!(gauge.frame().settled);
    }

    #[test]
    fn test_max_health_floor() {
        let gauge = HealthGauge::new(0.0, BarStyle::smooth());
        assert_eq!(gauge.max_health(), MIN_MAX_HEALTH);
    }

    #[test]
    fn test_target_is_clamped() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::smooth());
        gauge.set_target(80.0);
        assert_eq!(gauge.bar().health(), 50.0);
        assert!(gauge.bar().is_animation_complete());

        gauge.set_target(-5.0);
        assert_eq!(gauge.bar().health(), 0.0);

        gauge.heal(1000.0);
        assert_eq!(gauge.bar().health(), 50.0);

        gauge.damage(1000.0);
        assert_eq!(gauge.bar().health(), 0.0);
    }

    #[test]
    fn test_smooth_style_reaches_target() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::smooth());
        gauge.set_target(20.0);
        assert_eq!(gauge.bar().duration(), 1.0);

        run(&mut gauge, 0.5);
        let mid = gauge.shown();
        assert!(mid < 50.0 && mid > 20.0);

        run(&mut gauge, 0.6);
        assert_eq!(gauge.shown(), 20.0);
        assert_eq!(gauge.label(), "20/50");
        assert!((gauge.fill_ratio() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_speed_duration() {
        let mut gauge = HealthGauge::new(500.0, BarStyle::fixed_speed());

        // 变化 300，速度 100/s → 3 秒
        gauge.set_target(200.0);
        assert!((gauge.bar().duration() - 3.0).abs() < 1e-12);

        // 小变化不低于最短时长
        gauge.set_target(gauge.bar().show_health() - 10.0);
        assert_eq!(gauge.bar().duration(), 1.0);
    }

    #[test]
    fn test_fixed_speed_is_linear() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::fixed_speed());
        gauge.set_target(25.0);
        gauge.tick(0.5);
        assert!((gauge.shown() - 37.5).abs() < 1e-9);
        gauge.tick(0.5);
        assert_eq!(gauge.shown(), 25.0);
    }

    #[test]
    fn test_style_switch_changes_easing() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::smooth());
        gauge.set_style(BarStyle::fixed_speed());
        assert_eq!(gauge.style().name(), "fixed-speed");
        gauge.set_target(25.0);
        gauge.tick(0.5);
        assert!((gauge.shown() - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_shrinking_max_hard_sets() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::smooth());
        gauge.set_target(40.0);
        gauge.tick(0.2);

        gauge.set_max_health(30.0);
        assert_eq!(gauge.bar().health(), 30.0);
        assert_eq!(gauge.bar().prev_health(), 30.0);
        assert!(gauge.bar().is_animation_complete());

        gauge.tick(0.016);
        assert_eq!(gauge.shown(), 30.0);
        assert_eq!(gauge.label(), "30/30");
    }

    #[test]
    fn test_growing_max_keeps_health() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::smooth());
        gauge.set_max_health(80.0);
        assert_eq!(gauge.bar().health(), 50.0);
        gauge.tick(0.016);
        assert_eq!(gauge.label(), "50/80");
        assert!((gauge.fill_ratio() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_style_deserialize_defaults() {
        let style: BarStyle = serde_json::from_str(r#"{"kind":"fixed_speed"}"#).unwrap();
        assert_eq!(style, BarStyle::fixed_speed());

        let style: BarStyle =
            serde_json::from_str(r#"{"kind":"smooth","duration":0.4}"#).unwrap();
        assert_eq!(
            style,
            BarStyle::Smooth {
                duration: 0.4,
                easing: EasingFunction::Health,
            }
        );

        let style: BarStyle =
            serde_json::from_str(r#"{"kind":"smooth","easing":{"kind":"ease_out_back"}}"#)
                .unwrap();
        assert_eq!(style, BarStyle::smooth_with(EasingFunction::EaseOutBack));
    }

    #[test]
    fn test_smooth_style_uses_selected_easing() {
        let style = BarStyle::smooth_with(EasingFunction::EaseOutBack);
        let mut gauge = HealthGauge::new(40.0, style);
        gauge.set_target(10.0);

        // 回拉曲线在中途越过目标值
        gauge.tick(0.5);
        assert!(gauge.shown() < 10.0);

        gauge.tick(0.5);
        assert_eq!(gauge.shown(), 10.0);
    }

    #[test]
    fn test_style_switch_keeps_selected_easing() {
        let mut gauge = HealthGauge::new(50.0, BarStyle::fixed_speed());
        gauge.set_style(BarStyle::smooth_with(EasingFunction::Linear));
        gauge.set_target(25.0);
        gauge.tick(0.5);
        assert!((gauge.shown() - 37.5).abs() < 1e-9);
    }
}
