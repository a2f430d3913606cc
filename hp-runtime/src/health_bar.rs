//! # HealthBar 模块
//!
//! 血条动画器：把"真实血量"的变化和"显示血量"的变化解耦。
//!
//! 真实血量一旦设置立即生效；显示血量从锚点（设置时刻正在显示的值）
//! 出发，在 `duration` 秒内按缓动曲线走到目标值。宿主每帧调用
//! [`HealthBar::update`] 推进时间，动画器通过回调交付最新的显示值。
//!
//! ```rust,ignore
//! let mut bar = HealthBar::new(
//!     50.0,
//!     HealthBarConfigPatch::new()
//!         .with_easing(Easing::linear())
//!         .with_callback(move |shown| println!("{shown}")),
//! );
//! bar.set_health(25.0);
//! bar.update(0.5); // 37.5
//! bar.update(0.5); // 25
//! ```

use std::fmt;

use crate::easing::Easing;

/// 目标与锚点之差小于该值时视为没有变化，不启动动画
pub const HEALTH_EPSILON: f64 = 1e-5;

/// 已完成状态下的进度值
const SETTLED: f64 = 1.0;

/// 默认动画时长（秒）
pub const DEFAULT_DURATION: f64 = 1.0;

/// 显示值回调
pub type UpdateCallback = Box<dyn FnMut(f64)>;

/// 血条配置
pub struct HealthBarConfig {
    /// 动画时长（秒），非正数表示下一帧立即完成
    pub duration: f64,
    /// 缓动函数
    pub easing: Easing,
    /// 每次 `update` 后接收显示值
    pub on_update: UpdateCallback,
}

impl Default for HealthBarConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            on_update: Box::new(|_| {}),
        }
    }
}

impl fmt::Debug for HealthBarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthBarConfig")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

impl HealthBarConfig {
    /// 合并部分配置，未提供的字段保持不变
    pub fn merge(&mut self, patch: HealthBarConfigPatch) {
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(easing) = patch.easing {
            self.easing = easing;
        }
        if let Some(on_update) = patch.on_update {
            self.on_update = on_update;
        }
    }
}

/// 部分配置
#[derive(Default)]
pub struct HealthBarConfigPatch {
    pub duration: Option<f64>,
    pub easing: Option<Easing>,
    pub on_update: Option<UpdateCallback>,
}

impl HealthBarConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置动画时长
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// 设置显示值回调
    pub fn with_callback(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for HealthBarConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthBarConfigPatch")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// 血条动画器
///
/// 不做任何范围校验：负数或超过上限的血量同样会被忠实地动画化，
/// 截断是宿主的责任。
#[derive(Debug)]
pub struct HealthBar {
    /// 真实血量（动画目标）
    health: f64,
    /// 锚点：本次动画的起点
    prev_health: f64,
    /// 已经过时间占 duration 的比例，>= 1 表示动画完成
    progress: f64,
    config: HealthBarConfig,
}

impl HealthBar {
    /// 创建血条，初始处于已完成状态
    pub fn new(max_health: f64, patch: HealthBarConfigPatch) -> Self {
        let mut config = HealthBarConfig::default();
        config.merge(patch);
        Self {
            health: max_health,
            prev_health: max_health,
            progress: SETTLED,
            config,
        }
    }

    /// 设置目标血量
    ///
    /// 锚点取当前正在显示的值而不是旧的真实血量，动画中途改目标不会跳变。
    pub fn set_health(&mut self, health: f64) {
        self.prev_health = self.show_health();
        self.health = health;
        self.progress = if (self.health - self.prev_health).abs() < HEALTH_EPSILON {
            SETTLED
        } else {
            0.0
        };
    }

    /// 直接设置血量，不播放动画
    pub fn hard_set_health(&mut self, health: f64) {
        self.health = health;
        self.prev_health = health;
        self.progress = SETTLED;
    }

    /// 增加血量
    pub fn increase_health(&mut self, amount: f64) {
        self.set_health(self.health + amount);
    }

    /// 减少血量
    pub fn decrease_health(&mut self, amount: f64) {
        self.set_health(self.health - amount);
    }

    /// 真实血量
    pub fn health(&self) -> f64 {
        self.health
    }

    /// 锚点血量
    pub fn prev_health(&self) -> f64 {
        self.prev_health
    }

    /// 当前显示值（不推进时间）
    pub fn show_health(&self) -> f64 {
        if self.is_animation_complete() {
            return self.health;
        }
        self.config.easing.apply(self.progress) * (self.health - self.prev_health)
            + self.prev_health
    }

    /// 动画进度
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// 当前配置的动画时长
    pub fn duration(&self) -> f64 {
        self.config.duration
    }

    /// 动画是否已完成
    pub fn is_animation_complete(&self) -> bool {
        self.progress >= SETTLED
    }

    /// 合并配置，下一次 `update` 起生效
    pub fn update_config(&mut self, patch: HealthBarConfigPatch) {
        self.config.merge(patch);
    }

    /// 每帧更新
    ///
    /// # 参数
    /// - `dt`: 距上一帧的时间（秒），负数按 0 处理
    pub fn update(&mut self, dt: f64) {
        if self.is_animation_complete() {
            self.prev_health = self.health;
        }

        let duration = self.config.duration;
        let step = if duration > 0.0 && duration.is_finite() {
            dt.max(0.0) / duration
        } else {
            f64::INFINITY
        };
        self.progress = (self.progress + step).min(SETTLED);

        let shown = self.show_health();
        (self.config.on_update)(shown);
    }
}
