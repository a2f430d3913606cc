//! # Timeline 模块
//!
//! 输入时间轴：代替交互界面，按时间点向血条发送输入。
//!
//! 文本格式 `动作=值@秒`，`@秒` 可省略（表示 0）：
//!
//! ```text
//! set=25@0.5      设置目标血量
//! damage=10@1     扣血
//! heal=5@2        回血
//! max=30@2.5      修改血量上限
//! style=fixed-speed@3
//! style=smooth:ease_out_back@4   平滑风格并指定缓动曲线
//! ```

use std::fmt;
use std::str::FromStr;

use hp_runtime::{BarStyle, EasingFunction, HealthGauge};

use crate::error::EventParseError;

/// 输入动作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// 设置目标血量
    SetHealth(f64),
    /// 扣血
    Damage(f64),
    /// 回血
    Heal(f64),
    /// 修改血量上限
    SetMax(f64),
    /// 切换风格
    SetStyle(BarStyle),
}

impl Action {
    /// 作用到血条上
    pub fn apply(&self, gauge: &mut HealthGauge) {
        match *self {
            Action::SetHealth(value) => gauge.set_target(value),
            Action::Damage(amount) => gauge.damage(amount),
            Action::Heal(amount) => gauge.heal(amount),
            Action::SetMax(value) => gauge.set_max_health(value),
            Action::SetStyle(style) => gauge.set_style(style),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetHealth(v) => write!(f, "set={v}"),
            Action::Damage(v) => write!(f, "damage={v}"),
            Action::Heal(v) => write!(f, "heal={v}"),
            Action::SetMax(v) => write!(f, "max={v}"),
            Action::SetStyle(BarStyle::Smooth { easing, .. })
                if *easing != EasingFunction::Health =>
            {
                write!(f, "style=smooth:{}", easing.name())
            }
            Action::SetStyle(style) => write!(f, "style={}", style.name()),
        }
    }
}

/// 带时间点的输入事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// 触发时间（秒）
    pub at: f64,
    pub action: Action,
}

impl FromStr for InputEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (body, at) = match s.rsplit_once('@') {
            Some((body, at)) => (body, parse_time(at)?),
            None => (s, 0.0),
        };
        let (name, value) = body
            .split_once('=')
            .ok_or_else(|| EventParseError::MissingValue {
                input: s.to_string(),
            })?;

        let action = match name.trim() {
            "set" => Action::SetHealth(parse_number(value)?),
            "damage" => Action::Damage(parse_number(value)?),
            "heal" => Action::Heal(parse_number(value)?),
            "max" => Action::SetMax(parse_number(value)?),
            "style" => Action::SetStyle(parse_style(value)?),
            other => {
                return Err(EventParseError::UnknownAction {
                    action: other.to_string(),
                });
            }
        };

        Ok(InputEvent { at, action })
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.action, self.at)
    }
}

fn parse_number(input: &str) -> Result<f64, EventParseError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EventParseError::InvalidNumber {
            input: input.trim().to_string(),
        })
}

fn parse_time(input: &str) -> Result<f64, EventParseError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| EventParseError::InvalidTime {
            input: input.trim().to_string(),
        })
}

/// 解析风格名称
///
/// 平滑风格可以用 `smooth:曲线名` 指定缓动曲线，如 `smooth:ease_out_back`。
pub fn parse_style(input: &str) -> Result<BarStyle, EventParseError> {
    let (name, easing) = match input.trim().split_once(':') {
        Some((name, easing)) => (name.trim(), Some(easing.trim())),
        None => (input.trim(), None),
    };
    match (name, easing) {
        ("smooth", None) => Ok(BarStyle::smooth()),
        ("smooth", Some(easing)) => EasingFunction::from_name(easing)
            .map(BarStyle::smooth_with)
            .ok_or_else(|| EventParseError::UnknownEasing {
                easing: easing.to_string(),
            }),
        ("fixed-speed" | "fixed_speed" | "pokemon", None) => Ok(BarStyle::fixed_speed()),
        _ => Err(EventParseError::UnknownStyle {
            style: input.trim().to_string(),
        }),
    }
}

/// 输入时间轴
///
/// 事件按时间排序，同一时间点保持插入顺序。
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<InputEvent>,
    cursor: usize,
}

impl Timeline {
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, cursor: 0 }
    }

    /// 取出到 `now` 为止应触发的事件
    pub fn drain_due(&mut self, now: f64) -> &[InputEvent] {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].at <= now {
            self.cursor += 1;
        }
        &self.events[start..self.cursor]
    }

    /// 是否所有事件都已触发
    pub fn is_drained(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// 剩余事件数
    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}
