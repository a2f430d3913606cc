//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (hp.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use hp_runtime::BarStyle;

use crate::error::ConfigError;
use crate::surface::BarLayout;
use crate::timeline::InputEvent;

/// 宿主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// 初始血量上限（也是初始血量）
    #[serde(default = "default_max_health")]
    pub max_health: f64,

    /// 动画风格
    #[serde(default)]
    pub style: BarStyle,

    /// 帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 最长运行时间（秒）
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,

    /// 是否按真实时间节奏运行（否则尽快跑完固定步长）
    #[serde(default)]
    pub realtime: bool,

    /// 终端血条宽度（字符）
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// 血条布局
    #[serde(default)]
    pub layout: BarLayout,

    /// 输入事件，格式见 [`InputEvent`]
    #[serde(default)]
    pub events: Vec<String>,
}

// 默认值函数
fn default_max_health() -> f64 {
    50.0
}

fn default_fps() -> u32 {
    60
}

fn default_max_seconds() -> f64 {
    10.0
}

fn default_columns() -> usize {
    40
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            style: BarStyle::default(),
            fps: default_fps(),
            max_seconds: default_max_seconds(),
            realtime: false,
            columns: default_columns(),
            layout: BarLayout::default(),
            events: Vec::new(),
        }
    }
}

impl HostConfig {
    /// 加载并校验配置文件
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置文件
    ///
    /// 如果文件不存在或无效，返回默认配置并记录警告。
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                message: format!("必须是正数，实际为 {}", self.max_health),
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                message: "必须大于 0".to_string(),
            });
        }
        if !self.max_seconds.is_finite() || self.max_seconds < 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_seconds",
                message: format!("必须是非负数，实际为 {}", self.max_seconds),
            });
        }
        match self.style {
            BarStyle::Smooth { duration, .. } if !duration.is_finite() => {
                return Err(ConfigError::Invalid {
                    field: "style.duration",
                    message: format!("必须是有限数，实际为 {duration}"),
                });
            }
            BarStyle::FixedSpeed {
                units_per_second, ..
            } if !units_per_second.is_finite() || units_per_second <= 0.0 => {
                return Err(ConfigError::Invalid {
                    field: "style.units_per_second",
                    message: format!("必须是正数，实际为 {units_per_second}"),
                });
            }
            _ => {}
        }
        self.parse_events()?;
        Ok(())
    }

    /// 解析配置中的输入事件
    pub fn parse_events(&self) -> Result<Vec<InputEvent>, ConfigError> {
        self.events
            .iter()
            .map(|s| s.parse::<InputEvent>().map_err(ConfigError::from))
            .collect()
    }

    /// 单帧时长（秒）
    pub fn frame_time(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }
}
