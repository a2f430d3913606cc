//! # Surface 模块
//!
//! 绘制表面抽象与血条绘制。
//!
//! [`Surface`] 是外部画布的接缝：任何 2D 画布只要实现四个基本操作就能
//! 绘制血条。[`TextSurface`] 是终端实现，把血条画成一行字符。

use serde::{Deserialize, Serialize};

use hp_runtime::BarFrame;

/// 矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 向四周扩展
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

/// 2D 绘制表面
pub trait Surface {
    /// 清空画布
    fn clear(&mut self);

    /// 描边矩形
    fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: Color);

    /// 填充矩形
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// 绘制文字
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);
}

/// 血条布局（逻辑像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    #[serde(default = "default_x")]
    pub x: f64,
    #[serde(default = "default_y")]
    pub y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// 边框线宽
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// 标签位置
    #[serde(default = "default_label_x")]
    pub label_x: f64,
    #[serde(default = "default_label_y")]
    pub label_y: f64,
}

fn default_x() -> f64 {
    50.0
}

fn default_y() -> f64 {
    100.0
}

fn default_width() -> f64 {
    400.0
}

fn default_height() -> f64 {
    10.0
}

fn default_line_width() -> f64 {
    4.0
}

fn default_label_x() -> f64 {
    225.0
}

fn default_label_y() -> f64 {
    130.0
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            x: default_x(),
            y: default_y(),
            width: default_width(),
            height: default_height(),
            line_width: default_line_width(),
            label_x: default_label_x(),
            label_y: default_label_y(),
        }
    }
}

impl BarLayout {
    /// 满血时的填充区域
    pub fn track(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// 绘制一帧血条
///
/// 边框向外扩展半个线宽，填充宽度按 `fill_ratio` 缩放。
pub fn draw_bar(surface: &mut impl Surface, layout: &BarLayout, frame: &BarFrame) {
    surface.clear();

    let track = layout.track();
    surface.stroke_rect(
        track.inflate(layout.line_width / 2.0),
        layout.line_width,
        Color::Black,
    );

    let fill = Rect::new(
        track.x,
        track.y,
        track.width * frame.fill_ratio,
        track.height,
    );
    surface.fill_rect(fill, Color::Red);

    surface.fill_text(&frame.label, layout.label_x, layout.label_y, Color::Black);
}

/// 终端绘制表面
///
/// 只关心横向：边框宽度映射为 `columns` 个字符，填充按比例换算成 `#`。
#[derive(Debug, Clone)]
pub struct TextSurface {
    columns: usize,
    /// 边框宽度（逻辑像素）
    track_width: f64,
    /// 填充宽度（逻辑像素）
    fill_width: f64,
    label: String,
}

impl TextSurface {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            track_width: 0.0,
            fill_width: 0.0,
            label: String::new(),
        }
    }

    /// 渲染为一行文字，如 `[#####.....] 25/50`
    pub fn render(&self) -> String {
        let ratio = if self.track_width > 0.0 {
            (self.fill_width / self.track_width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (ratio * self.columns as f64).round() as usize;
        format!(
            "[{}{}] {}",
            "#".repeat(filled),
            ".".repeat(self.columns - filled),
            self.label
        )
    }
}

impl Surface for TextSurface {
    fn clear(&mut self) {
        self.track_width = 0.0;
        self.fill_width = 0.0;
        self.label.clear();
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f64, _color: Color) {
        // 描边框是外扩过的，换算回内部宽度
        self.track_width = (rect.width - line_width).max(0.0);
    }

    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.fill_width = rect.width.max(0.0);
    }

    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _color: Color) {
        self.label = text.to_string();
    }
}
