//! # Driver 模块
//!
//! 帧循环驱动：每帧应用到期的输入、推进血条、绘制。
//!
//! 默认时钟按固定步长推进，结果可复现。`realtime` 打开时按帧时长休眠，
//! 并把两帧之间实际经过的时间作为 `dt`，掉帧时动画仍按墙钟时间完成。

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use hp_runtime::{BarFrame, HealthGauge};

use crate::config::HostConfig;
use crate::error::ConfigError;
use crate::surface::{BarLayout, Surface, draw_bar};
use crate::timeline::Timeline;

/// 运行结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 输入全部处理完且动画已完成
    Settled,
    /// 达到最长运行时间
    TimeLimit,
}

/// 运行统计
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// 运行的帧数
    pub frames: u64,
    /// 模拟时间（秒）
    pub elapsed: f64,
    /// 最后一帧
    pub last_frame: BarFrame,
    pub reason: StopReason,
}

/// 帧循环驱动
#[derive(Debug)]
pub struct FrameDriver {
    gauge: HealthGauge,
    timeline: Timeline,
    layout: BarLayout,
    frame_time: f64,
    max_seconds: f64,
    realtime: bool,
    /// 模拟时钟（秒）
    clock: f64,
    frames: u64,
}

impl FrameDriver {
    /// 按配置创建驱动
    pub fn from_config(config: &HostConfig) -> Result<Self, ConfigError> {
        let events = config.parse_events()?;
        Ok(Self {
            gauge: HealthGauge::new(config.max_health, config.style),
            timeline: Timeline::new(events),
            layout: config.layout,
            frame_time: config.frame_time(),
            max_seconds: config.max_seconds,
            realtime: config.realtime,
            clock: 0.0,
            frames: 0,
        })
    }

    pub fn gauge(&self) -> &HealthGauge {
        &self.gauge
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// 按固定步长推进一帧
    pub fn step(&mut self, surface: &mut impl Surface) -> BarFrame {
        self.step_by(surface, self.frame_time)
    }

    /// 推进 `dt` 秒
    pub fn step_by(&mut self, surface: &mut impl Surface, dt: f64) -> BarFrame {
        for event in self.timeline.drain_due(self.clock) {
            debug!(at = event.at, action = %event.action, "应用输入");
            event.action.apply(&mut self.gauge);
        }

        let dt = dt.max(0.0);
        self.gauge.tick(dt);
        self.clock += dt;
        self.frames += 1;

        let frame = self.gauge.frame();
        draw_bar(surface, &self.layout, &frame);
        trace!(
            frame = self.frames,
            shown = frame.shown,
            settled = frame.settled,
            "帧"
        );
        frame
    }

    /// 是否已无事可做
    pub fn is_idle(&self) -> bool {
        self.timeline.is_drained() && self.gauge.bar().is_animation_complete()
    }

    /// 运行到空闲或超时
    ///
    /// 每帧结束后调用 `on_frame`。
    pub fn run<S: Surface>(
        &mut self,
        surface: &mut S,
        mut on_frame: impl FnMut(&S, &BarFrame),
    ) -> RunSummary {
        info!(
            max_health = self.gauge.max_health(),
            style = self.gauge.style().name(),
            events = self.timeline.remaining(),
            "开始运行"
        );

        let frame_duration = Duration::from_secs_f64(self.frame_time);
        let mut last_frame = self.gauge.frame();
        let mut last_instant: Option<Instant> = None;
        let reason = loop {
            if self.is_idle() {
                break StopReason::Settled;
            }
            if self.clock >= self.max_seconds {
                break StopReason::TimeLimit;
            }

            let started = Instant::now();
            // 第一帧没有上一帧可量，使用标称帧时长
            let dt = match last_instant {
                Some(prev) if self.realtime => started.duration_since(prev).as_secs_f64(),
                _ => self.frame_time,
            };
            last_instant = Some(started);

            last_frame = self.step_by(surface, dt);
            on_frame(surface, &last_frame);

            if self.realtime
                && let Some(rest) = frame_duration.checked_sub(started.elapsed())
            {
                thread::sleep(rest);
            }
        };

        info!(frames = self.frames, elapsed = self.clock, reason = ?reason, "运行结束");
        RunSummary {
            frames: self.frames,
            elapsed: self.clock,
            last_frame,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use hp_runtime::{BarStyle, EasingFunction};

    use super::*;
    use crate::surface::TextSurface;

    fn config(events: &[&str]) -> HostConfig {
        HostConfig {
            fps: 8,
            events: events.iter().map(|s| s.to_string()).collect(),
            ..HostConfig::default()
        }
    }

    #[test]
    fn test_idle_without_events() {
        let mut driver = FrameDriver::from_config(&config(&[])).unwrap();
        let mut surface = TextSurface::new(10);
        let summary = driver.run(&mut surface, |_, _| {});
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.reason, StopReason::Settled);
        assert_eq!(summary.last_frame.label, "50/50");
    }

    #[test]
    fn test_runs_until_settled() {
        let mut driver = FrameDriver::from_config(&config(&["set=25"])).unwrap();
        let mut surface = TextSurface::new(10);
        let mut lines = Vec::new();
        let summary = driver.run(&mut surface, |s, _| lines.push(s.render()));

        assert_eq!(summary.reason, StopReason::Settled);
        assert_eq!(summary.last_frame.shown, 25.0);
        // 1 秒动画，8 fps
        assert_eq!(summary.frames, 8);
        assert_eq!(lines.last().map(String::as_str), Some("[#####.....] 25/50"));
    }

    #[test]
    fn test_time_limit() {
        let cfg = HostConfig {
            max_seconds: 0.5,
            ..config(&["set=0"])
        };
        let mut driver = FrameDriver::from_config(&cfg).unwrap();
        let summary = driver.run(&mut TextSurface::new(10), |_, _| {});
        assert_eq!(summary.reason, StopReason::TimeLimit);
        assert!(!summary.last_frame.settled);
    }

    #[test]
    fn test_events_wait_for_their_time() {
        let mut driver = FrameDriver::from_config(&config(&["damage=10@0.3"])).unwrap();
        let mut surface = TextSurface::new(10);

        // 0、0.125、0.25 三帧时事件尚未到期
        for _ in 0..3 {
            driver.step(&mut surface);
            assert_eq!(driver.gauge().bar().health(), 50.0);
        }
        driver.step(&mut surface);
        assert_eq!(driver.gauge().bar().health(), 40.0);
    }

    #[test]
    fn test_step_by_advances_given_time() {
        let mut driver = FrameDriver::from_config(&config(&["set=0"])).unwrap();
        let mut surface = TextSurface::new(10);

        driver.step_by(&mut surface, 0.5);
        assert_eq!(driver.clock(), 0.5);
        assert_eq!(driver.gauge().bar().progress(), 0.5);

        // 负的时间间隔不会让时钟倒退
        driver.step_by(&mut surface, -1.0);
        assert_eq!(driver.clock(), 0.5);
        assert_eq!(driver.gauge().bar().progress(), 0.5);
    }

    /// 真实时间模式：慢帧按实际经过的时间推进动画
    #[test]
    fn test_realtime_uses_measured_frame_time() {
        let cfg = HostConfig {
            fps: 100,
            realtime: true,
            style: BarStyle::Smooth {
                duration: 0.2,
                easing: EasingFunction::Health,
            },
            ..config(&["set=0"])
        };
        let mut driver = FrameDriver::from_config(&cfg).unwrap();
        let summary = driver.run(&mut TextSurface::new(10), |_, _| {
            thread::sleep(Duration::from_millis(30));
        });

        assert_eq!(summary.reason, StopReason::Settled);
        // 固定步长需要 20 帧，每帧至少 30ms 时只需不到一半
        assert!(summary.frames < 10, "frames = {}", summary.frames);
        assert!(summary.elapsed >= 0.2);
    }
}
