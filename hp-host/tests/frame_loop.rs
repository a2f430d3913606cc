//! # 帧循环集成测试
//!
//! 测试 配置 → Timeline → HealthGauge → Surface 的完整链路。
//! 这些测试不依赖真实终端，也不按真实时间休眠。

use hp_host::{FrameDriver, HostConfig, StopReason, TextSurface};
use hp_runtime::{BarStyle, EasingFunction};

/// 4 fps 让每帧步长是精确的二进制小数
fn config(style: BarStyle, max_health: f64, events: &[&str]) -> HostConfig {
    HostConfig {
        max_health,
        style,
        fps: 4,
        columns: 10,
        events: events.iter().map(|s| s.to_string()).collect(),
        ..HostConfig::default()
    }
}

fn run_lines(config: &HostConfig) -> (Vec<String>, hp_host::RunSummary) {
    let mut driver = FrameDriver::from_config(config).unwrap();
    let mut surface = TextSurface::new(config.columns);
    let mut lines = Vec::new();
    let summary = driver.run(&mut surface, |s, _| lines.push(s.render()));
    (lines, summary)
}

/// 匀速风格下的逐帧输出
#[test]
fn test_fixed_speed_frames() {
    let (lines, summary) = run_lines(&config(BarStyle::fixed_speed(), 40.0, &["set=20"]));

    insta::assert_snapshot!(lines.join("\n"), @r"
    [#########.] 35/40
    [########..] 30/40
    [######....] 25/40
    [#####.....] 20/40
    ");
    assert_eq!(summary.reason, StopReason::Settled);
    assert_eq!(summary.frames, 4);
}

/// 平滑风格：先快后慢，最终精确落在目标值
#[test]
fn test_smooth_frames_converge() {
    let (lines, summary) = run_lines(&config(BarStyle::smooth(), 40.0, &["set=0"]));

    assert_eq!(lines.len(), 4);
    assert_eq!(summary.last_frame.shown, 0.0);
    assert_eq!(lines.last().unwrap(), "[..........] 0/40");

    // 第一帧已经走过超过四分之一
    let first: f64 = lines[0]
        .rsplit_once(' ')
        .and_then(|(_, label)| label.split_once('/'))
        .and_then(|(shown, _)| shown.parse().ok())
        .unwrap();
    assert!(first < 30.0);
}

/// 动画中途缩小上限：目标仍在范围内时继续动画
#[test]
fn test_shrinking_max_mid_animation() {
    let (lines, summary) = run_lines(&config(
        BarStyle::fixed_speed(),
        40.0,
        &["set=10", "max=30@0.25"],
    ));

    // 第一帧：40 → 10 走了四分之一
    assert_eq!(lines[0], "[########..] 33/40");
    // 上限缩小到 30，真实血量 10 仍在范围内，继续动画
    assert_eq!(lines[1], "[########..] 25/30");
    assert_eq!(summary.last_frame.label, "10/30");
    assert_eq!(summary.reason, StopReason::Settled);
}

/// 指定回拉曲线：中途越过目标值，最终回到目标值
#[test]
fn test_selected_easing_overshoots_target() {
    let style = BarStyle::smooth_with(EasingFunction::EaseOutBack);
    let mut driver = FrameDriver::from_config(&config(style, 40.0, &["set=10"])).unwrap();
    let mut surface = TextSurface::new(10);
    let mut shown = Vec::new();
    let summary = driver.run(&mut surface, |_, frame| shown.push(frame.shown));

    assert_eq!(shown.len(), 4);
    assert!(shown.iter().any(|&value| value < 10.0));
    assert_eq!(summary.last_frame.shown, 10.0);
    assert_eq!(summary.last_frame.label, "10/40");
}

/// 时间轴中途切换曲线
#[test]
fn test_easing_selected_from_timeline() {
    let (lines, _) = run_lines(&config(
        BarStyle::smooth(),
        40.0,
        &["style=smooth:linear", "set=20"],
    ));

    assert_eq!(lines[0], "[#########.] 35/40");
}

#[test]
fn test_max_below_health_hard_sets() {
    let (lines, summary) = run_lines(&config(BarStyle::smooth(), 40.0, &["max=12"]));

    assert_eq!(lines, vec!["[##########] 12/12"]);
    assert!(summary.last_frame.settled);
}

/// 中途切换风格：新的缓动函数在下一帧生效
#[test]
fn test_style_switch_mid_animation() {
    let (lines, _) = run_lines(&config(
        BarStyle::smooth(),
        40.0,
        &["style=fixed-speed", "set=20"],
    ));

    assert_eq!(lines[0], "[#########.] 35/40");
}

#[test]
fn test_repeated_damage_retargets_from_displayed_value() {
    let (_, summary) = run_lines(&config(
        BarStyle::fixed_speed(),
        40.0,
        &["damage=8", "damage=8@0.5"],
    ));

    assert_eq!(summary.last_frame.label, "24/40");
    assert_eq!(summary.last_frame.shown, 24.0);
}
