//! # hp-host
//!
//! 血条动画的终端宿主：按时间轴输入驱动血条，逐帧把血条画成一行字符。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p hp-host -- -e set=25@0.5
//! cargo run -p hp-host -- --style fixed-speed --max 300 -e damage=250 -e heal=40@1.5
//! cargo run -p hp-host -- --style smooth:ease_out_back -e set=10
//! cargo run -p hp-host -- --config hp.json --realtime
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use hp_host::timeline::parse_style;
use hp_host::{FrameDriver, HostConfig, TextSurface};
use hp_runtime::BarStyle;

/// 默认配置文件
const DEFAULT_CONFIG: &str = "hp.json";

#[derive(Parser)]
#[command(name = "hp-host")]
#[command(about = "血条动画演示 - 在终端中逐帧绘制血条")]
#[command(version)]
struct Cli {
    /// 配置文件（默认读取 hp.json，不存在时使用默认配置）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 血量上限
    #[arg(short, long)]
    max: Option<f64>,

    /// 动画风格（smooth / fixed-speed），平滑风格可指定曲线，如 smooth:ease_out_back
    #[arg(short, long, value_parser = parse_style)]
    style: Option<BarStyle>,

    /// 帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 最长运行时间（秒）
    #[arg(long)]
    seconds: Option<f64>,

    /// 按真实时间节奏运行
    #[arg(long)]
    realtime: bool,

    /// 血条宽度（字符）
    #[arg(long)]
    columns: Option<usize>,

    /// 输入事件，如 set=25@0.5、damage=10@1、max=30@2、style=smooth@3
    #[arg(short, long = "event")]
    events: Vec<String>,

    /// 输出每一帧（默认只输出有变化的帧）
    #[arg(long)]
    every_frame: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply_to(&self, config: &mut HostConfig) {
        if let Some(max) = self.max {
            config.max_health = max;
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(seconds) = self.seconds {
            config.max_seconds = seconds;
        }
        if self.realtime {
            config.realtime = true;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        config.events.extend(self.events.iter().cloned());
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(&cli) {
        eprintln!("hp-host error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => HostConfig::load_or_default(DEFAULT_CONFIG),
    };
    cli.apply_to(&mut config);
    config.validate().context("配置无效")?;

    let mut driver = FrameDriver::from_config(&config)?;
    let mut surface = TextSurface::new(config.columns);

    let mut last_line = initial_line(&driver, &config);
    println!("{last_line}");
    let summary = driver.run(&mut surface, |surface, _frame| {
        let line = surface.render();
        if cli.every_frame || line != last_line {
            println!("{line}");
            last_line = line;
        }
    });

    println!(
        "完成: {} 帧, {:.2} 秒, 显示 {}",
        summary.frames, summary.elapsed, summary.last_frame.label
    );
    Ok(())
}

/// 第一帧之前的血条
fn initial_line(driver: &FrameDriver, config: &HostConfig) -> String {
    let mut surface = TextSurface::new(config.columns);
    hp_host::draw_bar(&mut surface, &config.layout, &driver.gauge().frame());
    surface.render()
}
