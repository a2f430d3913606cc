//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 hp-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `config-check`: 检查宿主配置文件

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hp_host::HostConfig;
use walkdir::WalkDir;
use xshell::{Shell, cmd};

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    if cmd!(sh, "cargo llvm-cov --version").quiet().run().is_err() {
        anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());
    let sh = Shell::new()?;

    match sub.as_str() {
        "check-all" => {
            eprintln!("\n==> cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            eprintln!("\n==> cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            eprintln!("\n==> cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        "cov-runtime" => {
            ensure_cargo_llvm_cov_available(&sh)?;

            eprintln!("\n==> cargo llvm-cov -p hp-runtime --all-features --html");
            cmd!(sh, "cargo llvm-cov -p hp-runtime --all-features --html").run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available(&sh)?;

            // 排除 xtask，以免稀释信号
            eprintln!("\n==> cargo llvm-cov --workspace --exclude xtask --all-features --html");
            cmd!(
                sh,
                "cargo llvm-cov --workspace --exclude xtask --all-features --html"
            )
            .run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "config-check" => {
            let path = args.next();
            config_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 hp-runtime 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  config-check    检查宿主配置文件

CONFIG-CHECK:
  cargo xtask config-check [path]

  不带参数：检查 hp.json 和 configs/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 语法与字段类型
    - 数值范围（max_health、fps、风格参数）
    - 输入事件格式
"#
    );
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 默认检查的配置文件
const DEFAULT_CONFIG: &str = "hp.json";
/// 默认检查的配置目录
const DEFAULT_CONFIG_DIR: &str = "configs";

/// 执行配置检查
fn config_check(path: Option<&str>) -> anyhow::Result<()> {
    let mut walk_errors = Vec::new();
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                let (files, errors) = collect_config_files(&path);
                walk_errors.extend(errors);
                files
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let mut files = Vec::new();
            let default_file = PathBuf::from(DEFAULT_CONFIG);
            if default_file.is_file() {
                files.push(default_file);
            }
            let dir = Path::new(DEFAULT_CONFIG_DIR);
            if dir.is_dir() {
                let (found, errors) = collect_config_files(dir);
                files.extend(found);
                walk_errors.extend(errors);
            }
            files
        }
    };

    if files.is_empty() && walk_errors.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut errors = walk_errors.len();
    for error in &walk_errors {
        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        eprintln!("[ERROR] {}: 无法读取 - {}", path, error);
    }
    for file in &files {
        match HostConfig::load(file) {
            Ok(config) => eprintln!(
                "[OK] {}: max_health={} style={} events={}",
                file.display(),
                config.max_health,
                config.style.name(),
                config.events.len()
            ),
            Err(e) => {
                eprintln!("[ERROR] {}: {}", file.display(), e);
                errors += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        eprintln!("❌ {} 个错误", errors);
        anyhow::bail!("配置检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有配置文件
///
/// 遍历失败的条目（如无权限的子目录）单独返回，由调用方计入错误。
fn collect_config_files(dir: &Path) -> (Vec<PathBuf>, Vec<walkdir::Error>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    for entry in WalkDir::new(dir) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => errors.push(e),
        }
    }
    files.sort();
    (files, errors)
}
