use clap::{Parser, ValueEnum};
use std::io;
use std::path::Path;
use crate::models::conversion::MIN_RUNS;
use crate::models::engine::{InputFormat, OutputFormat};

#[derive(Parser, Clone)]
#[command(
    name = "tex_convert",
    about = "將 TeX/LaTeX 原始碼轉換為 PDF 或 DVI",
    long_about = "呼叫外部 TeX 引擎（tex、latex、pdftex、pdflatex）將 TeX/LaTeX 原始碼轉換為 PDF 或 DVI，重複執行直到 texput.aux 穩定以解析交互參照。\n亦可使用 --mode escape 將純文字轉義為 LaTeX 原始碼。\n僅指定 input 時使用預設配置（latex -> pdf，最多 5 次）；不帶任何參數執行則進入互動模式。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    pub input: String,
    #[arg(short, long, default_value = "output")]
    pub output: String,
    #[arg(long)]
    pub mode: Option<Mode>,
    #[arg(long)]
    pub input_format: Option<InputFormat>,
    #[arg(long)]
    pub output_format: Option<OutputFormat>,
    #[arg(long)]
    pub max_runs: Option<usize>,
    /// 單次引擎執行的秒數上限
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    /// 平行轉換的工作數
    #[arg(long)]
    pub jobs: Option<usize>,
    #[arg(long)]
    pub no_progress: Option<bool>,
    #[arg(long, value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

impl Cli {
    /// 除 input、output 外未指定任何選項
    pub fn is_default_config(&self) -> bool {
        self.mode.is_none()
            && self.input_format.is_none()
            && self.output_format.is_none()
            && self.max_runs.is_none()
            && self.timeout.is_none()
            && self.include.is_none()
            && self.exclude.is_none()
            && self.jobs.is_none()
            && self.no_progress.is_none()
            && self.log_level.is_none()
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Debug)]
pub enum Mode {
    /// 執行 TeX 引擎產生 PDF/DVI
    Convert,
    /// 將純文字轉義為 LaTeX 原始碼
    Escape,
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input)
        ));
    }
    Ok(path)
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> io::Result<()> {
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的包含模式: {}", pattern)));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", pattern)));
            }
        }
    }
    Ok(())
}

pub fn validate_max_runs(max_runs: usize) -> io::Result<()> {
    if max_runs < MIN_RUNS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("--max-runs 至少需為 {}，目前為 {}", MIN_RUNS, max_runs)
        ));
    }
    Ok(())
}

pub fn validate_jobs(jobs: usize) -> io::Result<()> {
    if jobs == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "--jobs 至少需為 1"));
    }
    Ok(())
}
