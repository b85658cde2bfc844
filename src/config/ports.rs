use std::io;
use crate::config::config::Mode;
use crate::models::conversion::DEFAULT_MAX_RUNS;
use crate::models::engine::{InputFormat, OutputFormat};

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: String,
    pub output: String,
    pub mode: Mode,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub max_runs: usize,
    pub timeout_secs: Option<u64>,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub jobs: Option<usize>,
    pub no_progress: bool,
}

impl AppConfig {
    /// 只指定輸入與輸出時使用的配置：latex -> pdf，最多執行 5 次
    pub fn with_defaults(input: String, output: String) -> Self {
        AppConfig {
            input,
            output,
            mode: Mode::Convert,
            input_format: InputFormat::Latex,
            output_format: OutputFormat::Pdf,
            max_runs: DEFAULT_MAX_RUNS,
            timeout_secs: None,
            include: vec![default_include(Mode::Convert).to_string()],
            exclude: None,
            jobs: None,
            no_progress: false,
        }
    }
}

/// 目錄輸入時預設收集的檔案
pub fn default_include(mode: Mode) -> &'static str {
    match mode {
        Mode::Convert => "*.tex",
        Mode::Escape => "*.txt",
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<String>;
}
