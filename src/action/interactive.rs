use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::Path;

use crate::config::config::Mode;
use crate::config::ports::{default_include, AppConfig, ConfigPort, ConversionPort};
use crate::models::conversion::{DEFAULT_MAX_RUNS, MIN_RUNS};
use crate::models::engine::{InputFormat, OutputFormat};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::convert::ConversionAdapter;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<String> {
    println!("=== 歡迎使用互動模式 ===");
    let use_default_config = get_default_config_option()?;
    let input = get_input_path()?;
    let output = get_output_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：latex -> pdf，最多執行 {} 次", DEFAULT_MAX_RUNS);
        Box::new(DefaultConfigAdapter::new(input, output))
    } else {
        Box::new(InteractiveConfigAdapter::new(input, output))
    };

    let config = ConfigService::new(config_port).get_config()?;
    let log_level = get_log_level_option()?;
    setup_logging(&log_level)?;

    let output = ConversionAdapter.execute(config.clone())?;
    println!("實際使用的配置：{:#?}", config);
    Ok(output)
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（latex -> pdf，僅需指定輸入和輸出路徑）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_path() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入檔案或目錄路徑（例如：./paper.tex 或 ./docs）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() { Ok(()) } else { Err(format!("路徑 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_output_path() -> io::Result<String> {
    Input::new()
        .with_prompt("輸入輸出目錄（例如：./output，預設為 output）")
        .default("output".to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_mode() -> io::Result<Mode> {
    let mode = Select::new()
        .with_prompt("選擇模式（使用方向鍵選擇，按 Enter 確認）")
        .items(&["轉換 - 執行 TeX 引擎產生 PDF/DVI", "轉義 - 將純文字轉為 LaTeX 原始碼"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("模式選擇失敗: {}", e)))?;
    Ok(if mode == 1 { Mode::Escape } else { Mode::Convert })
}

pub fn get_formats() -> io::Result<(InputFormat, OutputFormat)> {
    let pairs = [
        (InputFormat::Latex, OutputFormat::Pdf),
        (InputFormat::Latex, OutputFormat::Dvi),
        (InputFormat::Tex, OutputFormat::Pdf),
        (InputFormat::Tex, OutputFormat::Dvi),
    ];
    let items: Vec<String> = pairs.iter().map(|(i, o)| format!("{} -> {}", i, o)).collect();
    let index = Select::new()
        .with_prompt("選擇轉換格式（使用方向鍵選擇，按 Enter 確認）")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("格式選擇失敗: {}", e)))?;
    Ok(pairs[index])
}

pub fn get_max_runs() -> io::Result<usize> {
    Input::new()
        .with_prompt(format!("最多執行引擎幾次？（至少 {}，預設 {}）", MIN_RUNS, DEFAULT_MAX_RUNS))
        .default(DEFAULT_MAX_RUNS)
        .validate_with(|runs: &usize| -> Result<(), String> {
            if *runs >= MIN_RUNS { Ok(()) } else { Err(format!("至少需要 {} 次", MIN_RUNS)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_timeout_option() -> io::Result<Option<u64>> {
    let input: String = Input::new()
        .with_prompt("單次執行的秒數上限（留空表示不限）")
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.is_empty() || input.parse::<u64>().is_ok() { Ok(()) } else { Err("請輸入正整數".to_string()) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(input.parse().ok())
}

pub fn get_no_progress_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否隱藏進度條？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("進度條選項輸入失敗: {}", e)))
}

pub fn get_log_level_option() -> io::Result<String> {
    let levels = ["info", "warn", "error", "debug"];
    let index = Select::new()
        .with_prompt("選擇日誌等級")
        .items(&levels)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌等級選擇失敗: {}", e)))?;
    Ok(levels[index].to_string())
}

// 互動配置適配器
pub struct InteractiveConfigAdapter {
    input: String,
    output: String,
}

impl InteractiveConfigAdapter {
    pub fn new(input: String, output: String) -> Self {
        InteractiveConfigAdapter { input, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let mode = get_mode()?;
        let mut config = AppConfig::with_defaults(self.input.clone(), self.output.clone());
        config.mode = mode;
        config.include = vec![default_include(mode).to_string()];
        if mode == Mode::Convert {
            let (input_format, output_format) = get_formats()?;
            config.input_format = input_format;
            config.output_format = output_format;
            config.max_runs = get_max_runs()?;
            config.timeout_secs = get_timeout_option()?;
        }
        config.no_progress = get_no_progress_option()?;
        Ok(config)
    }
}
