use std::io;
use clap::Parser;
use crate::config::config::{Cli, Mode, validate_input_path, validate_file_patterns, validate_max_runs, validate_jobs};
use crate::action::interactive::process_interactive_mode;
use crate::utils::utils::setup_logging;
use crate::config::ports::{default_include, AppConfig, ConfigPort, ConversionPort};
use crate::models::conversion::DEFAULT_MAX_RUNS;
use crate::models::engine::{InputFormat, OutputFormat};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::convert::ConversionAdapter;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref().unwrap_or("info"))?;

    // 選擇配置適配器
    let config_port: Box<dyn ConfigPort> = if cli.is_default_config() {
        log::info!("未提供選項參數，使用預設配置：latex -> pdf，最多執行 {} 次", DEFAULT_MAX_RUNS);
        Box::new(DefaultConfigAdapter::new(cli.input.clone(), cli.output.clone()))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let output = conversion_port.execute(config.clone())?;

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(output)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_input_path(&self.cli.input)?;

        let mode = self.cli.mode.unwrap_or(Mode::Convert);
        let include = self.cli.include.clone().unwrap_or_else(|| vec![default_include(mode).to_string()]);
        validate_file_patterns(&include, &self.cli.exclude)?;

        let max_runs = self.cli.max_runs.unwrap_or(DEFAULT_MAX_RUNS);
        validate_max_runs(max_runs)?;
        if let Some(jobs) = self.cli.jobs {
            validate_jobs(jobs)?;
        }

        if mode == Mode::Escape && (self.cli.input_format.is_some() || self.cli.output_format.is_some()) {
            log::warn!("轉義模式不使用 --input-format 與 --output-format，已忽略");
        }

        Ok(AppConfig {
            input: self.cli.input.clone(),
            output: self.cli.output.clone(),
            mode,
            input_format: self.cli.input_format.unwrap_or(InputFormat::Latex),
            output_format: self.cli.output_format.unwrap_or(OutputFormat::Pdf),
            max_runs,
            timeout_secs: self.cli.timeout,
            include,
            exclude: self.cli.exclude.clone(),
            jobs: self.cli.jobs,
            no_progress: self.cli.no_progress.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_adapter_applies_options() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_string_lossy().to_string();
        let cli = parse(&[
            "tex_convert", input.as_str(), "--input-format", "tex", "--output-format", "dvi",
            "--max-runs", "3", "--timeout", "30", "--jobs", "2",
        ]);
        let config = CliConfigAdapter::new(cli).get_config().unwrap();
        assert_eq!(config.input_format, InputFormat::Tex);
        assert_eq!(config.output_format, OutputFormat::Dvi);
        assert_eq!(config.max_runs, 3);
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.include, vec!["*.tex".to_string()]);
    }

    #[test]
    fn cli_adapter_rejects_single_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_string_lossy().to_string();
        let cli = parse(&["tex_convert", input.as_str(), "--max-runs", "1"]);
        let err = CliConfigAdapter::new(cli).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn escape_mode_defaults_to_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_string_lossy().to_string();
        let cli = parse(&["tex_convert", input.as_str(), "--mode", "escape"]);
        let config = CliConfigAdapter::new(cli).get_config().unwrap();
        assert_eq!(config.mode, Mode::Escape);
        assert_eq!(config.include, vec!["*.txt".to_string()]);
    }
}
