use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use log::{error, info, warn};
use rayon::prelude::*;
use crate::config::config::{validate_input_path, Mode};
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::TexError;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionRequest, EngineOptions};
use crate::utils::escape::{escape_latex, has_blank_lines};
use crate::utils::file::{collect_files, output_path_for, read_file_content, write_output_file};
use crate::utils::tex_log::summarize;
use crate::utils::utils::{create_progress_bar, create_regex_sets, format_file_size};

const ESCAPED_EXTENSION: &str = "escaped.tex";

// 轉換執行適配器，批次處理檔案或目錄
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<String> {
        let input_path = validate_input_path(&config.input)?;
        let output_dir = Path::new(&config.output);
        fs::create_dir_all(output_dir)?;

        let (include_set, exclude_set) = create_regex_sets(
            &config.include,
            &config.exclude.clone().unwrap_or_default(),
        );
        let files = collect_files(input_path, &include_set, &exclude_set)?;
        if files.is_empty() {
            warn!("無符合條件的檔案可處理");
            return Ok(config.output.clone());
        }
        info!("正在處理 {} 個檔案，模式：{:?}", files.len(), config.mode);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs.unwrap_or(0))
            .build()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("建立工作執行緒失敗: {}", e)))?;

        let facade = ConversionFacade::with_options(EngineOptions {
            timeout: config.timeout_secs.map(Duration::from_secs),
        });
        let pb = create_progress_bar(files.len() as u64, config.no_progress);
        let failed = AtomicUsize::new(0);

        pool.install(|| {
            files.par_iter().for_each(|file_path| {
                let target = match config.mode {
                    Mode::Convert => output_path_for(file_path, input_path, output_dir, config.output_format.as_str()),
                    Mode::Escape => output_path_for(file_path, input_path, output_dir, ESCAPED_EXTENSION),
                };
                let result = match config.mode {
                    Mode::Convert => convert_file(&facade, &config, file_path, &target),
                    Mode::Escape => escape_file(file_path, &target).map_err(TexError::from),
                };
                match result {
                    Ok(()) => pb.update("已處理"),
                    Err(e) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        report_failure(file_path, &e);
                        pb.update("已處理");
                    }
                }
            });
        });

        let failed = failed.into_inner();
        let succeeded = files.len() - failed;
        pb.finish(succeeded, failed);
        info!("處理完成，成功 {} 個，失敗 {} 個", succeeded, failed);
        if succeeded == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, format!("全部 {} 個檔案處理失敗", failed)));
        }
        Ok(config.output.clone())
    }
}

/// 轉換單一檔案並寫入輸出目錄
pub fn convert_file(
    facade: &dyn ConversionFacadeTrait,
    config: &AppConfig,
    file_path: &Path,
    target: &Path,
) -> Result<(), TexError> {
    let (data, file_size) = read_file_content(file_path)?;
    info!("讀取檔案：{}，大小：{}", file_path.display(), format_file_size(file_size));
    let request = ConversionRequest::from_bytes(data, config.input_format, config.output_format, config.max_runs)?;
    let output = facade.execute_conversion(&request)?;
    write_output_file(target, &output.data)?;
    info!(
        "生成 {}（執行 {} 次，大小：{}）",
        target.display(),
        output.runs,
        format_file_size(output.data.len())
    );
    Ok(())
}

/// 將純文字檔轉義為 LaTeX 片段
pub fn escape_file(file_path: &Path, target: &Path) -> io::Result<()> {
    let text = fs::read_to_string(file_path)?;
    if has_blank_lines(&text) {
        warn!("{} 含有空行，LaTeX 會將其視為段落分隔", file_path.display());
    }
    write_output_file(target, escape_latex(&text).as_bytes())?;
    info!("生成 {}", target.display());
    Ok(())
}

fn report_failure(file_path: &Path, err: &TexError) {
    error!("處理檔案 {} 失敗: {}", file_path.display(), err);
    if let Some(log) = err.engine_log() {
        error!("引擎日誌摘要：\n{}", summarize(log, 10));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::{EngineSelection, RunOutcome};
    use crate::service::traits::i_service::EngineServiceTrait;
    use crate::service::work_dir::WorkDirectory;

    struct EchoEngine;

    impl EngineServiceTrait for EchoEngine {
        fn run(&self, selection: &EngineSelection, work_dir: &WorkDirectory) -> Result<RunOutcome, TexError> {
            let source = work_dir.read("texput.tex")?;
            work_dir.write(&selection.output_file(), &source)?;
            Ok(RunOutcome::Succeeded { aux: Vec::new() })
        }
    }

    #[test]
    fn convert_file_writes_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.tex");
        fs::write(&input, "\\bye").unwrap();
        let target = dir.path().join("out/doc.pdf");
        let config = AppConfig::with_defaults(input.to_string_lossy().to_string(), "out".to_string());
        let facade = ConversionFacade::new(Box::new(EchoEngine)).temp_root(dir.path());

        convert_file(&facade, &config, &input, &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"\\bye");
    }

    #[test]
    fn convert_file_rejects_non_utf8_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.tex");
        fs::write(&input, [0xc3, 0x28]).unwrap();
        let config = AppConfig::with_defaults(input.to_string_lossy().to_string(), "out".to_string());
        let facade = ConversionFacade::new(Box::new(EchoEngine)).temp_root(dir.path());

        let err = convert_file(&facade, &config, &input, &dir.path().join("doc.pdf")).unwrap_err();
        assert!(matches!(err, TexError::InvalidArgument(_)));
    }

    #[test]
    fn escape_mode_writes_escaped_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("a.txt"), "50% off & more").unwrap();
        let output = dir.path().join("out");

        let mut config = AppConfig::with_defaults(
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        );
        config.mode = Mode::Escape;
        config.include = vec!["*.txt".to_string()];
        config.no_progress = true;
        config.jobs = Some(1);

        ConversionAdapter.execute(config).unwrap();
        let escaped = fs::read_to_string(output.join("a.escaped.tex")).unwrap();
        assert_eq!(escaped, "50\\% off \\& more");
    }
}
