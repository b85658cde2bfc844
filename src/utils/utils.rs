use std::io::{self, Write};
use std::time::Instant;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn parse_log_level(log_level: &str) -> log::LevelFilter {
    match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    env_logger::Builder::new()
        .filter_level(parse_log_level(log_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, action: &str) {
        if self.no_progress {
            return;
        }
        self.pb.inc(1);
        let elapsed = self.start.elapsed().as_secs_f64();
        let count = self.pb.position();
        let speed = if elapsed > 0.0 { count as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("{}：{} 檔案，速度：{:.1} 檔案/秒", action, count, speed));
    }

    pub fn finish(&self, succeeded: usize, failed: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!("完成，成功 {} 個，失敗 {} 個", succeeded, failed));
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// 將 `*.tex` 之類的檔名模式轉為正規表示式，比對完整檔名
pub fn pattern_to_regex(pattern: &str) -> String {
    format!("^{}$", regex::escape(pattern).replace("\\*", ".*").replace("\\?", "."))
}

pub fn create_regex_sets(include: &[String], exclude: &[String]) -> (RegexSet, RegexSet) {
    let include_patterns: Vec<_> = include.iter().map(|p| pattern_to_regex(p)).collect();
    let exclude_patterns: Vec<_> = exclude.iter().map(|p| pattern_to_regex(p)).collect();

    let include_set = RegexSet::new(&include_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的包含模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    let exclude_set = RegexSet::new(&exclude_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的排除模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    (include_set, exclude_set)
}
