use regex::Regex;
use std::sync::OnceLock;

fn context_line() -> &'static Regex {
    static CONTEXT: OnceLock<Regex> = OnceLock::new();
    CONTEXT.get_or_init(|| Regex::new(r"^l\.\d+ ").expect("valid regex"))
}

/// 從 TeX 日誌中擷取錯誤訊息（以 `!` 開頭的行及其後的 `l.<行號>` 行）
pub fn extract_errors(log: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let mut in_error = false;
    for line in log.lines() {
        if line.starts_with('!') {
            errors.push(line.to_string());
            in_error = true;
        } else if in_error && context_line().is_match(line) {
            errors.push(line.to_string());
            in_error = false;
        }
    }
    errors
}

/// 錯誤摘要，日誌中沒有可辨識的錯誤時取最後幾行
pub fn summarize(log: &str, tail: usize) -> String {
    let errors = extract_errors(log);
    if !errors.is_empty() {
        return errors.join("\n");
    }
    let lines: Vec<&str> = log.lines().collect();
    let start = lines.len().saturating_sub(tail);
    lines[start..].join("\n")
}
