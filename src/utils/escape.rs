/// 回傳字元在 LaTeX 中的安全寫法，不需轉換時回傳 None
fn latex_replacement(c: char) -> Option<&'static str> {
    let replacement = match c {
        '$' => "\\$",
        '%' => "\\%",
        '&' => "\\&",
        '#' => "\\#",
        '_' => "\\_",
        '{' => "\\{",
        '}' => "\\}",
        '[' => "{[}",
        ']' => "{]}",
        '"' => "{''}",
        '\\' => "\\textbackslash{}",
        '~' => "\\textasciitilde{}",
        '<' => "\\textless{}",
        '>' => "\\textgreater{}",
        '^' => "\\textasciicircum{}",
        // 避免形成 ?` 與 !` 連字
        '`' => "{}`",
        '\n' => "\\\\",
        _ => return None,
    };
    Some(replacement)
}

/// 將文字轉義為可直接放入 LaTeX 原始碼的形式
///
/// 輸入不可包含空行（開頭或結尾的換行、連續兩個換行），
/// LaTeX 會把空行視為段落分隔，此函式不特別處理，可先以 [`has_blank_lines`] 檢查。
pub fn escape_latex(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match latex_replacement(c) {
            Some(replacement) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    escaped
}

/// 檢查文字是否含有空行
pub fn has_blank_lines(s: &str) -> bool {
    s.starts_with('\n') || s.ends_with('\n') || s.contains("\n\n")
}
