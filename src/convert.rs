//! 便利函式：以預設的 TeX 引擎將原始碼轉換為 PDF 或 DVI。
//!
//! 每次呼叫都在專屬的暫存目錄中執行引擎，重複執行直到 `texput.aux` 不再變化，
//! 最後回傳輸出檔的內容。暫存目錄在回傳前一定會被刪除。

use crate::error::TexError;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionRequest, EngineOptions};
use crate::models::engine::{EngineSelection, InputFormat, OutputFormat};

/// 將原始碼轉換為指定格式
///
/// `input_format` 為 `tex` 或 `latex`，`output_format` 為 `dvi` 或 `pdf`，
/// `max_runs` 至少為 2。參數錯誤時不會建立任何暫存檔。
pub fn convert(source: &str, input_format: &str, output_format: &str, max_runs: usize) -> Result<Vec<u8>, TexError> {
    let selection = EngineSelection::resolve(input_format, output_format)?;
    convert_with(source, selection.input, selection.output, max_runs)
}

fn convert_with(
    source: &str,
    input: InputFormat,
    output: OutputFormat,
    max_runs: usize,
) -> Result<Vec<u8>, TexError> {
    let request = ConversionRequest::new(source, input, output, max_runs)?;
    let facade = ConversionFacade::with_options(EngineOptions::default());
    facade.execute_conversion(&request).map(|output| output.data)
}

/// TeX -> DVI（tex）
pub fn tex2dvi(source: &str, max_runs: usize) -> Result<Vec<u8>, TexError> {
    convert_with(source, InputFormat::Tex, OutputFormat::Dvi, max_runs)
}

/// LaTeX -> DVI（latex）
pub fn latex2dvi(source: &str, max_runs: usize) -> Result<Vec<u8>, TexError> {
    convert_with(source, InputFormat::Latex, OutputFormat::Dvi, max_runs)
}

/// TeX -> PDF（pdftex）
pub fn tex2pdf(source: &str, max_runs: usize) -> Result<Vec<u8>, TexError> {
    convert_with(source, InputFormat::Tex, OutputFormat::Pdf, max_runs)
}

/// LaTeX -> PDF（pdflatex）
pub fn latex2pdf(source: &str, max_runs: usize) -> Result<Vec<u8>, TexError> {
    convert_with(source, InputFormat::Latex, OutputFormat::Pdf, max_runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_pair_fails_before_running() {
        let err = convert("\\relax", "latex", "ps", 5).unwrap_err();
        assert!(matches!(err, TexError::InvalidArgument(_)));
    }

    #[test]
    fn single_run_is_rejected() {
        let err = convert("\\relax", "latex", "pdf", 1).unwrap_err();
        assert!(matches!(err, TexError::InvalidArgument(_)));
        assert!(matches!(tex2dvi("\\bye", 1).unwrap_err(), TexError::InvalidArgument(_)));
        assert!(matches!(latex2pdf("", 0).unwrap_err(), TexError::InvalidArgument(_)));
    }
}
