use std::time::Duration;
use crate::error::TexError;
use crate::models::engine::{EngineSelection, InputFormat, OutputFormat};

/// 預設最多執行引擎的次數
pub const DEFAULT_MAX_RUNS: usize = 5;

/// 至少需要兩次執行才能比較 texput.aux 是否穩定
pub const MIN_RUNS: usize = 2;

/// 單次轉換的請求，建立後不可變
#[derive(Clone, Debug)]
pub struct ConversionRequest {
    source: String,
    selection: EngineSelection,
    max_runs: usize,
}

impl ConversionRequest {
    pub fn new(
        source: impl Into<String>,
        input: InputFormat,
        output: OutputFormat,
        max_runs: usize,
    ) -> Result<Self, TexError> {
        if max_runs < MIN_RUNS {
            return Err(TexError::invalid_argument(format!(
                "max_runs 至少需為 {}，目前為 {}",
                MIN_RUNS, max_runs
            )));
        }
        Ok(ConversionRequest {
            source: source.into(),
            selection: EngineSelection::new(input, output),
            max_runs,
        })
    }

    /// 由原始位元組建立請求，內容必須是合法的 UTF-8
    pub fn from_bytes(
        source: Vec<u8>,
        input: InputFormat,
        output: OutputFormat,
        max_runs: usize,
    ) -> Result<Self, TexError> {
        let source = String::from_utf8(source)
            .map_err(|e| TexError::invalid_argument(format!("原始碼不是合法的 UTF-8 文字：{}", e)))?;
        Self::new(source, input, output, max_runs)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selection(&self) -> &EngineSelection {
        &self.selection
    }

    pub fn max_runs(&self) -> usize {
        self.max_runs
    }
}

/// 引擎執行選項
#[derive(Clone, Debug, Default)]
pub struct EngineOptions {
    /// 單次執行的時間上限，None 表示不限
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub data: Vec<u8>,
    pub runs: usize,
}
