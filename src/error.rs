use std::io;
use std::time::Duration;

/// 轉換流程使用的 Result 型別
pub type Result<T, E = TexError> = std::result::Result<T, E>;

/// TeX 轉換錯誤
#[derive(Debug, thiserror::Error)]
pub enum TexError {
    /// 不支援的格式組合、執行次數不足或非 UTF-8 的原始碼
    #[error("無效的參數：{0}")]
    InvalidArgument(String),

    /// 引擎以非零狀態結束，`log` 為 texput.log 的完整內容
    #[error("{engine} 執行失敗（結束碼：{}）", format_code(.code))]
    EngineFailure {
        engine: String,
        code: Option<i32>,
        log: String,
    },

    #[error("未產生輸出檔案：{file}")]
    NoOutputProduced { file: String },

    #[error("texput.aux 在 {runs} 次執行後仍未穩定")]
    NotStabilized { runs: usize },

    #[error("在 PATH 中找不到引擎：{engine}")]
    EngineNotFound { engine: String },

    #[error("{engine} 執行逾時（{after:?}）")]
    Timeout { engine: String, after: Duration },

    #[error("檔案系統錯誤：{0}")]
    Io(#[from] io::Error),
}

fn format_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string()).unwrap_or_else(|| "無".to_string())
}

impl TexError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        TexError::InvalidArgument(message.into())
    }

    /// 引擎失敗時回傳完整日誌，其他錯誤回傳 None
    pub fn engine_log(&self) -> Option<&str> {
        match self {
            TexError::EngineFailure { log, .. } => Some(log),
            _ => None,
        }
    }
}

impl From<TexError> for io::Error {
    fn from(err: TexError) -> Self {
        match err {
            TexError::Io(e) => e,
            TexError::InvalidArgument(_) => io::Error::new(io::ErrorKind::InvalidInput, err.to_string()),
            TexError::EngineNotFound { .. } => io::Error::new(io::ErrorKind::NotFound, err.to_string()),
            TexError::Timeout { .. } => io::Error::new(io::ErrorKind::TimedOut, err.to_string()),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
