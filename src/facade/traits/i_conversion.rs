use crate::error::TexError;
use crate::models::conversion::{ConversionRequest, ConversionOutput};

// Facade 接口，負責協調多次引擎執行直到輸出穩定
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行一次完整轉換
    /// # 參數
    /// - request: 原始碼、格式與最大執行次數
    /// # 回傳
    /// - 成功時返回輸出檔內容與實際執行次數，失敗時返回 TexError
    fn execute_conversion(&self, request: &ConversionRequest) -> Result<ConversionOutput, TexError>;
}
