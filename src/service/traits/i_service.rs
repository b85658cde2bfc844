use crate::error::TexError;
use crate::models::engine::{EngineSelection, RunOutcome};
use crate::service::work_dir::WorkDirectory;

// Engine 服務接口，負責執行一次排版引擎
pub trait EngineServiceTrait: Send + Sync {
    /// 在工作目錄中對 texput.tex 執行一次引擎
    /// # 參數
    /// - selection: 要執行的引擎與輸出副檔名
    /// - work_dir: 已寫入原始碼的工作目錄
    /// # 回傳
    /// - 引擎成功時返回 texput.aux 的內容，非零結束時返回結束碼；無法啟動或讀取檔案時返回錯誤
    fn run(&self, selection: &EngineSelection, work_dir: &WorkDirectory) -> Result<RunOutcome, TexError>;
}
