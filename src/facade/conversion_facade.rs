use std::path::PathBuf;
use log::{debug, info};
use crate::error::TexError;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOutput, ConversionRequest, EngineOptions};
use crate::models::engine::{EngineSelection, RunOutcome};
use crate::service::engine::EngineService;
use crate::service::traits::i_service::EngineServiceTrait;
use crate::service::work_dir::{WorkDirectory, LOG_FILE, SOURCE_FILE};

pub struct ConversionFacade {
    engine_service: Box<dyn EngineServiceTrait>,
    temp_root: Option<PathBuf>,
}

impl ConversionFacade {
    pub fn new(engine_service: Box<dyn EngineServiceTrait>) -> Self {
        ConversionFacade {
            engine_service,
            temp_root: None,
        }
    }

    /// 使用真實 TeX 引擎的預設組合
    pub fn with_options(options: EngineOptions) -> Self {
        Self::new(Box::new(EngineService::new(options)))
    }

    /// 工作目錄改建立在指定目錄下，而非系統暫存目錄
    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    fn create_work_dir(&self) -> std::io::Result<WorkDirectory> {
        match &self.temp_root {
            Some(root) => WorkDirectory::create_in(root),
            None => WorkDirectory::create(),
        }
    }

    fn run_until_stable(
        &self,
        request: &ConversionRequest,
        work_dir: &WorkDirectory,
    ) -> Result<ConversionOutput, TexError> {
        let selection = request.selection();
        work_dir.write(SOURCE_FILE, request.source().as_bytes())?;

        let mut previous_aux: Option<Vec<u8>> = None;
        for run in 1..=request.max_runs() {
            debug!("第 {}/{} 次執行 {}", run, request.max_runs(), selection.command);
            match self.engine_service.run(selection, work_dir)? {
                RunOutcome::Failed { code } => {
                    let log = work_dir.read(LOG_FILE)?;
                    return Err(TexError::EngineFailure {
                        engine: selection.command.to_string(),
                        code,
                        log: String::from_utf8_lossy(&log).into_owned(),
                    });
                }
                RunOutcome::Succeeded { aux } => {
                    if previous_aux.as_deref() == Some(aux.as_slice()) {
                        info!("texput.aux 在第 {} 次執行後穩定", run);
                        return read_output(selection, work_dir).map(|data| ConversionOutput { data, runs: run });
                    }
                    previous_aux = Some(aux);
                }
            }
        }
        Err(TexError::NotStabilized { runs: request.max_runs() })
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, request: &ConversionRequest) -> Result<ConversionOutput, TexError> {
        let selection = request.selection();
        info!("開始轉換：{} -> {}，使用 {}", selection.input, selection.output, selection.command);

        let work_dir = self.create_work_dir()?;
        let result = self.run_until_stable(request, &work_dir);
        // 轉換失敗時保留原本的錯誤，清理失敗交由 Drop 記錄
        match result {
            Ok(output) => {
                work_dir.close()?;
                Ok(output)
            }
            Err(e) => {
                drop(work_dir);
                Err(e)
            }
        }
    }
}

fn read_output(selection: &EngineSelection, work_dir: &WorkDirectory) -> Result<Vec<u8>, TexError> {
    let file = selection.output_file();
    work_dir.read(&file).map_err(|e| {
        debug!("讀取 {} 失敗：{}", file, e);
        TexError::NoOutputProduced { file }
    })
}
