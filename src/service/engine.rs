use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use log::{debug, warn};
use crate::error::TexError;
use crate::models::conversion::EngineOptions;
use crate::models::engine::{EngineSelection, RunOutcome};
use crate::service::traits::i_service::EngineServiceTrait;
use crate::service::work_dir::{WorkDirectory, AUX_FILE, SOURCE_FILE};

/// 非互動、遇錯即停、禁止 shell escape
pub const ENGINE_ARGS: [&str; 3] = ["-interaction=batchmode", "-halt-on-error", "-no-shell-escape"];

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// 以子行程執行外部 TeX 引擎
pub struct EngineService {
    options: EngineOptions,
    programs: Mutex<HashMap<String, PathBuf>>,
}

impl EngineService {
    pub fn new(options: EngineOptions) -> Self {
        EngineService {
            options,
            programs: Mutex::new(HashMap::new()),
        }
    }

    /// 以指定的執行檔取代 PATH 中的引擎
    pub fn with_program(self, command: &str, program: impl Into<PathBuf>) -> Self {
        self.programs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(command.to_string(), program.into());
        self
    }

    /// 子行程的環境變數會被清空，因此先以目前的 PATH 解析出絕對路徑，每個引擎只解析一次
    fn resolve_command(&self, command: &str) -> Result<PathBuf, TexError> {
        let mut programs = self.programs.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(program) = programs.get(command) {
            return Ok(program.clone());
        }
        let program = which::which(command).map_err(|_| TexError::EngineNotFound {
            engine: command.to_string(),
        })?;
        debug!("{} 解析為 {}", command, program.display());
        programs.insert(command.to_string(), program.clone());
        Ok(program)
    }

    fn wait(&self, mut child: Child, engine: &str) -> Result<ExitStatus, TexError> {
        let Some(timeout) = self.options.timeout else {
            return Ok(child.wait()?);
        };
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() >= timeout {
                warn!("{} 超過 {:?} 未結束，終止行程", engine, timeout);
                if let Err(e) = child.kill() {
                    warn!("終止 {} 失敗：{}", engine, e);
                }
                if let Err(e) = child.wait() {
                    warn!("回收 {} 行程失敗：{}", engine, e);
                }
                return Err(TexError::Timeout {
                    engine: engine.to_string(),
                    after: timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Default for EngineService {
    fn default() -> Self {
        EngineService::new(EngineOptions::default())
    }
}

impl EngineServiceTrait for EngineService {
    fn run(&self, selection: &EngineSelection, work_dir: &WorkDirectory) -> Result<RunOutcome, TexError> {
        let program = self.resolve_command(selection.command)?;
        let source = work_dir.file_path(SOURCE_FILE);
        debug!("執行 {} {:?} {}", program.display(), ENGINE_ARGS, source.display());

        let child = Command::new(&program)
            .args(ENGINE_ARGS)
            .arg(&source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir(work_dir.path())
            .env_clear()
            .spawn()?;
        let status = self.wait(child, selection.command)?;

        if !status.success() {
            debug!("{} 結束狀態：{}", selection.command, status);
            return Ok(RunOutcome::Failed { code: status.code() });
        }
        let aux = work_dir.read(AUX_FILE)?;
        Ok(RunOutcome::Succeeded { aux })
    }
}
