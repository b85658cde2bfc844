use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::debug;
use tempfile::TempDir;

/// 引擎的固定工作名稱，所有檔案皆為 texput.*
pub const JOB_NAME: &str = "texput";
pub const SOURCE_FILE: &str = "texput.tex";
pub const AUX_FILE: &str = "texput.aux";
pub const LOG_FILE: &str = "texput.log";

const DIR_PREFIX: &str = "tex-temp-";

/// 單次轉換專用的暫存目錄，離開作用域時刪除其中所有檔案與目錄本身
#[derive(Debug)]
pub struct WorkDirectory {
    dir: TempDir,
}

impl WorkDirectory {
    /// 在系統暫存目錄下建立新的工作目錄
    pub fn create() -> io::Result<Self> {
        Self::create_in(&std::env::temp_dir())
    }

    pub fn create_in(base: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(DIR_PREFIX).tempdir_in(base)?;
        debug!("建立工作目錄：{}", dir.path().display());
        Ok(WorkDirectory { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        fs::write(self.file_path(name), contents)
    }

    pub fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.file_path(name))
    }

    /// 刪除目錄並回報錯誤；未呼叫時由 Drop 代為清理
    pub fn close(self) -> io::Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        debug!("已刪除工作目錄：{}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_unique_directories() {
        let base = tempfile::tempdir().unwrap();
        let a = WorkDirectory::create_in(base.path()).unwrap();
        let b = WorkDirectory::create_in(base.path()).unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().is_dir());
        assert!(a.path().file_name().unwrap().to_string_lossy().starts_with("tex-temp-"));
    }

    #[cfg(unix)]
    #[test]
    fn directory_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let base = tempfile::tempdir().unwrap();
        let dir = WorkDirectory::create_in(base.path()).unwrap();
        let mode = fs::metadata(dir.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn drop_removes_files_and_directory() {
        let base = tempfile::tempdir().unwrap();
        let path = {
            let dir = WorkDirectory::create_in(base.path()).unwrap();
            dir.write(SOURCE_FILE, b"\\relax").unwrap();
            dir.write(AUX_FILE, b"\\relax").unwrap();
            fs::create_dir(dir.file_path("nested")).unwrap();
            fs::write(dir.file_path("nested").join("x"), b"x").unwrap();
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn close_removes_directory() {
        let base = tempfile::tempdir().unwrap();
        let dir = WorkDirectory::create_in(base.path()).unwrap();
        dir.write(LOG_FILE, b"log").unwrap();
        let path = dir.path().to_path_buf();
        dir.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let base = tempfile::tempdir().unwrap();
        let dir = WorkDirectory::create_in(base.path()).unwrap();
        let err = dir.read(AUX_FILE).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn missing_base_directory_is_an_error() {
        let base = tempfile::tempdir().unwrap();
        let err = WorkDirectory::create_in(&base.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
