use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use regex::RegexSet;
use walkdir::WalkDir;
use log::warn;

pub fn read_file_content(file_path: &Path) -> io::Result<(Vec<u8>, usize)> {
    let buffer = fs::read(file_path)?;
    let file_size = buffer.len();
    Ok((buffer, file_size))
}

pub fn is_file_valid(path: &Path, include_set: &RegexSet, exclude_set: &RegexSet) -> bool {
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return false,
    };
    include_set.is_match(&file_name) && !exclude_set.is_match(&file_name)
}

/// 收集符合模式的檔案；輸入為單一檔案時直接採用，不套用模式
pub fn collect_files(input_path: &Path, include_set: &RegexSet, exclude_set: &RegexSet) -> io::Result<Vec<PathBuf>> {
    if input_path.is_file() {
        return Ok(vec![input_path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input_path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("無法讀取目錄項目，跳過：{}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_file_valid(entry.path(), include_set, exclude_set) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// 依輸入檔相對於輸入根目錄的位置，計算輸出檔路徑
pub fn output_path_for(file_path: &Path, input_root: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let relative = if input_root.is_file() {
        file_path.file_name().map(PathBuf::from)
    } else {
        pathdiff::diff_paths(file_path, input_root)
    }
    .unwrap_or_else(|| PathBuf::from(file_path.file_name().unwrap_or_default()));
    output_dir.join(relative).with_extension(extension)
}

pub fn write_output_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utils::create_regex_sets;

    #[test]
    fn collects_matching_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("chapters")).unwrap();
        fs::write(dir.path().join("main.tex"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("chapters/one.tex"), "x").unwrap();
        fs::write(dir.path().join("chapters/draft.tex"), "x").unwrap();

        let (include, exclude) = create_regex_sets(&["*.tex".to_string()], &["draft*".to_string()]);
        let files = collect_files(dir.path(), &include, &exclude).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("chapters/one.tex"), PathBuf::from("main.tex")]);
    }

    #[test]
    fn single_file_input_bypasses_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doc.ltx");
        fs::write(&file, "x").unwrap();
        let (include, exclude) = create_regex_sets(&["*.tex".to_string()], &[]);
        assert_eq!(collect_files(&file, &include, &exclude).unwrap(), vec![file]);
    }

    #[test]
    fn output_mirrors_input_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("src");
        fs::create_dir_all(root.join("a")).unwrap();
        let out = output_path_for(&root.join("a/b.tex"), &root, Path::new("out"), "pdf");
        assert_eq!(out, PathBuf::from("out/a/b.pdf"));
    }

    #[test]
    fn output_for_single_file_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paper.tex");
        fs::write(&file, "x").unwrap();
        let out = output_path_for(&file, &file, Path::new("out"), "dvi");
        assert_eq!(out, PathBuf::from("out/paper.dvi"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x/y/z.pdf");
        write_output_file(&path, b"data").unwrap();
        assert_eq!(read_file_content(&path).unwrap(), (b"data".to_vec(), 4));
    }
}
