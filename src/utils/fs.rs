use crate::utils::logger::Logger;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names never descended into while searching for metadata files.
pub const DEFAULT_IGNORED: &[&str] = &[
    ".git",
    ".hg",
    "target",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    ".tox",
    "build",
    "dist",
];

pub fn get_cwd() -> Result<PathBuf, String> {
    std::env::current_dir().map_err(|e| format!("Failed to get current working directory: {}", e))
}

/// Collects every regular file under `root`, skipping directories named in `ignored`.
///
/// Symlinks are never followed. Only an unreadable `root` is an error; unreadable
/// subdirectories are skipped.
pub fn walk_files(root: &Path, ignored: &[String]) -> Result<Vec<PathBuf>, String> {
    let logger = Logger::new();
    let mut stack: Vec<PathBuf> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();
    let mut next = Some(
        fs::read_dir(root)
            .map_err(|e| format!("Failed to read directory {}: {}", root.display(), e))?,
    );
    while let Some(rd) = next.take() {
        for entry in rd.flatten() {
            let p = entry.path();
            let Ok(file_type) = entry.file_type() else {
                logger.debug(&format!("Skipping {}: unknown file type", p.display()));
                continue;
            };
            if file_type.is_symlink() {
                logger.debug(&format!("Skipping symlink {}", p.display()));
            } else if file_type.is_dir() {
                let skip = p
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(|name| is_ignored_component(name, ignored))
                    .unwrap_or(false);
                if skip {
                    continue;
                }
                stack.push(p);
            } else if file_type.is_file() {
                files.push(p);
            }
        }

        while let Some(dir) = stack.pop() {
            match fs::read_dir(&dir) {
                Ok(rd) => {
                    next = Some(rd);
                    break;
                }
                Err(e) => logger.debug(&format!("Skipping {}: {}", dir.display(), e)),
            }
        }
    }
    files.sort();
    Ok(files)
}

pub fn is_ignored_component(name: &str, extra: &[String]) -> bool {
    DEFAULT_IGNORED.contains(&name) || extra.iter().any(|e| e == name)
}

pub fn to_unix_string<P: AsRef<Path>>(p: P) -> String {
    let s = p.as_ref().to_string_lossy().into_owned();
    s.replace('\\', "/")
}

/// Path of the `.bak` copy written next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Writes `content` to `<path>.bak`, replacing any previous backup.
pub fn write_backup(path: &Path, content: &str) -> Result<PathBuf, String> {
    let backup = backup_path(path);
    fs::write(&backup, content)
        .map_err(|e| format!("Failed to write backup {}: {}", backup.display(), e))?;
    Ok(backup)
}
