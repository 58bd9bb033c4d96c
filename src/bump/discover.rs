use crate::{
    bump::locate::locate,
    types::target::Target,
    utils::{fs::walk_files, logger::Logger},
};
use std::fs;
use std::path::{Path, PathBuf};

/// A metadata file that carries a version literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub version: String,
}

/// Finds every file named like `target` under `root` that holds a version.
///
/// ### Parameters
/// - `root`: Directory to search recursively.
/// - `target`: Determines the file name and the version locator.
/// - `ignored`: Extra directory names to skip on top of the defaults.
///
pub fn discover(root: &Path, target: Target, ignored: &[String]) -> Result<Vec<Candidate>, String> {
    let logger = Logger::new();
    let mut found = Vec::new();

    for file in walk_files(root, ignored)? {
        let matches_name = file
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| name == target.file_name())
            .unwrap_or(false);
        if !matches_name {
            continue;
        }

        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) => {
                logger.debug(&format!("Skipping {}: {}", file.display(), e));
                continue;
            }
        };

        // Empty literals are still "no version information" when searching.
        match locate(target, &content) {
            Some(site) if !site.text.trim().is_empty() => found.push(Candidate {
                path: file,
                version: site.text,
            }),
            _ => logger.debug(&format!("No version in {}", file.display())),
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_versioned_init_files_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        for sub in ["src/alpha", "src/beta", "src/alpha/sub", "node_modules/x"] {
            fs::create_dir_all(root.join(sub)).expect("mkdir");
        }
        fs::write(root.join("src/alpha/__init__.py"), "__version__ = \"0.1.0\"\n").expect("write");
        fs::write(root.join("src/beta/__init__.py"), "__version__ = '2.0.0'\n").expect("write");
        fs::write(root.join("src/alpha/sub/__init__.py"), "from . import x\n").expect("write");
        fs::write(root.join("node_modules/x/__init__.py"), "__version__ = \"9.9.9\"\n")
            .expect("write");
        fs::write(root.join("src/alpha/version.py"), "__version__ = \"3.0.0\"\n").expect("write");

        let found = discover(root, Target::Init, &[]).expect("discover");
        let versions: Vec<&str> = found.iter().map(|c| c.version.as_str()).collect();
        assert_eq!(versions, vec!["0.1.0", "2.0.0"]);
        assert!(found[0].path.ends_with("src/alpha/__init__.py"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_package_is_found_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("pkg")).expect("mkdir");
        fs::write(root.join("pkg/__init__.py"), "__version__ = \"1.0.0\"\n").expect("write");
        std::os::unix::fs::symlink(root.join("pkg"), root.join("pkg_link")).expect("symlink");
        std::os::unix::fs::symlink(root, root.join("loop")).expect("symlink");

        let found = discover(root, Target::Init, &[]).expect("discover");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, root.join("pkg/__init__.py"));
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(discover(dir.path(), Target::Init, &[]).expect("discover").is_empty());
    }
}
