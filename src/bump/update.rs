use crate::{
    bump::locate::{locate, splice},
    types::{target::Target, version::IncrementKind},
    utils::{fs::write_backup, logger::Logger, semver},
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    pub backup: bool,
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions {
            backup: true,
            dry_run: false,
        }
    }
}

/// Result of bumping a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub path: PathBuf,
    /// Version literal found in the file; empty when none was recorded yet.
    pub previous: String,
    pub next: String,
    pub backup: Option<PathBuf>,
}

impl BumpOutcome {
    pub fn describe(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        let previous = if self.previous.is_empty() {
            "(none)"
        } else {
            self.previous.as_str()
        };
        format!("Version in {} updated from {} to {}", name, previous, self.next)
    }
}

/// Bumps the version recorded in `path`.
///
/// ### Parameters
/// - `path`: The metadata file to rewrite.
/// - `target`: Which locator to use for the file.
/// - `kind`: The increment to apply.
/// - `options`: Backup and dry-run switches.
///
pub fn update_file(
    path: &Path,
    target: Target,
    kind: &IncrementKind,
    options: UpdateOptions,
) -> Result<BumpOutcome, String> {
    let logger = Logger::new();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let site = locate(target, &content)
        .ok_or_else(|| format!("Could not find version in {}", path.display()))?;
    logger.debug(&format!(
        "{}: found '{}' at bytes {}..{}",
        path.display(),
        site.text,
        site.span.start,
        site.span.end
    ));

    let next = semver::next_version(&site.text, kind)
        .map_err(|e| format!("{} in {}", e, path.display()))?;

    let mut outcome = BumpOutcome {
        path: path.to_path_buf(),
        previous: site.text.clone(),
        next,
        backup: None,
    };

    if options.dry_run {
        logger.debug(&format!("{}: dry run, nothing written", path.display()));
        return Ok(outcome);
    }

    if options.backup {
        outcome.backup = Some(write_backup(path, &content)?);
    }

    let updated = splice(&content, &site, &outcome.next);
    fs::write(path, updated).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    Ok(outcome)
}

/// Bumps each file independently; a failure in one does not stop the others.
pub fn update_files(
    paths: &[PathBuf],
    target: Target,
    kind: &IncrementKind,
    options: UpdateOptions,
) -> Vec<(PathBuf, Result<BumpOutcome, String>)> {
    paths
        .iter()
        .map(|p| (p.clone(), update_file(p, target, kind, options)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).expect("write fixture");
        p
    }

    #[test]
    fn bumps_and_backs_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = "setup(\n    name=\"pkg\",\n    version=\"0.1.29\",\n)\n";
        let path = write(dir.path(), "setup.py", original);

        let outcome = update_file(
            &path,
            Target::Setup,
            &IncrementKind::Patch,
            UpdateOptions::default(),
        )
        .expect("update");

        assert_eq!(outcome.previous, "0.1.29");
        assert_eq!(outcome.next, "0.1.30");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            original.replace("0.1.29", "0.1.30")
        );
        assert_eq!(
            outcome.describe(),
            "Version in setup.py updated from 0.1.29 to 0.1.30"
        );
        let backup = outcome.backup.clone().expect("backup written");
        assert_eq!(fs::read_to_string(backup).expect("read backup"), original);
    }

    #[test]
    fn no_backup_and_dry_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "__init__.py", "__version__ = \"1.0.0\"\n");

        let dry = update_file(
            &path,
            Target::Init,
            &IncrementKind::Major,
            UpdateOptions {
                backup: true,
                dry_run: true,
            },
        )
        .expect("dry run");
        assert_eq!(dry.next, "2.0.0");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "__version__ = \"1.0.0\"\n"
        );
        assert!(!dir.path().join("__init__.py.bak").exists());

        update_file(
            &path,
            Target::Init,
            &IncrementKind::Minor,
            UpdateOptions {
                backup: false,
                dry_run: false,
            },
        )
        .expect("update");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "__version__ = \"1.1.0\"\n"
        );
        assert!(!dir.path().join("__init__.py.bak").exists());
    }

    #[test]
    fn empty_literal_bootstraps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "__init__.py", "__version__ = ''\n");
        let outcome = update_file(
            &path,
            Target::Init,
            &IncrementKind::Major,
            UpdateOptions::default(),
        )
        .expect("update");
        assert_eq!(outcome.next, "0.1.0");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "__version__ = '0.1.0'\n"
        );
    }

    #[test]
    fn invalid_version_leaves_file_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "setup.py", "setup(version=\"v1.2\")\n");
        let err = update_file(
            &path,
            Target::Setup,
            &IncrementKind::Patch,
            UpdateOptions::default(),
        )
        .expect_err("invalid version");
        assert!(err.contains("Invalid version format: v1.2"));
        assert_eq!(err.matches(&path.display().to_string()).count(), 1);
        assert!(!dir.path().join("setup.py.bak").exists());
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bad = write(dir.path(), "a.py", "print('no version here')\n");
        let good = write(dir.path(), "b.py", "__version__ = \"0.1.8\"\n");

        let results = update_files(
            &[bad, good.clone()],
            Target::Init,
            &IncrementKind::prerelease(),
            UpdateOptions::default(),
        );
        assert!(results[0].1.is_err());
        assert_eq!(
            results[1].1.as_ref().map(|o| o.next.clone()),
            Ok("0.1.8-alpha.1".to_string())
        );
        assert_eq!(
            fs::read_to_string(good).expect("read"),
            "__version__ = \"0.1.8-alpha.1\"\n"
        );
    }
}
