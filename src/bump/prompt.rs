use crate::{
    bump::{
        discover::{Candidate, discover},
        update::{BumpOutcome, UpdateOptions, update_files},
    },
    types::{target::Target, version::IncrementKind},
    utils::{
        fs::to_unix_string,
        logger::{LogLevel, Logger},
        spinner::with_spinner,
    },
};
use std::path::{Path, PathBuf};

const ALL_FILES: &str = "All files";

/// Which files a bump run should touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Files(Vec<PathBuf>),
    Aborted,
}

/// Resolves the `__init__.py` files to bump, asking the user when several carry a version.
///
/// ### Parameters
/// - `root`: Directory to search.
/// - `ignored`: Extra directory names to skip.
/// - `all`: Skip the prompt and take every discovered file.
///
pub fn select_init_files(root: &Path, ignored: &[String], all: bool) -> Result<Selection, String> {
    let spinner = with_spinner("Searching for __init__.py files with version information...");
    let candidates = discover(root, Target::Init, ignored);
    spinner.finish_and_clear();
    let candidates = candidates?;

    match candidates.len() {
        0 => Err("No __init__.py files with version information found.".to_string()),
        1 => Ok(Selection::Files(vec![candidates[0].path.clone()])),
        _ if all => Ok(Selection::Files(
            candidates.into_iter().map(|c| c.path).collect(),
        )),
        _ => prompt_selection(root, candidates),
    }
}

fn prompt_selection(root: &Path, candidates: Vec<Candidate>) -> Result<Selection, String> {
    let logger = Logger::new();
    let labels: Vec<String> = candidates
        .iter()
        .map(|c| candidate_label(root, c))
        .collect();
    logger.log_message_with_trace(
        LogLevel::Info,
        "Multiple __init__.py files with version information found:",
        labels.iter().map(|s| s.as_str()).collect(),
    );

    let mut options = labels.clone();
    options.push(ALL_FILES.to_string());

    let choice = match inquire::Select::new("Select the file to update:", options).prompt() {
        Ok(choice) => choice,
        Err(
            inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted,
        ) => return Ok(Selection::Aborted),
        Err(e) => return Err(format!("Failed to prompt for file selection: {}", e)),
    };

    if choice == ALL_FILES {
        return Ok(Selection::Files(
            candidates.into_iter().map(|c| c.path).collect(),
        ));
    }

    labels
        .iter()
        .position(|l| *l == choice)
        .map(|idx| Selection::Files(vec![candidates[idx].path.clone()]))
        .ok_or_else(|| "Invalid selection.".to_string())
}

fn candidate_label(root: &Path, candidate: &Candidate) -> String {
    let shown = candidate
        .path
        .strip_prefix(root)
        .map(to_unix_string)
        .unwrap_or_else(|_| to_unix_string(&candidate.path));
    format!("{} (version: {})", shown, candidate.version)
}

/// Bumps every selected file and reports each result. Returns the number of failures.
pub fn run_and_report(
    paths: &[PathBuf],
    target: Target,
    kind: &IncrementKind,
    options: UpdateOptions,
) -> usize {
    let logger = Logger::new();
    let mut updated: Vec<BumpOutcome> = Vec::new();
    let mut failures = 0;

    for (_, result) in update_files(paths, target, kind, options) {
        match result {
            Ok(outcome) => {
                let prefix = if options.dry_run { "[dry run] " } else { "" };
                logger.log_message(
                    LogLevel::Success,
                    &format!("✅ {}{}", prefix, outcome.describe()),
                );
                if let Some(backup) = &outcome.backup {
                    logger.debug(&format!("Backup written to {}", backup.display()));
                }
                updated.push(outcome);
            }
            Err(e) => {
                logger.log_message(LogLevel::Error, &format!("❌ {}", e));
                failures += 1;
            }
        }
    }

    if updated.len() > 1 {
        print_summary(&updated);
    }

    failures
}

fn print_summary(updated: &[BumpOutcome]) {
    let lines: Vec<String> = updated
        .iter()
        .map(|o| format!("{}: {}", to_unix_string(&o.path), o.next))
        .collect();
    Logger::new().log_message_with_trace(
        LogLevel::Info,
        "Summary of updates:",
        lines.iter().map(|s| s.as_str()).collect(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn label_is_relative_to_the_search_root() {
        let candidate = Candidate {
            path: PathBuf::from("/work/src/pkg/__init__.py"),
            version: "1.2.3".into(),
        };
        assert_eq!(
            candidate_label(Path::new("/work"), &candidate),
            "src/pkg/__init__.py (version: 1.2.3)"
        );
    }

    #[test]
    fn single_candidate_needs_no_prompt() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("pkg")).expect("mkdir");
        fs::write(dir.path().join("pkg/__init__.py"), "__version__ = \"0.3.0\"\n").expect("write");

        let selection = select_init_files(dir.path(), &[], false).expect("select");
        assert_eq!(
            selection,
            Selection::Files(vec![dir.path().join("pkg/__init__.py")])
        );
    }

    #[test]
    fn all_flag_takes_every_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        for pkg in ["a", "b"] {
            fs::create_dir_all(dir.path().join(pkg)).expect("mkdir");
            fs::write(dir.path().join(pkg).join("__init__.py"), "__version__ = \"1.0.0\"\n")
                .expect("write");
        }
        match select_init_files(dir.path(), &[], true).expect("select") {
            Selection::Files(files) => assert_eq!(files.len(), 2),
            other => panic!("unexpected selection {:?}", other),
        }
    }

    #[test]
    fn nothing_found_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = select_init_files(dir.path(), &[], true).expect_err("empty tree");
        assert!(err.contains("No __init__.py files"));
    }

    #[test]
    fn report_counts_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ok = dir.path().join("ok.py");
        let broken = dir.path().join("broken.py");
        fs::write(&ok, "__version__ = \"1.0.0\"\n").expect("write");
        fs::write(&broken, "__version__ = \"1.0\"\n").expect("write");

        let failures = run_and_report(
            &[ok.clone(), broken],
            Target::Init,
            &IncrementKind::Patch,
            UpdateOptions::default(),
        );
        assert_eq!(failures, 1);
        assert_eq!(
            fs::read_to_string(ok).expect("read"),
            "__version__ = \"1.0.1\"\n"
        );
    }
}
