use regex::Regex;
use std::sync::OnceLock;

static SETUP_PATTERN: OnceLock<Regex> = OnceLock::new();
static INIT_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Packaging metadata files a version can be bumped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `version="x.y.z"` keyword inside `setup.py`
    Setup,
    /// `__version__ = "x.y.z"` inside a package `__init__.py`
    Init,
}

impl Target {
    pub fn file_name(&self) -> &'static str {
        match self {
            Target::Setup => "setup.py",
            Target::Init => "__init__.py",
        }
    }

    /// Pattern whose first capture group is the version literal.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            Target::Setup => SETUP_PATTERN.get_or_init(|| {
                Regex::new(r#"\bversion\s*=\s*["']([^"'\n]*)["']"#)
                    .expect("setup.py version regex must compile")
            }),
            Target::Init => INIT_PATTERN.get_or_init(|| {
                Regex::new(r#"__version__\s*=\s*["']([^"'\n]*)["']"#)
                    .expect("__init__.py version regex must compile")
            }),
        }
    }
}
