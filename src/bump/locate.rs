use crate::types::target::Target;
use std::ops::Range;

/// Where a version literal sits inside a metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSite {
    pub span: Range<usize>,
    pub text: String,
}

/// Finds the first version literal for `target` in `content`.
pub fn locate(target: Target, content: &str) -> Option<VersionSite> {
    let caps = target.pattern().captures(content)?;
    let m = caps.get(1)?;
    Some(VersionSite {
        span: m.range(),
        text: m.as_str().to_string(),
    })
}

/// Replaces exactly the located literal, leaving every other byte untouched.
pub fn splice(content: &str, site: &VersionSite, new_version: &str) -> String {
    let mut out = String::with_capacity(content.len() + new_version.len());
    out.push_str(&content[..site.span.start]);
    out.push_str(new_version);
    out.push_str(&content[site.span.end..]);
    out
}
