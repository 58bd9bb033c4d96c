use crate::types::{
    error::BumpError,
    version::{IncrementKind, Version},
};

/// Version a bump starts from when no version has been recorded yet.
pub const BOOTSTRAP_VERSION: (u64, u64, u64) = (0, 1, 0);

/// Parses `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
///
/// ### Parameters
/// - `text`: The version literal, without any `v` prefix or surrounding whitespace.
///
pub fn parse(text: &str) -> Result<Version, BumpError> {
    let invalid = || BumpError::InvalidFormat(text.to_string());

    // The core carries neither '+' nor '-', so the first of each is a separator.
    let (rest, build) = match text.split_once('+') {
        Some((rest, build)) => (rest, Some(qualifier(build).ok_or_else(invalid)?)),
        None => (text, None),
    };
    let (core, prerelease) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(qualifier(pre).ok_or_else(invalid)?)),
        None => (rest, None),
    };

    let mut numbers = core.split('.').map(numeric);
    let (Some(Some(major)), Some(Some(minor)), Some(Some(patch)), None) = (
        numbers.next(),
        numbers.next(),
        numbers.next(),
        numbers.next(),
    ) else {
        return Err(invalid());
    };

    Ok(Version {
        major,
        minor,
        patch,
        prerelease,
        build,
    })
}

fn numeric(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok()
}

fn qualifier(part: &str) -> Option<String> {
    let valid = !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    valid.then(|| part.to_string())
}

/// Produces the successor of `current` for the requested `kind`.
///
/// A missing version always yields `0.1.0`. Build metadata is carried through
/// unchanged on every path.
pub fn increment(current: Option<&Version>, kind: &IncrementKind) -> Version {
    let Some(current) = current else {
        let (major, minor, patch) = BOOTSTRAP_VERSION;
        return Version::new(major, minor, patch);
    };

    let build = current.build.clone();
    match kind {
        IncrementKind::Major => Version {
            major: current.major.saturating_add(1),
            minor: 0,
            patch: 0,
            prerelease: None,
            build,
        },
        IncrementKind::Minor => Version {
            major: current.major,
            minor: current.minor.saturating_add(1),
            patch: 0,
            prerelease: None,
            build,
        },
        IncrementKind::Patch => Version {
            major: current.major,
            minor: current.minor,
            patch: current.patch.saturating_add(1),
            prerelease: None,
            build,
        },
        IncrementKind::Prerelease(label) => {
            let prerelease = match &current.prerelease {
                Some(existing) => continue_prerelease(existing),
                None => format!("{}.1", label),
            };
            Version {
                major: current.major,
                minor: current.minor,
                patch: current.patch,
                prerelease: Some(prerelease),
                build,
            }
        }
    }
}

/// `alpha.3` -> `alpha.4`, `beta` -> `beta.1`.
///
/// A prerelease that is only a number is itself the counter: `7` -> `8`, not
/// `7.1` as the older Python bump scripts produced.
fn continue_prerelease(existing: &str) -> String {
    match existing.rsplit_once('.') {
        Some((head, last)) => match bump_counter(last) {
            Some(next) => format!("{}.{}", head, next),
            None => format!("{}.1", existing),
        },
        None => bump_counter(existing).unwrap_or_else(|| format!("{}.1", existing)),
    }
}

/// Adds one to a decimal digit run of any length. Leading zeros are dropped.
fn bump_counter(segment: &str) -> Option<String> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = segment.trim_start_matches('0');
    let mut digits: Vec<u8> = if trimmed.is_empty() {
        vec![b'0']
    } else {
        trimmed.bytes().collect()
    };

    let mut i = digits.len();
    loop {
        if i == 0 {
            digits.insert(0, b'1');
            break;
        }
        i -= 1;
        if digits[i] == b'9' {
            digits[i] = b'0';
        } else {
            digits[i] += 1;
            break;
        }
    }

    String::from_utf8(digits).ok()
}

/// Computes the next version string from a literal found in a file.
///
/// ### Parameters
/// - `current`: The version literal. Empty means no version yet.
/// - `kind`: The increment to apply.
///
pub fn next_version(current: &str, kind: &IncrementKind) -> Result<String, BumpError> {
    let current = current.trim();
    let parsed = if current.is_empty() {
        None
    } else {
        Some(parse(current)?)
    };

    Ok(increment(parsed.as_ref(), kind).to_string())
}
