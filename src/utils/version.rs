pub const VERSION_ENV: &str = "VERBUMP_CLI_VERSION";

/// Returns the tool version with a runtime-first strategy:
/// 1. VERBUMP_CLI_VERSION env var
/// 2. project-version.json located next to the running binary
/// 3. compile-time CARGO_PKG_VERSION
pub fn get_version() -> String {
    if let Ok(v) = std::env::var(VERSION_ENV) {
        if !v.trim().is_empty() {
            return v;
        }
    }

    if let Some(v) = version_next_to_binary() {
        return v;
    }

    env!("CARGO_PKG_VERSION").to_string()
}

fn version_next_to_binary() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let manifest = exe.parent()?.join("project-version.json");
    let contents = std::fs::read_to_string(manifest).ok()?;
    version_from_manifest(&contents)
}

fn version_from_manifest(contents: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(contents).ok()?;
    parsed
        .get("version")
        .and_then(|s| s.as_str())
        .map(|s| s.to_string())
}
