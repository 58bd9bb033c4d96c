pub fn get_signature(version: &str) -> String {
    format!(
        r#"
   ________
  /  o     |      🔖 Verbump (semantic version bumper for Python packaging metadata)
 /  x.y.z  |
 \         |      Bumps setup.py and __init__.py versions.
  \________|
                  v{}
"#,
        version
    )
}
