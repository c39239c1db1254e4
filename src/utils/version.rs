/// Version shown in `--version` and the title bar.
///
/// Prefers the `git describe` string embedded by `build.rs`; builds from a
/// source tarball fall back to the crate version.
pub fn build_version() -> &'static str {
    match option_env!("VERGEN_GIT_DESCRIBE") {
        Some(describe) if !describe.is_empty() && describe != "unknown" => describe,
        _ => env!("CARGO_PKG_VERSION"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_never_empty() {
        assert!(!build_version().is_empty());
        assert_ne!(build_version(), "unknown");
    }
}
