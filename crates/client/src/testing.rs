//! Helpers for tests. Compiled only with the `test-utils` feature.

use std::path::PathBuf;

/// Load a JSON fixture from the crate's `fixtures/` directory.
///
/// # Panics
///
/// Panics when the fixture is missing, which in a test is the right failure
/// mode.
pub fn load_fixture(relative_path: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}
