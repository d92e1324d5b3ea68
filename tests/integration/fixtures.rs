// tests/integration/fixtures.rs

//! Common test fixtures
//!
//! Reusable request lines and test names, so scenarios read the same way across
//! test files.

/// Test names used to populate views.
pub const TEST_NAME1: &str = "Vector.get";
pub const TEST_NAME2: &str = "Vector.insert";
pub const TEST_NAME3: &str = "Style.indentation";

pub const CLEAR_STYLE: &str = "ClearTestResults(true)";
pub const CLEAR_FUNCTIONAL: &str = "ClearTestResults(false)";
pub const COUNTS_STYLE: &str = "getTestCounts(true)";
pub const COUNTS_FUNCTIONAL: &str = "getTestCounts(false)";

/// Generates a unique test name with a prefix
pub fn unique_test(prefix: &str, id: usize) -> String {
    format!("{prefix}_{id}")
}

/// Builds a namespaced request line.
#[allow(dead_code)]
pub fn namespaced(line: &str) -> String {
    format!("AutograderUnitTest.{line}")
}
