// src/core/commands/autograder/mod.rs

//! Commands of the `AutograderUnitTest` family. Every command addresses one of the
//! session's two results views through its trailing `isStyleCheck` flag.

pub mod clear_test_results;
pub mod get_test_counts;
pub mod set_test_details;
pub mod set_test_result;
pub mod set_test_runtime;
pub mod set_testing_completed;
pub mod set_visible;

pub use add_test::AddTest;
pub use clear_test_results::ClearTestResults;
pub use get_test_counts::GetTestCounts;
pub use set_test_details::SetTestDetails;
pub use set_test_result::SetTestResult;
pub use set_test_runtime::SetTestRuntime;
pub use set_testing_completed::SetTestingCompleted;
pub use set_visible::SetVisible;
