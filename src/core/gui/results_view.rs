// src/core/gui/results_view.rs

//! The state model behind one autograder results window.

use super::mode::GuiMode;
use crate::core::BridgeError;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::debug;

/// The outcome displayed next to a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TestResult {
    Pass,
    Fail,
    Warn,
    Error,
    Running,
    #[default]
    None,
}

impl TestResult {
    /// Parses a result name as sent by the front-end.
    pub fn parse(s: &str) -> Result<Self, BridgeError> {
        TestResult::from_str(s).map_err(|_| BridgeError::InvalidTestResult(s.to_string()))
    }
}

/// A single row in the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEntry {
    pub name: String,
    pub category: String,
    pub result: TestResult,
    pub details: Option<String>,
    pub runtime_ms: Option<u64>,
}

impl TestEntry {
    fn new(name: String, category: String) -> Self {
        Self {
            name,
            category,
            result: TestResult::None,
            details: None,
            runtime_ms: None,
        }
    }

    /// Drops everything recorded by a test run, keeping the row itself.
    fn reset(&mut self) {
        self.result = TestResult::None;
        self.details = None;
        self.runtime_ms = None;
    }
}

/// Aggregated pass/fail figures for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestCounts {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for TestCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.passed, self.failed, self.total)
    }
}

/// The results view for one `(session, mode)` pair.
#[derive(Debug)]
pub struct AutograderGui {
    mode: GuiMode,
    tests: IndexMap<String, TestEntry>,
    testing_completed: bool,
    visible: bool,
    clear_count: u64,
    max_tests: usize,
}

impl AutograderGui {
    /// Creates an empty view. A `max_tests` of `0` disables the limit.
    pub fn new(mode: GuiMode, max_tests: usize) -> Self {
        Self {
            mode,
            tests: IndexMap::new(),
            testing_completed: false,
            visible: true,
            clear_count: 0,
            max_tests,
        }
    }

    pub fn mode(&self) -> GuiMode {
        self.mode
    }

    /// Adds a test row. Re-adding an existing name keeps its position, updates its
    /// category and resets its result.
    pub fn add_test(&mut self, name: &str, category: &str) -> Result<(), BridgeError> {
        if let Some(entry) = self.tests.get_mut(name) {
            entry.category = category.to_string();
            entry.reset();
            return Ok(());
        }
        if self.max_tests > 0 && self.tests.len() >= self.max_tests {
            return Err(BridgeError::LimitExceeded(format!(
                "view already holds {} tests",
                self.max_tests
            )));
        }
        self.tests.insert(
            name.to_string(),
            TestEntry::new(name.to_string(), category.to_string()),
        );
        Ok(())
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut TestEntry, BridgeError> {
        self.tests
            .get_mut(name)
            .ok_or_else(|| BridgeError::UnknownTest(name.to_string()))
    }

    pub fn set_test_result(&mut self, name: &str, result: TestResult) -> Result<(), BridgeError> {
        self.entry_mut(name)?.result = result;
        Ok(())
    }

    pub fn set_test_details(&mut self, name: &str, details: &str) -> Result<(), BridgeError> {
        self.entry_mut(name)?.details = Some(details.to_string());
        Ok(())
    }

    pub fn set_test_runtime(&mut self, name: &str, runtime_ms: u64) -> Result<(), BridgeError> {
        self.entry_mut(name)?.runtime_ms = Some(runtime_ms);
        Ok(())
    }

    /// Resets every recorded result while keeping the list of tests.
    ///
    /// Clearing an already-cleared view leaves the same observable state; only
    /// `clear_count` moves.
    pub fn clear_test_results(&mut self) {
        for entry in self.tests.values_mut() {
            entry.reset();
        }
        self.testing_completed = false;
        self.clear_count += 1;
        debug!(
            mode = %self.mode,
            tests = self.tests.len(),
            "Cleared autograder test results"
        );
    }

    pub fn set_testing_completed(&mut self, completed: bool) {
        self.testing_completed = completed;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn testing_completed(&self) -> bool {
        self.testing_completed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many times the clear operation has run on this view.
    pub fn clear_count(&self) -> u64 {
        self.clear_count
    }

    pub fn test(&self, name: &str) -> Option<&TestEntry> {
        self.tests.get(name)
    }

    /// Iterates over the tests in insertion order.
    pub fn tests(&self) -> impl Iterator<Item = &TestEntry> {
        self.tests.values()
    }

    /// True if no test carries a recorded outcome.
    pub fn has_no_results(&self) -> bool {
        self.tests
            .values()
            .all(|t| t.result == TestResult::None && t.details.is_none() && t.runtime_ms.is_none())
    }

    pub fn counts(&self) -> TestCounts {
        let mut counts = TestCounts {
            total: self.tests.len(),
            ..Default::default()
        };
        for entry in self.tests.values() {
            match entry.result {
                TestResult::Pass => counts.passed += 1,
                TestResult::Fail | TestResult::Error => counts.failed += 1,
                _ => {}
            }
        }
        counts
    }
}
