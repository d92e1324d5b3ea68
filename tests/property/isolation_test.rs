// tests/property/isolation_test.rs

//! Property-based tests for results view isolation
//! Tests that clearing one view never disturbs another, and that a clear always
//! leaves the cleared view with no results.

use crate::test_helpers::TestContext;
use gradebridge::core::gui::{GuiMode, TestResult};
use proptest::prelude::*;

const RESULTS: [&str; 5] = ["pass", "fail", "warn", "error", "running"];

fn results() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..RESULTS.len(), 0..25)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_clear_only_touches_its_view(
        style in results(),
        functional in results(),
        clear_style in any::<bool>(),
    ) {
        let ctx = TestContext::new();
        for (i, r) in style.iter().enumerate() {
            ctx.seed(&format!("s{i}"), RESULTS[*r], true);
        }
        for (i, r) in functional.iter().enumerate() {
            ctx.seed(&format!("f{i}"), RESULTS[*r], false);
        }

        let untouched_mode = GuiMode::from(!clear_style);
        let before: Vec<TestResult> = ctx
            .view(untouched_mode)
            .map(|gui| gui.lock().tests().map(|t| t.result).collect())
            .unwrap_or_default();

        prop_assert_eq!(ctx.reply(&format!("ClearTestResults({clear_style})")), "result:ok");

        let cleared = ctx.view(GuiMode::from(clear_style)).unwrap();
        prop_assert!(cleared.lock().has_no_results());
        let expected_total = if clear_style { style.len() } else { functional.len() };
        prop_assert_eq!(cleared.lock().counts().total, expected_total);

        let after: Vec<TestResult> = ctx
            .view(untouched_mode)
            .map(|gui| gui.lock().tests().map(|t| t.result).collect())
            .unwrap_or_default();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_repeated_clears_match_single_clear(times in 1usize..6, seeded in results()) {
        let ctx = TestContext::new();
        for (i, r) in seeded.iter().enumerate() {
            ctx.seed(&format!("t{i}"), RESULTS[*r], false);
        }
        for _ in 0..times {
            prop_assert_eq!(ctx.reply("ClearTestResults(false)"), "result:ok");
        }
        prop_assert_eq!(
            ctx.reply("getTestCounts(false)"),
            format!("result:0,0,{}", seeded.len())
        );
        let view = ctx.view(GuiMode::Functional).unwrap();
        prop_assert_eq!(view.lock().clear_count(), times as u64);
    }
}
