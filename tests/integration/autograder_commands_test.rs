// tests/integration/autograder_commands_test.rs

//! Integration tests for the autograder commands
//! Tests: clearTestResults, addTest, setTestResult, getTestCounts, etc.

use super::fixtures::*;
use super::test_helpers::TestContext;
use gradebridge::core::gui::{GuiMode, TestResult};

// ===== clearTestResults =====

#[test]
fn test_clear_style_check_view() {
    let ctx = TestContext::new();
    ctx.seed(TEST_NAME1, "pass", true);
    ctx.seed(TEST_NAME2, "fail", true);

    assert_eq!(ctx.reply(COUNTS_STYLE), "result:1,1,2");
    assert_eq!(ctx.reply(CLEAR_STYLE), "result:ok");
    assert_eq!(ctx.reply(COUNTS_STYLE), "result:0,0,2");

    let view = ctx.view(GuiMode::StyleCheck).unwrap();
    assert!(view.lock().has_no_results());
    assert_eq!(view.lock().clear_count(), 1);
}

#[test]
fn test_clear_functional_view_leaves_style_view() {
    let ctx = TestContext::new();
    ctx.seed(TEST_NAME1, "pass", false);
    ctx.seed(TEST_NAME3, "warn", true);

    assert_eq!(ctx.reply(CLEAR_FUNCTIONAL), "result:ok");

    let style = ctx.view(GuiMode::StyleCheck).unwrap();
    assert_eq!(style.lock().test(TEST_NAME3).unwrap().result, TestResult::Warn);
    assert_eq!(style.lock().clear_count(), 0);
    assert_eq!(ctx.reply(COUNTS_FUNCTIONAL), "result:0,0,1");
}

#[test]
fn test_clear_drops_details_runtime_and_completion() {
    let ctx = TestContext::new();
    ctx.seed(TEST_NAME1, "error", false);
    let replies = ctx.replies(&[
        "setTestDetails(\"Vector.get\", \"expected 3, got 4\", false)",
        "setTestRuntime(\"Vector.get\", 17, false)",
        "setTestingCompleted(true, false)",
        CLEAR_FUNCTIONAL,
    ]);
    assert!(replies.iter().all(|r| r == "result:ok"), "{replies:?}");

    let view = ctx.view(GuiMode::Functional).unwrap();
    let gui = view.lock();
    let entry = gui.test(TEST_NAME1).unwrap();
    assert_eq!(entry.result, TestResult::None);
    assert_eq!(entry.category, "seed");
    assert!(entry.details.is_none());
    assert!(entry.runtime_ms.is_none());
    assert!(!gui.testing_completed());
}

#[test]
fn test_clear_on_fresh_session_creates_empty_view() {
    let ctx = TestContext::new();
    assert!(ctx.view(GuiMode::StyleCheck).is_none());

    assert_eq!(ctx.reply(&namespaced(CLEAR_STYLE)), "result:ok");

    let view = ctx.view(GuiMode::StyleCheck).unwrap();
    assert_eq!(view.lock().tests().count(), 0);
    assert!(ctx.view(GuiMode::Functional).is_none());
}

#[test]
fn test_clear_parse_errors_leave_views_untouched() {
    let ctx = TestContext::new();
    ctx.seed(TEST_NAME1, "pass", true);

    for line in [
        "ClearTestResults true)",
        "ClearTestResults(maybe)",
        "ClearTestResults(true",
        "ClearTestResults()",
        "ClearTestResults(\"true\")",
        "ClearTestResults(true) false",
    ] {
        let reply = ctx.reply(line);
        assert!(reply.starts_with("error:"), "{line} -> {reply}");
    }

    let view = ctx.view(GuiMode::StyleCheck).unwrap();
    assert_eq!(view.lock().clear_count(), 0);
    assert_eq!(view.lock().counts().passed, 1);
    assert!(ctx.view(GuiMode::Functional).is_none());
}

#[test]
fn test_clear_is_idempotent() {
    let ctx = TestContext::new();
    ctx.seed(TEST_NAME1, "pass", true);

    assert_eq!(ctx.reply(CLEAR_STYLE), "result:ok");
    assert_eq!(ctx.reply(CLEAR_STYLE), "result:ok");
    assert_eq!(ctx.reply(COUNTS_STYLE), "result:0,0,1");
    assert_eq!(ctx.view(GuiMode::StyleCheck).unwrap().lock().clear_count(), 2);
}

#[test]
fn test_clear_is_scoped_to_session() {
    let ctx = TestContext::new();
    let other = ctx.other_session();
    ctx.seed(TEST_NAME1, "pass", true);
    other.gui(GuiMode::StyleCheck).lock().add_test(TEST_NAME1, "x").unwrap();
    other
        .gui(GuiMode::StyleCheck)
        .lock()
        .set_test_result(TEST_NAME1, TestResult::Fail)
        .unwrap();

    assert_eq!(ctx.reply(CLEAR_STYLE), "result:ok");

    let theirs = other.existing_gui(GuiMode::StyleCheck).unwrap();
    assert_eq!(theirs.lock().test(TEST_NAME1).unwrap().result, TestResult::Fail);
}

// ===== Populating views =====

#[test]
fn test_add_and_report_many_tests() {
    let ctx = TestContext::new();
    for i in 0..20 {
        let name = unique_test("case", i);
        let result = if i % 4 == 0 { "fail" } else { "pass" };
        ctx.seed(&name, result, false);
    }
    assert_eq!(ctx.reply(COUNTS_FUNCTIONAL), "result:15,5,20");
}

#[test]
fn test_set_result_for_unknown_test() {
    let ctx = TestContext::new();
    let reply = ctx.reply("setTestResult(\"missing\", pass, false)");
    assert_eq!(reply, "error:no test named 'missing' in this view");
}

#[test]
fn test_unknown_command_reply() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.reply("AutograderUnitTest.explode(true)"),
        "error:unknown command 'AutograderUnitTest.explode'"
    );
}

#[test]
fn test_view_limit_from_config() {
    let mut config = gradebridge::config::Config::default();
    config.autograder.max_tests_per_view = 1;
    let ctx = TestContext::with_config(config);

    ctx.seed(TEST_NAME1, "pass", false);
    let reply = ctx.reply(&format!("addTest(\"{TEST_NAME2}\", \"c\", false)"));
    assert!(reply.starts_with("error:limit exceeded"), "{reply}");
    // The other mode has its own allowance.
    ctx.seed(TEST_NAME2, "pass", true);
}

#[test]
fn test_visibility_and_completion_flags() {
    let ctx = TestContext::new();
    assert_eq!(ctx.reply("setVisible(false, true)"), "result:ok");
    assert_eq!(ctx.reply("setTestingCompleted(1, true)"), "result:ok");

    let view = ctx.view(GuiMode::StyleCheck).unwrap();
    assert!(!view.lock().is_visible());
    assert!(view.lock().testing_completed());
}
