//! Behavioural coverage for the shared visit history.

use std::{sync::Arc, thread};

use restroom_core::{InMemoryVisitHistory, VisitHistory};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Shared history for a scenario run.
pub struct TestContext {
    history: Arc<InMemoryVisitHistory>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        history: Arc::new(InMemoryVisitHistory::new()),
    }
}

#[given("an empty visit history")]
fn empty_history(context: &TestContext) {
    assert!(context.history.is_empty());
}

#[when("the site \"north\" is visited twice")]
fn north_twice(context: &TestContext) {
    context.history.record_visit("north");
    context.history.record_visit("north");
}

#[when("the site \"south\" is visited once")]
fn south_once(context: &TestContext) {
    context.history.record_visit("south");
}

#[when("a visit is recorded for a blank site identifier")]
fn blank_visit(context: &TestContext) {
    assert_eq!(context.history.record_visit(""), 0);
    assert_eq!(context.history.record_visit("  "), 0);
}

#[when("eight threads each record 100 visits to \"north\"")]
fn concurrent_visits(context: &TestContext) {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let history = Arc::clone(&context.history);
            thread::spawn(move || {
                for _ in 0..100 {
                    history.record_visit("north");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("recording thread should not panic");
    }
}

#[then("the history reports 2 visits for \"north\"")]
fn north_has_two(context: &TestContext) {
    assert_eq!(context.history.visits("north"), 2);
}

#[then("the history reports 1 visit for \"south\"")]
fn south_has_one(context: &TestContext) {
    assert_eq!(context.history.visits("south"), 1);
}

#[then("the history is still empty")]
fn still_empty(context: &TestContext) {
    assert!(context.history.is_empty());
}

#[then("the history reports 800 visits for \"north\"")]
fn north_has_eight_hundred(context: &TestContext) {
    assert_eq!(context.history.visits("north"), 800);
}

#[scenario(path = "tests/features/visit_history.feature", index = 0)]
fn visits_accumulate(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/visit_history.feature", index = 1)]
fn blank_ids_are_ignored(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/visit_history.feature", index = 2)]
fn concurrent_visits_are_counted(context: TestContext) {
    let _ = context;
}
