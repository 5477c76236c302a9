//! Key-scoped module writers.

use super::test_utils::{store, ChangeLog};
use serde_json::json;

#[test]
fn test_module_sets_only_its_key() {
    let store = store(json!({"a": 1, "b": {"x": 1}}));
    let merged = store.module("b").commit(|_| json!({"y": 2}));

    assert_eq!(merged.to_value(), json!({"a": 1, "b": {"y": 2}}));
    assert_eq!(store.get_state(), merged);
}

#[test]
fn test_module_never_notifies() {
    let store = store(json!({}));
    let log = ChangeLog::default();
    log.attach(&store);

    let users = store.module("users");
    users.commit(|_| json!(["ada"]));
    users.commit(|_| json!(["ada", "grace"]));

    assert_eq!(log.len(), 0);
    assert_eq!(store.get_state_at("users.1").unwrap(), Some(json!("grace")));
}

#[test]
fn test_module_handler_receives_whole_state() {
    let store = store(json!({"count": 2, "stats": {"doubled": 0}}));
    store.module("stats").commit(|state| {
        let count = state.get("count").and_then(|v| v.as_i64()).unwrap_or(0);
        json!({"doubled": count * 2})
    });

    assert_eq!(store.get_state_at("stats.doubled").unwrap(), Some(json!(4)));
}

#[test]
fn test_module_then_commit_notifies_with_module_value() {
    let store = store(json!({"n": 0}));
    let log = ChangeLog::default();
    log.attach(&store);

    store.module("meta").commit(|_| json!({"ts": 1}));
    store.commit(|_| super::test_utils::state(json!({"n": 1})));

    assert_eq!(
        log.entries(),
        vec![(
            json!({"n": 0, "meta": {"ts": 1}}),
            json!({"n": 1, "meta": {"ts": 1}})
        )]
    );
}

#[test]
fn test_module_sees_commits_made_by_its_handler() {
    let store = store(json!({"a": 1}));
    let merged = store.module("b").commit(|_| {
        store.commit(|_| super::test_utils::state(json!({"a": 2})));
        json!("done")
    });

    assert_eq!(merged.to_value(), json!({"a": 2, "b": "done"}));
}
