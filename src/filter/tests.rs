//! Registry behaviour across apply, skip and run.

use pretty_assertions::assert_eq;

use super::*;
use crate::controller::Controller;
use crate::error::FilterError;

/// Records every invoked operation; `fail_on` makes one operation fail.
#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
    fail_on: Option<&'static str>,
}

const METHODS: &[&str] = &["a", "b", "c", "log", "auth", "load_user", "edit", "view"];

impl Controller for Recorder {
    type Error = String;

    fn responds_to(&self, name: &str) -> bool {
        METHODS.contains(&name)
    }

    fn invoke(&mut self, name: &str) -> Result<(), String> {
        if self.fail_on == Some(name) {
            return Err(format!("{} failed", name));
        }
        self.calls.push(name.to_string());
        Ok(())
    }
}

type Registry<'a> = FilterRegistry<'a, Recorder, str>;

fn run_for(action: &str, setup: impl FnOnce(&mut Registry<'_>)) -> Vec<String> {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, action);
    setup(&mut registry);
    registry.run().unwrap();
    recorder.calls
}

#[test]
fn test_run_on_empty_registry() {
    let calls = run_for("index", |_| {});
    assert!(calls.is_empty());
}

#[test]
fn test_unconditional_filter_fires_once() {
    for action in ["index", "show", "anything"] {
        let calls = run_for(action, |r| r.apply("log", FilterOptions::new()).unwrap());
        assert_eq!(calls, vec!["log"]);
    }
}

fn auth_only_edit_delete(r: &mut Registry<'_>) {
    r.apply("auth", FilterOptions::new().only(["edit", "delete"]))
        .unwrap();
}

fn auth_except_view(r: &mut Registry<'_>) {
    r.apply("auth", FilterOptions::new().except("view")).unwrap();
}

fn auth_skipped_only_admin(r: &mut Registry<'_>) {
    auth_except_view(r);
    r.skip("auth", FilterOptions::new().only("admin")).unwrap();
}

fn auth_skipped_except_admin(r: &mut Registry<'_>) {
    r.apply("auth", FilterOptions::new()).unwrap();
    r.skip("auth", FilterOptions::new().except("admin")).unwrap();
}

fn a_skipped_b_applied(r: &mut Registry<'_>) {
    r.apply(["a", "b"], FilterOptions::new()).unwrap();
    r.skip("a", FilterOptions::new()).unwrap();
}

#[test]
fn test_only_condition() {
    assert!(run_for("view", auth_only_edit_delete).is_empty());
    assert_eq!(run_for("edit", auth_only_edit_delete), vec!["auth"]);
    assert_eq!(run_for("delete", auth_only_edit_delete), vec!["auth"]);
}

#[test]
fn test_except_condition() {
    assert!(run_for("view", auth_except_view).is_empty());
    assert_eq!(run_for("edit", auth_except_view), vec!["auth"]);
}

#[test]
fn test_skip_with_only_inverts() {
    assert!(run_for("admin", auth_skipped_only_admin).is_empty());
    assert_eq!(run_for("edit", auth_skipped_only_admin), vec!["auth"]);
    assert_eq!(run_for("view", auth_skipped_only_admin), vec!["auth"]);
}

#[test]
fn test_skip_with_except_inverts() {
    assert_eq!(run_for("admin", auth_skipped_except_admin), vec!["auth"]);
    assert!(run_for("edit", auth_skipped_except_admin).is_empty());
}

#[test]
fn test_bare_skip_never_fires() {
    for action in ["index", "a", "b"] {
        assert_eq!(run_for(action, a_skipped_b_applied), vec!["b"]);
    }
}

#[test]
fn test_reapply_after_skip_restores_filter() {
    let calls = run_for("index", |r| {
        r.apply("log", FilterOptions::new()).unwrap();
        r.skip("log", FilterOptions::new()).unwrap();
        r.apply("log", FilterOptions::new().except("show")).unwrap();
    });
    assert_eq!(calls, vec!["log"]);
}

#[test]
fn test_last_registration_wins() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    registry.apply("auth", FilterOptions::new().only("edit")).unwrap();
    registry.skip("auth", FilterOptions::new().except("view")).unwrap();
    registry.apply("auth", FilterOptions::new().except("admin")).unwrap();

    let expected = prepare_options(&FilterOptions::new().except("admin"), false).unwrap();
    assert_eq!(registry.get("auth").unwrap().rule(), &expected);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_apply_many_matches_apply_each() {
    let options = FilterOptions::new().only("edit");

    let mut left = Recorder::default();
    let mut batched = FilterRegistry::new(&mut left, "edit");
    batched.apply(["a", "b"], options.clone()).unwrap();

    let mut right = Recorder::default();
    let mut single = FilterRegistry::new(&mut right, "edit");
    single.apply("a", options.clone()).unwrap();
    single.apply("b", options).unwrap();

    assert_eq!(
        batched.entries().collect::<Vec<_>>(),
        single.entries().collect::<Vec<_>>()
    );
}

#[test]
fn test_registration_order_is_execution_order() {
    let calls = run_for("index", |r| {
        r.apply("a", FilterOptions::new()).unwrap();
        r.apply("b", FilterOptions::new()).unwrap();
        r.apply("c", FilterOptions::new()).unwrap();
    });
    assert_eq!(calls, vec!["a", "b", "c"]);
}

#[test]
fn test_replacing_entry_keeps_position() {
    let calls = run_for("index", |r| {
        r.apply(["a", "b", "c"], FilterOptions::new()).unwrap();
        r.skip("a", FilterOptions::new().only("show")).unwrap();
        r.apply("b", FilterOptions::new()).unwrap();
    });
    assert_eq!(calls, vec!["a", "b", "c"]);
}

#[test]
fn test_skip_unapplied_filter() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    assert_eq!(
        registry.skip("never_applied", FilterOptions::new()),
        Err(FilterError::not_applied("never_applied"))
    );
}

#[test]
fn test_apply_unknown_method() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    assert_eq!(
        registry.apply("missing_method", FilterOptions::new()),
        Err(FilterError::unknown_filter("missing_method"))
    );
}

#[test]
fn test_apply_rejects_bad_options() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    assert_eq!(
        registry.apply("a", FilterOptions::new().only("a").except("b")),
        Err(FilterError::ConflictingCondition)
    );
    assert_eq!(
        registry.apply("a", FilterOptions::new().with("bogus", "a")),
        Err(FilterError::invalid_option_key("bogus"))
    );
    assert!(registry.is_empty());
}

#[test]
fn test_skip_rejects_bad_options() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    registry.apply("a", FilterOptions::new()).unwrap();
    assert_eq!(
        registry.skip("a", FilterOptions::new().with("unless", "show")),
        Err(FilterError::invalid_option_key("unless"))
    );
    assert!(!registry.get("a").unwrap().is_skip());
}

#[test]
fn test_failed_apply_registers_nothing() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    assert_eq!(
        registry.apply(["a", "nope", "b"], FilterOptions::new()),
        Err(FilterError::unknown_filter("nope"))
    );
    assert!(registry.is_empty());
}

#[test]
fn test_failed_skip_changes_nothing() {
    let mut recorder = Recorder::default();
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    registry.apply("a", FilterOptions::new()).unwrap();
    assert_eq!(
        registry.skip(["a", "b"], FilterOptions::new()),
        Err(FilterError::not_applied("b"))
    );
    assert!(!registry.get("a").unwrap().is_skip());
}

#[test]
fn test_failing_filter_stops_run() {
    let mut recorder = Recorder {
        fail_on: Some("b"),
        ..Recorder::default()
    };
    let mut registry = FilterRegistry::new(&mut recorder, "index");
    registry.apply(["a", "b", "c"], FilterOptions::new()).unwrap();

    assert_eq!(registry.run(), Err("b failed".to_string()));
    assert_eq!(recorder.calls, vec!["a"]);
}

#[test]
fn test_plan_matches_run() {
    let mut recorder = Recorder::default();
    let router = String::from("edit");
    let mut registry = FilterRegistry::new(&mut recorder, &router);
    registry.apply("log", FilterOptions::new()).unwrap();
    registry.apply("auth", FilterOptions::new().except("view")).unwrap();
    registry.apply("load_user", FilterOptions::new().only("show")).unwrap();
    registry.skip("log", FilterOptions::new().only("edit")).unwrap();

    let plan: Vec<String> = registry.plan().into_iter().map(str::to_string).collect();
    registry.run().unwrap();

    assert_eq!(plan, vec!["auth"]);
    assert_eq!(recorder.calls, plan);
}
