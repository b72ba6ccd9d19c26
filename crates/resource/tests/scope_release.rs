//! Scope ownership: early discard, reverse-order release on close, and
//! duplicate id handling.

use custodian_resource::{Error, Failing, LifecycleEvent, ManagedResource, Recorder, Scope};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn destroyed_order(recorder: &Recorder) -> Vec<String> {
    recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            LifecycleEvent::Destroyed { resource_id } => Some(resource_id),
            _ => None,
        })
        .collect()
}

#[test]
fn close_releases_in_reverse_opening_order() {
    let recorder = Recorder::new();
    let mut scope = Scope::with_sink("shutdown", recorder.clone());
    for id in ["first", "second", "third"] {
        scope.open(id, "Pool").unwrap();
    }

    scope.close();

    assert_eq!(destroyed_order(&recorder), vec!["third", "second", "first"]);
}

#[test]
fn discard_ends_lifetime_before_scope_exit() {
    let recorder = Recorder::new();
    let mut scope = Scope::with_sink("main", recorder.clone());
    scope.open("R1", "Database").unwrap();
    scope.open("R3", "generic").unwrap();

    scope.discard("R3").unwrap();
    assert_eq!(destroyed_order(&recorder), vec!["R3"]);
    assert!(!scope.contains("R3"));

    drop(scope);
    assert_eq!(destroyed_order(&recorder), vec!["R3", "R1"]);
}

#[test]
fn resources_stay_usable_through_scope() {
    let recorder = Recorder::new();
    let mut scope = Scope::with_sink("main", recorder.clone());
    scope.open("R1", "Database").unwrap().use_for("Query");

    let r1 = scope.get_mut("R1").expect("R1 is open");
    r1.use_for("Update");
    assert!(r1.is_active());
    assert_eq!(recorder.events_for("R1").len(), 4);
}

#[test]
fn adopt_keeps_custom_backend() {
    let recorder = Recorder::new();
    let mut scope = Scope::with_sink("main", recorder.clone());
    let broken = ManagedResource::builder("R4")
        .backend(Failing::new("offline"))
        .sink(recorder.clone())
        .open();

    let adopted = scope.adopt(broken).unwrap();
    assert!(!adopted.is_active());
    assert_eq!(scope.len(), 1);
}

#[rstest]
#[case::open_twice(false)]
#[case::adopt_twice(true)]
fn duplicate_ids_are_rejected(#[case] via_adopt: bool) {
    let recorder = Recorder::new();
    let mut scope = Scope::with_sink("dup", recorder.clone());
    assert_eq!(scope.name(), "dup");
    scope.open("R1", "Database").unwrap();

    let result = if via_adopt {
        let twin = ManagedResource::builder("R1").sink(recorder.clone()).open();
        scope.adopt(twin).map(|_| ())
    } else {
        scope.open("R1", "File").map(|_| ())
    };

    match result {
        Err(Error::AlreadyOpen { resource_id, scope }) => {
            assert_eq!(resource_id, "R1");
            assert_eq!(scope, "dup");
        }
        other => panic!("expected AlreadyOpen, got {other:?}"),
    }
    assert_eq!(scope.len(), 1);
}
