use error_trail::{
    append, append_into, errors_from, find_cause, has_cause, join, new_error, with_frame,
    BoxError, MultiError, APPEND_MISUSE_MESSAGE,
};

use crate::wrap::RootError;

fn boxed(message: &str) -> BoxError {
    new_error(message).into()
}

#[test]
fn construction_drops_absent_errors() {
    let merr: MultiError = vec![
        None,
        Some(boxed("err 1")),
        None,
        Some(boxed("err 2")),
        None,
    ]
    .into_iter()
    .collect();

    assert_eq!(merr.len(), 2);
    assert_eq!(merr.errors()[0].to_string(), "err 1");
    assert_eq!(merr.errors()[1].to_string(), "err 2");
}

#[test]
fn construction_flattens_nested_collections_in_place() {
    let nested = MultiError::from_errors([new_error("b"), new_error("c")]);
    let merr = MultiError::from_errors([boxed("a"), Box::new(nested) as BoxError, boxed("d")]);

    let messages: Vec<String> = merr.iter().map(|err| err.to_string()).collect();
    assert_eq!(messages, ["a", "b", "c", "d"]);
}

#[test]
fn flatten_descends_arbitrarily_deep() {
    let inner = MultiError::from_errors([new_error("a"), new_error("b")]);
    let middle = MultiError::from_errors([Box::new(inner) as BoxError, boxed("c")]);
    let outer = MultiError::from_errors([Box::new(middle) as BoxError]);

    let messages: Vec<String> = outer.iter().map(|err| err.to_string()).collect();
    assert_eq!(messages, ["a", "b", "c"]);
}

#[test]
fn flatten_is_idempotent_through_the_collapsing_accessor() {
    let collapsed = MultiError::from_errors([new_error("a"), new_error("b"), new_error("c")])
        .error_or_nil()
        .expect("three components");

    let rewrapped = MultiError::from_errors([collapsed]);
    let messages: Vec<String> = rewrapped.iter().map(|err| err.to_string()).collect();
    assert_eq!(messages, ["a", "b", "c"]);
}

#[test]
fn a_wrapped_collection_is_not_flattened() {
    // Flattening applies to collections appended directly, not to
    // collections hidden inside another error's chain.
    let nested = MultiError::from_errors([new_error("a"), new_error("b")]);
    let wrapped = with_frame(Box::new(nested) as BoxError);
    let merr = MultiError::from_errors([wrapped]);
    assert_eq!(merr.len(), 1);
}

#[test]
fn error_or_nil_collapses_zero_and_one() {
    assert!(MultiError::new().error_or_nil().is_none());

    let single = MultiError::from_errors([RootError { code: 7 }])
        .error_or_nil()
        .expect("one component");
    // The bare component comes back, not a one-element collection.
    assert!(single.downcast_ref::<RootError>().is_some());

    let double = MultiError::from_errors([new_error("a"), new_error("b")])
        .error_or_nil()
        .expect("two components");
    assert!(double.downcast_ref::<MultiError>().is_some());
}

#[test]
fn push_opt_drops_none() {
    let mut merr = MultiError::new();
    merr.push_opt(None);
    merr.push_opt(Some(boxed("a")));
    assert_eq!(merr.len(), 1);
}

#[test]
fn display_renders_bracketed_messages() {
    let merr = MultiError::from_errors([new_error("err 1"), new_error("err 2")]);
    assert_eq!(merr.to_string(), "[err 1; err 2]");
    assert_eq!(format!("{merr:?}"), "MultiError[err 1; err 2]");
}

#[test]
fn verbose_display_indexes_each_component() {
    let merr = MultiError::from_errors([new_error("err 1"), new_error("err 2")]);
    assert_eq!(
        format!("{merr:#}"),
        "multiple errors:\n\n* error 1 of 2: err 1\n\n* error 2 of 2: err 2\n"
    );
}

#[test]
fn verbose_display_of_empty_collection() {
    assert_eq!(format!("{:#}", MultiError::new()), "empty errors: []");
}

#[test]
fn matching_tries_components_in_order() {
    use std::error::Error as _;

    let merr = MultiError::from_errors([
        boxed("plain"),
        Box::new(with_frame(RootError { code: 7 })) as BoxError,
    ]);

    // The collection is not a chain link...
    assert!(merr.source().is_none());
    // ... matching goes through the component list instead.
    let found = find_cause::<RootError>(&merr).expect("component match");
    assert_eq!(found.code, 7);
    assert!(has_cause::<RootError>(&merr));
}

#[test]
fn append_merges_two_optional_errors() {
    assert!(append(None, None).is_none());

    let single = append(None, Some(boxed("a"))).expect("one error");
    assert_eq!(single.to_string(), "a");

    let single = append(Some(boxed("a")), None).expect("one error");
    assert_eq!(single.to_string(), "a");

    let both = append(Some(boxed("a")), Some(boxed("b"))).expect("two errors");
    assert_eq!(both.to_string(), "[a; b]");
}

#[test]
fn append_grows_an_existing_collection() {
    let merr = append(Some(boxed("a")), Some(boxed("b")));
    let merr = append(merr, Some(boxed("c"))).expect("three errors");
    let merr = merr.downcast::<MultiError>().expect("collection");
    let messages: Vec<String> = merr.iter().map(|err| err.to_string()).collect();
    assert_eq!(messages, ["a", "b", "c"]);
}

#[test]
fn append_substitutes_a_misuse_error_for_a_multierror_operand() {
    let appending = MultiError::from_errors([new_error("b"), new_error("c")]);
    let merged = append(Some(boxed("a")), Some(Box::new(appending) as BoxError))
        .expect("two errors");
    let merr = merged.downcast::<MultiError>().expect("collection");

    assert_eq!(merr.len(), 2);
    assert_eq!(merr.errors()[0].to_string(), "a");
    assert_eq!(merr.errors()[1].to_string(), APPEND_MISUSE_MESSAGE);
}

#[test]
fn append_into_accumulates_and_reports() {
    let mut err: Option<BoxError> = None;
    assert!(!append_into(&mut err, None));
    assert!(err.is_none());

    assert!(append_into(&mut err, Some(boxed("read failed"))));
    assert!(append_into(&mut err, Some(boxed("close failed"))));
    let err = err.expect("accumulated");
    assert_eq!(err.to_string(), "[read failed; close failed]");
}

#[test]
fn join_coalesces_a_batch() {
    assert!(join([None, None]).is_none());

    let single = join([None, Some(boxed("a"))]).expect("one error");
    assert_eq!(single.to_string(), "a");

    let nested = MultiError::from_errors([new_error("b"), new_error("c")]).error_or_nil();
    let joined = join([Some(boxed("a")), nested]).expect("three errors");
    assert_eq!(joined.to_string(), "[a; b; c]");
}

#[test]
fn errors_from_exposes_components_or_the_error_itself() {
    let merr = MultiError::from_errors([new_error("a"), new_error("b")]);
    let components = errors_from(&merr);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].to_string(), "a");

    let plain = new_error("alone");
    let components = errors_from(&plain);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].to_string(), "alone");
}
