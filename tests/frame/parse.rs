use error_trail::{error_from_text, frames_from, Frame, FrameParseErrorKind, Frames};

#[test]
fn empty_input_parses_to_empty_frames() {
    let frames = Frames::from_text("").unwrap();
    assert!(frames.is_empty());

    let frames = Frames::from_text("  \n\t \n ").unwrap();
    assert!(frames.is_empty());
}

#[test]
fn parses_two_lines_per_frame() {
    let text = "app::db::query\n\tsrc/db.rs:120\napp::handler\n\tsrc/handler.rs:33";
    let frames = Frames::from_text(text).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].location(), ("app::db::query", "src/db.rs", 120));
    assert_eq!(frames[1].location(), ("app::handler", "src/handler.rs", 33));
    assert!(!frames[0].has_pc());
}

#[test]
fn location_line_without_number_parses_to_zero() {
    let frames = Frames::from_text("app::run\n\tsrc/main.rs").unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].location(), ("app::run", "src/main.rs", 0));
}

#[test]
fn leading_message_context_line_is_dropped() {
    let text = "something broke: timeout\napp::db::query\n\tsrc/db.rs:120";
    let frames = Frames::from_text(text).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].location(), ("app::db::query", "src/db.rs", 120));
}

#[test]
fn dangling_line_yields_incomplete_error_with_partial_frames() {
    let text = "app::db::query\n\tsrc/db.rs:120\napp::handler";
    let err = Frames::from_text(text).unwrap_err();
    assert_eq!(err.kind(), FrameParseErrorKind::IncompleteFrame);
    assert_eq!(err.offending_line(), "app::handler");
    assert_eq!(err.partial_frames().len(), 1);
    assert_eq!(
        err.partial_frames()[0].location(),
        ("app::db::query", "src/db.rs", 120)
    );
    assert!(err.to_string().contains("incomplete frame data"));
}

#[test]
fn malformed_line_number_stops_parsing_and_keeps_prefix() {
    let text = "app::db::query\n\tsrc/db.rs:120\napp::handler\n\tsrc/handler.rs:12a34";
    let err = Frames::from_text(text).unwrap_err();
    assert_eq!(err.kind(), FrameParseErrorKind::MalformedLineNumber);
    assert_eq!(err.into_partial_frames().len(), 1);
}

#[test]
fn malformed_error_exposes_the_numeric_cause() {
    use std::error::Error as _;

    let err = Frames::from_text("f\n\tg.rs:nope").unwrap_err();
    assert_eq!(err.kind(), FrameParseErrorKind::MalformedLineNumber);
    assert!(err.source().is_some());
}

#[test]
fn text_round_trip_preserves_locations() {
    let frames = Frames::from(vec![
        Frame::new("app::inner", "src/inner.rs", 4),
        Frame::new("app::outer", "src/outer.rs", 9),
        Frame::new("app::outer", "src/outer.rs", 9),
    ]);
    let parsed = Frames::from_text(&format!("{frames:#}")).unwrap();
    assert_eq!(parsed.len(), 3);
    for (before, after) in frames.iter().zip(parsed.iter()) {
        assert_eq!(before.location(), after.location());
    }
}

#[test]
fn text_round_trip_preserves_escaped_characters() {
    let original = Frame::new("fn\twith\ttabs", "dir/fi\"le\n.rs", 9);
    let frames = Frames::from(original.clone());

    let text = format!("{frames:#}");
    // The serialized form never contains the raw characters...
    let body: String = text
        .split('\n')
        .map(|line| line.trim_start_matches('\t'))
        .collect::<Vec<_>>()
        .join("");
    assert!(!body.contains('\t'));

    // ... and parsing restores them exactly.
    let parsed = Frames::from_text(&text).unwrap();
    assert_eq!(parsed[0].location(), original.location());
}

#[test]
fn error_from_text_single_line_is_a_bare_message() {
    let err = error_from_text("upstream timeout").unwrap().unwrap();
    assert_eq!(err.to_string(), "upstream timeout");
    assert!(frames_from(&err).is_empty());
}

#[test]
fn error_from_text_reattaches_frames() {
    let text = "upstream timeout\napp::db::query\n\tsrc/db.rs:120\napp::handler\n\tsrc/handler.rs:33";
    let err = error_from_text(text).unwrap().unwrap();
    assert_eq!(err.to_string(), "upstream timeout");

    let frames = frames_from(&err);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].location(), ("app::db::query", "src/db.rs", 120));
}

#[test]
fn error_from_text_empty_input_is_none() {
    assert!(error_from_text("").unwrap().is_none());
    assert!(error_from_text("\n\n").unwrap().is_none());
}

#[test]
fn error_from_text_propagates_parse_failures() {
    let err = error_from_text("msg\nf\n\tg.rs:nope").unwrap_err();
    assert_eq!(err.kind(), FrameParseErrorKind::MalformedLineNumber);
}
