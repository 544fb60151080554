use error_trail::{Frame, FrameFormat, Frames};

pub mod parse;

fn synthetic() -> Frame {
    Frame::new("app::profile::load_avatar", "src/profile/avatar.rs", 44)
}

#[test]
fn synthetic_frame_reports_its_location() {
    let frame = synthetic();
    assert_eq!(
        frame.location(),
        ("app::profile::load_avatar", "src/profile/avatar.rs", 44)
    );
    assert!(!frame.has_pc());
    assert_eq!(frame.pc(), 0);
}

#[test]
fn blank_synthetic_fields_normalize_to_sentinels() {
    let frame = Frame::new("", "", 0);
    assert_eq!(frame.location(), ("unknown", "unknown", 0));
}

#[test]
fn short_format_uses_base_filename() {
    let frame = synthetic();
    assert_eq!(frame.display(FrameFormat::Short).to_string(), "avatar.rs:44");
    assert_eq!(
        frame.display(FrameFormat::ShortQuoted).to_string(),
        "\"avatar.rs:44\""
    );
}

#[test]
fn short_format_of_unresolved_frame_is_unknown() {
    let frame = Frame::new("", "", 0);
    assert_eq!(frame.display(FrameFormat::Short).to_string(), "unknown");
    assert_eq!(frame.display(FrameFormat::Line).to_string(), "0");
}

#[test]
fn line_format_is_the_line_number() {
    assert_eq!(synthetic().display(FrameFormat::Line).to_string(), "44");
}

#[test]
fn func_name_format_strips_qualifiers() {
    assert_eq!(
        synthetic().display(FrameFormat::FuncName).to_string(),
        "load_avatar"
    );

    // Package-qualified names round-tripped from serialized traces strip
    // the same way: path segment first, then the package prefix.
    let foreign = Frame::new("test.pkg.in/example.(*Type).Method.func1", "a.go", 3);
    assert_eq!(
        foreign.display(FrameFormat::FuncName).to_string(),
        "(*Type).Method.func1"
    );
}

#[test]
fn long_format_is_the_display_form() {
    let frame = synthetic();
    assert_eq!(frame.to_string(), "src/profile/avatar.rs:44");
    assert_eq!(
        frame.display(FrameFormat::Long).to_string(),
        frame.to_string()
    );
}

#[test]
fn long_format_omits_line_suffix_when_unresolved() {
    let frame = Frame::new("app::run", "src/main.rs", 0);
    assert_eq!(frame.to_string(), "src/main.rs");
}

#[test]
fn verbose_format_stacks_function_and_file() {
    let frame = synthetic();
    assert_eq!(
        format!("{frame:#}"),
        "app::profile::load_avatar\n\tsrc/profile/avatar.rs:44"
    );
}

#[test]
fn verbose_format_of_empty_frame_keeps_zero_line() {
    let frame = Frame::new("", "", 0);
    assert_eq!(format!("{frame:#}"), "unknown\n\tunknown:0");
}

#[test]
fn verbose_format_honors_indent_width() {
    let frame = Frame::new("f", "g.rs", 7);
    assert_eq!(format!("{frame:#3}"), "   f\n   \tg.rs:7");
    assert_eq!(
        frame.display(FrameFormat::Verbose).indent(3).to_string(),
        "   f\n   \tg.rs:7"
    );
}

#[test]
fn debug_format_is_type_tagged() {
    assert_eq!(
        format!("{:?}", synthetic()),
        "Frame(\"src/profile/avatar.rs:44\")"
    );
    assert_eq!(format!("{:?}", Frame::new("", "", 0)), "Frame(\"unknown\")");
}

#[test]
fn text_formats_escape_control_characters() {
    let frame = Frame::new("fn\twith\ttabs", "dir/fi\"le\n.rs", 9);
    assert_eq!(
        format!("{frame:#}"),
        "fn\\twith\\ttabs\n\tdir/fi\\\"le\\n.rs:9"
    );
    assert_eq!(
        frame.display(FrameFormat::Short).to_string(),
        "fi\\\"le\\n.rs:9"
    );
}

#[test]
fn frames_display_forms() {
    let frames = Frames::from(vec![
        Frame::new("app::inner", "src/inner.rs", 4),
        Frame::new("app::outer", "src/outer.rs", 9),
    ]);

    assert_eq!(frames.to_string(), "[inner.rs:4 outer.rs:9]");
    assert_eq!(
        frames.display(FrameFormat::FuncName).to_string(),
        "[inner outer]"
    );
    assert_eq!(
        format!("{frames:#}"),
        "\napp::inner\n\tsrc/inner.rs:4\napp::outer\n\tsrc/outer.rs:9"
    );
    assert_eq!(
        format!("{frames:?}"),
        "Frames{inner.rs:4 outer.rs:9}"
    );
}

#[test]
fn empty_frames_display_forms() {
    let frames = Frames::new();
    assert_eq!(frames.to_string(), "[]");
    assert_eq!(format!("{frames:#}"), "");
    assert_eq!(format!("{frames:?}"), "Frames{}");
}

#[test]
fn frames_collect_and_index() {
    let frames: Frames = vec![
        Frame::new("a", "a.rs", 1),
        Frame::new("b", "b.rs", 2),
    ]
    .into_iter()
    .collect();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].location(), ("b", "b.rs", 2));
    assert!(!frames.is_empty());
}
