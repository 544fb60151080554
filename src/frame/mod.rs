//! Call-stack frames: capture, lazy resolution, and formatting.
//!
//! A [`Frame`] describes one call-stack location as a function name, a file
//! path, and a line number. Frames come from two places:
//!
//! - **captured** from the live call stack ([`Frame::capture`],
//!   [`Frames::capture`]) — these hold a raw program counter and resolve the
//!   three location fields lazily, on first access;
//! - **synthetic** ([`Frame::new`]) — all three fields supplied directly,
//!   typically when reconstructing a trace that was serialized elsewhere.
//!
//! Both kinds format identically. A frame whose location cannot be
//! determined reports `unknown` / `unknown` / `0` rather than failing.
//!
//! # Examples
//!
//! ```
//! use error_trail::{Frame, FrameFormat};
//!
//! let frame = Frame::new("app::db::fetch_user", "src/db.rs", 42);
//! assert_eq!(frame.to_string(), "src/db.rs:42");
//! assert_eq!(frame.display(FrameFormat::Short).to_string(), "db.rs:42");
//! assert_eq!(frame.display(FrameFormat::FuncName).to_string(), "fetch_user");
//! assert_eq!(format!("{frame:#}"), "app::db::fetch_user\n\tsrc/db.rs:42");
//! ```

use std::fmt;
use std::sync::OnceLock;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

pub(crate) mod capture;
pub(crate) mod escape;
mod frames;
mod parse;

pub use frames::{Frames, FramesDisplay};
pub use parse::{error_from_text, FrameParseError, FrameParseErrorKind};

/// Sentinel reported for unresolvable function names and file paths.
pub(crate) const UNKNOWN: &str = "unknown";

/// Resolved location data for a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) function: String,
    pub(crate) file: String,
    pub(crate) line: u32,
}

impl Location {
    pub(crate) fn unknown() -> Self {
        Location {
            function: UNKNOWN.into(),
            file: UNKNOWN.into(),
            line: 0,
        }
    }
}

/// One call-stack location.
///
/// The three visible fields — function, file, line — are immutable once
/// resolved. For captured frames, resolution happens on the first call to
/// [`location`](Frame::location) (or any formatter) and is memoized in a
/// one-shot cell, so concurrent first access resolves exactly once.
///
/// Frames are cheap to copy around before resolution: a captured frame is a
/// program counter and an empty cell.
#[derive(Clone)]
pub struct Frame {
    pc: usize,
    location: OnceLock<Location>,
}

impl Frame {
    /// Returns a frame describing the caller's own location.
    pub fn capture() -> Frame {
        capture::frame(1)
    }

    /// Returns a frame describing a location `skip` callers above the
    /// caller. `Frame::capture_at(0)` is equivalent to [`Frame::capture`].
    ///
    /// A `skip` beyond the available stack depth yields an unresolvable
    /// frame, never an error.
    pub fn capture_at(skip: usize) -> Frame {
        capture::frame(skip + 1)
    }

    /// Builds a synthetic frame with all three fields supplied up front.
    ///
    /// Use this to reconstruct frames parsed from a serialized trace, or to
    /// write precise tests. Blank fields normalize to the `unknown` / `0`
    /// sentinels. [`has_pc`](Frame::has_pc) is `false` for the result.
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Frame {
        let mut location = Location {
            function: function.into(),
            file: file.into(),
            line,
        };
        if location.function.is_empty() {
            location.function = UNKNOWN.into();
        }
        if location.file.is_empty() {
            location.file = UNKNOWN.into();
        }
        let cell = OnceLock::new();
        let _ = cell.set(location);
        Frame { pc: 0, location: cell }
    }

    /// Builds a frame from a raw program counter, resolved lazily.
    pub fn from_pc(pc: usize) -> Frame {
        Frame {
            pc,
            location: OnceLock::new(),
        }
    }

    /// The frame's program counter; `0` for synthetic frames.
    ///
    /// This is an opaque identity handle for the captured location, not
    /// semantic data.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Whether this frame was captured from the live call stack rather than
    /// reconstructed synthetically.
    pub fn has_pc(&self) -> bool {
        self.pc != 0
    }

    /// Returns the frame's function name, file path, and line number.
    ///
    /// For captured frames the result is computed from the program counter
    /// on first call and memoized; later calls are lookups.
    pub fn location(&self) -> (&str, &str, u32) {
        let location = self.resolved();
        (&location.function, &location.file, location.line)
    }

    /// The fully qualified function name, or `unknown`.
    pub fn function(&self) -> &str {
        &self.resolved().function
    }

    /// The full file path, or `unknown`.
    pub fn file(&self) -> &str {
        &self.resolved().file
    }

    /// The line number, or `0` when unresolved.
    pub fn line(&self) -> u32 {
        self.resolved().line
    }

    /// Returns an adapter that formats the frame in the given style.
    ///
    /// `Display` (`{}`) is the [`Long`](FrameFormat::Long) form and the
    /// alternate form (`{:#}`) is [`Verbose`](FrameFormat::Verbose); the
    /// adapter covers the rest.
    pub fn display(&self, format: FrameFormat) -> FrameDisplay<'_> {
        FrameDisplay {
            frame: self,
            format,
            indent: 0,
        }
    }

    fn resolved(&self) -> &Location {
        self.location.get_or_init(|| capture::resolve(self.pc))
    }

    pub(crate) fn fmt_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        format: FrameFormat,
        indent: usize,
    ) -> fmt::Result {
        let (function, file, line) = self.location();
        match format {
            FrameFormat::Short => {
                f.write_str(&escape::escape(base_name(file)))?;
                if line > 0 {
                    write!(f, ":{line}")?;
                }
                Ok(())
            }
            FrameFormat::ShortQuoted => {
                f.write_str("\"")?;
                self.fmt_with(f, FrameFormat::Short, 0)?;
                f.write_str("\"")
            }
            FrameFormat::Line => write!(f, "{line}"),
            FrameFormat::FuncName => f.write_str(&escape::escape(func_name(function))),
            FrameFormat::Long => {
                f.write_str(&escape::escape(file))?;
                if line > 0 {
                    write!(f, ":{line}")?;
                }
                Ok(())
            }
            FrameFormat::Verbose => {
                let pad = " ".repeat(indent);
                write!(f, "{pad}{}", escape::escape(function))?;
                write!(f, "\n{pad}\t{}:{line}", escape::escape(file))
            }
        }
    }
}

/// Text styles for a single [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Base filename plus `:line` when the line is known: `db.rs:42`.
    Short,
    /// The [`Short`](FrameFormat::Short) form wrapped in double quotes.
    ShortQuoted,
    /// The line number alone; `0` when unresolved.
    Line,
    /// The function name without qualifiers: `fetch_user`.
    FuncName,
    /// Full file path plus `:line` when the line is known. The `Display`
    /// form.
    Long,
    /// Function name on one line, then a tab-indented full path and line on
    /// the next. The alternate (`{:#}`) form, and the unit of the
    /// serializable stack-trace text format.
    Verbose,
}

/// Adapter returned by [`Frame::display`].
pub struct FrameDisplay<'a> {
    frame: &'a Frame,
    format: FrameFormat,
    indent: usize,
}

impl FrameDisplay<'_> {
    /// Left-pads every produced line by `width` spaces. Only the
    /// [`Verbose`](FrameFormat::Verbose) form is multi-line, so only it is
    /// affected.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.frame.fmt_with(f, self.format, self.indent)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.fmt_with(f, FrameFormat::Verbose, f.width().unwrap_or(0))
        } else {
            self.fmt_with(f, FrameFormat::Long, 0)
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, file, line) = self.location();
        write!(f, "Frame(\"{}", escape::escape(file))?;
        if line > 0 {
            write!(f, ":{line}")?;
        }
        f.write_str("\")")
    }
}

impl Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (function, file, line) = self.location();
        let function = escape::escape(function);
        let file = escape::escape(file);
        FrameObjectRef {
            function: &*function,
            file: &*file,
            line,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let object = FrameObject::deserialize(deserializer)?;
        Ok(Frame::new(
            escape::unescape(&object.function).into_owned(),
            escape::unescape(&object.file).into_owned(),
            object.line,
        ))
    }
}

/// Borrowed serialization model: exactly the three location keys, in a fixed
/// order, with the string fields pre-escaped.
#[derive(Serialize)]
struct FrameObjectRef<'a> {
    function: &'a str,
    file: &'a str,
    line: u32,
}

/// Owned deserialization model; any subset of keys may be present.
#[derive(Deserialize)]
struct FrameObject {
    #[serde(default)]
    function: String,
    #[serde(default)]
    file: String,
    #[serde(default)]
    line: u32,
}

// TODO: handle Windows path separators; base names and the bare function
// form do not split on `\`, so traces serialized on Windows render with the
// full path.
fn base_name(file: &str) -> &str {
    file.rsplit('/').next().unwrap_or(file)
}

/// Strips qualifiers from a function name: the last path segment, then
/// whatever follows the first `.`, then the last `::` segment. The `.` rule
/// keeps names round-tripped from package-qualified traces short; the `::`
/// rule does the same for Rust symbol names.
fn func_name(function: &str) -> &str {
    let name = function.rsplit('/').next().unwrap_or(function);
    let name = match name.split_once('.') {
        Some((_, rest)) => rest,
        None => name,
    };
    name.rsplit("::").next().unwrap_or(name)
}
