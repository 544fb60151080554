//! The [`Frames`] collection: an ordered sequence of frames.

use std::fmt;
use std::ops::Index;
use std::slice;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::frame::parse::frames_from_text;
use crate::frame::{capture, Frame, FrameFormat, FrameParseError};

/// SmallVec-backed storage for frames.
///
/// Inline capacity of one keeps the common single-frame attachment off the
/// heap.
type FrameVec = SmallVec<[Frame; 1]>;

/// An ordered sequence of [`Frame`] values — a stack trace or a subset of
/// one.
///
/// Order is innermost call first unless a caller builds the sequence
/// otherwise. Duplicate frames are valid and common (recursive helpers, for
/// example).
///
/// `Display` (`{}`) renders a bracketed list of short forms; the alternate
/// form (`{:#}`) renders each frame verbosely on its own pair of lines,
/// which is also the serializable text format parsed by
/// [`Frames::from_text`].
///
/// # Examples
///
/// ```
/// use error_trail::{Frame, Frames};
///
/// let frames = Frames::from(vec![
///     Frame::new("app::inner", "src/inner.rs", 4),
///     Frame::new("app::outer", "src/outer.rs", 9),
/// ]);
/// assert_eq!(frames.to_string(), "[inner.rs:4 outer.rs:9]");
///
/// let text = format!("{frames:#}");
/// let reparsed = Frames::from_text(&text).unwrap();
/// assert_eq!(reparsed.len(), 2);
/// assert_eq!(reparsed[0].location(), ("app::inner", "src/inner.rs", 4));
/// ```
#[derive(Clone, Default)]
pub struct Frames {
    frames: FrameVec,
}

impl Frames {
    /// Returns an empty sequence.
    pub fn new() -> Frames {
        Frames {
            frames: FrameVec::new(),
        }
    }

    /// Captures the caller's entire stack, innermost call first.
    pub fn capture() -> Frames {
        capture::stack(1, capture::MAX_DEPTH)
    }

    /// Captures the caller's stack starting `skip` frames up.
    ///
    /// A `skip` beyond the available stack depth yields an empty sequence,
    /// never an error.
    pub fn capture_at(skip: usize) -> Frames {
        capture::stack(skip + 1, capture::MAX_DEPTH)
    }

    /// Captures at most `max` frames of the caller's stack starting `skip`
    /// frames up. A `max` of zero means no extra bound (the hard depth cap
    /// still applies).
    pub fn capture_at_most(skip: usize, max: usize) -> Frames {
        let max = if max == 0 { capture::MAX_DEPTH } else { max };
        capture::stack(skip + 1, max)
    }

    /// Parses the verbose two-lines-per-frame text format back into frames.
    ///
    /// The input is trimmed first; empty input yields an empty sequence. A
    /// single unindented leading line (a printed message before the trace)
    /// is detected and dropped. On a malformed line number or a dangling
    /// trailing line the returned [`FrameParseError`] still carries every
    /// frame parsed before the failure point.
    pub fn from_text(input: &str) -> Result<Frames, FrameParseError> {
        frames_from_text(input)
    }

    /// Parses the JSON form produced by [`Frames::to_json`]. The `null`
    /// token yields an empty sequence; missing object keys default to
    /// blank.
    pub fn from_json(input: &str) -> serde_json::Result<Frames> {
        serde_json::from_str(input)
    }

    /// Serializes to JSON: an array of `{"function", "file", "line"}`
    /// objects, or `null` when the sequence is empty.
    ///
    /// Empty serializes as `null` rather than `[]` so that "no trace" and
    /// "empty trace" cannot diverge across a round trip; both read back as
    /// absent.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Appends a frame at the outermost position.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Iterates innermost call first.
    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Borrows the frames as a slice.
    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns an adapter that renders the sequence in the given per-frame
    /// style: a bracketed list for the single-line styles, the stacked text
    /// format for [`Verbose`](FrameFormat::Verbose).
    pub fn display(&self, format: FrameFormat) -> FramesDisplay<'_> {
        FramesDisplay {
            frames: self,
            format,
            indent: 0,
        }
    }

    fn fmt_list(
        &self,
        f: &mut fmt::Formatter<'_>,
        format: FrameFormat,
        delimiters: (&str, &str),
    ) -> fmt::Result {
        f.write_str(delimiters.0)?;
        for (i, frame) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            frame.fmt_with(f, format, 0)?;
        }
        f.write_str(delimiters.1)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for frame in self.iter() {
            f.write_str("\n")?;
            frame.fmt_with(f, FrameFormat::Verbose, indent)?;
        }
        Ok(())
    }
}

/// Adapter returned by [`Frames::display`].
pub struct FramesDisplay<'a> {
    frames: &'a Frames,
    format: FrameFormat,
    indent: usize,
}

impl FramesDisplay<'_> {
    /// Left-pads every line of the [`Verbose`](FrameFormat::Verbose) form.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }
}

impl fmt::Display for FramesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            FrameFormat::Verbose => self.frames.fmt_verbose(f, self.indent),
            format => self.frames.fmt_list(f, format, ("[", "]")),
        }
    }
}

impl fmt::Display for Frames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.fmt_verbose(f, f.width().unwrap_or(0))
        } else {
            self.fmt_list(f, FrameFormat::Short, ("[", "]"))
        }
    }
}

impl fmt::Debug for Frames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Frames")?;
        self.fmt_list(f, FrameFormat::Short, ("{", "}"))
    }
}

impl Serialize for Frames {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.collect_seq(self.iter())
        }
    }
}

impl<'de> Deserialize<'de> for Frames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let frames: Option<Vec<Frame>> = Option::deserialize(deserializer)?;
        Ok(frames.map(Frames::from).unwrap_or_default())
    }
}

impl Index<usize> for Frames {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

impl From<Frame> for Frames {
    fn from(frame: Frame) -> Frames {
        let mut frames = Frames::new();
        frames.push(frame);
        frames
    }
}

impl From<Vec<Frame>> for Frames {
    fn from(frames: Vec<Frame>) -> Frames {
        Frames {
            frames: FrameVec::from_vec(frames),
        }
    }
}

impl FromIterator<Frame> for Frames {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Frames {
        Frames {
            frames: iter.into_iter().collect(),
        }
    }
}

impl Extend<Frame> for Frames {
    fn extend<I: IntoIterator<Item = Frame>>(&mut self, iter: I) {
        self.frames.extend(iter);
    }
}

impl IntoIterator for Frames {
    type Item = Frame;
    type IntoIter = smallvec::IntoIter<[Frame; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a Frames {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
