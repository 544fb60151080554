//! Deserialization of stack traces from their text form.

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

use crate::frame::{escape, Frame, Frames};
use crate::wrap::{new_error, with_frames, FramedError};

/// Failure while parsing the text stack-trace format.
///
/// Parsing never discards work: the error carries every frame parsed before
/// the failure point, reachable through
/// [`partial_frames`](FrameParseError::partial_frames).
#[derive(Debug)]
pub struct FrameParseError {
    kind: FrameParseErrorKind,
    line: String,
    partial: Frames,
    source: Option<ParseIntError>,
}

/// The ways text parsing can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameParseErrorKind {
    /// Input ended with a dangling line that is not part of a complete
    /// function/location pair.
    IncompleteFrame,
    /// A location line carried a suffix that looks like a line number but
    /// does not parse as one.
    MalformedLineNumber,
}

impl FrameParseError {
    /// Which way parsing failed.
    pub fn kind(&self) -> FrameParseErrorKind {
        self.kind
    }

    /// The input line that triggered the failure, as written.
    pub fn offending_line(&self) -> &str {
        &self.line
    }

    /// The frames parsed before the failure point.
    pub fn partial_frames(&self) -> &Frames {
        &self.partial
    }

    /// Consumes the error, keeping the partially parsed frames.
    pub fn into_partial_frames(self) -> Frames {
        self.partial
    }
}

impl fmt::Display for FrameParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FrameParseErrorKind::IncompleteFrame => {
                write!(f, "incomplete frame data: {:?}", self.line)
            }
            FrameParseErrorKind::MalformedLineNumber => {
                write!(f, "unparsable line number: {:?}", self.line)
            }
        }
    }
}

impl Error for FrameParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

/// The text parser behind [`Frames::from_text`].
///
/// Consumes two lines per frame — a function line, then a `file[:line]`
/// line — trimming and unescaping each. A single unindented line before the
/// first pair is treated as printed message context and dropped. The
/// detection compares the position of the first newline against the first
/// newline-plus-tab: when they differ, the first line is not an indented
/// location line. A message that itself embeds a newline-plus-tab sequence
/// defeats the check; that ambiguity is inherent to the format.
pub(crate) fn frames_from_text(input: &str) -> Result<Frames, FrameParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Frames::new());
    }

    let first_nl = input.find('\n');
    let first_nt = input.find("\n\t");
    let input = match (first_nl, first_nt) {
        (Some(nl), Some(nt)) if nl != nt => &input[nl + 1..],
        _ => input,
    };

    let mut frames = Frames::new();
    let lines: Vec<&str> = input.split('\n').collect();
    let mut index = 0;
    while index + 2 <= lines.len() {
        let function = lines[index].trim();
        let location = lines[index + 1].trim();
        let (file, line) = match location.rfind(':') {
            Some(colon) if colon > 0 => {
                match location[colon + 1..].parse::<u32>() {
                    Ok(number) => (&location[..colon], number),
                    Err(err) => {
                        return Err(FrameParseError {
                            kind: FrameParseErrorKind::MalformedLineNumber,
                            line: lines[index + 1].to_string(),
                            partial: frames,
                            source: Some(err),
                        });
                    }
                }
            }
            _ => (location, 0),
        };
        frames.push(Frame::new(
            escape::unescape(function).into_owned(),
            escape::unescape(file).into_owned(),
            line,
        ));
        index += 2;
    }

    // A leftover line means the final pair never completed.
    if index < lines.len() {
        return Err(FrameParseError {
            kind: FrameParseErrorKind::IncompleteFrame,
            line: lines[index].to_string(),
            partial: frames,
            source: None,
        });
    }
    Ok(frames)
}

/// Reconstructs an error value from a verbose dump: the first line is the
/// message, any remaining lines parse as frames and are re-attached to the
/// result.
///
/// Empty input yields `Ok(None)` — there was no error to reconstruct. Frame
/// parse failures propagate with their partial results.
///
/// # Examples
///
/// ```
/// use error_trail::{error_from_text, frames_from};
///
/// let err = error_from_text("boom\ninner\n\tsrc/lib.rs:3").unwrap().unwrap();
/// assert_eq!(err.to_string(), "boom");
/// assert_eq!(frames_from(&err).len(), 1);
///
/// assert!(error_from_text("").unwrap().is_none());
/// ```
pub fn error_from_text(input: &str) -> Result<Option<FramedError>, FrameParseError> {
    let input = input.trim_end_matches('\n');
    if input.is_empty() {
        return Ok(None);
    }
    match input.find('\n') {
        None => Ok(Some(new_error(input))),
        Some(nl) => {
            let frames = frames_from_text(&input[nl + 1..])?;
            let err = new_error(&input[..nl]);
            if frames.is_empty() {
                Ok(Some(err))
            } else {
                Ok(Some(with_frames(err, frames)))
            }
        }
    }
}
