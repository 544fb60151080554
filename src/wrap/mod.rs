//! Error wrappers that attach frames, stack traces, and messages.
//!
//! Every constructor here produces a [`FramedError`]: one node in an error
//! chain, holding an optional message, an optional cause, and at most one
//! diagnostic payload (a single frame, a caller-supplied frame list, or a
//! full stack trace). Nodes link through [`Error::source`], so the standard
//! traversal tools and the matching helpers in this crate both work across
//! the chain.
//!
//! Pick a constructor by what you want attached:
//!
//! - [`new_error`] — a bare message, nothing attached.
//! - [`with_frame`] / [`new_with_frame`] — exactly one call-site frame. The
//!   cheap default for wrap-as-you-propagate code.
//! - [`with_stack_trace`] / [`new_with_stack_trace`] — the entire call
//!   stack at construction.
//! - [`with_frames`] / [`new_with_frames`] — a frame list captured
//!   elsewhere, e.g. parsed back out of a log line.
//! - [`with_message`] — override the displayed message; the cause stays
//!   reachable but silent.
//! - [`chain`] — a message and stack of its own, rendered verbosely as a
//!   `CAUSED BY:` cascade over the whole ancestry.
//!
//! Mixing the frame-attach and stack-trace-attach styles in one chain is
//! discouraged: [`frames_from`] resolves the mix by letting the deepest
//! stack trace win.
//!
//! # Examples
//!
//! ```
//! use error_trail::{frames_from, new_error, with_frame, with_message};
//!
//! let root = new_error("connection refused");
//! let err = with_message(with_frame(root), "loading profile");
//!
//! assert_eq!(err.to_string(), "loading profile");
//! assert_eq!(frames_from(&err).len(), 1);
//! ```

use std::error::Error;
use std::fmt;

use crate::frame::{capture, Frames};
use crate::BoxError;

mod extract;

pub use extract::{causes, find_cause, frames_from, has_cause, is_cause, mask, opaque, Causes};

/// Indent applied to frame blocks in the chain cascade rendering.
const CHAIN_INDENT: usize = 5;

/// Diagnostic payload carried by one [`FramedError`] node. At most one of
/// the attachment styles is present per node.
#[derive(Debug, Clone)]
pub(crate) enum Diagnostic {
    None,
    /// Frames accumulated one call site at a time; [`frames_from`] prepends
    /// these while walking outward.
    Frames(Frames),
    /// A full stack trace; the deepest one in a chain supersedes everything
    /// else.
    StackTrace(Frames),
}

/// An error annotated with a message, a cause, and location diagnostics.
///
/// Built by the free constructors in this module ([`new_error`],
/// [`with_frame`], [`chain`], …) rather than directly. `Display` shows the
/// node's message (or its cause's, for transparent wrappers); the alternate
/// form (`{:#}`) also renders the frames extracted from the chain, in the
/// serializable stack-trace text format.
#[derive(Debug)]
pub struct FramedError {
    message: Option<String>,
    cause: Option<BoxError>,
    diagnostic: Diagnostic,
    chained: bool,
}

/// Returns a bare error that formats as the given message. Nothing is
/// attached and nothing is wrapped.
pub fn new_error(message: impl Into<String>) -> FramedError {
    FramedError {
        message: Some(message.into()),
        cause: None,
        diagnostic: Diagnostic::None,
        chained: false,
    }
}

/// Returns a new error annotated with the entire call stack.
pub fn new_with_stack_trace(message: impl Into<String>) -> FramedError {
    node(
        new_error(message).into(),
        Diagnostic::StackTrace(capture::stack(1, capture::MAX_DEPTH)),
    )
}

/// Annotates the error with the entire call stack by wrapping it.
pub fn with_stack_trace(err: impl Into<BoxError>) -> FramedError {
    node(
        err.into(),
        Diagnostic::StackTrace(capture::stack(1, capture::MAX_DEPTH)),
    )
}

/// Returns a new error annotated with the caller's frame.
pub fn new_with_frame(message: impl Into<String>) -> FramedError {
    node(
        new_error(message).into(),
        Diagnostic::Frames(Frames::from(capture::frame(1))),
    )
}

/// Returns a new error annotated with a frame `skip` callers above the
/// caller. Useful when construction happens inside a helper that should not
/// itself appear in the trace.
pub fn new_with_frame_at(message: impl Into<String>, skip: usize) -> FramedError {
    node(
        new_error(message).into(),
        Diagnostic::Frames(Frames::from(capture::frame(skip + 1))),
    )
}

/// Annotates the error with the caller's frame by wrapping it.
pub fn with_frame(err: impl Into<BoxError>) -> FramedError {
    node(
        err.into(),
        Diagnostic::Frames(Frames::from(capture::frame(1))),
    )
}

/// Annotates the error with a frame `skip` callers above the caller.
pub fn with_frame_at(err: impl Into<BoxError>, skip: usize) -> FramedError {
    node(
        err.into(),
        Diagnostic::Frames(Frames::from(capture::frame(skip + 1))),
    )
}

/// Returns a new error annotated with the given frame list.
pub fn new_with_frames(message: impl Into<String>, frames: Frames) -> FramedError {
    node(new_error(message).into(), Diagnostic::Frames(frames))
}

/// Annotates the error with a caller-supplied frame list by wrapping it.
/// This is the relay constructor: use it to re-attach frames captured in
/// another process or parsed from a serialized trace.
pub fn with_frames(err: impl Into<BoxError>, frames: Frames) -> FramedError {
    node(err.into(), Diagnostic::Frames(frames))
}

/// Overrides the displayed message for the error by wrapping it. The cause
/// remains reachable through [`Error::source`] and the matching helpers,
/// but its own message is not shown unless the chain is walked.
pub fn with_message(err: impl Into<BoxError>, message: impl Into<String>) -> FramedError {
    FramedError {
        message: Some(message.into()),
        cause: Some(err.into()),
        diagnostic: Diagnostic::None,
        chained: false,
    }
}

/// Returns a new error with its own message and stack trace, wrapping the
/// causing error.
///
/// Unlike the transparent wrappers, a chain error renders verbosely as a
/// cascade: its own message and frames, then a `CAUSED BY:` block for the
/// cause's own verbose rendering, recursively. Chain messages usually do
/// not repeat the cause's message — the cascade prints the whole ancestry
/// anyway.
pub fn chain(message: impl Into<String>, cause: impl Into<BoxError>) -> FramedError {
    FramedError {
        message: Some(message.into()),
        cause: Some(cause.into()),
        diagnostic: Diagnostic::StackTrace(capture::stack(1, capture::MAX_DEPTH)),
        chained: true,
    }
}

fn node(cause: BoxError, diagnostic: Diagnostic) -> FramedError {
    FramedError {
        message: None,
        cause: Some(cause),
        diagnostic,
        chained: false,
    }
}

impl FramedError {
    /// The frames attached to this node alone — a single frame, a supplied
    /// list, or a captured stack, depending on the constructor. Use
    /// [`frames_from`] to gather frames across a whole chain.
    ///
    /// The returned copy is detached; mutating it does not affect the
    /// error.
    pub fn frames(&self) -> Frames {
        match &self.diagnostic {
            Diagnostic::None => Frames::new(),
            Diagnostic::Frames(frames) | Diagnostic::StackTrace(frames) => frames.clone(),
        }
    }

    /// The wrapped error, if this node wraps one.
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| &**cause as &(dyn Error + 'static))
    }

    pub(crate) fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    fn fmt_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.cause) {
            (Some(message), _) => f.write_str(message),
            (None, Some(cause)) => write!(f, "{cause}"),
            (None, None) => Ok(()),
        }
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chained {
            self.fmt_message(f)?;
            let own = self.frames();
            write!(f, "{own:#width$}", width = CHAIN_INDENT)?;
            if let Some(cause) = &self.cause {
                write!(f, "\n\nCAUSED BY: {cause:#width$}", width = CHAIN_INDENT)?;
            }
            return Ok(());
        }
        match self.diagnostic {
            Diagnostic::None => self.fmt_message(f),
            _ => {
                // Render the message without recursing into the cause's own
                // verbose form, then the frames extracted from the whole
                // chain; a chain with several annotated nodes would
                // otherwise dump the same stack repeatedly.
                self.fmt_message(f)?;
                let frames = frames_from(self);
                write!(f, "{frames:#width$}", width = f.width().unwrap_or(0))
            }
        }
    }
}

impl fmt::Display for FramedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.fmt_verbose(f)
        } else {
            self.fmt_message(f)
        }
    }
}

impl Error for FramedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| &**cause as &(dyn Error + 'static))
    }
}
