//! Extracting frames and identities from error chains.

use std::error::Error;

use crate::frame::Frames;
use crate::multi::MultiError;
use crate::wrap::{new_error, with_frames, Diagnostic, FramedError};

/// Extracts all the frames annotated across an error chain, in display
/// order (innermost wrapper first).
///
/// Walking from the given error toward the root: a node carrying a full
/// stack trace *replaces* everything gathered so far — the deepest trace in
/// the chain wins, and any single-frame annotations above it are dropped.
/// While no trace has been seen, single-frame annotations accumulate,
/// prepending so that deeper attachments read first. Mixing the two styles
/// in one chain is therefore lossy by design; the result favors the
/// richest context over a confusing merge.
///
/// # Examples
///
/// ```
/// use error_trail::{frames_from, new_error, with_frame};
///
/// let err = with_frame(with_frame(new_error("boom")));
/// assert_eq!(frames_from(&err).len(), 2);
/// ```
pub fn frames_from(err: &(dyn Error + 'static)) -> Frames {
    let mut frames = Frames::new();
    let mut trace_found = false;
    let mut current = Some(err);
    while let Some(node) = current {
        if let Some(framed) = node.downcast_ref::<FramedError>() {
            match framed.diagnostic() {
                Diagnostic::StackTrace(trace) => {
                    frames = trace.clone();
                    trace_found = true;
                }
                Diagnostic::Frames(own) if !trace_found => {
                    let mut merged = own.clone();
                    merged.extend(frames);
                    frames = merged;
                }
                _ => {}
            }
        }
        current = node.source();
    }
    frames
}

/// Returns a new error with the same message as `err` but no relationship
/// to it: it cannot be matched or unwrapped back to the original, and it
/// carries no frames.
pub fn mask(err: &(dyn Error + 'static)) -> FramedError {
    new_error(err.to_string())
}

/// Returns a new error with the same message as `err` and the same
/// extracted frame context, but severed from the original's identity and
/// causes. Think of it as squashing the error's history: diagnostics
/// survive, matching does not.
pub fn opaque(err: &(dyn Error + 'static)) -> FramedError {
    let masked = mask(err);
    let frames = frames_from(err);
    if frames.is_empty() {
        masked
    } else {
        with_frames(masked, frames)
    }
}

/// Iterates the error chain from `err` down to the root cause, starting
/// with `err` itself.
pub fn causes<'a>(err: &'a (dyn Error + 'static)) -> Causes<'a> {
    Causes { next: Some(err) }
}

/// Iterator returned by [`causes`].
pub struct Causes<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Finds the first error of type `T` in the chain rooted at `err`.
///
/// A [`MultiError`] encountered during the walk is traversed through its
/// component list in order, first match wins; its own `source` is always
/// empty, so this is the only way through a collection. Never fails — a
/// miss is `None`.
pub fn find_cause<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    if let Some(found) = err.downcast_ref::<T>() {
        return Some(found);
    }
    if let Some(merr) = err.downcast_ref::<MultiError>() {
        return merr
            .errors()
            .iter()
            .find_map(|component| find_cause::<T>(&**component as &(dyn Error + 'static)));
    }
    err.source().and_then(|cause| find_cause::<T>(cause))
}

/// Whether the chain rooted at `err` contains an error of type `T`.
pub fn has_cause<T: Error + 'static>(err: &(dyn Error + 'static)) -> bool {
    find_cause::<T>(err).is_some()
}

/// Whether the chain rooted at `err` contains an error of type `T` equal to
/// `target`. The sentinel-matching counterpart of [`find_cause`].
pub fn is_cause<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    if let Some(found) = err.downcast_ref::<T>() {
        if found == target {
            return true;
        }
    }
    if let Some(merr) = err.downcast_ref::<MultiError>() {
        return merr
            .errors()
            .iter()
            .any(|component| is_cause(&**component as &(dyn Error + 'static), target));
    }
    err.source().is_some_and(|cause| is_cause(cause, target))
}
