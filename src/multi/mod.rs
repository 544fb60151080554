//! A flattening, ordered collection of independent errors.
//!
//! [`MultiError`] is for coalescing the outcomes of several operations —
//! cleanup steps, parallel tasks, validation passes — into one value that
//! still exposes every component. It is a collection, not a chain: the
//! components are peers, and the collection itself has no single cause.
//!
//! Construction flattens: a [`MultiError`] pushed into another is absorbed
//! element by element, recursively, so a collection never nests another
//! collection. Absent errors (`None`) are dropped. Order is preserved
//! depth-first: a flattened collection's members occupy the position their
//! wrapper held.
//!
//! Nothing here is synchronized; callers coalescing across threads must
//! serialize their appends (or use the [`sync`](crate::sync) helpers, which
//! do).
//!
//! # Examples
//!
//! ```
//! use error_trail::{new_error, MultiError};
//!
//! let merr = MultiError::from_errors([
//!     new_error("err 1"),
//!     new_error("err 2"),
//! ]);
//! assert_eq!(merr.to_string(), "[err 1; err 2]");
//! assert_eq!(merr.len(), 2);
//! ```
//!
//! Testing "did anything fail" goes through the collapsing accessor, not
//! the collection itself — an empty collection is still a value:
//!
//! ```
//! use error_trail::MultiError;
//!
//! let merr = MultiError::new();
//! assert!(merr.error_or_nil().is_none());
//! ```

use std::error::Error;
use std::fmt;
use std::slice;

use smallvec::SmallVec;

use crate::wrap::new_error;
use crate::BoxError;

/// SmallVec-backed storage for component errors.
///
/// Inline capacity of two covers the dominant append pattern — a deferred
/// cleanup failure joined to a primary error — without heap allocation.
type ErrorVec = SmallVec<[BoxError; 2]>;

/// Message substituted by [`append`] when its second operand is itself a
/// multi-error, which the two-operand contract forbids.
pub const APPEND_MISUSE_MESSAGE: &str =
    "append used incorrectly: appending error must be a single error, not a multierror";

/// An ordered, flattened collection of errors.
///
/// `Display` renders the component messages as `[m1; m2; …]`; the alternate
/// form (`{:#}`) renders every component verbosely under an indexed
/// `* error i of N:` header. `source` is always `None` — use
/// [`errors`](MultiError::errors) or the matching helpers
/// ([`find_cause`](crate::find_cause), [`is_cause`](crate::is_cause)) to
/// reach the components.
#[derive(Default)]
pub struct MultiError {
    errors: ErrorVec,
}

impl MultiError {
    /// Returns an empty collection.
    pub fn new() -> MultiError {
        MultiError {
            errors: ErrorVec::new(),
        }
    }

    /// Builds a collection from a group of errors, flattening any nested
    /// collections in place.
    pub fn from_errors<I, E>(errs: I) -> MultiError
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        let mut merr = MultiError::new();
        for err in errs {
            merr.push(err);
        }
        merr
    }

    /// Appends an error. A multi-error is absorbed component by component,
    /// at this position, recursively.
    pub fn push<E: Into<BoxError>>(&mut self, err: E) {
        self.push_boxed(err.into());
    }

    /// Appends an error that may be absent; `None` is dropped without
    /// occupying a slot.
    pub fn push_opt(&mut self, err: Option<BoxError>) {
        if let Some(err) = err {
            self.push_boxed(err);
        }
    }

    fn push_boxed(&mut self, err: BoxError) {
        match err.downcast::<MultiError>() {
            Ok(nested) => {
                for component in nested.errors {
                    self.push_boxed(component);
                }
            }
            Err(err) => self.errors.push(err),
        }
    }

    /// The component errors, in append order. The collection cannot be
    /// mutated through this view.
    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the collection holds no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates the components in order.
    pub fn iter(&self) -> slice::Iter<'_, BoxError> {
        self.errors.iter()
    }

    /// Consumes the collection, returning the components.
    pub fn into_errors(self) -> Vec<BoxError> {
        self.errors.into_vec()
    }

    /// The collapsing accessor: `None` when empty, the bare component when
    /// there is exactly one, the collection itself otherwise.
    ///
    /// This is the correct way to ask "did anything fail": a `MultiError`
    /// value always exists, so identity checks cannot distinguish an empty
    /// collection from a populated one.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_trail::{new_error, MultiError};
    ///
    /// assert!(MultiError::new().error_or_nil().is_none());
    ///
    /// let single = MultiError::from_errors([new_error("boom")]).error_or_nil();
    /// assert_eq!(single.unwrap().to_string(), "boom");
    /// ```
    pub fn error_or_nil(mut self) -> Option<BoxError> {
        match self.errors.len() {
            0 => None,
            1 => Some(self.errors.remove(0)),
            _ => Some(Box::new(self)),
        }
    }

    fn fmt_messages(&self, f: &mut fmt::Formatter<'_>, delimiters: (&str, &str)) -> fmt::Result {
        f.write_str(delimiters.0)?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        f.write_str(delimiters.1)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.errors.len();
        if total == 0 {
            return f.write_str("empty errors: []");
        }
        f.write_str("multiple errors:\n")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "\n* error {} of {}: {err:#}", i + 1, total)?;
        }
        f.write_str("\n")
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.fmt_verbose(f)
        } else {
            self.fmt_messages(f, ("[", "]"))
        }
    }
}

impl fmt::Debug for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MultiError")?;
        self.fmt_messages(f, ("[", "]"))
    }
}

// A collection, not a chain link: matching must go through the component
// list, never a single-cause unwrap.
impl Error for MultiError {}

impl FromIterator<BoxError> for MultiError {
    fn from_iter<I: IntoIterator<Item = BoxError>>(iter: I) -> MultiError {
        let mut merr = MultiError::new();
        for err in iter {
            merr.push_boxed(err);
        }
        merr
    }
}

impl FromIterator<Option<BoxError>> for MultiError {
    fn from_iter<I: IntoIterator<Item = Option<BoxError>>>(iter: I) -> MultiError {
        let mut merr = MultiError::new();
        for err in iter {
            merr.push_opt(err);
        }
        merr
    }
}

impl Extend<BoxError> for MultiError {
    fn extend<I: IntoIterator<Item = BoxError>>(&mut self, iter: I) {
        for err in iter {
            self.push_boxed(err);
        }
    }
}

impl IntoIterator for MultiError {
    type Item = BoxError;
    type IntoIter = smallvec::IntoIter<[BoxError; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a BoxError;
    type IntoIter = slice::Iter<'a, BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Merges two optional errors into at most one, flattening the receiving
/// side.
///
/// This is the fast path for the common two-operand case, such as folding a
/// cleanup failure into a function's primary result:
///
/// ```
/// use error_trail::{append, BoxError};
///
/// fn close(noisy: bool) -> Option<BoxError> {
///     noisy.then(|| BoxError::from("close failed"))
/// }
///
/// let mut result: Option<BoxError> = None;
/// result = append(result, close(true));
/// assert_eq!(result.unwrap().to_string(), "close failed");
/// ```
///
/// The receiving (first) operand may already be — or become — a
/// [`MultiError`]. The appending (second) operand must be a single error:
/// one that itself carries multiple errors is replaced with a placeholder
/// whose message is [`APPEND_MISUSE_MESSAGE`], so the misuse shows up in
/// the output instead of crashing the merge. Callers with several errors to
/// add must loop. (The substitution drops the operand's own content; this
/// is a known trap, kept for compatibility with the serialized form.)
pub fn append(receiving: Option<BoxError>, appending: Option<BoxError>) -> Option<BoxError> {
    let appending = appending.map(|err| {
        if err.downcast_ref::<MultiError>().is_some() {
            BoxError::from(new_error(APPEND_MISUSE_MESSAGE))
        } else {
            err
        }
    });

    match (receiving, appending) {
        (None, None) => None,
        (Some(err), None) | (None, Some(err)) => match err.downcast::<MultiError>() {
            Ok(merr) => merr.error_or_nil(),
            Err(err) => Some(err),
        },
        (Some(receiving), Some(appending)) => {
            let mut merr = MultiError::new();
            merr.push_boxed(receiving);
            merr.push_boxed(appending);
            merr.error_or_nil()
        }
    }
}

/// Appends an error into the receiving slot in place, reporting whether
/// anything was appended.
///
/// ```
/// use error_trail::{append_into, BoxError};
///
/// let mut err: Option<BoxError> = None;
/// assert!(!append_into(&mut err, None));
/// assert!(append_into(&mut err, Some("read failed".into())));
/// assert!(append_into(&mut err, Some("close failed".into())));
/// assert_eq!(err.unwrap().to_string(), "[read failed; close failed]");
/// ```
pub fn append_into(receiving: &mut Option<BoxError>, appending: Option<BoxError>) -> bool {
    let appended = appending.is_some();
    *receiving = append(receiving.take(), appending);
    appended
}

/// Coalesces a group of optional errors into at most one: `None` when all
/// are absent, the bare error when exactly one survives, a [`MultiError`]
/// otherwise. Nested collections flatten; no misuse substitution applies on
/// this construction path.
pub fn join<I>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = Option<BoxError>>,
{
    errs.into_iter().collect::<MultiError>().error_or_nil()
}

/// The component list of any error: a [`MultiError`]'s components, or the
/// error itself when it is not a collection. Useful when it is unknown
/// whether a given error coalesces several.
pub fn errors_from<'a>(err: &'a (dyn Error + 'static)) -> Vec<&'a (dyn Error + 'static)> {
    if let Some(merr) = err.downcast_ref::<MultiError>() {
        merr.errors()
            .iter()
            .map(|component| &**component as &(dyn Error + 'static))
            .collect()
    } else {
        vec![err]
    }
}
