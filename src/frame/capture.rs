//! Call-stack walking built on the `backtrace` crate.
//!
//! Capture records raw program counters only. Symbolization is deferred to
//! [`Frame`](crate::frame::Frame) resolution, so attaching a trace to an
//! error that is never printed stays cheap.

use std::ffi::c_void;

use crate::frame::{Frame, Frames, Location, UNKNOWN};

/// Upper bound on captured stack depth.
pub(crate) const MAX_DEPTH: usize = 32;

/// Frames introduced by the capture plumbing itself (the `backtrace::trace`
/// callback and the capture function); always skipped.
const BASE_SKIP: usize = 2;

/// Captures the program counter `skip` frames above the function that called
/// into the capture layer. A `skip` beyond the available depth produces an
/// unresolvable frame rather than an error.
#[inline(never)]
pub(crate) fn frame(skip: usize) -> Frame {
    let mut pc: usize = 0;
    let mut remaining = skip + BASE_SKIP;
    backtrace::trace(|fr| {
        if remaining > 0 {
            remaining -= 1;
            return true;
        }
        pc = fr.ip() as usize;
        false
    });
    Frame::from_pc(pc)
}

/// Captures up to `max` program counters starting `skip` frames above the
/// caller. A `skip` beyond the available depth produces an empty stack.
#[inline(never)]
pub(crate) fn stack(skip: usize, max: usize) -> Frames {
    let cap = max.min(MAX_DEPTH);
    let mut pcs: Vec<usize> = Vec::with_capacity(cap);
    let mut remaining = skip + BASE_SKIP;
    backtrace::trace(|fr| {
        if remaining > 0 {
            remaining -= 1;
            return true;
        }
        pcs.push(fr.ip() as usize);
        pcs.len() < cap
    });
    pcs.into_iter().map(Frame::from_pc).collect()
}

/// Symbolizes a program counter into a [`Location`]. Inlined callers can
/// yield several symbols for one counter; the first one wins per field.
pub(crate) fn resolve(pc: usize) -> Location {
    let mut location = Location::unknown();
    if pc == 0 {
        return location;
    }
    backtrace::resolve(pc as *mut c_void, |symbol| {
        if location.function == UNKNOWN {
            if let Some(name) = symbol.name() {
                location.function = format!("{name:#}");
            }
        }
        if location.file == UNKNOWN {
            if let Some(file) = symbol.filename() {
                location.file = file.display().to_string();
            }
        }
        if location.line == 0 {
            if let Some(line) = symbol.lineno() {
                location.line = line;
            }
        }
    });
    location
}
