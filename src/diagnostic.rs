use std::fmt;
use std::num::NonZeroU8;

/// A non-fatal observation made while compiling patterns. Diagnostics never
/// abort a compilation; the front end prints them to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The same result was attached to one node twice.
    DuplicateResult { path: String, result: NonZeroU8 },
    /// A node's result was replaced by a different value. Last write wins.
    ResultOverwritten {
        path: String,
        previous: NonZeroU8,
        new: NonZeroU8,
    },
    /// A `?` that quantifies nothing: at the start of a pattern or directly
    /// after another `?`. Ignored.
    OrphanQuantifier { position: usize },
    /// Group frames were still open when the next compilation or a clear
    /// started; an earlier pattern aborted mid-group.
    OpenGroups { open: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateResult { path, result } => {
                write!(
                    f,
                    "duplicate result: {} for pattern {path}",
                    result.get() as char
                )
            }
            Diagnostic::ResultOverwritten {
                path,
                previous,
                new,
            } => {
                write!(
                    f,
                    "overwriting result: {} with {} for pattern {path}",
                    previous.get() as char,
                    new.get() as char
                )
            }
            Diagnostic::OrphanQuantifier { position } => {
                write!(f, "orphan '?' at position {position} in pattern")
            }
            Diagnostic::OpenGroups { open } => {
                write!(f, "{open} group(s) left open by an aborted pattern")
            }
        }
    }
}
