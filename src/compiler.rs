//! Pattern compiler.
//!
//! Compiles one pattern at a time into the shared trie with a single
//! left-to-right pass. The working state is a frontier: the set of trie
//! positions a partial match could currently end at. Plain symbols advance
//! every frontier entry (reusing an existing child edge when one exists, so
//! common prefixes are shared automatically); `?` keeps the pre-transition
//! node alongside the transitioned one; `(`/`|`/`)` manage a stack of group
//! frames that snapshot and re-merge the frontier. Each construct only ever
//! extends or merges the endpoint set, so no input character is visited
//! twice.

use std::fmt;
use std::num::NonZeroU8;

use crate::diagnostic::Diagnostic;
use crate::trie::{NodeId, Symbol, Trie};

/// A fatal flaw in a single pattern. The trie keeps any nodes already
/// created for the aborted pattern; they are harmless prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// A character outside `0-9 ( ) | ?`.
    InvalidChar { ch: char, position: usize },
    /// `)` or `|` with no group open.
    UnbalancedGroup { position: usize },
    /// End of pattern with `(` still open.
    UnclosedGroup { open: usize },
    /// `?` directly after `(` or `|`, where it would quantify nothing.
    MisplacedQuantifier { position: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidChar { ch, position } => {
                write!(f, "invalid character '{ch}' at position {position} (only 0-9, (, ), |, ? allowed)")
            }
            PatternError::UnbalancedGroup { position } => {
                write!(f, "no group open at position {position}")
            }
            PatternError::UnclosedGroup { open } => {
                write!(f, "{open} group(s) not closed at end of pattern")
            }
            PatternError::MisplacedQuantifier { position } => {
                write!(f, "'?' at position {position} quantifies nothing")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Stack entry for one open `(`.
#[derive(Debug)]
struct GroupFrame {
    /// Frontier as it stood at the `(`; every alternative restarts here.
    restart: Vec<NodeId>,
    /// Frontier endpoints collected at each `|`.
    accumulated: Vec<NodeId>,
}

/// Owns the trie and builds it incrementally, one pattern per
/// `add_pattern` call.
#[derive(Debug)]
pub struct Compiler {
    trie: Trie,
    groups: Vec<GroupFrame>,
    diagnostics: Vec<Diagnostic>,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler {
            trie: Trie::new(),
            groups: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Drain the diagnostics accumulated so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Release every compiled pattern and return to the single-root state.
    /// Frames left open by an aborted pattern are reported and discarded.
    pub fn clear(&mut self) {
        self.reap_open_groups();
        self.trie.clear();
    }

    fn reap_open_groups(&mut self) {
        if !self.groups.is_empty() {
            self.diagnostics.push(Diagnostic::OpenGroups {
                open: self.groups.len(),
            });
            self.groups.clear();
        }
    }

    /// Compile `pattern` into the trie and attach `result` to every node a
    /// full match can end at.
    ///
    /// Accepted characters: `0-9`, `(`, `)`, `|`, and `?` after a digit or
    /// `)`. On error the scan stops and the frontier is discarded.
    pub fn add_pattern(&mut self, pattern: &str, result: NonZeroU8) -> Result<(), PatternError> {
        self.reap_open_groups();

        let chars: Vec<char> = pattern.chars().collect();
        let mut frontier = vec![Trie::ROOT];
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            // A '?' binds to the digit or ')' directly before it and is
            // consumed together with it.
            let optional = (ch.is_ascii_digit() || ch == ')') && chars.get(i + 1) == Some(&'?');
            if optional {
                i += 1;
            }

            if let Some(symbol) = Symbol::from_digit(ch) {
                self.advance_frontier(&mut frontier, symbol, optional);
            } else {
                match ch {
                    '(' => {
                        if chars.get(i + 1) == Some(&'?') {
                            return Err(PatternError::MisplacedQuantifier { position: i + 1 });
                        }
                        self.groups.push(GroupFrame {
                            restart: frontier.clone(),
                            accumulated: Vec::new(),
                        });
                    }
                    '|' => {
                        if chars.get(i + 1) == Some(&'?') {
                            return Err(PatternError::MisplacedQuantifier { position: i + 1 });
                        }
                        let Some(frame) = self.groups.last_mut() else {
                            return Err(PatternError::UnbalancedGroup { position: i });
                        };
                        frame.accumulated.extend_from_slice(&frontier);
                        frontier.clear();
                        frontier.extend_from_slice(&frame.restart);
                    }
                    ')' => {
                        let Some(frame) = self.groups.pop() else {
                            return Err(PatternError::UnbalancedGroup { position: i });
                        };
                        // The frontier at ')' is the last, unterminated
                        // alternative; with '?' the whole group may be
                        // skipped, so the restart snapshot joins in too.
                        let GroupFrame {
                            restart,
                            mut accumulated,
                        } = frame;
                        accumulated.extend_from_slice(&frontier);
                        if optional {
                            accumulated.extend_from_slice(&restart);
                        }
                        frontier = accumulated;
                    }
                    '?' => {
                        self.diagnostics
                            .push(Diagnostic::OrphanQuantifier { position: i });
                    }
                    _ => {
                        return Err(PatternError::InvalidChar { ch, position: i });
                    }
                }
            }
            i += 1;
        }

        if !self.groups.is_empty() {
            // Leave the frames in place; the next compilation or a clear
            // reports them as leftovers of this aborted pattern.
            return Err(PatternError::UnclosedGroup {
                open: self.groups.len(),
            });
        }

        for &node in &frontier {
            if let Some(previous) = self.trie.set_result(node, result) {
                let path = self.trie.path_from_root(node);
                self.diagnostics.push(if previous == result {
                    Diagnostic::DuplicateResult { path, result }
                } else {
                    Diagnostic::ResultOverwritten {
                        path,
                        previous,
                        new: result,
                    }
                });
            }
        }
        Ok(())
    }

    /// Move every frontier entry down one `symbol` edge, creating the edge
    /// where it does not exist yet. With `optional`, the pre-transition
    /// nodes stay in the frontier as well, encoding "this symbol may be
    /// skipped".
    fn advance_frontier(&mut self, frontier: &mut Vec<NodeId>, symbol: Symbol, optional: bool) {
        let len = frontier.len();
        for index in 0..len {
            let origin = frontier[index];
            let child = match self.trie.child_of(origin, symbol) {
                Some(existing) => existing,
                None => self.trie.add_child(origin, symbol),
            };
            frontier[index] = child;
            if optional {
                frontier.push(origin);
            }
        }
    }
}

impl Default for Compiler {
    fn default() -> Compiler {
        Compiler::new()
    }
}
