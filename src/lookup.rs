//! Lookup engines.
//!
//! Two cursors share one contract: `reset` rewinds to the root, `advance`
//! follows one symbol edge and moves only on success, `result` reads the
//! result attached to the current position. `TreeCursor` walks the live
//! trie and exists for debugging and for parity checks against
//! `PackedCursor`, the deployment-target engine that walks the packed bytes
//! with no trie, heap, or pointers. For every symbol sequence the two must
//! agree on both the match outcome and the result.

use std::num::NonZeroU8;

use crate::pack::NODE_SIZE;
use crate::trie::{NodeId, Symbol, Trie};

pub trait Lookup {
    /// Rewind the cursor to the root.
    fn reset(&mut self);
    /// Follow one symbol edge. Returns `true` iff the transition exists;
    /// the cursor moves only on success.
    fn advance(&mut self, symbol: Symbol) -> bool;
    /// Result attached to the current position, if any.
    fn result(&self) -> Option<NonZeroU8>;
}

/// Cursor over the live trie. O(branching factor) per step.
#[derive(Debug)]
pub struct TreeCursor<'a> {
    trie: &'a Trie,
    pos: NodeId,
}

impl<'a> TreeCursor<'a> {
    pub fn new(trie: &'a Trie) -> TreeCursor<'a> {
        TreeCursor {
            trie,
            pos: Trie::ROOT,
        }
    }
}

impl Lookup for TreeCursor<'_> {
    fn reset(&mut self) {
        self.pos = Trie::ROOT;
    }

    fn advance(&mut self, symbol: Symbol) -> bool {
        match self.trie.child_of(self.pos, symbol) {
            Some(child) => {
                self.pos = child;
                true
            }
            None => false,
        }
    }

    fn result(&self) -> Option<NonZeroU8> {
        self.trie.result(self.pos)
    }
}

/// Cursor over a packed buffer. State is a single record offset; the buffer
/// itself is immutable and may back any number of cursors at once.
#[derive(Debug)]
pub struct PackedCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PackedCursor<'a> {
    pub fn new(data: &'a [u8]) -> PackedCursor<'a> {
        PackedCursor { data, pos: 0 }
    }

    fn descendant_count(&self, pos: usize) -> Option<usize> {
        let hi = *self.data.get(pos)?;
        let lo = *self.data.get(pos + 1)?;
        Some(usize::from(hi & 0x0f) << 8 | usize::from(lo))
    }

    fn symbol_nibble(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).map(|b| b >> 4)
    }
}

impl Lookup for PackedCursor<'_> {
    fn reset(&mut self) {
        self.pos = 0;
    }

    fn advance(&mut self, symbol: Symbol) -> bool {
        let Some(total) = self.descendant_count(self.pos) else {
            return false;
        };
        if total == 0 {
            // No children at all.
            return false;
        }
        // The current node's children and their subtrees are laid out
        // contiguously right after its record. Each candidate either
        // matches or is skipped wholesale via its own descendant count.
        let mut scan = self.pos + NODE_SIZE;
        let mut skipped = 0;
        loop {
            let Some(candidate) = self.symbol_nibble(scan) else {
                return false;
            };
            if candidate == symbol.value() {
                self.pos = scan;
                return true;
            }
            let Some(descendants) = self.descendant_count(scan) else {
                return false;
            };
            if skipped + descendants + 1 >= total {
                // Every child of the current node has been examined.
                return false;
            }
            if scan + NODE_SIZE * (descendants + 2) > self.data.len() {
                // Truncated or malformed buffer.
                return false;
            }
            scan += NODE_SIZE * (descendants + 1);
            skipped += descendants + 1;
        }
    }

    fn result(&self) -> Option<NonZeroU8> {
        self.data
            .get(self.pos + NODE_SIZE - 1)
            .copied()
            .and_then(NonZeroU8::new)
    }
}

/// Reset `cursor`, feed the whole sequence, and return the result at the
/// final position. `None` as soon as a transition is missing.
pub fn lookup_sequence<C: Lookup>(cursor: &mut C, symbols: &[Symbol]) -> Option<NonZeroU8> {
    cursor.reset();
    for &symbol in symbols {
        if !cursor.advance(symbol) {
            return None;
        }
    }
    cursor.result()
}
