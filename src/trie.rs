//! Trie storage.
//!
//! An arena of nodes indexed by `NodeId`, holding pure data and mutation
//! primitives. Pattern semantics live in `compiler`, serialization in
//! `pack`, and traversal-for-matching in `lookup`.

use std::fmt;
use std::num::NonZeroU8;

/// A 4-bit input alphabet value (0..=15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub const MAX: u8 = 15;

    pub fn new(value: u8) -> Option<Symbol> {
        (value <= Self::MAX).then_some(Symbol(value))
    }

    /// Map a decimal pattern character to its symbol value (`'7'` -> 7).
    pub fn from_digit(ch: char) -> Option<Symbol> {
        ch.to_digit(10).map(|d| Symbol(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a node in the trie arena. The root is always `Trie::ROOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug)]
struct Node {
    symbol: Symbol,
    result: Option<NonZeroU8>,
    children: Vec<NodeId>,
    /// Diagnostics only (path printing). Traversal and packing never
    /// follow parent links.
    parent: Option<NodeId>,
}

/// An owned trie. The root carries no symbol of its own; its stored symbol
/// is 0, which deliberately shares the packed nibble value with digit `0`
/// (the root is never a match target, so the overlap is never ambiguous).
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Trie {
        Trie {
            nodes: vec![Node {
                symbol: Symbol(0),
                result: None,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// The child of `node` reached over `symbol`, if one exists.
    /// Linear scan in insertion order.
    pub fn child_of(&self, node: NodeId, symbol: Symbol) -> Option<NodeId> {
        self.node(node)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).symbol == symbol)
    }

    /// Create a new child of `node` over `symbol` and link it.
    ///
    /// The caller is responsible for probing `child_of` first; siblings must
    /// stay pairwise distinct by symbol.
    pub fn add_child(&mut self, node: NodeId, symbol: Symbol) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            symbol,
            result: None,
            children: Vec::new(),
            parent: Some(node),
        });
        self.node_mut(node).children.push(id);
        id
    }

    /// Attach `result` to `node`, returning the previous value if one was
    /// already set. Last write wins; the caller decides how to report an
    /// overwrite.
    pub fn set_result(&mut self, node: NodeId, result: NonZeroU8) -> Option<NonZeroU8> {
        self.node_mut(node).result.replace(result)
    }

    pub fn result(&self, node: NodeId) -> Option<NonZeroU8> {
        self.node(node).result
    }

    pub fn symbol(&self, node: NodeId) -> Symbol {
        self.node(node).symbol
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Dash-joined symbol path from the root down to `node`, e.g. `1-2-3`.
    /// Diagnostics only.
    pub fn path_from_root(&self, node: NodeId) -> String {
        let mut symbols = Vec::new();
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            symbols.push(self.node(current).symbol);
            current = parent;
        }
        symbols
            .iter()
            .rev()
            .map(Symbol::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Release every node below the root and reset the root itself.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = self.node_mut(Self::ROOT);
        root.children.clear();
        root.result = None;
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        if id == Self::ROOT {
            write!(f, "node (none)")?;
        } else {
            write!(f, "node {}", self.symbol(id))?;
        }
        if let Some(result) = self.result(id) {
            write!(f, " (result: {})", result.get() as char)?;
        }
        writeln!(f)?;
        for &child in self.children(id) {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for Trie {
    fn default() -> Trie {
        Trie::new()
    }
}

/// Depth-first pre-order dump, one node per line, indented by depth.
impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, Self::ROOT, 0)?;
        writeln!(f, "---")?;
        writeln!(f, "{} nodes in total", self.node_count())
    }
}
