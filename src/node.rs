//! Tree nodes and ordered sibling sets.
//!
//! Every node carries a non-empty label: the edge from its parent (or, at the
//! top level, the start of the word). Siblings are kept in a vector sorted by
//! the first symbol of their label, so a node's key is always `label[0]` and
//! lookups are a binary search.

use smallvec::SmallVec;
use tracing::trace;

use crate::symbol::{common_prefix_len, Symbol};

/// Inline capacity of a label before it spills to the heap.
const LABEL_INLINE: usize = 16;

pub(crate) type Label<C> = SmallVec<[C; LABEL_INLINE]>;

/// A node of the radix tree.
#[derive(Clone, Debug)]
pub struct Node<C> {
    label: Label<C>,
    terminal: bool,
    children: Children<C>,
}

/// An ordered set of sibling nodes, keyed by the first symbol of each label.
#[derive(Clone, Debug)]
pub struct Children<C> {
    nodes: Vec<Node<C>>,
}

impl<C: Symbol> Node<C> {
    fn leaf(label: &[C]) -> Self {
        debug_assert!(!label.is_empty());
        Self {
            label: Label::from_slice(label),
            terminal: true,
            children: Children::new(),
        }
    }

    /// The edge fragment leading to this node.
    #[inline]
    pub fn label(&self) -> &[C] {
        &self.label
    }

    /// First symbol of the label; the key of this node among its siblings.
    #[inline]
    pub fn key(&self) -> C {
        self.label[0]
    }

    /// Whether the path down to this node spells a stored word.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn children(&self) -> &Children<C> {
        &self.children
    }

    /// Insert `value` below this node. `value` must start with `self.key()`.
    ///
    /// Returns `true` if the word was not stored before.
    fn insert(&mut self, value: &[C]) -> bool {
        debug_assert_eq!(value.first(), self.label.first());

        let matched = common_prefix_len(&self.label, value);
        if matched < self.label.len() {
            self.split(matched);
        }

        if matched < value.len() {
            self.children.insert(&value[matched..])
        } else {
            let added = !self.terminal;
            self.terminal = true;
            added
        }
    }

    /// Cut the label at `at`: this node keeps `label[..at]` as a non-terminal
    /// branch and its previous contents move into a single child.
    fn split(&mut self, at: usize) {
        debug_assert!(at > 0 && at < self.label.len());
        trace!(prefix = ?&self.label[..at], suffix = ?&self.label[at..], "split node");

        let child = Node {
            label: Label::from_slice(&self.label[at..]),
            terminal: self.terminal,
            children: std::mem::take(&mut self.children),
        };
        self.label.truncate(at);
        self.terminal = false;
        self.children.nodes.push(child);
    }
}

impl<C> Children<C> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate the nodes in ascending key order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node<C>> {
        self.nodes.iter()
    }

    /// Node at position `index` in key order.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> Option<&Node<C>> {
        self.nodes.get(index)
    }
}

impl<C: Symbol> Children<C> {
    #[inline]
    fn search(&self, key: C) -> Result<usize, usize> {
        self.nodes.binary_search_by(|n| n.key().cmp(&key))
    }

    /// The node whose label starts with `key`.
    pub fn get(&self, key: C) -> Option<&Node<C>> {
        self.search(key).ok().map(|i| &self.nodes[i])
    }

    /// Insert a non-empty word into this sibling set.
    pub(crate) fn insert(&mut self, value: &[C]) -> bool {
        debug_assert!(!value.is_empty());
        match self.search(value[0]) {
            Ok(i) => self.nodes[i].insert(value),
            Err(i) => {
                trace!(label = ?value, "new leaf");
                self.nodes.insert(i, Node::leaf(value));
                true
            }
        }
    }

    /// The node at which `word` ends exactly, terminal or not.
    pub(crate) fn find(&self, word: &[C]) -> Option<&Node<C>> {
        let mut siblings = self;
        let mut rest = word;
        loop {
            let node = siblings.get(*rest.first()?)?;
            rest = rest.strip_prefix(node.label())?;
            if rest.is_empty() {
                return Some(node);
            }
            siblings = &node.children;
        }
    }
}

impl<C> Default for Children<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> IntoIterator for &'a Children<C> {
    type Item = &'a Node<C>;
    type IntoIter = std::slice::Iter<'a, Node<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
