//! Bidirectional cursor over the words of a [`RadixTree`].
//!
//! A cursor is a stack of positions, one per level, from the top-level
//! sibling set (bottom of the stack) down to the node that ends the current
//! word (top of the stack). The end position is a single top-level position
//! one past the last entry.
//!
//! Cursors borrow the tree, so the tree cannot be modified while one is alive.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::node::{Children, Node};
use crate::symbol::Symbol;
use crate::RadixTree;

/// A word paired with its shortest unique prefix.
pub type Entry<C> = (<C as Symbol>::Text, <C as Symbol>::Text);

/// A location inside one sibling set.
#[derive(Clone, Copy)]
struct Position<'a, C> {
    siblings: &'a Children<C>,
    index: usize,
}

impl<'a, C> Position<'a, C> {
    #[inline]
    fn node(self) -> Option<&'a Node<C>> {
        self.siblings.at(self.index)
    }
}

impl<C> PartialEq for Position<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.siblings, other.siblings) && self.index == other.index
    }
}

impl<C> Eq for Position<'_, C> {}

/// A position in the ascending sequence of stored words.
pub struct Cursor<'a, C: Symbol> {
    tree: &'a RadixTree<C>,
    /// Never empty.
    path: Vec<Position<'a, C>>,
    /// Memoized value of the current position, cleared on every step.
    value: Option<Entry<C>>,
}

impl<'a, C: Symbol> Cursor<'a, C> {
    fn top_level(tree: &'a RadixTree<C>, index: usize) -> Self {
        Self {
            tree,
            path: vec![Position {
                siblings: tree.roots(),
                index,
            }],
            value: None,
        }
    }

    /// Cursor at the smallest word, or the end cursor if `tree` is empty.
    pub(crate) fn begin(tree: &'a RadixTree<C>) -> Self {
        let mut cursor = Self::top_level(tree, 0);
        if !cursor.is_end() {
            cursor.descend_leftmost();
        }
        cursor
    }

    pub(crate) fn end(tree: &'a RadixTree<C>) -> Self {
        Self::top_level(tree, tree.roots().len())
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        match self.path.as_slice() {
            [only] => only.index >= only.siblings.len(),
            _ => false,
        }
    }

    /// Node at the top of the path. Must not be called on the end cursor.
    fn current(&self) -> &'a Node<C> {
        match self.path.last().and_then(|p| p.node()) {
            Some(node) => node,
            None => unreachable!("cursor path does not point at a node"),
        }
    }

    /// Walk down along first children until a terminal node.
    fn descend_leftmost(&mut self) {
        let mut node = self.current();
        while !node.is_terminal() {
            assert!(
                !node.children().is_empty(),
                "radix tree invariant violated: non-terminal leaf"
            );
            self.path.push(Position {
                siblings: node.children(),
                index: 0,
            });
            node = self.current();
        }
    }

    /// Walk down along last children to the greatest word of the subtree.
    fn descend_rightmost(&mut self) {
        let mut node = self.current();
        while !node.children().is_empty() {
            self.path.push(Position {
                siblings: node.children(),
                index: node.children().len() - 1,
            });
            node = self.current();
        }
        assert!(
            node.is_terminal(),
            "radix tree invariant violated: non-terminal leaf"
        );
    }

    /// Whether the cursor is on the smallest word: every level is a first
    /// child and no ancestor ends a word.
    fn is_first(&self) -> bool {
        match self.path.split_last() {
            Some((last, ancestors)) => {
                last.index == 0
                    && ancestors
                        .iter()
                        .all(|p| p.index == 0 && p.node().is_some_and(|n| !n.is_terminal()))
            }
            None => false,
        }
    }

    /// Move to the next word in ascending order, or to the end position.
    ///
    /// Advancing the end cursor leaves it unchanged.
    pub fn advance(&mut self) -> &mut Self {
        if self.is_end() {
            return self;
        }
        self.value = None;

        let node = self.current();
        if !node.children().is_empty() {
            self.path.push(Position {
                siblings: node.children(),
                index: 0,
            });
        } else {
            loop {
                let depth = self.path.len() - 1;
                let top = &mut self.path[depth];
                top.index += 1;
                if top.index < top.siblings.len() {
                    break;
                }
                if depth == 0 {
                    // Past the last top-level entry.
                    return self;
                }
                self.path.pop();
            }
        }

        self.descend_leftmost();
        self
    }

    /// Move to the previous word in ascending order.
    ///
    /// Retreating the end cursor lands on the greatest word. Retreating from
    /// the smallest word leaves the cursor unchanged.
    pub fn retreat(&mut self) -> &mut Self {
        if self.is_end() {
            let len = self.tree.roots().len();
            if len > 0 {
                self.value = None;
                self.path[0].index = len - 1;
                self.descend_rightmost();
            }
            return self;
        }

        if self.is_first() {
            return self;
        }
        loop {
            let depth = self.path.len() - 1;
            let top = &mut self.path[depth];
            if top.index > 0 {
                top.index -= 1;
                self.descend_rightmost();
                break;
            }
            if depth == 0 {
                unreachable!("retreat walked past the first word");
            }
            self.path.pop();
            if self.current().is_terminal() {
                break;
            }
        }

        self.value = None;
        self
    }

    /// The `(word, shortest_unique_prefix)` pair at this position.
    ///
    /// Fails with [`Error::InvalidPosition`] on the end cursor.
    pub fn get(&mut self) -> Result<&Entry<C>> {
        if self.is_end() {
            return Err(Error::InvalidPosition);
        }
        let value = match self.value.take() {
            Some(value) => value,
            None => self.reconstruct(),
        };
        Ok(&*self.value.insert(value))
    }

    /// Like [`get`](Self::get) but hands the value out, leaving the memo empty.
    pub(crate) fn take(&mut self) -> Result<Entry<C>> {
        if self.is_end() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.value.take().unwrap_or_else(|| self.reconstruct()))
    }

    /// Concatenate labels along the path. The shortest unique prefix runs
    /// through the ancestors and the first symbol of the current label.
    fn reconstruct(&self) -> Entry<C> {
        let mut word: Vec<C> = Vec::new();
        let mut prefix_len = 0;
        for pos in &self.path {
            let Some(node) = pos.node() else {
                unreachable!("cursor path does not point at a node");
            };
            prefix_len = word.len() + 1;
            word.extend_from_slice(node.label());
        }
        (C::to_text(&word), C::to_text(&word[..prefix_len]))
    }
}

impl<C: Symbol> Clone for Cursor<'_, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            path: self.path.clone(),
            value: self.value.clone(),
        }
    }
}

impl<C: Symbol> PartialEq for Cursor<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.path == other.path
    }
}

impl<C: Symbol> Eq for Cursor<'_, C> {}

impl<C: Symbol> fmt::Debug for Cursor<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            return f.write_str("Cursor(end)");
        }
        let indices: Vec<usize> = self.path.iter().map(|p| p.index).collect();
        f.debug_tuple("Cursor").field(&indices).finish()
    }
}

/// Iterator over `(word, shortest_unique_prefix)` pairs in ascending order.
pub struct Iter<'a, C: Symbol> {
    front: Cursor<'a, C>,
    back: Cursor<'a, C>,
    remaining: usize,
}

impl<'a, C: Symbol> Iter<'a, C> {
    pub(crate) fn new(tree: &'a RadixTree<C>) -> Self {
        Self {
            front: tree.begin(),
            back: tree.end(),
            remaining: tree.len(),
        }
    }
}

impl<C: Symbol> Iterator for Iter<'_, C> {
    type Item = Entry<C>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.front.take().ok()?;
        self.front.advance();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<C: Symbol> DoubleEndedIterator for Iter<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.retreat();
        self.remaining -= 1;
        self.back.take().ok()
    }
}

impl<C: Symbol> ExactSizeIterator for Iter<'_, C> {}

impl<C: Symbol> FusedIterator for Iter<'_, C> {}
