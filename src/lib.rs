//! # unique-prefix
//!
//! An ordered radix tree (compressed trie) of words. Iterating the tree
//! yields every word in ascending order together with its shortest unique
//! prefix: the word cut right after the point where its path leaves the
//! branches it shares with other stored words.
//!
//! ## Example
//!
//! ```rust
//! use unique_prefix::RadixTree;
//!
//! let mut tree: RadixTree<char> = RadixTree::new();
//! tree.insert_str("alek");
//! tree.insert_str("aleksey");
//! tree.insert_str("alesha");
//!
//! let pairs: Vec<(String, String)> = tree.iter().collect();
//! assert_eq!(pairs[0], ("alek".to_string(), "alek".to_string()));
//! assert_eq!(pairs[1], ("aleksey".to_string(), "aleks".to_string()));
//! assert_eq!(pairs[2], ("alesha".to_string(), "ales".to_string()));
//! ```
//!
//! Words are sequences of [`Symbol`]s: `u8` for byte strings, `char` for
//! Unicode text. [`RadixTree::insert_encoded`] decodes narrow (UTF-8) input
//! into the tree's symbol type before touching the tree.

mod cursor;
mod debug;
mod error;
mod node;
mod symbol;

pub use cursor::{Cursor, Entry, Iter};
pub use debug::Dump;
pub use error::{Error, Result};
pub use node::{Children, Node};
pub use symbol::Symbol;

/// An ordered set of words stored as a radix tree.
///
/// There is no synthetic root: the tree is an ordered set of top-level nodes
/// keyed by the first symbol of each word.
pub struct RadixTree<C> {
    roots: Children<C>,
    len: usize,
}

impl<C: Symbol> RadixTree<C> {
    pub fn new() -> Self {
        Self {
            roots: Children::new(),
            len: 0,
        }
    }

    /// Number of stored words.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a word. Empty words are ignored.
    ///
    /// Returns `true` if the word was not already stored. Any cursor over
    /// this tree must be dropped first; the borrow checker enforces it.
    pub fn insert(&mut self, word: &[C]) -> bool {
        if word.is_empty() {
            return false;
        }
        let added = self.roots.insert(word);
        if added {
            self.len += 1;
        }
        added
    }

    /// Insert a Rust string, converted to the tree's symbol type.
    pub fn insert_str(&mut self, word: &str) -> bool {
        self.insert(&C::from_text(word))
    }

    /// Decode narrow input and insert it.
    ///
    /// On [`Error::MalformedEncoding`] the tree is left untouched.
    pub fn insert_encoded(&mut self, bytes: &[u8]) -> Result<bool> {
        let word = C::decode(bytes).map_err(|err| {
            tracing::debug!(error = %err, len = bytes.len(), "rejecting malformed input");
            err
        })?;
        Ok(self.insert(&word))
    }

    /// Whether `word` was inserted.
    pub fn contains(&self, word: &[C]) -> bool {
        self.roots.find(word).is_some_and(|n| n.is_terminal())
    }

    /// Cursor at the smallest word; equals [`end`](Self::end) when empty.
    pub fn begin(&self) -> Cursor<'_, C> {
        Cursor::begin(self)
    }

    /// The past-the-end cursor. It cannot be dereferenced.
    pub fn end(&self) -> Cursor<'_, C> {
        Cursor::end(self)
    }

    /// Iterate `(word, shortest_unique_prefix)` pairs in ascending order.
    pub fn iter(&self) -> Iter<'_, C> {
        Iter::new(self)
    }

    /// Top-level nodes, for read-only walks over the structure.
    #[inline]
    pub fn roots(&self) -> &Children<C> {
        &self.roots
    }

    /// Render the node structure, see [`Dump`].
    pub fn dump(&self) -> Dump<'_, C> {
        Dump::new(&self.roots)
    }
}

impl<C: Symbol> Default for RadixTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Symbol> Clone for RadixTree<C> {
    fn clone(&self) -> Self {
        Self {
            roots: self.roots.clone(),
            len: self.len,
        }
    }
}

impl<C: Symbol> std::fmt::Debug for RadixTree<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<C: Symbol, W: AsRef<[C]>> Extend<W> for RadixTree<C> {
    fn extend<I: IntoIterator<Item = W>>(&mut self, words: I) {
        for word in words {
            self.insert(word.as_ref());
        }
    }
}

impl<C: Symbol, W: AsRef<[C]>> FromIterator<W> for RadixTree<C> {
    fn from_iter<I: IntoIterator<Item = W>>(words: I) -> Self {
        let mut tree = Self::new();
        tree.extend(words);
        tree
    }
}

impl<'a, C: Symbol> IntoIterator for &'a RadixTree<C> {
    type Item = Entry<C>;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod proptests;
