//! Debug utilities: tree dump and integrity checks.

use std::fmt;

use crate::node::{Children, Node};
use crate::symbol::Symbol;
use crate::RadixTree;

/// Indented rendering of the node structure, returned by [`RadixTree::dump`].
///
/// One node per line, two spaces of indentation per level, terminal nodes
/// suffixed with `$`:
///
/// ```text
/// ale
///   k$
///     s$
///       ey$
///   sha$
/// ```
pub struct Dump<'a, C> {
    roots: &'a Children<C>,
}

impl<'a, C: Symbol> Dump<'a, C> {
    pub(crate) fn new(roots: &'a Children<C>) -> Self {
        Self { roots }
    }

    fn write_node(f: &mut fmt::Formatter<'_>, node: &Node<C>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        C::write_symbols(node.label(), f)?;
        if node.is_terminal() {
            f.write_str("$")?;
        }
        writeln!(f)?;
        for child in node.children() {
            Self::write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl<C: Symbol> fmt::Display for Dump<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.roots.is_empty() {
            return writeln!(f, "(empty)");
        }
        for node in self.roots {
            Self::write_node(f, node, 0)?;
        }
        Ok(())
    }
}

impl<C: Symbol> RadixTree<C> {
    /// Verify tree integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut words = 0;
        Self::verify_siblings(self.roots(), &mut issues, &mut words, &mut Vec::new());
        if words != self.len() {
            issues.push(format!(
                "{} terminal nodes but len() = {}",
                words,
                self.len()
            ));
        }
        issues
    }

    fn verify_siblings(
        siblings: &Children<C>,
        issues: &mut Vec<String>,
        words: &mut usize,
        path: &mut Vec<C>,
    ) {
        let mut prev: Option<C> = None;
        for node in siblings {
            let Some(&key) = node.label().first() else {
                issues.push(format!("empty label below {:?}", path));
                continue;
            };
            if prev.is_some_and(|p| p >= key) {
                issues.push(format!(
                    "sibling keys out of order below {:?}: {:?} then {:?}",
                    path, prev, key
                ));
            }
            prev = Some(key);
            Self::verify_node(node, issues, words, path);
        }
    }

    fn verify_node(
        node: &Node<C>,
        issues: &mut Vec<String>,
        words: &mut usize,
        path: &mut Vec<C>,
    ) {
        let depth = path.len();
        path.extend_from_slice(node.label());

        let fanout = node.children().len();
        if node.is_terminal() {
            *words += 1;
        } else if fanout == 0 {
            issues.push(format!("non-terminal leaf at {:?}", path));
        } else if fanout == 1 {
            issues.push(format!("non-terminal node with a single child at {:?}", path));
        }

        Self::verify_siblings(node.children(), issues, words, path);
        path.truncate(depth);
    }
}
