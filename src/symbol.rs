//! Symbol types and the narrow-to-native encoding boundary.
//!
//! A [`RadixTree`](crate::RadixTree) stores words as sequences of symbols.
//! Two symbol types are provided:
//!
//! - `u8`: narrow symbols. Input bytes are stored as-is and words come back
//!   as `Vec<u8>`.
//! - `char`: wide symbols. Narrow input is decoded from UTF-8 into code
//!   points before it touches the tree, and words come back as `String`.

use std::fmt;

use crate::error::Result;

/// A symbol the tree can be keyed by.
pub trait Symbol: Copy + Ord + fmt::Debug {
    /// Owned rendering of a symbol sequence, as handed out by cursors.
    type Text: Clone + Eq + Ord + fmt::Debug;

    /// Decode narrow input into native symbols.
    ///
    /// Must not have side effects: callers rely on a failed decode leaving
    /// everything untouched.
    fn decode(bytes: &[u8]) -> Result<Vec<Self>>;

    /// Convert a Rust string into native symbols. Never fails.
    fn from_text(s: &str) -> Vec<Self>;

    /// Collect a symbol sequence into its owned text form.
    fn to_text(symbols: &[Self]) -> Self::Text;

    /// Write a human-readable form of `symbols`.
    fn write_symbols<W: fmt::Write>(symbols: &[Self], out: &mut W) -> fmt::Result;
}

impl Symbol for u8 {
    type Text = Vec<u8>;

    #[inline]
    fn decode(bytes: &[u8]) -> Result<Vec<Self>> {
        Ok(bytes.to_vec())
    }

    #[inline]
    fn from_text(s: &str) -> Vec<Self> {
        s.as_bytes().to_vec()
    }

    #[inline]
    fn to_text(symbols: &[Self]) -> Self::Text {
        symbols.to_vec()
    }

    fn write_symbols<W: fmt::Write>(symbols: &[Self], out: &mut W) -> fmt::Result {
        // Labels may end in the middle of a multi-byte sequence.
        write!(out, "{}", symbols.escape_ascii())
    }
}

impl Symbol for char {
    type Text = String;

    fn decode(bytes: &[u8]) -> Result<Vec<Self>> {
        let s = std::str::from_utf8(bytes)?;
        Ok(s.chars().collect())
    }

    #[inline]
    fn from_text(s: &str) -> Vec<Self> {
        s.chars().collect()
    }

    #[inline]
    fn to_text(symbols: &[Self]) -> Self::Text {
        symbols.iter().collect()
    }

    fn write_symbols<W: fmt::Write>(symbols: &[Self], out: &mut W) -> fmt::Result {
        symbols.iter().try_for_each(|&c| out.write_char(c))
    }
}

/// Length of the longest common prefix of `a` and `b`.
#[inline]
pub(crate) fn common_prefix_len<C: PartialEq>(a: &[C], b: &[C]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
