//! Building the pool of characters that passwords are drawn from.

use std::fmt;

use tracing::debug;

pub static LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
/// Symbols offered during generation, and recognised as "special characters" during analysis.
pub static SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";
/// Characters that are easily mistaken for one another in common fonts.
pub static AMBIGUOUS: &str = "il1LoO0";

/// An ordered pool of characters eligible for random selection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Charset(Vec<char>);

impl Charset {
    /// Letters are always included; digits and symbols are appended on request, and ambiguous
    /// characters are then filtered out of whatever was assembled.
    pub fn build(include_digits: bool, include_symbols: bool, exclude_ambiguous: bool) -> Charset {
        let mut chars = Vec::new();
        chars.extend(LETTERS.chars());
        if include_digits {
            chars.extend(DIGITS.chars());
        }
        if include_symbols {
            chars.extend(SYMBOLS.chars());
        }
        if exclude_ambiguous {
            chars.retain(|ch| !AMBIGUOUS.contains(*ch));
        }
        Charset(chars)
    }

    /// Use the caller's characters verbatim. Duplicates are kept, and weight the draw.
    pub fn custom(chars: &str) -> Charset {
        Charset(chars.chars().collect())
    }

    pub fn as_chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.0 {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// How to put a [`Charset`] together, as collected from the command line.
#[derive(Clone, Debug, Default)]
pub struct CharsetOptions {
    pub include_digits: bool,
    pub include_symbols: bool,
    pub exclude_ambiguous: bool,
    /// Overrides every flag above when present.
    pub custom: Option<String>,
}

impl CharsetOptions {
    pub fn resolve(&self) -> Charset {
        let charset = match self.custom.as_deref() {
            Some(custom) => Charset::custom(custom),
            None => Charset::build(
                self.include_digits,
                self.include_symbols,
                self.exclude_ambiguous,
            ),
        };
        debug!(
            size = charset.len(),
            custom = self.custom.is_some(),
            "resolved charset"
        );
        charset
    }
}
