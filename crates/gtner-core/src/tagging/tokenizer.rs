//! # Rule-based Tokenizer
//!
//! Splits document text into word tokens for span alignment. Whitespace
//! separates tokens and never becomes a token itself; a line break in the
//! whitespace marks the next token as the start of a new sentence. Leading and
//! trailing punctuation is split into tokens of its own.
//!
//! Token offsets are measured in characters, the unit used by augmented
//! manifest entity offsets.

use regex::Regex;

use crate::error::Result;

/// A token with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, verbatim from the source.
    pub text: String,
    /// Start position in the source, in characters.
    pub start: usize,
    /// End position in the source (exclusive), in characters.
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
    /// A line break separates this token from the previous one.
    pub sentence_start: bool,
}

/// Anything that can split text into [`Token`]s.
///
/// Implementations must return tokens in source order with non-overlapping
/// character offsets.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

const PREFIXES: &[char] = &[
    '"', '\'', '(', '[', '{', '<', '«', '“', '‘', '¿', '¡', '$', '£', '€', '#', '*', '`',
];

const SUFFIXES: &[char] = &[
    '"', '\'', ')', ']', '}', '>', '»', '”', '’', '.', ',', ';', ':', '!', '?', '%', '*', '…',
];

/// Whitespace-and-punctuation tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Result<Self> {
        Ok(Self {
            word: Regex::new(r"\S+")?,
        })
    }

    /// Split one whitespace-free chunk into `(char_start, char_end)` pieces,
    /// relative to the chunk.
    fn split_chunk(chunk: &str) -> Vec<(usize, usize)> {
        let chars: Vec<char> = chunk.chars().collect();
        let mut lo = 0;
        let mut hi = chars.len();
        let mut head = Vec::new();
        let mut tail = Vec::new();

        while lo < hi && PREFIXES.contains(&chars[lo]) {
            head.push((lo, lo + 1));
            lo += 1;
        }
        while hi > lo && SUFFIXES.contains(&chars[hi - 1]) {
            // Keep the period of abbreviations such as "U.S." or "e.g."
            if chars[hi - 1] == '.' && chars[lo..hi - 1].contains(&'.') {
                break;
            }
            tail.push((hi - 1, hi));
            hi -= 1;
        }

        if lo < hi {
            head.push((lo, hi));
        }
        head.extend(tail.into_iter().rev());
        head
    }
}

impl Tokenize for Tokenizer {
    /// # Examples
    /// ```
    /// use gtner_core::tagging::{Tokenize, Tokenizer};
    ///
    /// let tokenizer = Tokenizer::new().unwrap();
    /// let tokens = tokenizer.tokenize("Hello, world!");
    /// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["Hello", ",", "world", "!"]);
    /// ```
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut byte_pos = 0;
        let mut char_pos = 0;

        for m in self.word.find_iter(text) {
            let gap = &text[byte_pos..m.start()];
            char_pos += gap.chars().count();
            let mut line_break = gap.contains('\n') && !tokens.is_empty();

            let chunk = m.as_str();
            for (lo, hi) in Self::split_chunk(chunk) {
                let piece: String = chunk.chars().skip(lo).take(hi - lo).collect();
                tokens.push(Token {
                    text: piece,
                    start: char_pos + lo,
                    end: char_pos + hi,
                    index: tokens.len(),
                    sentence_start: line_break,
                });
                line_break = false;
            }

            char_pos += chunk.chars().count();
            byte_pos = m.end();
        }

        tokens
    }
}
