//! Alignment of character-offset entity spans to token-level BILOU tags.

use std::collections::HashMap;

use tracing::warn;

use super::scheme::{Prefix, Tag};
use super::tokenizer::Token;
use crate::error::{GtnerError, Result};

/// Convert `(start, end, label)` character spans to one BILOU tag per token.
///
/// A span aligns when its start is the start of some token and its end is the
/// end of the same or a later token. Spans that do not align are dropped with
/// a warning and their tokens stay `O`. Two aligned spans sharing a token are
/// an error.
///
/// Tags follow the position of each token in `tokens`; [`Token::index`] is
/// not consulted.
pub fn biluo_tags(tokens: &[Token], spans: &[(usize, usize, &str)]) -> Result<Vec<Tag>> {
    let starts: HashMap<usize, usize> = tokens.iter().enumerate().map(|(i, t)| (t.start, i)).collect();
    let ends: HashMap<usize, usize> = tokens.iter().enumerate().map(|(i, t)| (t.end, i)).collect();
    let mut tags: Vec<Option<Tag>> = vec![None; tokens.len()];

    for &(start, end, label) in spans {
        let (first, last) = match (starts.get(&start), ends.get(&end)) {
            (Some(&first), Some(&last)) if first <= last => (first, last),
            _ => {
                warn!(start, end, label, "entity span does not align to token boundaries; dropped");
                continue;
            }
        };

        if tags[first..=last].iter().any(Option::is_some) {
            return Err(GtnerError::OverlappingSpans { start, end });
        }

        if first == last {
            tags[first] = Some(Tag::chunk(Prefix::Unit, label));
            continue;
        }
        tags[first] = Some(Tag::chunk(Prefix::Begin, label));
        for tag in &mut tags[first + 1..last] {
            *tag = Some(Tag::chunk(Prefix::Inside, label));
        }
        tags[last] = Some(Tag::chunk(Prefix::Last, label));
    }

    Ok(tags
        .into_iter()
        .map(|tag| tag.unwrap_or(Tag::Outside))
        .collect())
}
