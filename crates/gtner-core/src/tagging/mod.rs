pub mod align;
pub mod scheme;
pub mod tokenizer;

pub use align::biluo_tags;
pub use scheme::{Prefix, Tag, TagScheme, bio_char};
pub use tokenizer::{Token, Tokenize, Tokenizer};
