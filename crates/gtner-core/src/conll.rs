//! # CoNLL-2003 Conversion
//!
//! Converts augmented manifest lines to the CoNLL-2003 layout: one
//! `token _ _ TAG` line per token, a blank line after each sentence, and a
//! blank line terminating each document.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{GtnerError, Result};
use crate::manifest::{DEFAULT_ATTR, EntityOrder, ManifestLine, entities};
use crate::tagging::{Tag, TagScheme, Tokenize, Tokenizer, biluo_tags};

/// Document marker emitted before each document when enabled.
pub const DOCSTART: &str = "-DOCSTART- -X- O O";

/// Configuration for the converter.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Tagging scheme name, e.g. `bilou` or `bio`. Validated at construction.
    pub codec: String,
    /// Whether to emit [`DOCSTART`] before each document.
    pub doc_sep: bool,
    /// Annotation attribute holding the entities.
    pub attr: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            codec: "bilou".to_string(),
            doc_sep: false,
            attr: DEFAULT_ATTR.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn with_doc_sep(mut self, enabled: bool) -> Self {
        self.doc_sep = enabled;
        self
    }

    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = attr.into();
        self
    }
}

/// Converts augmented manifest documents to CoNLL-2003 lines.
#[derive(Debug, Clone)]
pub struct Conll2003Converter<T = Tokenizer> {
    tokenizer: T,
    scheme: TagScheme,
    doc_sep: bool,
    attr: String,
}

impl Conll2003Converter<Tokenizer> {
    /// Create a converter using the built-in tokenizer.
    pub fn new(config: ConverterConfig) -> Result<Self> {
        Self::with_tokenizer(Tokenizer::new()?, config)
    }
}

impl<T: Tokenize> Conll2003Converter<T> {
    /// Create a converter with a caller-supplied tokenizer.
    ///
    /// Fails with [`GtnerError::UnsupportedCodec`] if the codec is neither
    /// BILOU nor BIO.
    pub fn with_tokenizer(tokenizer: T, config: ConverterConfig) -> Result<Self> {
        let scheme = config.codec.parse::<TagScheme>()?;
        Ok(Self {
            tokenizer,
            scheme,
            doc_sep: config.doc_sep,
            attr: config.attr,
        })
    }

    /// Tag every token of a document under the configured scheme.
    pub fn tag_document(&self, doc: &ManifestLine) -> Result<Vec<(String, bool, Tag)>> {
        let tokens = self.tokenizer.tokenize(doc.text());
        let spans = entities(doc, &self.attr, EntityOrder::ByStartOffset)?;
        let offsets: Vec<_> = spans.iter().map(|s| s.offsets()).collect();
        let tags = biluo_tags(&tokens, &offsets)?;

        Ok(tokens
            .into_iter()
            .zip(tags)
            .map(|(token, tag)| (token.text, token.sentence_start, tag.encode(self.scheme)))
            .collect())
    }

    /// Convert one document to output lines (without trailing newlines).
    ///
    /// A document without tokens produces no lines at all.
    pub fn convert_document(&self, doc: &ManifestLine) -> Result<Vec<String>> {
        let tagged = self.tag_document(doc)?;
        if tagged.is_empty() {
            return Ok(Vec::new());
        }
        let mut lines = Vec::with_capacity(tagged.len() + 3);

        if self.doc_sep {
            lines.push(DOCSTART.to_string());
            lines.push(String::new());
        }
        for (text, sentence_start, tag) in tagged {
            if sentence_start {
                lines.push(String::new());
            }
            // conll2003: word postag chunktag nerlabel
            lines.push(format!("{text} _ _ {tag}"));
        }
        lines.push(String::new());

        Ok(lines)
    }

    /// Parse and convert one JSON line.
    pub fn convert_line(&self, line: &str) -> Result<Vec<String>> {
        self.convert_document(&ManifestLine::parse(line)?)
    }

    /// Convert a whole manifest. Blank lines are skipped; the first failing
    /// line aborts the conversion.
    pub fn convert_manifest(&self, manifest: &str) -> Result<Vec<String>> {
        let mut out = Vec::new();
        for (idx, line) in manifest.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let lines = self.convert_line(line).map_err(|e| e.at_line(idx + 1))?;
            debug!(line = idx + 1, tokens = lines.len(), "converted document");
            out.extend(lines);
        }
        Ok(out)
    }

    /// Stream a manifest from `reader` to `writer`, returning the number of
    /// documents written.
    pub fn write_manifest<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<usize> {
        let mut documents = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let lines = self
                .convert_line(&line)
                .map_err(|e: GtnerError| e.at_line(idx + 1))?;
            for out in lines {
                writeln!(writer, "{out}")?;
            }
            documents += 1;
        }
        writer.flush()?;
        Ok(documents)
    }
}
