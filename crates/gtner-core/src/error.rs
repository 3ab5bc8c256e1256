use thiserror::Error;

/// Errors that can occur while reading manifests and converting annotations.
#[derive(Debug, Error)]
pub enum GtnerError {
    /// A manifest line is not valid JSON, or does not match the expected shape.
    #[error("invalid manifest JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The requested annotation attribute is absent from the manifest line.
    #[error("manifest line has no attribute {attr:?}")]
    MissingAttribute {
        /// The attribute that was looked up.
        attr: String,
    },

    /// No top-level attribute of the manifest line carries `annotations`.
    #[error("manifest line has no annotation block")]
    MissingAnnotations,

    /// An entity label has no entry in the labels mapping.
    #[error("label {label:?} is not declared in the labels mapping")]
    UnknownLabel {
        /// The undeclared label.
        label: String,
    },

    /// An entity span is empty or reaches past the end of the source text.
    #[error("invalid span [{start}, {end}) for source of {len} characters")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// Two entity spans claim the same token.
    #[error("entity span [{start}, {end}) overlaps another entity")]
    OverlappingSpans { start: usize, end: usize },

    /// The metadata block does not carry one confidence per entity.
    #[error("{entities} entities but {scores} confidence scores")]
    ConfidenceMismatch { entities: usize, scores: usize },

    /// The requested tagging scheme is neither BILOU nor BIO.
    #[error("invalid codec: {0}")]
    UnsupportedCodec(String),

    /// An error raised while processing a specific manifest line (1-based).
    #[error("manifest line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<GtnerError>,
    },

    /// Reading or writing a stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a CSV record failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

impl GtnerError {
    /// Attach a 1-based manifest line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        GtnerError::Line {
            line,
            source: Box::new(self),
        }
    }
}

/// Result type alias for gtner operations.
pub type Result<T> = std::result::Result<T, GtnerError>;
