//! Line-level tag utilities for `.iob` files.

use std::collections::BTreeSet;

use crate::tagging::bio_char;

/// Rewrite the BILOU tag of a tagged-token line as BIO.
///
/// The tag is the last space-separated field; only its first character is
/// remapped. Lines without a space (blank lines) pass through unchanged.
pub fn bilou_to_bio_line(line: &str) -> String {
    let Some(idx) = line.rfind(' ').map(|i| i + 1) else {
        return line.to_string();
    };
    let mut chars = line[idx..].chars();
    match chars.next() {
        Some(c) => format!("{}{}{}", &line[..idx], bio_char(c), chars.as_str()),
        None => line.to_string(),
    }
}

/// Collects the distinct tags seen in tagged-token lines.
#[derive(Debug, Clone, Default)]
pub struct LabelCollector {
    labels: BTreeSet<String>,
}

impl LabelCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tag of `line`, if it has one.
    pub fn observe(&mut self, line: &str) {
        let line = line.trim_end();
        if let Some(idx) = line.rfind(' ') {
            self.labels.insert(line[idx + 1..].to_string());
        }
    }

    /// Record the tags of every line.
    pub fn observe_all<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.observe(line.as_ref());
        }
    }

    /// Pass `lines` through unchanged, recording each tag as it goes by.
    pub fn tap<I>(&mut self, lines: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines.into_iter().inspect(move |line| self.observe(line.as_ref()))
    }

    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// The unique tags in sorted order.
    pub fn sorted_labels(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilou_to_bio_line() {
        assert_eq!(bilou_to_bio_line("York _ _ L-LOC"), "York _ _ I-LOC");
        assert_eq!(bilou_to_bio_line("Bob _ _ U-PER"), "Bob _ _ B-PER");
        assert_eq!(bilou_to_bio_line("New _ _ B-LOC"), "New _ _ B-LOC");
        assert_eq!(bilou_to_bio_line("is _ _ O"), "is _ _ O");
        assert_eq!(bilou_to_bio_line(""), "");
        assert_eq!(bilou_to_bio_line("trailing "), "trailing ");
    }

    #[test]
    fn test_bilou_to_bio_line_idempotent() {
        for line in ["a _ _ L-X", "a _ _ U-X", "a _ _ O"] {
            let once = bilou_to_bio_line(line);
            assert_eq!(bilou_to_bio_line(&once), once);
        }
    }

    #[test]
    fn test_label_collector() {
        let mut collector = LabelCollector::new();
        let lines = vec!["a _ _ O", "b _ _ B-PER", "", "c _ _ O", "d _ _ B-LOC "];
        collector.observe_all(&lines);
        assert_eq!(collector.sorted_labels(), ["B-LOC", "B-PER", "O"]);
        assert!(collector.labels().contains("O"));
    }

    #[test]
    fn test_tap_passes_lines_through() {
        let mut collector = LabelCollector::new();
        let lines = ["a _ _ O", "", "b _ _ U-PER"];
        let passed: Vec<&str> = collector.tap(lines).collect();
        assert_eq!(passed, lines);
        assert_eq!(collector.sorted_labels(), ["O", "U-PER"]);
    }
}
