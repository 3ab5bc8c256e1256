//! # Sentence Splitting
//!
//! Groups tagged-token lines into sentences and partitions them into train
//! and test sets. Input must not contain `-DOCSTART-` markers.

use std::io::{self, Write};

/// Split group of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitGroup {
    Train,
    Test,
}

impl SplitGroup {
    /// Group of the `index`-th sentence: the first two of every three go to
    /// train, the third to test.
    pub fn for_sentence(index: usize) -> Self {
        if index % 3 < 2 {
            SplitGroup::Train
        } else {
            SplitGroup::Test
        }
    }

    /// Numeric group id: 0 for train, 1 for test.
    pub fn index(self) -> usize {
        match self {
            SplitGroup::Train => 0,
            SplitGroup::Test => 1,
        }
    }
}

/// A sentence and the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord {
    pub group: SplitGroup,
    pub sentence: Vec<String>,
}

/// Iterator over the sentences of a tagged-token stream.
pub struct Sentences<I> {
    lines: I,
    done: bool,
}

impl<I, S> Iterator for Sentences<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut sentence = Vec::new();
        for line in self.lines.by_ref() {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                if sentence.is_empty() {
                    continue;
                }
                return Some(sentence);
            }
            sentence.push(line.to_string());
        }

        // Don't forget the last sentence still in the buffer.
        self.done = true;
        (!sentence.is_empty()).then_some(sentence)
    }
}

/// Group lines into sentences on blank lines.
///
/// Runs of blank lines do not produce empty sentences. Leading blank lines
/// and extra separators are dropped too, so a stray blank line never takes a
/// slot in the train/test rotation of [`split`].
pub fn sentences<I>(lines: I) -> Sentences<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Sentences {
        lines: lines.into_iter(),
        done: false,
    }
}

/// Assign every sentence of `lines` to a split group. Sentences are counted
/// after empty ones are dropped, see [`sentences`].
pub fn split<I>(lines: I) -> impl Iterator<Item = SplitRecord>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    sentences(lines)
        .enumerate()
        .map(|(i, sentence)| SplitRecord {
            group: SplitGroup::for_sentence(i),
            sentence,
        })
}

/// Write each record to the writer of its group, sentences separated by one
/// blank line. Returns `(train, test)` sentence counts.
pub fn write_split<I, W0, W1>(records: I, train: &mut W0, test: &mut W1) -> io::Result<(usize, usize)>
where
    I: IntoIterator<Item = SplitRecord>,
    W0: Write,
    W1: Write,
{
    let mut counts = (0, 0);
    for record in records {
        let out: &mut dyn Write = match record.group {
            SplitGroup::Train => {
                counts.0 += 1;
                &mut *train
            }
            SplitGroup::Test => {
                counts.1 += 1;
                &mut *test
            }
        };
        // 1x \n for the last token, and 1x \n as a sentence separator
        write!(out, "{}\n\n", record.sentence.join("\n"))?;
    }
    train.flush()?;
    test.flush()?;
    Ok(counts)
}
