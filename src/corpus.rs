//! Streaming reader for CoNLL-style column corpora
//!
//! One token per line with whitespace separated columns: the word first,
//! the label last and any columns in between (POS, chunk, ...) kept with the
//! token. Blank lines end a sentence and `-DOCSTART-` lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bstr::ByteSlice;

use crate::error::{Error, Result};

const DOCSTART: &str = "-DOCSTART-";

/// One observation of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// Columns between the word and the label
    pub columns: Vec<String>,
}

impl Token {
    pub fn new<W: Into<String>>(word: W) -> Self {
        Self {
            word: word.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_columns<W, I, C>(word: W, columns: I) -> Self
    where
        W: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            word: word.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The first middle column, the POS tag in CoNLL 2002/2003 data
    pub fn pos(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }
}

/// A labeled sentence as read from the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub labels: Vec<String>,
    pub tokens: Vec<Token>,
    /// Raw lines of the entry, without line terminators
    pub raw: Vec<String>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Lazy, single-pass iterator over the sentences of a corpus
pub struct ConllReader<R> {
    reader: R,
    path: PathBuf,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

/// Open `path` for streaming; the file is read as sentences are pulled
pub fn read_conll<P: AsRef<Path>>(path: P) -> Result<ConllReader<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ConllReader::new(BufReader::new(file), path))
}

impl<R: BufRead> ConllReader<R> {
    /// Wrap a reader; `path` is only used in error messages
    pub fn new<P: Into<PathBuf>>(reader: R, path: P) -> Self {
        Self {
            reader,
            path: path.into(),
            line_no: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    fn next_sentence(&mut self) -> Result<Option<Sentence>> {
        let mut sentence = Sentence {
            labels: Vec::new(),
            tokens: Vec::new(),
            raw: Vec::new(),
        };

        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| Error::Io {
                    path: self.path.clone(),
                    source,
                })?;
            if n == 0 {
                self.done = true;
                break;
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                if sentence.is_empty() {
                    continue;
                }
                break;
            }

            let fields: Vec<String> = line
                .fields()
                .map(|f| f.to_str_lossy().into_owned())
                .collect();
            if fields[0] == DOCSTART {
                continue;
            }
            if fields.len() < 2 {
                return Err(Error::MalformedCorpus {
                    path: self.path.clone(),
                    line: self.line_no,
                    content: line.to_str_lossy().into_owned(),
                });
            }

            sentence.raw.push(line.to_str_lossy().into_owned());
            let mut fields = fields.into_iter();
            let word = fields.next().unwrap_or_default();
            let mut columns: Vec<String> = fields.collect();
            let label = columns.pop().unwrap_or_default();
            sentence.tokens.push(Token { word, columns });
            sentence.labels.push(label);
        }

        Ok(if sentence.is_empty() {
            None
        } else {
            Some(sentence)
        })
    }
}

impl<R: BufRead> Iterator for ConllReader<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_sentence() {
            Ok(Some(sentence)) => Some(Ok(sentence)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Vec<Result<Sentence>> {
        ConllReader::new(text.as_bytes(), "test.conll").collect()
    }

    #[test]
    fn test_reads_sentences() {
        let text = "-DOCSTART- -X- O\n\nMelbourne NP B-LOC\n( Fpa O\nAustralia NP B-LOC\n\n\nEl DA O\nAbogado NC B-PER\n";
        let sentences: Vec<Sentence> = read(text).into_iter().map(|s| s.unwrap()).collect();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].labels, vec!["B-LOC", "O", "B-LOC"]);
        assert_eq!(sentences[0].tokens[0], Token::with_columns("Melbourne", ["NP"]));
        assert_eq!(sentences[0].raw[1], "( Fpa O");
        assert_eq!(sentences[1].tokens[1].word, "Abogado");
        assert_eq!(sentences[1].tokens[1].pos(), Some("NC"));
    }

    #[test]
    fn test_two_column_and_tab_separated() {
        let text = "John\tB-PER\r\nsmiled\tO\r\n";
        let sentences: Vec<Sentence> = read(text).into_iter().map(|s| s.unwrap()).collect();

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].tokens[1], Token::new("smiled"));
        assert_eq!(sentences[0].tokens[1].pos(), None);
        assert_eq!(sentences[0].labels, vec!["B-PER", "O"]);
    }

    #[test]
    fn test_malformed_line_stops_iteration() {
        let results = read("Madrid B-LOC\nbroken\n\nParis B-LOC\n");
        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(Error::MalformedCorpus { line, content, .. }) => {
                assert_eq!(*line, 2);
                assert_eq!(content, "broken");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(read("").is_empty());
        assert!(read("\n\n-DOCSTART- O\n\n").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_conll("/nonexistent/corpus.conll").err().unwrap();
        assert!(matches!(err, Error::Io { .. }));
    }
}
