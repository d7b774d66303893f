//! Corpus and vocabulary containers.
//!
//! The pipeline consumes documents as sequences of integer word types over a
//! finalized vocabulary. These types hold that boundary data: a stable
//! token/index mapping and the tokenized document collection.
//!
//! # Quick Start
//!
//! ```
//! use temario::corpus::Corpus;
//!
//! let corpus = Corpus::from_documents(vec![
//!     vec!["cat", "dog"],
//!     vec!["dog", "fish"],
//! ]);
//! assert_eq!(corpus.vocab_size(), 3);
//! assert_eq!(corpus.n_documents(), 2);
//! ```

use crate::error::{Result, TemarioError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered, deduplicated token set with stable integer indices.
///
/// Indices are assigned in first-seen order and never change once assigned.
///
/// # Examples
///
/// ```
/// use temario::corpus::Vocabulary;
///
/// let vocab = Vocabulary::from_tokens(["cat", "dog", "cat"]);
/// assert_eq!(vocab.len(), 2);
/// assert_eq!(vocab.id("dog"), Some(1));
/// assert_eq!(vocab.token(0), Some("cat"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vocabulary from an iterator of tokens, deduplicating in order.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::new();
        for token in tokens {
            vocabulary.add(token.as_ref());
        }
        vocabulary
    }

    /// Inserts a token if unseen and returns its stable index.
    pub fn add(&mut self, token: &str) -> usize {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), id);
        id
    }

    /// Returns the index of a token, if present.
    #[must_use]
    pub fn id(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Returns the token at an index, if in range.
    #[must_use]
    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    /// Returns all tokens in index order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the vocabulary has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A tokenized document collection over a shared vocabulary.
///
/// Each document is a sequence of word-type indices. Repeats are allowed and
/// order is preserved; the cooccurrence builder pairs distinct positions, not
/// distinct types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    vocabulary: Vocabulary,
    documents: Vec<Vec<usize>>,
}

impl Corpus {
    /// Creates a corpus from a finalized vocabulary and pre-tokenized documents.
    ///
    /// # Errors
    ///
    /// Returns an error if any document contains a token index outside the
    /// vocabulary.
    ///
    /// # Examples
    ///
    /// ```
    /// use temario::corpus::{Corpus, Vocabulary};
    ///
    /// let vocab = Vocabulary::from_tokens(["a", "b"]);
    /// let corpus = Corpus::new(vocab, vec![vec![0, 1], vec![1, 0, 1]]).expect("token ids are in range");
    /// assert_eq!(corpus.n_documents(), 2);
    /// ```
    pub fn new(vocabulary: Vocabulary, documents: Vec<Vec<usize>>) -> Result<Self> {
        let v = vocabulary.len();
        for (d, doc) in documents.iter().enumerate() {
            if let Some(&t) = doc.iter().find(|&&t| t >= v) {
                return Err(TemarioError::DimensionMismatch {
                    expected: format!("token ids below {v}"),
                    actual: format!("id {t} in document {d}"),
                });
            }
        }
        Ok(Self {
            vocabulary,
            documents,
        })
    }

    /// Builds a corpus and its vocabulary in one pass over string tokens.
    pub fn from_documents<I, D, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::new();
        let documents = documents
            .into_iter()
            .map(|doc| {
                doc.into_iter()
                    .map(|token| vocabulary.add(token.as_ref()))
                    .collect::<Vec<usize>>()
            })
            .collect();
        Self {
            vocabulary,
            documents,
        }
    }

    /// Returns the vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the documents as token-index sequences.
    #[must_use]
    pub fn documents(&self) -> &[Vec<usize>] {
        &self.documents
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.documents.len()
    }

    /// Returns the vocabulary size.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Counts, for every word type, the number of documents containing it at
    /// least once.
    #[must_use]
    pub fn document_frequencies(&self) -> Vec<usize> {
        let v = self.vocab_size();
        let mut counts = vec![0usize; v];
        let mut last_seen = vec![usize::MAX; v];
        for (d, doc) in self.documents.iter().enumerate() {
            for &t in doc {
                if last_seen[t] != d {
                    last_seen[t] = d;
                    counts[t] += 1;
                }
            }
        }
        counts
    }
}
