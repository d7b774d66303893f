//! High-level estimator tying the pipeline stages together.
//!
//! [`AnchorTopics`] runs cooccurrence accumulation, anchor selection, and
//! topic recovery as one fit, holds the fitted artifacts, and offers small
//! inspection helpers on top of them. Fitted models serialize with serde,
//! so a trained topic matrix can be stored and reloaded without refitting.

use serde::{Deserialize, Serialize};

use crate::anchors::{AnchorSelector, AnchorSet};
use crate::cooccurrence::build_cooccurrence;
use crate::corpus::{Corpus, Vocabulary};
use crate::error::{Result, TemarioError};
use crate::primitives::Matrix;
use crate::recover::{RecoveryDiagnostics, TopicRecoverer, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};

/// Anchor-word topic model.
///
/// Fits topic-word distributions by picking one anchor word per topic from
/// the corpus cooccurrence geometry and expressing every other word as a
/// mixture over the anchors. Unlike sampling-based topic models the fit is
/// deterministic for a fixed random seed, and the seed only matters when
/// random projection is enabled.
///
/// # Examples
///
/// ```
/// use temario::corpus::Corpus;
/// use temario::model::AnchorTopics;
///
/// let corpus = Corpus::from_documents(vec![
///     vec!["sun", "moon", "sun"],
///     vec!["moon", "tide"],
///     vec!["tide", "wave", "tide"],
/// ]);
///
/// let mut model = AnchorTopics::new(2);
/// model.fit(&corpus)?;
///
/// let topics = model.topic_word()?;
/// assert_eq!(topics.shape(), (2, 4));
/// let anchors = model.anchor_words(corpus.vocabulary())?;
/// assert_eq!(anchors.len(), 2);
/// # Ok::<(), temario::TemarioError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorTopics {
    /// Number of topics, one anchor word each.
    n_topics: usize,
    /// Minimum document frequency a word needs to be an anchor candidate.
    doc_threshold: Option<usize>,
    /// Target dimension for random projection during anchor selection.
    projection_dim: Option<usize>,
    /// Duality-gap tolerance for the per-word recovery solves.
    tolerance: f64,
    /// Trial-step budget for each per-word solve.
    max_iter: usize,
    /// Seed for the projection directions.
    random_seed: u64,
    cooccurrence: Option<Matrix<f64>>,
    anchors: Option<AnchorSet>,
    topic_word: Option<Matrix<f64>>,
    diagnostics: Option<RecoveryDiagnostics>,
}

impl AnchorTopics {
    /// Creates an unfitted model with `n_topics` topics.
    ///
    /// Anchor candidates default to the whole vocabulary, projection is off,
    /// and the recovery solver uses its default tolerance and budget.
    #[must_use]
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            doc_threshold: None,
            projection_dim: None,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
            random_seed: 42,
            cooccurrence: None,
            anchors: None,
            topic_word: None,
            diagnostics: None,
        }
    }

    /// Restricts anchor candidates to words in more than `threshold`
    /// documents.
    #[must_use]
    pub fn with_doc_threshold(mut self, threshold: usize) -> Self {
        self.doc_threshold = Some(threshold);
        self
    }

    /// Projects cooccurrence rows to `dim` dimensions before the anchor
    /// walk. A dimension of zero leaves projection disabled.
    #[must_use]
    pub fn with_projection_dim(mut self, dim: usize) -> Self {
        self.projection_dim = Some(dim);
        self
    }

    /// Sets the duality-gap tolerance for the recovery solves.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the per-word trial-step budget for the recovery solves.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seeds the random projection directions.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Fits the model: accumulates cooccurrence counts, selects anchors,
    /// and recovers the topic-word matrix.
    ///
    /// Refitting on a new corpus replaces all fitted state.
    ///
    /// # Errors
    ///
    /// Returns [`TemarioError::InvalidHyperparameter`] when `n_topics` is
    /// zero, an error for an empty vocabulary, and
    /// [`TemarioError::InsufficientAnchorCandidates`] when the corpus
    /// cannot supply `n_topics` distinct anchor directions.
    pub fn fit(&mut self, corpus: &Corpus) -> Result<()> {
        if self.n_topics == 0 {
            return Err(TemarioError::InvalidHyperparameter {
                param: "n_topics".to_string(),
                value: "0".to_string(),
                constraint: "at least 1".to_string(),
            });
        }
        if corpus.vocab_size() == 0 {
            return Err(TemarioError::empty_input("corpus vocabulary"));
        }

        let cooccurrence = build_cooccurrence(corpus);

        let mut selector = AnchorSelector::new(self.n_topics).with_random_seed(self.random_seed);
        if let Some(threshold) = self.doc_threshold {
            selector = selector.with_doc_threshold(threshold);
        }
        if let Some(dim) = self.projection_dim {
            selector = selector.with_projection_dim(dim);
        }
        let anchors = selector.select(&cooccurrence, corpus)?;

        let recovered = TopicRecoverer::new()
            .with_tolerance(self.tolerance)
            .with_max_iter(self.max_iter)
            .recover(&cooccurrence, &anchors)?;

        self.cooccurrence = Some(cooccurrence);
        self.anchors = Some(anchors);
        self.topic_word = Some(recovered.topic_word);
        self.diagnostics = Some(recovered.diagnostics);
        Ok(())
    }

    /// Number of topics this model was configured with.
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    /// Whether `fit` has completed successfully.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.topic_word.is_some()
    }

    /// Fitted cooccurrence matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted.
    pub fn cooccurrence(&self) -> Result<&Matrix<f64>> {
        self.cooccurrence.as_ref().ok_or_else(Self::not_fitted)
    }

    /// Fitted anchor set.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted.
    pub fn anchors(&self) -> Result<&AnchorSet> {
        self.anchors.as_ref().ok_or_else(Self::not_fitted)
    }

    /// Fitted K x V topic-word matrix; row `t` is topic `t`'s distribution
    /// over the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted.
    pub fn topic_word(&self) -> Result<&Matrix<f64>> {
        self.topic_word.as_ref().ok_or_else(Self::not_fitted)
    }

    /// Convergence diagnostics from the recovery stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted.
    pub fn diagnostics(&self) -> Result<&RecoveryDiagnostics> {
        self.diagnostics.as_ref().ok_or_else(Self::not_fitted)
    }

    /// The anchor word chosen for each topic, in topic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted or if `vocabulary`
    /// does not cover the fitted anchor indices.
    pub fn anchor_words<'a>(&self, vocabulary: &'a Vocabulary) -> Result<Vec<&'a str>> {
        let anchors = self.anchors()?;
        anchors
            .indices
            .iter()
            .map(|&w| {
                vocabulary.token(w).ok_or_else(|| TemarioError::DimensionMismatch {
                    expected: format!("vocabulary covering word id {w}"),
                    actual: format!("{} tokens", vocabulary.len()),
                })
            })
            .collect()
    }

    /// The `n` highest-probability words per topic, with probabilities,
    /// sorted descending.
    ///
    /// # Arguments
    ///
    /// * `vocabulary` - The vocabulary the model was fitted on.
    /// * `n` - How many words to report per topic.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been fitted or if `vocabulary`
    /// has a different size than the fitted topic matrix.
    pub fn top_words(&self, vocabulary: &Vocabulary, n: usize) -> Result<Vec<Vec<(String, f64)>>> {
        let topic_word = self.topic_word()?;
        let (k, v) = topic_word.shape();
        if vocabulary.len() != v {
            return Err(TemarioError::DimensionMismatch {
                expected: format!("{v} tokens"),
                actual: format!("{} tokens", vocabulary.len()),
            });
        }

        let tokens = vocabulary.tokens();
        let mut per_topic = Vec::with_capacity(k);
        for t in 0..k {
            let mut ranked: Vec<(String, f64)> = topic_word
                .row_slice(t)
                .iter()
                .enumerate()
                .map(|(w, &p)| (tokens[w].clone(), p))
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            ranked.truncate(n);
            per_topic.push(ranked);
        }
        Ok(per_topic)
    }

    fn not_fitted() -> TemarioError {
        TemarioError::NotFitted
    }
}
