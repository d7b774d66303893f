//! Temario: anchor-word topic recovery in pure Rust.
//!
//! Temario estimates topic-word distributions from a tokenized corpus
//! without sampling. It accumulates a word cooccurrence matrix, picks one
//! anchor word per topic with a Gram-Schmidt farthest-point walk, and
//! recovers each topic as a distribution over the vocabulary from the
//! anchors alone. Fits are deterministic for a fixed seed.
//!
//! # Quick Start
//!
//! ```
//! use temario::prelude::*;
//!
//! // Three tiny documents over a four-word vocabulary.
//! let corpus = Corpus::from_documents(vec![
//!     vec!["sun", "moon"],
//!     vec!["moon", "tide"],
//!     vec!["tide", "wave"],
//! ]);
//!
//! let mut model = AnchorTopics::new(2);
//! model.fit(&corpus).unwrap();
//!
//! // One probability distribution over words per topic.
//! let topics = model.topic_word().unwrap();
//! assert_eq!(topics.shape(), (2, 4));
//! let anchors = model.anchor_words(corpus.vocabulary()).unwrap();
//! assert_eq!(anchors.len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`corpus`]: Vocabulary interning and tokenized documents
//! - [`cooccurrence`]: Cooccurrence matrix accumulation
//! - [`anchors`]: Gram-Schmidt anchor-word selection
//! - [`recover`]: Simplex-constrained topic recovery
//! - [`model`]: High-level [`model::AnchorTopics`] estimator

pub mod anchors;
pub mod cooccurrence;
pub mod corpus;
pub mod error;
pub mod model;
pub mod prelude;
pub mod primitives;
pub mod recover;

pub use error::{Result, TemarioError};
pub use primitives::{Matrix, Vector};
