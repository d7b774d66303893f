//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use temario::prelude::*;
//! ```

pub use crate::primitives::{Matrix, Vector};
pub use crate::corpus::{Corpus, Vocabulary};
pub use crate::cooccurrence::build_cooccurrence;
pub use crate::anchors::{AnchorSelector, AnchorSet};
pub use crate::recover::{RecoveredTopics, TopicRecoverer};
pub use crate::model::AnchorTopics;
