//! Integration tests for the temario topic recovery pipeline.
//!
//! These tests verify end-to-end workflows combining the corpus, anchor
//! selection, and recovery components.

use temario::prelude::*;
use temario::TemarioError;

/// Two disjoint word groups. The cooccurrence matrix is block diagonal, so
/// anchor selection must pick one word from each block.
fn two_block_corpus() -> Corpus {
    Corpus::from_documents(vec![
        vec!["stars", "galaxy", "orbit"],
        vec!["galaxy", "stars"],
        vec!["orbit", "stars", "galaxy"],
        vec!["flour", "oven", "dough"],
        vec!["oven", "flour"],
        vec!["dough", "oven", "flour"],
    ])
}

#[test]
fn test_anchor_topics_workflow() {
    let corpus = two_block_corpus();

    let mut model = AnchorTopics::new(2);
    model.fit(&corpus).expect("Failed to fit anchor topics");

    assert!(model.is_fitted());
    let topic_word = model.topic_word().expect("fitted model has topics");
    assert_eq!(topic_word.shape(), (2, 6));

    // Each topic row is a distribution over the vocabulary.
    for t in 0..2 {
        let row = topic_word.row_slice(t);
        let total: f64 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "topic {t} sums to {total}");
        assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    // One anchor per block, ties broken by vocabulary order.
    let anchor_words = model
        .anchor_words(corpus.vocabulary())
        .expect("fitted model has anchors");
    assert_eq!(anchor_words, vec!["stars", "flour"]);

    // The top words of each topic stay inside its block.
    let top = model.top_words(corpus.vocabulary(), 3).expect("fitted model");
    let topic0: Vec<&str> = top[0].iter().map(|(w, _)| w.as_str()).collect();
    let topic1: Vec<&str> = top[1].iter().map(|(w, _)| w.as_str()).collect();
    for word in ["stars", "galaxy", "orbit"] {
        assert!(topic0.contains(&word), "topic 0 missing {word}: {topic0:?}");
    }
    for word in ["flour", "oven", "dough"] {
        assert!(topic1.contains(&word), "topic 1 missing {word}: {topic1:?}");
    }

    let diagnostics = model.diagnostics().expect("fitted model");
    assert_eq!(diagnostics.converged_words, 6);
    assert_eq!(diagnostics.fallback_words, 0);
}

#[test]
fn test_chain_corpus_end_to_end() {
    // Four words in a chain: a-b, b-c, c-d. Every pairing statistic and the
    // final topic matrix are small enough to check by hand.
    let corpus = Corpus::from_documents(vec![vec!["a", "b"], vec!["b", "c"], vec!["c", "d"]]);

    let q = build_cooccurrence(&corpus);
    assert_eq!(q.shape(), (4, 4));
    for (i, j) in [(0, 1), (1, 2), (2, 3)] {
        assert!((q.get(i, j) - 1.0 / 6.0).abs() < 1e-12);
        assert!((q.get(j, i) - 1.0 / 6.0).abs() < 1e-12);
    }
    for i in 0..4 {
        assert_eq!(q.get(i, i), 0.0);
    }

    let mut model = AnchorTopics::new(2);
    model.fit(&corpus).expect("Failed to fit chain corpus");

    // The chain's endpoints are the extreme rows.
    assert_eq!(model.anchors().expect("fitted").indices, vec![0, 3]);
    assert_eq!(
        model.anchor_words(corpus.vocabulary()).expect("fitted"),
        vec!["a", "d"]
    );

    // Topic rows worked out from the anchor decomposition of each word and
    // the word marginals (1/6, 1/3, 1/3, 1/6). The anchor words themselves
    // sit at simplex corners the solver approaches but never hits exactly.
    let expected = [
        [1.0 / 3.0, 1.0 / 6.0, 1.0 / 2.0, 0.0],
        [0.0, 1.0 / 2.0, 1.0 / 6.0, 1.0 / 3.0],
    ];
    let topic_word = model.topic_word().expect("fitted");
    for t in 0..2 {
        for w in 0..4 {
            let got = topic_word.get(t, w);
            assert!(
                (got - expected[t][w]).abs() < 1e-4,
                "topic {t} word {w}: got {got}, expected {}",
                expected[t][w]
            );
        }
    }
}

#[test]
fn test_staged_and_model_pipelines_agree() {
    // Running the stages by hand must hit the exact same numbers as the
    // estimator, which only wires them together.
    let corpus = two_block_corpus();

    let q = build_cooccurrence(&corpus);
    let anchors = AnchorSelector::new(2)
        .select(&q, &corpus)
        .expect("block corpus supports 2 anchors");
    let staged = TopicRecoverer::new()
        .recover(&q, &anchors)
        .expect("recovery succeeds");

    let mut model = AnchorTopics::new(2);
    model.fit(&corpus).expect("Failed to fit anchor topics");

    assert_eq!(model.cooccurrence().expect("fitted"), &q);
    assert_eq!(model.anchors().expect("fitted").indices, anchors.indices);
    assert_eq!(model.topic_word().expect("fitted"), &staged.topic_word);
}

#[test]
fn test_degenerate_documents_leave_fit_unchanged() {
    // Empty and single-token documents carry no pair statistics, so adding
    // them must not move a single bit of the output.
    let base = two_block_corpus();
    let padded = Corpus::from_documents(vec![
        vec!["stars", "galaxy", "orbit"],
        vec!["galaxy", "stars"],
        vec!["orbit", "stars", "galaxy"],
        vec![],
        vec!["flour", "oven", "dough"],
        vec!["oven", "flour"],
        vec!["stars"],
        vec!["dough", "oven", "flour"],
        vec![],
    ]);
    assert_eq!(base.vocab_size(), padded.vocab_size());

    assert_eq!(build_cooccurrence(&base), build_cooccurrence(&padded));

    let mut on_base = AnchorTopics::new(2);
    on_base.fit(&base).expect("Failed to fit base corpus");
    let mut on_padded = AnchorTopics::new(2);
    on_padded.fit(&padded).expect("Failed to fit padded corpus");

    assert_eq!(
        on_base.topic_word().expect("fitted"),
        on_padded.topic_word().expect("fitted")
    );
}

#[test]
fn test_single_topic_recovers_word_marginals() {
    // With one topic every word's mixture is pinned at 1, so the topic is
    // exactly the normalized word marginal distribution.
    let corpus = Corpus::from_documents(vec![vec!["a", "b"], vec!["b", "c"]]);

    let mut model = AnchorTopics::new(1);
    model.fit(&corpus).expect("Failed to fit single topic");

    let topic_word = model.topic_word().expect("fitted");
    assert_eq!(topic_word.shape(), (1, 3));
    let expected = [0.25, 0.5, 0.25];
    for w in 0..3 {
        assert!(
            (topic_word.get(0, w) - expected[w]).abs() < 1e-12,
            "word {w}: got {}, expected {}",
            topic_word.get(0, w),
            expected[w]
        );
    }

    // "a" and "c" match the anchor profile exactly and fit with zero
    // residual. "b" cannot be expressed by the single anchor, so its step
    // collapses while the mixture stays pinned; the output is unaffected.
    let diagnostics = model.diagnostics().expect("fitted");
    assert_eq!(diagnostics.converged_words, 2);
    assert_eq!(diagnostics.collapsed_words, 1);
    assert_eq!(diagnostics.fallback_words, 0);
}

#[test]
fn test_all_short_documents_cannot_support_anchors() {
    // Nothing ever cooccurs, so there is no usable anchor candidate and the
    // pipeline reports exactly how short it fell.
    let corpus = Corpus::from_documents(vec![vec!["a"], vec!["b"], vec!["c"]]);

    let mut model = AnchorTopics::new(2);
    let err = model.fit(&corpus).expect_err("zero matrix has no anchors");
    assert_eq!(
        err,
        TemarioError::InsufficientAnchorCandidates {
            needed: 2,
            available: 0,
        }
    );
    assert!(!model.is_fitted());
}

#[test]
fn test_document_threshold_excludes_rare_words() {
    // "x" and "y" appear in one document each. Without the threshold their
    // isolated block wins an anchor; with it only the common words remain.
    let corpus = Corpus::from_documents(vec![
        vec!["x", "y"],
        vec!["p", "q"],
        vec!["p", "q"],
        vec!["q", "p"],
    ]);

    let mut unfiltered = AnchorTopics::new(2);
    unfiltered.fit(&corpus).expect("Failed to fit unfiltered");
    let unfiltered_anchors = unfiltered
        .anchor_words(corpus.vocabulary())
        .expect("fitted");
    assert!(unfiltered_anchors.contains(&"x") || unfiltered_anchors.contains(&"y"));

    let mut filtered = AnchorTopics::new(2).with_doc_threshold(1);
    filtered.fit(&corpus).expect("Failed to fit filtered");
    assert_eq!(
        filtered.anchor_words(corpus.vocabulary()).expect("fitted"),
        vec!["p", "q"]
    );
}

#[test]
fn test_projection_workflow_preserves_shapes() {
    // Projection changes the geometry the walk sees, never the outputs'
    // shapes or the distribution constraints.
    let corpus = Corpus::from_documents(vec![
        vec!["a1", "a2", "a3", "a4", "a5", "a6"],
        vec!["a2", "a4", "a6", "a1"],
        vec!["a3", "a5", "a1", "a2"],
        vec!["b1", "b2", "b3", "b4", "b5", "b6"],
        vec!["b2", "b4", "b6", "b1"],
        vec!["b3", "b5", "b1", "b2"],
    ]);

    let mut model = AnchorTopics::new(2)
        .with_projection_dim(8)
        .with_random_seed(7);
    model.fit(&corpus).expect("Failed to fit projected model");

    let topic_word = model.topic_word().expect("fitted");
    assert_eq!(topic_word.shape(), (2, 12));
    for t in 0..2 {
        let total: f64 = topic_word.row_slice(t).iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    let anchors = model.anchors().expect("fitted");
    assert_eq!(anchors.indices.len(), 2);
    assert_ne!(anchors.indices[0], anchors.indices[1]);
    // Profiles are rows of the original matrix regardless of projection.
    assert_eq!(anchors.profiles.shape(), (2, 12));
}
