//! Anchor-based topic recovery example
//!
//! Builds a small three-topic corpus, recovers the topics through anchor
//! words, and shows the knobs that shape the fit.
//!
//! Run with:
//! ```bash
//! cargo run --example anchor_topics
//! ```

use temario::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Anchor Topic Recovery Example ===\n");

    // Example 1: Basic three-topic fit
    println!("--- Example 1: Three Topics from a Toy Corpus ---");

    let corpus = Corpus::from_documents(vec![
        // Astronomy
        vec!["orbit", "comet", "nebula", "comet"],
        vec!["nebula", "orbit", "comet"],
        vec!["comet", "nebula", "orbit"],
        // Baking
        vec!["flour", "dough", "oven", "flour"],
        vec!["oven", "flour", "dough"],
        vec!["dough", "oven", "flour"],
        // Sailing
        vec!["mast", "keel", "harbor", "keel"],
        vec!["harbor", "mast", "keel"],
        vec!["keel", "harbor", "mast"],
        // A little cross-topic noise
        vec!["orbit", "flour"],
        vec!["mast", "nebula"],
    ]);
    println!(
        "Corpus: {} documents, {} distinct words",
        corpus.n_documents(),
        corpus.vocab_size()
    );

    let mut model = AnchorTopics::new(3);
    model.fit(&corpus)?;

    let anchor_words = model.anchor_words(corpus.vocabulary())?;
    println!("Anchor words: {anchor_words:?}");

    println!("Top words per topic:");
    for (t, words) in model.top_words(corpus.vocabulary(), 3)?.iter().enumerate() {
        let formatted: Vec<String> = words
            .iter()
            .map(|(word, p)| format!("{word} ({p:.3})"))
            .collect();
        println!("  Topic {t}: {}", formatted.join(", "));
    }

    // Example 2: Document-frequency threshold
    println!("\n--- Example 2: Filtering Rare Anchor Candidates ---");
    println!("A word seen in a single document has an extreme, unreliable");
    println!("cooccurrence profile, which makes it a tempting anchor.\n");

    let with_rare = Corpus::from_documents(vec![
        vec!["orbit", "comet", "nebula", "comet"],
        vec!["nebula", "orbit", "comet"],
        vec!["comet", "nebula", "orbit"],
        vec!["flour", "dough", "oven", "flour"],
        vec!["oven", "flour", "dough"],
        vec!["dough", "oven", "flour"],
        vec!["pulsar", "orbit"], // "pulsar" appears exactly once
    ]);

    let mut unfiltered = AnchorTopics::new(2);
    unfiltered.fit(&with_rare)?;
    println!(
        "No threshold:      anchors = {:?}",
        unfiltered.anchor_words(with_rare.vocabulary())?
    );

    let mut filtered = AnchorTopics::new(2).with_doc_threshold(1);
    filtered.fit(&with_rare)?;
    println!(
        "Threshold of 1:    anchors = {:?}",
        filtered.anchor_words(with_rare.vocabulary())?
    );

    // Example 3: Random projection
    println!("\n--- Example 3: Random Projection ---");
    println!("Projecting the normalized rows before the anchor walk trades a");
    println!("little geometric fidelity for much cheaper distance queries.\n");

    let mut projected = AnchorTopics::new(3)
        .with_projection_dim(6)
        .with_random_seed(42);
    projected.fit(&corpus)?;
    println!(
        "Projected anchors: {:?}",
        projected.anchor_words(corpus.vocabulary())?
    );
    let (k, v) = projected.topic_word()?.shape();
    println!("Topic matrix is still {k} x {v}");

    // Example 4: Convergence diagnostics
    println!("\n--- Example 4: Convergence Diagnostics ---");

    let diagnostics = model.diagnostics()?;
    println!("Words converged:   {}", diagnostics.converged_words);
    println!("Words collapsed:   {}", diagnostics.collapsed_words);
    println!("Words exhausted:   {}", diagnostics.exhausted_words);
    println!("Total iterations:  {}", diagnostics.total_iterations);
    println!("Worst single word: {}", diagnostics.max_word_iterations);

    println!("\n=== Example Complete ===");
    println!("\nKey takeaways:");
    println!("✓ Anchors are real words, so every topic is interpretable by construction");
    println!("✓ The document threshold keeps one-off words from claiming anchors");
    println!("✓ Random projection speeds up selection on large vocabularies");
    println!("✓ Diagnostics show how hard each per-word solve had to work");

    Ok(())
}
