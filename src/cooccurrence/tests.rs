pub(crate) use super::*;

fn chain_corpus() -> Corpus {
    Corpus::from_documents(vec![vec!["a", "b"], vec!["b", "c"], vec!["c", "d"]])
}

#[test]
fn test_chain_corpus_entries() {
    // Each length-2 document spreads mass 1/2 per ordered pair; averaging
    // over 3 documents gives 1/6 on every observed pair.
    let q = build_cooccurrence(&chain_corpus());
    assert_eq!(q.shape(), (4, 4));

    let sixth = 1.0 / 6.0;
    let expected = [
        [0.0, sixth, 0.0, 0.0],
        [sixth, 0.0, sixth, 0.0],
        [0.0, sixth, 0.0, sixth],
        [0.0, 0.0, sixth, 0.0],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &want) in row.iter().enumerate() {
            assert!(
                (q.get(i, j) - want).abs() < 1e-15,
                "Q[{i}][{j}] = {}, expected {want}",
                q.get(i, j)
            );
        }
    }
}

#[test]
fn test_symmetry() {
    let corpus = Corpus::from_documents(vec![
        vec!["a", "b", "c", "a"],
        vec!["b", "d"],
        vec!["d", "a", "d"],
    ]);
    let q = build_cooccurrence(&corpus);
    let (v, _) = q.shape();
    for i in 0..v {
        for j in 0..v {
            assert!(
                (q.get(i, j) - q.get(j, i)).abs() < 1e-15,
                "asymmetry at ({i}, {j})"
            );
        }
    }
}

#[test]
fn test_repeated_tokens_hit_diagonal() {
    // ["a", "a", "b"]: norm = 1/6; the two "a" positions pair with each
    // other in both orders, putting 2/6 on the diagonal.
    let corpus = Corpus::from_documents(vec![vec!["a", "a", "b"]]);
    let q = build_cooccurrence(&corpus);
    assert!((q.get(0, 0) - 1.0 / 3.0).abs() < 1e-15);
    assert!((q.get(0, 1) - 1.0 / 3.0).abs() < 1e-15);
    assert!((q.get(1, 0) - 1.0 / 3.0).abs() < 1e-15);
    assert!(q.get(1, 1) == 0.0);
}

#[test]
fn test_diagonal_zero_without_repeats() {
    let q = build_cooccurrence(&chain_corpus());
    for i in 0..4 {
        assert!(q.get(i, i) == 0.0, "diagonal entry at {i}");
    }
}

#[test]
fn test_short_documents_do_not_change_result() {
    let with_short = Corpus::from_documents(vec![
        vec!["a", "b"],
        vec![],
        vec!["b", "c"],
        vec!["a"],
        vec!["c", "d"],
    ]);
    let q = build_cooccurrence(&chain_corpus());
    let q_short = build_cooccurrence(&with_short);
    assert_eq!(q, q_short);
}

#[test]
fn test_all_documents_short_yields_zero_matrix() {
    let corpus = Corpus::from_documents(vec![vec!["a"], vec!["b"], Vec::<&str>::new()]);
    let q = build_cooccurrence(&corpus);
    assert_eq!(q.shape(), (2, 2));
    assert!(q.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_single_repeated_word() {
    let corpus = Corpus::from_documents(vec![vec!["solo", "solo", "solo"]]);
    let q = build_cooccurrence(&corpus);
    assert_eq!(q.shape(), (1, 1));
    assert!((q.get(0, 0) - 1.0).abs() < 1e-15);
}

#[test]
fn test_total_mass_is_one() {
    let corpus = Corpus::from_documents(vec![
        vec!["a", "b", "c"],
        vec!["c", "d", "d", "a"],
        vec!["b", "a"],
    ]);
    let q = build_cooccurrence(&corpus);
    let total: f64 = q.as_slice().iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn test_documents_weighted_equally_regardless_of_length() {
    // One short and one long document: each contributes exactly half of the
    // total mass, and the short document's pair mass stays in its block.
    let corpus = Corpus::from_documents(vec![vec!["a", "b"], vec!["c", "d", "e", "f"]]);
    let q = build_cooccurrence(&corpus);
    let short_block = q.get(0, 1) + q.get(1, 0);
    assert!((short_block - 0.5).abs() < 1e-12);
    let total: f64 = q.as_slice().iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_corpus() {
    let corpus = Corpus::from_documents(Vec::<Vec<&str>>::new());
    let q = build_cooccurrence(&corpus);
    assert_eq!(q.shape(), (0, 0));
}
