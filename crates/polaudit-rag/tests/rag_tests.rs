use polaudit_core::error::Error;
use polaudit_core::traits::Embedder;
use polaudit_core::types::Chunk;
use polaudit_embed::HashEmbedder;
use polaudit_rag::{retrieve, VectorIndex, CONTEXT_DELIMITER};

fn chunk(content: &str, chunk_index: usize, total_chunks: usize) -> Chunk {
    Chunk { content: content.to_string(), offset: 0, chunk_index, total_chunks }
}

fn build_index(texts: &[&str], embedder: &dyn Embedder) -> VectorIndex {
    let total = texts.len();
    let chunks: Vec<Chunk> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| chunk(t, i, total))
        .collect();
    VectorIndex::build(chunks, embedder).expect("build index")
}

#[test]
fn empty_document_fails_index_build() {
    let embedder = HashEmbedder::default();
    let result = VectorIndex::build(Vec::new(), &embedder);
    assert!(
        matches!(result, Err(Error::EmptyDocument)),
        "an empty chunk set must fail with EmptyDocument"
    );
}

#[test]
fn mismatched_vector_width_is_rejected() {
    let mut index = VectorIndex::new(384);
    let err = index.add(vec![0.5f32; 8], chunk("stub", 0, 1));
    assert!(matches!(err, Err(Error::Embedding(_))));
}

#[test]
fn retrieve_returns_min_k_n_sorted_descending() {
    let embedder = HashEmbedder::default();
    let index = build_index(
        &[
            "billing rules for evaluation visits",
            "physical therapy unit limits per year",
            "provider enrollment mailing addresses",
            "modifier 59 billing documentation rules",
        ],
        &embedder,
    );

    let result = retrieve(&index, &embedder, "billing rules", 3).expect("retrieve");
    assert_eq!(result.len(), 3);
    for pair in result.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score, "scores must be non-increasing");
    }

    let all = retrieve(&index, &embedder, "billing rules", 50).expect("retrieve");
    assert_eq!(all.len(), 4, "k larger than the index returns everything");
}

#[test]
fn ties_break_by_sequence_order() {
    let embedder = HashEmbedder::default();
    // Identical content embeds identically, forcing equal scores.
    let index = build_index(
        &["same chunk text", "same chunk text", "same chunk text"],
        &embedder,
    );
    let result = retrieve(&index, &embedder, "same chunk text", 3).expect("retrieve");
    let order: Vec<usize> = result.hits.iter().map(|h| h.chunk.chunk_index).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn best_match_comes_back_first() {
    let embedder = HashEmbedder::default();
    let index = build_index(
        &[
            "reimbursement schedule for durable equipment",
            "billing rules and medical policy restrictions apply",
        ],
        &embedder,
    );
    let result =
        retrieve(&index, &embedder, "billing rules and medical policy restrictions", 1)
            .expect("retrieve");
    assert_eq!(result.len(), 1);
    assert_eq!(result.hits[0].chunk.chunk_index, 1);
}

#[test]
fn context_joins_hits_with_delimiter_in_score_order() {
    let embedder = HashEmbedder::default();
    let index = build_index(&["alpha section text", "beta section text"], &embedder);
    let result = retrieve(&index, &embedder, "alpha section text", 2).expect("retrieve");
    let context = result.context();
    let parts: Vec<&str> = context.split(CONTEXT_DELIMITER).collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], "alpha section text");
}

#[test]
fn querying_twice_is_deterministic() {
    let embedder = HashEmbedder::default();
    let index = build_index(
        &["one service per date of service", "units capped at twenty per year"],
        &embedder,
    );
    let a = retrieve(&index, &embedder, "service units", 2).expect("retrieve");
    let b = retrieve(&index, &embedder, "service units", 2).expect("retrieve");
    let ia: Vec<usize> = a.hits.iter().map(|h| h.chunk.chunk_index).collect();
    let ib: Vec<usize> = b.hits.iter().map(|h| h.chunk.chunk_index).collect();
    assert_eq!(ia, ib);
    for (x, y) in a.hits.iter().zip(b.hits.iter()) {
        assert!((x.score - y.score).abs() <= f32::EPSILON);
    }
}
