//! Property-based tests for text chunking.
//!
//! These tests verify that the chunkers maintain key invariants:
//! - Preservation: every token of the prepared text lands in some chunk
//! - Order: tokens appear in the chunks in source order
//! - Non-empty: no chunk is empty or whitespace-only
//! - Selection: blank lines route to the paragraph strategy, nothing else does
//! - Stability: an in-bounds paragraph comes back unchanged

use std::sync::Arc;

use chunkwise::breakpoint::{percentile, select_threshold};
use chunkwise::{
    AutoChunker, Chunker, ChunkerConfig, HashedBagOfWords, ParagraphChunker, Preprocessor,
    SemanticChunker, SentenceSplitter,
};
use proptest::prelude::*;

// =============================================================================
// Test Generators
// =============================================================================

fn sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z]{1,10}", 2..8),
        prop::sample::select(vec!['.', '!', '?']),
    )
        .prop_map(|(words, end)| {
            let mut s = words.join(" ");
            s.push(end);
            s
        })
}

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 1..8).prop_map(|s| s.join(" "))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(paragraph(), 1..6).prop_map(|p| p.join("\n\n"))
}

// =============================================================================
// Helpers
// =============================================================================

fn semantic(min: usize, max: usize) -> SemanticChunker {
    let config = ChunkerConfig::default().with_lengths(min, max);
    SemanticChunker::new(Arc::new(HashedBagOfWords::default()), config)
        .unwrap()
        .with_preprocessor(Preprocessor::passthrough())
}

fn tokens<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    texts.into_iter().flat_map(str::split_whitespace).collect()
}

// =============================================================================
// Preservation and Order
// =============================================================================

proptest! {
    #[test]
    fn semantic_keeps_every_sentence_in_order(text in paragraph(), min in 1usize..200, extra in 0usize..200) {
        let chunker = semantic(min, min + extra);
        let chunks = chunker.chunk_text(&text).unwrap();

        let sentences = SentenceSplitter.split(&text);
        prop_assert_eq!(chunks.join(" "), sentences.join(" "));
    }

    #[test]
    fn paragraph_keeps_every_token_in_order(text in document(), min in 1usize..300, extra in 0usize..300) {
        let chunker = ParagraphChunker::new(semantic(min, min + extra));
        let chunks = chunker.chunk_text(&text).unwrap();

        prop_assert_eq!(
            tokens(chunks.iter().map(String::as_str)),
            tokens([text.as_str()])
        );
    }

    #[test]
    fn chunks_are_never_blank(text in ".{0,400}") {
        let chunker = AutoChunker::from_model(
            Arc::new(HashedBagOfWords::default()),
            ChunkerConfig::default().with_lengths(20, 120),
        )
        .unwrap();

        for chunk in chunker.chunk_text(&text).unwrap() {
            prop_assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn slab_indices_are_sequential(text in document()) {
        let chunker = AutoChunker::new(semantic(40, 200));
        let slabs = chunker.chunk(&text).unwrap();
        for (i, slab) in slabs.iter().enumerate() {
            prop_assert_eq!(slab.index, i);
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

proptest! {
    #[test]
    fn no_blank_line_selects_semantic(text in "[^\n]{0,200}(\n[^\n]{1,50}){0,4}") {
        prop_assume!(!text.lines().skip(1).any(|l| l.trim().is_empty()));
        prop_assert_eq!(chunkwise::Strategy::for_text(&text), chunkwise::Strategy::Semantic);
    }

    #[test]
    fn double_newline_selects_paragraph(before in ".{0,100}", after in ".{0,100}") {
        let text = format!("{before}\n\n{after}");
        prop_assert_eq!(chunkwise::Strategy::for_text(&text), chunkwise::Strategy::Paragraph);
    }
}

// =============================================================================
// Bounds
// =============================================================================

proptest! {
    #[test]
    fn in_bounds_paragraph_is_returned_verbatim(text in paragraph(), slack in 0usize..50) {
        let len = text.chars().count();
        let chunker = ParagraphChunker::new(semantic(len.saturating_sub(slack).max(1), len + slack));

        let chunks = chunker.chunk_text(&text).unwrap();
        prop_assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn only_the_last_sentence_overshoots_max(text in paragraph(), max in 10usize..80) {
        let chunker = semantic(1, max);
        for chunk in chunker.chunk_text(&text).unwrap() {
            let sentences = SentenceSplitter.split(&chunk);
            let last = sentences.last().map_or(0, |s| s.chars().count());
            prop_assert!(chunk.chars().count() <= max + last);
        }
    }
}

// =============================================================================
// Threshold
// =============================================================================

proptest! {
    #[test]
    fn percentile_lies_within_range(
        values in prop::collection::vec(0.0f32..2.0, 1..50),
        p in 0.0f32..=1.0
    ) {
        let q = percentile(&values, p).unwrap();
        let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        prop_assert!(q >= lo - 1e-6 && q <= hi + 1e-6);
    }

    #[test]
    fn percentile_is_monotonic(
        values in prop::collection::vec(0.0f32..2.0, 2..50),
        a in 0.0f32..=1.0,
        b in 0.0f32..=1.0
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let q_lo = select_threshold(&values, lo).unwrap();
        let q_hi = select_threshold(&values, hi).unwrap();
        prop_assert!(q_lo <= q_hi + 1e-6);
    }
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn empty_input_produces_empty_output() {
    let chunker = AutoChunker::new(semantic(600, 3000));
    assert!(chunker.chunk_text("").unwrap().is_empty());
    assert!(chunker.chunk_text(" \n\n \t").unwrap().is_empty());
}

#[test]
fn text_without_terminators_is_one_sentence() {
    let chunks = semantic(1, 3000).chunk_text("no punctuation at all here").unwrap();
    assert_eq!(chunks, vec!["no punctuation at all here"]);
}

#[test]
fn unicode_handling() {
    let text = "Hello 世界! Привет мир! مرحبا بالعالم.";
    let chunks = semantic(1, 3000).chunk_text(text).unwrap();
    assert_eq!(chunks.join(" "), text);
}

#[test]
fn chunking_is_deterministic() {
    let text = "The coat is warm. The coat is navy. Delivery takes two days. Returns are free.";
    let chunker = semantic(10, 40);
    assert_eq!(chunker.chunk_text(text).unwrap(), chunker.chunk_text(text).unwrap());
}
