use polaudit_core::chunker::split;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[test]
fn empty_and_whitespace_input_yield_no_chunks() {
    assert!(split("", 1000, 150).is_empty());
    assert!(split("   \n\n  \t", 1000, 150).is_empty());
}

#[test]
fn short_text_is_a_single_chunk() {
    let text = "Only one E/M visit (99213) per patient per day.";
    let chunks = split(text, 1000, 150);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
    assert_eq!(chunks[0].offset, 0);
    assert_eq!(chunks[0].total_chunks, 1);
}

#[test]
fn chunking_is_deterministic() {
    let text = "Lorem ipsum dolor sit amet. ".repeat(200);
    let a = split(&text, 300, 60);
    let b = split(&text, 300, 60);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.content, y.content);
        assert_eq!(x.offset, y.offset);
    }
}

#[test]
fn every_chunk_is_a_contiguous_substring_at_its_offset() {
    let text = "Payment policy.\n\nModifier 59 requires documentation. ".repeat(40);
    let chunks = split(&text, 250, 50);
    let chars: Vec<char> = text.chars().collect();
    for c in &chunks {
        let end = c.offset + char_len(&c.content);
        let slice: String = chars[c.offset..end].iter().collect();
        assert_eq!(slice, c.content, "chunk {} is not a substring", c.chunk_index);
    }
}

#[test]
fn non_overlapping_portions_reconstruct_the_input() {
    let text = "Physical therapy (97110) limited to 20 units per year. ".repeat(60);
    let overlap = 40;
    let chunks = split(&text, 220, overlap);
    assert!(chunks.len() > 1, "text should need several chunks");

    let mut rebuilt = String::new();
    let mut prev_end = 0usize;
    for c in &chunks {
        assert!(c.offset <= prev_end, "gap before chunk {}", c.chunk_index);
        let skip = prev_end - c.offset;
        rebuilt.extend(c.content.chars().skip(skip));
        prev_end = c.offset + char_len(&c.content);
    }
    assert_eq!(rebuilt, text);
}

#[test]
fn boundary_overlap_stays_within_configured_bound() {
    let text = "Claims with modifier 25 are reviewed. ".repeat(80);
    let overlap = 35;
    let chunks = split(&text, 200, overlap);
    for pair in chunks.windows(2) {
        let prev_end = pair[0].offset + char_len(&pair[0].content);
        let shared = prev_end.saturating_sub(pair[1].offset);
        assert!(shared <= overlap, "shared {} exceeds overlap {}", shared, overlap);
    }
}

#[test]
fn chunks_never_exceed_chunk_size() {
    let text = "word ".repeat(1000);
    for c in split(&text, 180, 30) {
        assert!(char_len(&c.content) <= 180);
    }
}

#[test]
fn prefers_paragraph_breaks_over_hard_cuts() {
    let para = "Service not covered when performed in an office setting without a documented physician order on file.";
    let text = format!("{para}\n\n{para}\n\n{para}");
    let chunks = split(&text, 120, 20);
    // Cuts should land right after paragraph breaks, not mid-word.
    for c in &chunks[..chunks.len() - 1] {
        assert!(
            c.content.ends_with("\n\n") || c.content.ends_with(' '),
            "chunk ends mid-word: {:?}",
            &c.content[c.content.len().saturating_sub(12)..]
        );
    }
}

#[test]
fn unbroken_text_falls_back_to_hard_cuts() {
    let text = "x".repeat(950);
    let chunks = split(&text, 400, 100);
    assert!(chunks.len() >= 2);
    for c in &chunks {
        assert!(char_len(&c.content) <= 400);
    }
    let last = chunks.last().expect("chunks");
    assert_eq!(last.offset + char_len(&last.content), 950);
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let text = "Précédent résumé — naïve façade. ".repeat(50);
    let chunks = split(&text, 120, 25);
    assert!(chunks.len() > 1);
    let chars: Vec<char> = text.chars().collect();
    for c in &chunks {
        let end = c.offset + char_len(&c.content);
        let slice: String = chars[c.offset..end].iter().collect();
        assert_eq!(slice, c.content);
    }
}
