/// Cuts `text` into at most `chunk_count` word-bounded chunks of near-equal
/// word count.
///
/// Text shorter than `min_split_chars` characters is returned untouched as a
/// single chunk. Blank text gives no chunks at all.
pub fn split_transcript(text: &str, chunk_count: usize, min_split_chars: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if text.chars().count() < min_split_chars {
        return vec![text.to_string()];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let words_per_chunk = words.len().div_ceil(chunk_count.max(1));

    words
        .chunks(words_per_chunk)
        .map(|chunk| chunk.join(" "))
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}
