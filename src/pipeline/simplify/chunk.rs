//! Paragraph/sentence chunking for very large documents. Not yet wired into
//! the request path; the single-call pipeline handles today's document sizes
//! and this is the seam for a future map-reduce simplification.

/// Default chunk budget, in characters.
pub const DEFAULT_MAX_CHARS: usize = 8_000;

/// Split `text` into chunks of at most `max_chars` characters, preferring
/// paragraph boundaries, then sentence boundaries (`.` and the Devanagari
/// danda `।`), then hard character splits for pathological runs.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split('\n') {
        if char_len(&current) + char_len(paragraph) + 1 <= max_chars {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(paragraph);
            continue;
        }

        flush(&mut chunks, &mut current);

        if char_len(paragraph) <= max_chars {
            current.push_str(paragraph);
            continue;
        }

        // Paragraph alone blows the budget; fall back to sentences.
        for sentence in split_sentences(paragraph) {
            if char_len(&current) + char_len(&sentence) > max_chars {
                flush(&mut chunks, &mut current);
            }
            if char_len(&sentence) > max_chars {
                // A single run with no boundaries; split it hard.
                for piece in hard_split(&sentence, max_chars) {
                    flush(&mut chunks, &mut current);
                    current.push_str(&piece);
                }
            } else {
                current.push_str(&sentence);
            }
        }
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

/// Sentences keep their terminator so no character is lost.
fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in paragraph.chars() {
        current.push(ch);
        if ch == '.' || ch == '।' {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

fn hard_split(run: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = run.chars().collect();
    chars.chunks(max_chars.max(1)).map(|c| c.iter().collect()).collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
