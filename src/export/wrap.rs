//! Character-budget word wrapping shared by the export renderers.

/// Wrap a single run of words to `max_chars` per line. Words longer than the
/// budget are split mid-word rather than overflowing.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len + word_len + usize::from(!current.is_empty()) <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_len <= max_chars {
            current.push_str(word);
        } else {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = piece.iter().collect();
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap multi-paragraph text, preserving blank lines as empty entries so the
/// renderers keep the original paragraph breaks.
pub fn wrap_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_words(raw_line, max_chars));
        }
    }
    lines
}
