//! Commit message normalization: subject length and body line wrapping.
//!
//! Lengths are counted in characters, not bytes, so non-ASCII subjects are
//! never split mid-character.

/// Maximum subject length after formatting.
pub const MAX_SUBJECT_LENGTH: usize = 50;

/// Maximum body line length after formatting.
pub const MAX_BODY_LINE_LENGTH: usize = 72;

const ELLIPSIS: &str = "...";
const SUBJECT_TERMINATORS: [char; 4] = ['.', '!', ';', ':'];

/// A formatted subject/body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub subject: String,
    pub body: String,
}

/// Normalize a raw subject/body pair.
pub fn format_message(subject: &str, body: &str) -> FormattedMessage {
    FormattedMessage {
        subject: format_subject(subject),
        body: format_body(body),
    }
}

/// Trim, drop one trailing terminator and cap the length at 50 characters.
///
/// Casing is left untouched, including the leading character.
pub fn format_subject(subject: &str) -> String {
    let mut subject = subject.trim();

    if let Some(stripped) = subject.strip_suffix(SUBJECT_TERMINATORS) {
        subject = stripped;
    }

    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        let keep = MAX_SUBJECT_LENGTH - ELLIPSIS.len();
        let mut truncated: String = subject.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        return truncated;
    }

    subject.to_string()
}

/// Trim and greedily re-wrap every line longer than 72 characters.
///
/// Lines already within the limit pass through unchanged. Words longer
/// than the limit are split into limit-sized pieces.
pub fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }

    let mut wrapped = Vec::new();
    for line in body.split('\n') {
        if line.chars().count() <= MAX_BODY_LINE_LENGTH {
            wrapped.push(line.to_string());
        } else {
            wrap_line(line, &mut wrapped);
        }
    }

    wrapped.join("\n")
}

fn wrap_line(line: &str, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        for piece in split_long_word(word) {
            let piece_len = piece.chars().count();
            let separator = usize::from(!current.is_empty());

            if current_len + separator + piece_len <= MAX_BODY_LINE_LENGTH {
                if separator == 1 {
                    current.push(' ');
                }
                current.push_str(piece);
                current_len += separator + piece_len;
            } else {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                current.push_str(piece);
                current_len = piece_len;
            }
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
}

/// Split a word into chunks of at most 72 characters.
fn split_long_word(word: &str) -> Vec<&str> {
    if word.chars().count() <= MAX_BODY_LINE_LENGTH {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in word.char_indices() {
        if count == MAX_BODY_LINE_LENGTH {
            pieces.push(&word[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&word[start..]);
    pieces
}
