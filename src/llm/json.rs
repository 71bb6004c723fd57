//! Fenced-block handling for LLM responses.
//!
//! Providers often wrap the requested JSON in a markdown code block,
//! sometimes with prose before or after it. Only the block interior is
//! kept; text without a block is passed through trimmed.

const FENCE: &str = "```";

/// Return the text that should be parsed as the structured record.
///
/// Tries, in order:
/// 1. The interior of the first ` ``` ... ``` ` block, with an optional
///    `json` tag after the opening fence, trimmed
/// 2. The whole response, trimmed
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find(FENCE) {
        let mut inner = &trimmed[start + FENCE.len()..];
        if inner
            .get(..4)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
        {
            inner = &inner[4..];
        }
        if let Some(end) = inner.find(FENCE) {
            return inner[..end].trim();
        }
    }

    trimmed
}
