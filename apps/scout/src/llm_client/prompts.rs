// Shared prompt constants and reply-parsing utilities.
// Each agent defines its own prompt text in agents/prompts.rs.
// This file holds the two-section reply contract every agent relies on.

/// Line that separates the two sections of a structured reply.
pub const SECTION_SEPARATOR: &str = "---SPLIT---";

/// Instruction appended to prompts that expect a two-section reply.
pub const TWO_SECTION_INSTRUCTION: &str = "\
    Format your response as exactly two sections separated by a line containing \
    only ---SPLIT---. Do NOT use the separator anywhere else. \
    Do NOT wrap the response in markdown code fences.";

/// Splits a reply into its two sections.
///
/// Returns `None` unless the separator occurs exactly once. Both sections are trimmed.
pub fn split_sections(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split(SECTION_SEPARATOR);
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first.trim(), second.trim()))
}

/// Case-insensitive check for an affirmative token anywhere in a reply.
pub fn contains_yes(text: &str) -> bool {
    text.to_uppercase().contains("YES")
}
