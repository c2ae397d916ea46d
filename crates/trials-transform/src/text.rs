//! Free-text heuristics shared across the transforms.

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Normalizes an intervention name into its facet key: ASCII lowercase,
/// every run of non-alphanumeric characters collapsed to one space, trimmed.
pub fn normalize_facet_name(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else {
            pending_space = true;
        }
    }
    key
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// The needle is expected to be ASCII; a match therefore spans only ASCII
/// bytes, so the returned offset is always a char boundary.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Number of `\n*` bullet markers in a slice of criteria text.
pub fn count_bullet_markers(text: &str) -> usize {
    text.matches("\n*").count()
}

const INCLUSION_HEADER: &str = "INCLUSION CRITERIA";
const EXCLUSION_HEADER: &str = "EXCLUSION CRITERIA";

/// Derives (inclusion, exclusion) criteria counts from eligibility free
/// text.
///
/// The text is split on the literal section headers, case-insensitively;
/// bullets are counted inside the relevant slice. A missing header reads as
/// unknown, and so does a present header with no bullets under it - zero is
/// indistinguishable from prose that simply is not bulleted.
pub fn criteria_counts(text: &str) -> (Option<usize>, Option<usize>) {
    let inclusion = find_ignore_ascii_case(text, INCLUSION_HEADER).map(|start| {
        let after = &text[start + INCLUSION_HEADER.len()..];
        let section = match find_ignore_ascii_case(after, EXCLUSION_HEADER) {
            Some(end) => &after[..end],
            None => after,
        };
        count_bullet_markers(section)
    });
    let exclusion = find_ignore_ascii_case(text, EXCLUSION_HEADER).map(|start| {
        let after = &text[start + EXCLUSION_HEADER.len()..];
        count_bullet_markers(after)
    });
    (
        inclusion.filter(|&count| count > 0),
        exclusion.filter(|&count| count > 0),
    )
}
