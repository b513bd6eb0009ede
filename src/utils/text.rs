//! Small text helpers shared by the keyword-driven heuristics.

/// Whether `haystack` mentions `term`, case-insensitively
///
/// Single-word terms must match a whole word ("ai" does not match "detail");
/// multi-word terms match as substrings of the lowercased text.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }

    let haystack = haystack.to_lowercase();
    if term.contains(' ') {
        return haystack.contains(&term);
    }

    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == term)
}

/// Count occurrences of `phrase` in `text`, case-insensitively
pub fn count_phrase(text: &str, phrase: &str) -> usize {
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&phrase).count()
}

/// Uppercase the first letter of each whitespace-separated word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_chars` chars, appending "..." when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
