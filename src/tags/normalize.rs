//! Comparison keys for free-form titles

/// Reduce a title to a comparison key.
///
/// Lower-cases, drops everything that is not alphanumeric or whitespace and
/// collapses whitespace runs. The result is never displayed.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
