/// Lower-cases, drops everything except ASCII letters, digits and whitespace,
/// then collapses whitespace runs into single spaces.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
