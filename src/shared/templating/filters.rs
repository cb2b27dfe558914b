/// `"professional_experience"` → `"Professional Experience"`.
pub fn var_to_title(value: &str) -> String {
    value
        .replace('_', " ")
        .split_whitespace()
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

/// Public location of a stored file field, or `None` when the field is empty.
///
/// Absolute URLs are returned untouched; object keys are joined onto the
/// media prefix.
pub fn file_url(media_prefix: &str, object_key: Option<&str>) -> Option<String> {
    let key = object_key.map(str::trim).filter(|k| !k.is_empty())?;

    if key.starts_with("http://") || key.starts_with("https://") {
        return Some(key.to_string());
    }

    Some(format!(
        "{}/{}",
        media_prefix.trim_end_matches('/'),
        key.trim_start_matches('/')
    ))
}
