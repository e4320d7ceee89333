/// Reduces a course id to `[A-Za-z0-9_-]` so it is safe as a single path component.
/// Returns `None` when nothing survives.
pub fn sanitize_course_id(raw: &str) -> Option<String> {
    let safe: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if safe.is_empty() {
        None
    } else {
        Some(safe)
    }
}
