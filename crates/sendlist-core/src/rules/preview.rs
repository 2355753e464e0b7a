/// Resolves the text that will be sent: a non-empty override wins over the
/// template. Placeholders such as `{name}` are left untouched.
pub fn compose_preview(template_content: &str, override_text: Option<&str>) -> String {
    match override_text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => template_content.to_string(),
    }
}
