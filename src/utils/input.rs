//! Input sanitization shared by the chat box and the masked key field.

/// Sanitize text input to prevent TUI corruption
///
/// Tabs become four spaces, carriage returns become newlines, and any other
/// control characters are dropped.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

/// Pasted API keys often carry a trailing newline or surrounding spaces.
pub fn sanitize_secret_input(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect()
}
