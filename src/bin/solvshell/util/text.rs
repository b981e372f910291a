/// Greedy word wrap used by the boxed error display.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.len() + 1 + word.len() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Truncates to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => String::new(),
        1 => "…".to_string(),
        _ => {
            let kept: String = s.chars().take(max_len - 1).collect();
            format!("{}…", kept)
        }
    }
}
