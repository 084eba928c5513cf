/// Collapse a possibly multi-line message to its first line, marking the cut.
pub fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("");
    if lines.next().is_some() {
        format!("{} [...]", first)
    } else {
        first.to_string()
    }
}

/// Join a list of paths or names for one table cell.
pub fn join_list(items: Option<&[String]>) -> String {
    items.map(|items| items.join(", ")).unwrap_or_default()
}
