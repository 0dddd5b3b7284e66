use scraper::ElementRef;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Trimmed text of an element and all of its descendants.
pub fn extract_trimmed_text(node: ElementRef) -> String {
    extract_text(node).trim().to_string()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last direct child text node that is not pure whitespace, trimmed.
pub fn last_text_child(node: ElementRef) -> Option<String> {
    node.children()
        .rev()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
