//! Turns authored notes text into display paragraphs.
//!
//! A blank line separates paragraphs, a single line break is a soft wrap and becomes a
//! space. Markdown links `[label](url)` keep only their label since panels cannot open
//! links.

use {regex::Regex, std::sync::LazyLock};

/// Labels may not contain brackets and urls may not contain parentheses, so a stray
/// `[` or `(` is never swallowed into a link.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]\(([^()]*)\)").expect("markdown link pattern is valid")
});

/// Splits `raw` into paragraphs. Absent or blank input gives no paragraphs.
pub fn normalize(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let text = raw.trim_start().replace("\r\n", "\n");

    text.split("\n\n")
        .map(|paragraph| paragraph.replace('\n', " "))
        .map(|paragraph| strip_links(&paragraph))
        .map(|paragraph| paragraph.trim().to_string())
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Replaces links with their labels until none are left, so a label that
/// itself closes a link (`[[a](b)](c)`) is reduced too.
fn strip_links(paragraph: &str) -> String {
    let mut text = paragraph.to_string();
    loop {
        let stripped = MARKDOWN_LINK.replace_all(&text, "${1}").into_owned();
        if stripped == text {
            return text;
        }
        text = stripped;
    }
}
