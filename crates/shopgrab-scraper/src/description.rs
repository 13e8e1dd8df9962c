//! Flattening of HTML product descriptions into single-line plain text.

use scraper::{ElementRef, Html, Node};

/// Elements whose text content is never visible.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "template", "noscript"];

/// Flattens an HTML description fragment into one line of readable text.
///
/// Walks the parsed fragment once, trims every visible text node, drops the
/// empty ones, and separates the rest (and therefore every paragraph) with a
/// single space. Line feeds inside a text node each become a space and
/// carriage returns are removed, so the result never spans lines.
///
/// ```
/// use shopgrab_scraper::normalize_description;
///
/// let text = normalize_description("<p>Soft cotton.</p><p>Machine <b>washable</b>.</p>");
/// assert_eq!(text, "Soft cotton. Machine washable .");
/// ```
#[must_use]
pub fn normalize_description(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    let pieces: Vec<&str> = fragment
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) if !is_hidden(node.ancestors().filter_map(ElementRef::wrap)) => {
                Some(text.trim())
            }
            _ => None,
        })
        .filter(|piece| !piece.is_empty())
        .collect();

    pieces.join("\n").replace('\n', " ").replace('\r', "")
}

fn is_hidden<'a>(mut ancestors: impl Iterator<Item = ElementRef<'a>>) -> bool {
    ancestors.any(|element| HIDDEN_ELEMENTS.contains(&element.value().name()))
}
