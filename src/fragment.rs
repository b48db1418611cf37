//! a single element snapshotted out of a parsed document
use std::fmt;

use scraper::ElementRef;

/// One structural element lifted out of a page: tag identity, attributes,
/// rendered form, and text payload
///
/// Fragments are immutable snapshots taken at selection time; they carry no
/// reference back into the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// element tag name, e.g. `h1` or `a`
    tag: String,

    /// attribute name/value pairs
    attributes: Vec<(String, String)>,

    /// the element's outer html, exactly as rendered
    html: String,

    /// whitespace-normalized text content
    text: String,
}

/// Fragment implementation
impl Fragment {
    /// snapshot the given element out of its document
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let tag = element.value().name().to_string();

        let attributes = element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let html = element.html();

        // collapse runs of whitespace the same way a browser would display them
        let raw: String = element.text().collect();
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        Self {
            tag,
            attributes,
            html,
            text,
        }
    }

    /// Get the tag name of this `Fragment`
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the rendered outer html of this `Fragment`
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Get the text payload of this `Fragment`
    pub fn text(&self) -> &str {
        &self.text
    }

    /// value of the given attribute, if the element carries it
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// the link target carried by this element, if any
    pub fn href(&self) -> Option<&str> {
        self.attribute("href")
    }

    /// the line written to disk for this fragment: rendered html, a
    /// comma-space, then the text payload
    pub fn as_record(&self) -> String {
        format!("{}, {}", self.html, self.text)
    }
}

/// Implement Display for Fragment
impl fmt::Display for Fragment {
    /// formatter for Display; the rendered html is the canonical form
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.html)
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    /// build the fragments matching `selector` in `body`
    fn fragments_from(body: &str, selector: &str) -> Vec<Fragment> {
        let html = Html::parse_document(body);
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector).map(Fragment::from_element).collect()
    }

    #[test]
    /// a heading renders as its outer html followed by its text
    fn record_is_rendered_html_comma_space_text() {
        let fragments = fragments_from("<html><body><h1>Header 1</h1></body></html>", "h1");

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_record(), "<h1>Header 1</h1>, Header 1");
    }

    #[test]
    /// an anchor's href is reachable through the link accessor
    fn href_accessor_returns_link_target() {
        let fragments = fragments_from(
            r#"<a href="https://example.com/">example</a>"#,
            "a",
        );

        assert_eq!(fragments[0].tag(), "a");
        assert_eq!(fragments[0].href(), Some("https://example.com/"));
        assert_eq!(fragments[0].attribute("missing"), None);
    }

    #[test]
    /// nested markup contributes to the text payload with whitespace collapsed
    fn text_payload_is_whitespace_normalized() {
        let fragments = fragments_from(
            "<p>  spread \n  <b>across</b>\n lines  </p>",
            "p",
        );

        assert_eq!(fragments[0].text(), "spread across lines");
    }
}
