use scraper::{Html, Selector};

use super::builder::{LINKS, LINKS_SELECTOR, TITLES, TITLES_SELECTOR};
use super::*;
use crate::error::SiftError;

/// Evaluates one `ExtractionTarget` against one fetched `Page`
///
/// Matching is delegated to the selector engine; results come back in
/// document order. Zero matches is a normal outcome, reported as a
/// diagnostic and returned as the empty vector.
pub struct Extractor<'a> {
    /// the page whose body is parsed and matched
    pub(super) page: &'a Page,

    /// which elements to lift out
    pub(super) target: ExtractionTarget,
}

/// Extractor implementation
impl Extractor<'_> {
    /// parse the page body and return every matching element, document order
    /// preserved
    pub fn extract(&self) -> Result<Vec<Fragment>, SiftError> {
        log::trace!("enter: extract");

        let html = Html::parse_document(self.page.text());

        let fragments = match &self.target {
            ExtractionTarget::Titles => Self::select(&html, &TITLES),
            ExtractionTarget::Links => Self::select(&html, &LINKS),
            ExtractionTarget::Selector(expression) => {
                let selector =
                    Selector::parse(expression).map_err(|err| SiftError::InvalidSelector {
                        selector: expression.clone(),
                        reason: err.to_string(),
                    })?;

                Self::select(&html, &selector)
            }
        };

        if fragments.is_empty() {
            log::warn!(
                "no elements matched '{}' on {}",
                self.selector_expression(),
                self.page.url()
            );
        }

        log::trace!("exit: extract -> {} fragments", fragments.len());
        Ok(fragments)
    }

    /// the css expression this extractor matches with
    pub fn selector_expression(&self) -> &str {
        match &self.target {
            ExtractionTarget::Titles => TITLES_SELECTOR,
            ExtractionTarget::Links => LINKS_SELECTOR,
            ExtractionTarget::Selector(expression) => expression,
        }
    }

    /// walk the matches in document order, snapshotting each element
    fn select(html: &Html, selector: &Selector) -> Vec<Fragment> {
        html.select(selector).map(Fragment::from_element).collect()
    }
}
