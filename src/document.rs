use scraper::{ElementRef, Html, Selector};

/// A parsed page with the handful of typed lookups the extractor needs.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
    }

    /// First element matching `selector` that comes after `anchor` in document
    /// order. The anchor's own subtree is not searched.
    pub fn find_first_matching_after<'a>(
        &'a self,
        anchor: ElementRef<'a>,
        selector: &Selector,
    ) -> Option<ElementRef<'a>> {
        let anchor_id = anchor.id();
        self.html
            .root_element()
            .descendants()
            .skip_while(|node| node.id() != anchor_id)
            .skip(1)
            .filter(|node| !node.ancestors().any(|ancestor| ancestor.id() == anchor_id))
            .filter_map(ElementRef::wrap)
            .find(|element| selector.matches(element))
    }
}

pub fn find_first<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Parses a CSS selector, keeping the error `'static` so it can cross `?`.
pub fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <table class="wikitable" id="before"><tr><td>early</td></tr></table>
            <h3><span id="Tanks">Tanks</span></h3>
            <p>intro</p>
            <table class="other"><tr><td>not this</td></tr></table>
            <div><table class="wikitable" id="after"><tr><td>this</td></tr></table></div>
        </body></html>
    "#;

    #[test]
    fn finds_elements_by_id() {
        let document = Document::parse(PAGE);
        let anchor = document.find_by_id("Tanks").unwrap();
        assert_eq!(anchor.value().name(), "span");
        assert!(document.find_by_id("Heroes").is_none());
    }

    #[test]
    fn finds_first_match_after_anchor() {
        let document = Document::parse(PAGE);
        let selector = parse_selector("table.wikitable").unwrap();
        let heading = document
            .find_by_id("Tanks")
            .and_then(|anchor| anchor.parent())
            .and_then(ElementRef::wrap)
            .unwrap();
        let table = document.find_first_matching_after(heading, &selector).unwrap();
        assert_eq!(attribute(table, "id"), Some("after"));
    }

    #[test]
    fn nothing_after_anchor_yields_none() {
        let document = Document::parse(r#"<div><span id="Support"></span></div>"#);
        let selector = parse_selector("table").unwrap();
        let anchor = document.find_by_id("Support").unwrap();
        assert!(document.find_first_matching_after(anchor, &selector).is_none());
    }

    #[test]
    fn bad_selectors_are_errors() {
        assert!(parse_selector("td[").is_err());
    }
}
