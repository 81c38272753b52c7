// src/services/walker.rs

//! Document traversal with rule dispatch.
//!
//! The walker visits every node of a parsed page in pre-order document order
//! and hands each element to every registered rule whose tag and predicate
//! match. Matching never stops the walk. Later-wins field semantics depend on
//! the visiting order, so the order must stay exactly that of the markup.

use scraper::node::Element;
use scraper::{ElementRef, Html};

use crate::models::{Diagnostics, Listing};
use crate::services::{metadata, structured};

/// Writes whatever an element carries onto the listing.
pub type RuleHandler = fn(ElementRef<'_>, &mut Listing, &mut Diagnostics);

/// `(tag, predicate) -> handler` entry in the walker's registry.
#[derive(Clone, Copy)]
pub struct ExtractionRule {
    /// Lowercase tag name the rule applies to
    pub tag: &'static str,
    pub predicate: fn(&Element) -> bool,
    pub handler: RuleHandler,
}

impl ExtractionRule {
    pub fn new(
        tag: &'static str,
        predicate: fn(&Element) -> bool,
        handler: RuleHandler,
    ) -> Self {
        Self {
            tag,
            predicate,
            handler,
        }
    }

    fn matches(&self, element: &Element) -> bool {
        element.name() == self.tag && (self.predicate)(element)
    }
}

impl std::fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionRule")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Counters from one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes of any kind visited
    pub nodes: usize,
    /// Element nodes visited
    pub elements: usize,
    /// Rule handler invocations
    pub rule_hits: usize,
}

/// Pre-order walker over a parsed document.
#[derive(Debug, Clone)]
pub struct DocumentWalker {
    rules: Vec<ExtractionRule>,
}

impl Default for DocumentWalker {
    /// Walker with the listing rules: `<meta>` carriers and linked-data scripts.
    fn default() -> Self {
        Self::empty()
            .with_rule(ExtractionRule::new("meta", |_| true, metadata::extract_meta))
            .with_rule(ExtractionRule::new(
                "script",
                structured::is_linked_data,
                structured::extract_events,
            ))
    }
}

impl DocumentWalker {
    /// Walker without any rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules run in registration order for a given element.
    pub fn with_rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Visit every node of `document` once, dispatching elements to the rules.
    ///
    /// Uses an explicit stack, so arbitrarily deep markup cannot overflow the
    /// call stack.
    pub fn walk(
        &self,
        document: &Html,
        listing: &mut Listing,
        diagnostics: &mut Diagnostics,
    ) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut stack = vec![document.tree.root()];

        while let Some(node) = stack.pop() {
            stats.nodes += 1;

            if let Some(element) = ElementRef::wrap(node) {
                stats.elements += 1;
                for rule in self.rules.iter().filter(|r| r.matches(element.value())) {
                    (rule.handler)(element, listing, diagnostics);
                    stats.rule_hits += 1;
                }
            }

            // Reversed so the first child is popped next.
            stack.extend(node.children().rev());
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Discard;

    fn walk(html: &str) -> (Listing, Diagnostics, WalkStats) {
        let document = Html::parse_document(html);
        let mut listing = Listing::new("https://example.com/1");
        let mut diagnostics = Diagnostics::new();
        let stats = DocumentWalker::default().walk(&document, &mut listing, &mut diagnostics);
        (listing, diagnostics, stats)
    }

    #[test]
    fn extracts_scenario_page() {
        let (listing, diagnostics, stats) = walk(
            r#"<html><head>
            <meta name="description" content="Nice house">
            <meta property="og:image" content="http://x/photo.jpg">
            <script type="application/ld+json">{"@type":"Event","name":"Open House","startDate":"2021-05-01T10:00:00Z","endDate":"2021-05-01T12:00:00Z"}</script>
            </head><body></body></html>"#,
        );

        assert_eq!(listing.description.as_deref(), Some("Nice house"));
        assert_eq!(listing.photo_url.as_deref(), Some("http://x/photo.jpg"));
        assert_eq!(listing.open_houses.len(), 1);
        assert_eq!(listing.open_houses[0].name, "Open House");
        assert!(diagnostics.is_empty());
        assert_eq!(stats.rule_hits, 3);
    }

    #[test]
    fn invalid_block_does_not_stop_the_walk() {
        let (listing, diagnostics, _) = walk(
            r#"<head>
            <script type="application/ld+json">{"@type": "Event",</script>
            <meta name="description" content="after bad block">
            </head><body><div><div>
            <script type="application/ld+json">{"@type":"Event","name":"Later"}</script>
            </div></div></body>"#,
        );

        assert_eq!(listing.description.as_deref(), Some("after bad block"));
        assert_eq!(listing.open_houses.len(), 1);
        assert_eq!(listing.open_houses[0].name, "Later");
        assert!(matches!(diagnostics.discards()[0], Discard::InvalidJson { .. }));
    }

    #[test]
    fn events_keep_document_order_and_duplicates() {
        let block = r#"<script type="application/ld+json">{"@type":"Event","name":"A"}</script>"#;
        let html = format!(
            r#"<body>{block}<section><script type="application/ld+json">{{"@type":"Event","name":"B"}}</script></section>{block}</body>"#
        );
        let (listing, _, _) = walk(&html);

        let names: Vec<_> = listing.open_houses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "A"]);
    }

    #[test]
    fn later_meta_in_body_overwrites_head() {
        let (listing, _, _) = walk(
            r#"<head><meta name="description" content="head"></head>
            <body><div><p><meta name="description" content="body"></p></div></body>"#,
        );
        assert_eq!(listing.description.as_deref(), Some("body"));
    }

    #[test]
    fn scripts_without_linked_data_type_are_skipped() {
        let (listing, diagnostics, stats) = walk(
            r#"<script>{"@type":"Event","name":"js"}</script>
            <script type="application/json">{"@type":"Event","name":"json"}</script>"#,
        );
        assert!(listing.open_houses.is_empty());
        assert!(diagnostics.is_empty());
        assert_eq!(stats.rule_hits, 0);
    }

    #[test]
    fn visits_each_node_once_in_document_order() {
        fn record_order(element: ElementRef<'_>, listing: &mut Listing, _: &mut Diagnostics) {
            let id = element.value().attr("id").unwrap_or("");
            let seen = listing.description.get_or_insert_with(String::new);
            seen.push_str(id);
        }

        let document = Html::parse_document(
            r#"<body><i id="a"><i id="b"><i id="c"></i></i><i id="d"></i></i><i id="e"></i></body>"#,
        );
        let walker = DocumentWalker::empty().with_rule(ExtractionRule::new(
            "i",
            |_| true,
            record_order,
        ));
        let mut listing = Listing::new("https://example.com/1");
        let stats = walker.walk(&document, &mut listing, &mut Diagnostics::new());

        assert_eq!(listing.description.as_deref(), Some("abcde"));
        assert_eq!(stats.rule_hits, 5);
        // html, head, body and the five <i> elements
        assert_eq!(stats.elements, 8);
    }

    #[test]
    fn every_matching_rule_runs() {
        fn mark_photo(_: ElementRef<'_>, listing: &mut Listing, _: &mut Diagnostics) {
            listing.photo_url = Some("custom".to_string());
        }

        let document =
            Html::parse_document(r#"<meta name="description" content="Nice house">"#);
        let walker = DocumentWalker::default()
            .with_rule(ExtractionRule::new("meta", |_| true, mark_photo));
        let mut listing = Listing::new("https://example.com/1");
        walker.walk(&document, &mut listing, &mut Diagnostics::new());

        assert_eq!(listing.description.as_deref(), Some("Nice house"));
        assert_eq!(listing.photo_url.as_deref(), Some("custom"));
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let depth = 5_000;
        let html = format!(
            r#"{}<meta name="description" content="deep">{}"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let (listing, _, stats) = walk(&html);
        assert_eq!(listing.description.as_deref(), Some("deep"));
        assert!(stats.elements > depth);
    }
}
