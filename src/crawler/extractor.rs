//! HTML event extraction
//!
//! Markup is turned into a stream of two kinds of events, start tags and text
//! data, delivered in document order to an [`HtmlEventSink`]. No tree is built:
//! events come straight from the HTML5 tokenizer, so markup is never moved or
//! re-parented. The extractor in this module is one such sink: it records every
//! `href` attribute it sees and, in content mode, concatenates the text.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};

/// How a page's events are interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    /// No target identifier: collect the page's text
    Content,

    /// A target identifier was supplied: text is discarded and the page's
    /// links are crawled one level deep
    LinkCrawl {
        /// Reserved element identifier; carried for logging, never used to
        /// filter links or text
        target_id: String,
    },
}

impl ExtractionMode {
    /// Selects the mode from an optional target identifier
    pub fn from_target(target_id: Option<&str>) -> Self {
        match target_id {
            Some(target_id) => Self::LinkCrawl {
                target_id: target_id.to_string(),
            },
            None => Self::Content,
        }
    }

    /// Returns true if text events are accumulated in this mode
    pub fn collects_text(&self) -> bool {
        matches!(self, Self::Content)
    }

    /// Short name used in reports and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::LinkCrawl { .. } => "links",
        }
    }
}

/// Receiver for the events produced by [`tokenize`]
pub trait HtmlEventSink {
    /// Called for every start tag, in the order it appears in the source
    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]);

    /// Called for every run of character data
    fn text(&mut self, data: &str);
}

/// Tokenizes `html` and pushes its events into `sink` in source order
///
/// Tokenizing never fails. Malformed markup degrades to whatever partial
/// token stream the tokenizer recovers; an unterminated tag at end of input
/// is dropped.
pub fn tokenize<S: HtmlEventSink + ?Sized>(html: &str, sink: &mut S) {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(EventPump { sink }, TokenizerOpts::default());
    // The pump never hands back a script, so this runs once
    while let TokenizerResult::Script(()) = tokenizer.feed(&mut input) {}
    tokenizer.end();
}

/// Adapts an [`HtmlEventSink`] to the tokenizer's sink interface
struct EventPump<'a, S: HtmlEventSink + ?Sized> {
    sink: &'a mut S,
}

impl<S: HtmlEventSink + ?Sized> TokenSink for EventPump<'_, S> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                let attrs: Vec<(&str, &str)> = tag
                    .attrs
                    .iter()
                    .map(|attr| (&*attr.name.local, &*attr.value))
                    .collect();
                self.sink.start_tag(&tag.name, &attrs);

                match raw_text_kind(&tag.name) {
                    Some(kind) => TokenSinkResult::RawData(kind),
                    None => TokenSinkResult::Continue,
                }
            }
            Token::CharacterTokens(text) => {
                self.sink.text(&text);
                TokenSinkResult::Continue
            }
            Token::ParseError(error) => {
                tracing::trace!("Recovered from HTML parse error: {}", error);
                TokenSinkResult::Continue
            }
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Elements whose content is character data rather than markup
///
/// Without a tree builder the tokenizer must be told to switch state after
/// these start tags. `noscript` is deliberately absent so links inside it
/// are still seen.
fn raw_text_kind(tag_name: &str) -> Option<RawKind> {
    match tag_name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}

/// What one parse pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Concatenated text; None until the first text event, and always None
    /// in link-crawl mode
    pub content: Option<String>,

    /// Raw `href` values in document order, duplicates included
    pub links: Vec<String>,
}

/// Sink that collects links unconditionally and text only in content mode
#[derive(Debug)]
pub struct LinkTextCollector {
    collect_text: bool,
    extraction: Extraction,
}

impl LinkTextCollector {
    /// Creates an empty collector for one parse pass in `mode`
    pub fn new(mode: &ExtractionMode) -> Self {
        Self {
            collect_text: mode.collects_text(),
            extraction: Extraction::default(),
        }
    }

    /// Consumes the collector and returns what it gathered
    pub fn finish(self) -> Extraction {
        self.extraction
    }
}

impl HtmlEventSink for LinkTextCollector {
    fn start_tag(&mut self, _name: &str, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            if *name == "href" {
                self.extraction.links.push((*value).to_string());
            }
        }
    }

    fn text(&mut self, data: &str) {
        if self.collect_text {
            self.extraction
                .content
                .get_or_insert_with(String::new)
                .push_str(data);
        }
    }
}

/// Runs one parse pass over `html` in the given mode
///
/// # Example
///
/// ```
/// use skimmer::crawler::{extract, ExtractionMode};
///
/// let html = r#"<p>Hello <a href="/b">world</a></p>"#;
/// let extraction = extract(html, &ExtractionMode::Content);
/// assert_eq!(extraction.content.as_deref(), Some("Hello world"));
/// assert_eq!(extraction.links, vec!["/b".to_string()]);
/// ```
pub fn extract(html: &str, mode: &ExtractionMode) -> Extraction {
    let mut collector = LinkTextCollector::new(mode);
    tokenize(html, &mut collector);
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_mode() -> ExtractionMode {
        ExtractionMode::LinkCrawl {
            target_id: "PageList-items-item".to_string(),
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl HtmlEventSink for Recorder {
        fn start_tag(&mut self, name: &str, _attrs: &[(&str, &str)]) {
            self.events.push(format!("<{}>", name));
        }

        fn text(&mut self, data: &str) {
            self.events.push(data.to_string());
        }
    }

    #[test]
    fn test_mode_from_target() {
        assert_eq!(ExtractionMode::from_target(None), ExtractionMode::Content);
        assert_eq!(
            ExtractionMode::from_target(Some("x")),
            ExtractionMode::LinkCrawl {
                target_id: "x".to_string()
            }
        );
        // Presence alone selects link mode
        assert!(!ExtractionMode::from_target(Some("")).collects_text());
    }

    #[test]
    fn test_events_in_document_order() {
        let mut recorder = Recorder::default();
        tokenize("<body><p>one</p><div>two<span>three</span></div></body>", &mut recorder);

        let body_events: Vec<&str> = recorder
            .events
            .iter()
            .map(String::as_str)
            .skip_while(|e| *e != "<body>")
            .collect();
        assert_eq!(
            body_events,
            vec!["<body>", "<p>", "one", "<div>", "two", "<span>", "three"]
        );
    }

    #[test]
    fn test_links_in_document_order_verbatim() {
        let html = r#"
            <html><head><link rel="stylesheet" href="/style.css"></head>
            <body>
                <a href="/b">B</a>
                <a href="https://example.com/c?x=1&amp;y=2">C</a>
                <a name="anchor">no href</a>
                <area href="mailto:someone@example.com">
            </body></html>
        "#;
        let extraction = extract(html, &link_mode());

        assert_eq!(
            extraction.links,
            vec![
                "/style.css".to_string(),
                "/b".to_string(),
                "https://example.com/c?x=1&y=2".to_string(),
                "mailto:someone@example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_duplicate_links_preserved() {
        let html = r#"<a href="/b">1</a><a href="/b">2</a><a href="/b">3</a>"#;
        let extraction = extract(html, &link_mode());
        assert_eq!(extraction.links.len(), 3);
    }

    #[test]
    fn test_links_collected_in_content_mode_too() {
        let html = r#"<a href="/b">B</a><a href="/c">C</a>"#;
        let extraction = extract(html, &ExtractionMode::Content);
        assert_eq!(extraction.links, vec!["/b".to_string(), "/c".to_string()]);
    }

    #[test]
    fn test_content_is_concatenated_text() {
        let html = r#"<html><body><h1>Title</h1><p>Hello <a href="/b">world</a>!</p></body></html>"#;
        let extraction = extract(html, &ExtractionMode::Content);

        assert_eq!(extraction.content.as_deref(), Some("TitleHello world!"));
    }

    #[test]
    fn test_content_excludes_link_targets() {
        let html = r#"<p><a href="https://example.com/secret">visible</a></p>"#;
        let content = extract(html, &ExtractionMode::Content).content.unwrap();

        assert_eq!(content, "visible");
        assert!(!content.contains("secret"));
    }

    #[test]
    fn test_link_mode_discards_text() {
        let html = r#"<p>Some text <a href="/b">B</a></p>"#;
        let extraction = extract(html, &link_mode());

        assert_eq!(extraction.content, None);
        assert_eq!(extraction.links, vec!["/b".to_string()]);
    }

    #[test]
    fn test_content_absent_without_text() {
        let extraction = extract("<html><head></head><body><img src=x></body></html>", &ExtractionMode::Content);
        assert_eq!(extraction.content, None);
    }

    #[test]
    fn test_entities_decoded_in_text() {
        let extraction = extract("<p>fish &amp; chips</p>", &ExtractionMode::Content);
        assert_eq!(extraction.content.as_deref(), Some("fish & chips"));
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let html = r#"<div><p>unclosed <a href="/b">link <b>bold</div></p><a href="/c""#;
        let extraction = extract(html, &ExtractionMode::Content);

        assert_eq!(extraction.links.first().map(String::as_str), Some("/b"));
        assert!(extraction.content.unwrap().contains("unclosed"));
    }

    #[test]
    fn test_noscript_markup_is_tokenized() {
        let html = r#"<a href="/a">a</a><noscript><a href="/z">z</a></noscript><a href="/b">b</a>"#;
        let extraction = extract(html, &ExtractionMode::Content);

        assert_eq!(
            extraction.links,
            vec!["/a".to_string(), "/z".to_string(), "/b".to_string()]
        );
        assert_eq!(extraction.content.as_deref(), Some("azb"));
    }

    #[test]
    fn test_stray_table_content_keeps_source_order() {
        let html = r#"<table><tr><td><a href="/first">1</a></td></tr><a href="/second">2</a></table>"#;
        let extraction = extract(html, &link_mode());

        assert_eq!(
            extraction.links,
            vec!["/first".to_string(), "/second".to_string()]
        );
    }

    #[test]
    fn test_markup_after_body_close_is_kept() {
        let html = r#"<body><p>x</p></body><a href="/late">late</a>"#;
        let extraction = extract(html, &ExtractionMode::Content);

        assert_eq!(extraction.links, vec!["/late".to_string()]);
        assert_eq!(extraction.content.as_deref(), Some("xlate"));
    }

    #[test]
    fn test_script_body_is_raw_text() {
        let html = r#"<script>var s = '<a href="/hidden">';</script><a href="/shown">s</a>"#;
        let extraction = extract(html, &link_mode());

        assert_eq!(extraction.links, vec!["/shown".to_string()]);
    }
}
