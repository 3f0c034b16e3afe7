use manuscript_core::{is_external_link, slugify, SiteConfig, Slugger};
use pulldown_cmark::{html, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::escape::escape_html;
use crate::highlight::{Highlighter, SyntectHighlighter};

const EXTERNAL_LINK_ATTRS: &str = r#" target="_blank" rel="nofollow noopener noreferrer""#;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to highlight {language} code: {message}")]
    Highlight { language: String, message: String },
}

pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// Markdown to HTML over the pulldown-cmark event stream.
///
/// Stages run in a fixed order: smart punctuation (parser option), heading
/// slugs with self-link anchors, external link annotation, code highlighting,
/// then HTML serialization. The output is not sanitized.
pub struct PulldownRenderer {
    site_host: Option<String>,
    highlighter: Box<dyn Highlighter>,
}

impl PulldownRenderer {
    pub fn new(site_host: Option<String>, highlighter: Box<dyn Highlighter>) -> Self {
        Self {
            site_host,
            highlighter,
        }
    }

    /// Renderer treating links to `site`'s host as internal, with syntect highlighting.
    pub fn for_site(site: &SiteConfig) -> Self {
        Self::new(site.host(), Box::new(SyntectHighlighter::new()))
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, markdown_options()).collect();
        let events = anchor_headings(events);
        let events = annotate_external_links(events, self.site_host.as_deref());
        let events = highlight_code(events, self.highlighter.as_ref())?;

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Wrap every heading's content in `<a href="#slug">` and give the heading `id="slug"`.
///
/// Headings whose text yields an empty slug are emitted without id or anchor.
fn anchor_headings(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut slugger = Slugger::new();
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        let Event::Start(Tag::Heading { level, .. }) = event else {
            out.push(event);
            continue;
        };

        let mut inner = Vec::new();
        for event in iter.by_ref() {
            if matches!(event, Event::End(TagEnd::Heading(_))) {
                break;
            }
            inner.push(event);
        }

        let text = plain_text(&inner);
        let tag = heading_tag(level);
        // Nothing to link to when the text has no slug characters at all.
        if slugify(&text).is_empty() {
            out.push(Event::Html(format!("<{tag}>").into()));
            out.extend(inner);
            out.push(Event::Html(format!("</{tag}>\n").into()));
            continue;
        }

        let slug = escape_html(&slugger.slug(&text));
        out.push(Event::Html(
            format!("<{tag} id=\"{slug}\"><a href=\"#{slug}\">").into(),
        ));
        out.extend(inner);
        out.push(Event::Html(format!("</a></{tag}>\n").into()));
    }
    out
}

fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Open links pointing off-site in a new tab, without referrer or endorsement.
fn annotate_external_links<'a>(events: Vec<Event<'a>>, site_host: Option<&str>) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    // One entry per open link: whether its end tag must be emitted by hand.
    let mut rewritten = Vec::new();

    for event in events {
        match event {
            Event::Start(Tag::Link {
                ref dest_url,
                ref title,
                ..
            }) if is_external_link(dest_url, site_host) => {
                let mut open = format!("<a href=\"{}\"", escape_html(dest_url));
                if !title.is_empty() {
                    open.push_str(&format!(" title=\"{}\"", escape_html(title)));
                }
                open.push_str(EXTERNAL_LINK_ATTRS);
                open.push('>');
                rewritten.push(true);
                out.push(Event::InlineHtml(open.into()));
            }
            Event::Start(Tag::Link { .. }) => {
                rewritten.push(false);
                out.push(event);
            }
            Event::End(TagEnd::Link) => {
                if rewritten.pop().unwrap_or(false) {
                    out.push(Event::InlineHtml("</a>".into()));
                } else {
                    out.push(event);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Replace code blocks and inline code with highlighted HTML.
fn highlight_code<'a>(
    events: Vec<Event<'a>>,
    highlighter: &dyn Highlighter,
) -> Result<Vec<Event<'a>>, RenderError> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match &kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                let mut code = String::new();
                for event in iter.by_ref() {
                    match event {
                        Event::Text(text) => code.push_str(&text),
                        Event::End(TagEnd::CodeBlock) => break,
                        _ => {}
                    }
                }
                let html = highlighter.highlight_block(&language, &code)?;
                out.push(Event::Html(html.into()));
            }
            Event::Code(code) => {
                let html = highlighter.highlight_inline(&code)?;
                out.push(Event::InlineHtml(html.into()));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
