use scraper::{Html, Node};

/// Average reading speed used for estimates.
pub const WORDS_PER_MINUTE: u32 = 265;

pub trait WordCounter: Send + Sync {
    fn count(&self, text: &str) -> u32;
}

/// Counts runs of letters and digits from any script.
///
/// An apostrophe between two word characters does not split the word, so
/// `don't` and `it’s` count once.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWordCounter;

impl WordCounter for UnicodeWordCounter {
    fn count(&self, text: &str) -> u32 {
        let mut words = 0u32;
        let mut in_word = false;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            let joins_word = in_word
                && matches!(c, '\'' | '’')
                && chars.peek().is_some_and(|next| next.is_alphanumeric());
            if c.is_alphanumeric() || joins_word {
                if !in_word {
                    words = words.saturating_add(1);
                    in_word = true;
                }
            } else {
                in_word = false;
            }
        }
        words
    }
}

/// Elements whose text never runs on into a neighbour's.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// Text content of an HTML fragment with every tag removed.
///
/// Entities are decoded and the contents of `script` and `style` elements are
/// dropped. Text inside one block element is concatenated as-is; a space
/// separates text from different blocks or table cells.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());
    let mut previous_block = None;
    for node in fragment.root_element().descendants() {
        let Node::Text(content) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if matches!(el.name(), "script" | "style"))
        });
        if hidden {
            continue;
        }

        let block = node
            .ancestors()
            .find(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()))
            })
            .map(|ancestor| ancestor.id());
        let joins_previous = text.is_empty()
            || block == previous_block
            || text.ends_with(char::is_whitespace)
            || content.starts_with(char::is_whitespace);
        if !joins_previous {
            text.push(' ');
        }
        text.push_str(content);
        previous_block = block;
    }
    text
}

/// Whole minutes for `words` at `words_per_minute`, halves rounded up.
pub fn minutes_for_words(words: u32, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1);
    words.saturating_add(wpm / 2) / wpm
}

/// Reading time in whole minutes for rendered article HTML.
///
/// No lower bound: a short article reads in 0 minutes.
pub struct ReadingTimeEstimator {
    counter: Box<dyn WordCounter>,
    words_per_minute: u32,
}

impl ReadingTimeEstimator {
    pub fn new(counter: Box<dyn WordCounter>, words_per_minute: u32) -> Self {
        Self {
            counter,
            words_per_minute,
        }
    }

    pub fn estimate(&self, html: &str) -> u32 {
        let words = self.counter.count(&strip_markup(html));
        minutes_for_words(words, self.words_per_minute)
    }
}

impl Default for ReadingTimeEstimator {
    fn default() -> Self {
        Self::new(Box::new(UnicodeWordCounter), WORDS_PER_MINUTE)
    }
}
