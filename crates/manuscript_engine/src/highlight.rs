use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::escape::escape_html;
use crate::render::RenderError;

/// Separates the language from the code in an inline span: `` `css›.a { color: red }` ``.
const INLINE_LANGUAGE_MARKER: char = '›';

/// Fence tokens the bundled grammars do not know under that name.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("jsx", "js"),
    ("mjs", "js"),
    ("cjs", "js"),
    ("javascript", "js"),
    ("shell", "sh"),
    ("console", "sh"),
    ("yml", "yaml"),
];

pub trait Highlighter: Send + Sync {
    /// Render a fenced or indented code block, `<pre>` included.
    fn highlight_block(&self, language: &str, code: &str) -> Result<String, RenderError>;

    /// Render an inline code span, `<code>` included.
    fn highlight_inline(&self, code: &str) -> Result<String, RenderError>;
}

/// Class-based highlighting over syntect's bundled grammars.
///
/// Token spans carry space-separated scope classes; styling them is left to
/// the site's stylesheet. Unknown languages fall back to escaped text with
/// the `language-text` class.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }
        let lower = language.to_ascii_lowercase();
        let token = LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map(|(_, target)| *target)
            .unwrap_or(lower.as_str());
        self.syntaxes.find_syntax_by_token(token)
    }

    fn highlight_with(&self, syntax: &SyntaxReference, code: &str) -> Result<String, RenderError> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntaxes,
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| RenderError::Highlight {
                    language: syntax.name.clone(),
                    message: e.to_string(),
                })?;
        }
        Ok(generator.finalize())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight_block(&self, language: &str, code: &str) -> Result<String, RenderError> {
        let (class, body) = match self.find_syntax(language) {
            Some(syntax) => (language_class(language), self.highlight_with(syntax, code)?),
            None => ("text".to_string(), escape_html(code)),
        };
        Ok(format!(
            "<pre class=\"language-{class}\"><code class=\"language-{class}\">{body}</code></pre>\n"
        ))
    }

    fn highlight_inline(&self, code: &str) -> Result<String, RenderError> {
        if let Some((language, rest)) = code.split_once(INLINE_LANGUAGE_MARKER) {
            if let Some(syntax) = self.find_syntax(language.trim()) {
                let body = self.highlight_with(syntax, rest)?;
                return Ok(format!(
                    "<code class=\"language-{}\">{body}</code>",
                    language_class(language.trim())
                ));
            }
        }
        Ok(format!(
            "<code class=\"language-text\">{}</code>",
            escape_html(code)
        ))
    }
}

fn language_class(language: &str) -> String {
    escape_html(&language.to_ascii_lowercase())
}
