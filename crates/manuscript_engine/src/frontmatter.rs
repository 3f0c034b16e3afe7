use std::collections::BTreeMap;

use manuscript_core::{DateParseError, FrontMatter, PublishDate};
use serde_yaml::{Mapping, Value};
use site_logging::site_warn;

const DELIMITER: &str = "---";

/// Keys the assembled article record defines itself; front matter cannot override them.
const RESERVED_KEYS: &[&str] = &[
    "slug",
    "timeToRead",
    "heroImageUrl",
    "editUrl",
    "discussUrl",
    "contentHtml",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontMatterError {
    #[error("missing opening `---` delimiter")]
    MissingOpeningDelimiter,
    #[error("missing closing `---` delimiter")]
    MissingClosingDelimiter,
    #[error("invalid yaml: {0}")]
    InvalidYaml(String),
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),
    #[error("value of `{0}` must be a string, number or boolean")]
    NotAScalar(String),
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
}

/// Split a source file into its YAML block and the markdown body after it.
///
/// The first line must be `---` (a UTF-8 BOM is skipped) and the block ends at
/// the next line that is exactly `---`, ignoring trailing whitespace.
pub fn split_front_matter(source: &str) -> Result<(&str, &str), FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let (first, yaml_and_body) = split_line(source);
    if first.trim_end() != DELIMITER {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    }

    let mut rest = yaml_and_body;
    let mut yaml_len = 0;
    while !rest.is_empty() {
        let (line, after) = split_line(rest);
        if line.trim_end() == DELIMITER {
            return Ok((&yaml_and_body[..yaml_len], after));
        }
        yaml_len += rest.len() - after.len();
        rest = after;
    }
    Err(FrontMatterError::MissingClosingDelimiter)
}

/// Parse the YAML block into [`FrontMatter`]; `title` and `date` are required.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    let value: Value = if yaml.trim().is_empty() {
        Value::Mapping(Mapping::new())
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?
    };
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut title = None;
    let mut date = None;
    let mut spoiler = None;
    let mut hero_image_alt = None;
    let mut extra = BTreeMap::new();

    for (key, value) in mapping {
        let key = scalar_to_string(&key).ok_or(FrontMatterError::NotAMapping)?;
        match key.as_str() {
            "title" => title = Some(required_scalar(&key, &value)?),
            "date" => date = Some(PublishDate::parse(&required_scalar(&key, &value)?)?),
            "spoiler" => spoiler = optional_scalar(&key, &value)?,
            "heroImageAlt" => hero_image_alt = optional_scalar(&key, &value)?,
            reserved if RESERVED_KEYS.contains(&reserved) => {
                site_warn!("ignoring reserved front matter key `{}`", reserved);
            }
            _ => {
                let json = serde_json::to_value(&value)
                    .map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;
                extra.insert(key, json);
            }
        }
    }

    let mut front_matter = FrontMatter::new(
        title.ok_or(FrontMatterError::MissingKey("title"))?,
        date.ok_or(FrontMatterError::MissingKey("date"))?,
    );
    front_matter.spoiler = spoiler.unwrap_or_default();
    front_matter.hero_image_alt = hero_image_alt;
    front_matter.extra = extra;
    Ok(front_matter)
}

fn split_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => (text, ""),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_scalar(key: &str, value: &Value) -> Result<String, FrontMatterError> {
    scalar_to_string(value).ok_or_else(|| FrontMatterError::NotAScalar(key.to_string()))
}

fn optional_scalar(key: &str, value: &Value) -> Result<Option<String>, FrontMatterError> {
    match value {
        Value::Null => Ok(None),
        other => required_scalar(key, other).map(Some),
    }
}
