//! Front matter and the page metadata derived from it.
//!
//! Every markdown page may open with a YAML block:
//!
//! ```text
//! ---
//! title: Hello
//! description: First post
//! date: 2024 January 05
//! format: blog_entry
//! require_prism: true
//! ---
//! ```
//!
//! The whole block is kept as a [`FrontMatter`] map so format-specific code
//! can read its own keys (`id` for resume parts, `require_prism` for syntax
//! highlighting). [`Metadata`] adds typed projections of the well-known keys:
//!
//! | Key | Projection | Validation |
//! |-----|------------|------------|
//! | `title` | `Option<String>` | string values only |
//! | `description` | `Option<String>` | string values only |
//! | `date` | `Option<NaiveDate>` | must match `<year> <Month> <day>` when present |
//! | `format` | [`Format`] | unknown tags are kept, never rejected |
//!
//! A `blog_entry` page without a date is rejected: the blog index cannot
//! place it.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// `chrono` pattern for `date` values, e.g. `2024 January 05`.
pub const DATE_FORMAT: &str = "%Y %B %d";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("unsupported front matter key {0}")]
    UnsupportedKey(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum MetadataError {
    #[error("invalid `date` value {0}, expected `<year> <Month> <day>`, e.g. `2024 January 05`")]
    InvalidDate(String),
    #[error("`date` is required for the `{0}` format")]
    MissingDate(&'static str),
}

/// A single front matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<FrontMatterValue>),
    Map(BTreeMap<String, FrontMatterValue>),
}

impl FrontMatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn from_yaml(value: serde_yaml::Value) -> Result<Self, FrontMatterError> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => Self::Map(map_from_yaml(mapping)?),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }
}

impl fmt::Display for FrontMatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}

fn map_from_yaml(
    mapping: serde_yaml::Mapping,
) -> Result<BTreeMap<String, FrontMatterValue>, FrontMatterError> {
    use serde_yaml::Value;

    let mut map = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => return Err(FrontMatterError::UnsupportedKey(format!("{other:?}"))),
        };
        map.insert(key, FrontMatterValue::from_yaml(value)?);
    }
    Ok(map)
}

/// The complete front matter of a page, exactly as declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(BTreeMap<String, FrontMatterValue>);

impl FrontMatter {
    /// Parse the YAML text of a front matter block. An empty block is an
    /// empty map.
    pub fn parse(yaml: &str) -> Result<Self, FrontMatterError> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Mapping(mapping) => Ok(Self(map_from_yaml(mapping)?)),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        self.0.insert(key.into(), value);
    }

    /// String value under `key`; other value kinds read as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontMatterValue::as_str)
    }

    /// True only when `key` holds the YAML boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .and_then(FrontMatterValue::as_bool)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// How a page is rendered, from the `format` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// A plain page in the site layout.
    Standard,
    /// A dated post with a table of contents, listed in the blog index.
    BlogEntry,
    /// A fragment of the resume page; never rendered on its own.
    ResumePart,
    /// A `format` value this build does not know.
    Unrecognized(String),
    /// No `format` key, or a non-string value.
    Missing,
}

impl Format {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "standard" => Self::Standard,
            "blog_entry" => Self::BlogEntry,
            "resume_part" => Self::ResumePart,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Standard => Some("standard"),
            Self::BlogEntry => Some("blog_entry"),
            Self::ResumePart => Some("resume_part"),
            Self::Unrecognized(tag) => Some(tag.as_str()),
            Self::Missing => None,
        }
    }
}

/// Validated page metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub format: Format,
    /// Every front matter entry, including the ones projected above.
    pub extra: FrontMatter,
}

impl Metadata {
    pub fn from_front_matter(extra: FrontMatter) -> Result<Self, MetadataError> {
        let date = match extra.get("date") {
            None => None,
            Some(FrontMatterValue::String(s)) => Some(parse_date(s)?),
            Some(other) => return Err(MetadataError::InvalidDate(other.to_string())),
        };

        let format = extra
            .text("format")
            .map(Format::from_tag)
            .unwrap_or(Format::Missing);

        if format == Format::BlogEntry && date.is_none() {
            return Err(MetadataError::MissingDate("blog_entry"));
        }

        Ok(Self {
            title: extra.text("title").map(String::from),
            description: extra.text("description").map(String::from),
            date,
            format,
            extra,
        })
    }
}

/// Parse a `date` value such as `2024 January 05`.
pub fn parse_date(value: &str) -> Result<NaiveDate, MetadataError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| MetadataError::InvalidDate(format!("{value:?}")))
}
