use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DEFAULT_PAD_WIDTH: usize = 3;
pub const DEFAULT_SEPARATOR: &str = "_";
pub const MAX_PAD_WIDTH: usize = 10;

/// One token of a naming schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenameComponent {
    FolderName,
    OriginalStem,
    DateCreated,
    TimeCreated,
    DateModified,
    TimeModified,
    Literal {
        #[serde(default, deserialize_with = "null_as_default")]
        value: String,
    },
    Sequence {
        #[serde(default = "default_pad_width", deserialize_with = "null_as_pad_width")]
        pad_width: usize,
    },
}

impl RenameComponent {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    pub fn sequence(pad_width: usize) -> Self {
        Self::Sequence { pad_width }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub components: Vec<RenameComponent>,
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Schema {
    pub fn new(components: Vec<RenameComponent>, separator: impl Into<String>) -> Self {
        Self {
            components,
            separator: separator.into(),
        }
    }

    pub fn has_sequence(&self) -> bool {
        self.components
            .iter()
            .any(|c| matches!(c, RenameComponent::Sequence { .. }))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            components: vec![
                RenameComponent::OriginalStem,
                RenameComponent::sequence(DEFAULT_PAD_WIDTH),
            ],
            separator: default_separator(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("空のコンポーネントがあります")]
    EmptyComponent,
    #[error("未対応コンポーネントです: {0}")]
    UnknownComponent(String),
    #[error("連番の桁数が不正です: {0}")]
    InvalidPadWidth(String),
}

/// Parses the compact form used on the command line, e.g. `stem`,
/// `literal:backup` or `sequence:4`.
pub fn parse_component(input: &str) -> Result<RenameComponent, SchemaError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::EmptyComponent);
    }

    let (kind, arg) = match trimmed.split_once(':') {
        Some((kind, arg)) => (kind.trim(), Some(arg)),
        None => (trimmed, None),
    };

    let component = match (kind, arg) {
        ("folder_name" | "folder", None) => RenameComponent::FolderName,
        ("original_stem" | "stem", None) => RenameComponent::OriginalStem,
        ("date_created", None) => RenameComponent::DateCreated,
        ("time_created", None) => RenameComponent::TimeCreated,
        ("date_modified", None) => RenameComponent::DateModified,
        ("time_modified", None) => RenameComponent::TimeModified,
        ("literal" | "text", Some(value)) => RenameComponent::literal(value),
        ("sequence" | "seq", None) => RenameComponent::sequence(DEFAULT_PAD_WIDTH),
        ("sequence" | "seq", Some(width)) => RenameComponent::sequence(parse_pad_width(width)?),
        _ => return Err(SchemaError::UnknownComponent(trimmed.to_string())),
    };

    Ok(component)
}

/// Parses a comma separated component list. Literal values cannot contain
/// commas in this form; use [`parse_component`] per token for that.
pub fn parse_schema(list: &str, separator: &str) -> Result<Schema, SchemaError> {
    let components = list
        .split(',')
        .map(parse_component)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Schema::new(components, separator))
}

fn parse_pad_width(raw: &str) -> Result<usize, SchemaError> {
    let width = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| SchemaError::InvalidPadWidth(raw.to_string()))?;
    if width > MAX_PAD_WIDTH {
        return Err(SchemaError::InvalidPadWidth(raw.to_string()));
    }
    Ok(width)
}

fn default_pad_width() -> usize {
    DEFAULT_PAD_WIDTH
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_pad_width<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let width = Option::<usize>::deserialize(deserializer)?.unwrap_or(DEFAULT_PAD_WIDTH);
    if width > MAX_PAD_WIDTH {
        return Err(D::Error::custom(format!(
            "pad_width must be at most {MAX_PAD_WIDTH}, got {width}"
        )));
    }
    Ok(width)
}
