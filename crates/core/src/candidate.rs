use crate::render::{build_name, NameInputs};
use crate::schema::Schema;
use crate::timefmt::instant_from_epoch;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

const FALLBACK_FOLDER: &str = "folder";

/// A file considered for renaming, as reported by a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameCandidate {
    /// Unique key of the candidate within a batch.
    pub path: String,
    pub name: String,
    pub folder: String,
    /// With or without the leading dot.
    #[serde(default)]
    pub extension: String,
    /// Epoch seconds, `<= 0` when unknown.
    #[serde(default)]
    pub created: i64,
    #[serde(default, alias = "mtime")]
    pub modified: i64,
}

impl RenameCandidate {
    /// Last non-empty segment of the containing folder, either slash style.
    pub fn folder_name(&self) -> &str {
        self.folder
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .last()
            .unwrap_or(FALLBACK_FOLDER)
    }

    /// Name up to the last dot. A dot in first position does not count, so
    /// `.gitignore` keeps its whole name.
    pub fn original_stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }

    pub fn normalized_extension(&self) -> String {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            self.extension.clone()
        } else {
            format!(".{}", self.extension)
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Local>> {
        instant_from_epoch(self.created)
    }

    pub fn modified_at(&self) -> Option<DateTime<Local>> {
        instant_from_epoch(self.modified)
    }
}

/// Renders the name for a single candidate.
pub fn build_file_preview(
    schema: &Schema,
    candidate: &RenameCandidate,
    now: DateTime<Local>,
    sequence: Option<usize>,
) -> String {
    let extension = candidate.normalized_extension();
    let inputs = NameInputs {
        folder_name: candidate.folder_name(),
        original_stem: candidate.original_stem(),
        extension: &extension,
        created: candidate.created_at(),
        modified: candidate.modified_at(),
    };
    build_name(schema, &inputs, now, sequence)
}
