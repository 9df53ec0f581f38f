use crate::sanitize::sanitize_fragment;
use crate::schema::{RenameComponent, Schema, MAX_PAD_WIDTH};
use crate::timefmt::{format_date, format_time};
use chrono::{DateTime, Local, TimeZone};

const FALLBACK_STEM: &str = "file";

/// Everything the evaluator needs to know about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInputs<'a> {
    pub folder_name: &'a str,
    pub original_stem: &'a str,
    /// Appended verbatim, leading dot included.
    pub extension: &'a str,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
}

/// Renders a single file name from `schema`.
///
/// Missing timestamps fall back to `now`. A `sequence` component only
/// renders when `sequence` is `Some`; fragments that render empty are
/// skipped entirely, separator included. When nothing renders at all the
/// sanitized original stem is used, then `"file"`.
pub fn build_name(
    schema: &Schema,
    inputs: &NameInputs<'_>,
    now: DateTime<Local>,
    sequence: Option<usize>,
) -> String {
    let created = inputs.created.unwrap_or(now);
    let modified = inputs.modified.unwrap_or(now);

    let mut parts: Vec<String> = Vec::with_capacity(schema.components.len());
    for component in &schema.components {
        let fragment = match component {
            RenameComponent::FolderName => sanitize_fragment(inputs.folder_name),
            RenameComponent::OriginalStem => sanitize_fragment(inputs.original_stem),
            RenameComponent::DateCreated => format_date(&created),
            RenameComponent::TimeCreated => format_time(&created),
            RenameComponent::DateModified => format_date(&modified),
            RenameComponent::TimeModified => format_time(&modified),
            RenameComponent::Literal { value } => sanitize_fragment(value),
            RenameComponent::Sequence { pad_width } => match sequence {
                Some(n) => format!("{:0width$}", n, width = (*pad_width).min(MAX_PAD_WIDTH)),
                None => String::new(),
            },
        };
        if !fragment.is_empty() {
            parts.push(fragment);
        }
    }

    let stem = if parts.is_empty() {
        let fallback = sanitize_fragment(inputs.original_stem);
        if fallback.is_empty() {
            FALLBACK_STEM.to_string()
        } else {
            fallback
        }
    } else {
        parts.join(&schema.separator)
    };

    format!("{}{}", stem, inputs.extension)
}

/// Renders `schema` against fixed placeholder metadata so the shape of a
/// schema can be shown without any real files.
pub fn render_preview_sample(schema: &Schema) -> String {
    let created = Local.with_ymd_and_hms(2024, 4, 15, 9, 30, 0).earliest();
    let modified = Local.with_ymd_and_hms(2024, 6, 20, 14, 45, 0).earliest();
    let inputs = NameInputs {
        folder_name: "Downloads",
        original_stem: "photo",
        extension: ".jpg",
        created,
        modified,
    };
    build_name(schema, &inputs, Local::now(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("valid local time")
    }

    fn inputs<'a>(folder: &'a str, stem: &'a str, ext: &'a str) -> NameInputs<'a> {
        NameInputs {
            folder_name: folder,
            original_stem: stem,
            extension: ext,
            created: Some(fixed(2023, 1, 2, 3, 4, 5)),
            modified: Some(fixed(2024, 11, 30, 22, 10, 0)),
        }
    }

    fn now() -> DateTime<Local> {
        fixed(2030, 7, 8, 12, 0, 1)
    }

    #[test]
    fn renders_components_in_order() {
        let schema = Schema::new(
            vec![
                RenameComponent::FolderName,
                RenameComponent::literal("backup"),
                RenameComponent::OriginalStem,
            ],
            "_",
        );
        let name = build_name(&schema, &inputs("My Docs", "report", ".pdf"), now(), None);
        assert_eq!(name, "My Docs_backup_report.pdf");
    }

    #[test]
    fn renders_date_and_time_tokens() {
        let schema = Schema::new(
            vec![
                RenameComponent::DateCreated,
                RenameComponent::TimeCreated,
                RenameComponent::DateModified,
                RenameComponent::TimeModified,
            ],
            "-",
        );
        let name = build_name(&schema, &inputs("f", "s", ".txt"), now(), None);
        assert_eq!(name, "20230102-030405-20241130-221000.txt");
    }

    #[test]
    fn missing_timestamps_use_now() {
        let schema = Schema::new(
            vec![RenameComponent::DateCreated, RenameComponent::TimeModified],
            "_",
        );
        let mut i = inputs("f", "s", "");
        i.created = None;
        i.modified = None;
        assert_eq!(build_name(&schema, &i, now(), None), "20300708_120001");
    }

    #[test]
    fn sequence_renders_only_when_supplied() {
        let schema = Schema::new(
            vec![RenameComponent::OriginalStem, RenameComponent::sequence(3)],
            "_",
        );
        let i = inputs("f", "photo", ".jpg");
        assert_eq!(build_name(&schema, &i, now(), None), "photo.jpg");
        assert_eq!(build_name(&schema, &i, now(), Some(7)), "photo_007.jpg");
        assert_eq!(build_name(&schema, &i, now(), Some(1234)), "photo_1234.jpg");
    }

    #[test]
    fn zero_pad_width_renders_plain_number() {
        let schema = Schema::new(vec![RenameComponent::sequence(0)], "_");
        let name = build_name(&schema, &inputs("f", "s", ".x"), now(), Some(12));
        assert_eq!(name, "12.x");
    }

    #[test]
    fn huge_pad_width_is_clamped() {
        let schema = Schema::new(vec![RenameComponent::sequence(100_000)], "_");
        let name = build_name(&schema, &inputs("f", "s", ".x"), now(), Some(1));
        assert_eq!(name, "0000000001.x");
    }

    #[test]
    fn empty_fragments_do_not_add_separators() {
        let schema = Schema::new(
            vec![
                RenameComponent::literal("..."),
                RenameComponent::OriginalStem,
                RenameComponent::literal(""),
                RenameComponent::sequence(3),
                RenameComponent::literal("end"),
            ],
            "__",
        );
        let name = build_name(&schema, &inputs("f", "photo", ".jpg"), now(), None);
        assert_eq!(name, "photo__end.jpg");
    }

    #[test]
    fn empty_schema_falls_back_to_sanitized_stem() {
        let schema = Schema::new(Vec::new(), "_");
        let name = build_name(&schema, &inputs("f", " my:photo ", ".jpg"), now(), None);
        assert_eq!(name, "my_photo.jpg");
    }

    #[test]
    fn falls_back_to_file_when_stem_is_empty() {
        let schema = Schema::new(vec![RenameComponent::sequence(3)], "_");
        let name = build_name(&schema, &inputs("f", "...", ".dat"), now(), None);
        assert_eq!(name, "file.dat");
    }

    #[test]
    fn extension_is_not_sanitized() {
        let schema = Schema::new(vec![RenameComponent::OriginalStem], "_");
        let name = build_name(&schema, &inputs("f", "a", ".b|c"), now(), None);
        assert_eq!(name, "a.b|c");
    }

    #[test]
    fn sample_uses_placeholder_metadata() {
        let schema = Schema::new(
            vec![
                RenameComponent::FolderName,
                RenameComponent::DateCreated,
                RenameComponent::TimeModified,
                RenameComponent::OriginalStem,
                RenameComponent::sequence(3),
            ],
            "_",
        );
        assert_eq!(
            render_preview_sample(&schema),
            "Downloads_20240415_144500_photo.jpg"
        );
    }
}
