mod candidate;
mod planner;
mod render;
mod sanitize;
mod schema;
mod timefmt;

pub use candidate::{build_file_preview, RenameCandidate};
pub use planner::{
    build_all_previews, build_all_previews_now, PreviewEntry, PreviewStats, RenamePreview,
};
pub use render::{build_name, render_preview_sample, NameInputs};
pub use sanitize::sanitize_fragment;
pub use schema::{
    parse_component, parse_schema, RenameComponent, Schema, SchemaError, DEFAULT_PAD_WIDTH,
    DEFAULT_SEPARATOR, MAX_PAD_WIDTH,
};
pub use timefmt::{format_date, format_time, instant_from_epoch};
