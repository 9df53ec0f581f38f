use anyhow::{Context, Result};
use autorename_core::RenameCandidate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub recursive: bool,
    pub include_hidden: bool,
    pub prefix: Option<String>,
    /// Lowercase, without the leading dot. Empty means every extension.
    pub extensions: Vec<String>,
    pub min_size_mb: Option<f64>,
    pub max_size_mb: Option<f64>,
}

impl ScanOptions {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub scanned_files: usize,
    pub matched: usize,
    pub skipped_hidden: usize,
    pub skipped_by_filter: usize,
}

/// Lists the files under `root` as rename candidates, sorted by path.
pub fn collect_candidates(
    root: &Path,
    options: &ScanOptions,
) -> Result<(Vec<RenameCandidate>, ScanStats)> {
    let mut stats = ScanStats::default();
    let mut files = Vec::<(PathBuf, fs::Metadata)>::new();

    if options.recursive {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("フォルダ走査に失敗しました: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let metadata = entry
                .metadata()
                .with_context(|| format!("メタデータ取得失敗: {}", entry.path().display()))?;
            files.push((entry.into_path(), metadata));
        }
    } else {
        for entry in fs::read_dir(root)
            .with_context(|| format!("フォルダを読めませんでした: {}", root.display()))?
        {
            let entry =
                entry.with_context(|| format!("エントリ読み取り失敗: {}", root.display()))?;
            let metadata = entry
                .metadata()
                .with_context(|| format!("メタデータ取得失敗: {}", entry.path().display()))?;
            if !metadata.is_file() {
                continue;
            }
            files.push((entry.path(), metadata));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Vec::with_capacity(files.len());
    for (path, metadata) in files {
        stats.scanned_files += 1;
        if is_hidden(&path) && !options.include_hidden {
            stats.skipped_hidden += 1;
            continue;
        }
        if !passes_filters(&path, metadata.len(), options) {
            stats.skipped_by_filter += 1;
            continue;
        }
        stats.matched += 1;
        out.push(to_candidate(&path, &metadata));
    }

    log::debug!(
        "scan finished: root={} scanned={} matched={}",
        root.display(),
        stats.scanned_files,
        stats.matched
    );
    Ok((out, stats))
}

fn to_candidate(path: &Path, metadata: &fs::Metadata) -> RenameCandidate {
    let name = path
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    let folder = path
        .parent()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = extension_of(&name);

    RenameCandidate {
        path: path.to_string_lossy().to_string(),
        name,
        folder,
        extension,
        created: epoch_seconds(metadata.created().ok()),
        modified: epoch_seconds(metadata.modified().ok()),
    }
}

/// Extension as the name shows it, dotfiles having none.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

fn epoch_seconds(time: Option<SystemTime>) -> i64 {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

fn passes_filters(path: &Path, size: u64, options: &ScanOptions) -> bool {
    let name = path
        .file_name()
        .map(|v| v.to_string_lossy())
        .unwrap_or_default();

    if let Some(prefix) = options.prefix.as_deref().filter(|p| !p.is_empty()) {
        if !name.starts_with(prefix) {
            return false;
        }
    }

    if !options.extensions.is_empty() {
        let ext = extension_of(&name);
        let ext = ext.trim_start_matches('.').to_lowercase();
        if !options.extensions.iter().any(|allowed| allowed == &ext) {
            return false;
        }
    }

    let size_mb = size as f64 / BYTES_PER_MB;
    if options.min_size_mb.is_some_and(|min| size_mb < min) {
        return false;
    }
    if options.max_size_mb.is_some_and(|max| size_mb > max) {
        return false;
    }
    true
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
