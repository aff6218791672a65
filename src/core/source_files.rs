use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

/// Directory under the project root that holds application sources.
pub const SOURCE_DIR: &str = "lib";

/// Code generators' output, never edited.
pub const GENERATED_FILE_PATTERNS: &[&str] = &[
    "**/*.g.dart",
    "**/*.freezed.dart",
    "**/*.pb.dart",
    "**/*.pbjson.dart",
    // `flutter gen-l10n` output when written into the source tree
    "**/app_localizations*.dart",
];

/// Result of scanning files.
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

/// Collect `lib/**/*.dart` under `project_root`, minus generated files.
///
/// Paths are returned sorted so runs are reproducible.
pub fn scan_source_files(project_root: &Path) -> ScanResult {
    let generated: Vec<Pattern> = GENERATED_FILE_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();
    let mut skipped_count = 0;

    let source_dir = project_root.join(SOURCE_DIR);
    if !source_dir.is_dir() {
        return ScanResult {
            files,
            skipped_count,
        };
    }

    for entry in WalkDir::new(&source_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => {
                skipped_count += 1;
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_source_file(path) {
            continue;
        }
        let relative = path.strip_prefix(project_root).unwrap_or(path);
        if generated.iter().any(|p| p.matches_path(relative)) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_source_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("dart"))
}
