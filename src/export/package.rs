// Export packaging: one JSON file for a single width, a zip request for several

use super::tokens::{format, to_json_pretty};
use super::{ExportError, ExportRange};
use crate::columns::{ColumnSet, ColumnStore};
use crate::percent::compute_range;
use crate::types::{BaseWidth, ExportMode, NamedFile};
use tracing::debug;

const DEFAULT_ARCHIVE_NAME: &str = "table-widths.zip";

/// What an export produces
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPackage {
    Single(NamedFile),
    Archive {
        filename: String,
        files: Vec<NamedFile>,
    },
}

impl ExportPackage {
    /// Name the output should be saved under
    pub fn filename(&self) -> &str {
        match self {
            ExportPackage::Single(file) => &file.filename,
            ExportPackage::Archive { filename, .. } => filename,
        }
    }

    pub fn file_count(&self) -> usize {
        match self {
            ExportPackage::Single(_) => 1,
            ExportPackage::Archive { files, .. } => files.len(),
        }
    }
}

/// Builds the export for `widths` in order.
///
/// A single width produces `width-<w>px.json` and ignores the prefix. Several widths
/// produce one document per width for archiving, named with the trimmed prefix when
/// one is given.
pub fn package(
    widths: &[BaseWidth],
    range: ExportRange,
    file_prefix: Option<&str>,
) -> Result<ExportPackage, ExportError> {
    let prefix = normalize_prefix(file_prefix);

    match widths {
        [] => Err(ExportError::Empty),
        [width] => {
            let content = render_document(*width, range)?;
            debug!(%width, "packaged single export");
            Ok(ExportPackage::Single(NamedFile {
                filename: single_file_name(*width),
                content,
            }))
        }
        _ => {
            let files = widths
                .iter()
                .map(|&width| {
                    Ok(NamedFile {
                        filename: archive_entry_name(prefix, width),
                        content: render_document(width, range)?,
                    })
                })
                .collect::<Result<Vec<_>, ExportError>>()?;
            let filename = archive_name(prefix);
            debug!(count = files.len(), %filename, "packaged archive export");
            Ok(ExportPackage::Archive { filename, files })
        }
    }
}

/// Widths an export covers.
///
/// `All` prepends the current width unless it is missing or already saved; `Saved`
/// ignores the current width entirely.
pub fn select_widths<S: ColumnStore>(
    mode: ExportMode,
    current: Option<BaseWidth>,
    saved: &ColumnSet<S>,
) -> Vec<BaseWidth> {
    let mut widths = Vec::with_capacity(saved.len() + 1);
    if mode == ExportMode::All {
        if let Some(current) = current.filter(|&w| !saved.contains(w)) {
            widths.push(current);
        }
    }
    widths.extend(saved.widths());
    widths
}

pub fn single_file_name(width: BaseWidth) -> String {
    format!("width-{}px.json", width)
}

pub fn archive_name(prefix: Option<&str>) -> String {
    match normalize_prefix(prefix) {
        Some(prefix) => format!("{}.tokens.zip", prefix),
        None => DEFAULT_ARCHIVE_NAME.to_string(),
    }
}

fn archive_entry_name(prefix: Option<&str>, width: BaseWidth) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}.tokens.json", prefix, width),
        None => single_file_name(width),
    }
}

fn normalize_prefix(prefix: Option<&str>) -> Option<&str> {
    prefix.map(str::trim).filter(|p| !p.is_empty())
}

fn render_document(width: BaseWidth, range: ExportRange) -> Result<String, ExportError> {
    let entries = compute_range(width, range.min(), range.max());
    to_json_pretty(&format(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SavedColumn;
    use serde_json::Value;

    struct NullStore;

    impl ColumnStore for NullStore {
        fn load(&self) -> Vec<SavedColumn> {
            Vec::new()
        }

        fn save(&self, _columns: &[SavedColumn]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn width(value: f64) -> BaseWidth {
        BaseWidth::new(value).unwrap()
    }

    fn full_range() -> ExportRange {
        ExportRange::new(1, 99).unwrap()
    }

    #[test]
    fn test_single_width_exports_one_file() {
        let package = package(&[width(800.0)], full_range(), Some("ignored")).unwrap();
        let ExportPackage::Single(file) = package else {
            panic!("expected single file");
        };
        assert_eq!(file.filename, "width-800px.json");

        let parsed: serde_json::Map<String, Value> = serde_json::from_str(&file.content).unwrap();
        assert_eq!(parsed.len(), 99);
        assert_eq!(parsed["50%"]["$value"], 400);
        assert!(file.content.contains("\n  \"1%\": {"));
    }

    #[test]
    fn test_single_width_respects_range() {
        let range = ExportRange::new(90, 100).unwrap();
        let package = package(&[width(375.5)], range, None).unwrap();
        assert_eq!(package.filename(), "width-375.5px.json");
        assert_eq!(package.file_count(), 1);

        let ExportPackage::Single(file) = package else {
            panic!("expected single file");
        };
        let parsed: serde_json::Map<String, Value> = serde_json::from_str(&file.content).unwrap();
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys.first(), Some(&"90%"));
        assert_eq!(keys.last(), Some(&"100%"));
        assert_eq!(parsed["100%"]["$value"], 375.5);
    }

    #[test]
    fn test_multiple_widths_with_prefix() {
        let widths = [width(800.0), width(900.0)];
        let package = package(&widths, full_range(), Some("  foo ")).unwrap();
        let ExportPackage::Archive { filename, files } = package else {
            panic!("expected archive");
        };
        assert_eq!(filename, "foo.tokens.zip");
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["foo.800.tokens.json", "foo.900.tokens.json"]);

        let second: serde_json::Map<String, Value> =
            serde_json::from_str(&files[1].content).unwrap();
        assert_eq!(second["10%"]["$value"], 90);
    }

    #[test]
    fn test_multiple_widths_without_prefix() {
        let widths = [width(1200.0), width(640.25)];
        for prefix in [None, Some(""), Some("   ")] {
            let package = package(&widths, full_range(), prefix).unwrap();
            let ExportPackage::Archive { filename, files } = package else {
                panic!("expected archive");
            };
            assert_eq!(filename, "table-widths.zip");
            let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
            assert_eq!(names, vec!["width-1200px.json", "width-640.25px.json"]);
        }
    }

    #[test]
    fn test_empty_export_fails() {
        assert!(matches!(
            package(&[], full_range(), Some("foo")),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn test_select_widths_all_prepends_current() {
        let mut saved = ColumnSet::restore(NullStore);
        saved.add(width(900.0)).unwrap();
        saved.add(width(1100.0)).unwrap();

        let widths = select_widths(ExportMode::All, Some(width(1000.0)), &saved);
        assert_eq!(widths, vec![width(1000.0), width(900.0), width(1100.0)]);

        let widths = select_widths(ExportMode::All, Some(width(1100.0)), &saved);
        assert_eq!(widths, vec![width(900.0), width(1100.0)]);

        let widths = select_widths(ExportMode::All, None, &saved);
        assert_eq!(widths, vec![width(900.0), width(1100.0)]);
    }

    #[test]
    fn test_select_widths_saved_excludes_current() {
        let mut saved = ColumnSet::restore(NullStore);
        assert!(select_widths(ExportMode::Saved, Some(width(1000.0)), &saved).is_empty());

        saved.add(width(900.0)).unwrap();
        let widths = select_widths(ExportMode::Saved, Some(width(1000.0)), &saved);
        assert_eq!(widths, vec![width(900.0)]);
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name(Some("brand")), "brand.tokens.zip");
        assert_eq!(archive_name(Some(" ")), "table-widths.zip");
        assert_eq!(archive_name(None), "table-widths.zip");
    }
}
