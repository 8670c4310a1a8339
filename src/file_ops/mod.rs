// File operations: writing packaged exports to disk

use crate::export::{build_archive, ExportPackage, ZipArchiveBuilder};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Renders the package (zipping multi-width exports) and saves it at `destination`
pub async fn save_package(package: ExportPackage, destination: PathBuf) -> Result<PathBuf> {
    let bytes = match package {
        ExportPackage::Single(file) => file.content.into_bytes(),
        ExportPackage::Archive { files, .. } => {
            let count = files.len();
            let bytes = build_archive(ZipArchiveBuilder, files).await?;
            info!(files = count, bytes = bytes.len(), "built export archive");
            bytes
        }
    };

    write_atomically(&destination, &bytes)?;
    info!(path = %destination.display(), "export written");
    Ok(destination)
}

// Writes to a temporary sibling first so a failed export never leaves a partial file
pub fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("Not a file path: {}", destination.display()))?;
    let temp_path = parent.join(format!(".export_temp_{}_{}", std::process::id(), name));

    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write: {}", temp_path.display()));
    }
    if let Err(e) = fs::rename(&temp_path, destination) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to finalize: {}", destination.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{package, ExportRange};
    use crate::types::BaseWidth;
    use std::io::Cursor;

    fn widths(values: &[f64]) -> Vec<BaseWidth> {
        values.iter().map(|&v| BaseWidth::new(v).unwrap()).collect()
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_single_export_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = package(&widths(&[800.0]), ExportRange::default(), None).unwrap();
        let destination = dir.path().join(pkg.filename());

        let written = save_package(pkg, destination.clone()).await.unwrap();
        assert_eq!(written, destination);
        assert_eq!(dir_entries(dir.path()), vec!["width-800px.json"]);

        let content = fs::read_to_string(&destination).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["100%"]["$value"], 800);
    }

    #[tokio::test]
    async fn test_archive_export_written_as_zip() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = package(&widths(&[800.0, 900.0]), ExportRange::default(), Some("foo")).unwrap();
        let destination = dir.path().join(pkg.filename());

        save_package(pkg, destination.clone()).await.unwrap();
        assert_eq!(dir_entries(dir.path()), vec!["foo.tokens.zip"]);

        let bytes = fs::read(&destination).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"foo.800.tokens.json"));
        assert!(names.contains(&"foo.900.tokens.json"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("width-900px.json");
        fs::write(&destination, "old").unwrap();

        write_atomically(&destination, b"new").unwrap();
        assert_eq!(fs::read_to_string(&destination).unwrap(), "new");
        assert_eq!(dir_entries(dir.path()), vec!["width-900px.json"]);
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("missing").join("width-900px.json");

        let err = write_atomically(&destination, b"{}").unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
        assert!(dir_entries(dir.path()).is_empty());
    }
}
