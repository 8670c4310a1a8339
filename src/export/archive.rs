// Zip archive building for multi-width exports

use super::ExportError;
use crate::types::NamedFile;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packs named files into an archive payload
pub trait ArchiveBuilder {
    fn build(&self, files: &[NamedFile]) -> Result<Vec<u8>, ExportError>;
}

/// Deflate-compressed zip, one entry per file in the given order
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveBuilder;

impl ArchiveBuilder for ZipArchiveBuilder {
    fn build(&self, files: &[NamedFile]) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for file in files {
            writer
                .start_file(file.filename.as_str(), options)
                .map_err(|e| ExportError::Archive(format!("{}: {}", file.filename, e)))?;
            writer
                .write_all(file.content.as_bytes())
                .map_err(|e| ExportError::Archive(format!("{}: {}", file.filename, e)))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ExportError::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

/// Builds the archive off the UI thread. A panicking builder is reported as an archive error.
pub async fn build_archive<B>(builder: B, files: Vec<NamedFile>) -> Result<Vec<u8>, ExportError>
where
    B: ArchiveBuilder + Send + 'static,
{
    tokio::task::spawn_blocking(move || builder.build(&files))
        .await
        .map_err(|e| ExportError::Archive(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn sample_files() -> Vec<NamedFile> {
        vec![
            NamedFile {
                filename: "foo.800.tokens.json".to_string(),
                content: "{\n  \"1%\": 8\n}".to_string(),
            },
            NamedFile {
                filename: "foo.900.tokens.json".to_string(),
                content: "{\n  \"1%\": 9\n}".to_string(),
            },
        ]
    }

    struct FailingBuilder;

    impl ArchiveBuilder for FailingBuilder {
        fn build(&self, _files: &[NamedFile]) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Archive("compression failed".to_string()))
        }
    }

    struct PanickingBuilder;

    impl ArchiveBuilder for PanickingBuilder {
        fn build(&self, _files: &[NamedFile]) -> Result<Vec<u8>, ExportError> {
            panic!("builder exploded")
        }
    }

    #[test]
    fn test_zip_contains_files_in_order() {
        let bytes = ZipArchiveBuilder.build(&sample_files()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        for (i, expected) in sample_files().iter().enumerate() {
            let mut entry = archive.by_index(i).unwrap();
            assert_eq!(entry.name(), expected.filename);
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            assert_eq!(content, expected.content);
        }
    }

    #[test]
    fn test_duplicate_entry_is_archive_error() {
        let mut files = sample_files();
        files[1].filename = files[0].filename.clone();
        assert!(matches!(
            ZipArchiveBuilder.build(&files),
            Err(ExportError::Archive(_))
        ));
    }

    #[tokio::test]
    async fn test_build_archive_async() {
        let bytes = build_archive(ZipArchiveBuilder, sample_files()).await.unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[tokio::test]
    async fn test_build_archive_failures_are_archive_errors() {
        let result = build_archive(FailingBuilder, sample_files()).await;
        assert!(matches!(result, Err(ExportError::Archive(msg)) if msg == "compression failed"));

        let result = build_archive(PanickingBuilder, sample_files()).await;
        assert!(matches!(result, Err(ExportError::Archive(_))));
    }
}
