// Security: export destination access and file prefix validation

use crate::theme::MAX_PREFIX_LENGTH;
use std::fs::{self, OpenOptions};
use std::path::Path;

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*', '/', '\\'];

// Checks if an export can be written at `path` (new file or existing writable file)
pub fn can_write_export(path: &Path) -> bool {
    if !path.exists() {
        return path
            .parent()
            .map(|p| {
                if p.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    p
                }
            })
            .map(can_write_to_directory)
            .unwrap_or(false);
    }

    match fs::metadata(path) {
        Ok(metadata) => {
            if metadata.is_dir() || metadata.permissions().readonly() {
                return false;
            }
            can_open_for_write(path)
        }
        Err(_) => false,
    }
}

// Tests write access by creating temp file
fn can_write_to_directory(dir: &Path) -> bool {
    if !dir.exists() || !dir.is_dir() {
        return false;
    }
    let test_file = dir.join(format!(".write_test_{}", std::process::id()));
    match fs::File::create(&test_file) {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(&test_file);
            true
        }
        Err(_) => false,
    }
}

// Tests if file can be opened for writing
fn can_open_for_write(path: &Path) -> bool {
    OpenOptions::new().write(true).open(path).is_ok()
}

// Rejects prefixes that would escape the archive folder or break file names
pub fn validate_prefix(prefix: &str) -> Result<(), String> {
    let prefix = prefix.trim();
    if prefix.chars().count() > MAX_PREFIX_LENGTH {
        return Err(format!("Prefix too long (max {} chars)", MAX_PREFIX_LENGTH));
    }
    if let Some(c) = prefix
        .chars()
        .find(|c| c.is_control() || RESERVED_CHARS.contains(c))
    {
        return Err(format!("Prefix cannot contain '{}'", c.escape_default()));
    }
    if prefix == "." || prefix == ".." {
        return Err("Prefix cannot be '.' or '..'".to_string());
    }
    Ok(())
}
