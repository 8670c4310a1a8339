// Export Module
// Token documents, single-file vs zip packaging, and archive building

pub mod archive;
pub mod package;
pub mod tokens;

pub use archive::{build_archive, ZipArchiveBuilder};
pub use package::{package, select_widths, ExportPackage};

use thiserror::Error;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,

    #[error("Invalid export range {min}%-{max}%: need 1 <= min < max <= 100")]
    InvalidRange { min: u32, max: u32 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Archive error: {0}")]
    Archive(String),
}

/// Inclusive percent window included in an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRange {
    min: u32,
    max: u32,
}

impl ExportRange {
    pub const LOWEST: u32 = 1;
    pub const HIGHEST: u32 = 100;

    pub fn new(min: u32, max: u32) -> Result<Self, ExportError> {
        let valid = (Self::LOWEST..Self::HIGHEST).contains(&min)
            && (Self::LOWEST + 1..=Self::HIGHEST).contains(&max)
            && min < max;
        if !valid {
            return Err(ExportError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> u32 {
        self.min
    }

    pub fn max(self) -> u32 {
        self.max
    }

    // Clamps a typed lower bound into [1, max - 1]
    pub fn with_min(self, value: i64) -> Self {
        let upper = i64::from(self.max) - 1;
        let min = value.clamp(i64::from(Self::LOWEST), upper);
        u32::try_from(min)
            .ok()
            .and_then(|min| Self::new(min, self.max).ok())
            .unwrap_or(self)
    }

    // Clamps a typed upper bound into [min + 1, 100]
    pub fn with_max(self, value: i64) -> Self {
        let lower = i64::from(self.min) + 1;
        let max = value.clamp(lower, i64::from(Self::HIGHEST));
        u32::try_from(max)
            .ok()
            .and_then(|max| Self::new(self.min, max).ok())
            .unwrap_or(self)
    }
}

impl Default for ExportRange {
    fn default() -> Self {
        Self {
            min: Self::LOWEST,
            max: Self::HIGHEST,
        }
    }
}
