// Shared types used across modules

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Rejected base width input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidthError {
    #[error("Please enter a valid base width")]
    Unparsable,
    #[error("Base width must be greater than zero (got {0})")]
    NotPositive(f64),
    #[error("Base width must be a finite number")]
    NotFinite,
}

/// Pixel value that percentages are computed against. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BaseWidth(f64);

impl BaseWidth {
    pub fn new(value: f64) -> Result<Self, WidthError> {
        if !value.is_finite() {
            return Err(WidthError::NotFinite);
        }
        if value <= 0.0 {
            return Err(WidthError::NotPositive(value));
        }
        Ok(Self(value))
    }

    // Parses user input the way a number field would, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, WidthError> {
        let value: f64 = input.trim().parse().map_err(|_| WidthError::Unparsable)?;
        Self::new(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for BaseWidth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

// Integral widths render without a decimal point: 800 -> "800", 800.5 -> "800.5"
impl std::fmt::Display for BaseWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a percentage table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentEntry {
    pub percent: u32,
    pub value: f64,
}

/// A saved base width as stored under the `savedColumns` key
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SavedColumn {
    #[serde(rename = "baseWidth")]
    pub base_width: BaseWidth,
}

impl Serialize for SavedColumn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("baseWidth", &json_number(self.base_width.get()))?;
        map.end()
    }
}

/// A file handed to export packaging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub filename: String,
    pub content: String,
}

/// Which widths an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    #[default]
    All,
    Saved,
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportMode::All => write!(f, "Current + saved"),
            ExportMode::Saved => write!(f, "Saved only"),
        }
    }
}

/// Result table tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    All,
    Current,
    Saved,
}

impl std::fmt::Display for ResultTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultTab::All => write!(f, "All Results"),
            ResultTab::Current => write!(f, "Current Width"),
            ResultTab::Saved => write!(f, "Saved Columns"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Receives completion and failure messages; never renders anything itself
pub trait Notifier {
    fn notify(&mut self, message: impl Into<String>, severity: Severity);
}

// Writes whole numbers as JSON integers so `50.0` serializes as `50`, like a JS number
pub fn json_number(value: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        // Exact: the value is integral and within the 53-bit mantissa
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}
