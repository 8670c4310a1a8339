// Design-token documents: one `"<percent>%"` key per table row

use super::ExportError;
use crate::types::{json_number, PercentEntry};
use serde_json::{json, Map, Value};

/// Insertion-ordered mapping from percent label to token descriptor
pub type ExportDocument = Map<String, Value>;

/// Builds the export document for a table. Duplicate percents keep their first
/// position and take the last value.
pub fn format(entries: &[PercentEntry]) -> ExportDocument {
    let mut document = Map::with_capacity(entries.len());
    for entry in entries {
        document.insert(
            format!("{}%", entry.percent),
            token_descriptor(entry.value),
        );
    }
    document
}

fn token_descriptor(value: f64) -> Value {
    json!({
        "$type": "number",
        "$value": json_number(value),
        "$extensions": {
            "figma": {
                "scopes": ["ALL_SCOPES"],
                "codeSyntax": {},
                "hiddenFromPublishing": false
            }
        }
    })
}

/// Serializes with 2-space indentation
pub fn to_json_pretty(document: &ExportDocument) -> Result<String, ExportError> {
    serde_json::to_string_pretty(document).map_err(|e| ExportError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::percent::compute_range;
    use crate::types::BaseWidth;

    #[test]
    fn test_format_range() {
        let entries = compute_range(BaseWidth::new(500.0).unwrap(), 10, 12);
        let document = format(&entries);

        let keys: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["10%", "11%", "12%"]);
        assert_eq!(document["10%"]["$value"], json!(50));
        assert_eq!(document["11%"]["$value"], json!(55));
        assert_eq!(document["12%"]["$value"], json!(60));
        assert_eq!(document["10%"]["$type"], "number");
        assert_eq!(
            document["12%"]["$extensions"],
            json!({
                "figma": {
                    "scopes": ["ALL_SCOPES"],
                    "codeSyntax": {},
                    "hiddenFromPublishing": false
                }
            })
        );
    }

    #[test]
    fn test_keys_follow_numeric_order() {
        let entries = compute_range(BaseWidth::new(800.0).unwrap(), 1, 100);
        let document = format(&entries);
        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys.len(), 100);
        assert_eq!(keys[1], "2%");
        assert_eq!(keys[9], "10%");
        assert_eq!(keys[99], "100%");
    }

    #[test]
    fn test_duplicate_percent_overwrites() {
        let entries = [
            PercentEntry {
                percent: 5,
                value: 1.0,
            },
            PercentEntry {
                percent: 6,
                value: 2.0,
            },
            PercentEntry {
                percent: 5,
                value: 3.0,
            },
        ];
        let document = format(&entries);
        assert_eq!(document.len(), 2);
        assert_eq!(document.keys().next().map(String::as_str), Some("5%"));
        assert_eq!(document["5%"]["$value"], json!(3));
    }

    #[test]
    fn test_pretty_output_matches_token_layout() {
        let entries = compute_range(BaseWidth::new(999.0).unwrap(), 33, 34);
        let json = to_json_pretty(&format(&entries)).unwrap();
        let expected = r#"{
  "33%": {
    "$type": "number",
    "$value": 329.67,
    "$extensions": {
      "figma": {
        "scopes": [
          "ALL_SCOPES"
        ],
        "codeSyntax": {},
        "hiddenFromPublishing": false
      }
    }
  },
  "34%": {
    "$type": "number",
    "$value": 339.66,
    "$extensions": {
      "figma": {
        "scopes": [
          "ALL_SCOPES"
        ],
        "codeSyntax": {},
        "hiddenFromPublishing": false
      }
    }
  }
}"#;
        assert_eq!(json, expected);
    }
}
