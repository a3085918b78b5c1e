//! Course documents as stored, and the `{code, description}` projection served by program views.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// One stored course document. Fields beyond the four known ones (e.g. `_id`) are kept in `extra`
/// and written back out unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub description: String,
    /// Kept as the stored JSON number so integral units stay integral on output.
    pub units: Number,
    /// `None` when the stored document has no usable `tags` array.
    #[serde(
        default,
        deserialize_with = "lenient_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        units: impl Into<Number>,
        tags: &[&str],
    ) -> Self {
        Course {
            code: code.into(),
            description: description.into(),
            units: units.into(),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            extra: Map::new(),
        }
    }

    /// Exact, case-sensitive membership. A course without tags never matches.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .map(|tags| tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            code: self.code.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub code: String,
    pub description: String,
}

/// Arrays keep their string elements; anything else (null, string, object) means no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Decode a raw document. Fails when `code`, `description`, or a numeric `units` is missing.
pub fn decode_course(doc: Value) -> Result<Course, serde_json::Error> {
    serde_json::from_value(doc)
}
