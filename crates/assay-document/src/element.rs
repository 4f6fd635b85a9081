//! Fields shared by every element of both document schemas.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Identifier of a document element.
///
/// Older documents use numeric database keys while newer ones use strings;
/// both are accepted and displayed verbatim. Any JSON number is accepted,
/// including keys beyond `i64` and fractional values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    Number(Number),
    Text(String),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The identifying and descriptive fields every legacy element carries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementInfo {
    #[serde(default)]
    id: Option<ElementId>,

    #[serde(default, deserialize_with = "null_as_default")]
    name: String,

    #[serde(default)]
    short_description: Option<String>,

    #[serde(default)]
    long_description: Option<String>,
}

impl ElementInfo {
    /// Creates element info with an id and name and no descriptions.
    pub fn new(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            short_description: None,
            long_description: None,
        }
    }

    /// Sets the short and long descriptions (builder style).
    pub fn with_descriptions(
        mut self,
        short_description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        self.short_description = Some(short_description.into());
        self.long_description = Some(long_description.into());
        self
    }

    pub fn id(&self) -> Option<&ElementId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }
}

/// Deserializes `null` as the type's default value.
///
/// Exported documents write `null` for empty child lists and blank names.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_accepts_numbers_and_strings() {
        let number: ElementId = serde_json::from_str("42").unwrap();
        let text: ElementId = serde_json::from_str("\"G1\"").unwrap();

        assert_eq!(number, ElementId::from(42_i64));
        assert_eq!(text, ElementId::Text("G1".to_string()));
        assert_eq!(number.to_string(), "42");
        assert_eq!(text.to_string(), "G1");
    }

    #[test]
    fn test_element_info_nulls_fall_back_to_defaults() {
        let info: ElementInfo =
            serde_json::from_str(r#"{"id": 3, "name": null, "short_description": null}"#)
                .unwrap();

        assert_eq!(info.id(), Some(&ElementId::from(3_i64)));
        assert_eq!(info.name(), "");
        assert_eq!(info.short_description(), None);
        assert_eq!(info.long_description(), None);
    }

    #[test]
    fn test_element_id_accepts_any_json_number() {
        let large: ElementId = serde_json::from_str("18446744073709551615").unwrap();
        let fractional: ElementId = serde_json::from_str("1.5").unwrap();

        assert_eq!(large.to_string(), "18446744073709551615");
        assert_eq!(fractional.to_string(), "1.5");
    }
}
