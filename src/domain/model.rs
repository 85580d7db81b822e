use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// A single `name: value` pair, kept at the notation level it was parsed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered, name-unique collection of declarations.
///
/// Insertion order follows source order. Inserting a name that is already
/// present overwrites its value but keeps the position it was first seen at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMapping {
    declarations: Vec<Declaration>,
}

impl StyleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.declarations.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.value = value,
            None => self.declarations.push(Declaration { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// 序列化為物件字面值 (JSON)，`Pretty` 使用兩格縮排
    pub fn to_object_literal(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Compact => serde_json::to_string(self),
            OutputFormat::Pretty => serde_json::to_string_pretty(self),
        }
    }
}

impl Serialize for StyleMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.declarations.len()))?;
        for declaration in &self.declarations {
            map.serialize_entry(&declaration.name, &declaration.value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a StyleMapping {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for StyleMapping {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut mapping = StyleMapping::new();
        for (name, value) in iter {
            mapping.insert(name, value);
        }
        mapping
    }
}

/// Result of a successful reverse conversion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReverseOutput {
    pub css: String,
}

/// Object-literal formatting for the forward direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

impl OutputFormat {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

/// CSS text layout for the reverse direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssLayout {
    /// `a: 1; b: 2;`
    #[default]
    Inline,
    /// One declaration per line.
    Multiline,
}

impl CssLayout {
    pub fn from_multiline(multiline: bool) -> Self {
        if multiline {
            Self::Multiline
        } else {
            Self::Inline
        }
    }

    pub(crate) fn separator(self) -> &'static str {
        match self {
            Self::Inline => " ",
            Self::Multiline => "\n",
        }
    }
}

/// Whether usage tracking is on and which id to report under.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub enabled: bool,
    pub tracking_id: Option<String>,
}

impl AnalyticsConfig {
    /// 只有在啟用且提供 tracking id 時才回傳 id
    pub fn active_tracking_id(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.tracking_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position_and_last_value() {
        let mut mapping = StyleMapping::new();
        mapping.insert("color", "red");
        mapping.insert("margin", "0");
        mapping.insert("color", "blue");

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.declarations()[0], Declaration::new("color", "blue"));
        assert_eq!(mapping.declarations()[1], Declaration::new("margin", "0"));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mapping: StyleMapping = [("zIndex", "2"), ("alignItems", "center")]
            .into_iter()
            .collect();

        assert_eq!(
            mapping.to_object_literal(OutputFormat::Compact).unwrap(),
            r#"{"zIndex":"2","alignItems":"center"}"#
        );
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let mapping: StyleMapping = [("color", "red")].into_iter().collect();

        assert_eq!(
            mapping.to_object_literal(OutputFormat::Pretty).unwrap(),
            "{\n  \"color\": \"red\"\n}"
        );
    }

    #[test]
    fn test_empty_mapping_serializes_to_empty_object() {
        let mapping = StyleMapping::new();
        assert_eq!(mapping.to_object_literal(OutputFormat::Pretty).unwrap(), "{}");
    }

    #[test]
    fn test_active_tracking_id_requires_enabled_and_id() {
        let config = |enabled, tracking_id: Option<&str>| AnalyticsConfig {
            enabled,
            tracking_id: tracking_id.map(str::to_string),
        };

        assert_eq!(config(true, Some(" UA-1 ")).active_tracking_id(), Some("UA-1"));
        assert_eq!(config(false, Some("UA-1")).active_tracking_id(), None);
        assert_eq!(config(true, Some("  ")).active_tracking_id(), None);
        assert_eq!(config(true, None).active_tracking_id(), None);
    }
}
