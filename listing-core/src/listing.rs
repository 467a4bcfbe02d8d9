use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Joins `name` and `host_id` when a listing carries no `id`.
pub const ID_SEPARATOR: &str = "__";
pub const UNKNOWN_NAME: &str = "unknown";
pub const UNKNOWN_HOST: &str = "nohost";

/// One property record from the dataset.
///
/// Every field is optional and leniently typed: strings, numbers and booleans
/// are kept as text, anything else is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient_host_id")]
    pub host_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub host_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub picture_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub host_thumbnail_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub host_picture_url: Option<String>,
    #[serde(deserialize_with = "lenient_amenities")]
    pub amenities: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub listing_url: Option<String>,
}

impl Listing {
    /// Stable key correlating a listing with its favorite status.
    ///
    /// `id` when present, otherwise `{name}__{host_id}` with `unknown` /
    /// `nohost` standing in for missing parts.
    pub fn identifier(&self) -> String {
        if let Some(id) = non_empty(&self.id) {
            return id.to_owned();
        }
        let name = non_empty(&self.name).unwrap_or(UNKNOWN_NAME);
        let host = non_empty(&self.host_id).unwrap_or(UNKNOWN_HOST);
        format!("{name}{ID_SEPARATOR}{host}")
    }

    /// Case-insensitive substring match on name or description.
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .map(|value| value.to_lowercase().contains(needle))
                .unwrap_or(false)
        };
        hit(&self.name) || hit(&self.description)
    }
}

pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Stringifies a JSON scalar; integral numbers print without a fraction.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

// A numeric host id of 0 is as good as missing.
fn lenient_host_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.as_f64() == Some(0.0) {
        return Ok(None);
    }
    Ok(scalar_text(&value))
}

fn lenient_amenities<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amenities(&value))
}

/// Accepts an array, or a string holding a JSON-encoded array.
pub fn parse_amenities(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
