//! Raw inbox records as returned by `api.php?what=kmail`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// One kmail exactly as the JSON API encodes it.
///
/// Every field arrives as a string; numbers are accepted too so that
/// fixtures and proxies that re-encode the payload still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKmail {
    /// Kmail id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Kind of kmail (`normal`, `giftshop`, ...).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Sender player number.
    #[serde(deserialize_with = "string_or_number")]
    pub fromid: String,
    /// Sender player name.
    #[serde(default)]
    pub fromname: String,
    /// Server-local send time, `MM/DD/YY HH:MM:SS`.
    #[serde(default)]
    pub localtime: String,
    /// Unix timestamp of the send time.
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub azunixtime: Option<String>,
    /// HTML message body.
    #[serde(default)]
    pub message: String,
}

fn default_kind() -> String {
    "normal".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(StringOrNumber::into_string))
}

/// Decodes the inbox JSON array.
///
/// # Errors
///
/// Returns an error if the body is not a JSON array of kmail records.
pub fn parse_inbox(body: &str) -> Result<Vec<RawKmail>> {
    Ok(serde_json::from_str(body)?)
}
