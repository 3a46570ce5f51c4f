use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An integer request field that also accepts integer-valued strings
/// (`1001` or `"1001"`).
///
/// Anything else deserializes to [`LenientInt::Invalid`] instead of failing, so
/// the payload still reaches validation and the field is reported alongside
/// every other failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LenientInt {
    Valid(i64),
    Invalid,
}

impl LenientInt {
    pub fn value(self) -> Option<i64> {
        match self {
            LenientInt::Valid(value) => Some(value),
            LenientInt::Invalid => None,
        }
    }
}

impl From<i64> for LenientInt {
    fn from(value: i64) -> Self {
        LenientInt::Valid(value)
    }
}

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        Ok(parsed.map_or(LenientInt::Invalid, LenientInt::Valid))
    }
}

/// Deserializes a string with surrounding whitespace removed.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Optional variant of [`deserialize_trimmed`]; `null` stays `None`.
pub fn deserialize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.map(|s| s.trim().to_string()))
}
