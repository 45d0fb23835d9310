use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Number;

/// A numeric value as it appeared on the wire: a JSON number or a string
/// that is expected to hold one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(Number),
    Text(String),
}

impl NumericField {
    /// Finite floating point value, if the field holds one.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericField::Number(n) => n.as_f64()?,
            NumericField::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Integral value. Floats are accepted only when they carry no fraction.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumericField::Number(n) => n.as_i64().or_else(|| integral(n.as_f64()?)),
            NumericField::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| integral(trimmed.parse::<f64>().ok()?))
            }
        }
    }
}

fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(NumericField::Number)
            .unwrap_or_else(|| NumericField::Text(value.to_string()))
    }
}

impl From<i64> for NumericField {
    fn from(value: i64) -> Self {
        NumericField::Number(value.into())
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

/// Required integer key that may arrive as a number or a numeric string.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumericField::deserialize(deserializer)?;
    raw.as_i64()
        .ok_or_else(|| de::Error::custom(format!("expected an integer id, got {raw:?}")))
}

/// Optional integer. Unparseable values decode as absent rather than failing
/// the whole collection.
pub fn lenient_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumericField>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_i64()))
}
