use serde::Deserialize;
use serde::de::Error as DeError;

/// Decimal amount sent by the provider as either a JSON string or a JSON number.
///
/// Numbers keep their raw JSON token, so `47.10` stays `"47.10"` instead of
/// going through `f64` and coming back as `"47.1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportMoney(String);

impl TransportMoney {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportMoney {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed.trim().to_owned()))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected amount to be a JSON string or number",
            )),
        }
    }
}
