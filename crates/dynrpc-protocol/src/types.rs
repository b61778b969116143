use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier correlating a JSON-RPC request with its response.
///
/// The client always assigns numeric ids from its own counter, but servers
/// echo ids back verbatim and the wire format also permits strings, so both
/// shapes round-trip here. Null ids are not representable on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl RequestId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RequestId::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RequestId::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

/// Protocol version marker. Only `"2.0"` exists; anything else on the wire
/// is rejected at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JsonRpcVersion {
    #[default]
    V2_0,
}

impl JsonRpcVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonRpcVersion::V2_0 => "2.0",
        }
    }
}

impl fmt::Display for JsonRpcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "2.0" => Ok(JsonRpcVersion::V2_0),
            _ => Err(serde::de::Error::custom(format!(
                "unsupported JSON-RPC version: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_wire_shapes() {
        assert_eq!(serde_json::to_string(&RequestId::Number(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&RequestId::String("abc".into())).unwrap(),
            r#""abc""#
        );

        let id: RequestId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RequestId::Number(42));
        assert_eq!(id.as_i64(), Some(42));
        assert_eq!(id.as_str(), None);
    }

    #[test]
    fn request_id_display() {
        assert_eq!(RequestId::from(3).to_string(), "3");
        assert_eq!(RequestId::from("req-1").to_string(), "req-1");
    }

    #[test]
    fn version_serializes_as_2_0() {
        assert_eq!(
            serde_json::to_string(&JsonRpcVersion::default()).unwrap(),
            r#""2.0""#
        );
    }

    #[test]
    fn version_rejects_anything_else() {
        assert!(serde_json::from_str::<JsonRpcVersion>(r#""2.0""#).is_ok());
        assert!(serde_json::from_str::<JsonRpcVersion>(r#""1.0""#).is_err());
        assert!(serde_json::from_str::<JsonRpcVersion>(r#""2.1""#).is_err());
        assert!(serde_json::from_str::<JsonRpcVersion>("2.0").is_err());
    }
}
