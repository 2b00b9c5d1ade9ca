//! Transmitter-identification records.
//!
//! A tiraid identifies a transmitting device and the set of receivers that
//! decoded its signal. The logging pipeline uses it for whitelist matching
//! and infrastructure-transmission detection.

use serde::{Deserialize, Serialize};

/// EUI-64 prefix of identifiers assigned to the sensing infrastructure's
/// own radios (its OUI-36 space). Transmissions from these devices are
/// infrastructure traffic, not tracked external devices.
const INFRASTRUCTURE_PREFIX: &str = "001bc5094";

/// A device or receiver identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Identifier type, e.g. `EUI-64` or `ADVA-48`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,

    /// Identifier value, lowercase hexadecimal by convention.
    pub value: String,
}

impl Identifier {
    /// Create an EUI-64 identifier.
    pub fn eui64(value: impl Into<String>) -> Self {
        Self {
            id_type: Some("EUI-64".to_string()),
            value: value.into(),
        }
    }
}

/// One receiver's observation of a transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioDecoding {
    /// The decoding receiver's identifier.
    pub identifier: Identifier,

    /// Received signal strength indicator.
    pub rssi: i16,
}

impl RadioDecoding {
    /// Create a new radio decoding.
    pub fn new(identifier: Identifier, rssi: i16) -> Self {
        Self { identifier, rssi }
    }
}

/// Transmitter-identification record: the sighted device plus every
/// receiver that decoded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiraid {
    /// The transmitting device's identifier.
    pub identifier: Identifier,

    /// Sighting timestamp as reported by the platform (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Receivers that decoded this transmission.
    #[serde(rename = "radioDecodings", default)]
    pub radio_decodings: Vec<RadioDecoding>,
}

impl Tiraid {
    /// Create a tiraid with no decodings.
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            timestamp: None,
            radio_decodings: Vec::new(),
        }
    }

    /// Add a radio decoding.
    pub fn with_decoding(mut self, decoding: RadioDecoding) -> Self {
        self.radio_decodings.push(decoding);
        self
    }

    /// Set the sighting timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Whether this transmission originates from the sensing infrastructure
    /// itself rather than a tracked external device.
    pub fn is_infrastructure_transmission(&self) -> bool {
        let value = self.identifier.value.to_ascii_lowercase();
        value.starts_with(INFRASTRUCTURE_PREFIX)
    }

    /// The decoding with the strongest signal, if any.
    pub fn strongest_decoding(&self) -> Option<&RadioDecoding> {
        self.radio_decodings.iter().max_by_key(|d| d.rssi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_prefix_detected() {
        let tiraid = Tiraid::new(Identifier::eui64("001bc50940810000"));
        assert!(tiraid.is_infrastructure_transmission());
    }

    #[test]
    fn test_infrastructure_prefix_case_insensitive() {
        let tiraid = Tiraid::new(Identifier::eui64("001BC50940810000"));
        assert!(tiraid.is_infrastructure_transmission());
    }

    #[test]
    fn test_external_device_is_not_infrastructure() {
        let tiraid = Tiraid::new(Identifier::eui64("fee150bada55beef"));
        assert!(!tiraid.is_infrastructure_transmission());
    }

    #[test]
    fn test_strongest_decoding_picks_highest_rssi() {
        let tiraid = Tiraid::new(Identifier::eui64("aa"))
            .with_decoding(RadioDecoding::new(Identifier::eui64("r1"), -80))
            .with_decoding(RadioDecoding::new(Identifier::eui64("r2"), -62))
            .with_decoding(RadioDecoding::new(Identifier::eui64("r3"), -75));
        let strongest = tiraid.strongest_decoding().unwrap();
        assert_eq!(strongest.identifier.value, "r2");
        assert_eq!(strongest.rssi, -62);
    }

    #[test]
    fn test_strongest_decoding_empty() {
        let tiraid = Tiraid::new(Identifier::eui64("aa"));
        assert!(tiraid.strongest_decoding().is_none());
    }

    #[test]
    fn test_deserializes_platform_json() {
        let json = r#"{
            "identifier": { "type": "ADVA-48", "value": "fee150bada55" },
            "timestamp": "2016-01-01T01:23:45.678Z",
            "radioDecodings": [
                { "identifier": { "type": "EUI-64", "value": "001bc50940810000" }, "rssi": -72 }
            ]
        }"#;
        let tiraid: Tiraid = serde_json::from_str(json).unwrap();
        assert_eq!(tiraid.identifier.value, "fee150bada55");
        assert_eq!(tiraid.radio_decodings.len(), 1);
        assert_eq!(tiraid.radio_decodings[0].rssi, -72);
    }

    #[test]
    fn test_deserializes_without_decodings() {
        let json = r#"{ "identifier": { "value": "fee150bada55" } }"#;
        let tiraid: Tiraid = serde_json::from_str(json).unwrap();
        assert!(tiraid.radio_decodings.is_empty());
        assert!(tiraid.timestamp.is_none());
    }
}
