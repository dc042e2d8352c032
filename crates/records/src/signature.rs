use crate::RecordError;
use base64::Engine as _;
use core::{fmt, str};
use packlog_types::SIGNATURE_LENGTH;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 64-byte signature, carried in records as base64 text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; SIGNATURE_LENGTH]);

impl Default for Signature {
    fn default() -> Self {
        Self([0; SIGNATURE_LENGTH])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&base64::engine::general_purpose::STANDARD.encode(self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl str::FromStr for Signature {
    type Err = RecordError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|err| RecordError::InvalidSignature(err.to_string()))?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            RecordError::InvalidSignature(format!(
                "expected {SIGNATURE_LENGTH} bytes, found {}",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip() {
        let signature = Signature([0x5a; SIGNATURE_LENGTH]);
        let text = signature.to_string();
        assert_eq!(text.len(), 88);
        assert_eq!(text.parse::<Signature>().unwrap(), signature);
    }

    #[test]
    fn rejects_wrong_length() {
        let short = base64::engine::general_purpose::STANDARD.encode([0u8; 63]);
        assert!(matches!(
            short.parse::<Signature>().unwrap_err(),
            RecordError::InvalidSignature(_)
        ));
        assert!("not base64".parse::<Signature>().is_err());
    }
}
