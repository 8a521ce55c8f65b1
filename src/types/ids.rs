//! Fixed-width identifier types used as PDA seeds.
//!
//! The on-chain program derives accounts from exactly 16-byte identifier
//! seeds. These newtypes enforce the width at construction so an oversized
//! identifier is rejected instead of being silently truncated into a
//! colliding seed.

use std::fmt;
use std::str::FromStr;

use crate::error::SdkError;

/// Width of identifier seeds in bytes.
pub const ID_SEED_LEN: usize = 16;

/// An order identifier, zero-padded to 16 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId([u8; ID_SEED_LEN]);

impl OrderId {
    /// Creates an order id from a UTF-8 string of at most 16 bytes.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the encoded id exceeds 16 bytes.
    pub fn new(id: &str) -> Result<Self, SdkError> {
        let raw = id.as_bytes();
        if raw.len() > ID_SEED_LEN {
            return Err(SdkError::Validation(format!(
                "order id must be at most {} bytes, got {}",
                ID_SEED_LEN,
                raw.len()
            )));
        }
        let mut bytes = [0u8; ID_SEED_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Returns the zero-padded seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ID_SEED_LEN] {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(ID_SEED_LEN);
        write!(f, "{}", String::from_utf8_lossy(&self.0[..end]))
    }
}

/// A machine UUID: exactly 16 bytes, parsed from 32 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineUuid([u8; ID_SEED_LEN]);

impl MachineUuid {
    /// Creates a machine UUID from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ID_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses a machine UUID from a 32-character hex string.
    ///
    /// # Errors
    ///
    /// Returns a validation error on wrong length or non-hex characters.
    pub fn from_hex(uuid: &str) -> Result<Self, SdkError> {
        if uuid.len() != ID_SEED_LEN * 2 {
            return Err(SdkError::Validation(format!(
                "machine uuid must be {} hex characters, got {}",
                ID_SEED_LEN * 2,
                uuid.len()
            )));
        }
        let mut bytes = [0u8; ID_SEED_LEN];
        for (i, chunk) in uuid.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| SdkError::Validation("machine uuid is not ASCII hex".to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| {
                SdkError::Validation(format!("invalid hex in machine uuid: {:?}", pair))
            })?;
        }
        Ok(Self(bytes))
    }

    /// Returns the seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ID_SEED_LEN] {
        &self.0
    }
}

impl FromStr for MachineUuid {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for MachineUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_padded() {
        let id = OrderId::new("abc").expect("should parse");
        let mut expected = [0u8; 16];
        expected[..3].copy_from_slice(b"abc");
        assert_eq!(id.as_bytes(), &expected);
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_order_id_exact_width() {
        let id = OrderId::new("0123456789abcdef").expect("should parse");
        assert_eq!(id.as_bytes(), b"0123456789abcdef");
        assert_eq!(id.to_string(), "0123456789abcdef");
    }

    #[test]
    fn test_order_id_too_long_rejected() {
        let result = OrderId::new("0123456789abcdefg");
        assert!(matches!(result, Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_order_id_multibyte_counts_bytes() {
        // 6 chars but 18 UTF-8 bytes
        let result = OrderId::new("日本語日本語");
        assert!(result.is_err());
    }

    #[test]
    fn test_machine_uuid_roundtrip() {
        let hex = "00112233445566778899aabbccddeeff";
        let uuid = MachineUuid::from_hex(hex).expect("should parse");
        assert_eq!(uuid.to_string(), hex);
        assert_eq!(uuid.as_bytes()[0], 0x00);
        assert_eq!(uuid.as_bytes()[15], 0xff);
    }

    #[test]
    fn test_machine_uuid_wrong_length() {
        assert!(MachineUuid::from_hex("0011").is_err());
    }

    #[test]
    fn test_machine_uuid_bad_digit() {
        assert!(MachineUuid::from_hex("zz112233445566778899aabbccddeeff").is_err());
    }
}
