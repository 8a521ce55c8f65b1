//! Lamport / display-unit conversion.
//!
//! Prices and totals travel as integer lamports on chain and in the order
//! API; the UI works in whole token units. `rust_decimal` keeps the
//! conversion exact in both directions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::SdkError;

/// Lamports per display unit of the settlement token.
pub const LAMPORTS_PER_UNIT: u64 = 1_000_000_000;

/// Converts integer lamports to display units.
#[must_use]
pub fn display_from_lamports(lamports: u64) -> Decimal {
    Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_UNIT)
}

/// Converts a display-unit amount to integer lamports.
///
/// # Errors
///
/// Returns a validation error if the amount is negative, does not fall on
/// a whole lamport, or overflows `u64`.
pub fn lamports_from_display(amount: Decimal) -> Result<u64, SdkError> {
    if amount.is_sign_negative() {
        return Err(SdkError::Validation(format!(
            "amount cannot be negative: {}",
            amount
        )));
    }
    let scaled = amount
        .checked_mul(Decimal::from(LAMPORTS_PER_UNIT))
        .ok_or_else(|| SdkError::Validation(format!("amount out of range: {}", amount)))?;
    if !scaled.fract().is_zero() {
        return Err(SdkError::Validation(format!(
            "amount {} is below lamport resolution",
            amount
        )));
    }
    scaled
        .to_u64()
        .ok_or_else(|| SdkError::Validation(format!("amount out of range: {}", amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_display_from_lamports() {
        assert_eq!(
            display_from_lamports(1_500_000_000),
            Decimal::new(15, 1) // 1.5
        );
        assert_eq!(display_from_lamports(0), Decimal::ZERO);
    }

    #[test]
    fn test_lamports_from_display() {
        let amount = Decimal::new(25, 1); // 2.5
        assert_eq!(
            lamports_from_display(amount).expect("should convert"),
            2_500_000_000
        );
    }

    #[test]
    fn test_roundtrip() {
        let lamports = 123_456_789u64;
        let display = display_from_lamports(lamports);
        assert_eq!(
            lamports_from_display(display).expect("should convert"),
            lamports
        );
    }

    #[test]
    fn test_negative_rejected() {
        assert!(lamports_from_display(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_sub_lamport_rejected() {
        // 10 decimal places, finer than a lamport
        let amount = Decimal::new(1, 10);
        assert!(lamports_from_display(amount).is_err());
    }
}
