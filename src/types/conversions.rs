//! Unit conversions between on-chain integer amounts and human-readable
//! decimal amounts.
//!
//! `parse_units` behaves like an integer cast: fractional digits beyond the
//! token's precision are truncated, never rounded.

use ethers::types::{Address, U256};
use ethers::utils::to_checksum;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimals used by ether and by every datatoken.
pub const WEI_DECIMALS: u32 = 18;

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Converts a human amount into base units, e.g. ETH into wei.
pub fn parse_units(amount: Decimal, decimals: u32) -> Result<U256, ConversionError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConversionError::Negative(amount.to_string()));
    }

    let text = amount.normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    let keep = frac_part.len().min(decimals as usize);
    digits.push_str(&frac_part[..keep]);
    for _ in keep..decimals as usize {
        digits.push('0');
    }

    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(trimmed).map_err(|_| ConversionError::Overflow)
}

/// Same as [`parse_units`] for amounts given as text ("0.003").
pub fn parse_units_str(amount: &str, decimals: u32) -> Result<U256, ConversionError> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|e| ConversionError::InvalidDecimal(e.to_string()))?;
    parse_units(value, decimals)
}

/// Converts base units into a human amount, e.g. wei into ETH.
pub fn format_units(value: U256, decimals: u32) -> Result<Decimal, ConversionError> {
    if decimals > MAX_DECIMAL_SCALE {
        return Err(ConversionError::UnsupportedDecimals(decimals));
    }
    let mut out = Decimal::from_str(&value.to_string())
        .map_err(|_| ConversionError::Overflow)?;
    out.set_scale(decimals)
        .map_err(|e| ConversionError::InvalidDecimal(e.to_string()))?;
    Ok(out.normalize())
}

pub fn to_wei(amount: Decimal) -> Result<U256, ConversionError> {
    parse_units(amount, WEI_DECIMALS)
}

pub fn to_wei_str(amount: &str) -> Result<U256, ConversionError> {
    parse_units_str(amount, WEI_DECIMALS)
}

pub fn from_wei(value: U256) -> Result<Decimal, ConversionError> {
    format_units(value, WEI_DECIMALS)
}

/// Decimal view of an amount, scaled by the token's decimals.
pub fn u256_to_decimal(value: U256, decimals: u8) -> Result<Decimal, ConversionError> {
    format_units(value, decimals as u32)
}

pub fn address_to_string(addr: Address) -> String {
    format!("{:?}", addr).to_lowercase()
}

pub fn address_to_checksum(addr: Address) -> String {
    to_checksum(&addr, None)
}

pub fn string_to_address(s: &str) -> Result<Address, ConversionError> {
    Address::from_str(s.trim()).map_err(|e| ConversionError::InvalidAddress(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
    #[error("Overflow in conversion")]
    Overflow,
    #[error("Negative amount: {0}")]
    Negative(String),
    #[error("Unsupported decimals: {0}")]
    UnsupportedDecimals(u32),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn to_wei_scales_by_18() {
        assert_eq!(to_wei(dec("1")).unwrap(), U256::exp10(18));
        assert_eq!(
            to_wei(dec("0.003")).unwrap(),
            U256::from(3u64) * U256::exp10(15)
        );
        assert_eq!(to_wei(Decimal::ZERO).unwrap(), U256::zero());
    }

    #[test]
    fn parse_units_truncates_extra_precision() {
        // USDC has 6 decimals, the 7th digit is dropped
        assert_eq!(
            parse_units(dec("1.2345678"), 6).unwrap(),
            U256::from(1_234_567u64)
        );
        assert_eq!(parse_units(dec("0.0000001"), 6).unwrap(), U256::zero());
    }

    #[test]
    fn parse_units_handles_amounts_above_decimal_range() {
        // 1e11 tokens at 18 decimals does not fit a Decimal mantissa once scaled
        let big = parse_units(dec("100000000000"), 18).unwrap();
        assert_eq!(big, U256::exp10(29));
    }

    #[test]
    fn parse_units_rejects_negative() {
        assert!(matches!(
            parse_units(dec("-1"), 18),
            Err(ConversionError::Negative(_))
        ));
    }

    #[test]
    fn format_units_reverses_parse_units() {
        let amount = dec("1500.25");
        let raw = parse_units(amount, 6).unwrap();
        assert_eq!(raw, U256::from(1_500_250_000u64));
        assert_eq!(format_units(raw, 6).unwrap(), amount);
        assert_eq!(from_wei(to_wei(amount).unwrap()).unwrap(), amount);
    }

    #[test]
    fn format_units_rejects_unsupported_scale() {
        assert!(matches!(
            format_units(U256::one(), 30),
            Err(ConversionError::UnsupportedDecimals(30))
        ));
    }

    #[test]
    fn text_amounts_parse() {
        assert_eq!(to_wei_str("0.01").unwrap(), U256::exp10(16));
        assert!(matches!(
            to_wei_str("abc"),
            Err(ConversionError::InvalidDecimal(_))
        ));
    }

    #[test]
    fn address_strings_are_lowercase() {
        let addr = string_to_address("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1").unwrap();
        assert_eq!(
            address_to_string(addr),
            "0x82af49447d8a07e3bd95bd0d56f35241523fbab1"
        );
        assert_eq!(
            address_to_checksum(addr),
            "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1"
        );
        assert!(string_to_address("0x123").is_err());
    }
}
