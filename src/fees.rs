//! Client-side fee expectations and slippage limits.
//!
//! Pools charge every fee in the token coming in. Rates are 18-decimal
//! fractions (`1e15` = 0.1%), so the expected fee for an input amount is
//! `amount * rate / 1e18` in that token's own units.

use crate::types::conversions::{format_units, to_wei, ConversionError, WEI_DECIMALS};
use crate::types::SwapQuote;
use ethers::types::U256;
use rust_decimal::Decimal;

fn one_wei_unit() -> U256 {
    U256::exp10(WEI_DECIMALS as usize)
}

fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, ConversionError> {
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(ConversionError::Overflow)
}

fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, ConversionError> {
    let product = a.checked_mul(b).ok_or(ConversionError::Overflow)?;
    let (quotient, remainder) = product.div_mod(denominator);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::one())
    }
}

/// Fee owed on `amount` at an 18-decimal `fee_rate`, truncated.
pub fn expected_fee(amount: U256, fee_rate: U256) -> Result<U256, ConversionError> {
    mul_div(amount, fee_rate, one_wei_unit())
}

/// Fee rates in effect for a swap, each an 18-decimal fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapFeeRates {
    pub lp: U256,
    pub opc: U256,
    pub publish_market: U256,
    pub consume_market: U256,
}

impl SwapFeeRates {
    pub fn expected(&self, amount_in: U256) -> Result<FeeBreakdown, ConversionError> {
        Ok(FeeBreakdown {
            lp: expected_fee(amount_in, self.lp)?,
            opc: expected_fee(amount_in, self.opc)?,
            publish_market: expected_fee(amount_in, self.publish_market)?,
            consume_market: expected_fee(amount_in, self.consume_market)?,
        })
    }

    /// Sum of all rates.
    pub fn total(&self) -> U256 {
        self.lp
            .saturating_add(self.opc)
            .saturating_add(self.publish_market)
            .saturating_add(self.consume_market)
    }
}

/// Fee amounts for one swap, in units of the token coming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeBreakdown {
    pub lp: U256,
    pub opc: U256,
    pub publish_market: U256,
    pub consume_market: U256,
}

impl FeeBreakdown {
    /// True when every fee of the pool's quote is within `rel` of this breakdown.
    pub fn matches(
        &self,
        quote: &SwapQuote,
        decimals: u32,
        rel: Decimal,
    ) -> Result<bool, ConversionError> {
        let pairs = [
            (quote.lp_fee, self.lp),
            (quote.opc_fee, self.opc),
            (quote.publish_market_fee, self.publish_market),
            (quote.consume_market_fee, self.consume_market),
        ];
        for (actual, expected) in pairs {
            if !approx_eq(actual, decimals, expected, decimals, rel)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn total(&self) -> U256 {
        self.lp
            .saturating_add(self.opc)
            .saturating_add(self.publish_market)
            .saturating_add(self.consume_market)
    }
}

/// Compares two amounts of possibly different precision.
///
/// Equal within `rel` of `expected`; two zeros always compare equal.
pub fn approx_eq(
    actual: U256,
    actual_decimals: u32,
    expected: U256,
    expected_decimals: u32,
    rel: Decimal,
) -> Result<bool, ConversionError> {
    let a = format_units(actual, actual_decimals)?;
    let b = format_units(expected, expected_decimals)?;
    if a == b {
        return Ok(true);
    }
    let diff = (a - b).abs();
    Ok(diff <= b.abs() * rel)
}

/// Datatoken amount equal to `amount` base tokens at rate 1.
///
/// Datatokens always carry 18 decimals, whatever the base token uses.
pub fn base_token_to_datatoken(amount: U256, base_decimals: u32) -> Result<U256, ConversionError> {
    if base_decimals <= WEI_DECIMALS {
        let scale = U256::exp10((WEI_DECIMALS - base_decimals) as usize);
        amount.checked_mul(scale).ok_or(ConversionError::Overflow)
    } else {
        let excess = base_decimals - WEI_DECIMALS;
        // 10^77 is the largest power of ten a U256 holds
        if excess > 77 {
            return Err(ConversionError::UnsupportedDecimals(base_decimals));
        }
        Ok(amount / U256::exp10(excess as usize))
    }
}

/// Slippage tolerance used to derive swap limits from a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slippage {
    /// Tolerance as an 18-decimal fraction
    tolerance: U256,
}

impl Slippage {
    /// `tolerance` is a fraction: `0.01` allows 1%.
    pub fn new(tolerance: Decimal) -> Result<Self, ConversionError> {
        if tolerance > Decimal::ONE {
            return Err(ConversionError::InvalidDecimal(format!(
                "slippage above 100%: {}",
                tolerance
            )));
        }
        Ok(Self {
            tolerance: to_wei(tolerance)?,
        })
    }

    pub fn tolerance(&self) -> Result<Decimal, ConversionError> {
        format_units(self.tolerance, WEI_DECIMALS)
    }

    /// Lowest acceptable output for a quoted output amount, rounded down.
    pub fn min_amount_out(&self, quoted_out: U256) -> Result<U256, ConversionError> {
        mul_div(quoted_out, one_wei_unit() - self.tolerance, one_wei_unit())
    }

    /// Highest acceptable input for a quoted input amount, rounded up.
    pub fn max_amount_in(&self, quoted_in: U256) -> Result<U256, ConversionError> {
        mul_div_up(quoted_in, one_wei_unit() + self.tolerance, one_wei_unit())
    }

    /// Price limit for a swap given the current spot price, rounded up.
    pub fn max_price(&self, spot_price: U256) -> Result<U256, ConversionError> {
        self.max_amount_in(spot_price)
    }
}

impl Default for Slippage {
    fn default() -> Self {
        // 1%
        Self {
            tolerance: U256::exp10(16),
        }
    }
}
