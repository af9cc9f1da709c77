//! Currencies and formatted amounts.
//!
//! Amounts are always carried as integers in hundredths of the currency
//! unit ("cents"), the way the ledger stores them. Formatting follows the
//! en-US conventions the platform uses in user-facing messages.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// ISO 4217 currencies supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Nzd,
    Chf,
    Jpy,
    Sek,
    Nok,
    Dkk,
    Mxn,
    Brl,
    Inr,
    Sgd,
    Hkd,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 16] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Cad,
        Self::Aud,
        Self::Nzd,
        Self::Chf,
        Self::Jpy,
        Self::Sek,
        Self::Nok,
        Self::Dkk,
        Self::Mxn,
        Self::Brl,
        Self::Inr,
        Self::Sgd,
        Self::Hkd,
    ];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Nzd => "NZD",
            Self::Chf => "CHF",
            Self::Jpy => "JPY",
            Self::Sek => "SEK",
            Self::Nok => "NOK",
            Self::Dkk => "DKK",
            Self::Mxn => "MXN",
            Self::Brl => "BRL",
            Self::Inr => "INR",
            Self::Sgd => "SGD",
            Self::Hkd => "HKD",
        }
    }

    /// Returns the display prefix used before formatted amounts.
    ///
    /// Currencies without a dedicated symbol use their code followed by a
    /// space (`CHF 10.00`).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Cad => "CA$",
            Self::Aud => "A$",
            Self::Nzd => "NZ$",
            Self::Jpy => "¥",
            Self::Mxn => "MX$",
            Self::Brl => "R$",
            Self::Inr => "₹",
            Self::Hkd => "HK$",
            Self::Chf => "CHF ",
            Self::Sek => "SEK ",
            Self::Nok => "NOK ",
            Self::Dkk => "DKK ",
            Self::Sgd => "SGD ",
        }
    }

    /// Number of decimals shown when formatting.
    #[must_use]
    pub fn display_decimals(self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a currency code is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported currency code '{0}'")]
pub struct ParseCurrencyError(pub String);

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| ParseCurrencyError(s.to_string()))
    }
}

/// An amount of money in cents, tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Value in hundredths of the currency unit.
    pub cents: i64,
    /// Currency of the value.
    pub currency: Currency,
}

impl Amount {
    /// Creates a new amount.
    #[must_use]
    pub fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_amount(self.cents, self.currency))
    }
}

/// Formats an amount in cents for user-facing messages.
///
/// Uses the currency symbol, comma thousands separators and the currency's
/// display decimals.
///
/// # Example
///
/// ```
/// use hostkit_types::{format_amount, Currency};
///
/// assert_eq!(format_amount(100_000, Currency::Usd), "$1,000.00");
/// assert_eq!(format_amount(-150, Currency::Eur), "-€1.50");
/// assert_eq!(format_amount(123_456, Currency::Jpy), "¥1,235");
/// ```
#[must_use]
pub fn format_amount(cents: i64, currency: Currency) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();

    let body = if currency.display_decimals() == 0 {
        // Half-up on the dropped cents.
        group_thousands((abs + 50) / 100)
    } else {
        format!("{}.{:02}", group_thousands(abs / 100), abs % 100)
    };

    format!("{sign}{}{body}", currency.symbol())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_balance_message_amounts() {
        assert_eq!(format_amount(100_000, Currency::Usd), "$1,000.00");
        assert_eq!(format_amount(100_001, Currency::Usd), "$1,000.01");
    }

    #[test]
    fn formats_small_and_large_values() {
        assert_eq!(format_amount(0, Currency::Usd), "$0.00");
        assert_eq!(format_amount(5, Currency::Gbp), "£0.05");
        assert_eq!(format_amount(123_456_789, Currency::Eur), "€1,234,567.89");
        assert_eq!(format_amount(99_999, Currency::Cad), "CA$999.99");
    }

    #[test]
    fn code_prefixed_currencies_keep_a_space() {
        assert_eq!(format_amount(1_000, Currency::Chf), "CHF 10.00");
    }

    #[test]
    fn negative_amounts_put_sign_first() {
        assert_eq!(format_amount(-100_000, Currency::Usd), "-$1,000.00");
    }

    #[test]
    fn zero_decimal_currency_rounds() {
        assert_eq!(format_amount(10_049, Currency::Jpy), "¥100");
        assert_eq!(format_amount(10_050, Currency::Jpy), "¥101");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!(" EUR ".parse::<Currency>(), Ok(Currency::Eur));
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn serde_uses_iso_codes() {
        let json = serde_json::to_string(&Currency::Eur).expect("serialize");
        assert_eq!(json, "\"EUR\"");
        let parsed: Currency = serde_json::from_str("\"GBP\"").expect("deserialize");
        assert_eq!(parsed, Currency::Gbp);
    }

    #[test]
    fn every_code_round_trips_through_from_str() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }
}
