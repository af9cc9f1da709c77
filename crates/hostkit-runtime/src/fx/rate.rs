use super::FxError;
use chrono::{DateTime, Utc};
use hostkit_types::{Currency, TryNew};
use serde::{Deserialize, Serialize};

/// Where an exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Wise,
    #[serde(rename = "PAYPAL")]
    PayPal,
    /// Rate recorded on the settlement ledger entry.
    Ledger,
    /// Platform reference table.
    Platform,
}

/// A rate multiplying amounts in `from_currency` into `to_currency`.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use hostkit_runtime::fx::{ExchangeRate, RateSource};
/// use hostkit_types::{Currency, TryNew};
///
/// let rate = ExchangeRate::try_new((Currency::Eur, Currency::Usd, 1.1, Utc::now(), RateSource::Platform))
///     .expect("valid rate");
/// assert!(rate.is_approximate);
/// assert_eq!(rate.convert(1000), 1100);
///
/// assert!(ExchangeRate::try_new((Currency::Eur, Currency::Usd, 0.0, Utc::now(), RateSource::Wise)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub value: f64,
    pub date: DateTime<Utc>,
    pub source: RateSource,
    /// `true` for platform reference rates; provider and ledger rates are
    /// the ones money actually moved at.
    pub is_approximate: bool,
}

impl TryNew for ExchangeRate {
    type Error = FxError;
    type Args = (Currency, Currency, f64, DateTime<Utc>, RateSource);

    fn try_new(
        (from_currency, to_currency, value, date, source): Self::Args,
    ) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(FxError::InvalidRate {
                from: from_currency,
                to: to_currency,
                value,
            });
        }
        Ok(Self {
            from_currency,
            to_currency,
            value,
            date,
            source,
            is_approximate: source == RateSource::Platform,
        })
    }
}

impl ExchangeRate {
    /// Converts `cents` of `from_currency` into cents of `to_currency`.
    #[must_use]
    pub fn convert(&self, cents: i64) -> i64 {
        super::convert_cents(cents, self.value)
    }
}

/// An amount expressed in a target currency, with the rate used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedAmount {
    /// Cents of `currency`.
    pub value: i64,
    pub currency: Currency,
    /// `None` when no conversion was needed.
    pub exchange_rate: Option<ExchangeRate>,
}
