//! Provenance-chained conversion of expense amounts.

use super::{ConvertedAmount, ExchangeRate, ExchangeRateProvider, FxError, RateSource};
use crate::model::{Expense, PayoutProvider};
use chrono::{DateTime, Utc};
use hostkit_types::{Currency, TryNew};

/// Multiplies `cents` by `rate`, rounding half away from zero.
#[must_use]
pub fn convert_cents(cents: i64, rate: f64) -> i64 {
    // f64::round rounds half away from zero.
    (cents as f64 * rate).round() as i64
}

/// Expresses `expense`'s amount in `target`.
///
/// Rates recorded on the expense are preferred over the platform table,
/// in this order: Wise quote, PayPal conversion, ledger settlement. Only
/// the platform rate is approximate.
///
/// # Errors
///
/// Returns [`FxError::RateUnavailable`] when no recorded rate applies and
/// `rates` has none, and [`FxError::InvalidRate`] for a recorded rate that
/// is not finite and positive.
///
/// # Example
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use hostkit_runtime::fx::{expense_amount_in_currency, RateSource, StaticRateTable};
/// use hostkit_runtime::model::Expense;
/// use hostkit_types::{Amount, CollectiveId, Currency, ExpenseId, UserId};
///
/// let expense = Expense::new(
///     ExpenseId(1),
///     CollectiveId(2),
///     CollectiveId(3),
///     UserId(4),
///     Amount::new(1000, Currency::Eur),
/// );
/// let rates = StaticRateTable::new().with_rate(Currency::Eur, Currency::Usd, 1.1);
///
/// let converted = expense_amount_in_currency(&expense, Currency::Usd, &rates)
///     .await
///     .unwrap();
/// assert_eq!(converted.value, 1100);
/// assert_eq!(converted.exchange_rate.map(|r| r.source), Some(RateSource::Platform));
/// # }
/// ```
pub async fn expense_amount_in_currency(
    expense: &Expense,
    target: Currency,
    rates: &dyn ExchangeRateProvider,
) -> Result<ConvertedAmount, FxError> {
    let from = expense.currency;
    if from == target {
        return Ok(ConvertedAmount {
            value: expense.amount,
            currency: target,
            exchange_rate: None,
        });
    }

    let rate = match recorded_rate(expense, target)? {
        Some(rate) => rate,
        None => {
            let value = rates.fx_rate(from, target, Some(expense.created_at)).await?;
            ExchangeRate::try_new((from, target, value, expense.created_at, RateSource::Platform))?
        }
    };
    tracing::debug!(
        expense = %expense.id,
        from = %from,
        to = %target,
        rate = rate.value,
        source = ?rate.source,
        "selected exchange rate"
    );

    Ok(ConvertedAmount {
        value: rate.convert(expense.amount),
        currency: target,
        exchange_rate: Some(rate),
    })
}

/// Rates money actually moved at, in order of preference.
fn recorded_rate(expense: &Expense, target: Currency) -> Result<Option<ExchangeRate>, FxError> {
    let from = expense.currency;
    let date = expense
        .settlement
        .as_ref()
        .map_or(expense.created_at, |s| s.settled_at);
    let exact = |value: f64, date: DateTime<Utc>, source: RateSource| {
        ExchangeRate::try_new((from, target, value, date, source)).map(Some)
    };

    if let Some(quote) = expense.data.wise_quote {
        if quote.source_currency == from && quote.target_currency == target {
            return exact(quote.rate, date, RateSource::Wise);
        }
        // Quotes for payouts in the expense currency are expressed as a divisor.
        if quote.target_currency == from && quote.source_currency == target {
            return exact(1.0 / quote.rate, date, RateSource::Wise);
        }
    }

    if let Some(conversion) = expense.data.paypal_conversion {
        if conversion.from_currency == from && conversion.to_currency == target {
            return exact(conversion.exchange_rate, date, RateSource::PayPal);
        }
        if conversion.to_currency == from && conversion.from_currency == target {
            return exact(1.0 / conversion.exchange_rate, date, RateSource::PayPal);
        }
    }

    if let Some(settlement) = &expense.settlement {
        if settlement.host_currency == target {
            let source = match settlement.provider {
                Some(PayoutProvider::Wise) => RateSource::Wise,
                Some(PayoutProvider::PayPal) => RateSource::PayPal,
                _ => RateSource::Ledger,
            };
            return exact(settlement.host_currency_fx_rate, settlement.settled_at, source);
        }
    }

    Ok(None)
}
