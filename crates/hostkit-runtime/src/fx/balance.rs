//! Pre-payment balance check.

use super::{convert_cents, BalanceProvider, ExchangeRateProvider, FxError};
use crate::config::RuleSettings;
use crate::model::{Collective, ExpenseView, PayoutMethod};
use chrono::{DateTime, Duration, Utc};
use hostkit_types::{format_amount, Amount, Currency};
use serde::{Deserialize, Serialize};

/// Payment details known before paying an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayExpenseOptions {
    /// Processor fee charged to the collective, in host-currency cents.
    pub payment_processor_fee_in_host_currency: i64,
    /// Amount the host already knows it will pay, fees included. Replaces
    /// the estimate.
    pub total_amount_paid_in_host_currency: Option<i64>,
}

/// Checks that a collective can cover an expense before it is paid.
///
/// When the expense and the host use different currencies, the expense is
/// converted at the worst rate seen over the volatility window so a rate
/// swing between approval and payout cannot overdraw the collective.
pub struct BalanceChecker<'a> {
    rates: &'a dyn ExchangeRateProvider,
    balances: &'a dyn BalanceProvider,
    volatility_window: Duration,
}

struct Requirement {
    /// Host-currency cents that must be available.
    total: i64,
    fees: i64,
    /// Rate used when the expense currency differs from the host's.
    margin_rate: Option<f64>,
}

impl<'a> BalanceChecker<'a> {
    #[must_use]
    pub fn new(
        rates: &'a dyn ExchangeRateProvider,
        balances: &'a dyn BalanceProvider,
        settings: &RuleSettings,
    ) -> Self {
        Self {
            rates,
            balances,
            volatility_window: settings.fx_volatility_window(),
        }
    }

    /// Fails unless `view.collective` holds enough to pay `view.expense`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::InsufficientBalance`] with a user-facing message,
    /// or the collaborator error when a rate or balance lookup fails.
    pub async fn check_has_balance_to_pay_expense(
        &self,
        host: &Collective,
        view: &ExpenseView<'_>,
        payout_method: Option<&PayoutMethod>,
        options: &PayExpenseOptions,
    ) -> Result<(), FxError> {
        self.check_has_balance_to_pay_expense_at(host, view, payout_method, options, Utc::now())
            .await
    }

    /// [`check_has_balance_to_pay_expense`](Self::check_has_balance_to_pay_expense)
    /// with an explicit clock for the volatility window.
    ///
    /// # Errors
    ///
    /// See [`check_has_balance_to_pay_expense`](Self::check_has_balance_to_pay_expense).
    pub async fn check_has_balance_to_pay_expense_at(
        &self,
        host: &Collective,
        view: &ExpenseView<'_>,
        payout_method: Option<&PayoutMethod>,
        options: &PayExpenseOptions,
        now: DateTime<Utc>,
    ) -> Result<(), FxError> {
        let host_currency = host.currency;
        let expense = view.expense;
        let balance = self.balance_in(view.collective, host_currency).await?;
        let required = self.requirement(expense.total(), host_currency, options, now).await?;

        tracing::debug!(
            expense = %expense.id,
            collective = %view.collective.id,
            balance,
            required = required.total,
            payout_method = ?payout_method.map(|m| m.kind),
            "balance check"
        );

        if balance >= required.total {
            return Ok(());
        }

        let mut message = format!(
            "Collective does not have enough funds to pay this expense. Current balance: {}, Expense amount: {}",
            format_amount(balance, host_currency),
            expense_amount_label(expense.total(), host_currency, options, &required),
        );
        if required.fees > 0 {
            message.push_str(&format!(
                ", Estimated fees: {}",
                format_amount(required.fees, host_currency)
            ));
        }
        if let Some(rate) = required.margin_rate {
            let payable = convert_cents((balance - required.fees).max(0), 1.0 / rate);
            message.push_str(&format!(
                ". Maximum payable amount: {}",
                format_amount(payable, expense.currency)
            ));
        }
        Err(FxError::InsufficientBalance { message })
    }

    async fn balance_in(&self, collective: &Collective, currency: Currency) -> Result<i64, FxError> {
        let balance = self.balances.available_balance(collective.id).await?;
        if balance.currency == currency {
            return Ok(balance.cents);
        }
        let rate = self.rates.fx_rate(balance.currency, currency, None).await?;
        Ok(convert_cents(balance.cents, rate))
    }

    async fn requirement(
        &self,
        amount: Amount,
        host_currency: Currency,
        options: &PayExpenseOptions,
        now: DateTime<Utc>,
    ) -> Result<Requirement, FxError> {
        if let Some(total) = options.total_amount_paid_in_host_currency {
            return Ok(Requirement {
                total,
                fees: 0,
                margin_rate: None,
            });
        }

        let fees = options.payment_processor_fee_in_host_currency;
        if amount.currency == host_currency {
            return Ok(Requirement {
                total: amount.cents + fees,
                fees,
                margin_rate: None,
            });
        }

        let since = now - self.volatility_window;
        let worst = self
            .rates
            .rates_since(amount.currency, host_currency, since)
            .await?
            .into_iter()
            .fold(f64::NAN, f64::max);
        if !worst.is_finite() || worst <= 0.0 {
            return Err(FxError::InvalidRate {
                from: amount.currency,
                to: host_currency,
                value: worst,
            });
        }
        Ok(Requirement {
            total: convert_cents(amount.cents, worst) + fees,
            fees,
            margin_rate: Some(worst),
        })
    }
}

fn expense_amount_label(
    amount: Amount,
    host_currency: Currency,
    options: &PayExpenseOptions,
    required: &Requirement,
) -> String {
    if let Some(total) = options.total_amount_paid_in_host_currency {
        return format_amount(total, host_currency);
    }
    match required.margin_rate {
        None => amount.to_string(),
        Some(rate) => format!(
            "{} (≈ {} with exchange rate margin)",
            amount,
            format_amount(convert_cents(amount.cents, rate), host_currency)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::{StaticBalances, StaticRateTable};
    use crate::model::{CollectiveKind, Expense};
    use hostkit_types::{CollectiveId, ExpenseId, UserId};

    fn accounts(currency: Currency) -> (Collective, Collective) {
        let host = Collective::new(CollectiveId(1), CollectiveKind::Organization, currency)
            .with_host(CollectiveId(1));
        let collective = Collective::new(CollectiveId(2), CollectiveKind::Collective, currency)
            .with_host(CollectiveId(1));
        (host, collective)
    }

    fn expense(amount: Amount) -> Expense {
        Expense::new(ExpenseId(3), CollectiveId(2), CollectiveId(40), UserId(4), amount)
    }

    #[tokio::test]
    async fn fees_are_added_to_the_requirement() {
        let (host, collective) = accounts(Currency::Usd);
        let expense = expense(Amount::new(90_000, Currency::Usd));
        let view = ExpenseView::new(&expense, &collective, Some(&host));
        let rates = StaticRateTable::new();
        let balances =
            StaticBalances::new().with_balance(CollectiveId(2), Amount::new(100_000, Currency::Usd));
        let checker = BalanceChecker::new(&rates, &balances, &RuleSettings::default());

        let ok = PayExpenseOptions {
            payment_processor_fee_in_host_currency: 10_000,
            ..Default::default()
        };
        assert!(checker
            .check_has_balance_to_pay_expense(&host, &view, None, &ok)
            .await
            .is_ok());

        let too_much = PayExpenseOptions {
            payment_processor_fee_in_host_currency: 10_001,
            ..Default::default()
        };
        let err = checker
            .check_has_balance_to_pay_expense(&host, &view, None, &too_much)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Collective does not have enough funds to pay this expense. Current balance: $1,000.00, Expense amount: $900.00, Estimated fees: $100.01"
        );
    }

    #[tokio::test]
    async fn explicit_total_replaces_estimate() {
        let (host, collective) = accounts(Currency::Usd);
        let expense = expense(Amount::new(1, Currency::Usd));
        let view = ExpenseView::new(&expense, &collective, Some(&host));
        let rates = StaticRateTable::new();
        let balances =
            StaticBalances::new().with_balance(CollectiveId(2), Amount::new(500, Currency::Usd));
        let checker = BalanceChecker::new(&rates, &balances, &RuleSettings::default());

        let options = PayExpenseOptions {
            payment_processor_fee_in_host_currency: 100_000,
            total_amount_paid_in_host_currency: Some(501),
        };
        let err = checker
            .check_has_balance_to_pay_expense(&host, &view, None, &options)
            .await
            .unwrap_err();
        assert!(err.to_string().ends_with("Expense amount: $5.01"));
    }

    #[tokio::test]
    async fn balance_in_other_currency_is_converted() {
        let (host, collective) = accounts(Currency::Usd);
        let expense = expense(Amount::new(1_000, Currency::Usd));
        let view = ExpenseView::new(&expense, &collective, Some(&host));
        let rates = StaticRateTable::new().with_rate(Currency::Eur, Currency::Usd, 2.0);
        let balances =
            StaticBalances::new().with_balance(CollectiveId(2), Amount::new(500, Currency::Eur));
        let checker = BalanceChecker::new(&rates, &balances, &RuleSettings::default());

        assert!(checker
            .check_has_balance_to_pay_expense(&host, &view, None, &PayExpenseOptions::default())
            .await
            .is_ok());
    }
}
