//! Collaborators for exchange rates and balances.

use super::FxError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hostkit_types::{Amount, CollectiveId, Currency};
use std::collections::HashMap;

/// Platform reference exchange rates.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Rate multiplying `from` into `to` at `date` (latest when `None`).
    async fn fx_rate(
        &self,
        from: Currency,
        to: Currency,
        date: Option<DateTime<Utc>>,
    ) -> Result<f64, FxError>;

    /// Every rate published for the pair since `since`, including the
    /// latest one.
    async fn rates_since(
        &self,
        from: Currency,
        to: Currency,
        since: DateTime<Utc>,
    ) -> Result<Vec<f64>, FxError>;
}

/// Available balances held by the paying accounts.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    async fn available_balance(&self, collective: CollectiveId) -> Result<Amount, FxError>;
}

/// In-memory [`ExchangeRateProvider`] seeded with fixed rates.
///
/// A pair registered one way also answers the reverse pair with the
/// inverse rate.
#[derive(Debug, Clone, Default)]
pub struct StaticRateTable {
    latest: HashMap<(Currency, Currency), f64>,
    history: HashMap<(Currency, Currency), Vec<(DateTime<Utc>, f64)>>,
}

impl StaticRateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table from `(from, to, rate)` triples such as
    /// [`FxConfig::parsed_rates`](crate::config::FxConfig::parsed_rates).
    #[must_use]
    pub fn from_rates(rates: impl IntoIterator<Item = (Currency, Currency, f64)>) -> Self {
        rates
            .into_iter()
            .fold(Self::new(), |table, (from, to, rate)| table.with_rate(from, to, rate))
    }

    #[must_use]
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.latest.insert((from, to), rate);
        self
    }

    /// Records a historical rate, visible to [`ExchangeRateProvider::rates_since`].
    #[must_use]
    pub fn with_historical_rate(
        mut self,
        from: Currency,
        to: Currency,
        date: DateTime<Utc>,
        rate: f64,
    ) -> Self {
        self.history.entry((from, to)).or_default().push((date, rate));
        self
    }

    fn lookup(&self, from: Currency, to: Currency) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.latest
            .get(&(from, to))
            .copied()
            .or_else(|| self.latest.get(&(to, from)).map(|rate| 1.0 / rate))
    }

    fn history_since(&self, from: Currency, to: Currency, since: DateTime<Utc>) -> Vec<f64> {
        let direct = self
            .history
            .get(&(from, to))
            .into_iter()
            .flatten()
            .filter(|(date, _)| *date >= since)
            .map(|(_, rate)| *rate);
        let inverse = self
            .history
            .get(&(to, from))
            .into_iter()
            .flatten()
            .filter(|(date, _)| *date >= since)
            .map(|(_, rate)| 1.0 / rate);
        direct.chain(inverse).collect()
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateTable {
    async fn fx_rate(
        &self,
        from: Currency,
        to: Currency,
        _date: Option<DateTime<Utc>>,
    ) -> Result<f64, FxError> {
        self.lookup(from, to)
            .ok_or(FxError::RateUnavailable { from, to })
    }

    async fn rates_since(
        &self,
        from: Currency,
        to: Currency,
        since: DateTime<Utc>,
    ) -> Result<Vec<f64>, FxError> {
        let mut rates = self.history_since(from, to, since);
        rates.extend(self.lookup(from, to));
        if rates.is_empty() {
            return Err(FxError::RateUnavailable { from, to });
        }
        Ok(rates)
    }
}

/// In-memory [`BalanceProvider`].
#[derive(Debug, Clone, Default)]
pub struct StaticBalances {
    balances: HashMap<CollectiveId, Amount>,
}

impl StaticBalances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_balance(mut self, collective: CollectiveId, balance: Amount) -> Self {
        self.balances.insert(collective, balance);
        self
    }
}

#[async_trait]
impl BalanceProvider for StaticBalances {
    async fn available_balance(&self, collective: CollectiveId) -> Result<Amount, FxError> {
        self.balances
            .get(&collective)
            .copied()
            .ok_or_else(|| FxError::Balance {
                collective,
                reason: "no balance recorded".to_string(),
            })
    }
}
