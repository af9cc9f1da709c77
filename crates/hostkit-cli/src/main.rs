//! hostkit CLI - permission and currency decisions from JSON fixtures
//!
//! Each subcommand loads the records of one decision from a fixture file,
//! runs the matching predicate and prints the outcome.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HOSTKIT_*`)
//! 3. Project config (`.hostkit/config.toml` in the project root)
//! 4. Global config (`~/.hostkit/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | allowed, names match, conversion printed |
//! | 1 | denied, or names do not match |
//! | 2 | bad input (fixture, config, arguments) or a failed lookup |

mod fixture;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fixture::{ExpenseFixture, TransactionFixture};
use hostkit_auth::{check_scope, ContextPermissionStore, PermissionError, Requester};
use hostkit_runtime::auth::{
    assert_can, ExpenseAction, RequestContext, TransactionAction, TransactionRules,
};
use hostkit_runtime::config::{ConfigLoader, HostkitConfig};
use hostkit_runtime::fx::{
    expense_amount_in_currency, BalanceChecker, FxError, StaticBalances, StaticRateTable,
};
use hostkit_runtime::names::is_account_holder_name_and_legal_name_match;
use hostkit_types::{format_amount, CollectiveId, Currency, ErrorCode, OAuthScope, UserId};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// hostkit - fiscal host permission and currency decisions
#[derive(Parser, Debug)]
#[command(name = "hostkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide an action on an expense
    Expense {
        /// Action name, e.g. `approve` or `see-payout-method`
        action: ExpenseAction,
        #[arg(long)]
        fixture: PathBuf,
    },
    /// Decide a refund, rejection or invoice download on a transaction
    Transaction {
        /// `refund`, `reject` or `download-invoice`
        action: TransactionAction,
        #[arg(long)]
        fixture: PathBuf,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Compare a bank account holder name with a legal name
    Names { holder: String, legal: String },
    /// Check whether a token scope list covers an operation scope
    Scope {
        required: OAuthScope,
        /// Comma separated token scopes; omitted means no token
        #[arg(long, value_delimiter = ',')]
        token_scopes: Option<Vec<OAuthScope>>,
    },
    /// Convert an expense amount using its recorded provenance
    Convert {
        #[arg(long)]
        fixture: PathBuf,
        /// Target currency code
        #[arg(long)]
        to: Currency,
        /// Print the conversion as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the collective can cover an expense
    Balance {
        #[arg(long)]
        fixture: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

/// Denied-or-allowed result of one command.
enum Outcome {
    Allowed,
    Denied { code: &'static str, message: String },
}

impl Outcome {
    fn from_result<E: ErrorCode + std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Allowed,
            Err(err) => Self::Denied {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }

    fn report(self) -> ExitCode {
        match self {
            Self::Allowed => {
                println!("allowed");
                ExitCode::SUCCESS
            }
            Self::Denied { code, message } => {
                println!("denied [{code}]: {message}");
                ExitCode::from(1)
            }
        }
    }
}

fn load_config(args: &Args) -> Result<HostkitConfig> {
    let project_root = match &args.project {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let mut config = ConfigLoader::new()
        .with_project_root(project_root)
        .load()
        .context("config error")?;
    if args.debug {
        config.debug = true;
    }
    Ok(config)
}

fn init_tracing(debug: bool) {
    // --debug > config debug > RUST_LOG > "warn"
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn platform_rates(config: &HostkitConfig) -> Result<StaticRateTable> {
    let rates = config.fx.parsed_rates().context("config error")?;
    Ok(StaticRateTable::from_rates(rates))
}

async fn run(args: Args, config: HostkitConfig) -> Result<ExitCode> {
    let settings = config.rule_settings();

    let outcome = match args.command {
        Command::Expense {
            action,
            fixture: path,
        } => {
            let fixture: ExpenseFixture = fixture::load(&path)?;
            let requester = fixture
                .requester
                .build()
                .with_context(|| format!("invalid requester in {}", path.display()))?;
            let permissions = fixture.permissions();
            let ctx = RequestContext::new(&requester, &permissions);
            Outcome::from_result(assert_can(action, &ctx, &fixture.view()))
        }
        Command::Transaction {
            action,
            fixture: path,
            now,
        } => {
            let fixture: TransactionFixture = fixture::load(&path)?;
            let requester = fixture
                .requester
                .build()
                .with_context(|| format!("invalid requester in {}", path.display()))?;
            let rules = TransactionRules::new(&settings);
            let now = now.unwrap_or_else(Utc::now);
            Outcome::from_result(decide_transaction(
                &rules,
                action,
                &requester,
                &fixture,
                now,
            ))
        }
        Command::Names { holder, legal } => {
            return Ok(if is_account_holder_name_and_legal_name_match(&holder, &legal) {
                println!("match");
                ExitCode::SUCCESS
            } else {
                println!("no match");
                ExitCode::from(1)
            });
        }
        Command::Scope {
            required,
            token_scopes,
        } => {
            let mut requester = Requester::user(UserId(0), CollectiveId(0));
            if let Some(scopes) = token_scopes {
                requester = requester.with_token_scopes(scopes);
            }
            Outcome::from_result(if check_scope(&requester, required) {
                Ok(())
            } else {
                Err(PermissionError::ScopeForbidden { scope: required })
            })
        }
        Command::Convert {
            fixture: path,
            to,
            json,
        } => {
            let fixture: ExpenseFixture = fixture::load(&path)?;
            let rates = platform_rates(&config)?;
            let converted = expense_amount_in_currency(&fixture.expense, to, &rates)
                .await
                .with_context(|| format!("cannot convert expense {}", fixture.expense.id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&converted)?);
            } else {
                let amount = format_amount(converted.value, converted.currency);
                match converted.exchange_rate {
                    None => println!("{amount}"),
                    Some(rate) => println!(
                        "{amount} (rate {} from {:?}{})",
                        rate.value,
                        rate.source,
                        if rate.is_approximate { ", approximate" } else { "" }
                    ),
                }
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Balance { fixture: path } => {
            let fixture: ExpenseFixture = fixture::load(&path)?;
            let host = fixture
                .host
                .as_ref()
                .context("balance check needs a host in the fixture")?;
            let balance = fixture
                .balance
                .context("balance check needs a balance in the fixture")?;
            let rates = platform_rates(&config)?;
            let balances = StaticBalances::new().with_balance(fixture.collective.id, balance);
            let checker = BalanceChecker::new(&rates, &balances, &settings);
            let result = checker
                .check_has_balance_to_pay_expense(
                    host,
                    &fixture.view(),
                    fixture.payout_method.as_ref(),
                    &fixture.options,
                )
                .await;
            match result {
                Err(err @ FxError::InsufficientBalance { .. }) => Outcome::from_result(Err(err)),
                Err(err) => return Err(err).context("balance check failed"),
                Ok(()) => Outcome::Allowed,
            }
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(outcome.report())
}

fn decide_transaction(
    rules: &TransactionRules,
    action: TransactionAction,
    requester: &Requester,
    fixture: &TransactionFixture,
    now: DateTime<Utc>,
) -> Result<(), PermissionError> {
    let permissions = ContextPermissionStore::new();
    let ctx = RequestContext::new(requester, &permissions);
    let txn = &fixture.transaction;
    match action {
        TransactionAction::Refund => rules.assert_can_refund_at(&ctx, txn, now),
        TransactionAction::Reject => rules.assert_can_reject_at(&ctx, txn, now),
        TransactionAction::DownloadInvoice => rules.assert_can_download_invoice(&ctx, txn),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(config.debug);
    tracing::debug!(command = ?args.command, "starting");

    match run(args, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
