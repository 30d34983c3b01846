//! `paytrail-merchant` command-line tool.
//!
//! Runs a single Merchant API call using credentials from the environment
//! and prints the response content.

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;

use paytrail_merchant::config::AppConfig;
use paytrail_merchant::telemetry;
use paytrail_merchant::{MerchantApi, Outcome};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Paytrail Merchant API client
#[derive(Debug, Parser)]
#[command(
    name = "paytrail-merchant",
    version,
    after_help = "Credentials are read from PAYTRAIL__MERCHANT__ID and PAYTRAIL__MERCHANT__SECRET."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Get payment details
    Payment { payment_id: String },

    /// List payments by order number
    Payments { order_number: String },

    /// Get refund details
    Refund { refund_token: String },

    /// Cancel a refund
    CancelRefund { refund_token: String },

    /// Create a refund for a payment
    CreateRefund {
        payment_id: u64,

        email: String,

        /// Refund rows as a JSON array, e.g. '[{"title":"foo","amount":10}]'
        #[arg(value_parser = parse_rows)]
        rows: RefundRows,

        /// URL notified when the refund settles
        notify_url: Option<String>,
    },

    /// List settlements between two dates (YYYY-MM-DD)
    Settlements {
        #[arg(value_parser = parse_date)]
        from_date: NaiveDate,

        /// Defaults to today (UTC)
        #[arg(value_parser = parse_date)]
        to_date: Option<NaiveDate>,
    },

    /// Get settlement details
    Settlement { settlement_id: String },
}

/// Refund rows parsed from a JSON array argument.
#[derive(Debug, Clone, PartialEq)]
struct RefundRows(Vec<Value>);

fn parse_rows(value: &str) -> Result<RefundRows, String> {
    serde_json::from_str(value)
        .map(RefundRows)
        .map_err(|e| format!("rows must be a JSON array: {e}"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("invalid date (expected YYYY-MM-DD): {value}"))
}

impl Command {
    async fn run(self, api: &MerchantApi) -> Outcome {
        match self {
            Self::Payment { payment_id } => api.get_payment_details(&payment_id).await,
            Self::Payments { order_number } => api.get_payments(&order_number).await,
            Self::Refund { refund_token } => api.get_refund_details(&refund_token).await,
            Self::CancelRefund { refund_token } => api.cancel_refund(&refund_token).await,
            Self::CreateRefund {
                payment_id,
                email,
                rows,
                notify_url,
            } => {
                api.create_refund(payment_id, rows.0.as_slice(), &email, notify_url.as_deref())
                    .await
            }
            Self::Settlements { from_date, to_date } => {
                api.get_settlements(from_date, to_date).await
            }
            Self::Settlement { settlement_id } => {
                api.get_settlement_details(&settlement_id).await
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("error: invalid configuration: {e}");
        return ExitCode::from(2);
    }

    if let Err(e) = telemetry::init_tracing(&config.logging) {
        eprintln!("error: failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let api = match MerchantApi::from_config(&config.merchant, &config.http) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.run(&api).await {
        Outcome::Success { content } => {
            println!("{content}");
            ExitCode::SUCCESS
        }
        Outcome::Failed { error } => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
