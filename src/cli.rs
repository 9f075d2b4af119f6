//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::config_pricing_adapter::ConfigPricingAdapter;
use crate::adapters::csv_history_adapter::CsvHistoryAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::validate_report_config;
use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::ledger::Ledger;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;
use crate::ports::pricing_port::PricingPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Portfolio valuation from a transaction history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a transaction history and write a valuation report
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        history: Option<PathBuf>,
        #[arg(long)]
        currency: Option<Currency>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the total portfolio value
    Value {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        history: Option<PathBuf>,
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Check that a history file parses
    Validate {
        #[arg(long)]
        history: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            history,
            currency,
            output,
        } => run_report(&config, history.as_ref(), currency, output.as_ref()),
        Command::Value {
            config,
            history,
            currency,
        } => run_value(&config, history.as_ref(), currency),
        Command::Validate { history } => run_validate(&history),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// A `--currency` flag overrides `[report] currency`; one of the two is
/// required.
pub fn resolve_currency(
    currency_override: Option<Currency>,
    config: &dyn ConfigPort,
) -> Result<Currency, FolioError> {
    if let Some(currency) = currency_override {
        return Ok(currency);
    }

    let raw = config
        .get_string("report", "currency")
        .ok_or_else(|| FolioError::ConfigMissing {
            section: "report".into(),
            key: "currency".into(),
        })?;
    raw.trim()
        .parse()
        .map_err(|reason| FolioError::ConfigInvalid {
            section: "report".into(),
            key: "currency".into(),
            reason,
        })
}

/// A `--history` flag overrides `[history] file`; one of the two is
/// required.
pub fn resolve_history(
    history_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, FolioError> {
    if let Some(path) = history_override {
        return Ok(path.clone());
    }

    config
        .get_string("history", "file")
        .map(PathBuf::from)
        .ok_or_else(|| FolioError::ConfigMissing {
            section: "history".into(),
            key: "file".into(),
        })
}

fn load_ledger(history_path: &PathBuf, pricing: &dyn PricingPort) -> Result<Ledger, FolioError> {
    eprintln!("Loading history from {}", history_path.display());
    let transactions = CsvHistoryAdapter::new(history_path.clone()).load()?;

    eprintln!("Replaying {} transactions...", transactions.len());
    let mut ledger = Ledger::new();
    ledger.apply_transactions(&transactions, pricing)?;
    Ok(ledger)
}

pub fn run_report(
    config_path: &PathBuf,
    history_override: Option<&PathBuf>,
    currency_override: Option<Currency>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_report_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Resolve report currency and history file
    let currency = match resolve_currency(currency_override, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let history_path = match resolve_history(history_override, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Replay the history against the configured price tables
    let pricing = ConfigPricingAdapter::new(&config);
    let ledger = match load_ledger(&history_path, &pricing) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Render the report to stdout or the requested file
    let decimals = config.get_int("report", "decimals", 3) as usize;
    let report = TextReportAdapter::new(decimals);

    let result = match output_path {
        Some(path) => match File::create(path) {
            Ok(mut file) => report.write(&ledger, currency, &pricing, &mut file),
            Err(e) => Err(FolioError::Io(e)),
        },
        None => {
            let mut stdout = io::stdout().lock();
            report.write(&ledger, currency, &pricing, &mut stdout)
        }
    };

    match result {
        Ok(()) => {
            if let Some(path) = output_path {
                eprintln!("Report written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_value(
    config_path: &PathBuf,
    history_override: Option<&PathBuf>,
    currency_override: Option<Currency>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_report_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let currency = match resolve_currency(currency_override, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let history_path = match resolve_history(history_override, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let pricing = ConfigPricingAdapter::new(&config);
    let ledger = match load_ledger(&history_path, &pricing) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let total = match ledger.total_value(currency, &pricing) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let decimals = config.get_int("report", "decimals", 3) as usize;
    println!("{:.*} {}", decimals, total, currency);
    ExitCode::SUCCESS
}

pub fn run_validate(history_path: &PathBuf) -> ExitCode {
    eprintln!("Validating history: {}", history_path.display());
    let transactions = match CsvHistoryAdapter::new(history_path.clone()).load() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for (index, tx) in transactions.iter().enumerate() {
        match &tx.outgoing {
            Some(outgoing) => println!("{:3}. {} paid with {}", index + 1, tx.incoming, outgoing),
            None => println!("{:3}. {} (investment)", index + 1, tx.incoming),
        }
    }

    eprintln!("{} transactions parsed", transactions.len());
    ExitCode::SUCCESS
}
