mod commands;
pub(crate) mod format;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) use commands::run;

#[derive(Debug, Parser)]
#[command(
    name = "spendlog",
    version,
    about = "spendlog - local-only expense tracker with monthly budgets"
)]
pub(crate) struct Cli {
    /// Store file (default: per-user data directory)
    #[arg(long, env = "SPENDLOG_DB", global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Log filter, e.g. "spendlog=debug"
    #[arg(long, env = "SPENDLOG_LOG", global = true)]
    pub(crate) log: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Record a new expense
    Add {
        description: String,
        amount: String,
        /// debit or credit
        #[arg(short, long, default_value = "debit")]
        method: String,
        /// YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// HH:MM (default: now)
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Change fields of an existing expense
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        method: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Delete an expense by id
    Delete { id: String },
    /// List a month's expenses, newest first
    List {
        /// YYYY-MM (default: current month)
        month: Option<String>,
    },
    /// Show a month's spend against its budget
    Summary {
        /// YYYY-MM (default: current month)
        month: Option<String>,
    },
    /// Read or change a monthly budget
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
    /// Write every expense and budget to a JSON backup file
    Export {
        /// Target file or directory (default: current directory)
        path: Option<PathBuf>,
    },
    /// Replace all data with the contents of a backup file
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Permanently delete all expenses and budgets
    Clear {
        /// Required; a typed confirmation is asked for as well
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum BudgetAction {
    /// Show the limit for a month (0 when unset)
    Get {
        /// YYYY-MM (default: current month)
        month: Option<String>,
    },
    /// Set the limit for a month; 0 removes the limit
    Set {
        limit: String,
        /// YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}


#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
