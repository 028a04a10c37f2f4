use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::format::{format_amount, summary_lines, transaction_row};
use super::{BudgetAction, Command};
use crate::ledger::{Ledger, NewTransaction};
use crate::models::PaymentMethod;

pub(crate) fn run(
    command: Command,
    ledger: &mut Ledger,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Add {
            description,
            amount,
            method,
            date,
            time,
        } => cli_add(ledger, out, description, &amount, &method, date, time),
        Command::Edit {
            id,
            description,
            amount,
            method,
            date,
            time,
        } => cli_edit(ledger, out, &id, description, amount, method, date, time),
        Command::Delete { id } => {
            ledger.delete_transaction(&id)?;
            writeln!(out, "Deleted {id}")?;
            Ok(())
        }
        Command::List { month } => cli_list(ledger, out, &month_or_current(month)),
        Command::Summary { month } => cli_summary(ledger, out, &month_or_current(month)),
        Command::Budget { action } => cli_budget(ledger, out, action),
        Command::Export { path } => cli_export(ledger, out, path),
        Command::Import { file, yes } => cli_import(ledger, input, out, &file, yes),
        Command::Clear { yes } => cli_clear(ledger, input, out, yes),
    }
}

fn cli_add(
    ledger: &mut Ledger,
    out: &mut dyn Write,
    description: String,
    amount: &str,
    method: &str,
    date: Option<String>,
    time: Option<String>,
) -> Result<()> {
    let now = chrono::Local::now();
    let txn = ledger.add_transaction(NewTransaction {
        description,
        amount: parse_amount(amount)?,
        method: parse_method(method)?,
        date: date.unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
        time: time.unwrap_or_else(|| now.format("%H:%M").to_string()),
    })?;
    writeln!(out, "Added {}", txn.id)?;
    writeln!(out, "{}", transaction_row(&txn))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cli_edit(
    ledger: &mut Ledger,
    out: &mut dyn Write,
    id: &str,
    description: Option<String>,
    amount: Option<String>,
    method: Option<String>,
    date: Option<String>,
    time: Option<String>,
) -> Result<()> {
    let mut txn = ledger
        .transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("No transaction with id {id}"))?;

    if let Some(description) = description {
        txn.description = description.trim().to_string();
    }
    if let Some(amount) = amount {
        txn.amount = parse_amount(&amount)?;
    }
    if let Some(method) = method {
        txn.method = parse_method(&method)?;
    }
    if let Some(date) = date {
        txn.date = date;
    }
    if let Some(time) = time {
        txn.time = time;
    }

    ledger.update_transaction(&txn)?;
    writeln!(out, "Updated {id}")?;
    writeln!(out, "{}", transaction_row(&txn))?;
    Ok(())
}

fn cli_list(ledger: &Ledger, out: &mut dyn Write, month: &str) -> Result<()> {
    let txns = ledger.list_for_month(month)?;
    if txns.is_empty() {
        writeln!(out, "No transactions for {month}")?;
        return Ok(());
    }
    for txn in &txns {
        writeln!(out, "{}", transaction_row(txn))?;
    }
    Ok(())
}

fn cli_summary(ledger: &Ledger, out: &mut dyn Write, month: &str) -> Result<()> {
    let summary = ledger.month_summary(month)?;
    for line in summary_lines(&summary) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cli_budget(ledger: &Ledger, out: &mut dyn Write, action: BudgetAction) -> Result<()> {
    match action {
        BudgetAction::Get { month } => {
            let month = month_or_current(month);
            let limit = ledger.get_budget(&month)?;
            if limit > Decimal::ZERO {
                writeln!(out, "{month}: {}", format_amount(limit))?;
            } else {
                writeln!(out, "{month}: no budget set")?;
            }
        }
        BudgetAction::Set { limit, month } => {
            let month = month_or_current(month);
            let limit = parse_amount(&limit)?;
            ledger.set_budget(&month, limit)?;
            writeln!(out, "Budget for {month} set to {}", format_amount(limit))?;
        }
    }
    Ok(())
}

fn cli_export(ledger: &Ledger, out: &mut dyn Write, path: Option<PathBuf>) -> Result<()> {
    let snapshot = ledger.export()?;
    let target = match path {
        Some(p) if p.is_dir() => p.join(snapshot.file_name()),
        Some(p) => p,
        None => PathBuf::from(snapshot.file_name()),
    };

    let json = crate::backup::to_json(&snapshot)?;
    write_atomically(&target, json.as_bytes())?;

    writeln!(
        out,
        "Exported {} transactions and {} budgets to {}",
        snapshot.transactions.len(),
        snapshot.budgets.len(),
        target.display()
    )?;
    Ok(())
}

fn cli_import(
    ledger: &mut Ledger,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    file: &Path,
    yes: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read backup file: {}", file.display()))?;

    if !yes {
        let existing = ledger.database().transactions().count()?;
        let question = format!(
            "Importing replaces all current data ({existing} transactions). Type 'yes' to continue: "
        );
        if !confirm(input, out, &question, "yes")? {
            writeln!(out, "Import cancelled")?;
            return Ok(());
        }
    }

    let stats = ledger.import_json(&raw)?;
    writeln!(
        out,
        "Imported {} transactions and {} budgets",
        stats.transactions, stats.budgets
    )?;
    Ok(())
}

fn cli_clear(
    ledger: &mut Ledger,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    yes: bool,
) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to clear without --yes");
    }
    if !confirm(
        input,
        out,
        "This permanently deletes every transaction and budget. Type 'clear' to confirm: ",
        "clear",
    )? {
        writeln!(out, "Clear cancelled")?;
        return Ok(());
    }
    ledger.clear_all()?;
    writeln!(out, "All data cleared")?;
    Ok(())
}

fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, question: &str, word: &str) -> Result<bool> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == word)
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = std::fs::File::create(&tmp)
        .with_context(|| format!("Failed to create {}", tmp.display()))?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(&tmp, target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}

fn month_or_current(month: Option<String>) -> String {
    month.unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string())
}

fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s.trim().trim_start_matches('$').replace(',', "").as_str())
        .with_context(|| format!("Invalid amount: {s}"))
}

fn parse_method(s: &str) -> Result<PaymentMethod> {
    PaymentMethod::parse(s).ok_or_else(|| {
        let known: Vec<&str> = PaymentMethod::all().iter().map(|m| m.as_str()).collect();
        anyhow::anyhow!("Unknown payment method '{s}', expected one of: {}", known.join(", "))
    })
}
