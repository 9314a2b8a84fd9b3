//! bolita-runner: headless CLI for the bolita ticket ledger.
//!
//! Usage:
//!   bolita-runner rates   --values 80,500,200,300,25,25,20 [--seller pedro] --db ledger.db
//!   bolita-runner win     --value 1-50-20-30 --date 2026-02-07 --shift pm --db ledger.db
//!   bolita-runner ingest  --file list.txt --seller pedro --bank caja1 \
//!                         --date 2026-02-07 --shift pm --db ledger.db
//!   bolita-runner preview --seller pedro --bank caja1 --date 2026-02-07 --shift pm --db ledger.db
//!   bolita-runner settle  --seller pedro --bank caja1 --date 2026-02-07 --shift pm --db ledger.db

use anyhow::{anyhow, bail, Context, Result};
use bolita_core::{
    intake::TicketIntake, store::LedgerStore, RateTable, SettlementEngine, SettlementResult,
    Shift, WinningNumber,
};
use chrono::NaiveDate;
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    if command == "help" || command == "--help" {
        print_usage();
        return Ok(());
    }

    let db = flag(&args, "--db").unwrap_or(":memory:");
    let mut store = LedgerStore::open(db)?;
    store.migrate()?;
    log::debug!("database ready at {db}");

    match command {
        "rates" => cmd_rates(&args, &store),
        "win" => cmd_win(&args, &store),
        "ingest" => cmd_ingest(&args, &mut store),
        "preview" => cmd_settlement(&args, &mut store, false),
        "settle" => cmd_settlement(&args, &mut store, true),
        other => bail!("unknown command '{other}' (try: bolita-runner help)"),
    }
}

fn cmd_rates(args: &[String], store: &LedgerStore) -> Result<()> {
    let values = require(args, "--values")?;
    let rates = parse_rates(values)?;

    match flag(args, "--seller") {
        Some(seller) => {
            store.set_seller_rates(seller, &rates)?;
            println!("seller rates set for {seller}");
        }
        None => {
            store.set_operator_rates(&rates)?;
            println!("operator default rates set");
        }
    }
    Ok(())
}

fn cmd_win(args: &[String], store: &LedgerStore) -> Result<()> {
    let value = require(args, "--value")?;
    let (date, shift) = parse_key_date_shift(args)?;

    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 4 {
        bail!("--value must look like H-FF-R1-R2, e.g. 1-50-20-30");
    }
    let win = WinningNumber {
        date,
        shift,
        hundred_digit: parts[0].parse().context("hundred digit")?,
        fixed: format!("{:0>2}", parts[1]),
        runner1: format!("{:0>2}", parts[2]),
        runner2: format!("{:0>2}", parts[3]),
    };
    store.insert_winning_number(&win)?;
    println!("winning number {}-{} recorded for {date} {shift}", win.hundred_digit, win.fixed);
    Ok(())
}

fn cmd_ingest(args: &[String], store: &mut LedgerStore) -> Result<()> {
    let file = require(args, "--file")?;
    let seller = require(args, "--seller")?;
    let bank = require(args, "--bank")?;
    let (date, shift) = parse_key_date_shift(args)?;

    let raw = fs::read_to_string(file).with_context(|| format!("reading {file}"))?;

    let ticket = TicketIntake::new(store).register_ticket(seller, bank, date, shift, &raw)?;

    println!("ticket {} registered", ticket.id);
    println!("  bets:    {}", ticket.bets.len());
    println!("  fixed:   {}", ticket.summary.fixed);
    println!("  hundred: {}", ticket.summary.hundred);
    println!("  parlet:  {}", ticket.summary.parlet);
    println!("  triplet: {}", ticket.summary.triplet);
    println!("  runners: {}", ticket.summary.runner1 + ticket.summary.runner2);
    println!("  total:   {}", ticket.summary.total);
    if let Some(preview) = &ticket.prizes_preview {
        println!(
            "  prizes preview: {} (winning number {})",
            preview.total_prizes, preview.winning_number
        );
    }
    Ok(())
}

fn cmd_settlement(args: &[String], store: &mut LedgerStore, persist: bool) -> Result<()> {
    let seller = require(args, "--seller")?.to_string();
    let bank = require(args, "--bank")?.to_string();
    let (date, shift) = parse_key_date_shift(args)?;

    let mut engine = SettlementEngine::new(store);
    let result = if persist {
        engine.process(&seller, &bank, date, shift)?
    } else {
        engine.preview(&seller, &bank, date, shift)?
    };

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_settlement(&result, persist);
    }
    Ok(())
}

fn print_settlement(result: &SettlementResult, persisted: bool) {
    let label = if persisted { "settlement" } else { "preview" };
    println!(
        "{label} for {} / {} on {} {}",
        result.seller_id, result.bank_id, result.date, result.shift
    );
    println!("  total sales:  {}", result.total_sales);
    println!(
        "  commission:   {:.2} ({}%)",
        result.commission_amount, result.applied_rates.commission_percent
    );
    println!("  net sales:    {:.2}", result.net_sales);
    println!("  total prizes: {}", result.total_prizes);
    let b = &result.prizes_breakdown;
    println!(
        "    fixed {} / hundred {} / parlet {} / triplet {} / runners {}",
        b.fixed, b.hundred, b.parlet, b.triplet, b.runners
    );
    println!("  final balance: {:.2}", result.final_balance);
}

// ── Argument helpers ───────────────────────────────────────────────

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn require<'a>(args: &'a [String], name: &str) -> Result<&'a str> {
    flag(args, name).ok_or_else(|| anyhow!("missing required flag {name}"))
}

fn parse_key_date_shift(args: &[String]) -> Result<(NaiveDate, Shift)> {
    let date: NaiveDate = require(args, "--date")?
        .parse()
        .context("--date must be YYYY-MM-DD")?;
    let shift: Shift = require(args, "--shift")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    Ok((date, shift))
}

fn parse_rates(values: &str) -> Result<RateTable> {
    let parts: Vec<&str> = values.split(',').map(str::trim).collect();
    if parts.len() != 7 {
        bail!("--values needs 7 numbers: fixed,hundred,parlet,triplet,runner1,runner2,commission");
    }
    Ok(RateTable {
        fixed: parts[0].parse()?,
        hundred: parts[1].parse()?,
        parlet: parts[2].parse()?,
        triplet: parts[3].parse()?,
        runner1: parts[4].parse()?,
        runner2: parts[5].parse()?,
        commission_percent: parts[6].parse()?,
    })
}

fn print_usage() {
    println!("bolita-runner: ticket ledger CLI");
    println!();
    println!("commands:");
    println!("  rates   --values F,H,P,T,R1,R2,C [--seller ID]      set rate table");
    println!("  win     --value H-FF-R1-R2 --date D --shift am|pm   record winning number");
    println!("  ingest  --file F --seller ID --bank ID --date D --shift am|pm");
    println!("  preview --seller ID --bank ID --date D --shift am|pm");
    println!("  settle  --seller ID --bank ID --date D --shift am|pm");
    println!();
    println!("common: --db PATH (default :memory:)");
}
