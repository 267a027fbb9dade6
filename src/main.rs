use clap::{Parser, ValueEnum};
use log::info;
use mortgage::export::write_csv;
use mortgage::{Amortization, LoanResult, LoanTerms};
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

/// Fixed-rate mortgage payment and amortization schedule
#[derive(Parser, Debug)]
#[command(name = "mortgage", version)]
struct Cli {
    /// Loan amount
    #[arg(long, default_value_t = 200000.0)]
    principal: f64,

    /// Annual interest rate in percent (5.0 means 5%)
    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    years: u32,

    /// Write the schedule as CSV to this file, or `-` to print only the CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Skip printing the payment-by-payment schedule
    #[arg(long)]
    no_table: bool,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn csv_to_stdout(&self) -> bool {
        matches!(self.csv.as_deref(), Some(path) if path.as_os_str() == "-")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level.into()).init() {
        eprintln!("logger: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> LoanResult<()> {
    let loan = Amortization::new(LoanTerms::new(cli.principal, cli.rate, cli.years)?)?;

    // stdout carries nothing but the CSV in that case
    if cli.csv_to_stdout() {
        return write_csv(loan.schedule(), io::stdout().lock());
    }

    let summary = loan.summary();
    println!("Monthly payment: ${:.2}", summary.monthly_payment);
    println!("Total cost after all payments: ${:.2}", summary.total_paid);
    println!("Total interest paid: ${:.2}", summary.total_interest);

    if !cli.no_table {
        println!();
        loan.show_amortization();
    }

    if let Some(path) = cli.csv.as_deref() {
        write_csv(loan.schedule(), File::create(path)?)?;
        info!("wrote {} payments to {}", loan.pmt_count(), path.display());
    }
    Ok(())
}
