use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use oxlsx::{Workbook, WorkbookWriter};

#[derive(Parser)]
#[command(
    name = "oxlsx",
    version,
    about = "SpreadsheetML (.xlsx) toolkit",
    long_about = "A command-line tool for inspecting, dumping, and creating Excel (.xlsx) packages."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show workbook sheet names, dimensions, and defined names.
    Inspect {
        /// Path to the .xlsx file.
        path: PathBuf,
    },
    /// Print resolved cell values for a sheet or a range.
    Dump {
        /// Path to the .xlsx file.
        path: PathBuf,
        /// Sheet name to dump.
        #[arg(long)]
        sheet: String,
        /// Restrict output to a range, e.g. A1:C10.
        #[arg(long)]
        range: Option<String>,
    },
    /// Create a new workbook with one empty sheet and save it.
    New {
        /// Output path for the .xlsx file.
        path: PathBuf,
        /// Name of the sheet to create.
        #[arg(long)]
        sheet: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> oxlsx::Result<()> {
    match cli.command {
        Commands::Inspect { path } => cmd_inspect(&path),
        Commands::Dump { path, sheet, range } => cmd_dump(&path, &sheet, range.as_deref()),
        Commands::New { path, sheet } => cmd_new(&path, &sheet),
    }
}

fn cmd_inspect(path: &PathBuf) -> oxlsx::Result<()> {
    let wb = Workbook::open(path)?;
    let info = wb.info();

    println!("File: {}", path.display());
    println!("Sheets: {}", info.sheets.len());
    for entry in &info.sheets {
        println!("  {} (id {}, {:?})", entry.name, entry.sheet_id, entry.state);
    }

    for sheet in wb.sheets() {
        let rows = sheet.rows();
        let max_row = rows.iter().map(|(r, _)| *r).max().unwrap_or(0);
        let max_col = rows.iter().flat_map(|(_, cells)| cells.iter().map(|(c, _)| c.col)).max().unwrap_or(0);
        println!("  {}: {} populated rows, {} columns wide", sheet.name, max_row, max_col);
    }

    if !info.defined_names.is_empty() {
        println!("Defined names:");
        for dn in &info.defined_names {
            println!("  {} = {}", dn.name, dn.refers_to);
        }
    }

    Ok(())
}

fn cmd_dump(path: &PathBuf, sheet_name: &str, range: Option<&str>) -> oxlsx::Result<()> {
    let wb = Workbook::open(path)?;
    let sheet = wb.sheet(sheet_name).ok_or_else(|| oxlsx::Error::InvalidFormat(format!("no sheet named '{sheet_name}'")))?;

    if let Some(range) = range {
        for value in sheet.range(range) {
            println!("{value}");
        }
        return Ok(());
    }

    for (_, cells) in sheet.rows() {
        let line = cells.iter().map(|(_, v)| v.to_string()).collect::<Vec<_>>().join("\t");
        println!("{line}");
    }

    Ok(())
}

fn cmd_new(path: &PathBuf, sheet_name: &str) -> oxlsx::Result<()> {
    let mut writer = WorkbookWriter::new();
    writer.add_sheet(sheet_name);
    writer.save(path)
}
