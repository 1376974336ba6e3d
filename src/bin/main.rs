use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use statement_import::{
    ColumnLabel, ExtractOptions, MediaType, SelectedFile, StatementTable, UploadSession,
    DEFAULT_PREVIEW_ROWS,
};

/// A cli interface to the bank statement import
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the first rows of a statement
    Preview {
        #[clap(flatten)]
        file: FileArgs,
    },
    /// Label the statement columns and print the resulting transactions
    Import {
        #[clap(flatten)]
        file: FileArgs,
        /// The column holding the booking date
        #[clap(long)]
        date: usize,
        /// The column holding the description
        #[clap(long)]
        description: usize,
        /// The column holding the signed amount
        #[clap(long)]
        amount: usize,
        /// Skip the first row of the statement
        #[clap(long)]
        header: bool,
        /// A chrono date format, may be repeated [default: %d/%m/%Y, %Y-%m-%d, %d-%m-%Y]
        #[clap(long = "date-format")]
        date_formats: Vec<String>,
    },
    /// Print a statement in the expected shape
    Sample,
}

#[derive(Debug, clap::Args)]
struct FileArgs {
    /// The path to the statement CSV file
    filename: PathBuf,
    /// The number of rows to preview (1 to 10)
    #[clap(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    rows: usize,
    /// Declare the media type instead of guessing it from the file extension
    #[clap(long)]
    media_type: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(std::io::stdout());

    match args.command {
        Command::Preview { file } => {
            let mut session = open(&file)?;
            for row in session.preview()? {
                writer.write_record(row)?;
            }
        }
        Command::Import { file, date, description, amount, header, date_formats } => {
            let mut session = open(&file)?;
            session.preview()?;
            for (column, label) in [
                (date, ColumnLabel::Date),
                (description, ColumnLabel::Description),
                (amount, ColumnLabel::Amount),
            ] {
                session
                    .assign_label(column, label)
                    .with_context(|| format!("cannot label column {column} as {label}"))?;
            }

            let mut options = ExtractOptions { skip_header: header, ..ExtractOptions::default() };
            if !date_formats.is_empty() {
                options.date_formats = date_formats;
            }
            let report = session.upload(&options)?;

            for rejected in &report.rejected {
                eprintln!("skipped table row {}: {}", rejected.row, rejected.reason);
            }
            // serialized records get a `date,amount,description` header
            for transaction in &report.transactions {
                writer.serialize(transaction)?;
            }
        }
        Command::Sample => {
            for row in StatementTable::sample().rows() {
                writer.write_record(row)?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

fn open(args: &FileArgs) -> anyhow::Result<UploadSession> {
    let mut file = SelectedFile::from_path(&args.filename)
        .with_context(|| format!("cannot open {}", args.filename.display()))?;
    if let Some(media_type) = &args.media_type {
        file = file.with_media_type(MediaType::new(media_type.as_str()));
    }

    let mut session = UploadSession::new().with_preview_rows(args.rows);
    session.select_file(file)?;

    Ok(session)
}
