//! `shiplabel`: render one shipping label per order of a store export, then
//! optionally merge all labels into a single PDF.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use shiplabel_io_label::{
    ProcessExportError, SpecExportOptions, SpecReadinessPolicy, await_label_files, process_export,
};
use shiplabel_io_orders::LoadOrdersError;
use shiplabel_io_pdf::{C_COMBINED_FILE_NAME, C_SOFFICE_BIN_DEFAULT, SofficeBackend, combine_labels};

/// Run folder name format, e.g. `17_10_2026_14_05`.
const C_RUN_FOLDER_FORMAT: &str = "%d_%m_%Y_%H_%M";
const C_BANNER: &str = "Shipping Label Generator";

////////////////////////////////////////////////////////////////////////////////
// #region Args

#[derive(Parser, Debug)]
#[command(name = "shiplabel", version, about = "Generate shipping labels from an order export")]
struct Cli {
    /// Order export CSV.
    #[arg(long = "orders_file", value_name = "PATH")]
    orders_file: PathBuf,

    /// Folder receiving the labels.
    #[arg(long = "output_folder", value_name = "PATH")]
    output_folder: PathBuf,

    /// Merge all labels into one PDF.
    #[arg(long = "save_single_pdf", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    save_single_pdf: bool,

    /// Write into a `<day>_<month>_<year>_<hour>_<minute>` subfolder of the output folder.
    #[arg(long = "timestamp_subfolder", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    timestamp_subfolder: bool,

    /// LibreOffice executable used for PDF conversion.
    #[arg(long = "soffice_bin", value_name = "PATH", default_value = C_SOFFICE_BIN_DEFAULT)]
    soffice_bin: String,

    /// Seconds to wait for label files before merging.
    #[arg(long = "ready_timeout_secs", value_name = "N", default_value_t = 5)]
    ready_timeout_secs: u64,

    /// Log filter when `RUST_LOG` is unset.
    #[arg(long = "log_level", value_name = "FILTER", default_value = "info")]
    log_level: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Run

fn main() -> ExitCode {
    let cli = Cli::parse();
    shiplabel_log::init_logging(&cli.log_level);

    println!("{C_BANNER}");
    println!("{}", "=".repeat(30));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.orders_file.is_file() {
        println!(
            "Please make sure '{}' exists.",
            cli.orders_file.display()
        );
        anyhow::bail!("orders file not found: {}", cli.orders_file.display());
    }

    let dir_output = derive_run_folder(&cli.output_folder, cli.timestamp_subfolder)?;
    let path_file_pdf = dir_output.join(C_COMBINED_FILE_NAME);

    let report = match process_export(&cli.orders_file, &dir_output, &SpecExportOptions::default()) {
        Ok(report) => report,
        Err(ProcessExportError::Load(LoadOrdersError::MissingColumns { missing, present })) => {
            println!("Error: Missing columns: {missing:?}");
            println!("Available columns: {present:?}");
            anyhow::bail!("order export is missing {} required column(s)", missing.len());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to process {}", cli.orders_file.display())
            });
        }
    };

    if report.error_count() == 0 {
        println!(
            "\nAll shipping labels created successfully in '{}' directory!",
            dir_output.display()
        );
    } else {
        println!(
            "\nCreated {} of {} labels in '{}'; failed orders:",
            report.created_count(),
            report.cnt_orders,
            dir_output.display()
        );
        for err in &report.errors {
            println!("  {}: {}", err.order_id, err.exception);
        }
    }
    println!("{report}");

    let l_label_paths: Vec<PathBuf> = report.created.iter().map(|c_name| dir_output.join(c_name)).collect();
    let policy = SpecReadinessPolicy {
        timeout: Duration::from_secs(cli.ready_timeout_secs),
        ..Default::default()
    };
    if let Err(err) = await_label_files(&l_label_paths, &policy) {
        tracing::warn!("{err}");
    }

    println!("Output folder: {}", dir_output.display());
    println!("Output pdf file: {}", path_file_pdf.display());

    if cli.save_single_pdf {
        let backend = SofficeBackend::new(cli.soffice_bin.clone());
        // Errors are already logged; the labels stay usable without the merged PDF.
        if let Ok(report_combine) = combine_labels(&dir_output, &path_file_pdf, &backend) {
            println!("{report_combine}");
        }
    }

    tracing::info!("Process finished.");
    Ok(())
}

/// Absolute run folder: `output_folder`, or its timestamped subfolder.
fn derive_run_folder(output_folder: &Path, if_timestamp: bool) -> Result<PathBuf> {
    let dir_base = std::path::absolute(output_folder)
        .with_context(|| format!("failed to resolve {}", output_folder.display()))?;
    if !if_timestamp {
        return Ok(dir_base);
    }
    let c_stamp = chrono::Local::now().format(C_RUN_FOLDER_FORMAT).to_string();
    Ok(dir_base.join(c_stamp))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
