//! Batch driver: export file in, one label document per order out.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use shiplabel_io_orders::load_order_groups;

use crate::render::render_label;
use crate::report::{ReportLabels, ReportLabelsBuilder};
use crate::spec::{LabelsNotReadyError, ProcessExportError, SpecExportOptions, SpecReadinessPolicy};
use crate::writer::write_label_docx;

/// Render one shipping label per order found in `file_orders`.
///
/// This function performs:
/// 1. Export loading and required-column validation.
/// 2. Output folder creation (including parents).
/// 3. Per-order render + write; a failing order is logged and recorded,
///    and the remaining orders are still processed.
///
/// Returns [`ReportLabels`] when the run completes (with possible per-order
/// errors stored in the report). Returns [`ProcessExportError`] only when the
/// export cannot be loaded or the output folder cannot be created.
pub fn process_export<P, Q>(
    file_orders: P,
    dir_output: Q,
    options: &SpecExportOptions,
) -> Result<ReportLabels, ProcessExportError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let l_groups = load_order_groups(file_orders)?;

    let path_dir_out = dir_output.as_ref();
    fs::create_dir_all(path_dir_out).map_err(|source| ProcessExportError::OutputInitFailed {
        path: path_dir_out.to_path_buf(),
        source,
    })?;

    let mut builder_report = ReportLabelsBuilder::default();
    builder_report.set_orders(l_groups.len());
    let mut set_file_names: HashSet<String> = HashSet::new();

    for group in &l_groups {
        let doc = render_label(group, &options.layout);
        match write_label_docx(&doc, path_dir_out, &options.layout) {
            Ok(path_file_label) => {
                let file_name = path_file_label
                    .file_name()
                    .map(|v| v.to_string_lossy().to_string())
                    .unwrap_or_default();
                if !set_file_names.insert(file_name.clone()) {
                    let c_msg = format!(
                        "Order {} overwrote an earlier label with the same file name: {file_name}",
                        group.order_id
                    );
                    tracing::warn!("{c_msg}");
                    builder_report.add_warning(c_msg);
                }
                tracing::info!("Created shipping label: {file_name}");
                builder_report.add_created(file_name);
            }
            Err(err) => {
                tracing::error!("Error processing order {}: {err}", group.order_id);
                builder_report.add_error(group.order_id.clone(), err.to_string());
            }
        }
    }

    let report = builder_report.build();
    tracing::info!("{report} output={}", path_dir_out.display());
    Ok(report)
}

/// Block until every path in `paths` exists as a file, or `policy.timeout` elapses.
pub fn await_label_files(
    paths: &[PathBuf],
    policy: &SpecReadinessPolicy,
) -> Result<(), LabelsNotReadyError> {
    let t_start = Instant::now();
    loop {
        let l_missing: Vec<PathBuf> = paths.iter().filter(|p| !p.is_file()).cloned().collect();
        if l_missing.is_empty() {
            return Ok(());
        }
        if t_start.elapsed() >= policy.timeout {
            return Err(LabelsNotReadyError {
                missing: l_missing,
                timeout: policy.timeout,
            });
        }
        std::thread::sleep(policy.interval);
    }
}
