use std::collections::BTreeMap;
use std::path::PathBuf;

use pyo3::exceptions::{PyFileNotFoundError, PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use shiplabel_io_label::{
    ProcessExportError, ReportLabels, SpecExportOptions, SpecOrderError, process_export,
};
use shiplabel_io_orders::LoadOrdersError;
use shiplabel_io_pdf::{
    C_SOFFICE_BIN_DEFAULT, CombineLabelsError, ReportCombine, SofficeBackend, combine_labels,
};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "shiplabel.labels.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "SpecOrderError")]
#[derive(Debug, Clone)]
struct PySpecOrderError {
    #[pyo3(get)]
    order_id: String,
    #[pyo3(get)]
    exception: String,
}

impl From<SpecOrderError> for PySpecOrderError {
    fn from(spec_error: SpecOrderError) -> Self {
        Self {
            order_id: spec_error.order_id,
            exception: spec_error.exception,
        }
    }
}

#[pyclass(name = "ReportLabels")]
#[derive(Debug, Clone)]
struct PyReportLabels {
    #[pyo3(get)]
    cnt_orders: u64,
    #[pyo3(get)]
    created: Vec<String>,
    #[pyo3(get)]
    warnings: Vec<String>,
    #[pyo3(get)]
    errors: Vec<PySpecOrderError>,
    summary: String,
    dict_counts: BTreeMap<String, u64>,
}

impl From<ReportLabels> for PyReportLabels {
    fn from(report_labels: ReportLabels) -> Self {
        let summary = report_labels.to_string();
        let dict_counts = report_labels.to_dict();
        Self {
            cnt_orders: report_labels.cnt_orders,
            created: report_labels.created,
            warnings: report_labels.warnings,
            errors: report_labels
                .errors
                .into_iter()
                .map(PySpecOrderError::from)
                .collect(),
            summary,
            dict_counts,
        }
    }
}

#[pymethods]
impl PyReportLabels {
    #[getter]
    fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.dict_counts.clone()
    }

    fn __str__(&self) -> String {
        self.summary.clone()
    }
}

#[pyclass(name = "ReportCombine")]
#[derive(Debug, Clone)]
struct PyReportCombine {
    #[pyo3(get)]
    converted: u64,
    #[pyo3(get)]
    pages: u64,
    #[pyo3(get)]
    path_out: Option<String>,
    #[pyo3(get)]
    warnings: Vec<String>,
    summary: String,
}

impl From<ReportCombine> for PyReportCombine {
    fn from(report_combine: ReportCombine) -> Self {
        Self {
            summary: report_combine.to_string(),
            converted: report_combine.converted,
            pages: report_combine.pages,
            path_out: report_combine
                .path_out
                .map(|path| path.to_string_lossy().to_string()),
            warnings: report_combine.warnings,
        }
    }
}

#[pymethods]
impl PyReportCombine {
    #[getter]
    fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    fn __str__(&self) -> String {
        self.summary.clone()
    }
}

fn map_process_export_error(exception: ProcessExportError) -> PyErr {
    match exception {
        ProcessExportError::Load(LoadOrdersError::InputNotFound { path }) => {
            PyFileNotFoundError::new_err(format!("Orders file not found: {}", path.display()))
        }
        ProcessExportError::Load(err @ LoadOrdersError::MissingColumns { .. }) => {
            PyValueError::new_err(err.to_string())
        }
        ProcessExportError::Load(err @ LoadOrdersError::ParseFailed { .. }) => {
            PyValueError::new_err(err.to_string())
        }
        err @ ProcessExportError::OutputInitFailed { .. } => PyOSError::new_err(err.to_string()),
    }
}

fn map_combine_labels_error(exception: CombineLabelsError) -> PyErr {
    match exception {
        err @ (CombineLabelsError::WorkspaceInitFailed { .. }
        | CombineLabelsError::ListFailed { .. }) => PyOSError::new_err(err.to_string()),
        err @ (CombineLabelsError::Convert(_) | CombineLabelsError::Merge(_)) => {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

#[pyfunction(name = "init_logging")]
#[pyo3(signature = (level = "info"))]
fn init_logging_py(level: &str) -> bool {
    shiplabel_log::init_logging(level)
}

#[pyfunction(name = "process_export")]
#[pyo3(signature = (orders_file, output_folder))]
fn process_export_py(
    py: Python<'_>,
    orders_file: String,
    output_folder: String,
) -> PyResult<PyReportLabels> {
    let options = SpecExportOptions::default();
    let report_labels = py.allow_threads(|| process_export(orders_file, output_folder, &options));
    let report_labels = report_labels.map_err(map_process_export_error)?;
    Ok(PyReportLabels::from(report_labels))
}

#[pyfunction(name = "combine_labels")]
#[pyo3(signature = (label_folder, file_out, soffice_bin = C_SOFFICE_BIN_DEFAULT))]
fn combine_labels_py(
    py: Python<'_>,
    label_folder: String,
    file_out: String,
    soffice_bin: &str,
) -> PyResult<PyReportCombine> {
    let backend = SofficeBackend::new(soffice_bin);
    let dir_labels = PathBuf::from(label_folder);
    let path_out = PathBuf::from(file_out);
    let report_combine = py.allow_threads(|| combine_labels(&dir_labels, &path_out, &backend));
    let report_combine = report_combine.map_err(map_combine_labels_error)?;
    Ok(PyReportCombine::from(report_combine))
}

#[pymodule]
fn _shiplabel_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PySpecOrderError>()?;
    module.add_class::<PyReportLabels>()?;
    module.add_class::<PyReportCombine>()?;
    module.add_function(wrap_pyfunction!(init_logging_py, module)?)?;
    module.add_function(wrap_pyfunction!(process_export_py, module)?)?;
    module.add_function(wrap_pyfunction!(combine_labels_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
