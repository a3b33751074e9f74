//! Folder-level combine: convert every label to PDF and merge the result.

use std::fs;
use std::path::{Path, PathBuf};

use crate::conf::C_WORKSPACE_DIR_NAME;
use crate::convert::{ConversionBackend, ConversionSession};
use crate::merge::merge_pdf_files;
use crate::spec::{CombineLabelsError, ReportCombine};
use crate::util::list_label_files;

/// Convert all labels in `dir_labels` with `backend` and merge them into `path_out`.
///
/// This function performs:
/// 1. A fresh `temp_pdfs_for_conversion` folder inside `dir_labels`.
/// 2. Label discovery; with no labels it warns and returns without output.
/// 3. One backend session for the whole run, converting in file-name order.
/// 4. A merge of the produced PDFs in the same order; a PDF the backend
///    reported but that is absent is skipped with a warning.
///
/// The temporary folder and the backend session are released on every exit
/// path. Label documents and any existing output are never deleted.
pub fn combine_labels<B>(
    dir_labels: &Path,
    path_out: &Path,
    backend: &B,
) -> Result<ReportCombine, CombineLabelsError>
where
    B: ConversionBackend,
{
    let res = run_combine(dir_labels, path_out, backend);
    match &res {
        Ok(report) => tracing::info!("{report}"),
        Err(err) => tracing::error!("Error converting or merging PDFs: {err}"),
    }
    res
}

fn run_combine<B>(
    dir_labels: &Path,
    path_out: &Path,
    backend: &B,
) -> Result<ReportCombine, CombineLabelsError>
where
    B: ConversionBackend,
{
    let guard_workspace = WorkspaceGuard::create(dir_labels.join(C_WORKSPACE_DIR_NAME))?;

    let l_labels = list_label_files(dir_labels).map_err(|source| CombineLabelsError::ListFailed {
        path: dir_labels.to_path_buf(),
        source,
    })?;
    let mut report = ReportCombine::default();
    if l_labels.is_empty() {
        let c_msg = format!("No label documents found in {}", dir_labels.display());
        tracing::warn!("{c_msg}");
        report.warnings.push(c_msg);
        return Ok(report);
    }

    let mut session = backend.acquire()?;
    let mut l_pdfs: Vec<PathBuf> = Vec::with_capacity(l_labels.len());
    for path_label in &l_labels {
        let path_pdf = session.convert_to_pdf(path_label, guard_workspace.path())?;
        tracing::debug!(
            "Converted {} -> {}",
            path_label.display(),
            path_pdf.display()
        );
        report.converted += 1;
        l_pdfs.push(path_pdf);
    }
    drop(session);

    let mut l_pdfs_present: Vec<PathBuf> = Vec::with_capacity(l_pdfs.len());
    for path_pdf in l_pdfs {
        if path_pdf.is_file() {
            l_pdfs_present.push(path_pdf);
        } else {
            let c_msg = format!("PDF file not found for merging: {}", path_pdf.display());
            tracing::warn!("{c_msg}");
            report.warnings.push(c_msg);
        }
    }

    let n_pages = merge_pdf_files(&l_pdfs_present, path_out)?;
    report.pages = n_pages as u64;
    report.path_out = Some(path_out.to_path_buf());
    Ok(report)
}

/// Temporary conversion folder, removed when dropped.
struct WorkspaceGuard {
    path: PathBuf,
}

impl WorkspaceGuard {
    /// Create `path` empty, clearing what a previous interrupted run left.
    fn create(path: PathBuf) -> Result<Self, CombineLabelsError> {
        let derive_err = |source: std::io::Error| CombineLabelsError::WorkspaceInitFailed {
            path: path.clone(),
            source,
        };
        if path.exists() {
            fs::remove_dir_all(&path).map_err(derive_err)?;
        }
        fs::create_dir_all(&path).map_err(derive_err)?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            tracing::warn!(
                "Failed to remove temporary folder {}: {err}",
                self.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use super::combine_labels;
    use crate::conf::C_WORKSPACE_DIR_NAME;
    use crate::convert::{ConversionBackend, ConversionSession};
    use crate::fixture::{read_page_markers, write_fixture_pdf};
    use crate::spec::{CombineLabelsError, ConvertError};

    /// Writes a one-page PDF per call, marked with the call number.
    #[derive(Default)]
    struct FakeBackend {
        cnt_acquired: Cell<usize>,
        seen: Rc<RefCell<Vec<String>>>,
        released: Rc<Cell<bool>>,
        fail_on: Option<usize>,
        skip_output_on: Option<usize>,
        if_unavailable: bool,
    }

    struct FakeSession {
        n_calls: usize,
        seen: Rc<RefCell<Vec<String>>>,
        released: Rc<Cell<bool>>,
        fail_on: Option<usize>,
        skip_output_on: Option<usize>,
    }

    impl ConversionBackend for FakeBackend {
        type Session = FakeSession;

        fn acquire(&self) -> Result<FakeSession, ConvertError> {
            self.cnt_acquired.set(self.cnt_acquired.get() + 1);
            if self.if_unavailable {
                return Err(ConvertError::Unavailable {
                    bin: "fake".to_string(),
                    message: "not installed".to_string(),
                });
            }
            Ok(FakeSession {
                n_calls: 0,
                seen: Rc::clone(&self.seen),
                released: Rc::clone(&self.released),
                fail_on: self.fail_on,
                skip_output_on: self.skip_output_on,
            })
        }
    }

    impl ConversionSession for FakeSession {
        fn convert_to_pdf(&mut self, path_doc: &Path, dir_out: &Path) -> Result<PathBuf, ConvertError> {
            self.n_calls += 1;
            assert!(dir_out.ends_with(C_WORKSPACE_DIR_NAME));
            let file_name = path_doc
                .file_name()
                .map(|v| v.to_string_lossy().to_string())
                .unwrap_or_default();
            self.seen.borrow_mut().push(file_name);

            if self.fail_on == Some(self.n_calls) {
                return Err(ConvertError::Failed {
                    path: path_doc.to_path_buf(),
                    message: "boom".to_string(),
                });
            }
            let path_pdf = dir_out.join(format!("{}.pdf", self.n_calls));
            if self.skip_output_on != Some(self.n_calls) {
                write_fixture_pdf(&path_pdf, &[self.n_calls as i64]);
            }
            Ok(path_pdf)
        }
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    fn write_labels(dir: &Path, l_names: &[&str]) {
        for c_name in l_names {
            std::fs::write(dir.join(c_name), b"docx").expect("write label");
        }
    }

    #[test]
    fn combine_converts_in_name_order_and_cleans_up() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_labels(
            tmp.path(),
            &["shipping_label_C.docx", "shipping_label_A.docx", "shipping_label_B.docx"],
        );
        let path_out = tmp.path().join("combined_orders.pdf");
        let backend = FakeBackend::default();

        let report = combine_labels(tmp.path(), &path_out, &backend).expect("combine");

        assert_eq!(backend.cnt_acquired.get(), 1);
        assert!(backend.released.get());
        assert_eq!(
            *backend.seen.borrow(),
            vec![
                "shipping_label_A.docx".to_string(),
                "shipping_label_B.docx".to_string(),
                "shipping_label_C.docx".to_string(),
            ]
        );
        assert_eq!(report.converted, 3);
        assert_eq!(report.pages, 3);
        assert_eq!(report.path_out.as_deref(), Some(path_out.as_path()));
        assert_eq!(read_page_markers(&path_out), vec![1, 2, 3]);
        assert!(!tmp.path().join(C_WORKSPACE_DIR_NAME).exists());
        assert!(tmp.path().join("shipping_label_A.docx").is_file());
    }

    #[test]
    fn combine_without_labels_is_a_no_op() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_out = tmp.path().join("combined_orders.pdf");
        let backend = FakeBackend::default();

        let report = combine_labels(tmp.path(), &path_out, &backend).expect("combine");

        assert_eq!(backend.cnt_acquired.get(), 0);
        assert_eq!(report.path_out, None);
        assert_eq!(report.warning_count(), 1);
        assert!(!path_out.exists());
        assert!(!tmp.path().join(C_WORKSPACE_DIR_NAME).exists());
    }

    #[test]
    fn combine_unavailable_backend_keeps_labels_and_cleans_up() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_labels(tmp.path(), &["shipping_label_A.docx"]);
        let backend = FakeBackend {
            if_unavailable: true,
            ..Default::default()
        };

        let res = combine_labels(tmp.path(), &tmp.path().join("combined_orders.pdf"), &backend);

        assert!(matches!(
            res,
            Err(CombineLabelsError::Convert(ConvertError::Unavailable { .. }))
        ));
        assert!(tmp.path().join("shipping_label_A.docx").is_file());
        assert!(!tmp.path().join(C_WORKSPACE_DIR_NAME).exists());
    }

    #[test]
    fn combine_conversion_failure_releases_session() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_labels(tmp.path(), &["shipping_label_A.docx", "shipping_label_B.docx"]);
        let path_out = tmp.path().join("combined_orders.pdf");
        let backend = FakeBackend {
            fail_on: Some(2),
            ..Default::default()
        };

        let res = combine_labels(tmp.path(), &path_out, &backend);

        assert!(matches!(
            res,
            Err(CombineLabelsError::Convert(ConvertError::Failed { .. }))
        ));
        assert!(backend.released.get());
        assert!(!path_out.exists());
        assert!(!tmp.path().join(C_WORKSPACE_DIR_NAME).exists());
    }

    #[test]
    fn combine_skips_missing_pdf_with_warning() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_labels(
            tmp.path(),
            &["shipping_label_A.docx", "shipping_label_B.docx", "shipping_label_C.docx"],
        );
        let path_out = tmp.path().join("combined_orders.pdf");
        let backend = FakeBackend {
            skip_output_on: Some(2),
            ..Default::default()
        };

        let report = combine_labels(tmp.path(), &path_out, &backend).expect("combine");

        assert_eq!(report.converted, 3);
        assert_eq!(report.pages, 2);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(read_page_markers(&path_out), vec![1, 3]);
    }

    #[test]
    fn combine_clears_stale_workspace() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_labels(tmp.path(), &["shipping_label_A.docx"]);
        let dir_stale = tmp.path().join(C_WORKSPACE_DIR_NAME);
        std::fs::create_dir_all(&dir_stale).expect("mkdir");
        write_fixture_pdf(&dir_stale.join("0_stale.pdf"), &[99]);
        let path_out = tmp.path().join("combined_orders.pdf");

        let report = combine_labels(tmp.path(), &path_out, &FakeBackend::default()).expect("combine");

        assert_eq!(report.pages, 1);
        assert_eq!(read_page_markers(&path_out), vec![1]);
        assert!(!dir_stale.exists());
    }
}
