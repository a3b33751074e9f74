//! Document-to-PDF conversion backends.
//!
//! A backend is acquired once per combine run; the returned session converts
//! documents one at a time and releases its office resources when dropped.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::conf::{C_SOFFICE_BIN_DEFAULT, C_SOFFICE_PDF_FILTER};
use crate::spec::ConvertError;
use crate::util::derive_pdf_path;

////////////////////////////////////////////////////////////////////////////////
// #region BackendTraits

/// Source of conversion sessions.
pub trait ConversionBackend {
    /// Session type holding the live office resources.
    type Session: ConversionSession;

    /// Start the office backend. Fails with [`ConvertError::Unavailable`]
    /// when it cannot be started.
    fn acquire(&self) -> Result<Self::Session, ConvertError>;
}

/// One live conversion context. Dropping it releases the backend.
pub trait ConversionSession {
    /// Convert `path_doc` to PDF inside `dir_out` and return the PDF path.
    fn convert_to_pdf(&mut self, path_doc: &Path, dir_out: &Path) -> Result<PathBuf, ConvertError>;
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Soffice

/// LibreOffice headless backend.
#[derive(Debug, Clone)]
pub struct SofficeBackend {
    /// `soffice` executable name or path.
    pub bin: String,
}

impl Default for SofficeBackend {
    fn default() -> Self {
        Self {
            bin: C_SOFFICE_BIN_DEFAULT.to_string(),
        }
    }
}

impl SofficeBackend {
    /// Backend running `bin`.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl ConversionBackend for SofficeBackend {
    type Session = SofficeSession;

    fn acquire(&self) -> Result<Self::Session, ConvertError> {
        let derive_unavailable = |message: String| ConvertError::Unavailable {
            bin: self.bin.clone(),
            message,
        };

        let output = Command::new(&self.bin)
            .arg("--version")
            .output()
            .map_err(|err| derive_unavailable(err.to_string()))?;
        if !output.status.success() {
            return Err(derive_unavailable(format!(
                "`--version` exited with {}",
                output.status
            )));
        }
        tracing::debug!(
            "Using {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );

        let dir_profile = tempfile::Builder::new()
            .prefix("shiplabel_soffice_")
            .tempdir()
            .map_err(|err| derive_unavailable(format!("profile folder: {err}")))?;

        Ok(SofficeSession {
            bin: self.bin.clone(),
            dir_profile,
        })
    }
}

/// Conversion session bound to a private LibreOffice user profile.
///
/// The profile keeps this run off any desktop instance the user may have open.
/// It is deleted when the session is dropped.
#[derive(Debug)]
pub struct SofficeSession {
    bin: String,
    dir_profile: TempDir,
}

impl SofficeSession {
    fn derive_profile_arg(&self) -> String {
        let c_path = self.dir_profile.path().to_string_lossy().replace('\\', "/");
        let c_sep = if c_path.starts_with('/') { "" } else { "/" };
        format!("-env:UserInstallation=file://{c_sep}{c_path}")
    }
}

impl ConversionSession for SofficeSession {
    fn convert_to_pdf(&mut self, path_doc: &Path, dir_out: &Path) -> Result<PathBuf, ConvertError> {
        let output = Command::new(&self.bin)
            .arg(self.derive_profile_arg())
            .args(["--headless", "--norestore", "--convert-to", C_SOFFICE_PDF_FILTER, "--outdir"])
            .arg(dir_out)
            .arg(path_doc)
            .output()
            .map_err(|err| ConvertError::Failed {
                path: path_doc.to_path_buf(),
                message: err.to_string(),
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                path: path_doc.to_path_buf(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let path_pdf = derive_pdf_path(path_doc, dir_out);
        if !path_pdf.is_file() {
            return Err(ConvertError::OutputMissing {
                path: path_doc.to_path_buf(),
                path_expected: path_pdf,
            });
        }
        Ok(path_pdf)
    }
}

impl Drop for SofficeSession {
    fn drop(&mut self) {
        tracing::debug!(
            "Releasing soffice profile {}",
            self.dir_profile.path().display()
        );
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
