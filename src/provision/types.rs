use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// One validated source image: where it lives and the extension it was
/// supplied with (kept verbatim, case included).
#[derive(Clone, Debug)]
pub struct ImageRef {
    pub path: PathBuf,
    pub extension: String,
}

/// Why a candidate image set was rejected. Validation is all-or-nothing:
/// the first violated rule wins and no partial set is produced.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("only up to 9 images can be selected (got {0})")]
    TooManyImages(usize),
    #[error("invalid extension for '{0}': only jpg/jpeg/png/bmp/gif are allowed")]
    UnsupportedExtension(String),
    #[error("duplicate image name '{0}': base names 1..9 cannot repeat")]
    DuplicateName(String),
    #[error("invalid image name '{0}': base names must be 1..9")]
    InvalidName(String),
}

/// A recorded per-identifier problem. These accumulate in the run outcome
/// and never abort the run.
#[derive(Debug, Error)]
pub enum ProvisionFailure {
    #[error("ASIN {asin}: could not create folder ({source})")]
    Folder { asin: String, source: io::Error },
    #[error("ASIN {asin}, image {image}: copy failed ({source})")]
    Copy {
        asin: String,
        image: String,
        source: io::Error,
    },
    #[error("ASIN {asin}: compression failed ({source})")]
    Archive { asin: String, source: ZipError },
}

/// The client root folder could not be created; no identifier was
/// processed.
#[derive(Debug, Error)]
#[error("could not create client folder '{}' ({source})", .path.display())]
pub struct ClientRootError {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Terminal result of one provisioning run.
#[derive(Debug)]
pub struct RunOutcome {
    /// How many identifiers the run worked through, in input order.
    pub processed: usize,
    /// Ordered failure records across all identifiers.
    pub failures: Vec<ProvisionFailure>,
}

impl RunOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages in input order, ready for user display.
    pub fn failure_lines(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}
