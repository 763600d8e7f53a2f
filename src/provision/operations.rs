// Atomic filesystem operations for provisioning
// Copying slot images, zipping a populated folder, removing loose copies

use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use super::pure::{SLOT_SUFFIXES, slot_file_name};
use super::types::{ImageRef, ProvisionFailure};

/// Copy every resolved slot image into the identifier folder, in fixed
/// suffix order. Copies are independent: one failure is recorded and the
/// remaining slots still run. Absent slots are skipped.
pub fn copy_slot_images(
    asin: &str,
    image_set: &HashMap<u8, ImageRef>,
    asin_dir: &Path,
) -> (Vec<PathBuf>, Vec<ProvisionFailure>) {
    let mut written = Vec::new();
    let mut failures = Vec::new();

    for slot in 1..=SLOT_SUFFIXES.len() as u8 {
        let Some(image) = image_set.get(&slot) else {
            continue;
        };
        let dest = asin_dir.join(slot_file_name(asin, slot, &image.extension));
        match fs::copy(&image.path, &dest) {
            Ok(_) => written.push(dest),
            Err(e) => failures.push(ProvisionFailure::Copy {
                asin: asin.to_string(),
                image: image
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                source: e,
            }),
        }
    }

    (written, failures)
}

/// Compress the identifier folder into `{asin}.zip` placed inside that
/// same folder. Whatever the folder holds at archive time goes in,
/// pre-existing files included; the only exclusion is the archive file
/// being written.
pub fn archive_asin_folder(asin_dir: &Path, asin: &str) -> Result<PathBuf, ZipError> {
    let archive_path = asin_dir.join(format!("{asin}.zip"));
    let mut writer = zip::ZipWriter::new(File::create(&archive_path)?);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in walkdir::WalkDir::new(asin_dir).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.path() == archive_path {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(asin_dir)
            .map_err(io::Error::other)?;

        if entry.file_type().is_dir() {
            writer.add_directory(rel_path.to_string_lossy().to_string(), options)?;
        } else {
            writer.start_file(rel_path.to_string_lossy().to_string(), options)?;
            io::copy(&mut File::open(entry.path())?, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(archive_path)
}

/// Remove the loose renamed copies once the archive holds them.
/// Best-effort: a leftover copy after a successful archive is not worth
/// reporting, so failures are logged and discarded.
pub fn remove_loose_copies(written: &[PathBuf]) {
    for path in written {
        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[asinpack] Warning: could not remove loose copy {}: {}",
                path.display(),
                e
            );
        }
    }
}
