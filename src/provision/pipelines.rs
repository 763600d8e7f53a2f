// Orchestration for a provisioning run
// Combines pure slot logic and filesystem operations

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::operations::{archive_asin_folder, copy_slot_images, remove_loose_copies};
use super::types::{ClientRootError, ImageRef, ProvisionFailure, RunOutcome};

/// Create one identifier's folder and populate it with renamed copies of
/// every resolved slot image.
///
/// The Err case is a folder-level failure: the folder could not be
/// created and no image was copied. Ok carries the written destination
/// paths (the archiver's cleanup list) plus any per-image copy failures.
pub fn provision_asin(
    asin: &str,
    image_set: &HashMap<u8, ImageRef>,
    destination_root: &Path,
) -> Result<(Vec<PathBuf>, Vec<ProvisionFailure>), ProvisionFailure> {
    let asin_dir = destination_root.join(asin);
    if let Err(e) = fs::create_dir_all(&asin_dir) {
        return Err(ProvisionFailure::Folder {
            asin: asin.to_string(),
            source: e,
        });
    }
    Ok(copy_slot_images(asin, image_set, &asin_dir))
}

/// Drive provisioning over the whole identifier list, in input order.
///
/// The client root is created once and aborts the run when it fails.
/// After that every identifier is isolated: a folder-level failure skips
/// that identifier (no archive attempt), copy and archive failures are
/// recorded, and the run always moves on to the next identifier.
pub fn run(
    client: &str,
    image_set: &HashMap<u8, ImageRef>,
    asins: &[String],
    destination_base: &Path,
    compress: bool,
) -> Result<RunOutcome, ClientRootError> {
    let client_root = destination_base.join(client);
    if let Err(e) = fs::create_dir_all(&client_root) {
        return Err(ClientRootError {
            path: client_root,
            source: e,
        });
    }

    println!(
        "[asinpack] Processing {} ASIN(s) for '{}'...",
        asins.len(),
        client
    );

    let mut failures = Vec::new();

    for asin in asins {
        let (written, mut asin_failures) = match provision_asin(asin, image_set, &client_root) {
            Ok(result) => result,
            Err(folder_failure) => {
                failures.push(folder_failure);
                continue;
            }
        };

        if compress {
            match archive_asin_folder(&client_root.join(asin), asin) {
                Ok(_) => remove_loose_copies(&written),
                Err(e) => asin_failures.push(ProvisionFailure::Archive {
                    asin: asin.to_string(),
                    source: e,
                }),
            }
        }

        failures.extend(asin_failures);
    }

    Ok(RunOutcome {
        processed: asins.len(),
        failures,
    })
}
