// Pure slot and identifier computation
// No side effects - only path/string inspection

use std::collections::HashMap;
use std::path::PathBuf;

use super::types::{ImageRef, ValidationError};

/// Output suffix per slot ordinal: one main image plus eight part images,
/// order-significant.
pub const SLOT_SUFFIXES: [&str; 9] = [
    "MAIN", "PT01", "PT02", "PT03", "PT04", "PT05", "PT06", "PT07", "PT08",
];

/// Extensions accepted for slot images, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Validate candidate image paths into the ordinal -> image map.
///
/// At most nine paths, allowed extensions only, base names unique and
/// each the decimal string of a slot ordinal. The map may be sparse; the
/// ordinals with no supplied image are simply absent.
pub fn build_image_set(paths: &[PathBuf]) -> Result<HashMap<u8, ImageRef>, ValidationError> {
    if paths.len() > SLOT_SUFFIXES.len() {
        return Err(ValidationError::TooManyImages(paths.len()));
    }

    for path in paths {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            return Err(ValidationError::UnsupportedExtension(
                path.to_string_lossy().to_string(),
            ));
        }
    }

    let stems: Vec<String> = paths
        .iter()
        .map(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    for (i, stem) in stems.iter().enumerate() {
        if stems[..i].contains(stem) {
            return Err(ValidationError::DuplicateName(stem.clone()));
        }
    }

    let mut set = HashMap::new();
    for (path, stem) in paths.iter().zip(&stems) {
        // "01" parses to 1 but is not a slot name, hence the length check
        let slot = match stem.parse::<u8>() {
            Ok(n) if stem.len() == 1 && (1..=9).contains(&n) => n,
            _ => return Err(ValidationError::InvalidName(stem.clone())),
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        set.insert(
            slot,
            ImageRef {
                path: path.clone(),
                extension,
            },
        );
    }

    Ok(set)
}

/// Output filename for one slot: `{asin}.{suffix}.{ext}`, extension kept
/// exactly as supplied.
pub fn slot_file_name(asin: &str, slot: u8, extension: &str) -> String {
    format!("{}.{}.{}", asin, SLOT_SUFFIXES[(slot - 1) as usize], extension)
}

/// Normalize pasted identifier text: split on line breaks, trim each
/// line, drop blanks, keep input order, never deduplicate.
pub fn parse_asins(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
