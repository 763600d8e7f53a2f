mod paths;
mod provision;
mod registry;

use std::path::PathBuf;
use std::process::exit;

use crate::provision::{build_image_set, parse_asins, run};
use crate::registry::ClientRegistry;

fn option_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return;
    }

    let mut registry = ClientRegistry::load_default();

    if args.iter().any(|arg| arg == "--list-clients") {
        if registry.clients().is_empty() {
            println!("[asinpack] No clients registered yet.");
        } else {
            for client in registry.clients() {
                println!("{client}");
            }
        }
        return;
    }

    let Some(client) = option_value(&args, "--client") else {
        eprintln!("[asinpack] Missing --client.");
        eprintln!("{}", USAGE_TEXT);
        exit(1);
    };
    let Some(dest) = option_value(&args, "--dest") else {
        eprintln!("[asinpack] Missing --dest.");
        eprintln!("{}", USAGE_TEXT);
        exit(1);
    };
    let Some(asins_file) = option_value(&args, "--asins") else {
        eprintln!("[asinpack] Missing --asins.");
        eprintln!("{}", USAGE_TEXT);
        exit(1);
    };
    let compress = args.iter().any(|arg| arg == "--zip");
    let add_client = args.iter().any(|arg| arg == "--add-client");

    // Everything not consumed by a flag is a candidate image
    let mut image_paths: Vec<PathBuf> = Vec::new();
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "--client" | "--dest" | "--asins" => skip_next = true,
            "--zip" | "--add-client" => {}
            _ => image_paths.push(PathBuf::from(arg)),
        }
    }

    let client = client.trim().to_string();
    if client.is_empty() {
        eprintln!("[asinpack] Client name cannot be empty.");
        exit(1);
    }
    if !registry.contains(&client) {
        if add_client {
            if let Err(e) = registry.add(&client) {
                eprintln!("[asinpack] Could not save the client list: {e}");
                exit(1);
            }
            println!("[asinpack] Client '{client}' added to the registry.");
        } else {
            eprintln!("[asinpack] Unknown client '{client}'. Pass --add-client to register it.");
            if !registry.clients().is_empty() {
                eprintln!("[asinpack] Known clients: {}", registry.clients().join(", "));
            }
            exit(1);
        }
    }

    if image_paths.is_empty() {
        eprintln!("[asinpack] Select at least 1 image (up to 9, named 1..9).");
        exit(1);
    }
    let image_set = match build_image_set(&image_paths) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("[asinpack] {e}");
            exit(1);
        }
    };

    let asins_file = PathBuf::from(asins_file);
    let text = match std::fs::read_to_string(&asins_file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "[asinpack] Could not read ASIN list {}: {}",
                asins_file.display(),
                e
            );
            exit(1);
        }
    };
    let asins = parse_asins(&text);
    if asins.is_empty() {
        eprintln!("[asinpack] The ASIN list is empty.");
        exit(1);
    }

    let dest = PathBuf::from(dest);
    if !dest.is_dir() {
        eprintln!(
            "[asinpack] Destination folder does not exist: {}",
            dest.display()
        );
        exit(1);
    }

    let outcome = match run(&client, &image_set, &asins, &dest, compress) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("[asinpack] {e}");
            exit(1);
        }
    };

    if outcome.is_clean() {
        println!(
            "[asinpack] Processed {} ASIN(s) for '{}'.",
            outcome.processed, client
        );
        if compress {
            println!("[asinpack] Each ASIN folder contains its ZIP.");
        }
    } else {
        eprintln!(
            "[asinpack] Completed with {} recorded failure(s):",
            outcome.failures.len()
        );
        for line in outcome.failure_lines() {
            eprintln!("  {line}");
        }
        exit(1);
    }
}

static USAGE_TEXT: &str = r#"
Provision per-ASIN image folders for a client.

Usage: asinpack [OPTIONS] <IMAGE>...
       asinpack --list-clients

Arguments:
    <IMAGE>...          Up to 9 images with base names 1..9 (jpg/jpeg/png/bmp/gif)

Options:
    --client <NAME>     Client folder to provision under the destination
    --dest <DIR>        Existing directory to create the client folder in
    --asins <FILE>      File with the ASIN list, one per line
    --zip               Compress each ASIN folder into a single ZIP
    --add-client        Register the client if it is not known yet
    --list-clients      Print the known clients and exit
    --help              Show this text
"#;
