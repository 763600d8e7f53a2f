use crate::paths::PATH_DATA;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// On-disk list of known clients.
///
/// The backing file is a plain JSON array of unique, case-sensitive
/// names. A missing or unreadable file loads as an empty registry; every
/// add rewrites the full list, pretty-printed and sorted
/// case-insensitively.
pub struct ClientRegistry {
    path: PathBuf,
    clients: Vec<String>,
}

impl ClientRegistry {
    /// Load the registry from its default location under the data dir.
    pub fn load_default() -> Self {
        Self::load(PATH_DATA.join("clients.json"))
    }

    pub fn load(path: PathBuf) -> Self {
        let mut clients = Vec::new();
        if let Ok(file) = File::open(&path)
            && let Ok(list) = serde_json::from_reader::<_, Vec<String>>(BufReader::new(file))
        {
            clients = list;
        }
        Self { path, clients }
    }

    pub fn clients(&self) -> &[String] {
        &self.clients
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clients.iter().any(|c| c == name)
    }

    /// Add a new client and persist the full list.
    pub fn add(&mut self, name: &str) -> Result<(), Box<dyn Error>> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Client name cannot be empty".into());
        }
        if self.contains(name) {
            return Err(format!("Client '{name}' already exists").into());
        }
        self.clients.push(name.to_string());
        self.clients.sort_by_key(|c| c.to_lowercase());
        self.save()?;
        Ok(())
    }

    fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &self.clients)?;
        Ok(())
    }
}
