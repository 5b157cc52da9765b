use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use dae_document_core::Element;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    documents: HashMap<String, DocumentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentEntry {
    Path(String),
    Detailed { path: String, root: String },
}

impl DocumentEntry {
    fn as_path(&self) -> &str {
        match self {
            DocumentEntry::Path(path) => path,
            DocumentEntry::Detailed { path, .. } => path,
        }
    }

    fn root(&self) -> &str {
        match self {
            DocumentEntry::Path(_) => "animation",
            DocumentEntry::Detailed { root, .. } => root,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Scene documents stored as JSON element trees.
pub mod documents {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.documents.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.documents, "document", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.documents, "document", name)?;
        super::load_json(entry.as_path())
    }

    /// Parse the document and check its root tag against the manifest.
    pub fn element(name: &str) -> Result<Element> {
        let entry = lookup(&MANIFEST.documents, "document", name)?;
        let text = read_to_string(entry.as_path())?;
        Element::from_json_rooted(&text, entry.root())
            .with_context(|| format!("fixture '{name}' is not a valid element tree"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.documents, "document", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
