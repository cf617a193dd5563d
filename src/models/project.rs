use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Executed amount of a project: either a number (formatted at render time)
/// or text shown exactly as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

/// The `gallery` field accepts a single file name or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaList {
    One(String),
    Many(Vec<String>),
}

impl Default for MediaList {
    fn default() -> Self {
        MediaList::Many(Vec::new())
    }
}

impl MediaList {
    /// A single name becomes a one-element list; an empty name means no media.
    pub fn normalized(&self) -> Vec<String> {
        match self {
            MediaList::One(name) if name.is_empty() => Vec::new(),
            MediaList::One(name) => vec![name.clone()],
            MediaList::Many(names) => names.clone(),
        }
    }
}

/// One portfolio entry of the projects feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub gallery: MediaList,
    #[serde(default)]
    pub alt: Option<String>,
}

impl Project {
    pub fn client_or_empty(&self) -> &str {
        self.client.as_deref().unwrap_or("")
    }

    /// Accessibility label for the project's media: `alt`, else the title.
    pub fn media_label(&self) -> &str {
        match self.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => &self.title,
        }
    }
}

/// The fetched project list. Shared read-only; every ordering is a derived view.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Arc<[Project]>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        ProjectStore {
            projects: projects.into(),
        }
    }

    /// Parse the projects feed. `null` is accepted as an empty list.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let projects: Option<Vec<Project>> =
            serde_json::from_str(raw).map_err(|e| format!("Invalid projects JSON: {}", e))?;
        Ok(Self::new(projects.unwrap_or_default()))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_json(&raw)
    }

    /// Load from disk, degrading to an empty store on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(store) => store,
            Err(e) => {
                log::error!("[projects] {}", e);
                Self::default()
            }
        }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
