use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug)]
pub enum NotebookError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    NotFound,
    DuplicateSource,
    MissingBranch,
    ProjectDir,
}

impl From<std::io::Error> for NotebookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for NotebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notebook {
    pub id: String,
    pub name: String,
    pub git_url: Option<String>,
    pub git_branch: Option<String>,
    pub created_at: i64,
}

impl Notebook {
    pub fn matches_source(&self, repo: &str, branch: &str) -> bool {
        self.git_url.as_deref() == Some(repo) && self.git_branch.as_deref() == Some(branch)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NotebookConfig {
    pub selected_id: Option<String>,
    pub notebooks: Vec<Notebook>,
}

pub struct NotebookRegistry {
    config_path: PathBuf,
}

impl NotebookRegistry {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn default_store() -> Result<Self, NotebookError> {
        let project_dirs =
            ProjectDirs::from("app", "mica", "Mica").ok_or(NotebookError::ProjectDir)?;
        let config_dir = project_dirs.config_dir();
        Ok(Self::new(config_dir.join("notebooks.json")))
    }

    pub fn load(&self) -> Result<NotebookConfig, NotebookError> {
        if !self.config_path.exists() {
            return Ok(NotebookConfig::default());
        }
        let raw = fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, config: &NotebookConfig) -> Result<(), NotebookError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, data)?;
        Ok(())
    }

    pub fn register_notebook(
        &self,
        name: &str,
        git_url: Option<&str>,
        git_branch: Option<&str>,
    ) -> Result<Notebook, NotebookError> {
        if git_url.is_some() && git_branch.is_none() {
            return Err(NotebookError::MissingBranch);
        }

        let mut config = self.load()?;
        if let (Some(url), Some(branch)) = (git_url, git_branch) {
            let taken = config
                .notebooks
                .iter()
                .any(|notebook| notebook.matches_source(url, branch));
            if taken {
                return Err(NotebookError::DuplicateSource);
            }
        }

        let record = Notebook {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            git_url: git_url.map(str::to_string),
            git_branch: git_branch.map(str::to_string),
            created_at: now_epoch(),
        };

        config.notebooks.push(record.clone());
        if config.selected_id.is_none() {
            config.selected_id = Some(record.id.clone());
        }
        self.save(&config)?;
        Ok(record)
    }

    pub fn set_selected_notebook(&self, notebook_id: &str) -> Result<NotebookConfig, NotebookError> {
        let mut config = self.load()?;
        let exists = config
            .notebooks
            .iter()
            .any(|notebook| notebook.id == notebook_id);
        if !exists {
            return Err(NotebookError::NotFound);
        }
        config.selected_id = Some(notebook_id.to_string());
        self.save(&config)?;
        Ok(config)
    }
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}
