use crate::deeplink::DeepLinkParams;
use crate::notebooks::{Note, Notebook, NotebookConfig, NotebookError, NotebookRegistry};
use crate::rename::{FilePathCoordinator, RenameEffect, RenameToken, StoreError};
use crate::selection::{
    reconcile, ReconcileInputs, RegistrationPrompt, SelectionEffect, SelectionState,
};

#[derive(Debug)]
pub enum SessionError {
    Notebook(NotebookError),
    NoPromptOpen,
}

impl From<NotebookError> for SessionError {
    fn from(err: NotebookError) -> Self {
        Self::Notebook(err)
    }
}

/// Host-facing surface tying the registry, selection reconciliation,
/// and the rename coordinator together for one application session.
pub struct Session {
    registry: NotebookRegistry,
    config: NotebookConfig,
    state: SelectionState,
    coordinator: FilePathCoordinator,
    initialized: bool,
}

impl Session {
    pub fn open(registry: NotebookRegistry) -> Result<Self, SessionError> {
        let config = registry.load()?;
        let state = SelectionState {
            selected_id: config.selected_id.clone(),
            prompt: None,
        };
        Ok(Self {
            registry,
            config,
            state,
            coordinator: FilePathCoordinator::new(),
            initialized: true,
        })
    }

    pub fn open_default() -> Result<Self, SessionError> {
        Ok(Self::open(NotebookRegistry::default_store()?)?)
    }

    pub fn notebooks(&self) -> &[Notebook] {
        &self.config.notebooks
    }

    pub fn selected_notebook(&self) -> Option<&Notebook> {
        let selected_id = self.state.selected_id.as_deref()?;
        self.config
            .notebooks
            .iter()
            .find(|notebook| notebook.id == selected_id)
    }

    pub fn registration_prompt(&self) -> Option<&RegistrationPrompt> {
        self.state.prompt.as_ref()
    }

    /// Runs a reconciliation pass for a navigation event and applies its
    /// effects, persisting any selection change. Safe to call again with
    /// the same parameters; the second pass is a no-op.
    pub fn navigate(&mut self, params: &DeepLinkParams) -> Result<Vec<SelectionEffect>, SessionError> {
        let inputs = ReconcileInputs {
            initialized: self.initialized,
            notebooks: &self.config.notebooks,
            params,
        };
        let effects = reconcile(&self.state, &inputs);
        for effect in &effects {
            if let SelectionEffect::SelectNotebook { notebook_id } = effect {
                self.config = self.registry.set_selected_notebook(notebook_id)?;
            }
            self.state.apply(effect);
        }
        Ok(effects)
    }

    /// Registers a notebook from the open prompt's decoded source pair,
    /// then re-runs reconciliation so the new notebook is selected and
    /// the prompt resolves.
    pub fn register_from_prompt(
        &mut self,
        name: &str,
        params: &DeepLinkParams,
    ) -> Result<Notebook, SessionError> {
        let prompt = self.state.prompt.clone().ok_or(SessionError::NoPromptOpen)?;
        let record =
            self.registry
                .register_notebook(name, Some(&prompt.repo), Some(&prompt.branch))?;
        self.config = self.registry.load()?;
        self.navigate(params)?;
        Ok(record)
    }

    pub fn submit_rename(&mut self, note: &Note, raw_path: &str) -> Vec<RenameEffect> {
        self.coordinator.submit(note, raw_path)
    }

    pub fn complete_rename(
        &mut self,
        token: RenameToken,
        result: Result<(), StoreError>,
    ) -> Vec<RenameEffect> {
        self.coordinator.complete(token, result)
    }
}
