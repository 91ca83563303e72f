use crate::deeplink::{resolve_notebook, DeepLinkParams};
use crate::notebooks::Notebook;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_id: Option<String>,
    pub prompt: Option<RegistrationPrompt>,
}

/// Registration offer for a deep-linked remote source with no matching
/// notebook. Fields are already percent-decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationPrompt {
    pub repo: String,
    pub branch: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReconcileInputs<'a> {
    pub initialized: bool,
    pub notebooks: &'a [Notebook],
    pub params: &'a DeepLinkParams,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    SelectNotebook { notebook_id: String },
    OpenRegistrationPrompt { repo: String, branch: String },
    CloseRegistrationPrompt,
}

/// One reconciliation pass over the current inputs. Pure: emits effects
/// without touching `state`, so calling it again after the host applies
/// those effects yields nothing. Everything is re-derived from the
/// inputs; no history is consulted.
pub fn reconcile(state: &SelectionState, inputs: &ReconcileInputs) -> Vec<SelectionEffect> {
    if !inputs.initialized {
        return Vec::new();
    }

    let mut effects = Vec::new();
    match resolve_notebook(inputs.notebooks, inputs.params) {
        Some(notebook) => {
            if state.selected_id.as_deref() != Some(notebook.id.as_str()) {
                debug!(notebook = %notebook.id, "selecting deep-linked notebook");
                effects.push(SelectionEffect::SelectNotebook {
                    notebook_id: notebook.id.clone(),
                });
            }
            // An open prompt is resolved by any match on this pass.
            if state.prompt.is_some() {
                effects.push(SelectionEffect::CloseRegistrationPrompt);
            }
        }
        None => {
            // A bare id that resolves to nothing stays inert; only an
            // unknown remote source offers registration. A pair that
            // fails to decode offers nothing either, since there are no
            // decoded values to pre-fill.
            if inputs.params.notebook_id.is_none() {
                if let Some((repo, branch)) = inputs.params.decoded_source() {
                    let open_for_pair = state
                        .prompt
                        .as_ref()
                        .is_some_and(|prompt| prompt.repo == repo && prompt.branch == branch);
                    if !open_for_pair {
                        debug!(%repo, %branch, "offering notebook registration");
                        effects.push(SelectionEffect::OpenRegistrationPrompt { repo, branch });
                    }
                }
            }
        }
    }
    effects
}

impl SelectionState {
    pub fn apply(&mut self, effect: &SelectionEffect) {
        match effect {
            SelectionEffect::SelectNotebook { notebook_id } => {
                self.selected_id = Some(notebook_id.clone());
            }
            SelectionEffect::OpenRegistrationPrompt { repo, branch } => {
                self.prompt = Some(RegistrationPrompt {
                    repo: repo.clone(),
                    branch: branch.clone(),
                });
            }
            SelectionEffect::CloseRegistrationPrompt => {
                self.prompt = None;
            }
        }
    }

    pub fn apply_all(&mut self, effects: &[SelectionEffect]) {
        for effect in effects {
            self.apply(effect);
        }
    }
}
