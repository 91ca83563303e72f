use crate::notebooks::Note;
use crate::paths::normalize_note_path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenameToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenameEffect {
    /// Hand the rename to the storage collaborator. Emitted at most once
    /// per submission; the host reports back through `complete`.
    ChangeFilePath {
        token: RenameToken,
        note_id: String,
        new_path: String,
    },
    /// The store confirmed the rename; carries the canonical path.
    NotifyChanged { new_path: String },
    /// Non-blocking error notification; the local path stays stale.
    NotifyError { message: String },
    CloseDialog,
}

#[derive(Debug, Clone)]
struct PendingRename {
    token: RenameToken,
    new_path: String,
}

/// Drives a note-path rename from raw input to store confirmation. The
/// store call is fire-and-forget: `submit` returns without waiting and
/// the host calls `complete` with the matching token whenever the store
/// answers, even if the originating dialog is long gone. The dialog
/// dismisses unconditionally on completion, success or failure.
#[derive(Debug, Default)]
pub struct FilePathCoordinator {
    next_token: u64,
    in_flight: Vec<PendingRename>,
}

impl FilePathCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, note: &Note, raw_path: &str) -> Vec<RenameEffect> {
        let new_path = normalize_note_path(raw_path);
        if new_path == note.file_path {
            return vec![RenameEffect::CloseDialog];
        }

        self.next_token += 1;
        let token = RenameToken(self.next_token);
        self.in_flight.push(PendingRename {
            token,
            new_path: new_path.clone(),
        });
        vec![RenameEffect::ChangeFilePath {
            token,
            note_id: note.id.clone(),
            new_path,
        }]
    }

    pub fn complete(
        &mut self,
        token: RenameToken,
        result: Result<(), StoreError>,
    ) -> Vec<RenameEffect> {
        let Some(ix) = self
            .in_flight
            .iter()
            .position(|pending| pending.token == token)
        else {
            debug!(?token, "ignoring completion for unknown rename request");
            return Vec::new();
        };
        let pending = self.in_flight.remove(ix);

        match result {
            Ok(()) => {
                debug!(path = %pending.new_path, "note file path changed");
                vec![
                    RenameEffect::NotifyChanged {
                        new_path: pending.new_path,
                    },
                    RenameEffect::CloseDialog,
                ]
            }
            Err(error) => {
                debug!(path = %pending.new_path, error = %error.message, "rename rejected by store");
                vec![
                    RenameEffect::NotifyError {
                        message: error.message,
                    },
                    RenameEffect::CloseDialog,
                ]
            }
        }
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
