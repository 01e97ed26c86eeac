//! Edit session controller.
//!
//! At most one leaf is edited at a time. Opening a session reads the leaf's
//! rendered content back into a [`PendingContent`], hides the original
//! content element (it stays mounted) and arms a single outside-pointer
//! listener. Pointer-downs outside both the target and the toolbar commit
//! the pending content into the [`BlockStore`] in one functional update.

use crate::codec;
use crate::editing::commands::EditCmd;
use crate::editing::pending::PendingContent;
use crate::models::{BlockId, Mark, ModelError};
use crate::registry::{RenderRegistry, Visibility};
use crate::store::BlockStore;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no editable content element for block `{0}`")]
    ContentNotFound(BlockId),
    #[error("failed to commit block `{id}`: {source}")]
    Commit {
        id: BlockId,
        #[source]
        source: ModelError,
    },
}

/// Where a pointer event passed through on its way up to the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOrigin {
    Block(BlockId),
    Toolbar,
}

/// Registration of the outside-pointer listener owned by a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

#[derive(Debug, Default)]
struct Listeners {
    next: u64,
    live: Vec<ListenerToken>,
}

impl Listeners {
    fn arm(&mut self) -> ListenerToken {
        self.next += 1;
        let token = ListenerToken(self.next);
        self.live.push(token);
        token
    }

    fn release(&mut self, token: ListenerToken) {
        let before = self.live.len();
        self.live.retain(|t| *t != token);
        if self.live.len() == before {
            log::warn!("released unknown listener {token:?}");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    target: BlockId,
    pending: PendingContent,
    listener: ListenerToken,
}

impl EditSession {
    pub fn target(&self) -> &BlockId {
        &self.target
    }

    pub fn pending(&self) -> &PendingContent {
        &self.pending
    }

    pub fn listener(&self) -> ListenerToken {
        self.listener
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Editing(EditSession),
}

/// Result of a successful [`EditController::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    Fresh,
    /// The block was already being edited; nothing changed
    AlreadyEditing,
    /// Another session was committed before this one opened
    Switched { committed: BlockId },
}

#[derive(Debug, Default)]
pub struct EditController {
    state: SessionState,
    listeners: Listeners,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            SessionState::Editing(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    pub fn editing(&self) -> Option<&BlockId> {
        self.session().map(EditSession::target)
    }

    pub fn is_editing(&self, id: &BlockId) -> bool {
        self.editing() == Some(id)
    }

    /// Number of armed outside-pointer listeners, 0 or 1
    pub fn live_listeners(&self) -> usize {
        self.listeners.live.len()
    }

    /// Start editing leaf `id`.
    ///
    /// A live session on another block is committed first.
    pub fn open<M>(
        &mut self,
        id: &BlockId,
        registry: &mut RenderRegistry<M>,
        store: &mut BlockStore,
    ) -> Result<Opened, EditError> {
        if self.is_editing(id) {
            return Ok(Opened::AlreadyEditing);
        }
        let Some(children) = registry.content(id) else {
            log::warn!("cannot edit `{id}`: content element not found");
            return Err(EditError::ContentNotFound(id.clone()));
        };
        let pending = PendingContent::new(codec::deserialize_content(children));

        let outcome = match self.commit(registry, store) {
            Some(committed) => Opened::Switched { committed },
            None => Opened::Fresh,
        };

        registry.set_visibility(id, Visibility::HiddenButPresent);
        let listener = self.listeners.arm();
        log::debug!("editing `{id}` ({outcome:?})");
        self.state = SessionState::Editing(EditSession {
            target: id.clone(),
            pending,
            listener,
        });
        Ok(outcome)
    }

    /// Handle a pointer-down that bubbled through `path`. Commits when the
    /// event started outside the edited block and outside the toolbar.
    /// Returns the committed block.
    pub fn pointer_down<M>(
        &mut self,
        path: &[PointerOrigin],
        registry: &mut RenderRegistry<M>,
        store: &mut BlockStore,
    ) -> Option<BlockId> {
        let target = self.editing()?;
        let inside = path.iter().any(|origin| match origin {
            PointerOrigin::Toolbar => true,
            PointerOrigin::Block(id) => id == target,
        });
        if inside {
            return None;
        }
        self.commit(registry, store)
    }

    /// Write the pending content of the live session into the store and
    /// return to idle. Returns the block the session was editing.
    pub fn commit<M>(
        &mut self,
        registry: &mut RenderRegistry<M>,
        store: &mut BlockStore,
    ) -> Option<BlockId> {
        let SessionState::Editing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let EditSession {
            target,
            pending,
            listener,
        } = session;
        self.listeners.release(listener);

        let content = pending.into_content();
        let rendered = codec::serialize(&content);
        let result = store
            .try_update(|map| map.commit_content(&target, content))
            .map_err(|source| EditError::Commit {
                id: target.clone(),
                source,
            });
        match result {
            Ok(()) => {
                registry.refresh_content(&target, rendered);
                log::debug!("committed `{target}` at version {}", store.version());
            }
            Err(err) => log::warn!("{err}; pending edits dropped"),
        }
        registry.set_visibility(&target, Visibility::Visible);
        Some(target)
    }

    /// Apply an editing command to the live session
    pub fn apply(&mut self, cmd: &EditCmd) -> bool {
        match &mut self.state {
            SessionState::Editing(session) => session.pending.apply(cmd),
            SessionState::Idle => false,
        }
    }

    /// Toolbar entry point; no-op without a live session
    pub fn toggle_mark(&mut self, mark: Mark) -> bool {
        self.apply(&EditCmd::ToggleMark(mark))
    }
}
