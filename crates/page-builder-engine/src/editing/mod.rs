/*!
 * # Inline Editing
 *
 * ## Pending content
 * - A session edits a private copy of the block's content (`PendingContent`)
 * - All input arrives as **Commands** (`EditCmd`) applied to that copy
 * - The caret is a `(block, offset)` pair over the flattened runs of one
 *   top-level element; offsets count characters, not bytes
 *
 * ## Sessions
 * - `EditController` owns the `Idle` / `Editing` state machine
 * - Opening reads the content back from the render registry, so what is
 *   edited is exactly what is on screen
 * - Commit happens once, on a pointer-down outside the target and the
 *   toolbar, as a single `BlockStore` update
 */

pub mod commands;
pub mod pending;
pub mod session;

pub use commands::{Direction, EditCmd};
pub use pending::{BlockView, PendingContent, Position, Segment};
pub use session::{
    EditController, EditError, EditSession, ListenerToken, Opened, PointerOrigin, SessionState,
};
