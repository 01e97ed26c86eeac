use crate::editing::pending::{PendingContent, Position};
use crate::models::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Commands that can be applied to pending content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCmd {
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    /// Start a new paragraph at the caret
    SplitBlock,
    Move { direction: Direction, extend: bool },
    SelectAll,
    ToggleMark(Mark),
}

impl PendingContent {
    /// Apply `cmd`. Returns true when the content or the selection changed.
    pub fn apply(&mut self, cmd: &EditCmd) -> bool {
        match cmd {
            EditCmd::InsertText(text) => self.insert_text(text),
            EditCmd::DeleteBackward => self.delete_backward(),
            EditCmd::DeleteForward => self.delete_forward(),
            EditCmd::SplitBlock => self.split_block(),
            EditCmd::Move { direction, extend } => self.move_caret(*direction, *extend),
            EditCmd::SelectAll => {
                self.select_all();
                true
            }
            EditCmd::ToggleMark(mark) => self.toggle_mark(*mark),
        }
    }

    fn move_caret(&mut self, direction: Direction, extend: bool) -> bool {
        let before = (self.caret(), self.selection());

        // collapsing a selection lands on the side being moved towards
        if !extend
            && let Some((start, end)) = self.selection()
            && matches!(direction, Direction::Left | Direction::Right)
        {
            let target = if direction == Direction::Left { start } else { end };
            self.set_caret(target, false);
            return true;
        }

        let target = self.target(direction);
        self.set_caret(target, extend);
        before != (self.caret(), self.selection())
    }

    fn target(&self, direction: Direction) -> Position {
        let Position { block, offset } = self.caret();
        let last = self.block_count() - 1;
        match direction {
            Direction::Left if offset > 0 => Position::new(block, offset - 1),
            Direction::Left if block > 0 => Position::new(block - 1, self.block_len(block - 1)),
            Direction::Left => Position::new(0, 0),
            Direction::Right if offset < self.block_len(block) => Position::new(block, offset + 1),
            Direction::Right if block < last => Position::new(block + 1, 0),
            Direction::Right => Position::new(block, offset),
            Direction::Up if block > 0 => {
                Position::new(block - 1, offset.min(self.block_len(block - 1)))
            }
            Direction::Up => Position::new(0, 0),
            Direction::Down if block < last => {
                Position::new(block + 1, offset.min(self.block_len(block + 1)))
            }
            Direction::Down => Position::new(last, self.block_len(last)),
            Direction::LineStart => Position::new(block, 0),
            Direction::LineEnd => Position::new(block, self.block_len(block)),
        }
    }
}
