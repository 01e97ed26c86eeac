pub mod block;
pub mod block_map;
pub mod rich_text;

pub use block::{Block, BlockId, BlockKind, Grid};
pub use block_map::{BlockMap, ModelError};
pub use rich_text::{ElementKind, ElementNode, Mark, MarkSet, Node, RichText, TextRun};
