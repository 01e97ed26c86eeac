mod block_node;
mod content_view;
mod edit_overlay;
mod error_screen;
mod insertion_guide;
mod leaf_block;
mod page_block;
mod section_block;
mod toolbar;

pub use block_node::BlockNode;
pub use content_view::ContentView;
pub use edit_overlay::EditOverlay;
pub use error_screen::ErrorScreen;
pub use insertion_guide::InsertionGuide;
pub use leaf_block::LeafBlock;
pub use page_block::PageBlock;
pub use section_block::SectionBlock;
pub use toolbar::Toolbar;
