use crate::models::rich_text::RichText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique identifier of a block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub const PAGE: &'static str = "page";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the root page block
    pub fn page() -> Self {
        Self(Self::PAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Row-major grid of block ids. A block id repeated over N consecutive
/// cells spans N columns in that row.
pub type Grid = Vec<Vec<BlockId>>;

/// A node of the page layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Block {
    Page {
        id: BlockId,
        #[serde(default)]
        children: Vec<BlockId>,
    },
    Section {
        id: BlockId,
        #[serde(default)]
        children: Vec<BlockId>,
        #[serde(default)]
        layout: Grid,
    },
    Button {
        id: BlockId,
        #[serde(default)]
        content: RichText,
    },
    Text {
        id: BlockId,
        #[serde(default)]
        content: RichText,
    },
}

/// The type tag of a block, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Page,
    Section,
    Button,
    Text,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Page => "PAGE",
            BlockKind::Section => "SECTION",
            BlockKind::Button => "BUTTON",
            BlockKind::Text => "TEXT",
        }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, BlockKind::Button | BlockKind::Text)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match self {
            Block::Page { id, .. }
            | Block::Section { id, .. }
            | Block::Button { id, .. }
            | Block::Text { id, .. } => id,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Page { .. } => BlockKind::Page,
            Block::Section { .. } => BlockKind::Section,
            Block::Button { .. } => BlockKind::Button,
            Block::Text { .. } => BlockKind::Text,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    /// Child ids in DOM order. Leaves have none.
    pub fn children(&self) -> &[BlockId] {
        match self {
            Block::Page { children, .. } | Block::Section { children, .. } => children,
            Block::Button { .. } | Block::Text { .. } => &[],
        }
    }

    pub fn layout(&self) -> Option<&Grid> {
        match self {
            Block::Section { layout, .. } => Some(layout),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&RichText> {
        match self {
            Block::Button { content, .. } | Block::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Every id this block refers to, from `children` then `layout`,
    /// without duplicates
    pub fn references(&self) -> Vec<&BlockId> {
        let mut out: Vec<&BlockId> = Vec::new();
        let cells = self.layout().into_iter().flatten().flatten();
        for id in self.children().iter().chain(cells) {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// A copy of this leaf with its content replaced; `None` for containers
    pub fn with_content(&self, content: RichText) -> Option<Block> {
        match self {
            Block::Button { id, .. } => Some(Block::Button {
                id: id.clone(),
                content,
            }),
            Block::Text { id, .. } => Some(Block::Text {
                id: id.clone(),
                content,
            }),
            Block::Page { .. } | Block::Section { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_json_uses_uppercase_type_tag() {
        let json = r#"{"id":"s","type":"SECTION","children":["a"],"layout":[["a","a"]]}"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.kind(), BlockKind::Section);
        assert_eq!(block.id().as_str(), "s");
        assert_eq!(block.children(), &[BlockId::from("a")]);
    }

    #[test]
    fn test_references_are_deduplicated() {
        let block = Block::Section {
            id: "s".into(),
            children: vec!["b".into(), "t".into()],
            layout: vec![vec!["t".into(), "t".into(), "b".into(), "x".into()]],
        };

        let refs: Vec<&str> = block.references().iter().map(|id| id.as_str()).collect();
        assert_eq!(refs, vec!["b", "t", "x"]);
    }

    #[test]
    fn test_with_content_only_for_leaves() {
        let page = Block::Page {
            id: BlockId::page(),
            children: vec![],
        };
        assert!(page.with_content(RichText::paragraph("x")).is_none());

        let text = Block::Text {
            id: "t".into(),
            content: RichText::paragraph("old"),
        };
        let updated = text.with_content(RichText::paragraph("new")).unwrap();
        assert_eq!(updated.content(), Some(&RichText::paragraph("new")));
        assert_eq!(updated.id(), text.id());
    }
}
