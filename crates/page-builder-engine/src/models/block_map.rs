use crate::models::block::{Block, BlockId, BlockKind};
use crate::models::rich_text::RichText;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("block map has no `page` block")]
    MissingPage,
    #[error("block `page` is a {0}, expected PAGE")]
    PageNotRoot(BlockKind),
    #[error("second PAGE block `{0}`; exactly one is allowed")]
    DuplicatePage(BlockId),
    #[error("block stored under key `{key}` has id `{id}`")]
    KeyMismatch { key: BlockId, id: BlockId },
    #[error("block `{parent}` refers to missing block `{child}`")]
    DanglingReference { parent: BlockId, child: BlockId },
    #[error("block `{0}` is its own ancestor")]
    Cycle(BlockId),
    #[error("block `{0}` has more than one parent")]
    SharedChild(BlockId),
    #[error("block `{0}` is not reachable from the page")]
    Unreachable(BlockId),
    #[error("unknown block `{0}`")]
    UnknownBlock(BlockId),
    #[error("block `{0}` is a {1} and has no content")]
    NotALeaf(BlockId, BlockKind),
}

/// Id-indexed collection holding every block of a page.
///
/// Entries are shared behind `Arc`, so deriving a new map with
/// [`BlockMap::commit_content`] leaves every untouched entry pointer-equal
/// to the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<BlockId, Block>", into = "BTreeMap<BlockId, Block>")]
pub struct BlockMap {
    blocks: BTreeMap<BlockId, Arc<Block>>,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Arc<Block>> {
        self.blocks.get(id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    /// Insert a block under its own id, returning the previous entry
    pub fn insert(&mut self, block: Block) -> Option<Arc<Block>> {
        self.blocks.insert(block.id().clone(), Arc::new(block))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockId, &Arc<Block>)> {
        self.blocks.iter()
    }

    /// Check the tree invariants: keys match ids, exactly one PAGE at
    /// `page`, no dangling references, and `children` edges form a tree
    /// rooted at the page.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (key, block) in &self.blocks {
            if key != block.id() {
                return Err(ModelError::KeyMismatch {
                    key: key.clone(),
                    id: block.id().clone(),
                });
            }
            if block.kind() == BlockKind::Page && key.as_str() != BlockId::PAGE {
                return Err(ModelError::DuplicatePage(key.clone()));
            }
            for child in block.references() {
                if !self.blocks.contains_key(child) {
                    return Err(ModelError::DanglingReference {
                        parent: key.clone(),
                        child: child.clone(),
                    });
                }
            }
        }

        let page = self.get(&BlockId::page()).ok_or(ModelError::MissingPage)?;
        if page.kind() != BlockKind::Page {
            return Err(ModelError::PageNotRoot(page.kind()));
        }

        let mut visited = HashSet::new();
        let mut path = Vec::new();
        self.walk(page.id(), &mut visited, &mut path)?;

        match self.blocks.keys().find(|id| !visited.contains(*id)) {
            Some(orphan) => Err(ModelError::Unreachable(orphan.clone())),
            None => Ok(()),
        }
    }

    fn walk<'a>(
        &'a self,
        id: &'a BlockId,
        visited: &mut HashSet<&'a BlockId>,
        path: &mut Vec<&'a BlockId>,
    ) -> Result<(), ModelError> {
        if path.contains(&id) {
            return Err(ModelError::Cycle(id.clone()));
        }
        if !visited.insert(id) {
            return Err(ModelError::SharedChild(id.clone()));
        }
        let Some(block) = self.blocks.get(id) else {
            return Err(ModelError::UnknownBlock(id.clone()));
        };

        path.push(id);
        for child in block.children() {
            self.walk(child, visited, path)?;
        }
        path.pop();
        Ok(())
    }

    /// Commit-content contract: a new map in which only the `content` of
    /// leaf `id` differs. Every other entry is shared with `self`.
    pub fn commit_content(&self, id: &BlockId, content: RichText) -> Result<BlockMap, ModelError> {
        let block = self
            .get(id)
            .ok_or_else(|| ModelError::UnknownBlock(id.clone()))?;
        let updated = block
            .with_content(content)
            .ok_or_else(|| ModelError::NotALeaf(id.clone(), block.kind()))?;

        let mut blocks = self.blocks.clone();
        blocks.insert(id.clone(), Arc::new(updated));
        Ok(BlockMap { blocks })
    }
}

impl From<BTreeMap<BlockId, Block>> for BlockMap {
    fn from(blocks: BTreeMap<BlockId, Block>) -> Self {
        Self {
            blocks: blocks
                .into_iter()
                .map(|(id, block)| (id, Arc::new(block)))
                .collect(),
        }
    }
}

impl From<BlockMap> for BTreeMap<BlockId, Block> {
    fn from(map: BlockMap) -> Self {
        map.blocks
            .into_iter()
            .map(|(id, block)| (id, Arc::unwrap_or_clone(block)))
            .collect()
    }
}

impl FromIterator<Block> for BlockMap {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        let mut map = BlockMap::new();
        for block in iter {
            map.insert(block);
        }
        map
    }
}
