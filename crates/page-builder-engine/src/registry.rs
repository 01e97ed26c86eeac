//! Id-indexed registry of rendered blocks.
//!
//! Pointer and click handling work on rendered elements, which only the
//! front-end can see. Instead of querying the document for
//! `[data-pe-id=...]` every time, the registry is rebuilt from each render
//! tree and hands out one [`RenderHandle`] per marked section or leaf.
//! `M` is whatever the front-end uses to reach the mounted element.

use crate::dom::DomNode;
use crate::models::BlockId;
use crate::render::{LeafKind, RenderNode};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    Section,
    Leaf(LeafKind),
}

/// Whether a leaf's content element is shown. Hidden content stays mounted
/// so node identity and layout are undisturbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    HiddenButPresent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderHandle<M> {
    pub id: BlockId,
    pub role: HandleRole,
    /// Mirror of the content element's children (leaves only)
    pub content: Vec<DomNode>,
    pub visibility: Visibility,
    pub mount: Option<M>,
}

impl<M> RenderHandle<M> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.role, HandleRole::Leaf(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRegistry<M = ()> {
    handles: HashMap<BlockId, RenderHandle<M>>,
    order: Vec<BlockId>,
}

impl<M> Default for RenderRegistry<M> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<M> RenderRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for a freshly rendered tree
    pub fn from_tree(tree: &RenderNode) -> Self {
        let mut registry = Self::new();
        registry.sync(tree);
        registry
    }

    /// Rebuild from `tree`. Handles whose id survives keep their mount and
    /// visibility; content mirrors are replaced; vanished ids are dropped.
    pub fn sync(&mut self, tree: &RenderNode) {
        let mut previous = std::mem::take(&mut self.handles);
        self.order.clear();

        for node in tree.walk() {
            let Some(markers) = node.markers() else {
                continue;
            };
            let (role, content) = match node {
                RenderNode::Leaf { kind, content, .. } => (HandleRole::Leaf(*kind), content.clone()),
                RenderNode::Section { .. } => (HandleRole::Section, Vec::new()),
                RenderNode::Page { .. } => continue,
            };
            let kept = previous.remove(&markers.id);
            let handle = RenderHandle {
                id: markers.id.clone(),
                role,
                content,
                visibility: kept.as_ref().map(|h| h.visibility).unwrap_or_default(),
                mount: kept.and_then(|h| h.mount),
            };
            if self.handles.insert(markers.id.clone(), handle).is_some() {
                log::warn!("block `{}` rendered more than once", markers.id);
                continue;
            }
            self.order.push(markers.id.clone());
        }

        if !previous.is_empty() {
            log::debug!("dropped {} stale render handles", previous.len());
        }
    }

    pub fn get(&self, id: &BlockId) -> Option<&RenderHandle<M>> {
        self.handles.get(id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Children of a leaf's content element
    pub fn content(&self, id: &BlockId) -> Option<&[DomNode]> {
        self.handles
            .get(id)
            .filter(|h| h.is_leaf())
            .map(|h| h.content.as_slice())
    }

    /// Replace the content mirror ahead of the next render
    pub fn refresh_content(&mut self, id: &BlockId, content: Vec<DomNode>) -> bool {
        match self.handles.get_mut(id) {
            Some(handle) if handle.is_leaf() => {
                handle.content = content;
                true
            }
            _ => false,
        }
    }

    pub fn visibility(&self, id: &BlockId) -> Visibility {
        self.handles
            .get(id)
            .map(|h| h.visibility)
            .unwrap_or_default()
    }

    pub fn set_visibility(&mut self, id: &BlockId, visibility: Visibility) -> bool {
        match self.handles.get_mut(id) {
            Some(handle) => {
                handle.visibility = visibility;
                true
            }
            None => false,
        }
    }

    /// Record the front-end's handle to the mounted element of `id`
    pub fn attach_mount(&mut self, id: &BlockId, mount: M) -> bool {
        match self.handles.get_mut(id) {
            Some(handle) => {
                handle.mount = Some(mount);
                true
            }
            None => {
                log::debug!("mounted element for unregistered block `{id}`");
                false
            }
        }
    }

    /// Leaf handles in DOM order
    pub fn leaves(&self) -> impl Iterator<Item = &RenderHandle<M>> {
        self.in_order().filter(|h| h.is_leaf())
    }

    /// Section handles in DOM order
    pub fn sections(&self) -> impl Iterator<Item = &RenderHandle<M>> {
        self.in_order().filter(|h| h.role == HandleRole::Section)
    }

    fn in_order(&self) -> impl Iterator<Item = &RenderHandle<M>> {
        self.order.iter().filter_map(|id| self.handles.get(id))
    }
}
