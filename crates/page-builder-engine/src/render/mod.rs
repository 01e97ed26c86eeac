/*!
 * # Tree Renderer
 *
 * Pure function from `(block id, BlockMap)` to a [`RenderNode`] tree. The
 * front-end turns render nodes into real elements; [`RenderNode::to_dom`]
 * produces the same structure as a portable [`DomNode`] mirror.
 *
 * Dispatch is on the block type only:
 *
 * - `PAGE` renders its children in order inside a plain container
 * - `SECTION` renders its children in `children` order (DOM and tab order)
 *   while its [`GridTemplate`] decides where each one is placed
 * - `BUTTON` / `TEXT` are leaves; their content goes through
 *   [`codec::serialize`](crate::codec::serialize)
 *
 * In edit mode every section and leaf carries [`EditMarkers`], mirrored as
 * `data-pe-type` / `data-pe-id` attributes.
 */

pub mod grid;

pub use grid::{EMPTY_CELL, GRID_COLUMNS, GridPlacement, GridTemplate};

use crate::codec;
use crate::dom::{ATTR_CONTENT, ATTR_ID, ATTR_TYPE, DomElement, DomNode, LEAF_MARKER_PREFIX};
use crate::models::{Block, BlockId, BlockKind, BlockMap};
use thiserror::Error;

/// What to do with an id that is referenced but absent from the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingBlockPolicy {
    /// Abort the render with [`RenderError::MissingBlock`]
    Fail,
    /// Log a warning and leave the node out
    Skip,
}

impl MissingBlockPolicy {
    /// `Fail` in debug builds, `Skip` in release builds
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            MissingBlockPolicy::Fail
        } else {
            MissingBlockPolicy::Skip
        }
    }
}

impl Default for MissingBlockPolicy {
    fn default() -> Self {
        Self::for_build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub edit_mode: bool,
    pub missing: MissingBlockPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            edit_mode: true,
            missing: MissingBlockPolicy::for_build(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("block `{id}` referenced by `{parent}` does not exist")]
    MissingBlock { parent: BlockId, id: BlockId },
    #[error("root block `{0}` does not exist")]
    MissingRoot(BlockId),
    #[error("block `{0}` contains itself")]
    Cycle(BlockId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Button,
    Text,
}

/// Queryable edit-mode markers of a rendered section or leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditMarkers {
    /// `SECTION` or `ELEMENT-<TYPE>` for leaves
    pub type_marker: String,
    pub id: BlockId,
}

impl EditMarkers {
    fn new(kind: BlockKind, id: &BlockId) -> Self {
        let type_marker = if kind.is_leaf() {
            format!("{LEAF_MARKER_PREFIX}{kind}")
        } else {
            kind.to_string()
        };
        Self {
            type_marker,
            id: id.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.type_marker.starts_with(LEAF_MARKER_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Page {
        id: BlockId,
        children: Vec<RenderNode>,
    },
    Section {
        id: BlockId,
        grid: GridTemplate,
        children: Vec<RenderNode>,
        markers: Option<EditMarkers>,
    },
    Leaf {
        id: BlockId,
        kind: LeafKind,
        content: Vec<DomNode>,
        markers: Option<EditMarkers>,
    },
}

impl RenderNode {
    pub fn id(&self) -> &BlockId {
        match self {
            RenderNode::Page { id, .. }
            | RenderNode::Section { id, .. }
            | RenderNode::Leaf { id, .. } => id,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Page { children, .. } | RenderNode::Section { children, .. } => children,
            RenderNode::Leaf { .. } => &[],
        }
    }

    pub fn markers(&self) -> Option<&EditMarkers> {
        match self {
            RenderNode::Page { .. } => None,
            RenderNode::Section { markers, .. } | RenderNode::Leaf { markers, .. } => {
                markers.as_ref()
            }
        }
    }

    /// Depth-first, pre-order walk: the order nodes appear in the DOM
    pub fn walk(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        self.walk_into(&mut out);
        out
    }

    fn walk_into<'a>(&'a self, out: &mut Vec<&'a RenderNode>) {
        out.push(self);
        for child in self.children() {
            child.walk_into(out);
        }
    }

    /// DOM mirror of this subtree, carrying the layout styles and the edit
    /// markers a browser rendering would have
    pub fn to_dom(&self) -> DomNode {
        self.to_dom_in(None)
    }

    fn to_dom_in(&self, grid: Option<&GridTemplate>) -> DomNode {
        let area = grid
            .is_some_and(|g| g.placement(self.id()).is_some())
            .then(|| format!("grid-area: {};", self.id()));

        let mut element = match self {
            RenderNode::Page { .. } => DomElement::new("div"),
            RenderNode::Section { grid, .. } => {
                let mut style = format!(
                    "display: grid; grid-template-areas: {}; grid-template-columns: {};",
                    grid.template_areas(),
                    grid.template_columns()
                );
                if let Some(area) = &area {
                    style.push(' ');
                    style.push_str(area);
                }
                DomElement::new("div").with_attr("style", style)
            }
            RenderNode::Leaf { kind, content, .. } => {
                let tag = match kind {
                    LeafKind::Button => "button",
                    LeafKind::Text => "div",
                };
                DomElement::new(tag).with_children(vec![
                    DomElement::new("div")
                        .with_attr(ATTR_CONTENT, "")
                        .with_children(content.clone())
                        .into(),
                ])
            }
        };

        if let Some(markers) = self.markers() {
            element = element
                .with_attr(ATTR_TYPE, markers.type_marker.clone())
                .with_attr(ATTR_ID, markers.id.as_str());
        }
        if let Some(area) = area
            && !matches!(self, RenderNode::Section { .. })
        {
            element = element.with_attr("style", area);
        }

        let own_grid = match self {
            RenderNode::Section { grid, .. } => Some(grid),
            _ => None,
        };
        for child in self.children() {
            element.children.push(child.to_dom_in(own_grid));
        }
        element.into()
    }
}

/// Render the subtree rooted at `id`
pub fn render(id: &BlockId, map: &BlockMap, options: &RenderOptions) -> Result<RenderNode, RenderError> {
    let Some(block) = map.get(id) else {
        return Err(RenderError::MissingRoot(id.clone()));
    };
    let mut path = Vec::new();
    render_block(block, map, options, &mut path)
}

fn render_block<'a>(
    block: &'a Block,
    map: &'a BlockMap,
    options: &RenderOptions,
    path: &mut Vec<&'a BlockId>,
) -> Result<RenderNode, RenderError> {
    let id = block.id();
    if path.contains(&id) {
        return Err(RenderError::Cycle(id.clone()));
    }

    let markers = options
        .edit_mode
        .then(|| EditMarkers::new(block.kind(), id));

    match block {
        Block::Button { content, .. } | Block::Text { content, .. } => {
            let kind = match block.kind() {
                BlockKind::Button => LeafKind::Button,
                _ => LeafKind::Text,
            };
            Ok(RenderNode::Leaf {
                id: id.clone(),
                kind,
                content: codec::serialize(content),
                markers,
            })
        }
        Block::Page { children, .. } => {
            path.push(id);
            let children = render_children(id, children, map, options, path)?;
            path.pop();
            Ok(RenderNode::Page {
                id: id.clone(),
                children,
            })
        }
        Block::Section {
            children, layout, ..
        } => {
            let mut grid = GridTemplate::from_layout(id, layout);
            let mut missing_cells = Vec::new();
            grid.retain_cells(|name| {
                let present = map.contains(&BlockId::from(name));
                if !present {
                    missing_cells.push(BlockId::from(name));
                }
                present
            });
            if let Some(missing) = missing_cells.first() {
                missing_block(id, missing, options.missing)?;
            }

            path.push(id);
            let children = render_children(id, children, map, options, path)?;
            path.pop();
            Ok(RenderNode::Section {
                id: id.clone(),
                grid,
                children,
                markers,
            })
        }
    }
}

fn render_children<'a>(
    parent: &BlockId,
    children: &'a [BlockId],
    map: &'a BlockMap,
    options: &RenderOptions,
    path: &mut Vec<&'a BlockId>,
) -> Result<Vec<RenderNode>, RenderError> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match map.get(child) {
            Some(block) => out.push(render_block(block, map, options, path)?),
            None => missing_block(parent, child, options.missing)?,
        }
    }
    Ok(out)
}

fn missing_block(
    parent: &BlockId,
    id: &BlockId,
    policy: MissingBlockPolicy,
) -> Result<(), RenderError> {
    match policy {
        MissingBlockPolicy::Fail => Err(RenderError::MissingBlock {
            parent: parent.clone(),
            id: id.clone(),
        }),
        MissingBlockPolicy::Skip => {
            log::warn!("skipping block `{id}` referenced by `{parent}`: not in the block map");
            Ok(())
        }
    }
}
