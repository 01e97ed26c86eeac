use crate::ui::geometry;
use dioxus::prelude::*;
use page_builder_config::{Config, MissingBlocks};
use page_builder_engine::indicator::{Guide, IndicatorSettings, Point, compute_guide};
use page_builder_engine::{
    BlockId, BlockMap, BlockStore, EditCmd, EditController, Mark, MissingBlockPolicy, Opened,
    PointerOrigin, RenderError, RenderNode, RenderOptions, RenderRegistry, render,
};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    pub render: RenderOptions,
    pub indicator: IndicatorSettings,
    pub indicator_color: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl UiSettings {
    pub fn from_config(config: &Config) -> Self {
        let missing = match config.missing_blocks {
            Some(MissingBlocks::Fail) => MissingBlockPolicy::Fail,
            Some(MissingBlocks::Skip) => MissingBlockPolicy::Skip,
            None => MissingBlockPolicy::for_build(),
        };
        Self {
            render: RenderOptions {
                edit_mode: config.edit_mode,
                missing,
            },
            indicator: IndicatorSettings {
                padding: config.indicator.padding,
                line_width: config.indicator.line_width,
            },
            indicator_color: config.indicator.color.clone(),
        }
    }
}

/// Orders pointer moves so that an asynchronous measurement started by an
/// older move, or before the pointer left every section, is not applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveGeneration(u64);

impl MoveGeneration {
    /// Start a new measurement; any earlier one becomes stale
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Drop whatever measurement is in flight
    pub fn invalidate(&mut self) {
        self.0 += 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0 == generation
    }
}

/// Shared builder state, provided as context by [`use_builder_state`]
#[derive(Clone, Copy)]
pub struct BuilderState {
    pub store: Signal<BlockStore>,
    pub controller: Signal<EditController>,
    pub registry: Signal<RenderRegistry<Rc<MountedData>>>,
    /// Origins collected while a mousedown bubbles up to the root
    pub hit_path: Signal<Vec<PointerOrigin>>,
    pub guide: Signal<Option<Guide>>,
    pub generation: Signal<MoveGeneration>,
    pub settings: Signal<UiSettings>,
}

/// Create the builder state for `map` and provide it to child components
pub fn use_builder_state(map: BlockMap, settings: UiSettings) -> BuilderState {
    let state = use_hook(move || BuilderState::new(map, settings));
    use_context_provider(|| state)
}

impl BuilderState {
    fn new(map: BlockMap, settings: UiSettings) -> Self {
        let store = BlockStore::new(map);
        let registry = match render(&BlockId::page(), &store.read(), &settings.render) {
            Ok(tree) => RenderRegistry::from_tree(&tree),
            Err(e) => {
                log::warn!("initial render failed: {e}");
                RenderRegistry::new()
            }
        };
        Self {
            store: Signal::new(store),
            controller: Signal::new(EditController::new()),
            registry: Signal::new(registry),
            hit_path: Signal::new(Vec::new()),
            guide: Signal::new(None),
            generation: Signal::new(MoveGeneration::default()),
            settings: Signal::new(settings),
        }
    }

    /// Render the page from the current store; subscribes the caller
    pub fn render_tree(&self) -> Result<RenderNode, RenderError> {
        let map = BlockStore::read(&self.store.read());
        render(&BlockId::page(), &map, &self.settings.read().render)
    }

    fn resync(mut self) {
        let map = BlockStore::read(&self.store.peek());
        match render(&BlockId::page(), &map, &self.settings.peek().render) {
            Ok(tree) => self.registry.write().sync(&tree),
            Err(e) => log::warn!("render after commit failed: {e}"),
        }
    }

    pub fn edit_mode(&self) -> bool {
        self.settings.peek().render.edit_mode
    }

    pub fn push_origin(mut self, origin: PointerOrigin) {
        self.hit_path.write().push(origin);
    }

    /// Root mousedown: everything below has pushed its origin by now
    pub fn pointer_down(mut self) {
        let path = std::mem::take(&mut *self.hit_path.write());
        let committed = self.controller.write().pointer_down(
            &path,
            &mut *self.registry.write(),
            &mut *self.store.write(),
        );
        if let Some(id) = committed {
            log::info!("committed edits to `{id}`");
            self.resync();
        }
    }

    pub fn open(mut self, id: &BlockId) {
        let opened = self.controller.write().open(
            id,
            &mut *self.registry.write(),
            &mut *self.store.write(),
        );
        match opened {
            Ok(Opened::Switched { committed }) => {
                log::info!("committed edits to `{committed}`");
                self.resync();
            }
            Ok(_) => {}
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn apply(mut self, cmd: EditCmd) -> bool {
        self.controller.write().apply(&cmd)
    }

    pub fn toggle_mark(mut self, mark: Mark) -> bool {
        self.controller.write().toggle_mark(mark)
    }

    pub fn attach_mount(mut self, id: &BlockId, mount: Rc<MountedData>) {
        self.registry.write().attach_mount(id, mount);
    }

    /// Pointer moved outside every section
    pub fn clear_guide(mut self) {
        self.generation.write().invalidate();
        if self.guide.peek().is_some() {
            self.guide.set(None);
        }
    }

    /// Pointer moved inside `section`: measure the section and every leaf,
    /// then place the guide unless a newer move came in meanwhile
    pub fn track_pointer(mut self, section: &BlockId, pointer: Point) {
        let generation = self.generation.write().begin();

        let (section_mount, leaves) = {
            let registry = self.registry.peek();
            let section_mount = registry.get(section).and_then(|h| h.mount.clone());
            let leaves: Vec<Rc<MountedData>> =
                registry.leaves().filter_map(|h| h.mount.clone()).collect();
            (section_mount, leaves)
        };
        let Some(section_mount) = section_mount else {
            self.guide.set(None);
            return;
        };

        let settings = self.settings.peek().indicator;
        let latest = self.generation;
        let mut guide = self.guide;
        spawn(async move {
            let Some(section_rect) = geometry::measure(&section_mount).await else {
                return;
            };
            let mut rects = Vec::with_capacity(leaves.len());
            for leaf in &leaves {
                if let Some(rect) = geometry::measure(leaf).await {
                    rects.push(rect);
                }
            }
            if !latest.peek().is_current(generation) {
                return;
            }
            let next = compute_guide(pointer, section_rect, &rects, &settings);
            if *guide.peek() != next {
                guide.set(next);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_measurement_from_older_move_is_dropped() {
        let mut generation = MoveGeneration::default();

        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_leaving_sections_invalidates_in_flight_measurement() {
        let mut generation = MoveGeneration::default();
        let in_flight = generation.begin();

        generation.invalidate();

        assert!(!generation.is_current(in_flight));
        let next = generation.begin();
        assert!(generation.is_current(next));
    }

    #[test]
    fn test_settings_follow_config() {
        let config = Config {
            edit_mode: false,
            missing_blocks: Some(MissingBlocks::Skip),
            ..Config::default()
        };

        let settings = UiSettings::from_config(&config);

        assert!(!settings.render.edit_mode);
        assert_eq!(settings.render.missing, MissingBlockPolicy::Skip);
        assert_eq!(settings.indicator, IndicatorSettings::default());
        assert_eq!(settings.indicator_color, "blue");
    }
}
