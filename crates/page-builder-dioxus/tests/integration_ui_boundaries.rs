//! Boundary between the engine and what the front-end mounts: a page
//! loaded from disk, its DOM mirror, the render registry and one edit
//! session, driven the way the UI drives them.

use page_builder_engine::dom::{ATTR_CONTENT, ATTR_ID, ATTR_TYPE, DomNode};
use page_builder_engine::render::{MissingBlockPolicy, RenderOptions, render};
use page_builder_engine::{
    BlockId, BlockStore, EditCmd, EditController, ElementNode, Mark, MarkSet, Node, PointerOrigin,
    RenderRegistry, RichText, TextRun, Visibility, codec, io, seed,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const OPTIONS: RenderOptions = RenderOptions {
    edit_mode: true,
    missing: MissingBlockPolicy::Fail,
};

fn load_seed_from_disk() -> (TempDir, BlockStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("page.json");
    std::fs::write(&path, serde_json::to_string(&seed::default_block_map().unwrap()).unwrap())
        .unwrap();
    let map = io::load_block_map(&path).unwrap();
    (temp_dir, BlockStore::new(map))
}

fn marked_ids(node: &DomNode, out: &mut Vec<String>) {
    if let Some(element) = node.as_element() {
        if let Some(id) = element.attr(ATTR_ID) {
            out.push(id.to_string());
        }
        for child in &element.children {
            marked_ids(child, out);
        }
    }
}

fn content_text(dom: &DomNode, id: &str) -> String {
    let leaf = dom.find_by_attr(ATTR_ID, id).unwrap();
    let content = leaf
        .children
        .iter()
        .filter_map(DomNode::as_element)
        .find(|child| child.attr(ATTR_CONTENT).is_some())
        .unwrap();
    content.children.iter().map(DomNode::text_content).collect()
}

#[test]
fn test_registry_matches_dom_markers() {
    let (_temp_dir, store) = load_seed_from_disk();
    let tree = render(&BlockId::page(), &store.read(), &OPTIONS).unwrap();
    let registry: RenderRegistry = RenderRegistry::from_tree(&tree);

    let mut dom_ids = Vec::new();
    marked_ids(&tree.to_dom(), &mut dom_ids);
    let section_ids: Vec<String> = registry.sections().map(|h| h.id.to_string()).collect();
    let leaf_ids: Vec<String> = registry.leaves().map(|h| h.id.to_string()).collect();

    assert_eq!(dom_ids, vec!["section0", "button0", "text0"]);
    assert_eq!(section_ids, vec!["section0"]);
    assert_eq!(leaf_ids, vec!["button0", "text0"]);

    let dom = tree.to_dom();
    let button = dom.find_by_attr(ATTR_ID, "button0").unwrap();
    assert_eq!(button.tag, "button");
    assert_eq!(button.attr(ATTR_TYPE), Some("ELEMENT-BUTTON"));
}

#[test]
fn test_edit_session_round_trips_through_disk() {
    let (temp_dir, mut store) = load_seed_from_disk();
    let tree = render(&BlockId::page(), &store.read(), &OPTIONS).unwrap();
    let mut registry: RenderRegistry = RenderRegistry::from_tree(&tree);
    let mut controller = EditController::new();
    let text0 = BlockId::from("text0");

    controller.open(&text0, &mut registry, &mut store).unwrap();
    assert_eq!(registry.visibility(&text0), Visibility::HiddenButPresent);

    // typing and toolbar presses happen inside the session
    controller.apply(&EditCmd::InsertText("!".to_string()));
    let toolbar_press = [PointerOrigin::Toolbar];
    assert_eq!(controller.pointer_down(&toolbar_press, &mut registry, &mut store), None);
    controller.toggle_mark(Mark::Italic);
    controller.apply(&EditCmd::InsertText("?".to_string()));
    assert_eq!(store.version(), 0);

    // a press on the other leaf commits
    let elsewhere = [
        PointerOrigin::Block("button0".into()),
        PointerOrigin::Block("section0".into()),
    ];
    assert_eq!(
        controller.pointer_down(&elsewhere, &mut registry, &mut store),
        Some(text0.clone())
    );
    assert_eq!(registry.visibility(&text0), Visibility::Visible);
    assert_eq!(controller.live_listeners(), 0);

    let tree = render(&BlockId::page(), &store.read(), &OPTIONS).unwrap();
    registry.sync(&tree);
    assert_eq!(content_text(&tree.to_dom(), "text0"), "I am not a button!?");
    assert_eq!(
        registry.content(&text0).map(<[DomNode]>::to_vec),
        Some(codec::serialize(
            store.read().get(&text0).unwrap().content().unwrap()
        ))
    );

    let saved = temp_dir.path().join("saved.json");
    std::fs::write(&saved, serde_json::to_string(store.read().as_ref()).unwrap()).unwrap();
    let reloaded = io::load_block_map(&saved).unwrap();
    assert_eq!(&reloaded, store.read().as_ref());
    let italic = MarkSet {
        italic: true,
        under_score: false,
    };
    assert_eq!(
        reloaded.get(&text0).unwrap().content(),
        Some(&RichText::from(vec![ElementNode::div(vec![
            Node::Text(TextRun::plain("I am not a button!")),
            Node::Text(TextRun::with_marks("?", italic)),
        ])]))
    );
}
