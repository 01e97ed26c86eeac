//! Built-in starting page.

use crate::models::BlockMap;
use anyhow::Context;

const DEFAULT_PAGE: &str = include_str!("../seed/default_page.json");

/// One section holding a text block (left half) and a button (right half)
pub fn default_block_map() -> anyhow::Result<BlockMap> {
    let map: BlockMap =
        serde_json::from_str(DEFAULT_PAGE).context("failed to parse built-in page")?;
    map.validate().context("built-in page is invalid")?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockId, BlockKind, RichText};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_page_shape() {
        let map = default_block_map().unwrap();
        assert_eq!(map.len(), 4);

        let section = map.get(&"section0".into()).unwrap();
        assert_eq!(section.children(), &[BlockId::from("button0"), BlockId::from("text0")]);
        assert_eq!(section.layout().unwrap()[0].len(), 12);

        let text = map.get(&"text0".into()).unwrap();
        assert_eq!(text.kind(), BlockKind::Text);
        assert_eq!(text.content(), Some(&RichText::paragraph("I am not a button")));
    }
}
