use dioxus::prelude::*;
use page_builder_engine::indicator::Rect;
use std::rc::Rc;

/// Client-space bounding box of a mounted element
pub async fn measure(mount: &Rc<MountedData>) -> Option<Rect> {
    match mount.get_client_rect().await {
        Ok(rect) => Some(Rect::from_origin_size(
            rect.origin.x,
            rect.origin.y,
            rect.size.width,
            rect.size.height,
        )),
        Err(e) => {
            log::debug!("could not measure element: {e:?}");
            None
        }
    }
}
