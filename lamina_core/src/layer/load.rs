// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building the arena from a document page.

use super::id::LayerId;
use super::kind::LayerKind;
use super::store::LayerStore;
use crate::document::{LayerModel, PageModel};

impl LayerStore {
    /// Flattens `page` into the store and returns the handle of its root
    /// layer.
    ///
    /// The page root has an empty frame, so top-level layers are positioned
    /// in page coordinates. Call [`evaluate`](Self::evaluate) before reading
    /// world transforms.
    pub fn load_page(&mut self, page: &PageModel) -> LayerId {
        let root = self.create_layer(LayerKind::Page);
        self.set_name(root, page.name.as_str());
        for model in &page.layers {
            let child = self.insert_model(model);
            self.add_child(root, child);
        }
        log::debug!(
            "loaded page {:?}: {} layers",
            page.name,
            self.layer_count()
        );
        root
    }

    /// Destroys a page previously returned by [`load_page`](Self::load_page).
    pub fn unload_page(&mut self, root: LayerId) {
        self.destroy_subtree(root);
    }

    fn insert_model(&mut self, model: &LayerModel) -> LayerId {
        let id = self.create_layer(model.kind.clone());
        self.set_name(id, model.name.as_str());
        self.set_flags(id, model.flags);
        self.set_rotation(id, model.rotation);
        self.set_frame(id, model.frame);
        self.set_style(id, model.style.clone());
        self.set_boolean_op(id, model.boolean_operation);
        for child_model in &model.children {
            let child = self.insert_model(child_model);
            self.add_child(id, child);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use crate::document::{LayerModel, PageModel};
    use crate::layer::{Background, LayerKind, LayerStore};

    #[test]
    fn page_tree_is_flattened_in_order() {
        let page = PageModel {
            name: "Page 1".into(),
            layers: vec![
                LayerModel::new(
                    "Board",
                    LayerKind::Artboard(Background::default()),
                    Rect::new(0.0, 0.0, 100.0, 100.0),
                )
                .with_child(LayerModel::new(
                    "Inner",
                    LayerKind::Group,
                    Rect::new(10.0, 10.0, 20.0, 20.0),
                )),
                LayerModel::new("Loose", LayerKind::Group, Rect::new(200.0, 0.0, 210.0, 5.0)),
            ],
        };

        let mut store = LayerStore::new();
        let root = store.load_page(&page);
        let _ = store.evaluate();

        assert_eq!(store.kind(root), &LayerKind::Page);
        assert_eq!(store.name(root), "Page 1");
        let top: Vec<_> = store.children(root).map(|id| store.name(id).to_owned()).collect();
        assert_eq!(top, vec!["Board", "Loose"]);

        let board = store.children(root).next().expect("board");
        let inner = store.children(board).next().expect("inner");
        assert_eq!(store.world_bounds(inner), Rect::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn unload_frees_all_layers() {
        let page = PageModel {
            name: "P".into(),
            layers: vec![LayerModel::new(
                "G",
                LayerKind::Group,
                Rect::new(0.0, 0.0, 1.0, 1.0),
            )],
        };
        let mut store = LayerStore::new();
        let root = store.load_page(&page);
        assert_eq!(store.layer_count(), 2);
        store.unload_page(root);
        assert_eq!(store.layer_count(), 0);
    }
}
