// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a page-space point to a layer.
//!
//! Two modes mirror how a design tool picks layers:
//!
//! - [`HitMode::Shallow`] (plain click) picks a top-level layer, or a direct
//!   child of the artboard or symbol master under the pointer.
//! - [`HitMode::Deep`] (Ctrl/Cmd click) drills down to the innermost layer,
//!   but treats symbol instances and shape groups as opaque units.
//!
//! Containment uses the world-space bounding box of a layer's frame, edges
//! included, so the store must be evaluated first.

use kurbo::Point;

use crate::geometry::contains_inclusive;
use crate::layer::{LayerId, LayerKind, LayerStore};

/// How far into the tree a hit test descends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitMode {
    /// Top-level layers and board children.
    #[default]
    Shallow,
    /// The innermost layer, stopping at symbol instances and shape groups.
    Deep,
}

/// Returns the topmost layer of `page` at `point` (page coordinates).
///
/// Returns `None` when nothing selectable is under the point.
#[must_use]
pub fn hit_test(store: &LayerStore, page: LayerId, point: Point, mode: HitMode) -> Option<LayerId> {
    match mode {
        HitMode::Shallow => hit_shallow(store, page, point),
        HitMode::Deep => hit_deep(store, page, point),
    }
}

fn hit_shallow(store: &LayerStore, page: LayerId, point: Point) -> Option<LayerId> {
    for layer in store.children(page).rev() {
        if !is_candidate(store, layer, point) {
            continue;
        }
        if !store.kind(layer).is_board() {
            return Some(layer);
        }
        // Boards fall through when no child is under the point.
        let hit = store
            .children(layer)
            .rev()
            .find(|&child| is_candidate(store, child, point));
        if hit.is_some() {
            return hit;
        }
    }
    None
}

fn hit_deep(store: &LayerStore, page: LayerId, point: Point) -> Option<LayerId> {
    let mut current = page;
    loop {
        let next = store
            .children(current)
            .rev()
            .find(|&child| is_candidate(store, child, point));
        match next {
            Some(child) => {
                if matches!(
                    store.kind(child),
                    LayerKind::SymbolInstance { .. } | LayerKind::ShapeGroup
                ) {
                    return Some(child);
                }
                current = child;
            }
            None => {
                let kind = store.kind(current);
                return (!kind.is_board() && !matches!(kind, LayerKind::Page)).then_some(current);
            }
        }
    }
}

fn is_candidate(store: &LayerStore, id: LayerId, point: Point) -> bool {
    store.flags(id).is_interactive() && contains_at(store, id, point)
}

fn contains_at(store: &LayerStore, id: LayerId, point: Point) -> bool {
    contains_inclusive(store.world_bounds(id), point)
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::document::{LayerModel, PageModel};
    use crate::layer::{Background, LayerFlags};

    fn board(name: &str, frame: Rect) -> LayerModel {
        LayerModel::new(name, LayerKind::Artboard(Background::default()), frame)
    }

    fn master(name: &str, frame: Rect) -> LayerModel {
        LayerModel::new(name, LayerKind::SymbolMaster(Background::default()), frame)
    }

    fn group(name: &str, frame: Rect) -> LayerModel {
        LayerModel::new(name, LayerKind::Group, frame)
    }

    fn load(layers: Vec<LayerModel>) -> (LayerStore, LayerId) {
        let mut store = LayerStore::new();
        let page = store.load_page(&PageModel {
            name: "Page".into(),
            layers,
        });
        let _ = store.evaluate();
        (store, page)
    }

    fn named(store: &LayerStore, id: Option<LayerId>) -> Option<String> {
        id.map(|id| store.name(id).to_owned())
    }

    #[test]
    fn shallow_picks_topmost_sibling() {
        let (store, page) = load(vec![
            group("bottom", Rect::new(0.0, 0.0, 100.0, 100.0)),
            group("top", Rect::new(50.0, 50.0, 150.0, 150.0)),
        ]);
        let hit = hit_test(&store, page, Point::new(75.0, 75.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("top"));
        let hit = hit_test(&store, page, Point::new(10.0, 10.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("bottom"));
    }

    #[test]
    fn shallow_enters_artboards_only_one_level() {
        let (store, page) = load(vec![
            board("board", Rect::new(0.0, 0.0, 400.0, 400.0)).with_child(
                group("outer", Rect::new(10.0, 10.0, 110.0, 110.0))
                    .with_child(group("inner", Rect::new(0.0, 0.0, 50.0, 50.0))),
            ),
        ]);
        let hit = hit_test(&store, page, Point::new(20.0, 20.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("outer"));
    }

    #[test]
    fn shallow_picks_topmost_sibling_inside_artboard() {
        let (store, page) = load(vec![
            board("board", Rect::new(0.0, 0.0, 800.0, 600.0))
                .with_child(group("first", Rect::new(100.0, 100.0, 300.0, 250.0)))
                .with_child(group("second", Rect::new(200.0, 150.0, 400.0, 300.0))),
        ]);
        let hit = hit_test(&store, page, Point::new(250.0, 200.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("second"));
        let hit = hit_test(&store, page, Point::new(120.0, 120.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("first"));
    }

    #[test]
    fn shallow_skips_hidden_symbol_master() {
        let hidden = LayerFlags {
            visible: false,
            ..LayerFlags::DEFAULT
        };
        let (store, page) = load(vec![
            master("master", Rect::new(0.0, 0.0, 200.0, 200.0))
                .with_flags(hidden)
                .with_child(group("child", Rect::new(10.0, 10.0, 60.0, 60.0))),
        ]);
        assert!(hit_test(&store, page, Point::new(20.0, 20.0), HitMode::Shallow).is_none());
    }

    #[test]
    fn shallow_enters_symbol_master_under_the_point() {
        let (store, page) = load(vec![
            group("behind", Rect::new(0.0, 0.0, 500.0, 500.0)),
            master("master", Rect::new(0.0, 0.0, 200.0, 200.0))
                .with_child(group("child", Rect::new(10.0, 10.0, 60.0, 60.0))),
        ]);
        let hit = hit_test(&store, page, Point::new(20.0, 20.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("child"));
        // Empty master area falls through to the layer behind.
        let hit = hit_test(&store, page, Point::new(150.0, 150.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("behind"));
        // Outside the master entirely.
        let hit = hit_test(&store, page, Point::new(300.0, 300.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("behind"));
    }

    #[test]
    fn shallow_never_returns_an_empty_artboard_area() {
        let (store, page) = load(vec![board("board", Rect::new(0.0, 0.0, 400.0, 400.0))]);
        assert!(hit_test(&store, page, Point::new(200.0, 200.0), HitMode::Shallow).is_none());
    }

    #[test]
    fn hidden_and_locked_layers_are_skipped() {
        let hidden = LayerFlags {
            visible: false,
            ..LayerFlags::DEFAULT
        };
        let locked = LayerFlags {
            locked: true,
            ..LayerFlags::DEFAULT
        };
        let (store, page) = load(vec![
            group("base", Rect::new(0.0, 0.0, 100.0, 100.0)),
            group("locked", Rect::new(0.0, 0.0, 100.0, 100.0)).with_flags(locked),
            group("hidden", Rect::new(0.0, 0.0, 100.0, 100.0)).with_flags(hidden),
        ]);
        let hit = hit_test(&store, page, Point::new(50.0, 50.0), HitMode::Shallow);
        assert_eq!(named(&store, hit).as_deref(), Some("base"));
    }

    #[test]
    fn deep_stops_at_symbol_instance() {
        let instance = LayerModel::new(
            "instance",
            LayerKind::SymbolInstance {
                symbol_id: "button".into(),
            },
            Rect::new(10.0, 10.0, 110.0, 60.0),
        )
        .with_child(group("label", Rect::new(0.0, 0.0, 100.0, 50.0)));
        let (store, page) = load(vec![
            board("board", Rect::new(0.0, 0.0, 400.0, 400.0))
                .with_child(group("wrapper", Rect::new(0.0, 0.0, 200.0, 200.0)).with_child(instance)),
        ]);
        let hit = hit_test(&store, page, Point::new(50.0, 30.0), HitMode::Deep);
        assert_eq!(named(&store, hit).as_deref(), Some("instance"));
    }

    #[test]
    fn deep_returns_innermost_leaf() {
        let (store, page) = load(vec![
            board("board", Rect::new(0.0, 0.0, 400.0, 400.0)).with_child(
                group("outer", Rect::new(10.0, 10.0, 110.0, 110.0))
                    .with_child(group("inner", Rect::new(0.0, 0.0, 50.0, 50.0))),
            ),
        ]);
        let hit = hit_test(&store, page, Point::new(20.0, 20.0), HitMode::Deep);
        assert_eq!(named(&store, hit).as_deref(), Some("inner"));
        // Inside `outer` but outside `inner`: the group itself.
        let hit = hit_test(&store, page, Point::new(100.0, 100.0), HitMode::Deep);
        assert_eq!(named(&store, hit).as_deref(), Some("outer"));
    }

    #[test]
    fn deep_never_returns_artboard_or_page() {
        let (store, page) = load(vec![board("board", Rect::new(0.0, 0.0, 400.0, 400.0))]);
        assert!(hit_test(&store, page, Point::new(5.0, 5.0), HitMode::Deep).is_none());
        assert!(hit_test(&store, page, Point::new(900.0, 5.0), HitMode::Deep).is_none());
    }

    #[test]
    fn deep_never_returns_symbol_master() {
        let (store, page) = load(vec![
            master("master", Rect::new(0.0, 0.0, 200.0, 200.0))
                .with_child(group("child", Rect::new(10.0, 10.0, 60.0, 60.0))),
        ]);
        assert!(hit_test(&store, page, Point::new(150.0, 150.0), HitMode::Deep).is_none());
        let hit = hit_test(&store, page, Point::new(20.0, 20.0), HitMode::Deep);
        assert_eq!(named(&store, hit).as_deref(), Some("child"));
    }

    #[test]
    fn containment_follows_world_transform() {
        let (store, page) = load(vec![
            group("parent", Rect::new(100.0, 100.0, 200.0, 200.0))
                .with_child(group("child", Rect::new(10.0, 10.0, 20.0, 20.0))),
        ]);
        let hit = hit_test(&store, page, Point::new(115.0, 115.0), HitMode::Deep);
        assert_eq!(named(&store, hit).as_deref(), Some("child"));
        let hit = hit_test(&store, page, Point::new(15.0, 15.0), HitMode::Deep);
        assert!(hit.is_none());
    }
}
