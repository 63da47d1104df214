//! # Placement Engine
//!
//! Grid snapping and drop-zone checks.
//!
//! Drop zones come from the canvas UI and are not part of the document.
//! A zone accepts a list of component types (or the `*` wildcard) and may
//! cap how many elements it holds. Capacity is geometric: an element counts
//! toward a zone when its position lies inside the zone's bounds.

use crate::{ElementId, Position, Tree};
use pagesmith_registry::{Registry, ANY_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Snap grid. A non-positive size behaves as disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: f64,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            enabled: true,
        }
    }
}

/// Axis-aligned rectangle, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Region of the canvas with acceptance and capacity rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropZone {
    pub id: String,
    pub accepts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_components: Option<usize>,
    pub bounds: Rect,
}

impl DropZone {
    pub fn new(id: impl Into<String>, accepts: &[&str], bounds: Rect) -> Self {
        Self {
            id: id.into(),
            accepts: accepts.iter().map(|s| s.to_string()).collect(),
            max_components: None,
            bounds,
        }
    }

    pub fn with_capacity(mut self, max_components: usize) -> Self {
        self.max_components = Some(max_components);
        self
    }

    pub fn accepts_type(&self, type_id: &str) -> bool {
        self.accepts.iter().any(|t| t == type_id || t == ANY_TYPE)
    }
}

/// Why a placement was rejected. Rejections are normal outcomes: the
/// attempted change simply does not happen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("Unknown drop zone: {0}")]
    UnknownZone(String),

    #[error("Drop zone {zone} does not accept {type_id}")]
    TypeNotAccepted { zone: String, type_id: String },

    #[error("Drop zone {zone} is full ({max} components)")]
    CapacityReached { zone: String, max: usize },

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ElementId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Element {0} is locked")]
    Locked(ElementId),

    #[error("{type_id} elements cannot contain children")]
    ChildrenNotAccepted { type_id: String },
}

/// Grid arithmetic plus the registered drop zones
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    grid: GridConfig,
    zones: Vec<DropZone>,
}

impl PlacementEngine {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            zones: Vec::new(),
        }
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
    }

    /// Round each coordinate to the nearest grid multiple
    pub fn snap_to_grid(&self, x: f64, y: f64) -> (f64, f64) {
        if !self.grid.enabled || self.grid.size <= 0.0 || !self.grid.size.is_finite() {
            return (x, y);
        }
        (snap(x, self.grid.size), snap(y, self.grid.size))
    }

    /// Snap a position's x/y; z is left alone
    pub fn snap_position(&self, position: Position) -> Position {
        let (x, y) = self.snap_to_grid(position.x, position.y);
        Position { x, y, z: position.z }
    }

    /// Replace all drop zones
    pub fn set_drop_zones(&mut self, zones: Vec<DropZone>) {
        self.zones = zones;
    }

    /// Add a zone, or replace the one with the same id in place
    pub fn upsert_drop_zone(&mut self, zone: DropZone) {
        match self.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    pub fn remove_drop_zone(&mut self, id: &str) -> bool {
        let before = self.zones.len();
        self.zones.retain(|z| z.id != id);
        self.zones.len() != before
    }

    pub fn drop_zone(&self, id: &str) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn drop_zones(&self) -> &[DropZone] {
        &self.zones
    }

    /// Elements whose position lies inside the zone, ignoring `exclude`
    pub fn contained_count(&self, tree: &Tree, zone: &DropZone, exclude: &[ElementId]) -> usize {
        tree.nodes()
            .filter(|n| !exclude.contains(&n.id))
            .filter(|n| zone.bounds.contains(n.position.x, n.position.y))
            .count()
    }

    /// Whether an element of `type_id` may be dropped into `zone_id`
    pub fn is_valid_drop_target(&self, tree: &Tree, zone_id: &str, type_id: &str) -> bool {
        self.check_drop_target(tree, zone_id, type_id, &[], 1).is_ok()
    }

    /// Detailed drop check.
    ///
    /// `incoming` elements are about to enter the zone; `exclude` lists
    /// elements already counted among them (the ones being dragged).
    pub fn check_drop_target(
        &self,
        tree: &Tree,
        zone_id: &str,
        type_id: &str,
        exclude: &[ElementId],
        incoming: usize,
    ) -> Result<(), PlacementError> {
        let zone = self
            .drop_zone(zone_id)
            .ok_or_else(|| PlacementError::UnknownZone(zone_id.to_string()))?;

        if !zone.accepts_type(type_id) {
            return Err(PlacementError::TypeNotAccepted {
                zone: zone.id.clone(),
                type_id: type_id.to_string(),
            });
        }

        if let Some(max) = zone.max_components {
            let contained = self.contained_count(tree, zone, exclude);
            if contained + incoming > max {
                debug!(zone = %zone.id, contained, incoming, max, "Drop zone at capacity");
                return Err(PlacementError::CapacityReached {
                    zone: zone.id.clone(),
                    max,
                });
            }
        }

        Ok(())
    }

    /// Ids of every zone accepting `type_id`, in registration order
    pub fn valid_drop_zones(&self, type_id: &str) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| z.accepts_type(type_id))
            .map(|z| z.id.as_str())
            .collect()
    }

    /// Check that `id` may be reparented under `new_parent` (`None` = root).
    ///
    /// A drop zone registered under the parent's id also gates the move.
    pub fn validate_move(
        &self,
        tree: &Tree,
        registry: &Registry,
        id: &ElementId,
        new_parent: Option<&ElementId>,
    ) -> Result<(), PlacementError> {
        let node = tree
            .get(id.as_str())
            .ok_or_else(|| PlacementError::ElementNotFound(id.clone()))?;

        if node.constraints.locked {
            return Err(PlacementError::Locked(id.clone()));
        }

        let Some(parent_id) = new_parent else {
            return Ok(());
        };

        let parent = tree
            .get(parent_id.as_str())
            .ok_or_else(|| PlacementError::ParentNotFound(parent_id.clone()))?;

        if tree.is_ancestor_or_self(id.as_str(), parent_id.as_str()) {
            return Err(PlacementError::CycleDetected);
        }

        let accepts_children = registry
            .get(&parent.type_id)
            .is_some_and(|def| def.accepts_children);
        if !accepts_children {
            return Err(PlacementError::ChildrenNotAccepted {
                type_id: parent.type_id.clone(),
            });
        }

        if self.drop_zone(parent_id.as_str()).is_some() {
            self.check_drop_target(
                tree,
                parent_id.as_str(),
                &node.type_id,
                std::slice::from_ref(id),
                1,
            )?;
        }

        Ok(())
    }
}

fn snap(value: f64, size: f64) -> f64 {
    let snapped = (value / size).round() * size;
    // Avoid handing out -0.0
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    fn engine() -> PlacementEngine {
        PlacementEngine::new(GridConfig {
            size: 20.0,
            enabled: true,
        })
    }

    #[test]
    fn test_snap_rounds_to_nearest_multiple() {
        let engine = engine();
        assert_eq!(engine.snap_to_grid(73.0, 47.0), (80.0, 40.0));
        assert_eq!(engine.snap_to_grid(40.0, 40.0), (40.0, 40.0));
        assert_eq!(engine.snap_to_grid(-9.0, 9.9), (0.0, 0.0));
        assert_eq!(engine.snap_to_grid(-31.0, 10.0), (-40.0, 20.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        let engine = PlacementEngine::new(GridConfig {
            size: 7.5,
            enabled: true,
        });

        let mut v = -500.0;
        while v < 500.0 {
            let once = engine.snap_to_grid(v, v * 0.37);
            let twice = engine.snap_to_grid(once.0, once.1);
            assert_eq!(once, twice, "not idempotent at {}", v);
            v += 3.3;
        }
    }

    #[test]
    fn test_disabled_grid_passes_through() {
        let engine = PlacementEngine::new(GridConfig {
            size: 20.0,
            enabled: false,
        });
        assert_eq!(engine.snap_to_grid(73.0, 47.0), (73.0, 47.0));

        let zero = PlacementEngine::new(GridConfig {
            size: 0.0,
            enabled: true,
        });
        assert_eq!(zero.snap_to_grid(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn test_drop_validity_with_capacity() {
        let mut engine = engine();
        engine.upsert_drop_zone(
            DropZone::new("toolbar", &["button"], Rect::new(0.0, 0.0, 200.0, 50.0)).with_capacity(2),
        );

        let mut tree = Tree::from_elements(&[Element::new("a", "button").at(10.0, 10.0)]).unwrap();
        assert!(engine.is_valid_drop_target(&tree, "toolbar", "button"));
        assert!(!engine.is_valid_drop_target(&tree, "toolbar", "image"));

        tree = Tree::from_elements(&[
            Element::new("a", "button").at(10.0, 10.0),
            Element::new("b", "button").at(60.0, 10.0),
            Element::new("c", "button").at(400.0, 10.0),
        ])
        .unwrap();
        assert!(!engine.is_valid_drop_target(&tree, "toolbar", "button"));
        assert!(!engine.is_valid_drop_target(&tree, "toolbar", "image"));
        assert!(matches!(
            engine.check_drop_target(&tree, "toolbar", "button", &[], 1),
            Err(PlacementError::CapacityReached { max: 2, .. })
        ));

        // Moving one of the contained buttons within the zone is fine
        assert!(engine
            .check_drop_target(&tree, "toolbar", "button", &[ElementId::from("a")], 1)
            .is_ok());
    }

    #[test]
    fn test_unknown_zone() {
        let engine = engine();
        assert!(!engine.is_valid_drop_target(&Tree::new(), "nope", "button"));
    }

    #[test]
    fn test_wildcard_and_valid_zones() {
        let mut engine = engine();
        engine.set_drop_zones(vec![
            DropZone::new("header", &["heading", "link"], Rect::new(0.0, 0.0, 100.0, 100.0)),
            DropZone::new("body", &["*"], Rect::new(0.0, 100.0, 100.0, 100.0)),
            DropZone::new("footer", &["link"], Rect::new(0.0, 200.0, 100.0, 100.0)),
        ]);

        assert_eq!(engine.valid_drop_zones("link"), vec!["header", "body", "footer"]);
        assert_eq!(engine.valid_drop_zones("image"), vec!["body"]);
        assert!(engine.is_valid_drop_target(&Tree::new(), "body", "anything"));

        assert!(engine.remove_drop_zone("body"));
        assert!(!engine.remove_drop_zone("body"));
        assert!(engine.valid_drop_zones("image").is_empty());
    }

    #[test]
    fn test_validate_move() {
        let registry = Registry::builtin();
        let mut locked = Element::new("l", "button");
        locked.constraints.locked = true;
        let tree = Tree::from_elements(&[
            Element::new("card", "card").with_child(Element::new("inner", "container")),
            Element::new("btn", "button"),
            locked,
        ])
        .unwrap();
        let engine = engine();
        let id = |s: &str| ElementId::from(s);

        assert!(engine.validate_move(&tree, &registry, &id("btn"), Some(&id("inner"))).is_ok());
        assert!(engine.validate_move(&tree, &registry, &id("inner"), None).is_ok());
        assert_eq!(
            engine.validate_move(&tree, &registry, &id("card"), Some(&id("inner"))),
            Err(PlacementError::CycleDetected)
        );
        assert_eq!(
            engine.validate_move(&tree, &registry, &id("card"), Some(&id("btn"))),
            Err(PlacementError::ChildrenNotAccepted {
                type_id: "button".to_string()
            })
        );
        assert_eq!(
            engine.validate_move(&tree, &registry, &id("l"), None),
            Err(PlacementError::Locked(id("l")))
        );
        assert_eq!(
            engine.validate_move(&tree, &registry, &id("ghost"), None),
            Err(PlacementError::ElementNotFound(id("ghost")))
        );
    }

    #[test]
    fn test_zone_registered_on_parent_gates_move() {
        let registry = Registry::builtin();
        let tree = Tree::from_elements(&[
            Element::new("nav", "container"),
            Element::new("img", "image"),
        ])
        .unwrap();

        let mut engine = engine();
        engine.upsert_drop_zone(DropZone::new("nav", &["link", "button"], Rect::default()));

        assert!(matches!(
            engine.validate_move(&tree, &registry, &ElementId::from("img"), Some(&ElementId::from("nav"))),
            Err(PlacementError::TypeNotAccepted { .. })
        ));
    }
}
