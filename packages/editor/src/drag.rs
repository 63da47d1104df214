//! # Drag Protocol
//!
//! ```text
//! begin_drag ─→ drag_to* ─→ end_drag ──→ Committed | Rejected
//!                    └────→ cancel_drag
//! ```
//!
//! A [`DragSession`] only holds proposal state. Nothing touches the tree
//! until `end_drag` validates the candidate and the store commits every
//! moved position as one history entry.

use crate::{ElementId, PlacementEngine, PlacementError, Position, Tree};
use serde::{Deserialize, Serialize};

/// Where the dragged elements would land if dropped now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragProposal {
    /// Snapped candidate position of the primary element
    pub position: Position,
    pub hovered_zone: Option<String>,
    pub valid: bool,
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Positions committed; lists the elements whose position changed
    Committed { moved: Vec<ElementId> },
    /// Nothing changed
    Rejected(PlacementError),
    /// `end_drag` without a drag in progress
    NotDragging,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    primary: ElementId,
    /// Start positions, primary first
    origins: Vec<(ElementId, Position)>,
    start_pointer: (f64, f64),
    candidate: Position,
    hovered_zone: Option<String>,
}

impl DragSession {
    /// Start dragging `primary` along with the other `dragged` elements.
    ///
    /// Every dragged element must exist and be unlocked.
    pub fn begin(
        tree: &Tree,
        primary: &ElementId,
        dragged: &[ElementId],
        pointer: (f64, f64),
    ) -> Result<Self, PlacementError> {
        let mut origins = Vec::with_capacity(dragged.len() + 1);
        let ids = std::iter::once(primary).chain(dragged.iter().filter(|id| *id != primary));

        for id in ids {
            let node = tree
                .get(id.as_str())
                .ok_or_else(|| PlacementError::ElementNotFound(id.clone()))?;
            if node.constraints.locked {
                return Err(PlacementError::Locked(id.clone()));
            }
            origins.push((id.clone(), node.position));
        }

        let candidate = origins[0].1;
        Ok(Self {
            primary: primary.clone(),
            origins,
            start_pointer: pointer,
            candidate,
            hovered_zone: None,
        })
    }

    pub fn primary(&self) -> &ElementId {
        &self.primary
    }

    pub fn dragged(&self) -> impl Iterator<Item = &ElementId> {
        self.origins.iter().map(|(id, _)| id)
    }

    pub fn hovered_zone(&self) -> Option<&str> {
        self.hovered_zone.as_deref()
    }

    /// Recompute the snapped candidate for a new pointer position
    pub fn update(
        &mut self,
        tree: &Tree,
        engine: &PlacementEngine,
        pointer: (f64, f64),
        hovered_zone: Option<String>,
    ) -> DragProposal {
        let dx = pointer.0 - self.start_pointer.0;
        let dy = pointer.1 - self.start_pointer.1;
        self.candidate = engine.snap_position(self.origins[0].1.offset(dx, dy));
        self.hovered_zone = hovered_zone;

        DragProposal {
            position: self.candidate,
            hovered_zone: self.hovered_zone.clone(),
            valid: self.validate(tree, engine).is_ok(),
        }
    }

    /// Check every dragged element against the hovered zone. No zone means
    /// the free canvas, which takes anything.
    pub fn validate(&self, tree: &Tree, engine: &PlacementEngine) -> Result<(), PlacementError> {
        let Some(zone) = &self.hovered_zone else {
            return Ok(());
        };

        let dragged: Vec<ElementId> = self.dragged().cloned().collect();
        for id in &dragged {
            let node = tree
                .get(id.as_str())
                .ok_or_else(|| PlacementError::ElementNotFound(id.clone()))?;
            engine.check_drop_target(tree, zone, &node.type_id, &dragged, dragged.len())?;
        }
        Ok(())
    }

    /// Final position of every dragged element; relative offsets to the
    /// primary element are preserved.
    pub fn targets(&self) -> Vec<(ElementId, Position)> {
        let origin = self.origins[0].1;
        let dx = self.candidate.x - origin.x;
        let dy = self.candidate.y - origin.y;

        self.origins
            .iter()
            .map(|(id, start)| (id.clone(), start.offset(dx, dy)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DropZone, Element, GridConfig, Rect};

    fn tree() -> Tree {
        let mut locked = Element::new("locked", "image").at(0.0, 0.0);
        locked.constraints.locked = true;
        Tree::from_elements(&[
            Element::new("a", "button").at(40.0, 40.0),
            Element::new("b", "button").at(100.0, 40.0),
            locked,
        ])
        .unwrap()
    }

    #[test]
    fn test_candidate_is_snapped() {
        let tree = tree();
        let engine = PlacementEngine::new(GridConfig::default());
        let mut session = DragSession::begin(&tree, &ElementId::from("a"), &[], (0.0, 0.0)).unwrap();

        let proposal = session.update(&tree, &engine, (33.0, 7.0), None);
        assert_eq!(proposal.position, Position::new(80.0, 40.0));
        assert!(proposal.valid);
    }

    #[test]
    fn test_relative_offsets_preserved() {
        let tree = tree();
        let engine = PlacementEngine::new(GridConfig::default());
        let mut session = DragSession::begin(
            &tree,
            &ElementId::from("a"),
            &[ElementId::from("a"), ElementId::from("b")],
            (0.0, 0.0),
        )
        .unwrap();
        session.update(&tree, &engine, (21.0, 19.0), None);

        assert_eq!(
            session.targets(),
            vec![
                (ElementId::from("a"), Position::new(60.0, 60.0)),
                (ElementId::from("b"), Position::new(120.0, 60.0)),
            ]
        );
    }

    #[test]
    fn test_locked_elements_not_draggable() {
        let tree = tree();
        assert_eq!(
            DragSession::begin(&tree, &ElementId::from("locked"), &[], (0.0, 0.0)).unwrap_err(),
            PlacementError::Locked(ElementId::from("locked"))
        );
    }

    #[test]
    fn test_invalid_zone_marks_proposal() {
        let tree = tree();
        let mut engine = PlacementEngine::new(GridConfig::default());
        engine.upsert_drop_zone(DropZone::new("gallery", &["image"], Rect::new(0.0, 0.0, 500.0, 500.0)));

        let mut session = DragSession::begin(&tree, &ElementId::from("a"), &[], (0.0, 0.0)).unwrap();
        let proposal = session.update(&tree, &engine, (5.0, 5.0), Some("gallery".into()));
        assert!(!proposal.valid);
        assert!(matches!(
            session.validate(&tree, &engine),
            Err(PlacementError::TypeNotAccepted { .. })
        ));
    }
}
