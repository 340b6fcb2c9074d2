//! Box collider component and its per-edge contact state.
//!
//! A [`BoxCollider`] is passive data as far as physics is concerned. The
//! collision pass writes [`EdgeContact`]s and the active edges once per tick;
//! [`RigidBody`](super::RigidBody) only ever reads them.

use crate::math::{Edges, Vec2};

/// One side of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    fn slot(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }
}

/// Collision state of one edge for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeContact {
    pub colliding: bool,
    /// The surface touched does not move.
    pub is_static: bool,
    /// The surface touched blocks motion (not a trigger overlap).
    pub solid: bool,
    /// World-space coordinate of the touched surface: a y value for
    /// top/bottom contacts, an x value for left/right.
    pub coordinate: f32,
}

impl EdgeContact {
    pub fn solid_static(coordinate: f32) -> Self {
        Self {
            colliding: true,
            is_static: true,
            solid: true,
            coordinate,
        }
    }
}

/// Axis-aligned collision box attached to a GameObject.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCollider {
    pub active: bool,
    pub active_width: f32,
    pub active_height: f32,
    /// Offset of the box center from the object's true position.
    pub active_offset: Vec2,
    pub active_layer: i32,
    /// Trigger colliders report overlaps but never count as solid.
    pub is_trigger: bool,
    active_edges: Edges,
    contacts: [EdgeContact; 4],
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            active: true,
            active_width: width,
            active_height: height,
            active_offset: Vec2::ZERO,
            active_layer: 0,
            is_trigger: false,
            active_edges: Edges::default(),
            contacts: [EdgeContact::default(); 4],
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.active_offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.active_layer = layer;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn active_width(&self) -> f32 {
        self.active_width
    }

    pub fn active_height(&self) -> f32 {
        self.active_height
    }

    pub fn active_offset(&self) -> Vec2 {
        self.active_offset
    }

    /// World-space edges as of the last collision pass.
    pub fn active_edges(&self) -> Edges {
        self.active_edges
    }

    pub fn set_active_edges(&mut self, edges: Edges) {
        self.active_edges = edges;
    }

    /// Half width and half height under the owner's scale.
    pub fn half_extents(&self, scale: Vec2) -> Vec2 {
        Vec2::new(self.active_width, self.active_height) * scale / 2.0
    }

    /// Offset of the box center from the true position, under the owner's
    /// scale.
    pub fn scaled_offset(&self, scale: Vec2) -> Vec2 {
        self.active_offset * scale
    }

    /// Edges for a given true position and scale.
    pub fn edges_at(&self, true_position: Vec2, scale: Vec2) -> Edges {
        let half = self.half_extents(scale);
        Edges::from_center(
            true_position + self.scaled_offset(scale),
            half.x * 2.0,
            half.y * 2.0,
        )
    }

    pub fn contact(&self, side: Side) -> &EdgeContact {
        &self.contacts[side.slot()]
    }

    pub fn set_contact(&mut self, side: Side, contact: EdgeContact) {
        self.contacts[side.slot()] = contact;
    }

    pub fn clear_contacts(&mut self) {
        self.contacts = [EdgeContact::default(); 4];
    }

    pub fn is_colliding(&self, side: Side) -> bool {
        self.contact(side).colliding
    }

    /// Colliding on `side` against something immovable.
    pub fn is_colliding_static(&self, side: Side) -> bool {
        let c = self.contact(side);
        c.colliding && c.is_static
    }

    /// The surface coordinate on `side` if it is a static, solid contact.
    pub fn blocking_surface(&self, side: Side) -> Option<f32> {
        let c = self.contact(side);
        (c.colliding && c.is_static && c.solid).then_some(c.coordinate)
    }
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
