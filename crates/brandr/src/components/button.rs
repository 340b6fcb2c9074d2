//! Clickable UI button component.

use crate::ecs::ObjectId;
use crate::math::{Edges, Vec2};
use crate::scene::Scene;

/// Callback fired on a click. Receives the button's owner.
pub type ButtonAction = fn(ObjectId, &mut Scene);

/// A rectangular hit area that fires callbacks on mouse clicks during play.
///
/// When buttons overlap, the one with the highest `active_layer` is the
/// top-level button and is the only one that receives the click.
#[derive(Debug, Clone)]
pub struct Button {
    pub active: bool,
    pub active_width: f32,
    pub active_height: f32,
    pub active_offset: Vec2,
    pub active_layer: i32,
    pub on_left_click: Option<ButtonAction>,
    pub on_right_click: Option<ButtonAction>,
}

impl Button {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            active: true,
            active_width: width,
            active_height: height,
            active_offset: Vec2::ZERO,
            active_layer: 0,
            on_left_click: None,
            on_right_click: None,
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.active_layer = layer;
        self
    }

    pub fn on_left_click(mut self, action: ButtonAction) -> Self {
        self.on_left_click = Some(action);
        self
    }

    pub fn on_right_click(mut self, action: ButtonAction) -> Self {
        self.on_right_click = Some(action);
        self
    }

    pub fn left_click_set(&self) -> bool {
        self.on_left_click.is_some()
    }

    pub fn right_click_set(&self) -> bool {
        self.on_right_click.is_some()
    }

    /// Hit area for an owner at `true_position`.
    pub fn edges_at(&self, true_position: Vec2) -> Edges {
        Edges::from_center(
            true_position + self.active_offset,
            self.active_width,
            self.active_height,
        )
    }
}
