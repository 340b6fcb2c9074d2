//! # Collision Detection
//!
//! Runs once per tick, before any [`RigidBody`] calculates its forces. A
//! pass rewrites every active [`BoxCollider`]'s world-space edges and its
//! four [`EdgeContact`]s; the physics step only reads them afterwards.
//!
//! [`AabbCollisionPass`] is the bundled implementation. Any other broad or
//! narrow phase can be plugged into the game loop through [`CollisionPass`].
//!
//! ## Contact classification
//!
//! Each overlapping pair is resolved along the axis of least overlap:
//!
//! ```text
//!        ┌───┐
//!        │ A │          overlap_y < overlap_x, A above B
//!   ┌────┼───┼────┐     → A gets a Bottom contact at B.top
//!   │    └───┘ B  │     → B gets a Top contact at A.bottom
//!   └─────────────┘
//! ```
//!
//! A contact is *static* when the other object has no rigid body or a static
//! one, and *solid* when the other collider is not a trigger. When several
//! objects touch the same side, a blocking (static and solid) contact wins
//! over a non-blocking one, then the surface nearest the body wins.

use crate::components::{BoxCollider, EdgeContact, RigidBody, Side, Transform};
use crate::ecs::ObjectId;
use crate::math::{Edges, Vec2};
use crate::scene::Scene;

/// Fills collider edges and contacts for one tick.
pub trait CollisionPass {
    fn detect(&mut self, scene: &mut Scene);
}

/// Axis-aligned box overlap test over every pair of active colliders.
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbCollisionPass;

struct Proxy {
    id: ObjectId,
    edges: Edges,
    is_trigger: bool,
    is_static: bool,
}

impl CollisionPass for AabbCollisionPass {
    fn detect(&mut self, scene: &mut Scene) {
        let mut proxies = Vec::new();
        for id in scene.objects_with::<BoxCollider>() {
            let active = scene.is_active(id);
            let Some(position) = scene.true_position(id) else {
                continue;
            };
            let scale = scene.get::<Transform>(id).map_or(Vec2::ONE, Transform::scale);
            let is_static = scene.get::<RigidBody>(id).is_none_or(RigidBody::is_static);
            let Some(collider) = scene.get_mut::<BoxCollider>(id) else {
                continue;
            };
            collider.clear_contacts();
            if !active || !collider.active {
                continue;
            }
            let edges = collider.edges_at(position, scale);
            collider.set_active_edges(edges);
            proxies.push(Proxy {
                id,
                edges,
                is_trigger: collider.is_trigger,
                is_static,
            });
        }

        let mut pairs = 0usize;
        for a in &proxies {
            for b in &proxies {
                if a.id == b.id || !a.edges.overlaps(&b.edges) {
                    continue;
                }
                pairs += 1;
                let (side, coordinate) = classify(&a.edges, &b.edges);
                let contact = EdgeContact {
                    colliding: true,
                    is_static: b.is_static,
                    solid: !b.is_trigger,
                    coordinate,
                };
                if let Some(collider) = scene.get_mut::<BoxCollider>(a.id) {
                    if replaces(side, &contact, collider.contact(side)) {
                        collider.set_contact(side, contact);
                    }
                }
            }
        }

        for proxy in &proxies {
            let grounded = scene
                .get::<BoxCollider>(proxy.id)
                .is_some_and(|c| c.blocking_surface(Side::Bottom).is_some());
            if let Some(body) = scene.get_mut::<RigidBody>(proxy.id) {
                body.set_grounded(grounded);
            }
        }

        log::trace!(
            "Collision pass: {} colliders, {} contacts",
            proxies.len(),
            pairs
        );
    }
}

/// Side of `a` touched by `b`, and the coordinate of `b`'s surface there.
fn classify(a: &Edges, b: &Edges) -> (Side, f32) {
    let overlap_x = a.right.min(b.right) - a.left.max(b.left);
    let overlap_y = a.top.min(b.top) - a.bottom.max(b.bottom);
    if overlap_y <= overlap_x {
        if a.center().y >= b.center().y {
            (Side::Bottom, b.top)
        } else {
            (Side::Top, b.bottom)
        }
    } else if a.center().x <= b.center().x {
        (Side::Right, b.left)
    } else {
        (Side::Left, b.right)
    }
}

fn replaces(side: Side, new: &EdgeContact, old: &EdgeContact) -> bool {
    if !old.colliding {
        return true;
    }
    let blocking = |c: &EdgeContact| c.is_static && c.solid;
    match (blocking(new), blocking(old)) {
        (true, false) => true,
        (false, true) => false,
        _ => match side {
            Side::Bottom | Side::Left => new.coordinate > old.coordinate,
            Side::Top | Side::Right => new.coordinate < old.coordinate,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(scene: &mut Scene, name: &str, at: Vec2, size: Vec2) -> ObjectId {
        let id = scene.create_object(name, None).unwrap();
        scene.insert(id, Transform::from_xy(at.x, at.y));
        scene.insert(id, BoxCollider::new(size.x, size.y));
        id
    }

    #[test]
    fn body_resting_on_floor_gets_bottom_contact() {
        let mut scene = Scene::new("test");
        let floor = boxed(&mut scene, "floor", Vec2::new(0.0, -5.0), Vec2::new(20.0, 2.0));
        let player = boxed(&mut scene, "player", Vec2::new(0.0, -3.5), Vec2::new(1.0, 1.2));
        scene.insert(player, RigidBody::new());

        AabbCollisionPass.detect(&mut scene);

        let c = scene.get::<BoxCollider>(player).unwrap();
        assert_eq!(c.blocking_surface(Side::Bottom), Some(-4.0));
        assert!(!c.is_colliding(Side::Top));
        assert!(scene.get::<RigidBody>(player).unwrap().is_grounded());

        // The floor sees the player on top, but the player is dynamic.
        let f = scene.get::<BoxCollider>(floor).unwrap();
        assert!(f.is_colliding(Side::Top));
        assert!(!f.contact(Side::Top).is_static);
    }

    #[test]
    fn wall_contact_is_horizontal() {
        let mut scene = Scene::new("test");
        boxed(&mut scene, "wall", Vec2::new(2.0, 0.0), Vec2::new(2.0, 10.0));
        let player = boxed(&mut scene, "player", Vec2::new(0.6, 0.0), Vec2::splat(1.0));
        scene.insert(player, RigidBody::new());

        AabbCollisionPass.detect(&mut scene);

        let c = scene.get::<BoxCollider>(player).unwrap();
        assert_eq!(c.blocking_surface(Side::Right), Some(1.0));
        assert!(!scene.get::<RigidBody>(player).unwrap().is_grounded());
    }

    #[test]
    fn block_above_gives_top_contact() {
        let mut scene = Scene::new("test");
        boxed(&mut scene, "block", Vec2::new(0.0, 2.0), Vec2::new(4.0, 2.0));
        let player = boxed(&mut scene, "player", Vec2::new(0.0, 0.6), Vec2::splat(1.0));
        scene.insert(player, RigidBody::new());

        AabbCollisionPass.detect(&mut scene);

        let c = scene.get::<BoxCollider>(player).unwrap();
        assert_eq!(c.blocking_surface(Side::Top), Some(1.0));
        assert!(!c.is_colliding(Side::Bottom));
        assert!(!scene.get::<RigidBody>(player).unwrap().is_grounded());
    }

    #[test]
    fn block_on_the_left_gives_left_contact() {
        let mut scene = Scene::new("test");
        boxed(&mut scene, "block", Vec2::new(-2.0, 0.0), Vec2::new(2.0, 10.0));
        let player = boxed(&mut scene, "player", Vec2::new(-0.6, 0.0), Vec2::splat(1.0));
        scene.insert(player, RigidBody::new());

        AabbCollisionPass.detect(&mut scene);

        let c = scene.get::<BoxCollider>(player).unwrap();
        assert_eq!(c.blocking_surface(Side::Left), Some(-1.0));
        assert!(!c.is_colliding(Side::Right));
    }

    #[test]
    fn trigger_is_not_solid() {
        let mut scene = Scene::new("test");
        let zone = boxed(&mut scene, "zone", Vec2::new(0.0, -1.0), Vec2::new(4.0, 1.0));
        let zone_collider = scene.get::<BoxCollider>(zone).unwrap().clone().trigger();
        scene.insert(zone, zone_collider);
        let player = boxed(&mut scene, "player", Vec2::new(0.0, -0.2), Vec2::splat(1.0));
        scene.insert(player, RigidBody::new());

        AabbCollisionPass.detect(&mut scene);

        let c = scene.get::<BoxCollider>(player).unwrap();
        assert!(c.is_colliding_static(Side::Bottom));
        assert_eq!(c.blocking_surface(Side::Bottom), None);
        assert!(!scene.get::<RigidBody>(player).unwrap().is_grounded());
    }

    #[test]
    fn contacts_are_cleared_when_apart() {
        let mut scene = Scene::new("test");
        boxed(&mut scene, "floor", Vec2::new(0.0, -1.0), Vec2::new(10.0, 1.0));
        let player = boxed(&mut scene, "player", Vec2::new(0.0, -0.2), Vec2::splat(1.0));

        AabbCollisionPass.detect(&mut scene);
        assert!(scene.get::<BoxCollider>(player).unwrap().is_colliding(Side::Bottom));

        scene.set_true_position(player, Vec2::new(0.0, 10.0));
        AabbCollisionPass.detect(&mut scene);
        let c = scene.get::<BoxCollider>(player).unwrap();
        assert!(!c.is_colliding(Side::Bottom));
        assert_eq!(c.active_edges().bottom, 9.5);
    }

    #[test]
    fn inactive_objects_are_ignored() {
        let mut scene = Scene::new("test");
        let floor = boxed(&mut scene, "floor", Vec2::new(0.0, -1.0), Vec2::new(10.0, 1.0));
        let player = boxed(&mut scene, "player", Vec2::new(0.0, -0.2), Vec2::splat(1.0));
        scene.object_mut(floor).unwrap().active = false;

        AabbCollisionPass.detect(&mut scene);
        assert!(!scene.get::<BoxCollider>(player).unwrap().is_colliding(Side::Bottom));
    }

    #[test]
    fn nearest_blocking_floor_wins() {
        let low = EdgeContact::solid_static(-2.0);
        let high = EdgeContact::solid_static(-1.0);
        let trigger = EdgeContact {
            colliding: true,
            is_static: true,
            solid: false,
            coordinate: 0.0,
        };
        assert!(replaces(Side::Bottom, &high, &low));
        assert!(!replaces(Side::Bottom, &low, &high));
        assert!(!replaces(Side::Bottom, &trigger, &low));
        assert!(replaces(Side::Bottom, &low, &trigger));
    }
}
