//! # RigidBody — Force Accumulation and Integration
//!
//! Each tick a body runs two phases, always in this order and always after
//! the collision pass has refreshed its sibling [`BoxCollider`]:
//!
//! 1. [`calculate_physics`](RigidBody::calculate_physics) folds collision
//!    reactions, gravity, friction and the equilibrium force into
//!    `pending_forces`, then derives the acceleration.
//! 2. [`apply_physics`](RigidBody::apply_physics) turns the acceleration into
//!    this tick's displacement and moves the sibling [`Transform`].
//!
//! `pending_forces` persists between ticks. Wind resistance, ground friction
//! and collision reactions are what bleed it off; scripts add to it through
//! [`add_force`](RigidBody::add_force) and
//! [`add_velocity`](RigidBody::add_velocity).
//!
//! Velocity here is the displacement applied in one tick
//! (`acceleration * delta_time`), not an accumulated quantity.
//!
//! World space is y-up: positive gravity pulls toward negative y.

use crate::components::{BoxCollider, CharacterController, Side, Transform};
use crate::ecs::ObjectId;
use crate::math::Vec2;
use crate::physics::IntegrationScheme;
use crate::scene::Scene;

/// How far a snapped body is pushed past the contact surface.
pub const CONTACT_EPSILON: f32 = 0.001;

/// Max speed used by the equilibrium force when no controller is attached.
const DEFAULT_MAX_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GravityDirection {
    Normal,
    Inverted,
    Zero,
}

impl GravityDirection {
    fn of(gravity: f32) -> Self {
        if gravity > 0.0 {
            GravityDirection::Normal
        } else if gravity < 0.0 {
            GravityDirection::Inverted
        } else {
            GravityDirection::Zero
        }
    }
}

/// Dynamics state and tuning for one GameObject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub mass: f32,
    pub angular_drag: f32,
    pub gravity: f32,
    /// Gravity used once the body is already falling.
    pub falling_gravity: f32,
    pub terminal_velocity: f32,
    /// Multiplier applied to pending forces while airborne. 1 = no drag.
    pub wind_resistance: f32,
    /// Multiplier applied to horizontal pending forces while grounded and
    /// not moving. 1 = no friction, 0 = instant stop.
    pub friction: f32,
    pub equilibrium_force: f32,
    /// Scale applied to every [`add_force`](Self::add_force) call.
    pub force_correction: f32,
    velocity: Vec2,
    pending_forces: Vec2,
    acceleration: Vec2,
    previous_acceleration: Vec2,
    grounded: bool,
    kinematic: bool,
    is_static: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        let gravity = 1.0;
        Self {
            mass: 1.0,
            angular_drag: 1.0,
            gravity,
            falling_gravity: gravity * 1.2,
            terminal_velocity: gravity * 0.4,
            wind_resistance: 1.0,
            friction: 0.86,
            equilibrium_force: 2.0,
            force_correction: 0.03,
            velocity: Vec2::ZERO,
            pending_forces: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            previous_acceleration: Vec2::ZERO,
            grounded: false,
            kinematic: false,
            is_static: false,
        }
    }

    /// A copy of `template` for a new owner: tuning, velocity and flags carry
    /// over, accumulated forces and acceleration start from zero.
    pub fn copy_from(template: &RigidBody) -> Self {
        Self {
            pending_forces: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            previous_acceleration: Vec2::ZERO,
            ..*template
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_falling_gravity(mut self, falling_gravity: f32) -> Self {
        self.falling_gravity = falling_gravity;
        self
    }

    pub fn with_terminal_velocity(mut self, terminal_velocity: f32) -> Self {
        self.terminal_velocity = terminal_velocity;
        self
    }

    pub fn with_wind_resistance(mut self, wind_resistance: f32) -> Self {
        self.wind_resistance = wind_resistance;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_equilibrium_force(mut self, equilibrium_force: f32) -> Self {
        self.equilibrium_force = equilibrium_force;
        self
    }

    pub fn with_force_correction(mut self, force_correction: f32) -> Self {
        self.force_correction = force_correction;
        self
    }

    pub fn static_body() -> Self {
        Self {
            is_static: true,
            ..Self::new()
        }
    }

    // ── State access ─────────────────────────────────────────────────

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn pending_forces(&self) -> Vec2 {
        self.pending_forces
    }

    pub fn set_pending_forces(&mut self, forces: Vec2) {
        self.pending_forces = forces;
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    // ── External input ───────────────────────────────────────────────

    /// Push the body along `direction` (expected normalized) with `power`,
    /// scaled by [`force_correction`](Self::force_correction).
    pub fn add_force(&mut self, direction: Vec2, power: f32) {
        self.pending_forces += direction * power * self.force_correction;
    }

    /// Add `vel` straight into the pending forces.
    ///
    /// The horizontal part is dropped when the collider is already pressed
    /// against something static on the side `vel` points to. The vertical
    /// part is always added. Returns the updated pending forces.
    pub fn add_velocity(&mut self, vel: Vec2, collider: Option<&BoxCollider>) -> Vec2 {
        let blocked = collider.is_some_and(|c| {
            (vel.x > 0.0 && c.is_colliding_static(Side::Right))
                || (vel.x < 0.0 && c.is_colliding_static(Side::Left))
        });
        if !blocked {
            self.pending_forces.x += vel.x;
        }
        self.pending_forces.y += vel.y;
        self.pending_forces
    }

    /// Where the body would be after two more ticks at the current
    /// acceleration, starting from `position`.
    pub fn next_position(&self, position: Vec2, delta_time: f32) -> Vec2 {
        position + self.acceleration * delta_time * 2.0
    }

    // ── Per-tick phases ──────────────────────────────────────────────

    /// Accumulate this tick's forces and derive the acceleration.
    ///
    /// Must run once per tick, after the collision pass and before
    /// [`apply_physics`](Self::apply_physics). `owner` is the object this
    /// body belongs to; its collider and controller are looked up in `scene`
    /// and simply skipped when absent.
    pub fn calculate_physics(&mut self, owner: ObjectId, scene: &mut Scene, scheme: IntegrationScheme) {
        self.apply_collision_forces(owner, scene);
        self.apply_gravity();
        let controller = scene.get::<CharacterController>(owner).copied();
        self.apply_friction(controller.as_ref());
        self.apply_equilibrium_force(controller.as_ref());
        self.calculate_acceleration(scheme);
    }

    /// Move the owner's transform by this tick's displacement.
    ///
    /// Returns `false` when nothing moved: integration is disabled, or the
    /// owner has no transform.
    pub fn apply_physics(
        &mut self,
        owner: ObjectId,
        scene: &mut Scene,
        scheme: IntegrationScheme,
        delta_time: f32,
    ) -> bool {
        let velocity = match scheme {
            IntegrationScheme::Euler => self.acceleration * delta_time,
            IntegrationScheme::Verlet => {
                (self.previous_acceleration + self.acceleration) * 0.5 * delta_time
            }
            IntegrationScheme::Disabled => return false,
        };
        let Some(position) = scene.true_position(owner) else {
            return false;
        };
        self.velocity = velocity;
        scene.set_true_position(owner, position + velocity)
    }

    fn calculate_acceleration(&mut self, scheme: IntegrationScheme) {
        if scheme == IntegrationScheme::Disabled {
            return;
        }
        if self.mass <= 0.0 {
            log::warn!("rigid body with non-positive mass {} left unaccelerated", self.mass);
            return;
        }
        self.previous_acceleration = self.acceleration;
        self.acceleration = self.pending_forces / self.mass;
    }

    /// Cancel forces pushing into static, solid contacts and snap the owner
    /// so its collider edge sits on the contact surface.
    ///
    /// The box is the same one the collision pass tested: extents and offset
    /// both follow the owner's [`Transform`] scale.
    pub fn apply_collision_forces(&mut self, owner: ObjectId, scene: &mut Scene) {
        let scale = scene.get::<Transform>(owner).map_or(Vec2::ONE, Transform::scale);
        let Some(collider) = scene.get::<BoxCollider>(owner) else {
            return;
        };
        let half = collider.half_extents(scale);
        let offset = collider.scaled_offset(scale);
        let [top, right, bottom, left] = Side::ALL.map(|side| collider.blocking_surface(side));

        let Some(start) = scene.true_position(owner) else {
            return;
        };
        let mut position = start;
        let gravity = GravityDirection::of(self.gravity);

        // Inverted gravity resolves floor and ceiling exactly as normal
        // gravity does. Zero gravity resolves neither.
        if gravity != GravityDirection::Zero {
            if let Some(floor) = bottom {
                if self.pending_forces.y < 0.0 {
                    self.pending_forces.y = 0.0;
                    position.y = floor + half.y - offset.y - CONTACT_EPSILON;
                }
            }
            if let Some(ceiling) = top {
                if self.pending_forces.y > 0.0 {
                    self.pending_forces.y = 0.0;
                    position.y = ceiling - half.y - offset.y + CONTACT_EPSILON;
                }
            }
        }

        if let Some(wall) = right {
            if self.pending_forces.x > 0.0 {
                self.pending_forces.x = 0.0;
                position.x = wall - half.x - offset.x + CONTACT_EPSILON;
            }
        }
        if let Some(wall) = left {
            if self.pending_forces.x < 0.0 {
                self.pending_forces.x = 0.0;
                position.x = wall + half.x - offset.x - CONTACT_EPSILON;
            }
        }

        if position != start {
            scene.set_true_position(owner, position);
        }
    }

    /// Pull the body along its gravity until it reaches terminal velocity.
    /// Grounded bodies feel no gravity.
    pub fn apply_gravity(&mut self) {
        if self.grounded {
            return;
        }
        match GravityDirection::of(self.gravity) {
            GravityDirection::Normal => {
                if self.velocity.y > -self.terminal_velocity {
                    self.pending_forces.y -= if self.velocity.y < 0.0 {
                        self.falling_gravity
                    } else {
                        self.gravity
                    };
                }
            }
            GravityDirection::Inverted => {
                if self.velocity.y < self.terminal_velocity {
                    self.pending_forces.y -= if self.velocity.y > 0.0 {
                        self.falling_gravity
                    } else {
                        self.gravity
                    };
                }
            }
            GravityDirection::Zero => {}
        }
    }

    /// Air drag while airborne; ground friction on the horizontal axis while
    /// grounded and not actively moving.
    pub fn apply_friction(&mut self, controller: Option<&CharacterController>) {
        if !self.grounded {
            self.pending_forces *= self.wind_resistance;
        }
        let moving = controller.is_some_and(CharacterController::is_moving);
        if self.grounded && !moving {
            self.pending_forces.x *= self.friction;
        }
    }

    /// Nudge horizontal forces back toward the max speed by a fixed amount
    /// per tick.
    pub fn apply_equilibrium_force(&mut self, controller: Option<&CharacterController>) {
        let max_speed = controller.map_or(DEFAULT_MAX_SPEED, CharacterController::max_speed);
        if self.velocity.x > max_speed {
            self.pending_forces.x -= self.equilibrium_force;
        } else if self.velocity.x < -max_speed {
            self.pending_forces.x += self.equilibrium_force;
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EdgeContact;

    fn scene_with_body(body: RigidBody, at: Vec2) -> (Scene, ObjectId) {
        let mut scene = Scene::new("test");
        let id = scene.create_object("body", None).unwrap();
        scene.insert(id, Transform::from_xy(at.x, at.y));
        scene.insert(id, body);
        (scene, id)
    }

    fn calculate(scene: &mut Scene, id: ObjectId, scheme: IntegrationScheme) -> RigidBody {
        let mut body = *scene.get::<RigidBody>(id).unwrap();
        body.calculate_physics(id, scene, scheme);
        *scene.get_mut::<RigidBody>(id).unwrap() = body;
        body
    }

    #[test]
    fn defaults_match_documented_tuning() {
        let b = RigidBody::new();
        assert_eq!(b.mass, 1.0);
        assert_eq!(b.gravity, 1.0);
        assert!((b.falling_gravity - 1.2).abs() < 1e-6);
        assert!((b.terminal_velocity - 0.4).abs() < 1e-6);
        assert_eq!(b.friction, 0.86);
        assert_eq!(b.equilibrium_force, 2.0);
        assert_eq!(b.force_correction, 0.03);
        assert!(!b.is_grounded() && !b.is_static() && !b.is_kinematic());
    }

    #[test]
    fn copy_from_resets_forces_only() {
        let mut template = RigidBody::new().with_mass(3.0);
        template.set_velocity(Vec2::new(1.0, 2.0));
        template.set_pending_forces(Vec2::new(5.0, 5.0));
        template.set_grounded(true);
        template.calculate_acceleration(IntegrationScheme::Euler);

        let copy = RigidBody::copy_from(&template);
        assert_eq!(copy.mass, 3.0);
        assert_eq!(copy.velocity(), Vec2::new(1.0, 2.0));
        assert!(copy.is_grounded());
        assert_eq!(copy.pending_forces(), Vec2::ZERO);
        assert_eq!(copy.acceleration(), Vec2::ZERO);
    }

    #[test]
    fn euler_acceleration_and_position() {
        let body = RigidBody::new().with_mass(2.0).with_gravity(0.0);
        let (mut scene, id) = scene_with_body(body, Vec2::new(5.0, 5.0));
        scene
            .get_mut::<RigidBody>(id)
            .unwrap()
            .set_pending_forces(Vec2::new(4.0, -6.0));

        let mut body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.acceleration(), body.pending_forces() / 2.0);

        let before = scene.true_position(id).unwrap();
        let dt = 16.0;
        assert!(body.apply_physics(id, &mut scene, IntegrationScheme::Euler, dt));
        let after = scene.true_position(id).unwrap();
        let expected = before + body.acceleration() * dt;
        assert!((after - expected).length() < 1e-4);
        assert_eq!(body.velocity(), body.acceleration() * dt);
    }

    #[test]
    fn gravity_sign_is_symmetric() {
        let mut down = RigidBody::new().with_gravity(1.5).with_terminal_velocity(0.4);
        let mut up = RigidBody::new().with_gravity(-1.5).with_terminal_velocity(0.4);
        down.apply_gravity();
        up.apply_gravity();
        assert_eq!(down.pending_forces().y, -1.5);
        assert_eq!(up.pending_forces().y, 1.5);
    }

    #[test]
    fn falling_gravity_kicks_in_once_falling() {
        let mut body = RigidBody::new().with_terminal_velocity(10.0);
        body.set_velocity(Vec2::new(0.0, -1.0));
        body.apply_gravity();
        assert!((body.pending_forces().y + 1.2).abs() < 1e-6);
    }

    #[test]
    fn no_gravity_past_terminal_velocity_or_when_grounded() {
        let mut body = RigidBody::new();
        body.set_velocity(Vec2::new(0.0, -0.5));
        body.apply_gravity();
        assert_eq!(body.pending_forces().y, 0.0);

        let mut grounded = RigidBody::new();
        grounded.set_grounded(true);
        grounded.apply_gravity();
        assert_eq!(grounded.pending_forces().y, 0.0);
    }

    #[test]
    fn floor_contact_zeroes_force_and_snaps() {
        let mut body = RigidBody::new();
        body.set_grounded(true);
        body.set_pending_forces(Vec2::new(0.0, -3.0));
        let (mut scene, id) = scene_with_body(body, Vec2::new(0.0, 0.5));
        let mut collider = BoxCollider::new(2.0, 4.0);
        collider.set_contact(Side::Bottom, EdgeContact::solid_static(-2.0));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().y, 0.0);
        let pos = scene.true_position(id).unwrap();
        assert!((pos.y - (-2.0 + 4.0 / 2.0 - CONTACT_EPSILON)).abs() < 1e-6);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn inverted_gravity_resolves_floor_the_same_way() {
        let mut body = RigidBody::new().with_gravity(-1.0);
        body.set_grounded(true);
        body.set_pending_forces(Vec2::new(0.0, -3.0));
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        let mut collider = BoxCollider::new(2.0, 2.0);
        collider.set_contact(Side::Bottom, EdgeContact::solid_static(-1.5));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().y, 0.0);
        let pos = scene.true_position(id).unwrap();
        assert!((pos.y - (-1.5 + 1.0 - CONTACT_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn wall_contact_only_blocks_forces_into_it() {
        let mut body = RigidBody::new().with_gravity(0.0);
        body.set_pending_forces(Vec2::new(-2.0, 0.0));
        let (mut scene, id) = scene_with_body(body, Vec2::new(3.0, 0.0));
        let mut collider = BoxCollider::new(2.0, 2.0);
        collider.set_contact(Side::Right, EdgeContact::solid_static(4.0));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().x, -2.0);
        assert_eq!(scene.true_position(id).unwrap().x, 3.0);

        scene
            .get_mut::<RigidBody>(id)
            .unwrap()
            .set_pending_forces(Vec2::new(2.0, 0.0));
        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().x, 0.0);
        assert!((scene.true_position(id).unwrap().x - (4.0 - 1.0 + CONTACT_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn ceiling_contact_zeroes_force_and_snaps() {
        let mut body = RigidBody::new();
        body.set_grounded(true);
        body.set_pending_forces(Vec2::new(0.0, 3.0));
        let (mut scene, id) = scene_with_body(body, Vec2::new(0.0, 0.5));
        let mut collider = BoxCollider::new(2.0, 2.0);
        collider.set_contact(Side::Top, EdgeContact::solid_static(2.0));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().y, 0.0);
        let pos = scene.true_position(id).unwrap();
        assert!((pos.y - (2.0 - 1.0 + CONTACT_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn left_wall_snaps() {
        let mut body = RigidBody::new().with_gravity(0.0);
        body.set_pending_forces(Vec2::new(-2.0, 0.0));
        let (mut scene, id) = scene_with_body(body, Vec2::new(-3.0, 0.0));
        let mut collider = BoxCollider::new(2.0, 2.0);
        collider.set_contact(Side::Left, EdgeContact::solid_static(-4.0));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().x, 0.0);
        let pos = scene.true_position(id).unwrap();
        assert!((pos.x - (-4.0 + 1.0 - CONTACT_EPSILON)).abs() < 1e-6);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn zero_gravity_ignores_floor() {
        let mut body = RigidBody::new().with_gravity(0.0);
        body.set_pending_forces(Vec2::new(0.0, -3.0));
        let (mut scene, id) = scene_with_body(body, Vec2::new(0.0, 0.5));
        let mut collider = BoxCollider::new(2.0, 4.0);
        collider.set_contact(Side::Bottom, EdgeContact::solid_static(-2.0));
        scene.insert(id, collider);

        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().y, -3.0);
        assert_eq!(scene.true_position(id).unwrap(), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn snap_follows_transform_scale() {
        let mut body = RigidBody::new();
        body.set_grounded(true);
        body.set_pending_forces(Vec2::new(0.0, -3.0));
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        scene.insert(id, Transform::from_xy(0.0, 0.0).with_scale(Vec2::new(1.0, 2.0)));
        let mut collider = BoxCollider::new(1.0, 1.0);
        collider.set_contact(Side::Bottom, EdgeContact::solid_static(-4.0));
        scene.insert(id, collider);

        calculate(&mut scene, id, IntegrationScheme::Euler);
        let pos = scene.true_position(id).unwrap();
        assert!((pos.y - (-4.0 + 1.0 - CONTACT_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn snap_follows_collider_offset() {
        let mut body = RigidBody::new().with_gravity(0.0);
        body.set_pending_forces(Vec2::new(2.0, 0.0));
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        let mut collider = BoxCollider::new(1.0, 1.0).with_offset(Vec2::new(0.5, 0.0));
        collider.set_contact(Side::Right, EdgeContact::solid_static(3.0));
        scene.insert(id, collider);

        calculate(&mut scene, id, IntegrationScheme::Euler);
        // Collider right edge = x + 0.5 + 0.5, flush with the wall.
        let pos = scene.true_position(id).unwrap();
        assert!((pos.x - (3.0 - 0.5 - 0.5 + CONTACT_EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn missing_collider_skips_collision_forces() {
        let mut body = RigidBody::new().with_gravity(0.0);
        body.set_pending_forces(Vec2::new(0.0, -1.0));
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        let body = calculate(&mut scene, id, IntegrationScheme::Euler);
        assert_eq!(body.pending_forces().y, -1.0);
    }

    #[test]
    fn friction_depends_on_grounding_and_movement() {
        let mut air = RigidBody::new().with_wind_resistance(0.5);
        air.set_pending_forces(Vec2::new(4.0, 2.0));
        air.apply_friction(None);
        assert_eq!(air.pending_forces(), Vec2::new(2.0, 1.0));

        let mut ground = RigidBody::new().with_friction(0.5);
        ground.set_grounded(true);
        ground.set_pending_forces(Vec2::new(4.0, 2.0));
        ground.apply_friction(None);
        assert_eq!(ground.pending_forces(), Vec2::new(2.0, 2.0));

        let mut walking = RigidBody::new().with_friction(0.5);
        walking.set_grounded(true);
        walking.set_pending_forces(Vec2::new(4.0, 2.0));
        let mut controller = CharacterController::default();
        controller.set_moving(true);
        walking.apply_friction(Some(&controller));
        assert_eq!(walking.pending_forces(), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn equilibrium_uses_controller_max_speed() {
        let mut body = RigidBody::new();
        body.set_velocity(Vec2::new(3.0, 0.0));
        body.apply_equilibrium_force(None);
        assert_eq!(body.pending_forces().x, -2.0);

        let mut fast = RigidBody::new();
        fast.set_velocity(Vec2::new(3.0, 0.0));
        fast.apply_equilibrium_force(Some(&CharacterController::new(5.0, 1.0)));
        assert_eq!(fast.pending_forces().x, 0.0);

        let mut left = RigidBody::new();
        left.set_velocity(Vec2::new(-3.0, 0.0));
        left.apply_equilibrium_force(None);
        assert_eq!(left.pending_forces().x, 2.0);
    }

    #[test]
    fn overspeed_decays_without_oscillating() {
        let mut body = RigidBody::new();
        body.set_grounded(true);
        body.set_pending_forces(Vec2::new(40.0, 0.0));
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        let max_speed = DEFAULT_MAX_SPEED;

        let mut previous: Option<f32> = None;
        for _ in 0..60 {
            let mut body = calculate(&mut scene, id, IntegrationScheme::Euler);
            body.apply_physics(id, &mut scene, IntegrationScheme::Euler, 1.0);
            *scene.get_mut::<RigidBody>(id).unwrap() = body;

            let speed = body.velocity().x;
            if let Some(prev) = previous {
                if prev.abs() > max_speed {
                    assert!(speed.abs() <= prev.abs() + 1e-5, "{} -> {}", prev, speed);
                }
                if prev.abs() - max_speed >= body.equilibrium_force {
                    assert!(speed >= 0.0, "overshot zero: {} -> {}", prev, speed);
                }
            }
            previous = Some(speed);
        }
        assert!(previous.unwrap().abs() <= max_speed);
    }

    #[test]
    fn add_force_scales_by_correction() {
        let mut body = RigidBody::new();
        body.add_force(Vec2::new(1.0, 0.0), 100.0);
        assert!((body.pending_forces().x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn add_velocity_blocked_by_static_wall() {
        let mut collider = BoxCollider::new(1.0, 1.0);
        collider.set_contact(
            Side::Right,
            EdgeContact {
                colliding: true,
                is_static: true,
                solid: true,
                coordinate: 1.0,
            },
        );

        let mut blocked = RigidBody::new();
        let forces = blocked.add_velocity(Vec2::new(2.0, 1.0), Some(&collider));
        assert_eq!(forces, Vec2::new(0.0, 1.0));

        collider.clear_contacts();
        let mut free = RigidBody::new();
        free.add_velocity(Vec2::new(2.0, 1.0), Some(&collider));
        assert_eq!(free.pending_forces(), Vec2::new(2.0, 1.0));

        let mut no_collider = RigidBody::new();
        no_collider.add_velocity(Vec2::new(-2.0, 0.0), None);
        assert_eq!(no_collider.pending_forces().x, -2.0);
    }

    #[test]
    fn verlet_averages_accelerations() {
        let body = RigidBody::new().with_gravity(0.0);
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        scene
            .get_mut::<RigidBody>(id)
            .unwrap()
            .set_pending_forces(Vec2::new(2.0, 0.0));

        let mut body = calculate(&mut scene, id, IntegrationScheme::Verlet);
        body.apply_physics(id, &mut scene, IntegrationScheme::Verlet, 1.0);
        // previous acceleration 0, current 2 → average 1
        assert_eq!(body.velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(scene.true_position(id).unwrap(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn disabled_scheme_never_moves() {
        let body = RigidBody::new();
        let (mut scene, id) = scene_with_body(body, Vec2::ZERO);
        let mut body = calculate(&mut scene, id, IntegrationScheme::Disabled);
        assert_eq!(body.acceleration(), Vec2::ZERO);
        assert!(!body.apply_physics(id, &mut scene, IntegrationScheme::Disabled, 16.0));
        assert_eq!(scene.true_position(id).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn next_position_looks_two_ticks_ahead() {
        let mut body = RigidBody::new();
        body.set_pending_forces(Vec2::new(1.0, 0.0));
        body.calculate_acceleration(IntegrationScheme::Euler);
        assert_eq!(body.next_position(Vec2::ZERO, 2.0), Vec2::new(4.0, 0.0));
    }
}
