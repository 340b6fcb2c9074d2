//! # Brandr — 2D Physics and Play-Session Core
//!
//! The simulation side of a small 2D engine: a scene of GameObjects with
//! attachable components, a per-tick rigid body integrator that resolves
//! against box collider contacts, and a game loop that runs scripts,
//! collision and physics in a fixed order.
//!
//! Start with `use brandr::prelude::*`, build a [`Scene`](scene::Scene),
//! wrap it in a [`SimulationContext`](context::SimulationContext) and drive a
//! [`GameLoop`](game_loop::GameLoop).

pub mod collision;
pub mod components;
pub mod config;
pub mod context;
pub mod diag;
pub mod ecs;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod math;
pub mod physics;
pub mod prelude;
pub mod profiler;
pub mod scene;
pub mod script;
pub mod time;
