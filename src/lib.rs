//! Explicit mass-spring cloth simulation.
//!
//! `drapery` advances a rectangular grid of point masses linked by
//! structural, shear, and bending springs under gravity, wind, and damping,
//! and resolves contacts against a ground plane and a sphere.
//!
//! # Features
//!
//! - **Hookean springs**: three neighbor classes derived from offset tables, no stored links
//! - **Explicit integration**: damped forward Euler, no implicit solve
//! - **Sail-like wind**: wind pushes along the local surface normal only
//! - **Static obstacles**: sticky ground clamp and sliding sphere contact
//! - **Divergence guard**: instability is reported as a [`ClothError`], never clamped away
//! - **Observable**: monitor each phase via the [`StepObserver`] trait (`log` feature for the `log` facade)
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! The integration is explicit and can blow up for large time steps or stiff
//! springs. Choosing a stable `dt` is up to the caller.

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod grid;
pub mod spring;
pub mod collision;
pub mod config;
pub mod force;
pub mod integrate;
pub mod cloth;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use grid::ParametricGrid;
pub use spring::{SpringKind, SpringParams};
pub use collision::{Collider, CollisionKind, GroundPlane, SphereObstacle};
pub use config::{Anchors, ClothConfig};
pub use cloth::{Cloth, SimulationState};
pub use observer::{CountingStepObserver, NoOpStepObserver, StepObserver};
#[cfg(feature = "log")]
pub use observer::LogStepObserver;
pub use error::ClothError;
