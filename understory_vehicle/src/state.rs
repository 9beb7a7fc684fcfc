// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vehicle state, driver input and tuning constants.

use kurbo::Vec2;

/// Kinematic state of one vehicle on the ground plane.
///
/// The plane is `x`/`z` (the renderer's y axis points up). A heading of zero faces `+z`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    /// Position along x.
    pub x: f64,
    /// Position along z.
    pub z: f64,
    /// Heading in radians, counter-clockwise when seen from above.
    pub heading: f64,
    /// Velocity along x, world units per tick.
    pub velocity_x: f64,
    /// Velocity along z, world units per tick.
    pub velocity_z: f64,
}

impl VehicleState {
    /// A vehicle at rest at `(x, z)` facing `heading`.
    pub const fn at_rest(x: f64, z: f64, heading: f64) -> Self {
        Self {
            x,
            z,
            heading,
            velocity_x: 0.0,
            velocity_z: 0.0,
        }
    }

    /// Velocity as a vector.
    pub const fn velocity(&self) -> Vec2 {
        Vec2::new(self.velocity_x, self.velocity_z)
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f64 {
        self.velocity().hypot()
    }

    /// Unit vector the vehicle is facing: `(sin heading, cos heading)`.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.heading.sin(), self.heading.cos())
    }
}

/// Driver controls for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleInput {
    /// Accelerate along the heading.
    pub forward: bool,
    /// Brake while rolling forward, otherwise reverse.
    pub backward: bool,
    /// Turn counter-clockwise.
    pub left: bool,
    /// Turn clockwise.
    pub right: bool,
}

impl VehicleInput {
    /// No controls pressed.
    pub const NONE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };
}

/// Tuning constants, all per tick.
///
/// `friction` must lie in `(0, 1)` and `stop_epsilon` must be positive, otherwise a
/// coasting vehicle never comes to rest.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleParams {
    /// Speed gained per tick of forward or reverse throttle.
    pub acceleration: f64,
    /// Speed cap.
    pub max_speed: f64,
    /// Velocity multiplier applied every tick.
    pub friction: f64,
    /// Speed shed per tick of braking.
    pub brake: f64,
    /// Heading change per tick of steering, in radians. Independent of speed.
    pub turn_rate: f64,
    /// Speeds below this snap to zero.
    pub stop_epsilon: f64,
}

impl VehicleParams {
    /// Default car handling.
    pub const DEFAULT: Self = Self {
        acceleration: 0.005,
        max_speed: 0.2,
        friction: 0.98,
        brake: 0.01,
        turn_rate: 0.04,
        stop_epsilon: 0.001,
    };
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
