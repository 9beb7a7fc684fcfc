// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_vehicle --heading-base-level=0

//! Understory Vehicle: a stateless per-tick integrator for one steerable ground vehicle.
//!
//! [`integrate`] advances a [`VehicleState`] by exactly one fixed timestep given the
//! driver's [`VehicleInput`]. It reads and writes nothing else, so any number of
//! vehicles can be stepped in any order, on any thread.
//!
//! Each tick, in order:
//!
//! 1. Steering turns the heading by a fixed rate, whatever the speed.
//! 2. Throttle accelerates along the heading `(sin θ, cos θ)`.
//! 3. Brake slows a vehicle rolling forward; otherwise it accelerates in reverse.
//! 4. Friction scales the velocity.
//! 5. Speed is clamped to the maximum.
//! 6. Speeds under the stop epsilon snap to zero, so a coasting vehicle stops exactly.
//! 7. Position advances by the velocity (explicit Euler, unit timestep).
//!
//! ```rust
//! use understory_vehicle::{VehicleInput, VehicleParams, VehicleState, integrate};
//!
//! let params = VehicleParams::default();
//! let throttle = VehicleInput { forward: true, ..VehicleInput::NONE };
//!
//! let mut car = VehicleState::at_rest(0.0, 0.0, 0.0);
//! for _ in 0..10 {
//!     car = integrate(car, throttle, &params);
//! }
//! // Heading 0 faces +z.
//! assert!(car.z > 0.0);
//! assert!(car.speed() <= params.max_speed);
//! ```

mod state;

pub use state::{VehicleInput, VehicleParams, VehicleState};

use kurbo::Vec2;

/// Advance `state` by one tick.
pub fn integrate(state: VehicleState, input: VehicleInput, params: &VehicleParams) -> VehicleState {
    let mut next = state;

    if input.left {
        next.heading += params.turn_rate;
    }
    if input.right {
        next.heading -= params.turn_rate;
    }

    let forward = next.forward();
    let mut velocity = next.velocity();

    if input.forward {
        velocity += forward * params.acceleration;
    }

    if input.backward {
        let speed = velocity.hypot();
        if velocity.dot(forward) > 0.0 && speed > 0.0 {
            velocity -= velocity / speed * params.brake;
        } else {
            velocity -= forward * params.acceleration;
        }
    }

    velocity *= params.friction;

    let speed = velocity.hypot();
    if speed > params.max_speed {
        velocity = velocity / speed * params.max_speed;
    }
    if speed < params.stop_epsilon {
        velocity = Vec2::ZERO;
    }

    next.velocity_x = velocity.x;
    next.velocity_z = velocity.y;
    next.x += velocity.x;
    next.z += velocity.y;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::FRAC_PI_2;

    const P: VehicleParams = VehicleParams::DEFAULT;

    fn press(forward: bool, backward: bool, left: bool, right: bool) -> VehicleInput {
        VehicleInput {
            forward,
            backward,
            left,
            right,
        }
    }

    #[test]
    fn idle_vehicle_stays_put() {
        let car = VehicleState::at_rest(3.0, -2.0, 1.0);
        assert_eq!(integrate(car, VehicleInput::NONE, &P), car);
    }

    #[test]
    fn throttle_moves_along_heading() {
        let car = VehicleState::at_rest(0.0, 0.0, 0.0);
        let next = integrate(car, press(true, false, false, false), &P);
        assert_relative_eq!(next.velocity_z, P.acceleration * P.friction);
        assert_relative_eq!(next.velocity_x, 0.0);
        assert_relative_eq!(next.z, next.velocity_z);

        let sideways = VehicleState::at_rest(0.0, 0.0, FRAC_PI_2);
        let next = integrate(sideways, press(true, false, false, false), &P);
        assert_relative_eq!(next.velocity_x, P.acceleration * P.friction);
        assert_relative_eq!(next.velocity_z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn steering_is_independent_of_speed() {
        let parked = VehicleState::at_rest(0.0, 0.0, 0.5);
        let left = integrate(parked, press(false, false, true, false), &P);
        assert_relative_eq!(left.heading, 0.5 + P.turn_rate);
        let right = integrate(parked, press(false, false, false, true), &P);
        assert_relative_eq!(right.heading, 0.5 - P.turn_rate);
        let both = integrate(parked, press(false, false, true, true), &P);
        assert_relative_eq!(both.heading, 0.5);
    }

    #[test]
    fn backward_brakes_when_rolling_forward() {
        let car = VehicleState {
            velocity_z: 0.1,
            ..VehicleState::at_rest(0.0, 0.0, 0.0)
        };
        let next = integrate(car, press(false, true, false, false), &P);
        assert_relative_eq!(next.velocity_z, (0.1 - P.brake) * P.friction);
        assert!(next.velocity_z > 0.0, "braking must not flip direction in one tick");
    }

    #[test]
    fn backward_reverses_from_rest() {
        let car = VehicleState::at_rest(0.0, 0.0, 0.0);
        let next = integrate(car, press(false, true, false, false), &P);
        assert_relative_eq!(next.velocity_z, -P.acceleration * P.friction);
        assert!(next.z < 0.0);
    }

    #[test]
    fn speed_is_clamped() {
        let mut car = VehicleState::at_rest(0.0, 0.0, 0.3);
        for _ in 0..2000 {
            car = integrate(car, press(true, false, false, false), &P);
            assert!(car.speed() <= P.max_speed + 1e-12);
        }
        let fast = VehicleState {
            velocity_x: 3.0,
            velocity_z: 4.0,
            ..VehicleState::at_rest(0.0, 0.0, 0.0)
        };
        let next = integrate(fast, VehicleInput::NONE, &P);
        assert_relative_eq!(next.speed(), P.max_speed);
        assert_relative_eq!(next.velocity_x / next.velocity_z, 0.75);
    }

    #[test]
    fn friction_brings_a_coasting_vehicle_to_exact_rest() {
        let mut car = VehicleState {
            velocity_x: -0.12,
            velocity_z: 0.16,
            ..VehicleState::at_rest(0.0, 0.0, 0.0)
        };
        let mut ticks = 0;
        while car.velocity_x != 0.0 || car.velocity_z != 0.0 {
            car = integrate(car, VehicleInput::NONE, &P);
            ticks += 1;
            assert!(ticks <= 300, "still moving after {ticks} ticks");
        }
        assert_eq!(car.speed(), 0.0);
        let parked = integrate(car, VehicleInput::NONE, &P);
        assert_eq!(parked, car);
    }

    #[test]
    fn tiny_speeds_snap_to_zero() {
        let car = VehicleState {
            velocity_x: 0.0005,
            ..VehicleState::at_rest(1.0, 1.0, 0.0)
        };
        let next = integrate(car, VehicleInput::NONE, &P);
        assert_eq!(next.velocity_x, 0.0);
        assert_eq!(next.x, 1.0);
    }
}
