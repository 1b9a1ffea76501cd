//! # Arm library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the arm crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm state - the persistent Cartesian target of the arm head and the claw angle
pub mod arm_state;

/// Joystick module - filters raw stick samples and integrates them into the arm state
pub mod joystick;

/// Arm control module - converts the arm state into joint angles via inverse kinematics
pub mod arm_ctrl;

/// Servo control module - converts joint angles into pulse timer ticks on actuator channels
pub mod servo_ctrl;

/// Sample sources - provide the raw analog samples for each cycle
pub mod sample_src;

/// Control loop - runs one full sample to actuator pass per cycle
pub mod control_loop;

/// Parameters for the arm executable
pub mod params;
