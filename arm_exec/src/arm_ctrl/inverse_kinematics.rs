//! Arm inverse kinematics calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;

// Internal imports
use super::*;
use crate::arm_state::ArmState;
use util::maths::{acos_clamped_deg, atan2_deg, clamp};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Intermediate values of an inverse kinematics solution.
///
/// Units: centimeters and degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IkGeometry {
    /// Distance from the base axis to the target in the base plane.
    pub planar_radius_cm: f64,

    /// Straight line distance from the shoulder to the target.
    pub reach_cm: f64,

    /// Elevation of the target above the base plane.
    pub phi_deg: f64,

    /// Angle between the forearm and the line to the target.
    pub theta1_deg: f64,

    /// Included angle at the elbow between the forearm and the arm.
    pub theta2_deg: f64,

    /// Base, shoulder, elbow and wrist angles before limiting.
    pub raw_deg: [f64; NUM_IK_JOINTS],
}

/// A complete inverse kinematics solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IkSolution {
    /// The limited joint angles to command.
    pub angles: JointAngles,

    /// Intermediate geometry the angles were derived from.
    pub geometry: IkGeometry,

    /// True for each of base, shoulder, elbow and wrist if the raw angle had
    /// to be clamped into the joint limits.
    pub clamped: [bool; NUM_IK_JOINTS],
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the inverse kinematics for the given arm target.
///
/// The target is first converted into the base yaw and the planar triangle
/// formed by the forearm, the arm and the line from the shoulder to the
/// target. The shoulder and elbow angles then come from the law of cosines.
/// The wrist is set so the claw stays level whatever the arm configuration.
///
/// Returns `None` if the target is further away than the arm can reach.
///
/// Both cosines are clamped into `[-1, 1]` before inversion so rounding at
/// the edge of the workspace can never produce NaN. The final joint angles
/// are clamped into the joint limits without re-solving, so close to the
/// limits the commanded pose is an approximation of the target.
pub fn solve(state: &ArmState, params: &Params) -> Option<IkSolution> {
    let (x, y, z) = (state.x_cm, state.y_cm, state.z_cm);
    let forearm = params.forearm_length_cm;
    let arm = params.arm_length_cm;

    let base_deg = atan2_deg(y, x);
    let planar_radius_cm = (x.powi(2) + y.powi(2)).sqrt();
    let reach_cm = (planar_radius_cm.powi(2) + z.powi(2)).sqrt();
    let phi_deg = atan2_deg(z, planar_radius_cm);

    // Outside the workspace
    if reach_cm > params.max_reach_cm() {
        return None;
    }

    // At zero reach this is 0/0 (equal links) or +/-inf, which the clamped
    // acos treats as saturated.
    let theta1_deg = acos_clamped_deg(
        (forearm.powi(2) + reach_cm.powi(2) - arm.powi(2)) / (2.0 * forearm * reach_cm),
    );
    let theta2_deg = acos_clamped_deg(
        (forearm.powi(2) + arm.powi(2) - reach_cm.powi(2)) / (2.0 * forearm * arm),
    );

    let raw_deg = [
        base_deg,
        theta1_deg + phi_deg,
        360.0 - params.elbow_offset_deg - theta2_deg,
        180.0 - theta1_deg - theta2_deg - phi_deg,
    ];

    let mut limited_deg = [0.0; NUM_IK_JOINTS];
    let mut clamped = [false; NUM_IK_JOINTS];
    for i in 0..NUM_IK_JOINTS {
        limited_deg[i] = clamp(
            &raw_deg[i],
            &params.min_joint_deg[i],
            &params.max_joint_deg[i],
        );
        clamped[i] = limited_deg[i] != raw_deg[i];
    }

    Some(IkSolution {
        angles: JointAngles {
            base_deg: limited_deg[0],
            shoulder_deg: limited_deg[1],
            elbow_deg: limited_deg[2],
            wrist_deg: limited_deg[3],
            claw_deg: clamp(&state.claw_deg, &0.0, &params.max_claw_deg),
        },
        geometry: IkGeometry {
            planar_radius_cm,
            reach_cm,
            phi_deg,
            theta1_deg,
            theta2_deg,
            raw_deg,
        },
        clamped,
    })
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Perform the inverse kinematics calculations for the given target.
    ///
    /// Inverse kinematics is described in
    /// https://en.wikipedia.org/wiki/Inverse_kinematics. On success the whole
    /// joint configuration is replaced. If the target is out of the workspace
    /// the previous configuration is kept untouched.
    pub(crate) fn calc_inverse_kinematics(&mut self, target: &ArmState) -> SolveStatus {
        match solve(target, &self.params) {
            Some(solution) => {
                self.angles = solution.angles;
                self.report.clamped = solution.clamped;
                self.last_geometry = Some(solution.geometry);
                SolveStatus::Accepted
            }
            None => {
                self.num_rejected += 1;
                debug!(
                    "Target ({:.3}, {:.3}, {:.3}) out of workspace, holding joint angles",
                    target.x_cm, target.y_cm, target.z_cm
                );
                SolveStatus::OutOfWorkspace
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn target(x_cm: f64, y_cm: f64, z_cm: f64) -> ArmState {
        ArmState {
            x_cm,
            y_cm,
            z_cm,
            claw_deg: 0.0,
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{} != {}", a, b);
    }

    #[test]
    fn test_neutral_target() {
        let sol = solve(&target(0.0, 12.0, 12.0), &Params::default()).unwrap();

        assert_close(sol.geometry.planar_radius_cm, 12.0);
        assert_close(sol.geometry.reach_cm, 288f64.sqrt());
        assert_close(sol.geometry.phi_deg, 45.0);
        assert_close(sol.geometry.theta1_deg, 45.0);
        assert_close(sol.geometry.theta2_deg, 90.0);

        assert_close(sol.angles.base_deg, 90.0);
        assert_close(sol.angles.shoulder_deg, 90.0);
        assert_close(sol.angles.elbow_deg, 135.0);
        assert_close(sol.angles.wrist_deg, 0.0);
        assert_eq!(sol.angles.claw_deg, 0.0);
    }

    #[test]
    fn test_full_vertical_extension() {
        // Reach exactly equals the sum of the links
        let sol = solve(&target(0.0, 0.0, 24.0), &Params::default()).unwrap();

        assert_eq!(sol.geometry.reach_cm, 24.0);
        assert_close(sol.geometry.phi_deg, 90.0);

        // Forearm points straight at the target, the elbow is fully open
        assert_eq!(sol.geometry.theta1_deg, 0.0);
        assert_close(sol.geometry.theta2_deg, 180.0);

        assert_close(sol.angles.shoulder_deg, 90.0);
        assert_close(sol.angles.elbow_deg, 45.0);

        // The level wrist would need -90 degrees
        assert_close(sol.geometry.raw_deg[3], -90.0);
        assert_eq!(sol.angles.wrist_deg, 0.0);
        assert_eq!(sol.clamped, [false, false, false, true]);
    }

    #[test]
    fn test_full_horizontal_extension() {
        let sol = solve(&target(0.0, 24.0, 0.0), &Params::default()).unwrap();

        assert_close(sol.angles.base_deg, 90.0);
        assert_eq!(sol.geometry.phi_deg, 0.0);
        assert_eq!(sol.angles.shoulder_deg, 0.0);
        assert_close(sol.angles.elbow_deg, 45.0);
        assert_close(sol.angles.wrist_deg, 0.0);
    }

    #[test]
    fn test_out_of_workspace() {
        let params = Params::default();

        assert!(solve(&target(0.0, 0.0, 25.0), &params).is_none());
        assert!(solve(&target(24.0, 24.0, 0.0), &params).is_none());
        assert!(solve(&target(-24.0, 24.0, 24.0), &params).is_none());
    }

    #[test]
    fn test_folded_at_origin() {
        // Zero reach, the theta1 cosine is 0/0
        let sol = solve(&target(0.0, 0.0, 0.0), &Params::default()).unwrap();

        assert_eq!(sol.geometry.theta1_deg, 0.0);
        assert_eq!(sol.geometry.theta2_deg, 0.0);
        assert_eq!(sol.geometry.raw_deg[2], 225.0);
        assert_eq!(sol.angles.elbow_deg, 180.0);
        assert_eq!(sol.angles.wrist_deg, 180.0);

        for joint in Joint::IK_JOINTS.iter() {
            assert!(sol.angles.get(*joint).is_finite());
        }
    }

    #[test]
    fn test_unequal_links_at_origin() {
        let params = Params {
            forearm_length_cm: 14.0,
            arm_length_cm: 10.0,
            ..Params::default()
        };

        // Cosine of theta1 is +inf here
        let sol = solve(&target(0.0, 0.0, 0.0), &params).unwrap();
        assert_eq!(sol.geometry.theta1_deg, 0.0);
        assert!(sol.angles.shoulder_deg.is_finite());
    }

    #[test]
    fn test_base_quadrants() {
        let params = Params::default();

        let right = solve(&target(12.0, 0.0, 12.0), &params).unwrap();
        assert_eq!(right.angles.base_deg, 0.0);

        let left = solve(&target(-12.0, 0.0, 12.0), &params).unwrap();
        assert_close(left.angles.base_deg, 180.0);

        let diag = solve(&target(-8.0, 8.0, 4.0), &params).unwrap();
        assert_close(diag.angles.base_deg, 135.0);

        // Mirrored targets give the same arm configuration
        assert_eq!(right.angles.shoulder_deg, left.angles.shoulder_deg);
        assert_eq!(right.angles.elbow_deg, left.angles.elbow_deg);
    }

    #[test]
    fn test_angles_always_in_limits() {
        let params = Params::default();

        let mut x = -24.0;
        while x <= 24.0 {
            let mut y = 0.0;
            while y <= 24.0 {
                let mut z = 0.0;
                while z <= 24.0 {
                    let state = ArmState {
                        x_cm: x,
                        y_cm: y,
                        z_cm: z,
                        claw_deg: 120.0,
                    };

                    if let Some(sol) = solve(&state, &params) {
                        for (i, joint) in Joint::IK_JOINTS.iter().enumerate() {
                            let a = sol.angles.get(*joint);
                            assert!(
                                a >= params.min_joint_deg[i] && a <= params.max_joint_deg[i],
                                "{:?} = {} for ({}, {}, {})",
                                joint,
                                a,
                                x,
                                y,
                                z
                            );
                        }
                        assert_eq!(sol.angles.claw_deg, 90.0);
                        assert!(sol.geometry.reach_cm <= params.max_reach_cm());
                    }

                    z += 0.75;
                }
                y += 0.75;
            }
            x += 0.75;
        }
    }

    #[test]
    fn test_elbow_offset() {
        let params = Params {
            elbow_offset_deg: 180.0,
            ..Params::default()
        };

        let sol = solve(&target(0.0, 12.0, 12.0), &params).unwrap();
        assert_close(sol.angles.elbow_deg, 90.0);
    }
}
