// src/motion/trajectory.rs
//! LSPB trajectory generator for single-joint motion commands.
//!
//! Implements the linear-segment-with-parabolic-blend profile: a
//! constant-acceleration ramp up to cruise speed, a constant-velocity
//! middle segment, and a mirrored ramp back down to the goal position.
//! The profile is continuous and once-differentiable everywhere except
//! at the two ramp/cruise junctions, where the second derivative jumps.

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

/// Default sample spacing of the output grid (seconds).
pub const DEFAULT_TIME_STEP: f64 = 0.02;

/// Start and goal positions closer than this are treated as already
/// coincident, producing a hold-at-goal trajectory.
pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.01;

/// Floor applied to a recomputed cruise velocity so the blend-time
/// division stays finite.
pub const DEFAULT_VELOCITY_FLOOR: f64 = 1e-6;

/// Guard added to `tf / dt` before truncation so a duration that is an
/// exact step multiple in real arithmetic keeps its final sample.
const GRID_FUZZ: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("invalid duration {duration}: must be positive")]
    InvalidDuration { duration: f64 },

    #[error(
        "insufficient time: covering {distance} units at speed {speed} \
         needs {required:.3}s, only {available:.3}s allotted"
    )]
    InsufficientTime {
        distance: f64,
        speed: f64,
        required: f64,
        available: f64,
    },

    #[error("sample count mismatch: expected {expected}, produced {actual}")]
    InternalConsistency { expected: usize, actual: usize },
}

/// Boundary conditions for one discrete motion command.
///
/// Units are caller-defined; the limb rig uses degrees and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRequest {
    /// Start position.
    pub start: f64,
    /// Goal position.
    pub end: f64,
    /// Total motion duration (seconds), must be positive.
    pub duration: f64,
    /// Requested cruise speed magnitude. Reduced automatically when the
    /// blend shape cannot spread it over the full duration.
    pub speed: f64,
}

/// Motion state at one sample of the output grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionPoint {
    /// Time since motion start (seconds).
    pub time: f64,
    /// Position at this time.
    pub position: f64,
    /// Velocity at this time.
    pub velocity: f64,
    /// Acceleration at this time.
    pub acceleration: f64,
}

/// The two junction times separating ramp-up, cruise, and ramp-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentBoundaries {
    /// End of the acceleration ramp (seconds).
    pub blend_time: f64,
    /// Start of the deceleration ramp (seconds), `tf - blend_time`.
    pub ramp_down_start: f64,
}

/// Which segment of the profile a given time falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    RampUp,
    Cruise,
    RampDown,
}

/// A sampled LSPB profile together with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<MotionPoint>,
    boundaries: SegmentBoundaries,
    cruise_velocity: f64,
    ramp_acceleration: f64,
}

impl Trajectory {
    /// The sampled motion states, in time order.
    pub fn points(&self) -> &[MotionPoint] {
        &self.points
    }

    /// Just the position series, for callers that consume it at their own
    /// control-loop rate.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.position)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Junction times of the three segments.
    pub fn boundaries(&self) -> SegmentBoundaries {
        self.boundaries
    }

    /// The effective (possibly reduced) signed cruise velocity.
    pub fn cruise_velocity(&self) -> f64 {
        self.cruise_velocity
    }

    /// The signed constant acceleration of the ramp segments.
    pub fn ramp_acceleration(&self) -> f64 {
        self.ramp_acceleration
    }

    /// Classify a time against the segment boundaries.
    pub fn segment_at(&self, time: f64) -> Segment {
        if time <= self.boundaries.blend_time {
            Segment::RampUp
        } else if time <= self.boundaries.ramp_down_start {
            Segment::Cruise
        } else {
            Segment::RampDown
        }
    }
}

/// Generator for single-joint LSPB trajectories.
///
/// Pure computation: no I/O, no shared state, deterministic for identical
/// inputs. Safe to call from multiple threads without coordination.
#[derive(Debug, Clone)]
pub struct TrajectoryGenerator {
    /// Output grid spacing (seconds).
    time_step: f64,
    /// Start/goal coincidence threshold.
    position_tolerance: f64,
    /// Lower bound on a recomputed cruise velocity.
    velocity_floor: f64,
}

impl Default for TrajectoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryGenerator {
    /// Create a generator with the default sampling and tolerance constants.
    pub fn new() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            velocity_floor: DEFAULT_VELOCITY_FLOOR,
        }
    }

    /// Create a generator from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            time_step: config.sampling.time_step,
            position_tolerance: config.tolerance.position,
            velocity_floor: config.tolerance.velocity_floor,
        }
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Smallest duration that can cover the requested distance at the given
    /// cruise speed. Zero for motions inside the position tolerance. Callers
    /// use this to pick a longer duration after an insufficient-time error.
    pub fn min_duration(&self, start: f64, end: f64, speed: f64) -> f64 {
        let distance = (end - start).abs();
        if distance < self.position_tolerance {
            0.0
        } else {
            distance / speed
        }
    }

    /// Generate a sampled trajectory for the given boundary conditions.
    ///
    /// The caller-requested speed is honored when achievable; a speed too
    /// high for the blend shape to spread over the duration is replaced by
    /// the exact velocity that makes the three segments span the duration.
    /// A speed too low to cover the distance at all is an error: no partial
    /// trajectory is ever returned.
    pub fn generate(&self, request: &TrajectoryRequest) -> Result<Trajectory, TrajectoryError> {
        let TrajectoryRequest {
            start: q0,
            end: qf,
            duration: tf,
            speed,
        } = *request;

        if tf <= 0.0 {
            return Err(TrajectoryError::InvalidDuration { duration: tf });
        }

        let expected = self.grid_len(tf);

        // Hold at the goal when the endpoints already coincide.
        if (q0 - qf).abs() < self.position_tolerance {
            let points = (0..expected)
                .map(|i| MotionPoint {
                    time: (i as f64 * self.time_step).min(tf),
                    position: qf,
                    velocity: 0.0,
                    acceleration: 0.0,
                })
                .collect();
            return Ok(Trajectory {
                points,
                boundaries: SegmentBoundaries {
                    blend_time: 0.0,
                    ramp_down_start: tf,
                },
                cruise_velocity: 0.0,
                ramp_acceleration: 0.0,
            });
        }

        // Compute in an ascending frame; re-scale on output. Caller values
        // are never mutated.
        let scale = if qf < q0 { -1.0 } else { 1.0 };
        let a0 = scale * q0;
        let af = scale * qf;
        let distance = af - a0;

        // A zero speed yields an infinite required time here and fails the
        // same way any too-slow request does.
        let required = distance / speed;
        if required > tf {
            return Err(TrajectoryError::InsufficientTime {
                distance,
                speed,
                required,
                available: tf,
            });
        }

        let v = if 2.0 * distance / speed <= tf {
            let reduced = (2.0 * distance / tf).max(self.velocity_floor);
            tracing::debug!(
                requested = speed,
                effective = reduced,
                "requested speed not spreadable over duration, \
                 substituting blend-consistent velocity"
            );
            reduced
        } else {
            speed
        };

        let blend_time = (a0 - af + v * tf) / v;
        // A zero blend time is the exact-feasibility limit: the profile is
        // pure cruise and the ramps carry no samples.
        let alpha = if blend_time > 0.0 { v / blend_time } else { 0.0 };
        let ramp_down_start = tf - blend_time;

        // Build the three segments in time order and concatenate.
        let mut ramp_up = Vec::new();
        let mut cruise = Vec::new();
        let mut ramp_down = Vec::new();
        for i in 0..expected {
            let t = (i as f64 * self.time_step).min(tf);
            if t <= blend_time {
                ramp_up.push(MotionPoint {
                    time: t,
                    position: scale * (a0 + 0.5 * alpha * t * t),
                    velocity: scale * (alpha * t),
                    acceleration: scale * alpha,
                });
            } else if t <= ramp_down_start {
                cruise.push(MotionPoint {
                    time: t,
                    position: scale * (0.5 * (af + a0 - v * tf) + v * t),
                    velocity: scale * v,
                    acceleration: 0.0,
                });
            } else {
                ramp_down.push(MotionPoint {
                    time: t,
                    position: scale
                        * (af - 0.5 * alpha * tf * tf + alpha * tf * t - 0.5 * alpha * t * t),
                    velocity: scale * (alpha * (tf - t)),
                    acceleration: scale * -alpha,
                });
            }
        }

        let mut points = ramp_up;
        points.append(&mut cruise);
        points.append(&mut ramp_down);
        if points.len() != expected {
            // Segment partition bug, not a bad request.
            return Err(TrajectoryError::InternalConsistency {
                expected,
                actual: points.len(),
            });
        }

        Ok(Trajectory {
            points,
            boundaries: SegmentBoundaries {
                blend_time,
                ramp_down_start,
            },
            cruise_velocity: scale * v,
            ramp_acceleration: scale * alpha,
        })
    }

    /// Convenience wrapper taking the four boundary scalars directly.
    pub fn generate_move(
        &self,
        start: f64,
        end: f64,
        duration: f64,
        speed: f64,
    ) -> Result<Trajectory, TrajectoryError> {
        self.generate(&TrajectoryRequest {
            start,
            end,
            duration,
            speed,
        })
    }

    fn grid_len(&self, tf: f64) -> usize {
        (tf / self.time_step + GRID_FUZZ).floor() as usize + 1
    }
}
