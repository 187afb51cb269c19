// src/lib.rs
//! LSPB motion-profile generation for a myoelectric limb controller.
//!
//! The crate's one job: turn a discrete motion command (start position,
//! goal position, duration, cruise speed) into a sampled position/velocity/
//! acceleration trajectory shaped as a linear segment with parabolic
//! blends. Arm-state update loops feed it boundary conditions once per
//! command and consume the returned series at their own control rate.

pub mod config;
pub mod motion;

pub use config::{Config, ConfigError};
pub use motion::trajectory::{
    MotionPoint, Segment, SegmentBoundaries, Trajectory, TrajectoryError, TrajectoryGenerator,
    TrajectoryRequest,
};
