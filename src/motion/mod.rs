// src/motion/mod.rs
//! Motion-profile generation for single-joint limb commands.

pub mod trajectory;

pub use trajectory::{
    MotionPoint, Segment, SegmentBoundaries, Trajectory, TrajectoryError, TrajectoryGenerator,
    TrajectoryRequest,
};
