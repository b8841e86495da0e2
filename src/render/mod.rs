//! Rasterization of the stage into RGBA8 frames.

/// Backend trait and frame type.
pub mod backend;
/// CPU backend powered by `vello_cpu`.
pub mod cpu;
