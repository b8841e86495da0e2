//! Minimal retained scene graph: a stage holding attachable containers of filled rectangles.

pub(crate) mod context;
pub(crate) mod stage;
