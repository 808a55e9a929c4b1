//! Rendering module
//!
//! The simulation hands a [`Frame`] snapshot to a [`RenderSink`] once per
//! stepped tick. Drawing itself happens in the sink.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{EntityPose, Frame, LogSink, RenderSink};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
