//! Application shell: winit lifecycle and event dispatch.
//!
//! The shell owns the event loop, the window and the GPU backend. Platform
//! events become `InputState` calls; frames go through `FrameRenderer`.

pub(crate) mod app;
mod events;

pub use app::{ViewerApp, run};
