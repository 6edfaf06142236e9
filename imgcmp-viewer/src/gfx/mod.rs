//! GPU rendering subsystem.
//!
//! Sub-modules:
//!   state    : wgpu device/surface lifecycle
//!   pipeline : WGSL checks and render pipeline construction
//!   backend  : `GpuBackend` implementation, frame recording and submission

mod backend;
mod pipeline;
mod state;

pub use backend::WgpuBackend;
pub use pipeline::check_wgsl;
pub use state::GpuState;
