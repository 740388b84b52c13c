//! GPU rendering using wgpu.
//!
//! Renders the plot with the Metal backend on macOS and Vulkan/GL elsewhere:
//! one pipeline built at construction, one single-row waveform texture sized to the
//! surface width, one style uniform rewritten per frame.

pub mod context;
pub mod encoder;
pub mod layouts;
pub mod pipeline;
pub mod renderer;
pub mod style;
pub mod textures;

pub use context::{GpuContext, GpuError};
pub use encoder::{encode_frame, EncodedFrame};
pub use pipeline::PlotPipeline;
pub use renderer::{DriverState, PlotRenderer};
pub use style::{StyleBlock, StyleDescriptor, STYLE_BLOCK_SIZE};
pub use textures::{TextureManager, WaveformTexture};
