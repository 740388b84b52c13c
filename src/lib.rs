//! Phobz Scope Core
//!
//! GPU-accelerated live plotting of an audio signal (waveform or spectrum)
//! at display refresh rate.
//!
//! # Features
//!
//! - Pull-style sample sources, resampled onto one texel per pixel column
//! - GPU rendering via wgpu (Metal on macOS, Vulkan on Linux)
//! - Owned-surface and offscreen drawables behind one trait
//! - Host-ticked ([`ManualDriver`]) and view-delegate ([`ManagedDriver`]) modes
//! - JSON configuration for colours and plot flags

pub mod audio;
pub mod config;
pub mod gpu;
pub mod present;

// Re-export commonly used types
pub use audio::{resample, SampleSource, SharedSamples, SineSweep};
pub use config::{parse_hex_color, ConfigError, PlotConfig};
pub use gpu::{DriverState, GpuContext, GpuError, PlotRenderer, StyleDescriptor};
pub use present::{
    AcquireError, Drawable, DrawableSource, FrameOutcome, FrameSync, ManagedDriver, ManualDriver,
    OffscreenDrawables, SkipReason, SurfaceDrawables, ViewDelegate,
};
