//! GPU context initialization and management.
//!
//! A [`GpuContext`] is built once by the host and handed to every renderer
//! and drawable source that needs it. Nothing in the crate keeps hidden
//! process-wide device state.

use std::sync::Arc;
use wgpu::{Adapter, Device, Instance, Queue, Surface};

/// Errors that can occur while setting up or reading back GPU resources.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("Surface is not supported by the selected adapter")]
    UnsupportedSurface,
    #[error("GPU readback failed: {0}")]
    Readback(String),
}

/// GPU context holding the device and queue shared by renderers.
#[derive(Clone)]
pub struct GpuContext {
    pub instance: Arc<Instance>,
    pub adapter: Arc<Adapter>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a context for headless rendering.
    ///
    /// Prefers Metal on macOS, falls back to other backends.
    pub async fn new() -> Result<Self, GpuError> {
        let instance = Self::create_instance();
        Self::from_instance(instance, None).await
    }

    /// Blocking variant of [`GpuContext::new`] for hosts without an executor.
    pub fn new_blocking() -> Result<Self, GpuError> {
        pollster::block_on(Self::new())
    }

    /// Create a context plus a presentable surface for `target`.
    ///
    /// The adapter is chosen to be compatible with the surface.
    pub async fn with_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
    ) -> Result<(Self, Surface<'static>), GpuError> {
        let instance = Self::create_instance();
        let surface = instance.create_surface(target)?;
        let ctx = Self::from_instance(instance, Some(&surface)).await?;
        Ok((ctx, surface))
    }

    fn create_instance() -> Instance {
        Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::METAL | wgpu::Backends::VULKAN | wgpu::Backends::GL,
            ..Default::default()
        })
    }

    async fn from_instance(
        instance: Instance,
        compatible_surface: Option<&Surface<'static>>,
    ) -> Result<Self, GpuError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!(
            "Selected GPU adapter {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("phobz-scope"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        Ok(Self {
            instance: Arc::new(instance),
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Get info about the GPU adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Widest waveform texture the device accepts.
    pub fn max_texture_width(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gpu_context_creation() {
        let ctx = GpuContext::new().await;
        // May fail on CI without GPU, so just check it doesn't panic
        if let Ok(ctx) = ctx {
            let info = ctx.adapter_info();
            assert!(!info.name.is_empty());
            assert!(ctx.max_texture_width() >= 1);
        }
    }

    #[tokio::test]
    async fn test_context_clones_share_device() {
        let Ok(ctx) = GpuContext::new().await else {
            return;
        };
        let copy = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.device, &copy.device));
        assert!(Arc::ptr_eq(&ctx.queue, &copy.queue));
    }
}
