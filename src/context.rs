//! Headless GPU Context
//!
//! [`GpuContext`] holds the device and queue for offline baking. Unlike an
//! interactive renderer there is no surface: the adapter is requested without
//! a compatible window and every output stays in GPU textures owned by the
//! caller.

use crate::errors::{BakeError, Result};

/// Core wgpu handles for a bake session.
pub struct GpuContext {
    /// The wgpu device for resource creation.
    pub device: wgpu::Device,
    /// The command submission queue.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Requests a default adapter and device.
    ///
    /// Any failure here is fatal to the whole precomputation; there is no
    /// retry or fallback path.
    pub async fn new() -> Result<Self> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BakeError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("IBL Bake Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        log::info!(
            "IBL bake device ready on adapter: {}",
            adapter.get_info().name
        );

        Ok(Self { device, queue })
    }
}
