use anyhow::{Context as _, Result};
use tessera_caps::Backend;

use crate::alloc::{AllocationRegister, SharedRegister};
use crate::masquerade::{MasqueradeConfig, Preset};
use crate::resources::{Buffer, Renderbuffer, Texture2D};

use super::capabilities::{extension_features, Capabilities};

/// Initialization parameters for a [`Context`].
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Backend kind to report. A masquerade may override it.
    pub backend: Backend,

    pub power_preference: wgpu::PowerPreference,

    /// Features the device must have. Features that back optional
    /// extensions are enabled on top when the adapter offers them.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter. Defaults depend on `backend`.
    pub required_limits: Option<wgpu::Limits>,

    pub masquerade: MasqueradeConfig,

    /// Presets that `masquerade.preset` is looked up in.
    pub presets: Vec<Preset>,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            backend: Backend::WebGl2,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: None,
            masquerade: MasqueradeConfig::default(),
            presets: Preset::builtin(),
        }
    }
}

impl ContextInit {
    /// Default parameters with the masquerade taken from the environment.
    pub fn from_env() -> Self {
        Self {
            masquerade: MasqueradeConfig::from_env(),
            ..Self::default()
        }
    }
}

/// Default limits for a backend kind.
pub fn backend_limits(backend: Backend) -> wgpu::Limits {
    match backend {
        Backend::WebGl1 => wgpu::Limits::downlevel_webgl2_defaults(),
        Backend::WebGl2 => wgpu::Limits::downlevel_defaults(),
    }
}

/// Headless rendering context.
///
/// Owns the wgpu device/queue, the allocation register shared by every
/// resource created from it, and the capability view.
pub struct Context {
    /// Kept alive for the lifetime of the adapter and device.
    #[allow(dead_code)]
    instance: wgpu::Instance,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    register: SharedRegister,
    capabilities: Capabilities,
}

impl Context {
    /// Creates a context without a surface.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: ContextInit) -> Result<Self> {
        let ContextInit {
            backend,
            power_preference,
            required_features,
            required_limits,
            masquerade,
            presets,
        } = init;

        let masquerade = masquerade.resolve(&presets);
        let backend = masquerade.as_ref().map_or(backend, |m| m.backend());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let optional = adapter.features() & extension_features();
        let required_limits = required_limits.unwrap_or_else(|| backend_limits(backend));

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tessera device"),
                required_features: required_features | optional,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let capabilities = Capabilities::new(backend, device.features(), masquerade);
        let info = adapter.get_info();
        log::info!(
            "context on {} ({:?}) as {}, extensions hash {}",
            info.name,
            info.backend,
            capabilities.backend(),
            capabilities.hash()
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            register: AllocationRegister::shared(),
            capabilities,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn allocation_register(&self) -> &SharedRegister {
        &self.register
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.capabilities.backend()
    }

    /// Creates an uninitialized buffer tracked by this context.
    pub fn buffer(&self, name: &str) -> Buffer {
        Buffer::new(&self.device, &self.register, name)
    }

    /// Creates an uninitialized 2D texture tracked by this context.
    pub fn texture_2d(&self, name: &str) -> Texture2D {
        Texture2D::new(&self.device, &self.register, name)
    }

    /// Creates an uninitialized renderbuffer tracked by this context.
    pub fn renderbuffer(&self, name: &str) -> Renderbuffer {
        Renderbuffer::new(&self.device, &self.register, name)
    }
}
