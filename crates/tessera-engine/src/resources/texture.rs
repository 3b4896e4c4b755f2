use std::rc::Rc;

use crate::alloc::SharedRegister;
use crate::object::{Object, Resource};

use super::error::{ResourceError, Result};
use super::size::{block_counts, bytes_per_block, texture_byte_size};

/// Creation parameters for a 2D texture or renderbuffer.
#[derive(Debug, Copy, Clone)]
pub struct TextureArgs {
    pub format: wgpu::TextureFormat,
    pub usage: wgpu::TextureUsages,
    pub width: u32,
    pub height: u32,
    pub sample_count: u32,
}

/// wgpu side of a [`Texture2D`] or [`Renderbuffer`](super::Renderbuffer).
pub struct TextureResource {
    device: wgpu::Device,
    args: TextureArgs,
}

impl TextureResource {
    pub(super) fn new(device: &wgpu::Device) -> Self {
        Self {
            device: device.clone(),
            args: TextureArgs {
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::empty(),
                width: 0,
                height: 0,
                sample_count: 1,
            },
        }
    }

    pub fn args(&self) -> &TextureArgs {
        &self.args
    }

    /// Bytes of GPU memory the current configuration occupies.
    pub fn byte_size(&self) -> u64 {
        let a = &self.args;
        texture_byte_size(a.format, a.width, a.height) * u64::from(a.sample_count)
    }

    /// Zero-sized textures are not representable in wgpu and yield `None`.
    pub(super) fn create_texture(&self, identifier: &str) -> Option<wgpu::Texture> {
        let a = &self.args;
        if a.width == 0 || a.height == 0 {
            return None;
        }

        Some(self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(identifier),
            size: wgpu::Extent3d {
                width: a.width,
                height: a.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: a.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: a.format,
            usage: a.usage,
            view_formats: &[],
        }))
    }

    pub(super) fn set_size(&mut self, width: u32, height: u32) {
        self.args.width = width;
        self.args.height = height;
    }
}

impl Resource for TextureResource {
    type Handle = wgpu::Texture;
    type Args = TextureArgs;

    fn create(&mut self, identifier: &str, args: TextureArgs) -> Option<wgpu::Texture> {
        self.args = args;
        self.create_texture(identifier)
    }

    fn destroy(&mut self, handle: wgpu::Texture) {
        handle.destroy();
    }
}

/// Resizes the backing texture of `object`, keeping the register in sync.
pub(super) fn resize(object: &mut Object<TextureResource>, width: u32, height: u32) -> Result<()> {
    object.assert_initialized()?;

    let args = object.resource().args;
    if args.width == width && args.height == height {
        return Ok(());
    }

    let identifier = object.identifier().unwrap_or(object.name()).to_string();
    object.resource_mut().set_size(width, height);
    let handle = object.resource().create_texture(&identifier);
    object.replace_handle(handle)?;
    object.track(object.resource().byte_size())?;
    Ok(())
}

pub(super) fn texture(object: &Object<TextureResource>) -> Result<&wgpu::Texture> {
    object.handle()?.ok_or_else(|| {
        ResourceError::Invalid(object.identifier().unwrap_or(object.name()).to_string())
    })
}

/// Sampled 2D texture with a single mip level.
pub struct Texture2D {
    object: Object<TextureResource>,
}

impl Texture2D {
    pub fn new(device: &wgpu::Device, register: &SharedRegister, name: &str) -> Self {
        Self {
            object: Object::new(Rc::clone(register), name, TextureResource::new(device)),
        }
    }

    /// Zero extents initialize an invalid texture that can be resized later.
    pub fn initialize(
        &mut self,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> Result<bool> {
        let valid = self.object.initialize(TextureArgs {
            format,
            usage: usage | wgpu::TextureUsages::COPY_DST,
            width,
            height,
            sample_count: 1,
        })?;
        self.object.track(self.object.resource().byte_size())?;
        Ok(valid)
    }

    pub fn uninitialize(&mut self) -> Result<()> {
        Ok(self.object.uninitialize()?)
    }

    /// Recreates the texture at the new size. Contents are not preserved.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        resize(&mut self.object, width, height)
    }

    /// Replaces the full image. `data` must be tightly packed.
    pub fn write(&self, queue: &wgpu::Queue, data: &[u8]) -> Result<()> {
        let texture = texture(&self.object)?;
        let a = self.object.resource().args;

        let expected = texture_byte_size(a.format, a.width, a.height);
        if data.len() as u64 != expected {
            return Err(ResourceError::DataSize {
                identifier: self.object.identifier().unwrap_or_default().to_string(),
                expected,
                actual: data.len() as u64,
            });
        }

        let (blocks_x, blocks_y) = block_counts(a.format, a.width, a.height);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(blocks_x * bytes_per_block(a.format)),
                rows_per_image: Some(blocks_y),
            },
            wgpu::Extent3d {
                width: a.width,
                height: a.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    pub fn view(&self) -> Result<wgpu::TextureView> {
        Ok(texture(&self.object)?.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    pub fn texture(&self) -> Result<&wgpu::Texture> {
        texture(&self.object)
    }

    /// `(width, height)`; zero while uninitialized.
    pub fn size(&self) -> (u32, u32) {
        if self.object.initialized() {
            let a = self.object.resource().args;
            (a.width, a.height)
        } else {
            (0, 0)
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.object.resource().args.format
    }

    pub fn object(&self) -> &Object<TextureResource> {
        &self.object
    }
}
