use std::rc::Rc;

use crate::alloc::SharedRegister;
use crate::object::Object;

use super::error::Result;
use super::texture::{self, TextureArgs, TextureResource};

/// Render-attachment-only texture (color or depth/stencil), optionally
/// multisampled. Tracked as `texel bytes * samples`.
pub struct Renderbuffer {
    object: Object<TextureResource>,
}

impl Renderbuffer {
    pub fn new(device: &wgpu::Device, register: &SharedRegister, name: &str) -> Self {
        Self {
            object: Object::new(Rc::clone(register), name, TextureResource::new(device)),
        }
    }

    pub fn initialize(
        &mut self,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Result<bool> {
        let valid = self.object.initialize(TextureArgs {
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            width,
            height,
            sample_count: sample_count.max(1),
        })?;
        self.object.track(self.object.resource().byte_size())?;
        Ok(valid)
    }

    pub fn uninitialize(&mut self) -> Result<()> {
        Ok(self.object.uninitialize()?)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        texture::resize(&mut self.object, width, height)
    }

    pub fn view(&self) -> Result<wgpu::TextureView> {
        Ok(texture::texture(&self.object)?.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    pub fn sample_count(&self) -> u32 {
        self.object.resource().args().sample_count
    }

    pub fn object(&self) -> &Object<TextureResource> {
        &self.object
    }
}
