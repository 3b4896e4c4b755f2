use std::rc::Rc;

use bytemuck::Pod;

use crate::alloc::SharedRegister;
use crate::object::{Object, Resource};

use super::error::{ResourceError, Result};
use super::size::aligned_buffer_size;

/// Creation parameters for a [`Buffer`].
#[derive(Debug, Copy, Clone)]
pub struct BufferArgs {
    pub usage: wgpu::BufferUsages,
    pub size: u64,
}

/// wgpu side of a [`Buffer`].
pub struct BufferResource {
    device: wgpu::Device,
    usage: wgpu::BufferUsages,
    size: u64,
}

impl BufferResource {
    fn create_buffer(&mut self, identifier: &str, size: u64) -> wgpu::Buffer {
        self.size = aligned_buffer_size(size);
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(identifier),
            size: self.size,
            usage: self.usage,
            mapped_at_creation: false,
        })
    }
}

impl Resource for BufferResource {
    type Handle = wgpu::Buffer;
    type Args = BufferArgs;

    fn create(&mut self, identifier: &str, args: BufferArgs) -> Option<wgpu::Buffer> {
        // Uploads go through the queue, so every buffer is a copy target.
        self.usage = args.usage | wgpu::BufferUsages::COPY_DST;
        Some(self.create_buffer(identifier, args.size))
    }

    fn destroy(&mut self, handle: wgpu::Buffer) {
        handle.destroy();
    }
}

/// GPU buffer whose size is tracked in its context's allocation register.
///
/// Uploading data of a different size recreates the backing store; the old
/// size is simply replaced in the register.
pub struct Buffer {
    object: Object<BufferResource>,
}

impl Buffer {
    pub fn new(device: &wgpu::Device, register: &SharedRegister, name: &str) -> Self {
        let resource = BufferResource {
            device: device.clone(),
            usage: wgpu::BufferUsages::empty(),
            size: 0,
        };
        Self {
            object: Object::new(Rc::clone(register), name, resource),
        }
    }

    pub fn initialize(&mut self, usage: wgpu::BufferUsages, size: u64) -> Result<bool> {
        let valid = self.object.initialize(BufferArgs { usage, size })?;
        self.object.track(self.object.resource().size)?;
        Ok(valid)
    }

    pub fn uninitialize(&mut self) -> Result<()> {
        Ok(self.object.uninitialize()?)
    }

    /// Uploads `bytes` to the start of the buffer, growing or shrinking the
    /// backing store to fit. Data is zero-padded to the copy alignment.
    pub fn data(&mut self, queue: &wgpu::Queue, bytes: &[u8]) -> Result<()> {
        self.object.assert_initialized()?;

        let size = aligned_buffer_size(bytes.len() as u64);
        if size != self.object.resource().size {
            let identifier = self.identifier();
            let handle = self.object.resource_mut().create_buffer(&identifier, size);
            self.object.replace_handle(Some(handle))?;
            self.object.track(size)?;
        }

        let buffer = self.buffer()?;
        if bytes.len() as u64 == size {
            queue.write_buffer(buffer, 0, bytes);
        } else {
            let mut padded = bytes.to_vec();
            padded.resize(size as usize, 0);
            queue.write_buffer(buffer, 0, &padded);
        }
        Ok(())
    }

    /// Typed variant of [`data`](Self::data).
    pub fn data_pod<T: Pod>(&mut self, queue: &wgpu::Queue, data: &[T]) -> Result<()> {
        self.data(queue, bytemuck::cast_slice(data))
    }

    /// Size of the backing store in bytes; zero while uninitialized.
    pub fn size(&self) -> u64 {
        if self.object.initialized() {
            self.object.resource().size
        } else {
            0
        }
    }

    pub fn buffer(&self) -> Result<&wgpu::Buffer> {
        self.object
            .handle()?
            .ok_or_else(|| ResourceError::Invalid(self.identifier()))
    }

    pub fn object(&self) -> &Object<BufferResource> {
        &self.object
    }

    fn identifier(&self) -> String {
        self.object
            .identifier()
            .unwrap_or(self.object.name())
            .to_string()
    }
}
