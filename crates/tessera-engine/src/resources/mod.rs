//! GPU-backed objects that report their backing-store size to the context's
//! allocation register.

mod buffer;
mod error;
mod renderbuffer;
mod size;
mod texture;

pub use buffer::{Buffer, BufferArgs, BufferResource};
pub use error::ResourceError;
pub use renderbuffer::Renderbuffer;
pub use size::{aligned_buffer_size, block_counts, bytes_per_block, texture_byte_size};
pub use texture::{Texture2D, TextureArgs, TextureResource};
