//! Vertex buffer objects.

use crate::device::{self, BufferTarget, BufferUsage, DeviceRef};
use crate::errors::*;
use crate::utils::{as_bytes, Pod};

/// A buffer object holding vertex attributes or indices.
///
/// The wrapper remembers the byte size of the last data store created with
/// `buffer_data` or `allocate`, and refuses partial updates past its end.
pub struct VertexBufferObject {
    device: DeviceRef,
    target: BufferTarget,
    usage: BufferUsage,
    tag: String,
    name: u32,
    num_elements: usize,
    size_bytes: usize,
}

impl VertexBufferObject {
    /// Generates a new buffer name. No data store is created until `buffer_data` or
    /// `allocate` is called.
    pub fn new(device: DeviceRef, target: BufferTarget, usage: BufferUsage) -> Result<Self> {
        let name = device.gen_buffer();

        // A failed check drops `vbo`, which deletes the name.
        let vbo = VertexBufferObject {
            device,
            target,
            usage,
            tag: String::new(),
            name,
            num_elements: 0,
            size_bytes: 0,
        };

        device::check(&*vbo.device, &vbo.tag)?;

        if name == 0 {
            return Err(Error::BufferCreationFailure);
        }

        Ok(vbo)
    }

    /// Generates a new buffer, binds it and uploads `data`.
    pub fn with_data<T: Pod>(
        device: DeviceRef,
        target: BufferTarget,
        usage: BufferUsage,
        data: &[T],
        num_elements: usize,
    ) -> Result<Self> {
        let mut vbo = Self::new(device, target, usage)?;
        vbo.bind()?;
        vbo.buffer_data(data, num_elements)?;
        Ok(vbo)
    }

    /// Deletes the buffer if it still exists.
    pub fn release(&mut self) {
        if self.name > 0 {
            self.device.delete_buffer(self.name);
            self.name = 0;

            if let Err(err) = device::check(&*self.device, &self.tag) {
                warn!("({}) Failed to release vertex buffer: {}", self.tag, err);
            }
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag<T: Into<String>>(&mut self, tag: T) {
        self.tag = tag.into();
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// The buffer name, 0 once the buffer has been deleted.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Deletes the buffer. Unlike `release`, fails if the buffer is already gone.
    pub fn delete_buffer(&mut self) -> Result<()> {
        self.check_initialized()?;

        self.device.delete_buffer(self.name);
        self.name = 0;
        device::check(&*self.device, &self.tag)
    }

    /// Creates an uninitialized data store of `size_bytes` for the buffer bound to
    /// this buffer's target.
    pub fn allocate(&mut self, size_bytes: usize) -> Result<()> {
        self.check_initialized()?;
        self.store(None, 0, size_bytes)
    }

    /// Creates a data store for the buffer bound to this buffer's target and fills it
    /// with `data`. `num_elements` is kept for bookkeeping only, e.g. the vertex count.
    pub fn buffer_data<T: Pod>(&mut self, data: &[T], num_elements: usize) -> Result<()> {
        self.check_initialized()?;

        let bytes = as_bytes(data);
        self.store(Some(bytes), num_elements, bytes.len())
    }

    /// Overwrites part of the data store, starting at byte `offset`.
    pub fn update_data<T: Pod>(&mut self, offset: usize, data: &[T]) -> Result<()> {
        self.check_initialized()?;

        let bytes = as_bytes(data);
        let end = offset.checked_add(bytes.len());
        if end.map_or(true, |v| v > self.size_bytes) {
            return Err(Error::OutOfBounds {
                offset,
                len: bytes.len(),
                capacity: self.size_bytes,
            });
        }

        self.device.buffer_sub_data(self.target, offset, bytes);
        device::check(&*self.device, &self.tag)
    }

    pub fn bind(&self) -> Result<()> {
        self.check_initialized()?;

        self.device.bind_buffer(self.target, self.name);
        device::check(&*self.device, &self.tag)
    }

    /// Binds 0 to this buffer's target.
    pub fn unbind(&self) -> Result<()> {
        self.device.bind_buffer(self.target, 0);
        device::check(&*self.device, &self.tag)
    }

    fn store(&mut self, data: Option<&[u8]>, num_elements: usize, size_bytes: usize) -> Result<()> {
        self.device
            .buffer_data(self.target, size_bytes, data, self.usage);
        device::check(&*self.device, &self.tag)?;

        self.num_elements = num_elements;
        self.size_bytes = size_bytes;
        Ok(())
    }

    #[inline]
    fn check_initialized(&self) -> Result<()> {
        if self.name == 0 {
            Err(Error::BufferNotInitialized)
        } else {
            Ok(())
        }
    }
}

impl Drop for VertexBufferObject {
    fn drop(&mut self) {
        self.release();
    }
}

impl ::std::fmt::Debug for VertexBufferObject {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("VertexBufferObject")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("target", &self.target)
            .field("usage", &self.usage)
            .field("num_elements", &self.num_elements)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}
