//! The driver seam. Every wrapper in this crate talks to the graphics driver through
//! the `Device` trait, one method per OpenGL ES entry point it needs.

pub mod gl;
pub mod headless;
mod variables;

pub use self::variables::{AttributeVariable, UniformVariable};
pub use crate::errors::DriverError;

use std::fmt;
use std::rc::Rc;

use crate::errors::*;
use crate::settings::{ErrorCheck, Settings};

/// A shared handle to a device. The GL state machine belongs to the thread that made
/// the context current, so devices are shared with `Rc` and never cross threads.
pub type DeviceRef = Rc<dyn Device>;

/// The buffer binding points of OpenGL ES 2.0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferTarget {
    /// Vertex attributes.
    Array,
    /// Vertex array indices.
    ElementArray,
}

/// Hint abouts the expected usage pattern of the data store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferUsage {
    /// The data store contents will be modified once and used many times.
    Static,
    /// The data store contents will be modified repeatedly and used many times.
    Dynamic,
    /// The data store contents will be modified once and used at most a few times.
    Stream,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderKind::Vertex => write!(f, "Vertex"),
            ShaderKind::Fragment => write!(f, "Fragment"),
        }
    }
}

/// The data type of each component of a vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Fixed,
    Float,
}

impl VertexFormat {
    pub fn size(self) -> usize {
        match self {
            VertexFormat::Byte | VertexFormat::UByte => 1,
            VertexFormat::Short | VertexFormat::UShort => 2,
            VertexFormat::Fixed | VertexFormat::Float => 4,
        }
    }
}

/// Describes how a vertex attribute is laid out in the bound array buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeLayout {
    /// The number of components per attribute, 1 to 4.
    pub size: u8,
    pub format: VertexFormat,
    /// Maps fixed-point values into [-1, 1] or [0, 1] when accessed.
    pub normalized: bool,
    /// The byte offset between consecutive attributes, 0 means tightly packed.
    pub stride: usize,
    /// The byte offset of the first component in the bound array buffer.
    pub offset: usize,
}

impl AttributeLayout {
    pub fn new(size: u8, format: VertexFormat) -> Self {
        AttributeLayout {
            size,
            format,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// The OpenGL ES 2.0 entry points used by the wrappers.
///
/// Object names follow the GL convention: `0` is never a valid buffer, shader or
/// program, and a location of `-1` means the variable is not active in the program.
pub trait Device {
    fn settings(&self) -> &Settings;

    /// Pops the oldest error flag, `None` once the queue is empty.
    fn get_error(&self) -> Option<DriverError>;

    fn gen_buffer(&self) -> u32;
    fn delete_buffer(&self, buffer: u32);
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    /// Creates the data store of the buffer bound to `target`. `None` allocates `size`
    /// uninitialized bytes.
    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage);
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);

    fn create_shader(&self, kind: ShaderKind) -> u32;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn validate_program(&self, program: u32);
    fn program_validate_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn delete_program(&self, program: u32);
    fn use_program(&self, program: u32);

    fn uniform_location(&self, program: u32, name: &str) -> i32;
    fn attribute_location(&self, program: u32, name: &str) -> i32;

    /// Sets a uniform of the program in use.
    fn uniform(&self, location: i32, variable: &UniformVariable);
    /// Sets the generic value of a vertex attribute used while its array is disabled.
    fn vertex_attribute(&self, index: u32, variable: &AttributeVariable);
    fn vertex_attribute_pointer(&self, index: u32, layout: &AttributeLayout);
    fn enable_vertex_attribute(&self, index: u32);
    fn disable_vertex_attribute(&self, index: u32);
}

/// Drains the error queue of `device` as configured by its `ErrorCheck`.
///
/// Every queued error is logged under `tag`. With `ErrorCheck::Fail` the first one is
/// returned after the queue has been emptied.
pub fn check(device: &dyn Device, tag: &str) -> Result<()> {
    let mode = device.settings().error_check;
    if mode == ErrorCheck::Disabled {
        return Ok(());
    }

    let mut first = None;
    while let Some(err) = device.get_error() {
        error!("({}) {}", tag, err);
        first = first.or(Some(err));
    }

    match (mode, first) {
        (ErrorCheck::Fail, Some(err)) => Err(Error::Driver(err)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::headless::HeadlessDevice;
    use super::*;

    fn device(error_check: ErrorCheck) -> HeadlessDevice {
        HeadlessDevice::new(Settings {
            error_check,
            ..Settings::default()
        })
    }

    #[test]
    fn check_logs_and_drains() {
        let device = device(ErrorCheck::Log);
        device.push_error(DriverError::InvalidEnum);
        device.push_error(DriverError::OutOfMemory);

        assert!(check(&device, "test").is_ok());
        assert_eq!(device.get_error(), None);
    }

    #[test]
    fn check_fails_with_first_error() {
        let device = device(ErrorCheck::Fail);
        device.push_error(DriverError::InvalidValue);
        device.push_error(DriverError::InvalidOperation);

        match check(&device, "test") {
            Err(Error::Driver(DriverError::InvalidValue)) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(device.get_error(), None);
        assert!(check(&device, "test").is_ok());
    }

    #[test]
    fn check_disabled_leaves_queue() {
        let device = device(ErrorCheck::Disabled);
        device.push_error(DriverError::InvalidEnum);

        assert!(check(&device, "test").is_ok());
        assert_eq!(device.get_error(), Some(DriverError::InvalidEnum));
    }

    #[test]
    fn layout_builder() {
        let layout = AttributeLayout::new(3, VertexFormat::Float)
            .with_stride(24)
            .with_offset(12);

        assert_eq!(layout.size, 3);
        assert_eq!(layout.stride, 24);
        assert_eq!(layout.offset, 12);
        assert!(!layout.normalized);
        assert_eq!(VertexFormat::Float.size(), 4);
        assert_eq!(VertexFormat::UShort.size(), 2);
    }
}
