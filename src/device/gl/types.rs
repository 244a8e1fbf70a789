use gl::types::*;

use super::super::{BufferTarget, BufferUsage, ShaderKind, VertexFormat};
use crate::errors::DriverError;

impl From<BufferTarget> for GLenum {
    fn from(target: BufferTarget) -> Self {
        match target {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl From<BufferUsage> for GLenum {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
            BufferUsage::Stream => gl::STREAM_DRAW,
        }
    }
}

impl From<ShaderKind> for GLenum {
    fn from(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Byte => gl::BYTE,
            VertexFormat::UByte => gl::UNSIGNED_BYTE,
            VertexFormat::Short => gl::SHORT,
            VertexFormat::UShort => gl::UNSIGNED_SHORT,
            VertexFormat::Fixed => gl::FIXED,
            VertexFormat::Float => gl::FLOAT,
        }
    }
}

/// Maps the value returned by `glGetError`, `None` for `GL_NO_ERROR`.
pub fn driver_error(code: GLenum) -> Option<DriverError> {
    match code {
        gl::NO_ERROR => None,
        gl::INVALID_ENUM => Some(DriverError::InvalidEnum),
        gl::INVALID_VALUE => Some(DriverError::InvalidValue),
        gl::INVALID_OPERATION => Some(DriverError::InvalidOperation),
        gl::INVALID_FRAMEBUFFER_OPERATION => Some(DriverError::InvalidFramebufferOperation),
        gl::OUT_OF_MEMORY => Some(DriverError::OutOfMemory),
        v => Some(DriverError::Unknown(v)),
    }
}

#[inline]
pub fn boolean(v: bool) -> GLboolean {
    if v {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(driver_error(gl::NO_ERROR), None);
        assert_eq!(driver_error(gl::INVALID_VALUE), Some(DriverError::InvalidValue));
        assert_eq!(driver_error(0x1234), Some(DriverError::Unknown(0x1234)));
    }

    #[test]
    fn enums() {
        assert_eq!(GLenum::from(BufferTarget::ElementArray), gl::ELEMENT_ARRAY_BUFFER);
        assert_eq!(GLenum::from(BufferUsage::Stream), gl::STREAM_DRAW);
        assert_eq!(GLenum::from(ShaderKind::Fragment), gl::FRAGMENT_SHADER);
        assert_eq!(GLenum::from(VertexFormat::Fixed), gl::FIXED);
    }
}
