use std::fmt;

use crate::device::ShaderKind;

/// Errors reported by the driver through `glGetError`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Fail)]
pub enum DriverError {
    #[fail(display = "[GL] An unacceptable value is specified for an enumerated argument.")]
    InvalidEnum,
    #[fail(display = "[GL] A numeric argument is out of range.")]
    InvalidValue,
    #[fail(display = "[GL] The specified operation is not allowed in the current state.")]
    InvalidOperation,
    #[fail(
        display = "[GL] The command is trying to render to or read from the framebuffer while \
                   the currently bound framebuffer is not framebuffer complete."
    )]
    InvalidFramebufferOperation,
    #[fail(display = "[GL] There is not enough memory left to execute the command.")]
    OutOfMemory,
    #[fail(display = "[GL] Oops, Unknown OpenGL error 0x{:X}.", _0)]
    Unknown(u32),
}

/// The kind of a program variable, used to tell uniform and attribute lookups apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Uniform,
    Attribute,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LocationKind::Uniform => write!(f, "Uniform"),
            LocationKind::Attribute => write!(f, "Attribute"),
        }
    }
}

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    Driver(#[cause] DriverError),
    #[fail(display = "OpenGL implementation doesn\'t support {}.", _0)]
    Requirement(String),
    #[fail(display = "Failed to load the OpenGL context: {}", _0)]
    Context(String),
    #[fail(display = "Failed to parse settings: {}", _0)]
    Settings(String),

    #[fail(display = "Vertex buffer not initialized")]
    BufferNotInitialized,
    #[fail(display = "Failed to generate OpenGL ES vertex buffer")]
    BufferCreationFailure,
    #[fail(
        display = "Vertex buffer size exceeded: offset + size > internal size: {} + {} > {}",
        offset, len, capacity
    )]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[fail(display = "Failed to create OpenGL ES {} shader", _0)]
    ShaderCreationFailure(ShaderKind),
    #[fail(display = "{} shader is not compiled", _0)]
    NotCompiled(ShaderKind),
    #[fail(display = "{}", _1)]
    CompileFailure(ShaderKind, String),
    #[fail(display = "Invalid OpenGL ES shader program")]
    InvalidProgram,
    #[fail(display = "Already attached to program {}", _0)]
    AlreadyAttached(u32),
    #[fail(display = "{} shader not attached to program {}", _0, _1)]
    NotAttached(ShaderKind, u32),

    #[fail(display = "({}) Failed to create OpenGL ES shader program", _0)]
    ProgramCreationFailure(String),
    #[fail(display = "({}) Shader program not built", _0)]
    ProgramNotBuilt(String),
    #[fail(display = "{}", _1)]
    LinkFailure(String, String),
    #[fail(
        display = "{} \"{}\" not found in shader program {}({})",
        kind, name, program, tag
    )]
    LocationNotFound {
        kind: LocationKind,
        name: String,
        program: u32,
        tag: String,
    },
    #[fail(display = "Vertex attribute size must be 1, 2, 3 or 4, got {}", _0)]
    InvalidAttributeSize(u8),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<DriverError> for Error {
    fn from(err: DriverError) -> Error {
        Error::Driver(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Settings(format!("{}", err))
    }
}

impl Error {
    /// Returns true if the error was raised because of a bad argument rather than the
    /// state of the object it was called on.
    pub fn is_argument_error(&self) -> bool {
        match *self {
            Error::OutOfBounds { .. }
            | Error::InvalidProgram
            | Error::AlreadyAttached(_)
            | Error::NotAttached(_, _)
            | Error::LocationNotFound { .. }
            | Error::InvalidAttributeSize(_) => true,
            _ => false,
        }
    }
}
