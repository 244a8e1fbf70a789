//! # GLESUtils
//!
//! Thin wrappers around the OpenGL ES 2.0 programmable pipeline. Each wrapper keeps the
//! name returned by the driver, forwards its methods to the matching driver entry point,
//! and does the small amount of bookkeeping the raw API leaves to the caller: checking
//! that objects exist before they are used, tracking which shaders are attached to which
//! programs, caching uniform and attribute locations, and keeping the info logs produced
//! by the compiler and the linker.
//!
//! All driver calls go through the `Device` trait. `GLDevice` talks to a real context
//! through the `gl` crate, `HeadlessDevice` simulates one in memory.
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use glesutils::prelude::*;
//!
//! let device: DeviceRef = Rc::new(unsafe { GLDevice::new(Settings::default())? });
//!
//! let mut program = ShaderProgram::new(device.clone(), "sprite");
//! program.add_shader(Shader::vertex(device.clone(), VS, "sprite").shared());
//! program.add_shader(Shader::fragment(device.clone(), FS, "sprite").shared());
//! program.build()?;
//! program.bind()?;
//! program.set_uniform("u_Color", [1.0, 0.0, 0.0, 1.0])?;
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
extern crate serde_json;

extern crate gl;
extern crate smallvec;

pub extern crate cgmath;

pub mod errors;
pub mod device;
pub mod settings;
pub mod shader;
pub mod utils;
pub mod vbo;

pub mod prelude {
    pub use crate::device::gl::GLDevice;
    pub use crate::device::headless::HeadlessDevice;
    pub use crate::device::{
        AttributeLayout, AttributeVariable, BufferTarget, BufferUsage, Device, DeviceRef,
        DriverError, ShaderKind, UniformVariable, VertexFormat,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::settings::{ErrorCheck, Settings};
    pub use crate::shader::program::ShaderProgram;
    pub use crate::shader::{Shader, SharedShader};
    pub use crate::vbo::VertexBufferObject;
}
