//! `Device` implementation backed by the `gl` function loader.

pub mod capabilities;
pub mod types;

use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use gl::types::*;

use self::capabilities::Capabilities;
use self::types::boolean;
use super::{
    AttributeLayout, AttributeVariable, BufferTarget, BufferUsage, Device, DriverError,
    ShaderKind, UniformVariable,
};
use crate::errors::*;
use crate::settings::Settings;

pub struct GLDevice {
    settings: Settings,
    capabilities: Capabilities,
}

impl GLDevice {
    /// Creates a device for the context that is current on this thread.
    ///
    /// # Unsafe
    ///
    /// The `gl` function pointers must have been loaded for a context that is current on
    /// the calling thread, and every later call must happen while it stays current.
    pub unsafe fn new(settings: Settings) -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLDevice {:#?}", capabilities);

        if settings.check_capabilities {
            capabilities.check()?;
        }

        Ok(GLDevice {
            settings,
            capabilities,
        })
    }

    /// Loads the `gl` function pointers with `loader` and creates a device.
    ///
    /// # Unsafe
    ///
    /// See `GLDevice::new`. `loader` must return addresses of the current context.
    pub unsafe fn load_with<F>(loader: F, settings: Settings) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        if !gl::GetString::is_loaded() {
            return Err(Error::Context("glGetString is not available.".to_owned()));
        }

        Self::new(settings)
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    unsafe fn info_log(id: GLuint, program: bool) -> String {
        let mut len = 0;
        if program {
            gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
        } else {
            gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
        }

        if len <= 0 {
            return String::new();
        }

        let mut buf: Vec<u8> = vec![0; len as usize];
        let mut written = 0;
        if program {
            gl::GetProgramInfoLog(id, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        } else {
            gl::GetShaderInfoLog(id, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        }

        buf.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[inline]
    fn location<F>(name: &str, query: F) -> GLint
    where
        F: FnOnce(*const GLchar) -> GLint,
    {
        // Names with an interior nul can not exist in GLSL.
        match CString::new(name.as_bytes()) {
            Ok(c_name) => query(c_name.as_ptr()),
            Err(_) => -1,
        }
    }
}

impl Device for GLDevice {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn get_error(&self) -> Option<DriverError> {
        unsafe { types::driver_error(gl::GetError()) }
    }

    fn gen_buffer(&self) -> u32 {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        id
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.into(), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        let value = match data {
            Some(v) if !v.is_empty() => v.as_ptr() as *const c_void,
            _ => ptr::null(),
        };

        unsafe { gl::BufferData(target.into(), size as GLsizeiptr, value, usage.into()) }
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        unsafe {
            gl::BufferSubData(
                target.into(),
                offset as GLintptr,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    fn create_shader(&self, kind: ShaderKind) -> u32 {
        unsafe { gl::CreateShader(kind.into()) }
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader, 1, &ptr, &len) }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        unsafe { Self::info_log(shader, false) }
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn validate_program(&self, program: u32) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn program_validate_status(&self, program: u32) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn program_info_log(&self, program: u32) -> String {
        unsafe { Self::info_log(program, true) }
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn uniform_location(&self, program: u32, name: &str) -> i32 {
        Self::location(name, |v| unsafe { gl::GetUniformLocation(program, v) })
    }

    fn attribute_location(&self, program: u32, name: &str) -> i32 {
        Self::location(name, |v| unsafe { gl::GetAttribLocation(program, v) })
    }

    fn uniform(&self, location: i32, variable: &UniformVariable) {
        let n = variable.count() as GLsizei;

        unsafe {
            match *variable {
                UniformVariable::I32(v) => gl::Uniform1i(location, v),
                UniformVariable::Vector2i(v) => gl::Uniform2i(location, v[0], v[1]),
                UniformVariable::Vector3i(v) => gl::Uniform3i(location, v[0], v[1], v[2]),
                UniformVariable::Vector4i(v) => gl::Uniform4i(location, v[0], v[1], v[2], v[3]),
                UniformVariable::F32(v) => gl::Uniform1f(location, v),
                UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
                UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
                UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
                UniformVariable::Matrix2f(v, transpose) => {
                    gl::UniformMatrix2fv(location, 1, boolean(transpose), v[0].as_ptr())
                }
                UniformVariable::Matrix3f(v, transpose) => {
                    gl::UniformMatrix3fv(location, 1, boolean(transpose), v[0].as_ptr())
                }
                UniformVariable::Matrix4f(v, transpose) => {
                    gl::UniformMatrix4fv(location, 1, boolean(transpose), v[0].as_ptr())
                }
                UniformVariable::I32Array(v) => gl::Uniform1iv(location, n, v.as_ptr()),
                UniformVariable::Vector2iArray(v) => {
                    gl::Uniform2iv(location, n, v.as_ptr() as *const GLint)
                }
                UniformVariable::Vector3iArray(v) => {
                    gl::Uniform3iv(location, n, v.as_ptr() as *const GLint)
                }
                UniformVariable::Vector4iArray(v) => {
                    gl::Uniform4iv(location, n, v.as_ptr() as *const GLint)
                }
                UniformVariable::F32Array(v) => gl::Uniform1fv(location, n, v.as_ptr()),
                UniformVariable::Vector2fArray(v) => {
                    gl::Uniform2fv(location, n, v.as_ptr() as *const GLfloat)
                }
                UniformVariable::Vector3fArray(v) => {
                    gl::Uniform3fv(location, n, v.as_ptr() as *const GLfloat)
                }
                UniformVariable::Vector4fArray(v) => {
                    gl::Uniform4fv(location, n, v.as_ptr() as *const GLfloat)
                }
                UniformVariable::Matrix2fArray(v, transpose) => gl::UniformMatrix2fv(
                    location,
                    n,
                    boolean(transpose),
                    v.as_ptr() as *const GLfloat,
                ),
                UniformVariable::Matrix3fArray(v, transpose) => gl::UniformMatrix3fv(
                    location,
                    n,
                    boolean(transpose),
                    v.as_ptr() as *const GLfloat,
                ),
                UniformVariable::Matrix4fArray(v, transpose) => gl::UniformMatrix4fv(
                    location,
                    n,
                    boolean(transpose),
                    v.as_ptr() as *const GLfloat,
                ),
            }
        }
    }

    fn vertex_attribute(&self, index: u32, variable: &AttributeVariable) {
        unsafe {
            match *variable {
                AttributeVariable::F32(v) => gl::VertexAttrib1f(index, v),
                AttributeVariable::Vector2f(v) => gl::VertexAttrib2fv(index, v.as_ptr()),
                AttributeVariable::Vector3f(v) => gl::VertexAttrib3fv(index, v.as_ptr()),
                AttributeVariable::Vector4f(v) => gl::VertexAttrib4fv(index, v.as_ptr()),
            }
        }
    }

    fn vertex_attribute_pointer(&self, index: u32, layout: &AttributeLayout) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                GLint::from(layout.size),
                layout.format.into(),
                boolean(layout.normalized),
                layout.stride as GLsizei,
                layout.offset as *const c_void,
            )
        }
    }

    fn enable_vertex_attribute(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn disable_vertex_attribute(&self, index: u32) {
        unsafe { gl::DisableVertexAttribArray(index) }
    }
}
