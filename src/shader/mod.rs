//! Shader objects and the programs linking them.

pub mod program;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::device::{self, DeviceRef, ShaderKind};
use crate::errors::*;

pub use self::program::ShaderProgram;

/// Shaders can be linked into more than one program, programs hold them through this
/// shared handle.
pub type SharedShader = Rc<RefCell<Shader>>;

/// A vertex or fragment shader.
///
/// The driver object only exists between `compile` and `unload`, a shader with name 0
/// is not compiled. The programs it is attached to are tracked by name.
pub struct Shader {
    device: DeviceRef,
    kind: ShaderKind,
    name: u32,
    source: String,
    compile_log: Option<String>,
    attached_programs: SmallVec<[u32; 2]>,
    tag: String,
}

impl Shader {
    pub fn new<T1, T2>(device: DeviceRef, kind: ShaderKind, source: T1, tag: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        Shader {
            device,
            kind,
            name: 0,
            source: source.into(),
            compile_log: None,
            attached_programs: SmallVec::new(),
            tag: tag.into(),
        }
    }

    #[inline]
    pub fn vertex<T1, T2>(device: DeviceRef, source: T1, tag: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        Self::new(device, ShaderKind::Vertex, source, tag)
    }

    #[inline]
    pub fn fragment<T1, T2>(device: DeviceRef, source: T1, tag: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        Self::new(device, ShaderKind::Fragment, source, tag)
    }

    /// Wraps the shader into a `SharedShader`.
    #[inline]
    pub fn shared(self) -> SharedShader {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    /// "Vertex" or "Fragment".
    #[inline]
    pub fn kind_str(&self) -> &'static str {
        match self.kind {
            ShaderKind::Vertex => "Vertex",
            ShaderKind::Fragment => "Fragment",
        }
    }

    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn is_compiled(&self) -> bool {
        self.name > 0
    }

    /// The log of the last failed compilation.
    #[inline]
    pub fn compile_log(&self) -> Option<&str> {
        self.compile_log.as_ref().map(|v| v.as_str())
    }

    #[inline]
    pub fn attached_programs(&self) -> &[u32] {
        &self.attached_programs
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag<T: Into<String>>(&mut self, tag: T) {
        self.tag = tag.into();
    }

    /// Creates and compiles the shader object. Does nothing if it is already compiled.
    ///
    /// On failure the compiler output is kept in `compile_log` and the shader object is
    /// deleted again.
    pub fn compile(&mut self) -> Result<()> {
        if self.is_compiled() {
            return Ok(());
        }

        let name = self.device.create_shader(self.kind);
        self.name = name;

        if let Err(err) = device::check(&*self.device, &self.tag) {
            if self.is_compiled() {
                if let Err(v) = self.unload() {
                    warn!("({}) Failed to delete shader: {}", self.tag, v);
                }
            }

            return Err(err);
        }

        if name == 0 {
            return Err(Error::ShaderCreationFailure(self.kind));
        }

        self.device.shader_source(name, &self.source);
        self.device.compile_shader(name);

        if !self.device.shader_compile_status(name) {
            let log = format!(
                "{} shader compile log: {}",
                self.kind_str(),
                self.device.shader_info_log(name)
            );

            error!("({}) {}", self.tag, log);
            self.compile_log = Some(log.clone());
            self.unload()?;
            return Err(Error::CompileFailure(self.kind, log));
        }

        debug!("({}) {} shader {} compiled.", self.tag, self.kind_str(), name);
        device::check(&*self.device, &self.tag)
    }

    /// Deletes the shader object and forgets every program it was attached to.
    pub fn unload(&mut self) -> Result<()> {
        if !self.is_compiled() {
            return Err(Error::NotCompiled(self.kind));
        }

        self.device.delete_shader(self.name);
        self.name = 0;
        self.attached_programs.clear();
        device::check(&*self.device, &self.tag)
    }

    pub fn attach_to_program(&mut self, program: u32) -> Result<()> {
        if program == 0 {
            return Err(Error::InvalidProgram);
        }

        if !self.is_compiled() {
            return Err(Error::NotCompiled(self.kind));
        }

        if self.is_attached_to_program(program) {
            return Err(Error::AlreadyAttached(program));
        }

        self.device.attach_shader(program, self.name);
        self.attached_programs.push(program);
        device::check(&*self.device, &self.tag)
    }

    pub fn detach_from_program(&mut self, program: u32) -> Result<()> {
        if program == 0 {
            return Err(Error::InvalidProgram);
        }

        if !self.is_compiled() {
            return Err(Error::NotCompiled(self.kind));
        }

        if !self.is_attached_to_program(program) {
            return Err(Error::NotAttached(self.kind, program));
        }

        self.device.detach_shader(program, self.name);
        self.attached_programs.retain(|v| *v != program);
        device::check(&*self.device, &self.tag)
    }

    #[inline]
    pub fn is_attached_to_program(&self, program: u32) -> bool {
        self.attached_programs.contains(&program)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        if self.is_compiled() {
            if let Err(err) = self.unload() {
                warn!("({}) Failed to delete shader: {}", self.tag, err);
            }
        }
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shader")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("attached_programs", &self.attached_programs)
            .finish()
    }
}
