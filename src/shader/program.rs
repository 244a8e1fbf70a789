//! Shader programs with cached variable locations.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use super::SharedShader;
use crate::device::{self, AttributeLayout, AttributeVariable, DeviceRef, UniformVariable};
use crate::errors::*;

/// A program linked from a list of shaders.
///
/// The shaders are only attached while the program links, the driver keeps the linked
/// binary on its own. Uniform and attribute locations are cached by name once they have
/// been found.
pub struct ShaderProgram {
    device: DeviceRef,
    tag: String,
    shaders: SmallVec<[SharedShader; 2]>,
    name: u32,
    build_log: Option<String>,
    valid: bool,
    validation_log: Option<String>,
    uniforms: HashMap<String, i32>,
    attributes: HashMap<String, i32>,
}

impl ShaderProgram {
    pub fn new<T: Into<String>>(device: DeviceRef, tag: T) -> Self {
        ShaderProgram {
            device,
            tag: tag.into(),
            shaders: SmallVec::new(),
            name: 0,
            build_log: None,
            valid: false,
            validation_log: None,
            uniforms: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The program name, 0 if it is not built.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.name > 0
    }

    #[inline]
    pub fn build_log(&self) -> Option<&str> {
        self.build_log.as_ref().map(|v| v.as_str())
    }

    /// Result of the last `validate`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn validation_log(&self) -> Option<&str> {
        self.validation_log.as_ref().map(|v| v.as_str())
    }

    #[inline]
    pub fn shaders(&self) -> &[SharedShader] {
        &self.shaders
    }

    pub fn add_shader(&mut self, shader: SharedShader) {
        self.shaders.push(shader);
    }

    /// Removes `shader` from the list, detaching it first if it is attached to this
    /// program.
    pub fn remove_shader(&mut self, shader: &SharedShader) -> Result<()> {
        {
            let mut v = shader.borrow_mut();
            if self.name > 0 && v.is_attached_to_program(self.name) {
                v.detach_from_program(self.name)?;
            }
        }

        self.shaders.retain(|v| !Rc::ptr_eq(v, shader));
        Ok(())
    }

    /// Compiles the shaders that need it and links them into a new program. Does
    /// nothing if the program is already built.
    ///
    /// When any step fails, every shader attached so far is detached again and the
    /// program object is deleted, so the build can be retried.
    pub fn build(&mut self) -> Result<()> {
        if self.is_built() {
            return Ok(());
        }

        let name = self.device.create_program();
        self.name = name;

        if let Err(err) = device::check(&*self.device, &self.tag) {
            if self.is_built() {
                self.abort();
            }

            return Err(err);
        }

        if name == 0 {
            return Err(Error::ProgramCreationFailure(self.tag.clone()));
        }

        self.valid = false;
        self.validation_log = None;
        self.uniforms.clear();
        self.attributes.clear();

        if let Err(err) = self.link() {
            self.abort();
            return Err(err);
        }

        debug!("({}) Shader program {} built.", self.tag, self.name);
        Ok(())
    }

    /// Detaches every shader still attached to this program and forgets the shader list.
    pub fn unload(&mut self) -> Result<()> {
        let result = self.detach_all();
        self.shaders.clear();
        result
    }

    /// Unloads the shaders and deletes the program. Idempotent, runs on drop.
    pub fn release(&mut self) {
        if let Err(err) = self.unload() {
            warn!("({}) Failed to unload shader program: {}", self.tag, err);
        }

        if self.name > 0 {
            self.device.delete_program(self.name);
            self.name = 0;

            if let Err(err) = device::check(&*self.device, &self.tag) {
                warn!("({}) Failed to release shader program: {}", self.tag, err);
            }
        }

        self.valid = false;
        self.uniforms.clear();
        self.attributes.clear();
    }

    /// Checks whether the program can execute in the current driver state. The result
    /// is kept in `is_valid` and `validation_log`.
    pub fn validate(&mut self) -> Result<bool> {
        self.check_built()?;

        self.device.validate_program(self.name);
        device::check(&*self.device, &self.tag)?;

        let valid = self.device.program_validate_status(self.name);
        device::check(&*self.device, &self.tag)?;

        let log = self.device.program_info_log(self.name);
        device::check(&*self.device, &self.tag)?;

        let log = format!("({}) Shader program validation log: {}", self.tag, log);
        if !valid {
            error!("{}", log);
        }

        self.valid = valid;
        self.validation_log = Some(log);
        Ok(valid)
    }

    /// Installs the program as part of the current rendering state.
    pub fn bind(&self) -> Result<()> {
        self.check_built()?;

        self.device.use_program(self.name);
        device::check(&*self.device, &self.tag)
    }

    pub fn uniform_location(&mut self, name: &str) -> Result<i32> {
        self.location(LocationKind::Uniform, name)
    }

    pub fn attribute_location(&mut self, name: &str) -> Result<u32> {
        let location = self.location(LocationKind::Attribute, name)?;
        Ok(location as u32)
    }

    /// Returns true if the program is built and has an active uniform `name`.
    pub fn has_uniform(&mut self, name: &str) -> bool {
        self.uniform_location(name).is_ok()
    }

    /// Returns true if the program is built and has an active attribute `name`.
    pub fn has_attribute(&mut self, name: &str) -> bool {
        self.attribute_location(name).is_ok()
    }

    /// Writes the uniform `name` of the program bound with `bind`.
    pub fn set_uniform<'a, T>(&mut self, name: &str, value: T) -> Result<()>
    where
        T: Into<UniformVariable<'a>>,
    {
        let location = self.uniform_location(name)?;
        self.device.uniform(location, &value.into());
        device::check(&*self.device, &self.tag)
    }

    /// Sets the constant value of the attribute `name`, used while its array is disabled.
    pub fn set_attribute<T>(&mut self, name: &str, value: T) -> Result<()>
    where
        T: Into<AttributeVariable>,
    {
        let index = self.attribute_location(name)?;
        self.device.vertex_attribute(index, &value.into());
        device::check(&*self.device, &self.tag)
    }

    /// Describes where the attribute `name` is read from in the currently bound array
    /// buffer.
    pub fn set_attribute_pointer(&mut self, name: &str, layout: AttributeLayout) -> Result<()> {
        if layout.size < 1 || layout.size > 4 {
            return Err(Error::InvalidAttributeSize(layout.size));
        }

        let index = self.attribute_location(name)?;
        self.device.vertex_attribute_pointer(index, &layout);
        device::check(&*self.device, &self.tag)
    }

    pub fn enable_attribute(&mut self, name: &str) -> Result<()> {
        let index = self.attribute_location(name)?;
        self.device.enable_vertex_attribute(index);
        device::check(&*self.device, &self.tag)
    }

    pub fn disable_attribute(&mut self, name: &str) -> Result<()> {
        let index = self.attribute_location(name)?;
        self.device.disable_vertex_attribute(index);
        device::check(&*self.device, &self.tag)
    }

    fn link(&mut self) -> Result<()> {
        for shader in &self.shaders {
            let mut shader = shader.borrow_mut();
            shader.compile()?;
            shader.attach_to_program(self.name)?;
        }

        self.device.link_program(self.name);
        device::check(&*self.device, &self.tag)?;

        for shader in &self.shaders {
            shader.borrow_mut().detach_from_program(self.name)?;
        }

        let linked = self.device.program_link_status(self.name);
        device::check(&*self.device, &self.tag)?;

        let log = self.device.program_info_log(self.name);
        device::check(&*self.device, &self.tag)?;

        let log = format!("({}) Shader program link log: {}", self.tag, log);
        self.build_log = Some(log.clone());

        if !linked {
            error!("{}", log);
            return Err(Error::LinkFailure(self.tag.clone(), log));
        }

        Ok(())
    }

    fn abort(&mut self) {
        if let Err(err) = self.detach_all() {
            warn!("({}) Failed to detach shaders: {}", self.tag, err);
        }

        self.device.delete_program(self.name);
        self.name = 0;

        if let Err(err) = device::check(&*self.device, &self.tag) {
            warn!("({}) Failed to delete shader program: {}", self.tag, err);
        }
    }

    fn detach_all(&self) -> Result<()> {
        if self.name == 0 {
            return Ok(());
        }

        let mut result = Ok(());
        for shader in &self.shaders {
            let mut shader = match shader.try_borrow_mut() {
                Ok(v) => v,
                Err(_) => continue,
            };

            if shader.is_compiled() && shader.is_attached_to_program(self.name) {
                if let Err(err) = shader.detach_from_program(self.name) {
                    if result.is_ok() {
                        result = Err(err);
                    }
                }
            }
        }

        result
    }

    fn location(&mut self, kind: LocationKind, name: &str) -> Result<i32> {
        self.check_built()?;

        let cache = match kind {
            LocationKind::Uniform => &mut self.uniforms,
            LocationKind::Attribute => &mut self.attributes,
        };

        if let Some(&location) = cache.get(name) {
            return Ok(location);
        }

        let location = match kind {
            LocationKind::Uniform => self.device.uniform_location(self.name, name),
            LocationKind::Attribute => self.device.attribute_location(self.name, name),
        };

        device::check(&*self.device, &self.tag)?;

        if location < 0 {
            return Err(Error::LocationNotFound {
                kind,
                name: name.to_owned(),
                program: self.name,
                tag: self.tag.clone(),
            });
        }

        cache.insert(name.to_owned(), location);
        Ok(location)
    }

    #[inline]
    fn check_built(&self) -> Result<()> {
        if self.is_built() {
            Ok(())
        } else {
            Err(Error::ProgramNotBuilt(self.tag.clone()))
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("shaders", &self.shaders.len())
            .field("valid", &self.valid)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::headless::{HeadlessDevice, UniformValue};
    use crate::device::{DriverError, VertexFormat};
    use crate::settings::{ErrorCheck, Settings};
    use crate::shader::Shader;

    const VS: &str = "
        uniform mat4 u_MVP;
        attribute vec4 a_Position;
        attribute vec4 a_Color;
        varying vec4 v_Color;
        void main() { v_Color = a_Color; gl_Position = u_MVP * a_Position; }";

    const FS: &str = "
        precision mediump float;
        uniform float u_Alpha;
        varying vec4 v_Color;
        void main() { gl_FragColor = vec4(v_Color.rgb, u_Alpha); }";

    fn program(headless: &Rc<HeadlessDevice>, fs: &str) -> ShaderProgram {
        let device: DeviceRef = headless.clone();
        let mut program = ShaderProgram::new(device.clone(), "test");
        program.add_shader(Shader::vertex(device.clone(), VS, "test").shared());
        program.add_shader(Shader::fragment(device, fs, "test").shared());
        program
    }

    #[test]
    fn build() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        assert!(!program.is_built());

        program.build().unwrap();
        assert!(program.is_built());
        assert!(headless.is_program(program.name()));
        assert_eq!(program.build_log(), Some("(test) Shader program link log: "));

        // Shaders are detached once linked.
        assert!(headless.attached_shaders(program.name()).is_empty());
        for shader in program.shaders() {
            assert!(shader.borrow().is_compiled());
            assert!(shader.borrow().attached_programs().is_empty());
        }

        let name = program.name();
        program.build().unwrap();
        assert_eq!(program.name(), name);
    }

    #[test]
    fn build_failures() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, "#error unsupported");

        match program.build() {
            Err(Error::CompileFailure(_, _)) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert!(!program.is_built());
        assert!(!headless.is_program(1));
        for shader in program.shaders() {
            assert!(shader.borrow().attached_programs().is_empty());
        }

        let device: DeviceRef = headless.clone();
        let mut program = ShaderProgram::new(device.clone(), "vs-only");
        program.add_shader(Shader::vertex(device, VS, "vs").shared());

        match program.build() {
            Err(Error::LinkFailure(tag, log)) => {
                assert_eq!(tag, "vs-only");
                assert!(log.starts_with("(vs-only) Shader program link log: "));
                assert!(log.contains("fragment"));
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(!program.is_built());
        assert!(program.build_log().is_some());

        headless.set_exhausted(true);
        let mut program = ShaderProgram::new(headless.clone(), "exhausted");
        match program.build() {
            Err(Error::ProgramCreationFailure(tag)) => assert_eq!(tag, "exhausted"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn requires_built() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);

        assert!(program.bind().is_err());
        assert!(program.validate().is_err());
        assert!(!program.has_uniform("u_MVP"));
        match program.uniform_location("u_MVP") {
            Err(Error::ProgramNotBuilt(tag)) => assert_eq!(tag, "test"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn locations_are_cached() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        program.build().unwrap();

        assert_eq!(program.uniform_location("u_MVP").unwrap(), 0);
        assert_eq!(program.uniform_location("u_Alpha").unwrap(), 1);
        assert_eq!(program.attribute_location("a_Color").unwrap(), 1);

        assert!(program.has_attribute("a_Position"));

        headless.clear_calls();
        assert_eq!(program.uniform_location("u_Alpha").unwrap(), 1);
        assert_eq!(program.attribute_location("a_Position").unwrap(), 0);
        assert!(program.has_attribute("a_Color"));
        assert!(headless.calls().is_empty());

        match program.uniform_location("u_Missing") {
            Err(Error::LocationNotFound { kind, name, .. }) => {
                assert_eq!(kind, LocationKind::Uniform);
                assert_eq!(name, "u_Missing");
            }
            other => panic!("unexpected {:?}", other),
        }

        // Misses are queried again.
        headless.clear_calls();
        assert!(!program.has_uniform("u_Missing"));
        assert_eq!(headless.calls(), vec!["glGetUniformLocation"]);
        assert!(!program.has_attribute("u_MVP"));
    }

    #[test]
    fn uniforms_and_attributes() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        program.build().unwrap();
        program.bind().unwrap();
        assert_eq!(headless.current_program(), program.name());

        program.set_uniform("u_Alpha", 0.5f32).unwrap();
        assert_eq!(
            headless.uniform_value(program.name(), "u_Alpha"),
            Some(UniformValue::Floats(vec![0.5]))
        );

        let identity = [
            [1.0f32, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        program.set_uniform("u_MVP", identity).unwrap();
        match headless.uniform_value(program.name(), "u_MVP") {
            Some(UniformValue::Floats(v)) => assert_eq!(v.len(), 16),
            other => panic!("unexpected {:?}", other),
        }

        program.set_attribute("a_Color", [1.0f32, 0.0]).unwrap();
        assert_eq!(headless.attribute_value(1), Some([1.0, 0.0, 0.0, 1.0]));

        let layout = AttributeLayout::new(3, VertexFormat::Float).with_stride(12);
        program.set_attribute_pointer("a_Position", layout).unwrap();
        program.enable_attribute("a_Position").unwrap();
        assert_eq!(headless.attribute_layout(0), Some(layout));
        assert!(headless.attribute_enabled(0));

        program.disable_attribute("a_Position").unwrap();
        assert!(!headless.attribute_enabled(0));

        match program.set_attribute_pointer("a_Position", AttributeLayout::new(5, VertexFormat::Float)) {
            Err(Error::InvalidAttributeSize(5)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn validate() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        program.build().unwrap();

        assert!(!program.is_valid());
        assert!(program.validate().unwrap());
        assert!(program.is_valid());
        assert_eq!(
            program.validation_log(),
            Some("(test) Shader program validation log: ")
        );
    }

    #[test]
    fn remove_shader() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        let vs = program.shaders()[0].clone();

        program.remove_shader(&vs).unwrap();
        assert_eq!(program.shaders().len(), 1);
        assert!(!Rc::ptr_eq(&program.shaders()[0], &vs));
    }

    #[test]
    fn remove_attached_shader() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        program.build().unwrap();

        let name = program.name();
        let fs = program.shaders()[1].clone();
        fs.borrow_mut().attach_to_program(name).unwrap();
        assert_eq!(headless.attached_shaders(name), vec![fs.borrow().name()]);

        program.remove_shader(&fs).unwrap();
        assert_eq!(program.shaders().len(), 1);
        assert!(headless.attached_shaders(name).is_empty());
        assert!(fs.borrow().attached_programs().is_empty());
    }

    #[test]
    fn queued_error_frees_new_program() {
        let headless = Rc::new(HeadlessDevice::new(Settings {
            error_check: ErrorCheck::Fail,
            ..Settings::default()
        }));
        let mut program = program(&headless, FS);
        headless.push_error(DriverError::InvalidEnum);

        match program.build() {
            Err(Error::Driver(DriverError::InvalidEnum)) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert!(!program.is_built());
        assert!(!headless.is_program(1));

        program.build().unwrap();
        assert!(headless.is_program(program.name()));
    }

    #[test]
    fn release() {
        let headless = Rc::new(HeadlessDevice::default());
        let mut program = program(&headless, FS);
        program.build().unwrap();
        program.uniform_location("u_MVP").unwrap();

        let name = program.name();
        program.release();
        assert!(!program.is_built());
        assert!(program.shaders().is_empty());
        assert!(!headless.is_program(name));
        assert!(program.uniform_location("u_MVP").is_err());

        program.release();
    }
}
