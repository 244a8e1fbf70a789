//! An in-memory `Device` that follows the OpenGL ES 2.0 object model closely enough to
//! run the wrappers without a context.
//!
//! Shader compilation fails when the source is blank or contains an `#error` directive.
//! Linking requires exactly one compiled vertex shader and one compiled fragment shader,
//! and assigns consecutive locations to every `uniform` and `attribute` declared in
//! their sources.

use std::cell::{RefCell, RefMut};
use std::collections::{HashMap, VecDeque};

use super::{
    AttributeLayout, AttributeVariable, BufferTarget, BufferUsage, Device, DriverError,
    ShaderKind, UniformVariable,
};
use crate::settings::Settings;

/// The value last written to a uniform, flattened into its components.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Ints(Vec<i32>),
    Floats(Vec<f32>),
}

#[derive(Debug, Clone)]
struct HeadlessBuffer {
    usage: Option<BufferUsage>,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct HeadlessShader {
    kind: ShaderKind,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Clone, Default)]
struct HeadlessProgram {
    attached: Vec<u32>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: HashMap<String, i32>,
    attributes: HashMap<String, i32>,
    values: HashMap<i32, UniformValue>,
}

#[derive(Debug, Clone, Default)]
struct HeadlessAttribute {
    enabled: bool,
    value: Option<[f32; 4]>,
    layout: Option<AttributeLayout>,
}

#[derive(Default)]
struct HeadlessState {
    next_name: u32,
    exhausted: bool,
    errors: VecDeque<DriverError>,
    buffers: HashMap<u32, HeadlessBuffer>,
    bindings: HashMap<BufferTarget, u32>,
    shaders: HashMap<u32, HeadlessShader>,
    programs: HashMap<u32, HeadlessProgram>,
    current_program: u32,
    attributes: HashMap<u32, HeadlessAttribute>,
    calls: Vec<&'static str>,
}

impl HeadlessState {
    fn gen_name(&mut self) -> u32 {
        if self.exhausted {
            return 0;
        }

        self.next_name += 1;
        self.next_name
    }

    fn error(&mut self, err: DriverError) {
        self.errors.push_back(err);
    }

    fn bound(&mut self, target: BufferTarget) -> Option<u32> {
        match self.bindings.get(&target).cloned() {
            Some(id) if id != 0 => Some(id),
            _ => {
                self.error(DriverError::InvalidOperation);
                None
            }
        }
    }

    fn shader(&mut self, id: u32) -> Option<&mut HeadlessShader> {
        if !self.shaders.contains_key(&id) {
            let err = if self.programs.contains_key(&id) {
                DriverError::InvalidOperation
            } else {
                DriverError::InvalidValue
            };

            self.error(err);
            return None;
        }

        self.shaders.get_mut(&id)
    }

    fn program(&mut self, id: u32) -> Option<&mut HeadlessProgram> {
        if !self.programs.contains_key(&id) {
            let err = if self.shaders.contains_key(&id) {
                DriverError::InvalidOperation
            } else {
                DriverError::InvalidValue
            };

            self.error(err);
            return None;
        }

        self.programs.get_mut(&id)
    }

    fn max_attributes() -> u32 {
        8
    }
}

/// A headless device, see the module documentation.
#[derive(Default)]
pub struct HeadlessDevice {
    settings: Settings,
    state: RefCell<HeadlessState>,
}

impl HeadlessDevice {
    pub fn new(settings: Settings) -> Self {
        HeadlessDevice {
            settings,
            state: RefCell::new(HeadlessState::default()),
        }
    }

    /// Queues an error as if the driver had raised it.
    pub fn push_error(&self, err: DriverError) {
        self.state.borrow_mut().error(err);
    }

    /// Makes every following `gen_buffer`, `create_shader` and `create_program` return 0.
    pub fn set_exhausted(&self, exhausted: bool) {
        self.state.borrow_mut().exhausted = exhausted;
    }

    /// The entry points called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn is_buffer(&self, id: u32) -> bool {
        self.state.borrow().buffers.contains_key(&id)
    }

    pub fn is_shader(&self, id: u32) -> bool {
        self.state.borrow().shaders.contains_key(&id)
    }

    pub fn is_program(&self, id: u32) -> bool {
        self.state.borrow().programs.contains_key(&id)
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> u32 {
        self.state
            .borrow()
            .bindings
            .get(&target)
            .cloned()
            .unwrap_or(0)
    }

    pub fn buffer_bytes(&self, id: u32) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&id).map(|v| v.bytes.clone())
    }

    pub fn buffer_usage(&self, id: u32) -> Option<BufferUsage> {
        self.state.borrow().buffers.get(&id).and_then(|v| v.usage)
    }

    /// Shaders attached to `program`, in attach order.
    pub fn attached_shaders(&self, program: u32) -> Vec<u32> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|v| v.attached.clone())
            .unwrap_or_default()
    }

    pub fn current_program(&self) -> u32 {
        self.state.borrow().current_program
    }

    /// The value last written to the uniform `name` of `program`.
    pub fn uniform_value(&self, program: u32, name: &str) -> Option<UniformValue> {
        let state = self.state.borrow();
        let program = state.programs.get(&program)?;
        let location = program.uniforms.get(name)?;
        program.values.get(location).cloned()
    }

    pub fn attribute_enabled(&self, index: u32) -> bool {
        self.state
            .borrow()
            .attributes
            .get(&index)
            .map(|v| v.enabled)
            .unwrap_or(false)
    }

    pub fn attribute_value(&self, index: u32) -> Option<[f32; 4]> {
        self.state.borrow().attributes.get(&index).and_then(|v| v.value)
    }

    pub fn attribute_layout(&self, index: u32) -> Option<AttributeLayout> {
        self.state.borrow().attributes.get(&index).and_then(|v| v.layout)
    }

    fn record(&self, call: &'static str) -> RefMut<HeadlessState> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
    }
}

/// Collects the names declared with `qualifier` in `source`, in declaration order.
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    let mut names = Vec::new();
    for statement in source.split(';') {
        let mut tokens = statement.split_whitespace();
        if tokens.next() != Some(qualifier) {
            continue;
        }

        // The last token is the name, optionally followed by an array size.
        if let Some(name) = tokens.last() {
            let name = name.split('[').next().unwrap_or(name);
            if !name.is_empty() && !names.iter().any(|v| v == name) {
                names.push(name.to_owned());
            }
        }
    }

    names
}

fn flatten(variable: &UniformVariable) -> UniformValue {
    match *variable {
        UniformVariable::I32(v) => UniformValue::Ints(vec![v]),
        UniformVariable::Vector2i(v) => UniformValue::Ints(v.to_vec()),
        UniformVariable::Vector3i(v) => UniformValue::Ints(v.to_vec()),
        UniformVariable::Vector4i(v) => UniformValue::Ints(v.to_vec()),
        UniformVariable::F32(v) => UniformValue::Floats(vec![v]),
        UniformVariable::Vector2f(v) => UniformValue::Floats(v.to_vec()),
        UniformVariable::Vector3f(v) => UniformValue::Floats(v.to_vec()),
        UniformVariable::Vector4f(v) => UniformValue::Floats(v.to_vec()),
        UniformVariable::Matrix2f(v, _) => {
            UniformValue::Floats(v.iter().flat_map(|c| c.iter().cloned()).collect())
        }
        UniformVariable::Matrix3f(v, _) => {
            UniformValue::Floats(v.iter().flat_map(|c| c.iter().cloned()).collect())
        }
        UniformVariable::Matrix4f(v, _) => {
            UniformValue::Floats(v.iter().flat_map(|c| c.iter().cloned()).collect())
        }
        UniformVariable::I32Array(v) => UniformValue::Ints(v.to_vec()),
        UniformVariable::Vector2iArray(v) => {
            UniformValue::Ints(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::Vector3iArray(v) => {
            UniformValue::Ints(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::Vector4iArray(v) => {
            UniformValue::Ints(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::F32Array(v) => UniformValue::Floats(v.to_vec()),
        UniformVariable::Vector2fArray(v) => {
            UniformValue::Floats(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::Vector3fArray(v) => {
            UniformValue::Floats(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::Vector4fArray(v) => {
            UniformValue::Floats(v.iter().flat_map(|e| e.iter().cloned()).collect())
        }
        UniformVariable::Matrix2fArray(v, _) => UniformValue::Floats(
            v.iter()
                .flat_map(|m| m.iter().flat_map(|c| c.iter().cloned()))
                .collect(),
        ),
        UniformVariable::Matrix3fArray(v, _) => UniformValue::Floats(
            v.iter()
                .flat_map(|m| m.iter().flat_map(|c| c.iter().cloned()))
                .collect(),
        ),
        UniformVariable::Matrix4fArray(v, _) => UniformValue::Floats(
            v.iter()
                .flat_map(|m| m.iter().flat_map(|c| c.iter().cloned()))
                .collect(),
        ),
    }
}

impl Device for HeadlessDevice {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn get_error(&self) -> Option<DriverError> {
        self.state.borrow_mut().errors.pop_front()
    }

    fn gen_buffer(&self) -> u32 {
        let mut state = self.record("glGenBuffers");
        let id = state.gen_name();
        if id != 0 {
            state.buffers.insert(
                id,
                HeadlessBuffer {
                    usage: None,
                    bytes: Vec::new(),
                },
            );
        }

        id
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.record("glDeleteBuffers");
        if state.buffers.remove(&buffer).is_some() {
            for v in state.bindings.values_mut() {
                if *v == buffer {
                    *v = 0;
                }
            }
        }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        let mut state = self.record("glBindBuffer");
        if buffer != 0 && !state.buffers.contains_key(&buffer) {
            state.error(DriverError::InvalidOperation);
            return;
        }

        state.bindings.insert(target, buffer);
    }

    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        let mut state = self.record("glBufferData");
        if let Some(id) = state.bound(target) {
            let mut bytes = vec![0; size];
            if let Some(data) = data {
                let len = data.len().min(size);
                bytes[..len].copy_from_slice(&data[..len]);
            }

            if let Some(buffer) = state.buffers.get_mut(&id) {
                buffer.usage = Some(usage);
                buffer.bytes = bytes;
            }
        }
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        let mut state = self.record("glBufferSubData");
        if let Some(id) = state.bound(target) {
            let fits = state
                .buffers
                .get(&id)
                .map(|v| offset + data.len() <= v.bytes.len())
                .unwrap_or(false);

            if !fits {
                state.error(DriverError::InvalidValue);
                return;
            }

            if let Some(buffer) = state.buffers.get_mut(&id) {
                buffer.bytes[offset..offset + data.len()].copy_from_slice(data);
            }
        }
    }

    fn create_shader(&self, kind: ShaderKind) -> u32 {
        let mut state = self.record("glCreateShader");
        let id = state.gen_name();
        if id != 0 {
            state.shaders.insert(
                id,
                HeadlessShader {
                    kind,
                    source: String::new(),
                    compiled: false,
                    log: String::new(),
                },
            );
        }

        id
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.record("glShaderSource");
        if let Some(v) = state.shader(shader) {
            v.source = source.to_owned();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.record("glCompileShader");
        if let Some(v) = state.shader(shader) {
            let directive = v
                .source
                .lines()
                .position(|line| line.trim_start().starts_with("#error"));

            if v.source.trim().is_empty() {
                v.compiled = false;
                v.log = "ERROR: 0:0: '' : syntax error, empty source".to_owned();
            } else if let Some(line) = directive {
                v.compiled = false;
                v.log = format!("ERROR: 0:{}: '#error' : user directive", line + 1);
            } else {
                v.compiled = true;
                v.log = String::new();
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut state = self.record("glGetShaderiv");
        state.shader(shader).map(|v| v.compiled).unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut state = self.record("glGetShaderInfoLog");
        state.shader(shader).map(|v| v.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.record("glDeleteShader");
        if shader == 0 {
            return;
        }

        if state.shader(shader).is_some() {
            state.shaders.remove(&shader);
            for program in state.programs.values_mut() {
                program.attached.retain(|&v| v != shader);
            }
        }
    }

    fn create_program(&self) -> u32 {
        let mut state = self.record("glCreateProgram");
        let id = state.gen_name();
        if id != 0 {
            state.programs.insert(id, HeadlessProgram::default());
        }

        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.record("glAttachShader");
        if state.program(program).is_none() || state.shader(shader).is_none() {
            return;
        }

        let attached = state
            .programs
            .get(&program)
            .map(|v| v.attached.contains(&shader))
            .unwrap_or(false);

        if attached {
            state.error(DriverError::InvalidOperation);
        } else if let Some(v) = state.programs.get_mut(&program) {
            v.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.record("glDetachShader");
        if state.program(program).is_none() || state.shader(shader).is_none() {
            return;
        }

        let attached = state
            .programs
            .get(&program)
            .map(|v| v.attached.contains(&shader))
            .unwrap_or(false);

        if !attached {
            state.error(DriverError::InvalidOperation);
        } else if let Some(v) = state.programs.get_mut(&program) {
            v.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.record("glLinkProgram");
        let attached = match state.program(program) {
            Some(v) => v.attached.clone(),
            None => return,
        };

        let shaders: Vec<HeadlessShader> = attached
            .iter()
            .filter_map(|id| state.shaders.get(id).cloned())
            .collect();

        let count = |kind| shaders.iter().filter(|v| v.kind == kind).count();
        let failure = if shaders.iter().any(|v| !v.compiled) {
            Some("error: attached shader is not compiled.")
        } else if count(ShaderKind::Vertex) != 1 {
            Some("error: program requires exactly one vertex shader.")
        } else if count(ShaderKind::Fragment) != 1 {
            Some("error: program requires exactly one fragment shader.")
        } else {
            None
        };

        let mut uniforms = HashMap::new();
        let mut attributes = HashMap::new();
        if failure.is_none() {
            for shader in &shaders {
                for name in declarations(&shader.source, "uniform") {
                    let next = uniforms.len() as i32;
                    uniforms.entry(name).or_insert(next);
                }
            }

            let vs = shaders.iter().filter(|v| v.kind == ShaderKind::Vertex);
            for shader in vs {
                for name in declarations(&shader.source, "attribute") {
                    let next = attributes.len() as i32;
                    attributes.entry(name).or_insert(next);
                }
            }
        }

        let too_many_attributes = attributes.len() as u32 > HeadlessState::max_attributes();
        if let Some(v) = state.programs.get_mut(&program) {
            v.values.clear();
            v.validated = false;

            if let Some(log) = failure {
                v.linked = false;
                v.log = log.to_owned();
                v.uniforms.clear();
                v.attributes.clear();
            } else if too_many_attributes {
                v.linked = false;
                v.log = "error: too many vertex attributes.".to_owned();
                v.uniforms.clear();
                v.attributes.clear();
            } else {
                v.linked = true;
                v.log = String::new();
                v.uniforms = uniforms;
                v.attributes = attributes;
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut state = self.record("glGetProgramiv");
        state.program(program).map(|v| v.linked).unwrap_or(false)
    }

    fn validate_program(&self, program: u32) {
        let mut state = self.record("glValidateProgram");
        if let Some(v) = state.program(program) {
            v.validated = v.linked;
            v.log = if v.linked {
                String::new()
            } else {
                "error: program is not successfully linked.".to_owned()
            };
        }
    }

    fn program_validate_status(&self, program: u32) -> bool {
        let mut state = self.record("glGetProgramiv");
        state.program(program).map(|v| v.validated).unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut state = self.record("glGetProgramInfoLog");
        state.program(program).map(|v| v.log.clone()).unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.record("glDeleteProgram");
        if program == 0 {
            return;
        }

        if state.program(program).is_some() {
            state.programs.remove(&program);
            if state.current_program == program {
                state.current_program = 0;
            }
        }
    }

    fn use_program(&self, program: u32) {
        let mut state = self.record("glUseProgram");
        if program == 0 {
            state.current_program = 0;
            return;
        }

        let linked = state.program(program).map(|v| v.linked);
        match linked {
            Some(true) => state.current_program = program,
            Some(false) => state.error(DriverError::InvalidOperation),
            None => {}
        }
    }

    fn uniform_location(&self, program: u32, name: &str) -> i32 {
        let mut state = self.record("glGetUniformLocation");
        let linked = state.program(program).map(|v| v.linked);
        match linked {
            Some(true) => state
                .programs
                .get(&program)
                .and_then(|v| v.uniforms.get(name).cloned())
                .unwrap_or(-1),
            Some(false) => {
                state.error(DriverError::InvalidOperation);
                -1
            }
            None => -1,
        }
    }

    fn attribute_location(&self, program: u32, name: &str) -> i32 {
        let mut state = self.record("glGetAttribLocation");
        let linked = state.program(program).map(|v| v.linked);
        match linked {
            Some(true) => state
                .programs
                .get(&program)
                .and_then(|v| v.attributes.get(name).cloned())
                .unwrap_or(-1),
            Some(false) => {
                state.error(DriverError::InvalidOperation);
                -1
            }
            None => -1,
        }
    }

    fn uniform(&self, location: i32, variable: &UniformVariable) {
        let mut state = self.record("glUniform");
        let current = state.current_program;
        if current == 0 {
            state.error(DriverError::InvalidOperation);
            return;
        }

        // Location -1 is silently ignored.
        if location == -1 {
            return;
        }

        let known = state
            .programs
            .get(&current)
            .map(|v| v.uniforms.values().any(|&l| l == location))
            .unwrap_or(false);

        if !known {
            state.error(DriverError::InvalidOperation);
            return;
        }

        if let Some(v) = state.programs.get_mut(&current) {
            v.values.insert(location, flatten(variable));
        }
    }

    fn vertex_attribute(&self, index: u32, variable: &AttributeVariable) {
        let mut state = self.record("glVertexAttrib");
        if index >= HeadlessState::max_attributes() {
            state.error(DriverError::InvalidValue);
            return;
        }

        state.attributes.entry(index).or_default().value = Some(variable.expand());
    }

    fn vertex_attribute_pointer(&self, index: u32, layout: &AttributeLayout) {
        let mut state = self.record("glVertexAttribPointer");
        if index >= HeadlessState::max_attributes() || layout.size < 1 || layout.size > 4 {
            state.error(DriverError::InvalidValue);
            return;
        }

        state.attributes.entry(index).or_default().layout = Some(*layout);
    }

    fn enable_vertex_attribute(&self, index: u32) {
        let mut state = self.record("glEnableVertexAttribArray");
        if index >= HeadlessState::max_attributes() {
            state.error(DriverError::InvalidValue);
            return;
        }

        state.attributes.entry(index).or_default().enabled = true;
    }

    fn disable_vertex_attribute(&self, index: u32) {
        let mut state = self.record("glDisableVertexAttribArray");
        if index >= HeadlessState::max_attributes() {
            state.error(DriverError::InvalidValue);
            return;
        }

        state.attributes.entry(index).or_default().enabled = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn declarations_are_collected() {
        let source = "
            precision mediump float;
            uniform mat4 u_MVP;
            uniform lowp vec4 u_Colors[4];
            attribute vec3 a_Position; attribute vec2 a_Texcoord;
            varying vec2 v_Texcoord;
            void main() { gl_Position = u_MVP * vec4(a_Position, 1.0); }";

        assert_eq!(declarations(source, "uniform"), vec!["u_MVP", "u_Colors"]);
        assert_eq!(
            declarations(source, "attribute"),
            vec!["a_Position", "a_Texcoord"]
        );
    }

    #[test]
    fn buffers() {
        let device = HeadlessDevice::default();
        let id = device.gen_buffer();
        assert!(device.is_buffer(id));

        device.buffer_data(BufferTarget::Array, 4, None, BufferUsage::Static);
        assert_eq!(device.get_error(), Some(DriverError::InvalidOperation));

        device.bind_buffer(BufferTarget::Array, id);
        device.buffer_data(BufferTarget::Array, 4, Some(&[1u8, 2][..]), BufferUsage::Dynamic);
        assert_eq!(device.buffer_bytes(id), Some(vec![1, 2, 0, 0]));
        assert_eq!(device.buffer_usage(id), Some(BufferUsage::Dynamic));

        device.buffer_sub_data(BufferTarget::Array, 3, &[9, 9]);
        assert_eq!(device.get_error(), Some(DriverError::InvalidValue));

        device.buffer_sub_data(BufferTarget::Array, 2, &[7, 8]);
        assert_eq!(device.buffer_bytes(id), Some(vec![1, 2, 7, 8]));

        device.delete_buffer(id);
        assert!(!device.is_buffer(id));
        assert_eq!(device.bound_buffer(BufferTarget::Array), 0);
        assert_eq!(device.get_error(), None);
    }

    #[test]
    fn exhausted() {
        let device = HeadlessDevice::default();
        device.set_exhausted(true);
        assert_eq!(device.gen_buffer(), 0);
        assert_eq!(device.create_shader(ShaderKind::Vertex), 0);
        assert_eq!(device.create_program(), 0);

        device.set_exhausted(false);
        assert_ne!(device.create_program(), 0);
    }

    #[test]
    fn compile_and_link() {
        let device = HeadlessDevice::default();

        let vs = device.create_shader(ShaderKind::Vertex);
        device.shader_source(vs, "attribute vec4 a_Position; uniform float u_Scale;");
        device.compile_shader(vs);
        assert!(device.shader_compile_status(vs));

        let broken = device.create_shader(ShaderKind::Fragment);
        device.shader_source(broken, "void main() {}\n#error unsupported");
        device.compile_shader(broken);
        assert!(!device.shader_compile_status(broken));
        assert!(device.shader_info_log(broken).contains("0:2"));

        let fs = device.create_shader(ShaderKind::Fragment);
        device.shader_source(fs, "uniform vec4 u_Color; uniform float u_Scale;");
        device.compile_shader(fs);

        let program = device.create_program();
        device.attach_shader(program, vs);
        device.link_program(program);
        assert!(!device.program_link_status(program));
        assert!(device.program_info_log(program).contains("fragment"));

        device.attach_shader(program, fs);
        device.link_program(program);
        assert!(device.program_link_status(program));
        assert_eq!(device.uniform_location(program, "u_Scale"), 0);
        assert_eq!(device.uniform_location(program, "u_Color"), 1);
        assert_eq!(device.uniform_location(program, "u_Missing"), -1);
        assert_eq!(device.attribute_location(program, "a_Position"), 0);
        assert_eq!(device.get_error(), None);
    }

    #[test]
    fn uniforms_need_a_current_program() {
        let device = HeadlessDevice::default();
        device.uniform(0, &UniformVariable::F32(1.0));
        assert_eq!(device.get_error(), Some(DriverError::InvalidOperation));
    }

    #[test]
    fn wrong_object_kind() {
        let device = HeadlessDevice::default();
        let program = device.create_program();
        device.compile_shader(program);
        assert_eq!(device.get_error(), Some(DriverError::InvalidOperation));

        device.compile_shader(1234);
        assert_eq!(device.get_error(), Some(DriverError::InvalidValue));
    }
}
