extern crate env_logger;
extern crate failure;
extern crate gl;
extern crate glesutils;
extern crate glutin;

use std::rc::Rc;

use glesutils::prelude::*;
use glutin::GlContext;

const VS: &str = "
    attribute vec2 a_Position;
    attribute vec3 a_Color;
    varying vec3 v_Color;
    void main() {
        v_Color = a_Color;
        gl_Position = vec4(a_Position, 0.0, 1.0);
    }";

const FS: &str = "
    precision mediump float;
    uniform float u_Time;
    varying vec3 v_Color;
    void main() {
        gl_FragColor = vec4(v_Color * (0.75 + 0.25 * sin(u_Time)), 1.0);
    }";

fn main() -> std::result::Result<(), failure::Error> {
    env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let builder = glutin::WindowBuilder::new()
        .with_title("glesutils: triangle")
        .with_dimensions(glutin::dpi::LogicalSize::new(568.0, 320.0));
    let context = glutin::ContextBuilder::new()
        .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGlEs, (2, 0)))
        .with_vsync(true);
    let window = glutin::GlWindow::new(builder, context, &events_loop).map_err(failure::SyncFailure::new)?;

    let device: DeviceRef = unsafe {
        window.make_current()?;
        Rc::new(GLDevice::load_with(
            |symbol| window.get_proc_address(symbol) as *const _,
            Settings::default(),
        )?)
    };

    let mut program = ShaderProgram::new(device.clone(), "triangle");
    program.add_shader(Shader::vertex(device.clone(), VS, "triangle").shared());
    program.add_shader(Shader::fragment(device.clone(), FS, "triangle").shared());
    program.build()?;

    let vertices: [[f32; 5]; 3] = [
        [0.0, 0.5, 1.0, 0.0, 0.0],
        [-0.5, -0.5, 0.0, 1.0, 0.0],
        [0.5, -0.5, 0.0, 0.0, 1.0],
    ];

    let vbo = VertexBufferObject::with_data(
        device.clone(),
        BufferTarget::Array,
        BufferUsage::Static,
        &vertices,
        vertices.len(),
    )?;

    let position = AttributeLayout::new(2, VertexFormat::Float).with_stride(20);
    let color = AttributeLayout::new(3, VertexFormat::Float)
        .with_stride(20)
        .with_offset(8);

    let mut time = 0.0f32;
    let mut running = true;
    while running {
        events_loop.poll_events(|event| {
            if let glutin::Event::WindowEvent { event, .. } = event {
                if let glutin::WindowEvent::CloseRequested = event {
                    running = false;
                }
            }
        });

        unsafe {
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        program.bind()?;
        vbo.bind()?;
        program.set_attribute_pointer("a_Position", position)?;
        program.set_attribute_pointer("a_Color", color)?;
        program.enable_attribute("a_Position")?;
        program.enable_attribute("a_Color")?;
        program.set_uniform("u_Time", time)?;

        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, vbo.num_elements() as i32);
        }

        window.swap_buffers()?;
        time += 1.0 / 60.0;
    }

    Ok(())
}
