extern crate env_logger;
extern crate glesutils;
extern crate rand;

use std::rc::Rc;

use glesutils::device::headless::HeadlessDevice;
use glesutils::prelude::*;
use glesutils::utils::as_bytes;
use rand::Rng;

fn headless(error_check: ErrorCheck) -> Rc<HeadlessDevice> {
    let _ = env_logger::try_init();
    Rc::new(HeadlessDevice::new(Settings {
        error_check,
        ..Settings::default()
    }))
}

#[test]
fn with_data() {
    let headless = headless(ErrorCheck::Fail);
    let vertices = [[0.0f32, 0.5, 0.0], [-0.5, -0.5, 0.0], [0.5, -0.5, 0.0]];

    let vbo = VertexBufferObject::with_data(
        headless.clone(),
        BufferTarget::Array,
        BufferUsage::Static,
        &vertices,
        3,
    ).unwrap();

    assert_eq!(vbo.num_elements(), 3);
    assert_eq!(vbo.size_bytes(), 36);
    assert_eq!(headless.bound_buffer(BufferTarget::Array), vbo.name());
    assert_eq!(headless.buffer_usage(vbo.name()), Some(BufferUsage::Static));
    assert_eq!(
        headless.buffer_bytes(vbo.name()).unwrap(),
        as_bytes(&vertices).to_vec()
    );
}

#[test]
fn update_random_ranges() {
    let headless = headless(ErrorCheck::Fail);
    let mut rng = rand::thread_rng();

    let mut vbo =
        VertexBufferObject::new(headless.clone(), BufferTarget::ElementArray, BufferUsage::Dynamic)
            .unwrap();
    vbo.set_tag("indices");
    vbo.bind().unwrap();
    vbo.allocate(256).unwrap();
    assert_eq!(vbo.num_elements(), 0);
    assert_eq!(headless.buffer_bytes(vbo.name()).unwrap(), vec![0u8; 256]);

    let mut expected = vec![0u8; 256];
    for _ in 0..32 {
        let len = rng.gen_range(1, 64);
        let offset = rng.gen_range(0, 256 - len);
        let payload: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        vbo.update_data(offset, &payload).unwrap();
        expected[offset..offset + len].copy_from_slice(&payload);
    }

    assert_eq!(headless.buffer_bytes(vbo.name()).unwrap(), expected);
}

#[test]
fn update_out_of_bounds() {
    let headless = headless(ErrorCheck::Fail);
    let mut vbo =
        VertexBufferObject::new(headless.clone(), BufferTarget::Array, BufferUsage::Stream).unwrap();
    vbo.bind().unwrap();
    vbo.buffer_data(&[1u16, 2, 3, 4], 4).unwrap();

    vbo.update_data(6, &[9u16]).unwrap();
    assert_eq!(
        headless.buffer_bytes(vbo.name()).unwrap(),
        vec![1, 0, 2, 0, 3, 0, 9, 0]
    );

    let err = vbo.update_data(6, &[9u16, 9]).unwrap_err();
    assert!(err.is_argument_error());
    assert_eq!(
        format!("{}", err),
        "Vertex buffer size exceeded: offset + size > internal size: 6 + 4 > 8"
    );
}

#[test]
fn driver_errors() {
    // Buffer data without a bound buffer is rejected by the driver.
    let headless = headless(ErrorCheck::Fail);
    let mut vbo =
        VertexBufferObject::new(headless.clone(), BufferTarget::Array, BufferUsage::Static).unwrap();

    match vbo.allocate(16) {
        Err(Error::Driver(DriverError::InvalidOperation)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let headless = self::headless(ErrorCheck::Log);
    let mut vbo =
        VertexBufferObject::new(headless.clone(), BufferTarget::Array, BufferUsage::Static).unwrap();
    vbo.allocate(16).unwrap();
    assert_eq!(headless.get_error(), None);
}

#[test]
fn creation_failure() {
    let headless = headless(ErrorCheck::Fail);
    headless.set_exhausted(true);

    match VertexBufferObject::new(headless.clone(), BufferTarget::Array, BufferUsage::Static) {
        Err(Error::BufferCreationFailure) => {}
        other => panic!("unexpected {:?}", other),
    }
}
