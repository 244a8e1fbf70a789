use cgmath::{Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// Uniform variable for shader program object. Each matrix based `UniformVariable`
/// is stored column by column, with an optional transpose.
///
/// The array variants map to the `glUniform*v` entry points, their element count is
/// the length of the slice.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable<'a> {
    I32(i32),
    Vector2i([i32; 2]),
    Vector3i([i32; 3]),
    Vector4i([i32; 4]),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    Matrix2f([[f32; 2]; 2], bool),
    Matrix3f([[f32; 3]; 3], bool),
    Matrix4f([[f32; 4]; 4], bool),

    I32Array(&'a [i32]),
    Vector2iArray(&'a [[i32; 2]]),
    Vector3iArray(&'a [[i32; 3]]),
    Vector4iArray(&'a [[i32; 4]]),
    F32Array(&'a [f32]),
    Vector2fArray(&'a [[f32; 2]]),
    Vector3fArray(&'a [[f32; 3]]),
    Vector4fArray(&'a [[f32; 4]]),
    Matrix2fArray(&'a [[[f32; 2]; 2]], bool),
    Matrix3fArray(&'a [[[f32; 3]; 3]], bool),
    Matrix4fArray(&'a [[[f32; 4]; 4]], bool),
}

impl<'a> UniformVariable<'a> {
    /// The number of elements written, 1 for non-array variables.
    pub fn count(&self) -> usize {
        match *self {
            UniformVariable::I32Array(v) => v.len(),
            UniformVariable::Vector2iArray(v) => v.len(),
            UniformVariable::Vector3iArray(v) => v.len(),
            UniformVariable::Vector4iArray(v) => v.len(),
            UniformVariable::F32Array(v) => v.len(),
            UniformVariable::Vector2fArray(v) => v.len(),
            UniformVariable::Vector3fArray(v) => v.len(),
            UniformVariable::Vector4fArray(v) => v.len(),
            UniformVariable::Matrix2fArray(v, _) => v.len(),
            UniformVariable::Matrix3fArray(v, _) => v.len(),
            UniformVariable::Matrix4fArray(v, _) => v.len(),
            _ => 1,
        }
    }

    /// Returns a transposed copy of a matrix variable, other variables are unchanged.
    pub fn transposed(self) -> Self {
        match self {
            UniformVariable::Matrix2f(v, t) => UniformVariable::Matrix2f(v, !t),
            UniformVariable::Matrix3f(v, t) => UniformVariable::Matrix3f(v, !t),
            UniformVariable::Matrix4f(v, t) => UniformVariable::Matrix4f(v, !t),
            UniformVariable::Matrix2fArray(v, t) => UniformVariable::Matrix2fArray(v, !t),
            UniformVariable::Matrix3fArray(v, t) => UniformVariable::Matrix3fArray(v, !t),
            UniformVariable::Matrix4fArray(v, t) => UniformVariable::Matrix4fArray(v, !t),
            v => v,
        }
    }
}

macro_rules! impl_uniform_from {
    ($($src: ty => $variant: ident,)+) => {
        $(
            impl<'a> From<$src> for UniformVariable<'a> {
                fn from(v: $src) -> Self {
                    UniformVariable::$variant(v)
                }
            }
        )+
    };
}

macro_rules! impl_uniform_array_from {
    ($($elem: ty => $variant: ident,)+) => {
        $(
            impl<'a> From<&'a [$elem]> for UniformVariable<'a> {
                fn from(v: &'a [$elem]) -> Self {
                    UniformVariable::$variant(v)
                }
            }
        )+
    };
}

impl_uniform_from! {
    i32 => I32,
    [i32; 2] => Vector2i,
    [i32; 3] => Vector3i,
    [i32; 4] => Vector4i,
    f32 => F32,
    [f32; 2] => Vector2f,
    [f32; 3] => Vector3f,
    [f32; 4] => Vector4f,
}

impl_uniform_array_from! {
    i32 => I32Array,
    [i32; 2] => Vector2iArray,
    [i32; 3] => Vector3iArray,
    [i32; 4] => Vector4iArray,
    f32 => F32Array,
    [f32; 2] => Vector2fArray,
    [f32; 3] => Vector3fArray,
    [f32; 4] => Vector4fArray,
}

impl<'a> From<[[f32; 2]; 2]> for UniformVariable<'a> {
    fn from(v: [[f32; 2]; 2]) -> Self {
        UniformVariable::Matrix2f(v, false)
    }
}

impl<'a> From<[[f32; 3]; 3]> for UniformVariable<'a> {
    fn from(v: [[f32; 3]; 3]) -> Self {
        UniformVariable::Matrix3f(v, false)
    }
}

impl<'a> From<[[f32; 4]; 4]> for UniformVariable<'a> {
    fn from(v: [[f32; 4]; 4]) -> Self {
        UniformVariable::Matrix4f(v, false)
    }
}

impl<'a> From<&'a [[[f32; 2]; 2]]> for UniformVariable<'a> {
    fn from(v: &'a [[[f32; 2]; 2]]) -> Self {
        UniformVariable::Matrix2fArray(v, false)
    }
}

impl<'a> From<&'a [[[f32; 3]; 3]]> for UniformVariable<'a> {
    fn from(v: &'a [[[f32; 3]; 3]]) -> Self {
        UniformVariable::Matrix3fArray(v, false)
    }
}

impl<'a> From<&'a [[[f32; 4]; 4]]> for UniformVariable<'a> {
    fn from(v: &'a [[[f32; 4]; 4]]) -> Self {
        UniformVariable::Matrix4fArray(v, false)
    }
}

impl<'a> From<Vector2<f32>> for UniformVariable<'a> {
    fn from(v: Vector2<f32>) -> Self {
        UniformVariable::Vector2f(*v.as_ref())
    }
}

impl<'a> From<Vector3<f32>> for UniformVariable<'a> {
    fn from(v: Vector3<f32>) -> Self {
        UniformVariable::Vector3f(*v.as_ref())
    }
}

impl<'a> From<Vector4<f32>> for UniformVariable<'a> {
    fn from(v: Vector4<f32>) -> Self {
        UniformVariable::Vector4f(*v.as_ref())
    }
}

impl<'a> From<Matrix2<f32>> for UniformVariable<'a> {
    fn from(v: Matrix2<f32>) -> Self {
        UniformVariable::Matrix2f(*v.as_ref(), false)
    }
}

impl<'a> From<Matrix3<f32>> for UniformVariable<'a> {
    fn from(v: Matrix3<f32>) -> Self {
        UniformVariable::Matrix3f(*v.as_ref(), false)
    }
}

impl<'a> From<Matrix4<f32>> for UniformVariable<'a> {
    fn from(v: Matrix4<f32>) -> Self {
        UniformVariable::Matrix4f(*v.as_ref(), false)
    }
}

/// Generic value of a vertex attribute, used while its array is disabled. Missing
/// components default to `0.0` for y and z and `1.0` for w.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AttributeVariable {
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
}

impl AttributeVariable {
    /// Expands the variable into the four components stored by the driver.
    pub fn expand(&self) -> [f32; 4] {
        match *self {
            AttributeVariable::F32(x) => [x, 0.0, 0.0, 1.0],
            AttributeVariable::Vector2f(v) => [v[0], v[1], 0.0, 1.0],
            AttributeVariable::Vector3f(v) => [v[0], v[1], v[2], 1.0],
            AttributeVariable::Vector4f(v) => v,
        }
    }
}

impl From<f32> for AttributeVariable {
    fn from(v: f32) -> Self {
        AttributeVariable::F32(v)
    }
}

impl From<[f32; 2]> for AttributeVariable {
    fn from(v: [f32; 2]) -> Self {
        AttributeVariable::Vector2f(v)
    }
}

impl From<[f32; 3]> for AttributeVariable {
    fn from(v: [f32; 3]) -> Self {
        AttributeVariable::Vector3f(v)
    }
}

impl From<[f32; 4]> for AttributeVariable {
    fn from(v: [f32; 4]) -> Self {
        AttributeVariable::Vector4f(v)
    }
}

impl From<Vector2<f32>> for AttributeVariable {
    fn from(v: Vector2<f32>) -> Self {
        AttributeVariable::Vector2f(*v.as_ref())
    }
}

impl From<Vector3<f32>> for AttributeVariable {
    fn from(v: Vector3<f32>) -> Self {
        AttributeVariable::Vector3f(*v.as_ref())
    }
}

impl From<Vector4<f32>> for AttributeVariable {
    fn from(v: Vector4<f32>) -> Self {
        AttributeVariable::Vector4f(*v.as_ref())
    }
}
