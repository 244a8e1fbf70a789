use std::mem;
use std::slice;

/// A marker trait indicating that a type is plain-old-data. A pod type has no padding
/// and no invalid bit patterns, so its memory can be handed to the driver as raw bytes.
pub unsafe trait Pod: Copy + Sized {}

macro_rules! impl_pod {
    ( ty = $($ty:ty)* ) => { $( unsafe impl Pod for $ty {} )* };
    ( ar = $($tt:expr)* ) => { $( unsafe impl<T: Pod> Pod for [T; $tt] {} )* };
}

impl_pod! { ty = i8 u8 i16 u16 i32 u32 f32 }
impl_pod! { ar = 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 }

/// Borrows a slice of pod values as bytes.
#[inline]
pub fn as_bytes<T: Pod>(data: &[T]) -> &[u8] {
    unsafe { slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}
