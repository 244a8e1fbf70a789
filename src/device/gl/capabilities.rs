use gl::types::*;
use std::cmp;
use std::ffi;

use crate::errors::*;

/// The API and version of a context. Desktop and ES versions are unordered with
/// respect to each other, so `GL(3, 0) >= ES(3, 0)` is false and so is the reverse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    GL(u8, u8),
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        match (*self, *other) {
            (Version::GL(a, b), Version::GL(c, d)) | (Version::ES(a, b), Version::ES(c, d)) => {
                Some((a, b).cmp(&(c, d)))
            }
            _ => None,
        }
    }
}

impl Version {
    /// Parses the string returned by `glGetString(GL_VERSION)`, e.g. `"OpenGL ES 2.0
    /// build 1.8@905891"` or `"4.5.0 NVIDIA 384.90"`.
    pub fn parse_str(desc: &str) -> Result<Version> {
        let malformed = || Error::Context(format!("[GL] Version string {:?} is malformed.", desc));

        let (es, rest) = if desc.starts_with("OpenGL ES-") {
            // "OpenGL ES-CM 1.1" and friends, the profile name ends at the first space.
            let rest = &desc[10..];
            (true, rest.splitn(2, ' ').nth(1).unwrap_or(""))
        } else if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else {
            (false, desc)
        };

        let number = rest.split(' ').next().ok_or_else(malformed)?;
        let mut iter = number.split('.');
        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;
        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }

    /// Reads `GL_VERSION` from the current context.
    ///
    /// # Unsafe
    ///
    /// The loaded `gl` functions must belong to the context current on this thread.
    pub unsafe fn parse() -> Result<Version> {
        Version::parse_str(&parse_str(gl::VERSION)?)
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
        /// The extensions the requirement check looks at.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

        impl Extensions {
            /// Builds the list from the space separated string returned by
            /// `glGetString(GL_EXTENSIONS)`.
            pub fn parse_str(list: &str) -> Extensions {
                let mut extensions = Extensions::default();
                for extension in list.split(' ') {
                    match extension {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => ()
                    }
                }

                extensions
            }

            /// Queries the extension list, with `glGetStringi` on 3.0 contexts where
            /// `glGetString(GL_EXTENSIONS)` is gone.
            ///
            /// *Safety*: see `Version::parse`.
            pub unsafe fn parse(version: Version) -> Result<Extensions> {
                if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                    let mut num_extensions = 0;
                    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);

                    let mut list = Vec::with_capacity(num_extensions as usize);
                    for i in 0..num_extensions {
                        let ext = gl::GetStringi(gl::EXTENSIONS, i as GLuint);
                        if !ext.is_null() {
                            let ext = ffi::CStr::from_ptr(ext as *const _);
                            list.push(ext.to_string_lossy().into_owned());
                        }
                    }

                    Ok(Extensions::parse_str(&list.join(" ")))
                } else {
                    Ok(Extensions::parse_str(&parse_str(gl::EXTENSIONS)?))
                }
            }
        }
    }
}

extensions! {
    "GL_ARB_shader_objects" => gl_arb_shader_objects,
    "GL_ARB_vertex_shader" => gl_arb_vertex_shader,
    "GL_ARB_fragment_shader" => gl_arb_fragment_shader,
    "GL_ARB_vertex_buffer_object" => gl_arb_vertex_buffer_object,
}

/// What the context reports about itself. Read once when the device is created.
#[derive(Debug)]
pub struct Capabilities {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,

    /// The version of the shading language, e.g. `"OpenGL ES GLSL ES 1.00"`.
    pub shading_language: String,

    pub extensions: Extensions,
    /// `GL_MAX_VERTEX_ATTRIBS`, at least 8 on ES 2.0.
    pub max_vertex_attribs: u32,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;

        let mut max_vertex_attribs = 8;
        gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max_vertex_attribs);

        Ok(Capabilities {
            version,
            extensions,
            vendor: parse_str(gl::VENDOR)?,
            renderer: parse_str(gl::RENDERER)?,
            shading_language: parse_str(gl::SHADING_LANGUAGE_VERSION)?,
            max_vertex_attribs: max_vertex_attribs as u32,
        })
    }

    /// Checks that the context can run the wrappers: shader objects and vertex buffer
    /// objects, either in core or through extensions.
    pub fn check(&self) -> Result<()> {
        let exts = &self.extensions;

        if !(self.version >= Version::GL(1, 5)
            || self.version >= Version::ES(2, 0)
            || exts.gl_arb_vertex_buffer_object)
        {
            return Err(Error::Requirement("vertex buffer objects".to_owned()));
        }

        if !(self.version >= Version::GL(2, 0)
            || self.version >= Version::ES(2, 0)
            || (exts.gl_arb_shader_objects
                && exts.gl_arb_vertex_shader
                && exts.gl_arb_fragment_shader))
        {
            return Err(Error::Requirement("shader objects".to_owned()));
        }

        Ok(())
    }
}

#[inline]
unsafe fn parse_str(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        return Err(Error::Context(format!("[GL] String of {} is null.", id)));
    }

    String::from_utf8(ffi::CStr::from_ptr(s as *const _).to_bytes().to_vec())
        .map_err(|_| Error::Context(format!("[GL] String of {} is unformaled.", id)))
}

#[cfg(test)]
mod test {
    use super::*;

    fn caps(version: Version, extensions: &str) -> Capabilities {
        Capabilities {
            version,
            vendor: String::new(),
            renderer: String::new(),
            shading_language: String::new(),
            extensions: Extensions::parse_str(extensions),
            max_vertex_attribs: 8,
        }
    }

    #[test]
    fn version() {
        assert_eq!(
            Version::parse_str("OpenGL ES 2.0 build 1.8@905891").unwrap(),
            Version::ES(2, 0)
        );
        assert_eq!(
            Version::parse_str("OpenGL ES-CM 1.1").unwrap(),
            Version::ES(1, 1)
        );
        assert_eq!(
            Version::parse_str("4.5.0 NVIDIA 384.90").unwrap(),
            Version::GL(4, 5)
        );
        assert!(Version::parse_str("OpenGL ES").is_err());
        assert!(Version::parse_str("").is_err());
    }

    #[test]
    fn ordering() {
        assert!(Version::ES(3, 0) > Version::ES(2, 0));
        assert!(Version::GL(2, 1) > Version::GL(2, 0));
        assert!(!(Version::GL(3, 0) >= Version::ES(3, 0)));
        assert!(!(Version::ES(3, 0) >= Version::GL(3, 0)));
    }

    #[test]
    fn extensions() {
        let exts = Extensions::parse_str("GL_EXT_unrelated GL_ARB_vertex_buffer_object");
        assert!(exts.gl_arb_vertex_buffer_object);
        assert!(!exts.gl_arb_shader_objects);
        assert!(!exts.gl_arb_vertex_shader);
    }

    #[test]
    fn requirements() {
        assert!(caps(Version::ES(2, 0), "").check().is_ok());
        assert!(caps(Version::GL(2, 1), "").check().is_ok());
        assert!(caps(Version::ES(1, 1), "").check().is_err());
        assert!(caps(Version::GL(1, 5), "").check().is_err());
        assert!(caps(
            Version::GL(1, 5),
            "GL_ARB_shader_objects GL_ARB_vertex_shader GL_ARB_fragment_shader"
        ).check()
        .is_ok());
    }
}
