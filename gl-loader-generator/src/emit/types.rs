use std::io;

use super::GENERATED_NOTICE;

// https://registry.khronos.org/OpenGL/api/GL/glcorearb.h
// https://registry.khronos.org/OpenGL/api/GL/glext.h

const GL_TYPES: &str = "use std::ffi::{c_char, c_double, c_float, c_int, c_short, c_uchar, c_uint, c_ushort, c_void};

pub type GLbitfield = c_uint;
pub type GLboolean = c_uchar;
pub type GLbyte = i8;
pub type GLchar = c_char;
pub type GLcharARB = c_char;
pub type GLclampd = c_double;
pub type GLclampf = c_float;
pub type GLclampx = i32;
pub type GLdouble = c_double;
pub type GLenum = c_uint;
pub type GLfixed = i32;
pub type GLfloat = c_float;
pub type GLhalf = u16;
pub type GLhalfARB = u16;
pub type GLhalfNV = c_ushort;
pub type GLhandleARB = c_uint;
pub type GLint = c_int;
pub type GLint64 = i64;
pub type GLint64EXT = i64;
pub type GLintptr = isize;
pub type GLintptrARB = isize;
pub type GLshort = c_short;
pub type GLsizei = c_int;
pub type GLsizeiptr = isize;
pub type GLsizeiptrARB = isize;
pub type GLsync = *mut c_void;
pub type GLubyte = c_uchar;
pub type GLuint = c_uint;
pub type GLuint64 = u64;
pub type GLuint64EXT = u64;
pub type GLushort = c_ushort;
pub type GLvdpauSurfaceNV = GLintptr;
pub type GLvoid = c_void;
pub type GLeglClientBufferEXT = *mut c_void;
pub type GLeglImageOES = *mut c_void;

pub type GLDEBUGPROC = Option<unsafe extern \"system\" fn(
    source: GLenum,
    r#type: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    userParam: *const c_void,
)>;
pub type GLDEBUGPROCARB = GLDEBUGPROC;
pub type GLDEBUGPROCKHR = GLDEBUGPROC;
pub type GLDEBUGPROCAMD = Option<unsafe extern \"system\" fn(
    id: GLuint,
    category: GLenum,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    userParam: *mut c_void,
)>;
pub type GLVULKANPROCNV = Option<unsafe extern \"system\" fn()>;
";

pub fn emit_types<W: io::Write>(w: &mut W) -> anyhow::Result<()> {
    w.write_all(GENERATED_NOTICE.as_bytes())?;
    write!(w, "\n")?;
    w.write_all(GL_TYPES.as_bytes())?;
    Ok(())
}

#[test]
fn test_emit_types() {
    let out = super::tests::emitted(|w| emit_types(w));
    assert!(out.starts_with(GENERATED_NOTICE));
    for name in ["GLenum", "GLint", "GLbitfield", "GLubyte", "GLsync", "GLDEBUGPROC"] {
        assert!(out.contains(&format!("pub type {name} = ")), "{name}");
    }
}
