use std::fmt;

use crate::registry::{Command, Param};

// struct tags from GL_ARB_cl_event.
const OPAQUE_STRUCT_TAGS: &[&str] = &["_cl_context", "_cl_event"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Const,
    Mut,
}

impl Mutability {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Const => "*const",
            Self::Mut => "*mut",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pointee {
    Bytes,
    Base(String),
}

impl fmt::Display for Pointee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("std::ffi::c_void"),
            Self::Base(base) => f.write_str(base),
        }
    }
}

/// Rust type of a parameter or return value. All pointers are raw and therefore nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Void,
    Value(String),
    OpaqueHandle,
    Pointer(Mutability, Pointee),
    PointerToPointer {
        outer: Mutability,
        inner: Mutability,
        pointee: Pointee,
    },
    /// A shape no rule covers; rendered as `*mut base`.
    Unverified(Pointee),
}

impl TargetType {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("()"),
            Self::Value(base) => f.write_str(base),
            Self::OpaqueHandle => f.write_str("*mut std::ffi::c_void"),
            Self::Pointer(mutability, pointee) => write!(f, "{} {pointee}", mutability.as_str()),
            Self::PointerToPointer {
                outer,
                inner,
                pointee,
            } => write!(f, "{} {} {pointee}", outer.as_str(), inner.as_str()),
            Self::Unverified(pointee) => write!(f, "*mut {pointee}"),
        }
    }
}

fn pointer(mutability: Mutability, pointee: Pointee) -> TargetType {
    TargetType::Pointer(mutability, pointee)
}

fn pointer_to_pointer(outer: Mutability, inner: Mutability, pointee: Pointee) -> TargetType {
    TargetType::PointerToPointer {
        outer,
        inner,
        pointee,
    }
}

// `<name>m</name>[16]` decays to a pointer, same as in c.
fn array_mutability(shape: &str) -> Option<Mutability> {
    let (head, tail) = shape.split_once("?[")?;
    tail.strip_suffix(']')?;
    match head {
        "!" => Some(Mutability::Mut),
        "const!" => Some(Mutability::Const),
        _ => None,
    }
}

pub fn map_param(base: &str, shape: &str) -> TargetType {
    use Mutability::{Const, Mut};

    let base_pointee = || match base {
        "void" => Pointee::Bytes,
        _ => Pointee::Base(base.to_string()),
    };
    match (base, shape) {
        ("void", "?") => TargetType::Void,
        ("void", "void*?") => pointer(Mut, Pointee::Bytes),
        ("void", "constvoid*?") => pointer(Const, Pointee::Bytes),
        ("void", "void**?") => pointer_to_pointer(Mut, Mut, Pointee::Bytes),
        ("void", "constvoid**?") => pointer_to_pointer(Mut, Const, Pointee::Bytes),
        ("void", "void*const*?") => pointer_to_pointer(Const, Mut, Pointee::Bytes),
        ("void", "constvoid*const*?") => pointer_to_pointer(Const, Const, Pointee::Bytes),
        (tag, _) if OPAQUE_STRUCT_TAGS.contains(&tag) => TargetType::OpaqueHandle,
        (_, "!?") => TargetType::Value(base.to_string()),
        (_, "!*?") => pointer(Mut, base_pointee()),
        (_, "const!*?") => pointer(Const, base_pointee()),
        (_, "!**?") => pointer_to_pointer(Mut, Mut, base_pointee()),
        (_, "const!**?") => pointer_to_pointer(Mut, Const, base_pointee()),
        (_, "!*const*?") => pointer_to_pointer(Const, Mut, base_pointee()),
        (_, "const!*const*?") => pointer_to_pointer(Const, Const, base_pointee()),
        (_, shape) => match array_mutability(shape) {
            Some(mutability) => pointer(mutability, base_pointee()),
            None => {
                let fallback = TargetType::Unverified(base_pointee());
                log::warn!("no rule for parameter shape {shape:?} of {base}, using {fallback}");
                fallback
            }
        },
    }
}

pub fn map_return(return_type: &str) -> TargetType {
    match return_type {
        "void" | "" => TargetType::Void,
        "void *" => pointer(Mutability::Mut, Pointee::Bytes),
        "const GLubyte *" => pointer(Mutability::Const, Pointee::Base("GLubyte".to_string())),
        other => TargetType::Value(other.to_string()),
    }
}

pub struct Signature<'a> {
    pub params: Vec<(&'a Param, TargetType)>,
    pub ret: TargetType,
}

pub fn signature(command: &Command) -> Signature<'_> {
    Signature {
        params: command
            .params
            .iter()
            .map(|param| (param, map_param(&param.base_type, &param.shape)))
            .collect(),
        ret: map_return(&command.return_type),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::parse::parse_registry;

    fn rendered(base: &str, shape: &str) -> String {
        map_param(base, shape).to_string()
    }

    #[test]
    fn test_void_shapes() {
        assert_eq!(map_param("void", "?"), TargetType::Void);
        assert_eq!(rendered("void", "void*?"), "*mut std::ffi::c_void");
        assert_eq!(rendered("void", "constvoid*?"), "*const std::ffi::c_void");
        assert_eq!(rendered("void", "void**?"), "*mut *mut std::ffi::c_void");
        assert_eq!(rendered("void", "constvoid**?"), "*mut *const std::ffi::c_void");
        assert_eq!(
            rendered("void", "constvoid*const*?"),
            "*const *const std::ffi::c_void"
        );
    }

    #[test]
    fn test_opaque_struct_tags() {
        assert_eq!(map_param("_cl_context", "struct!*?"), TargetType::OpaqueHandle);
        assert_eq!(map_param("_cl_event", "struct!*?"), TargetType::OpaqueHandle);
    }

    #[test]
    fn test_base_shapes() {
        assert_eq!(rendered("GLenum", "!?"), "GLenum");
        assert_eq!(rendered("GLuint", "!*?"), "*mut GLuint");
        assert_eq!(rendered("GLuint", "const!*?"), "*const GLuint");
        assert_eq!(rendered("GLchar", "const!*const*?"), "*const *const GLchar");
        assert_eq!(rendered("GLchar", "const!**?"), "*mut *const GLchar");
        assert_eq!(rendered("GLchar", "!**?"), "*mut *mut GLchar");
        assert_eq!(rendered("GLuint", "!?[2]"), "*mut GLuint");
        assert_eq!(rendered("GLfloat", "const!?[16]"), "*const GLfloat");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            map_param("GLfloat", "volatile!*?"),
            TargetType::Unverified(Pointee::Base("GLfloat".to_string()))
        );
        assert_eq!(rendered("GLfloat", "volatile!*?"), "*mut GLfloat");
        // still has to be a rust type
        assert_eq!(map_param("void", "volatilevoid*?"), TargetType::Unverified(Pointee::Bytes));
        assert_eq!(rendered("void", "volatilevoid*?"), "*mut std::ffi::c_void");
        assert_eq!(rendered("void", "void***?"), "*mut std::ffi::c_void");
    }

    struct CapturingLogger;

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    impl log::Log for CapturingLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                CAPTURED.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_fallback_is_logged() {
        // only this test installs a logger.
        _ = log::set_logger(&CapturingLogger);
        log::set_max_level(log::LevelFilter::Warn);

        map_param("void", "volatilevoid**?");
        map_param("GLuint", "!*?");

        let captured = CAPTURED.lock().unwrap();
        let warnings: Vec<&String> = captured
            .iter()
            .filter(|msg| msg.contains("volatilevoid**?"))
            .collect();
        assert_eq!(
            warnings,
            ["no rule for parameter shape \"volatilevoid**?\" of void, using *mut std::ffi::c_void"]
        );
        assert!(!captured.iter().any(|msg| msg.contains("\"!*?\"")));
    }

    #[test]
    fn test_return_types() {
        assert!(map_return("void").is_void());
        assert_eq!(map_return("void *").to_string(), "*mut std::ffi::c_void");
        assert_eq!(map_return("const GLubyte *").to_string(), "*const GLubyte");
        assert_eq!(map_return("GLenum"), TargetType::Value("GLenum".to_string()));
        assert_eq!(map_return("GLsync").to_string(), "GLsync");
    }

    #[test]
    fn test_minimal_document() {
        let registry = crate::normalize::normalize(
            parse_registry(
                r#"
<registry>
    <groups><group name="G"><enum name="GL_A"/></group></groups>
    <enums namespace="GL"><enum value="0x1" name="GL_A"/></enums>
    <enums namespace="GL" type="bitmask"><enum value="1" name="GL_A_BIT"/></enums>
    <commands namespace="GL">
        <command>
            <proto>void <name>glA</name></proto>
            <param len="1"><ptype>GLint</ptype> *<name>data</name></param>
        </command>
    </commands>
</registry>
"#
                .as_bytes(),
            )
            .unwrap(),
        );

        assert_eq!(registry.enums[0].value, "0x0001");
        assert_eq!(registry.bitfields[0].value, "0x00000001");
        let signature = signature(&registry.commands[0]);
        assert!(signature.ret.is_void());
        assert_eq!(
            signature.params[0].1,
            TargetType::Pointer(Mutability::Mut, Pointee::Base("GLint".to_string()))
        );
    }
}
