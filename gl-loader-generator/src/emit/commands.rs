use std::io::{self, Write as _};

use super::{GENERATED_NOTICE, emit_args, emit_params, emit_return};
use crate::registry::Registry;
use crate::typemap::signature;

const BOILERPLATE: &str = r#"
use std::ffi::c_void;
use std::sync::atomic::{AtomicPtr, Ordering};

use super::types::*;

/// Entry point of a command. Starts out pointing at the command's resolver, which stores the
/// real address on first call. Racing first calls resolve twice and store the same address.
pub struct FnCell(AtomicPtr<c_void>);

impl FnCell {
    pub const fn new(ptr: *mut c_void) -> Self {
        Self(AtomicPtr::new(ptr))
    }

    #[inline]
    pub fn get(&self) -> *mut c_void {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, ptr: *mut c_void) {
        self.0.store(ptr, Ordering::Release);
    }
}
"#;

pub fn emit_commands<W: io::Write>(w: &mut W, registry: &Registry) -> anyhow::Result<()> {
    // cells go into their own module after the call surfaces.
    let mut cells: Vec<u8> = Vec::new();

    w.write_all(GENERATED_NOTICE.as_bytes())?;
    write!(w, "{}\n", BOILERPLATE.trim_end())?;

    for cmd in registry.commands.iter() {
        let name = cmd.name.as_str();
        let sig = signature(cmd);

        // fn pointer type

        write!(w, "\npub type PFN_{name} = unsafe extern \"system\" fn(")?;
        emit_params(w, &sig)?;
        write!(w, ")")?;
        emit_return(w, &sig)?;
        write!(w, ";\n")?;

        // positional

        write!(w, "\n#[inline]\n")?;
        write!(w, "pub unsafe fn {name}(")?;
        emit_params(w, &sig)?;
        write!(w, ")")?;
        emit_return(w, &sig)?;
        write!(w, " {{\n")?;
        write!(
            w,
            "    unsafe {{ std::mem::transmute::<*mut c_void, PFN_{name}>(cell::{name}.get())("
        )?;
        emit_args(w, &sig)?;
        write!(w, ") }}\n")?;
        write!(w, "}}\n")?;

        // named

        write!(w, "\n/// Named arguments of [`{name}`].\n")?;
        write!(w, "pub struct {name}Args {{\n")?;
        for (param, ty) in sig.params.iter() {
            if let Some(group) = param.group.as_deref() {
                write!(w, "    /// Group: `{group}`.\n")?;
            }
            if let Some(len) = param.len.as_deref() {
                write!(w, "    /// Length: `{len}`.\n")?;
            }
            write!(w, "    pub {}: {ty},\n", param.name)?;
        }
        write!(w, "}}\n")?;

        write!(w, "\nimpl {name}Args {{\n")?;
        write!(w, "    #[inline]\n")?;
        write!(w, "    pub unsafe fn call(self)")?;
        emit_return(w, &sig)?;
        write!(w, " {{\n")?;
        write!(w, "        let Self {{ ")?;
        emit_args(w, &sig)?;
        write!(w, " }} = self;\n")?;
        write!(
            w,
            "        unsafe {{ std::mem::transmute::<*mut c_void, PFN_{name}>(cell::{name}.get())("
        )?;
        emit_args(w, &sig)?;
        write!(w, ") }}\n")?;
        write!(w, "    }}\n")?;
        write!(w, "}}\n")?;

        write!(
            cells,
            "    pub static {name}: FnCell = FnCell::new(super::super::loaders::{name} as *mut c_void);\n"
        )?;
    }

    write!(w, "\n#[allow(non_upper_case_globals)]\n")?;
    write!(w, "pub mod cell {{\n")?;
    write!(w, "    use std::ffi::c_void;\n\n")?;
    write!(w, "    use super::FnCell;\n\n")?;
    w.write_all(&cells)?;
    write!(w, "}}\n")?;

    Ok(())
}
