#![allow(clippy::write_with_newline)] // this lint is dumb

//! Generated artifacts are meant to be `include!`d into four sibling modules of the consuming
//! crate, `types`, `constants`, `commands` and `loaders`, whose parent provides
//!
//! ```ignore
//! fn resolve_symbol(name: &CStr, candidates: &[&CStr]) -> Option<NonNull<c_void>>;
//! ```

use std::io;

use crate::typemap::Signature;

mod commands;
mod constants;
mod loaders;
mod types;

pub use commands::emit_commands;
pub use constants::emit_constants;
pub use loaders::emit_loaders;
pub use types::emit_types;

const GENERATED_NOTICE: &str = "// generated by gl-loader-generator from gl.xml, do not edit.\n";

/// `name: Type, name: Type`
fn emit_params<W: io::Write>(w: &mut W, signature: &Signature) -> io::Result<()> {
    for (i, (param, ty)) in signature.params.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}: {ty}", param.name)?;
    }
    Ok(())
}

/// `name, name`
fn emit_args<W: io::Write>(w: &mut W, signature: &Signature) -> io::Result<()> {
    for (i, (param, _)) in signature.params.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}", param.name)?;
    }
    Ok(())
}

/// ` -> Type`, or nothing for void.
fn emit_return<W: io::Write>(w: &mut W, signature: &Signature) -> io::Result<()> {
    if !signature.ret.is_void() {
        write!(w, " -> {}", signature.ret)?;
    }
    Ok(())
}
