use std::collections::{BTreeSet, HashMap};
use std::io;

use super::{GENERATED_NOTICE, emit_args, emit_params, emit_return};
use crate::registry::Registry;
use crate::typemap::signature;

const BOILERPLATE: &str = r#"
use std::ffi::{CStr, c_void};

use super::commands::{self, cell};
use super::types::*;

#[cold]
#[inline(never)]
fn unresolved_symbol_panic(name: &CStr) -> ! {
    panic!("could not resolve {name:?}")
}

#[inline]
fn resolve(name: &CStr, candidates: &[&CStr]) -> *mut c_void {
    match super::resolve_symbol(name, candidates) {
        Some(ptr) => ptr.as_ptr(),
        None => unresolved_symbol_panic(name),
    }
}
"#;

/// Every distinct version/extension tag, sorted, so each string literal is emitted once.
fn tag_table(registry: &Registry) -> Vec<String> {
    let tags: BTreeSet<String> = registry
        .commands
        .iter()
        .flat_map(|cmd| registry.candidate_tags(&cmd.name))
        .collect();
    tags.into_iter().collect()
}

pub fn emit_loaders<W: io::Write>(w: &mut W, registry: &Registry) -> anyhow::Result<()> {
    let tags = tag_table(registry);
    let tag_indices: HashMap<&str, usize> = tags
        .iter()
        .enumerate()
        .map(|(i, tag)| (tag.as_str(), i))
        .collect();

    w.write_all(GENERATED_NOTICE.as_bytes())?;
    write!(w, "{}\n", BOILERPLATE.trim_end())?;

    write!(w, "\nstatic TAGS: [&CStr; {}] = [\n", tags.len())?;
    for tag in tags.iter() {
        write!(w, "    c\"{tag}\",\n")?;
    }
    write!(w, "];\n")?;

    for cmd in registry.commands.iter() {
        let name = cmd.name.as_str();
        let sig = signature(cmd);

        let candidates = registry.candidate_tags(name);
        if candidates.is_empty() {
            log::debug!("{name} is not part of any feature or extension");
        }

        write!(w, "\npub unsafe extern \"system\" fn {name}(")?;
        emit_params(w, &sig)?;
        write!(w, ")")?;
        emit_return(w, &sig)?;
        write!(w, " {{\n")?;

        // no locals in the body, and module items go through `self::`, so parameters can't
        // shadow anything the resolver needs.
        write!(w, "    self::cell::{name}.set(self::resolve(c\"{name}\", &[")?;
        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 {
                write!(w, ", ")?;
            }
            write!(w, "self::TAGS[{}]", tag_indices[candidate.as_str()])?;
        }
        write!(w, "]));\n")?;

        write!(
            w,
            "    unsafe {{ std::mem::transmute::<*mut c_void, commands::PFN_{name}>(self::cell::{name}.get())("
        )?;
        emit_args(w, &sig)?;
        write!(w, ") }}\n")?;
        write!(w, "}}\n")?;
    }

    Ok(())
}
