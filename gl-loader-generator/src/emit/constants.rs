use std::io;

use super::GENERATED_NOTICE;
use crate::normalize::parse_literal;
use crate::registry::Registry;

// negative values and values above i32::MAX go out as a u32 bit pattern, otherwise rustc would
// either negate a literal or reject an out of range one.
fn plain_enum_expr(name: &str, literal: &str) -> String {
    match parse_literal(literal) {
        Some(value) if value < 0 => format!("0x{:08X}_u32 as GLint", value as i32 as u32),
        Some(value) if value <= i32::MAX as i64 => literal.to_string(),
        Some(value) if value <= u32::MAX as i64 => format!("{literal}_u32 as GLint"),
        Some(_) => {
            log::warn!("{name} = {literal} does not fit in 32 bits, truncating");
            format!("{literal}_u64 as GLint")
        }
        None => literal.to_string(),
    }
}

fn bitfield_expr(name: &str, literal: &str) -> String {
    match parse_literal(literal) {
        Some(value) if !(0..=u32::MAX as i64).contains(&value) => {
            log::warn!("{name} = {literal} does not fit in 32 bits, truncating");
            format!("{literal}_u64 as GLbitfield")
        }
        _ => literal.to_string(),
    }
}

pub fn emit_constants<W: io::Write>(w: &mut W, registry: &Registry) -> anyhow::Result<()> {
    w.write_all(GENERATED_NOTICE.as_bytes())?;
    write!(w, "\nuse super::types::*;\n\n")?;

    for e in registry.enums.iter() {
        let expr = plain_enum_expr(&e.name, &e.value);
        write!(w, "pub const {}: GLint = {expr};\n", e.name)?;
    }
    write!(w, "\n")?;

    for e in registry.bitfields.iter() {
        let expr = bitfield_expr(&e.name, &e.value);
        write!(w, "pub const {}: GLbitfield = {expr};\n", e.name)?;
    }
    write!(w, "\n")?;

    write!(w, "#[allow(non_snake_case)]\n")?;
    write!(w, "pub mod groups {{\n")?;
    for (group, members) in registry.groups.iter() {
        write!(w, "    pub mod {group} {{\n")?;
        write!(w, "        pub use super::super::{{")?;
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                write!(w, ", ")?;
            }
            write!(w, "{member}")?;
        }
        write!(w, "}};\n")?;
        write!(w, "    }}\n")?;
    }
    write!(w, "}}\n")?;

    Ok(())
}
