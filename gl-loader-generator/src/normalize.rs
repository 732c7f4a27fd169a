use std::collections::HashSet;

use crate::registry::{ApiFamily, EnumEntry, Registry, VersionTag};

// https://doc.rust-lang.org/reference/keywords.html
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield", "_",
];

/// Parses a registry value (`0x8B8D`, `255`, `-1`). Hex patterns wider than `i64::MAX` keep their
/// bits, so `0xFFFFFFFFFFFFFFFF` is `-1`.
pub(crate) fn parse_literal(literal: &str) -> Option<i64> {
    let literal = literal.trim();
    if let Some(digits) = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        return u64::from_str_radix(digits, 16).ok().map(|value| value as i64);
    }
    literal
        .parse::<i64>()
        .ok()
        .or_else(|| literal.parse::<u64>().ok().map(|value| value as i64))
}

/// Rust spelling of a parameter name, or `None` if it can be used as is.
pub(crate) fn escape_identifier(name: &str) -> Option<String> {
    match name {
        "self" | "Self" | "super" | "crate" | "_" => Some(format!("{name}_")),
        name if RUST_KEYWORDS.contains(&name) => Some(format!("r#{name}")),
        _ => None,
    }
}

pub(crate) fn canonical_enum_literal(value: i64) -> String {
    if value == -1 || value == u32::MAX as i64 {
        return "-1".to_string();
    }
    if value < 0 {
        return value.to_string();
    }
    let digits = format!("{value:X}");
    let width = match digits.len() {
        1..=3 => 4,
        5..=7 => 8,
        len => len,
    };
    format!("0x{digits:0>width$}")
}

pub(crate) fn canonical_bitfield_literal(value: i64) -> String {
    let bits = if value < 0 && value >= i32::MIN as i64 {
        value as i32 as u32 as u64
    } else {
        value as u64
    };
    format!("0x{bits:08X}")
}

fn repair_groups(registry: &mut Registry) {
    let known: HashSet<&str> = registry
        .enums
        .iter()
        .chain(registry.bitfields.iter())
        .map(|e| e.name.as_str())
        .collect();

    let mut dropped_members = 0;
    for members in registry.groups.values_mut() {
        let before = members.len();
        members.retain(|member| known.contains(member.as_str()));
        dropped_members += before - members.len();
    }
    let before = registry.groups.len();
    registry.groups.retain(|_, members| !members.is_empty());

    let dropped_groups = before - registry.groups.len();
    if dropped_members > 0 || dropped_groups > 0 {
        log::warn!(
            "dropped {dropped_members} unknown group members and {dropped_groups} empty groups"
        );
    }
}

fn rename_reserved_params(registry: &mut Registry) {
    for command in registry.commands.iter_mut() {
        for param in command.params.iter_mut() {
            if let Some(escaped) = escape_identifier(&param.name) {
                param.name = escaped;
            }
        }
    }
}

// the parser only admits numeric values.
fn canonicalize_literals(entries: &mut [EnumEntry], canonical: fn(i64) -> String) {
    for entry in entries.iter_mut() {
        if let Some(value) = parse_literal(&entry.value) {
            entry.value = canonical(value);
        }
    }
}

fn drop_redundant_es_tags(registry: &mut Registry) {
    let es1 = VersionTag::added(ApiFamily::Es, 1, 0);
    let es2 = VersionTag::added(ApiFamily::Es, 2, 0);
    for tags in registry.command_versions.values_mut() {
        if tags.contains(&es1) {
            tags.retain(|tag| *tag != es2);
        }
    }
}

fn sort_by_value(entries: &mut [EnumEntry]) {
    // stable, so equal values keep discovery order
    entries.sort_by_key(|e| parse_literal(&e.value).unwrap_or(i64::MAX));
}

/// Cleans up a freshly parsed registry. Running it on its own output changes nothing.
pub fn normalize(mut registry: Registry) -> Registry {
    repair_groups(&mut registry);
    rename_reserved_params(&mut registry);
    canonicalize_literals(&mut registry.enums, canonical_enum_literal);
    canonicalize_literals(&mut registry.bitfields, canonical_bitfield_literal);
    drop_redundant_es_tags(&mut registry);

    registry.commands.sort_by(|a, b| a.name.cmp(&b.name));
    sort_by_value(&mut registry.enums);
    sort_by_value(&mut registry.bitfields);

    registry
}
