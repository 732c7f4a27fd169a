use anyhow::bail;

use crate::registry::Registry;

/// Lower bounds on entity counts. A registry that falls below them has most likely been cut
/// short by a schema change the parser doesn't follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub groups: usize,
    pub enums: usize,
    pub bitfields: usize,
    pub values: usize,
    pub commands: usize,
}

impl Default for Thresholds {
    // upstream gl.xml is well above all of these.
    fn default() -> Self {
        Self {
            groups: 100,
            enums: 2000,
            bitfields: 100,
            values: 2500,
            commands: 2000,
        }
    }
}

impl Thresholds {
    pub const NONE: Self = Self {
        groups: 0,
        enums: 0,
        bitfields: 0,
        values: 0,
        commands: 0,
    };
}

pub fn check_registry(registry: &Registry, thresholds: &Thresholds) -> anyhow::Result<()> {
    let counts = [
        ("groups", registry.groups.len(), thresholds.groups),
        ("enums", registry.enums.len(), thresholds.enums),
        ("bitfields", registry.bitfields.len(), thresholds.bitfields),
        ("values", registry.value_count(), thresholds.values),
        ("commands", registry.commands.len(), thresholds.commands),
    ];

    let failures: Vec<String> = counts
        .iter()
        .filter(|(_, count, min)| count < min)
        .map(|(what, count, min)| format!("{count} {what} (want at least {min})"))
        .collect();
    if !failures.is_empty() {
        bail!("registry looks truncated: {}", failures.join(", "));
    }

    for (what, count, _) in counts.iter() {
        log::debug!("{count} {what}");
    }
    Ok(())
}
