use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context as _, bail};
use indexmap::{IndexMap, IndexSet};

// registry schema:
// https://github.com/KhronosGroup/OpenGL-Registry/blob/8e772a3b0c9e8a85ccb6f471b4cdbf94c8bcd71d/xml/readme.pdf

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Plain,
    Bitmask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    /// Unique across plain enums and bitmasks. Entries declared with an `api` qualifier carry it
    /// as a suffix (`GL_ACTIVE_PROGRAM_EXTgles2`).
    pub name: String,
    pub value: String,
    pub kind: EnumKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    pub name: String,
    /// `void` when the declaration has no `<ptype>`.
    pub base_type: String,
    /// Whitespace-free text surrounding the type and name with `!` where the type was and `?`
    /// where the name was, e.g. `const!*?` for `const <ptype>GLuint</ptype> *<name>ids</name>`.
    pub shape: String,
    pub group: Option<String>,
    pub len: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// Text of `<proto>` minus the name, whitespace collapsed (`const GLubyte *`).
    pub return_type: String,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let major: u32 = parts.next().context("missing major")?.parse()?;
        let minor: u32 = parts.next().context("missing minor")?.parse()?;
        if parts.next().is_some() {
            bail!("unexpected version part in {s:?}");
        }
        Ok(Version { major, minor })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFamily {
    Core,
    Es,
    Sc,
}

impl FromStr for ApiFamily {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gl" | "glcore" => Ok(Self::Core),
            s if s.starts_with("gles") => Ok(Self::Es),
            s if s.starts_with("glsc") => Ok(Self::Sc),
            other => bail!("unknown feature api: {other:?}"),
        }
    }
}

impl ApiFamily {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Core => "",
            Self::Es => "ES",
            Self::Sc => "SC",
        }
    }
}

/// `+1.0`, `-3.2`, `+ES2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTag {
    pub change: Change,
    pub family: ApiFamily,
    pub version: Version,
}

impl VersionTag {
    pub fn added(family: ApiFamily, major: u32, minor: u32) -> Self {
        Self {
            change: Change::Added,
            family,
            version: Version { major, minor },
        }
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.change {
            Change::Added => '+',
            Change::Removed => '-',
        };
        write!(f, "{sign}{}{}", self.family.prefix(), self.version)
    }
}

const EXTENSION_API_PREFIX: &str = "GL_";

/// Extension name with its `GL_` prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionTag(pub String);

impl ExtensionTag {
    pub fn from_extension_name(name: &str) -> Self {
        let short = name.strip_prefix(EXTENSION_API_PREFIX).unwrap_or(name);
        Self(short.to_string())
    }
}

impl fmt::Display for ExtensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registry {
    pub groups: IndexMap<String, IndexSet<String>>,
    pub enums: Vec<EnumEntry>,
    pub bitfields: Vec<EnumEntry>,
    pub commands: Vec<Command>,
    pub command_versions: HashMap<String, Vec<VersionTag>>,
    pub command_extensions: HashMap<String, Vec<ExtensionTag>>,
}

impl Registry {
    pub fn version_tags(&self, command: &str) -> &[VersionTag] {
        self.command_versions
            .get(command)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn extension_tags(&self, command: &str) -> &[ExtensionTag] {
        self.command_extensions
            .get(command)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Version tags first, then extension tags, each in document order.
    pub fn candidate_tags(&self, command: &str) -> Vec<String> {
        let versions = self.version_tags(command).iter().map(|tag| tag.to_string());
        let extensions = self
            .extension_tags(command)
            .iter()
            .map(|tag| tag.to_string());
        versions.chain(extensions).collect()
    }

    pub fn value_count(&self) -> usize {
        self.enums.len() + self.bitfields.len()
    }
}

#[test]
fn test_version() {
    let version = Version::from_str("4.6").unwrap();
    assert_eq!(version, Version { major: 4, minor: 6 });
    assert_eq!(version.to_string(), "4.6");
    assert!(Version::from_str("4").is_err());
    assert!(Version::from_str("4.6.1").is_err());
}

#[test]
fn test_version_tag_display() {
    assert_eq!(VersionTag::added(ApiFamily::Core, 1, 0).to_string(), "+1.0");
    assert_eq!(VersionTag::added(ApiFamily::Es, 2, 0).to_string(), "+ES2.0");
    let removed = VersionTag {
        change: Change::Removed,
        family: ApiFamily::Core,
        version: Version { major: 3, minor: 2 },
    };
    assert_eq!(removed.to_string(), "-3.2");
}

#[test]
fn test_api_family() {
    assert_eq!("gl".parse::<ApiFamily>().unwrap(), ApiFamily::Core);
    assert_eq!("gles1".parse::<ApiFamily>().unwrap(), ApiFamily::Es);
    assert_eq!("gles2".parse::<ApiFamily>().unwrap(), ApiFamily::Es);
    assert_eq!("glsc2".parse::<ApiFamily>().unwrap(), ApiFamily::Sc);
    assert!("vulkan".parse::<ApiFamily>().is_err());
}

#[test]
fn test_extension_tag() {
    assert_eq!(ExtensionTag::from_extension_name("GL_ARB_sync").0, "ARB_sync");
    assert_eq!(ExtensionTag::from_extension_name("GL_FOO").0, "FOO");
    assert_eq!(ExtensionTag::from_extension_name("FOO").0, "FOO");
    assert_eq!(ExtensionTag::from_extension_name("FOO_BAR").0, "FOO_BAR");
    assert_eq!(ExtensionTag::from_extension_name("GLX_ARB_foo").0, "GLX_ARB_foo");
}
