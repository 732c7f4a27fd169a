use std::collections::HashSet;
use std::io::BufRead;

use anyhow::{Context as _, bail};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::normalize::parse_literal;
use crate::registry::{
    ApiFamily, Change, Command, EnumEntry, EnumKind, ExtensionTag, Param, Registry, Version,
    VersionTag,
};

// upstream forgot type="bitmask" on this block.
const FORCED_BITMASK_NAMESPACE: &str = "OcclusionQueryEventMaskAMD";

/// Position in the document, one variant per recognized element path (relative to the root
/// element). Anything else is `Ignored`, and so are its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    Root,
    Groups,
    Group,
    GroupMember,
    EnumBlock,
    EnumEntry,
    Extensions,
    Extension,
    ExtensionRequire,
    ExtensionCommand,
    Feature,
    FeatureList(Change),
    FeatureCommand(Change),
    Commands,
    Command,
    Proto,
    ProtoType,
    ProtoName,
    Param,
    ParamType,
    ParamName,
    Ignored,
}

impl Scope {
    fn enter(self, name: &[u8]) -> Scope {
        match (self, name) {
            (Scope::Document, _) => Scope::Root,
            (Scope::Root, b"groups") => Scope::Groups,
            (Scope::Groups, b"group") => Scope::Group,
            (Scope::Group, b"enum") => Scope::GroupMember,
            (Scope::Root, b"enums") => Scope::EnumBlock,
            (Scope::EnumBlock, b"enum") => Scope::EnumEntry,
            (Scope::Root, b"extensions") => Scope::Extensions,
            (Scope::Extensions, b"extension") => Scope::Extension,
            (Scope::Extension, b"require") => Scope::ExtensionRequire,
            (Scope::ExtensionRequire, b"command") => Scope::ExtensionCommand,
            (Scope::Root, b"feature") => Scope::Feature,
            (Scope::Feature, b"require") => Scope::FeatureList(Change::Added),
            (Scope::Feature, b"remove") => Scope::FeatureList(Change::Removed),
            (Scope::FeatureList(change), b"command") => Scope::FeatureCommand(change),
            (Scope::Root, b"commands") => Scope::Commands,
            (Scope::Commands, b"command") => Scope::Command,
            (Scope::Command, b"proto") => Scope::Proto,
            (Scope::Proto, b"ptype") => Scope::ProtoType,
            (Scope::Proto, b"name") => Scope::ProtoName,
            (Scope::Command, b"param") => Scope::Param,
            (Scope::Param, b"ptype") => Scope::ParamType,
            (Scope::Param, b"name") => Scope::ParamName,
            _ => Scope::Ignored,
        }
    }
}

#[derive(Debug, Default)]
struct PendingCommand {
    name: String,
    return_type: String,
    params: Vec<Param>,
}

#[derive(Debug, Default)]
struct Parser {
    registry: Registry,
    enum_names: HashSet<String>,
    command_names: HashSet<String>,
    declared_groups: HashSet<String>,

    group: Option<String>,
    enum_kind: Option<EnumKind>,
    extension: Option<ExtensionTag>,
    feature: Option<(ApiFamily, Version)>,
    command: Option<PendingCommand>,
    param: Option<Param>,
}

fn attr(start: &BytesStart, key: &str) -> anyhow::Result<Option<String>> {
    let Some(attr) = start.try_get_attribute(key)? else {
        return Ok(None);
    };
    Ok(Some(attr.unescape_value()?.into_owned()))
}

fn required_attr(start: &BytesStart, key: &str) -> anyhow::Result<String> {
    attr(start, key)?.with_context(|| format!("{key} is missing"))
}

fn classify_enum_block(start: &BytesStart) -> anyhow::Result<EnumKind> {
    if attr(start, "namespace")?.as_deref() == Some(FORCED_BITMASK_NAMESPACE) {
        return Ok(EnumKind::Bitmask);
    }
    match attr(start, "type")?.as_deref() {
        None => Ok(EnumKind::Plain),
        Some("bitmask") => Ok(EnumKind::Bitmask),
        Some(other) => bail!("unknown enum block type: {other:?}"),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Parser {
    fn command_mut(&mut self) -> anyhow::Result<&mut PendingCommand> {
        self.command.as_mut().context("not inside a command")
    }

    fn param_mut(&mut self) -> anyhow::Result<&mut Param> {
        self.param.as_mut().context("not inside a param")
    }

    fn open(&mut self, scope: Scope, start: &BytesStart) -> anyhow::Result<()> {
        match scope {
            Scope::Group => {
                let name = required_attr(start, "name")?;
                if !self.declared_groups.insert(name.clone()) {
                    bail!("duplicate group: {name}");
                }
                self.registry.groups.entry(name.clone()).or_default();
                self.group = Some(name);
            }
            Scope::GroupMember => {
                let member = required_attr(start, "name")?;
                let group = self.group.as_ref().context("group member outside of group")?;
                self.registry
                    .groups
                    .entry(group.clone())
                    .or_default()
                    .insert(member);
            }
            Scope::EnumBlock => {
                self.enum_kind = Some(classify_enum_block(start)?);
            }
            Scope::EnumEntry => self.open_enum_entry(start)?,
            Scope::Extension => {
                let name = required_attr(start, "name")?;
                self.extension = Some(ExtensionTag::from_extension_name(&name));
            }
            Scope::ExtensionCommand => {
                let name = required_attr(start, "name")?;
                let tag = self
                    .extension
                    .clone()
                    .context("command outside of extension")?;
                self.registry
                    .command_extensions
                    .entry(name)
                    .or_default()
                    .push(tag);
            }
            Scope::Feature => {
                let family: ApiFamily = required_attr(start, "api")?.parse()?;
                let version: Version = required_attr(start, "number")?
                    .parse()
                    .context("could not parse feature number")?;
                self.feature = Some((family, version));
            }
            Scope::FeatureCommand(change) => {
                let name = required_attr(start, "name")?;
                let (family, version) = self.feature.context("command outside of feature")?;
                self.registry
                    .command_versions
                    .entry(name)
                    .or_default()
                    .push(VersionTag {
                        change,
                        family,
                        version,
                    });
            }
            Scope::Command => {
                self.command = Some(PendingCommand::default());
            }
            Scope::Param => {
                self.param = Some(Param {
                    group: attr(start, "group")?,
                    len: attr(start, "len")?,
                    ..Param::default()
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn open_enum_entry(&mut self, start: &BytesStart) -> anyhow::Result<()> {
        let kind = self.enum_kind.context("enum outside of enum block")?;
        let name = required_attr(start, "name")?;
        let value = required_attr(start, "value")?;
        if parse_literal(&value).is_none() {
            bail!("non-numeric value {value:?} for {name}");
        }

        let name = match attr(start, "api")? {
            Some(api) => format!("{name}{api}"),
            None => name,
        };
        if !self.enum_names.insert(name.clone()) {
            bail!("duplicate enum: {name}");
        }

        if let Some(groups) = attr(start, "group")? {
            for group in groups.split(',').filter(|group| !group.is_empty()) {
                self.registry
                    .groups
                    .entry(group.to_string())
                    .or_default()
                    .insert(name.clone());
            }
        }

        let entry = EnumEntry { name, value, kind };
        match kind {
            EnumKind::Plain => self.registry.enums.push(entry),
            EnumKind::Bitmask => self.registry.bitfields.push(entry),
        }
        Ok(())
    }

    fn text(&mut self, scope: Scope, text: &str) -> anyhow::Result<()> {
        match scope {
            Scope::Proto | Scope::ProtoType => self.command_mut()?.return_type.push_str(text),
            Scope::ProtoName => self.command_mut()?.name.push_str(text),
            Scope::Param => self
                .param_mut()?
                .shape
                .extend(text.chars().filter(|c| !c.is_whitespace())),
            Scope::ParamType => self.param_mut()?.base_type.push_str(text),
            Scope::ParamName => self.param_mut()?.name.push_str(text),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, scope: Scope) -> anyhow::Result<()> {
        match scope {
            Scope::Group => self.group = None,
            Scope::EnumBlock => self.enum_kind = None,
            Scope::Extension => self.extension = None,
            Scope::Feature => self.feature = None,
            Scope::ParamType => self.param_mut()?.shape.push('!'),
            Scope::ParamName => self.param_mut()?.shape.push('?'),
            Scope::Param => {
                let mut param = self.param.take().context("not inside a param")?;
                if param.name.is_empty() {
                    bail!("param name is missing");
                }
                if param.base_type.is_empty() {
                    param.base_type = "void".to_string();
                }
                self.command_mut()?.params.push(param);
            }
            Scope::Command => {
                let pending = self.command.take().context("not inside a command")?;
                if pending.name.is_empty() {
                    bail!("command name is missing");
                }
                if !self.command_names.insert(pending.name.clone()) {
                    bail!("duplicate command: {}", pending.name);
                }
                self.registry.commands.push(Command {
                    name: pending.name,
                    return_type: collapse_whitespace(&pending.return_type),
                    params: pending.params,
                });
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn parse_registry<R>(reader: R) -> anyhow::Result<Registry>
where
    R: BufRead,
{
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut parser = Parser::default();
    let mut scopes = vec![Scope::Document];

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("malformed document near byte {position}"))?;
        let top = scopes.last().copied().unwrap_or(Scope::Document);
        match event {
            Event::Eof => break,
            Event::Start(start) => {
                let scope = top.enter(start.local_name().as_ref());
                parser.open(scope, &start).with_context(|| {
                    format!(
                        "could not parse <{}> near byte {position}",
                        String::from_utf8_lossy(start.name().as_ref())
                    )
                })?;
                scopes.push(scope);
            }
            Event::Empty(start) => {
                let scope = top.enter(start.local_name().as_ref());
                parser
                    .open(scope, &start)
                    .and_then(|_| parser.close(scope))
                    .with_context(|| {
                        format!(
                            "could not parse <{}/> near byte {position}",
                            String::from_utf8_lossy(start.name().as_ref())
                        )
                    })?;
            }
            Event::End(end) => {
                if top == Scope::Document {
                    bail!("unexpected end tag near byte {position}");
                }
                scopes.pop();
                parser.close(top).with_context(|| {
                    format!(
                        "could not parse </{}> near byte {position}",
                        String::from_utf8_lossy(end.name().as_ref())
                    )
                })?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .with_context(|| format!("malformed text near byte {position}"))?;
                parser.text(top, &text)?;
            }
            Event::CData(cdata) => {
                parser.text(top, std::str::from_utf8(&cdata)?)?;
            }
            _ => {}
        }
        buf.clear();
    }

    if scopes.len() != 1 {
        bail!("unexpected end of document ({} elements left open)", scopes.len() - 1);
    }

    Ok(parser.registry)
}
