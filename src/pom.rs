//! POM lookup and `<scm>` discovery.
//!
//! Fetches `{artifact}-{version}.pom` from a Maven-layout repository and walks
//! the `<parent>` chain until a POM declares source-control metadata.
//!
//! # Key Features
//! - Namespace-agnostic parsing of `project/scm` and `project/parent`
//! - `developerConnection` used when `connection` is absent
//! - Property substitution (`${project.version}`, `<properties>` entries) in
//!   the SCM fields
//! - Bounded, iterative parent walk
//!
//! # Implementation Notes
//! - Uses quick-xml for XML parsing
//! - Only direct children of the root `<project>` are read, so `<scm>` or
//!   `<parent>` nested in plugin configuration is ignored
//! - A fetch failure ends the walk with `None`; it is never an error

use lazy_static::lazy_static;
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use std::collections::HashMap;

use crate::config::ResolverConfig;
use crate::http::{HttpRequest, Probe, Transport, probe};

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$\{([^${}]+)\}").unwrap();
}

const MAX_SUBSTITUTION_PASSES: usize = 10;

/// Source-control block of one POM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PomScm {
    pub url: Option<String>,
    pub connection: Option<String>,
    pub tag: Option<String>,
}

impl PomScm {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.url) && is_blank(&self.connection) && is_blank(&self.tag)
    }

    /// `url` then `connection`, skipping blanks.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        [self.url.as_deref(), self.connection.as_deref()]
            .into_iter()
            .flatten()
            .filter(|value| !value.trim().is_empty())
    }

    pub fn has_location(&self) -> bool {
        self.locations().next().is_some()
    }
}

impl std::fmt::Display for PomScm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PomScm{{url={}, connection={}, tag={}}}",
            self.url.as_deref().unwrap_or("-"),
            self.connection.as_deref().unwrap_or("-"),
            self.tag.as_deref().unwrap_or("-")
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PomCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl PomCoordinates {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        }
    }

    fn has_blank(&self) -> bool {
        self.group_id.trim().is_empty()
            || self.artifact_id.trim().is_empty()
            || self.version.trim().is_empty()
    }
}

impl std::fmt::Display for PomCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// The parts of a POM the resolver cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PomDocument {
    pub scm: PomScm,
    pub parent: Option<PomCoordinates>,
}

/// `{repo_base}/{group/path}/{artifact}/{version}/{artifact}-{version}.pom`
pub fn pom_url(repo_base: &str, group_id: &str, artifact_id: &str, version: &str) -> String {
    let group_path = group_id.replace('.', "/");
    format!(
        "{}/{}/{}/{}/{}-{}.pom",
        repo_base.trim_end_matches('/'),
        group_path,
        artifact_id,
        version,
        artifact_id,
        version
    )
}

pub struct PomResolver<'a> {
    transport: &'a dyn Transport,
    config: &'a ResolverConfig,
}

impl<'a> PomResolver<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ResolverConfig) -> Self {
        Self { transport, config }
    }

    /// Walks from the given coordinates up the parent chain and returns the
    /// first non-empty `<scm>` block.
    pub fn resolve_scm(&self, group_id: &str, artifact_id: &str, version: &str) -> Option<PomScm> {
        let mut current = PomCoordinates::new(group_id, artifact_id, version);

        for depth in 0..self.config.max_parent_depth {
            if current.has_blank() {
                debug!("Stopping POM walk at depth {}: blank coordinate", depth);
                return None;
            }

            let document = self.fetch(&current)?;
            if !document.scm.is_empty() {
                debug!("Found {} in {}", document.scm, current);
                return Some(document.scm);
            }

            let parent = document.parent?;
            debug!("No <scm> in {}, following parent {}", current, parent);
            current = parent;
        }

        debug!(
            "POM walk for {}:{}:{} hit the depth limit of {}",
            group_id, artifact_id, version, self.config.max_parent_depth
        );
        None
    }

    fn fetch(&self, coordinates: &PomCoordinates) -> Option<PomDocument> {
        let url = pom_url(
            &self.config.maven_repo_base,
            &coordinates.group_id,
            &coordinates.artifact_id,
            &coordinates.version,
        );
        let request = HttpRequest::get(url.as_str(), self.config.pom_timeout);

        match probe(self.transport, &request) {
            Probe::Exists(response) => parse_pom(&response.body),
            Probe::Absent | Probe::TransientError => {
                debug!("POM not available at {}", url);
                None
            }
        }
    }
}

/// Extracts `<scm>` and `<parent>` from POM text.
///
/// Returns `None` when the document is not well-formed XML.
pub fn parse_pom(xml: &str) -> Option<PomDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut properties: HashMap<String, String> = HashMap::new();
    let mut has_parent = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                path.push(name);
                text.clear();
                if is_path(&path, &["project", "parent"]) {
                    has_parent = true;
                }
            }
            Ok(Event::Text(e)) => {
                text.push_str(&e.decode().unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::GeneralRef(e)) => {
                let name = e.decode().unwrap_or_default().to_string();
                match name.as_str() {
                    "amp" => text.push('&'),
                    "lt" => text.push('<'),
                    "gt" => text.push('>'),
                    "quot" => text.push('"'),
                    "apos" => text.push('\''),
                    _ => {
                        if let Ok(Some(ch)) = e.resolve_char_ref() {
                            text.push(ch);
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                let value = text.trim().to_string();
                if !value.is_empty() {
                    match path.as_slice() {
                        [root, section, field] if root == "project" => {
                            if section == "properties" {
                                properties.insert(field.clone(), value);
                            } else if section == "scm" || section == "parent" {
                                fields.insert(format!("{}.{}", section, field), value);
                            }
                        }
                        [root, field] if root == "project" => {
                            fields.insert(format!("project.{}", field), value);
                        }
                        _ => {}
                    }
                }
                text.clear();
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("Error parsing POM: {}", e);
                return None;
            }
            _ => {}
        }
        buf.clear();
    }

    let parent = has_parent.then(|| PomCoordinates {
        group_id: fields.get("parent.groupId").cloned().unwrap_or_default(),
        artifact_id: fields.get("parent.artifactId").cloned().unwrap_or_default(),
        version: fields.get("parent.version").cloned().unwrap_or_default(),
    });

    let builtins = build_builtin_properties(&fields);
    let resolve = |key: &str| {
        fields
            .get(key)
            .and_then(|value| substitute_properties(value, &properties, &builtins))
    };

    let scm = PomScm {
        url: resolve("scm.url"),
        connection: resolve("scm.connection").or_else(|| resolve("scm.developerConnection")),
        tag: resolve("scm.tag"),
    };

    Some(PomDocument { scm, parent })
}

fn is_path(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn build_builtin_properties(fields: &HashMap<String, String>) -> HashMap<String, String> {
    let mut builtins = HashMap::new();
    let effective = |own: &str, inherited: &str| {
        fields
            .get(own)
            .or_else(|| fields.get(inherited))
            .cloned()
    };

    if let Some(group_id) = effective("project.groupId", "parent.groupId") {
        builtins.insert("project.groupId".to_string(), group_id.clone());
        builtins.insert("pom.groupId".to_string(), group_id);
    }

    if let Some(artifact_id) = fields.get("project.artifactId").cloned() {
        builtins.insert("project.artifactId".to_string(), artifact_id.clone());
        builtins.insert("pom.artifactId".to_string(), artifact_id);
    }

    if let Some(version) = effective("project.version", "parent.version") {
        builtins.insert("project.version".to_string(), version.clone());
        builtins.insert("pom.version".to_string(), version);
    }

    if let Some(group_id) = fields.get("parent.groupId").cloned() {
        builtins.insert("project.parent.groupId".to_string(), group_id);
    }

    if let Some(version) = fields.get("parent.version").cloned() {
        builtins.insert("project.parent.version".to_string(), version);
    }

    builtins
}

/// Replaces `${key}` placeholders, innermost first.
///
/// Returns `None` when a placeholder is left unresolved, which also covers
/// reference cycles once the pass limit is reached.
fn substitute_properties(
    value: &str,
    properties: &HashMap<String, String>,
    builtins: &HashMap<String, String>,
) -> Option<String> {
    let mut current = value.to_string();

    for _ in 0..MAX_SUBSTITUTION_PASSES {
        if !current.contains("${") {
            return Some(current);
        }

        let mut unresolved = false;
        let next = PLACEHOLDER_RE
            .replace_all(&current, |captures: &regex::Captures| {
                let key = &captures[1];
                match properties.get(key).or_else(|| builtins.get(key)) {
                    Some(resolved) => resolved.clone(),
                    None => {
                        unresolved = true;
                        captures[0].to_string()
                    }
                }
            })
            .to_string();

        if unresolved {
            debug!("Unresolved Maven property in {}", value);
            return None;
        }
        current = next;
    }

    warn!("Maven property substitution limit hit resolving {}", value);
    None
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
