//! POM file parsing: declared dependencies, parent reference, property interpolation.

use std::collections::{BTreeMap, HashSet};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::manifest::ParseError;

/// Longest string property interpolation may produce.
pub const MAX_INTERPOLATED_LEN: usize = 64 * 1024;

/// Most property substitutions a single interpolation may perform.
pub const MAX_SUBSTITUTIONS: usize = 1024;

/// The subset of a POM (Project Object Model) needed to list dependencies.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A `<dependency>` element, wherever it appears in the document.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

/// Bookkeeping for one [`Pom::interpolate`] call.
#[derive(Default)]
struct Expansion {
    /// Properties currently being expanded.
    resolving: HashSet<String>,
    substitutions: usize,
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// Resolve `${property}` references in a string using POM properties
    /// and built-in project variables.
    ///
    /// Property values are expanded recursively. Unknown and cyclic
    /// references are left as-is. If the expansion grows past
    /// [`MAX_INTERPOLATED_LEN`] or [`MAX_SUBSTITUTIONS`], the input is
    /// returned unchanged.
    pub fn interpolate(&self, input: &str) -> String {
        let mut expansion = Expansion::default();
        self.expand(input, &mut expansion)
            .unwrap_or_else(|| input.to_string())
    }

    fn expand(&self, input: &str, expansion: &mut Expansion) -> Option<String> {
        let mut out = String::new();
        let mut rest = input;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let key = &after[..end];

            match self.resolve_property(key) {
                Some(raw) if !expansion.resolving.contains(key) => {
                    expansion.substitutions += 1;
                    if expansion.substitutions > MAX_SUBSTITUTIONS {
                        return None;
                    }
                    expansion.resolving.insert(key.to_string());
                    let value = self.expand(&raw, expansion);
                    expansion.resolving.remove(key);
                    out.push_str(&value?);
                }
                _ => out.push_str(&rest[start..start + 2 + end + 1]),
            }
            if out.len() > MAX_INTERPOLATED_LEN {
                return None;
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        (out.len() <= MAX_INTERPOLATED_LEN).then_some(out)
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.effective_group_id().map(|s| s.to_string()),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.effective_version().map(|s| s.to_string()),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate all property references in the declared dependencies.
    pub fn resolve_properties(&mut self) {
        let pom_snapshot = self.clone();
        for dep in &mut self.dependencies {
            dep.group_id = pom_snapshot.interpolate(&dep.group_id);
            dep.artifact_id = pom_snapshot.interpolate(&dep.artifact_id);
            if let Some(ref v) = dep.version {
                dep.version = Some(pom_snapshot.interpolate(v));
            }
        }
    }
}

/// Parse a POM XML string into a `Pom` struct.
///
/// Every `<dependency>` element is collected in document order, including
/// those under `<dependencyManagement>` and build plugins. Element names are
/// matched on their local part, so both plain and namespace-prefixed
/// documents are accepted.
pub fn parse_pom(xml: &str) -> Result<Pom, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<PomDependency> = None;
    let mut current_parent: Option<ParentRef> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                if path.last().map(|s| s.as_str()) == Some("dependency") {
                    current_dep = Some(PomDependency::default());
                } else if path_context(&path) == "project>parent" {
                    current_parent = Some(ParentRef::default());
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();

                // Properties: <project><properties><key>value</key></properties>
                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    let prop_name = path.last().cloned().unwrap_or_default();
                    pom.properties.insert(prop_name, text_buf.clone());
                }

                // Direct children of any <dependency>, then the element itself.
                let parent_tag = depth
                    .checked_sub(2)
                    .and_then(|i| path.get(i))
                    .map(|s| s.as_str());
                if let Some(ref mut dep) = current_dep {
                    if parent_tag == Some("dependency") {
                        match path.last().map(|s| s.as_str()) {
                            Some("groupId") => dep.group_id = text_buf.clone(),
                            Some("artifactId") => dep.artifact_id = text_buf.clone(),
                            Some("version") => dep.version = Some(text_buf.clone()),
                            _ => {}
                        }
                    }
                }
                if path.last().map(|s| s.as_str()) == Some("dependency") {
                    if let Some(dep) = current_dep.take() {
                        pom.dependencies.push(dep);
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match ctx.as_str() {
                        "project>parent>groupId" => parent.group_id = text_buf.clone(),
                        "project>parent>artifactId" => parent.artifact_id = text_buf.clone(),
                        "project>parent>version" => parent.version = text_buf.clone(),
                        "project>parent" => pom.parent = current_parent.take(),
                        _ => {}
                    }
                }

                if depth == 2 {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") => pom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => pom.artifact_id = Some(text_buf.clone()),
                        Some("version") => pom.version = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Xml {
                    message: format!("at byte {}: {e}", reader.buffer_position()),
                });
            }
            _ => {}
        }
    }

    Ok(pom)
}

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}
