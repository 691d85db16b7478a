//! maven-metadata.xml parsing for resolving the `latest`/`release` version keywords.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::manifest::ParseError;

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default)]
pub struct MavenMetadata {
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
}

impl MavenMetadata {
    /// The version a `latest` or `release` request resolves to:
    /// `<release>`, then `<latest>`, then the last listed `<version>`.
    /// Empty elements are skipped.
    pub fn newest(&self) -> Option<&str> {
        let non_empty = |v: &&str| !v.is_empty();
        self.release
            .as_deref()
            .filter(non_empty)
            .or(self.latest.as_deref().filter(non_empty))
            .or(self
                .versions
                .iter()
                .rev()
                .map(|s| s.as_str())
                .find(non_empty))
    }
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(xml: &str) -> Result<MavenMetadata, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = MavenMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                match path.join(">").as_str() {
                    "metadata>versioning>latest" => meta.latest = Some(text_buf.clone()),
                    "metadata>versioning>release" => meta.release = Some(text_buf.clone()),
                    "metadata>versioning>versions>version" => {
                        meta.versions.push(text_buf.clone());
                    }
                    _ => {}
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Xml {
                    message: format!("in maven-metadata.xml: {e}"),
                });
            }
            _ => {}
        }
    }

    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_artifact_metadata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>com.google.guava</groupId>
  <artifactId>guava</artifactId>
  <versioning>
    <latest>33.0.0-jre</latest>
    <release>32.1.3-jre</release>
    <versions>
      <version>31.0-jre</version>
      <version>32.1.3-jre</version>
      <version>33.0.0-jre</version>
    </versions>
    <lastUpdated>20240101120000</lastUpdated>
  </versioning>
</metadata>"#;
        let meta = parse_metadata(xml).unwrap();
        assert_eq!(meta.versions.len(), 3);
        assert_eq!(meta.newest(), Some("32.1.3-jre"));
    }

    #[test]
    fn newest_falls_back_to_latest_then_versions() {
        let mut meta = MavenMetadata {
            latest: Some("2.0".into()),
            versions: vec!["1.0".into(), "1.5".into()],
            ..Default::default()
        };
        assert_eq!(meta.newest(), Some("2.0"));
        meta.latest = None;
        assert_eq!(meta.newest(), Some("1.5"));
        meta.versions.clear();
        assert_eq!(meta.newest(), None);
    }

    #[test]
    fn empty_release_falls_through() {
        let xml = r#"<metadata><versioning>
            <latest>2.1</latest>
            <release></release>
            <versions><version>2.0</version><version>2.1</version></versions>
        </versioning></metadata>"#;
        let meta = parse_metadata(xml).unwrap();
        assert_eq!(meta.newest(), Some("2.1"));

        let meta = MavenMetadata {
            release: Some(String::new()),
            latest: Some(String::new()),
            versions: vec!["1.0".into(), String::new()],
        };
        assert_eq!(meta.newest(), Some("1.0"));
    }
}
