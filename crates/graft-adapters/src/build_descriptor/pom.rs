//! Text-level `pom.xml` editing.
//!
//! The editor never re-serialises the document: it only inserts lines and
//! replaces property values, so comments, ordering and formatting of the
//! rest of the file are preserved. Indentation of inserted lines follows
//! the indentation already used in the file.
//!
//! Only the project-level `<dependencies>` and `<properties>` sections are
//! touched; the ones inside `<dependencyManagement>`, `<build>`,
//! `<profiles>` and `<reporting>` are skipped.

use std::ops::Range;

use thiserror::Error;

use graft_core::application::ports::ResolvedDependency;

const NESTED_SCOPES: [&str; 4] = ["dependencyManagement", "build", "profiles", "reporting"];
const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PomError {
    #[error("no closing </project> element")]
    MissingProject,

    #[error("unclosed <{0}> element")]
    Unclosed(String),
}

/// Declare `dependencies` in `pom`. Returns the new document and how many
/// dependency entries were added.
///
/// Already declared identities are left alone. Slug versions are written as
/// `${slug.version}` and the property is set to the resolved value.
pub fn add_dependencies(
    pom: &str,
    dependencies: &[ResolvedDependency],
) -> Result<(String, usize), PomError> {
    if !pom.contains("</project>") {
        return Err(PomError::MissingProject);
    }

    let mut pom = pom.to_string();
    let mut added = 0;

    for dependency in dependencies {
        if let Some(version) = &dependency.version {
            if let Some(slug) = &version.slug {
                set_property(&mut pom, &slug.property_name(), &version.value)?;
            }
        }

        if is_declared(&pom, dependency)? {
            continue;
        }
        insert_dependency(&mut pom, dependency)?;
        added += 1;
    }

    Ok((pom, added))
}

// ── Sections ─────────────────────────────────────────────────────────────────

/// Ranges of every `<tag>…</tag>` element. Same-name nesting is not supported,
/// which holds for every element this module looks for.
fn elements(xml: &str, tag: &str) -> Result<Vec<Range<usize>>, PomError> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(offset) = xml[from..].find(&open) {
        let start = from + offset;
        let Some(length) = xml[start..].find(&close) else {
            return Err(PomError::Unclosed(tag.to_string()));
        };
        let end = start + length + close.len();
        ranges.push(start..end);
        from = end;
    }

    Ok(ranges)
}

/// The project-level `<tag>` element, if any.
fn top_level(xml: &str, tag: &str) -> Result<Option<Range<usize>>, PomError> {
    let mut nested = Vec::new();
    for scope in NESTED_SCOPES {
        nested.extend(elements(xml, scope)?);
    }

    Ok(elements(xml, tag)?
        .into_iter()
        .find(|candidate| !nested.iter().any(|scope| scope.contains(&candidate.start))))
}

/// Trimmed text of the first `<tag>` inside `xml`.
fn child_text<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(xml[start..end].trim())
}

fn is_declared(pom: &str, dependency: &ResolvedDependency) -> Result<bool, PomError> {
    let Some(section) = top_level(pom, "dependencies")? else {
        return Ok(false);
    };
    let section = &pom[section];

    Ok(elements(section, "dependency")?.into_iter().any(|range| {
        let entry = &section[range];
        child_text(entry, "groupId") == Some(dependency.id().group_id.as_str())
            && child_text(entry, "artifactId") == Some(dependency.id().artifact_id.as_str())
    }))
}

// ── Edits ────────────────────────────────────────────────────────────────────

fn set_property(pom: &mut String, name: &str, value: &str) -> Result<(), PomError> {
    let value = escape(value);

    let Some(section) = top_level(pom, "properties")? else {
        let unit = indent_unit(pom);
        let block = format!(
            "{unit}<properties>\n{unit}{unit}<{name}>{value}</{name}>\n{unit}</properties>\n"
        );
        let anchor = match top_level(pom, "dependencies")? {
            Some(dependencies) => line_start(pom, dependencies.start),
            None => closing_project(pom)?,
        };
        pom.insert_str(anchor, &block);
        return Ok(());
    };

    let open = format!("<{name}>");
    let close = format!("</{name}>");
    if let Some(offset) = pom[section.clone()].find(&open) {
        let value_start = section.start + offset + open.len();
        let Some(length) = pom[value_start..].find(&close) else {
            return Err(PomError::Unclosed(name.to_string()));
        };
        pom.replace_range(value_start..value_start + length, &value);
    } else {
        let indent = format!("{}{}", line_indent(pom, section.start), indent_unit(pom));
        let closing = section.end - "</properties>".len();
        insert_line_before(pom, closing, &format!("{indent}<{name}>{value}</{name}>\n"));
    }

    Ok(())
}

fn insert_dependency(pom: &mut String, dependency: &ResolvedDependency) -> Result<(), PomError> {
    let unit = indent_unit(pom);

    match top_level(pom, "dependencies")? {
        Some(section) => {
            let indent = format!("{}{unit}", line_indent(pom, section.start));
            let block = render(dependency, &indent, &unit);
            let closing = section.end - "</dependencies>".len();
            insert_line_before(pom, closing, &block);
        }
        None => {
            let block = render(dependency, &format!("{unit}{unit}"), &unit);
            let section = format!("{unit}<dependencies>\n{block}{unit}</dependencies>\n");
            let anchor = closing_project(pom)?;
            pom.insert_str(anchor, &section);
        }
    }

    Ok(())
}

fn render(dependency: &ResolvedDependency, indent: &str, unit: &str) -> String {
    let inner = format!("{indent}{unit}");
    let declared = &dependency.dependency;
    let mut lines = vec![
        format!("{indent}<dependency>"),
        format!("{inner}<groupId>{}</groupId>", escape(declared.group_id().as_str())),
        format!("{inner}<artifactId>{}</artifactId>", escape(declared.artifact_id().as_str())),
    ];

    if let Some(version) = &dependency.version {
        let text = match &version.slug {
            Some(slug) => format!("${{{}}}", slug.property_name()),
            None => escape(&version.value),
        };
        lines.push(format!("{inner}<version>{text}</version>"));
    }
    if let Some(kind) = declared.dependency_type() {
        lines.push(format!("{inner}<type>{}</type>", escape(kind)));
    }
    if let Some(scope) = declared.scope() {
        lines.push(format!("{inner}<scope>{scope}</scope>"));
    }
    if declared.is_optional() {
        lines.push(format!("{inner}<optional>true</optional>"));
    }
    if !declared.exclusions().is_empty() {
        let nested = format!("{inner}{unit}");
        lines.push(format!("{inner}<exclusions>"));
        for exclusion in declared.exclusions() {
            lines.push(format!("{nested}<exclusion>"));
            lines.push(format!(
                "{nested}{unit}<groupId>{}</groupId>",
                escape(exclusion.group_id.as_str())
            ));
            lines.push(format!(
                "{nested}{unit}<artifactId>{}</artifactId>",
                escape(exclusion.artifact_id.as_str())
            ));
            lines.push(format!("{nested}</exclusion>"));
        }
        lines.push(format!("{inner}</exclusions>"));
    }
    lines.push(format!("{indent}</dependency>"));

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

// ── Layout helpers ───────────────────────────────────────────────────────────

fn line_start(xml: &str, position: usize) -> usize {
    xml[..position].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line holding `position`.
fn line_indent(xml: &str, position: usize) -> &str {
    let start = line_start(xml, position);
    let line = &xml[start..position];
    &line[..line.len() - line.trim_start().len()]
}

/// Indentation of the first child of `<project>`.
fn indent_unit(xml: &str) -> String {
    xml.lines()
        .skip_while(|line| !line.contains("<project"))
        .skip(1)
        .find(|line| line.trim_start().starts_with('<') && line.starts_with(char::is_whitespace))
        .map(|line| line[..line.len() - line.trim_start().len()].to_string())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

fn closing_project(xml: &str) -> Result<usize, PomError> {
    let position = xml.rfind("</project>").ok_or(PomError::MissingProject)?;
    Ok(line_start(xml, position))
}

/// Insert whole lines right before the line holding `position`.
fn insert_line_before(xml: &mut String, position: usize, lines: &str) {
    let start = line_start(xml, position);
    if xml[start..position].trim().is_empty() {
        xml.insert_str(start, lines);
    } else {
        xml.insert_str(position, &format!("\n{lines}"));
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{
        application::ports::ResolvedVersion,
        domain::{Dependency, DependencyScope, VersionSlug},
    };

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <properties>
    <java.version>17</java.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.springdoc</groupId>
        <artifactId>springdoc-openapi-ui</artifactId>
        <version>1.0.0</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

    const BARE_POM: &str = "<project>\n    <modelVersion>4.0.0</modelVersion>\n</project>\n";

    fn springdoc() -> ResolvedDependency {
        ResolvedDependency {
            dependency: Dependency::builder()
                .group_id("org.springdoc")
                .unwrap()
                .artifact_id("springdoc-openapi-ui")
                .unwrap()
                .version_slug("springdoc-openapi")
                .unwrap()
                .build(),
            version: Some(ResolvedVersion {
                value: "1.6.6".into(),
                slug: Some(VersionSlug::new("springdoc-openapi").unwrap()),
            }),
        }
    }

    fn literal_test_dependency() -> ResolvedDependency {
        ResolvedDependency {
            dependency: Dependency::builder()
                .group_id("org.junit")
                .unwrap()
                .artifact_id("junit-bom")
                .unwrap()
                .version("5.9.0")
                .unwrap()
                .dependency_type("pom")
                .unwrap()
                .scope(DependencyScope::Test)
                .optional()
                .exclusion("org.hamcrest", "hamcrest")
                .unwrap()
                .build(),
            version: Some(ResolvedVersion {
                value: "5.9.0".into(),
                slug: None,
            }),
        }
    }

    #[test]
    fn inserts_into_project_dependencies_with_file_indentation() {
        let (pom, added) = add_dependencies(POM, &[springdoc()]).unwrap();

        assert_eq!(added, 1);
        assert!(pom.contains(
            "    <java.version>17</java.version>\n    <springdoc-openapi.version>1.6.6</springdoc-openapi.version>\n  </properties>"
        ));
        assert!(pom.contains(concat!(
            "      <artifactId>spring-boot-starter</artifactId>\n",
            "    </dependency>\n",
            "    <dependency>\n",
            "      <groupId>org.springdoc</groupId>\n",
            "      <artifactId>springdoc-openapi-ui</artifactId>\n",
            "      <version>${springdoc-openapi.version}</version>\n",
            "    </dependency>\n",
            "  </dependencies>\n",
            "</project>"
        )));
    }

    #[test]
    fn second_application_changes_nothing() {
        let (once, _) = add_dependencies(POM, &[springdoc()]).unwrap();
        let (twice, added) = add_dependencies(&once, &[springdoc()]).unwrap();

        assert_eq!(added, 0);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("<springdoc-openapi.version>").count(), 1);
    }

    #[test]
    fn property_value_follows_registry() {
        let (once, _) = add_dependencies(POM, &[springdoc()]).unwrap();
        let mut newer = springdoc();
        newer.version.as_mut().unwrap().value = "1.7.0".into();

        let (updated, added) = add_dependencies(&once, &[newer]).unwrap();

        assert_eq!(added, 0);
        assert!(updated.contains("<springdoc-openapi.version>1.7.0</springdoc-openapi.version>"));
    }

    #[test]
    fn creates_missing_sections() {
        let (pom, added) = add_dependencies(BARE_POM, &[springdoc()]).unwrap();

        assert_eq!(added, 1);
        assert_eq!(
            pom,
            concat!(
                "<project>\n",
                "    <modelVersion>4.0.0</modelVersion>\n",
                "    <properties>\n",
                "        <springdoc-openapi.version>1.6.6</springdoc-openapi.version>\n",
                "    </properties>\n",
                "    <dependencies>\n",
                "        <dependency>\n",
                "            <groupId>org.springdoc</groupId>\n",
                "            <artifactId>springdoc-openapi-ui</artifactId>\n",
                "            <version>${springdoc-openapi.version}</version>\n",
                "        </dependency>\n",
                "    </dependencies>\n",
                "</project>\n"
            )
        );
    }

    #[test]
    fn renders_every_optional_setting() {
        let (pom, _) = add_dependencies(BARE_POM, &[literal_test_dependency()]).unwrap();

        assert!(pom.contains(concat!(
            "            <version>5.9.0</version>\n",
            "            <type>pom</type>\n",
            "            <scope>test</scope>\n",
            "            <optional>true</optional>\n",
            "            <exclusions>\n",
            "                <exclusion>\n",
            "                    <groupId>org.hamcrest</groupId>\n",
            "                    <artifactId>hamcrest</artifactId>\n",
            "                </exclusion>\n",
            "            </exclusions>\n"
        )));
        assert!(!pom.contains("<properties>"));
    }

    #[test]
    fn managed_dependency_does_not_count_as_declared() {
        let (pom, added) = add_dependencies(POM, &[springdoc()]).unwrap();

        assert_eq!(added, 1);
        assert_eq!(pom.matches("<artifactId>springdoc-openapi-ui</artifactId>").count(), 2);
    }

    #[test]
    fn rejects_documents_without_project() {
        assert_eq!(
            add_dependencies("<settings/>", &[springdoc()]),
            Err(PomError::MissingProject)
        );
    }

    #[test]
    fn rejects_unclosed_sections() {
        let broken = "<project>\n  <dependencies>\n</project>\n";
        assert_eq!(
            add_dependencies(broken, &[springdoc()]),
            Err(PomError::Unclosed("dependencies".into()))
        );
    }
}
