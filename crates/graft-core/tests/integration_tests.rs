//! Integration tests for graft-core through its public API.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use graft_core::{
    application::ApplicationError,
    domain::{DomainError, ModuleProperties},
    prelude::*,
};

#[derive(Clone, Default)]
struct RecordingFilesystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl Filesystem for RecordingFilesystem {
    fn create_dir_all(&self, _path: &Path) -> GraftResult<()> {
        Ok(())
    }

    fn write_file_atomic(&self, path: &Path, content: &str) -> GraftResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_executable(&self, _path: &Path) -> GraftResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }
}

struct StaticTemplates(HashMap<&'static str, &'static str>);

impl TemplateRepository for StaticTemplates {
    fn read(&self, source: &Source) -> GraftResult<Option<String>> {
        Ok(self.0.get(source.relative()).map(|s| s.to_string()))
    }
}

struct StaticVersions;

impl VersionRegistry for StaticVersions {
    fn resolve(&self, slug: &VersionSlug) -> Option<String> {
        (slug.as_str() == "springdoc-openapi").then(|| "1.6.6".to_string())
    }
}

/// Keeps one entry per identity, like a real descriptor must.
#[derive(Clone, Default)]
struct RecordingDescriptor {
    entries: Arc<Mutex<Vec<ResolvedDependency>>>,
}

impl BuildDescriptor for RecordingDescriptor {
    fn add_dependencies(
        &self,
        _project: &ProjectFolder,
        dependencies: &[ResolvedDependency],
    ) -> GraftResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for dependency in dependencies {
            match entries.iter_mut().find(|e| e.id() == dependency.id()) {
                Some(existing) => *existing = dependency.clone(),
                None => entries.push(dependency.clone()),
            }
        }
        Ok(())
    }
}

fn springdoc_module(properties: &ModuleProperties) -> Module {
    let mut builder = module_for_project(properties.project_folder().clone());
    builder.slug("springdoc").unwrap();
    builder.context().with_project_defaults(properties);
    builder.files().add(
        from("springdoc/SpringdocConfiguration.java").unwrap(),
        to_src_main_java()
            .append(properties.package_path())
            .unwrap()
            .append("SpringdocConfiguration.java")
            .unwrap(),
    );
    builder.dependencies().add(
        dependency()
            .group_id("org.springdoc")
            .unwrap()
            .artifact_id("springdoc-openapi-ui")
            .unwrap()
            .version_slug("springdoc-openapi")
            .unwrap()
            .build(),
    );
    builder.build().unwrap()
}

#[test]
fn full_module_application_workflow() {
    let properties = ModuleProperties::builder("/work/shop")
        .unwrap()
        .base_package("com.acme.shop")
        .unwrap()
        .project_base_name("shop")
        .unwrap()
        .build();
    let module = springdoc_module(&properties);

    let filesystem = RecordingFilesystem::default();
    let descriptor = RecordingDescriptor::default();
    let applier = ModuleApplier::new(
        Box::new(StaticTemplates(HashMap::from([(
            "springdoc/SpringdocConfiguration.java",
            "package {{packageName}};\n\nclass SpringdocConfiguration {}\n",
        )]))),
        Box::new(StaticVersions),
        Box::new(descriptor.clone()),
        Box::new(filesystem.clone()),
    );

    let report = applier.apply(&module, properties.project_folder()).unwrap();

    let expected = PathBuf::from(
        "/work/shop/src/main/java/com/acme/shop/SpringdocConfiguration.java",
    );
    assert_eq!(report.module, "springdoc");
    assert_eq!(report.files_written, vec![expected.clone()]);
    assert!(
        filesystem.files.lock().unwrap()[&expected].starts_with("package com.acme.shop;")
    );

    // Second run: same files, still one descriptor entry
    applier.apply(&module, properties.project_folder()).unwrap();
    let entries = descriptor.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].to_string(), "org.springdoc:springdoc-openapi-ui:1.6.6");
}

#[test]
fn construction_errors_surface_before_application() {
    let mut builder = module_for_project(ProjectFolder::new("/work/app").unwrap());
    let conflicting = |version: &str| {
        dependency()
            .group_id("org.acme")
            .unwrap()
            .artifact_id("core")
            .unwrap()
            .version(version)
            .unwrap()
            .build()
    };
    builder
        .dependencies()
        .add(conflicting("1.0"))
        .add(conflicting("1.1"));

    let err: GraftError = builder.build().unwrap_err().into();
    assert!(matches!(
        err,
        GraftError::Domain(DomainError::DuplicateDependencyConflict { .. })
    ));
    assert!(!err.suggestions().is_empty());
}

#[test]
fn blank_project_folder_is_rejected() {
    assert!(matches!(
        ProjectFolder::new(""),
        Err(DomainError::InvalidArgument { .. })
    ));
}
