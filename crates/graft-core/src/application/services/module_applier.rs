//! Module Applier - applies a built module to a project folder.
//!
//! The workflow is strictly sequential:
//! 1. Run pre-actions in registration order (first failure stops everything)
//! 2. Resolve dependency versions, then update the build descriptor once
//! 3. Render every template (a missing template aborts before any write)
//! 4. Write every rendered file atomically, collecting failures
//!
//! Applying the same module twice yields the same project: files are
//! overwritten with identical content and descriptors dedupe by identity.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        error::FileWriteFailure,
        ports::{
            BuildDescriptor, Filesystem, ResolvedDependency, ResolvedVersion, TemplateRepository,
            VersionRegistry,
        },
    },
    domain::{Module, PreAction, ProjectFolder, Version},
    error::GraftResult,
};

/// Outcome of a successful `apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub run_id: Uuid,
    pub module: String,
    pub project: PathBuf,
    pub pre_actions_run: Vec<String>,
    pub dependencies: Vec<ResolvedDependency>,
    pub files_written: Vec<PathBuf>,
}

/// A file `apply` would write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub source: String,
    pub destination: PathBuf,
    pub executable: bool,
    /// The destination already exists and would be overwritten.
    pub overwrites: bool,
}

/// What `apply` would do, computed without touching the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyPlan {
    pub module: String,
    pub project: PathBuf,
    pub pre_actions: Vec<String>,
    pub dependencies: Vec<ResolvedDependency>,
    pub files: Vec<PlannedFile>,
}

struct RenderedFile {
    path: PathBuf,
    content: String,
    executable: bool,
}

/// Applies modules through injected ports.
pub struct ModuleApplier {
    templates: Box<dyn TemplateRepository>,
    versions: Box<dyn VersionRegistry>,
    descriptor: Box<dyn BuildDescriptor>,
    filesystem: Box<dyn Filesystem>,
    cancel: Option<Arc<AtomicBool>>,
}

impl ModuleApplier {
    /// Create a new applier with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use graft_core::application::ModuleApplier;
    ///
    /// let applier = ModuleApplier::new(
    ///     templates,  // impl TemplateRepository
    ///     versions,   // impl VersionRegistry
    ///     descriptor, // impl BuildDescriptor
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        templates: Box<dyn TemplateRepository>,
        versions: Box<dyn VersionRegistry>,
        descriptor: Box<dyn BuildDescriptor>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            templates,
            versions,
            descriptor,
            filesystem,
            cancel: None,
        }
    }

    /// Observe `flag` between steps; raising it stops the run with
    /// `Cancelled`. A file write in progress always completes.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Apply `module` to `project`.
    #[instrument(
        skip_all,
        fields(
            module = %module.display_name(),
            project = %project,
            run_id = field::Empty
        )
    )]
    pub fn apply(&self, module: &Module, project: &ProjectFolder) -> GraftResult<ApplyReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", field::display(run_id));

        let name = module.display_name();
        info!(
            files = module.files().len(),
            dependencies = module.dependencies().len(),
            pre_actions = module.pre_actions().len(),
            "Applying module"
        );

        // 1. Pre-actions
        let pre_actions_run = self.run_pre_actions(module, project, &name)?;

        // 2. Dependencies
        self.check_cancelled(&name)?;
        let dependencies = self.resolve_dependencies(module, &name)?;
        if !dependencies.is_empty() {
            self.descriptor
                .add_dependencies(project, &dependencies)
                .map_err(|e| ApplicationError::BuildDescriptorUpdateFailed {
                    module: name.clone(),
                    path: project.path().to_path_buf(),
                    reason: e.to_string(),
                })?;
            info!(count = dependencies.len(), "Build descriptor updated");
        }

        // 3. Render
        self.check_cancelled(&name)?;
        let rendered = self.render(module, project, &name)?;

        // 4. Write
        let files_written = self.write_all(rendered, &name)?;

        info!(files = files_written.len(), "Module applied");
        Ok(ApplyReport {
            run_id,
            module: name,
            project: project.path().to_path_buf(),
            pre_actions_run,
            dependencies,
            files_written,
        })
    }

    /// Compute what `apply` would do without mutating anything.
    ///
    /// Fails like `apply` would on unresolved versions and missing templates.
    #[instrument(skip_all, fields(module = %module.display_name(), project = %project))]
    pub fn plan(&self, module: &Module, project: &ProjectFolder) -> GraftResult<ApplyPlan> {
        let name = module.display_name();

        let dependencies = self.resolve_dependencies(module, &name)?;
        let files = self
            .render(module, project, &name)?
            .into_iter()
            .zip(Self::sources(module))
            .map(|(file, source)| PlannedFile {
                overwrites: self.filesystem.exists(&file.path),
                source,
                destination: file.path,
                executable: file.executable,
            })
            .collect();

        debug!("Plan computed");
        Ok(ApplyPlan {
            module: name,
            project: project.path().to_path_buf(),
            pre_actions: module.pre_actions().iter().map(PreAction::description).collect(),
            dependencies,
            files,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_cancelled(&self, module: &str) -> GraftResult<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => {
                warn!("Cancellation requested");
                Err(ApplicationError::Cancelled {
                    module: module.to_string(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    fn run_pre_actions(
        &self,
        module: &Module,
        project: &ProjectFolder,
        name: &str,
    ) -> GraftResult<Vec<String>> {
        let mut completed = Vec::with_capacity(module.pre_actions().len());

        for (position, action) in module.pre_actions().iter().enumerate() {
            self.check_cancelled(name)?;

            let description = action.description();
            debug!(index = position + 1, action = %description, "Running pre-action");

            let outcome = match action {
                PreAction::CreateDirectory(destination) => self
                    .filesystem
                    .create_dir_all(&project.resolve(destination))
                    .map_err(|e| e.to_string()),
                PreAction::Run { action, .. } => action(project).map_err(|e| e.to_string()),
            };

            if let Err(reason) = outcome {
                warn!(index = position + 1, action = %description, %reason, "Pre-action failed");
                return Err(ApplicationError::PreActionFailed {
                    module: name.to_string(),
                    index: position + 1,
                    description,
                    reason,
                }
                .into());
            }

            completed.push(description);
        }

        Ok(completed)
    }

    /// All-or-nothing: one unknown slug fails the whole set.
    fn resolve_dependencies(
        &self,
        module: &Module,
        name: &str,
    ) -> GraftResult<Vec<ResolvedDependency>> {
        module
            .dependencies()
            .iter()
            .map(|dependency| {
                let version = match dependency.version() {
                    None => None,
                    Some(Version::Literal(value)) => Some(ResolvedVersion {
                        value: value.clone(),
                        slug: None,
                    }),
                    Some(Version::Slug(slug)) => {
                        let value = self.versions.resolve(slug).ok_or_else(|| {
                            ApplicationError::UnresolvedVersion {
                                module: name.to_string(),
                                dependency: dependency.id().to_string(),
                                slug: slug.to_string(),
                            }
                        })?;
                        Some(ResolvedVersion {
                            value,
                            slug: Some(slug.clone()),
                        })
                    }
                };

                Ok(ResolvedDependency {
                    dependency: dependency.clone(),
                    version,
                })
            })
            .collect()
    }

    /// One entry per (file, destination), in file order.
    fn render(
        &self,
        module: &Module,
        project: &ProjectFolder,
        name: &str,
    ) -> GraftResult<Vec<RenderedFile>> {
        let mut rendered = Vec::new();

        for file in module.templated_files() {
            let raw = self.templates.read(file.source())?.ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    module: name.to_string(),
                    template: file.source().to_string(),
                }
            })?;
            let content = file.render(&raw);

            for destination in file.destinations() {
                rendered.push(RenderedFile {
                    path: project.resolve(destination),
                    content: content.clone(),
                    executable: file.file().is_executable(),
                });
            }
        }

        Ok(rendered)
    }

    fn sources(module: &Module) -> impl Iterator<Item = String> + '_ {
        module.files().iter().flat_map(|file| {
            std::iter::repeat_n(file.source().to_string(), file.destinations().len())
        })
    }

    /// Attempt every write; report all failures together.
    fn write_all(&self, files: Vec<RenderedFile>, name: &str) -> GraftResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for file in files {
            self.check_cancelled(name)?;

            match self.write_one(&file) {
                Ok(()) => {
                    debug!(path = %file.path.display(), "Wrote file");
                    written.push(file.path);
                }
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "Write failed");
                    failures.push(FileWriteFailure {
                        destination: file.path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(written)
        } else {
            Err(ApplicationError::FileWriteFailed {
                module: name.to_string(),
                failures,
            }
            .into())
        }
    }

    fn write_one(&self, file: &RenderedFile) -> GraftResult<()> {
        if let Some(parent) = file.path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        self.filesystem.write_file_atomic(&file.path, &file.content)?;

        if file.executable {
            self.filesystem.set_executable(&file.path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet, HashMap};
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;
    use crate::{
        application::ports::{MockBuildDescriptor, MockVersionRegistry},
        domain::{Dependency, Source, from, module_for_project, to},
        error::GraftError,
    };

    // ── Test doubles ─────────────────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct FakeFilesystem {
        files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
        dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
        executables: Arc<Mutex<BTreeSet<PathBuf>>>,
        failing: Arc<Mutex<BTreeSet<PathBuf>>>,
        // raised after each successful write
        cancel_on_write: Arc<Mutex<Option<Arc<AtomicBool>>>>,
    }

    impl FakeFilesystem {
        fn file(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }

        fn fail_on(&self, path: &str) {
            self.failing.lock().unwrap().insert(path.into());
        }

        fn cancel_after_write(&self, flag: Arc<AtomicBool>) {
            *self.cancel_on_write.lock().unwrap() = Some(flag);
        }
    }

    impl Filesystem for FakeFilesystem {
        fn create_dir_all(&self, path: &Path) -> GraftResult<()> {
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        fn write_file_atomic(&self, path: &Path, content: &str) -> GraftResult<()> {
            if self.failing.lock().unwrap().contains(path) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into());
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            if let Some(flag) = self.cancel_on_write.lock().unwrap().as_ref() {
                flag.store(true, Ordering::SeqCst);
            }
            Ok(())
        }

        fn set_executable(&self, path: &Path) -> GraftResult<()> {
            self.executables.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
        }

        fn read_to_string(&self, path: &Path) -> GraftResult<String> {
            self.file(&path.to_string_lossy()).ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
        }
    }

    struct FakeTemplates(HashMap<String, String>);

    impl FakeTemplates {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl TemplateRepository for FakeTemplates {
        fn read(&self, source: &Source) -> GraftResult<Option<String>> {
            Ok(self.0.get(source.relative()).cloned())
        }
    }

    fn registry(known: &'static [(&'static str, &'static str)]) -> MockVersionRegistry {
        let mut registry = MockVersionRegistry::new();
        registry.expect_resolve().returning(move |slug| {
            known
                .iter()
                .find(|(k, _)| *k == slug.as_str())
                .map(|(_, v)| v.to_string())
        });
        registry
    }

    fn untouched_descriptor() -> MockBuildDescriptor {
        let mut descriptor = MockBuildDescriptor::new();
        descriptor.expect_add_dependencies().never();
        descriptor
    }

    fn project() -> ProjectFolder {
        ProjectFolder::new("/p").unwrap()
    }

    fn applier(
        templates: FakeTemplates,
        versions: MockVersionRegistry,
        descriptor: MockBuildDescriptor,
        filesystem: &FakeFilesystem,
    ) -> ModuleApplier {
        ModuleApplier::new(
            Box::new(templates),
            Box::new(versions),
            Box::new(descriptor),
            Box::new(filesystem.clone()),
        )
    }

    fn slug_dependency(slug: &str) -> Dependency {
        Dependency::builder()
            .group_id("org.acme")
            .unwrap()
            .artifact_id("core")
            .unwrap()
            .version_slug(slug)
            .unwrap()
            .build()
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn renders_context_into_destination() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder.context().put("name", "demo").unwrap();
        builder
            .files()
            .add(from("foo.txt").unwrap(), to("out/bar.txt").unwrap());
        let module = builder.build().unwrap();

        let report = applier(
            FakeTemplates::with(&[("foo.txt", "hello {{name}}")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap();

        assert_eq!(fs.file("/p/out/bar.txt").as_deref(), Some("hello demo"));
        assert_eq!(report.files_written, vec![PathBuf::from("/p/out/bar.txt")]);
        assert!(fs.dirs.lock().unwrap().contains(Path::new("/p/out")));
    }

    #[test]
    fn pre_action_failure_stops_everything_after_it() {
        let fs = FakeFilesystem::default();
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut builder = module_for_project(project());
        for (label, fails) in [("one", false), ("two", true), ("three", false)] {
            let log = Arc::clone(&log);
            builder.pre_actions().add(PreAction::run(label, move |_| {
                log.lock().unwrap().push(label);
                if fails { Err("boom".into()) } else { Ok(()) }
            }));
        }
        builder.dependencies().add(slug_dependency("acme"));
        builder
            .files()
            .add(from("foo.txt").unwrap(), to("foo.txt").unwrap());
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[("foo.txt", "x")]),
            registry(&[("acme", "1.0")]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap_err();

        assert_eq!(*log.lock().unwrap(), ["one", "two"]);
        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::PreActionFailed { index: 2, ref reason, .. })
                if reason == "boom"
        ));
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn create_directory_pre_action_uses_filesystem() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder
            .pre_actions()
            .add(PreAction::create_directory(to("logs").unwrap()));
        let module = builder.build().unwrap();

        let report = applier(
            FakeTemplates::with(&[]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap();

        assert!(fs.exists(Path::new("/p/logs")));
        assert_eq!(report.pre_actions_run, ["create directory logs"]);
    }

    #[test]
    fn unresolved_slug_leaves_descriptor_and_files_untouched() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder.slug("demo").unwrap();
        builder.dependencies().add(slug_dependency("missing"));
        builder
            .files()
            .add(from("foo.txt").unwrap(), to("foo.txt").unwrap());
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[("foo.txt", "x")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap_err();

        match err {
            GraftError::Application(ApplicationError::UnresolvedVersion {
                module,
                dependency,
                slug,
            }) => {
                assert_eq!(module, "demo");
                assert_eq!(dependency, "org.acme:core");
                assert_eq!(slug, "missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn slug_versions_reach_descriptor_resolved() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder.dependencies().add(slug_dependency("acme"));
        let module = builder.build().unwrap();

        let mut descriptor = MockBuildDescriptor::new();
        descriptor
            .expect_add_dependencies()
            .withf(|project, deps| {
                project.path() == Path::new("/p")
                    && deps.len() == 1
                    && deps[0].version.as_ref().is_some_and(|v| {
                        v.value == "1.6.6" && v.slug.as_ref().is_some_and(|s| s.as_str() == "acme")
                    })
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = applier(
            FakeTemplates::with(&[]),
            registry(&[("acme", "1.6.6")]),
            descriptor,
            &fs,
        )
        .apply(&module, &project())
        .unwrap();

        assert_eq!(report.dependencies.len(), 1);
    }

    #[test]
    fn descriptor_failure_is_reported_with_module_context() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder.slug("demo").unwrap();
        builder.dependencies().add(slug_dependency("acme"));
        let module = builder.build().unwrap();

        let mut descriptor = MockBuildDescriptor::new();
        descriptor.expect_add_dependencies().returning(|_, _| {
            Err(ApplicationError::FilesystemError {
                path: "/p/pom.xml".into(),
                reason: "missing".into(),
            }
            .into())
        });

        let err = applier(
            FakeTemplates::with(&[]),
            registry(&[("acme", "1")]),
            descriptor,
            &fs,
        )
        .apply(&module, &project())
        .unwrap_err();

        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::BuildDescriptorUpdateFailed { ref reason, .. })
                if reason.contains("pom.xml")
        ));
    }

    #[test]
    fn missing_template_aborts_before_any_write() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder
            .files()
            .add(from("present.txt").unwrap(), to("a.txt").unwrap())
            .add(from("absent.txt").unwrap(), to("b.txt").unwrap());
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[("present.txt", "x")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap_err();

        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::TemplateNotFound { ref template, .. })
                if template == "/generator/absent.txt"
        ));
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn write_failures_are_collected() {
        let fs = FakeFilesystem::default();
        fs.fail_on("/p/b.txt");

        let mut builder = module_for_project(project());
        builder
            .files()
            .add_all(
                from("t.txt").unwrap(),
                [to("a.txt").unwrap(), to("b.txt").unwrap(), to("c.txt").unwrap()],
            )
            .unwrap();
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[("t.txt", "x")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap_err();

        match err {
            GraftError::Application(ApplicationError::FileWriteFailed { failures, .. }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].destination, PathBuf::from("/p/b.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fs.file("/p/a.txt").is_some());
        assert!(fs.file("/p/c.txt").is_some());
    }

    #[test]
    fn executable_files_are_marked() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder
            .files()
            .add_executable(from("mvnw").unwrap(), to("mvnw").unwrap());
        let module = builder.build().unwrap();

        applier(
            FakeTemplates::with(&[("mvnw", "#!/bin/sh")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .apply(&module, &project())
        .unwrap();

        assert!(fs.executables.lock().unwrap().contains(Path::new("/p/mvnw")));
    }

    #[test]
    fn raised_cancellation_flag_stops_before_first_step() {
        let fs = FakeFilesystem::default();
        let ran = Arc::new(AtomicBool::new(false));
        let mut builder = module_for_project(project());
        let marker = Arc::clone(&ran);
        builder.pre_actions().add(PreAction::run("mark", move |_| {
            marker.store(true, Ordering::SeqCst);
            Ok(())
        }));
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .with_cancellation(Arc::new(AtomicBool::new(true)))
        .apply(&module, &project())
        .unwrap_err();

        assert!(err.is_retryable());
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[test]
    fn cancellation_between_writes_keeps_finished_files() {
        let fs = FakeFilesystem::default();
        let flag = Arc::new(AtomicBool::new(false));
        fs.cancel_after_write(Arc::clone(&flag));

        let mut builder = module_for_project(project());
        builder
            .files()
            .add_all(
                from("t.txt").unwrap(),
                [to("a.txt").unwrap(), to("b.txt").unwrap()],
            )
            .unwrap();
        let module = builder.build().unwrap();

        let err = applier(
            FakeTemplates::with(&[("t.txt", "x")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        )
        .with_cancellation(Arc::clone(&flag))
        .apply(&module, &project())
        .unwrap_err();

        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::Cancelled { .. })
        ));
        assert_eq!(fs.file("/p/a.txt").as_deref(), Some("x"));
        assert!(fs.file("/p/b.txt").is_none());
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let fs = FakeFilesystem::default();
        let mut builder = module_for_project(project());
        builder.context().put("name", "demo").unwrap();
        builder
            .files()
            .add(from("foo.txt").unwrap(), to("out/bar.txt").unwrap());
        let module = builder.build().unwrap();
        let applier = applier(
            FakeTemplates::with(&[("foo.txt", "hello {{name}}")]),
            registry(&[]),
            untouched_descriptor(),
            &fs,
        );

        let first = applier.apply(&module, &project()).unwrap();
        let snapshot = fs.files.lock().unwrap().clone();
        let second = applier.apply(&module, &project()).unwrap();

        assert_eq!(*fs.files.lock().unwrap(), snapshot);
        assert_eq!(first.files_written, second.files_written);
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn plan_does_not_mutate() {
        let fs = FakeFilesystem::default();
        let ran = Arc::new(AtomicBool::new(false));
        let marker = Arc::clone(&ran);

        let mut builder = module_for_project(project());
        builder.pre_actions().add(PreAction::run("mark", move |_| {
            marker.store(true, Ordering::SeqCst);
            Ok(())
        }));
        builder.dependencies().add(slug_dependency("acme"));
        builder
            .files()
            .add_all(
                from("t.txt").unwrap(),
                [to("a.txt").unwrap(), to("b.txt").unwrap()],
            )
            .unwrap();
        let module = builder.build().unwrap();

        let plan = applier(
            FakeTemplates::with(&[("t.txt", "x")]),
            registry(&[("acme", "2.0")]),
            untouched_descriptor(),
            &fs,
        )
        .plan(&module, &project())
        .unwrap();

        assert!(!ran.load(Ordering::SeqCst));
        assert_eq!(fs.file_count(), 0);
        assert_eq!(plan.pre_actions, ["mark"]);
        assert_eq!(plan.dependencies[0].to_string(), "org.acme:core:2.0");
        assert_eq!(plan.files.len(), 2);
        assert_eq!(plan.files[1].source, "/generator/t.txt");
        assert_eq!(plan.files[1].destination, PathBuf::from("/p/b.txt"));
        assert!(!plan.files[0].overwrites);
    }
}
