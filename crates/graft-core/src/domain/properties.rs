//! Properties a module factory receives alongside the project folder.

use std::path::PathBuf;

use crate::domain::{error::DomainError, validation::not_blank, value_objects::ProjectFolder};

const DEFAULT_BASE_NAME: &str = "app";
const DEFAULT_PACKAGE: &str = "com.mycompany.myapp";

/// Project-level inputs shared by every module factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProperties {
    project_folder: ProjectFolder,
    base_package: String,
    project_base_name: String,
    project_name: Option<String>,
}

impl ModuleProperties {
    pub fn builder(folder: impl Into<PathBuf>) -> Result<ModulePropertiesBuilder, DomainError> {
        Ok(ModulePropertiesBuilder {
            project_folder: ProjectFolder::new(folder)?,
            base_package: None,
            project_base_name: None,
            project_name: None,
        })
    }

    pub fn project_folder(&self) -> &ProjectFolder {
        &self.project_folder
    }

    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    /// `com.acme.shop` → `com/acme/shop`
    pub fn package_path(&self) -> String {
        self.base_package.replace('.', "/")
    }

    pub fn project_base_name(&self) -> &str {
        &self.project_base_name
    }

    /// Human-readable name; falls back to the base name.
    pub fn project_name(&self) -> &str {
        self.project_name
            .as_deref()
            .unwrap_or(&self.project_base_name)
    }
}

pub struct ModulePropertiesBuilder {
    project_folder: ProjectFolder,
    base_package: Option<String>,
    project_base_name: Option<String>,
    project_name: Option<String>,
}

impl ModulePropertiesBuilder {
    /// Java-style package, e.g. `com.acme.shop`.
    pub fn base_package(mut self, package: impl Into<String>) -> Result<Self, DomainError> {
        let package = package.into();
        not_blank("basePackage", &package)?;

        let valid = package.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        if !valid {
            return Err(DomainError::invalid(
                "basePackage",
                format!("'{package}' is not a valid package name"),
            ));
        }

        self.base_package = Some(package);
        Ok(self)
    }

    pub fn project_base_name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        not_blank("projectBaseName", &name)?;

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::invalid(
                "projectBaseName",
                format!("'{name}' must only contain letters, digits, '-' and '_'"),
            ));
        }

        self.project_base_name = Some(name);
        Ok(self)
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        not_blank("projectName", &name)?;
        self.project_name = Some(name);
        Ok(self)
    }

    pub fn build(self) -> ModuleProperties {
        ModuleProperties {
            project_folder: self.project_folder,
            base_package: self
                .base_package
                .unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
            project_base_name: self
                .project_base_name
                .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string()),
            project_name: self.project_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let properties = ModuleProperties::builder("/tmp/p").unwrap().build();

        assert_eq!(properties.base_package(), "com.mycompany.myapp");
        assert_eq!(properties.project_base_name(), "app");
        assert_eq!(properties.project_name(), "app");
    }

    #[test]
    fn rejects_invalid_package() {
        let result = ModuleProperties::builder("/tmp/p")
            .unwrap()
            .base_package("com..acme");
        assert!(result.is_err());

        let result = ModuleProperties::builder("/tmp/p")
            .unwrap()
            .base_package("com.1acme");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_blank_folder() {
        assert!(ModuleProperties::builder("").is_err());
    }
}
