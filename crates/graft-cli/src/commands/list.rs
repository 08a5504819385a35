//! `graft list`: templates available under the template root.

use std::path::Path;

use graft_adapters::FileSystemTemplateRepository;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const MODULE_FILE: &str = "module.toml";

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = config.templates_root(args.templates.as_deref(), Path::new("."));
    if !root.is_dir() {
        return Err(CliError::TemplatesNotFound { path: root });
    }

    let sources = FileSystemTemplateRepository::new(&root).list()?;
    let names: Vec<&str> = sources.iter().map(|s| s.relative()).collect();

    if output.is_json() {
        return output.json(&names);
    }

    match args.format {
        ListFormat::Json => output.json(&names)?,
        ListFormat::List => {
            for name in &names {
                println!("{name}");
            }
        }
        ListFormat::Table => {
            output.header(&format!("Templates under {}:", root.display()))?;
            for name in &names {
                if is_module(name) {
                    output.print(&format!("  {name}  (module)"))?;
                } else {
                    output.print(&format!("  {name}"))?;
                }
            }
            output.info(&format!("{} template(s)", names.len()))?;
        }
    }

    Ok(())
}

fn is_module(name: &str) -> bool {
    Path::new(name)
        .file_name()
        .is_some_and(|file| file == MODULE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_descriptors_are_flagged() {
        assert!(is_module("springdoc/module.toml"));
        assert!(is_module("module.toml"));
        assert!(!is_module("springdoc/module.toml.bak"));
    }
}
