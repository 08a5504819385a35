//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "graft",
    bin_name = "graft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Graft generator modules onto existing projects",
    long_about = "Graft applies declarative modules (templated files, build \
                  dependencies and pre-actions) to an existing project folder.",
    after_help = "EXAMPLES:\n\
        \x20 graft apply modules/springdoc/module.toml --project ./shop\n\
        \x20 graft plan  modules/springdoc/module.toml --project ./shop\n\
        \x20 graft list --templates ./modules\n\
        \x20 graft completions bash > /usr/share/bash-completion/completions/graft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a module to a project.
    #[command(
        visible_alias = "a",
        about = "Apply a module to a project",
        after_help = "EXAMPLES:\n\
            \x20 graft apply module.toml\n\
            \x20 graft apply module.toml --project ../shop --versions versions.toml"
    )]
    Apply(ApplyArgs),

    /// Show what `apply` would do without changing anything.
    #[command(
        visible_alias = "p",
        about = "Preview a module application",
        after_help = "EXAMPLES:\n\
            \x20 graft plan module.toml --project ../shop\n\
            \x20 graft --output-format json plan module.toml"
    )]
    Plan(ModuleArgs),

    /// List templates under the template root.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 graft list\n\
            \x20 graft list --templates ./modules --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 graft completions bash > ~/.local/share/bash-completion/completions/graft\n\
            \x20 graft completions zsh  > ~/.zfunc/_graft\n\
            \x20 graft completions fish > ~/.config/fish/completions/graft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Graft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 graft config get templates.root\n\
            \x20 graft config list\n\
            \x20 graft config path"
    )]
    Config(ConfigCommands),
}

// ── apply / plan ──────────────────────────────────────────────────────────────

/// Module and project selection shared by `apply` and `plan`.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Path to the module descriptor.
    #[arg(value_name = "MODULE", help = "Module descriptor (module.toml)")]
    pub module: PathBuf,

    /// Project folder the module is applied to.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "DIR",
        default_value = ".",
        help = "Project folder"
    )]
    pub project: PathBuf,

    /// Template root; defaults to `templates.root`, then the module's folder.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template root directory"
    )]
    pub templates: Option<PathBuf>,

    /// Version registry; defaults to `versions.registry`.
    #[arg(
        long = "versions",
        value_name = "FILE",
        help = "Version registry file ([versions] table)"
    )]
    pub versions: Option<PathBuf>,
}

/// Arguments for `graft apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub module: ModuleArgs,

    /// Only print the plan.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Template root; defaults to `templates.root`.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template root directory"
    )]
    pub templates: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One source per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `graft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `graft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_command() {
        let cli = Cli::parse_from([
            "graft",
            "apply",
            "module.toml",
            "--project",
            "../shop",
            "--dry-run",
        ]);
        let Commands::Apply(args) = cli.command else {
            panic!("expected Apply command");
        };
        assert_eq!(args.module.module, PathBuf::from("module.toml"));
        assert_eq!(args.module.project, PathBuf::from("../shop"));
        assert!(args.dry_run);
        assert!(args.module.templates.is_none());
    }

    #[test]
    fn project_defaults_to_current_dir() {
        let cli = Cli::parse_from(["graft", "plan", "module.toml"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected Plan command");
        };
        assert_eq!(args.project, PathBuf::from("."));
    }

    #[test]
    fn list_alias() {
        let cli = Cli::parse_from(["graft", "ls", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Commands::List(ListArgs {
                format: ListFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["graft", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn module_path_is_required() {
        assert!(Cli::try_parse_from(["graft", "apply"]).is_err());
    }
}
