//! Formforge CLI - design data-collection forms and validate submissions.
//!
//! Commands:
//! - `formforge types`: List the field type palette
//! - `formforge new <name>`: Create a draft form
//! - `formforge add|move|remove|duplicate|configure`: Edit a draft's fields
//! - `formforge publish|archive|delete`: Form lifecycle
//! - `formforge export|import|check`: Schema payload files
//! - `formforge validate <form> <values>`: Validate a submission
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: Submission rejected

use std::io;

use clap::Parser;
use formforge::{Cli, Outcome};
use formforge_config::FormforgeConfig;
use formforge_designer::FormStore;
use formforge_fields::FieldRegistry;
use tracing_subscriber::EnvFilter;

/// Exit code returned when a submission fails validation.
const REJECTED_EXIT_CODE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match formforge_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filter = if cli.debug {
        EnvFilter::new("formforge=debug,formforge_designer=debug,formforge_fields=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = result_to_exit(dispatch(cli, config).await);
    std::process::exit(exit_code);
}

async fn dispatch(cli: Cli, config: FormforgeConfig) -> anyhow::Result<Outcome> {
    let registry = FieldRegistry::init_global(config.limits);
    let root = cli.store.unwrap_or(config.store_dir);
    tracing::debug!("Opening form store at {}", root.display());

    let mut store = FormStore::open(root).with_registry(registry).build().await?;
    formforge::run(cli.command, &mut store, &mut io::stdout().lock()).await
}

/// Convert a command result to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<Outcome, E>) -> i32 {
    match result {
        Ok(Outcome::Done) => 0,
        Ok(Outcome::Rejected) => REJECTED_EXIT_CODE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formforge::{Commands, OutputFormat};
    use formforge_fields::FieldTypeTag;

    #[test]
    fn test_cli_parsing_debug_with_types() {
        let cli = Cli::parse_from(["formforge", "--debug", "types"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Types { json: false }));
    }

    #[test]
    fn test_cli_parsing_store_override() {
        let cli = Cli::parse_from(["formforge", "list", "--store", "/tmp/forms"]);
        assert_eq!(cli.store.as_deref(), Some(std::path::Path::new("/tmp/forms")));
    }

    #[test]
    fn test_cli_parsing_add_with_tag() {
        let cli = Cli::parse_from(["formforge", "add", "Contact", "EmailField", "--at", "0"]);
        match cli.command {
            Commands::Add {
                form,
                field_type,
                at,
            } => {
                assert_eq!(form, "Contact");
                assert_eq!(field_type, FieldTypeTag::Email);
                assert_eq!(at, Some(0));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_add_unknown_tag_fails() {
        assert!(Cli::try_parse_from(["formforge", "add", "Contact", "RatingField"]).is_err());
    }

    #[test]
    fn test_cli_parsing_move_negative_index() {
        let cli = Cli::parse_from(["formforge", "move", "Contact", "abc", "-1"]);
        assert!(matches!(cli.command, Commands::Move { index: -1, .. }));
    }

    #[test]
    fn test_cli_parsing_export_yaml() {
        let cli = Cli::parse_from(["formforge", "export", "Contact", "--format", "yaml"]);
        assert!(matches!(
            cli.command,
            Commands::Export {
                format: OutputFormat::Yaml,
                ..
            }
        ));
    }

    #[test]
    fn test_rejected_exit_code_is_two() {
        assert_eq!(REJECTED_EXIT_CODE, 2);
    }

    #[test]
    fn test_result_to_exit() {
        assert_eq!(result_to_exit::<String>(Ok(Outcome::Done)), 0);
        assert_eq!(result_to_exit::<String>(Ok(Outcome::Rejected)), 2);
        assert_eq!(result_to_exit::<String>(Err("boom".into())), 1);
    }
}
