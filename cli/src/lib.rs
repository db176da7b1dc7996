pub mod commands;
pub mod logging;
pub mod shell;
pub mod transport;
pub mod view;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clientes_core::{
    ClientConfig, ConfigOverrides, CustomerClient, CustomerForm, CustomerSession, DeleteConfirmation,
    LoadOptions,
};

use crate::commands::{CommandResult, FieldChanges};
use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(
    name = "clientes",
    about = "Customer records client",
    long_about = "List, search, add, edit and delete customers on a remote clientes API.",
    after_help = "Examples:\n  clientes list\n  clientes get 42\n  clientes create --name Ana --tax-id 111\n  clientes update 7 --name Bea --tax-id 222\n  clientes delete 7 --yes\n  clientes shell"
)]
pub struct Cli {
    #[arg(long, global = true, help = "API base URL, e.g. http://10.0.0.5:3000")]
    base_url: Option<String>,
    #[arg(long, global = true, value_name = "PATH", help = "Config file (default: ./clientes.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Log filter, e.g. debug or clientes_core=trace")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Fetch and print every customer")]
    List,
    #[command(about = "Look a customer up by ID")]
    Get { id: String },
    #[command(about = "Add a customer")]
    Create(CreateArgs),
    #[command(about = "Replace a customer's fields; omitted fields keep their current value")]
    Update {
        id: String,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    #[command(about = "Delete a customer after confirmation")]
    Delete {
        id: String,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Interactive screen (the default)")]
    Shell,
    #[command(about = "Print the effective configuration")]
    Config,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long = "tax-id", visible_alias = "cpf")]
    tax_id: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "tax-id", visible_alias = "cpf")]
    tax_id: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl From<CreateArgs> for CustomerForm {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            tax_id: args.tax_id,
            email: args.email,
            phone: args.phone,
        }
    }
}

impl From<UpdateArgs> for FieldChanges {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            tax_id: args.tax_id,
            email: args.email,
            phone: args.phone,
        }
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = ClientConfig::load(LoadOptions {
        config_path: cli.config,
        overrides: ConfigOverrides {
            base_url: cli.base_url,
            log_level: cli.log_level,
            log_format: None,
        },
    })
    .context("could not load configuration")?;
    logging::init_logging(&config.logging);
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let mut session = CustomerSession::new(CustomerClient::new(&config.base_url), UreqTransport::new());

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::List => commands::list(&mut session),
        Command::Get { id } => commands::get(&mut session, &id),
        Command::Create(args) => commands::create(&mut session, args.into()),
        Command::Update { id, changes } => commands::update(&mut session, &id, changes.into()),
        Command::Delete { id, yes } => commands::delete(&mut session, &id, |confirmation| {
            yes || prompt_confirmation(confirmation).unwrap_or(false)
        }),
        Command::Config => commands::config(&config),
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut session, stdin.lock(), io::stdout()).context("shell i/o failed")?;
            CommandResult {
                exit_code: 0,
                output: String::new(),
            }
        }
    };

    print!("{}", result.output);
    Ok(ExitCode::from(result.exit_code))
}

fn prompt_confirmation(confirmation: &DeleteConfirmation) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}: {} [y/N] ", confirmation.title(), confirmation.message())?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn shell_is_the_default_command() {
        let cli = Cli::try_parse_from(["clientes"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn create_requires_name_and_tax_id() {
        assert!(Cli::try_parse_from(["clientes", "create", "--name", "Ana"]).is_err());
        let cli = Cli::try_parse_from(["clientes", "create", "--name", "Ana", "--cpf", "111"]).unwrap();
        match cli.command {
            Some(Command::Create(args)) => {
                let form: CustomerForm = args.into();
                assert_eq!(form.tax_id, "111");
                assert_eq!(form.email, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_base_url_after_subcommand() {
        let cli = Cli::try_parse_from(["clientes", "list", "--base-url", "http://h:1"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
    }
}
