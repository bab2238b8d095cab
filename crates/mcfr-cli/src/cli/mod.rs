mod commands;

use clap::Parser;
use mcfr_core::domain::DeckError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let deck_error = error.as_deck_error();
            eprintln!("{}", deck_error.diagnostic_line());
            deck_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("mcfr-deck".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "mcfr-deck", about = "Molten chloride fast reactor burnup deck generator")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Generate a spherical-core deck, optionally with a silver shell
    Sphere(commands::SphereArgs),
    /// Generate a cylindrical-core deck with reflector end cones
    Cylinder(commands::CylinderArgs),
    /// Generate the chained wire-activation deck sequence
    Wire(commands::WireArgs),
    /// Rank the most abundant isotopes of a depleted material
    #[command(name = "top-isotopes")]
    TopIsotopes(commands::TopIsotopesArgs),
    /// Estimate the combined end-of-cycle resistivity of the silver components
    #[command(name = "eoc-resistivity")]
    EocResistivity(commands::EocResistivityArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Sphere(args) => commands::run_sphere_command(args),
        CliCommand::Cylinder(args) => commands::run_cylinder_command(args),
        CliCommand::Wire(args) => commands::run_wire_command(args),
        CliCommand::TopIsotopes(args) => commands::run_top_isotopes_command(args),
        CliCommand::EocResistivity(args) => commands::run_eoc_resistivity_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(DeckError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_deck_error(&self) -> DeckError {
        match self {
            Self::Usage(message) => DeckError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => DeckError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
