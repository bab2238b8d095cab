use super::CliError;
use anyhow::Context;
use mcfr_core::analysis::resistivity::{combined_eoc_resistivity, EocFractions};
use mcfr_core::analysis::{DepletionTable, MaterialHistory};
use mcfr_core::deck::{write_deck_file, CylindricalDeck, SphericalDeck};
use mcfr_core::domain::{DataLibrary, ReactorDefaults};
use mcfr_core::geometry::{
    ConeDesign, CylindricalGeometry, SphericalGeometry, WireGeometry, WireImmersion,
};
use mcfr_core::materials::PreparedSalt;
use mcfr_core::wire::WireStepChain;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Run parameters shared by every deck-producing subcommand.
#[derive(clap::Args)]
pub(super) struct DefaultsArgs {
    /// Fuel salt temperature [K]
    #[arg(long, default_value_t = 900.0)]
    temp: f64,

    /// Nuclear data evaluation: endf7, jeff33, or endf8
    #[arg(long, default_value = "jeff33")]
    library: String,

    /// Neutron histories per criticality cycle
    #[arg(long, default_value_t = 50_000)]
    histories: u64,

    /// Core thermal power [W]
    #[arg(long, default_value_t = 3.0e9)]
    power: f64,

    /// Base name of the emitted deck file
    #[arg(long, default_value = "mcfr_input")]
    deck_name: String,

    /// Scheduler queue named in the submission script
    #[arg(long, default_value = "gen6")]
    queue: String,

    /// OMP core count for the submission script
    #[arg(long, default_value_t = 16)]
    cores: u32,

    /// Omit geometry plot cards
    #[arg(long)]
    no_plots: bool,
}

impl DefaultsArgs {
    fn to_defaults(&self) -> Result<ReactorDefaults, CliError> {
        let nuc_libs = DataLibrary::from_name(&self.library).ok_or_else(|| {
            CliError::Usage(format!(
                "unknown data library '{}'; expected endf7, jeff33, or endf8",
                self.library
            ))
        })?;
        Ok(ReactorDefaults {
            temp_k: self.temp,
            power_w: self.power,
            histories: self.histories,
            queue: self.queue.clone(),
            omp_cores: self.cores,
            deck_name: self.deck_name.clone(),
            nuc_libs,
            plots: !self.no_plots,
            ..ReactorDefaults::default()
        })
    }
}

/// Fuel salt inputs: the composition card is prepared externally and
/// consumed as-is.
#[derive(clap::Args)]
pub(super) struct SaltArgs {
    /// Path to the prepared fuel-salt material card
    #[arg(long)]
    salt_card: PathBuf,

    /// Salt formula label used in diagnostics
    #[arg(long, default_value = "66.66%NaCl+33.34%UCl3")]
    salt_formula: String,

    /// U-235 enrichment fraction of the salt
    #[arg(long, default_value_t = 0.1975)]
    enrichment: f64,
}

impl SaltArgs {
    fn load(&self) -> Result<PreparedSalt, CliError> {
        let card = fs::read_to_string(&self.salt_card)
            .with_context(|| format!("failed to read salt card '{}'", self.salt_card.display()))?;
        PreparedSalt::new(self.salt_formula.clone(), self.enrichment, card)
            .map_err(CliError::Compute)
    }
}

#[derive(clap::Args)]
pub(super) struct SphereArgs {
    /// Fuel sphere radius [cm]
    #[arg(long, default_value_t = 300.0)]
    core_radius: f64,

    /// Outer reflector radius [cm]
    #[arg(long, default_value_t = 500.0)]
    reflector_radius: f64,

    /// Silver shell inner radius [cm]; at or below the core radius means no shell
    #[arg(long, default_value_t = -1.0)]
    shell_radius: f64,

    /// Depletion duration [years]; zero emits a static deck
    #[arg(long, default_value_t = 0.0)]
    deplete_years: f64,

    /// Refuel mass-flow rate [fraction of inventory per second]
    #[arg(long, default_value_t = 2.824e-10)]
    refuel_flow: f64,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    salt: SaltArgs,

    #[command(flatten)]
    defaults: DefaultsArgs,
}

pub(super) fn run_sphere_command(args: SphereArgs) -> Result<i32, CliError> {
    let defaults = args.defaults.to_defaults()?;
    let salt = args.salt.load()?;
    let geometry = SphericalGeometry::from_shell_request(
        args.core_radius,
        args.reflector_radius,
        args.shell_radius,
    )
    .map_err(CliError::Compute)?;
    let deck = SphericalDeck {
        geometry,
        salt: &salt,
        defaults: &defaults,
        deplete_years: args.deplete_years,
        refuel_flow: args.refuel_flow,
    };
    let deck_path = deck.write(&args.out).map_err(CliError::Compute)?;
    let script_path = write_deck_file(&args.out, "run.sh", &deck.run_script())
        .map_err(CliError::Compute)?;
    info!(deck = %deck_path.display(), script = %script_path.display(), "wrote spherical deck");
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct CylinderArgs {
    /// Cone proportion design: mcre or mcfr
    #[arg(long, default_value = "mcre")]
    design: String,

    /// Fuel cylinder radius [cm]
    #[arg(long, default_value_t = 20.0)]
    core_radius: f64,

    /// Fuel cylinder height [cm]
    #[arg(long, default_value_t = 90.0)]
    height: f64,

    /// Outer reflector radius [cm]
    #[arg(long, default_value_t = 35.0)]
    reflector_radius: f64,

    /// Depletion duration [years]; zero emits a static deck
    #[arg(long, default_value_t = 0.0)]
    deplete_years: f64,

    /// Refuel mass-flow rate [fraction of inventory per second]
    #[arg(long, default_value_t = 2.824e-10)]
    refuel_flow: f64,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    salt: SaltArgs,

    #[command(flatten)]
    defaults: DefaultsArgs,
}

pub(super) fn run_cylinder_command(args: CylinderArgs) -> Result<i32, CliError> {
    let design = match args.design.as_str() {
        "mcre" => ConeDesign::Mcre,
        "mcfr" => ConeDesign::Mcfr,
        other => {
            return Err(CliError::Usage(format!(
                "unknown design '{other}'; expected mcre or mcfr"
            )))
        }
    };
    let defaults = args.defaults.to_defaults()?;
    let salt = args.salt.load()?;
    let geometry =
        CylindricalGeometry::new(args.core_radius, args.height, args.reflector_radius, design)
            .map_err(CliError::Compute)?;
    let deck = CylindricalDeck {
        geometry,
        salt: &salt,
        defaults: &defaults,
        deplete_years: args.deplete_years,
        refuel_flow: args.refuel_flow,
    };
    let deck_path = deck.write(&args.out).map_err(CliError::Compute)?;
    let script_path = write_deck_file(&args.out, "run.sh", &deck.run_script())
        .map_err(CliError::Compute)?;
    info!(deck = %deck_path.display(), script = %script_path.display(), "wrote cylindrical deck");
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct WireArgs {
    /// Wire radius [cm]
    #[arg(long, default_value_t = 0.05)]
    wire_radius: f64,

    /// Salt cylinder radius [cm]; raised to twice the wire radius if smaller
    #[arg(long, default_value_t = 2.0)]
    salt_radius: f64,

    /// Wire half-length [cm]
    #[arg(long, default_value_t = 100.0)]
    half_length: f64,

    /// Immersion variant: fully-submerged or half-submerged
    #[arg(long, default_value = "fully-submerged")]
    immersion: String,

    /// Depletion table JSON with the decaying fuel history
    #[arg(long)]
    fuel_table: PathBuf,

    /// Material name of the fuel history in the table
    #[arg(long, default_value = "fuelsalt")]
    fuel_material: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    defaults: DefaultsArgs,
}

pub(super) fn run_wire_command(args: WireArgs) -> Result<i32, CliError> {
    let immersion = WireImmersion::from_name(&args.immersion).ok_or_else(|| {
        CliError::Usage(format!(
            "unknown immersion '{}'; expected fully-submerged or half-submerged",
            args.immersion
        ))
    })?;
    let defaults = args.defaults.to_defaults()?;
    let table = DepletionTable::load(&args.fuel_table).map_err(CliError::Compute)?;
    let fuel = table.material(&args.fuel_material).map_err(CliError::Compute)?;
    let geometry = WireGeometry::new(args.wire_radius, args.salt_radius, args.half_length, immersion);
    let chain = WireStepChain::new(geometry, fuel, &defaults).map_err(CliError::Compute)?;

    let written = chain.write_all(&args.out).map_err(CliError::Compute)?;
    let script_path = write_deck_file(&args.out, "runwire.sh", &chain.job_script())
        .map_err(CliError::Compute)?;
    info!(
        steps = written.len(),
        script = %script_path.display(),
        "wrote wire activation chain"
    );
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct TopIsotopesArgs {
    /// Depletion table JSON
    #[arg(long)]
    table: PathBuf,

    /// Material name in the table
    #[arg(long, default_value = "silver")]
    material: String,

    /// Number of isotopes to list
    #[arg(long, default_value_t = 10)]
    count: usize,
}

pub(super) fn run_top_isotopes_command(args: TopIsotopesArgs) -> Result<i32, CliError> {
    let table = DepletionTable::load(&args.table).map_err(CliError::Compute)?;
    let history = table.material(&args.material).map_err(CliError::Compute)?;
    let top = history.top_isotopes(args.count).map_err(CliError::Compute)?;
    for name in top {
        println!("{name}");
    }
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct EocResistivityArgs {
    /// Depletion table JSON with the wire history
    #[arg(long)]
    wire_table: PathBuf,

    /// Material name of the wire in its table
    #[arg(long, default_value = "silver")]
    wire_material: String,

    /// Depletion table JSON with the shell history
    #[arg(long)]
    shell_table: PathBuf,

    /// Material name of the shell in its table
    #[arg(long, default_value = "silver")]
    shell_material: String,

    /// Evaluation temperature [degC]
    #[arg(long, default_value_t = 700.0)]
    temp_c: f64,
}

fn eoc_fractions(history: &MaterialHistory) -> Result<EocFractions, CliError> {
    Ok(EocFractions {
        ag: history.eoc_fraction("Ag").map_err(CliError::Compute)?,
        pd: history.eoc_fraction("Pd").map_err(CliError::Compute)?,
        cd: history.eoc_fraction("Cd").map_err(CliError::Compute)?,
    })
}

pub(super) fn run_eoc_resistivity_command(args: EocResistivityArgs) -> Result<i32, CliError> {
    let wire_table = DepletionTable::load(&args.wire_table).map_err(CliError::Compute)?;
    let wire = eoc_fractions(wire_table.material(&args.wire_material).map_err(CliError::Compute)?)?;
    let shell_table = DepletionTable::load(&args.shell_table).map_err(CliError::Compute)?;
    let shell =
        eoc_fractions(shell_table.material(&args.shell_material).map_err(CliError::Compute)?)?;

    let rho = combined_eoc_resistivity(wire, shell, args.temp_c).map_err(CliError::Compute)?;
    println!("{rho}");
    Ok(0)
}
