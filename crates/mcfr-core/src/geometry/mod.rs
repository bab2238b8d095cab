//! Surface and cell card generation for the supported core configurations.
//!
//! Three configurations are modeled: a spherical core with an optional
//! silver shell embedded in the reflector, a cylindrical core with top and
//! bottom reflector cones, and a silver wire submerged in a salt cylinder.
//! Every constructor validates its radius relationships before any card
//! text exists, so an invalid configuration never leaves a partial deck.

use crate::domain::{DeckError, DeckResult};
use std::f64::consts::PI;

/// Minimum core radius accepted by the full-core configurations [cm].
pub const MIN_CORE_RADIUS: f64 = 10.0;

/// Spherical core, optionally with a thin silver shell inside the
/// reflector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalGeometry {
    core_r: f64,
    refl_r: f64,
    silver_r: Option<f64>,
    silver_d: f64,
}

impl SphericalGeometry {
    pub fn new(core_r: f64, refl_r: f64, silver_r: Option<f64>) -> DeckResult<Self> {
        if core_r < MIN_CORE_RADIUS {
            return Err(DeckError::invalid_geometry(
                "GEOM.CORE_RADIUS",
                format!("core radius {core_r} below minimum {MIN_CORE_RADIUS}"),
            ));
        }
        if refl_r < core_r {
            return Err(DeckError::invalid_geometry(
                "GEOM.REFLECTOR_RADIUS",
                format!("reflector radius {refl_r} smaller than core radius {core_r}"),
            ));
        }
        if let Some(ag_r) = silver_r {
            if ag_r <= core_r {
                return Err(DeckError::invalid_geometry(
                    "GEOM.SHELL_RADIUS",
                    format!("silver shell at {ag_r} lies inside the fuel sphere of radius {core_r}"),
                ));
            }
            if ag_r >= refl_r {
                return Err(DeckError::invalid_geometry(
                    "GEOM.SHELL_RADIUS",
                    format!("silver shell at {ag_r} lies outside the reflector of radius {refl_r}"),
                ));
            }
        }
        Ok(Self {
            core_r,
            refl_r,
            silver_r,
            silver_d: 0.05,
        })
    }

    /// Maps the original sentinel convention (shell radius at or below the
    /// core radius means "no shell") onto the validated constructor.
    pub fn from_shell_request(core_r: f64, refl_r: f64, requested_r: f64) -> DeckResult<Self> {
        let silver_r = (requested_r > core_r).then_some(requested_r);
        Self::new(core_r, refl_r, silver_r)
    }

    /// Shell thickness [cm]; 0.5 mm unless overridden.
    pub fn with_shell_thickness(mut self, silver_d: f64) -> Self {
        self.silver_d = silver_d;
        self
    }

    pub fn core_radius(&self) -> f64 {
        self.core_r
    }

    pub fn reflector_radius(&self) -> f64 {
        self.refl_r
    }

    pub fn silver_radius(&self) -> Option<f64> {
        self.silver_r
    }

    pub fn has_shell(&self) -> bool {
        self.silver_r.is_some()
    }

    /// Salt volume: twice the fuel-sphere volume, accounting for the
    /// external loop.
    pub fn salt_volume(&self) -> f64 {
        2.0 * (4.0 / 3.0) * PI * self.core_r.powi(3)
    }

    pub fn surfaces(&self) -> String {
        let mut surfaces = format!(
            "\n%______________surface definitions__________________________________\n\
             surf 1   sph  0.0 0.0 0.0 {}      % fuel salt radius",
            self.core_r
        );
        match self.silver_r {
            None => {
                surfaces.push_str(&format!(
                    "\nsurf 2   sph  0.0 0.0 0.0 {}   % reflector\n",
                    self.refl_r
                ));
            }
            Some(ag_r) => {
                surfaces.push_str(&format!(
                    "\nsurf 2   sph  0.0 0.0 0.0 {ag_r}   % silver shell inner\n\
                     surf 3   sph  0.0 0.0 0.0 {ag_outer}       % silver shell outer\n\
                     surf 4   sph  0.0 0.0 0.0 {refl}   % reflector\n",
                    ag_outer = ag_r + self.silver_d,
                    refl = self.refl_r,
                ));
            }
        }
        surfaces
    }

    pub fn cells(&self) -> String {
        let mut cells = "\n%______________cell definitions_____________________________________\n\
                         cell 11  0  fuelsalt  -1      % fuel salt\n\
                         cell 31  0  refl       1 -2   % reflector"
            .to_string();
        if self.silver_r.is_none() {
            cells.push_str("\ncell 99  0  outside    2      % graveyard\n");
        } else {
            cells.push_str(
                "\ncell 20  0  silver     2 -3   % silver\n\
                 cell 32  0  refl       3 -4   % reflector\n\
                 cell 99  0  outside    4      % graveyard\n",
            );
        }
        cells
    }
}

/// Cone proportion variants of the cylindrical design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConeDesign {
    /// Experiment-scale core: narrow bottom cone, shallow cutoff.
    Mcre,
    /// Power-scale core: wide bottom cone, deeper cutoff.
    Mcfr,
}

impl ConeDesign {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mcre => "MCRE",
            Self::Mcfr => "MCFR",
        }
    }

    /// Bottom-cone base radius as a fraction of the core radius.
    const fn bottom_cone_radius_fraction(self) -> f64 {
        match self {
            Self::Mcre => 0.25,
            Self::Mcfr => 0.5,
        }
    }

    /// Bottom-cone cutoff height as a fraction of the reflector thickness.
    const fn cutoff_fraction(self) -> f64 {
        match self {
            Self::Mcre => 2.0 / 5.0,
            Self::Mcfr => 3.0 / 5.0,
        }
    }
}

/// Cylindrical core with reflector end cones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalGeometry {
    core_r: f64,
    height: f64,
    refl_thickness: f64,
    design: ConeDesign,
}

impl CylindricalGeometry {
    /// `refl_outer_r` is the outer reflector radius; the stored thickness is
    /// the radial difference.
    pub fn new(core_r: f64, height: f64, refl_outer_r: f64, design: ConeDesign) -> DeckResult<Self> {
        if core_r < MIN_CORE_RADIUS {
            return Err(DeckError::invalid_geometry(
                "GEOM.CORE_RADIUS",
                format!("core radius {core_r} below minimum {MIN_CORE_RADIUS}"),
            ));
        }
        if refl_outer_r < core_r {
            return Err(DeckError::invalid_geometry(
                "GEOM.REFLECTOR_RADIUS",
                format!("reflector radius {refl_outer_r} smaller than core radius {core_r}"),
            ));
        }
        Ok(Self {
            core_r,
            height,
            refl_thickness: refl_outer_r - core_r,
            design,
        })
    }

    pub fn design(&self) -> ConeDesign {
        self.design
    }

    pub fn core_radius(&self) -> f64 {
        self.core_r
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn reflector_outer_radius(&self) -> f64 {
        self.core_r + self.refl_thickness
    }

    /// Salt volume: cylinder minus both reflector cones, doubled for the
    /// external loop.
    pub fn salt_volume(&self) -> f64 {
        let bcone_r = self.core_r * self.design.bottom_cone_radius_fraction();
        let b_cone =
            PI * bcone_r.powi(2) * (self.design.cutoff_fraction() * self.refl_thickness + 3.0)
                / 3.0;
        let cylinder = PI * self.core_r.powi(2) * self.height;
        let t_cone = PI * (self.core_r / 2.0).powi(2) * self.height / 20.0 / 3.0;
        2.0 * (cylinder - t_cone - b_cone)
    }

    pub fn surfaces(&self) -> String {
        let refl_r = self.core_r + self.refl_thickness;
        let refl_top = self.height + self.refl_thickness;
        let refl_bottom = -self.refl_thickness;
        let tcone_r = self.core_r / 2.0;
        let bcone_r = self.core_r * self.design.bottom_cone_radius_fraction();
        let cutoff = self.design.cutoff_fraction() * self.refl_thickness;
        let tcone_h = -self.height / 20.0;
        let bcone_h = cutoff + 3.0;
        format!(
            "\n%______________surface definitions__________________________________\n\
             surf 1  cylz  0.0 0.0 {r}       % fuel salt\n\
             surf 2  cylz  0.0 0.0 {refl_r}       % radial reflector\n\
             surf 3  pz    {h}              % fuel top\n\
             surf 4  pz    0                  % fuel bottom\n\
             surf 5  pz    {refl_top}              % refl top\n\
             surf 6  pz    {refl_bottom}              % refl bottom\n\
             surf 7 cone   0 0 0 {bcone_r} {bcone_h}     % bottom refl cone, x y z r h\n\
             surf 8 cone   0 0 {h} {tcone_r} {tcone_h}      % top refl cone\n\
             surf 9 pz     {cutoff}                    % bottom cone refl cutoff\n",
            r = self.core_r,
            h = self.height,
        )
    }

    pub fn cells(&self) -> String {
        "\n%______________cell definitions_____________________________________\n\
         cell 30  0  refl       1 -2 -3  4        % radial reflector\n\
         cell 31  0  refl      -2  3 -5           % upper reflector\n\
         cell 32  0  refl      -8 -3              % upper reflector cone\n\
         cell 33  0  refl      -2 -4  6           % lower reflector\n\
         cell 34  0  refl      -7 4 -9            % lower reflector cone\n\
         cell 50  0  fuelsalt  -1 -3  4 #32 #34   % fuel salt\n\
         cell 97  0  outside    2                 % outside\n\
         cell 98  0  outside    5                 % outside\n\
         cell 99  0  outside    -6                % outside\n"
            .to_string()
    }
}

/// Immersion variants of the wire-in-salt configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireImmersion {
    FullySubmerged,
    HalfSubmerged,
}

impl WireImmersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullySubmerged => "fully-submerged",
            Self::HalfSubmerged => "half-submerged",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fully-submerged" => Some(Self::FullySubmerged),
            "half-submerged" => Some(Self::HalfSubmerged),
            _ => None,
        }
    }
}

/// Silver wire along the axis of a salt cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireGeometry {
    wire_r: f64,
    salt_r: f64,
    half_len: f64,
    immersion: WireImmersion,
}

impl WireGeometry {
    /// The salt cylinder must be at least twice the wire radius; a smaller
    /// request is raised to exactly that bound rather than rejected.
    pub fn new(wire_r: f64, salt_r: f64, half_len: f64, immersion: WireImmersion) -> Self {
        let salt_r = salt_r.max(2.0 * wire_r);
        Self {
            wire_r,
            salt_r,
            half_len,
            immersion,
        }
    }

    pub fn wire_radius(&self) -> f64 {
        self.wire_r
    }

    pub fn salt_radius(&self) -> f64 {
        self.salt_r
    }

    pub fn immersion(&self) -> WireImmersion {
        self.immersion
    }

    pub fn wire_volume(&self) -> f64 {
        PI * self.wire_r.powi(2) * 2.0 * self.half_len
    }

    pub fn fuel_volume(&self) -> f64 {
        let full = PI * 2.0 * self.half_len * (self.salt_r.powi(2) - self.wire_r.powi(2));
        match self.immersion {
            WireImmersion::FullySubmerged => full,
            WireImmersion::HalfSubmerged => full / 2.0,
        }
    }

    pub fn surfaces_and_cells(&self) -> String {
        match self.immersion {
            WireImmersion::FullySubmerged => format!(
                "\n% --- surfaces ---\n\
                 surf 1   cylx  0.0 0.0 {wr} -{fh} {fh}    % inner wire\n\
                 surf 2   cylx  0.0 0.0 {fr} -{fh} {fh}    % fuel cylinder\n\
                 \n\
                 % --- cells ---\n\
                 cell 10  0  silver  -1      % wire\n\
                 cell 11  0  fuel     1 -2   % fuel salt\n\
                 cell 99  0  outside  2      % graveyard\n",
                wr = self.wire_r,
                fr = self.salt_r,
                fh = self.half_len,
            ),
            WireImmersion::HalfSubmerged => format!(
                "\n% --- surfaces ---\n\
                 surf 1   cylx  0.0 0.0 {wr} -{fh} {fh}    % inner wire\n\
                 surf 2   cylx  0.0 0.0 {fr} -{fh} {fh}    % fuel cylinder\n\
                 surf 3   pz    0\n\
                 \n\
                 % --- cells ---\n\
                 cell 10  0  silver  -1        % wire\n\
                 cell 11  0  fuel     1 -2  3  % fuel salt\n\
                 cell 12  0  r-silver 1 -2 -3  % reflector silver, nondepleting\n\
                 cell 99  0  outside  2        % graveyard\n",
                wr = self.wire_r,
                fr = self.salt_r,
                fh = self.half_len,
            ),
        }
    }
}
