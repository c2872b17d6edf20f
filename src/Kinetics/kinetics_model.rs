//! # Kinetics model base
//!
//! Common data and capabilities of every rate coefficient model:
//!
//! - [`KineticsBase`] carries the validity range (`Tmin`, `Tmax`, `Pmin`, `Pmax`),
//!   the confidence `rank`, a provenance `comment` and `numReactants`, which fixes
//!   the physical units of the preexponential factor.
//! - [`KineticsModel`] is the capability trait implemented by each model.
//! - [`Kinetics`] is a flat enum over all models; calls on it are forwarded to the
//!   variant through `enum_dispatch`.
//!
//! The range predicates are advisory: none of the evaluators consult them.
//! Only the pressure-dependent Arrhenius model refuses to extrapolate, because
//! its stored pressures bracket the data it can interpolate.
use super::arrhenius::ArrheniusModel;
use super::arrhenius_ep::ArrheniusEPModel;
use super::chebyshev::ChebyshevModel;
use super::kinetics_error::KineticsError;
use super::kinetics_record::KineticsRecord;
use super::pdep_arrhenius::PDepArrheniusModel;
use enum_dispatch::enum_dispatch;
use prettytable::Table;

/// Validity range, confidence rank and provenance shared by all kinetics models.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticsBase {
    /// minimum temperature of validity, K
    pub Tmin: f64,
    /// maximum temperature of validity, K
    pub Tmax: f64,
    /// minimum pressure of validity, Pa
    pub Pmin: f64,
    /// maximum pressure of validity, Pa
    pub Pmax: f64,
    /// degree of confidence: 1 = high, 5 = low, 0 = none
    pub rank: u32,
    /// comments, including the source of the data
    pub comment: String,
    /// number of reactants, determines the units of the preexponential factor
    pub numReactants: usize,
}

impl Default for KineticsBase {
    fn default() -> Self {
        Self {
            Tmin: 0.0,
            Tmax: 10000.0,
            Pmin: 0.0,
            Pmax: 1.0e100,
            rank: 0,
            comment: String::new(),
            numReactants: 1,
        }
    }
}

impl KineticsBase {
    pub fn new(
        Tmin: f64,
        Tmax: f64,
        Pmin: f64,
        Pmax: f64,
        rank: u32,
        comment: &str,
        numReactants: usize,
    ) -> Result<Self, KineticsError> {
        if !(Tmin < Tmax) {
            return Err(KineticsError::InvalidInput(format!(
                "Tmin ({} K) must be less than Tmax ({} K)",
                Tmin, Tmax
            )));
        }
        if !(Pmin <= Pmax) {
            return Err(KineticsError::InvalidInput(format!(
                "Pmin ({} Pa) must not exceed Pmax ({} Pa)",
                Pmin, Pmax
            )));
        }
        if numReactants == 0 {
            return Err(KineticsError::InvalidInput(
                "numReactants must be positive".to_string(),
            ));
        }
        Ok(Self {
            Tmin,
            Tmax,
            Pmin,
            Pmax,
            rank,
            comment: comment.to_string(),
            numReactants,
        })
    }

    pub fn with_temperature_range(mut self, Tmin: f64, Tmax: f64) -> Self {
        self.Tmin = Tmin;
        self.Tmax = Tmax;
        self
    }

    pub fn with_pressure_range(mut self, Pmin: f64, Pmax: f64) -> Self {
        self.Pmin = Pmin;
        self.Pmax = Pmax;
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn with_num_reactants(mut self, numReactants: usize) -> Self {
        self.numReactants = numReactants;
        self
    }

    /// `true` if `T` lies within `[Tmin, Tmax]`.
    pub fn is_temperature_in_range(&self, T: f64) -> bool {
        self.Tmin <= T && T <= self.Tmax
    }

    /// `true` if `P` lies within `[Pmin, Pmax]`.
    pub fn is_pressure_in_range(&self, P: f64) -> bool {
        self.Pmin <= P && P <= self.Pmax
    }
}

/// Capability set of a rate coefficient model.
#[enum_dispatch]
pub trait KineticsModel {
    /// validity range, rank and provenance
    fn base(&self) -> &KineticsBase;

    /// type discriminator used by the serialized record
    fn kinetics_type(&self) -> &'static str;

    /// Uniform evaluation of k. Pressure-dependent models need `P`,
    /// Evans-Polanyi kinetics need the enthalpy of reaction `dHrxn`;
    /// arguments a model does not use are ignored.
    /// ATTENTION! absolute temperature in K, pressure in Pa, dHrxn in J/mol.
    fn K_const(&self, T: f64, P: Option<f64>, dHrxn: Option<f64>) -> Result<f64, KineticsError>;

    /// serialized form in display units
    fn to_record(&self) -> KineticsRecord;

    /// table of the model parameters
    fn to_table(&self) -> Table;

    fn is_temperature_in_range(&self, T: f64) -> bool {
        self.base().is_temperature_in_range(T)
    }

    fn is_pressure_in_range(&self, P: f64) -> bool {
        self.base().is_pressure_in_range(P)
    }

    /// rate constants for the range of temperatures from T0 to Tend, number of points is n
    fn K_const_for_T_range(
        &self,
        T0: f64,
        Tend: f64,
        n: usize,
        P: Option<f64>,
        dHrxn: Option<f64>,
    ) -> Result<Vec<f64>, KineticsError> {
        let step = if n > 1 { (Tend - T0) / (n - 1) as f64 } else { 0.0 };
        (0..n)
            .map(|i| self.K_const(T0 + i as f64 * step, P, dHrxn))
            .collect()
    }

    fn pretty_print(&self) {
        self.to_table().printstd();
    }
}

/// Any of the supported rate coefficient models.
#[enum_dispatch(KineticsModel)]
#[derive(Debug, Clone, PartialEq)]
pub enum Kinetics {
    ArrheniusModel,
    ArrheniusEPModel,
    PDepArrheniusModel,
    ChebyshevModel,
}
