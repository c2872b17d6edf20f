/////////////////////////EVANS-POLANYI KINETICS///////////////////////////////////////////////////////////////
// Modified Arrhenius kinetics whose activation energy depends linearly on the
// enthalpy of reaction: k(T) = A*T^n*exp(-(E0 + alpha*dHrxn)/(R*T))
use super::arrhenius::ArrheniusModel;
use super::kinetics_error::KineticsError;
use super::kinetics_model::{KineticsBase, KineticsModel};
use super::kinetics_record::{ArrheniusEPRecord, KineticsRecord};
use super::units::{KCAL, R, database_preexponential_units, parse_preexponential_units};
use prettytable::{Table, row};
use std::fmt;

/// length of a database record `[Tmin, Tmax, A, n, alpha, E0, dA, dn, dalpha, dE0, rank]`
pub const DATABASE_RECORD_LENGTH: usize = 11;

/// Arrhenius kinetics with Evans-Polanyi correction
/// `A` - preexponential factor in s^-1, m^3/(mol*s), etc.
/// `n` - temperature exponent
/// `E0` - activation energy at zero enthalpy of reaction, J/mol
/// `alpha` - slope of the activation energy against the enthalpy of reaction
/// `family`, `label` - reaction family and database item the kinetics came from
#[derive(Debug, Clone, PartialEq)]
pub struct ArrheniusEPModel {
    pub A: f64,
    pub n: f64,
    pub E0: f64,
    pub alpha: f64,
    pub family: Option<String>,
    pub label: Option<String>,
    pub base: KineticsBase,
}

impl Default for ArrheniusEPModel {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl ArrheniusEPModel {
    pub fn new(A: f64, n: f64, E0: f64, alpha: f64) -> Self {
        Self {
            A,
            n,
            E0,
            alpha,
            family: None,
            label: None,
            base: KineticsBase::default(),
        }
    }

    pub fn with_base(mut self, base: KineticsBase) -> Self {
        self.base = base;
        self
    }

    pub fn with_source(mut self, family: &str, label: &str) -> Self {
        self.family = Some(family.to_string());
        self.label = Some(label.to_string());
        self
    }

    /// Ea = E0 + alpha*dHrxn. Not range-checked: the result may be negative.
    pub fn get_activation_energy(&self, dHrxn: f64) -> f64 {
        self.E0 + self.alpha * dHrxn
    }

    /// Plain Arrhenius kinetics for a reaction with enthalpy of reaction `dHrxn` (J/mol).
    pub fn get_arrhenius(&self, dHrxn: f64) -> ArrheniusModel {
        let Ea = self.get_activation_energy(dHrxn);
        let mut base = self.base.clone();
        base.comment = format!(
            "{}Used dHrxn={:.0}kJ/mol to evaluate Ea.",
            self.base.comment,
            dHrxn / 1000.0
        );
        ArrheniusModel::new(self.A, self.n, Ea).with_base(base)
    }

    /// k(T) at temperature `T` in K for enthalpy of reaction `dHrxn` in J/mol.
    pub fn get_rate_constant(&self, T: f64, dHrxn: f64) -> f64 {
        let Ea = self.get_activation_energy(dHrxn);
        self.A * T.powf(self.n) * f64::exp(-Ea / (R * T))
    }

    /// Kinetics from a database record
    /// `[Tmin, Tmax, A, n, alpha, E0, dA, dn, dalpha, dE0, rank]`.
    /// Database units: A in (cm^3/mol)^(numReactants-1)/s, E0 in kcal/mol, T in K.
    /// The uncertainties dA, dn, dalpha, dE0 are not kept.
    pub fn from_database(
        data: &[f64],
        comment: &str,
        numReactants: usize,
    ) -> Result<Self, KineticsError> {
        if data.len() != DATABASE_RECORD_LENGTH {
            return Err(KineticsError::InvalidRecordLength {
                expected: DATABASE_RECORD_LENGTH,
                got: data.len(),
            });
        }
        if numReactants == 0 {
            return Err(KineticsError::InvalidInput(
                "numReactants must be positive".to_string(),
            ));
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(KineticsError::InvalidInput(format!(
                "database record field {} is not finite: {}",
                i, data[i]
            )));
        }
        let rank = data[10];
        if !(rank >= 0.0 && rank.fract() == 0.0 && rank <= u32::MAX as f64) {
            return Err(KineticsError::InvalidInput(format!(
                "rank must be a non-negative integer, got {}",
                rank
            )));
        }
        let (Tmin, Tmax, A, n, alpha, E0) = (data[0], data[1], data[2], data[3], data[4], data[5]);
        let (A_factor, _) = parse_preexponential_units(&database_preexponential_units(numReactants))?;

        let defaults = KineticsBase::default();
        let base = KineticsBase::new(
            Tmin,
            Tmax,
            defaults.Pmin,
            defaults.Pmax,
            rank as u32,
            comment,
            numReactants,
        )?;
        Ok(ArrheniusEPModel::new(A * A_factor, n, E0 * KCAL, alpha).with_base(base))
    }
}

impl KineticsModel for ArrheniusEPModel {
    fn base(&self) -> &KineticsBase {
        &self.base
    }

    fn kinetics_type(&self) -> &'static str {
        "ArrheniusEP"
    }

    fn K_const(&self, T: f64, _P: Option<f64>, dHrxn: Option<f64>) -> Result<f64, KineticsError> {
        let dHrxn = dHrxn.ok_or(KineticsError::MissingParameter("dHrxn"))?;
        Ok(self.get_rate_constant(T, dHrxn))
    }

    fn to_record(&self) -> KineticsRecord {
        KineticsRecord::ArrheniusEP(ArrheniusEPRecord::from_model(self))
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["A", format!("{:e}", self.A)]);
        table.add_row(row!["n", format!("{}", self.n)]);
        table.add_row(row!["E0, kJ/mol", format!("{}", self.E0 / 1000.0)]);
        table.add_row(row!["alpha", format!("{}", self.alpha)]);
        table.add_row(row!["Tmin, K", format!("{}", self.base.Tmin)]);
        table.add_row(row!["Tmax, K", format!("{}", self.base.Tmax)]);
        table
    }
}

impl fmt::Display for ArrheniusEPModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k(T) = {} * T ** {} * exp(-({} + {} * DHrxn) / R / T)\t{} < T < {}",
            self.A, self.n, self.E0, self.alpha, self.base.Tmin, self.base.Tmax
        )?;
        if let (Some(family), Some(label)) = (&self.family, &self.label) {
            write!(f, "\nFrom {} Item {}", family, label)?;
        }
        if !self.base.comment.is_empty() {
            write!(f, "\nComment: {}", self.base.comment)?;
        }
        Ok(())
    }
}
