//! # Serialized form of kinetics models
//!
//! Every model is written as a JSON object tagged by `"type"` with its
//! parameters in conventional display units:
//!
//! ```json
//! {
//!   "type": "ArrheniusModel",
//!   "validity": { "Tmin": {"value": 300.0, "units": "K"}, ... },
//!   "A": {"value": 1e6, "units": "s^-1"},
//!   "n": 1.0,
//!   "Ea": {"value": 10.0, "units": "kJ/mol"}
//! }
//! ```
//! Energies are written in kJ/mol and pressures in bar. On reading, any unit
//! known to the [`units`](super::units) module is accepted and converted to SI.
use super::arrhenius::ArrheniusModel;
use super::arrhenius_ep::ArrheniusEPModel;
use super::chebyshev::ChebyshevModel;
use super::kinetics_error::KineticsError;
use super::kinetics_model::{Kinetics, KineticsBase, KineticsModel};
use super::pdep_arrhenius::PDepArrheniusModel;
use super::units::{
    BAR, energy_factor, parse_preexponential_units, preexponential_units, pressure_factor,
    temperature_factor,
};
use log::info;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A value together with the units it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity<V = f64> {
    pub value: V,
    pub units: String,
}

impl<V> Quantity<V> {
    pub fn new(value: V, units: &str) -> Self {
        Self {
            value,
            units: units.to_string(),
        }
    }
}

/// Validity range, rank and provenance of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidityRecord {
    pub Tmin: Quantity,
    pub Tmax: Quantity,
    pub Pmin: Quantity,
    pub Pmax: Quantity,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub comment: String,
    pub numReactants: usize,
}

impl ValidityRecord {
    pub fn from_base(base: &KineticsBase) -> Self {
        Self {
            Tmin: Quantity::new(base.Tmin, "K"),
            Tmax: Quantity::new(base.Tmax, "K"),
            Pmin: Quantity::new(base.Pmin / BAR, "bar"),
            Pmax: Quantity::new(base.Pmax / BAR, "bar"),
            rank: base.rank,
            comment: base.comment.clone(),
            numReactants: base.numReactants,
        }
    }

    pub fn to_base(&self) -> Result<KineticsBase, KineticsError> {
        KineticsBase::new(
            self.Tmin.value * temperature_factor(&self.Tmin.units)?,
            self.Tmax.value * temperature_factor(&self.Tmax.units)?,
            self.Pmin.value * pressure_factor(&self.Pmin.units)?,
            self.Pmax.value * pressure_factor(&self.Pmax.units)?,
            self.rank,
            &self.comment,
            self.numReactants,
        )
    }
}

/// A written in the SI units implied by `numReactants`.
fn preexponential_quantity(A: f64, numReactants: usize) -> Quantity {
    Quantity::new(A, &preexponential_units(numReactants))
}

/// A in SI; the units must be consistent with `numReactants`.
fn preexponential_value(A: &Quantity, numReactants: usize) -> Result<f64, KineticsError> {
    let (factor, order) = parse_preexponential_units(&A.units)?;
    if order != numReactants {
        return Err(KineticsError::InvalidInput(format!(
            "preexponential units '{}' imply {} reactants, record says {}",
            A.units, order, numReactants
        )));
    }
    Ok(A.value * factor)
}

fn energy_value(E: &Quantity) -> Result<f64, KineticsError> {
    Ok(E.value * energy_factor(&E.units)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusRecord {
    pub validity: ValidityRecord,
    pub A: Quantity,
    pub n: f64,
    pub Ea: Quantity,
}

impl ArrheniusRecord {
    pub fn from_model(model: &ArrheniusModel) -> Self {
        Self::from_model_with_reactants(model, model.base.numReactants)
    }

    /// Record of an expression whose units are fixed by an enclosing model
    /// with `numReactants` reactants.
    pub fn from_model_with_reactants(model: &ArrheniusModel, numReactants: usize) -> Self {
        let mut validity = ValidityRecord::from_base(&model.base);
        validity.numReactants = numReactants;
        Self {
            validity,
            A: preexponential_quantity(model.A, numReactants),
            n: model.n,
            Ea: Quantity::new(model.Ea / 1000.0, "kJ/mol"),
        }
    }

    pub fn to_model(&self) -> Result<ArrheniusModel, KineticsError> {
        self.to_model_with_reactants(self.validity.numReactants)
    }

    /// Reads the expression with A checked against the enclosing model's `numReactants`.
    pub fn to_model_with_reactants(&self, numReactants: usize) -> Result<ArrheniusModel, KineticsError> {
        let mut validity = self.validity.clone();
        validity.numReactants = numReactants;
        let base = validity.to_base()?;
        let A = preexponential_value(&self.A, numReactants)?;
        let Ea = energy_value(&self.Ea)?;
        Ok(ArrheniusModel::new(A, self.n, Ea).with_base(base))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusEPRecord {
    pub validity: ValidityRecord,
    pub A: Quantity,
    pub n: f64,
    pub E0: Quantity,
    pub alpha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ArrheniusEPRecord {
    pub fn from_model(model: &ArrheniusEPModel) -> Self {
        Self {
            validity: ValidityRecord::from_base(&model.base),
            A: preexponential_quantity(model.A, model.base.numReactants),
            n: model.n,
            E0: Quantity::new(model.E0 / 1000.0, "kJ/mol"),
            alpha: model.alpha,
            family: model.family.clone(),
            label: model.label.clone(),
        }
    }

    pub fn to_model(&self) -> Result<ArrheniusEPModel, KineticsError> {
        let base = self.validity.to_base()?;
        let A = preexponential_value(&self.A, base.numReactants)?;
        let E0 = energy_value(&self.E0)?;
        let mut model = ArrheniusEPModel::new(A, self.n, E0, self.alpha).with_base(base);
        model.family = self.family.clone();
        model.label = self.label.clone();
        Ok(model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PDepArrheniusRecord {
    pub validity: ValidityRecord,
    pub pressures: Quantity<Vec<f64>>,
    pub arrhenius: Vec<ArrheniusRecord>,
}

impl PDepArrheniusRecord {
    pub fn from_model(model: &PDepArrheniusModel) -> Self {
        Self {
            validity: ValidityRecord::from_base(&model.base),
            pressures: Quantity::new(model.pressures.iter().map(|P| P / BAR).collect(), "bar"),
            arrhenius: model
                .arrhenius
                .iter()
                .map(|arrh| ArrheniusRecord::from_model_with_reactants(arrh, model.base.numReactants))
                .collect(),
        }
    }

    pub fn to_model(&self) -> Result<PDepArrheniusModel, KineticsError> {
        let base = self.validity.to_base()?;
        let factor = pressure_factor(&self.pressures.units)?;
        let pressures: Vec<f64> = self.pressures.value.iter().map(|P| P * factor).collect();
        let arrhenius = self
            .arrhenius
            .iter()
            .map(|arrh| arrh.to_model_with_reactants(base.numReactants))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PDepArrheniusModel::new(pressures, arrhenius)?.with_base(base))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChebyshevRecord {
    pub validity: ValidityRecord,
    pub degreeT: usize,
    pub degreeP: usize,
    /// one row per temperature term
    pub coeffs: Vec<Vec<f64>>,
}

impl ChebyshevRecord {
    pub fn from_model(model: &ChebyshevModel) -> Self {
        Self {
            validity: ValidityRecord::from_base(&model.base),
            degreeT: model.degreeT(),
            degreeP: model.degreeP(),
            coeffs: model
                .coeffs
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        }
    }

    pub fn to_model(&self) -> Result<ChebyshevModel, KineticsError> {
        if self.coeffs.len() != self.degreeT
            || self.coeffs.iter().any(|row| row.len() != self.degreeP)
        {
            return Err(KineticsError::InvalidInput(format!(
                "Chebyshev coefficients do not form a {} x {} matrix",
                self.degreeT, self.degreeP
            )));
        }
        let base = self.validity.to_base()?;
        let coeffs = DMatrix::from_fn(self.degreeT, self.degreeP, |t, p| self.coeffs[t][p]);
        ChebyshevModel::new(coeffs, base.Tmin, base.Tmax, base.Pmin, base.Pmax)?.with_base(base)
    }
}

/// Serialized kinetics of any type, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KineticsRecord {
    #[serde(rename = "ArrheniusModel")]
    ArrheniusModel(ArrheniusRecord),
    #[serde(rename = "ArrheniusEP")]
    ArrheniusEP(ArrheniusEPRecord),
    #[serde(rename = "pressure-dependent ArrheniusModel")]
    PDepArrhenius(PDepArrheniusRecord),
    #[serde(rename = "Chebyshev")]
    Chebyshev(ChebyshevRecord),
}

impl KineticsRecord {
    pub fn to_model(&self) -> Result<Kinetics, KineticsError> {
        Ok(match self {
            KineticsRecord::ArrheniusModel(r) => Kinetics::from(r.to_model()?),
            KineticsRecord::ArrheniusEP(r) => Kinetics::from(r.to_model()?),
            KineticsRecord::PDepArrhenius(r) => Kinetics::from(r.to_model()?),
            KineticsRecord::Chebyshev(r) => Kinetics::from(r.to_model()?),
        })
    }
}

impl TryFrom<KineticsRecord> for Kinetics {
    type Error = KineticsError;

    fn try_from(record: KineticsRecord) -> Result<Self, Self::Error> {
        record.to_model()
    }
}

impl Kinetics {
    pub fn to_json(&self) -> Result<String, KineticsError> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> Result<Self, KineticsError> {
        let record: KineticsRecord = serde_json::from_str(json)?;
        record.to_model()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), KineticsError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_record())?;
        writer.flush()?;
        info!(
            "{} kinetics saved to {}",
            self.kinetics_type(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, KineticsError> {
        let file = File::open(path.as_ref())?;
        let record: KineticsRecord = serde_json::from_reader(BufReader::new(file))?;
        let kinetics = record.to_model()?;
        info!(
            "{} kinetics loaded from {}",
            kinetics.kinetics_type(),
            path.as_ref().display()
        );
        Ok(kinetics)
    }
}
