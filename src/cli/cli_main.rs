//! Fitting tasks read from JSON files.
//!
//! Task format:
//! ```json
//! {
//!   "model": "chebyshev",
//!   "Tlist": [300.0, 400.0, 500.0],
//!   "Plist": [1e3, 1e5],
//!   "K": [[1.0e3, 2.0e3], [1.5e3, 2.5e3], [2.0e3, 3.0e3]],
//!   "degreeT": 2,
//!   "degreeP": 2,
//!   "numReactants": 2,
//!   "comment": "fitted to RRKM results",
//!   "output": "fitted_kinetics.json"
//! }
//! ```
//! `model` is one of `arrhenius`, `pdeparrhenius`, `chebyshev`. `K` has one row
//! per temperature and one column per pressure (a single column for `arrhenius`,
//! which ignores `Plist`). Temperatures in K, pressures in Pa, k in SI units.
//! Chebyshev degrees not given in the task are taken from the settings.
use crate::Kinetics::arrhenius::ArrheniusModel;
use crate::Kinetics::chebyshev::ChebyshevModel;
use crate::Kinetics::kinetics_error::KineticsError;
use crate::Kinetics::kinetics_model::{Kinetics, KineticsModel};
use crate::Kinetics::pdep_arrhenius::PDepArrheniusModel;
use crate::settings::FitSettings;
use log::info;
use nalgebra::DMatrix;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Arrhenius,
    PDepArrhenius,
    Chebyshev,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Deserialize)]
pub struct FitTask {
    pub model: ModelKind,
    pub Tlist: Vec<f64>,
    #[serde(default)]
    pub Plist: Vec<f64>,
    pub K: Vec<Vec<f64>>,
    #[serde(default)]
    pub degreeT: Option<usize>,
    #[serde(default)]
    pub degreeP: Option<usize>,
    #[serde(default = "one_reactant")]
    pub numReactants: usize,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub output: Option<String>,
}

fn one_reactant() -> usize {
    1
}

impl FitTask {
    pub fn from_json(json: &str) -> Result<Self, KineticsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// rate coefficients as a matrix, rows per temperature
    fn k_matrix(&self, ncols: usize) -> Result<DMatrix<f64>, KineticsError> {
        if self.K.len() != self.Tlist.len() {
            return Err(KineticsError::InvalidInput(format!(
                "K has {} rows for {} temperatures",
                self.K.len(),
                self.Tlist.len()
            )));
        }
        if let Some(row) = self.K.iter().find(|row| row.len() != ncols) {
            return Err(KineticsError::InvalidInput(format!(
                "every row of K must have {} values, found a row with {}",
                ncols,
                row.len()
            )));
        }
        Ok(DMatrix::from_fn(self.K.len(), ncols, |i, j| self.K[i][j]))
    }
}

/// Fits the kinetics a task asks for.
pub fn run_task(task: &FitTask, settings: &FitSettings) -> Result<Kinetics, KineticsError> {
    if task.numReactants == 0 {
        return Err(KineticsError::InvalidInput(
            "numReactants must be positive".to_string(),
        ));
    }
    let kinetics: Kinetics = match task.model {
        ModelKind::Arrhenius => {
            let K = task.k_matrix(1)?;
            let Klist: Vec<f64> = K.iter().copied().collect();
            let model = ArrheniusModel::fit_to_data(&task.Tlist, &Klist)?;
            let base = model
                .base
                .clone()
                .with_num_reactants(task.numReactants)
                .with_comment(&task.comment);
            model.with_base(base).into()
        }
        ModelKind::PDepArrhenius => {
            let K = task.k_matrix(task.Plist.len())?;
            let model = PDepArrheniusModel::fit_to_data(&task.Tlist, &task.Plist, &K)?;
            let base = model
                .base
                .clone()
                .with_num_reactants(task.numReactants)
                .with_comment(&task.comment);
            model.with_base(base).into()
        }
        ModelKind::Chebyshev => {
            let degreeT = task.degreeT.unwrap_or(settings.chebyshev_degree_T);
            let degreeP = task.degreeP.unwrap_or(settings.chebyshev_degree_P);
            let K = task.k_matrix(task.Plist.len())?;
            let model = ChebyshevModel::fit_to_data(&task.Tlist, &task.Plist, &K, degreeT, degreeP)?;
            let base = model
                .base
                .clone()
                .with_num_reactants(task.numReactants)
                .with_comment(&task.comment);
            model.with_base(base)?.into()
        }
    };
    info!("{} kinetics fitted", kinetics.kinetics_type());
    Ok(kinetics)
}

fn print_usage() {
    println!("\x1b[34mKiRate: fitting of rate coefficient models\x1b[0m");
    println!("\x1b[33musage: KiRate <task.json> [config.json]\x1b[0m");
}

/// Entry point of the command line: `args` are the process arguments,
/// `args[1]` is the task file.
pub fn run_cli(args: &[String], settings: &FitSettings) -> Result<Kinetics, KineticsError> {
    let Some(task_file) = args.get(1) else {
        print_usage();
        return Err(KineticsError::InvalidInput(
            "no task file given".to_string(),
        ));
    };
    let content = fs::read_to_string(task_file)?;
    let task = FitTask::from_json(&content)?;
    info!("task {} loaded: {:?} fit", task_file, task.model);

    let kinetics = run_task(&task, settings)?;
    kinetics.pretty_print();
    if let Some(output) = &task.output {
        kinetics.save_to_file(output)?;
    }
    Ok(kinetics)
}
