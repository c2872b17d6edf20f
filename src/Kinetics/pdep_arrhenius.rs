/////////////////////////PRESSURE DEPENDENT KINETICS///////////////////////////////////////////////////////////////
// k(T, P) = A(P) T^n(P) exp(-Ea(P)/(R T)): modified Arrhenius parameters stored at
// a set of pressures and interpolated between them on a logarithmic scale.
use super::arrhenius::{ArrheniusModel, min_max};
use super::kinetics_error::KineticsError;
use super::kinetics_model::{KineticsBase, KineticsModel};
use super::kinetics_record::{KineticsRecord, PDepArrheniusRecord};
use log::info;
use nalgebra::DMatrix;
use prettytable::{Table, row};

/// Pressure-dependent Arrhenius kinetics
/// `pressures` - pressures in Pa
/// `arrhenius` - Arrhenius kinetics at each pressure, same order as `pressures`
#[derive(Debug, Clone, PartialEq)]
pub struct PDepArrheniusModel {
    pub pressures: Vec<f64>,
    pub arrhenius: Vec<ArrheniusModel>,
    pub base: KineticsBase,
}

impl PDepArrheniusModel {
    /// The validity pressure range is set to the span of `pressures`.
    pub fn new(pressures: Vec<f64>, arrhenius: Vec<ArrheniusModel>) -> Result<Self, KineticsError> {
        validate_pressures(&pressures)?;
        if pressures.len() != arrhenius.len() {
            return Err(KineticsError::InvalidInput(format!(
                "{} pressures but {} Arrhenius expressions",
                pressures.len(),
                arrhenius.len()
            )));
        }
        let (Pmin, Pmax) = min_max(&pressures);
        Ok(Self {
            pressures,
            arrhenius,
            base: KineticsBase::default().with_pressure_range(Pmin, Pmax),
        })
    }

    /// Replaces the base. `numReactants` is passed on to every stored expression,
    /// since it fixes the units of their preexponential factors.
    pub fn with_base(mut self, base: KineticsBase) -> Self {
        for arrh in self.arrhenius.iter_mut() {
            arrh.base.numReactants = base.numReactants;
        }
        self.base = base;
        self
    }

    /// Pressures and Arrhenius expressions that most closely bound the pressure `P` in Pa,
    /// as `(Plow, Phigh, low, high)`.
    /// An exact match returns the matching entry twice with `Plow == Phigh`.
    /// The bracket is found by value, so the stored order does not matter.
    pub fn get_adjacent_expressions(
        &self,
        P: f64,
    ) -> Result<(f64, f64, &ArrheniusModel, &ArrheniusModel), KineticsError> {
        let (Pmin, Pmax) = min_max(&self.pressures);
        if self.pressures.is_empty() || !(P >= Pmin && P <= Pmax) {
            return Err(KineticsError::PressureOutOfRange { P, Pmin, Pmax });
        }

        if let Some(i) = self.pressures.iter().position(|&p| p == P) {
            let arrh = &self.arrhenius[i];
            return Ok((P, P, arrh, arrh));
        }

        // greatest stored pressure below P and least stored pressure above P
        let mut ilow: Option<usize> = None;
        let mut ihigh: Option<usize> = None;
        for (i, &p) in self.pressures.iter().enumerate() {
            if p <= P && ilow.is_none_or(|j| p > self.pressures[j]) {
                ilow = Some(i);
            }
            if p > P && ihigh.is_none_or(|j| p < self.pressures[j]) {
                ihigh = Some(i);
            }
        }
        match (ilow, ihigh) {
            (Some(ilow), Some(ihigh)) => Ok((
                self.pressures[ilow],
                self.pressures[ihigh],
                &self.arrhenius[ilow],
                &self.arrhenius[ihigh],
            )),
            _ => Err(KineticsError::PressureOutOfRange { P, Pmin, Pmax }),
        }
    }

    /// k(T, P) at temperature `T` in K and pressure `P` in Pa.
    ///
    /// At a stored pressure this is exactly that entry's k(T). Between stored
    /// pressures k is interpolated as
    /// `10^( log10(P/Plow)/log10(Phigh/Plow) * ln(khigh/klow) )`,
    /// the mixed log10/ln form reference mechanisms were generated with.
    /// Pressures outside the stored ones are rejected.
    pub fn get_rate_constant(&self, T: f64, P: f64) -> Result<f64, KineticsError> {
        let (Plow, Phigh, low, high) = self.get_adjacent_expressions(P)?;
        if Plow == Phigh {
            return Ok(low.get_rate_constant(T));
        }
        let klow = low.get_rate_constant(T);
        let khigh = high.get_rate_constant(T);
        Ok(10f64.powf((P / Plow).log10() / (Phigh / Plow).log10() * (khigh / klow).ln()))
    }

    /// Arrhenius kinetics approximating this model at pressure `P` in Pa.
    /// A is interpolated on the same logarithmic scale as k, n and Ea linearly.
    pub fn get_arrhenius(&self, P: f64) -> Result<ArrheniusModel, KineticsError> {
        let (Plow, Phigh, low, high) = self.get_adjacent_expressions(P)?;
        if Plow == Phigh {
            return Ok(low.clone());
        }
        let logPRatio = (P / Plow).log10() / (Phigh / Plow).log10();
        let A = 10f64.powf(logPRatio * (high.A / low.A).ln());
        let n = low.n + (high.n - low.n) * logPRatio;
        let Ea = low.Ea + (high.Ea - low.Ea) * logPRatio;

        let base = KineticsBase::default()
            .with_temperature_range(self.base.Tmin, self.base.Tmax)
            .with_rank(self.base.rank)
            .with_num_reactants(self.base.numReactants)
            .with_comment(&format!("Interpolated at P = {} Pa", P));
        Ok(ArrheniusModel::new(A, n, Ea).with_base(base))
    }

    /// Fit independent Arrhenius kinetics at each pressure.
    /// `K` is a matrix of rate coefficients with one row per temperature in `Tlist` (K)
    /// and one column per pressure in `Plist` (Pa).
    /// Pressures are stored in the order given.
    pub fn fit_to_data(Tlist: &[f64], Plist: &[f64], K: &DMatrix<f64>) -> Result<Self, KineticsError> {
        validate_pressures(Plist)?;
        if K.nrows() != Tlist.len() || K.ncols() != Plist.len() {
            return Err(KineticsError::InvalidInput(format!(
                "rate coefficient matrix is {}x{}, expected {}x{}",
                K.nrows(),
                K.ncols(),
                Tlist.len(),
                Plist.len()
            )));
        }
        let arrhenius = K
            .column_iter()
            .map(|column| {
                let Klist: Vec<f64> = column.iter().copied().collect();
                ArrheniusModel::fit_to_data(Tlist, &Klist)
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "pressure-dependent Arrhenius fit at {} pressures",
            Plist.len()
        );

        let (Tmin, Tmax) = min_max(Tlist);
        let (Pmin, Pmax) = min_max(Plist);
        Ok(Self {
            pressures: Plist.to_vec(),
            arrhenius,
            base: KineticsBase::default()
                .with_temperature_range(Tmin, Tmax)
                .with_pressure_range(Pmin, Pmax),
        })
    }
}

fn validate_pressures(pressures: &[f64]) -> Result<(), KineticsError> {
    if pressures.is_empty() {
        return Err(KineticsError::InvalidInput(
            "at least one pressure is needed".to_string(),
        ));
    }
    if let Some(P) = pressures.iter().find(|P| !(P.is_finite() && **P > 0.0)) {
        return Err(KineticsError::InvalidInput(format!(
            "pressures must be positive, got {} Pa",
            P
        )));
    }
    for (i, P) in pressures.iter().enumerate() {
        if pressures[..i].contains(P) {
            return Err(KineticsError::InvalidInput(format!(
                "pressure {} Pa appears more than once",
                P
            )));
        }
    }
    Ok(())
}

impl KineticsModel for PDepArrheniusModel {
    fn base(&self) -> &KineticsBase {
        &self.base
    }

    fn kinetics_type(&self) -> &'static str {
        "pressure-dependent ArrheniusModel"
    }

    fn K_const(&self, T: f64, P: Option<f64>, _dHrxn: Option<f64>) -> Result<f64, KineticsError> {
        let P = P.ok_or(KineticsError::MissingParameter("P"))?;
        self.get_rate_constant(T, P)
    }

    fn to_record(&self) -> KineticsRecord {
        KineticsRecord::PDepArrhenius(PDepArrheniusRecord::from_model(self))
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["P, bar", "A", "n", "Ea, kJ/mol"]);
        for (P, arrh) in self.pressures.iter().zip(self.arrhenius.iter()) {
            table.add_row(row![
                format!("{}", P / 1.0e5),
                format!("{:e}", arrh.A),
                format!("{}", arrh.n),
                format!("{}", arrh.Ea / 1000.0)
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_pressure_model() -> PDepArrheniusModel {
        let arrh0 = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
        let arrh1 = ArrheniusModel::new(1.0e12, 0.0, 20000.0);
        PDepArrheniusModel::new(vec![1e3, 1e5], vec![arrh0, arrh1]).unwrap()
    }

    #[test]
    fn test_exact_pressure_short_circuit() {
        let model = two_pressure_model();
        for &T in &[300.0, 1000.0, 2000.0] {
            assert_eq!(
                model.get_rate_constant(T, 1e3).unwrap(),
                model.arrhenius[0].get_rate_constant(T)
            );
            assert_eq!(
                model.get_rate_constant(T, 1e5).unwrap(),
                model.arrhenius[1].get_rate_constant(T)
            );
        }
        assert_eq!(model.get_arrhenius(1e5).unwrap(), model.arrhenius[1]);
    }

    #[test]
    fn test_out_of_range_pressure_fails() {
        let model = two_pressure_model();
        assert!(matches!(
            model.get_rate_constant(1000.0, 999.0),
            Err(KineticsError::PressureOutOfRange { .. })
        ));
        assert!(matches!(
            model.get_rate_constant(1000.0, 1.0e5 + 1.0),
            Err(KineticsError::PressureOutOfRange { .. })
        ));
        assert!(model.get_arrhenius(1e6).is_err());
    }

    #[test]
    fn test_interpolation_between_pressures() {
        let model = two_pressure_model();
        let (T, P) = (1000.0, 1e4);
        let klow = model.arrhenius[0].get_rate_constant(T);
        let khigh = model.arrhenius[1].get_rate_constant(T);
        let expected = 10f64.powf((P / 1e3f64).log10() / (1e5f64 / 1e3).log10() * (khigh / klow).ln());
        assert_eq!(model.get_rate_constant(T, P).unwrap(), expected);
    }

    #[test]
    fn test_adjacent_expressions() {
        let pressures = vec![1e3, 1e4, 1e5, 1e6];
        let arrhenius: Vec<ArrheniusModel> = (0..4)
            .map(|i| ArrheniusModel::new(10f64.powi(i + 6), 0.0, 1000.0 * i as f64))
            .collect();
        let model = PDepArrheniusModel::new(pressures, arrhenius).unwrap();

        let (Plow, Phigh, low, high) = model.get_adjacent_expressions(3e4).unwrap();
        assert_eq!(Plow, 1e4);
        assert_eq!(Phigh, 1e5);
        assert_eq!(low, &model.arrhenius[1]);
        assert_eq!(high, &model.arrhenius[2]);

        let (Plow, Phigh, low, high) = model.get_adjacent_expressions(1e4).unwrap();
        assert_eq!(Plow, Phigh);
        assert_eq!(low, high);
        assert_eq!(low, &model.arrhenius[1]);
    }

    #[test]
    fn test_adjacent_expressions_unsorted() {
        let pressures = vec![1e5, 1e3, 1e4];
        let arrhenius = vec![
            ArrheniusModel::new(3.0, 0.0, 0.0),
            ArrheniusModel::new(1.0, 0.0, 0.0),
            ArrheniusModel::new(2.0, 0.0, 0.0),
        ];
        let model = PDepArrheniusModel::new(pressures, arrhenius).unwrap();
        let (Plow, Phigh, low, high) = model.get_adjacent_expressions(5e4).unwrap();
        assert_eq!((Plow, Phigh), (1e4, 1e5));
        assert_eq!((low.A, high.A), (2.0, 3.0));
    }

    #[test]
    fn test_get_arrhenius_interpolates_parameters() {
        let model = two_pressure_model();
        let P = 1e4;
        let arrh = model.get_arrhenius(P).unwrap();
        // halfway in log P
        assert_relative_eq!(arrh.n, 0.5, max_relative = 1e-12);
        assert_relative_eq!(arrh.Ea, 15000.0, max_relative = 1e-12);
        assert_relative_eq!(arrh.A, 10f64.powf(0.5 * (1.0e6f64).ln()), max_relative = 1e-12);
    }

    #[test]
    fn test_fit_to_data() {
        let (P0, P1) = (1e3, 1e5);
        let arrh0 = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
        let arrh1 = ArrheniusModel::new(1.0e12, 0.0, 20000.0);
        let Tlist: Vec<f64> = (3..=20).map(|i| i as f64 * 100.0).collect();
        let K = DMatrix::from_fn(Tlist.len(), 2, |i, j| {
            if j == 0 {
                arrh0.get_rate_constant(Tlist[i])
            } else {
                arrh1.get_rate_constant(Tlist[i])
            }
        });

        let model = PDepArrheniusModel::fit_to_data(&Tlist, &[P0, P1], &K).unwrap();
        assert_eq!(model.pressures, vec![P0, P1]);
        assert_eq!(model.arrhenius.len(), 2);
        assert_relative_eq!(model.arrhenius[0].A, arrh0.A, max_relative = 1e-6);
        assert_relative_eq!(model.arrhenius[0].n, arrh0.n, max_relative = 1e-6);
        assert_relative_eq!(model.arrhenius[0].Ea, arrh0.Ea, max_relative = 1e-6);
        assert_relative_eq!(model.arrhenius[1].A, arrh1.A, max_relative = 1e-6);
        assert_relative_eq!(model.arrhenius[1].n, arrh1.n, epsilon = 1e-6);
        assert_relative_eq!(model.arrhenius[1].Ea, arrh1.Ea, max_relative = 1e-6);
        assert_eq!(model.base.Pmin, P0);
        assert_eq!(model.base.Pmax, P1);

        for &T in &Tlist {
            assert_relative_eq!(
                model.get_rate_constant(T, P0).unwrap(),
                arrh0.get_rate_constant(T),
                max_relative = 1e-6
            );
            assert_relative_eq!(
                model.get_rate_constant(T, P1).unwrap(),
                arrh1.get_rate_constant(T),
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_fit_rejects_bad_shapes() {
        let Tlist = vec![300.0, 600.0, 900.0];
        let K = DMatrix::from_element(3, 2, 1.0);
        assert!(PDepArrheniusModel::fit_to_data(&Tlist, &[1e3, 1e4, 1e5], &K).is_err());
        assert!(PDepArrheniusModel::fit_to_data(&Tlist, &[1e3, 1e3], &K).is_err());
        assert!(PDepArrheniusModel::fit_to_data(&Tlist, &[], &DMatrix::zeros(3, 0)).is_err());
        let mut bad = K.clone();
        bad[(1, 1)] = -1.0;
        assert!(matches!(
            PDepArrheniusModel::fit_to_data(&Tlist, &[1e3, 1e4], &bad),
            Err(KineticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_with_base_sets_num_reactants_of_expressions() {
        let model = two_pressure_model().with_base(
            KineticsBase::default()
                .with_pressure_range(1e3, 1e5)
                .with_num_reactants(2),
        );
        assert_eq!(model.base.numReactants, 2);
        assert!(model.arrhenius.iter().all(|a| a.base.numReactants == 2));
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        assert!(PDepArrheniusModel::new(vec![1e3, 1e5], vec![ArrheniusModel::default()]).is_err());
        assert!(PDepArrheniusModel::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_K_const_requires_pressure() {
        let model = two_pressure_model();
        assert!(matches!(
            model.K_const(1000.0, None, None),
            Err(KineticsError::MissingParameter("P"))
        ));
    }
}
