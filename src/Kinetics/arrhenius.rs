/////////////////////////ELEMENTARY KINETICS///////////////////////////////////////////////////////////////
// Modified Arrhenius kinetics, the simplest form of a kinetic constant:
// k(T) = A*T^n*exp(-Ea/(R*T))
use super::kinetics_error::KineticsError;
use super::kinetics_model::{KineticsBase, KineticsModel};
use super::kinetics_record::{ArrheniusRecord, KineticsRecord};
use super::least_squares::{residual, solve_least_squares};
use super::units::R;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Table, row};
use std::fmt;

/// Modified Arrhenius expression
/// k(T) = A T^n exp(-Ea / (R T))
/// `A` - preexponential factor in s^-1, m^3/(mol*s), etc. depending on `numReactants`
/// `n` - temperature exponent
/// `Ea` - activation energy in J/mol
#[derive(Debug, Clone, PartialEq)]
pub struct ArrheniusModel {
    pub A: f64,
    pub n: f64,
    pub Ea: f64,
    pub base: KineticsBase,
}

impl Default for ArrheniusModel {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl ArrheniusModel {
    pub fn new(A: f64, n: f64, Ea: f64) -> Self {
        Self {
            A,
            n,
            Ea,
            base: KineticsBase::default(),
        }
    }

    pub fn with_base(mut self, base: KineticsBase) -> Self {
        self.base = base;
        self
    }

    /// k(T) at temperature `T` in K. Evaluation outside [Tmin, Tmax] is allowed,
    /// guarding the range is up to the caller.
    pub fn get_rate_constant(&self, T: f64) -> f64 {
        self.A * T.powf(self.n) * f64::exp(-self.Ea / (R * T))
    }

    /// Kinetics of the reverse reaction for a reaction with enthalpy of
    /// reaction `dHrxn` (J/mol) and equilibrium constant `Keq`, both defined in
    /// the direction of these kinetics and taken at temperature `T`.
    ///
    /// Only exact at `T`: the temperature exponent is carried over from the
    /// forward direction unchanged.
    pub fn get_reverse(&self, dHrxn: f64, Keq: f64, T: f64) -> ArrheniusModel {
        let mut base = KineticsBase::default();
        base.Tmin = self.base.Tmin;
        base.Tmax = self.base.Tmax;
        base.rank = self.base.rank;
        base.comment = self.base.comment.clone();
        ArrheniusModel {
            A: self.A / Keq * f64::exp(-dHrxn / (R * T)),
            n: self.n,
            Ea: self.Ea - dHrxn,
            base,
        }
    }

    /// Fit modified Arrhenius parameters to rate coefficients `Klist`
    /// measured at temperatures `Tlist` (K).
    ///
    /// The fit is done in three linear stages instead of one joint fit of
    /// (ln A, n, Ea), whose columns are nearly collinear over usual temperature ranges:
    /// 1) ln k = ln A - Ea/(R T) ignoring T^n, giving A0 and Ea0;
    /// 2) the part of ln k and ln T explained by stage 1 is removed and n is
    ///    the slope of the remaining ln k against the remaining ln T;
    /// 3) ln k - n ln T = ln A - Ea/(R T) with n fixed gives the final A and Ea.
    ///
    /// The returned model is valid over [min(Tlist), max(Tlist)].
    pub fn fit_to_data(Tlist: &[f64], Klist: &[f64]) -> Result<Self, KineticsError> {
        validate_fit_data(Tlist, Klist)?;
        let N = Tlist.len();

        let x = DMatrix::from_fn(N, 2, |i, j| {
            if j == 0 { 1.0 } else { -1.0 / (R * Tlist[i]) }
        });
        let lnK = DVector::from_iterator(N, Klist.iter().map(|k| k.ln()));
        let lnT = DVector::from_iterator(N, Tlist.iter().map(|T| T.ln()));

        // Stage 1: plain Arrhenius fit
        let beta0 = solve_least_squares(&x, &lnK)?;
        debug!(
            "Arrhenius fit, stage 1: A0 = {:e}, Ea0 = {} J/mol",
            beta0[0].exp(),
            beta0[1]
        );

        // Stage 2: temperature exponent from what stage 1 leaves unexplained
        let lnK_rest = residual(&x, &lnK, &beta0);
        let gamma = solve_least_squares(&x, &lnT)?;
        let lnT_rest = residual(&x, &lnT, &gamma);
        let denom = lnT_rest.dot(&lnT_rest);
        let n = if denom > 1e-20 * lnT.dot(&lnT) {
            lnT_rest.dot(&lnK_rest) / denom
        } else {
            warn!(
                "Arrhenius fit: temperature exponent undetermined by {} points, n fixed to 0",
                N
            );
            0.0
        };
        debug!("Arrhenius fit, stage 2: n = {}", n);

        // Stage 3: re-fit A and Ea with n fixed
        let y = &lnK - &lnT * n;
        let beta = solve_least_squares(&x, &y)?;
        let A = beta[0].exp();
        let Ea = beta[1];
        info!(
            "Arrhenius fit to {} points: A = {:e}, n = {}, Ea = {} J/mol",
            N, A, n, Ea
        );

        let (Tmin, Tmax) = min_max(Tlist);
        Ok(ArrheniusModel::new(A, n, Ea)
            .with_base(KineticsBase::default().with_temperature_range(Tmin, Tmax)))
    }
}

/// checks shared by every temperature-series fit
pub(crate) fn validate_fit_data(Tlist: &[f64], Klist: &[f64]) -> Result<(), KineticsError> {
    if Tlist.len() != Klist.len() {
        return Err(KineticsError::InvalidInput(format!(
            "{} temperatures but {} rate coefficients",
            Tlist.len(),
            Klist.len()
        )));
    }
    if Tlist.len() < 2 {
        return Err(KineticsError::InvalidInput(format!(
            "at least 2 data points are needed, got {}",
            Tlist.len()
        )));
    }
    if let Some(T) = Tlist.iter().find(|T| !(T.is_finite() && **T > 0.0)) {
        return Err(KineticsError::InvalidInput(format!(
            "temperatures must be positive, got {} K",
            T
        )));
    }
    if let Some(k) = Klist.iter().find(|k| !(k.is_finite() && **k > 0.0)) {
        return Err(KineticsError::InvalidInput(format!(
            "rate coefficients must be positive, got {}",
            k
        )));
    }
    let (Tmin, Tmax) = min_max(Tlist);
    if Tmin == Tmax {
        return Err(KineticsError::InvalidInput(
            "at least 2 distinct temperatures are needed".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

impl KineticsModel for ArrheniusModel {
    fn base(&self) -> &KineticsBase {
        &self.base
    }

    fn kinetics_type(&self) -> &'static str {
        "ArrheniusModel"
    }

    fn K_const(&self, T: f64, _P: Option<f64>, _dHrxn: Option<f64>) -> Result<f64, KineticsError> {
        Ok(self.get_rate_constant(T))
    }

    fn to_record(&self) -> KineticsRecord {
        KineticsRecord::ArrheniusModel(ArrheniusRecord::from_model(self))
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["A", format!("{:e}", self.A)]);
        table.add_row(row!["n", format!("{}", self.n)]);
        table.add_row(row!["Ea, kJ/mol", format!("{}", self.Ea / 1000.0)]);
        table.add_row(row!["Tmin, K", format!("{}", self.base.Tmin)]);
        table.add_row(row!["Tmax, K", format!("{}", self.base.Tmax)]);
        table
    }
}

impl fmt::Display for ArrheniusModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k(T) = {} * T ** {} * exp(-{} / R / T)\t{} < T < {}",
            self.A, self.n, self.Ea, self.base.Tmin, self.base.Tmax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn temperatures() -> Vec<f64> {
        (3..=20).map(|i| i as f64 * 100.0).collect()
    }

    #[test]
    fn test_rate_constant() {
        let arrh = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
        let T = 298.0;
        let expected = 1.0e6 * 298.0 * f64::exp(-10000.0 / (8.314472 * 298.0));
        assert_relative_eq!(arrh.get_rate_constant(T), expected, max_relative = 1e-14);
        assert_relative_eq!(
            arrh.K_const(T, Some(1e5), None).unwrap(),
            expected,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_rate_constant_ignores_range() {
        let arrh = ArrheniusModel::new(1.0e6, 1.0, 10000.0)
            .with_base(KineticsBase::default().with_temperature_range(300.0, 2000.0));
        assert!(!arrh.is_temperature_in_range(5000.0));
        assert!(arrh.get_rate_constant(5000.0) > 0.0);
    }

    #[test]
    fn test_fit_to_data() {
        let arrh0 = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
        let Tlist = temperatures();
        let Klist: Vec<f64> = Tlist.iter().map(|&T| arrh0.get_rate_constant(T)).collect();

        let arrh = ArrheniusModel::fit_to_data(&Tlist, &Klist).unwrap();
        assert_relative_eq!(arrh.A, arrh0.A, max_relative = 1e-6);
        assert_relative_eq!(arrh.n, arrh0.n, max_relative = 1e-6);
        assert_relative_eq!(arrh.Ea, arrh0.Ea, max_relative = 1e-6);
        assert_eq!(arrh.base.Tmin, 300.0);
        assert_eq!(arrh.base.Tmax, 2000.0);
    }

    #[test]
    fn test_fit_to_data_negative_exponent() {
        let arrh0 = ArrheniusModel::new(3.2e13, -0.75, 45000.0);
        let Tlist = vec![300.0, 450.0, 700.0, 1000.0, 1500.0, 2000.0];
        let Klist: Vec<f64> = Tlist.iter().map(|&T| arrh0.get_rate_constant(T)).collect();

        let arrh = ArrheniusModel::fit_to_data(&Tlist, &Klist).unwrap();
        assert_relative_eq!(arrh.A, arrh0.A, max_relative = 1e-6);
        assert_relative_eq!(arrh.n, arrh0.n, max_relative = 1e-6);
        assert_relative_eq!(arrh.Ea, arrh0.Ea, max_relative = 1e-6);
    }

    #[test]
    fn test_fit_with_two_points_is_plain_arrhenius() {
        let arrh0 = ArrheniusModel::new(1.0e10, 0.0, 50000.0);
        let Tlist = vec![500.0, 1000.0];
        let Klist: Vec<f64> = Tlist.iter().map(|&T| arrh0.get_rate_constant(T)).collect();
        let arrh = ArrheniusModel::fit_to_data(&Tlist, &Klist).unwrap();
        assert_eq!(arrh.n, 0.0);
        assert_relative_eq!(arrh.A, arrh0.A, max_relative = 1e-8);
        assert_relative_eq!(arrh.Ea, arrh0.Ea, max_relative = 1e-8);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let Tlist = vec![300.0, 400.0, 500.0];
        assert!(matches!(
            ArrheniusModel::fit_to_data(&Tlist, &[1.0, 2.0]),
            Err(KineticsError::InvalidInput(_))
        ));
        assert!(matches!(
            ArrheniusModel::fit_to_data(&Tlist, &[1.0, 0.0, 2.0]),
            Err(KineticsError::InvalidInput(_))
        ));
        assert!(matches!(
            ArrheniusModel::fit_to_data(&Tlist, &[1.0, -1.0, 2.0]),
            Err(KineticsError::InvalidInput(_))
        ));
        assert!(matches!(
            ArrheniusModel::fit_to_data(&[300.0], &[1.0]),
            Err(KineticsError::InvalidInput(_))
        ));
        assert!(matches!(
            ArrheniusModel::fit_to_data(&[300.0, 300.0, 300.0], &[1.0, 1.0, 1.0]),
            Err(KineticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_get_reverse() {
        let base = KineticsBase::new(300.0, 2000.0, 1e3, 1e5, 2, "forward", 2).unwrap();
        let fwd = ArrheniusModel::new(1.0e6, 1.0, 80000.0).with_base(base);
        let (dHrxn, Keq, T) = (-30000.0, 25.0, 1000.0);
        let rev = fwd.get_reverse(dHrxn, Keq, T);

        assert_eq!(rev.n, fwd.n);
        assert_relative_eq!(rev.Ea, 110000.0, max_relative = 1e-14);
        assert_relative_eq!(
            rev.A,
            1.0e6 / 25.0 * f64::exp(30000.0 / (R * 1000.0)),
            max_relative = 1e-14
        );
        assert_eq!(rev.base.Tmin, 300.0);
        assert_eq!(rev.base.Tmax, 2000.0);
        assert_eq!(rev.base.rank, 2);
        assert_eq!(rev.base.comment, "forward");
        // at the reference temperature k_rev = k_fwd / Keq exactly
        assert_relative_eq!(
            rev.get_rate_constant(T),
            fwd.get_rate_constant(T) / Keq,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_display() {
        let arrh = ArrheniusModel::new(1.0e6, 1.0, 10000.0)
            .with_base(KineticsBase::default().with_temperature_range(300.0, 2000.0));
        assert_eq!(
            arrh.to_string(),
            "k(T) = 1000000 * T ** 1 * exp(-10000 / R / T)\t300 < T < 2000"
        );
    }

    #[test]
    fn test_K_const_for_T_range() {
        let arrh = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
        let values = arrh.K_const_for_T_range(300.0, 2000.0, 18, None, None).unwrap();
        assert_eq!(values.len(), 18);
        assert_relative_eq!(values[0], arrh.get_rate_constant(300.0), max_relative = 1e-14);
        assert_relative_eq!(values[17], arrh.get_rate_constant(2000.0), max_relative = 1e-12);
    }
}
