/////////////////////////CHEBYSHEV POLYNOMIAL KINETICS///////////////////////////////////////////////////////////////
// log10 k(T, P) = sum_t sum_p coeffs[t, p] * T_t(T~) * T_p(P~)
// T~ is the reduced inverse temperature and P~ the reduced log pressure, both
// mapping the validity box [Tmin, Tmax] x [Pmin, Pmax] onto [-1, 1] x [-1, 1].
use super::arrhenius::min_max;
use super::kinetics_error::KineticsError;
use super::kinetics_model::{KineticsBase, KineticsModel};
use super::kinetics_record::{ChebyshevRecord, KineticsRecord};
use super::least_squares::solve_least_squares;
use log::info;
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};

/// Chebyshev polynomial kinetics.
/// `coeffs` - `degreeT x degreeP` matrix of dimensionless coefficients, rows are
/// the inverse temperature terms and columns the log pressure terms
///
/// Unlike the other models the range in `base` is load-bearing: it defines
/// the reduced variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevModel {
    pub coeffs: DMatrix<f64>,
    pub base: KineticsBase,
}

/// Chebyshev polynomial of the first kind of degree `n`.
///
/// Evaluated with the three-term recurrence, which agrees with cos(n acos x)
/// on [-1, 1] and stays finite (the cosh branch) outside it.
pub fn chebyshev(n: usize, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let (mut T0, mut T1) = (1.0, x);
            for _ in 1..n {
                let T2 = 2.0 * x * T1 - T0;
                T0 = T1;
                T1 = T2;
            }
            T1
        }
    }
}

impl ChebyshevModel {
    /// Model with the given coefficients valid on `[Tmin, Tmax] x [Pmin, Pmax]` (K, Pa).
    pub fn new(
        coeffs: DMatrix<f64>,
        Tmin: f64,
        Tmax: f64,
        Pmin: f64,
        Pmax: f64,
    ) -> Result<Self, KineticsError> {
        if coeffs.is_empty() {
            return Err(KineticsError::InvalidInput(
                "Chebyshev coefficient matrix must not be empty".to_string(),
            ));
        }
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(KineticsError::InvalidInput(
                "Chebyshev coefficients must be finite".to_string(),
            ));
        }
        validate_box(Tmin, Tmax, Pmin, Pmax)?;
        Ok(Self {
            coeffs,
            base: KineticsBase::default()
                .with_temperature_range(Tmin, Tmax)
                .with_pressure_range(Pmin, Pmax),
        })
    }

    /// Replaces the base. The temperature and pressure ranges of `base` become
    /// the reduced-variable box, so they must satisfy the same checks as in `new`.
    pub fn with_base(mut self, base: KineticsBase) -> Result<Self, KineticsError> {
        validate_box(base.Tmin, base.Tmax, base.Pmin, base.Pmax)?;
        self.base = base;
        Ok(self)
    }

    /// number of terms in the inverse temperature direction
    pub fn degreeT(&self) -> usize {
        self.coeffs.nrows()
    }

    /// number of terms in the log pressure direction
    pub fn degreeP(&self) -> usize {
        self.coeffs.ncols()
    }

    /// reduced inverse temperature
    pub fn reduced_temperature(&self, T: f64) -> f64 {
        let (Tmin, Tmax) = (self.base.Tmin, self.base.Tmax);
        (2.0 / T - 1.0 / Tmin - 1.0 / Tmax) / (1.0 / Tmax - 1.0 / Tmin)
    }

    /// reduced log pressure
    pub fn reduced_pressure(&self, P: f64) -> f64 {
        let (Pmin, Pmax) = (self.base.Pmin, self.base.Pmax);
        (2.0 * P.log10() - Pmin.log10() - Pmax.log10()) / (Pmax.log10() - Pmin.log10())
    }

    /// k(T, P) at temperature `T` in K and pressure `P` in Pa.
    /// Points outside the validity box are extrapolated.
    pub fn get_rate_constant(&self, T: f64, P: f64) -> f64 {
        let Tred = self.reduced_temperature(T);
        let Pred = self.reduced_pressure(P);

        let mut logK = 0.0;
        // T_t(Tred) and T_p(Pred) advance by the recurrence alongside the sums
        let (degreeT, degreeP) = self.coeffs.shape();
        let (mut Tt_prev, mut Tt) = (0.0, 1.0);
        for t in 0..degreeT {
            let (mut Tp_prev, mut Tp) = (0.0, 1.0);
            for p in 0..degreeP {
                logK += self.coeffs[(t, p)] * Tt * Tp;
                let next = if p == 0 { Pred } else { 2.0 * Pred * Tp - Tp_prev };
                Tp_prev = Tp;
                Tp = next;
            }
            let next = if t == 0 { Tred } else { 2.0 * Tred * Tt - Tt_prev };
            Tt_prev = Tt;
            Tt = next;
        }
        10f64.powf(logK)
    }

    /// Fit `degreeT x degreeP` Chebyshev coefficients to the rate coefficients `K`
    /// (one row per temperature in `Tlist`, one column per pressure in `Plist`).
    /// All coefficients are found in one joint linear least-squares problem
    /// over log10 k. The validity box is set to the span of the data.
    pub fn fit_to_data(
        Tlist: &[f64],
        Plist: &[f64],
        K: &DMatrix<f64>,
        degreeT: usize,
        degreeP: usize,
    ) -> Result<Self, KineticsError> {
        let (nT, nP) = (Tlist.len(), Plist.len());
        if degreeT == 0 || degreeP == 0 {
            return Err(KineticsError::InvalidInput(format!(
                "Chebyshev degrees must be positive, got {} x {}",
                degreeT, degreeP
            )));
        }
        if nT * nP < degreeT * degreeP {
            return Err(KineticsError::InvalidInput(format!(
                "{} x {} data points cannot determine {} x {} coefficients",
                nT, nP, degreeT, degreeP
            )));
        }
        if K.shape() != (nT, nP) {
            return Err(KineticsError::InvalidInput(format!(
                "rate coefficient matrix is {}x{}, expected {}x{}",
                K.nrows(),
                K.ncols(),
                nT,
                nP
            )));
        }
        if let Some(T) = Tlist.iter().find(|T| !(T.is_finite() && **T > 0.0)) {
            return Err(KineticsError::InvalidInput(format!(
                "temperatures must be positive, got {} K",
                T
            )));
        }
        if let Some(P) = Plist.iter().find(|P| !(P.is_finite() && **P > 0.0)) {
            return Err(KineticsError::InvalidInput(format!(
                "pressures must be positive, got {} Pa",
                P
            )));
        }
        if let Some(k) = K.iter().find(|k| !(k.is_finite() && **k > 0.0)) {
            return Err(KineticsError::InvalidInput(format!(
                "rate coefficients must be positive, got {}",
                k
            )));
        }
        let (Tmin, Tmax) = min_max(Tlist);
        let (Pmin, Pmax) = min_max(Plist);
        validate_box(Tmin, Tmax, Pmin, Pmax)?;

        // the reduced maps only depend on the box, so an empty model gives them
        let mut model = Self::new(DMatrix::zeros(degreeT, degreeP), Tmin, Tmax, Pmin, Pmax)?;
        let Tred: Vec<f64> = Tlist.iter().map(|&T| model.reduced_temperature(T)).collect();
        let Pred: Vec<f64> = Plist.iter().map(|&P| model.reduced_pressure(P)).collect();

        let ncols = degreeT * degreeP;
        let mut A = DMatrix::zeros(nT * nP, ncols);
        let mut b = DVector::zeros(nT * nP);
        for t1 in 0..nT {
            for p1 in 0..nP {
                let row = p1 * nT + t1;
                for p2 in 0..degreeP {
                    for t2 in 0..degreeT {
                        A[(row, p2 * degreeT + t2)] = chebyshev(t2, Tred[t1]) * chebyshev(p2, Pred[p1]);
                    }
                }
                b[row] = K[(t1, p1)].log10();
            }
        }

        let x = solve_least_squares(&A, &b)?;
        model.coeffs = DMatrix::from_fn(degreeT, degreeP, |t2, p2| x[p2 * degreeT + t2]);
        info!(
            "Chebyshev fit of {} x {} coefficients to {} x {} points, {} < T < {} K, {} < P < {} Pa",
            degreeT, degreeP, nT, nP, Tmin, Tmax, Pmin, Pmax
        );
        Ok(model)
    }
}

fn validate_box(Tmin: f64, Tmax: f64, Pmin: f64, Pmax: f64) -> Result<(), KineticsError> {
    if !(Tmin > 0.0 && Tmin < Tmax && Tmax.is_finite()) {
        return Err(KineticsError::InvalidInput(format!(
            "Chebyshev kinetics need 0 < Tmin < Tmax, got {} and {} K",
            Tmin, Tmax
        )));
    }
    if !(Pmin > 0.0 && Pmin < Pmax && Pmax.is_finite()) {
        return Err(KineticsError::InvalidInput(format!(
            "Chebyshev kinetics need 0 < Pmin < Pmax, got {} and {} Pa",
            Pmin, Pmax
        )));
    }
    Ok(())
}

impl KineticsModel for ChebyshevModel {
    fn base(&self) -> &KineticsBase {
        &self.base
    }

    fn kinetics_type(&self) -> &'static str {
        "Chebyshev"
    }

    fn K_const(&self, T: f64, P: Option<f64>, _dHrxn: Option<f64>) -> Result<f64, KineticsError> {
        let P = P.ok_or(KineticsError::MissingParameter("P"))?;
        Ok(self.get_rate_constant(T, P))
    }

    fn to_record(&self) -> KineticsRecord {
        KineticsRecord::Chebyshev(ChebyshevRecord::from_model(self))
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("t \\ p")];
        header.extend((0..self.degreeP()).map(|p| Cell::new(&p.to_string())));
        table.add_row(Row::new(header));
        for t in 0..self.degreeT() {
            let mut cells = vec![Cell::new(&t.to_string())];
            cells.extend((0..self.degreeP()).map(|p| Cell::new(&format!("{:e}", self.coeffs[(t, p)]))));
            table.add_row(Row::new(cells));
        }
        table
    }
}
