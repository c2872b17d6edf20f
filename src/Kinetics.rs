/// errors of construction, fitting, evaluation and (de)serialization of kinetics models
pub mod kinetics_error;
/// physical constants and unit conversions between display units and SI
pub mod units;
/// SVD-based linear least squares used by every fitting routine
pub mod least_squares;
/// eng
/// Common part of all rate coefficient models: validity range, confidence rank and provenance
/// (KineticsBase), the capability trait every model implements (KineticsModel) and the enum
/// over all models (Kinetics) that dispatches calls to the concrete model
pub mod kinetics_model;
/// eng
/// Modified Arrhenius kinetics k(T) = A*T^n*exp(-Ea/(R*T)).
/// Evaluation, approximate reverse kinetics and a staged least-squares fit to k(T) data
/// # Examples
/// ```
/// use KiRate::Kinetics::arrhenius::ArrheniusModel;
/// let arrh = ArrheniusModel::new(1.0e6, 1.0, 10000.0);
/// let Tlist: Vec<f64> = (3..=20).map(|i| i as f64 * 100.0).collect();
/// let Klist: Vec<f64> = Tlist.iter().map(|&T| arrh.get_rate_constant(T)).collect();
/// let fitted = ArrheniusModel::fit_to_data(&Tlist, &Klist).unwrap();
/// assert!((fitted.Ea - 10000.0).abs() < 1e-3);
/// ```
pub mod arrhenius;
/// eng
/// Arrhenius kinetics with Evans-Polanyi correction: the activation energy depends linearly
/// on the enthalpy of reaction, Ea = E0 + alpha*dHrxn. Can be read from 11-number database
/// records in cm/kcal units
pub mod arrhenius_ep;
/// eng
/// Pressure-dependent kinetics given as Arrhenius expressions at a set of pressures,
/// interpolated on a logarithmic pressure scale. Evaluation outside the stored pressures fails
pub mod pdep_arrhenius;
/// eng
/// Two-dimensional Chebyshev polynomial kinetics in reduced inverse temperature and reduced
/// log pressure, with a joint least-squares fit of all coefficients to k(T, P) data
/// # Examples
/// ```
/// use KiRate::Kinetics::chebyshev::ChebyshevModel;
/// use nalgebra::DMatrix;
/// let coeffs = DMatrix::from_row_slice(2, 2, &[10.0, 0.1, -0.5, 0.01]);
/// let cheb = ChebyshevModel::new(coeffs, 300.0, 2000.0, 1e3, 1e7).unwrap();
/// let k = cheb.get_rate_constant(1000.0, 1e5);
/// assert!(k > 0.0);
/// ```
pub mod chebyshev;
/// JSON records of kinetics models in display units, and saving/loading of models
pub mod kinetics_record;
