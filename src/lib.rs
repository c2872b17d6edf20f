/// eng
/// Rate coefficient models of chemical kinetics: modified Arrhenius, Arrhenius with
/// Evans-Polanyi correction, pressure-dependent Arrhenius and Chebyshev polynomial kinetics.
/// Models are evaluated at (T) or (T, P), fitted to tabulated rate coefficients and
/// serialized to JSON
#[allow(non_snake_case)]
pub mod Kinetics;
/// command line front end: fitting tasks read from JSON files
pub mod cli;
/// persisted fitting settings
pub mod settings;
