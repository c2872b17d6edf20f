use thiserror::Error;

/// Errors raised while constructing, fitting, evaluating or (de)serializing
/// rate coefficient models.
#[allow(non_snake_case)]
#[derive(Debug, Error)]
pub enum KineticsError {
    /// Fit data or construction arguments are malformed: mismatched lengths,
    /// non-positive rate coefficients, under-determined systems and so on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A pressure-dependent expression was evaluated outside its stored pressures.
    #[error(
        "attempted to evaluate pressure-dependent expression at invalid pressure {P} Pa; allowed range is {Pmin} to {Pmax} Pa"
    )]
    PressureOutOfRange { P: f64, Pmin: f64, Pmax: f64 },

    /// A database record has the wrong number of fields.
    #[error("invalid list of kinetic data: expected a list of {expected} numbers, instead got {got}")]
    InvalidRecordLength { expected: usize, got: usize },

    /// The least-squares design matrix is rank deficient.
    #[error("singular least-squares system: {0}")]
    SingularSystem(String),

    /// A uniform evaluation call lacks a quantity the model needs.
    #[error("missing parameter '{0}' required by this kinetics model")]
    MissingParameter(&'static str),

    #[error("unknown units '{0}'")]
    UnknownUnits(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
