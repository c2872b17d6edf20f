//! Physical constants and unit conversions used by the kinetics models.
//!
//! Internally every model works in SI: A in s^-1, m^3/(mol*s), m^6/(mol^2*s)...,
//! energies in J/mol, pressures in Pa, temperatures in K.
//! Records and databases use conventional display units; the functions below
//! return the factor that converts a value in the named units to SI.
use super::kinetics_error::KineticsError;
use regex::Regex;
use std::sync::LazyLock;

/// gas constant, J/(mol*K)
pub const R: f64 = 8.314472;
/// J per kcal (thermochemical calorie)
pub const KCAL: f64 = 4184.0;
/// Pa per bar
pub const BAR: f64 = 1.0e5;
/// Pa per standard atmosphere
pub const ATM: f64 = 101325.0;

/// Units of the preexponential factor in SI for a reaction with `numReactants` reactants.
pub fn preexponential_units(numReactants: usize) -> String {
    if numReactants <= 1 {
        "s^-1".to_string()
    } else {
        format!(
            "m^{}/(mol^{}*s)",
            (numReactants - 1) * 3,
            numReactants - 1
        )
    }
}

/// Units of the preexponential factor in a centimeter-based database for `numReactants` reactants.
pub fn database_preexponential_units(numReactants: usize) -> String {
    match numReactants {
        0 | 1 => "s^-1".to_string(),
        2 => "cm^3/(mol*s)".to_string(),
        _ => format!(
            "cm^{}/(mol^{}*s)",
            (numReactants - 1) * 3,
            numReactants - 1
        ),
    }
}

/// `m^a/(mol^b*s)` or `cm^a/(mol^b*s)`, the `^b` may be missing
static PREEXPONENTIAL_UNITS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(c?m)\^(\d+)/\(mol(?:\^(\d+))?\*s\)$"));

/// Parses preexponential units and returns `(factor to SI, reaction order)`.
///
/// Accepted forms: `s^-1`, `m^a/(mol^b*s)`, `cm^a/(mol^b*s)`, where `a = 3b`
/// and the exponent on `mol` may be omitted when it is 1.
pub fn parse_preexponential_units(units: &str) -> Result<(f64, usize), KineticsError> {
    let units = units.trim();
    if units == "s^-1" || units == "1/s" {
        return Ok((1.0, 1));
    }
    let re = PREEXPONENTIAL_UNITS
        .as_ref()
        .map_err(|e| KineticsError::InvalidInput(e.to_string()))?;
    let captures = re
        .captures(units)
        .ok_or_else(|| KineticsError::UnknownUnits(units.to_string()))?;

    let length_exponent: i32 = captures[2]
        .parse()
        .map_err(|_| KineticsError::UnknownUnits(units.to_string()))?;
    let mol_exponent: i32 = match captures.get(3) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| KineticsError::UnknownUnits(units.to_string()))?,
        None => 1,
    };
    if mol_exponent < 1 || length_exponent != 3 * mol_exponent {
        return Err(KineticsError::UnknownUnits(units.to_string()));
    }
    let factor = match &captures[1] {
        "cm" => 10f64.powi(-2 * length_exponent),
        _ => 1.0,
    };
    Ok((factor, mol_exponent as usize + 1))
}

/// Factor converting an energy per mole in `units` to J/mol.
pub fn energy_factor(units: &str) -> Result<f64, KineticsError> {
    match units.trim() {
        "J/mol" => Ok(1.0),
        "kJ/mol" => Ok(1000.0),
        "cal/mol" => Ok(KCAL / 1000.0),
        "kcal/mol" => Ok(KCAL),
        other => Err(KineticsError::UnknownUnits(other.to_string())),
    }
}

/// Factor converting a pressure in `units` to Pa.
pub fn pressure_factor(units: &str) -> Result<f64, KineticsError> {
    match units.trim() {
        "Pa" => Ok(1.0),
        "kPa" => Ok(1000.0),
        "bar" => Ok(BAR),
        "atm" => Ok(ATM),
        "torr" => Ok(ATM / 760.0),
        other => Err(KineticsError::UnknownUnits(other.to_string())),
    }
}

/// Only kelvin is accepted for temperatures.
pub fn temperature_factor(units: &str) -> Result<f64, KineticsError> {
    match units.trim() {
        "K" => Ok(1.0),
        other => Err(KineticsError::UnknownUnits(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preexponential_units_roundtrip() {
        assert_eq!(preexponential_units(1), "s^-1");
        assert_eq!(preexponential_units(2), "m^3/(mol^1*s)");
        assert_eq!(preexponential_units(3), "m^6/(mol^2*s)");
        for numReactants in 1..5 {
            let (factor, order) =
                parse_preexponential_units(&preexponential_units(numReactants)).unwrap();
            assert_eq!(factor, 1.0);
            assert_eq!(order, numReactants);
        }
    }

    #[test]
    fn test_database_units() {
        let (factor, order) = parse_preexponential_units(&database_preexponential_units(2)).unwrap();
        assert_relative_eq!(factor, 1.0e-6, max_relative = 1e-15);
        assert_eq!(order, 2);
        let (factor, order) = parse_preexponential_units(&database_preexponential_units(3)).unwrap();
        assert_relative_eq!(factor, 1.0e-12, max_relative = 1e-15);
        assert_eq!(order, 3);
    }

    #[test]
    fn test_units_pattern_compiled_once() {
        assert!(PREEXPONENTIAL_UNITS.is_ok());
        let first = PREEXPONENTIAL_UNITS.as_ref().unwrap() as *const Regex;
        for _ in 0..3 {
            assert_eq!(parse_preexponential_units("cm^6/(mol^2*s)").unwrap().1, 3);
        }
        let second = PREEXPONENTIAL_UNITS.as_ref().unwrap() as *const Regex;
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_units() {
        assert!(parse_preexponential_units("m^4/(mol^1*s)").is_err());
        assert!(parse_preexponential_units("furlongs").is_err());
        assert!(energy_factor("eV").is_err());
        assert!(pressure_factor("psi").is_err());
        assert!(temperature_factor("C").is_err());
    }

    #[test]
    fn test_energy_and_pressure_factors() {
        assert_eq!(energy_factor("kcal/mol").unwrap(), 4184.0);
        assert_eq!(energy_factor("kJ/mol").unwrap(), 1000.0);
        assert_eq!(pressure_factor("bar").unwrap(), 1.0e5);
        assert_relative_eq!(pressure_factor("torr").unwrap(), 133.322368, epsilon = 1e-6);
    }
}
