use crate::error::ConfigError;
use crate::variable::LinguisticVariable;

use super::diseases::DISEASES;

/// Input variable names in declaration order.
pub const INPUT_NAMES: [&str; 9] = [
    "Temp",
    "RH",
    "Rain",
    "LeafWet",
    "SoilM",
    "Drain",
    "SeedHealth",
    "Vector",
    "Stage",
];

/// The nine input variables.
///
/// # Errors
///
/// Only fails if a built-in table is inconsistent.
pub fn input_variables() -> Result<Vec<LinguisticVariable>, ConfigError> {
    Ok(vec![
        // Temperature, °C
        LinguisticVariable::triangular(
            "Temp",
            (10.0, 40.0, 0.1),
            &[
                ("Low", [10.0, 10.0, 20.0]),
                ("Moderate", [18.0, 24.0, 30.0]),
                ("High", [28.0, 40.0, 40.0]),
            ],
        )?,
        // Relative humidity, %
        LinguisticVariable::triangular(
            "RH",
            (10.0, 100.0, 0.1),
            &[
                ("Low", [10.0, 10.0, 45.0]),
                ("Moderate", [40.0, 60.0, 80.0]),
                ("High", [75.0, 100.0, 100.0]),
            ],
        )?,
        // Rainfall, mm
        LinguisticVariable::triangular(
            "Rain",
            (0.0, 200.0, 0.1),
            &[
                ("None", [0.0, 0.0, 10.0]),
                ("Low", [5.0, 25.0, 50.0]),
                ("High", [40.0, 100.0, 200.0]),
            ],
        )?,
        // Leaf wetness duration, hours/day
        LinguisticVariable::triangular(
            "LeafWet",
            (0.0, 24.0, 0.1),
            &[
                ("Short", [0.0, 0.0, 6.0]),
                ("Medium", [4.0, 10.0, 16.0]),
                ("Long", [12.0, 24.0, 24.0]),
            ],
        )?,
        // Soil moisture, %
        LinguisticVariable::triangular(
            "SoilM",
            (0.0, 100.0, 0.1),
            &[
                ("Dry", [0.0, 0.0, 30.0]),
                ("Opt", [20.0, 45.0, 65.0]),
                ("Wet", [55.0, 100.0, 100.0]),
            ],
        )?,
        LinguisticVariable::triangular(
            "Drain",
            (0.0, 10.0, 0.1),
            &[
                ("Poor", [0.0, 0.0, 3.0]),
                ("Moderate", [2.5, 5.0, 7.5]),
                ("Good", [7.0, 10.0, 10.0]),
            ],
        )?,
        LinguisticVariable::triangular(
            "SeedHealth",
            (0.0, 10.0, 0.1),
            &[
                ("Poor", [0.0, 0.0, 3.0]),
                ("Fair", [2.5, 5.0, 7.5]),
                ("Good", [7.0, 10.0, 10.0]),
            ],
        )?,
        LinguisticVariable::triangular(
            "Vector",
            (0.0, 10.0, 0.1),
            &[
                ("None", [0.0, 0.0, 2.0]),
                ("Moderate", [1.5, 5.0, 8.5]),
                ("High", [7.5, 10.0, 10.0]),
            ],
        )?,
        // Seedling=0, Vegetative=1, Flowering=2, Fruiting=3
        LinguisticVariable::triangular(
            "Stage",
            (0.0, 3.0, 0.1),
            &[
                ("Seedling", [0.0, 0.0, 0.5]),
                ("Vegetative", [0.5, 1.0, 1.5]),
                ("Flowering", [1.5, 2.0, 2.5]),
                ("Fruiting", [2.5, 3.0, 3.0]),
            ],
        )?,
    ])
}

/// One risk output per disease, all sharing the same `[0, 1]` terms.
///
/// # Errors
///
/// Only fails if a built-in table is inconsistent.
pub fn output_variables() -> Result<Vec<LinguisticVariable>, ConfigError> {
    DISEASES
        .iter()
        .map(|disease| {
            LinguisticVariable::triangular(
                *disease,
                (0.0, 1.0, 0.01),
                &[
                    ("Low", [0.0, 0.0, 0.4]),
                    ("Moderate", [0.25, 0.5, 0.75]),
                    ("High", [0.6, 1.0, 1.0]),
                ],
            )
        })
        .collect()
}
