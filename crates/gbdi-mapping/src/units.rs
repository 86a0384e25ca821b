//! Unit conversions
//!
//! Mass conversions go through kilograms as the pivot unit. Impact
//! intensities reported per year are scaled to the whole reference study
//! period before they enter a results map.

/// Mass units occurring in source exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Gram,
    Kilogram,
    Tonne,
    Pound,
}

impl MassUnit {
    /// Kilograms per one of this unit
    #[must_use]
    pub fn to_kg(self) -> f64 {
        match self {
            MassUnit::Gram => 0.001,
            MassUnit::Kilogram => 1.0,
            MassUnit::Tonne => 1000.0,
            MassUnit::Pound => 0.453_592_37,
        }
    }
}

/// Convert a mass value between units
#[must_use]
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    value * from.to_kg() / to.to_kg()
}

/// Reference study period applied to per-year intensities (years)
pub const REFERENCE_STUDY_PERIOD_YEARS: f64 = 50.0;

/// Scale a per-year value to a whole study period
#[must_use]
pub fn per_year_to_study_period(value: f64, years: f64) -> f64 {
    value * years
}
