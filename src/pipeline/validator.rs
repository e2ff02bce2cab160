//! Structural validation of a parsed calibration set

use super::error::ValidationError;
use super::model::CalibrationSet;

/// Check presence and shape, reporting the first rule that fails
///
/// Values are not range checked; only emptiness and column lengths are.
pub fn check(set: &CalibrationSet) -> Result<(), ValidationError> {
    if set.cal_temperature.is_empty() {
        return Err(ValidationError::MissingField("calibration temperature"));
    }
    if set.creation_date.is_none() {
        return Err(ValidationError::MissingField("creation time"));
    }

    let columns: [(&'static str, &[f64]); 4] = [
        ("wavelength values", set.wavelength.as_slice()),
        ("nitrate extinction coefficients", set.extinction_nitrate.as_slice()),
        ("seawater extinction coefficients", set.extinction_seawater.as_slice()),
        ("deionized water reference values", set.deionized_reference.as_slice()),
    ];
    if let Some(&(name, _)) = columns.iter().find(|(_, values)| values.is_empty()) {
        return Err(ValidationError::MissingField(name));
    }

    let expected = set.wavelength.len();
    if columns.iter().any(|(_, values)| values.len() != expected) {
        return Err(ValidationError::LengthMismatch {
            wavelength: set.wavelength.len(),
            eno3: set.extinction_nitrate.len(),
            eswa: set.extinction_seawater.len(),
            di: set.deionized_reference.len(),
        });
    }

    Ok(())
}

/// True when the set is complete enough to encode
pub fn validate(set: &CalibrationSet) -> bool {
    check(set).is_ok()
}
