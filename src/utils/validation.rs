//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{Datelike, NaiveDate, Utc};
use validator::ValidationError;

/// Validar y convertir string a fecha de calendario
///
/// Acepta `YYYY-MM-DD` y también timestamps RFC3339 del almacén externo,
/// de los que se toma la parte de fecha.
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Validar que una fecha de recogida no esté en el pasado
pub fn validate_future_date(date: NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if date < today {
        let mut error = ValidationError::new("past_date");
        error.add_param("value".into(), &date.to_string());
        error.add_param("today".into(), &today.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un año de fabricación sea un año de 4 cifras plausible
pub fn validate_plausible_year(year: i32) -> Result<(), ValidationError> {
    let max_year = Utc::now().year() + 1;
    if year < 1900 || year > max_year {
        let mut error = ValidationError::new("year");
        error.add_param("value".into(), &year);
        error.add_param("range".into(), &format!("1900-{}", max_year));
        return Err(error);
    }
    Ok(())
}

/// Validar que la puntuación de condición esté en el rango permitido
pub fn validate_condition_score(score: i32) -> Result<(), ValidationError> {
    if !(1..=10).contains(&score) {
        let mut error = ValidationError::new("condition_score");
        error.add_param("value".into(), &score);
        error.add_param("range".into(), &"1-10".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
