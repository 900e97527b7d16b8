//! Body Mass Index calculation.

/// Compute BMI from weight in kilograms and height in centimetres.
///
/// Returns `None` for non-positive or non-finite inputs. The result is
/// rounded to two decimal places on the exact decimal value of the quotient,
/// so 2.675 (stored as 2.67499...) rounds down.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return None;
    }

    format!("{:.2}", bmi).parse().ok()
}
