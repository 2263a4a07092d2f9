//! Miter length correction.

use crate::config::{angle, LENGTH_DECIMALS};
use crate::error::GeometryError;
use crate::generator::format::round_to;

/// Cut length of a bar mitered at both ends.
///
/// `nominal - |height * cot(left) + height * cot(right)|`, rounded to one
/// decimal. Angles are in degrees.
///
/// # Errors
///
/// [`GeometryError::DegenerateAngle`] when either angle has a zero tangent.
pub fn adjusted_length(
    left_tilt: i32,
    right_tilt: i32,
    nominal_length: f64,
    height: f64,
) -> Result<f64, GeometryError> {
    let left_cot = angle::cot_degrees(f64::from(left_tilt))
        .ok_or(GeometryError::DegenerateAngle { angle: left_tilt })?;
    let right_cot = angle::cot_degrees(f64::from(right_tilt))
        .ok_or(GeometryError::DegenerateAngle { angle: right_tilt })?;

    let reduction = (height * left_cot + height * right_cot).abs();
    Ok(round_to(nominal_length - reduction, LENGTH_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::format::format_general;

    #[test]
    fn test_symmetric_45() {
        let len = adjusted_length(45, 45, 1000.0, 50.0).unwrap();
        assert_eq!(len, 900.0);
        assert_eq!(format_general(len, 10), "900");
    }

    #[test]
    fn test_opposite_signs_cancel() {
        // cot(45) + cot(-45) == 0, no reduction
        let len = adjusted_length(45, -45, 1000.0, 50.0).unwrap();
        assert_eq!(len, 1000.0);
    }

    #[test]
    fn test_mixed_angles() {
        // 60 * (cot 30 + cot 60) = 60 * (1.7320508 + 0.5773503) = 138.564...
        let len = adjusted_length(30, 60, 1500.0, 60.0).unwrap();
        assert_eq!(len, 1361.4);
        assert_eq!(format_general(len, 10), "1361.4");
    }

    #[test]
    fn test_negative_angles_use_absolute_reduction() {
        let len = adjusted_length(-45, -45, 1000.0, 50.0).unwrap();
        assert_eq!(len, 900.0);
    }

    #[test]
    fn test_zero_height_keeps_nominal() {
        assert_eq!(adjusted_length(45, 30, 812.0, 0.0).unwrap(), 812.0);
    }

    #[test]
    fn test_zero_angle_is_degenerate() {
        assert_eq!(
            adjusted_length(0, 45, 1000.0, 50.0),
            Err(GeometryError::DegenerateAngle { angle: 0 })
        );
        assert_eq!(
            adjusted_length(45, 0, 1000.0, 50.0),
            Err(GeometryError::DegenerateAngle { angle: 0 })
        );
    }

    #[test]
    fn test_out_of_range_angles_are_accepted() {
        // 90 degrees: cotangent is ~6e-17, no meaningful reduction
        assert_eq!(adjusted_length(90, 90, 1000.0, 50.0).unwrap(), 1000.0);
        assert!(adjusted_length(135, 120, 1000.0, 50.0).is_ok());
    }
}
