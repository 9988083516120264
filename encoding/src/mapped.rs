//! The ST 0601 §8 linear fixed-point mapping
//! between raw integer lattices and bounded real ranges.
//!
//! With domain `(x1, x2)`, range `(y1, y2)` and slope
//! `m = (y2 - y1) / (x2 - x1)`, decoding takes a lattice point `x` to
//! `m * (x - x1) + y1`, and encoding rounds `(y - y1) / m + x1`
//! back to the nearest lattice point. Both directions are exact inverses
//! on the lattice.
//!
//! The most-negative representable integer of a signed lattice is reserved
//! as the standard error indicator and is not part of the domain
//! (signed domains are symmetric, `±(2^(8L−1) − 1)`).

use klv_core::value::MappedParams;

/// Map a raw lattice point to its real value.
pub fn to_real(params: &MappedParams, x: i64) -> f64 {
    let (x1, _) = params.domain;
    let (y1, _) = params.range;
    params.slope() * (x - x1) as f64 + y1
}

/// Map a real value back to the nearest lattice point.
///
/// The caller is responsible for range validation;
/// values inside the declared range always land inside the domain.
pub fn from_real(params: &MappedParams, y: f64) -> i64 {
    let (x1, _) = params.domain;
    let (y1, _) = params.range;
    ((y - y1) / params.slope() + x1 as f64).round() as i64
}

/// The error-indicator lattice value of a signed field of the given
/// byte length: the most-negative representable integer.
pub fn error_sentinel(byte_length: u8) -> i64 {
    -(1_i64 << (u32::from(byte_length) * 8 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading() -> MappedParams {
        MappedParams::new((0, 65535), (0.0, 360.0))
    }

    fn pitch() -> MappedParams {
        MappedParams::new((-32767, 32767), (-20.0, 20.0))
    }

    fn latitude() -> MappedParams {
        MappedParams::new((-2147483647, 2147483647), (-90.0, 90.0))
    }

    #[test]
    fn decodes_platform_heading() {
        let y = to_real(&heading(), 0x71C2);
        assert!((y - 159.97436484321355).abs() < 1e-12);
    }

    #[test]
    fn decodes_platform_pitch() {
        // 0xFD3D as a signed 16-bit integer
        let y = to_real(&pitch(), -707);
        assert!((y - -0.4315317239905987).abs() < 1e-12);
    }

    #[test]
    fn decodes_sensor_latitude() {
        let y = to_real(&latitude(), 0x5595B66D);
        assert!((y - 60.176822966978335).abs() < 1e-12);
    }

    #[test]
    fn encodes_near_reals_to_the_reference_lattice_points() {
        assert_eq!(from_real(&heading(), 159.974), 0x71C2);
        assert_eq!(from_real(&pitch(), -0.4315), -707);
        assert_eq!(from_real(&latitude(), 60.1768229669783), 0x5595B66D);
    }

    #[test]
    fn lattice_round_trip_is_exact() {
        for x in [-32767_i64, -707, -1, 0, 1, 29122, 32767] {
            assert_eq!(from_real(&pitch(), to_real(&pitch(), x)), x);
        }
        for x in [0_i64, 1, 29122, 65535] {
            assert_eq!(from_real(&heading(), to_real(&heading(), x)), x);
        }
    }

    #[test]
    fn endpoints_map_exactly() {
        assert_eq!(to_real(&heading(), 0), 0.0);
        assert_eq!(from_real(&heading(), 360.0), 65535);
        assert_eq!(from_real(&pitch(), -20.0), -32767);
        assert_eq!(from_real(&pitch(), 20.0), 32767);
    }

    #[test]
    fn sentinel_values() {
        assert_eq!(error_sentinel(1), -0x80);
        assert_eq!(error_sentinel(2), -0x8000);
        assert_eq!(error_sentinel(4), -0x8000_0000);
    }
}
