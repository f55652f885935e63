//-------------------------------------------------------------------//
//       pic1d : 1d1v electrostatic PIC code on a periodic domain    //
//-------------------------------------------------------------------//
// Disclaimer: pic1d (one-dimensional electrostatic Particle-in-     //
// Cell simulation code) is free software: you can redistribute it   //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

//----------------------------------------------------------------------//
// linear interpolation of periodic grid data                           //
//----------------------------------------------------------------------//

use crate::error::{invalid, Result};

/// Value of the periodic array `y` (period `y.len()`) at the real index `x`.
///
/// `x` may lie anywhere on the real line. Integer `x = i` returns `y[i mod n]` exactly.
/// An empty `y` has no period and is an error.
pub fn periodic_interp(y: &[f64], x: f64) -> Result<f64> {
    if y.is_empty() {
        return invalid("cannot interpolate an empty array");
    }
    let n = y.len() as i64;
    let xl = x.floor();
    let frac = x - xl;
    let lower = (((xl as i64) % n) + n) % n;
    let upper = (lower + 1) % n;
    if frac == 0.0 {
        return Ok(y[lower as usize]);
    }
    Ok(y[lower as usize] * (1.0 - frac) + y[upper as usize] * frac)
}

/// [`periodic_interp`] at every index in `x`.
pub fn periodic_interp_all(y: &[f64], x: &[f64]) -> Result<Vec<f64>> {
    x.iter().map(|&xi| periodic_interp(y, xi)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PicError;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn integer_index_is_exact() {
        let y = [0.3, -1.7, 2.9, 11.0, 5.5];
        for i in -10i64..10 {
            let expect = y[i.rem_euclid(5) as usize];
            assert_eq!(periodic_interp(&y, i as f64).unwrap(), expect);
        }
    }

    #[test]
    fn halfway_between_points() {
        let y = [1.0, 3.0, 5.0];
        assert_eq!(periodic_interp(&y, 0.5).unwrap(), 2.0);
        assert_eq!(periodic_interp(&y, 2.5).unwrap(), 3.0);
        assert_eq!(periodic_interp(&y, -0.5).unwrap(), 3.0);
    }

    #[test]
    fn vector_form_matches_scalar() {
        let y = [1.0, 2.0, 4.0, 8.0];
        let x = [0.25, 1.5, 3.75, -2.2];
        let v = periodic_interp_all(&y, &x).unwrap();
        for (xi, vi) in x.iter().zip(v.iter()) {
            assert_eq!(*vi, periodic_interp(&y, *xi).unwrap());
        }
    }

    #[test]
    fn empty_array_is_an_error() {
        assert!(matches!(
            periodic_interp(&[], 0.5),
            Err(PicError::InvalidConfiguration(_))
        ));
        assert!(periodic_interp_all(&[], &[1.0]).is_err());
        assert_eq!(periodic_interp_all(&[], &[]).unwrap(), Vec::<f64>::new());
    }

    proptest! {
        #[test]
        fn shifting_by_period_changes_nothing(
            y in prop::collection::vec(-100.0f64..100.0, 1..40),
            x in -500.0f64..500.0,
        ) {
            let n = y.len() as f64;
            let v = periodic_interp(&y, x).unwrap();
            assert_relative_eq!(v, periodic_interp(&y, x + n).unwrap(), epsilon = 1e-9, max_relative = 1e-9);
            assert_relative_eq!(v, periodic_interp(&y, x - n).unwrap(), epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
