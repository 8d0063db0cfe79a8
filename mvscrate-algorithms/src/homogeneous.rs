//! Homogeneous coordinates
//!
//! Coordinates are stored column-wise: a `d x N` array holds `N` points of
//! dimension `d`.

use mvscrate_core::{Error, Result};
use nalgebra::DMatrix;
use ndarray::{s, Array2, ArrayBase, Axis, Data, Dimension, Ix2};

/// Convert cartesian coordinates to homogeneous ones by appending a row of ones.
///
/// The input may have any dimensionality at the type level so that callers
/// holding dynamically shaped arrays get a shape error instead of a panic.
///
/// # Errors
/// Returns [`Error::Shape`] if the input is not exactly two-dimensional.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use mvscrate_algorithms::cart_to_homogeneous;
///
/// let points = array![[1.0, 2.0], [3.0, 4.0]];
/// let homogeneous = cart_to_homogeneous(&points).unwrap();
/// assert_eq!(homogeneous, array![[1.0, 2.0], [3.0, 4.0], [1.0, 1.0]]);
/// ```
pub fn cart_to_homogeneous<S, D>(coordinates: &ArrayBase<S, D>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let coordinates = coordinates
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| {
            Error::shape(
                "a 2-dimensional (d x N) array",
                format!(
                    "a {}-dimensional array of shape {:?}",
                    coordinates.ndim(),
                    coordinates.shape()
                ),
            )
        })?;

    let (d, n) = coordinates.dim();
    let mut homogeneous = Array2::ones((d + 1, n));
    homogeneous.slice_mut(s![..d, ..]).assign(&coordinates);
    Ok(homogeneous)
}

/// Convert homogeneous coordinates back to cartesian ones.
///
/// Every column is divided by its last entry, which is then dropped. Columns
/// whose last entry is zero (points at infinity) come back as non-finite
/// values.
///
/// # Errors
/// Returns [`Error::Shape`] if the array has no rows.
pub fn homogeneous_to_cart<S>(coordinates: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let rows = coordinates.nrows();
    if rows == 0 {
        return Err(Error::shape(
            "at least one row",
            format!("an array of shape {:?}", coordinates.shape()),
        ));
    }

    let d = rows - 1;
    let mut cartesian = coordinates.slice(s![..d, ..]).to_owned();
    let scale = coordinates.row(d);
    for (mut column, &w) in cartesian.axis_iter_mut(Axis(1)).zip(scale.iter()) {
        column.mapv_inplace(|x| x / w);
    }
    Ok(cartesian)
}

/// Append a row of ones to a `d x N` nalgebra matrix.
pub fn cart_to_homogeneous_matrix(coordinates: &DMatrix<f64>) -> DMatrix<f64> {
    coordinates.clone().insert_row(coordinates.nrows(), 1.0)
}
