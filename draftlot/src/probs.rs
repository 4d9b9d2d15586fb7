//! Utilities for working with probabilities.

use crate::linear::Matrix;

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn scale(&mut self, factor: f64);
    fn max_abs_diff(&self, other: &[f64]) -> f64;
}

impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn max_abs_diff(&self, other: &[f64]) -> f64 {
        debug_assert_eq!(self.len(), other.len(), "slices of unequal length");
        self.iter()
            .zip(other)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

pub trait MatrixExt {
    fn row_sums(&self) -> Vec<f64>;
    fn col_sums(&self) -> Vec<f64>;
}

impl MatrixExt for Matrix<f64> {
    fn row_sums(&self) -> Vec<f64> {
        self.into_iter().map(|row| row.sum()).collect()
    }

    fn col_sums(&self) -> Vec<f64> {
        (0..self.cols()).map(|col| self.col(col).sum::<f64>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;

    #[test]
    fn sum_and_scale() {
        let mut values = [1.0, 2.0, 5.0];
        assert_float_absolute_eq!(8.0, values.sum());
        values.scale(0.5);
        assert_eq!([0.5, 1.0, 2.5], values);
    }

    #[test]
    fn max_abs_diff() {
        assert_float_absolute_eq!(0.3, [0.1, 0.5].max_abs_diff(&[0.2, 0.2]), 1e-12);
        let empty: [f64; 0] = [];
        assert_eq!(0.0, empty.max_abs_diff(&[]));
    }

    #[test]
    fn matrix_sums() {
        let mut matrix = Matrix::allocate(2, 2);
        matrix.flatten_mut().copy_from_slice(&[0.25, 0.75, 0.5, 0.5]);
        assert_eq!(vec![1.0, 1.0], matrix.row_sums());
        assert_eq!(vec![0.75, 1.25], matrix.col_sums());
    }
}
