//! A dense, row-major matrix.

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Default + Clone> Matrix<T> {
    pub fn allocate(rows: usize, cols: usize) -> Self {
        let (len, overflow) = rows.overflowing_mul(cols);
        assert!(!overflow, "allocation of a {rows}x{cols} matrix failed due to overflow");
        Self {
            data: vec![T::default(); len],
            rows,
            cols,
        }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows, "row index {row} out of bounds ({} rows)", self.rows);
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.rows, "row index {row} out of bounds ({} rows)", self.rows);
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn col(&self, col: usize) -> impl Iterator<Item = &T> {
        debug_assert!(col < self.cols, "col index {col} out of bounds ({} cols)", self.cols);
        self.data.iter().skip(col).step_by(self.cols)
    }

    pub fn flatten(&self) -> &[T] {
        &self.data
    }

    pub fn flatten_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn verbose(&self) -> VerboseFormat<'_, T> {
        VerboseFormat { matrix: self }
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &Self::Output {
        self.row_slice(row)
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        self.row_slice_mut(row)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        debug_assert!(col < self.cols, "col index {col} out of bounds ({} cols)", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        debug_assert!(col < self.cols, "col index {col} out of bounds ({} cols)", self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a [T];
    type IntoIter = std::slice::ChunksExact<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.chunks_exact(self.cols.max(1))
    }
}

pub struct VerboseFormat<'a, T> {
    matrix: &'a Matrix<T>,
}

impl<T: Display> Display for VerboseFormat<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.matrix {
            write!(f, "[")?;
            for (col, cell) in row.iter().enumerate() {
                if col != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cell:.6}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
