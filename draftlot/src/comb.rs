//! Combinatorics.

/// Decodes `combination` into one ordinal per position, where position `i` ranges over
/// `0..cardinalities[i]`. The first position varies fastest.
pub fn pick(cardinalities: &[usize], combination: u64, ordinals: &mut [usize]) {
    let mut residual = combination;
    for (index, &cardinality) in cardinalities.iter().enumerate() {
        let cardinality = cardinality as u64;
        let (quotient, remainder) = (residual / cardinality, residual % cardinality);
        residual = quotient;
        ordinals[index] = remainder as usize;
    }
}

pub fn count_combinations(cardinalities: &[usize]) -> u64 {
    cardinalities.iter().map(|&cardinality| cardinality as u64).product()
}

/// Checks that no element repeats, using `bitmap` as scratch space. Every element must be a valid
/// index into `bitmap`.
pub fn is_unique_linear(elements: &[usize], bitmap: &mut [bool]) -> bool {
    bitmap.fill(false);
    for &element in elements {
        if bitmap[element] {
            return false;
        }
        bitmap[element] = true;
    }
    true
}

/// Iterates over all orderings of `0..n` by walking the `n^n` combinations of `n` positions and
/// discarding those with repeats.
pub struct Orderings {
    cardinalities: Vec<usize>,
    combinations: u64,
    combination: u64,
    bitmap: Vec<bool>,
}

impl Orderings {
    pub fn new(n: usize) -> Self {
        let cardinalities = vec![n; n];
        let combinations = count_combinations(&cardinalities);
        Self {
            cardinalities,
            combinations,
            combination: 0,
            bitmap: vec![false; n],
        }
    }
}

impl Iterator for Orderings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut ordinals = vec![0; self.cardinalities.len()];
        while self.combination != self.combinations {
            pick(&self.cardinalities, self.combination, &mut ordinals);
            self.combination += 1;
            if is_unique_linear(&ordinals, &mut self.bitmap) {
                return Some(ordinals);
            }
        }
        None
    }
}
