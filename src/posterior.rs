use log::warn;
use ndarray::{Array2, ArrayViewMut1, Axis};

use crate::joint::Assignment;
use crate::model::GeneCount;

const N_GENE_COUNTS: usize = 3;
const N_TRAIT_STATES: usize = 2;

fn trait_column(has_trait: bool) -> usize {
    if has_trait { 0 } else { 1 }
}

/// Per-person weights for each gene count and trait status.
/// Unnormalized while enumerating, distributions after `normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Posteriors {
    genes: Array2<f64>,  // (n_people x 3), column = gene count
    traits: Array2<f64>, // (n_people x 2), column 0 = has trait
}

impl Posteriors {
    pub fn new(n_people: usize) -> Self {
        Self {
            genes: Array2::zeros((n_people, N_GENE_COUNTS)),
            traits: Array2::zeros((n_people, N_TRAIT_STATES)),
        }
    }

    pub fn n_people(&self) -> usize {
        self.genes.nrows()
    }

    /// Credit `p` to every person's outcome under `assignment`.
    pub fn update(&mut self, assignment: &Assignment, p: f64) {
        for idx in 0..self.n_people() {
            self.genes[[idx, assignment.gene_count(idx).index()]] += p;
            self.traits[[idx, trait_column(assignment.has_trait(idx))]] += p;
        }
    }

    /// Combine partial sums from independent parts of the enumeration.
    pub fn merge(mut self, other: Self) -> Self {
        self.genes += &other.genes;
        self.traits += &other.traits;
        self
    }

    /// Rescale each person's gene and trait weights to sum to 1.
    /// A distribution with no weight at all is left as zeros.
    pub fn normalize(&mut self) {
        for (idx, row) in self.genes.axis_iter_mut(Axis(0)).enumerate() {
            if !normalize_row(row) {
                warn!("no gene weight accumulated for person #{idx}");
            }
        }
        for (idx, row) in self.traits.axis_iter_mut(Axis(0)).enumerate() {
            if !normalize_row(row) {
                warn!("no trait weight accumulated for person #{idx}");
            }
        }
    }

    pub fn gene(&self, idx: usize, count: GeneCount) -> f64 {
        self.genes[[idx, count.index()]]
    }

    pub fn has_trait(&self, idx: usize, has_trait: bool) -> f64 {
        self.traits[[idx, trait_column(has_trait)]]
    }
}

fn normalize_row(mut row: ArrayViewMut1<f64>) -> bool {
    let total = row.sum();
    if total > 0.0 {
        row.mapv_inplace(|w| w / total);
        true
    } else {
        false
    }
}
