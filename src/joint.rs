use crate::family::{Family, PersonSet};
use crate::model::{GeneCount, ProbabilityModel};

/// One complete hypothesis: everyone's gene count and trait status.
/// People in neither gene set carry zero copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assignment {
    pub one_gene: PersonSet,
    pub two_genes: PersonSet,
    pub have_trait: PersonSet,
}

impl Assignment {
    pub fn gene_count(&self, idx: usize) -> GeneCount {
        if self.one_gene.contains(idx) {
            GeneCount::One
        } else if self.two_genes.contains(idx) {
            GeneCount::Two
        } else {
            GeneCount::Zero
        }
    }

    pub fn has_trait(&self, idx: usize) -> bool {
        self.have_trait.contains(idx)
    }
}

/// Probability of one person's part of the hypothesis given their parents' part.
pub fn person_probability(
    family: &Family,
    model: &ProbabilityModel,
    assignment: &Assignment,
    idx: usize,
) -> f64 {
    let count = assignment.gene_count(idx);
    let gene_prob = match family.parents(idx) {
        None => model.gene_prior(count),
        Some((mother, father)) => model.inheritance_probability(
            count,
            assignment.gene_count(mother),
            assignment.gene_count(father),
        ),
    };
    gene_prob * model.trait_likelihood(count, assignment.has_trait(idx))
}

/// Joint probability of `assignment` over the whole family.
pub fn joint_probability(
    family: &Family,
    model: &ProbabilityModel,
    assignment: &Assignment,
) -> f64 {
    debug_assert!(assignment.one_gene.is_disjoint(assignment.two_genes));
    (0..family.n_people())
        .map(|idx| person_probability(family, model, assignment, idx))
        .product()
}
