#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneCount {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl GeneCount {
    /// Output order: two copies first, as printed per person.
    pub const ALL: [GeneCount; 3] = [GeneCount::Two, GeneCount::One, GeneCount::Zero];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Conditional probability tables of the inheritance network.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    /// Unconditional probability of each gene count, indexed by count.
    pub gene_prior: [f64; 3],
    /// P(trait | gene count), indexed by count.
    pub trait_given_gene: [f64; 3],
    /// Chance that a transmitted copy flips state.
    pub mutation: f64,
}

impl ProbabilityModel {
    pub const STANDARD: ProbabilityModel = ProbabilityModel {
        gene_prior: [0.96, 0.03, 0.01],
        trait_given_gene: [0.01, 0.56, 0.65],
        mutation: 0.01,
    };

    pub fn gene_prior(&self, count: GeneCount) -> f64 {
        self.gene_prior[count.index()]
    }

    pub fn trait_likelihood(&self, count: GeneCount, has_trait: bool) -> f64 {
        let p = self.trait_given_gene[count.index()];
        if has_trait { p } else { 1.0 - p }
    }

    /// Probability that a parent with `parent` copies passes one copy on.
    /// A single copy is a fair coin; mutation only matters at 0 and 2.
    pub fn transmission_probability(&self, parent: GeneCount) -> f64 {
        match parent {
            GeneCount::Zero => self.mutation,
            GeneCount::One => 0.5,
            GeneCount::Two => 1.0 - self.mutation,
        }
    }

    /// P(child has `child` copies | parents' counts).
    pub fn inheritance_probability(
        &self,
        child: GeneCount,
        mother: GeneCount,
        father: GeneCount,
    ) -> f64 {
        let from_mother = self.transmission_probability(mother);
        let from_father = self.transmission_probability(father);
        match child {
            GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
            GeneCount::One => {
                from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father
            }
            GeneCount::Two => from_mother * from_father,
        }
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::STANDARD
    }
}
