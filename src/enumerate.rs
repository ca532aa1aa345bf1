use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::family::{Family, PersonSet};
use crate::joint::{Assignment, joint_probability};
use crate::model::ProbabilityModel;
use crate::posterior::Posteriors;

/// Exact inference by visiting every hypothesis consistent with the evidence.
pub struct Enumerator<'a> {
    family: &'a Family,
    model: &'a ProbabilityModel,
}

impl<'a> Enumerator<'a> {
    pub fn new(family: &'a Family, model: &'a ProbabilityModel) -> Self {
        Self { family, model }
    }

    /// Trait subsets that agree with every observed trait.
    pub fn trait_hypotheses(&self) -> impl Iterator<Item = PersonSet> + Send + use<> {
        let evidence = self.family.evidence();
        self.family
            .everyone()
            .subsets()
            .filter(move |&have_trait| evidence.admits(have_trait))
    }

    pub fn n_trait_hypotheses(&self) -> u64 {
        let unknown = self.family.n_people() - self.family.evidence().known.len();
        1u64 << unknown
    }

    /// Add the weight of every gene split under one trait hypothesis.
    fn accumulate(&self, have_trait: PersonSet, posteriors: &mut Posteriors) {
        let everyone = self.family.everyone();
        for one_gene in everyone.subsets() {
            for two_genes in everyone.difference(one_gene).subsets() {
                let assignment = Assignment {
                    one_gene,
                    two_genes,
                    have_trait,
                };
                let p = joint_probability(self.family, self.model, &assignment);
                posteriors.update(&assignment, p);
            }
        }
    }

    pub fn run(&self) -> Result<Posteriors> {
        let pb = self.progress_bar()?;
        let mut posteriors = Posteriors::new(self.family.n_people());
        for have_trait in self.trait_hypotheses() {
            self.accumulate(have_trait, &mut posteriors);
            pb.inc(1);
        }
        pb.abandon();
        posteriors.normalize();
        Ok(posteriors)
    }

    /// Same as `run`, with trait hypotheses spread over the rayon pool.
    /// Each worker folds into its own partial sums, merged at the end.
    pub fn run_parallel(&self) -> Result<Posteriors> {
        let pb = self.progress_bar()?;
        let n_people = self.family.n_people();
        let mut posteriors = self
            .trait_hypotheses()
            .par_bridge()
            .fold(
                || Posteriors::new(n_people),
                |mut partial, have_trait| {
                    self.accumulate(have_trait, &mut partial);
                    pb.inc(1);
                    partial
                },
            )
            .reduce(|| Posteriors::new(n_people), Posteriors::merge);
        pb.abandon();
        posteriors.normalize();
        Ok(posteriors)
    }

    fn progress_bar(&self) -> Result<ProgressBar> {
        let n_hypotheses = self.n_trait_hypotheses();
        debug!(
            "enumerating {n_hypotheses} trait hypotheses x 3^{} gene splits",
            self.family.n_people()
        );
        let pb = ProgressBar::new(n_hypotheses);
        pb.set_style(ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:30} {pos}/{len} trait hypotheses",
        )?);
        Ok(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::tests::person;
    use crate::model::GeneCount;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "expected {b}, got {a}");
    }

    fn assert_distributions(posteriors: &Posteriors) {
        for idx in 0..posteriors.n_people() {
            let genes: f64 = GeneCount::ALL.iter().map(|&g| posteriors.gene(idx, g)).sum();
            let traits = posteriors.has_trait(idx, true) + posteriors.has_trait(idx, false);
            assert_close(genes, 1.0, 1e-9);
            assert_close(traits, 1.0, 1e-9);
            for g in GeneCount::ALL {
                assert!(posteriors.gene(idx, g) >= 0.0);
            }
        }
    }

    fn harry_potter() -> Family {
        Family::new(vec![
            person("Harry", Some(("Lily", "James")), None),
            person("James", None, Some(true)),
            person("Lily", None, Some(false)),
        ])
        .unwrap()
    }

    #[test]
    fn lone_person_without_evidence_keeps_prior() {
        let family = Family::new(vec![person("A", None, None)]).unwrap();
        let model = ProbabilityModel::STANDARD;
        let posteriors = Enumerator::new(&family, &model).run().unwrap();
        assert_close(posteriors.gene(0, GeneCount::Zero), 0.96, 1e-12);
        assert_close(posteriors.gene(0, GeneCount::One), 0.03, 1e-12);
        assert_close(posteriors.gene(0, GeneCount::Two), 0.01, 1e-12);
        let p_trait = 0.96 * 0.01 + 0.03 * 0.56 + 0.01 * 0.65;
        assert_close(posteriors.has_trait(0, true), p_trait, 1e-12);
    }

    #[test]
    fn lone_person_with_trait_updates_on_likelihood() {
        let family = Family::new(vec![person("A", None, Some(true))]).unwrap();
        let model = ProbabilityModel::STANDARD;
        let posteriors = Enumerator::new(&family, &model).run().unwrap();
        assert_close(posteriors.gene(0, GeneCount::Zero), 0.0096 / 0.0329, 1e-12);
        assert_close(posteriors.gene(0, GeneCount::One), 0.0168 / 0.0329, 1e-12);
        assert_close(posteriors.gene(0, GeneCount::Two), 0.0065 / 0.0329, 1e-12);
        assert_close(posteriors.gene(0, GeneCount::Zero), 0.2917, 1e-4);
        assert_close(posteriors.gene(0, GeneCount::One), 0.5106, 1e-4);
        assert_close(posteriors.gene(0, GeneCount::Two), 0.1976, 1e-4);
        assert_eq!(posteriors.has_trait(0, true), 1.0);
        assert_eq!(posteriors.has_trait(0, false), 0.0);
    }

    #[test]
    fn unrelated_people_without_evidence_keep_prior() {
        let family = Family::new(vec![
            person("A", None, None),
            person("B", None, None),
            person("C", None, None),
        ])
        .unwrap();
        let model = ProbabilityModel::STANDARD;
        let posteriors = Enumerator::new(&family, &model).run().unwrap();
        assert_distributions(&posteriors);
        for idx in 0..3 {
            for g in GeneCount::ALL {
                assert_close(posteriors.gene(idx, g), model.gene_prior(g), 1e-12);
            }
        }
    }

    #[test]
    fn only_admissible_trait_hypotheses_are_visited() {
        let family = harry_potter();
        let model = ProbabilityModel::STANDARD;
        let enumerator = Enumerator::new(&family, &model);
        let hypotheses: Vec<u64> = enumerator.trait_hypotheses().map(PersonSet::bits).collect();
        assert_eq!(enumerator.n_trait_hypotheses(), 2);
        assert_eq!(hypotheses.len(), 2);
        assert!(hypotheses.iter().all(|&t| t & 0b010 != 0 && t & 0b100 == 0));

        let posteriors = enumerator.run().unwrap();
        assert_eq!(posteriors.has_trait(1, true), 1.0);
        assert_eq!(posteriors.has_trait(2, false), 1.0);
    }

    #[test]
    fn harry_potter_family() {
        let family = harry_potter();
        let model = ProbabilityModel::STANDARD;
        let posteriors = Enumerator::new(&family, &model).run().unwrap();
        assert_distributions(&posteriors);
        // Harry
        assert_close(posteriors.gene(0, GeneCount::Two), 0.0092, 1e-4);
        assert_close(posteriors.gene(0, GeneCount::One), 0.4557, 1e-4);
        assert_close(posteriors.gene(0, GeneCount::Zero), 0.5351, 1e-4);
        assert_close(posteriors.has_trait(0, true), 0.2665, 1e-4);
        // James
        assert_close(posteriors.gene(1, GeneCount::Two), 0.1976, 1e-4);
        assert_close(posteriors.gene(1, GeneCount::One), 0.5106, 1e-4);
        assert_close(posteriors.gene(1, GeneCount::Zero), 0.2918, 1e-4);
        // Lily
        assert_close(posteriors.gene(2, GeneCount::Two), 0.0036, 1e-4);
        assert_close(posteriors.gene(2, GeneCount::One), 0.0136, 1e-4);
        assert_close(posteriors.gene(2, GeneCount::Zero), 0.9827, 1e-4);
    }

    #[test]
    fn parallel_matches_sequential() {
        let family = Family::new(vec![
            person("Arthur", None, Some(false)),
            person("Molly", None, None),
            person("Ron", Some(("Molly", "Arthur")), None),
            person("Ginny", Some(("Molly", "Arthur")), Some(true)),
            person("Fred", Some(("Molly", "Arthur")), None),
        ])
        .unwrap();
        let model = ProbabilityModel::STANDARD;
        let enumerator = Enumerator::new(&family, &model);
        let sequential = enumerator.run().unwrap();
        let parallel = enumerator.run_parallel().unwrap();
        assert_distributions(&parallel);
        for idx in 0..family.n_people() {
            for g in GeneCount::ALL {
                assert_close(parallel.gene(idx, g), sequential.gene(idx, g), 1e-12);
            }
            for t in [true, false] {
                assert_close(parallel.has_trait(idx, t), sequential.has_trait(idx, t), 1e-12);
            }
        }
    }
}
