use log::{debug, info};
use std::io;
use std::path::Path;

use crate::enumerate::Enumerator;
use crate::error::Result;
use crate::family::Family;
use crate::model::ProbabilityModel;
use crate::output::write_posteriors;
use crate::reader::read_family;

/// Families at least this large enumerate trait hypotheses on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 8;

pub fn print_summary(path: &Path, family: &Family) {
    let evidence = family.evidence();
    eprintln!("DATA  : {}", path.display());
    eprintln!(
        "PEOPLE: {} ({} with known trait)",
        family.n_people(),
        evidence.known.len()
    );
    eprintln!();
}

pub fn run(data: impl AsRef<Path>) -> Result<()> {
    let family = read_family(&data)?;
    print_summary(data.as_ref(), &family);
    let evidence = family.evidence();
    debug!(
        "evidence: known={:#b} has_trait={:#b}",
        evidence.known.bits(),
        evidence.known_true.bits()
    );
    for person in family.people() {
        debug!(
            "{}: mother={:?} father={:?} trait={:?}",
            person.name, person.mother, person.father, person.has_trait
        );
    }

    let model = ProbabilityModel::STANDARD;
    let enumerator = Enumerator::new(&family, &model);
    let posteriors = if family.n_people() < PARALLEL_THRESHOLD {
        info!("enumerating sequentially");
        enumerator.run()?
    } else {
        info!("enumerating on {} threads", rayon::current_num_threads());
        enumerator.run_parallel()?
    };

    write_posteriors(&family, &posteriors, io::stdout().lock())
}
