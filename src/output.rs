use std::io::Write;

use crate::error::{CustomError, Result};
use crate::family::Family;
use crate::model::GeneCount;
use crate::posterior::Posteriors;

/// Print each person's gene and trait distributions, in input order.
pub fn write_posteriors(
    family: &Family,
    posteriors: &Posteriors,
    mut out: impl Write,
) -> Result<()> {
    let write_err = |source| CustomError::Write { source };
    for (idx, person) in family.people().iter().enumerate() {
        writeln!(out, "{}:", person.name).map_err(write_err)?;
        writeln!(out, "  Gene:").map_err(write_err)?;
        for count in GeneCount::ALL {
            let p = posteriors.gene(idx, count);
            writeln!(out, "    {}: {:.4}", count.index(), p).map_err(write_err)?;
        }
        writeln!(out, "  Trait:").map_err(write_err)?;
        for (label, has_trait) in [("True", true), ("False", false)] {
            let p = posteriors.has_trait(idx, has_trait);
            writeln!(out, "    {label}: {p:.4}").map_err(write_err)?;
        }
    }
    out.flush().map_err(write_err)?;
    Ok(())
}
