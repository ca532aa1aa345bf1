use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{CustomError, Result};
use crate::family::{Family, Person};

pub const NAME_COLUMN: &str = "name";
pub const MOTHER_COLUMN: &str = "mother";
pub const FATHER_COLUMN: &str = "father";
pub const TRAIT_COLUMN: &str = "trait";

struct Columns {
    name: usize,
    mother: usize,
    father: usize,
    has_trait: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| CustomError::MissingColumn {
                    column,
                    path: path.to_path_buf(),
                })
        };
        Ok(Self {
            name: find(NAME_COLUMN)?,
            mother: find(MOTHER_COLUMN)?,
            father: find(FATHER_COLUMN)?,
            has_trait: find(TRAIT_COLUMN)?,
        })
    }
}

fn parse_trait(token: &str, line_num: usize) -> Result<Option<bool>> {
    match token {
        "1" => Ok(Some(true)),
        "0" => Ok(Some(false)),
        "" => Ok(None),
        _ => Err(CustomError::TraitToken {
            line_num,
            token: token.to_string(),
        }),
    }
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Read people from CSV with `name,mother,father,trait` columns, in file order.
pub fn read_people(input: impl Read, path: &Path) -> Result<Vec<Person>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let csv_err = |source| CustomError::CsvRead {
        source,
        path: path.to_path_buf(),
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = Columns::locate(&headers, path)?;

    let mut people = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        // Header is line 1
        let line_num = record
            .position()
            .map_or(people.len() + 2, |pos| pos.line() as usize);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let name = field(columns.name);
        if name.is_empty() {
            return Err(CustomError::EmptyName { line_num });
        }
        people.push(Person {
            name: name.to_string(),
            mother: optional(field(columns.mother)),
            father: optional(field(columns.father)),
            has_trait: parse_trait(field(columns.has_trait), line_num)?,
        });
    }
    Ok(people)
}

pub fn read_family(path: &impl AsRef<Path>) -> Result<Family> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let f = std::fs::File::open(&path).map_err(|e| CustomError::ReadWithPath {
        source: e,
        path: path.clone(),
    })?;
    let people = read_people(std::io::BufReader::new(f), &path)?;
    Family::new(people)
}
