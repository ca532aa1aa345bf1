use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadWithPath {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not parse CSV in {path}")]
    CsvRead {
        #[source]
        source: csv::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write results")]
    Write {
        #[source]
        source: std::io::Error,
    },

    #[error("missing column \"{column}\" in header of {path}")]
    MissingColumn {
        column: &'static str,
        path: std::path::PathBuf,
    },

    #[error("empty name in line {line_num}")]
    EmptyName { line_num: usize },

    #[error("person \"{name}\" is listed more than once")]
    DuplicateName { name: String },

    #[error("unrecognized trait value \"{token}\" in line {line_num} (expected 1, 0 or blank)")]
    TraitToken { line_num: usize, token: String },

    #[error("person \"{name}\" must have both parents or neither")]
    HalfParents { name: String },

    #[error("parent \"{parent}\" of \"{name}\" is not listed")]
    UnknownParent { name: String, parent: String },

    #[error("person \"{name}\" is listed as their own parent")]
    SelfParent { name: String },

    #[error("person \"{name}\" is their own ancestor")]
    ParentCycle { name: String },

    #[error("need at least 1 person (got 0)")]
    EmptyFamily,

    #[error("at most {max} people are supported (got {n_people})")]
    TooManyPeople { n_people: usize, max: usize },

    #[error("invalid progress bar template")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

pub type Result<T> = std::result::Result<T, CustomError>;
