use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub const HARRY_POTTER: &str = "\
name,mother,father,trait
Harry,Lily,James,
James,,,1
Lily,,,0
";

pub const WEASLEY: &str = "\
name,mother,father,trait
Arthur,,,0
Charlie,Molly,Arthur,0
Fred,Molly,Arthur,1
Ginny,Molly,Arthur,
Molly,,,
Ron,Molly,Arthur,
";

pub fn write_dataset(label: &str, contents: &str) -> io::Result<PathBuf> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base_dir = std::env::temp_dir().join("heredity-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    fs::create_dir_all(&base_dir)?;

    let path = base_dir.join("family.csv");
    fs::write(&path, contents)?;
    Ok(path)
}

/// One person's printed distributions.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonReport {
    pub name: String,
    /// Indexed by gene count.
    pub genes: [f64; 3],
    pub has_trait: f64,
    pub no_trait: f64,
}

pub fn parse_report(stdout: &str) -> Vec<PersonReport> {
    let mut reports: Vec<PersonReport> = Vec::new();
    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "Gene:" || trimmed == "Trait:" {
            continue;
        }
        if !line.starts_with(' ') {
            let name = trimmed.strip_suffix(':').expect("person line ends with ':'");
            reports.push(PersonReport {
                name: name.to_string(),
                genes: [f64::NAN; 3],
                has_trait: f64::NAN,
                no_trait: f64::NAN,
            });
            continue;
        }
        let (key, value) = trimmed.split_once(": ").expect("value line has ': '");
        let value: f64 = value.parse().expect("probability is a number");
        let report = reports.last_mut().expect("value before any person");
        match key {
            "0" => report.genes[0] = value,
            "1" => report.genes[1] = value,
            "2" => report.genes[2] = value,
            "True" => report.has_trait = value,
            "False" => report.no_trait = value,
            other => panic!("unexpected key {other}"),
        }
    }
    reports
}
