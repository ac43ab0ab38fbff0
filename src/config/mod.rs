pub mod profile_file;

use crate::profiles::builtin::Source;
use crate::profiles::QueryProfile;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use chrono::Datelike;
use clap::Parser;
use std::path::PathBuf;

const EXAMPLE: &str = "Example:

    $ xmllint --html fhrus.html --format --xmlout --nonet --output fhrus.xml
    $ mensa-feed --year 2015 fhrus.xml > fhrus_feed.xml
    $ xmllint -noout -schema open-mensa-v2.xsd fhrus_feed.xml";

#[derive(Debug, Clone, Parser)]
#[command(name = "mensa-feed", version)]
#[command(about = "Convert a tidied canteen menu page into an OpenMensa v2 feed")]
#[command(after_help = EXAMPLE)]
pub struct CliConfig {
    /// Well-formed XML version of the menu page
    pub file: PathBuf,

    /// Fake the current year
    #[arg(long, value_name = "YYYY")]
    pub year: Option<i32>,

    /// Markup layout of the input page
    #[arg(long, value_enum, default_value_t = Source::Ruesselsheim)]
    pub source: Source,

    /// TOML file describing a custom layout; overrides --source
    #[arg(long, value_name = "FILE")]
    pub profile_file: Option<PathBuf>,

    /// Write the feed to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn settings(&self) -> RunSettings {
        match self.year {
            Some(year) => RunSettings::with_year(year),
            None => RunSettings::current(),
        }
    }

    pub fn load_profile(&self) -> Result<QueryProfile> {
        match &self.profile_file {
            Some(path) => QueryProfile::from_file(path),
            None => Ok(QueryProfile::builtin(self.source)),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("file", &self.file.to_string_lossy())?;
        if let Some(year) = self.year {
            validate_range("year", year, 1970, 9999)?;
        }
        if let Some(path) = &self.profile_file {
            validate_path("profile_file", &path.to_string_lossy())?;
        }
        if let Some(path) = &self.output {
            validate_path("output", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Fixed for the whole run; the reference year fills in headings that
/// omit the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub reference_year: i32,
}

impl RunSettings {
    pub fn with_year(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn current() -> Self {
        Self::with_year(chrono::Local::now().year())
    }
}
