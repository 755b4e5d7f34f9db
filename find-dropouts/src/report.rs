//! Output of a scan: one CSV line per dropout and a summary table.
//!

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use eyre::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace};

use dropouts_formats::Altitude;
use dropouts_tracker::{Dropout, Position, World};

use crate::Scan;

/// Flat version of a `Dropout`, with what we knew of the aircraft at the time.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DropoutRecord {
    pub hex: String,
    pub registration: Option<String>,
    #[serde(rename = "type")]
    pub model: Option<String>,
    pub flight: String,
    pub los_time: String,
    pub los_lat: f64,
    pub los_lon: f64,
    pub los_alt: String,
    pub aos_time: String,
    pub aos_lat: f64,
    pub aos_lon: f64,
    pub aos_alt: String,
    pub gap_secs: f64,
    pub distance_m: f64,
}

impl DropoutRecord {
    pub fn new(dropout: &Dropout) -> Self {
        let (los, aos) = (dropout.start(), dropout.end());

        DropoutRecord {
            hex: dropout.hex().to_owned(),
            registration: dropout.registration().map(String::from),
            model: dropout.model().map(String::from),
            flight: dropout.flight().trim().to_owned(),
            los_time: timestamp(los),
            los_lat: los.lat(),
            los_lon: los.lon(),
            los_alt: altitude(los.alt()),
            aos_time: timestamp(aos),
            aos_lat: aos.lat(),
            aos_lon: aos.lon(),
            aos_alt: altitude(aos.alt()),
            gap_secs: dropout.gap_secs(),
            distance_m: dropout.great_circle().round(),
        }
    }
}

fn timestamp(pos: &Position) -> String {
    pos.time().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn altitude(alt: Option<Altitude>) -> String {
    match alt {
        Some(Altitude::Feet(ft)) => ft.to_string(),
        Some(Altitude::Ground(_)) => "ground".to_string(),
        None => String::new(),
    }
}

/// Write every dropout as CSV into `output`, `None` or `-` being stdout.
///
#[tracing::instrument(skip(world))]
pub fn write_csv(world: &World, output: Option<&Path>) -> Result<()> {
    let out: Box<dyn io::Write> = match output {
        Some(p) if p != Path::new("-") => {
            debug!("Writing into {}", p.display());
            Box::new(File::create(p)?)
        }
        _ => Box::new(io::stdout()),
    };
    write_records(world, out)
}

/// Serialize all dropouts of `world` into `out`, header first.
///
pub fn write_records<W: io::Write>(world: &World, out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);

    // Make sure we have a header even without dropouts.
    //
    if world.dropouts().is_empty() {
        wtr.write_record(HEADER)?;
    }
    for d in world.dropouts() {
        wtr.serialize(DropoutRecord::new(d))?;
    }
    wtr.flush()?;
    trace!("{} records written", world.dropouts().len());
    Ok(())
}

const HEADER: [&str; 14] = [
    "hex",
    "registration",
    "type",
    "flight",
    "los_time",
    "los_lat",
    "los_lon",
    "los_alt",
    "aos_time",
    "aos_lat",
    "aos_lon",
    "aos_alt",
    "gap_secs",
    "distance_m",
];

/// End of run figures.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub files: usize,
    pub bad_files: usize,
    pub records: usize,
    pub stale: usize,
    pub rejected: usize,
    pub aircraft: usize,
    pub dropouts: usize,
    /// Longest gap in seconds
    pub longest_gap: f64,
    /// Longest distance in meters
    pub longest_distance: f64,
}

impl From<&Scan> for Summary {
    fn from(scan: &Scan) -> Self {
        let stats = scan.world.stats();
        let dropouts = scan.world.dropouts();

        Summary {
            files: scan.files,
            bad_files: scan.bad_files,
            records: stats.records,
            stale: stats.stale,
            rejected: stats.rejected,
            aircraft: stats.aircraft,
            dropouts: dropouts.len(),
            longest_gap: dropouts.iter().map(|d| d.gap_secs()).fold(0., f64::max),
            longest_distance: dropouts.iter().map(|d| d.great_circle()).fold(0., f64::max),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record([
            "Files",
            "Skipped",
            "Records",
            "Stale",
            "Rejected",
            "Aircraft",
            "Dropouts",
            "Longest gap",
            "Longest distance",
        ]);
        builder.push_record([
            self.files.to_string(),
            self.bad_files.to_string(),
            self.records.to_string(),
            self.stale.to_string(),
            self.rejected.to_string(),
            self.aircraft.to_string(),
            self.dropouts.to_string(),
            format!("{}s", self.longest_gap),
            format!("{:.0}m", self.longest_distance),
        ]);

        let table = builder.build().with(Style::modern()).to_string();
        write!(f, "Summary:\n{table}")
    }
}
