//! Directory of readsb-hist snapshots, one file every few seconds for a given day.
//!
//! File names only carry the time of day (`HHMMSSZ.json.gz`), the day itself is either given
//! or taken from the usual `YYYY/MM/DD` layout of the archive.
//!

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use eyre::Result;
use flate2::read::GzDecoder;
use tracing::{debug, trace, warn};

use dropouts_formats::Snapshot;

use crate::Status;

/// Ordered list of snapshot files, consumed as an iterator of decoded snapshots.
///
#[derive(Debug)]
pub struct SnapshotDir {
    /// Where the files are
    dir: PathBuf,
    /// Remaining files, in time order
    files: std::vec::IntoIter<(DateTime<Utc>, PathBuf)>,
    /// Total number of files found
    total: usize,
}

impl SnapshotDir {
    /// List all files in `dir` whose name matches `pattern`.
    ///
    #[tracing::instrument]
    pub fn new(dir: &Path, date: NaiveDate, pattern: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Status::NotADirectory(dir.to_string_lossy().to_string()).into());
        }

        let mut files = vec![];
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match NaiveTime::parse_from_str(name, pattern) {
                Ok(tod) => {
                    let time = Utc.from_utc_datetime(&date.and_time(tod));
                    files.push((time, path));
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        files.sort();
        debug!("{} snapshots in {}", files.len(), dir.display());

        Ok(SnapshotDir {
            dir: dir.to_path_buf(),
            total: files.len(),
            files: files.into_iter(),
        })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files found, including those already read
    ///
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for SnapshotDir {
    type Item = Result<(DateTime<Utc>, Snapshot)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (time, path) = self.files.next()?;
        Some(read_snapshot(&path).map(|snap| (time, snap)))
    }
}

/// Read one snapshot, gzip-compressed or not depending on the extension.
///
#[tracing::instrument]
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let fh = BufReader::new(File::open(path)?);
    let rdr: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => Box::new(GzDecoder::new(fh)),
        _ => Box::new(fh),
    };
    let snap = Snapshot::from_reader(rdr)?;
    trace!("{}: {} aircraft", path.display(), snap.len());
    Ok(snap)
}

/// Find the day from a `.../YYYY/MM/DD` directory.
///
pub fn date_from_path(dir: &Path) -> Result<NaiveDate> {
    let parts: Vec<_> = dir
        .components()
        .rev()
        .take(3)
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    if let [day, month, year] = parts[..] {
        let date = format!("{year}-{month}-{day}");
        if let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    Err(Status::NoDate(dir.to_string_lossy().to_string()).into())
}
