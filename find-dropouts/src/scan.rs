//! Replay all snapshots of a directory through the tracker.
//!

use eyre::{eyre, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, trace, warn};

use dropouts_tracker::World;

use crate::{date_from_path, write_csv, Config, ScanOpts, SnapshotDir, Summary};

/// Result of one run over a directory
///
#[derive(Debug)]
pub struct Scan {
    /// Files read
    pub files: usize,
    /// Files skipped because they could not be decoded
    pub bad_files: usize,
    /// Final state
    pub world: World,
}

/// Feed every snapshot into a fresh `World`, in time order.
///
/// Without `keep_going`, the first record or file in error stops everything.
///
#[tracing::instrument(skip(src))]
pub fn scan_snapshots(src: SnapshotDir, threshold: f64, keep_going: bool) -> Result<Scan> {
    let mut world = World::with_threshold(threshold);
    let (mut files, mut bad_files) = (0, 0);

    let bar = ProgressBar::new(src.total() as u64).with_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
    );

    for res in src {
        bar.inc(1);

        let (time, snap) = match res {
            Ok(r) => r,
            Err(e) if keep_going => {
                warn!("Skipping snapshot: {}", e);
                bad_files += 1;
                continue;
            }
            Err(e) => {
                bar.abandon();
                return Err(e);
            }
        };
        files += 1;
        trace!("{}: {} aircraft", time, snap.len());

        for update in &snap.aircraft {
            if let Err(e) = world.process_aircraft(update, time) {
                if !keep_going {
                    bar.abandon();
                    return Err(eyre!("{}: {}", time, e));
                }
                warn!("{}: skipping record: {}", time, e);
            }
        }
        bar.set_message(format!("{} dropouts", world.dropouts().len()));
    }
    bar.finish_and_clear();

    info!("{} files, {:?}", files, world.stats());
    Ok(Scan {
        files,
        bad_files,
        world,
    })
}

/// Handle `scan DIR`: load snapshots, find dropouts, write the CSV and the summary.
///
#[tracing::instrument(skip(cfg))]
pub fn scan_directory(cfg: Config, opts: &ScanOpts) -> Result<()> {
    let cfg = cfg.merge(opts);
    cfg.check()?;

    let date = match cfg.date()? {
        Some(date) => date,
        None => date_from_path(&opts.dir)?,
    };
    info!("Scanning {} for {}", opts.dir.display(), date);

    let src = SnapshotDir::new(&opts.dir, date, &cfg.pattern)?;
    let scan = scan_snapshots(src, cfg.threshold, cfg.keep_going)?;

    write_csv(&scan.world, opts.output.as_deref())?;
    eprintln!("{}", Summary::from(&scan));
    Ok(())
}
