//! Bulk table population.
//!
//! Reads whitespace-separated decimal position keys, searches each decoded
//! position to the configured depth and leaves the results in the search
//! context's transposition table. Keys that do not decode on the board are
//! skipped with a warning.

use crate::agent::ai::{SearchContext, TableError};
use crate::game_repr::{BoardSize, Position, PositionKey};
use std::io::BufRead;

/// Progress is logged every this many positions
const PROGRESS_INTERVAL: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub searched: usize,
    pub skipped: usize,
    /// Table entries that are not forced results after the run
    pub undecided: usize,
}

/// Search every key in `input` into `ctx`'s table
pub fn populate_from<R: BufRead>(
    ctx: &mut SearchContext,
    size: BoardSize,
    input: R,
) -> Result<PopulateReport, TableError> {
    let mut report = PopulateReport::default();

    for line in input.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let pos = token
                .parse::<PositionKey>()
                .ok()
                .and_then(|key| Position::from_key(size, key));
            let Some(mut pos) = pos else {
                log::warn!("skipping invalid state key {:?}", token);
                report.skipped += 1;
                continue;
            };

            ctx.evaluate(&mut pos);
            report.searched += 1;
            if report.searched % PROGRESS_INTERVAL == 0 {
                log::info!("{} states searched", report.searched);
            }
        }
    }

    let table = ctx.table();
    report.undecided = table.size() - table.decided_count();
    log::info!(
        "searched {} states ({} skipped), {} undecided entries",
        report.searched,
        report.skipped,
        report.undecided
    );
    Ok(report)
}
