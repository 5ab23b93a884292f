use crate::game_repr::PositionKey;
use super::negamax::TERMINAL_THRESHOLD;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/*-------FILE FORMAT--------*/

// one entry per line, space separated
// <key:u128 decimal> <depth> <best_value> <flag 0|1|2>

/// Node type for transposition table entries
///
/// The discriminant is the flag written to table files.
/// - LowerBound: value is at least this (the node failed high)
/// - UpperBound: value is at most this (the node failed low)
/// - Exact: the node was searched inside its window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    LowerBound = 0,
    UpperBound = 1,
    Exact = 2,
}

impl NodeType {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(NodeType::LowerBound),
            1 => Some(NodeType::UpperBound),
            2 => Some(NodeType::Exact),
            _ => None,
        }
    }
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionEntry {
    /// Remaining depth when this position was evaluated
    pub depth: u8,
    /// Value for the side that moved into the position
    pub best_value: i32,
    pub node_type: NodeType,
}

impl TranspositionEntry {
    /// Whether the stored value proves a forced result regardless of depth
    pub fn is_decided(&self) -> bool {
        if self.best_value.abs() <= TERMINAL_THRESHOLD {
            return false;
        }
        match self.node_type {
            NodeType::Exact => true,
            NodeType::LowerBound => self.best_value > 0,
            NodeType::UpperBound => self.best_value < 0,
        }
    }
}

/// Outcome of [`TranspositionTable::probe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The stored value settles the node
    Cutoff(i32),
    /// Search on, with the window narrowed by a stored bound
    Window { alpha: i32, beta: i32 },
    Miss,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open table file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create table file {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("i/o error on table data")]
    Io(#[from] io::Error),
}

/// Summary of a [`TranspositionTable::read_from`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Memo of searched positions keyed by the exact position key.
///
/// The key is a bijection of the position, so there are no collisions and
/// no verification field is needed.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    table: HashMap<PositionKey, TranspositionEntry>,
    /// Statistics: probes that produced a cutoff or a narrowed window
    pub hits: u64,
    /// Statistics: probes that found nothing usable
    pub misses: u64,
    pub stores: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key` for a node with `depth` plies left and window `(alpha, beta)`.
    pub fn probe(&mut self, key: PositionKey, depth: u8, alpha: i32, beta: i32) -> Probe {
        let Some(entry) = self.table.get(&key) else {
            self.misses += 1;
            return Probe::Miss;
        };

        // Forced results hold at any depth
        if entry.is_decided() {
            self.hits += 1;
            return Probe::Cutoff(entry.best_value);
        }

        if entry.depth < depth {
            self.misses += 1;
            return Probe::Miss;
        }

        self.hits += 1;
        let (mut alpha, mut beta) = (alpha, beta);
        match entry.node_type {
            NodeType::Exact => return Probe::Cutoff(entry.best_value),
            NodeType::LowerBound => alpha = alpha.max(entry.best_value),
            NodeType::UpperBound => beta = beta.min(entry.best_value),
        }
        if alpha >= beta {
            Probe::Cutoff(entry.best_value)
        } else {
            Probe::Window { alpha, beta }
        }
    }

    /// Record the fail-soft `value` of a node searched with window `(alpha, beta)`.
    /// Existing entries are overwritten.
    pub fn store(&mut self, key: PositionKey, depth: u8, value: i32, alpha: i32, beta: i32) {
        let node_type = if value <= alpha {
            NodeType::UpperBound
        } else if value >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        };
        self.insert(key, TranspositionEntry { depth, best_value: value, node_type });
    }

    pub fn insert(&mut self, key: PositionKey, entry: TranspositionEntry) {
        self.stores += 1;
        self.table.insert(key, entry);
    }

    pub fn get(&self, key: PositionKey) -> Option<&TranspositionEntry> {
        self.table.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionKey, &TranspositionEntry)> {
        self.table.iter()
    }

    /// Clear the table and its statistics
    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
        self.stores = 0;
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries whose value is a proven win or loss
    pub fn decided_count(&self) -> usize {
        self.table.values().filter(|e| e.is_decided()).count()
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Write every entry in the line format, sorted by key so output is stable
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), TableError> {
        let mut keys: Vec<&PositionKey> = self.table.keys().collect();
        keys.sort();
        for key in keys {
            let e = &self.table[key];
            writeln!(out, "{} {} {} {}", key, e.depth, e.best_value, e.node_type.code())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Merge entries from the line format. Malformed lines and zero keys are
    /// skipped and counted; later lines win over earlier ones.
    pub fn read_from<R: BufRead>(&mut self, input: R) -> Result<LoadReport, TableError> {
        let mut report = LoadReport::default();
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some((key, entry)) => {
                    self.table.insert(key, entry);
                    report.loaded += 1;
                }
                None => {
                    log::debug!("skipping table line {:?}", line);
                    report.skipped += 1;
                }
            }
        }
        Ok(report)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| TableError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(BufWriter::new(file))?;
        log::info!("saved {} table entries to {}", self.size(), path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.read_from(BufReader::new(file))?;
        if report.skipped > 0 {
            log::warn!("skipped {} malformed lines in {}", report.skipped, path.display());
        }
        log::info!(
            "loaded {} table entries from {} ({} decided)",
            report.loaded,
            path.display(),
            self.decided_count()
        );
        Ok(report)
    }
}

fn parse_line(line: &str) -> Option<(PositionKey, TranspositionEntry)> {
    let mut fields = line.split_whitespace();
    let key: PositionKey = fields.next()?.parse().ok()?;
    if key.is_zero() {
        return None;
    }
    let depth: u8 = fields.next()?.parse().ok()?;
    let best_value: i32 = fields.next()?.parse().ok()?;
    let node_type = NodeType::from_code(fields.next()?.parse().ok()?)?;
    Some((key, TranspositionEntry { depth, best_value, node_type }))
}
