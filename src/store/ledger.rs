use crate::common::{error::StoreError, money::Money};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::PathBuf,
};
use tracing::debug;

/// Owns the append-only sales ledger. Lines are never rewritten, renumbered
/// or removed.
///
/// The sequence number is derived from the current line count, and the caller
/// pairs `next_sequence_number` with `append` itself; there is no atomic
/// count-then-append. Safe only under the single-writer assumption shared by
/// all the stores.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Count of existing ledger lines plus one; a missing file starts at 1.
    pub fn next_sequence_number(&self) -> Result<u64, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().count() as u64 + 1),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(1),
            Err(e) => Err(e.into()),
        }
    }

    /// Appends one `Bill <sequence>: <amount>` line, amount with two decimals.
    pub fn append(&self, sequence_number: u64, final_amount: Money) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "Bill {sequence_number}: {final_amount}")?;

        debug!(sequence_number, amount = %final_amount, "ledger entry appended");
        Ok(())
    }
}
