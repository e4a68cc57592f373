//! Time-windowed fuzzy merge of one log into another.
//!
//! Two records are the same QSO when they share callsign, band, mode,
//! and date, and their start times either agree exactly or fall within
//! a configurable window of each other.

use chrono::TimeDelta;
use hashbrown::HashMap;
use log::debug;

use crate::{
    error::{AdifError, Result},
    file::AdifFile,
    types::DEFAULT_TIME_MATCH_MIN,
};

impl AdifFile {
    /// Merges `other` into this file using the default
    /// [15-minute](crate::types::DEFAULT_TIME_MATCH_MIN) window.
    pub fn merge(&mut self, other: AdifFile) -> Result<()> {
        self.merge_within(other, DEFAULT_TIME_MATCH_MIN)
    }

    /// Merges `other` into this file, folding duplicate records
    /// together and appending the rest.
    ///
    /// Matched records are combined with the field-level longest-wins
    /// policy of [`AdifRecord::merge`](crate::record::AdifRecord::merge).
    /// Afterwards `records` is sorted ascending by `(qso_date, time_on)`;
    /// records without a parseable date or time sort first, keeping
    /// their relative order. Merging the same file twice adds nothing on
    /// the second pass, because every incoming record then finds its
    /// exact-time counterpart already present.
    ///
    /// Fails with [`AdifError::MatchKeyCollision`] if two records share
    /// a match key but disagree on the fields composing it.
    pub fn merge_within(&mut self, other: AdifFile, time_match_min: i64) -> Result<()> {
        let window = TimeDelta::minutes(time_match_min);

        // Bucket the existing records by match key so each incoming
        // record only compares against plausible duplicates. The buckets
        // are frozen for the whole merge: records appended below never
        // become candidates for later incoming records.
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in self.records.iter().enumerate() {
            buckets.entry(record.match_key()).or_default().push(idx);
        }

        for theirs in other.records {
            let key = theirs.match_key();
            let Some(candidates) = buckets.get(&key) else {
                debug!("{key} not found in existing buckets");
                self.records.push(theirs);
                continue;
            };

            let mut matched = None;
            for &idx in candidates {
                let mine = &self.records[idx];
                if mine.get("callsign") != theirs.get("callsign")
                    || mine.get("mode") != theirs.get("mode")
                    || mine.get("band") != theirs.get("band")
                    || mine.qso_date() != theirs.qso_date()
                {
                    return Err(AdifError::MatchKeyCollision { key });
                }

                // Exact time agreement (including both times absent) is
                // definitely the same QSO: stop looking. A window hit
                // stays tentative; a later candidate in the bucket can
                // still claim the record.
                if theirs.time_on() == mine.time_on() {
                    matched = Some(idx);
                    break;
                }
                let (Some(their_dt), Some(my_dt)) = (theirs.datetime(), mine.datetime()) else {
                    continue;
                };
                if their_dt >= my_dt - window && their_dt <= my_dt + window {
                    matched = Some(idx);
                }
            }

            match matched {
                Some(idx) => self.records[idx].merge(&theirs, false),
                None => self.records.push(theirs),
            }
        }

        // Stable, so records lacking a parseable date or time sort
        // first in their original relative order.
        self.records.sort_by_key(|r| (r.qso_date(), r.time_on()));
        Ok(())
    }
}
