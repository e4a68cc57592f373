//! Single-QSO record: an insertion-ordered field map with typed
//! accessors derived on demand.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hashbrown::HashMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};

use crate::util::{make_field, parse_date, parse_time};

/// One logged contact.
///
/// Fields are raw name/value strings keyed by the lowercase ADIF field
/// name. Insertion order is preserved so serialization is deterministic,
/// but equality compares content only. Typed views (dates, times) are
/// computed from the raw strings on every call; there is no cached
/// derived state to fall out of sync.
#[derive(Debug, Clone, Default)]
pub struct AdifRecord {
    fields: HashMap<String, String>,
    order: Vec<String>,
}

impl AdifRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a field by name. `None` means the field is absent,
    /// which is distinct from a field holding an empty string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Sets a field, appending it to the iteration order if new.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !self.fields.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.fields.insert(name, value.into());
    }

    /// True when the record holds the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| self.fields.get(name).map(|v| (name.as_str(), v.as_str())))
    }

    /// Merges another record into this one, field by field.
    ///
    /// A field from `other` lands when this record lacks it, when the
    /// incoming value is strictly longer (longer likely carries more
    /// information), or when `force_overwrite` is set. Different fields
    /// of one call can resolve in different directions.
    pub fn merge(&mut self, other: &AdifRecord, force_overwrite: bool) {
        for (name, value) in other.iter() {
            let take = match self.get(name) {
                None => true,
                Some(mine) => force_overwrite || value.chars().count() > mine.chars().count(),
            };
            if take {
                self.set(name, value);
            }
        }
    }

    /// Bucketing key for duplicate detection: callsign, band, mode, and
    /// the raw QSO date, with missing components as empty segments.
    ///
    /// Two records sharing a key are only candidates; callers still
    /// compare times before treating them as the same QSO.
    pub fn match_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.get("callsign").unwrap_or_default().to_uppercase(),
            self.get("band").unwrap_or_default().to_lowercase(),
            self.get("mode").unwrap_or_default().to_uppercase(),
            self.get("qso_date").unwrap_or_default(),
        )
    }

    /// QSO date parsed from the `qso_date` field, or `None` when the
    /// field is absent or malformed.
    pub fn qso_date(&self) -> Option<NaiveDate> {
        self.parse_date_field("qso_date")
    }

    /// Start time parsed from the `time_on` field.
    pub fn time_on(&self) -> Option<NaiveTime> {
        self.parse_time_field("time_on")
    }

    /// End time parsed from the `time_off` field.
    pub fn time_off(&self) -> Option<NaiveTime> {
        self.parse_time_field("time_off")
    }

    /// Combined `qso_date` + `time_on`, or `None` when either is
    /// missing or unparseable.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        Some(self.qso_date()?.and_time(self.time_on()?))
    }

    fn parse_date_field(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(|v| parse_date(v).ok())
    }

    fn parse_time_field(&self, name: &str) -> Option<NaiveTime> {
        self.get(name).and_then(|v| parse_time(v).ok())
    }
}

/// Equality is content-only; two records with the same fields in a
/// different insertion order are equal.
impl PartialEq for AdifRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for AdifRecord {}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for AdifRecord {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

/// Renders the record as one ADIF line: space-separated
/// `<name:len>value` tokens followed by `<eor>`.
impl fmt::Display for AdifRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, "{} ", make_field(name, value))?;
        }
        f.write_str("<eor>")
    }
}

/// Serializes as a plain map in insertion order.
impl Serialize for AdifRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Deserializes from a map, keeping the document's key order.
impl<'de> Deserialize<'de> for AdifRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = AdifRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ADIF field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = AdifRecord::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    record.set(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
