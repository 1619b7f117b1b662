use std::collections::BTreeSet;

use crate::model::Record;

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn passes(record: &Record, field: &str, accepted: &BTreeSet<String>) -> bool {
    let value = record.get(field);
    !is_blank(value) && value.is_some_and(|v| accepted.contains(v))
}

/// Non-empty values of `field`, deduplicated and sorted.
pub fn distinct_values(records: &[Record], field: &str) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| r.get(field))
        .filter(|v| !is_blank(*v))
        .flatten()
        .map(str::to_string)
        .collect()
}

/// An empty `field` lets everything through. Otherwise records with a blank
/// value are always dropped, whatever `accepted` holds.
pub fn apply_filter<'a>(
    records: &'a [Record],
    field: &str,
    accepted: &BTreeSet<String>,
) -> Vec<&'a Record> {
    if field.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| passes(r, field, accepted))
        .collect()
}

/// Chosen filter column and the values currently ticked for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    field: Option<String>,
    accepted: BTreeSet<String>,
}

impl FilterSelection {
    pub fn none() -> Self {
        Self::default()
    }

    /// Switching columns resets the selection to every value seen in `records`.
    pub fn select_field(&mut self, field: Option<&str>, records: &[Record]) {
        match field.filter(|f| !f.is_empty()) {
            Some(f) => {
                self.accepted = distinct_values(records, f);
                self.field = Some(f.to_string());
            }
            None => {
                self.field = None;
                self.accepted.clear();
            }
        }
    }

    /// Tick every value `records` holds for the current column.
    pub fn select_all(&mut self, records: &[Record]) {
        self.accepted = match self.field() {
            Some(field) => distinct_values(records, field),
            None => BTreeSet::new(),
        };
    }

    /// Untick everything; with a column chosen, no record passes.
    pub fn clear(&mut self) {
        self.accepted.clear();
    }

    /// The data changed under the current column: back to show-all over the
    /// new values.
    pub fn refresh(&mut self, records: &[Record]) {
        self.select_all(records);
    }

    /// Returns whether `value` is accepted after the toggle.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.accepted.remove(value) {
            false
        } else {
            self.accepted.insert(value.to_string());
            true
        }
    }

    /// Builder used when the accepted set is known up front (e.g. from the CLI).
    pub fn with_values<I, S>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: (!field.is_empty()).then(|| field.to_string()),
            accepted: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn accepted(&self) -> &BTreeSet<String> {
        &self.accepted
    }

    pub fn is_accepted(&self, value: &str) -> bool {
        self.accepted.contains(value)
    }

    pub fn accepts(&self, record: &Record) -> bool {
        match self.field() {
            None => true,
            Some(field) => passes(record, field, &self.accepted),
        }
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        apply_filter(records, self.field().unwrap_or(""), &self.accepted)
    }
}
