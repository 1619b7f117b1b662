use crate::model::{Dataset, Record};
use crate::tabular::{self, Row};

/// Header row plus at least one data row, otherwise an empty dataset.
pub fn build_records(rows: &[Row]) -> Dataset {
    let [header, data @ ..] = rows else {
        return Dataset::default();
    };
    if data.is_empty() {
        return Dataset::default();
    }

    let fields: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    let records = data
        .iter()
        .map(|values| {
            fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (field.clone(), value.to_string())
                })
                .collect::<Record>()
        })
        .collect();

    Dataset { fields, records }
}

pub fn parse_dataset(raw: &str) -> Dataset {
    let rows = tabular::parse(raw);
    let dataset = build_records(&rows);
    log::debug!(
        "records: {} fields, {} records",
        dataset.fields.len(),
        dataset.records.len()
    );
    dataset
}
