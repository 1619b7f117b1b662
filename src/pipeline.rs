//! Raw text + filter + template -> placed labels, recomputed from scratch.
//!
//! Preview and PDF both read from one [`Labels`] value, so they always agree on
//! which records are printed and where pages break.

use crate::filter::FilterSelection;
use crate::layout::{paginate, placement};
use crate::model::{Dataset, LabelGeometry, Placement, Record};
use crate::records::parse_dataset;
use crate::template;

/// Everything the host currently has selected.
#[derive(Clone, Copy, Debug)]
pub struct PipelineInput<'a> {
    pub raw_text: &'a str,
    pub filter: &'a FilterSelection,
    pub template: &'a str,
    pub geometry: &'a LabelGeometry,
}

/// One record in its grid slot.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    /// Index into [`Dataset::records`].
    pub record_index: usize,
    pub placement: Placement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    pub dataset: Dataset,
    /// Surviving record indices, in source order.
    pub selected: Vec<usize>,
    pub template: String,
    pub geometry: LabelGeometry,
}

pub fn run(input: &PipelineInput) -> Labels {
    let dataset = parse_dataset(input.raw_text);
    let selected: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| input.filter.accepts(record))
        .map(|(i, _)| i)
        .collect();

    let unknown = template::unknown_fields(input.template, &dataset.fields);
    if !unknown.is_empty() && !dataset.is_empty() {
        log::warn!("template references unknown fields: {}", unknown.join(", "));
    }
    log::debug!(
        "pipeline: {} of {} records selected",
        selected.len(),
        dataset.records.len()
    );

    Labels {
        dataset,
        selected,
        template: input.template.to_string(),
        geometry: *input.geometry,
    }
}

impl Labels {
    pub fn fields(&self) -> &[String] {
        &self.dataset.fields
    }

    pub fn record_count(&self) -> usize {
        self.dataset.records.len()
    }

    pub fn filtered(&self) -> Vec<&Record> {
        self.selected
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    /// Labels grouped by page, each with its grid slot.
    pub fn pages(&self) -> Vec<Vec<PlacedLabel>> {
        let capacity = self.geometry.capacity();
        paginate(&self.selected, capacity)
            .into_iter()
            .enumerate()
            .map(|(page_idx, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(pos, &record_index)| PlacedLabel {
                        record_index,
                        placement: placement(page_idx * capacity + pos, &self.geometry),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        match self.geometry.capacity() {
            0 => 0,
            capacity => self.selected.len().div_ceil(capacity),
        }
    }

    pub fn record(&self, label: &PlacedLabel) -> &Record {
        &self.dataset.records[label.record_index]
    }
}
