//! Guarded document generation.
//!
//! Only one generation may run at a time. A second request while one is in
//! flight fails with [`Error::Busy`]; there is no queue and no cancellation.
//! The busy flag is released on every exit path, panics included.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::error::Error;
use crate::model::{LabelGeometry, LabelStyle, Record};
use crate::pdf::{self, LabelSink, render_labels};
use crate::pipeline::Labels;

/// Owned snapshot of what to print, so it can move to a worker thread.
#[derive(Clone, Debug)]
pub struct LabelJob {
    pub records: Vec<Record>,
    pub template: String,
    pub style: LabelStyle,
    pub geometry: LabelGeometry,
}

impl LabelJob {
    pub fn from_labels(labels: &Labels, style: LabelStyle) -> Self {
        Self {
            records: labels.filtered().into_iter().cloned().collect(),
            template: labels.template.clone(),
            style,
            geometry: labels.geometry,
        }
    }
}

struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Generator {
    busy: Arc<AtomicBool>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<BusyGuard, Error> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy)?;
        Ok(BusyGuard(Arc::clone(&self.busy)))
    }

    /// Render the job to PDF bytes on the calling thread.
    pub fn generate(&self, job: &LabelJob) -> Result<Vec<u8>, Error> {
        let _guard = self.acquire()?;
        report(pdf::render(&job.records, &job.template, &job.style, &job.geometry))
    }

    /// Drive an arbitrary sink instead of the PDF writer. Returns pages used.
    pub fn generate_with<S: LabelSink + ?Sized>(
        &self,
        job: &LabelJob,
        sink: &mut S,
    ) -> Result<usize, Error> {
        let _guard = self.acquire()?;
        if job.records.is_empty() {
            return report(Err(Error::NoLabels));
        }
        report(render_labels(
            &job.records,
            &job.template,
            &job.style,
            &job.geometry,
            sink,
        ))
    }

    /// Render on a worker thread; the caller stays free and can poll
    /// [`Generator::is_busy`] or the returned handle.
    pub fn spawn(&self, job: LabelJob) -> Result<GenerationHandle, Error> {
        let guard = self.acquire()?;
        let handle = std::thread::Builder::new()
            .name("label-generation".into())
            .spawn(move || {
                let _guard = guard;
                report(pdf::render(&job.records, &job.template, &job.style, &job.geometry))
            })?;
        Ok(GenerationHandle { handle })
    }
}

fn report<T>(result: Result<T, Error>) -> Result<T, Error> {
    if let Err(e) = &result {
        log::error!("Label generation failed: {e}");
    }
    result
}

pub struct GenerationHandle {
    handle: JoinHandle<Result<Vec<u8>, Error>>,
}

impl GenerationHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<Vec<u8>, Error> {
        self.handle.join().map_err(|_| Error::WorkerPanicked)?
    }
}
