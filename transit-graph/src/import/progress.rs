use super::{ImportError, ImportJob, ImportProgress, ImportSummary};
use kdam::{term, Bar, BarExt};

/// receives job lifecycle and progress events from an
/// [`super::ImportPlan`] run. progress is observational only.
pub trait ImportObserver {
    fn job_started(&mut self, _job: &ImportJob) -> Result<(), ImportError> {
        Ok(())
    }

    fn progress(&mut self, job: &ImportJob, progress: &ImportProgress);

    fn job_finished(&mut self, _job: &ImportJob, _summary: &ImportSummary) {}

    fn job_failed(&mut self, _job: &ImportJob, _error: &ImportError) {}
}

/// ignores every event
pub struct SilentProgress;

impl ImportObserver for SilentProgress {
    fn progress(&mut self, _job: &ImportJob, _progress: &ImportProgress) {}
}

/// one terminal progress bar per job, redrawn in place with the record
/// count and elapsed time after every committed batch.
#[derive(Default)]
pub struct TerminalProgress {
    bar: Option<Bar>,
}

impl TerminalProgress {
    fn close(&mut self) {
        if self.bar.take().is_some() {
            eprintln!();
            if let Err(e) = term::show_cursor() {
                log::debug!("failure restoring terminal cursor: {e}");
            }
        }
    }
}

impl ImportObserver for TerminalProgress {
    fn job_started(&mut self, job: &ImportJob) -> Result<(), ImportError> {
        term::hide_cursor().map_err(|e| ImportError::ProgressError(e.to_string()))?;
        let bar = Bar::builder()
            .desc(job.source_file().display().to_string())
            .unit(" records")
            .unit_scale(true)
            .build()
            .map_err(ImportError::ProgressError)?;
        self.bar = Some(bar);
        Ok(())
    }

    fn progress(&mut self, _job: &ImportJob, progress: &ImportProgress) {
        if let Some(bar) = self.bar.as_mut() {
            bar.set_postfix(format!("batches={}", progress.batches));
            if let Err(e) = bar.update_to(progress.records) {
                log::debug!("failure drawing progress bar: {e}");
            }
        }
    }

    fn job_finished(&mut self, _job: &ImportJob, _summary: &ImportSummary) {
        self.close();
    }

    fn job_failed(&mut self, _job: &ImportJob, _error: &ImportError) {
        self.close();
    }
}
