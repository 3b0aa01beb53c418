use std::path::PathBuf;

/// Progress events emitted while decoding a batch of files.
#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total_files: u64 },
    FileDone { path: PathBuf, succeeded: bool },
    BatchFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback. Shared across worker
/// threads, so the callback must be `Send + Sync`.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.callback.is_none()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        assert!(reporter.is_silent());
        reporter.report(Progress::BatchFinish);
    }

    #[test]
    fn callback_receives_every_event() {
        let failures = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::FileDone { succeeded: false, .. } = event {
                failures.fetch_add(1, Ordering::SeqCst);
            }
        }));
        reporter.report(Progress::BatchStart { total_files: 2 });
        reporter.report(Progress::FileDone {
            path: "a.mmtf".into(),
            succeeded: true,
        });
        reporter.report(Progress::FileDone {
            path: "b.mmtf".into(),
            succeeded: false,
        });
        reporter.report(Progress::BatchFinish);
        assert!(!reporter.is_silent());
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }
}
