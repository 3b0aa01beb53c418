use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mmtf::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Renders batch decode progress as a single bar on stderr. Failed files are
/// printed above the bar as they complete.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total_files } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_files);
                    pb_guard.set_position(0);
                    if let Some(style) = Self::bar_style() {
                        pb_guard.set_style(style);
                    }
                    pb_guard.set_message("Decoding");
                }
                Progress::FileDone { path, succeeded } => {
                    if !succeeded {
                        pb_guard.println(format!("  ✗ {}", path.display()));
                    }
                    pb_guard.inc(1);
                }
                Progress::BatchFinish => {
                    let len = pb_guard.length().unwrap_or(0);
                    pb_guard.set_position(len);
                    pb_guard.finish_and_clear();
                }
            }
            drop(pb_guard);
        })
    }

    fn bar_style() -> Option<ProgressStyle> {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
            .ok()
            .map(|style| style.progress_chars("##-"))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_batch_progress() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::BatchStart { total_files: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
        }

        callback(Progress::FileDone {
            path: PathBuf::from("a.mmtf"),
            succeeded: true,
        });
        callback(Progress::FileDone {
            path: PathBuf::from("b.mmtf"),
            succeeded: false,
        });
        assert_eq!(handler.pb.lock().unwrap().position(), 2);

        callback(Progress::BatchFinish);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 3);
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_is_usable_from_worker_threads() {
        let handler = CliProgressHandler::new();
        let callback = Arc::new(handler.get_callback());
        callback(Progress::BatchStart { total_files: 8 });

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let cb = Arc::clone(&callback);
                thread::spawn(move || {
                    cb(Progress::FileDone {
                        path: PathBuf::from(format!("{i}.mmtf")),
                        succeeded: true,
                    })
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(handler.pb.lock().unwrap().position(), 8);
    }
}
