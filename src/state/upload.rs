/// Sequential upload queue
///
/// Files are uploaded strictly one at a time, in the order they were selected.
/// The queue hands out the next `UploadTask` only after the previous one settles,
/// so there is never more than one request in flight.
use std::collections::VecDeque;
use std::path::PathBuf;

use super::data::UploadReceipt;
use super::toast::Toasts;
use crate::error::ApiError;

/// One file of a batch, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub path: PathBuf,
    /// Display name (file name component of `path`)
    pub name: String,
    /// 1-based position within the batch
    pub index: usize,
}

impl UploadTask {
    fn new(path: PathBuf, index: usize) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self { path, name, index }
    }
}

/// What the caller should do after a file settled
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum UploadStep {
    /// Start this file next
    Next(UploadTask),
    /// The batch is over: reload the asset list and status
    BatchComplete,
}

#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: VecDeque<PathBuf>,
    current: Option<UploadTask>,
    /// Files in the running batch, finished or not
    total: usize,
    /// 0..=100
    progress: f32,
    /// Files the user picked or dropped for the running batch
    selection: Vec<PathBuf>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add files to the queue.
    ///
    /// Returns the task to start when the queue was idle. Files added while a
    /// batch is running join that batch. An empty selection changes nothing.
    pub fn enqueue(&mut self, files: Vec<PathBuf>) -> Option<UploadTask> {
        if files.is_empty() {
            return None;
        }

        self.total += files.len();
        self.selection.extend(files.iter().cloned());
        self.pending.extend(files);

        if self.current.is_some() {
            tracing::debug!("Appended to running batch, now {} files", self.total);
            return None;
        }

        self.start_next()
    }

    /// Record transport progress for the file in flight
    pub fn set_progress(&mut self, percent: f32) {
        if self.current.is_some() {
            self.progress = percent.clamp(0.0, 100.0);
        }
    }

    /// The file in flight settled: toast the outcome and pick what comes next.
    ///
    /// One file failing never stops the rest of the batch.
    pub fn finish(
        &mut self,
        result: Result<UploadReceipt, ApiError>,
        toasts: &mut Toasts,
    ) -> UploadStep {
        if let Some(task) = self.current.take() {
            match result {
                Ok(_) => {
                    toasts.success(format!("✅ {} uploaded successfully!", task.name));
                }
                Err(error) => {
                    toasts.error(format!("❌ Failed to upload {}: {}", task.name, error));
                }
            }
        }

        if let Some(next) = self.start_next() {
            return UploadStep::Next(next);
        }

        tracing::info!("📤 Upload batch of {} files finished", self.total);
        self.total = 0;
        self.progress = 0.0;
        self.selection.clear();
        UploadStep::BatchComplete
    }

    fn start_next(&mut self) -> Option<UploadTask> {
        let path = self.pending.pop_front()?;
        let index = self.total - self.pending.len();
        let task = UploadTask::new(path, index);

        self.progress = 0.0;
        self.current = Some(task.clone());
        Some(task)
    }

    /// Progress indicator is shown while a batch runs
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn current(&self) -> Option<&UploadTask> {
        self.current.as_ref()
    }

    pub fn selection(&self) -> &[PathBuf] {
        &self.selection
    }

    /// "Uploading banner.png (2/5)..."
    pub fn label(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|task| format!("Uploading {} ({}/{})...", task.name, task.index, self.total))
    }
}

/// Percentage of `sent` over `total`, or `None` when the length is not computable
pub fn percent(sent: u64, total: u64) -> Option<f32> {
    if total == 0 {
        return None;
    }
    Some((sent as f64 / total as f64 * 100.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::toast::ToastKind;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| PathBuf::from(format!("/tmp/{name}"))).collect()
    }

    /// Runs a whole batch the way `update` does, recording every request issued
    fn drive(
        queue: &mut UploadQueue,
        toasts: &mut Toasts,
        files: Vec<PathBuf>,
        mut server: impl FnMut(&UploadTask) -> Result<UploadReceipt, ApiError>,
    ) -> (Vec<String>, usize) {
        let mut attempts = Vec::new();
        let mut reloads = 0;

        let mut next = queue.enqueue(files);
        while let Some(task) = next {
            // Exactly one file in flight at any time
            assert_eq!(queue.current(), Some(&task));
            attempts.push(task.name.clone());

            let result = server(&task);
            next = match queue.finish(result, toasts) {
                UploadStep::Next(task) => Some(task),
                UploadStep::BatchComplete => {
                    reloads += 1;
                    None
                }
            };
        }

        (attempts, reloads)
    }

    #[test]
    fn test_one_attempt_per_file_in_order() {
        let mut queue = UploadQueue::new();
        let mut toasts = Toasts::new();

        let (attempts, reloads) = drive(
            &mut queue,
            &mut toasts,
            paths(&["a.png", "b.mp4", "c.jpg"]),
            |_| Ok(UploadReceipt::default()),
        );

        assert_eq!(attempts, ["a.png", "b.mp4", "c.jpg"]);
        assert_eq!(reloads, 1);
        assert_eq!(toasts.len(), 3);
        assert!(toasts.iter().all(|t| t.kind == ToastKind::Success));
        assert_eq!(
            toasts.iter().next().unwrap().message,
            "✅ a.png uploaded successfully!"
        );
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let mut queue = UploadQueue::new();
        let mut toasts = Toasts::new();

        let (attempts, reloads) = drive(
            &mut queue,
            &mut toasts,
            paths(&["a.png", "dup.png", "c.png"]),
            |task| {
                if task.name == "dup.png" {
                    Err(ApiError::Server("File \"dup.png\" already exists".into()))
                } else {
                    Ok(UploadReceipt::default())
                }
            },
        );

        assert_eq!(attempts.len(), 3);
        assert_eq!(reloads, 1);

        let messages: Vec<_> = toasts.iter().map(|t| t.message.clone()).collect();
        assert_eq!(
            messages[1],
            "❌ Failed to upload dup.png: File \"dup.png\" already exists"
        );
        assert_eq!(toasts.iter().filter(|t| t.kind == ToastKind::Error).count(), 1);
    }

    #[test]
    fn test_empty_selection_is_a_no_op() {
        let mut queue = UploadQueue::new();
        assert_eq!(queue.enqueue(Vec::new()), None);
        assert!(!queue.is_active());
        assert!(queue.selection().is_empty());
        assert_eq!(queue.label(), None);
    }

    #[test]
    fn test_batch_end_resets_indicator_and_selection() {
        let mut queue = UploadQueue::new();
        let mut toasts = Toasts::new();

        let first = queue.enqueue(paths(&["a.png", "b.png"])).unwrap();
        assert_eq!(queue.label().as_deref(), Some("Uploading a.png (1/2)..."));
        assert_eq!(first.index, 1);
        assert_eq!(queue.selection().len(), 2);

        queue.set_progress(40.0);
        assert_eq!(queue.progress(), 40.0);

        let step = queue.finish(Ok(UploadReceipt::default()), &mut toasts);
        assert!(matches!(step, UploadStep::Next(ref task) if task.index == 2));
        // Each file starts from zero
        assert_eq!(queue.progress(), 0.0);
        assert_eq!(queue.label().as_deref(), Some("Uploading b.png (2/2)..."));

        queue.set_progress(100.0);
        let step = queue.finish(Err(ApiError::network("reset")), &mut toasts);
        assert_eq!(step, UploadStep::BatchComplete);
        assert!(!queue.is_active());
        assert_eq!(queue.progress(), 0.0);
        assert!(queue.selection().is_empty());
    }

    #[test]
    fn test_files_added_mid_batch_join_it() {
        let mut queue = UploadQueue::new();
        let mut toasts = Toasts::new();

        let first = queue.enqueue(paths(&["a.png"])).unwrap();
        assert_eq!(first.name, "a.png");

        // Second drop while a.png is in flight: nothing new starts
        assert_eq!(queue.enqueue(paths(&["b.png", "c.png"])), None);
        assert_eq!(queue.label().as_deref(), Some("Uploading a.png (1/3)..."));

        let step = queue.finish(Ok(UploadReceipt::default()), &mut toasts);
        let UploadStep::Next(second) = step else {
            panic!("expected another file");
        };
        assert_eq!(second.name, "b.png");
        assert_eq!(second.index, 2);
    }

    #[test]
    fn test_progress_ignored_when_idle() {
        let mut queue = UploadQueue::new();
        queue.set_progress(70.0);
        assert_eq!(queue.progress(), 0.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), None);
        assert_eq!(percent(50, 200), Some(25.0));
        assert_eq!(percent(200, 200), Some(100.0));
    }
}
