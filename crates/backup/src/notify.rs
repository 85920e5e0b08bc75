/// Receives restore progress.
///
/// Called after every unit of work (the categories step, the saved searches
/// step, each entry, the merged references step). The restore never waits
/// on or reacts to the notifier.
pub trait Notifier: Send + Sync {
    fn on_progress(&self, done: usize, total: usize, label: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn on_progress(&self, _done: usize, _total: usize, _label: &str) {}
}
