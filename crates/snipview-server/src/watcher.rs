//! Snippet file watching for live previews.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use snipview_gallery::is_snippet_file;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Snippet file was created or modified
    Changed(PathBuf),

    /// Snippet file was deleted or renamed away
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::Changed(path) | WatchEvent::Removed(path) => path,
        }
    }
}

/// Coalesces bursts of events per path.
///
/// An event is released once its path has been quiet for the debounce window.
/// Later events for the same path replace earlier ones.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, (WatchEvent, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Record an event seen at `now`.
    pub fn push(&mut self, event: WatchEvent, now: Instant) {
        self.pending.insert(event.path().to_path_buf(), (event, now));
    }

    /// Take every event whose path has been quiet for the window.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<WatchEvent> {
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, (_, seen))| now.duration_since(*seen) >= self.window)
            .map(|(path, _)| path.clone())
            .collect();

        let mut events: Vec<WatchEvent> = ready
            .into_iter()
            .filter_map(|path| self.pending.remove(&path).map(|(event, _)| event))
            .collect();
        events.sort_by(|a, b| a.path().cmp(b.path()));
        events
    }

    /// How long until the next pending event is due, if any.
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.pending
            .values()
            .map(|(_, seen)| (*seen + self.window).saturating_duration_since(now))
            .min()
    }
}

/// File watcher for detecting snippet changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive debounced events.
    pub fn new(
        paths: &[PathBuf],
        debounce: Duration,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            let mut debouncer = Debouncer::new(debounce);

            loop {
                let received = match debouncer.next_timeout(Instant::now()) {
                    Some(timeout) => sync_rx.recv_timeout(timeout),
                    None => sync_rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
                };

                match received {
                    Ok(event) => {
                        let now = Instant::now();
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind) {
                                debouncer.push(e, now);
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }

                for event in debouncer.drain_ready(Instant::now()) {
                    if async_tx.blocking_send(event).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent. Non-snippet and hidden files are ignored.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    if hidden || !is_snippet_file(path) {
        return None;
    }

    match kind {
        EventKind::Remove(_) => Some(WatchEvent::Removed(path.to_path_buf())),
        // Renames report both ends as modifications
        EventKind::Create(_) | EventKind::Modify(_) if !path.exists() => {
            Some(WatchEvent::Removed(path.to_path_buf()))
        }
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(WatchEvent::Changed(path.to_path_buf()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use notify::EventKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn debouncer_coalesces_per_path() {
        let window = Duration::from_millis(300);
        let mut debouncer = Debouncer::new(window);
        let start = Instant::now();
        let a = PathBuf::from("a.jsx");
        let b = PathBuf::from("b.css");

        debouncer.push(WatchEvent::Changed(a.clone()), start);
        debouncer.push(WatchEvent::Changed(b.clone()), start);
        debouncer.push(WatchEvent::Removed(a.clone()), start + Duration::from_millis(200));

        assert_eq!(debouncer.drain_ready(start + Duration::from_millis(100)), vec![]);
        assert_eq!(
            debouncer.drain_ready(start + Duration::from_millis(300)),
            vec![WatchEvent::Changed(b)]
        );
        assert_eq!(
            debouncer.next_timeout(start + Duration::from_millis(300)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            debouncer.drain_ready(start + Duration::from_millis(500)),
            vec![WatchEvent::Removed(a)]
        );
        assert_eq!(debouncer.next_timeout(start), None);
    }

    #[test]
    fn classifies_snippet_events() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("Card.jsx");
        fs::write(&file, "").unwrap();

        assert_eq!(
            classify_event(&file, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::Changed(file.clone()))
        );
        assert_eq!(
            classify_event(&file, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Removed(file.clone()))
        );

        let gone = temp.path().join("Gone.vue");
        assert_eq!(
            classify_event(&gone, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Removed(gone.clone()))
        );
    }

    #[test]
    fn ignores_other_files() {
        let kind = EventKind::Modify(ModifyKind::Any);

        assert_eq!(classify_event(Path::new("notes.txt"), &kind), None);
        assert_eq!(classify_event(Path::new(".Card.jsx.swp"), &kind), None);
        assert_eq!(classify_event(Path::new(".hidden.js"), &kind), None);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("Button.jsx");

        let (watcher, mut rx) =
            FileWatcher::new(&[temp.path().to_path_buf()], Duration::from_millis(50)).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "function Button() { return (<button/>); }").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        let event = event.unwrap().expect("channel should not be closed");
        assert_eq!(event.path().file_name(), test_file.file_name());
    }
}
