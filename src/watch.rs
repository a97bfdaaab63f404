use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};

/// Watches the scene config file on a background thread. The receiver gets one message
/// per change event; callers coalesce them.
pub fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let mut watcher = match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        }) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config watcher unavailable: {e}");
                return;
            }
        };
        if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
            log::warn!("cannot watch {}: {e}", path.display());
            return;
        }
        log::info!("watching {} for changes", path.display());
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}
