use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{unbounded, Sender};

use crate::article::Article;
use crate::error::Result;

/// Write the full article collection to `path` as a pretty-printed JSON
/// array. Every field round-trips verbatim, so a later `load_articles`
/// reproduces the collection exactly, in order.
pub fn save_articles(path: &Path, articles: &[Article]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    let mut f = File::create(path)?;
    let json = serde_json::to_string_pretty(articles)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

/// Read the article collection back from `path`.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let mut f = File::open(path)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let articles = serde_json::from_str(&buf)?;
    Ok(articles)
}

/// Background write queue for snapshots.
///
/// `queue` never blocks and never fails the caller: a create returns to the
/// client before its snapshot hits disk, and a crash in that window loses
/// the most recent write(s). Write errors are logged, not raised. When
/// several snapshots are queued, only the newest is written.
pub struct SnapshotWriter {
    tx: Sender<Vec<Article>>,
    worker: thread::JoinHandle<()>,
}

impl SnapshotWriter {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = unbounded::<Vec<Article>>();
        let worker = thread::spawn(move || {
            while let Ok(mut snapshot) = rx.recv() {
                // Collapse the backlog; every snapshot is the full
                // collection, so newer supersedes older.
                while let Ok(newer) = rx.try_recv() {
                    snapshot = newer;
                }
                if let Err(err) = save_articles(&path, &snapshot) {
                    tracing::error!(error = %err, path = %path.display(), "failed to save articles");
                }
            }
        });
        Self { tx, worker }
    }

    /// Hand a snapshot to the worker. Best-effort: if the worker is gone
    /// the snapshot is dropped and the loss is logged.
    pub fn queue(&self, snapshot: Vec<Article>) {
        if self.tx.send(snapshot).is_err() {
            tracing::warn!("snapshot writer stopped, dropping save");
        }
    }

    /// Drain the queue and wait for the last write to finish. The only
    /// synchronous path to durability; used by tests and graceful exits.
    pub fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        let _ = worker.join();
    }
}
