//! Background recomputation of display stats on save-file changes.
//!
//! Each watched file gets its own named worker thread fed through an
//! `mpsc` queue, so at most one computation per file runs at a time.
//! Change events that pile up while a computation runs collapse into one.
//! Results are published into [`LatestStats`] as a whole `Arc` swap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::core_api::{CoreError, CoreErrorCode, DisplayStats, Engine};
use crate::savegame::load_session;

/// Most recently computed stats, replaced wholesale on every publish.
#[derive(Debug, Default)]
pub struct LatestStats {
    current: RwLock<Option<Arc<DisplayStats>>>,
}

impl LatestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, stats: DisplayStats) -> Arc<DisplayStats> {
        let stats = Arc::new(stats);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&stats));
        stats
    }

    pub fn get(&self) -> Option<Arc<DisplayStats>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

enum Job {
    Recompute,
    Flush(Sender<()>),
    Shutdown,
}

struct Worker {
    tx: Sender<Job>,
    handle: Option<JoinHandle<()>>,
}

/// Dispatches change events to per-file workers.
pub struct Recomputer {
    engine: Engine,
    latest: Arc<LatestStats>,
    workers: HashMap<PathBuf, Worker>,
}

impl Recomputer {
    pub fn new(engine: Engine, latest: Arc<LatestStats>) -> Self {
        Self {
            engine,
            latest,
            workers: HashMap::new(),
        }
    }

    pub fn latest(&self) -> &Arc<LatestStats> {
        &self.latest
    }

    /// Queue a recomputation for `path`, starting its worker on first use.
    pub fn notify(&mut self, path: &Path) -> Result<(), CoreError> {
        if !self.workers.contains_key(path) {
            let worker = spawn_worker(path.to_path_buf(), self.engine.clone(), Arc::clone(&self.latest))?;
            self.workers.insert(path.to_path_buf(), worker);
        }
        let worker = self
            .workers
            .get(path)
            .ok_or_else(|| CoreError::new(CoreErrorCode::Io, "worker vanished"))?;
        worker.tx.send(Job::Recompute).map_err(|_| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("recompute worker for {} has exited", path.display()),
            )
        })
    }

    /// Block until every queued event has been processed.
    pub fn flush(&self) {
        let acks: Vec<_> = self
            .workers
            .values()
            .filter_map(|worker| {
                let (ack_tx, ack_rx) = mpsc::channel();
                worker.tx.send(Job::Flush(ack_tx)).ok().map(|_| ack_rx)
            })
            .collect();
        for ack in acks {
            let _ = ack.recv();
        }
    }

    pub fn shutdown(&mut self) {
        for (path, mut worker) in self.workers.drain() {
            let _ = worker.tx.send(Job::Shutdown);
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    error!(path = %path.display(), "recompute worker panicked");
                }
            }
        }
    }
}

impl Drop for Recomputer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_worker(path: PathBuf, engine: Engine, latest: Arc<LatestStats>) -> Result<Worker, CoreError> {
    let (tx, rx) = mpsc::channel();
    let name = format!(
        "recompute-{}",
        path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default()
    );
    let handle = thread::Builder::new()
        .name(name)
        .spawn(move || worker_main(&path, &engine, &latest, rx))
        .map_err(|e| CoreError::new(CoreErrorCode::Io, format!("failed to spawn worker: {e}")))?;
    Ok(Worker {
        tx,
        handle: Some(handle),
    })
}

fn worker_main(path: &Path, engine: &Engine, latest: &LatestStats, rx: Receiver<Job>) {
    while let Ok(job) = rx.recv() {
        match job {
            Job::Recompute => {
                let mut acks = Vec::new();
                let mut stop = false;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        Job::Recompute => debug!(path = %path.display(), "coalesced change event"),
                        Job::Flush(ack) => acks.push(ack),
                        Job::Shutdown => {
                            stop = true;
                            break;
                        }
                    }
                }
                recompute(path, engine, latest);
                for ack in acks {
                    let _ = ack.send(());
                }
                if stop {
                    break;
                }
            }
            Job::Flush(ack) => {
                let _ = ack.send(());
            }
            Job::Shutdown => break,
        }
    }
}

fn recompute(path: &Path, engine: &Engine, latest: &LatestStats) {
    match load_session(engine, path) {
        Ok(session) => {
            let stats = latest.publish(session.display_stats());
            info!(
                path = %path.display(),
                name = %stats.name,
                level = stats.level,
                "published stats"
            );
        }
        Err(e) => error!(path = %path.display(), "recompute failed, keeping previous stats: {e}"),
    }
}
