//! Flat-file store: one pretty-printed JSON array per collection.
//!
//! Every file is replaced by writing a sibling `*.tmp` and renaming it over
//! the target. A two-collection save stages both files and writes a commit
//! journal naming them, then swaps each target in, keeping the previous file
//! aside as `*.bak` until the swap of every target is done.
//!
//! If a swap fails, the targets already swapped are put back and the journal
//! is dropped, so the save has no effect. If the process dies mid-commit
//! instead, [`JsonFileStore::recover`] finds the journal and rolls the
//! commit forward on the next open or load.

use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    error::{AppError, AppResult},
    models::{Book, Snapshot, User},
};

use super::Store;

const JOURNAL_FILE: &str = ".commit-journal";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    books_path: PathBuf,
    users_path: PathBuf,
    journal_path: PathBuf,
}

/// How far one target got through a commit
struct Swap<'a> {
    target: &'a Path,
    backed_up: bool,
    placed: bool,
}

impl JsonFileStore {
    /// Open the store, creating its directories and completing any
    /// interrupted commit.
    pub async fn open(
        books_path: impl Into<PathBuf>,
        users_path: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let books_path = books_path.into();
        let users_path = users_path.into();
        let journal_path = books_path
            .parent()
            .map(|dir| dir.join(JOURNAL_FILE))
            .unwrap_or_else(|| PathBuf::from(JOURNAL_FILE));

        for path in [&books_path, &users_path] {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir).await?;
            }
        }

        let store = Self {
            books_path,
            users_path,
            journal_path,
        };
        store.recover().await?;

        tracing::info!(
            "JSON store ready (books: {}, users: {})",
            store.books_path.display(),
            store.users_path.display()
        );
        Ok(store)
    }

    /// Roll a journaled commit forward, if one is pending
    pub async fn recover(&self) -> AppResult<()> {
        let targets: Vec<PathBuf> = match fs::read(&self.journal_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        tracing::warn!("Completing interrupted commit of {} file(s)", targets.len());
        for target in &targets {
            // A missing staged file was already swapped in before the interruption
            rename_if_exists(&staged_path(target), target).await?;
        }
        for target in &targets {
            remove_if_exists(&backup_path(target)).await?;
        }
        remove_if_exists(&self.journal_path).await
    }

    /// Undo the swaps of a failed commit and abandon it.
    ///
    /// Should undoing fail as well, the journal is left in place and the
    /// commit is completed by the next [`recover`](Self::recover).
    async fn roll_back(&self, swaps: &[Swap<'_>]) {
        for swap in swaps.iter().rev() {
            if swap.placed {
                if let Err(e) = fs::rename(swap.target, staged_path(swap.target)).await {
                    tracing::error!("Rollback of {} failed: {}", swap.target.display(), e);
                    return;
                }
            }
            if swap.backed_up {
                if let Err(e) = fs::rename(backup_path(swap.target), swap.target).await {
                    tracing::error!("Rollback of {} failed: {}", swap.target.display(), e);
                    return;
                }
            }
        }

        if let Err(e) = remove_if_exists(&self.journal_path).await {
            tracing::error!("Could not drop commit journal: {}", e);
            return;
        }
        for target in [&self.books_path, &self.users_path] {
            if let Err(e) = remove_if_exists(&staged_path(target)).await {
                tracing::warn!("Could not remove {}: {}", staged_path(target).display(), e);
            }
        }
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load_books(&self) -> AppResult<Vec<Book>> {
        self.recover().await?;
        read_collection(&self.books_path).await
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        self.recover().await?;
        read_collection(&self.users_path).await
    }

    async fn save_books(&self, books: &[Book]) -> AppResult<()> {
        replace_file(&self.books_path, &to_pretty_json(books)?).await
    }

    async fn save_users(&self, users: &[User]) -> AppResult<()> {
        replace_file(&self.users_path, &to_pretty_json(users)?).await
    }

    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        self.recover().await?;
        let books = read_collection(&self.books_path).await?;
        let users = read_collection(&self.users_path).await?;
        Ok(Snapshot::new(books, users))
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> AppResult<()> {
        let targets = [self.books_path.as_path(), self.users_path.as_path()];
        write_synced(&staged_path(targets[0]), &to_pretty_json(&snapshot.books)?).await?;
        write_synced(&staged_path(targets[1]), &to_pretty_json(&snapshot.users)?).await?;
        replace_file(&self.journal_path, &serde_json::to_vec(&targets)?).await?;

        let mut swaps = Vec::with_capacity(targets.len());
        for target in targets {
            let mut swap = Swap {
                target,
                backed_up: false,
                placed: false,
            };
            let step = match rename_if_exists(target, &backup_path(target)).await {
                Ok(backed_up) => {
                    swap.backed_up = backed_up;
                    fs::rename(staged_path(target), target).await.map_err(AppError::from)
                }
                Err(e) => Err(e),
            };
            swap.placed = step.is_ok();
            swaps.push(swap);

            if let Err(e) = step {
                tracing::error!("Commit failed at {}, rolling back", target.display());
                self.roll_back(&swaps).await;
                return Err(e);
            }
        }

        // Committed; leftovers are cleared by the next recover if this fails
        for target in targets {
            if let Err(e) = remove_if_exists(&backup_path(target)).await {
                tracing::warn!("Could not remove {}: {}", backup_path(target).display(), e);
            }
        }
        if let Err(e) = remove_if_exists(&self.journal_path).await {
            tracing::warn!("Could not drop commit journal: {}", e);
        }
        Ok(())
    }
}

/// Read a JSON array; a missing file is an empty collection
async fn read_collection<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn staged_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

async fn write_synced(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

async fn replace_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let staged = staged_path(path);
    write_synced(&staged, bytes).await?;
    fs::rename(&staged, path).await?;
    Ok(())
}

/// Rename `from` to `to`; returns `false` if `from` does not exist
async fn rename_if_exists(from: &Path, to: &Path) -> AppResult<bool> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> AppResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
