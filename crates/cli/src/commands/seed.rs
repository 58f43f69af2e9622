//! Seed the data directory with the built-in dataset.

use std::path::Path;

use noievoi_site::store::{ContentStore, FileStorage, Storage, keys};
use tracing::info;

use super::CliError;

/// Write the seed dataset into `data_dir`.
///
/// Refuses to touch a directory that already holds content unless `force`
/// is set, in which case every collection is replaced and the admin session
/// flag is cleared.
///
/// # Errors
///
/// Returns `CliError::AlreadySeeded` for existing data without `force`, or
/// a storage error if the directory cannot be written.
pub fn run(data_dir: &Path, force: bool) -> Result<(), CliError> {
    let storage = FileStorage::open(data_dir)?;
    if !force && storage.get(keys::CONTENT)?.is_some() {
        return Err(CliError::AlreadySeeded(data_dir.to_path_buf()));
    }

    let mut store = ContentStore::open(Box::new(storage))?;
    store.reset_to_seed()?;

    info!(
        dir = %data_dir.display(),
        content = store.list_content().len(),
        "Seed data written"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::open_store;

    #[test]
    fn test_seed_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();
        assert!(dir.path().join("content.json").exists());
        assert!(dir.path().join("admin-users.json").exists());
    }

    #[test]
    fn test_seed_refuses_existing_data_without_force() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();
        assert!(matches!(
            run(dir.path(), false),
            Err(CliError::AlreadySeeded(_))
        ));
        run(dir.path(), true).unwrap();
    }

    #[test]
    fn test_force_restores_deleted_content() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();
        let seeded = {
            let mut store = open_store(dir.path()).unwrap();
            let id = store.list_content().first().unwrap().id.clone();
            store.delete_content(&id).unwrap();
            store.list_content().len() + 1
        };

        run(dir.path(), true).unwrap();
        let store = open_store(dir.path()).unwrap();
        assert_eq!(store.list_content().len(), seeded);
    }
}
