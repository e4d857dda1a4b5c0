use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};

use crate::errors::ServiceError;

/// A single JSON document kept in a file.
///
/// Reads always go to disk, so edits made to the file while the process runs
/// are picked up on the next request. Writers are serialized through a mutex
/// and replace the file via a temp file plus rename.
pub struct JsonDocumentStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocumentStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the document at `path`, writing `seed()` first if the file is missing.
    pub async fn open<P, F>(path: P, seed: F) -> Result<Self, ServiceError>
    where
        P: Into<PathBuf>,
        F: FnOnce() -> T,
    {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("create {}: {e}", parent.display())))?;
        }

        match fs::metadata(&file_path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => write_atomic(&file_path, &seed()).await?,
            Err(e) => return Err(ServiceError::Storage(format!("stat {}: {e}", file_path.display()))),
        }

        Ok(Self { file_path, write_lock: Mutex::new(()), _doc: PhantomData })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the current document from disk.
    pub async fn read(&self) -> Result<T, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {e}", self.file_path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", self.file_path.display())))
    }

    /// Read-modify-write under the writer lock. Nothing is written when `f` fails.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read().await?;
        let out = f(&mut doc)?;
        write_atomic(&self.file_path, &doc).await?;
        Ok(out)
    }
}

async fn write_atomic<T: Serialize>(path: &Path, doc: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)
        .await
        .map_err(|e| ServiceError::Storage(format!("write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| ServiceError::Storage(format!("rename to {}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_document_store_{}/doc.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn seeds_missing_file_and_persists_updates() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonDocumentStore::<BTreeMap<String, u32>>::open(&path, || {
            BTreeMap::from([("a".to_string(), 1)])
        })
        .await?;
        assert_eq!(store.read().await?.get("a"), Some(&1));

        let len = store
            .update(|doc| {
                doc.insert("b".into(), 2);
                Ok(doc.len())
            })
            .await?;
        assert_eq!(len, 2);

        // reopening must not re-seed
        let reopened = JsonDocumentStore::<BTreeMap<String, u32>>::open(&path, BTreeMap::new).await?;
        assert_eq!(reopened.read().await?.len(), 2);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_leaves_file_untouched() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonDocumentStore::<Vec<u32>>::open(&path, || vec![1, 2]).await?;
        let res: Result<(), _> = store
            .update(|doc| {
                doc.push(3);
                Err(ServiceError::Validation("nope".into()))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(store.read().await?, vec![1, 2]);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonDocumentStore::<Vec<u32>>::open(&path, Vec::new).await?;
        fs::write(&path, b"{not json").await?;
        assert!(matches!(store.read().await, Err(ServiceError::Storage(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
