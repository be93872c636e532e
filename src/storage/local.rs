use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::storage::{Bucket, ObjectKey, ObjectStorage, StorageResult, Upload};

/// Filesystem backend: `{root}/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of an object. Keys are validated on construction, so the
    /// result never escapes the bucket directory.
    pub fn object_path(&self, bucket: Bucket, key: &ObjectKey) -> PathBuf {
        key.as_str()
            .split('/')
            .fold(self.root.join(bucket.as_str()), |path, segment| {
                path.join(segment)
            })
    }

    fn collect(&self, dir: &Path, prefix: &str, found: &mut Vec<ObjectKey>) -> StorageResult<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".tmp") {
                continue;
            }
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if entry.file_type()?.is_dir() {
                self.collect(&entry.path(), &relative, found)?;
            } else {
                found.push(ObjectKey::new(relative)?);
            }
        }
        Ok(())
    }
}

impl ObjectStorage for LocalStorage {
    fn put(&self, bucket: Bucket, key: &ObjectKey, upload: &Upload) -> StorageResult<()> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("upload.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&upload.bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        log::debug!("Stored {bucket}/{key} ({} bytes)", upload.bytes.len());
        Ok(())
    }

    fn delete(&self, bucket: Bucket, key: &ObjectKey) -> StorageResult<()> {
        match fs::remove_file(self.object_path(bucket, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, bucket: Bucket, prefix: &str) -> StorageResult<Vec<ObjectKey>> {
        let prefix = prefix.trim_matches('/');
        let start = if prefix.is_empty() {
            self.root.join(bucket.as_str())
        } else {
            self.object_path(bucket, &ObjectKey::new(prefix)?)
        };
        let mut found = Vec::new();
        self.collect(&start, prefix, &mut found)?;
        found.sort();
        Ok(found)
    }

    fn exists(&self, bucket: Bucket, key: &ObjectKey) -> StorageResult<bool> {
        Ok(self.object_path(bucket, key).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> Upload {
        Upload {
            file_name: "a.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn put_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let key = ObjectKey::new("slides/1-a.jpg").unwrap();

        storage.put(Bucket::Sliders, &key, &upload()).unwrap();
        assert!(storage.exists(Bucket::Sliders, &key).unwrap());
        assert_eq!(storage.list(Bucket::Sliders, "slides").unwrap(), vec![key.clone()]);
        assert!(storage.list(Bucket::Motors, "").unwrap().is_empty());

        storage.delete(Bucket::Sliders, &key).unwrap();
        assert!(!storage.exists(Bucket::Sliders, &key).unwrap());
        // second delete is a no-op
        storage.delete(Bucket::Sliders, &key).unwrap();
    }

    #[test]
    fn delete_many_reports_nothing_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let keys = vec![ObjectKey::new("motors/x.jpg").unwrap()];
        assert!(storage.delete_many(Bucket::Motors, &keys).is_empty());
    }
}
