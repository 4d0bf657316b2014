use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tracing::info;

use crate::adapters::range::BTreeRangeIterator;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvPair, StateIterator};

/// File-backed key-value store.
///
/// Keeps the whole state in memory and rewrites a single binary file on
/// every write. Layout: `[key_len:u32][key][value_len:u32][value]...`,
/// little-endian lengths. Writes go to a temp file that is renamed over the
/// original, so a crash leaves either the old or the new state on disk.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
    open_iterators: Arc<AtomicUsize>,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing state if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let data = Self::load_from_file(&path)?;
            info!("[cl-01] Loaded {} keys from {}", data.len(), path.display());
            data
        } else {
            info!("[cl-01] No existing storage file at {}", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            data,
            path,
            open_iterators: Arc::default(),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut bytes = Vec::new();
        std::fs::File::open(path)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(io_error)?;

        let mut data = BTreeMap::new();
        let mut cursor = 0;
        while cursor < bytes.len() {
            let key = read_chunk(&bytes, &mut cursor)?;
            let value = read_chunk(&bytes, &mut cursor)?;
            data.insert(key, value);
        }
        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = || KVStoreError::CorruptionError {
        message: format!("truncated entry at offset {}", cursor),
    };

    let len_end = cursor.checked_add(4).ok_or_else(truncated)?;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(truncated)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let end = len_end.checked_add(len).ok_or_else(truncated)?;
    let chunk = bytes.get(len_end..end).ok_or_else(truncated)?.to_vec();
    *cursor = end;
    Ok(chunk)
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![(key.to_vec(), value.to_vec())])
    }

    fn atomic_batch_write(&mut self, writes: Vec<KvPair>) -> Result<(), KVStoreError> {
        let mut staged = self.data.clone();
        staged.extend(writes);
        let previous = std::mem::replace(&mut self.data, staged);

        if let Err(e) = self.save_to_file() {
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn range_by_prefix<'a>(
        &'a self,
        prefix: &[u8],
    ) -> Result<Box<dyn StateIterator + 'a>, KVStoreError> {
        Ok(Box::new(BTreeRangeIterator::new(
            &self.data,
            prefix,
            Arc::clone(&self.open_iterators),
        )))
    }
}
