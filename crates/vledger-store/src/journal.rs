use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vledger_types::Key;

use crate::entry::Versioned;
use crate::error::{StoreError, StoreResult};
use crate::index::VersionIndex;
use crate::traits::{HistoryIter, RangeIter, VersionedStore};

/// One journaled write.
///
/// On-disk framing:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized JournalEntry)]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub version: u64,
    pub key: String,
    pub value: Vec<u8>,
    pub recorded_at: DateTime<Utc>,
}

/// Flush/sync strategy for the journal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// `fsync` after every write (safest, highest latency).
    EveryWrite,
    /// Rely on OS page-cache buffering.
    #[default]
    OsDefault,
}

/// Configuration for the journal store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub sync_mode: SyncMode,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

struct JournalState {
    file: File,
    /// End of the last complete frame.
    offset: u64,
    index: VersionIndex,
}

/// Durable versioned store backed by an append-only journal file.
///
/// The whole journal is replayed into memory on open. Unreadable frames are
/// skipped and replay resumes at the next valid frame. Bytes after the last
/// valid frame (a crash mid-write) are copied to a `.discarded-<offset>`
/// sidecar and cut off so new frames append cleanly.
pub struct JournalStore {
    path: PathBuf,
    config: JournalConfig,
    state: RwLock<JournalState>,
}

impl JournalStore {
    /// Open (or create) a journal at `path` and replay it.
    pub fn open(path: &Path, config: JournalConfig) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let (entries, valid_len) = decode_frames(&bytes);

        if valid_len < bytes.len() as u64 {
            // Keep the unreadable tail aside before cutting it off so new
            // frames append right after the last valid one.
            let sidecar = discarded_tail_path(path, valid_len);
            fs::write(&sidecar, &bytes[valid_len as usize..])?;
            warn!(
                path = %path.display(),
                valid_len,
                file_len = bytes.len(),
                saved_to = %sidecar.display(),
                "discarding unreadable journal tail"
            );
            file.set_len(valid_len)?;
        }

        let mut index = VersionIndex::default();
        for entry in entries {
            if entry.version <= index.last_version() {
                warn!(version = entry.version, "out-of-order journal version; skipping entry");
                continue;
            }
            index.apply(Key::from(entry.key), entry.version, entry.value, entry.recorded_at);
        }

        info!(
            path = %path.display(),
            keys = index.key_count(),
            versions = index.version_count(),
            "journal opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            config,
            state: RwLock::new(JournalState {
                file,
                offset: valid_len,
                index,
            }),
        })
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte length of the journal's valid frames.
    pub fn offset(&self) -> u64 {
        self.state.read().expect("lock poisoned").offset
    }

    /// Number of keys with a current value.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").index.key_count()
    }

    /// Returns `true` if the journal holds no writes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&self, key: &str, expected: Option<Option<u64>>, value: Vec<u8>) -> StoreResult<u64> {
        let mut state = self.state.write().expect("lock poisoned");
        if let Some(expected) = expected {
            state.index.check_version(key, expected)?;
        }

        let entry = JournalEntry {
            version: state.index.next_version(),
            key: key.to_owned(),
            value,
            recorded_at: Utc::now(),
        };
        let frame = encode_frame(&entry)?;

        if let Err(e) = write_frame(&mut state.file, &frame, self.config.sync_mode) {
            // Cut back to the last complete frame so the journal stays replayable.
            let offset = state.offset;
            if let Err(trunc) = state.file.set_len(offset) {
                warn!(offset, error = %trunc, "failed to discard partial journal frame");
            }
            return Err(e.into());
        }

        let entry_offset = state.offset;
        state.offset += frame.len() as u64;
        debug!(key, version = entry.version, offset = entry_offset, "journal append");

        let version = entry.version;
        state
            .index
            .apply(Key::from(entry.key), version, entry.value, entry.recorded_at);
        Ok(version)
    }
}

impl VersionedStore for JournalStore {
    fn get_versioned(&self, key: &str) -> StoreResult<Option<Versioned>> {
        Ok(self.state.read().expect("lock poisoned").index.current(key))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64> {
        self.append(key, None, value)
    }

    fn put_if_version(
        &self,
        key: &str,
        expected: Option<u64>,
        value: Vec<u8>,
    ) -> StoreResult<u64> {
        self.append(key, Some(expected), value)
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeIter<'_>> {
        let entries = self.state.read().expect("lock poisoned").index.scan(start, end);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn history_of(&self, key: &str) -> StoreResult<HistoryIter<'_>> {
        let entries = self.state.read().expect("lock poisoned").index.history(key);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }
}

impl std::fmt::Debug for JournalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalStore")
            .field("path", &self.path)
            .field("offset", &self.offset())
            .finish()
    }
}

fn encode_frame(entry: &JournalEntry) -> StoreResult<Vec<u8>> {
    let payload =
        bincode::serialize(entry).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len()).map_err(|_| {
        StoreError::Serialization(format!(
            "journal entry of {} bytes exceeds frame limit",
            payload.len()
        ))
    })?;
    let crc = crc32fast::hash(&payload);

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&crc.to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

fn write_frame(file: &mut File, frame: &[u8], sync_mode: SyncMode) -> std::io::Result<()> {
    file.write_all(frame)?;
    file.flush()?;
    if sync_mode == SyncMode::EveryWrite {
        file.sync_all()?;
    }
    Ok(())
}

/// Decode every valid frame and return them with the end offset of the last
/// one.
///
/// A frame that is unreadable (bad length, CRC mismatch, undecodable payload)
/// is skipped by scanning forward for the next frame that checks out, so a
/// damaged frame in the middle of the journal does not hide the frames after
/// it. Bytes after the last valid frame are a torn tail.
fn decode_frames(bytes: &[u8]) -> (Vec<JournalEntry>, u64) {
    let mut entries = Vec::new();
    let mut offset = 0usize;
    let mut valid_end = 0usize;

    while offset + HEADER_SIZE <= bytes.len() {
        match read_frame(bytes, offset) {
            Ok((entry, end)) => {
                entries.push(entry);
                offset = end;
                valid_end = end;
            }
            Err(reason) => match resync(bytes, offset + 1) {
                Some(next) => {
                    warn!(offset, skipped = next - offset, reason, "skipping corrupt journal bytes");
                    offset = next;
                }
                None => break,
            },
        }
    }

    if valid_end < bytes.len() {
        warn!(
            offset = valid_end,
            file_len = bytes.len(),
            "no valid journal frame after offset; stopping recovery"
        );
    }

    debug!(recovered = entries.len(), "journal recovery complete");
    (entries, valid_end as u64)
}

/// Decode the frame starting at `offset`, returning it and its end offset.
fn read_frame(bytes: &[u8], offset: usize) -> Result<(JournalEntry, usize), &'static str> {
    let header = &bytes[offset..offset + HEADER_SIZE];
    let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

    let end = offset + HEADER_SIZE + length;
    if length == 0 || end > bytes.len() {
        return Err("invalid frame length");
    }

    let payload = &bytes[offset + HEADER_SIZE..end];
    if crc32fast::hash(payload) != expected_crc {
        return Err("CRC mismatch");
    }
    let entry = bincode::deserialize::<JournalEntry>(payload).map_err(|_| "undecodable entry")?;
    Ok((entry, end))
}

/// First offset at or after `from` where a complete valid frame starts.
fn resync(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len().saturating_sub(HEADER_SIZE - 1)).find(|&at| read_frame(bytes, at).is_ok())
}

/// Sidecar file that keeps a discarded journal tail.
fn discarded_tail_path(path: &Path, offset: u64) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".discarded-{offset}"));
    path.with_file_name(name)
}
