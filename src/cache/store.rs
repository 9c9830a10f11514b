//! JSON-on-disk record store
//!
//! One file per panel under the XDG cache directory. Entries carry the time
//! they were written; staleness is judged against a max age at read time, and
//! stale entries are still returned so a cold start has something to show.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// On-disk envelope around a cached record
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    saved_at: DateTime<Utc>,
    record: T,
}

/// A record read back from disk
#[derive(Debug)]
pub struct Cached<T> {
    pub record: T,
    /// When the record was written
    #[allow(dead_code)]
    pub saved_at: DateTime<Utc>,
    /// Whether the record is older than the caller's max age
    pub is_stale: bool,
}

/// Reads and writes panel records under the XDG cache directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens the store at the platform cache location
    /// (`~/.cache/baymirror/` on Linux). `None` when no home directory can
    /// be determined.
    pub fn open() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "baymirror")?;
        Some(Self {
            dir: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Opens the store at an explicit directory.
    #[allow(dead_code)]
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Writes a record under `key`, creating the cache directory as needed.
    pub fn save<T: Serialize>(&self, key: &str, record: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let envelope = Envelope {
            saved_at: Utc::now(),
            record,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(key), json)
    }

    /// Reads the record under `key`, if present and parseable.
    ///
    /// A record older than `max_age` comes back with `is_stale` set rather
    /// than being dropped.
    pub fn load<T: DeserializeOwned>(&self, key: &str, max_age: chrono::Duration) -> Option<Cached<T>> {
        let content = fs::read_to_string(self.path_for(key)).ok()?;
        let envelope: Envelope<T> = serde_json::from_str(&content).ok()?;
        let age = Utc::now().signed_duration_since(envelope.saved_at);
        Some(Cached {
            record: envelope.record,
            saved_at: envelope.saved_at,
            is_stale: age > max_age,
        })
    }
}

/// Collapses a key to lowercase alphanumerics and underscores so it is safe
/// as a file name, e.g. `wind/3rd Ave Channel` → `wind_3rd_ave_channel`.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
