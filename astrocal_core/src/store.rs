//! File-backed profile and ledger store with file locking.
//!
//! Layout under the data directory:
//!
//! ```text
//! profiles/<uuid>.json          one file per profile
//! intake/<uuid>/<YYYY-MM-DD>.json   one file per day ledger
//! session.json                  the active login session
//! ```
//!
//! Every write goes through a temp file with an exclusive lock, is synced
//! to disk and then renamed over the original, so a record is either the
//! old version or the new one, never a torn mix.

use crate::{DayIntake, Error, Profile, Result, Session};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// File-backed store addressed by (profile id, date)
#[derive(Clone, Debug)]
pub struct ProfileStore {
    data_dir: PathBuf,
}

impl ProfileStore {
    /// Open a store rooted at the given data directory, creating it if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(data_dir.join("profiles"))?;
        std::fs::create_dir_all(data_dir.join("intake"))?;
        Ok(Self { data_dir })
    }

    fn profile_path(&self, id: Uuid) -> PathBuf {
        self.data_dir.join("profiles").join(format!("{}.json", id))
    }

    fn intake_dir(&self, profile_id: Uuid) -> PathBuf {
        self.data_dir.join("intake").join(profile_id.to_string())
    }

    fn intake_path(&self, profile_id: Uuid, date: NaiveDate) -> PathBuf {
        self.intake_dir(profile_id)
            .join(format!("{}.json", date.format(DATE_FORMAT)))
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Load a profile by id, `None` if it was never stored
    pub fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        let path = self.profile_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let profile: Profile = read_json_locked(&path)?;
        Ok(Some(profile))
    }

    /// Persist a profile, overwriting any previous version
    pub fn put_profile(&self, profile: &Profile) -> Result<()> {
        write_json_atomic(&self.profile_path(profile.id), profile)?;
        tracing::debug!("Saved profile {} ({})", profile.name, profile.id);
        Ok(())
    }

    /// Find a profile by its login name (exact match).
    ///
    /// Unreadable profile files are skipped with a warning so one corrupted
    /// record cannot block every login.
    pub fn find_profile_by_name(&self, name: &str) -> Result<Option<Profile>> {
        let dir = self.data_dir.join("profiles");
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            match read_json_locked::<Profile>(&path) {
                Ok(profile) if profile.name == name => return Ok(Some(profile)),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable profile file {:?}: {}", path, e);
                }
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Day ledgers
    // ------------------------------------------------------------------

    /// Load the ledger for one day.
    ///
    /// A missing or corrupted file yields an empty ledger for that date; the
    /// cached total is recomputed on load so the sum invariant holds even
    /// against a hand-edited file.
    pub fn get_day_intake(&self, profile_id: Uuid, date: NaiveDate) -> Result<DayIntake> {
        let path = self.intake_path(profile_id, date);
        if !path.exists() {
            return Ok(DayIntake::empty(date));
        }
        let mut day: DayIntake = match read_json_locked(&path) {
            Ok(day) => day,
            Err(e) => {
                tracing::warn!(
                    "Failed to read day intake {:?}: {}. Starting empty.",
                    path,
                    e
                );
                return Ok(DayIntake::empty(date));
            }
        };
        day.recompute_total();
        Ok(day)
    }

    /// Write a day ledger back, synchronously and atomically
    pub fn put_day_intake(&self, profile_id: Uuid, day: &DayIntake) -> Result<()> {
        write_json_atomic(&self.intake_path(profile_id, day.date), day)?;
        tracing::debug!(
            "Saved intake for {} ({} items, {} kcal)",
            day.date,
            day.items.len(),
            day.total_calories
        );
        Ok(())
    }

    /// The most recent day ledgers for a profile, ascending by date,
    /// bounded to `window` records.
    pub fn get_history(&self, profile_id: Uuid, window: usize) -> Result<Vec<DayIntake>> {
        let dir = self.intake_dir(profile_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            match NaiveDate::parse_from_str(stem, DATE_FORMAT) {
                Ok(date) => dates.push(date),
                Err(_) => {
                    tracing::warn!("Ignoring non-date intake file {:?}", path);
                }
            }
        }

        dates.sort();
        let recent = dates.split_off(dates.len().saturating_sub(window));

        let mut days = Vec::with_capacity(recent.len());
        for date in recent {
            days.push(self.get_day_intake(profile_id, date)?);
        }
        Ok(days)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Load the active session, `None` if nobody is logged in or the
    /// session file is unreadable
    pub fn load_session(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        match read_json_locked::<Session>(&path) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Failed to read session file {:?}: {}. Ignoring.", path, e);
                Ok(None)
            }
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        write_json_atomic(&self.session_path(), session)
    }

    pub fn clear_session(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Read and deserialize a JSON file under a shared lock
fn read_json_locked<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read_result = reader.read_to_string(&mut contents);
    file.unlock()?;
    read_result?;

    Ok(serde_json::from_str(&contents)?)
}

/// Serialize a value to JSON and atomically replace the file at `path`.
///
/// Writes to an exclusively locked temp file in the same directory, syncs
/// it to disk, then renames it over the original.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Store(format!("path {:?} has no parent directory", path)))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
