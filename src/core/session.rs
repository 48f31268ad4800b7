//! core/session.rs
//!
//! One editing session: a rule set plus at most one loaded file.
//!
//! This is the piece a front end holds on to. It owns the file IO around the
//! engine (load, save, cover art) and turns "nothing loaded" into
//! [`Error::NoFileLoaded`] instead of letting the engine run on nothing.

use std::path::{Path, PathBuf};

use super::audio::probe_audio_info;
use super::error::{Error, Result};
use super::reconcile::{ReconcileReport, reconcile_all};
use super::rules::RuleConfig;
use super::store::{FieldStore, TagStore, mapping};
use super::tags::util::{describe_frame, frame_key};
use super::tags::{self, art};
use super::types::{AudioInfo, MetadataListing};

#[derive(Debug)]
struct LoadedFile {
    path: PathBuf,
    store: TagStore,
    audio: Option<AudioInfo>,
}

#[derive(Debug)]
pub struct Session {
    rules: RuleConfig,
    loaded: Option<LoadedFile>,
}

impl Session {
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            rules,
            loaded: None,
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(RuleConfig::load(path)?))
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Swap in a freshly loaded rule set.
    pub fn set_rules(&mut self, rules: RuleConfig) {
        self.rules = rules;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|f| f.path.as_path())
    }

    pub fn audio_info(&self) -> Option<&AudioInfo> {
        self.loaded.as_ref().and_then(|f| f.audio.as_ref())
    }

    /// Open `path`, replacing whatever was loaded before.
    ///
    /// A file without an ID3 tag loads as an empty tag. Audio probing is
    /// best-effort: failures are logged and leave `audio_info()` empty.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let tag = tags::read_tag(path)?;
        let audio = match probe_audio_info(path) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read audio info");
                None
            }
        };

        tracing::info!(path = %path.display(), frames = tag.frames().count(), "file loaded");
        self.loaded = Some(LoadedFile {
            path: path.to_path_buf(),
            store: TagStore::new(tag),
            audio,
        });
        Ok(())
    }

    /// Write the current tag back to the loaded file.
    pub fn save_file(&self) -> Result<()> {
        let file = self.file()?;
        tags::write_tag(file.store.tag(), &file.path)?;
        tracing::info!(path = %file.path.display(), "tags saved");
        Ok(())
    }

    /// Run the cleanup pass over the loaded file (in memory; call
    /// [`save_file`](Self::save_file) to persist).
    pub fn check_and_correct_all(&mut self) -> Result<ReconcileReport> {
        let Some(file) = self.loaded.as_mut() else {
            return Err(Error::NoFileLoaded);
        };
        Ok(reconcile_all(&mut file.store, &self.rules))
    }

    /// First value of a simplified field.
    pub fn get_field(&self, key: &str) -> Result<Option<String>> {
        let file = self.file()?;
        Ok(file
            .store
            .simplified_values(key)
            .and_then(|values| values.into_iter().next()))
    }

    /// Replace a simplified field with a single value.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        if mapping::backing_for(key).is_none() {
            return Err(Error::UnknownField(key.to_string()));
        }
        let file = self.file_mut()?;
        file.store
            .set_simplified_values(key, vec![value.to_string()]);
        Ok(())
    }

    /// Snapshot of every field for display.
    pub fn listing(&self) -> Result<MetadataListing> {
        let file = self.file()?;
        let store = &file.store;

        let fields = store
            .simplified_keys()
            .into_iter()
            .filter_map(|k| store.simplified_values(&k).map(|v| (k, v)))
            .collect();

        let extra_frames = store
            .tag()
            .frames()
            .filter_map(|frame| {
                let id = frame_key(frame);
                (!store.is_shadowed_by_field(&id)).then(|| (id, describe_frame(frame)))
            })
            .collect();

        Ok(MetadataListing {
            path: file.path.clone(),
            fields,
            extra_frames,
            audio: file.audio.clone(),
        })
    }

    /// (image bytes, mime type) of the first embedded picture.
    pub fn album_art(&self) -> Result<Option<(Vec<u8>, String)>> {
        Ok(art::embedded_art(self.file()?.store.tag()))
    }

    pub fn set_album_art(&mut self, data: Vec<u8>, mime_type: &str) -> Result<()> {
        let file = self.file_mut()?;
        art::set_front_cover(file.store.tag_mut(), data, mime_type);
        Ok(())
    }

    /// Returns how many pictures were removed.
    pub fn remove_album_art(&mut self) -> Result<usize> {
        let file = self.file_mut()?;
        Ok(art::remove_all_art(file.store.tag_mut()))
    }

    fn file(&self) -> Result<&LoadedFile> {
        self.loaded.as_ref().ok_or(Error::NoFileLoaded)
    }

    fn file_mut(&mut self) -> Result<&mut LoadedFile> {
        self.loaded.as_mut().ok_or(Error::NoFileLoaded)
    }
}
