//! Sample Store sobre disco.
//!
//! Estructura: `<root>/<unit>/<direction>_<YYYYMMDD_HHMMSS_mmm>[_NNN].json`,
//! JSON con indentación. Los archivos se crean con `create_new` y nunca se
//! reescriben; una colisión dentro del mismo milisegundo avanza el contador.
//! `save` devuelve `Ok` sólo después de `sync_all` del archivo y de su
//! directorio (y de la raíz cuando el directorio de la unidad es nuevo).
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};
use pudding_core::{Direction, Envelope, SampleId, SampleStore, StoreError, UnitName};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct FsSampleStore {
    root: PathBuf,
}

impl FsSampleStore {
    /// El directorio raíz se crea en el primer `save`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.sample_dir.clone())
    }

    pub fn from_env() -> Self {
        Self::from_config(&StoreConfig::from_env())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn unit_dir(&self, unit: &UnitName) -> PathBuf {
        self.root.join(unit.as_str())
    }

    pub fn path_for(&self, id: &SampleId) -> PathBuf {
        self.unit_dir(id.unit()).join(id.file_name())
    }

    fn write_new(&self, mut id: SampleId, bytes: &[u8]) -> Result<SampleId, PersistenceError> {
        let dir = self.unit_dir(id.unit());
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(&dir, id.unit(), e))?;
            sync_dir(&self.root).map_err(|source| PersistenceError::Io { path: self.root.clone(),
                                                                         source })?;
        }
        loop {
            let path = self.path_for(&id);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_synced(file, bytes).map_err(|e| {
                                                 // no dejar muestras truncadas
                                                 if let Err(rm) = fs::remove_file(&path) {
                                                     warn!("could not remove partial sample {}: {rm}", path.display());
                                                 }
                                                 PersistenceError::Io { path: path.clone(),
                                                                        source: e }
                                             })?;
                    sync_dir(&dir).map_err(|source| PersistenceError::Io { path: dir.clone(),
                                                                           source })?;
                    return Ok(id);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("sample {id} already exists, bumping collision counter");
                    id = id.next_collision()?;
                }
                Err(e) => return Err(PersistenceError::Io { path, source: e }),
            }
        }
    }

    fn read(&self, id: &SampleId) -> Result<Envelope<Value>, PersistenceError> {
        let path = self.path_for(id);
        let raw = fs::read_to_string(&path).map_err(|e| PersistenceError::io(&path, id, e))?;
        serde_json::from_str(&raw).map_err(|source| PersistenceError::Parse { id: id.to_string(),
                                                                             source })
    }

    fn scan(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, PersistenceError> {
        let dir = self.unit_dir(unit);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::Io { path: dir, source: e }),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PersistenceError::Io { path: dir.clone(),
                                                                  source: e })?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match SampleId::from_file_name(unit.clone(), name) {
                Ok(id) if direction.map_or(true, |d| id.direction() == d) => ids.push(id),
                Ok(_) => {}
                Err(_) => debug!("ignoring non-sample file {}", entry.path().display()),
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn write_synced(mut file: File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

/// fsync del directorio: sus entradas nuevas quedan en disco.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl SampleStore for FsSampleStore {
    fn save(&self, unit: &UnitName, direction: Direction, envelope: &Envelope<Value>) -> Result<SampleId, StoreError> {
        let bytes = serde_json::to_vec_pretty(envelope).map_err(PersistenceError::Serialize)?;
        let id = SampleId::at(unit.clone(), direction, Utc::now(), 0)?;
        let id = self.write_new(id, &bytes)?;
        info!("sample saved: {}", self.path_for(&id).display());
        Ok(id)
    }

    fn load(&self, id: &SampleId) -> Result<Envelope<Value>, StoreError> {
        let envelope = self.read(id)?;
        info!("sample loaded: {id}");
        Ok(envelope)
    }

    fn list(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError> {
        Ok(self.scan(unit, direction)?)
    }
}
