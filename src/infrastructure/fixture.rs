//! JSON fixtures of brick data
//!
//! The format follows a database dump: an array of records with `model`,
//! `pk` and `fields`. Only `sober.brick` records are read; records of other
//! models (settings, users) are skipped.
//!
//! ```json
//! [
//!   {"model": "sober.brick", "pk": 1, "fields": {
//!     "type": "thesis", "parent": null, "title": "...", "content": "...",
//!     "cached_avg_vote": 0.0,
//!     "creation_datetime": "2019-01-01T10:00:00Z",
//!     "update_datetime": "2019-01-01T10:00:00Z"}}
//! ]
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::IoResultExt;
use crate::domain::{Brick, BrickArena, BrickId, BrickType};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

/// Model name of brick records.
pub const BRICK_MODEL: &str = "sober.brick";

#[derive(Debug, Serialize, Deserialize)]
struct FixtureRecord {
    model: String,
    pk: BrickId,
    #[serde(default)]
    fields: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct BrickFields {
    #[serde(rename = "type")]
    brick_type: BrickType,
    parent: Option<BrickId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    cached_avg_vote: f64,
    creation_datetime: DateTime<Utc>,
    update_datetime: DateTime<Utc>,
}

impl BrickFields {
    fn into_brick(self, id: BrickId) -> Brick {
        Brick {
            id,
            brick_type: self.brick_type,
            parent: self.parent,
            title: self.title,
            content: self.content,
            cached_avg_vote: self.cached_avg_vote,
            creation_datetime: self.creation_datetime,
            update_datetime: self.update_datetime,
        }
    }

    fn from_brick(brick: &Brick) -> Self {
        Self {
            brick_type: brick.brick_type,
            parent: brick.parent,
            title: brick.title.clone(),
            content: brick.content.clone(),
            cached_avg_vote: brick.cached_avg_vote,
            creation_datetime: brick.creation_datetime,
            update_datetime: brick.update_datetime,
        }
    }
}

/// Parse the brick records of a fixture document.
pub fn parse_bricks(json: &str) -> Result<Vec<Brick>, serde_json::Error> {
    let records: Vec<FixtureRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .filter(|record| record.model == BRICK_MODEL)
        .map(|record| {
            serde_json::from_value::<BrickFields>(record.fields)
                .map(|fields| fields.into_brick(record.pk))
        })
        .collect()
}

/// Serialize bricks as a fixture document, ordered by primary key.
pub fn to_json<'a>(
    bricks: impl IntoIterator<Item = &'a Brick>,
) -> Result<String, serde_json::Error> {
    let records = bricks
        .into_iter()
        .sorted_by_key(|brick| brick.id)
        .map(|brick| {
            serde_json::to_value(BrickFields::from_brick(brick)).map(|fields| FixtureRecord {
                model: BRICK_MODEL.to_string(),
                pk: brick.id,
                fields,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string_pretty(&records)
}

/// Loads and saves brick arenas as fixture files.
pub struct FixtureStore {
    fs: Arc<dyn FileSystem>,
}

impl FixtureStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> InfraResult<BrickArena> {
        let json = self.fs.read_to_string(path).with_path_context("read fixture", path)?;
        let bricks = parse_bricks(&json).map_err(|e| InfraError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("load: {} bricks from {}", bricks.len(), path.display());
        Ok(BrickArena::from_bricks(bricks)?)
    }

    #[instrument(level = "debug", skip(self, arena))]
    pub fn save(&self, path: &Path, arena: &BrickArena) -> InfraResult<()> {
        let json = to_json(arena.iter()).map_err(|e| InfraError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.fs
            .ensure_parent(path)
            .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
        self.fs
            .write(path, &format!("{json}\n"))
            .map_err(|e| InfraError::io(format!("write fixture {}", path.display()), e))?;
        debug!("save: {} bricks to {}", arena.len(), path.display());
        Ok(())
    }
}
