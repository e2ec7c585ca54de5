use crate::db::Database;
use crate::error::{CropSenseError, Result};
use crate::models::{Crop, CropHealth, CropStatus};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

// Crop Queries

impl Database {
    pub fn create_crop(&self, crop: &Crop) -> Result<i64> {
        if crop.owner.is_empty() {
            return Err(CropSenseError::InvalidData("Crop has no owner".into()));
        }

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO crops (owner, name, planted_date, status, health)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    crop.owner,
                    crop.name,
                    crop.planted_date.format(DATE_FORMAT).to_string(),
                    crop.status.as_str(),
                    crop.health.as_str(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All crops belonging to `owner`, oldest record first
    pub fn get_crops_for_owner(&self, owner: &str) -> Result<Vec<Crop>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM crops WHERE owner = ?1 ORDER BY id")?;
            let rows = stmt
                .query_map([owner], StoredCrop::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter().map(StoredCrop::into_crop).collect()
        })
    }

    pub fn get_crop(&self, id: i64) -> Result<Crop> {
        self.with_conn(|conn| {
            let stored = conn
                .query_row("SELECT * FROM crops WHERE id = ?1", [id], StoredCrop::from_row)
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => {
                        CropSenseError::NotFound(format!("Crop {}", id))
                    }
                    other => other.into(),
                })?;
            stored.into_crop()
        })
    }

    pub fn update_crop_status(&self, id: i64, status: CropStatus) -> Result<()> {
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE crops SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), Utc::now().to_rfc3339(), id],
            )?)
        })?;

        if changed == 0 {
            return Err(CropSenseError::NotFound(format!("Crop {}", id)));
        }
        Ok(())
    }

    pub fn delete_crop(&self, id: i64) -> Result<()> {
        let changed = self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM crops WHERE id = ?1", [id])?)
        })?;

        if changed == 0 {
            return Err(CropSenseError::NotFound(format!("Crop {}", id)));
        }
        Ok(())
    }
}

/// Raw column values, validated into a `Crop` before leaving the store
struct StoredCrop {
    id: i64,
    owner: String,
    name: String,
    planted_date: String,
    status: String,
    health: String,
}

impl StoredCrop {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner: row.get("owner")?,
            name: row.get("name")?,
            planted_date: row.get("planted_date")?,
            status: row.get("status")?,
            health: row.get("health")?,
        })
    }

    fn into_crop(self) -> Result<Crop> {
        let planted_date = NaiveDate::parse_from_str(&self.planted_date, DATE_FORMAT)
            .map_err(|e| {
                CropSenseError::InvalidData(format!(
                    "Crop {} has unparseable planted_date '{}': {}",
                    self.id, self.planted_date, e
                ))
            })?;

        let status = CropStatus::from_str(&self.status).ok_or_else(|| {
            CropSenseError::InvalidData(format!(
                "Crop {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        let health = CropHealth::from_str(&self.health).unwrap_or_else(|| {
            tracing::warn!(
                crop_id = self.id,
                health = %self.health,
                "Unknown health in database, defaulting to Good"
            );
            CropHealth::Good
        });

        Ok(Crop {
            id: Some(self.id),
            owner: self.owner,
            name: self.name,
            planted_date,
            status,
            health,
        })
    }
}
