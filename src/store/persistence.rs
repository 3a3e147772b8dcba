//! JSON snapshots of the whole store

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::entity::hero::Hero;
use crate::entity::pet::Pet;

/// Every pet and hero, as written to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// Write a snapshot, replacing the file only once the new content is complete
pub fn save(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<StoreSnapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PetError;
    use crate::core::types::{HeroId, PetId};
    use crate::entity::hero::NewHero;
    use chrono::{TimeZone, Utc};

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("petkeeper-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let created = Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();
        let snapshot = StoreSnapshot {
            heroes: vec![NewHero::new("Bruce", "Batman").into_hero(HeroId(1))],
            pets: vec![Pet::new(PetId(1), "Ace".into(), "dog".into(), created)],
        };
        let path = scratch_path("roundtrip");

        save(&path, &snapshot).unwrap();
        let loaded = load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(&scratch_path("does-not-exist")).unwrap_err();
        assert!(matches!(err, PetError::IoError(_)));
    }

    #[test]
    fn test_garbage_is_serde_error() {
        let path = scratch_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, PetError::SerdeError(_)));
    }
}
