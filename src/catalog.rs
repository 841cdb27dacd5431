//! Entity catalog.
//!
//! Loads character definitions from JSON keyed by name:
//!
//! ```json
//! {
//!   "baker":  { "team": "good", "bounty": 2, "moves": { "left": "look", "down": "point" } },
//!   "forger": { "team": "bad",  "moves": { "up": "listen" } }
//! }
//! ```
//!
//! Entries are kept in name order. Entries whose team is neither `good` nor
//! `bad` are logged and skipped; vehicles are fixed constants and never come
//! from the catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::board::entity::{Direction, Entity, MoveKind, Moves, Team};
use crate::board::grid::SLOT_COUNT;
use crate::error::CatalogError;

/// A character record as it appears in the catalog JSON.
#[derive(Debug, Clone, Deserialize)]
struct RawEntity {
    team: String,
    #[serde(default)]
    bounty: u32,
    #[serde(default)]
    moves: BTreeMap<Direction, MoveKind>,
}

/// An immutable set of placeable entities.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    /// Builds a catalog from already-constructed entities.
    pub fn new(entities: Vec<Entity>) -> Self {
        Catalog { entities }
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, RawEntity> = serde_json::from_str(json)?;
        let mut entities = Vec::with_capacity(raw.len());

        for (name, record) in raw {
            let team = match Team::from_name(&record.team) {
                Some(t @ (Team::Good | Team::Bad)) => t,
                _ => {
                    warn!(entity = %name, team = %record.team, "skipping entity on unknown team");
                    continue;
                }
            };
            let moves = Moves::from_pairs(record.moves);
            entities.push(Entity::new(name, team, moves).with_bounty(record.bounty));
        }

        debug!(entities = entities.len(), "catalog parsed");
        Ok(Catalog { entities })
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// All entities in name order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks an entity up by name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Iterates over the members of one team.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.team == team)
    }

    /// Returns the nine-entity pool for a team, in name order.
    pub fn pool(&self, team: Team) -> Result<Vec<Entity>, CatalogError> {
        let pool: Vec<Entity> = self.team(team).cloned().collect();
        if pool.len() != SLOT_COUNT {
            return Err(CatalogError::WrongTeamSize {
                team: team.name().to_string(),
                found: pool.len(),
            });
        }
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "clerk":  { "team": "good", "bounty": 3, "moves": { "left": "look", "down": "point" } },
        "archer": { "team": "bad", "moves": { "up": "listen" } },
        "ghost":  { "team": "neutral", "moves": {} }
    }"#;

    #[test]
    fn parses_entities_in_name_order() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        let names: Vec<&str> = catalog.entities().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["archer", "clerk"]);

        let clerk = catalog.get("clerk").unwrap();
        assert_eq!(clerk.team, Team::Good);
        assert_eq!(clerk.bounty, 3);
        assert_eq!(clerk.moves.get(Direction::Left), Some(MoveKind::Look));
        assert_eq!(clerk.moves.get(Direction::Down), Some(MoveKind::Point));
        assert!(!clerk.moves.supports(Direction::Right));

        let archer = catalog.get("archer").unwrap();
        assert_eq!(archer.bounty, 0);
        assert_eq!(archer.moves.count(), 1);
    }

    #[test]
    fn unknown_team_is_skipped() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        assert!(catalog.get("ghost").is_none());
    }

    #[test]
    fn vehicle_team_is_skipped() {
        let catalog =
            Catalog::from_json_str(r#"{ "boat": { "team": "vehicle" } }"#).unwrap();
        assert!(catalog.entities().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json_str("{ not json"),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{ "a": { "team": "good", "moves": { "sideways": "look" } } }"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn pool_requires_nine() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        match catalog.pool(Team::Good) {
            Err(CatalogError::WrongTeamSize { team, found }) => {
                assert_eq!(team, "good");
                assert_eq!(found, 1);
            }
            other => panic!("expected WrongTeamSize, got {:?}", other),
        }
    }

    #[test]
    fn pool_of_nine() {
        let entities = (0..9)
            .map(|i| Entity::new(format!("g{}", i), Team::Good, Moves::NONE))
            .chain((0..2).map(|i| Entity::new(format!("b{}", i), Team::Bad, Moves::NONE)))
            .collect();
        let catalog = Catalog::new(entities);
        assert_eq!(catalog.pool(Team::Good).unwrap().len(), 9);
        assert!(catalog.pool(Team::Bad).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
