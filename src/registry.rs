//! A registry of matches for hosts that run several games at once.
//!
//! Each game sits behind its own [`Mutex`], so mutating calls against one match are serialized
//! while different matches can be played concurrently. The map itself is behind a [`RwLock`] that
//! is only held for the duration of a lookup, insertion or removal.

use crate::error::{ParseError, RegistryError};
use crate::game::Game;
use crate::preset::boards;
use crate::rules::Ruleset;
use log::trace;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use uuid::Uuid;

/// Length of a generated match id.
const ID_LEN: usize = 8;

/// A short random identifier for a match.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MatchId(String);

impl MatchId {
    /// Generate a new random id from the first characters of a v4 UUID.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(uuid.chars().take(ID_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A shared handle to a single registered game.
pub type MatchHandle = Arc<Mutex<Game>>;

/// Matches keyed by [`MatchId`].
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: RwLock<HashMap<MatchId, MatchHandle>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing game under a fresh id.
    pub fn insert(&self, game: Game) -> MatchId {
        // A poisoned lock still guards a consistent map: every write is a single insert or remove.
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        let mut id = MatchId::generate();
        while matches.contains_key(&id) {
            id = MatchId::generate();
        }
        matches.insert(id.clone(), Arc::new(Mutex::new(game)));
        trace!("Registered match {id}; {} matches in registry", matches.len());
        id
    }

    /// Create a game on the standard board with the given rules.
    pub fn create(&self, rules: Ruleset) -> Result<MatchId, ParseError> {
        Ok(self.insert(Game::new(rules, boards::STANDARD)?))
    }

    /// Create a game with the standard board and rules.
    pub fn create_standard(&self) -> MatchId {
        self.insert(Game::default())
    }

    /// Look up a match by id.
    pub fn get(&self, id: &MatchId) -> Result<MatchHandle, RegistryError> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);
        matches
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NoSuchMatch(id.to_string()))
    }

    /// Run `f` against the given match while holding its lock.
    pub fn with_match<F, R>(&self, id: &MatchId, f: F) -> Result<R, RegistryError>
    where
        F: FnOnce(&mut Game) -> R,
    {
        let handle = self.get(id)?;
        // Game state is only ever replaced whole, so a poisoned game is still consistent.
        let mut game = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut game))
    }

    /// Remove a match from the registry. Handles already obtained through [`Self::get`] remain
    /// usable.
    pub fn remove(&self, id: &MatchId) -> Result<(), RegistryError> {
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        match matches.remove(id) {
            Some(_) => {
                trace!("Removed match {id}; {} matches in registry", matches.len());
                Ok(())
            }
            None => Err(RegistryError::NoSuchMatch(id.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.matches.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ids of all registered matches, in sorted order.
    pub fn ids(&self) -> Vec<MatchId> {
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<MatchId> = matches.keys().cloned().collect();
        ids.sort();
        ids
    }
}
