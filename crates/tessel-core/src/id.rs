//! Instance identifiers.
//!
//! Placed tiles are addressed by short strings (`tile_0`, `tile_1`, ...)
//! because hosts echo them back from the page. Internally they are interned
//! so snapshots can copy and compare them freely.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Sequence behind `InstanceId::generate`. Undo and reset never rewind it,
/// so a number is never handed out twice in one session.
static NEXT_TILE: AtomicU64 = AtomicU64::new(0);

const PREFIX: &str = "tile_";

/// Identifier of a placed tile instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct InstanceId(Spur);

impl InstanceId {
    /// Wrap an identifier string, e.g. one a host passed back.
    pub fn intern(name: &str) -> Self {
        Self(NAMES.get_or_intern(name))
    }

    /// `None` if no instance was ever called `name`. Unlike `intern`, an
    /// unknown string from a host does not grow the name table.
    pub fn lookup(name: &str) -> Option<Self> {
        NAMES.get(name).map(Self)
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }

    /// Next `tile_<n>` id.
    pub fn generate() -> Self {
        let n = NEXT_TILE.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{PREFIX}{n}"))
    }
}

impl From<String> for InstanceId {
    fn from(name: String) -> Self {
        Self::intern(&name)
    }
}

impl From<InstanceId> for String {
    fn from(id: InstanceId) -> Self {
        id.as_str().to_owned()
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_count_up() {
        let a = InstanceId::generate();
        let b = InstanceId::generate();
        assert_ne!(a, b);
        let n = |id: InstanceId| id.as_str()[PREFIX.len()..].parse::<u64>().unwrap();
        assert!(n(b) > n(a));
    }

    #[test]
    fn lookup_leaves_unknown_names_alone() {
        assert!(InstanceId::lookup("tile_from_nowhere").is_none());
        assert!(InstanceId::lookup("tile_from_nowhere").is_none());
        let id = InstanceId::intern("tile_known");
        assert_eq!(InstanceId::lookup("tile_known"), Some(id));
    }

    #[test]
    fn serializes_as_its_name() {
        let id = InstanceId::intern("tile_custom");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tile_custom\"");
        let back: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(format!("{id:?}"), "InstanceId(\"tile_custom\")");
    }
}
