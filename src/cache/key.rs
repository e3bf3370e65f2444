//! Item Key Module
//!
//! Composite cache keys of the form `owner:service:name`, plus the textual
//! assignment grammar `owner:service:name=value[,ttlSeconds]` used by clients.

use std::fmt;
use std::str::FromStr;

use crate::cache::SHARD_COUNT;
use crate::error::{CacheError, Result};

// == Item ID ==
/// Identifies a cache entry by owner, service and item name.
///
/// Immutable once constructed. The owner may be empty; service and name
/// must be non-empty (enforced by the parsers, which reject malformed
/// input before it reaches the store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    /// Owning client, conventionally the server-assigned client id
    pub owner: String,
    /// Service namespace within the owner
    pub service: String,
    /// Item name; may itself contain colons
    pub name: String,
}

impl ItemId {
    // == Constructor ==
    /// Creates a new ItemId from its three parts.
    pub fn new(
        owner: impl Into<String>,
        service: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            service: service.into(),
            name: name.into(),
        }
    }

    // == Compose ==
    /// Returns the canonical colon-joined form, used as the map key and as
    /// the wire identity of an entry.
    ///
    /// Injective over triples whose owner and service contain no colon (the
    /// name is the last part, so colons inside it do not collide).
    pub fn compose(&self) -> String {
        format!("{}:{}:{}", self.owner, self.service, self.name)
    }

    // == Shard ==
    /// Returns the shard index for this key, in `[0, SHARD_COUNT)`.
    ///
    /// Folds every character of owner, service and name through an XOR
    /// accumulator, re-applying the modulo after each character. The
    /// per-character modulo narrows the intermediate range, so the
    /// distribution across shards is not uniform; kept as-is for parity
    /// with prior shard assignment.
    pub fn shard(&self) -> usize {
        let mut hash: usize = 0;
        for part in [&self.owner, &self.service, &self.name] {
            for ch in part.chars() {
                hash = (hash ^ ch as usize) % SHARD_COUNT;
            }
        }
        hash
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.owner, self.service, self.name)
    }
}

impl FromStr for ItemId {
    type Err = CacheError;

    /// Parses the `owner:service:name` form.
    ///
    /// Owner and service run up to the first two colons; the name is the
    /// remainder and may contain further colons. Service and name must be
    /// non-empty, owner may be empty.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let (owner, service, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(service), Some(name)) => (owner, service, name),
            _ => return Err(CacheError::InvalidKey(s.to_string())),
        };
        if service.is_empty() || name.is_empty() {
            return Err(CacheError::InvalidKey(s.to_string()));
        }
        Ok(ItemId::new(owner, service, name))
    }
}

// == Assignment ==
/// A parsed `owner:service:name=value[,ttlSeconds]` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The item the assignment targets
    pub id: ItemId,
    /// The value to store
    pub value: String,
    /// Optional time-to-live in seconds
    pub ttl: Option<u64>,
}

/// Parses the textual assignment grammar.
///
/// The value runs from the `=` up to the first comma; anything after the
/// comma must be a decimal TTL in seconds.
pub fn parse_assignment(s: &str) -> Result<Assignment> {
    let (key_part, rest) = s
        .split_once('=')
        .ok_or_else(|| CacheError::InvalidAssignment(s.to_string()))?;
    let id = key_part
        .parse::<ItemId>()
        .map_err(|_| CacheError::InvalidAssignment(s.to_string()))?;
    let (value, ttl) = match rest.split_once(',') {
        Some((value, ttl)) => {
            let ttl = ttl
                .parse::<u64>()
                .map_err(|_| CacheError::InvalidAssignment(s.to_string()))?;
            (value, Some(ttl))
        }
        None => (rest, None),
    };
    Ok(Assignment {
        id,
        value: value.to_string(),
        ttl,
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_missing_colons() {
        assert!("1,2,3".parse::<ItemId>().is_err());
        assert!("plain".parse::<ItemId>().is_err());
        assert!("one:two".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_parse_id_empty_owner_is_valid() {
        let id: ItemId = ":svc:name".parse().unwrap();
        assert_eq!(id.owner, "");
        assert_eq!(id.service, "svc");
        assert_eq!(id.name, "name");
    }

    #[test]
    fn test_parse_id_rejects_empty_service_or_name() {
        assert!("owner::name".parse::<ItemId>().is_err());
        assert!("owner:svc:".parse::<ItemId>().is_err());
        assert!(":::".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_parse_id_name_may_contain_colons() {
        let id: ItemId = "o:svc:a:b:c".parse().unwrap();
        assert_eq!(id.name, "a:b:c");
    }

    #[test]
    fn test_compose_roundtrip() {
        let id = ItemId::new("owner", "svc", "name");
        assert_eq!(id.compose(), "owner:svc:name");
        assert_eq!(id.compose().parse::<ItemId>().unwrap(), id);
    }

    #[test]
    fn test_shard_is_deterministic_and_in_range() {
        let id = ItemId::new("owner", "svc", "name");
        let shard = id.shard();
        assert!(shard < SHARD_COUNT);
        assert_eq!(shard, ItemId::new("owner", "svc", "name").shard());
    }

    #[test]
    fn test_shard_of_empty_parts() {
        // All-empty parts fold nothing; the accumulator stays at zero.
        assert_eq!(ItemId::new("", "", "").shard(), 0);
    }

    #[test]
    fn test_parse_assignment_rejects_invalid_key() {
        assert!(parse_assignment("1,2,3=someval,10").is_err());
        assert!(parse_assignment(":::=someval,10").is_err());
    }

    #[test]
    fn test_parse_assignment_with_ttl() {
        let assn = parse_assignment(":s:n=someval,10").unwrap();
        assert_eq!(assn.id, ItemId::new("", "s", "n"));
        assert_eq!(assn.value, "someval");
        assert_eq!(assn.ttl, Some(10));
    }

    #[test]
    fn test_parse_assignment_without_ttl() {
        let assn = parse_assignment("o:s:n=someval").unwrap();
        assert_eq!(assn.value, "someval");
        assert_eq!(assn.ttl, None);
    }

    #[test]
    fn test_parse_assignment_rejects_missing_equals() {
        assert!(parse_assignment("o:s:n").is_err());
    }

    #[test]
    fn test_parse_assignment_rejects_non_numeric_ttl() {
        assert!(parse_assignment("o:s:n=val,soon").is_err());
    }

    #[test]
    fn test_parse_assignment_empty_value() {
        let assn = parse_assignment("o:s:n=").unwrap();
        assert_eq!(assn.value, "");
        assert_eq!(assn.ttl, None);
    }
}
