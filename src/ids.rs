use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// ULID-backed identifier assigned to stored rows and generated descriptors.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct EntityId(pub ulid::Ulid);

impl EntityId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Fresh ID in its 26-character Crockford base32 form.
    pub fn new_string() -> String {
        Self::new().to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(EntityId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_its_own_string_form() {
        let id = EntityId::new();
        let parsed: EntityId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(EntityId::new_string().len(), 26);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-ulid".parse::<EntityId>().is_err());
    }
}
