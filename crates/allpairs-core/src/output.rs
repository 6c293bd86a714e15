//! Context and triple records
//!
//! Field order of every record is fixed; downstream writers rely on
//! `fields()` for column order.

use serde::{Deserialize, Serialize};

use crate::EntityRef;

/// Text preceding an entity mention, marker appended: `(context, entity)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedingContext {
    pub context: String,
    pub entity: EntityRef,
}

/// An entity with marked adjacent text: `(entity, context)`
///
/// Succeeding contexts have this shape natively; preceding contexts are
/// converted into it when contexts are flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityContext {
    pub entity: EntityRef,
    pub context: String,
}

impl EntityContext {
    pub fn fields(&self) -> [&str; 2] {
        [self.entity.as_str(), self.context.as_str()]
    }
}

impl From<PrecedingContext> for EntityContext {
    fn from(preceding: PrecedingContext) -> Self {
        Self {
            entity: preceding.entity,
            context: preceding.context,
        }
    }
}

/// Two co-occurring entities and the text connecting them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: EntityRef,
    pub connector: String,
    pub object: EntityRef,
}

impl Triple {
    pub fn fields(&self) -> [&str; 3] {
        [self.subject.as_str(), self.connector.as_str(), self.object.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preceding_context_reorders() {
        let preceding = PrecedingContext {
            context: "the black_".to_string(),
            entity: EntityRef::from("Cat"),
        };
        let flattened = EntityContext::from(preceding);
        assert_eq!(flattened.fields(), ["Cat", "the black_"]);
    }

    #[test]
    fn test_triple_field_order() {
        let triple = Triple {
            subject: EntityRef::from("Cat"),
            connector: "chased the".to_string(),
            object: EntityRef::from("Dog"),
        };
        assert_eq!(triple.fields(), ["Cat", "chased the", "Dog"]);
    }
}
