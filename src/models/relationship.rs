use serde::{Deserialize, Serialize};

/// Relation mellan en ny medlem och dess ankare.
///
/// Styr vilken generation och nivå den nya medlemmen får.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationshipType {
    Parent,
    #[default]
    Child,
    Sibling,
    Spouse,
    Grandparent,
    Grandchild,
    Aunt,
    Uncle,
    Cousin,
}

impl RelationshipType {
    /// (Δgeneration, Δnivå) relativt ankaret
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Parent => (-1, -1),
            Self::Child => (1, 1),
            Self::Sibling | Self::Spouse => (0, 0),
            Self::Grandparent => (-2, -2),
            Self::Grandchild => (2, 2),
            Self::Aunt | Self::Uncle => (0, -1),
            Self::Cousin => (1, 0),
        }
    }

    /// Position för en ny medlem. Utan ankare blir den en rot på (0, 0).
    pub fn position_for(&self, anchor: Option<(i32, i32)>) -> (i32, i32) {
        match anchor {
            Some((generation, level)) => {
                let (dg, dl) = self.delta();
                (generation + dg, level + dl)
            }
            None => (0, 0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Parent => "Förälder",
            Self::Child => "Barn",
            Self::Sibling => "Syskon",
            Self::Spouse => "Make/Maka",
            Self::Grandparent => "Far-/morförälder",
            Self::Grandchild => "Barnbarn",
            Self::Aunt => "Faster/Moster",
            Self::Uncle => "Farbror/Morbror",
            Self::Cousin => "Kusin",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Parent | Self::Cousin => "👥",
            Self::Sibling => "👫",
            Self::Spouse => "❤",
            Self::Grandparent => "👪",
            Self::Child | Self::Grandchild | Self::Aunt | Self::Uncle => "👤",
        }
    }

    /// Tolka en relationsetikett (engelska nyckelord, skiftlägesokänsligt)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            "sibling" => Some(Self::Sibling),
            "spouse" => Some(Self::Spouse),
            "grandparent" => Some(Self::Grandparent),
            "grandchild" => Some(Self::Grandchild),
            "aunt" | "aunt/uncle" => Some(Self::Aunt),
            "uncle" => Some(Self::Uncle),
            "cousin" => Some(Self::Cousin),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Parent,
            Self::Child,
            Self::Sibling,
            Self::Spouse,
            Self::Grandparent,
            Self::Grandchild,
            Self::Aunt,
            Self::Uncle,
            Self::Cousin,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_table() {
        let expected = [
            (RelationshipType::Parent, (-1, -1)),
            (RelationshipType::Child, (1, 1)),
            (RelationshipType::Sibling, (0, 0)),
            (RelationshipType::Spouse, (0, 0)),
            (RelationshipType::Grandparent, (-2, -2)),
            (RelationshipType::Grandchild, (2, 2)),
            (RelationshipType::Aunt, (0, -1)),
            (RelationshipType::Uncle, (0, -1)),
            (RelationshipType::Cousin, (1, 0)),
        ];

        for (rel, delta) in expected {
            assert_eq!(rel.delta(), delta, "fel delta för {:?}", rel);
        }
    }

    #[test]
    fn test_position_without_anchor_is_root() {
        for rel in RelationshipType::all() {
            assert_eq!(rel.position_for(None), (0, 0));
        }
    }

    #[test]
    fn test_position_relative_to_anchor() {
        assert_eq!(RelationshipType::Grandparent.position_for(Some((1, 3))), (-1, 1));
        assert_eq!(RelationshipType::Cousin.position_for(Some((-2, -2))), (-1, -2));
    }

    #[test]
    fn test_from_label() {
        assert_eq!(RelationshipType::from_label("Parent"), Some(RelationshipType::Parent));
        assert_eq!(RelationshipType::from_label(" COUSIN "), Some(RelationshipType::Cousin));
        assert_eq!(RelationshipType::from_label("aunt/uncle"), Some(RelationshipType::Aunt));
        assert_eq!(RelationshipType::from_label("neighbour"), None);
    }
}
