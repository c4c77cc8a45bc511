//! # Rooms
//!
//! Room input records as delivered by the geometry-recognition collaborator,
//! and the keyword classifier that maps a room name to a coarse room type.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::rooms::{RoomInput, RoomType};
//!
//! assert_eq!(RoomType::classify("Master Bathroom"), RoomType::Bathroom);
//! assert_eq!(RoomType::classify("Garage"), RoomType::Other);
//!
//! let room = RoomInput::with_area("Kitchen", "168 sq ft");
//! assert_eq!(room.room_type(), RoomType::Kitchen);
//! ```

use serde::{Deserialize, Serialize};

use crate::dimensions::UnitSystem;

/// Keyword lists, checked in this order. First match wins.
const KITCHEN_KEYWORDS: &[&str] = &["kitchen", "galley"];
const BATHROOM_KEYWORDS: &[&str] = &[
    "bath",
    "powder",
    "restroom",
    "washroom",
    "lavatory",
    "toilet",
    "ensuite",
    "en-suite",
    "shower",
    "wc",
];
const BEDROOM_KEYWORDS: &[&str] = &["bedroom", "bed", "master", "guest room", "nursery", "bunk"];
const LIVING_KEYWORDS: &[&str] = &["living", "family", "great room", "lounge", "sitting"];
const DINING_KEYWORDS: &[&str] = &["dining", "breakfast", "dinette", "eating"];

/// Coarse room category used to select conditional materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Kitchen,
    Bathroom,
    Bedroom,
    LivingRoom,
    DiningRoom,
    Other,
}

impl RoomType {
    /// All room types in classification order
    pub const ALL: [RoomType; 6] = [
        RoomType::Kitchen,
        RoomType::Bathroom,
        RoomType::Bedroom,
        RoomType::LivingRoom,
        RoomType::DiningRoom,
        RoomType::Other,
    ];

    /// Classify a room by its display name.
    ///
    /// Case-insensitive substring match against the keyword lists (kitchen,
    /// bathroom, bedroom, living, dining); no match gives [`RoomType::Other`].
    /// Depends only on the name.
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let ordered: [(RoomType, &[&str]); 5] = [
            (RoomType::Kitchen, KITCHEN_KEYWORDS),
            (RoomType::Bathroom, BATHROOM_KEYWORDS),
            (RoomType::Bedroom, BEDROOM_KEYWORDS),
            (RoomType::LivingRoom, LIVING_KEYWORDS),
            (RoomType::DiningRoom, DINING_KEYWORDS),
        ];

        ordered
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
            .map(|(room_type, _)| *room_type)
            .unwrap_or(RoomType::Other)
    }

    /// Snake-case code (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::Bedroom => "bedroom",
            RoomType::LivingRoom => "living_room",
            RoomType::DiningRoom => "dining_room",
            RoomType::Other => "other",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
            RoomType::Bedroom => "Bedroom",
            RoomType::LivingRoom => "Living Room",
            RoomType::DiningRoom => "Dining Room",
            RoomType::Other => "Other",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One room as extracted from a floor plan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Living Room",
///   "width": "15'",
///   "length": "20'",
///   "area": null,
///   "unit": "imperial"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInput {
    /// Free-text room name (e.g., "Master Bathroom")
    pub name: String,

    /// Width string (e.g., "12'-6\"", "3,5")
    #[serde(default)]
    pub width: Option<String>,

    /// Length string
    #[serde(default)]
    pub length: Option<String>,

    /// Area string (e.g., "150 sq ft", "14.8 m²")
    #[serde(default)]
    pub area: Option<String>,

    /// Declared unit system, used for unmarked numbers
    #[serde(default)]
    pub unit: Option<UnitSystem>,

    /// Room type detected upstream; bypasses name classification when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
}

impl RoomInput {
    /// Create a room with no geometry yet
    pub fn new(name: impl Into<String>) -> Self {
        RoomInput {
            name: name.into(),
            width: None,
            length: None,
            area: None,
            unit: None,
            room_type: None,
        }
    }

    /// Create a room from width and length strings
    pub fn with_dimensions(name: impl Into<String>, width: impl Into<String>, length: impl Into<String>) -> Self {
        RoomInput {
            width: Some(width.into()),
            length: Some(length.into()),
            ..RoomInput::new(name)
        }
    }

    /// Create a room from an area string
    pub fn with_area(name: impl Into<String>, area: impl Into<String>) -> Self {
        RoomInput {
            area: Some(area.into()),
            ..RoomInput::new(name)
        }
    }

    /// Set the unit-system hint
    pub fn unit(mut self, unit: UnitSystem) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Set an explicit room type
    pub fn room_type_override(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Effective room type: the explicit one, else classified from the name
    pub fn room_type(&self) -> RoomType {
        self.room_type.unwrap_or_else(|| RoomType::classify(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let cases = [
            ("Kitchen", RoomType::Kitchen),
            ("Master Bathroom", RoomType::Bathroom),
            ("Half Bath", RoomType::Bathroom),
            ("Powder Room", RoomType::Bathroom),
            ("Living Room", RoomType::LivingRoom),
            ("Master Bedroom", RoomType::Bedroom),
            ("Dining Room", RoomType::DiningRoom),
            ("Office", RoomType::Other),
            ("Garage", RoomType::Other),
            ("Family Room", RoomType::LivingRoom),
            ("Breakfast Nook", RoomType::DiningRoom),
        ];
        for (name, expected) in cases {
            assert_eq!(RoomType::classify(name), expected, "{}", name);
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(RoomType::classify("KITCHEN"), RoomType::Kitchen);
        assert_eq!(RoomType::classify("guest bath"), RoomType::Bathroom);
    }

    #[test]
    fn test_kitchen_checked_before_dining() {
        assert_eq!(RoomType::classify("Kitchen / Dining"), RoomType::Kitchen);
        // Bathroom keywords come before bedroom keywords
        assert_eq!(RoomType::classify("Master Bath"), RoomType::Bathroom);
    }

    #[test]
    fn test_classification_idempotent() {
        for name in ["Kitchen", "Powder Room", "Study", ""] {
            assert_eq!(RoomType::classify(name), RoomType::classify(name));
        }
        assert_eq!(RoomType::classify(""), RoomType::Other);
    }

    #[test]
    fn test_room_type_override() {
        let room = RoomInput::with_area("Room 4", "10 m²").room_type_override(RoomType::Kitchen);
        assert_eq!(room.room_type(), RoomType::Kitchen);
    }

    #[test]
    fn test_room_input_json() {
        let json = r#"{"name": "Bedroom 2", "area": "150 sq ft", "unit": "imperial"}"#;
        let room: RoomInput = serde_json::from_str(json).unwrap();
        assert_eq!(room.name, "Bedroom 2");
        assert_eq!(room.unit, Some(UnitSystem::Imperial));
        assert!(room.width.is_none());
        assert_eq!(room.room_type(), RoomType::Bedroom);
    }

    #[test]
    fn test_room_type_serialization() {
        let json = serde_json::to_string(&RoomType::LivingRoom).unwrap();
        assert_eq!(json, "\"living_room\"");
        assert_eq!(RoomType::LivingRoom.code(), "living_room");
    }
}
