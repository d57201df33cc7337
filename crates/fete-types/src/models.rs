use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Birthday,
    BabyShower,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::BabyShower => "baby-shower",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthday" => Ok(Self::Birthday),
            "baby-shower" => Ok(Self::BabyShower),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// Cake flavor. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    Chocolate,
    Vanilla,
    Strawberry,
    RedVelvet,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chocolate => "chocolate",
            Self::Vanilla => "vanilla",
            Self::Strawberry => "strawberry",
            Self::RedVelvet => "red-velvet",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chocolate" => Ok(Self::Chocolate),
            "vanilla" => Ok(Self::Vanilla),
            "strawberry" => Ok(Self::Strawberry),
            "red-velvet" => Ok(Self::RedVelvet),
            other => Err(format!("unknown flavor: {}", other)),
        }
    }
}

/// Everything a creator supplies for a new celebration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrationInput {
    pub event_type: EventType,
    pub recipient_name: String,
    pub message: String,
    pub flavor: Flavor,
    /// Encoded image payloads (data URLs), at most four.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// A persisted celebration. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
    pub id: String,
    pub event_type: EventType,
    pub recipient_name: String,
    pub message: String,
    pub flavor: Flavor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Celebration {
    pub fn from_input(input: CelebrationInput, id: String, created_at: i64) -> Self {
        Self {
            id,
            event_type: input.event_type,
            recipient_name: input.recipient_name,
            message: input.message,
            flavor: input.flavor,
            images: input.images,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishInput {
    pub celebration_id: String,
    pub name: String,
    pub message: String,
}

/// A visitor's wish, attached to one celebration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: String,
    pub celebration_id: String,
    pub name: String,
    pub message: String,
    pub created_at: i64,
}

impl Wish {
    pub fn from_input(input: WishInput, id: String, created_at: i64) -> Self {
        Self {
            id,
            celebration_id: input.celebration_id,
            name: input.name,
            message: input.message,
            created_at,
        }
    }
}
