//! Elemental, racial and size classification of actors.

/// Attack/defence element.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Element {
    #[default]
    Neutral = 0,
    Water = 1,
    Earth = 2,
    Fire = 3,
    Wind = 4,
    Poison = 5,
    Holy = 6,
    Shadow = 7,
    Ghost = 8,
    Undead = 9,
}

/// Damage percentage by `[attack][defence]` element, level-1 defenders.
///
/// Negative entries of the reference table (healing the target) are
/// flattened to 0: for target selection they are simply useless.
const ELEMENT_TABLE: [[u8; 10]; 10] = [
    // Ne   Wa   Ea   Fi   Wi   Po   Ho   Sh   Gh   Un
    [100, 100, 100, 100, 100, 100, 100, 100, 25, 100], // Neutral
    [100, 25, 100, 150, 50, 100, 75, 100, 100, 100],   // Water
    [100, 100, 25, 50, 150, 100, 75, 100, 100, 100],   // Earth
    [100, 50, 150, 25, 100, 100, 75, 100, 100, 125],   // Fire
    [100, 175, 50, 100, 25, 100, 75, 100, 100, 100],   // Wind
    [100, 100, 125, 125, 125, 0, 75, 50, 100, 0],      // Poison
    [100, 100, 100, 100, 100, 100, 0, 125, 100, 150],  // Holy
    [100, 100, 100, 100, 100, 50, 125, 0, 100, 0],     // Shadow
    [25, 100, 100, 100, 100, 100, 75, 75, 125, 100],   // Ghost
    [100, 100, 100, 100, 100, 50, 100, 0, 100, 0],     // Undead
];

impl Element {
    /// Damage multiplier of an `self`-element attack against `defender`.
    pub fn modifier_against(self, defender: Element) -> f32 {
        f32::from(ELEMENT_TABLE[self as usize][defender as usize]) / 100.0
    }

    /// Returns true if attacking `defender` with this element deals bonus damage.
    pub fn is_strong_against(self, defender: Element) -> bool {
        self.modifier_against(defender) > 1.0
    }

    /// Lenient conversion from a numeric element id.
    pub fn from_id(id: u64) -> Option<Self> {
        u8::try_from(id).ok().and_then(Element::from_repr)
    }
}

/// Monster race.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Race {
    #[default]
    Formless = 0,
    Undead = 1,
    Brute = 2,
    Plant = 3,
    Insect = 4,
    Fish = 5,
    Demon = 6,
    #[strum(to_string = "demi_human", serialize = "demihuman")]
    DemiHuman = 7,
    Angel = 8,
    Dragon = 9,
}

impl Race {
    pub fn from_id(id: u64) -> Option<Self> {
        u8::try_from(id).ok().and_then(Race::from_repr)
    }
}

/// Body size.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Size {
    Small = 0,
    #[default]
    Medium = 1,
    Large = 2,
}

impl Size {
    pub fn from_id(id: u64) -> Option<Self> {
        u8::try_from(id).ok().and_then(Size::from_repr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn elemental_advantage() {
        assert_eq!(Element::Wind.modifier_against(Element::Water), 1.75);
        assert!(Element::Fire.is_strong_against(Element::Earth));
        assert!(Element::Holy.is_strong_against(Element::Undead));
        assert!(!Element::Neutral.is_strong_against(Element::Fire));
        assert_eq!(Element::Neutral.modifier_against(Element::Ghost), 0.25);
    }

    #[test]
    fn parses_names_and_ids() {
        assert_eq!(Element::from_str("FIRE"), Ok(Element::Fire));
        assert_eq!(Element::from_id(4), Some(Element::Wind));
        assert_eq!(Element::from_id(42), None);
        assert_eq!(Race::from_str("demi_human"), Ok(Race::DemiHuman));
        assert_eq!(Size::from_id(2), Some(Size::Large));
    }
}
