use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a question within an item bank.
pub type ItemId = u32;

/// Likert responses keyed by item id. Values are expected in `1..=5` but are not validated.
pub type Answers = BTreeMap<ItemId, i32>;

/// Inclusive bounds for a single item weight.
pub const MIN_WEIGHT: f64 = -2.0;
pub const MAX_WEIGHT: f64 = 2.0;

/// Identifier wrapper for completed assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiscFactor {
    #[serde(rename = "DISC_D")]
    Dominance,
    #[serde(rename = "DISC_I")]
    Influence,
    #[serde(rename = "DISC_S")]
    Steadiness,
    #[serde(rename = "DISC_C")]
    Conformity,
}

impl DiscFactor {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Dominance,
            Self::Influence,
            Self::Steadiness,
            Self::Conformity,
        ]
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Self::Dominance => "D",
            Self::Influence => "I",
            Self::Steadiness => "S",
            Self::Conformity => "C",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dominance => "Dominance",
            Self::Influence => "Influence",
            Self::Steadiness => "Steadiness",
            Self::Conformity => "Conformity",
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Dominance => "DISC_D",
            Self::Influence => "DISC_I",
            Self::Steadiness => "DISC_S",
            Self::Conformity => "DISC_C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BigFiveTrait {
    #[serde(rename = "B5_O")]
    Openness,
    #[serde(rename = "B5_C")]
    Conscientiousness,
    #[serde(rename = "B5_E")]
    Extraversion,
    #[serde(rename = "B5_A")]
    Agreeableness,
    #[serde(rename = "B5_N")]
    Neuroticism,
}

impl BigFiveTrait {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Openness,
            Self::Conscientiousness,
            Self::Extraversion,
            Self::Agreeableness,
            Self::Neuroticism,
        ]
    }

    /// Human-readable trait name used in narrative output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::Neuroticism => "Neuroticism",
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Openness => "B5_O",
            Self::Conscientiousness => "B5_C",
            Self::Extraversion => "B5_E",
            Self::Agreeableness => "B5_A",
            Self::Neuroticism => "B5_N",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MbtiPole {
    #[serde(rename = "MBTI_E")]
    Extraversion,
    #[serde(rename = "MBTI_I")]
    Introversion,
    #[serde(rename = "MBTI_S")]
    Sensing,
    #[serde(rename = "MBTI_N")]
    Intuition,
    #[serde(rename = "MBTI_T")]
    Thinking,
    #[serde(rename = "MBTI_F")]
    Feeling,
    #[serde(rename = "MBTI_J")]
    Judging,
    #[serde(rename = "MBTI_P")]
    Perceiving,
}

impl MbtiPole {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Extraversion,
            Self::Introversion,
            Self::Sensing,
            Self::Intuition,
            Self::Thinking,
            Self::Feeling,
            Self::Judging,
            Self::Perceiving,
        ]
    }

    pub const fn letter(self) -> char {
        match self {
            Self::Extraversion => 'E',
            Self::Introversion => 'I',
            Self::Sensing => 'S',
            Self::Intuition => 'N',
            Self::Thinking => 'T',
            Self::Feeling => 'F',
            Self::Judging => 'J',
            Self::Perceiving => 'P',
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Extraversion => "MBTI_E",
            Self::Introversion => "MBTI_I",
            Self::Sensing => "MBTI_S",
            Self::Intuition => "MBTI_N",
            Self::Thinking => "MBTI_T",
            Self::Feeling => "MBTI_F",
            Self::Judging => "MBTI_J",
            Self::Perceiving => "MBTI_P",
        }
    }
}

/// One of the four opposing MBTI preference pairs, in type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MbtiAxis {
    EnergyFocus,
    Perception,
    Judgment,
    Lifestyle,
}

impl MbtiAxis {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::EnergyFocus,
            Self::Perception,
            Self::Judgment,
            Self::Lifestyle,
        ]
    }

    /// Returns `(first, second)`; the first pole wins ties.
    pub const fn poles(self) -> (MbtiPole, MbtiPole) {
        match self {
            Self::EnergyFocus => (MbtiPole::Extraversion, MbtiPole::Introversion),
            Self::Perception => (MbtiPole::Sensing, MbtiPole::Intuition),
            Self::Judgment => (MbtiPole::Thinking, MbtiPole::Feeling),
            Self::Lifestyle => (MbtiPole::Judging, MbtiPole::Perceiving),
        }
    }
}

/// Scale-qualified dimension a weight contributes to.
///
/// Serialized as the prefixed tag (`DISC_D`, `B5_O`, `MBTI_E`, ...) so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Dimension {
    Disc(DiscFactor),
    BigFive(BigFiveTrait),
    Mbti(MbtiPole),
}

impl Dimension {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Disc(factor) => factor.tag(),
            Self::BigFive(trait_) => trait_.tag(),
            Self::Mbti(pole) => pole.tag(),
        }
    }

    /// Every dimension in scale order: DISC, Big Five, MBTI.
    pub fn all() -> impl Iterator<Item = Dimension> {
        DiscFactor::ordered()
            .into_iter()
            .map(Dimension::Disc)
            .chain(BigFiveTrait::ordered().into_iter().map(Dimension::BigFive))
            .chain(MbtiPole::ordered().into_iter().map(Dimension::Mbti))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dimension {
    type Err = ItemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Dimension::all()
            .find(|dimension| dimension.tag() == normalized)
            .ok_or_else(|| ItemError::UnknownDimension(value.trim().to_string()))
    }
}

impl From<Dimension> for String {
    fn from(value: Dimension) -> Self {
        value.tag().to_string()
    }
}

impl TryFrom<String> for Dimension {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Category tag attached to an item, either a single dimension or a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ItemCategory {
    Single(Dimension),
    Composite,
}

impl ItemCategory {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Single(dimension) => dimension.tag(),
            Self::Composite => "COMPOSITE",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = ItemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("composite") {
            return Ok(Self::Composite);
        }
        value.parse().map(Self::Single)
    }
}

impl From<ItemCategory> for String {
    fn from(value: ItemCategory) -> Self {
        value.tag().to_string()
    }
}

impl TryFrom<String> for ItemCategory {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemWeight {
    pub dimension: Dimension,
    pub weight: f64,
}

/// Immutable question definition. Weights are validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ItemDefinition", try_from = "ItemDefinition")]
pub struct AssessmentItem {
    id: ItemId,
    text: String,
    category: ItemCategory,
    reverse_scored: bool,
    weights: Vec<ItemWeight>,
}

impl AssessmentItem {
    pub fn new<I>(
        id: ItemId,
        text: impl Into<String>,
        category: ItemCategory,
        reverse_scored: bool,
        weights: I,
    ) -> Result<Self, ItemError>
    where
        I: IntoIterator<Item = (Dimension, f64)>,
    {
        let mut validated: Vec<ItemWeight> = Vec::new();
        for (dimension, weight) in weights {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
                return Err(ItemError::WeightOutOfRange {
                    item_id: id,
                    dimension,
                    weight,
                });
            }
            match validated.iter_mut().find(|entry| entry.dimension == dimension) {
                Some(entry) => entry.weight = weight,
                None => validated.push(ItemWeight { dimension, weight }),
            }
        }

        Ok(Self {
            id,
            text: text.into(),
            category,
            reverse_scored,
            weights: validated,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn reverse_scored(&self) -> bool {
        self.reverse_scored
    }

    pub fn weights(&self) -> &[ItemWeight] {
        &self.weights
    }

    /// Applies reverse scoring on the 1..=5 scale (`6 - response`). Computed in `f64` so
    /// out-of-range responses pass through without overflowing.
    pub fn effective_response(&self, response: i32) -> f64 {
        let response = f64::from(response);
        if self.reverse_scored {
            6.0 - response
        } else {
            response
        }
    }
}

/// Wire shape of an item; weights are keyed by dimension tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemDefinition {
    id: ItemId,
    text: String,
    category: ItemCategory,
    #[serde(default)]
    reverse_scored: bool,
    weights: BTreeMap<Dimension, f64>,
}

impl From<AssessmentItem> for ItemDefinition {
    fn from(item: AssessmentItem) -> Self {
        Self {
            id: item.id,
            text: item.text,
            category: item.category,
            reverse_scored: item.reverse_scored,
            weights: item
                .weights
                .into_iter()
                .map(|entry| (entry.dimension, entry.weight))
                .collect(),
        }
    }
}

impl TryFrom<ItemDefinition> for AssessmentItem {
    type Error = ItemError;

    fn try_from(value: ItemDefinition) -> Result<Self, Self::Error> {
        AssessmentItem::new(
            value.id,
            value.text,
            value.category,
            value.reverse_scored,
            value.weights,
        )
    }
}

/// Configuration defects in item definitions, surfaced at load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("item {item_id} weight {weight} for {dimension} is outside [-2.0, 2.0]")]
    WeightOutOfRange {
        item_id: ItemId,
        dimension: Dimension,
        weight: f64,
    },
    #[error("unknown dimension tag '{0}'")]
    UnknownDimension(String),
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("item bank contains no items")]
    EmptyBank,
    #[error("malformed weight entry '{0}', expected TAG:WEIGHT")]
    MalformedWeight(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_weights_outside_closed_range() {
        let err = AssessmentItem::new(
            7,
            "I take charge",
            ItemCategory::Single(Dimension::Disc(DiscFactor::Dominance)),
            false,
            [(Dimension::Disc(DiscFactor::Dominance), 2.5)],
        )
        .expect_err("weight above 2.0 rejected");

        assert_eq!(
            err,
            ItemError::WeightOutOfRange {
                item_id: 7,
                dimension: Dimension::Disc(DiscFactor::Dominance),
                weight: 2.5,
            }
        );
    }

    #[test]
    fn accepts_boundary_weights() {
        let item = AssessmentItem::new(
            1,
            "Boundary",
            ItemCategory::Composite,
            false,
            [
                (Dimension::BigFive(BigFiveTrait::Openness), -2.0),
                (Dimension::Mbti(MbtiPole::Judging), 2.0),
            ],
        )
        .expect("boundary weights are valid");
        assert_eq!(item.weights().len(), 2);
    }

    #[test]
    fn parses_dimension_tags_case_insensitively() {
        assert_eq!(
            "b5_n".parse::<Dimension>().expect("valid tag"),
            Dimension::BigFive(BigFiveTrait::Neuroticism)
        );
        assert!(matches!(
            "DISC_X".parse::<Dimension>(),
            Err(ItemError::UnknownDimension(tag)) if tag == "DISC_X"
        ));
    }

    #[test]
    fn reverse_scoring_mirrors_the_scale() {
        let item = AssessmentItem::new(
            3,
            "I avoid the spotlight",
            ItemCategory::Single(Dimension::Disc(DiscFactor::Influence)),
            true,
            [(Dimension::Disc(DiscFactor::Influence), 1.0)],
        )
        .expect("valid item");
        assert_eq!(item.effective_response(5), 1.0);
        assert_eq!(item.effective_response(2), 4.0);
    }

    #[test]
    fn deserializing_validates_weights() {
        let payload = r#"{"id":4,"text":"x","category":"B5_O","weights":{"B5_O":3.0}}"#;
        assert!(serde_json::from_str::<AssessmentItem>(payload).is_err());

        let payload = r#"{"id":4,"text":"x","category":"COMPOSITE","weights":{"B5_O":0.5,"MBTI_N":1.0}}"#;
        let item: AssessmentItem = serde_json::from_str(payload).expect("valid item");
        assert_eq!(item.category(), ItemCategory::Composite);
        assert!(!item.reverse_scored());
    }
}
