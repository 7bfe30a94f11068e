use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{
    AssessmentItem, BigFiveTrait, Dimension, DiscFactor, ItemCategory, ItemError, ItemId, MbtiPole,
};

/// Validated, ordered collection of assessment items with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBank {
    items: Vec<AssessmentItem>,
}

impl ItemBank {
    pub fn new(items: Vec<AssessmentItem>) -> Result<Self, ItemError> {
        if items.is_empty() {
            return Err(ItemError::EmptyBank);
        }

        let mut seen: HashSet<ItemId> = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(ItemError::DuplicateId(item.id()));
            }
        }

        Ok(Self { items })
    }

    /// Built-in bank covering every DISC, Big Five, and MBTI dimension.
    pub fn standard() -> Result<Self, ItemError> {
        let items = STANDARD_ITEMS
            .iter()
            .map(|template| {
                AssessmentItem::new(
                    template.id,
                    template.text,
                    template.category,
                    template.reverse_scored,
                    template.weights.iter().copied(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ItemBankError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Imports `id,text,category,reverse,weights` rows, e.g. `weights = DISC_D:0.8;B5_O:-0.3`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ItemBankError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut items = Vec::new();

        for record in csv_reader.deserialize::<ItemRow>() {
            let row = record?;
            let category: ItemCategory = row.category.parse()?;
            let weights = parse_weights(&row.weights)?;
            items.push(AssessmentItem::new(
                row.id,
                row.text,
                category,
                parse_flag(&row.reverse),
                weights,
            )?);
        }

        Ok(Self::new(items)?)
    }

    pub fn items(&self) -> &[AssessmentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&AssessmentItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Items whose category is the given dimension.
    pub fn items_for(&self, dimension: Dimension) -> Vec<&AssessmentItem> {
        self.items
            .iter()
            .filter(|item| item.category() == ItemCategory::Single(dimension))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ItemBankError {
    #[error("failed to read item bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid item bank CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid item definition: {0}")]
    Item(#[from] ItemError),
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    id: ItemId,
    text: String,
    category: String,
    #[serde(default)]
    reverse: String,
    weights: String,
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "reverse"
    )
}

fn parse_weights(value: &str) -> Result<Vec<(Dimension, f64)>, ItemError> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (tag, weight) = entry
                .split_once(':')
                .ok_or_else(|| ItemError::MalformedWeight(entry.to_string()))?;
            let dimension: Dimension = tag.parse()?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| ItemError::MalformedWeight(entry.to_string()))?;
            Ok((dimension, weight))
        })
        .collect()
}

struct ItemTemplate {
    id: ItemId,
    text: &'static str,
    category: ItemCategory,
    reverse_scored: bool,
    weights: &'static [(Dimension, f64)],
}

const D: Dimension = Dimension::Disc(DiscFactor::Dominance);
const I: Dimension = Dimension::Disc(DiscFactor::Influence);
const S: Dimension = Dimension::Disc(DiscFactor::Steadiness);
const C: Dimension = Dimension::Disc(DiscFactor::Conformity);
const OPENNESS: Dimension = Dimension::BigFive(BigFiveTrait::Openness);
const CONSCIENTIOUSNESS: Dimension = Dimension::BigFive(BigFiveTrait::Conscientiousness);
const EXTRAVERSION: Dimension = Dimension::BigFive(BigFiveTrait::Extraversion);
const AGREEABLENESS: Dimension = Dimension::BigFive(BigFiveTrait::Agreeableness);
const NEUROTICISM: Dimension = Dimension::BigFive(BigFiveTrait::Neuroticism);
const MBTI_E: Dimension = Dimension::Mbti(MbtiPole::Extraversion);
const MBTI_I: Dimension = Dimension::Mbti(MbtiPole::Introversion);
const MBTI_S: Dimension = Dimension::Mbti(MbtiPole::Sensing);
const MBTI_N: Dimension = Dimension::Mbti(MbtiPole::Intuition);
const MBTI_T: Dimension = Dimension::Mbti(MbtiPole::Thinking);
const MBTI_F: Dimension = Dimension::Mbti(MbtiPole::Feeling);
const MBTI_J: Dimension = Dimension::Mbti(MbtiPole::Judging);
const MBTI_P: Dimension = Dimension::Mbti(MbtiPole::Perceiving);

const fn single(dimension: Dimension) -> ItemCategory {
    ItemCategory::Single(dimension)
}

const STANDARD_ITEMS: &[ItemTemplate] = &[
    ItemTemplate {
        id: 1,
        text: "I take charge when a group lacks direction.",
        category: single(D),
        reverse_scored: false,
        weights: &[(D, 1.0)],
    },
    ItemTemplate {
        id: 2,
        text: "I enjoy meeting new people and starting conversations.",
        category: single(I),
        reverse_scored: false,
        weights: &[(I, 1.0), (EXTRAVERSION, 0.3)],
    },
    ItemTemplate {
        id: 3,
        text: "I prefer a steady, predictable routine.",
        category: single(S),
        reverse_scored: false,
        weights: &[(S, 1.0)],
    },
    ItemTemplate {
        id: 4,
        text: "I double-check my work for accuracy.",
        category: single(C),
        reverse_scored: false,
        weights: &[(C, 1.0), (CONSCIENTIOUSNESS, 0.3)],
    },
    ItemTemplate {
        id: 5,
        text: "I avoid confrontation even when I disagree.",
        category: single(D),
        reverse_scored: true,
        weights: &[(D, 0.8)],
    },
    ItemTemplate {
        id: 6,
        text: "I can usually persuade others to see my point of view.",
        category: single(I),
        reverse_scored: false,
        weights: &[(I, 0.9)],
    },
    ItemTemplate {
        id: 7,
        text: "I stay patient when others need extra time.",
        category: single(S),
        reverse_scored: false,
        weights: &[(S, 0.9), (AGREEABLENESS, 0.3)],
    },
    ItemTemplate {
        id: 8,
        text: "I follow established procedures closely.",
        category: single(C),
        reverse_scored: false,
        weights: &[(C, 0.9)],
    },
    ItemTemplate {
        id: 9,
        text: "I enjoy exploring abstract ideas.",
        category: single(OPENNESS),
        reverse_scored: false,
        weights: &[(OPENNESS, 0.9)],
    },
    ItemTemplate {
        id: 10,
        text: "I prefer familiar activities over new experiences.",
        category: single(OPENNESS),
        reverse_scored: true,
        weights: &[(OPENNESS, 0.8)],
    },
    ItemTemplate {
        id: 11,
        text: "I finish tasks well ahead of deadlines.",
        category: single(CONSCIENTIOUSNESS),
        reverse_scored: false,
        weights: &[(CONSCIENTIOUSNESS, 0.9)],
    },
    ItemTemplate {
        id: 12,
        text: "I often leave things until the last minute.",
        category: single(CONSCIENTIOUSNESS),
        reverse_scored: true,
        weights: &[(CONSCIENTIOUSNESS, 0.8)],
    },
    ItemTemplate {
        id: 13,
        text: "I feel energized after social events.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(EXTRAVERSION, 0.9), (MBTI_E, 0.5)],
    },
    ItemTemplate {
        id: 14,
        text: "I prefer to stay in the background.",
        category: single(EXTRAVERSION),
        reverse_scored: true,
        weights: &[(EXTRAVERSION, 0.8)],
    },
    ItemTemplate {
        id: 15,
        text: "I go out of my way to help others.",
        category: single(AGREEABLENESS),
        reverse_scored: false,
        weights: &[(AGREEABLENESS, 0.9)],
    },
    ItemTemplate {
        id: 16,
        text: "I find it hard to trust other people's intentions.",
        category: single(AGREEABLENESS),
        reverse_scored: true,
        weights: &[(AGREEABLENESS, 0.8)],
    },
    ItemTemplate {
        id: 17,
        text: "I worry about things that might go wrong.",
        category: single(NEUROTICISM),
        reverse_scored: false,
        weights: &[(NEUROTICISM, 0.9)],
    },
    ItemTemplate {
        id: 18,
        text: "I stay calm in stressful situations.",
        category: single(NEUROTICISM),
        reverse_scored: true,
        weights: &[(NEUROTICISM, 0.8)],
    },
    ItemTemplate {
        id: 19,
        text: "I recharge by spending time with other people.",
        category: single(MBTI_E),
        reverse_scored: false,
        weights: &[(MBTI_E, 1.0)],
    },
    ItemTemplate {
        id: 20,
        text: "I need quiet time alone to recharge.",
        category: single(MBTI_I),
        reverse_scored: false,
        weights: &[(MBTI_I, 1.0)],
    },
    ItemTemplate {
        id: 21,
        text: "I focus on concrete facts and details.",
        category: single(MBTI_S),
        reverse_scored: false,
        weights: &[(MBTI_S, 1.0)],
    },
    ItemTemplate {
        id: 22,
        text: "I focus on patterns and future possibilities.",
        category: single(MBTI_N),
        reverse_scored: false,
        weights: &[(MBTI_N, 1.0)],
    },
    ItemTemplate {
        id: 23,
        text: "I make decisions based on objective logic.",
        category: single(MBTI_T),
        reverse_scored: false,
        weights: &[(MBTI_T, 1.0)],
    },
    ItemTemplate {
        id: 24,
        text: "I make decisions based on how people will feel.",
        category: single(MBTI_F),
        reverse_scored: false,
        weights: &[(MBTI_F, 1.0)],
    },
    ItemTemplate {
        id: 25,
        text: "I like having plans settled in advance.",
        category: single(MBTI_J),
        reverse_scored: false,
        weights: &[(MBTI_J, 1.0)],
    },
    ItemTemplate {
        id: 26,
        text: "I like keeping my options open.",
        category: single(MBTI_P),
        reverse_scored: false,
        weights: &[(MBTI_P, 1.0)],
    },
    ItemTemplate {
        id: 27,
        text: "I think out loud in meetings.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(MBTI_E, 0.8), (MBTI_I, -0.4)],
    },
    ItemTemplate {
        id: 28,
        text: "I trust experience more than theory.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(MBTI_S, 0.8), (MBTI_N, -0.4)],
    },
    ItemTemplate {
        id: 29,
        text: "I value fairness over harmony.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(MBTI_T, 0.8), (MBTI_F, -0.4)],
    },
    ItemTemplate {
        id: 30,
        text: "I make to-do lists and stick to them.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(MBTI_J, 0.7), (CONSCIENTIOUSNESS, 0.3)],
    },
    ItemTemplate {
        id: 31,
        text: "I set ambitious goals and pursue them relentlessly.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(D, 0.6), (CONSCIENTIOUSNESS, 0.4), (MBTI_J, 0.3)],
    },
    ItemTemplate {
        id: 32,
        text: "I adapt easily when plans change.",
        category: ItemCategory::Composite,
        reverse_scored: false,
        weights: &[(MBTI_P, 0.6), (OPENNESS, 0.4)],
    },
];
