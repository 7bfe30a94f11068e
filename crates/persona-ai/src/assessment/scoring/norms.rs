use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::BigFiveTrait;

pub const DEFAULT_NORM_MEAN: f64 = 50.0;
pub const DEFAULT_NORM_STD_DEV: f64 = 15.0;

/// Scale point a raw weighted sum of zero lands on before it is compared to a norm.
pub const RAW_SCALE_CENTER: f64 = DEFAULT_NORM_MEAN;

/// Population reference for one Big Five trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormEntry {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormEntry {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, NormError> {
        if !(std_dev.is_finite() && std_dev > 0.0) || !mean.is_finite() {
            return Err(NormError::InvalidEntry { mean, std_dev });
        }
        Ok(Self { mean, std_dev })
    }

    /// Places a raw weighted sum on the normative scale, centred on [`RAW_SCALE_CENTER`].
    pub fn scale_score(&self, raw: f64) -> f64 {
        RAW_SCALE_CENTER + raw
    }

    pub fn z_score(&self, raw: f64) -> f64 {
        (self.scale_score(raw) - self.mean) / self.std_dev
    }

    /// Population percentile in `[0, 100]`, rounded to one decimal.
    pub fn percentile(&self, raw: f64) -> f64 {
        let percentile = (standard_normal_cdf(self.z_score(raw)) * 100.0).clamp(0.0, 100.0);
        round_to(percentile, 1)
    }
}

impl Default for NormEntry {
    fn default() -> Self {
        Self {
            mean: DEFAULT_NORM_MEAN,
            std_dev: DEFAULT_NORM_STD_DEV,
        }
    }
}

/// Normative constants used to convert Big Five raw sums to percentiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeTable {
    entries: BTreeMap<BigFiveTrait, NormEntry>,
}

impl Default for NormativeTable {
    fn default() -> Self {
        let entries = BigFiveTrait::ordered()
            .into_iter()
            .map(|trait_| (trait_, NormEntry::default()))
            .collect();
        Self { entries }
    }
}

impl NormativeTable {
    pub fn entry(&self, trait_: BigFiveTrait) -> NormEntry {
        self.entries.get(&trait_).copied().unwrap_or_default()
    }

    pub fn with_entry(mut self, trait_: BigFiveTrait, entry: NormEntry) -> Self {
        self.entries.insert(trait_, entry);
        self
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, NormError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `trait,mean,std_dev` rows; traits absent from the file keep the defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NormError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::default();

        for record in csv_reader.deserialize::<NormRow>() {
            let row = record?;
            let trait_ = BigFiveTrait::ordered()
                .into_iter()
                .find(|candidate| {
                    candidate.tag().eq_ignore_ascii_case(row.trait_tag.trim())
                        || candidate.label().eq_ignore_ascii_case(row.trait_tag.trim())
                })
                .ok_or_else(|| NormError::UnknownTrait(row.trait_tag.clone()))?;
            table
                .entries
                .insert(trait_, NormEntry::new(row.mean, row.std_dev)?);
        }

        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct NormRow {
    #[serde(rename = "trait")]
    trait_tag: String,
    mean: f64,
    std_dev: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum NormError {
    #[error("failed to read normative table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid normative CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown Big Five trait '{0}'")]
    UnknownTrait(String),
    #[error("normative entry mean {mean} / std_dev {std_dev} is invalid; std_dev must be positive")]
    InvalidEntry { mean: f64, std_dev: f64 },
}

/// Standard normal CDF via the Abramowitz and Stegun error function approximation.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
