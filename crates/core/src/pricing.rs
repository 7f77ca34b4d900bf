//! Credit pricing, one table per provider.
//!
//! Costs are whole credits. A request is validated against its provider's
//! constraint table before any price lookup, so pricing only ever sees
//! admissible parameters.
//!
//! Untabulated durations on variable-duration providers are prorated from
//! the largest tabulated duration below them:
//! `ceil(amount(d0) * d / d0)`.
//!
//! Image providers charge per output image, by resolution where the
//! provider prices it, times the requested variant count.

use serde::Serialize;

use crate::constraints::{self, ConstraintViolation, ValidatedParams};
use crate::provider::ProviderKind;
use crate::types::{GenerationRequest, Quality, Resolution};

/// One tabulated price point. `None` in `resolution` or `tier` means the
/// provider does not price along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRow {
    pub resolution: Option<Resolution>,
    pub tier: Option<Quality>,
    pub duration_seconds: u32,
    pub amount: u64,
}

/// Per-second rate for providers billed linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRow {
    pub tier: Quality,
    pub sound: bool,
    pub per_second: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTable {
    /// Same price for every admissible request.
    Flat(u64),
    Tabulated(&'static [PriceRow]),
    PerSecond(&'static [RateRow]),
    PerImage {
        base: u64,
        by_resolution: &'static [(Resolution, u64)],
    },
}

/// Result of a cost calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostResult {
    pub amount: u64,
}

const fn row(resolution: Option<Resolution>, tier: Option<Quality>, d: u32, amount: u64) -> PriceRow {
    PriceRow {
        resolution,
        tier,
        duration_seconds: d,
        amount,
    }
}

const KLING_V25: &[PriceRow] = &[row(None, None, 5, 210), row(None, None, 10, 420)];

const KLING_V30: &[RateRow] = &[
    RateRow { tier: Quality::Standard, sound: false, per_second: 60 },
    RateRow { tier: Quality::Standard, sound: true, per_second: 90 },
    RateRow { tier: Quality::High, sound: false, per_second: 85 },
    RateRow { tier: Quality::High, sound: true, per_second: 120 },
];

const WAN_25: &[PriceRow] = &[
    row(Some(Resolution::P720), None, 5, 300),
    row(Some(Resolution::P720), None, 10, 600),
    row(Some(Resolution::P1080), None, 5, 500),
    row(Some(Resolution::P1080), None, 10, 1000),
];

const SORA_2: &[PriceRow] = &[row(None, None, 10, 100), row(None, None, 15, 140)];

const SORA_2_PRO: &[PriceRow] = &[
    row(None, Some(Quality::Standard), 10, 375),
    row(None, Some(Quality::Standard), 15, 675),
    row(None, Some(Quality::High), 10, 825),
    row(None, Some(Quality::High), 15, 1575),
];

const HAILUO_STANDARD: &[PriceRow] = &[
    row(Some(Resolution::P768), None, 6, 125),
    row(Some(Resolution::P1080), None, 6, 200),
    row(Some(Resolution::P768), None, 10, 200),
];

const HAILUO_PRO: &[PriceRow] = &[
    row(Some(Resolution::P768), None, 6, 200),
    row(Some(Resolution::P1080), None, 6, 350),
    row(Some(Resolution::P768), None, 10, 400),
];

const fn per_image(base: u64) -> PriceTable {
    PriceTable::PerImage {
        base,
        by_resolution: &[],
    }
}

pub fn price_table(kind: ProviderKind) -> PriceTable {
    match kind {
        ProviderKind::KlingV25 => PriceTable::Tabulated(KLING_V25),
        ProviderKind::KlingV30 => PriceTable::PerSecond(KLING_V30),
        ProviderKind::Wan25 => PriceTable::Tabulated(WAN_25),
        ProviderKind::Sora2 => PriceTable::Tabulated(SORA_2),
        ProviderKind::Sora2Pro => PriceTable::Tabulated(SORA_2_PRO),
        ProviderKind::Veo31Fast => PriceTable::Flat(300),
        ProviderKind::HailuoStandard => PriceTable::Tabulated(HAILUO_STANDARD),
        ProviderKind::HailuoPro => PriceTable::Tabulated(HAILUO_PRO),
        ProviderKind::NanoBanana | ProviderKind::NanoBananaEdit => per_image(20),
        ProviderKind::NanoBananaPro => PriceTable::PerImage {
            base: 90,
            by_resolution: &[(Resolution::K4, 120)],
        },
        ProviderKind::SeedreamV4 => per_image(20),
        ProviderKind::Seedream45 => per_image(35),
        ProviderKind::Flux2Flex => PriceTable::PerImage {
            base: 70,
            by_resolution: &[(Resolution::K2, 120)],
        },
        ProviderKind::ZImage => per_image(5),
        ProviderKind::GptImage => per_image(30),
    }
}

/// Validate `request` against the provider's constraints, then price it.
pub fn calculate_cost(
    kind: ProviderKind,
    request: &GenerationRequest,
) -> Result<CostResult, ConstraintViolation> {
    let params = constraints::validate(kind, request)?;
    price_validated(&params)
}

/// Price parameters that have already passed validation.
pub fn price_validated(params: &ValidatedParams) -> Result<CostResult, ConstraintViolation> {
    let kind = params.provider();
    let amount = match price_table(kind) {
        PriceTable::Flat(amount) => amount,
        PriceTable::PerSecond(rates) => {
            let d = require_duration(kind, params)?;
            let tier = params.tier().unwrap_or_default();
            let rate = rates
                .iter()
                .find(|r| r.tier == tier && r.sound == params.sound())
                .ok_or_else(|| missing_price(kind, params))?;
            rate.per_second * u64::from(d)
        }
        PriceTable::Tabulated(rows) => {
            let d = require_duration(kind, params)?;
            let candidates = rows
                .iter()
                .filter(|r| r.resolution == params.resolution() && r.tier == params.tier());
            lookup(candidates, d).ok_or_else(|| missing_price(kind, params))?
        }
        PriceTable::PerImage { base, by_resolution } => {
            let rate = by_resolution
                .iter()
                .find(|(r, _)| Some(*r) == params.resolution())
                .map_or(base, |(_, amount)| *amount);
            rate * u64::from(params.variants())
        }
    };
    Ok(CostResult { amount })
}

/// Exact match first, then proration from the largest shorter row.
fn lookup<'a>(rows: impl Iterator<Item = &'a PriceRow> + Clone, d: u32) -> Option<u64> {
    if let Some(exact) = rows.clone().find(|r| r.duration_seconds == d) {
        return Some(exact.amount);
    }
    rows.filter(|r| r.duration_seconds < d)
        .max_by_key(|r| r.duration_seconds)
        .map(|base| prorate(base.amount, base.duration_seconds, d))
}

/// `ceil(amount * d / base_duration)` in integer arithmetic.
pub fn prorate(amount: u64, base_duration: u32, d: u32) -> u64 {
    let base = u64::from(base_duration.max(1));
    (amount * u64::from(d) + base - 1) / base
}

fn require_duration(kind: ProviderKind, params: &ValidatedParams) -> Result<u32, ConstraintViolation> {
    params.duration_seconds().ok_or_else(|| {
        ConstraintViolation::new(
            "duration_seconds",
            format!("{} requires a duration", kind.display_name()),
        )
    })
}

fn missing_price(kind: ProviderKind, params: &ValidatedParams) -> ConstraintViolation {
    let resolution = params
        .resolution()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "default".into());
    ConstraintViolation::new(
        "duration_seconds",
        format!(
            "{} has no price for {}s at {resolution}",
            kind.display_name(),
            params.duration_seconds().unwrap_or_default()
        ),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
