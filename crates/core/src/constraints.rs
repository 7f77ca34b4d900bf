//! Table-driven parameter validation.
//!
//! Each provider declares one [`ConstraintTable`]: its admissible durations,
//! resolutions and aspect ratios, forbidden `(duration, resolution)` pairs,
//! how it reads the quality tier, its image rule, and whether it batches
//! images or accepts a multi-shot prompt list. [`validate`] is total over a table:
//! every parameter combination is either admitted or rejected with a
//! [`ConstraintViolation`]. It never picks a "closest" value for the caller.
//!
//! Absent parameters are filled from the table's declared defaults.
//! Parameters a provider does not expose are ignored.

use serde::Serialize;

use crate::images::select_images;
use crate::provider::ProviderKind;
use crate::types::{AspectRatio, GenerationRequest, Quality, Resolution, ShotPrompt};

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// A parameter that the selected provider cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Constraint violated on '{field}': {reason}")]
pub struct ConstraintViolation {
    pub field: String,
    pub reason: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// Admissible durations, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRule {
    /// The provider has no duration knob; any supplied value is ignored.
    NotApplicable,
    /// Only the listed durations are accepted.
    Discrete {
        allowed: &'static [u32],
        default: u32,
    },
    /// Any duration in `min..=max` is accepted (`max: None` means unbounded).
    Variable {
        min: u32,
        max: Option<u32>,
        default: u32,
    },
}

/// Where an absent resolution comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionDefault {
    Fixed(Resolution),
    ByQuality {
        standard: Resolution,
        high: Resolution,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    NotApplicable,
    OneOf {
        allowed: &'static [Resolution],
        default: ResolutionDefault,
    },
}

/// How the provider derives its price tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierRule {
    NotApplicable,
    /// Tier is the requested quality (default standard).
    Quality,
    /// High quality, or the given resolution, selects the premium tier.
    QualityOrResolution(Resolution),
}

/// Admissible aspect ratios. Orientation-only inputs are compared after
/// [`AspectRatio::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRule {
    /// The wire mapping translates or falls back for every value.
    Any,
    OneOf(&'static [AspectRatio]),
}

/// How many outputs one task may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantRule {
    /// One output per task; a supplied count is ignored.
    Single,
    /// `1..=max` outputs, default one.
    UpTo(u32),
}

/// Multi-shot prompt lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotRule {
    NotApplicable,
    /// Each shot lasts `shot_min..=shot_max` seconds and the shots together
    /// `total_min..=total_max`. Multi-shot output always carries sound and
    /// starts from exactly one frame image.
    Supported {
        shot_min: u32,
        shot_max: u32,
        total_min: u32,
        total_max: u32,
    },
}

/// Order in which character and reference images are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrder {
    CharacterFirst,
    ReferencesFirst,
    /// Only reference images are sent; the character image is not an input.
    ReferencesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRule {
    /// Most images the provider accepts; extra images are dropped in order.
    /// Zero means the provider takes no input image and rejects any.
    pub max_images: usize,
    pub order: ImageOrder,
    /// Image-to-video-only and edit-only providers require at least one image.
    pub required: bool,
}

/// Everything a provider admits, as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintTable {
    pub durations: DurationRule,
    pub resolutions: ResolutionRule,
    /// `(duration, resolution)` pairs rejected even though each value is
    /// individually admissible.
    pub forbidden: &'static [(u32, Resolution)],
    pub aspect_ratios: AspectRule,
    pub tier: TierRule,
    pub supports_sound: bool,
    pub images: ImageRule,
    pub variants: VariantRule,
    pub shots: ShotRule,
}

// ---------------------------------------------------------------------------
// Provider tables
// ---------------------------------------------------------------------------

const KLING_V25: ConstraintTable = ConstraintTable {
    durations: DurationRule::Discrete {
        allowed: &[5, 10],
        default: 5,
    },
    resolutions: ResolutionRule::NotApplicable,
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 1,
        order: ImageOrder::CharacterFirst,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

const KLING_V30: ConstraintTable = ConstraintTable {
    durations: DurationRule::Variable {
        min: 3,
        max: Some(15),
        default: 5,
    },
    resolutions: ResolutionRule::OneOf {
        allowed: &[Resolution::P720, Resolution::P1080],
        default: ResolutionDefault::ByQuality {
            standard: Resolution::P720,
            high: Resolution::P1080,
        },
    },
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::QualityOrResolution(Resolution::P1080),
    supports_sound: true,
    images: ImageRule {
        max_images: 2,
        order: ImageOrder::CharacterFirst,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::Supported {
        shot_min: 3,
        shot_max: 12,
        total_min: 3,
        total_max: 15,
    },
};

const WAN_25: ConstraintTable = ConstraintTable {
    durations: DurationRule::Discrete {
        allowed: &[5, 10],
        default: 5,
    },
    resolutions: ResolutionRule::OneOf {
        allowed: &[Resolution::P720, Resolution::P1080],
        default: ResolutionDefault::ByQuality {
            standard: Resolution::P720,
            high: Resolution::P1080,
        },
    },
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 1,
        order: ImageOrder::CharacterFirst,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

const SORA_2: ConstraintTable = ConstraintTable {
    durations: DurationRule::Variable {
        min: 10,
        max: None,
        default: 10,
    },
    resolutions: ResolutionRule::NotApplicable,
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 3,
        order: ImageOrder::ReferencesFirst,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

const SORA_2_PRO: ConstraintTable = ConstraintTable {
    tier: TierRule::Quality,
    ..SORA_2
};

const VEO_31_FAST: ConstraintTable = ConstraintTable {
    durations: DurationRule::NotApplicable,
    resolutions: ResolutionRule::NotApplicable,
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 1,
        order: ImageOrder::CharacterFirst,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

// 1080p exists only for the 6-second clip.
const HAILUO_23: ConstraintTable = ConstraintTable {
    durations: DurationRule::Discrete {
        allowed: &[6, 10],
        default: 6,
    },
    resolutions: ResolutionRule::OneOf {
        allowed: &[Resolution::P768, Resolution::P1080],
        default: ResolutionDefault::Fixed(Resolution::P768),
    },
    forbidden: &[(10, Resolution::P1080)],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 1,
        order: ImageOrder::CharacterFirst,
        required: true,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

const IMAGE_RESOLUTIONS: &[Resolution] = &[Resolution::K1, Resolution::K2, Resolution::K4];

const NANO_BANANA: ConstraintTable = ConstraintTable {
    durations: DurationRule::NotApplicable,
    resolutions: ResolutionRule::NotApplicable,
    forbidden: &[],
    aspect_ratios: AspectRule::Any,
    tier: TierRule::NotApplicable,
    supports_sound: false,
    images: ImageRule {
        max_images: 10,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    variants: VariantRule::Single,
    shots: ShotRule::NotApplicable,
};

const NANO_BANANA_EDIT: ConstraintTable = ConstraintTable {
    images: ImageRule {
        required: true,
        ..NANO_BANANA.images
    },
    ..NANO_BANANA
};

// No "auto" frame.
const NANO_BANANA_PRO: ConstraintTable = ConstraintTable {
    resolutions: ResolutionRule::OneOf {
        allowed: IMAGE_RESOLUTIONS,
        default: ResolutionDefault::Fixed(Resolution::K2),
    },
    aspect_ratios: AspectRule::OneOf(&[
        AspectRatio::Square,
        AspectRatio::Ratio2x3,
        AspectRatio::Ratio3x2,
        AspectRatio::Ratio3x4,
        AspectRatio::Ratio4x3,
        AspectRatio::Ratio4x5,
        AspectRatio::Ratio5x4,
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
        AspectRatio::Ratio21x9,
    ]),
    images: ImageRule {
        max_images: 8,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    ..NANO_BANANA
};

const SEEDREAM_V4: ConstraintTable = ConstraintTable {
    resolutions: ResolutionRule::OneOf {
        allowed: IMAGE_RESOLUTIONS,
        default: ResolutionDefault::Fixed(Resolution::K2),
    },
    variants: VariantRule::UpTo(6),
    ..NANO_BANANA
};

const SEEDREAM_45: ConstraintTable = ConstraintTable {
    tier: TierRule::Quality,
    images: ImageRule {
        max_images: 14,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    ..NANO_BANANA
};

const FLUX_2_FLEX: ConstraintTable = ConstraintTable {
    resolutions: ResolutionRule::OneOf {
        allowed: &[Resolution::K1, Resolution::K2],
        default: ResolutionDefault::Fixed(Resolution::K1),
    },
    aspect_ratios: AspectRule::OneOf(&[
        AspectRatio::Square,
        AspectRatio::Ratio4x3,
        AspectRatio::Ratio3x4,
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
        AspectRatio::Ratio2x3,
        AspectRatio::Ratio3x2,
        AspectRatio::Auto,
    ]),
    images: ImageRule {
        max_images: 8,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    ..NANO_BANANA
};

// Text-to-image only.
const Z_IMAGE: ConstraintTable = ConstraintTable {
    images: ImageRule {
        max_images: 0,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    ..NANO_BANANA
};

const GPT_IMAGE: ConstraintTable = ConstraintTable {
    images: ImageRule {
        max_images: 5,
        order: ImageOrder::ReferencesOnly,
        required: false,
    },
    variants: VariantRule::UpTo(4),
    ..NANO_BANANA
};

/// The constraint table for a provider.
pub fn table_for(kind: ProviderKind) -> &'static ConstraintTable {
    match kind {
        ProviderKind::KlingV25 => &KLING_V25,
        ProviderKind::KlingV30 => &KLING_V30,
        ProviderKind::Wan25 => &WAN_25,
        ProviderKind::Sora2 => &SORA_2,
        ProviderKind::Sora2Pro => &SORA_2_PRO,
        ProviderKind::Veo31Fast => &VEO_31_FAST,
        ProviderKind::HailuoStandard | ProviderKind::HailuoPro => &HAILUO_23,
        ProviderKind::NanoBanana => &NANO_BANANA,
        ProviderKind::NanoBananaEdit => &NANO_BANANA_EDIT,
        ProviderKind::NanoBananaPro => &NANO_BANANA_PRO,
        ProviderKind::SeedreamV4 => &SEEDREAM_V4,
        ProviderKind::Seedream45 => &SEEDREAM_45,
        ProviderKind::Flux2Flex => &FLUX_2_FLEX,
        ProviderKind::ZImage => &Z_IMAGE,
        ProviderKind::GptImage => &GPT_IMAGE,
    }
}

// ---------------------------------------------------------------------------
// Validated parameters
// ---------------------------------------------------------------------------

/// Parameters admitted by a provider's table, with defaults filled in.
///
/// Only [`validate`] constructs this type, so anything that takes
/// `&ValidatedParams` (pricing, wire mapping) is guaranteed to see an
/// admissible combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedParams {
    provider: ProviderKind,
    duration_seconds: Option<u32>,
    resolution: Option<Resolution>,
    tier: Option<Quality>,
    sound: bool,
    variants: u32,
    multi_shot: bool,
}

impl ValidatedParams {
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// `None` when the provider has no duration knob.
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration_seconds
    }

    /// `None` when the provider has no resolution knob.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// `None` when the provider does not price by tier.
    pub fn tier(&self) -> Option<Quality> {
        self.tier
    }

    pub fn sound(&self) -> bool {
        self.sound
    }

    /// Outputs the task produces; one unless the provider batches.
    pub fn variants(&self) -> u32 {
        self.variants
    }

    /// The request runs as a multi-shot video. `duration_seconds` is then
    /// the sum of the shots.
    pub fn multi_shot(&self) -> bool {
        self.multi_shot
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a request against the provider's table.
pub fn validate(
    kind: ProviderKind,
    request: &GenerationRequest,
) -> Result<ValidatedParams, ConstraintViolation> {
    let table = table_for(kind);
    let multi_shot =
        matches!(table.shots, ShotRule::Supported { .. }) && !request.multi_prompt.is_empty();

    if !multi_shot && request.prompt.trim().is_empty() {
        return Err(ConstraintViolation::new("prompt", "must not be empty"));
    }

    let images = validate_images(kind, table.images, request)?;

    let quality = request.quality.unwrap_or_default();
    let duration_seconds = if multi_shot {
        Some(validate_shots(kind, table.shots, &request.multi_prompt)?)
    } else {
        validate_duration(kind, table.durations, request.duration_seconds)?
    };
    let resolution = validate_resolution(kind, table.resolutions, request.resolution, quality)?;
    validate_aspect_ratio(kind, table.aspect_ratios, request.aspect_ratio)?;
    let variants = validate_variants(kind, table.variants, request.count)?;

    if let (Some(d), Some(r)) = (duration_seconds, resolution) {
        if table.forbidden.contains(&(d, r)) {
            return Err(ConstraintViolation::new(
                "resolution",
                format!(
                    "{} does not support {r} at {d}s",
                    kind.display_name()
                ),
            ));
        }
    }

    if multi_shot {
        match images {
            0 => {
                return Err(ConstraintViolation::new(
                    "character_image_url",
                    format!("{} multi-shot requires a start frame image", kind.display_name()),
                ))
            }
            1 => {}
            _ => {
                return Err(ConstraintViolation::new(
                    "reference_image_urls",
                    format!("{} multi-shot accepts only one image", kind.display_name()),
                ))
            }
        }
    }

    let tier = match table.tier {
        TierRule::NotApplicable => None,
        TierRule::Quality => Some(quality),
        TierRule::QualityOrResolution(premium) => {
            if quality == Quality::High || resolution == Some(premium) {
                Some(Quality::High)
            } else {
                Some(Quality::Standard)
            }
        }
    };

    Ok(ValidatedParams {
        provider: kind,
        duration_seconds,
        resolution,
        tier,
        sound: multi_shot || (table.supports_sound && request.sound.unwrap_or(false)),
        variants,
        multi_shot,
    })
}

/// Returns how many images survive selection.
fn validate_images(
    kind: ProviderKind,
    rule: ImageRule,
    request: &GenerationRequest,
) -> Result<usize, ConstraintViolation> {
    if rule.max_images == 0 {
        if request.reference_image_urls.iter().any(|url| !url.trim().is_empty()) {
            return Err(ConstraintViolation::new(
                "reference_image_urls",
                format!("{} does not accept reference images", kind.display_name()),
            ));
        }
        return Ok(0);
    }

    let selected = select_images(request, &rule).len();
    if rule.required && selected == 0 {
        return Err(match rule.order {
            ImageOrder::ReferencesOnly => ConstraintViolation::new(
                "reference_image_urls",
                format!(
                    "{} edits an input image and requires at least one reference image",
                    kind.display_name()
                ),
            ),
            ImageOrder::CharacterFirst | ImageOrder::ReferencesFirst => ConstraintViolation::new(
                "character_image_url",
                format!(
                    "{} is image-to-video only and requires a character or reference image",
                    kind.display_name()
                ),
            ),
        });
    }
    Ok(selected)
}

/// Returns the total multi-shot duration.
fn validate_shots(
    kind: ProviderKind,
    rule: ShotRule,
    shots: &[ShotPrompt],
) -> Result<u32, ConstraintViolation> {
    let ShotRule::Supported {
        shot_min,
        shot_max,
        total_min,
        total_max,
    } = rule
    else {
        return Err(ConstraintViolation::new(
            "multi_prompt",
            format!("{} does not support multi-shot prompts", kind.display_name()),
        ));
    };

    let mut total: u32 = 0;
    for (i, shot) in shots.iter().enumerate() {
        if shot.prompt.trim().is_empty() {
            return Err(ConstraintViolation::new(
                "multi_prompt",
                format!("shot {} has an empty prompt", i + 1),
            ));
        }
        if !(shot_min..=shot_max).contains(&shot.duration_seconds) {
            return Err(ConstraintViolation::new(
                "multi_prompt",
                format!(
                    "{} shots last {shot_min} to {shot_max} seconds, shot {} is {}",
                    kind.display_name(),
                    i + 1,
                    shot.duration_seconds
                ),
            ));
        }
        total = total.saturating_add(shot.duration_seconds);
    }

    if !(total_min..=total_max).contains(&total) {
        return Err(ConstraintViolation::new(
            "multi_prompt",
            format!(
                "{} multi-shot videos last {total_min} to {total_max} seconds in total, got {total}",
                kind.display_name()
            ),
        ));
    }
    Ok(total)
}

fn validate_aspect_ratio(
    kind: ProviderKind,
    rule: AspectRule,
    requested: Option<AspectRatio>,
) -> Result<(), ConstraintViolation> {
    match (rule, requested) {
        (AspectRule::OneOf(allowed), Some(aspect)) if !allowed.contains(&aspect.canonical()) => {
            Err(ConstraintViolation::new(
                "aspect_ratio",
                format!(
                    "{} supports aspect ratios {}, got {aspect}",
                    kind.display_name(),
                    join(allowed.iter())
                ),
            ))
        }
        _ => Ok(()),
    }
}

fn validate_variants(
    kind: ProviderKind,
    rule: VariantRule,
    requested: Option<u32>,
) -> Result<u32, ConstraintViolation> {
    match rule {
        VariantRule::Single => Ok(1),
        VariantRule::UpTo(max) => {
            let count = requested.unwrap_or(1);
            if (1..=max).contains(&count) {
                Ok(count)
            } else {
                Err(ConstraintViolation::new(
                    "count",
                    format!(
                        "{} generates 1 to {max} images per task, got {count}",
                        kind.display_name()
                    ),
                ))
            }
        }
    }
}

fn validate_duration(
    kind: ProviderKind,
    rule: DurationRule,
    requested: Option<u32>,
) -> Result<Option<u32>, ConstraintViolation> {
    match rule {
        DurationRule::NotApplicable => Ok(None),
        DurationRule::Discrete { allowed, default } => {
            let d = requested.unwrap_or(default);
            if allowed.contains(&d) {
                Ok(Some(d))
            } else {
                Err(ConstraintViolation::new(
                    "duration_seconds",
                    format!(
                        "{} supports durations {} seconds, got {d}",
                        kind.display_name(),
                        join(allowed.iter())
                    ),
                ))
            }
        }
        DurationRule::Variable { min, max, default } => {
            let d = requested.unwrap_or(default);
            if d < min {
                return Err(ConstraintViolation::new(
                    "duration_seconds",
                    format!(
                        "{} requires at least {min} seconds, got {d}",
                        kind.display_name()
                    ),
                ));
            }
            if let Some(max) = max {
                if d > max {
                    return Err(ConstraintViolation::new(
                        "duration_seconds",
                        format!(
                            "{} allows at most {max} seconds, got {d}",
                            kind.display_name()
                        ),
                    ));
                }
            }
            Ok(Some(d))
        }
    }
}

fn validate_resolution(
    kind: ProviderKind,
    rule: ResolutionRule,
    requested: Option<Resolution>,
    quality: Quality,
) -> Result<Option<Resolution>, ConstraintViolation> {
    match rule {
        ResolutionRule::NotApplicable => Ok(None),
        ResolutionRule::OneOf { allowed, default } => {
            let r = requested.unwrap_or(match default {
                ResolutionDefault::Fixed(r) => r,
                ResolutionDefault::ByQuality { standard, high } => match quality {
                    Quality::Standard => standard,
                    Quality::High => high,
                },
            });
            if allowed.contains(&r) {
                Ok(Some(r))
            } else {
                Err(ConstraintViolation::new(
                    "resolution",
                    format!(
                        "{} supports resolutions {}, got {r}",
                        kind.display_name(),
                        join(allowed.iter())
                    ),
                ))
            }
        }
    }
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str) -> GenerationRequest {
        let mut req = GenerationRequest::new(model, "an archer on a cliff");
        req.character_image_url = Some("https://cdn.example/oc.png".into());
        req
    }

    // -- defaults --

    #[test]
    fn hailuo_defaults_to_six_seconds_768p() {
        let params = validate(ProviderKind::HailuoStandard, &request("hailuo")).unwrap();
        assert_eq!(params.duration_seconds(), Some(6));
        assert_eq!(params.resolution(), Some(Resolution::P768));
    }

    #[test]
    fn wan_resolution_defaults_from_quality() {
        let mut req = request("wan");
        req.quality = Some(Quality::High);
        let params = validate(ProviderKind::Wan25, &req).unwrap();
        assert_eq!(params.resolution(), Some(Resolution::P1080));

        req.quality = None;
        let params = validate(ProviderKind::Wan25, &req).unwrap();
        assert_eq!(params.resolution(), Some(Resolution::P720));
    }

    #[test]
    fn supplied_resolution_is_never_replaced() {
        let mut req = request("wan");
        req.quality = Some(Quality::High);
        req.resolution = Some(Resolution::P720);
        let params = validate(ProviderKind::Wan25, &req).unwrap();
        assert_eq!(params.resolution(), Some(Resolution::P720));
    }

    // -- rejections --

    #[test]
    fn hailuo_rejects_1080p_at_ten_seconds() {
        let mut req = request("hailuo");
        req.duration_seconds = Some(10);
        req.resolution = Some(Resolution::P1080);
        let err = validate(ProviderKind::HailuoStandard, &req).unwrap_err();
        assert_eq!(err.field, "resolution");
        assert!(err.reason.contains("1080p at 10s"));
    }

    #[test]
    fn hailuo_accepts_1080p_at_six_seconds() {
        let mut req = request("hailuo");
        req.duration_seconds = Some(6);
        req.resolution = Some(Resolution::P1080);
        assert!(validate(ProviderKind::HailuoPro, &req).is_ok());
    }

    #[test]
    fn hailuo_requires_an_image() {
        let req = GenerationRequest::new("hailuo", "prompt");
        let err = validate(ProviderKind::HailuoStandard, &req).unwrap_err();
        assert_eq!(err.field, "character_image_url");
    }

    #[test]
    fn hailuo_rejects_blank_image_urls() {
        let mut req = GenerationRequest::new("hailuo", "prompt");
        req.character_image_url = Some("   ".into());
        let err = validate(ProviderKind::HailuoStandard, &req).unwrap_err();
        assert_eq!(err.field, "character_image_url");

        let mut req = GenerationRequest::new("hailuo", "prompt");
        req.reference_image_urls = vec!["".into()];
        let err = validate(ProviderKind::HailuoPro, &req).unwrap_err();
        assert_eq!(err.field, "character_image_url");
    }

    #[test]
    fn hailuo_accepts_reference_image_in_place_of_character() {
        let mut req = GenerationRequest::new("hailuo", "prompt");
        req.reference_image_urls = vec!["https://cdn.example/ref.png".into()];
        assert!(validate(ProviderKind::HailuoStandard, &req).is_ok());
    }

    #[test]
    fn discrete_duration_has_no_closest_match() {
        let mut req = request("kling");
        req.duration_seconds = Some(7);
        let err = validate(ProviderKind::KlingV25, &req).unwrap_err();
        assert_eq!(err.field, "duration_seconds");
        assert!(err.reason.contains("5, 10"));
    }

    #[test]
    fn resolution_outside_table_rejected() {
        let mut req = request("wan");
        req.resolution = Some(Resolution::P768);
        let err = validate(ProviderKind::Wan25, &req).unwrap_err();
        assert_eq!(err.field, "resolution");
    }

    #[test]
    fn variable_duration_bounds() {
        let mut req = request("sora-2");
        req.duration_seconds = Some(9);
        assert!(validate(ProviderKind::Sora2, &req).is_err());
        req.duration_seconds = Some(37);
        assert_eq!(
            validate(ProviderKind::Sora2, &req).unwrap().duration_seconds(),
            Some(37)
        );

        req.duration_seconds = Some(16);
        let err = validate(ProviderKind::KlingV30, &req).unwrap_err();
        assert!(err.reason.contains("at most 15"));
        req.duration_seconds = Some(2);
        assert!(validate(ProviderKind::KlingV30, &req).is_err());
    }

    #[test]
    fn blank_prompt_rejected() {
        let mut req = request("veo3_fast");
        req.prompt = "   ".into();
        let err = validate(ProviderKind::Veo31Fast, &req).unwrap_err();
        assert_eq!(err.field, "prompt");
    }

    // -- not-applicable axes --

    #[test]
    fn veo_ignores_duration_and_resolution() {
        let mut req = request("veo3_fast");
        req.duration_seconds = Some(99);
        req.resolution = Some(Resolution::K4);
        let params = validate(ProviderKind::Veo31Fast, &req).unwrap();
        assert_eq!(params.duration_seconds(), None);
        assert_eq!(params.resolution(), None);
    }

    // -- tiers --

    #[test]
    fn kling_v30_tier_from_quality_or_resolution() {
        let mut req = request("kling-3.0/video");
        assert_eq!(
            validate(ProviderKind::KlingV30, &req).unwrap().tier(),
            Some(Quality::Standard)
        );

        req.resolution = Some(Resolution::P1080);
        assert_eq!(
            validate(ProviderKind::KlingV30, &req).unwrap().tier(),
            Some(Quality::High)
        );

        req.resolution = Some(Resolution::P720);
        req.quality = Some(Quality::High);
        assert_eq!(
            validate(ProviderKind::KlingV30, &req).unwrap().tier(),
            Some(Quality::High)
        );
    }

    #[test]
    fn sound_only_where_supported() {
        let mut req = request("kling-3.0/video");
        req.sound = Some(true);
        assert!(validate(ProviderKind::KlingV30, &req).unwrap().sound());
        assert!(!validate(ProviderKind::Sora2, &req).unwrap().sound());
    }

    // -- image providers --

    fn image_request(model: &str) -> GenerationRequest {
        let mut req = GenerationRequest::new(model, "a castle in watercolor");
        req.reference_image_urls = vec!["https://cdn.example/ref.png".into()];
        req
    }

    #[test]
    fn nano_banana_edit_needs_a_reference_not_a_character() {
        let mut req = GenerationRequest::new("nano-banana-edit", "make it night");
        req.character_image_url = Some("https://cdn.example/oc.png".into());
        let err = validate(ProviderKind::NanoBananaEdit, &req).unwrap_err();
        assert_eq!(err.field, "reference_image_urls");

        assert!(validate(ProviderKind::NanoBananaEdit, &image_request("nano-banana-edit")).is_ok());
    }

    #[test]
    fn z_image_rejects_reference_images() {
        let err = validate(ProviderKind::ZImage, &image_request("z-image")).unwrap_err();
        assert_eq!(err.field, "reference_image_urls");

        let mut req = GenerationRequest::new("z-image", "a castle");
        req.reference_image_urls = vec![" ".into()];
        assert!(validate(ProviderKind::ZImage, &req).is_ok());
    }

    #[test]
    fn image_resolution_defaults_and_bounds() {
        let params = validate(ProviderKind::NanoBananaPro, &image_request("nano-banana-pro")).unwrap();
        assert_eq!(params.resolution(), Some(Resolution::K2));

        let params = validate(ProviderKind::Flux2Flex, &image_request("flux-2/flex")).unwrap();
        assert_eq!(params.resolution(), Some(Resolution::K1));

        let mut req = image_request("flux-2/flex");
        req.resolution = Some(Resolution::K4);
        let err = validate(ProviderKind::Flux2Flex, &req).unwrap_err();
        assert_eq!(err.field, "resolution");

        req.resolution = Some(Resolution::P720);
        assert!(validate(ProviderKind::SeedreamV4, &req).is_err());
    }

    #[test]
    fn aspect_ratio_lists() {
        let mut req = image_request("nano-banana-pro");
        req.aspect_ratio = Some(AspectRatio::Auto);
        let err = validate(ProviderKind::NanoBananaPro, &req).unwrap_err();
        assert_eq!(err.field, "aspect_ratio");

        req.aspect_ratio = Some(AspectRatio::Ratio21x9);
        assert!(validate(ProviderKind::NanoBananaPro, &req).is_ok());
        let err = validate(ProviderKind::Flux2Flex, &req).unwrap_err();
        assert_eq!(err.field, "aspect_ratio");

        // Orientation-only input is checked as its ratio.
        req.aspect_ratio = Some(AspectRatio::Portrait);
        assert!(validate(ProviderKind::Flux2Flex, &req).is_ok());

        // Providers with a fallback mapping accept anything.
        req.aspect_ratio = Some(AspectRatio::Ratio21x9);
        assert!(validate(ProviderKind::ZImage, &GenerationRequest {
            reference_image_urls: Vec::new(),
            ..req.clone()
        })
        .is_ok());
    }

    #[test]
    fn variant_counts() {
        let mut req = image_request("gpt-image-1");
        assert_eq!(validate(ProviderKind::GptImage, &req).unwrap().variants(), 1);

        req.count = Some(4);
        assert_eq!(validate(ProviderKind::GptImage, &req).unwrap().variants(), 4);

        req.count = Some(5);
        let err = validate(ProviderKind::GptImage, &req).unwrap_err();
        assert_eq!(err.field, "count");

        req.count = Some(0);
        assert!(validate(ProviderKind::SeedreamV4, &req).is_err());

        req.count = Some(6);
        assert_eq!(validate(ProviderKind::SeedreamV4, &req).unwrap().variants(), 6);
        assert_eq!(validate(ProviderKind::NanoBanana, &req).unwrap().variants(), 1);
    }

    // -- multi-shot --

    fn shots(durations: &[u32]) -> Vec<ShotPrompt> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| ShotPrompt {
                prompt: format!("shot {i}"),
                duration_seconds: *d,
            })
            .collect()
    }

    #[test]
    fn multi_shot_sums_durations_and_forces_sound() {
        let mut req = request("kling-3.0/video");
        req.prompt = String::new();
        req.duration_seconds = Some(5);
        req.sound = Some(false);
        req.multi_prompt = shots(&[4, 6]);
        let params = validate(ProviderKind::KlingV30, &req).unwrap();
        assert!(params.multi_shot());
        assert_eq!(params.duration_seconds(), Some(10));
        assert!(params.sound());
    }

    #[test]
    fn multi_shot_bounds() {
        let mut req = request("kling-3.0/video");

        req.multi_prompt = shots(&[2, 5]);
        let err = validate(ProviderKind::KlingV30, &req).unwrap_err();
        assert_eq!(err.field, "multi_prompt");
        assert!(err.reason.contains("shot 1 is 2"));

        req.multi_prompt = shots(&[13]);
        assert!(validate(ProviderKind::KlingV30, &req).is_err());

        req.multi_prompt = shots(&[12, 4]);
        let err = validate(ProviderKind::KlingV30, &req).unwrap_err();
        assert!(err.reason.contains("got 16"));

        req.multi_prompt = shots(&[12, 3]);
        assert_eq!(
            validate(ProviderKind::KlingV30, &req).unwrap().duration_seconds(),
            Some(15)
        );

        req.multi_prompt = shots(&[5]);
        req.multi_prompt[0].prompt = " ".into();
        assert!(validate(ProviderKind::KlingV30, &req).is_err());
    }

    #[test]
    fn multi_shot_needs_exactly_one_frame() {
        let mut req = GenerationRequest::new("kling-3.0/video", "");
        req.multi_prompt = shots(&[5]);
        let err = validate(ProviderKind::KlingV30, &req).unwrap_err();
        assert_eq!(err.field, "character_image_url");

        req.character_image_url = Some("https://cdn.example/oc.png".into());
        req.reference_image_urls = vec!["https://cdn.example/ref.png".into()];
        let err = validate(ProviderKind::KlingV30, &req).unwrap_err();
        assert_eq!(err.field, "reference_image_urls");
    }

    #[test]
    fn shot_list_ignored_where_unsupported() {
        let mut req = request("sora-2");
        req.multi_prompt = shots(&[20]);
        let params = validate(ProviderKind::Sora2, &req).unwrap();
        assert!(!params.multi_shot());
        assert_eq!(params.duration_seconds(), Some(10));
    }

    // -- totality --

    #[test]
    fn every_combination_is_decided() {
        // Validation must never panic; each combination is either admitted
        // or rejected with a field-scoped violation.
        let durations = [None, Some(0), Some(3), Some(5), Some(6), Some(10), Some(15), Some(40)];
        let resolutions = std::iter::once(None).chain(Resolution::ALL.into_iter().map(Some));
        let resolutions: Vec<_> = resolutions.collect();
        for kind in ProviderKind::ALL {
            for d in durations {
                for r in &resolutions {
                    let mut req = request(kind.model_id());
                    if table_for(kind).images.max_images > 0 {
                        req.reference_image_urls = vec!["https://cdn.example/ref.png".into()];
                    }
                    req.duration_seconds = d;
                    req.resolution = *r;
                    if let Err(v) = validate(kind, &req) {
                        assert!(
                            ["duration_seconds", "resolution"].contains(&v.field.as_str()),
                            "{kind:?} {d:?} {r:?}: unexpected field {}",
                            v.field
                        );
                    }
                }
            }
        }
    }
}
