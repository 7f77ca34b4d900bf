//! Closed catalogue of generation providers.
//!
//! Every model identifier the product accepts resolves to exactly one
//! [`ProviderKind`] through an explicit alias list. There is no fuzzy or
//! substring matching: an identifier that is not listed is rejected with
//! [`CoreError::UnknownModel`] instead of being routed to a "close" provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a provider produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// A provider variant. Variants that share an upstream service but differ in
/// pricing or wire model name (Hailuo standard/pro) are separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    KlingV25,
    KlingV30,
    Wan25,
    Sora2,
    Sora2Pro,
    Veo31Fast,
    HailuoStandard,
    HailuoPro,
    NanoBanana,
    NanoBananaEdit,
    NanoBananaPro,
    SeedreamV4,
    Seedream45,
    Flux2Flex,
    ZImage,
    GptImage,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 16] = [
        ProviderKind::KlingV25,
        ProviderKind::KlingV30,
        ProviderKind::Wan25,
        ProviderKind::Sora2,
        ProviderKind::Sora2Pro,
        ProviderKind::Veo31Fast,
        ProviderKind::HailuoStandard,
        ProviderKind::HailuoPro,
        ProviderKind::NanoBanana,
        ProviderKind::NanoBananaEdit,
        ProviderKind::NanoBananaPro,
        ProviderKind::SeedreamV4,
        ProviderKind::Seedream45,
        ProviderKind::Flux2Flex,
        ProviderKind::ZImage,
        ProviderKind::GptImage,
    ];

    pub fn media(self) -> MediaKind {
        match self {
            Self::KlingV25
            | Self::KlingV30
            | Self::Wan25
            | Self::Sora2
            | Self::Sora2Pro
            | Self::Veo31Fast
            | Self::HailuoStandard
            | Self::HailuoPro => MediaKind::Video,
            Self::NanoBanana
            | Self::NanoBananaEdit
            | Self::NanoBananaPro
            | Self::SeedreamV4
            | Self::Seedream45
            | Self::Flux2Flex
            | Self::ZImage
            | Self::GptImage => MediaKind::Image,
        }
    }

    /// Canonical model identifier stored alongside jobs.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::KlingV25 => "kling/video-v2.5",
            Self::KlingV30 => "kling-3.0/video",
            Self::Wan25 => "wan/2.5",
            Self::Sora2 => "sora-2",
            Self::Sora2Pro => "sora-2-pro",
            Self::Veo31Fast => "veo3_fast",
            Self::HailuoStandard => "hailuo/2-3-image-to-video-standard",
            Self::HailuoPro => "hailuo/2-3-image-to-video-pro",
            Self::NanoBanana => "google/nano-banana",
            Self::NanoBananaEdit => "google/nano-banana-edit",
            Self::NanoBananaPro => "nano-banana-pro",
            Self::SeedreamV4 => "bytedance/seedream-v4",
            Self::Seedream45 => "seedream/4.5",
            Self::Flux2Flex => "flux-2/flex",
            Self::ZImage => "z-image",
            Self::GptImage => "gpt-image-1",
        }
    }

    /// Human-readable name used in logs and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::KlingV25 => "Kling 2.5 Turbo",
            Self::KlingV30 => "Kling 3.0",
            Self::Wan25 => "Wan 2.5",
            Self::Sora2 => "Sora 2",
            Self::Sora2Pro => "Sora 2 Pro",
            Self::Veo31Fast => "Veo 3.1 Fast",
            Self::HailuoStandard => "Hailuo 2.3 Standard",
            Self::HailuoPro => "Hailuo 2.3 Pro",
            Self::NanoBanana => "Nano Banana",
            Self::NanoBananaEdit => "Nano Banana Edit",
            Self::NanoBananaPro => "Nano Banana Pro",
            Self::SeedreamV4 => "Seedream 4.0",
            Self::Seedream45 => "Seedream 4.5",
            Self::Flux2Flex => "Flux 2 Flex",
            Self::ZImage => "Z-Image",
            Self::GptImage => "GPT Image 1",
        }
    }

    /// Accepted spellings besides [`model_id`](Self::model_id), compared
    /// case-insensitively.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::KlingV25 => &["kling/video.v2.5", "kling", "kling-v2.5"],
            Self::KlingV30 => &["kling/video-v3.0", "kling-v3.0"],
            Self::Wan25 => &["wan2.5", "wan-2.5", "wan"],
            Self::Sora2 => &["sora2"],
            Self::Sora2Pro => &["sora2-pro", "sora2_pro", "sora-2 pro"],
            Self::Veo31Fast => &["veo3.1-fast", "veo-3.1-fast", "veo 3.1 fast", "veo3.1 fast"],
            Self::HailuoStandard => &["hailuo 2.3", "hailuo-2.3", "hailuo"],
            Self::HailuoPro => &["hailuo-2.3-pro", "hailuo 2.3 pro"],
            Self::NanoBanana => &["nano-banana"],
            Self::NanoBananaEdit => &["nano-banana-edit"],
            Self::NanoBananaPro => &["google/nano-banana-pro"],
            Self::SeedreamV4 => &[
                "seedream",
                "seedream-v4",
                "bytedance/seedream-v4-text-to-image",
                "bytedance/seedream-v4-edit",
            ],
            Self::Seedream45 => &["seedream-4.5", "seedream/4.5-text-to-image", "seedream/4.5-edit"],
            Self::Flux2Flex => &["flux-2-flex", "flux-2/flex-text-to-image", "flux-2/flex-image-to-image"],
            Self::ZImage => &["zimage"],
            Self::GptImage => &["gpt-4o-image", "gpt4o-image", "gpt4o"],
        }
    }

    /// Resolve a caller-supplied model identifier.
    pub fn from_model_identifier(identifier: &str) -> Result<Self, CoreError> {
        let needle = identifier.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.model_id().eq_ignore_ascii_case(&needle)
                    || kind.aliases().iter().any(|a| a.eq_ignore_ascii_case(&needle))
            })
            .ok_or_else(|| CoreError::UnknownModel(identifier.to_string()))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
