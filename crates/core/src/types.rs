//! Canonical request vocabulary shared by every provider.
//!
//! Enum values serialize to the lowercase strings the product uses
//! (`"768p"`, `"9:16"`, `"high"`); provider-specific casing is applied
//! later by each adapter's wire mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Output resolution requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1k")]
    K1,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "580p")]
    P580,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "768p")]
    P768,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2k")]
    K2,
    #[serde(rename = "4k")]
    K4,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::K1,
        Resolution::P480,
        Resolution::P580,
        Resolution::P720,
        Resolution::P768,
        Resolution::P1080,
        Resolution::K2,
        Resolution::K4,
    ];

    /// Canonical lowercase label, e.g. `"768p"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::K1 => "1k",
            Self::P480 => "480p",
            Self::P580 => "580p",
            Self::P720 => "720p",
            Self::P768 => "768p",
            Self::P1080 => "1080p",
            Self::K2 => "2k",
            Self::K4 => "4k",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| CoreError::Validation(format!("Unknown resolution '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Aspect ratio
// ---------------------------------------------------------------------------

/// Frame shape requested by the caller.
///
/// `Portrait` and `Landscape` are the orientation-only forms some UIs send;
/// adapters translate them to the nearest ratio their provider accepts.
/// `Auto` lets image providers pick the frame from their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "2:3")]
    Ratio2x3,
    #[serde(rename = "3:2")]
    Ratio3x2,
    #[serde(rename = "3:4")]
    Ratio3x4,
    #[serde(rename = "4:3")]
    Ratio4x3,
    #[serde(rename = "4:5")]
    Ratio4x5,
    #[serde(rename = "5:4")]
    Ratio5x4,
    #[serde(rename = "21:9")]
    Ratio21x9,
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "portrait")]
    Portrait,
    #[serde(rename = "landscape")]
    Landscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 13] = [
        AspectRatio::Square,
        AspectRatio::Vertical,
        AspectRatio::Widescreen,
        AspectRatio::Ratio2x3,
        AspectRatio::Ratio3x2,
        AspectRatio::Ratio3x4,
        AspectRatio::Ratio4x3,
        AspectRatio::Ratio4x5,
        AspectRatio::Ratio5x4,
        AspectRatio::Ratio21x9,
        AspectRatio::Auto,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Vertical => "9:16",
            Self::Widescreen => "16:9",
            Self::Ratio2x3 => "2:3",
            Self::Ratio3x2 => "3:2",
            Self::Ratio3x4 => "3:4",
            Self::Ratio4x3 => "4:3",
            Self::Ratio4x5 => "4:5",
            Self::Ratio5x4 => "5:4",
            Self::Ratio21x9 => "21:9",
            Self::Auto => "auto",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Orientation-only forms resolved to their ratio: `portrait` is
    /// `9:16`, `landscape` is `16:9`. Every other value is returned as is.
    pub fn canonical(self) -> AspectRatio {
        match self {
            Self::Portrait => Self::Vertical,
            Self::Landscape => Self::Widescreen,
            other => other,
        }
    }

    /// Whether the frame is wider than it is tall.
    pub fn is_landscape(self) -> bool {
        matches!(
            self.canonical(),
            Self::Widescreen | Self::Ratio3x2 | Self::Ratio4x3 | Self::Ratio5x4 | Self::Ratio21x9
        )
    }

    /// Whether the frame is taller than it is wide.
    pub fn is_portrait(self) -> bool {
        matches!(
            self.canonical(),
            Self::Vertical | Self::Ratio2x3 | Self::Ratio3x4 | Self::Ratio4x5
        )
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| CoreError::Validation(format!("Unknown aspect ratio '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Quality tier. Providers that price by tier read it; others ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    #[default]
    Standard,
    High,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "high" => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Unknown quality '{s}'. Must be one of: standard, high"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// Canonical description of a generation job.
///
/// Immutable once handed to an adapter: adapters borrow it and build their
/// own wire body, they never rewrite the caller's values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Selects the provider; resolved through
    /// [`ProviderKind::from_model_identifier`](crate::provider::ProviderKind::from_model_identifier).
    pub model_identifier: String,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    #[serde(default)]
    pub aspect_ratio: Option<AspectRatio>,
    /// Ordered reference images. Providers keep at most their cap.
    #[serde(default)]
    pub reference_image_urls: Vec<String>,
    #[serde(default)]
    pub character_image_url: Option<String>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub quality: Option<Quality>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    /// Generate an audio track (providers that support it).
    #[serde(default)]
    pub sound: Option<bool>,
    #[serde(default)]
    pub watermark: Option<String>,
    /// Images to generate per task (image providers that batch).
    #[serde(default)]
    pub count: Option<u32>,
    /// Shot list for multi-shot video. Non-empty switches a provider that
    /// supports it into multi-shot mode.
    #[serde(default)]
    pub multi_prompt: Vec<ShotPrompt>,
}

/// One shot of a multi-shot video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotPrompt {
    pub prompt: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
}

impl GenerationRequest {
    /// Minimal request: a model and a prompt, every option unset.
    pub fn new(model_identifier: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_identifier: model_identifier.into(),
            ..Self::default()
        }
    }

    /// True when the caller supplied any non-blank input image.
    pub fn has_images(&self) -> bool {
        self.character_image_url
            .iter()
            .chain(self.reference_image_urls.iter())
            .any(|url| !url.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
