use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{AspectRatio, GenerationRequest, Quality, Resolution};

use crate::adapter::RequestMapper;

/// Seedream 4.0. Batches up to six images per task.
pub struct SeedreamV4Mapper;

fn v4_image_size(aspect: Option<AspectRatio>) -> &'static str {
    match aspect {
        Some(AspectRatio::Ratio2x3) => "portrait_2_3",
        Some(AspectRatio::Ratio3x2) => "landscape_3_2",
        Some(AspectRatio::Ratio3x4) => "portrait_3_4",
        Some(AspectRatio::Ratio4x3) => "landscape_4_3",
        Some(AspectRatio::Ratio4x5) => "portrait_4_5",
        Some(AspectRatio::Ratio5x4) => "landscape_5_4",
        Some(AspectRatio::Vertical | AspectRatio::Portrait) => "portrait_9_16",
        Some(AspectRatio::Widescreen | AspectRatio::Landscape) => "landscape_16_9",
        Some(AspectRatio::Ratio21x9) => "landscape_21_9",
        Some(AspectRatio::Square | AspectRatio::Auto) | None => "square",
    }
}

impl RequestMapper for SeedreamV4Mapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::SeedreamV4
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let resolution = params
            .resolution()
            .unwrap_or(Resolution::K2)
            .as_str()
            .to_ascii_uppercase();

        let mut input = json!({
            "prompt": request.prompt,
            "output_format": "png",
            "image_size": v4_image_size(request.aspect_ratio),
            "image_resolution": resolution,
            "max_images": params.variants(),
        });
        let model = if images.is_empty() {
            "bytedance/seedream-v4-text-to-image"
        } else {
            input["image_urls"] = json!(images);
            "bytedance/seedream-v4-edit"
        };

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}

/// Seedream 4.5. Quality selects basic (2K) or high (4K) output.
pub struct Seedream45Mapper;

fn v45_aspect(aspect: Option<AspectRatio>) -> &'static str {
    match aspect.map(AspectRatio::canonical) {
        Some(
            a @ (AspectRatio::Square
            | AspectRatio::Ratio4x3
            | AspectRatio::Ratio3x4
            | AspectRatio::Widescreen
            | AspectRatio::Vertical
            | AspectRatio::Ratio2x3
            | AspectRatio::Ratio3x2
            | AspectRatio::Ratio21x9),
        ) => a.as_str(),
        Some(AspectRatio::Ratio4x5) => "3:4",
        Some(AspectRatio::Ratio5x4) => "4:3",
        _ => "1:1",
    }
}

impl RequestMapper for Seedream45Mapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Seedream45
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let quality = match params.tier() {
            Some(Quality::High) => "high",
            _ => "basic",
        };

        let mut input = json!({
            "prompt": request.prompt,
            "aspect_ratio": v45_aspect(request.aspect_ratio),
            "quality": quality,
        });
        let model = if images.is_empty() {
            "seedream/4.5-text-to-image"
        } else {
            input["image_urls"] = json!(images);
            "seedream/4.5-edit"
        };

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
