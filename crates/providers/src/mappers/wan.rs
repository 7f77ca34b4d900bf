use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{AspectRatio, GenerationRequest, Resolution};

use super::ratio_label;
use crate::adapter::RequestMapper;

const IMAGE_TO_VIDEO: &str = "wan/2-5-image-to-video";
const TEXT_TO_VIDEO: &str = "wan/2-5-text-to-video";

/// Wan 2.5. Duration is only sent in image-to-video mode.
pub struct WanMapper;

impl RequestMapper for WanMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Wan25
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let resolution = params.resolution().unwrap_or(Resolution::P720);
        let mut input = json!({
            "prompt": request.prompt,
            "resolution": resolution.as_str(),
            "aspect_ratio": request
                .aspect_ratio
                .filter(|a| *a != AspectRatio::Auto)
                .map(ratio_label)
                .unwrap_or("auto"),
            "enable_prompt_expansion": true,
        });

        let model = match images.first() {
            Some(url) => {
                input["image_url"] = json!(url);
                input["duration"] = json!(params.duration_seconds().unwrap_or(5).to_string());
                IMAGE_TO_VIDEO
            }
            None => TEXT_TO_VIDEO,
        };

        if let Some(seed) = request.seed {
            input["seed"] = json!(seed);
        }

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
