use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::GenerationRequest;

use crate::adapter::RequestMapper;

const IMAGE_TO_VIDEO: &str = "kling/v2-5-turbo-image-to-video-pro";
const TEXT_TO_VIDEO: &str = "kling/v2-5-turbo-text-to-video-pro";

/// Kling 2.5 Turbo. The model name switches on whether an image is sent.
pub struct KlingV25Mapper;

impl RequestMapper for KlingV25Mapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::KlingV25
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let duration = params.duration_seconds().unwrap_or(5);
        let mut input = json!({
            "prompt": request.prompt,
            "duration": duration.to_string(),
            "negative_prompt": request.negative_prompt.as_deref().unwrap_or(""),
            "cfg_scale": 0.5,
        });

        let model = match images.first() {
            Some(url) => {
                input["image_url"] = json!(url);
                IMAGE_TO_VIDEO
            }
            None => TEXT_TO_VIDEO,
        };

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
