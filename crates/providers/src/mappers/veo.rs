use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{AspectRatio, GenerationRequest};

use crate::adapter::RequestMapper;

/// Veo 3.1 Fast. Uses a flat body instead of the `input` wrapper.
pub struct VeoFastMapper;

fn aspect_label(aspect: Option<AspectRatio>) -> &'static str {
    match aspect {
        Some(AspectRatio::Square | AspectRatio::Auto) => "Auto",
        Some(a) if a.is_portrait() => "9:16",
        _ => "16:9",
    }
}

impl RequestMapper for VeoFastMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Veo31Fast
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        _params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let generation_type = if images.is_empty() {
            "TEXT_2_VIDEO"
        } else {
            "FIRST_AND_LAST_FRAMES_2_VIDEO"
        };

        let mut body = json!({
            "model": ProviderKind::Veo31Fast.model_id(),
            "prompt": request.prompt,
            "generationType": generation_type,
            "callBackUrl": callback_target,
            "aspectRatio": aspect_label(request.aspect_ratio),
        });
        if !images.is_empty() {
            body["imageUrls"] = json!(images);
        }
        if let Some(watermark) = request.watermark.as_deref().filter(|w| !w.is_empty()) {
            body["watermark"] = json!(watermark);
        }
        body
    }
}
