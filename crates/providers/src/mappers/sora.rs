use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::GenerationRequest;

use crate::adapter::RequestMapper;

/// Sora 2 and Sora 2 Pro. Pro additionally sends the quality tier as `size`.
pub struct SoraMapper {
    pro: bool,
}

impl SoraMapper {
    pub fn standard() -> Self {
        Self { pro: false }
    }

    pub fn pro() -> Self {
        Self { pro: true }
    }
}

impl RequestMapper for SoraMapper {
    fn kind(&self) -> ProviderKind {
        if self.pro {
            ProviderKind::Sora2Pro
        } else {
            ProviderKind::Sora2
        }
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let base = self.kind().model_id();
        let mode = if images.is_empty() {
            "text-to-video"
        } else {
            "image-to-video"
        };
        let orientation = match request.aspect_ratio {
            Some(aspect) if aspect.is_landscape() => "landscape",
            _ => "portrait",
        };

        let mut input = json!({
            "prompt": request.prompt,
            "n_frames": params.duration_seconds().unwrap_or(10).to_string(),
            "aspect_ratio": orientation,
            "removeWatermark": true,
        });
        if self.pro {
            input["size"] = json!(params.tier().unwrap_or_default().as_str());
        }
        if !images.is_empty() {
            input["image_urls"] = json!(images);
        }

        json!({
            "model": format!("{base}-{mode}"),
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
