use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{GenerationRequest, Resolution};

use crate::adapter::RequestMapper;

/// Hailuo 2.3 image-to-video, standard or pro. The two variants share
/// constraints and differ in model name and price.
pub struct HailuoMapper {
    kind: ProviderKind,
}

impl HailuoMapper {
    pub fn standard() -> Self {
        Self {
            kind: ProviderKind::HailuoStandard,
        }
    }

    pub fn pro() -> Self {
        Self {
            kind: ProviderKind::HailuoPro,
        }
    }
}

impl RequestMapper for HailuoMapper {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        // Uppercase suffix on the wire: "768P", "1080P".
        let resolution = params
            .resolution()
            .unwrap_or(Resolution::P768)
            .as_str()
            .to_ascii_uppercase();

        json!({
            "model": self.kind.model_id(),
            "callBackUrl": callback_target,
            "input": {
                "prompt": request.prompt,
                "image_url": images.first(),
                "duration": params.duration_seconds().unwrap_or(6).to_string(),
                "resolution": resolution,
            },
        })
    }
}
