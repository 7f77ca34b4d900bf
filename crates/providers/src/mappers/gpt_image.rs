use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{AspectRatio, GenerationRequest};

use crate::adapter::RequestMapper;
use crate::client::TaskApi;

/// GPT Image 1 on its dedicated API. Flat body, three sizes.
pub struct GptImageMapper;

fn size_label(aspect: Option<AspectRatio>) -> &'static str {
    match aspect.map(AspectRatio::canonical) {
        Some(AspectRatio::Ratio2x3 | AspectRatio::Ratio3x4 | AspectRatio::Vertical) => "2:3",
        Some(AspectRatio::Ratio3x2 | AspectRatio::Ratio4x3 | AspectRatio::Widescreen) => "3:2",
        _ => "1:1",
    }
}

impl RequestMapper for GptImageMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GptImage
    }

    fn api(&self) -> TaskApi {
        TaskApi::GptImage
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let mut body = json!({
            "prompt": request.prompt,
            "size": size_label(request.aspect_ratio),
            "callBackUrl": callback_target,
            "isEnhance": false,
            "uploadCn": false,
            "nVariants": params.variants(),
            "enableFallback": false,
        });
        if !images.is_empty() {
            body["filesUrl"] = json!(images);
        }
        body
    }
}
