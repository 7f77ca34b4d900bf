use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{GenerationRequest, Resolution};

use crate::adapter::RequestMapper;

/// Flux 2 Flex. Reference images go under `input_urls`.
pub struct Flux2FlexMapper;

impl RequestMapper for Flux2FlexMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Flux2Flex
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
            .unwrap_or(Resolution::K1)
            .as_str()
            .to_ascii_uppercase();

        let mut input = json!({
            "prompt": request.prompt,
            "aspect_ratio": request.aspect_ratio.map(|a| a.canonical().as_str()).unwrap_or("1:1"),
            "resolution": resolution,
        });
        let model = if images.is_empty() {
            "flux-2/flex-text-to-image"
        } else {
            input["input_urls"] = json!(images);
            "flux-2/flex-image-to-image"
        };

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
