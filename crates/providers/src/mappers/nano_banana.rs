use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{GenerationRequest, Resolution};

use crate::adapter::RequestMapper;

const TEXT_TO_IMAGE: &str = "google/nano-banana";
const EDIT: &str = "google/nano-banana-edit";

/// Nano Banana and Nano Banana Edit. A request with reference images is
/// always sent to the edit model.
pub struct NanoBananaMapper {
    edit: bool,
}

impl NanoBananaMapper {
    pub fn standard() -> Self {
        Self { edit: false }
    }

    pub fn edit() -> Self {
        Self { edit: true }
    }
}

impl RequestMapper for NanoBananaMapper {
    fn kind(&self) -> ProviderKind {
        if self.edit {
            ProviderKind::NanoBananaEdit
        } else {
            ProviderKind::NanoBanana
        }
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        _params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let mut input = json!({
            "prompt": request.prompt,
            "output_format": "png",
            "image_size": request.aspect_ratio.map(|a| a.canonical().as_str()).unwrap_or("auto"),
        });
        let model = if images.is_empty() && !self.edit {
            TEXT_TO_IMAGE
        } else {
            input["image_urls"] = json!(images);
            EDIT
        };

        json!({
            "model": model,
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}

/// Nano Banana Pro: one model for text and image input, with an explicit
/// output resolution.
pub struct NanoBananaProMapper;

impl RequestMapper for NanoBananaProMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NanoBananaPro
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        // Uppercase on the wire: "1K", "2K", "4K".
        let resolution = params
            .resolution()
            .unwrap_or(Resolution::K2)
            .as_str()
            .to_ascii_uppercase();

        let mut input = json!({
            "prompt": request.prompt,
            "output_format": "png",
            "aspect_ratio": request.aspect_ratio.map(|a| a.canonical().as_str()).unwrap_or("1:1"),
            "resolution": resolution,
        });
        if !images.is_empty() {
            input["image_input"] = json!(images);
        }

        json!({
            "model": ProviderKind::NanoBananaPro.model_id(),
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
