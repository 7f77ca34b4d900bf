use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{GenerationRequest, Quality};

use super::ratio_label;
use crate::adapter::RequestMapper;

/// Kling 3.0: one model name, `mode` selects the std/pro tier. A shot list
/// replaces the prompt in multi-shot mode.
pub struct KlingV30Mapper;

impl RequestMapper for KlingV30Mapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::KlingV30
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        let mode = match params.tier() {
            Some(Quality::High) => "pro",
            _ => "std",
        };

        let mut input = json!({
            "duration": params.duration_seconds().unwrap_or(5),
            "aspect_ratio": request.aspect_ratio.map(ratio_label).unwrap_or("1:1"),
            "mode": mode,
            "multi_shots": params.multi_shot(),
            "sound": params.sound(),
        });
        if params.multi_shot() {
            input["multi_prompt"] = json!(request.multi_prompt);
        } else {
            input["prompt"] = json!(request.prompt);
        }
        if !images.is_empty() {
            input["image_urls"] = json!(images);
        }

        json!({
            "model": ProviderKind::KlingV30.model_id(),
            "callBackUrl": callback_target,
            "input": input,
        })
    }
}
