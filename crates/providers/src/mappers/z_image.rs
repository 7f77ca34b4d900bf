use serde_json::json;

use ocgen_core::constraints::ValidatedParams;
use ocgen_core::provider::ProviderKind;
use ocgen_core::types::{AspectRatio, GenerationRequest};

use crate::adapter::RequestMapper;

/// Z-Image, text-to-image only.
pub struct ZImageMapper;

fn aspect_label(aspect: Option<AspectRatio>) -> &'static str {
    match aspect.map(AspectRatio::canonical) {
        Some(
            a @ (AspectRatio::Square
            | AspectRatio::Ratio4x3
            | AspectRatio::Ratio3x4
            | AspectRatio::Widescreen
            | AspectRatio::Vertical),
        ) => a.as_str(),
        _ => "1:1",
    }
}

impl RequestMapper for ZImageMapper {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ZImage
    }

    fn build_body(
        &self,
        request: &GenerationRequest,
        _params: &ValidatedParams,
        _images: &[String],
        callback_target: &str,
    ) -> serde_json::Value {
        json!({
            "model": ProviderKind::ZImage.model_id(),
            "callBackUrl": callback_target,
            "input": {
                "prompt": request.prompt,
                "aspect_ratio": aspect_label(request.aspect_ratio),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapter::map_request;
    use crate::mappers::test_support::{reference_request, text_request, CALLBACK};

    #[test]
    fn text_body() {
        let mut req = text_request("z-image");
        req.aspect_ratio = Some(AspectRatio::Landscape);
        let body = map_request(&ZImageMapper, &req, CALLBACK).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "z-image",
                "callBackUrl": CALLBACK,
                "input": {
                    "prompt": "a fox running through snow",
                    "aspect_ratio": "16:9",
                },
            })
        );
    }

    #[test]
    fn unlisted_ratio_falls_back_to_square() {
        assert_eq!(aspect_label(Some(AspectRatio::Ratio21x9)), "1:1");
        assert_eq!(aspect_label(None), "1:1");
    }

    #[test]
    fn references_rejected() {
        let err = map_request(&ZImageMapper, &reference_request("z-image", 1), CALLBACK).unwrap_err();
        assert_eq!(err.field, "reference_image_urls");
    }
}
