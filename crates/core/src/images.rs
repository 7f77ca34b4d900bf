//! Input image selection.
//!
//! Providers accept a small, fixed number of images. Selection combines
//! the character image and the reference images in the provider's order
//! and keeps the first `max_images`; extra images are dropped silently.
//! Image providers read reference images only.

use crate::constraints::{ImageOrder, ImageRule};
use crate::types::GenerationRequest;

/// Images to send, in order, already truncated to the provider's cap.
pub fn select_images(request: &GenerationRequest, rule: &ImageRule) -> Vec<String> {
    let character = request
        .character_image_url
        .iter()
        .filter(|url| !url.trim().is_empty());
    let references = request
        .reference_image_urls
        .iter()
        .filter(|url| !url.trim().is_empty());

    let ordered: Vec<&String> = match rule.order {
        ImageOrder::CharacterFirst => character.chain(references).collect(),
        ImageOrder::ReferencesFirst => references.chain(character).collect(),
        ImageOrder::ReferencesOnly => references.collect(),
    };

    let mut selected: Vec<String> = Vec::with_capacity(rule.max_images);
    for url in ordered {
        if selected.len() == rule.max_images {
            break;
        }
        // The character image is often also listed as a reference.
        if !selected.iter().any(|s| s == url) {
            selected.push(url.clone());
        }
    }
    selected
}
