//! Wire-body mappers, one per provider family.

mod flux;
mod gpt_image;
mod hailuo;
mod kling;
mod kling_v3;
mod nano_banana;
mod seedream;
mod sora;
mod veo;
mod wan;
mod z_image;

pub use flux::Flux2FlexMapper;
pub use gpt_image::GptImageMapper;
pub use hailuo::HailuoMapper;
pub use kling::KlingV25Mapper;
pub use kling_v3::KlingV30Mapper;
pub use nano_banana::{NanoBananaMapper, NanoBananaProMapper};
pub use seedream::{Seedream45Mapper, SeedreamV4Mapper};
pub use sora::SoraMapper;
pub use veo::VeoFastMapper;
pub use wan::WanMapper;
pub use z_image::ZImageMapper;

use ocgen_core::types::AspectRatio;

/// Ratio string for providers that accept `1:1`, `9:16` and `16:9`.
/// Every other ratio maps by orientation.
fn ratio_label(aspect: AspectRatio) -> &'static str {
    if aspect.is_portrait() {
        "9:16"
    } else if aspect.is_landscape() {
        "16:9"
    } else {
        "1:1"
    }
}
