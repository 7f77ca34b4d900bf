//! Closed mapping from [`ProviderKind`] to its adapter.
//!
//! One adapter instance per variant, built once at startup. Lookup is an
//! exhaustive `match`, so adding a variant without an adapter does not
//! compile.

use ocgen_core::error::CoreError;
use ocgen_core::provider::ProviderKind;

use crate::adapter::{GenerationProvider, KieAdapter};
use crate::client::KieClient;
use crate::config::{ConfigError, ProviderConfig};
use crate::mappers::{
    Flux2FlexMapper, GptImageMapper, HailuoMapper, KlingV25Mapper, KlingV30Mapper,
    NanoBananaMapper, NanoBananaProMapper, Seedream45Mapper, SeedreamV4Mapper, SoraMapper,
    VeoFastMapper, WanMapper, ZImageMapper,
};

/// Anything that can hand out the adapter for a provider.
pub trait ProviderLookup: Send + Sync {
    fn adapter(&self, kind: ProviderKind) -> &dyn GenerationProvider;

    /// Resolve a caller-supplied model identifier to its adapter.
    fn resolve(&self, model_identifier: &str) -> Result<&dyn GenerationProvider, CoreError> {
        let kind = ProviderKind::from_model_identifier(model_identifier)?;
        Ok(self.adapter(kind))
    }
}

pub struct ProviderRegistry {
    kling_v25: KieAdapter<KlingV25Mapper>,
    kling_v30: KieAdapter<KlingV30Mapper>,
    wan_25: KieAdapter<WanMapper>,
    sora_2: KieAdapter<SoraMapper>,
    sora_2_pro: KieAdapter<SoraMapper>,
    veo_31_fast: KieAdapter<VeoFastMapper>,
    hailuo_standard: KieAdapter<HailuoMapper>,
    hailuo_pro: KieAdapter<HailuoMapper>,
    nano_banana: KieAdapter<NanoBananaMapper>,
    nano_banana_edit: KieAdapter<NanoBananaMapper>,
    nano_banana_pro: KieAdapter<NanoBananaProMapper>,
    seedream_v4: KieAdapter<SeedreamV4Mapper>,
    seedream_45: KieAdapter<Seedream45Mapper>,
    flux_2_flex: KieAdapter<Flux2FlexMapper>,
    z_image: KieAdapter<ZImageMapper>,
    gpt_image: KieAdapter<GptImageMapper>,
}

impl ProviderRegistry {
    /// Build every adapter on one shared client.
    pub fn new(client: KieClient) -> Self {
        Self {
            kling_v25: KieAdapter::new(client.clone(), KlingV25Mapper),
            kling_v30: KieAdapter::new(client.clone(), KlingV30Mapper),
            wan_25: KieAdapter::new(client.clone(), WanMapper),
            sora_2: KieAdapter::new(client.clone(), SoraMapper::standard()),
            sora_2_pro: KieAdapter::new(client.clone(), SoraMapper::pro()),
            veo_31_fast: KieAdapter::new(client.clone(), VeoFastMapper),
            hailuo_standard: KieAdapter::new(client.clone(), HailuoMapper::standard()),
            hailuo_pro: KieAdapter::new(client.clone(), HailuoMapper::pro()),
            nano_banana: KieAdapter::new(client.clone(), NanoBananaMapper::standard()),
            nano_banana_edit: KieAdapter::new(client.clone(), NanoBananaMapper::edit()),
            nano_banana_pro: KieAdapter::new(client.clone(), NanoBananaProMapper),
            seedream_v4: KieAdapter::new(client.clone(), SeedreamV4Mapper),
            seedream_45: KieAdapter::new(client.clone(), Seedream45Mapper),
            flux_2_flex: KieAdapter::new(client.clone(), Flux2FlexMapper),
            z_image: KieAdapter::new(client.clone(), ZImageMapper),
            gpt_image: KieAdapter::new(client, GptImageMapper),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(KieClient::new(config)?))
    }
}

impl ProviderLookup for ProviderRegistry {
    fn adapter(&self, kind: ProviderKind) -> &dyn GenerationProvider {
        match kind {
            ProviderKind::KlingV25 => &self.kling_v25,
            ProviderKind::KlingV30 => &self.kling_v30,
            ProviderKind::Wan25 => &self.wan_25,
            ProviderKind::Sora2 => &self.sora_2,
            ProviderKind::Sora2Pro => &self.sora_2_pro,
            ProviderKind::Veo31Fast => &self.veo_31_fast,
            ProviderKind::HailuoStandard => &self.hailuo_standard,
            ProviderKind::HailuoPro => &self.hailuo_pro,
            ProviderKind::NanoBanana => &self.nano_banana,
            ProviderKind::NanoBananaEdit => &self.nano_banana_edit,
            ProviderKind::NanoBananaPro => &self.nano_banana_pro,
            ProviderKind::SeedreamV4 => &self.seedream_v4,
            ProviderKind::Seedream45 => &self.seedream_45,
            ProviderKind::Flux2Flex => &self.flux_2_flex,
            ProviderKind::ZImage => &self.z_image,
            ProviderKind::GptImage => &self.gpt_image,
        }
    }
}
