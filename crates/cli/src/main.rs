use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocgen_core::pricing;
use ocgen_core::provider::ProviderKind;
use ocgen_core::task::ProviderJobHandle;
use ocgen_core::types::{AspectRatio, GenerationRequest, Quality, Resolution, ShotPrompt};
use ocgen_providers::config::ProviderConfig;
use ocgen_providers::{ProviderLookup, ProviderRegistry};

/// Operator tool for the video and image generation providers.
#[derive(Debug, Parser)]
#[command(name = "ocgen", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List supported models, their media kind and accepted aliases.
    Models,
    /// Print the credit cost of a request without submitting it.
    Quote(RequestArgs),
    /// Submit a request and print the provider task id.
    Submit {
        #[command(flatten)]
        request: RequestArgs,
        /// Webhook URL the provider calls on completion.
        #[arg(long)]
        callback: String,
        /// Print the wire body instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Query a provider task once and print the outcome as JSON.
    Poll {
        #[arg(long)]
        model: String,
        task_id: String,
    },
}

#[derive(Debug, Args)]
struct RequestArgs {
    #[arg(long)]
    model: String,
    #[arg(long)]
    duration: Option<u32>,
    #[arg(long)]
    resolution: Option<Resolution>,
    #[arg(long)]
    quality: Option<Quality>,
    #[arg(long)]
    aspect_ratio: Option<AspectRatio>,
    /// Reference image URL; repeat for several.
    #[arg(long = "image")]
    images: Vec<String>,
    #[arg(long)]
    character_image: Option<String>,
    #[arg(long)]
    negative_prompt: Option<String>,
    #[arg(long)]
    seed: Option<i64>,
    #[arg(long)]
    sound: bool,
    #[arg(long)]
    watermark: Option<String>,
    /// Images per task, for image models that batch.
    #[arg(long)]
    count: Option<u32>,
    /// One shot of a multi-shot video as `SECONDS=PROMPT`; repeat in order.
    #[arg(long = "shot", value_parser = parse_shot)]
    shots: Vec<ShotPrompt>,
    prompt: Option<String>,
}

fn parse_shot(value: &str) -> Result<ShotPrompt, String> {
    let (seconds, prompt) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SECONDS=PROMPT, got '{value}'"))?;
    let duration_seconds = seconds
        .trim()
        .parse()
        .map_err(|_| format!("invalid shot duration '{seconds}'"))?;
    Ok(ShotPrompt {
        prompt: prompt.to_string(),
        duration_seconds,
    })
}

impl RequestArgs {
    fn into_request(self, fallback_prompt: Option<&str>) -> anyhow::Result<GenerationRequest> {
        let prompt = match (self.prompt, fallback_prompt) {
            (Some(p), _) => p,
            (None, Some(f)) => f.to_string(),
            (None, None) if !self.shots.is_empty() => String::new(),
            (None, None) => bail!("a prompt is required"),
        };
        Ok(GenerationRequest {
            prompt,
            model_identifier: self.model,
            duration_seconds: self.duration,
            resolution: self.resolution,
            aspect_ratio: self.aspect_ratio,
            reference_image_urls: self.images,
            character_image_url: self.character_image,
            seed: self.seed,
            quality: self.quality,
            negative_prompt: self.negative_prompt,
            sound: self.sound.then_some(true),
            watermark: self.watermark,
            count: self.count,
            multi_prompt: self.shots,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocgen=info,ocgen_providers=info,ocgen_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Models => {
            for kind in ProviderKind::ALL {
                println!(
                    "{:<36} {:<6} {:<20} {}",
                    kind.model_id(),
                    kind.media().as_str(),
                    kind.display_name(),
                    kind.aliases().join(", ")
                );
            }
        }
        Command::Quote(args) => {
            let request = args.into_request(Some("quote"))?;
            let kind = ProviderKind::from_model_identifier(&request.model_identifier)?;
            let cost = pricing::calculate_cost(kind, &request)?;
            println!("{}: {} credits", kind.display_name(), cost.amount);
        }
        Command::Submit {
            request,
            callback,
            dry_run,
        } => {
            let request = request.into_request(None)?;
            let registry = registry()?;
            let adapter = registry.resolve(&request.model_identifier)?;
            if dry_run {
                let body = adapter.build_request(&request, &callback)?;
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }
            let cost = adapter.calculate_cost(&request)?;
            let handle = adapter.submit(&request, &callback).await?;
            tracing::info!(provider = %adapter.kind(), cost = cost.amount, "Submitted");
            println!("{handle}");
        }
        Command::Poll { model, task_id } => {
            let registry = registry()?;
            let adapter = registry.resolve(&model)?;
            let handle = ProviderJobHandle::new(task_id)?;
            let outcome = adapter.poll(&handle).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn registry() -> anyhow::Result<ProviderRegistry> {
    let config = ProviderConfig::from_env().context("Failed to load provider configuration")?;
    tracing::debug!(base_url = %config.base_url, "Loaded provider configuration");
    Ok(ProviderRegistry::from_config(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_flag_parses() {
        let shot = parse_shot("4=she opens the door").unwrap();
        assert_eq!(shot.duration_seconds, 4);
        assert_eq!(shot.prompt, "she opens the door");
        assert!(parse_shot("she opens the door").is_err());
        assert!(parse_shot("four=door").is_err());
    }

    #[test]
    fn shots_stand_in_for_prompt() {
        let cli = Cli::parse_from([
            "ocgen", "quote", "--model", "kling-v3.0", "--shot", "4=a", "--shot", "6=b",
        ]);
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        let request = args.into_request(None).unwrap();
        assert!(request.prompt.is_empty());
        assert_eq!(request.multi_prompt.len(), 2);
    }
}
