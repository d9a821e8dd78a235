use anyhow::Context;
use clap::Parser;
use pokecard::domain::ports::ConfigProvider;
use pokecard::utils::error::ErrorSeverity;
use pokecard::utils::{logger, validation::Validate};
use pokecard::{
    CardEngine, CardRequest, CliConfig, LocalStorage, PngRasterizer, PokeApiClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先解析設定，日誌等級可能來自設定檔
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if cli.json_logs {
        logger::init_json_logger(config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting pokecard");
    tracing::debug!("Resolved config: {:?}", config);

    let client = PokeApiClient::from_config(&config).context("failed to build HTTP client")?;
    let output_path = config.output_path().to_string();
    let storage = LocalStorage::new(output_path.clone());
    let rasterizer = PngRasterizer::new(config.width, config.height);
    let engine = CardEngine::new(client, storage, rasterizer);

    if cli.list_moves {
        let moves = engine
            .list_moves(&cli.name)
            .await
            .with_context(|| format!("failed to list moves for '{}'", cli.name))?;
        for (identifier, display_name) in moves {
            println!("{:<24} {}", identifier, display_name);
        }
        return Ok(());
    }

    // clap 只在 --list-moves 時允許省略 --hp
    let hit_points = cli.hp.context("--hp is required")?;
    let request = CardRequest {
        name: cli.name.clone(),
        move1: cli.move1.clone(),
        move2: cli.move2.clone(),
        hit_points,
        move1_damage: cli.move1_damage,
        move2_damage: cli.move2_damage,
        format: config.format,
        save_cry: cli.save_cry,
    };

    match engine.run(&request).await {
        Ok(outcome) => {
            tracing::info!("✅ Card for {} created", outcome.card.subject_name);
            println!("✅ Card saved to: {}/{}", output_path, outcome.card_file);
            if let Some(cry) = outcome.cry_file {
                println!("🔊 Cry saved to: {}/{}", output_path, cry);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Card generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
