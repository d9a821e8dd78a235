use super::toml_config::TomlConfig;
use super::AppConfig;
use crate::core::export::ExportFormat;
use crate::utils::validation::{validate_non_empty_string, Validate};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pokecard")]
#[command(about = "Build a creature trading card from PokeAPI data")]
pub struct CliConfig {
    /// Creature to look up
    #[arg(long)]
    pub name: String,

    /// First move identifier (e.g. thunder-punch)
    #[arg(long)]
    pub move1: Option<String>,

    /// Second move identifier
    #[arg(long)]
    pub move2: Option<String>,

    /// Hit points printed on the card (10 to 340)
    #[arg(long, required_unless_present = "list_moves")]
    pub hp: Option<u16>,

    #[arg(long)]
    pub move1_damage: Option<u16>,

    #[arg(long)]
    pub move2_damage: Option<u16>,

    /// Output directory, overrides the config file
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Also download the creature's cry next to the card
    #[arg(long)]
    pub save_cry: bool,

    /// Print the learnable moves and exit
    #[arg(long)]
    pub list_moves: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入設定檔，再套用命令列覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut config = AppConfig::from_toml(&file);
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)
    }
}
