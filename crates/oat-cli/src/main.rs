use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oat_core::config::{self, CONFIG_FILE_NAME, OatConfig, OutputFormat, VisitOptions};
use oat_core::ir::ApiSpecification;
use oat_core::parse;
use oat_core::visit;

#[derive(Parser)]
#[command(
    name = "oat",
    about = "Turn OpenAPI 3.0 documents into tool descriptors",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OpenAPI spec into a tool list
    Convert {
        /// Path to the OpenAPI spec file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the tool list here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,

        /// Copy `description` onto primitive schemas
        #[arg(long)]
        extract_description: bool,

        /// Copy `default` onto primitive schemas
        #[arg(long)]
        extract_default: bool,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new oat configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            extract_description,
            extract_default,
        } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if let Some(input) = input {
                cfg.input = input.display().to_string();
            }
            if let Some(output) = output {
                cfg.output = Some(output.display().to_string());
            }
            if let Some(format) = format {
                cfg.format = format.into();
            }
            cfg.extraction.extract_description |= extract_description;
            cfg.extraction.extract_default |= extract_default;
            cmd_convert(&cfg)
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oat", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OatConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_api(path: &Path, options: VisitOptions) -> Result<ApiSpecification> {
    let spec = parse::from_path(path).with_context(|| format!("failed to load {}", path.display()))?;
    let api = visit::visit_with_options(&spec, options)
        .with_context(|| format!("failed to convert {}", path.display()))?;
    Ok(api)
}

fn render(api: &ApiSpecification, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(api)? + "\n",
        OutputFormat::Yaml => serde_yaml_ng::to_string(api)?,
    };
    Ok(rendered)
}

fn cmd_convert(cfg: &OatConfig) -> Result<()> {
    let input = PathBuf::from(&cfg.input);
    let api = load_api(&input, cfg.extraction)?;
    let rendered = render(&api, cfg.format)?;

    match &cfg.output {
        Some(output) => {
            let path = PathBuf::from(output);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} tools to {}", api.tools.len(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let spec =
        parse::from_path(input).with_context(|| format!("failed to load {}", input.display()))?;

    match &spec.info {
        Some(info) => eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, info.title),
        None => eprintln!("Valid OpenAPI {} spec", spec.openapi),
    }
    if let Some(info) = &spec.info {
        eprintln!("  Version: {}", info.version);
    }
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Component groups: {}", spec.components.len());

    // Also validate that every operation converts
    let api = visit::visit(&spec)?;
    eprintln!("  Tools: {}", api.tools.len());
    if let Some(url) = &api.service_url {
        eprintln!("  Service URL: {url}");
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
