use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;
use serde_json::Value;

use routedoc_core::config::{self, CONFIG_FILE_NAME, DocumentOptions};
use routedoc_core::manifest::RouteManifest;
use routedoc_core::schema::{self, SchemaId, ValidationReport};
use routedoc_core::{SwaggerDocument, SwaggerSession};

#[derive(Parser)]
#[command(
    name = "routedoc",
    about = "Compile route metadata into a Swagger 2.0 document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a route manifest into a Swagger 2.0 document
    Compile {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the config file (defaults to ./routedoc.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Fail when the compiled document is not valid Swagger 2.0
        #[arg(long)]
        strict: bool,
    },

    /// Validate an existing Swagger 2.0 document
    Validate {
        /// Path to the document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new routedoc configuration
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
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            config,
            output,
            format,
            strict,
        } => cmd_compile(&input, config.as_deref(), output.as_deref(), format, strict),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "routedoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config named on the command line, or `routedoc.yaml` if present.
fn load_options(path: Option<&Path>) -> Result<DocumentOptions> {
    match path {
        Some(path) => config::load_config(path)
            .map_err(|e| anyhow::anyhow!(e))?
            .with_context(|| format!("config file {} not found", path.display())),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE_NAME);
            let loaded = config::load_config(&default_path).map_err(|e| anyhow::anyhow!(e))?;
            if loaded.is_none() {
                debug!("no {CONFIG_FILE_NAME} found, using default options");
            }
            Ok(loaded.unwrap_or_default())
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

fn load_manifest(path: &Path) -> Result<RouteManifest> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let manifest = if is_json(path) {
        RouteManifest::from_json(&content)?
    } else {
        RouteManifest::from_yaml(&content)?
    };
    Ok(manifest)
}

fn load_document(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml_ng::from_str(&content)?
    };
    Ok(value)
}

fn render(document: &SwaggerDocument, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)? + "\n",
        OutputFormat::Yaml => serde_yaml_ng::to_string(document)?,
    };
    Ok(rendered)
}

fn print_report(report: &ValidationReport) {
    if report.valid {
        eprintln!("Document is valid Swagger 2.0.");
        return;
    }
    eprintln!("Document is not valid Swagger 2.0:");
    for error in &report.errors {
        eprintln!("  - {error}");
    }
}

fn cmd_compile(
    input: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    let options = load_options(config)?;
    let manifest = load_manifest(input)?;

    let mut session = SwaggerSession::new();
    let router = manifest
        .apply(&mut session)
        .with_context(|| format!("failed to load routes from {}", input.display()))?;
    session.initialise(router, options)?;
    let document = session.compile()?.clone();
    eprintln!(
        "Compiled {} path(s), {} definition(s)",
        document.paths.len(),
        document.definitions.len()
    );

    let report = session.validate()?;
    if !report.valid {
        print_report(&report);
        if strict {
            anyhow::bail!(
                "compiled document is not valid: {}",
                report.message.unwrap_or_default()
            );
        }
    }

    let rendered = render(&document, format)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let document = load_document(input)?;
    let report = schema::validate(SchemaId::Swagger, &document)?;
    print_report(&report);
    if !report.valid {
        anyhow::bail!(
            "{} is not valid: {}",
            input.display(),
            report.message.unwrap_or_default()
        );
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
common:
  models:
    - name: Pet
      type: object
routes:
  - method: get
    path: /pets/:id
    metadata:
      responses:
        "200":
          model: Pet
"#;

    #[test]
    fn test_compile_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("routes.yaml");
        let config = dir.path().join(CONFIG_FILE_NAME);
        let output = dir.path().join("out").join("swagger.json");
        fs::write(&input, MANIFEST).unwrap();
        fs::write(&config, "title: Pets\nversion: 1.0.0\n").unwrap();

        cmd_compile(&input, Some(&config), Some(&output), OutputFormat::Json, true).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["info"]["title"], "Pets");
        assert_eq!(
            written["paths"]["/pets/{id}"]["get"]["responses"]["200"]["schema"]["$ref"],
            "#/definitions/Pet"
        );
        cmd_validate(&output).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_options(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
    }

    #[test]
    fn test_validate_rejects_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "swagger: '2.0'\ninfo:\n  title: x\n").unwrap();
        assert!(cmd_validate(&path).is_err());
    }

    #[test]
    fn test_render_yaml() {
        let mut document = SwaggerDocument::default();
        document.info.title = "Pets".into();
        let yaml = render(&document, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("swagger: '2.0'") || yaml.contains("swagger: \"2.0\""), "{yaml}");
        assert!(yaml.contains("title: Pets"), "{yaml}");
    }
}
