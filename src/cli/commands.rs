use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Catalog, MemoryStore};
use crate::config::{GeneratorConfig, DEFAULT_CONFIG_FILE};
use crate::orchestrator::{Generator, OutputWriter};

/// Command-line interface for metagen
///
/// Every command loads a catalog bundle (YAML or JSON) into memory and
/// generates from it.
#[derive(Parser, Debug)]
#[command(name = "metagen")]
#[command(about = "Metadata-driven code generator", long_about = None)]
pub struct Cli {
    /// Catalog bundle to load (overrides `bundle` in the config file)
    #[arg(short, long, global = true, env = "METAGEN_BUNDLE")]
    pub bundle: Option<PathBuf>,

    /// Generator config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output root for written files (overrides `output_dir`)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one template against one Metadata and print the result
    GenCode {
        /// Template ID
        #[arg(short, long)]
        template: String,

        /// Metadata ID
        #[arg(short, long)]
        metadata: String,
    },

    /// Generate every enabled file of a service
    GenService {
        /// Service ID
        #[arg(short, long)]
        service: String,

        /// Write files under the output root instead of only reporting them
        #[arg(short, long, default_value_t = false)]
        write: bool,
    },

    /// Run one file template chain and print the result
    GenFileTemplate {
        /// File template ID
        #[arg(short, long)]
        file_template: String,

        /// Metadata ID
        #[arg(short, long)]
        metadata: String,

        /// Also print the concatenated template sources
        #[arg(long, default_value_t = false)]
        show_template: bool,
    },

    /// Generate every file of a functional template for one Metadata
    GenFunctionalTemplate {
        /// Functional template ID
        #[arg(short, long)]
        functional_template: String,

        /// Metadata ID
        #[arg(short, long)]
        metadata: String,

        /// Write files under `{output}/{default package}` instead of printing them
        #[arg(short, long, default_value_t = false)]
        write: bool,
    },

    /// Summarize the catalog, or show the derived fields of one Metadata
    Inspect {
        /// Metadata ID to show in detail
        #[arg(short, long)]
        metadata: Option<String>,
    },
}

/// Parse the process arguments and run the selected command against stdout.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run `cli`, writing human-readable output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::resolve(&cli.config)?;
    if let Some(bundle) = &cli.bundle {
        config.bundle = Some(bundle.clone());
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    let catalog = open_catalog(&config)?;
    let generator = Generator::from_config(Arc::clone(&catalog), &config);

    match &cli.command {
        Commands::GenCode { template, metadata } => {
            let code = generator
                .gen_code(template, metadata)
                .with_context(|| format!("Failed to render template {template}"))?;
            writeln!(out, "{code}")?;
        }
        Commands::GenService { service, write } => {
            let output = generator
                .gen_service(service, *write)
                .with_context(|| format!("Failed to generate service {service}"))?;
            for file in output.service.enabled_code_files() {
                writeln!(out, "📄 {}/{} ({} bytes)", file.dir, file.name, file.code.len())?;
            }
            for file in &output.functional_files {
                writeln!(out, "📄 {}/{} ({} bytes)", file.dir, file.name, file.code.len())?;
            }
            if *write {
                writeln!(
                    out,
                    "✅ Wrote {} files to {}",
                    output.written.len(),
                    output.dir.display()
                )?;
            }
        }
        Commands::GenFileTemplate {
            file_template,
            metadata,
            show_template,
        } => {
            let output = generator
                .gen_code_by_file_template_id(file_template, metadata)
                .with_context(|| format!("Failed to run file template {file_template}"))?;
            if *show_template {
                writeln!(out, "{}", output.template_content)?;
                writeln!(out, "---")?;
            }
            writeln!(out, "{}", output.code)?;
        }
        Commands::GenFunctionalTemplate {
            functional_template,
            metadata,
            write,
        } => {
            let files = generator
                .gen_code_by_functional_template_id(functional_template, metadata, None)
                .with_context(|| {
                    format!("Failed to run functional template {functional_template}")
                })?;
            if *write {
                let writer = OutputWriter::new(&config.output_dir);
                for file in &files {
                    let path = writer.write(
                        &config.default_service_package,
                        &file.dir,
                        &file.name,
                        &file.code,
                    )?;
                    writeln!(out, "✅ Generated {}", path.display())?;
                }
            } else {
                for file in &files {
                    writeln!(out, "==> {}/{}", file.dir, file.name)?;
                    writeln!(out, "{}", file.code)?;
                }
            }
        }
        Commands::Inspect { metadata } => inspect(&catalog, metadata.as_deref(), out)?,
    }
    Ok(())
}

fn open_catalog(config: &GeneratorConfig) -> anyhow::Result<Arc<Catalog>> {
    let Some(bundle) = config.bundle.as_deref() else {
        bail!("no catalog bundle given (use --bundle or set `bundle` in {DEFAULT_CONFIG_FILE})");
    };
    let store = open_store(bundle)?;
    let catalog = Arc::new(Catalog::new(Arc::new(store)));
    catalog
        .load_all()
        .with_context(|| format!("Failed to load catalog from {}", bundle.display()))?;
    Ok(catalog)
}

fn open_store(bundle: &Path) -> anyhow::Result<MemoryStore> {
    MemoryStore::open(bundle)
        .with_context(|| format!("Failed to open catalog bundle {}", bundle.display()))
}

fn inspect(catalog: &Catalog, metadata: Option<&str>, out: &mut dyn Write) -> anyhow::Result<()> {
    match metadata {
        Some(id) => {
            let md = catalog.metadata_by_id(id)?;
            writeln!(out, "{} ({})", md.name, md.id)?;
            writeln!(out, "  level:         {}", md.level)?;
            writeln!(out, "  fields:        {}", md.metadata_fields.len())?;
            writeln!(out, "  unique fields: {}", md.unique_fields)?;
            writeln!(out, "  accessors:     {}", md.fields)?;
            writeln!(out, "  preloads:      {}", md.preloads.join(", "))?;
        }
        None => {
            let mut all = catalog.store().load_all_metadata()?;
            all.sort_by(|a, b| a.name.cmp(&b.name));
            writeln!(
                out,
                "📦 {} metadata, {} templates",
                catalog.metadata_count(),
                catalog.template_count()
            )?;
            for md in all {
                writeln!(out, "  {} ({})", md.name, md.id)?;
            }
        }
    }
    Ok(())
}
