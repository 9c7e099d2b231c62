//! printquote CLI - 3D print cost estimator
//!
//! Reads STL files or plain dimensions and prints a cost breakdown.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use printquote_cost::{FormValue, Quote, QuoteForm};
use printquote_mesh::MeshSummary;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser)]
#[command(name = "printquote")]
#[command(about = "Estimate the cost of 3D printed parts", long_about = None)]
struct Cli {
    /// Log decoding and pricing steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a mesh file and show its volume and bounding box
    Inspect {
        /// STL file (binary or ASCII)
        file: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Price an order
    Estimate {
        /// STL file, or a logo image priced as a flat slab
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// TOML order file; flags override its fields
        #[arg(short, long)]
        order: Option<PathBuf>,
        /// Target width in mm (defaults to the mesh size)
        #[arg(long)]
        width: Option<String>,
        /// Target height in mm (defaults to the mesh size)
        #[arg(long)]
        height: Option<String>,
        /// Target thickness in mm (defaults to the mesh size)
        #[arg(long)]
        thickness: Option<String>,
        /// Number of pieces
        #[arg(short, long)]
        quantity: Option<String>,
        /// Infill percentage (5-100)
        #[arg(short, long)]
        infill: Option<String>,
        /// Material key (see `printquote materials`)
        #[arg(short, long)]
        material: Option<String>,
        /// Add-on key, repeatable (see `printquote add-ons`)
        #[arg(long = "add-on")]
        add_ons: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List available materials
    Materials,
    /// List available add-ons
    AddOns,
}

/// Order fields given on the command line.
struct OrderFlags {
    width: Option<String>,
    height: Option<String>,
    thickness: Option<String>,
    quantity: Option<String>,
    infill: Option<String>,
    material: Option<String>,
    add_ons: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { file, json } => {
            inspect(&file, json)?;
        }
        Commands::Estimate {
            file,
            order,
            width,
            height,
            thickness,
            quantity,
            infill,
            material,
            add_ons,
            json,
        } => {
            let flags = OrderFlags {
                width,
                height,
                thickness,
                quantity,
                infill,
                material,
                add_ons,
            };
            estimate(file.as_deref(), order.as_deref(), flags, json)?;
        }
        Commands::Materials => report::print_materials(),
        Commands::AddOns => report::print_add_ons(),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_mesh(path: &Path) -> Result<MeshSummary> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let summary = printquote_mesh::decode(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(summary)
}

fn inspect(file: &Path, json: bool) -> Result<()> {
    let summary = read_mesh(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        report::print_summary(file, &summary);
    }
    Ok(())
}

fn estimate(file: Option<&Path>, order: Option<&Path>, flags: OrderFlags, json: bool) -> Result<()> {
    let mut form = match order {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<QuoteForm>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => QuoteForm::default(),
    };
    apply_flags(&mut form, flags);

    if let Some(key) = form.material.as_deref() {
        if printquote_cost::material(key).is_none() {
            bail!("Unknown material: {} (see `printquote materials`)", key);
        }
    }

    let mesh = match file {
        Some(path) if is_mesh_path(path) => {
            let summary = read_mesh(path)?;
            prefill_from_mesh(&mut form, &summary);
            Some(summary)
        }
        Some(path) => {
            info!(file = %path.display(), "not an STL file, pricing as a flat slab");
            None
        }
        None => None,
    };

    for (name, value) in [
        ("width", &form.width),
        ("height", &form.height),
        ("thickness", &form.thickness),
    ] {
        if value.is_none() {
            bail!("--{} is required when no STL file is given", name);
        }
    }

    let request = form.parse()?;
    let pricing = printquote_cost::estimate(&request, mesh.as_ref())?;
    let quote = Quote { mesh, pricing };

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        report::print_quote(&quote);
    }
    Ok(())
}

fn apply_flags(form: &mut QuoteForm, flags: OrderFlags) {
    let text = |v: Option<String>| v.map(FormValue::Text);
    if flags.width.is_some() {
        form.width = text(flags.width);
    }
    if flags.height.is_some() {
        form.height = text(flags.height);
    }
    if flags.thickness.is_some() {
        form.thickness = text(flags.thickness);
    }
    if flags.quantity.is_some() {
        form.quantity = text(flags.quantity);
    }
    if flags.infill.is_some() {
        form.infill = text(flags.infill);
    }
    if flags.material.is_some() {
        form.material = flags.material;
    }
    form.add_ons.extend(flags.add_ons);
}

/// Fill dimensions the user left out with the mesh's own size.
fn prefill_from_mesh(form: &mut QuoteForm, summary: &MeshSummary) {
    let native = printquote_cost::DimensionInput::from_summary(summary, 1);
    form.width.get_or_insert(FormValue::from(native.width));
    form.height.get_or_insert(FormValue::from(native.height));
    form.thickness.get_or_insert(FormValue::from(native.thickness));
}

fn is_mesh_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(printquote_mesh::is_mesh_file_name)
}
