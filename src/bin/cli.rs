// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terramesh CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use terramesh::{io, JobConfig, Mesh, Shape};
use tracing::info;

#[derive(Parser)]
#[command(name = "terramesh")]
#[command(about = "Terramesh - structured mesh generation by extrusion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an extrusion job
    Extrude {
        /// Job file (TOML)
        job: PathBuf,

        /// Output file, overrides the job's `output`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a mesh file
    Info {
        /// Mesh file (JSON)
        mesh: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Extrude { job, output } => extrude_command(job, output.as_ref())?,
        Commands::Info { mesh } => info_command(mesh)?,
        Commands::Version => {
            println!("Terramesh v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn extrude_command(job: &Path, output: Option<&PathBuf>) -> Result<()> {
    let mut config = JobConfig::load(job)?;
    if let Some(output) = output {
        config.output = output.clone();
    }
    info!(job = ?job, operation = ?config.operation, "running extrusion job");

    let start = Instant::now();
    let mesh = config.run()?;
    let elapsed = start.elapsed();

    io::save_mesh(&mesh, &config.output)?;

    println!(
        "{} {}",
        "✅".green(),
        format!("Wrote {}", config.output.display()).green().bold()
    );
    print_summary(&mesh);
    println!("\n{} {:.2?}", "Generated in".bright_black(), elapsed);
    Ok(())
}

fn info_command(path: &Path) -> Result<()> {
    let mesh = io::load_mesh(path)?;
    println!("{} {}", "File:".bold(), path.display().to_string().cyan());
    print_summary(&mesh);
    Ok(())
}

fn print_summary(mesh: &Mesh) {
    println!("\n{}", "Mesh:".bold());
    print_row("Dimension", mesh.dim().to_string());
    print_row("Nodes", mesh.node_count().to_string());
    print_row("Cells", mesh.cell_count().to_string());
    print_row("Boundaries", mesh.boundary_count().to_string());

    let shapes = [
        Shape::Edge,
        Shape::Triangle,
        Shape::Quadrangle,
        Shape::TriPrism,
        Shape::Hexahedron,
    ];
    for shape in shapes {
        let count = mesh.cells().iter().filter(|c| c.shape == shape).count();
        if count > 0 {
            print_row(&format!("  {:?}", shape), count.to_string());
        }
    }

    let mut markers = mesh.cell_markers();
    markers.sort_unstable();
    markers.dedup();
    print_row("Cell markers", format!("{:?}", markers));

    let mut markers = mesh.boundary_markers();
    markers.sort_unstable();
    markers.dedup();
    print_row("Boundary markers", format!("{:?}", markers));

    let bbox = mesh.bounding_box();
    if !bbox.is_empty() {
        print_row(
            "Bounds",
            format!(
                "({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
                bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
            ),
        );
    }
}

fn print_row(label: &str, value: String) {
    println!("  {:<18} {}", format!("{}:", label).bright_black(), value.cyan());
}
