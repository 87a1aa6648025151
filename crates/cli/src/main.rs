#![deny(unsafe_code)]
//! CLI inspector for the shaderfolio catalog.
//!
//! Subcommands:
//! - `list` — print every catalog entry
//! - `show <id>` — print one entry's metadata, uniforms, and controls

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use shaderfolio_core::ShaderDefinition;
use std::process;

#[derive(Parser)]
#[command(name = "shaderfolio", about = "Fragment shader portfolio catalog inspector")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every shader in the catalog.
    List,
    /// Show one shader's metadata, declared uniforms, and controls.
    Show {
        /// Shader id (e.g. "gradient-wave").
        id: String,

        /// Also print the GLSL fragment source.
        #[arg(long)]
        source: bool,
    },
}

fn print_definition(def: &ShaderDefinition, with_source: bool) {
    println!("{} ({})", def.name, def.id);
    println!("  {}", def.description);
    println!("  tags: {}", def.tags.join(", "));

    println!("  uniforms:");
    for decl in &def.uniforms {
        println!("    {} ({})", decl.name, decl.kind.tag());
    }

    if def.controls.is_empty() {
        println!("  controls: none");
    } else {
        println!("  controls:");
        for control in &def.controls {
            let target = match &control.uniform {
                Some(uniform) => format!(" -> {uniform}"),
                None => String::new(),
            };
            println!(
                "    {} [{}..{} step {}, default {}]{}",
                control.label, control.min, control.max, control.step, control.default, target
            );
        }
    }

    if with_source {
        println!("\n{}", def.fragment_source.trim());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = shaderfolio_catalog::builtin();

    match cli.command {
        Command::List => {
            if cli.json {
                let entries: Vec<serde_json::Value> = catalog
                    .entries()
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "id": d.id,
                            "name": d.name,
                            "description": d.description,
                            "tags": d.tags,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for def in catalog.entries() {
                    println!("{:<16} {} [{}]", def.id, def.name, def.tags.join(", "));
                }
            }
        }
        Command::Show { id, source } => {
            let def = catalog
                .lookup(&id)
                .ok_or_else(|| CliError::UnknownShader(id.clone()))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(def)?);
            } else {
                print_definition(def, source);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
