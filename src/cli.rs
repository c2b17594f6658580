use crate::config::load_config;
use crate::model::Diagram;
use crate::route::route_diagram;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "wireroute",
    version,
    about = "Orthogonal connector router for electrical schematic diagrams"
)]
pub struct Args {
    /// Input diagram JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file (scale, font size, distance overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pretty-print the routed output
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let diagram: Diagram = serde_json::from_str(&input).context("parse diagram")?;
    let routed = route_diagram(&diagram.items, &diagram.connectors, &config)?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&routed)?
    } else {
        serde_json::to_string(&routed)?
    };
    write_output(&out, args.output.as_deref())?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(out: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, out).with_context(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(out.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
