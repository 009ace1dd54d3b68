use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use superslice::prelude::*;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "superslice")]
#[command(about = "Build spirals, platonic solids and tilings; print them as mesh JSON")]
struct Cmd {
    /// Log library debug events to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the summary line of every built-in shape
    List,
    /// Sample a polar spiral r(φ)
    Spiral {
        #[arg(long)]
        family: String,
        /// Keyword argument of the radius function, e.g. `--arg a=2`
        #[arg(long = "arg", value_parser = parse_kv)]
        args: Vec<(String, f64)>,
        #[arg(long, default_value_t = 32)]
        vertices: usize,
        /// Start of the angle range (default 0)
        #[arg(long)]
        start: Option<f64>,
        /// End of the angle range (default π/2)
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a platonic solid on a sphere of the given radius
    Solid {
        #[arg(long)]
        kind: String,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a cols x rows patch of a periodic tiling
    Tiling {
        #[arg(long)]
        kind: String,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long, default_value_t = 4)]
        cols: usize,
        #[arg(long, default_value_t = 4)]
        rows: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::List => list(),
        Action::Spiral {
            family,
            args,
            vertices,
            start,
            stop,
            out,
        } => spiral(family, args, vertices, (start, stop), out),
        Action::Solid { kind, radius, out } => solid(kind, radius, out),
        Action::Tiling {
            kind,
            radius,
            cols,
            rows,
            out,
        } => tiling(kind, radius, cols, rows, out),
    }
}

fn parse_kv(s: &str) -> std::result::Result<(String, f64), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let v: f64 = v
        .trim()
        .parse()
        .map_err(|e| format!("argument '{k}': {e}"))?;
    Ok((k.trim().to_string(), v))
}

fn list() -> Result<()> {
    for family in SpiralFamily::ALL {
        let args: &[(&str, f64)] = match family {
            SpiralFamily::Custom => continue,
            SpiralFamily::Ellipse => &[],
            SpiralFamily::Logarithmic => &[("a", 1.0), ("k", 0.1)],
            _ => &[("a", 1.0)],
        };
        match Spiral::new(16, CurveSpec::named(family.name(), args.iter().copied())) {
            Ok(s) => println!("{}", s.polytope()),
            Err(e) => println!("{family}: {e}"),
        }
    }
    for solid in Solid::ALL {
        println!("{}", Polyhedron::new(solid, 1.0)?.polytope());
    }
    for kind in TilingKind::ALL {
        match Grid::new(kind, 1.0, 2, 2).build() {
            Ok(p) => println!("{p}"),
            Err(e) => println!("{kind}: {e}"),
        }
    }
    Ok(())
}

fn spiral(
    family: String,
    args: Vec<(String, f64)>,
    vertices: usize,
    range: (Option<f64>, Option<f64>),
    out: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(family, ?args, vertices, "spiral");
    let defaults = RangeCfg::default();
    let ranges = RangeCfg::with_gamma(
        range.0.unwrap_or(defaults.gamma.start),
        range.1.unwrap_or(defaults.gamma.stop),
    );
    let spec = CurveSpec::named(family.clone(), args.iter().cloned());
    let s = Spiral::with_ranges(vertices, spec, ranges)
        .with_context(|| format!("building {family} spiral"))?;
    let params = serde_json::json!({
        "family": family,
        "args": spec_args(&args),
        "vertices": vertices,
        "start": ranges.gamma.start,
        "stop": ranges.gamma.stop,
    });
    emit(s.polytope(), out.as_deref(), "spiral", params)
}

fn spec_args(args: &[(String, f64)]) -> serde_json::Map<String, serde_json::Value> {
    args.iter()
        .map(|(k, v)| (k.clone(), serde_json::json!(v)))
        .collect()
}

fn solid(kind: String, radius: f64, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(kind, radius, "solid");
    let solid: Solid = kind.parse()?;
    let p = Polyhedron::new(solid, radius).with_context(|| format!("building {solid}"))?;
    let params = serde_json::json!({ "kind": solid.name(), "radius": radius });
    emit(p.polytope(), out.as_deref(), "solid", params)
}

fn tiling(kind: String, radius: f64, cols: usize, rows: usize, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(kind, radius, cols, rows, "tiling");
    let kind: TilingKind = kind.parse()?;
    let p = Grid::new(kind, radius, cols, rows)
        .build()
        .with_context(|| format!("building {kind}"))?;
    let params = serde_json::json!({
        "kind": kind.name(),
        "radius": radius,
        "cols": cols,
        "rows": rows,
    });
    emit(&p, out.as_deref(), "tiling", params)
}

/// Print the mesh JSON, or write it plus a provenance sidecar.
fn emit(
    poly: &Polytope,
    out: Option<&Path>,
    command: &'static str,
    params: serde_json::Value,
) -> Result<()> {
    let mesh = poly
        .mesh()
        .with_context(|| format!("evaluating vertices of {}", poly.name()))?;
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(&mesh)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&mesh)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(out, Payload::new(command, params, poly.to_string()))?;
    tracing::info!(
        out = %out.display(),
        sidecar = %sidecar.display(),
        shape = %poly,
        "wrote mesh"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_arguments_parse() {
        assert_eq!(parse_kv("a=2").unwrap(), ("a".to_string(), 2.0));
        assert_eq!(parse_kv(" k = -0.5").unwrap(), ("k".to_string(), -0.5));
        assert!(parse_kv("a").is_err());
        assert!(parse_kv("a=x").is_err());
    }

    #[test]
    fn emit_writes_mesh_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cube.json");
        let cube = Polyhedron::cube(1.0).unwrap();
        emit(cube.polytope(), Some(&out), "solid", serde_json::json!({})).unwrap();
        let mesh: MeshData = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert!(dir.path().join("cube.provenance.json").exists());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from([
            "superslice", "spiral", "--family", "Archimedean", "--arg", "a=2", "--vertices", "12",
        ])
        .unwrap();
        match cmd.action {
            Action::Spiral { args, vertices, .. } => {
                assert_eq!(args, vec![("a".to_string(), 2.0)]);
                assert_eq!(vertices, 12);
            }
            _ => panic!("parsed the wrong subcommand"),
        }
    }
}
