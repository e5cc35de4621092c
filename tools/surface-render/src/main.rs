// Copyright 2025. Command-line front end for surface-gfx.
//
// Usage:
//   surface-render render <scene.json> -o <output.png>
//   surface-render resample <input> <width> <height> [--filter <name>] -o <output.png>
//   surface-render hull <points.json>
//   surface-render triangulate <points.json>
//   surface-render list-filters

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use surface_gfx::convex_hull::convex_hull;
use surface_gfx::resample::resample;
use surface_gfx::triangulate::triangulate;
use surface_gfx::ResamplingFilter;
use surface_render::{load_image, load_points, save_image, save_surface, Scene};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "resample" => cmd_resample(&args[2..]),
        "hull" => cmd_hull(&args[2..]),
        "triangulate" => cmd_triangulate(&args[2..]),
        "list-filters" => {
            cmd_list_filters();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("surface-render - draw scenes and run geometry kernels from the command line");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <scene.json> -o <output.png>");
    eprintln!("      Replay a JSON scene and write the surface as PNG.");
    eprintln!();
    eprintln!("  resample <input> <width> <height> [--filter <name>] -o <output.png>");
    eprintln!("      Resize an image with the given kernel (default triangle).");
    eprintln!();
    eprintln!("  hull <points.json>");
    eprintln!("      Print the closed convex hull of a point array as JSON.");
    eprintln!();
    eprintln!("  triangulate <points.json>");
    eprintln!("      Print ear-clipping triangle indices as JSON.");
    eprintln!();
    eprintln!("  list-filters");
    eprintln!("      List resampling kernel names.");
}

/// Split `-o <path>` and `--filter <name>` flags from positional arguments.
struct Parsed {
    positional: Vec<String>,
    output: Option<PathBuf>,
    filter: Option<String>,
}

fn parse_flags(args: &[String]) -> Result<Parsed> {
    let mut parsed = Parsed {
        positional: Vec::new(),
        output: None,
        filter: None,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                let v = args.get(i + 1).context("-o needs a path")?;
                parsed.output = Some(PathBuf::from(v));
                i += 2;
            }
            "-f" | "--filter" => {
                let v = args.get(i + 1).context("--filter needs a name")?;
                parsed.filter = Some(v.clone());
                i += 2;
            }
            _ => {
                parsed.positional.push(args[i].clone());
                i += 1;
            }
        }
    }
    Ok(parsed)
}

fn cmd_render(args: &[String]) -> Result<()> {
    let p = parse_flags(args)?;
    let (Some(scene_path), Some(output)) = (p.positional.first(), p.output) else {
        bail!("usage: surface-render render <scene.json> -o <output.png>");
    };
    let scene_path = Path::new(scene_path);
    let scene = Scene::load(scene_path)?;
    let base = scene_path.parent().unwrap_or_else(|| Path::new("."));
    let surface = scene.render(base)?;
    save_surface(&surface, &output)?;
    println!("Wrote {}x{} to {}", surface.width(), surface.height(), output.display());
    Ok(())
}

fn cmd_resample(args: &[String]) -> Result<()> {
    let p = parse_flags(args)?;
    if p.positional.len() < 3 {
        bail!("usage: surface-render resample <input> <width> <height> [--filter <name>] -o <output.png>");
    }
    let Some(output) = p.output else {
        bail!("resample needs -o <output.png>");
    };
    let width: usize = p.positional[1]
        .parse()
        .with_context(|| format!("invalid width: {}", p.positional[1]))?;
    let height: usize = p.positional[2]
        .parse()
        .with_context(|| format!("invalid height: {}", p.positional[2]))?;
    let filter = match p.filter {
        Some(name) => name.parse::<ResamplingFilter>()?,
        None => ResamplingFilter::default(),
    };

    let src = load_image(Path::new(&p.positional[0]))?;
    let out = resample(&src, width, height, filter);
    save_image(&out, &output)?;
    println!(
        "Resampled {}x{} -> {}x{} ({}) to {}",
        src.width(),
        src.height(),
        out.width(),
        out.height(),
        filter,
        output.display()
    );
    Ok(())
}

fn cmd_hull(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("usage: surface-render hull <points.json>");
    };
    let points = load_points(Path::new(path))?;
    let hull = convex_hull(&points);
    println!("{}", serde_json::to_string_pretty(&hull)?);
    Ok(())
}

fn cmd_triangulate(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("usage: surface-render triangulate <points.json>");
    };
    let points = load_points(Path::new(path))?;
    let t = triangulate(&points);
    if !t.is_complete() {
        tracing::warn!(
            triangles = t.triangle_count(),
            vertices = t.vertices().len(),
            "triangulation is partial"
        );
    }
    let out = serde_json::json!({
        "vertices": t.vertices(),
        "triangles": t.triangles(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_list_filters() {
    println!("Available filters:");
    for f in ResamplingFilter::ALL {
        println!("  {}", f);
    }
}
