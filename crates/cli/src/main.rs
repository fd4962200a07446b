use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rectilinear::api::{
    decompose_polygon, split_overlapping_rectangles, OrthogonalPolygon, PolygonGenConfig,
    PolygonGenerator, Rectangle, RectangleMerger,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{read_json, write_json, PolygonDto, RectDto};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run the rectilinear geometry engine on JSON files")]
struct Cmd {
    /// Optional run tag; propagated to provenance sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Split two overlapping rectangles into their overlap and the remaining pieces
    SplitOverlap {
        /// JSON array with exactly two rectangles
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Merge non-overlapping rectangles into orthogonal polygons with holes
    Merge {
        /// JSON array of rectangles
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Decompose orthogonal polygons into non-overlapping rectangles
    Decompose {
        /// JSON array of polygons
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Draw random orthogonal polygons from the seeded generator
    Sample(SampleArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct SampleArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    max_offset: Option<u32>,
    #[arg(long)]
    max_rectangles: Option<u32>,
    #[arg(long)]
    min_points: Option<u32>,
    #[arg(long)]
    min_holes: Option<u32>,
    #[arg(long)]
    max_holes: Option<u32>,
    #[arg(long)]
    max_attempts: Option<u32>,
}

impl SampleArgs {
    fn config(&self) -> PolygonGenConfig {
        let mut cfg = PolygonGenConfig::default();
        let overrides = [
            (self.max_offset, &mut cfg.max_offset),
            (self.max_rectangles, &mut cfg.max_rectangles),
            (self.min_points, &mut cfg.min_points),
            (self.min_holes, &mut cfg.min_holes),
            (self.max_holes, &mut cfg.max_holes),
            (self.max_attempts, &mut cfg.max_attempts),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        cfg
    }
}

#[derive(Serialize)]
struct SplitOutput {
    overlap: RectDto,
    others: Vec<RectDto>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag;
    match cmd.action {
        Action::SplitOverlap { input, out } => split_overlap(&input, &out, tag),
        Action::Merge { input, out } => merge(&input, &out, tag),
        Action::Decompose { input, out } => decompose(&input, &out, tag),
        Action::Sample(args) => sample(&args, tag),
        Action::Report => report(tag),
    }
}

fn split_overlap(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    let rects: Vec<RectDto> = read_json(input)?;
    let [a, b] = rects.as_slice() else {
        bail!("{}: expected exactly two rectangles, got {}", input.display(), rects.len());
    };
    let (a, b) = (Rectangle::from(a), Rectangle::from(b));
    tracing::info!(input = %input.display(), %a, %b, tag = ?tag, "split-overlap");
    let (overlap, others) = split_overlapping_rectangles(&a, &b)
        .with_context(|| format!("splitting rectangles from {}", input.display()))?;
    let output = SplitOutput {
        overlap: RectDto::from(&overlap),
        others: others.iter().map(RectDto::from).collect(),
    };
    write_json(out, &output)?;
    let params = json!({"input": input.display().to_string(), "pieces": others.len()});
    write_sidecar(out, Payload::new("split-overlap", params).with_tag(tag))?;
    Ok(())
}

fn merge(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    let rects: Vec<RectDto> = read_json(input)?;
    let rects: Vec<Rectangle> = rects.iter().map(Rectangle::from).collect();
    tracing::info!(input = %input.display(), rectangles = rects.len(), tag = ?tag, "merge");
    let polygons = RectangleMerger
        .merge(&rects)
        .with_context(|| format!("merging rectangles from {}", input.display()))?;
    let dtos: Vec<PolygonDto> = polygons.iter().map(PolygonDto::from).collect();
    write_json(out, &dtos)?;
    let holes: usize = polygons.iter().map(|p| p.holes.len()).sum();
    tracing::info!(polygons = polygons.len(), holes, "merged");
    let params = json!({
        "input": input.display().to_string(),
        "rectangles": rects.len(),
        "polygons": polygons.len(),
    });
    write_sidecar(out, Payload::new("merge", params).with_tag(tag))?;
    Ok(())
}

fn decompose(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    let dtos: Vec<PolygonDto> = read_json(input)?;
    tracing::info!(input = %input.display(), polygons = dtos.len(), tag = ?tag, "decompose");
    let mut output: Vec<Vec<RectDto>> = Vec::with_capacity(dtos.len());
    for (i, dto) in dtos.iter().enumerate() {
        let polygon: OrthogonalPolygon = dto
            .to_polygon()
            .with_context(|| format!("polygon {i} in {}", input.display()))?;
        let rects = decompose_polygon(&polygon);
        tracing::debug!(index = i, rectangles = rects.len(), "decomposed");
        output.push(rects.iter().map(RectDto::from).collect());
    }
    write_json(out, &output)?;
    let params = json!({"input": input.display().to_string(), "polygons": dtos.len()});
    write_sidecar(out, Payload::new("decompose", params).with_tag(tag))?;
    Ok(())
}

fn sample(args: &SampleArgs, tag: Option<String>) -> Result<()> {
    let cfg = args.config();
    tracing::info!(seed = args.seed, count = args.count, tag = ?tag, "sample");
    let generator = PolygonGenerator::new(cfg, args.seed)?;
    let mut polygons = Vec::with_capacity(args.count);
    let mut replays = Vec::with_capacity(args.count);
    for sample in generator.take(args.count) {
        let sample = sample?;
        replays.push(json!({
            "seed": sample.replay.token.seed,
            "index": sample.replay.token.index,
            "position": sample.replay.position,
        }));
        polygons.push(PolygonDto::from(&sample.polygon));
    }
    write_json(&args.out, &polygons)?;
    let params = json!({
        "seed": args.seed,
        "count": args.count,
        "max_offset": cfg.max_offset,
        "rectangles": [cfg.min_rectangles, cfg.max_rectangles],
        "points": [cfg.min_points, cfg.max_points],
        "holes": [cfg.min_holes, cfg.max_holes],
        "replays": replays,
    });
    write_sidecar(&args.out, Payload::new("sample", params).with_tag(tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": rectilinear::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
