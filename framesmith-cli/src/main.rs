use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use framesmith::{
    AnimationOpts, Ease, FrameIndex, FrameStore, GifEncoder, ProjectConfig, StoreOpts,
    TemporalBudget,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framesmith", version)]
struct Cli {
    /// Project JSON with output, store and animation settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frames of a sequence in index order.
    List(SequenceArgs),
    /// Renumber a sequence to 0..N-1, closing gaps and adopting stranded temporaries.
    Reindex(SequenceArgs),
    /// Reverse the order of a sequence, or of the index range [start, end).
    Reverse(ReverseArgs),
    /// Append a copy of every frame, optionally in reverse order.
    Duplicate(DuplicateArgs),
    /// Encode a sequence as an animated GIF.
    Draw(DrawArgs),
    /// Decode an animated GIF into sequence frames.
    Explode(ExplodeArgs),
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Base output path of the sequence (`dir/stem`).
    ///
    /// Relative paths are resolved against the configured out folder.
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    base: Option<PathBuf>,

    /// Folder holding a single sequence; stem and extension are inferred.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Frame file extension (overrides the config).
    #[arg(long)]
    ext: Option<String>,
}

#[derive(Args, Debug)]
struct ReverseArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// First index of the range (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End of the range (exclusive). Defaults to the next free index.
    #[arg(long)]
    end: Option<u64>,
}

#[derive(Args, Debug)]
struct DuplicateArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Append the copies in reverse order (ping-pong loop).
    #[arg(long, default_value_t = false)]
    reverse: bool,
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Flat milliseconds per frame (ignored with --total-ms).
    #[arg(long)]
    per_frame_ms: Option<u64>,

    /// Total duration in milliseconds; frames are repeated to follow --ease.
    #[arg(long)]
    total_ms: Option<u64>,

    /// Easing curve for --total-ms, e.g. `out-quint`, `in-out-sine`.
    #[arg(long)]
    ease: Option<Ease>,

    /// Play once instead of looping.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// GIF quantization speed, 1 (best) to 30 (fastest).
    #[arg(long, default_value_t = 10)]
    speed: i32,
}

#[derive(Args, Debug)]
struct ExplodeArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Base output path for the extracted frames (`dir/stem`).
    #[arg(long)]
    base: PathBuf,

    /// Continue after existing frames instead of overwriting from index 0.
    #[arg(long, default_value_t = false)]
    recover: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project = match &cli.config {
        Some(path) => {
            let project = ProjectConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?;
            tracing::debug!(path = %path.display(), ?project, "loaded project config");
            project
        }
        None => ProjectConfig::default(),
    };

    match cli.cmd {
        Command::List(args) => cmd_list(&project, args),
        Command::Reindex(args) => cmd_reindex(&project, args),
        Command::Reverse(args) => cmd_reverse(&project, args),
        Command::Duplicate(args) => cmd_duplicate(&project, args),
        Command::Draw(args) => cmd_draw(&project, args),
        Command::Explode(args) => cmd_explode(&project, args),
    }
}

// Batch commands always work on the recovered sequence.
fn open_store(project: &ProjectConfig, args: &SequenceArgs) -> anyhow::Result<FrameStore> {
    if let Some(dir) = &args.dir {
        let dir = project.output.resolve(dir);
        return FrameStore::discover(&dir)
            .with_context(|| format!("discover sequence in '{}'", dir.display()));
    }
    let base = args
        .base
        .as_ref()
        .context("either --base or --dir is required")?;
    let base = project.output.resolve(base);
    let opts = StoreOpts {
        extension: args
            .ext
            .clone()
            .unwrap_or_else(|| project.store.extension.clone()),
        recover_existing: true,
    };
    FrameStore::open(&base, &opts).with_context(|| format!("open sequence '{}'", base.display()))
}

fn cmd_list(project: &ProjectConfig, args: SequenceArgs) -> anyhow::Result<()> {
    let store = open_store(project, &args)?;
    for frame in store.list_ordered()? {
        println!("{}\t{}", frame.index, frame.path.display());
    }
    let stranded = store.stranded_temporaries()?;
    if !stranded.is_empty() {
        eprintln!(
            "{} stranded temporary file(s); run `framesmith reindex` to recover them",
            stranded.len()
        );
    }
    Ok(())
}

fn cmd_reindex(project: &ProjectConfig, args: SequenceArgs) -> anyhow::Result<()> {
    let mut store = open_store(project, &args)?;
    let renamed = store.reindex()?;
    eprintln!(
        "renamed {renamed} frame(s); next index {}",
        store.next_index()
    );
    Ok(())
}

fn cmd_reverse(project: &ProjectConfig, args: ReverseArgs) -> anyhow::Result<()> {
    let mut store = open_store(project, &args.seq)?;
    let end = args.end.map(FrameIndex).unwrap_or(store.next_index());
    let renamed = store.reverse(FrameIndex(args.start), end)?;
    eprintln!("reversed [{}, {end}): renamed {renamed} frame(s)", args.start);
    Ok(())
}

fn cmd_duplicate(project: &ProjectConfig, args: DuplicateArgs) -> anyhow::Result<()> {
    let mut store = open_store(project, &args.seq)?;
    let created = store.duplicate_all(args.reverse)?;
    eprintln!(
        "duplicated {} frame(s); next index {}",
        created.len(),
        store.next_index()
    );
    Ok(())
}

fn cmd_draw(project: &ProjectConfig, args: DrawArgs) -> anyhow::Result<()> {
    let store = open_store(project, &args.seq)?;

    let base = &project.animation;
    let opts = AnimationOpts {
        timing: TemporalBudget {
            per_frame_ms: args.per_frame_ms.unwrap_or(base.timing.per_frame_ms),
            total_ms: args.total_ms.or(base.timing.total_ms),
        },
        ease: args.ease.or(base.ease),
        loop_forever: base.loop_forever && !args.once,
    };
    let out = project.output.resolve(&args.out);
    let mut encoder = GifEncoder::with_speed(args.speed);
    let stats = framesmith::draw_animation(&store, &opts, &mut encoder, &out)
        .with_context(|| format!("draw '{}'", out.display()))?;

    eprintln!(
        "wrote {} ({} frames from {}, {} ms each)",
        out.display(),
        stats.encoded_frames,
        stats.source_frames,
        stats.unit_duration_ms
    );
    Ok(())
}

fn cmd_explode(project: &ProjectConfig, args: ExplodeArgs) -> anyhow::Result<()> {
    let base = project.output.resolve(&args.base);
    if let Some(parent) = base.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let opts = StoreOpts {
        recover_existing: args.recover,
        ..project.store.clone()
    };
    let mut store = FrameStore::open(&base, &opts)
        .with_context(|| format!("open sequence '{}'", base.display()))?;
    let n = framesmith::explode_gif(&args.in_path, &mut store)?;
    eprintln!("extracted {n} frame(s) into {}", store.identity().dir().display());
    Ok(())
}
