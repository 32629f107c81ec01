use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use doona::App;
use doona::Config;
use doona::clients::quilt::ApplyOptions;
use doona::ops::executor::RealExecutor;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer as _;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[derive(Parser)]
#[command(name = "doona")]
#[command(about = "Apply, remove and inspect quilt patch series", long_about = None)]
pub struct Cli {
    /// Working directory holding the patched tree
    #[arg(short = 'C', long, default_value = ".", global = true)]
    pub directory: PathBuf,

    /// Patches directory (defaults to $QUILT_PATCHES, then <directory>/patches)
    #[arg(long, global = true)]
    pub patches: Option<PathBuf>,

    /// Series file name (defaults to $QUILT_SERIES, then "series")
    #[arg(long, global = true)]
    pub series: Option<String>,

    /// Show quilt's diagnostics interleaved with its output, and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Force the operation
    #[arg(short, long)]
    pub force: bool,
    /// Refresh each patch as it is applied or removed
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply patches (all of them unless a patch is named)
    Push {
        /// Apply the series up to and including this patch
        #[arg(conflicts_with = "all")]
        patch: Option<String>,
        /// Apply every unapplied patch
        #[arg(short, long)]
        all: bool,
        #[command(flatten)]
        options: ApplyArgs,
    },
    /// Remove applied patches (all of them unless a patch is named)
    Pop {
        /// Remove patches down to and including this patch
        #[arg(conflicts_with = "all")]
        patch: Option<String>,
        /// Remove every applied patch
        #[arg(short, long)]
        all: bool,
        #[command(flatten)]
        options: ApplyArgs,
    },
    /// Remove a patch from the series
    Delete {
        patch: String,
        /// Delete the patch file as well
        #[arg(short, long)]
        remove: bool,
    },
    /// Upgrade quilt metadata to the current format
    Upgrade,
    /// List the patches in the series
    Series {
        #[arg(long)]
        json: bool,
    },
    /// List the applied patches
    Applied {
        #[arg(long)]
        json: bool,
    },
    /// List the patches not yet applied
    Unapplied {
        #[arg(long)]
        json: bool,
    },
    /// Show the series with applied patches marked
    Status,
}

impl From<ApplyArgs> for ApplyOptions {
    fn from(args: ApplyArgs) -> Self {
        Self {
            force: args.force,
            refresh: args.refresh,
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let timer = tracing_subscriber::fmt::time::ChronoLocal::new("%H:%M:%S%.3f".into());
    let format = tracing_subscriber::fmt::format().with_timer(timer);
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()?;
    let subscriber = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(subscriber).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let mut config = Config::load()?;
    if cli.patches.is_some() {
        config.patches_dir = cli.patches;
    }
    if cli.series.is_some() {
        config.series_file = cli.series;
    }
    config.quiet = !cli.verbose;

    let app = App::new(config, RealExecutor, cli.directory);
    let stdout = &mut std::io::stdout();

    match cli.command {
        Some(Commands::Push {
            patch,
            all: _,
            options,
        }) => app.cmd_push(patch.as_deref(), options.into(), stdout).await?,
        Some(Commands::Pop {
            patch,
            all: _,
            options,
        }) => app.cmd_pop(patch.as_deref(), options.into(), stdout).await?,
        Some(Commands::Delete { patch, remove }) => app.cmd_delete(&patch, remove, stdout).await?,
        Some(Commands::Upgrade) => app.cmd_upgrade(stdout).await?,
        Some(Commands::Series { json }) => app.cmd_series(json, stdout).await?,
        Some(Commands::Applied { json }) => app.cmd_applied(json, stdout).await?,
        Some(Commands::Unapplied { json }) => app.cmd_unapplied(json, stdout).await?,
        Some(Commands::Status) | None => app.cmd_status(stdout).await?,
    }

    Ok(())
}
