use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use navtree::config::Config;
use navtree::demo::{build_root, DemoSettings};
use navtree::logging::init_tracing;
use navtree::node::{mount_root, RootContext};
use navtree::store::FileStateStore;

#[derive(Parser)]
#[command(name = "navtree", about = "Navigation tree demo in the terminal")]
struct Args {
    /// Config file (default: ~/.config/navtree/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// State file, overriding the config
    #[arg(long)]
    state: Option<PathBuf>,

    /// Ignore saved state and start from the initial tree
    #[arg(long)]
    fresh: bool,

    /// Print the mounted tree and exit
    #[arg(long)]
    print_tree: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config_path = args.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)?;

    let state_path = args.state.unwrap_or_else(|| config.state_path());
    let store = if args.fresh || !config.state.restore {
        FileStateStore::fresh(&state_path)
    } else {
        FileStateStore::open(&state_path)
    };
    tracing::info!(state = %state_path.display(), fresh = args.fresh, "navtree starting");

    let settings = DemoSettings::from(&config);
    let host = mount_root(
        RootContext {
            store: Arc::new(store),
        },
        |ctx| build_root(ctx, settings),
    )
    .context("failed to mount navigation tree")?
    .with_transition(settings.transition);

    if args.print_tree {
        print!("{}", host.view().outline());
        host.release()?;
        return Ok(());
    }

    navtree::ui::run(host, Duration::from_millis(config.ui.tick_rate_ms)).await?;
    tracing::info!("navtree exited");
    Ok(())
}
