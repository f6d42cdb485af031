use anyhow::Result;
use clap::{Parser, Subcommand};
use graphwalk::{verify_traversal, Config, Direction, Explorer, InverseLabelRegistry, Step, World};

#[derive(Parser, Debug)]
#[command(name = "graphwalk")]
#[command(about = "Explore room graphs from the inside and inspect traversal orders")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Explore a world from its starting room and verify full coverage
    Explore {
        /// Grid rows (default: world.rows from config)
        #[arg(long)]
        rows: Option<u32>,

        /// Grid columns (default: world.cols from config)
        #[arg(long)]
        cols: Option<u32>,

        /// Explore the nine-room sample world instead of a grid
        #[arg(long, conflicts_with_all = ["rows", "cols"])]
        sample: bool,

        /// Seed for exit selection (overrides explorer.seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the move path
        #[arg(short, long)]
        path: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show breadth- and depth-first traversals and searches on the sample world
    Search {
        /// Room to start from
        #[arg(long, default_value_t = 1)]
        from: u32,

        /// Room to search for
        #[arg(long, default_value_t = 5)]
        to: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.graphwalk.log_level.as_str()),
    )
    .init();

    match args.command {
        Some(Command::Search { from, to }) => run_search(from, to),
        Some(Command::Explore {
            rows,
            cols,
            sample,
            seed,
            path,
            json,
        }) => {
            let world = if sample {
                World::sample()?
            } else {
                World::grid(
                    rows.unwrap_or(config.world.rows),
                    cols.unwrap_or(config.world.cols),
                )?
            };
            run_explore(&config, world, seed, path, json)
        }
        None => {
            let world = World::grid(config.world.rows, config.world.cols)?;
            run_explore(&config, world, None, false, false)
        }
    }
}

/// Run an exploration session and check the move history against the world
fn run_explore(
    config: &Config,
    world: World<u32, Direction>,
    seed: Option<u64>,
    show_path: bool,
    json: bool,
) -> Result<()> {
    let mut options = config.explorer.clone();
    if seed.is_some() {
        options.seed = seed;
    }

    let rooms = world.room_count();
    log::info!("Starting graphwalk v{}", env!("CARGO_PKG_VERSION"));
    log::info!("World: {} rooms, starting in room {}", rooms, world.start());

    let mut explorer = Explorer::new(
        world.clone(),
        InverseLabelRegistry::cardinal(),
        rooms,
        &options,
    )?;
    let history = explorer.run()?;
    let labels: Vec<Direction> = history.iter().filter_map(|s| s.label).collect();
    let report = verify_traversal(&world, &labels)?;

    if json {
        let out = serde_json::json!({
            "report": report,
            "path": if show_path { Some(&labels) } else { None },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if show_path {
            let path: Vec<&str> = labels.iter().map(Direction::as_str).collect();
            println!("Path: {}", path.join(" "));
        }
        println!("{}", report);
    }

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print bft/dft and bfs/dfs results on the sample world
fn run_search(from: u32, to: u32) -> Result<()> {
    let world = World::sample()?;
    let graph = world.graph();
    for room in [from, to] {
        if !graph.contains(&room) {
            anyhow::bail!("Room {} is not in the sample world (rooms 1-9)", room);
        }
    }

    println!("\n=== Sample world, from room {} ===\n", from);
    println!("{:<6} {}", "bft", format_steps(&graph.bft(&from)));
    println!("{:<6} {}", "dft", format_steps(&graph.dft(&from)));

    println!("\n=== Path to room {} ===\n", to);
    let bfs = graph.bfs_to_node(&from, &to);
    let dfs = graph.dfs_to_node(&from, &to);
    println!("{:<6} {} ({} moves)", "bfs", format_steps(bfs.steps()), bfs.edge_count());
    println!("{:<6} {} ({} moves)", "dfs", format_steps(dfs.steps()), dfs.edge_count());
    println!();

    Ok(())
}

fn format_steps(steps: &[Step<u32, Direction>]) -> String {
    steps
        .iter()
        .map(|step| match step.label {
            Some(label) => format!("-{}-> {}", label, step.node),
            None => step.node.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
