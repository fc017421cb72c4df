//! LBaaS relay command line.
//!
//! Pushes one resource snapshot (JSON, from a file or stdin) through the
//! relay, the same way the orchestration framework's callbacks do.
//!
//! ```text
//! lbaas-relay --config relay.toml update pool pool.json
//! lbaas-relay plan delete member member.json
//! ```

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;

use lbaas_relay::config::{load_config_with, parse_config, ConfigOverrides};
use lbaas_relay::observability::{logging, metrics};
use lbaas_relay::relay::{LbaasDriver, Operation, OperationContext, ResourceManager};
use lbaas_relay::resource::{Resource, ResourceKind};

#[derive(Parser)]
#[command(name = "lbaas-relay")]
#[command(about = "Relay load-balancer lifecycle events to an SDN controller", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override observability.log_level
    #[arg(long)]
    log_level: Option<String>,

    /// Project the operation is performed for
    #[arg(long)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// POST a new resource to the controller
    Create(ResourceArgs),
    /// PUT the resource's current attributes
    Update(ResourceArgs),
    /// DELETE the resource
    Delete(ResourceArgs),
    /// Ask the controller to reconcile the resource (not implemented)
    Refresh(ResourceArgs),
    /// Fetch runtime statistics (not implemented)
    Stats(ResourceArgs),
    /// Print the request an operation would issue without sending it
    Plan {
        /// create, update, delete, refresh or stats
        operation: Operation,
        #[command(flatten)]
        resource: ResourceArgs,
    },
}

#[derive(Args)]
struct ResourceArgs {
    /// loadbalancer, listener, pool, member or healthmonitor
    kind: ResourceKind,

    /// JSON snapshot, bare or wrapped as {"<kind>": {...}}; "-" reads stdin
    #[arg(default_value = "-")]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        log_level: cli.log_level,
        ..ConfigOverrides::from_env()
    };
    let config = match &cli.config {
        Some(path) => load_config_with(path, &overrides)?,
        None => parse_config("", &overrides)?,
    };

    logging::init_logging(&config.observability)?;
    metrics::describe_metrics();

    tracing::debug!(config = ?config.controller, "Configuration loaded");

    let driver = LbaasDriver::new(&config)?;
    let mut ctx = OperationContext::new();
    if let Some(project) = cli.project {
        ctx = ctx.with_project(project);
    }

    let (operation, resource, dry_run) = match cli.command {
        Commands::Create(args) => (Operation::Create, args, false),
        Commands::Update(args) => (Operation::Update, args, false),
        Commands::Delete(args) => (Operation::Delete, args, false),
        Commands::Refresh(args) => (Operation::Refresh, args, false),
        Commands::Stats(args) => (Operation::Stats, args, false),
        Commands::Plan { operation, resource } => (operation, resource, true),
    };

    let kind = resource.kind;
    let snapshot = read_snapshot(&resource.file, kind)?;

    match kind {
        ResourceKind::LoadBalancer => {
            run(&driver.load_balancer, operation, dry_run, &ctx, snapshot).await
        }
        ResourceKind::Listener => run(&driver.listener, operation, dry_run, &ctx, snapshot).await,
        ResourceKind::Pool => run(&driver.pool, operation, dry_run, &ctx, snapshot).await,
        ResourceKind::Member => run(&driver.member, operation, dry_run, &ctx, snapshot).await,
        ResourceKind::HealthMonitor => {
            run(&driver.health_monitor, operation, dry_run, &ctx, snapshot).await
        }
    }
}

/// Read the snapshot and strip the `{"<kind>": ...}` envelope if present.
fn read_snapshot(path: &Path, kind: ResourceKind) -> Result<Value, Box<dyn Error>> {
    let mut raw = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(path)?;
    }

    let mut value: Value = serde_json::from_str(&raw)?;
    if let Value::Object(map) = &mut value {
        if map.len() == 1 {
            if let Some(inner) = map.remove(kind.singular()) {
                return Ok(inner);
            }
        }
    }
    Ok(value)
}

async fn run<R: Resource + DeserializeOwned>(
    manager: &ResourceManager<R>,
    operation: Operation,
    dry_run: bool,
    ctx: &OperationContext,
    snapshot: Value,
) -> Result<(), Box<dyn Error>> {
    let obj: R = serde_json::from_value(snapshot)?;

    if dry_run {
        match manager.plan(operation, &obj)? {
            Some(planned) => {
                println!("{} {}", planned.method, manager.url_for(&planned));
                if let Some(body) = planned.body {
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
            }
            None => println!("{} sends no request", operation),
        }
        return Ok(());
    }

    match operation {
        Operation::Create => manager.create(ctx, &obj).await?,
        Operation::Update => manager.update(ctx, &obj).await?,
        Operation::Delete => manager.delete(ctx, &obj).await?,
        Operation::Refresh => manager.refresh(ctx, &obj).await?,
        Operation::Stats => match manager.stats(ctx, &obj).await? {
            Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
            None => println!("no statistics available for {} {}", R::KIND, obj.id()),
        },
    }

    println!("{} {} {}: ok", operation, R::KIND, obj.id());
    Ok(())
}
