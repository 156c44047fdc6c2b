//! Weakened cache CLI
//!
//! Drives the cache through its public operations for demonstration and
//! sweep-cost experiments.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weakened_cache::{CacheStats, WeakenedCache};
use weakened_core::{CacheConfig, ExpirationPolicy, ManualClock, Priority};

/// Weakened cache - object cache with weak-reference demotion
#[derive(Parser)]
#[command(name = "weakened")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Cache configuration file (JSON)
    #[arg(short, long, global = true, env = "WEAKENED_CONFIG")]
    config: Option<PathBuf>,

    /// Print final statistics as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through put, take, weakening and timed expiration
    Demo,

    /// Insert timed entries, drop some owners, and count sweeps until quiescent
    Simulate {
        /// Number of entries to insert
        #[arg(short, long, default_value = "1000")]
        entries: usize,
        /// Drop the external owner of every N-th entry (0 keeps all)
        #[arg(short, long, default_value = "3")]
        drop_every: usize,
        /// Expiration applied to each entry, in milliseconds
        #[arg(short, long, default_value = "1000")]
        ttl_ms: u64,
        /// Expiration policy: clear or weaken
        #[arg(short, long, default_value = "weaken")]
        policy: ExpirationPolicy,
    },
}

#[derive(Debug)]
struct Sample {
    value: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "weakened=debug,info"
    } else {
        "weakened=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(cli.config.as_deref())?;

    let stats = match cli.command {
        Commands::Demo => cmd_demo(config)?,
        Commands::Simulate {
            entries,
            drop_every,
            ttl_ms,
            policy,
        } => cmd_simulate(config, entries, drop_every, Duration::from_millis(ttl_ms), policy)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<CacheConfig> {
    let Some(path) = path else {
        return Ok(CacheConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    CacheConfig::from_json(&json).context("Invalid cache configuration")
}

/// Walk through the cache operations on a manual clock
fn cmd_demo(config: CacheConfig) -> Result<CacheStats> {
    println!("{}", "🗄️  Filling cache (low, normal, high)...".cyan().bold());

    let clock = ManualClock::new();
    let mut cache = WeakenedCache::with_clock(config, clock.clone())?;

    cache.put("key1", Rc::new(Sample { value: 1 }), Priority::Low)?;
    cache.put("key2", Rc::new(Sample { value: 2 }), Priority::Normal)?;
    cache.put("key3", Rc::new(Sample { value: 3 }), Priority::High)?;

    // Untyped take, then downcast by hand
    let first = cache
        .take(&"key1")
        .and_then(|value| value.downcast::<Sample>().ok())
        .context("key1 missing")?;
    println!("   {} {}", "key1:".dimmed(), first.value);
    drop(first);

    for key in ["key2", "key3"] {
        let sample = cache.take_as::<Sample>(&key)?;
        println!("   {} {:?}", format!("{key}:").dimmed(), sample.map(|s| s.value));
    }

    println!("\n{}", "🪶 Weakening up to normal...".cyan().bold());
    cache.weaken_up_to(Priority::Normal);
    for key in ["key1", "key2", "key3"] {
        let state = if cache.contains_strong(&key) {
            "strong".green()
        } else if cache.take(&key).is_some() {
            "weak (alive)".yellow()
        } else {
            "weak (reclaimed)".red()
        };
        println!("   {} {}", format!("{key}:").dimmed(), state);
    }

    println!("\n{}", "⏱️  Timed entries (10s weaken, 10s clear)...".cyan().bold());
    let weakened = Rc::new(Sample { value: 4 });
    let cleared = Rc::new(Sample { value: 5 });
    cache.put_with_expiration("key4", weakened.clone(), Priority::Normal, Duration::from_secs(10), ExpirationPolicy::Weaken)?;
    cache.put_with_expiration("key5", cleared.clone(), Priority::Normal, Duration::from_secs(10), ExpirationPolicy::Clear)?;

    clock.advance(Duration::from_secs(10));
    cache.clear_expired();
    println!("   {} strong={} weak={}", "key4:".dimmed(), cache.contains_strong(&"key4"), cache.contains_weak(&"key4"));
    println!("   {} strong={} weak={}", "key5:".dimmed(), cache.contains_strong(&"key5"), cache.contains_weak(&"key5"));

    drop(weakened);
    let report = cache.clear_collected();
    println!(
        "   {} {} reclaimed weak entries collected",
        "🧹".green(),
        report.removed
    );

    let stats = cache.stats();
    cache.dispose();
    Ok(stats)
}

/// Count how many sweeps each tracker needs to settle
fn cmd_simulate(
    config: CacheConfig,
    entries: usize,
    drop_every: usize,
    ttl: Duration,
    policy: ExpirationPolicy,
) -> Result<CacheStats> {
    if !policy.is_timed() {
        bail!("simulate needs a timed policy (clear or weaken), got {policy}");
    }

    info!(entries, drop_every, ?ttl, %policy, "Starting simulation");
    println!("{} {} entries, policy {}", "🔬 Simulating".cyan().bold(), entries, policy);

    let clock = ManualClock::new();
    let mut cache = WeakenedCache::with_clock(config, clock.clone())?;
    let mut owners: Vec<Option<Rc<usize>>> = Vec::with_capacity(entries);

    for key in 0..entries {
        let value = Rc::new(key);
        cache.put_with_expiration(key, value.clone(), Priority::ALL[key % Priority::ALL.len()], ttl, policy)?;
        owners.push(Some(value));
    }

    clock.advance(ttl);
    let mut expiration_sweeps = 0;
    while cache.stats().expirable_tracked > 0 {
        cache.clear_expired();
        expiration_sweeps += 1;
    }
    println!("   {} {}", "Expiration sweeps:".dimmed(), expiration_sweeps);

    if drop_every > 0 {
        owners
            .iter_mut()
            .step_by(drop_every)
            .for_each(|owner| drop(owner.take()));
    }

    let mut collection_sweeps = 0;
    loop {
        let stats = cache.stats();
        if stats.weak_entries == stats.live_weak_entries && stats.weak_tracked == stats.weak_entries {
            break;
        }
        cache.clear_collected();
        collection_sweeps += 1;
    }
    println!("   {} {}", "Collection sweeps:".dimmed(), collection_sweeps);

    let stats = cache.stats();
    cache.dispose();
    Ok(stats)
}

fn print_stats(stats: &CacheStats) {
    println!("\n{}", "📊 Cache statistics:".yellow().bold());
    println!("   {} {}", "Low:".dimmed(), stats.low);
    println!("   {} {}", "Normal:".dimmed(), stats.normal);
    println!("   {} {}", "High:".dimmed(), stats.high);
    println!("   {} {} ({} alive)", "Weak:".dimmed(), stats.weak_entries, stats.live_weak_entries);
    println!("   {} {}", "Tracked for expiration:".dimmed(), stats.expirable_tracked);
    println!("   {} {}", "Tracked for collection:".dimmed(), stats.weak_tracked);
}
