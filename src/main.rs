//! Crawl-on-demand main entry point
//!
//! Command-line interface for submitting crawl tasks and inspecting stored
//! results.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crawl_on_demand::config::{load_config_with_hash, Config};
use crawl_on_demand::crawler::{CrawlReport, TaskRunner};
use crawl_on_demand::output::{export_csv, load_statistics, print_statistics};
use crawl_on_demand::state::{CrawlTask, TaskTracker};
use crawl_on_demand::storage::{SqliteTaskStore, TaskStore};
use crawl_on_demand::url::normalize_url;
use crawl_on_demand::TaskStatus;

/// Crawl-on-demand: bounded breadth-first crawls with per-page analysis
///
/// Submits a seed URL and collects a structured report over every page
/// reached by a same-host BFS within the depth and page budgets, including
/// SEO, social, contact, quality, and structured-element analysis.
#[derive(Parser, Debug)]
#[command(name = "crawl-on-demand")]
#[command(version = "1.0.0")]
#[command(about = "Bounded breadth-first crawls with per-page analysis", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Seed URL to crawl
    #[arg(long, conflicts_with_all = ["task", "stats", "list", "export_csv"])]
    seed: Option<String>,

    /// Traversal depth; 0 is a valid budget that fetches nothing
    #[arg(long, requires = "seed")]
    depth: Option<u32>,

    /// Maximum number of pages to fetch (at least 1)
    #[arg(long, requires = "seed", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Show a stored task and exit
    #[arg(long, value_name = "TASK_ID", conflicts_with_all = ["stats", "list", "export_csv"])]
    task: Option<String>,

    /// Show task statistics and exit
    #[arg(long, conflicts_with_all = ["list", "export_csv"])]
    stats: bool,

    /// List stored tasks and exit
    #[arg(long, conflicts_with = "export_csv")]
    list: bool,

    /// Filter --list by status (pending, running, completed, failed)
    #[arg(long, requires = "list")]
    status: Option<String>,

    /// Export a completed task's pages as CSV and exit
    #[arg(long, value_name = "TASK_ID")]
    export_csv: Option<String>,

    /// Output path for --export-csv
    #[arg(long, requires = "export_csv")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(task_id) = &cli.task {
        handle_show_task(&config, task_id)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.list {
        let status = match cli.status.as_deref() {
            Some(s) => Some(
                TaskStatus::from_db_string(s)
                    .with_context(|| format!("unknown status filter: {}", s))?,
            ),
            None => None,
        };
        handle_list(&config, status)?;
    } else if let Some(task_id) = &cli.export_csv {
        handle_export_csv(&config, task_id, cli.output.as_deref())?;
    } else if let Some(seed) = &cli.seed {
        handle_crawl(&config, seed, cli.depth, cli.max_pages).await?;
    } else {
        anyhow::bail!("nothing to do: pass --seed, --task, --list, --stats, or --export-csv");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_on_demand=info,warn"),
            1 => EnvFilter::new("crawl_on_demand=debug,info"),
            2 => EnvFilter::new("crawl_on_demand=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn open_store(config: &Config) -> anyhow::Result<SqliteTaskStore> {
    SqliteTaskStore::new(Path::new(&config.output.database_path))
        .context("failed to open task database")
}

/// Handles the default mode: submit a seed and run the crawl to completion
async fn handle_crawl(
    config: &Config,
    seed: &str,
    depth: Option<u32>,
    max_pages: Option<u32>,
) -> anyhow::Result<()> {
    let normalized = normalize_url(seed).with_context(|| format!("invalid seed URL: {}", seed))?;

    let depth = depth.unwrap_or(config.crawler.default_depth);
    let max_pages = max_pages.unwrap_or(config.crawler.default_max_pages);

    let store = open_store(config)?;
    let mut tracker = TaskTracker::new(store);

    let task = CrawlTask::new(normalized.as_str(), depth, max_pages);
    tracker.create(&task)?;
    println!("Task {} created for {}", task.id, task.url);

    let runner = TaskRunner::new(&config.crawler);
    let report = runner.execute(&mut tracker, &task).await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &CrawlReport) {
    println!("\n=== Crawl Report ===\n");
    println!("Task: {}", report.task_id);
    println!("Pages crawled: {}", report.total_pages);
    println!("Depth reached: {}", report.depth_reached);
    println!("Distinct domains: {}", report.summary.distinct_domains);
    println!("Total words: {}", report.summary.total_words);
    println!("Total links: {}", report.summary.total_links);
    println!("Total images: {}", report.summary.total_images);
    println!(
        "Average page size: {:.0} bytes",
        report.summary.average_page_size
    );

    let errors = report.pages.iter().filter(|p| p.is_error()).count();
    if errors > 0 {
        println!("Pages with fetch errors: {}", errors);
    }
}

/// Handles --task: shows one stored task row
fn handle_show_task(config: &Config, task_id: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let task = store.get_task(task_id)?;

    println!("Task:       {}", task.id);
    println!("URL:        {}", task.url);
    println!("Depth:      {}", task.depth);
    println!("Max pages:  {}", task.max_pages);
    println!("Status:     {}", task.status);
    println!("Progress:   {}%", task.progress);
    if !task.message.is_empty() {
        println!("Message:    {}", task.message);
    }
    println!("Created:    {}", task.created_at);
    if let Some(completed_at) = &task.completed_at {
        println!("Completed:  {}", completed_at);
    }
    if let Some(error) = &task.error {
        println!("Error:      {}", error);
    }
    if task.result.is_some() {
        println!("Result:     stored (use --export-csv {} to export)", task.id);
    }

    Ok(())
}

/// Handles --stats: prints task counts from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_store(config)?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles --list: prints stored tasks, newest first
fn handle_list(config: &Config, status: Option<TaskStatus>) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let tasks = store.list_tasks(status, 50, 0)?;

    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    for task in tasks {
        println!(
            "{}  {:<9}  {:>3}%  {}",
            task.id, task.status, task.progress, task.url
        );
    }

    Ok(())
}

/// Handles --export-csv: writes a completed task's pages to a CSV file
fn handle_export_csv(config: &Config, task_id: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let task = store.get_task(task_id)?;

    let result = task
        .result
        .as_deref()
        .context("task has no stored result to export")?;
    let report: CrawlReport =
        serde_json::from_str(result).context("stored task result is not a valid report")?;

    let default_path = PathBuf::from(format!("crawl_results_{}.csv", task_id));
    let path = output.unwrap_or(default_path.as_path());

    export_csv(&report, path)?;
    println!("Exported {} pages to {}", report.total_pages, path.display());

    Ok(())
}
