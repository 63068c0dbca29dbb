use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitescribe_core::{Crawler, Graph};
use sitescribe_web::WebCrawler;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::export;

const MERGED_FILENAME: &str = "merged_output.md";

fn print_prompt(msg: &str) -> String {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush().unwrap();
    let mut response = String::new();
    io::stdin().read_line(&mut response).unwrap();
    response.trim().to_lowercase()
}

fn crawl_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Starting crawl...");
    pb
}

/// Crawl summary printed after the traversal: totals plus every page with
/// its discovery depth, in the order the crawl found them.
pub fn generate_crawl_report<P>(graph: &Graph<P>) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages discovered: {}\n", graph.node_count()));
    report.push_str(&format!("  Links recorded: {}\n", graph.edge_count()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for node in graph.all_nodes() {
        report.push_str(&format!("  [depth {}] {}\n", node.depth(), node.id()));
    }
    report.push('\n');

    report
}

pub fn handle_crawl(args: &ArgMatches) -> Result<()> {
    let url = args.get_one::<Url>("URL").expect("URL is required");
    let output = args.get_one::<String>("OUTPUT").expect("OUTPUT is required");
    let merge = args.get_flag("merge");
    let max_depth = *args.get_one::<usize>("max-depth").unwrap_or(&1);
    let allowed_domains: Vec<String> = args
        .get_many::<String>("allowed-domains")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let auto_follow = args.get_flag("auto-follow");
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let dot_path = args.get_one::<PathBuf>("dot");
    let assume_yes = args.get_flag("yes");
    let quiet = args.get_flag("quiet");

    let expanded_output = shellexpand::tilde(output);
    let output_dir = Path::new(expanded_output.as_ref()).to_path_buf();
    debug!("Output directory resolved to {}", output_dir.display());

    let mut crawler = WebCrawler::with_timeout(timeout)
        .with_allowed_domains(allowed_domains)
        .with_domain_restriction(!auto_follow);

    let spinner = if quiet { None } else { Some(crawl_spinner()) };
    if let Some(pb) = &spinner {
        let pb = pb.clone();
        crawler = crawler.with_progress_callback(Box::new(move |url| {
            pb.set_message(format!("Crawling {}", url));
            pb.tick();
        }));
    }

    let mut graph = crawler.crawl(url.as_str(), max_depth)?;

    if let Some(pb) = &spinner {
        pb.finish_with_message(format!(
            "Crawl complete! {} pages discovered",
            graph.node_count()
        ));
    }
    if !quiet {
        print!("\n{}", generate_crawl_report(&graph));
    }

    if let Some(path) = dot_path {
        fs::write(path, graph.to_dot())
            .with_context(|| format!("Failed to write graph to {}", path.display()))?;
        println!("Graph written to {}", path.display());
    }

    if !assume_yes {
        let response = print_prompt(&format!(
            "Write {} pages to {}? [y/N]:",
            graph.node_count(),
            output_dir.display()
        ));
        if response != "y" && response != "yes" {
            println!("\nExport cancelled.");
            return Ok(());
        }
    }

    let pages = crawler.render_markdown(&mut graph);
    if merge {
        let target = output_dir.join(MERGED_FILENAME);
        export::save_to_single_file(&pages, &output_dir, MERGED_FILENAME)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("{} Wrote {}", "✓".green().bold(), target.display());
    } else {
        export::save_to_multiple_files(&pages, &output_dir)
            .with_context(|| format!("Failed to write files to {}", output_dir.display()))?;
        println!(
            "{} Wrote {} files to {}",
            "✓".green().bold(),
            pages.len(),
            output_dir.display()
        );
    }

    Ok(())
}
