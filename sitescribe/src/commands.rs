use clap::arg;
use url::Url;

pub(crate) const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitescribe")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitescribe")
        .styles(CLAP_STYLING)
        .about("Crawl a site breadth-first and capture each page as Markdown")
        .arg(
            arg!(<URL> "The starting URL for the crawl")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(arg!(<OUTPUT> "Directory where the Markdown output is written"))
        .arg(
            arg!(-m --"merge" "Merge all pages into a single Markdown file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-d --"max-depth" <DEPTH> "Maximum link depth to follow from the starting URL")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            arg!(-a --"allowed-domains" <DOMAIN> "Additional domain the crawler may follow links into (repeatable)")
                .required(false)
                .action(clap::ArgAction::Append),
        )
        .arg(
            arg!(--"auto-follow" "Follow links beyond the starting URL's own domain")
                .required(false)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"timeout" <SECONDS> "Request timeout in seconds")
                .required(false)
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--"dot" <PATH> "Write a Graphviz rendering of the crawl graph")
                .required(false)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-y --"yes" "Write output without asking for confirmation")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-q --"quiet" "Suppress progress output and the crawl summary")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(clap::ArgAction::Count),
        )
}
