#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;
mod view;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "gs: browse and comment on a GridSphere site",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty (TTY default), text (pipe default), or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Routing",
        about = "Resolve a location fragment to a route",
        long_about = "Parse a location fragment the way the site router does and print the route with its canonical fragment. Unknown shapes resolve to the blog feed.",
        after_help = "EXAMPLES:\n    # Resolve an article link\n    gs route '#/article/edge-compute-patterns'\n\n    # Anything unrecognized is home\n    gs route '#/garbage/x/y' --json"
    )]
    Route(cmd::route::RouteArgs),

    #[command(
        next_help_heading = "Routing",
        about = "Open the page for a location fragment",
        after_help = "EXAMPLES:\n    # Open the directory\n    gs open '#/directory'\n\n    # Open a product as JSON\n    gs open '#/product/lumen-hosting' --json"
    )]
    Open(cmd::open::OpenArgs),

    #[command(
        next_help_heading = "Routing",
        about = "Replay navigation steps and print the final page",
        long_about = "Replay a browsing session through the router. Steps are location fragments, :back, :forward, :edit=<fragment> or :search=<query>. Leaving the directory resets its filter.",
        after_help = "EXAMPLES:\n    # Visit an article, then go back to the feed\n    gs navigate '#/article/accessible-3d-ux' :back\n\n    # Search from the directory (returns to the feed)\n    gs navigate '#/directory' ':search=edge'"
    )]
    Navigate(cmd::navigate::NavigateArgs),

    #[command(
        next_help_heading = "Blog",
        about = "List blog articles",
        after_help = "EXAMPLES:\n    # Whole feed\n    gs articles\n\n    # Search title, excerpt and tags\n    gs articles --query edge"
    )]
    Articles(cmd::articles::ArticlesArgs),

    #[command(
        next_help_heading = "Blog",
        about = "Show one article with related articles and comments",
        after_help = "EXAMPLES:\n    gs article neural-interfaces-2025"
    )]
    Article(cmd::articles::ArticleArgs),

    #[command(
        next_help_heading = "Blog",
        about = "Post or delete article comments"
    )]
    Comment(cmd::comment::CommentArgs),

    #[command(
        next_help_heading = "Blog",
        about = "List an article's comments, newest first",
        after_help = "EXAMPLES:\n    gs comments edge-compute-patterns --json"
    )]
    Comments(cmd::comment::CommentsArgs),

    #[command(
        next_help_heading = "Directory",
        about = "List directory items",
        after_help = "EXAMPLES:\n    # Everything under the default price ceiling\n    gs directory\n\n    # Services up to $150\n    gs directory --category Service --max-price 150"
    )]
    Directory(cmd::directory::DirectoryArgs),

    #[command(
        next_help_heading = "Directory",
        about = "Show one directory item",
        after_help = "EXAMPLES:\n    gs product vision-suite"
    )]
    Product(cmd::directory::ProductArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    gs completions bash > /etc/bash_completion.d/gs"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("GRIDSPHERE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "gridsphere=debug,info"
        } else {
            "gridsphere=info,warn"
        })
    });

    let format = env::var("GRIDSPHERE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Route(ref args) => cmd::route::run_route(args, output),
        Commands::Open(ref args) => cmd::open::run_open(args, output, &project_root),
        Commands::Navigate(ref args) => cmd::navigate::run_navigate(args, output, &project_root),
        Commands::Articles(ref args) => cmd::articles::run_articles(args, output, &project_root),
        Commands::Article(ref args) => cmd::articles::run_article(args, output, &project_root),
        Commands::Comment(ref args) => cmd::comment::run_comment(args, output, &project_root),
        Commands::Comments(ref args) => cmd::comment::run_comments(args, output, &project_root),
        Commands::Directory(ref args) => {
            cmd::directory::run_directory(args, output, &project_root)
        }
        Commands::Product(ref args) => cmd::directory::run_product(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
