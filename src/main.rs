use clap::{Args, Parser, Subcommand};
use navtree::{Children, IndexStrategy, NavTree, Navigator, NavigatorError, TreeNode};
use std::path::PathBuf;
use std::process::ExitCode;

/// Inspect the navigation data of a generated API reference.
#[derive(Parser)]
#[command(name = "navtree", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Path to the navigation data script (usually navtreedata.js)
    data: PathBuf,

    /// Directory holding subtree and index chunk scripts (defaults to the data file's directory)
    #[arg(long)]
    scripts: Option<PathBuf>,

    /// Always scan the page index linearly
    #[arg(long)]
    linear: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table of contents as an indented outline
    Tree {
        #[command(flatten)]
        input: Input,
        /// Only print nodes up to this depth (roots are depth 0)
        #[arg(long)]
        depth: Option<usize>,
        /// Fetch and print deferred subtrees
        #[arg(long)]
        expand: bool,
    },
    /// Print the chain of entries leading to a link in the loaded tree
    Find {
        #[command(flatten)]
        input: Input,
        link: String,
    },
    /// Like `find`, but through the chunked index, fetching subtrees as needed
    Locate {
        #[command(flatten)]
        input: Input,
        link: String,
    },
    /// Print the position of a page in the page index and the chunk covering it
    Index {
        #[command(flatten)]
        input: Input,
        id: String,
    },
    /// Print the document as JSON
    Dump {
        #[command(flatten)]
        input: Input,
        /// Inline deferred subtrees
        #[arg(long)]
        expand: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when a lookup found nothing.
fn run(command: Command) -> Result<bool, NavigatorError> {
    match command {
        Command::Tree { input, depth, expand } => {
            let nav = open(&input)?;
            let expanded;
            let tree = if expand {
                expanded = nav.expand()?;
                &expanded
            } else {
                nav.tree()
            };
            print_outline(tree, depth);
            Ok(true)
        }
        Command::Find { input, link } => {
            let nav = open(&input)?;
            Ok(print_chain(nav.find_by_link(&link)))
        }
        Command::Locate { input, link } => {
            let nav = open(&input)?;
            let chain = nav.locate(&link)?;
            Ok(print_chain(chain.as_ref().map(|c| c.iter().collect())))
        }
        Command::Index { input, id } => {
            let nav = open(&input)?;
            let Some(index) = nav.index() else {
                eprintln!("{} has no page index", input.data.display());
                return Ok(false);
            };
            match index.chunk_for(&id) {
                Some(n) => println!("chunk: {} (starts at {})", n, index.entries()[n]),
                None => println!("chunk: none"),
            }
            match index.index_of(&id) {
                Some(pos) => {
                    println!("position: {}", pos);
                    Ok(true)
                }
                None => {
                    println!("position: not found");
                    Ok(false)
                }
            }
        }
        Command::Dump { input, expand } => {
            let nav = open(&input)?;
            let json = if expand {
                serde_json::to_string_pretty(&nav.expand()?)?
            } else {
                serde_json::to_string_pretty(nav.document())?
            };
            println!("{}", json);
            Ok(true)
        }
    }
}

fn open(input: &Input) -> Result<Navigator, NavigatorError> {
    let strategy = if input.linear {
        IndexStrategy::Linear
    } else {
        IndexStrategy::Auto
    };
    let mut builder = Navigator::builder()
        .with_data_file(&input.data)?
        .with_index_strategy(strategy);
    if let Some(dir) = &input.scripts {
        builder = builder.with_script_dir(dir);
    }
    builder.build()
}

fn print_outline(tree: &NavTree, max_depth: Option<usize>) {
    for visit in tree {
        if max_depth.is_some_and(|max| visit.depth > max) {
            continue;
        }
        let indent = "  ".repeat(visit.depth);
        match &visit.node.children {
            Children::Deferred(key) => {
                println!("{}{}  <{}> [{}]", indent, visit.node.title, visit.node.link, key)
            }
            _ => println!("{}{}  <{}>", indent, visit.node.title, visit.node.link),
        }
    }
}

fn print_chain(chain: Option<Vec<&TreeNode>>) -> bool {
    match chain {
        Some(chain) => {
            let titles: Vec<&str> = chain.iter().map(|n| n.title.as_str()).collect();
            println!("{}", titles.join(" > "));
            if let Some(last) = chain.last() {
                println!("{}", last.link);
            }
            true
        }
        None => false,
    }
}
