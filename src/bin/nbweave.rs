//! Command-line interface for nbweave
//!
//! Converts a document tree (JSON) into markdown, a script or a notebook,
//! and a notebook back into ReST.
//!
//! Usage:
//!   nbweave md `<tree.json>`                      - Markdown text
//!   nbweave script `<tree.json>`                  - Commented code listing
//!   nbweave notebook `<tree.json>`                - Clear notebook JSON
//!   nbweave rst `<notebook.ipynb>` [--flavor f]   - ReST from a notebook
//!   nbweave formats                               - List output formats

use clap::{Arg, Command};

use nbweave::unweave::{notebook_to_rst, DirectiveFlavor, RstOptions};
use nbweave::{Converter, Node, Notebook};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let tree_arg = Arg::new("path")
        .help("Path to the document tree JSON file")
        .required(true)
        .index(1);

    let matches = Command::new("nbweave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert document trees to markdown, scripts and notebooks, and notebooks to ReST")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("md")
                .about("Render a document tree as Markdown")
                .arg(tree_arg.clone()),
        )
        .subcommand(
            Command::new("script")
                .about("Render a document tree as a commented code listing")
                .arg(tree_arg.clone()),
        )
        .subcommand(
            Command::new("notebook")
                .about("Render a document tree as clear notebook JSON")
                .arg(tree_arg),
        )
        .subcommand(
            Command::new("rst")
                .about("Reconstruct ReST source from a notebook")
                .arg(
                    Arg::new("path")
                        .help("Path to the notebook file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("flavor")
                        .long("flavor")
                        .short('f')
                        .help("Code directive flavor ('nbplot' or 'plot-context')")
                        .default_value("nbplot"),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("md", sub)) => {
            let tree = read_tree(sub.get_one::<String>("path").unwrap());
            print!("{}", Converter::new().to_markdown(&tree));
        }
        Some(("script", sub)) => {
            let tree = read_tree(sub.get_one::<String>("path").unwrap());
            let script = Converter::new().to_script(&tree).unwrap_or_else(|e| die(&e));
            print!("{}", script);
        }
        Some(("notebook", sub)) => {
            let tree = read_tree(sub.get_one::<String>("path").unwrap());
            let json = Converter::new()
                .to_notebook_json(&tree)
                .unwrap_or_else(|e| die(&e));
            println!("{}", json);
        }
        Some(("rst", sub)) => {
            let notebook = read_notebook(sub.get_one::<String>("path").unwrap());
            let flavor_name = sub.get_one::<String>("flavor").unwrap();
            let flavor = DirectiveFlavor::from_name(flavor_name).unwrap_or_else(|| {
                eprintln!("Error: unknown flavor '{}'", flavor_name);
                std::process::exit(1);
            });
            let rst = notebook_to_rst(&notebook, &RstOptions { flavor })
                .unwrap_or_else(|e| die(&e));
            print!("{}", rst);
        }
        Some(("formats", _)) => {
            println!("Available output formats:\n");
            println!("  md        Markdown text");
            println!("  script    Commented code listing");
            println!("  notebook  Clear notebook JSON");
            println!("  rst       ReST reconstructed from a notebook");
        }
        _ => unreachable!(),
    }
}

fn read_tree(path: &str) -> Node {
    let source = read_file(path);
    serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing tree JSON: {}", e);
        std::process::exit(1);
    })
}

fn read_notebook(path: &str) -> Notebook {
    let source = read_file(path);
    Notebook::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing notebook: {}", e);
        std::process::exit(1);
    })
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn die(err: &dyn std::error::Error) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
