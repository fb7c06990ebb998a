use anyhow::{Context, Result};
use btreekit_core::{BTree, DisplayPrinter, Error, NaturalOrder, TreeConfig, DEFAULT_MIN_DEGREE};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Tree = BTree<i64, NaturalOrder, DisplayPrinter>;

#[derive(Parser)]
#[command(name = "btreekit")]
#[command(about = "Interactive front end for an in-memory B-tree of integers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Repl {
        #[arg(short = 't', long, default_value_t = DEFAULT_MIN_DEGREE)]
        min_degree: usize,
    },

    /// Apply operations given as +k (insert), -k (remove) or ?k (search), then print the tree
    Run {
        #[arg(short = 't', long, default_value_t = DEFAULT_MIN_DEGREE)]
        min_degree: usize,

        #[arg(required = true, allow_hyphen_values = true, num_args = 1..)]
        ops: Vec<String>,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Op {
    Insert(i64),
    Remove(i64),
    Search(i64),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { min_degree } => run_repl(min_degree),
        Commands::Run { min_degree, ops } => run_ops(min_degree, &ops),
    }
}

fn open_tree(min_degree: usize) -> Result<Tree> {
    let config = TreeConfig::new(min_degree);
    let tree = BTree::from_config(config)
        .context("Failed to create tree")?
        .with_printer(DisplayPrinter);
    info!(min_degree, "tree ready");
    Ok(tree)
}

fn run_ops(min_degree: usize, ops: &[String]) -> Result<()> {
    let mut tree = open_tree(min_degree)?;

    for token in ops {
        let op = parse_op(token)?;
        apply(&mut tree, op)?;
    }

    tree.print()?;
    Ok(())
}

fn run_repl(min_degree: usize) -> Result<()> {
    let mut tree = open_tree(min_degree)?;
    let mut rl = DefaultEditor::new()?;

    println!("btreekit REPL (min degree {})", tree.min_degree());
    println!("Commands: insert <k>..., remove <k>, search <k>, print, len, check, help, quit");
    println!();

    loop {
        let readline = rl.readline("btree> ");

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                if line == "quit" || line == "exit" {
                    break;
                }

                if let Err(e) = handle_command(&mut tree, line) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    println!("Goodbye");
    Ok(())
}

fn handle_command(tree: &mut Tree, line: &str) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(());
    }

    match parts[0] {
        "insert" | "ins" => {
            if parts.len() < 2 {
                anyhow::bail!("Usage: insert <key>...");
            }
            for part in &parts[1..] {
                apply(tree, Op::Insert(parse_key(part)?))?;
            }
        }

        "remove" | "rm" | "del" => {
            if parts.len() != 2 {
                anyhow::bail!("Usage: remove <key>");
            }
            apply(tree, Op::Remove(parse_key(parts[1])?))?;
        }

        "search" | "get" => {
            if parts.len() != 2 {
                anyhow::bail!("Usage: search <key>");
            }
            apply(tree, Op::Search(parse_key(parts[1])?))?;
        }

        "print" => {
            tree.print()?;
        }

        "len" => {
            println!("{} keys, height {}, {} nodes", tree.len(), tree.height(), tree.node_count());
        }

        "check" => {
            tree.validate()?;
            println!("OK");
        }

        "help" => {
            println!("insert <k>...  add one or more keys (duplicates allowed)");
            println!("remove <k>     remove one key equal to k");
            println!("search <k>     look k up");
            println!("print          dump the tree, one node per line");
            println!("len            key count, height and node count");
            println!("check          verify the tree invariants");
        }

        _ => {
            anyhow::bail!("Unknown command: {}", parts[0]);
        }
    }

    Ok(())
}

fn apply(tree: &mut Tree, op: Op) -> Result<()> {
    match op {
        Op::Insert(key) => {
            tree.insert(key);
            println!("OK");
        }
        Op::Remove(key) => match tree.remove(&key) {
            Ok(removed) => println!("removed {}", removed),
            Err(Error::RemoveKeyNotFound) => println!("(not found)"),
            Err(e) => return Err(e.into()),
        },
        Op::Search(key) => match tree.search(&key) {
            Some(loc) => println!("found {} at slot {} of {:?}", loc.key(), loc.index(), loc.keys()),
            None => println!("(not found)"),
        },
    }
    Ok(())
}

fn parse_key(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .with_context(|| format!("Invalid key: {}", text))
}

fn parse_op(token: &str) -> Result<Op> {
    let (sigil, rest) = token.split_at(token.chars().next().map_or(0, char::len_utf8));
    match sigil {
        "+" => Ok(Op::Insert(parse_key(rest)?)),
        "-" => Ok(Op::Remove(parse_key(rest)?)),
        "?" => Ok(Op::Search(parse_key(rest)?)),
        _ => anyhow::bail!("Operation must start with +, - or ?: {}", token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_op() {
        assert_eq!(parse_op("+5").unwrap(), Op::Insert(5));
        assert_eq!(parse_op("+-5").unwrap(), Op::Insert(-5));
        assert_eq!(parse_op("-12").unwrap(), Op::Remove(12));
        assert_eq!(parse_op("?3").unwrap(), Op::Search(3));
        assert!(parse_op("5").is_err());
        assert!(parse_op("+x").is_err());
        assert!(parse_op("").is_err());
    }

    #[test]
    fn test_handle_command() {
        let mut tree = open_tree(2).unwrap();

        handle_command(&mut tree, "insert 1 2 3 4 5 6 7").unwrap();
        assert_eq!(tree.len(), 7);

        handle_command(&mut tree, "remove 2").unwrap();
        handle_command(&mut tree, "remove 2").unwrap();
        assert_eq!(tree.len(), 6);

        handle_command(&mut tree, "check").unwrap();
        assert!(handle_command(&mut tree, "remove").is_err());
        assert!(handle_command(&mut tree, "frobnicate 1").is_err());
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from(["btreekit", "run", "-t", "2", "+1", "-1", "?1"]).unwrap();
        match cli.command {
            Commands::Run { min_degree, ops } => {
                assert_eq!(min_degree, 2);
                assert_eq!(ops, vec!["+1", "-1", "?1"]);
            }
            _ => panic!("Expected run"),
        }
    }

    #[test]
    fn test_invalid_min_degree() {
        assert!(open_tree(1).is_err());
    }
}
