//! unique-prefix CLI - print every input word with its shortest unique prefix.
//!
//! Reads newline-delimited words from files (or stdin), stores them in a
//! radix tree and prints `word prefix` lines in ascending order.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info, warn, Level};
use unique_prefix::{RadixTree, Symbol};

#[derive(Parser, Debug)]
#[command(name = "unique-prefix")]
#[command(about = "Print each word with its shortest unique prefix")]
#[command(version)]
struct Cli {
    /// Input files; reads stdin when none are given
    #[arg(name = "FILE")]
    files: Vec<PathBuf>,

    /// How input bytes are turned into tree symbols
    #[arg(short, long, value_enum, default_value_t = Mode::Chars)]
    mode: Mode,

    /// Treat any whitespace, not only newlines, as a word separator
    #[arg(short, long)]
    split_whitespace: bool,

    /// Print words in descending order
    #[arg(short, long)]
    reverse: bool,

    /// Print the tree structure after the word list
    #[arg(short, long)]
    dump: bool,

    /// Fail if the tree structure does not pass its integrity checks
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Decode input as UTF-8 and key the tree by code points
    Chars,
    /// Key the tree by raw bytes
    Bytes,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

/// Feed every word of `reader` into `tree`. Returns the number of words
/// that could not be decoded.
fn load<C: Symbol>(
    tree: &mut RadixTree<C>,
    reader: impl BufRead,
    source: &str,
    split: bool,
) -> io::Result<usize> {
    let mut skipped = 0;
    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);

        let words: Vec<&[u8]> = if split {
            line.split(|b| b.is_ascii_whitespace())
                .filter(|w| !w.is_empty())
                .collect()
        } else {
            vec![line]
        };

        for word in words {
            if let Err(err) = tree.insert_encoded(word) {
                warn!(source, line = lineno + 1, error = %err, "skipping word");
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

fn run<C: Symbol>(cli: &Cli) -> anyhow::Result<()>
where
    C::Text: AsRef<[u8]>,
{
    let mut tree: RadixTree<C> = RadixTree::new();
    let mut skipped = 0;

    if cli.files.is_empty() {
        skipped += load(&mut tree, io::stdin().lock(), "<stdin>", cli.split_whitespace)
            .context("failed to read stdin")?;
    } else {
        for path in &cli.files {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let source = path.display().to_string();
            skipped += load(&mut tree, BufReader::new(file), &source, cli.split_whitespace)
                .with_context(|| format!("failed to read {}", path.display()))?;
            debug!(path = %path.display(), words = tree.len(), "loaded");
        }
    }
    info!(words = tree.len(), skipped, "tree built");

    if cli.check {
        let issues = tree.verify_integrity();
        if !issues.is_empty() {
            bail!("tree integrity check failed:\n{}", issues.join("\n"));
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_entries(&tree, &mut out, cli.reverse, cli.dump)?;
    out.flush()?;
    Ok(())
}

/// Write one `word prefix` line per stored word, then the tree dump after a
/// blank line when `dump` is set.
fn write_entries<C: Symbol>(
    tree: &RadixTree<C>,
    out: &mut impl Write,
    reverse: bool,
    dump: bool,
) -> io::Result<()>
where
    C::Text: AsRef<[u8]>,
{
    let entries: Box<dyn Iterator<Item = (C::Text, C::Text)> + '_> = if reverse {
        Box::new(tree.iter().rev())
    } else {
        Box::new(tree.iter())
    };
    for (word, prefix) in entries {
        out.write_all(word.as_ref())?;
        out.write_all(b" ")?;
        out.write_all(prefix.as_ref())?;
        out.write_all(b"\n")?;
    }

    if dump {
        writeln!(out)?;
        write!(out, "{}", tree.dump())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(?cli, "starting");

    match cli.mode {
        Mode::Chars => run::<char>(&cli),
        Mode::Bytes => run::<u8>(&cli),
    }
}
