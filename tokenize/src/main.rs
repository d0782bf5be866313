use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use sampan::token::Token;
use sampan::{Dictionary, Tokenizer};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Predicts tokens of text from stdin.")]
struct Args {
    /// Dictionary in binary (in zstd).
    #[clap(short = 'i', long)]
    sysdic_in: PathBuf,

    /// Resolves overlapping words and compounds numbers with classifiers.
    #[clap(short = 'S', long)]
    smart: bool,

    /// Outputs only surface strings separated by spaces.
    #[clap(short = 'w', long)]
    wakachi: bool,

    /// Tokenizes the whole input as one stream instead of line by line.
    #[clap(long)]
    stream: bool,

    /// Number of characters analyzed at once.
    #[clap(long)]
    window_size: Option<usize>,
}

fn print_tokens<W, I>(out: &mut W, tokens: I, wakachi: bool) -> std::io::Result<()>
where
    W: Write,
    I: Iterator<Item = Token>,
{
    if wakachi {
        for (i, token) in tokens.enumerate() {
            if i != 0 {
                write!(out, " ")?;
            }
            write!(out, "{}", token.surface())?;
        }
        writeln!(out)?;
    } else {
        for token in tokens {
            let range = token.range_char();
            writeln!(
                out,
                "{}\t{}\t{}-{}",
                token.surface(),
                token.lexeme_type(),
                range.start,
                range.end
            )?;
        }
        writeln!(out, "EOS")?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let reader = zstd::Decoder::new(File::open(args.sysdic_in)?)?;
    let dict = Dictionary::read(reader)?;

    let mut tokenizer = Tokenizer::new(dict).smart(args.smart);
    if let Some(window_size) = args.window_size {
        tokenizer = tokenizer.window_size(window_size)?;
    }
    eprintln!("Ready to tokenize :)");

    let stdin = std::io::stdin();
    let mut out = BufWriter::new(std::io::stdout().lock());
    if args.stream {
        let worker = tokenizer.new_worker(stdin.lock());
        print_tokens(&mut out, worker, args.wakachi)?;
    } else {
        #[allow(clippy::significant_drop_in_scrutinee)]
        for line in stdin.lock().lines() {
            let line = line?;
            let worker = tokenizer.new_worker(line.as_bytes());
            print_tokens(&mut out, worker, args.wakachi)?;
        }
    }
    out.flush()?;

    Ok(())
}
