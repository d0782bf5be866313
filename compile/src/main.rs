use std::error::Error;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use sampan::{Dictionary, LexiconKind};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    about = "A program to compile word lists into a dictionary in binary (in zstd)."
)]
struct Args {
    /// Main word list, one word per line.
    #[clap(short = 'm', long)]
    main_in: PathBuf,

    /// Extension word lists added to the main lexicon.
    #[clap(short = 'e', long)]
    ext_in: Vec<PathBuf>,

    /// Quantifier word list, stored in the dictionary but not consulted in tokenization.
    /// Classifiers following numbers are looked up in the main lexicon.
    #[clap(short = 'q', long)]
    quantifier_in: Option<PathBuf>,

    /// Stop word lists.
    #[clap(short = 's', long)]
    stopword_in: Vec<PathBuf>,

    /// Surname word list.
    #[clap(long)]
    surname_in: Option<PathBuf>,

    /// Suffix word list.
    #[clap(long)]
    suffix_in: Option<PathBuf>,

    /// Preposition word list.
    #[clap(long)]
    preposition_in: Option<PathBuf>,

    /// Word lists removed from the main lexicon.
    #[clap(short = 'd', long)]
    disabled_in: Vec<PathBuf>,

    /// File to which the binary dictionary is output (in zstd).
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,
}

fn open_or_empty(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::empty()),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    eprintln!("Compiling the dictionary...");
    let start = Instant::now();
    let mut dict = Dictionary::from_readers(
        File::open(&args.main_in)?,
        open_or_empty(args.quantifier_in.as_deref())?,
        io::empty(),
    )?;
    for filename in &args.ext_in {
        dict = dict.words_from_reader(LexiconKind::Main, File::open(filename)?)?;
    }
    for filename in &args.stopword_in {
        dict = dict.words_from_reader(LexiconKind::StopWord, File::open(filename)?)?;
    }
    for (kind, filename) in [
        (LexiconKind::Surname, &args.surname_in),
        (LexiconKind::Suffix, &args.suffix_in),
        (LexiconKind::Preposition, &args.preposition_in),
    ] {
        if let Some(filename) = filename {
            dict = dict.words_from_reader(kind, File::open(filename)?)?;
        }
    }
    for filename in &args.disabled_in {
        dict = dict.disabled_words_from_reader(LexiconKind::Main, File::open(filename)?)?;
    }
    eprintln!("{} seconds", start.elapsed().as_secs_f64());

    eprintln!("Writing the dictionary...: {:?}", &args.sysdic_out);
    let mut f = zstd::Encoder::new(File::create(&args.sysdic_out)?, 19)?;
    let num_bytes = dict.write(&mut f)?;
    f.finish()?;
    eprintln!("{} MiB before compression", num_bytes as f64 / (1024. * 1024.));

    Ok(())
}
