use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CorpusArgs {
    /// Plain-text corpus file, one document per line
    #[clap(short, long)]
    pub corpus: PathBuf,

    /// Split long documents into overlapping word chunks before embedding
    #[clap(long, default_value = "false")]
    pub chunk: bool,

    /// Clean each document as extracted page text (drop short and
    /// noise-keyword lines) before embedding
    #[clap(long, default_value = "false")]
    pub clean: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a single query against a corpus and print ranked results
    Search {
        /// Free-text search query
        query: String,

        #[clap(flatten)]
        corpus_args: CorpusArgs,

        /// Number of results to return (config default when omitted)
        #[clap(short = 'k', long)]
        top_k: Option<usize>,

        /// Print results as JSON
        #[clap(long, default_value = "false")]
        json: bool,
    },

    /// Index a corpus once, then search it from an interactive menu
    Interactive {
        #[clap(flatten)]
        corpus_args: CorpusArgs,
    },
}
