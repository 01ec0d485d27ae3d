use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

mod cli;
mod config;
mod corpus;
mod embeddings;
mod engine;
mod highlight;
mod history;
mod ingest;
mod similarity;
mod sink;
#[cfg(test)]
mod tests;

use cli::CorpusArgs;
use config::Config;
use embeddings::{EmbeddingModel, TextEmbedder};
use engine::{ScoredResult, SearchSession};
use history::SearchHistory;

/// Documents embedded per progress-bar tick.
const EMBED_BATCH_SIZE: usize = 32;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = cli::Args::parse();
    let config = Config::load();

    match args.command {
        cli::Command::Search {
            query,
            corpus_args,
            top_k,
            json,
        } => {
            let session = build_session(&config)?;
            index_corpus(&session, &corpus_args, &config)?;

            let top_k = top_k.unwrap_or(config.default_top_k);
            let results = session.search(&query, top_k)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results, &query, &config);
            }
            Ok(())
        }

        cli::Command::Interactive { corpus_args } => {
            let session = build_session(&config)?;
            let indexed = index_corpus(&session, &corpus_args, &config)?;
            println!("Indexed {} documents", indexed);

            run_menu(&session, &config)
        }
    }
}

/// Load the embedding model and create a fresh session.
///
/// A model that cannot be loaded is fatal; there is nothing to retry.
fn build_session(config: &Config) -> anyhow::Result<SearchSession> {
    let model = EmbeddingModel::new(&config.model, config.cache_dir())
        .with_context(|| format!("cannot initialize embedding model '{}'", config.model))?;

    log::info!(
        "Loaded model '{}' ({} dimensions)",
        model.name(),
        model.dimensions()
    );

    Ok(SearchSession::new(Box::new(model)))
}

/// Read, optionally clean and chunk, then embed a corpus file.
///
/// Returns the number of documents ingested.
fn index_corpus(
    session: &SearchSession,
    corpus_args: &CorpusArgs,
    config: &Config,
) -> anyhow::Result<usize> {
    let lines = ingest::load_lines(&corpus_args.corpus)?;

    let mut documents: Vec<String> = if corpus_args.clean {
        lines
            .iter()
            .filter_map(|line| ingest::clean_page_text(line, &config.ingest))
            .collect()
    } else {
        lines
    };

    if corpus_args.chunk {
        documents = documents
            .iter()
            .flat_map(|doc| {
                ingest::chunk_text(doc, config.ingest.chunk_size, config.ingest.chunk_overlap)
            })
            .collect();
    }

    if documents.is_empty() {
        anyhow::bail!(
            "corpus '{}' contains no usable documents",
            corpus_args.corpus.display()
        );
    }

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message("Embedding corpus");

    for batch in documents.chunks(EMBED_BATCH_SIZE) {
        session.add_documents(batch)?;
        pb.inc(batch.len() as u64);
    }
    pb.finish_and_clear();

    Ok(documents.len())
}

/// Interactive menu loop: search, review history, exit.
fn run_menu(session: &SearchSession, config: &Config) -> anyhow::Result<()> {
    const MENU_SEARCH: &str = "Search documents";
    const MENU_HISTORY: &str = "View search history";
    const MENU_RESET: &str = "Reset session";
    const MENU_EXIT: &str = "Exit";

    let mut history = SearchHistory::new();

    loop {
        let choice = inquire::Select::new(
            "Semantic Search System",
            vec![MENU_SEARCH, MENU_HISTORY, MENU_RESET, MENU_EXIT],
        )
        .prompt()?;

        match choice {
            MENU_SEARCH => {
                let query = inquire::Text::new("Enter your search query:").prompt()?;
                if query.trim().is_empty() {
                    println!("Please enter a query.");
                    continue;
                }

                let top_k = inquire::CustomType::<usize>::new("Number of results to display:")
                    .with_default(config.default_top_k)
                    .with_error_message("Please enter a valid number")
                    .prompt()?;

                history.record(&query);

                let results = session.search(&query, top_k)?;
                print_results(&results, &query, config);
            }

            MENU_HISTORY => {
                if history.is_empty() {
                    println!("No searches performed yet.");
                } else {
                    println!("Search history ({} queries):", history.len());
                    for (i, q) in history.queries().iter().enumerate() {
                        println!("{}. {}", i + 1, q);
                    }
                }
            }

            MENU_RESET => {
                let dropped = session.corpus_len()?;
                session.clear()?;
                history = SearchHistory::new();
                println!("Session reset ({} documents dropped).", dropped);
            }

            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

/// Print ranked results with excerpts, then the combined retrieved context
/// ready to feed a downstream answer generator.
fn print_results(results: &[ScoredResult], query: &str, config: &Config) {
    if results.is_empty() {
        println!("No results.");
        return;
    }

    println!("Search results:");
    for result in results {
        let excerpt = ingest::extract_sentences(
            &result.text,
            config.ingest.max_excerpt_sentences,
            config.ingest.min_sentence_chars,
        );
        let display = if excerpt.is_empty() {
            result.text.as_str()
        } else {
            excerpt.as_str()
        };

        println!(
            "{}. {}  (score: {:.3})",
            result.rank,
            highlight::highlight(display, query),
            result.score
        );
    }

    println!("\nRetrieved context:");
    for result in results {
        println!("- {}", result.text);
    }
}
