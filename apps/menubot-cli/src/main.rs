//! Interactive chat CLI: loads the menu dataset, builds the catalog
//! and vector index once, then answers questions in a loop.

use anyhow::Context;
use menubot_answer::{Assistant, ConversationState, HybridRetriever, RetrievalConfig};
use menubot_catalog::{load_chunks, MenuCatalog};
use menubot_core::config::Config;
use menubot_core::error::Error;
use menubot_llm::ChatClient;
use menubot_vector::{FlatIpIndex, HashEmbedder};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🍽️  menubot — assistente do cardápio");
    println!("====================================");

    let config = Config::load()?;
    let csv_path: String = config.get_or(
        "data.chunks_csv",
        "dataset_restaurante/rag_dataset_chunks.csv".to_string(),
    );
    let csv_path = PathBuf::from(csv_path);

    println!("📥 Carregando dataset: {}", csv_path.display());
    let entries = load_chunks(&csv_path)?;
    if entries.is_empty() {
        return Err(Error::Dataset(format!("dataset is empty: {}", csv_path.display())).into());
    }

    let catalog = Arc::new(MenuCatalog::build(entries));
    if catalog.canonical_rows().next().is_none() {
        return Err(Error::Dataset(
            "dataset has no canonical (pdf) rows; the title index would be empty".to_string(),
        )
        .into());
    }
    println!(
        "✅ Catálogo pronto: {} chunks, {} pratos",
        catalog.len(),
        catalog.all_titles().len()
    );

    let retrieval = RetrievalConfig {
        top_k: config.get_or("retrieval.top_k", 10),
        min_score: config.get_or("retrieval.min_score", 0.28),
        max_rows: config.get_or("retrieval.max_rows", 5),
        ..RetrievalConfig::default()
    };
    let embedder = Box::new(HashEmbedder::default());
    let index = Box::new(FlatIpIndex::new(HashEmbedder::DEFAULT_DIM));
    let retriever = HybridRetriever::build(catalog.clone(), embedder, index, retrieval)
        .context("failed to build the vector index")?;

    let generator = Box::new(ChatClient::from_config(&config)?);
    let max_chars: usize = config.get_or("context.max_chars", 4500);
    let assistant =
        Assistant::new(catalog, retriever, generator).with_max_context_chars(max_chars);

    println!("💬 Pergunte sobre pratos, preços e categorias ('sair' encerra).\n");
    let mut state = ConversationState::new();
    let stdin = io::stdin();
    loop {
        print!("🍽️  > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "sair" | "quit" | "exit") {
            break;
        }

        let answer = assistant.answer(question, &mut state);
        println!("\n{}\n", answer.text);
        if !answer.sources.is_empty() {
            println!("📎 Fontes:");
            for source in &answer.sources {
                println!("  - {source}");
            }
            println!();
        }
    }

    println!("Até a próxima! 👋");
    Ok(())
}
