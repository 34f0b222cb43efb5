use std::env;
use std::path::PathBuf;

use polaudit_core::chunker;
use polaudit_core::config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_RETRIEVAL_QUERY};
use polaudit_core::text::clean_policy_text;
use polaudit_embed::HashEmbedder;
use polaudit_rag::{retrieve, VectorIndex};

/// Debug retrieval against a local text file using the deterministic hash
/// embedder: shows which chunks the pipeline would hand to generation.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <policy.txt> [query] [--k N]", args[0]);
        eprintln!("Example: {} policy.txt 'therapy unit limits' --k 5", args[0]);
        std::process::exit(1);
    }
    let file = PathBuf::from(&args[1]);
    let mut query = DEFAULT_RETRIEVAL_QUERY.to_string();
    let mut k = 5usize;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--k" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    k = n;
                    i += 1;
                } else {
                    eprintln!("Error: --k requires a number");
                    std::process::exit(1);
                }
            }
            _ if !args[i].starts_with('-') => query = args[i].clone(),
            _ => {}
        }
        i += 1;
    }

    let raw = std::fs::read_to_string(&file)?;
    let cleaned = clean_policy_text(&raw);
    let chunks = chunker::split(&cleaned, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP);
    println!("🔍 polaudit-retrieve\n====================");
    println!("File: {} ({} chunks)", file.display(), chunks.len());
    println!("Query: {}", query);

    let embedder = HashEmbedder::default();
    let index = VectorIndex::build(chunks, &embedder)?;
    let result = retrieve(&index, &embedder, &query, k)?;

    println!("\nFound {} chunks:", result.len());
    for (rank, hit) in result.hits.iter().enumerate() {
        println!(
            "\n  {}. score={:.4}  chunk={}  offset={}",
            rank + 1,
            hit.score,
            hit.chunk.chunk_index,
            hit.chunk.offset
        );
        let preview: String = hit.chunk.content.chars().take(160).collect();
        println!("     📝 {}", preview.replace('\n', " "));
    }
    Ok(())
}
