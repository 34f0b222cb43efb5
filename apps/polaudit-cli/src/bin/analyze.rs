use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use polaudit_core::config::Config;
use polaudit_embed::embedder_from_config;
use polaudit_llm::ChatCompletionsClient;
use polaudit_pipeline::html::render_report;
use polaudit_pipeline::AuditPipeline;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut input: Option<PathBuf> = None;
    let mut batch_dir: Option<PathBuf> = None;
    let mut write_json = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--batch" => {
                if i + 1 < args.len() {
                    batch_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --batch requires a directory");
                    std::process::exit(1);
                }
            }
            "--json" => write_json = true,
            _ if !args[i].starts_with('-') => input = Some(PathBuf::from(&args[i])),
            other => {
                eprintln!("Unknown flag: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let documents = match (&input, &batch_dir) {
        (Some(path), None) => vec![path.clone()],
        (None, Some(dir)) => list_documents(dir),
        _ => {
            eprintln!("Usage: polaudit-analyze <policy.pdf|policy.txt> | --batch <dir> [--json]");
            std::process::exit(1);
        }
    };
    if documents.is_empty() {
        eprintln!("No .pdf or .txt documents found");
        std::process::exit(1);
    }

    let out_dir: String = config
        .get("output.dir")
        .unwrap_or_else(|_| "output_files".to_string());
    let out_dir = polaudit_core::config::expand_path(&out_dir);
    fs::create_dir_all(&out_dir)?;

    let mut pipeline_config = config.pipeline()?;
    // Key resolution stays at this edge; nothing downstream reads env.
    if pipeline_config.generation.api_key.is_none() {
        pipeline_config.generation.api_key = env::var("GROQ_API_KEY").ok();
    }

    let embedder = embedder_from_config(&pipeline_config.embedding)?;
    let generator = Box::new(ChatCompletionsClient::new(&pipeline_config.generation)?);
    let pipeline = AuditPipeline::new(pipeline_config, embedder, generator)?;

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for (index, path) in documents.iter().enumerate() {
        println!("[{}/{}] Analyzing {}", index + 1, documents.len(), path.display());
        match analyze_one(&pipeline, path, &out_dir, write_json) {
            Ok(report_path) => {
                succeeded += 1;
                println!("  ✅ Report: {}", report_path.display());
            }
            Err(e) => {
                // One bad document never kills the batch.
                failed += 1;
                eprintln!("  ❌ {}: {:#}", path.display(), e);
            }
        }
    }

    println!("\nDone: {} succeeded, {} failed", succeeded, failed);
    if succeeded == 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn analyze_one(
    pipeline: &AuditPipeline,
    path: &Path,
    out_dir: &Path,
    write_json: bool,
) -> anyhow::Result<PathBuf> {
    let raw_text = extract_text(path)?;
    let report = pipeline
        .run(&raw_text)
        .with_context(|| format!("audit failed for {}", path.display()))?;

    println!(
        "  Rules: {} kept, {} flagged, {} dropped, {} skipped",
        report.count(polaudit_core::types::Disposition::Keep),
        report.count(polaudit_core::types::Disposition::Flag),
        report.count(polaudit_core::types::Disposition::Drop),
        report.count(polaudit_core::types::Disposition::Skip),
    );

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let html_path = out_dir.join(format!("{stem}.html"));
    fs::write(&html_path, render_report(&report))?;
    if write_json {
        let json_path = out_dir.join(format!("{stem}.json"));
        fs::write(&json_path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(html_path)
}

fn extract_text(path: &Path) -> anyhow::Result<String> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("pdf") => extract_pdf_text(path),
        _ => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Extract PDF text through the poppler `pdftotext` binary, layout
/// preserved, UTF-8 output on stdout.
fn extract_pdf_text(path: &Path) -> anyhow::Result<String> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .output()
        .context("failed to run pdftotext (is poppler installed?)")?;
    if !output.status.success() {
        bail!(
            "pdftotext failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    let text = String::from_utf8_lossy(&output.stdout).to_string();
    if text.trim().is_empty() {
        bail!("pdftotext produced no text output for {}", path.display());
    }
    Ok(text)
}

fn list_documents(dir: &Path) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("pdf") | Some("txt")
        ) {
            documents.push(path.to_path_buf());
        }
    }
    documents.sort();
    documents
}
