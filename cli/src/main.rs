use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsearch::{
    log_duration, paginate, process_queries, remove_duplicates, DocId, DocumentStatus, ExecutionPolicy, RequestQueue,
    SearchServer,
};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    /// Space separated stop words
    #[arg(long, global = true, env = "DOCSEARCH_STOP_WORDS", default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries and print the top documents of each
    Search {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Query text; may be repeated
        #[arg(long = "query", short = 'q')]
        queries: Vec<String>,
        /// File with one query per line
        #[arg(long)]
        queries_file: Option<PathBuf>,
        /// Only return documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Score on the rayon thread pool
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Documents per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        /// Remove documents with duplicate word sets before searching
        #[arg(long, default_value_t = false)]
        dedup: bool,
    },
    /// Show which query words a document matches
    Match {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, short = 'q')]
        query: String,
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let mut server = SearchServer::new(&cli.stop_words).context("invalid stop words")?;
    tracing::debug!(stop_words = server.stop_words().len(), "server created");

    match cli.command {
        Commands::Search { input, queries, queries_file, status, parallel, page_size, dedup } => {
            load_documents(&mut server, &input)?;
            if dedup {
                let removed = remove_duplicates(&mut server);
                tracing::info!(removed = removed.len(), "duplicates removed");
            }
            let mut queries = queries;
            if let Some(path) = queries_file {
                queries.extend(read_queries(&path)?);
            }
            run_queries(&server, &queries, status.into(), policy(parallel), page_size)
        }
        Commands::Match { input, query, id, parallel } => {
            load_documents(&mut server, &input)?;
            let (words, status) = server
                .match_document_with_policy(policy(parallel), &query, id)
                .with_context(|| format!("matching document {id}"))?;
            let out = serde_json::json!({ "id": id, "status": status, "words": words });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
    }
}

fn run_queries(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    policy: ExecutionPolicy,
    page_size: usize,
) -> Result<()> {
    log_duration!("search");
    let results = match (status, policy) {
        (DocumentStatus::Actual, ExecutionPolicy::Parallel) => process_queries(server, queries)?,
        _ => queries
            .iter()
            .map(|q| server.find_top_documents_with_policy(policy, q, |_, s, _| s == status))
            .collect::<docsearch::Result<Vec<_>>>()?,
    };

    let mut requests = RequestQueue::new(server);
    for (query, found) in queries.iter().zip(&results) {
        requests.record(found);
        println!("query: {query}");
        for (n, page) in paginate(found, page_size).iter().enumerate() {
            println!("page {}: {}", n + 1, serde_json::to_string_pretty(page.0)?);
        }
    }
    tracing::info!(queries = queries.len(), empty = requests.no_result_requests(), "queries finished");
    Ok(())
}

fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
}

fn load_documents(server: &mut SearchServer, input: &Path) -> Result<()> {
    log_duration!("load documents");
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            server
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("adding document {} from {}", doc.id, file.display()))?;
        }
    }
    tracing::info!(documents = server.document_count(), "documents loaded");
    Ok(())
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs: Vec<InputDoc> = match json {
        serde_json::Value::Array(arr) => arr.into_iter().map(serde_json::from_value).collect::<Result<_, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}
