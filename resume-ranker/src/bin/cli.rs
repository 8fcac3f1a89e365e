use anyhow::Context;
use clap::{Parser, Subcommand};
use resume_ranker::sources::{read_text, DirectorySource, DocumentSource, FileSource, SourceDocument};
use resume_ranker::{extract, RankerConfig, RankingEngine, RankingResponse};
use std::path::PathBuf;
use tfidf_model::{TfidfModel, TfidfOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Job description file
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (.txt)
        resumes: Vec<PathBuf>,

        /// Directory of resumes, ranked in file-name order
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Fitted model (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Show only the best N candidates
        #[arg(short, long)]
        top: Option<usize>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fit a TF-IDF model on a corpus of documents
    Fit {
        /// Corpus files (.txt)
        corpus: Vec<PathBuf>,

        /// Directory of corpus documents
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output model path
        #[arg(short, long, default_value = "vectorizer.json")]
        output: PathBuf,

        /// Largest n-gram size
        #[arg(long, default_value = "1")]
        ngram_max: usize,

        /// Use 1 + ln(tf) term frequency
        #[arg(long)]
        sublinear_tf: bool,

        /// Keep only the most frequent terms
        #[arg(long)]
        max_features: Option<usize>,
    },

    /// Show the skills detected in a document
    Skills {
        /// Document file
        file: PathBuf,
    },
}

async fn fetch_documents(files: Vec<PathBuf>, dir: Option<PathBuf>) -> anyhow::Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();
    if let Some(dir) = dir {
        documents.extend(DirectorySource::new(dir).fetch().await?);
    }
    if !files.is_empty() {
        documents.extend(FileSource::new(files).fetch().await?);
    }
    Ok(documents)
}

fn print_ranking(response: &RankingResponse, top: Option<usize>) {
    println!("\n📊 Ranking vs Job Description");

    if let Some(best) = response.top() {
        println!(
            "   Top match: {} (Final Score: {:.3}, Text Match: {:.3}, Skills Match: {:.1}%)",
            best.candidate_id,
            best.final_score,
            best.text_score,
            best.skills_percent()
        );
    }

    let shown = top.unwrap_or(response.records.len());
    for (i, record) in response.records.iter().take(shown).enumerate() {
        println!("\n#{} {}", i + 1, record.candidate_id);
        println!(
            "   Final Score: {:.3} • Text Match: {:.3} • Skills Match: {:.1}%",
            record.final_score,
            record.text_score,
            record.skills_percent()
        );

        let matched: Vec<&str> = record.matched_skills.iter().collect();
        println!(
            "   Matched Skills: {}",
            if matched.is_empty() { "None".to_string() } else { matched.join(", ") }
        );

        if response.query_skills.is_empty() {
            println!("   Missing Skills: No skills detected in job description");
        } else {
            let missing: Vec<&str> = record.missing_skills.iter().collect();
            println!(
                "   Missing Skills: {}",
                if missing.is_empty() { "None".to_string() } else { missing.join(", ") }
            );
        }
    }

    println!(
        "\n   Ranked {} candidates in {:.2}ms ({} / {})",
        response.records.len(),
        response.latency_ms,
        response.strategy,
        response.model
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "resume_ranker=info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RankerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RankerConfig::default(),
    }
    .apply_env()?;

    match cli.command {
        Commands::Rank { job, resumes, dir, model, top, json } => {
            let mut config = config;
            if let Some(model) = model {
                config.model_path = model;
            }
            tracing::debug!("Config: {}", config);

            let engine = RankingEngine::from_config(&config)?;

            let job_text = read_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?;
            let documents = fetch_documents(resumes, dir).await?;

            let response = engine.rank_documents(job_text, documents)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_ranking(&response, top);
            }
        }

        Commands::Fit { corpus, dir, output, ngram_max, sublinear_tf, max_features } => {
            let documents = fetch_documents(corpus, dir).await?;
            let texts: Vec<String> = documents
                .into_iter()
                .map(|doc| doc.text)
                .filter(|text| !text.trim().is_empty())
                .collect();

            println!("🧮 Fitting TF-IDF model on {} documents...", texts.len());

            let options = TfidfOptions {
                ngram_max,
                sublinear_tf,
                max_features,
                ..TfidfOptions::default()
            };
            let model = TfidfModel::fit(&texts, options)?;
            model.save(&output)?;

            println!(
                "✅ Saved {} ({} terms)",
                output.display(),
                model.vocabulary_len()
            );
        }

        Commands::Skills { file } => {
            let text = read_text(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let skills = extract(&text, &config.vocabulary()?);

            println!("🔍 {} skills in {}:", skills.len(), file.display());
            for skill in skills.iter() {
                println!("   - {}", skill);
            }
        }
    }

    Ok(())
}
