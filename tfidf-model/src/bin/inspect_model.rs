/*!
Inspect a fitted model - vocabulary stats and the top-weighted terms of a text.

Usage: inspect_model <model.json> [text...]
*/

use tfidf_model::TfidfModel;

fn main() -> tfidf_model::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(model_path) = args.first() else {
        eprintln!("usage: inspect_model <model.json> [text...]");
        std::process::exit(2);
    };

    let model = TfidfModel::load(model_path)?;

    println!("🔍 Model: {}", model_path);
    println!("   Vocabulary: {} terms", model.vocabulary_len());
    println!("   Fitted on: {} documents", model.document_count());
    println!("   N-grams: 1..={}", model.options().ngram_max);

    let text = args[1..].join(" ");
    if text.is_empty() {
        return Ok(());
    }

    let vector = model.transform(&text);
    println!("\n📋 Top terms ({} of {} known):", vector.len().min(10), vector.len());
    for (i, (term, weight)) in model.top_terms(&vector, 10).iter().enumerate() {
        println!("  {}. {:<24} {:.4}", i + 1, term, weight);
    }

    Ok(())
}
