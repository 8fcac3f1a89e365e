mod common;

use common::tfidf;
use proptest::prelude::*;
use resume_ranker::{CandidateDocument, EngineOptions, RankingEngine, Vocabulary, Weights};

const WORDS: &[&str] = &[
    "python", "sql", "docker", "java", "rust", "aws", "pandas", "team", "reporting",
    "engineer", "developer", "experience", "with", "and", "go", "REST", "Kubernetes",
];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(|words| words.join(" "))
}

fn engine() -> RankingEngine {
    RankingEngine::new(tfidf(), Vocabulary::builtin(), Weights::default())
        .unwrap()
        .with_options(EngineOptions {
            parallel: true,
            min_parallel_candidates: 2,
        })
}

fn candidates(engine: &RankingEngine, texts: &[String]) -> Vec<CandidateDocument> {
    texts
        .iter()
        .enumerate()
        .filter_map(|(i, text)| engine.candidate_document(format!("{}.txt", i), text.clone()))
        .collect()
}

proptest! {
    #[test]
    fn ranking_is_deterministic(
        query in text_strategy(),
        texts in prop::collection::vec(text_strategy(), 1..10),
    ) {
        let engine = engine();
        let query = engine.query_document(query);
        let candidates = candidates(&engine, &texts);
        prop_assume!(!query.is_blank() && !candidates.is_empty());

        let first = engine.rank(&query, &candidates).unwrap();
        let second = engine.rank(&query, &candidates).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scores_bounded_and_combined_exactly(
        query in text_strategy(),
        texts in prop::collection::vec(text_strategy(), 1..10),
    ) {
        let engine = engine();
        let weights = Weights::default();
        let query = engine.query_document(query);
        let candidates = candidates(&engine, &texts);
        prop_assume!(!query.is_blank() && !candidates.is_empty());

        let records = engine.rank(&query, &candidates).unwrap();
        prop_assert_eq!(records.len(), candidates.len());

        for record in &records {
            prop_assert!((0.0..=1.0).contains(&record.text_score));
            prop_assert!((0.0..=1.0).contains(&record.skills_score));
            prop_assert_eq!(
                record.final_score,
                weights.text * record.text_score + weights.skill * record.skills_score
            );
        }
        for pair in records.windows(2) {
            prop_assert!(pair[0].final_score >= pair[1].final_score);
        }
    }

    #[test]
    fn matched_and_missing_partition_query_skills(
        query in text_strategy(),
        texts in prop::collection::vec(text_strategy(), 1..10),
    ) {
        let engine = engine();
        let query = engine.query_document(query);
        let candidates = candidates(&engine, &texts);
        prop_assume!(!query.is_blank() && !candidates.is_empty());

        for record in engine.rank(&query, &candidates).unwrap() {
            let candidate = candidates
                .iter()
                .find(|c| c.id() == record.candidate_id)
                .unwrap();

            prop_assert_eq!(&record.matched_skills, &query.skills().intersection(candidate.skills()));
            prop_assert_eq!(&record.missing_skills, &query.skills().difference(candidate.skills()));
            prop_assert!(record.matched_skills.intersection(&record.missing_skills).is_empty());
            prop_assert_eq!(
                record.matched_skills.len() + record.missing_skills.len(),
                query.skills().len()
            );
        }
    }

    #[test]
    fn duplicate_candidates_keep_input_order(
        query in text_strategy(),
        text in text_strategy(),
        copies in 2usize..6,
    ) {
        let engine = engine();
        let query = engine.query_document(query);
        let texts = vec![text; copies];
        let candidates = candidates(&engine, &texts);
        prop_assume!(!query.is_blank() && !candidates.is_empty());

        let records = engine.rank(&query, &candidates).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.candidate_id.as_str()).collect();
        let expected: Vec<String> = (0..copies).map(|i| format!("{}.txt", i)).collect();
        prop_assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
