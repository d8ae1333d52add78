use studymate_core::language::Language;
use studymate_core::quiz::Quiz;
use studymate_interaction::config::load_api_config_from;
use tempfile::TempDir;

#[test]
fn test_quiz_wire_shape_deserializes() {
    let payload = r#"{
        "questions": [
            {
                "question": "What does a page generation counter guard against?",
                "options": {
                    "A": "Slow rendering",
                    "B": "Stale async completions",
                    "C": "Large uploads",
                    "D": "Duplicate logins"
                },
                "correct_answer": "B",
                "explanation": "Responses for a page that is no longer current are dropped."
            },
            {
                "question": "How many options does each question carry?",
                "options": {"A": "Two", "B": "Three", "C": "Four", "D": "Five"},
                "correct_answer": "C"
            }
        ]
    }"#;

    let quiz: Quiz = serde_json::from_str(payload).expect("quiz should deserialize");
    assert_eq!(quiz.questions.len(), 2);
    assert_eq!(quiz.questions[0].correct_answer, "B");
    assert!(quiz.questions[1].explanation.is_none());
    assert!(quiz.validate(2).is_ok());
}

#[test]
fn test_quiz_missing_questions_is_rejected() {
    // The backend wraps parse failures as {"error": ..., "raw_response": ...}
    // inside the quiz field; that shape must not deserialize as a Quiz.
    let payload = r#"{"error": "Failed to parse quiz", "raw_response": "```json"}"#;
    assert!(serde_json::from_str::<Quiz>(payload).is_err());
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"base_url": "http://studymate.internal:8080", "language": "hindi"}"#,
    )
    .unwrap();

    let config = load_api_config_from(&config_path).expect("config should load");
    assert_eq!(
        config.base_url.as_deref(),
        Some("http://studymate.internal:8080")
    );
    assert_eq!(config.language, Some(Language::Hindi));
}

#[test]
fn test_config_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("missing.json");
    assert!(load_api_config_from(&config_path).is_err());
}

#[test]
fn test_config_tolerates_partial_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{}"#).unwrap();

    let config = load_api_config_from(&config_path).expect("empty object should load");
    assert!(config.base_url.is_none());
    assert!(config.language.is_none());
}
