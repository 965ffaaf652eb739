//! Integration tests for the resume matcher

use resume_matcher::config::{AnalysisConfig, OutputFormat};
use resume_matcher::input::InputManager;
use resume_matcher::output::{MatchReport, ReportContext, ReportGenerator};
use resume_matcher::processing::SkillSet;
use resume_matcher::{ResumeMatcherError, SkillMatcher, Vocabulary, WeightTable};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn set(items: &[&str]) -> SkillSet {
    items.iter().map(|s| s.to_string()).collect()
}

fn fixture_matcher(analysis: &AnalysisConfig) -> SkillMatcher {
    let vocabulary = Vocabulary::load(Path::new("tests/fixtures/known_skills.txt")).unwrap();
    SkillMatcher::from_config(analysis, Arc::new(vocabulary)).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_match_fixture_documents() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let matcher = fixture_matcher(&AnalysisConfig::default());
    let weights = WeightTable::load(Path::new("tests/fixtures/weights.toml")).unwrap();
    let result = matcher.match_texts(&resume, &job, &weights);

    assert_eq!(result.matched, set(&["aws", "docker", "python"]));
    assert_eq!(result.missing, set(&["kubernetes", "sql"]));
    assert_eq!(result.extra, set(&["git", "machine learning", "react"]));
    // (2 + 1 + 1) / (2 + 2 + 1 + 1 + 1)
    assert_eq!(result.score, 57.14);
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree() {
    let mut manager = InputManager::new();
    let txt = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let md = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    let matcher = fixture_matcher(&AnalysisConfig::default());
    assert_eq!(matcher.extract_skills(&txt), matcher.extract_skills(&md));
}

#[tokio::test]
async fn test_contact_details_in_document_yield_no_skills() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "Python developer").unwrap();
    writeln!(file, "Contact: dev.sql@kubernetes.io").unwrap();
    writeln!(file, "Portfolio: www.docker.com/jane and python-3.10 notes").unwrap();

    let text = InputManager::new().extract_text(file.path()).await.unwrap();
    for analysis in [AnalysisConfig::default(), AnalysisConfig::token_only()] {
        assert_eq!(fixture_matcher(&analysis).extract_skills(&text), set(&["python"]));
    }
}

#[test]
fn test_token_only_loses_multi_word_skills() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let skills = fixture_matcher(&AnalysisConfig::token_only()).extract_skills(&text);

    assert!(skills.contains("python"));
    assert!(!skills.contains("machine learning"));
}

#[test]
fn test_missing_vocabulary_is_fatal() {
    let err = Vocabulary::load(Path::new("tests/fixtures/no_such_vocabulary.txt")).unwrap_err();
    assert!(matches!(err, ResumeMatcherError::VocabularyNotFound(_)));
}

#[test]
fn test_json_weights_from_tempfile() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"sql": 3, "python": 1}}"#).unwrap();

    let weights = WeightTable::load(file.path()).unwrap();
    assert_eq!(weights.weight("sql"), 3.0);
    assert_eq!(weights.weight("docker"), 1.0);
}

#[test]
fn test_markdown_report_end_to_end() {
    let matcher = fixture_matcher(&AnalysisConfig::default());
    let weights = WeightTable::default();
    let job = "Python and SQL, Kubernetes a plus";
    let result = matcher.match_texts("Python and Docker", job, &weights);

    let report = MatchReport::build(
        result,
        &weights,
        job,
        ReportContext {
            resume_file: "cv.txt".to_string(),
            job_file: "inline".to_string(),
            vocabulary_size: matcher.vocabulary().len(),
            strategy: matcher.strategy(),
        },
    );
    let markdown = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&report, &OutputFormat::Markdown)
        .unwrap();

    assert!(markdown.contains("- Match Score: 33.33%"));
    assert!(markdown.contains("**Python** and _SQL_, _Kubernetes_ a plus"));
    assert!(markdown.contains("Consider strengthening your experience or wording related to: kubernetes"));
}
