//! Integration tests for the educational app directory
//!
//! These tests drive the public API end to end: loading a catalog from disk,
//! filtering it, requesting reviews from a mocked chat completion endpoint and
//! exporting reports.

use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use edu_app_directory::{
    catalog::{Catalog, CatalogError, Stage},
    config::Config,
    directory::{Directory, ReviewOutcome, ReviewState},
    i18n::Language,
    icon::{IconSource, IconStage, DEFAULT_FAVICON_SERVICE},
    review::{OpenAiReviewer, ReviewError, ReviewProvider},
};

// ==================== Test Helpers ====================

const CATALOG_JSON: &str = r#"[
  {
    "id": 10,
    "name": "Quizizz",
    "description": {
      "es": "Cuestionarios con memes para repasar en clase.",
      "eu": "Galdetegiak memeekin gelan errepasatzeko."
    },
    "category": "gamification",
    "targetAudience": "both",
    "stages": ["primary", "secondary"],
    "priceModel": "freemium",
    "website": "https://quizizz.com",
    "iconUrl": "https://quizizz.com/icon.png",
    "features": {
      "es": ["Cuestionarios", "Tareas"],
      "eu": ["Galdetegiak", "Etxeko lanak"]
    },
    "minAge": 13
  },
  {
    "id": 20,
    "name": "iDoceo",
    "description": {
      "es": "Cuaderno del profesor con calendario y evaluación.",
      "eu": "Irakaslearen koadernoa egutegiarekin eta ebaluazioarekin."
    },
    "category": "management",
    "targetAudience": "teacher",
    "stages": ["secondary", "upper-secondary", "vocational"],
    "priceModel": "paid",
    "website": "https://www.idoceo.net",
    "iconUrl": "",
    "features": {
      "es": ["Cuaderno", "Rúbricas"],
      "eu": ["Koadernoa", "Errubrikak"]
    }
  }
]"#;

/// Create a test config pointing the review client at a mock server
fn create_test_config(api_url: &str, temp_dir: &TempDir) -> Config {
    Config {
        catalog_path: None,
        openai_api_key: Some("test-openai-key".to_string()),
        openai_model: "gpt-4o-mini".to_string(),
        openai_api_url: api_url.to_string(),
        review_max_tokens: 1500,
        favicon_service_url: DEFAULT_FAVICON_SERVICE.to_string(),
        export_dir: temp_dir
            .path()
            .join("exports")
            .to_str()
            .unwrap()
            .to_string(),
        default_language: Language::SPANISH,
    }
}

fn load_test_catalog(temp_dir: &TempDir) -> Catalog {
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(&catalog_path, CATALOG_JSON).expect("Failed to write catalog");
    Catalog::load(&catalog_path).expect("Catalog should load")
}

fn review_content() -> String {
    serde_json::json!({
        "summary": "Cuestionarios rápidos y divertidos.",
        "teacherTip": "Úsalo como evaluación inicial.",
        "studentActivity": "Diseñar preguntas para otro grupo.",
        "pros": ["Motivador", "Gratis para empezar"],
        "cons": ["Anuncios en la versión gratuita"],
        "privacy": {
            "gdprCompliant": true,
            "dataCollected": "Alias y respuestas",
            "ageWarning": "Menores de 13 años con cuenta del centro",
            "complianceSummary": "Acuerdo de tratamiento de datos disponible"
        }
    })
    .to_string()
}

fn create_openai_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

async fn mount_review(mock_server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-openai-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response(content)))
        .mount(mock_server)
        .await;
}

// ==================== Catalog Loading ====================

#[test]
fn test_catalog_file_loads_and_filters() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = load_test_catalog(&temp_dir);
    let mut directory = Directory::new(catalog, Language::SPANISH, DEFAULT_FAVICON_SERVICE);

    assert_eq!(directory.visible_entries().len(), 2);

    // Basque description text is searchable from a Spanish session
    directory.selection_mut().set_query("KOADERNO");
    let names: Vec<_> = directory
        .visible_entries()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["iDoceo"]);

    directory.clear_filters();
    directory.selection_mut().toggle_stage(Stage::Primary);
    let names: Vec<_> = directory
        .visible_entries()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Quizizz"]);
}

#[test]
fn test_catalog_with_unknown_category_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        CATALOG_JSON.replace("\"management\"", "\"robotics\""),
    )
    .unwrap();

    let result = Catalog::load(&catalog_path);
    assert!(matches!(result, Err(CatalogError::Json(_))));
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Catalog::load(&temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn test_bundled_catalog_is_valid() {
    let catalog = Catalog::bundled().expect("Bundled catalog should be valid");
    assert!(!catalog.is_empty());
}

// ==================== Icon Chain ====================

#[test]
fn test_blank_icon_url_starts_at_favicon() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = load_test_catalog(&temp_dir);
    let mut directory = Directory::new(catalog, Language::SPANISH, DEFAULT_FAVICON_SERVICE);

    directory.open_entry(20).unwrap();
    let icon = directory.detail().unwrap().icon();

    assert!(matches!(icon.stage(), IconStage::Favicon { .. }));
    match icon.current() {
        IconSource::Remote(url) => assert!(url.contains("www.idoceo.net")),
        other => panic!("expected favicon url, got {:?}", other),
    }

    let favicon = directory.detail().unwrap().icon().token();
    assert!(directory.report_icon_failure(favicon));
    assert!(!directory.report_icon_failure(favicon));
    assert!(matches!(
        directory.detail().unwrap().icon().current(),
        IconSource::Placeholder(_)
    ));
}

// ==================== Review Flow ====================

#[tokio::test]
async fn test_review_flow_applies_and_exports() {
    let mock_server = MockServer::start().await;
    mount_review(&mock_server, &review_content()).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/v1/chat/completions", mock_server.uri()),
        &temp_dir,
    );
    let catalog = load_test_catalog(&temp_dir);
    let reviewer = OpenAiReviewer::new(reqwest::Client::new(), &config).unwrap();
    let mut directory = Directory::new(catalog, config.default_language, DEFAULT_FAVICON_SERVICE);

    let request = directory.open_entry(10).unwrap();
    let outcome = directory.run_review(&reviewer, request).await;
    assert_eq!(outcome, ReviewOutcome::Applied);

    let review = directory
        .detail()
        .unwrap()
        .review()
        .review()
        .expect("Review should be ready")
        .clone();
    assert_eq!(review.pros.len(), 2);
    assert!(review.privacy.gdpr_compliant);

    let report = directory.current_report().unwrap();
    assert!(report.has_review());
    let written = report
        .write_to(std::path::Path::new(&config.export_dir))
        .expect("Export should succeed");

    assert!(written.ends_with("Quizizz_report.txt"));
    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.contains("Cuestionarios rápidos y divertidos."));
    assert!(contents.contains("Cumple el RGPD"));
}

#[tokio::test]
async fn test_slow_review_for_previous_entry_is_discarded() {
    let mock_server = MockServer::start().await;
    mount_review(&mock_server, &review_content()).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/v1/chat/completions", mock_server.uri()),
        &temp_dir,
    );
    let catalog = load_test_catalog(&temp_dir);
    let reviewer = OpenAiReviewer::new(reqwest::Client::new(), &config).unwrap();
    let mut directory = Directory::new(catalog, Language::SPANISH, DEFAULT_FAVICON_SERVICE);

    let first = directory.open_entry(10).unwrap();
    let first_entry = directory.current_entry().unwrap().clone();

    // The user moves on before the first response arrives
    let second = directory.open_entry(20).unwrap();

    let late = reviewer.generate(&first_entry, first.language).await;
    assert!(late.is_ok());
    assert_eq!(
        directory.complete_review(first.token, late),
        ReviewOutcome::Discarded
    );

    let detail = directory.detail().unwrap();
    assert_eq!(detail.entry_id(), 20);
    assert_eq!(detail.token(), second.token);
    assert_eq!(detail.review(), &ReviewState::Loading);
}

#[tokio::test]
async fn test_review_api_error_is_scoped_to_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/v1/chat/completions", mock_server.uri()),
        &temp_dir,
    );
    let catalog = load_test_catalog(&temp_dir);
    let reviewer = OpenAiReviewer::new(reqwest::Client::new(), &config).unwrap();
    let mut directory = Directory::new(catalog, Language::BASQUE, DEFAULT_FAVICON_SERVICE);

    let request = directory.open_entry(10).unwrap();
    let entry = directory.current_entry().unwrap().clone();
    let result = reviewer.generate(&entry, request.language).await;
    assert!(matches!(result, Err(ReviewError::Api { status: 500, .. })));

    assert_eq!(
        directory.complete_review(request.token, result),
        ReviewOutcome::Applied
    );
    assert!(matches!(
        directory.detail().unwrap().review(),
        ReviewState::Failed(_)
    ));

    // The listing is unaffected and an entry-only report is still available
    assert_eq!(directory.visible_entries().len(), 2);
    let report = directory.current_report().unwrap();
    assert!(!report.has_review());
    assert!(report.render().contains("Galdetegiak"));
}

#[tokio::test]
async fn test_fenced_review_content_is_accepted() {
    let mock_server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", review_content());
    mount_review(&mock_server, &fenced).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/v1/chat/completions", mock_server.uri()),
        &temp_dir,
    );
    let catalog = load_test_catalog(&temp_dir);
    let reviewer = OpenAiReviewer::new(reqwest::Client::new(), &config).unwrap();

    let review = reviewer
        .review(catalog.get(10).unwrap(), Language::SPANISH)
        .await
        .expect("Fenced JSON should parse");
    assert_eq!(review.cons, vec!["Anuncios en la versión gratuita"]);
}

#[test]
fn test_reviewer_requires_api_key() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config("http://localhost:1", &temp_dir);
    config.openai_api_key = None;

    let err = OpenAiReviewer::new(reqwest::Client::new(), &config).unwrap_err();
    assert!(format!("{:#}", err).contains("OPENAI_API_KEY"));
}

// ==================== Export ====================

#[test]
fn test_entry_only_export_in_basque() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = load_test_catalog(&temp_dir);
    let mut directory = Directory::new(catalog, Language::SPANISH, DEFAULT_FAVICON_SERVICE);

    directory.open_entry(20).unwrap();
    directory.toggle_language();

    let report = directory.current_report().unwrap();
    let written = report.write_to(temp_dir.path()).unwrap();

    assert_eq!(
        written.file_name().unwrap().to_str().unwrap(),
        "iDoceo_report.txt"
    );
    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.contains("Irakaslearen koadernoa"));
    assert!(!contents.contains("Cuaderno del profesor"));
}
