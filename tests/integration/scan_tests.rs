//! Scanning and aggregation against a mock scan engine

use a11y_sweep::config::EnhancementConfig;
use a11y_sweep::output::{aggregate, write_json_report, ScanReport};
use a11y_sweep::scan::{
    execute_scans, HttpEnhancer, HttpScanEngine, Impact, RiskLevel, ScanEngine, ScanRequest,
    ScanSettings,
};
use a11y_sweep::{EngineError, ScanStatus};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITE: &str = "https://shop.example.com";

fn engine(server: &MockServer) -> HttpScanEngine {
    HttpScanEngine::new(&server.uri(), Duration::from_secs(5)).expect("Failed to create engine")
}

fn request(url: &str) -> ScanRequest {
    ScanRequest {
        url: url.to_string(),
        wcag_level: "AA".to_string(),
        include_best_practices: true,
        include_experimental: false,
        custom_headers: BTreeMap::new(),
        user_agent: "a11y-sweep/test".to_string(),
    }
}

async fn mount_scan(server: &MockServer, page_url: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/scan"))
        .and(body_partial_json(json!({ "url": page_url })))
        .respond_with(response)
        .mount(server)
        .await;
}

fn completed_body() -> serde_json::Value {
    json!({
        "status": "completed",
        "violations": [{
            "id": "image-alt",
            "impact": "critical",
            "help": "Images must have alternate text",
            "nodes": [{ "target": ["img.hero"], "html": "<img class=\"hero\">" }]
        }],
        "passes": [{ "id": "document-title" }, { "id": "html-has-lang" }, { "id": "bypass" }],
        "incomplete": [{ "id": "color-contrast" }]
    })
}

#[tokio::test]
async fn test_engine_scan_success() {
    let server = MockServer::start().await;
    mount_scan(
        &server,
        "https://shop.example.com/",
        ResponseTemplate::new(200).set_body_json(completed_body()),
    )
    .await;

    let response = engine(&server)
        .scan(&request("https://shop.example.com/"))
        .await
        .expect("Scan failed");

    assert_eq!(response.violations.len(), 1);
    assert_eq!(response.passes.len(), 3);
    assert_eq!(response.incomplete.len(), 1);
}

#[tokio::test]
async fn test_engine_http_error() {
    let server = MockServer::start().await;
    mount_scan(
        &server,
        "https://shop.example.com/",
        ResponseTemplate::new(500).set_body_string("browser crashed"),
    )
    .await;

    let error = engine(&server)
        .scan(&request("https://shop.example.com/"))
        .await
        .unwrap_err();

    match error {
        EngineError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "browser crashed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_engine_rejected_status() {
    let server = MockServer::start().await;
    mount_scan(
        &server,
        "https://shop.example.com/",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "status": "failed", "error": "navigation timeout" })),
    )
    .await;

    let error = engine(&server)
        .scan(&request("https://shop.example.com/"))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        EngineError::Rejected { ref status, ref message }
            if status == "failed" && message == "navigation timeout"
    ));
}

#[tokio::test]
async fn test_engine_timeout() {
    let server = MockServer::start().await;
    mount_scan(
        &server,
        "https://shop.example.com/",
        ResponseTemplate::new(200)
            .set_body_json(completed_body())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let engine = HttpScanEngine::new(&server.uri(), Duration::from_secs(1)).unwrap();
    let error = engine
        .scan(&request("https://shop.example.com/"))
        .await
        .unwrap_err();

    assert!(matches!(error, EngineError::Timeout { seconds: 1 }));
}

#[tokio::test]
async fn test_engine_health_check() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&healthy)
        .await;
    assert!(engine(&healthy).health_check().await.is_ok());

    let unhealthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&unhealthy)
        .await;
    assert!(matches!(
        engine(&unhealthy).health_check().await,
        Err(EngineError::Http { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_scan_run_end_to_end() {
    let server = MockServer::start().await;
    mount_scan(
        &server,
        "https://shop.example.com/",
        ResponseTemplate::new(200).set_body_json(completed_body()),
    )
    .await;
    mount_scan(
        &server,
        "https://shop.example.com/checkout",
        ResponseTemplate::new(502).set_body_string("upstream unavailable"),
    )
    .await;
    mount_scan(
        &server,
        "https://shop.example.com/about",
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "score": 92,
            "violations": [{
                "id": "color-contrast",
                "impact": "serious",
                "nodes": [{ "target": ["a.muted"] }, { "target": ["p.note"] }]
            }],
            "passes": []
        })),
    )
    .await;

    let pages = vec![
        "/".to_string(),
        "/checkout".to_string(),
        "/about".to_string(),
    ];
    let base = Url::parse(SITE).unwrap();
    let results = execute_scans(&engine(&server), &base, &pages, &ScanSettings::default(), None).await;

    assert_eq!(results.len(), 3);

    // 3 passes + 1 critical node: max 16, weighted 4
    assert_eq!(results[0].status, ScanStatus::Completed);
    assert_eq!(results[0].score, Some(75));
    assert_eq!(results[0].incomplete_count, 1);
    assert_eq!(results[0].violations[0].node_samples, vec!["img.hero"]);

    assert_eq!(results[1].status, ScanStatus::Failed);
    assert!(results[1].error.as_deref().unwrap().contains("upstream unavailable"));

    assert_eq!(results[2].score, Some(92));

    let report = aggregate(&results);
    assert_eq!(report.total_scans, 3);
    assert_eq!(report.completed_scans, 2);
    assert_eq!(report.failed_scans, 1);
    assert_eq!(report.overall_score, 84);
    assert_eq!(report.total_violations, 2);
    assert_eq!(report.total_passes, 3);
    assert_eq!(report.violations_by_severity[&Impact::Critical], 1);
    assert_eq!(report.violations_by_severity[&Impact::Serious], 2);
    assert!(!report.has_enhanced_analysis);

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("a11y-report.json");
    let scan_report = ScanReport::new(SITE, "0123456789abcdef", "paths", report);
    write_json_report(&scan_report, &report_path).expect("Failed to write report");

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written["overallScore"], 84);
    assert_eq!(written["pages"][1]["status"], "failed");
    assert_eq!(written["violationsBySeverity"]["serious"], 2);
}

#[tokio::test]
async fn test_enhancer_annotates_completed_pages() {
    let engine_server = MockServer::start().await;
    mount_scan(
        &engine_server,
        "https://shop.example.com/",
        ResponseTemplate::new(200).set_body_json(completed_body()),
    )
    .await;

    let enhance_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enhancedScore": 71.6,
            "businessImpact": {
                "riskLevel": "high",
                "estimatedCost": { "min": 400, "max": 900 },
                "businessAreas": ["checkout"]
            },
            "remediation": {
                "quickFixes": 2,
                "mediumFixes": 1,
                "complexFixes": 0,
                "priority1": [{ "title": "Add alt text", "description": "Hero image", "effort": "quick" }]
            }
        })))
        .expect(1)
        .mount(&enhance_server)
        .await;

    let enhancer = HttpEnhancer::new(&EnhancementConfig {
        api_url: enhance_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    })
    .unwrap();

    let base = Url::parse(SITE).unwrap();
    let results = execute_scans(
        &engine(&engine_server),
        &base,
        &["/".to_string()],
        &ScanSettings::default(),
        Some(&enhancer),
    )
    .await;

    let report = aggregate(&results);
    assert!(report.has_enhanced_analysis);
    assert_eq!(report.pages[0].enhanced_score, Some(72));

    let impact = report.business_impact.unwrap();
    assert_eq!(impact.overall_risk, RiskLevel::High);
    assert_eq!(impact.pages_at_risk, 1);
    assert_eq!(impact.top_business_areas, vec!["checkout"]);

    let plan = report.remediation_plan.unwrap();
    assert!((plan.estimated_total_hours - 5.0).abs() < f64::EPSILON);
    assert_eq!(plan.top_priority1_issues.len(), 1);
}

#[tokio::test]
async fn test_enhancer_failure_is_soft() {
    let engine_server = MockServer::start().await;
    mount_scan(
        &engine_server,
        "https://shop.example.com/",
        ResponseTemplate::new(200).set_body_json(completed_body()),
    )
    .await;

    let enhance_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&enhance_server)
        .await;

    let enhancer = HttpEnhancer::new(&EnhancementConfig {
        api_url: enhance_server.uri(),
        api_key: None,
        timeout_secs: 5,
    })
    .unwrap();

    let base = Url::parse(SITE).unwrap();
    let results = execute_scans(
        &engine(&engine_server),
        &base,
        &["/".to_string()],
        &ScanSettings::default(),
        Some(&enhancer),
    )
    .await;

    assert!(results[0].is_completed());
    assert!(results[0].enhanced_analysis.is_none());
    assert!(!aggregate(&results).has_enhanced_analysis);
}

#[tokio::test]
async fn test_services_mounted_under_path_prefix() {
    let engine_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a11y/api/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed_body()))
        .expect(1)
        .mount(&engine_server)
        .await;

    let enhance_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "enhancedScore": 80 })))
        .expect(1)
        .mount(&enhance_server)
        .await;

    let engine = HttpScanEngine::new(
        &format!("{}/a11y", engine_server.uri()),
        Duration::from_secs(5),
    )
    .unwrap();
    let enhancer = HttpEnhancer::new(&EnhancementConfig {
        api_url: format!("{}/v2", enhance_server.uri()),
        api_key: None,
        timeout_secs: 5,
    })
    .unwrap();

    let base = Url::parse(SITE).unwrap();
    let results = execute_scans(
        &engine,
        &base,
        &["/".to_string()],
        &ScanSettings::default(),
        Some(&enhancer),
    )
    .await;

    assert!(results[0].is_completed());
    assert!(results[0].enhanced_analysis.is_some());
}
