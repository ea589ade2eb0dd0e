use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use trendscope_core::config::{AppConfig, LoadOptions};

use crate::commands::{CommandResult, EXIT_SMOKE_FAILED};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    base_url: String,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

type Expectation = fn(&Value) -> Result<(), String>;

struct Probe {
    name: &'static str,
    method: Method,
    path: &'static str,
    body: Option<Value>,
    expected_status: StatusCode,
    expect: Expectation,
}

/// Walks the public API in the order an operator would: status, listings,
/// lookups, both analyze outcomes, then a negative lookup.
fn probes() -> Vec<Probe> {
    vec![
        probe("api_status", Method::GET, "/api/status", None, StatusCode::OK, expect_success),
        probe("regions", Method::GET, "/api/regions", None, StatusCode::OK, expect_regions),
        probe("categories", Method::GET, "/api/categories", None, StatusCode::OK, expect_categories),
        probe(
            "trends_united_states",
            Method::GET,
            "/api/trends/united-states",
            None,
            StatusCode::OK,
            expect_region_trends,
        ),
        probe(
            "trends_united_states_technology",
            Method::GET,
            "/api/trends/united-states/technology",
            None,
            StatusCode::OK,
            expect_products,
        ),
        probe(
            "analyze_trending_product",
            Method::POST,
            "/api/analyze-opportunity",
            Some(json!({
                "region": "united-states",
                "product": "AI-powered devices",
                "category": "technology"
            })),
            StatusCode::OK,
            expect_trending,
        ),
        probe(
            "analyze_non_trending_product",
            Method::POST,
            "/api/analyze-opportunity",
            Some(json!({
                "region": "united-states",
                "product": "vhs player",
                "category": "technology"
            })),
            StatusCode::OK,
            expect_not_trending,
        ),
        probe(
            "trends_europe",
            Method::GET,
            "/api/trends/europe",
            None,
            StatusCode::OK,
            expect_region_trends,
        ),
        probe(
            "trends_asia_finance",
            Method::GET,
            "/api/trends/asia/finance",
            None,
            StatusCode::OK,
            expect_products,
        ),
        probe(
            "unknown_region_rejected",
            Method::GET,
            "/api/trends/atlantis",
            None,
            StatusCode::NOT_FOUND,
            expect_failure,
        ),
    ]
}

pub fn run(base_url: Option<&str>) -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    let base_url = match base_url {
        Some(base_url) => base_url.trim_end_matches('/').to_string(),
        None => match timed_check(|| AppConfig::load(LoadOptions::default())) {
            Ok((elapsed_ms, config)) => {
                checks.push(SmokeCheck {
                    name: "config_validation",
                    status: SmokeStatus::Pass,
                    elapsed_ms,
                    message: "configuration loaded and validated".to_string(),
                });
                config.server.base_url()
            }
            Err((elapsed_ms, error)) => {
                checks.push(SmokeCheck {
                    name: "config_validation",
                    status: SmokeStatus::Fail,
                    elapsed_ms,
                    message: error.to_string(),
                });
                checks.extend(probes().iter().map(|probe| skipped(probe.name)));
                return finalize_report(String::new(), checks, elapsed_since(started));
            }
        },
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            checks.push(SmokeCheck {
                name: "runtime",
                status: SmokeStatus::Fail,
                elapsed_ms: 0,
                message: format!("failed to initialize async runtime: {error}"),
            });
            return finalize_report(base_url, checks, elapsed_since(started));
        }
    };

    let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(error) => {
            checks.push(SmokeCheck {
                name: "http_client",
                status: SmokeStatus::Fail,
                elapsed_ms: 0,
                message: format!("failed to build http client: {error}"),
            });
            return finalize_report(base_url, checks, elapsed_since(started));
        }
    };

    let mut reachable = true;
    for probe in probes() {
        if !reachable {
            checks.push(skipped(probe.name));
            continue;
        }

        let check = runtime.block_on(execute(&client, &base_url, &probe));
        // An unreachable status endpoint means nothing else can pass.
        if probe.name == "api_status" && check.status == SmokeStatus::Fail {
            reachable = false;
        }
        checks.push(check);
    }

    finalize_report(base_url, checks, elapsed_since(started))
}

async fn execute(client: &Client, base_url: &str, probe: &Probe) -> SmokeCheck {
    let started = Instant::now();
    let mut request = client.request(probe.method.clone(), format!("{base_url}{}", probe.path));
    if let Some(body) = &probe.body {
        request = request.json(body);
    }

    let outcome = async {
        let response = request.send().await.map_err(|error| format!("request failed: {error}"))?;
        let status = response.status();
        let payload = response
            .json::<Value>()
            .await
            .map_err(|error| format!("response was not JSON: {error}"))?;

        if status != probe.expected_status {
            return Err(format!("expected HTTP {}, got {status}: {payload}", probe.expected_status));
        }
        (probe.expect)(&payload)?;
        Ok(format!("{} {} -> {status}", probe.method, probe.path))
    }
    .await;

    let elapsed_ms = elapsed_since(started);
    match outcome {
        Ok(message) => SmokeCheck { name: probe.name, status: SmokeStatus::Pass, elapsed_ms, message },
        Err(message) => SmokeCheck { name: probe.name, status: SmokeStatus::Fail, elapsed_ms, message },
    }
}

fn probe(
    name: &'static str,
    method: Method,
    path: &'static str,
    body: Option<Value>,
    expected_status: StatusCode,
    expect: Expectation,
) -> Probe {
    Probe { name, method, path, body, expected_status, expect }
}

fn expect_success(payload: &Value) -> Result<(), String> {
    if payload["success"] == true && payload["timestamp"].is_string() {
        Ok(())
    } else {
        Err(format!("expected success with timestamp, got {payload}"))
    }
}

fn expect_failure(payload: &Value) -> Result<(), String> {
    if payload["success"] == false && payload["message"].is_string() {
        Ok(())
    } else {
        Err(format!("expected structured failure, got {payload}"))
    }
}

fn expect_non_empty_array(payload: &Value, key: &str) -> Result<(), String> {
    expect_success(payload)?;
    match payload[key].as_array() {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err(format!("expected non-empty `{key}` array, got {payload}")),
    }
}

fn expect_regions(payload: &Value) -> Result<(), String> {
    expect_non_empty_array(payload, "regions")
}

fn expect_categories(payload: &Value) -> Result<(), String> {
    expect_non_empty_array(payload, "categories")?;
    let count = payload["categories"].as_array().map(Vec::len).unwrap_or_default();
    if count == 5 {
        Ok(())
    } else {
        Err(format!("expected 5 categories, got {count}"))
    }
}

fn expect_products(payload: &Value) -> Result<(), String> {
    expect_non_empty_array(payload, "products")
}

fn expect_region_trends(payload: &Value) -> Result<(), String> {
    expect_success(payload)?;
    match payload["trends"].as_object() {
        Some(trends) if !trends.is_empty() => Ok(()),
        _ => Err(format!("expected a `trends` object, got {payload}")),
    }
}

fn expect_analysis(payload: &Value, trending: bool, score: u64) -> Result<(), String> {
    let analysis = &payload["analysis"];
    if payload["success"] == true
        && analysis["isTrending"] == trending
        && analysis["opportunityScore"] == score
    {
        Ok(())
    } else {
        Err(format!("expected isTrending={trending} with score {score}, got {payload}"))
    }
}

fn expect_trending(payload: &Value) -> Result<(), String> {
    expect_analysis(payload, true, 85)
}

fn expect_not_trending(payload: &Value) -> Result<(), String> {
    expect_analysis(payload, false, 45)
}

fn timed_check<T, E>(check: impl FnOnce() -> Result<T, E>) -> Result<(u64, T), (u64, E)> {
    let started = Instant::now();
    match check() {
        Ok(value) => Ok((elapsed_since(started), value)),
        Err(error) => Err((elapsed_since(started), error)),
    }
}

fn elapsed_since(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn skipped(name: &'static str) -> SmokeCheck {
    SmokeCheck {
        name,
        status: SmokeStatus::Skipped,
        elapsed_ms: 0,
        message: "skipped due previous failure".to_string(),
    }
}

fn finalize_report(
    base_url: String,
    checks: Vec<SmokeCheck>,
    total_elapsed_ms: u64,
) -> CommandResult {
    let passed = checks.iter().filter(|check| check.status == SmokeStatus::Pass).count();
    let total = checks.len();
    let failed = checks.iter().any(|check| check.status == SmokeStatus::Fail);

    let report = SmokeReport {
        command: "smoke",
        base_url,
        status: if failed { SmokeStatus::Fail } else { SmokeStatus::Pass },
        summary: format!("smoke: {passed}/{total} checks passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        checks,
    };

    let human = report.summary.clone();
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"smoke\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult {
        exit_code: if failed { EXIT_SMOKE_FAILED } else { 0 },
        output: format!("{human}\n{machine}"),
    }
}
