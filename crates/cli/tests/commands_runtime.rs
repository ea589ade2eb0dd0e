use std::env;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Mutex, OnceLock, PoisonError};
use std::thread;

use serde_json::Value;
use trendscope_cli::commands::{analyze, catalog, config, smoke};
use trendscope_core::TrendCatalog;
use trendscope_server::{app, serve, AppState};

#[test]
fn regions_lists_reference_catalog_in_order() {
    with_env(&[], || {
        let result = catalog::regions();
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "regions");
        assert_eq!(payload["status"], "ok");
        assert_eq!(
            payload["data"],
            serde_json::json!(["united-states", "canada", "europe", "australia", "asia"])
        );
    });
}

#[test]
fn trends_returns_region_and_category_payloads() {
    with_env(&[], || {
        let region = parse_payload(&catalog::trends("Europe", None).output);
        assert_eq!(region["status"], "ok");
        assert_eq!(region["data"]["region"], "Europe");
        assert_eq!(region["data"]["trends"]["fashion"][0], "luxury brands");

        let category = parse_payload(&catalog::trends("asia", Some("FINANCE")).output);
        assert_eq!(category["data"]["category"], "FINANCE");
        assert!(category["data"]["products"].as_array().is_some_and(|items| !items.is_empty()));
    });
}

#[test]
fn trends_reports_not_found_with_available_regions() {
    with_env(&[], || {
        let result = catalog::trends("atlantis", None);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "not_found");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("united-states, canada, europe, australia, asia"), "{message}");

        let missing_category = catalog::trends("canada", Some("toys"));
        assert_eq!(missing_category.exit_code, 4);
    });
}

#[test]
fn analyze_scores_trending_and_validates_input() {
    with_env(&[], || {
        let trending = analyze::run("united-states", "technology", "AI-powered devices");
        assert_eq!(trending.exit_code, 0);
        let payload = parse_payload(&trending.output);
        assert_eq!(payload["data"]["isTrending"], true);
        assert_eq!(payload["data"]["opportunityScore"], 85);

        let invalid = analyze::run("united-states", "technology", "");
        assert_eq!(invalid.exit_code, 5);
        assert_eq!(parse_payload(&invalid.output)["error_class"], "validation");

        let unsupported = analyze::run("atlantis", "technology", "submarines");
        assert_eq!(unsupported.exit_code, 4);
        assert_eq!(parse_payload(&unsupported.output)["error_class"], "not_found");
    });
}

#[test]
fn catalog_path_override_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trends.toml");
    std::fs::write(
        &path,
        r#"
[[regions]]
id = "nordics"

[[regions.categories]]
id = "home"
trends = ["sauna kits"]
"#,
    )
    .expect("write catalog");
    let path = path.display().to_string();

    with_env(&[("TRENDSCOPE_CATALOG_PATH", path.as_str())], || {
        let payload = parse_payload(&catalog::regions().output);
        assert_eq!(payload["data"], serde_json::json!(["nordics"]));
    });

    with_env(&[("TRENDSCOPE_CATALOG_PATH", "/nonexistent/trends.toml")], || {
        let result = catalog::regions();
        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "catalog_load");
    });
}

#[test]
fn invalid_config_maps_to_config_exit_code() {
    with_env(&[("TRENDSCOPE_SERVER_PORT", "not-a-port")], || {
        let result = catalog::regions();
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn config_reports_env_sources() {
    with_env(&[("TRENDSCOPE_SERVER_PORT", "4100")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);
        let output = result.output;

        assert!(output.contains("- server.port = 4100 (source: env (TRENDSCOPE_SERVER_PORT))"));
        assert!(output.contains("- server.bind_address = 0.0.0.0 (source: default)"));
        assert!(output.contains("catalog.path = <embedded reference data>"));
    });
}

#[test]
fn config_reports_validation_failure_with_config_exit_code() {
    with_env(&[("TRENDSCOPE_LOGGING_LEVEL", "verbose")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn env_is_restored_after_a_failing_command_test() {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        with_env(&[("TRENDSCOPE_TEST_RESTORE_MARKER", "set")], || {
            panic!("simulated assertion failure");
        });
    }));
    assert!(outcome.is_err());
    assert!(env::var("TRENDSCOPE_TEST_RESTORE_MARKER").is_err());

    with_env(&[], || {
        assert_eq!(catalog::regions().exit_code, 0);
    });
}

#[test]
fn smoke_fails_when_server_is_unreachable() {
    with_env(&[], || {
        let result = smoke::run(Some("http://127.0.0.1:9"));
        assert_eq!(result.exit_code, 6);

        let report = parse_payload(last_line(&result.output));
        assert_eq!(report["status"], "fail");
        let checks = report["checks"].as_array().expect("checks array");
        assert_eq!(checks[0]["name"], "api_status");
        assert_eq!(checks[0]["status"], "fail");
        assert!(checks.iter().skip(1).all(|check| check["status"] == "skipped"));
    });
}

#[test]
fn smoke_passes_against_running_server() {
    let address = spawn_server();

    with_env(&[], || {
        let result = smoke::run(Some(&format!("http://{address}/")));
        assert_eq!(result.exit_code, 0, "smoke output: {}", result.output);
        assert!(result.output.starts_with("smoke: 10/10 checks passed"));

        let report = parse_payload(last_line(&result.output));
        assert_eq!(report["status"], "pass");
        assert_eq!(report["base_url"], format!("http://{address}"));
    });
}

fn spawn_server() -> SocketAddr {
    let (address_tx, address_rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("server runtime");

        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
            address_tx.send(listener.local_addr().expect("local address")).expect("send address");

            let catalog = TrendCatalog::reference().expect("reference catalog should load");
            serve(listener, app(AppState::new(catalog), true), std::future::pending())
                .await
                .expect("server should run");
        });
    });

    address_rx.recv().expect("server address")
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn last_line(output: &str) -> &str {
    output.lines().last().unwrap_or_default()
}

/// Restores the captured variables on drop, including when the test panics.
struct EnvRestore {
    previous_values: Vec<(String, Option<String>)>,
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in &self.previous_values {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _lock =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner);

    let keys = [
        "PORT",
        "TRENDSCOPE_SERVER_BIND_ADDRESS",
        "TRENDSCOPE_SERVER_PORT",
        "TRENDSCOPE_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "TRENDSCOPE_SERVER_CORS_ENABLED",
        "TRENDSCOPE_CATALOG_PATH",
        "TRENDSCOPE_LOGGING_LEVEL",
        "TRENDSCOPE_LOGGING_FORMAT",
        "TRENDSCOPE_LOG_LEVEL",
        "TRENDSCOPE_LOG_FORMAT",
    ];

    let _restore = EnvRestore {
        previous_values: keys
            .iter()
            .copied()
            .chain(vars.iter().map(|(key, _)| *key))
            .map(|key| (key.to_string(), env::var(key).ok()))
            .collect(),
    };

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();
}
