//! Integration tests for the `dot` binary.
//!
//! Each test runs the binary against an isolated storage root seeded with
//! the fixture metadata, so nothing touches the network unless a test
//! starts its own mock RPC server.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dotinspect::metadata::fixture;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Isolated storage root for one test.
struct TestHome {
    dir: TempDir,
}

impl TestHome {
    /// Empty storage root: default config, nothing cached.
    fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Storage root with fixture metadata cached for `polkadot`.
    fn seeded() -> Self {
        let home = Self::empty();
        home.seed_metadata("polkadot");
        home
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn metadata_path(&self, chain: &str) -> PathBuf {
        self.root().join("chains").join(chain).join("metadata.bin")
    }

    fn config_path(&self) -> PathBuf {
        self.root().join("config.toml")
    }

    fn seed_metadata(&self, chain: &str) {
        let path = self.metadata_path(chain);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, fixture::encoded()).unwrap();
    }

    fn dot(&self) -> Command {
        let mut cmd = Command::cargo_bin("dot").unwrap();
        cmd.env("DOT_HOME", self.root())
            .env("HOME", self.root())
            .env_remove("DOT_CONFIG")
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn rpc_body(bytes: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": format!("0x{}", hex::encode(bytes)),
    })
}

// =============================================================================
// inspect
// =============================================================================

#[test]
fn inspect_lists_pallets_with_counts() {
    let home = TestHome::seeded();
    home.dot()
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pallets on polkadot (3)"))
        .stdout(predicate::str::contains("System  3 storage, 2 constants"))
        .stdout(predicate::str::contains("Balances  2 storage, 2 constants"))
        .stdout(predicate::str::contains("Staking  4 storage, 1 constants"));
}

#[test]
fn inspect_pallet_lists_items_with_doc_excerpts() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "balances"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balances Pallet"))
        .stdout(predicate::str::contains("Storage Items:"))
        .stdout(predicate::str::contains(
            "TotalIssuance - The total units issued in the system.",
        ))
        .stdout(predicate::str::contains("Constants:"))
        .stdout(predicate::str::contains("MaxLocks"));
}

#[test]
fn inspect_storage_item() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "System.Account"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System.Account (Storage)"))
        .stdout(predicate::str::contains("Type: map"))
        .stdout(predicate::str::contains(
            "Value: { nonce: u32, providers: u32, data: { free: u128, reserved: u128, frozen: u128 } }",
        ))
        .stdout(predicate::str::contains("Key: AccountId32"))
        .stdout(predicate::str::contains("Hashers: Blake2_128Concat"));
}

#[test]
fn inspect_constant_is_case_insensitive() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "balances.existentialdeposit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balances.ExistentialDeposit (Constant)"))
        .stdout(predicate::str::contains("Type: u128"));
}

#[test]
fn inspect_unknown_pallet_suggests() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "Systme"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: Unknown pallet \"Systme\". Did you mean: System?",
        ));
}

#[test]
fn inspect_unknown_item_searches_storage_and_constants() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "Balances.MaxLock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown item in Balances \"MaxLock\". Did you mean: MaxLocks",
        ));
}

#[test]
fn inspect_rejects_malformed_target() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "System.Account.Extra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target \"System.Account.Extra\""));
}

#[test]
fn inspect_json_output() {
    let home = TestHome::seeded();
    let output = home
        .dot()
        .args(["inspect", "Staking.LastOutcome", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pallet"], "Staking");
    assert_eq!(value["kind"], "plain");
    assert_eq!(
        value["value_type"],
        "Result<(), ApplyExtrinsic | Finalization | Initialization>"
    );
    assert_eq!(value["docs"], serde_json::json!([]));
}

#[test]
fn inspect_unknown_chain() {
    let home = TestHome::seeded();
    home.dot()
        .args(["inspect", "--chain", "kusama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown chain \"kusama\". Available chains: polkadot",
        ));
}

#[test]
fn inspect_unreachable_endpoint_reports_connection_error() {
    let home = TestHome::empty();
    home.dot()
        .args(["inspect", "--rpc", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fetching metadata from polkadot..."))
        .stderr(predicate::str::contains(
            "Failed to fetch metadata for \"polkadot\"",
        ))
        .stderr(predicate::str::contains(
            "Check that the RPC endpoint is correct and reachable.",
        ));
    assert!(!home.metadata_path("polkadot").exists());
}

// =============================================================================
// query / const
// =============================================================================

#[test]
fn query_shows_storage_shape() {
    let home = TestHome::seeded();
    home.dot()
        .args(["query", "System.Number"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System.Number (Storage)"))
        .stdout(predicate::str::contains("Type: plain"))
        .stdout(predicate::str::contains("Value: u32"))
        .stdout(predicate::str::contains("Modifier: default"));
}

#[test]
fn query_rejects_constants() {
    let home = TestHome::seeded();
    home.dot()
        .args(["query", "Balances.ExistentialDeposit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown storage item in Balances \"ExistentialDeposit\".",
        ));
}

#[test]
fn const_prints_type_and_encoded_value() {
    let home = TestHome::seeded();
    let output = home
        .dot()
        .args(["const", "Balances.ExistentialDeposit", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["type"], "u128");
    assert_eq!(
        value["value"],
        format!(
            "0x{}",
            hex::encode(fixture::EXISTENTIAL_DEPOSIT.to_le_bytes())
        )
    );
}

#[test]
fn const_unknown_constant_suggests() {
    let home = TestHome::seeded();
    home.dot()
        .args(["const", "System.SS58Prefx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown constant in System \"SS58Prefx\". Did you mean: SS58Prefix?",
        ));
}

// =============================================================================
// chain
// =============================================================================

#[test]
fn chain_list_marks_default() {
    let home = TestHome::empty();
    home.dot()
        .args(["chain", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "polkadot (default)  wss://rpc.polkadot.io",
        ));
}

#[test]
fn chain_remove_builtin_refused() {
    let home = TestHome::empty();
    home.dot()
        .args(["chain", "remove", "polkadot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot remove the built-in \"polkadot\" chain.",
        ));
}

#[test]
fn chain_add_requires_transport() {
    let home = TestHome::empty();
    home.dot()
        .args(["chain", "add", "kusama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Must provide either --rpc <url> or --light-client.",
        ));
    assert!(!home.config_path().exists());
}

#[test]
fn chain_info_reads_cache() {
    let home = TestHome::seeded();
    home.dot()
        .args(["chain", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("polkadot Metadata"))
        .stdout(predicate::str::contains("Version: v14"))
        .stdout(predicate::str::contains("Pallets: 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn chain_lifecycle_against_mock_rpc() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            serde_json::json!({ "method": "state_getMetadata" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_body(&fixture::encoded())))
        .expect(1)
        .mount(&server)
        .await;

    let home = TestHome::empty();

    home.dot()
        .args(["chain", "add", "local", "--rpc", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chain \"local\" added successfully."));
    assert_eq!(fs::read(home.metadata_path("local")).unwrap(), fixture::encoded());
    let config = fs::read_to_string(home.config_path()).unwrap();
    assert!(config.contains("[chains.local]"));

    // Served from the cache: the mock expects exactly one request.
    home.dot()
        .args(["inspect", "--chain", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pallets on local (3)"));

    home.dot()
        .args(["chain", "default", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default chain set to \"local\"."));

    home.dot()
        .args(["chain", "remove", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default chain reset to \"polkadot\"."))
        .stdout(predicate::str::contains("Chain \"local\" removed."));
    assert!(!home.metadata_path("local").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn chain_update_replaces_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_body(&fixture::encoded())))
        .mount(&server)
        .await;

    let home = TestHome::empty();
    fs::create_dir_all(home.metadata_path("polkadot").parent().unwrap()).unwrap();
    fs::write(home.metadata_path("polkadot"), b"stale").unwrap();

    home.dot()
        .args(["chain", "update", "--rpc", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Metadata for \"polkadot\" updated (v14, 3 pallets).",
        ));
    assert_eq!(
        fs::read(home.metadata_path("polkadot")).unwrap(),
        fixture::encoded()
    );
}

#[test]
fn corrupt_cache_points_at_update() {
    let home = TestHome::empty();
    fs::create_dir_all(home.metadata_path("polkadot").parent().unwrap()).unwrap();
    fs::write(home.metadata_path("polkadot"), b"garbage").unwrap();

    home.dot()
        .arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dot chain update polkadot"));
}

// =============================================================================
// completion
// =============================================================================

#[test]
fn completion_generates_script() {
    let home = TestHome::empty();
    home.dot()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dot"));
}
