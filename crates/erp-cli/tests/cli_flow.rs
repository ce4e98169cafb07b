use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

const TODAY: &str = "2025-11-20";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_erp"))
}

/// Isolated HOME/XDG directories so no real config or data is touched.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().expect("tempdir should be created"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config_file(&self) -> PathBuf {
        self.path().join("config").join("erp").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env_remove("ERP_CONFIG")
            .env_remove("ERP_ADAPTER")
            .env_remove("ERP_DATA")
            .env_remove("ERP_LOG")
            .args(["--today", TODAY]);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("erp should start")
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "erp {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout should be utf-8")
    }

    fn json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.ok(args)).expect("stdout should be JSON")
    }
}

fn exit_code(output: &Output) -> Option<i32> {
    output.status.code()
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("list output should be an array")
        .iter()
        .map(|record| record["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn test_finance_record_lifecycle() {
    let sandbox = Sandbox::new();

    let seeded = sandbox.json(&["list", "finance", "--json"]);
    assert_eq!(ids(&seeded), vec!["1", "2", "3"]);

    let id = sandbox
        .ok(&[
            "add",
            "finance",
            "--field",
            "tipo=pagamento",
            "--field",
            "descricao=Internet fibra",
            "--field",
            "data=2025-11-21",
            "--field",
            "situacao=Pendente",
            "--field",
            "valor:=99.5",
        ])
        .trim()
        .to_string();
    assert!(!id.is_empty());

    let found = sandbox.json(&["list", "finance", "--search", "INTERNET", "--json"]);
    assert_eq!(ids(&found), vec![id.clone()]);

    sandbox.ok(&["update", "finance", &id, "--field", "situacao=Pago"]);
    let shown = sandbox.json(&["show", "finance", &id, "--json"]);
    assert_eq!(shown["situacao"], "Pago");
    assert_eq!(shown["descricao"], "Internet fibra");

    let removed = sandbox.ok(&["remove", "finance", &id, "missing"]);
    assert!(removed.contains("removed=1"));

    let after = sandbox.json(&["list", "finance", "--json"]);
    assert_eq!(ids(&after), vec!["1", "2", "3"]);
}

#[test]
fn test_list_filters_by_tab_status_and_month() {
    let sandbox = Sandbox::new();

    let payments = sandbox.json(&["list", "finance", "--tab", "pagamentos", "--json"]);
    assert_eq!(ids(&payments), vec!["2"]);

    // Only "Pago" counts as settled for the pending view.
    let pending = sandbox.json(&["list", "finance", "--status", "pendente", "--json"]);
    assert_eq!(ids(&pending), vec!["1", "3"]);

    let settled = sandbox.json(&["list", "finance", "--status", "quitado", "--json"]);
    assert_eq!(ids(&settled), vec!["1", "2"]);

    let october = sandbox.json(&["list", "finance", "--month", "2025-10", "--json"]);
    assert!(ids(&october).is_empty());

    let plain = sandbox.ok(&["list", "finance", "--month", "2025-11"]);
    assert!(plain.contains("count=3"));
    assert!(plain.contains("total=R$ 2.550,00"));
}

#[test]
fn test_summary_and_dashboard() {
    let sandbox = Sandbox::new();
    sandbox.ok(&[
        "add",
        "finance",
        "--json",
        r#"{"tipo":"pagamento","data":"2025-11-24","situacao":"Pendente","valor":50.005}"#,
    ]);

    let summary = sandbox.json(&["summary", "--json"]);
    assert_eq!(summary["today"], TODAY);
    assert_eq!(summary["receivable_today"].as_f64(), Some(2000.0));
    assert_eq!(summary["payable_today"].as_f64(), Some(550.0));
    assert_eq!(summary["payable_week"].as_f64(), Some(600.01));
    assert_eq!(summary["week_flow"].as_f64(), Some(1399.99));

    let dashboard = sandbox.json(&["dashboard", "--days", "5", "--json"]);
    assert_eq!(dashboard["month_label"], "novembro de 2025");
    assert_eq!(dashboard["kpis"].as_array().map(Vec::len), Some(4));
    assert_eq!(dashboard["daily_net"].as_array().map(Vec::len), Some(5));
    assert_eq!(dashboard["month"]["revenue"].as_f64(), Some(2000.0));
    assert_eq!(dashboard["month"]["pending_payable"].as_f64(), Some(50.01));

    let plain = sandbox.ok(&["summary"]);
    assert!(plain.contains("receivable_today=R$ 2.000,00"));
}

#[test]
fn test_exit_codes() {
    let sandbox = Sandbox::new();

    let missing = sandbox.run(&["show", "finance", "nope"]);
    assert_eq!(exit_code(&missing), Some(3));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("erp list finance"));

    let missing_update = sandbox.run(&["update", "sales", "nope", "--field", "cliente=X"]);
    assert_eq!(exit_code(&missing_update), Some(3));

    let bad_kind = sandbox.run(&["list", "invoices"]);
    assert_eq!(exit_code(&bad_kind), Some(4));

    let bad_field = sandbox.run(&["add", "finance", "--field", "valor:=abc"]);
    assert_eq!(exit_code(&bad_field), Some(4));

    let bad_record = sandbox.run(&["update", "finance", "1", "--field", "situacao=Talvez"]);
    assert_eq!(exit_code(&bad_record), Some(4));

    let bad_status = sandbox.run(&["list", "sales", "--status", "pendente"]);
    assert_eq!(exit_code(&bad_status), Some(4));

    let bad_adapter = sandbox.run(&["--adapter", "redis", "list", "sales"]);
    assert_eq!(exit_code(&bad_adapter), Some(4));
}

#[test]
fn test_favorites_toggle() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["favorites", "toggle", "dre"]);
    sandbox.ok(&["favorites", "toggle", "vendas-mes"]);
    sandbox.ok(&["favorites", "toggle", "dre"]);

    let listed = sandbox.json(&["favorites", "list", "--json"]);
    assert_eq!(listed, serde_json::json!(["vendas-mes"]));
}

#[test]
fn test_sqlite_backend_persists_between_runs() {
    let sandbox = Sandbox::new();
    let db = sandbox.path().join("erp.sqlite");
    let db_arg = db.to_string_lossy().to_string();
    let flags = ["--adapter", "sqlite", "--data", db_arg.as_str()];

    let mut add = flags.to_vec();
    add.extend(["add", "contacts", "--field", "nome=Loja Sul", "--field", "tipo=clientes"]);
    let id = sandbox.ok(&add).trim().to_string();
    assert!(db.exists());

    let mut list = flags.to_vec();
    list.extend(["list", "contacts", "--search", "sul", "--json"]);
    assert_eq!(ids(&sandbox.json(&list)), vec![id]);
}

#[test]
fn test_memory_backend_forgets_between_runs() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["--adapter", "memory", "favorites", "toggle", "dre"]);
    let listed = sandbox.json(&["--adapter", "memory", "favorites", "list", "--json"]);
    assert_eq!(listed, serde_json::json!([]));
}

#[test]
fn test_init_config_drives_later_runs() {
    let sandbox = Sandbox::new();
    let db = sandbox.path().join("store").join("erp.sqlite");
    let db_arg = db.to_string_lossy().to_string();

    sandbox.ok(&["--adapter", "sqlite", "--data", &db_arg, "init"]);
    assert!(sandbox.config_file().exists());

    let again = sandbox.run(&["init"]);
    assert_eq!(exit_code(&again), Some(4));

    sandbox.ok(&["list", "users"]);
    let doctor = sandbox.json(&["doctor", "--json"]);
    assert_eq!(doctor["adapter"], "sqlite");
    assert_eq!(doctor["config_present"], true);
    assert_eq!(doctor["ok"], true);
    assert_eq!(doctor["location"], db_arg.as_str());

    sandbox.ok(&["init", "--force"]);
    let doctor = sandbox.json(&["doctor", "--json"]);
    assert_eq!(doctor["adapter"], "file");
}

#[test]
fn test_reset_restores_defaults() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["remove", "users", "U001"]);
    assert!(ids(&sandbox.json(&["list", "users", "--json"])).is_empty());

    sandbox.ok(&["reset", "users"]);
    assert_eq!(ids(&sandbox.json(&["list", "users", "--json"])), vec!["U001"]);
}

#[test]
fn test_completions_generate() {
    let sandbox = Sandbox::new();
    let script = sandbox.ok(&["completions", "bash"]);
    assert!(script.contains("erp"));
}
