use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_MANAGER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &TempDir, args: &[&str]) {
    expenses(dir).arg("add").args(args).assert().success();
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["add", "12.50", "-c", "transport", "-d", "2024-03-05", "-m", "Bus pass"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added expense 1: $12.50 Transport on 2024-03-05",
        ));

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus pass"))
        .stdout(predicate::str::contains("1 expense(s), total $12.50"));
}

#[test]
fn list_empty() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn add_rejects_bad_amounts() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["add", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero."));

    expenses(&dir)
        .args(["add", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid numeric amount."));

    expenses(&dir)
        .args(["add", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero."));

    expenses(&dir)
        .args(["add", "0.004"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Amount can have at most two decimal places.",
        ));
}

#[test]
fn add_rejects_unknown_category_and_bad_date() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["add", "5", "-c", "Bills"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category: 'Bills'"));

    expenses(&dir)
        .args(["add", "5", "-d", "05/03/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format. Use YYYY-MM-DD"));

    expenses(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn star_and_list_starred() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["4", "-m", "Coffee"]);
    add(&dir, &["9", "-m", "Cinema", "-c", "Entertainment"]);

    expenses(&dir)
        .args(["star", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starred expense 2"));

    expenses(&dir)
        .args(["list", "--starred"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cinema"))
        .stdout(predicate::str::contains("Coffee").not());

    expenses(&dir)
        .args(["star", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unstarred expense 2"));
}

#[test]
fn delete_expense() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["4", "-m", "Coffee"]);

    expenses(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense 1"));

    expenses(&dir)
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: 1"));
}

#[test]
fn clear_requires_force() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["4"]);

    expenses(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("DANGER"));

    expenses(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("1 expense(s)"));

    expenses(&dir)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot saved:"))
        .stdout(predicate::str::contains(
            "All data has been cleared successfully (1 expense(s) removed).",
        ));

    expenses(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No expenses found."));

    expenses(&dir)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".db"));
}

#[test]
fn summary_by_category() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["10", "-c", "Food", "-d", "2024-01-10"]);
    add(&dir, &["5.25", "-c", "Food", "-d", "2024-02-10"]);
    add(&dir, &["40", "-c", "Rent", "-d", "2024-02-01"]);

    expenses(&dir)
        .args(["summary", "category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("$40.00"))
        .stdout(predicate::str::contains("$15.25"));

    expenses(&dir)
        .args(["summary", "yearly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024"))
        .stdout(predicate::str::contains("$55.25"));
}

#[test]
fn dashboard_on_empty_data() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Dashboard"))
        .stdout(predicate::str::contains("This month:   $0.00"))
        .stdout(predicate::str::contains("Today:        $0.00"));
}

#[test]
fn export_csv_and_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["19.99", "-c", "Shopping", "-d", "2024-06-01", "-m", "Socks, wool"]);

    expenses(&dir)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ID,Date,Category,Amount,Description,Starred\n1,2024-06-01,Shopping,19.99,\"Socks, wool\",false",
        ));

    let out = dir.path().join("export.json");
    expenses(&dir)
        .args(["export", "-f", "json", "-o"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["expenses"][0]["description"], "Socks, wool");
}

#[test]
fn ask_without_api_key() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .env_remove("GEMINI_API_KEY")
        .args(["ask", "where", "does", "my", "money", "go?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Manager Configuration"))
        .stdout(predicate::str::contains("expense_manager.db"))
        .stdout(predicate::str::contains("Gemini API key:     not set"))
        .stdout(predicate::str::contains("gemini-flash-latest"));
}

#[test]
fn snapshot_then_restore_latest() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["4", "-m", "Coffee"]);

    expenses(&dir)
        .args(["backup", "snapshot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot created:"));

    add(&dir, &["9", "-m", "Cinema"]);

    expenses(&dir)
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"));

    expenses(&dir)
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete: 1 expense(s)"));

    expenses(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("Cinema").not());
}
