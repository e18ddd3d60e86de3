use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const PASTA: &str = "0b6c1f0e-8f6a-4a53-9f39-3f1f6a1c0001";
const BEEF: &str = "0b6c1f0e-8f6a-4a53-9f39-3f1f6a1c0002";
const CHICKEN: &str = "0b6c1f0e-8f6a-4a53-9f39-3f1f6a1c0003";
const OIL: &str = "0b6c1f0e-8f6a-4a53-9f39-3f1f6a1c0004";
const ONION: &str = "0b6c1f0e-8f6a-4a53-9f39-3f1f6a1c0005";

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn setup_catalog() -> TempDir {
    let temp = tempdir().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();

    write_json(
        &data.join("ingredients.json"),
        &json!({ "ingredients": [
            { "id": PASTA, "name": "Pasta", "category": "Pantry",
              "pricePerPackage": 3.0, "packageSize": 16, "packageUnit": "oz" },
            { "id": BEEF, "name": "Ground Beef", "category": "Meat",
              "pricePerPackage": 5.0, "packageSize": 1, "packageUnit": "lb" },
            { "id": CHICKEN, "name": "Chicken Thighs", "category": "Meat",
              "pricePerPackage": 6.0, "packageSize": 2, "packageUnit": "lb" },
            { "id": OIL, "name": "Olive Oil", "category": "Pantry",
              "pricePerPackage": 6.0, "packageSize": 16, "packageUnit": "fl oz" },
            { "id": ONION, "name": "Onion", "category": "Produce",
              "pricePerBaseUnit": 0.8, "baseUnit": "each" }
        ]}),
    );

    write_json(
        &data.join("recipes.json"),
        &json!({ "recipes": [
            { "id": "7d0f4f2c-1111-4c1e-8a55-000000000001", "name": "Carbonara",
              "proteinCategory": "Pork", "rating": 4.6,
              "ingredients": [ { "ingredientId": PASTA, "quantity": 8, "unit": "oz" } ] },
            { "id": "7d0f4f2c-1111-4c1e-8a55-000000000002", "name": "Primavera",
              "proteinCategory": "Vegetarian", "rating": 4.1,
              "ingredients": [
                  { "ingredientId": PASTA, "quantity": 8, "unit": "ounces" },
                  { "ingredientId": ONION, "quantity": 1, "unit": "each" }
              ] },
            { "id": "7d0f4f2c-1111-4c1e-8a55-000000000003", "name": "Beef Tacos",
              "proteinCategory": "Beef", "rating": 4.8, "tags": ["quick"],
              "ingredients": [
                  { "ingredientId": BEEF, "quantity": 1.5, "unit": "lb" },
                  { "ingredientId": OIL, "quantity": 1, "unit": "glug" }
              ] },
            { "id": "7d0f4f2c-1111-4c1e-8a55-000000000004", "name": "Chicken Curry",
              "proteinCategory": "Chicken", "rating": 3.9,
              "ingredients": [
                  { "ingredientId": CHICKEN, "quantity": 1, "unit": "lb" },
                  { "ingredientId": ONION, "quantity": 2, "unit": "each" }
              ] }
        ]}),
    );

    temp
}

fn mealplan(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mealplan").expect("binary");
    cmd.env("MEALPLAN_DATA_DIR", dir).env_remove("MEALPLAN_LOG");
    cmd
}

fn plan_json(dir: &Path, args: &[&str]) -> Value {
    let output = mealplan(dir)
        .arg("plan")
        .args(args)
        .args(["--format", "json", "--seed", "11"])
        .output()
        .expect("command run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn convert_prints_converted_quantity() {
    let temp = tempdir().unwrap();
    mealplan(temp.path())
        .args(["convert", "16", "ounces", "lb"])
        .assert()
        .success()
        .stdout("16 oz = 1 lb\n");
}

#[test]
fn convert_across_dimensions_fails() {
    let temp = tempdir().unwrap();
    mealplan(temp.path())
        .args(["convert", "1", "cup", "g"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot convert"));
}

#[test]
fn grocery_consolidates_shared_packages() {
    let temp = setup_catalog();
    let assert = mealplan(temp.path())
        .args(["grocery", "Carbonara", "primavera"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("1x 16 oz Pasta ($3.00)"), "{}", stdout);
    assert!(stdout.contains("1 each Onion ($0.80)"), "{}", stdout);
    assert!(stdout.contains("Total: $3.80"), "{}", stdout);
    let produce = stdout.find("Produce").unwrap();
    let pantry = stdout.find("Pantry").unwrap();
    assert!(produce < pantry);
}

#[test]
fn grocery_flags_unknown_units() {
    let temp = setup_catalog();
    mealplan(temp.path())
        .args(["grocery", "Beef Tacos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2x 1 lb Ground Beef ($10.00)"))
        .stdout(predicate::str::contains("1 glug Olive Oil [Price Unknown]"))
        .stdout(predicate::str::contains("$0.00").not());
}

#[test]
fn grocery_exports_csv_to_file() {
    let temp = setup_catalog();
    let out = temp.path().join("list.csv");
    mealplan(temp.path())
        .args(["grocery", "Chicken Curry", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows[0], "Category,Item,Quantity,Unit,Packages,Cost");
    assert_eq!(rows[1], "Produce,Onion,2,each,,1.60");
    assert_eq!(rows[2], "Meat,Chicken Thighs,1,lb,1,6.00");
}

#[test]
fn grocery_deducts_pantry_stock() {
    let temp = setup_catalog();
    write_json(
        &temp.path().join("data").join("pantry.json"),
        &json!({ "items": [ { "ingredientId": ONION, "quantity": 5, "unit": "each" } ] }),
    );

    mealplan(temp.path())
        .args(["grocery", "Chicken Curry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Onion").not())
        .stdout(predicate::str::contains("Total: $6.00"));
}

#[test]
fn grocery_unknown_recipe_fails() {
    let temp = setup_catalog();
    mealplan(temp.path())
        .args(["grocery", "Lasagna"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recipe not found: Lasagna"));
}

#[test]
fn price_reports_packages() {
    let temp = setup_catalog();
    mealplan(temp.path())
        .args(["price", "ground beef", "1.5", "lb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.5 lb Ground Beef: $10.00 (2 x 1 lb package)"));
}

#[test]
fn recipe_list_and_show() {
    let temp = setup_catalog();
    mealplan(temp.path())
        .args(["recipe", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beef Tacos"))
        .stdout(predicate::str::contains("Chicken Curry"));

    mealplan(temp.path())
        .args(["recipe", "show", "beef tacos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe: Beef Tacos"))
        .stdout(predicate::str::contains("[Price Unknown]"));
}

#[test]
fn plan_fills_days_with_rotating_proteins() {
    let temp = setup_catalog();
    let body = plan_json(temp.path(), &["--days", "4", "--no-history"]);

    assert_eq!(body["kind"], "plan");
    let recipes = body["data"]["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 4);
    assert_eq!(body["data"]["shortfall"], 0);
    assert_eq!(body["data"]["relaxedRotation"], false);
    // Pasta is shared, so the consolidated cost is below the per-recipe sum
    let independent = body["data"]["independentTotal"].as_i64().unwrap();
    let consolidated = body["data"]["planCost"].as_i64().unwrap();
    assert!(consolidated < independent);
}

#[test]
fn plan_respects_budget() {
    let temp = setup_catalog();
    let body = plan_json(temp.path(), &["--days", "2", "--budget", "$10", "--no-history"]);

    assert_eq!(body["data"]["withinBudget"], true);
    assert!(body["data"]["planCost"].as_i64().unwrap() <= 1000);
    assert_eq!(body["data"]["budget"], 1000);
}

#[test]
fn recorded_plans_are_excluded_next_time() {
    let temp = setup_catalog();
    let first = plan_json(temp.path(), &["--days", "4", "--record"]);
    assert_eq!(first["data"]["recipes"].as_array().unwrap().len(), 4);

    mealplan(temp.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pln-"));

    // Every catalog recipe was just served
    let second = plan_json(temp.path(), &["--days", "1"]);
    assert_eq!(second["data"]["shortfall"], 1);
    assert!(second["data"]["recipes"].as_array().unwrap().is_empty());

    let third = plan_json(temp.path(), &["--days", "1", "--no-history"]);
    assert_eq!(third["data"]["shortfall"], 0);
}

#[test]
fn plan_without_catalog_fails() {
    let temp = tempdir().unwrap();
    mealplan(temp.path())
        .args(["plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn config_shows_paths() {
    let temp = tempdir().unwrap();
    mealplan(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("history.log"))
        .stdout(predicate::str::contains("Rotation window:    2"));
}

#[test]
fn init_creates_missing_files_once() {
    let temp = tempdir().unwrap();
    mealplan(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("recipes.json"));

    assert!(temp.path().join("config.json").exists());
    assert!(temp.path().join("data").join("ingredients.json").exists());

    mealplan(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));

    mealplan(temp.path())
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("recipe catalog is empty"));
}

#[test]
fn init_leaves_existing_catalog_alone() {
    let temp = setup_catalog();
    mealplan(temp.path()).arg("init").assert().success();

    mealplan(temp.path())
        .args(["recipe", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carbonara"));
}

#[test]
fn plan_rejects_non_ascii_budget() {
    let temp = setup_catalog();
    mealplan(temp.path())
        .args(["plan", "--budget", "1.5€"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid budget"));
}
