use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn complab(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("complab").unwrap();
    cmd.env("COMPLAB_ROOT", home.join("store"))
        .env("COMPLAB_CONFIG_DIR", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn write_button_folder(home: &Path) -> std::path::PathBuf {
    let dir = home.join("fancy-button");
    fs::create_dir_all(dir.join("node_modules/react")).unwrap();
    fs::write(dir.join("Button.tsx"), "export const Button = () => <button/>").unwrap();
    fs::write(dir.join("index.ts"), "export * from './Button'").unwrap();
    fs::write(dir.join("node_modules/react/index.js"), "ignored").unwrap();
    dir
}

#[test]
fn import_folder_then_list_show_and_delete() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let folder = write_button_folder(home);

    complab(home)
        .args(["import", "folder"])
        .arg(&folder)
        .args(["--tag", "form"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as a React component (fancybutton, 2 files)"));

    assert!(home.join("store/React/fancybutton/meta.json").exists());
    assert!(!home.join("store/React/fancybutton/node_modules").exists());

    complab(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("fancy-button (fancybutton) #form"))
        .stdout(predicate::str::contains("React"));

    complab(home)
        .args(["show", "fancybutton"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.ts (main)"))
        .stdout(predicate::str::contains("export const Button"));

    complab(home)
        .args(["delete", "fancybutton"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted fancybutton (React)"));

    complab(home)
        .args(["show", "fancybutton"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Component not found: fancybutton"));
}

#[test]
fn naked_invocation_lists() {
    let temp = TempDir::new().unwrap();
    complab(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No components yet."));
}

#[test]
fn snippet_from_stdin() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    complab(home)
        .args(["import", "snippet", "-", "--name", "Button", "--language", "javascript"])
        .write_stdin("console.log('hi')")
        .assert()
        .success();

    let stored = fs::read_to_string(home.join("store/JavaScript/button/Button.js")).unwrap();
    assert_eq!(stored, "console.log('hi')");

    complab(home)
        .args(["show", "button", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"snippet\": true"))
        .stdout(predicate::str::contains("\"previewable\": true"));
}

#[test]
fn unknown_import_kind_fails() {
    let temp = TempDir::new().unwrap();
    complab(temp.path())
        .args(["import", "zip", "whatever.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported import kind: zip"));
}

#[test]
fn duplicate_import_needs_replace() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let file = home.join("card.html");
    fs::write(&file, "<div class=card></div>").unwrap();

    let import = |extra: &[&str]| {
        let mut cmd = complab(home);
        cmd.args(["import", "files"])
            .arg(&file)
            .args(["--name", "Card"])
            .args(extra);
        cmd
    };

    import(&[]).assert().success();
    import(&[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    import(&["--replace"]).assert().success();
}

#[test]
fn list_removes_orphaned_directories() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let orphan = home.join("store/Vue/broken");
    fs::create_dir_all(&orphan).unwrap();
    fs::write(orphan.join("Broken.vue"), "<template/>").unwrap();

    complab(home).arg("list").assert().success();
    assert!(!orphan.exists());
}

#[test]
fn save_export_and_path() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(home.join("main.dart"), "void main() {}").unwrap();

    complab(home)
        .args(["save", "--name", "Tile", "--framework", "Flutter"])
        .arg(home.join("main.dart"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Tile (tile)"));

    complab(home)
        .args(["path", "tile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flutter"));

    complab(home)
        .args(["export", "tile", "--format", "archive"])
        .assert()
        .success();
    assert!(home.join("tile.tar.gz").exists());

    complab(home).args(["export", "tile"]).assert().success();
    let bundle = fs::read_to_string(home.join("tile.json")).unwrap();
    assert!(bundle.contains("void main() {}"));
}

#[test]
fn save_refuses_files_sharing_a_name() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    for dir in ["a", "b"] {
        fs::create_dir_all(home.join(dir)).unwrap();
        fs::write(home.join(dir).join("index.js"), dir).unwrap();
    }

    complab(home)
        .args(["save", "--name", "Twin", "--framework", "React"])
        .arg(home.join("a/index.js"))
        .arg(home.join("b/index.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one file is named 'index.js'"));
    assert!(!home.join("store/React/twin").exists());
}

#[test]
fn config_set_and_get() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    complab(home)
        .args(["config", "default-platform", "Mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-platform set to Mobile"));

    complab(home)
        .args(["config", "default-platform"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mobile"));

    complab(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored-dirs = node_modules,.git,dist,build"));
}

#[test]
fn doctor_reports_clean_store() {
    let temp = TempDir::new().unwrap();
    complab(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found"));
}
