use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn dartify() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dartify"))
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_missing_arguments_prints_usage() {
    let output = dartify().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: dartify"));
}

#[test]
fn test_empty_input_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    fs::create_dir_all(&input).unwrap();

    let output = dartify()
        .arg(&input)
        .arg(temp.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No .d.ts files found"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generates_bindings() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    let out = temp.path().join("out");
    write(
        &input,
        "ol/control.d.ts",
        "export declare class Foo {}\nexport declare function bar(x: string): void;\n",
    );

    let output = dartify().arg(&input).arg(&out).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Scanning input directory"));
    assert!(stdout.contains("Generated"));

    assert!(out.join("ol/control/foo.dart").is_file());
    assert_eq!(
        fs::read_to_string(out.join("ol/control/bar.dart")).unwrap(),
        "@JS('bar')\nexternal void bar(JSString x);\n\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("control.dart")).unwrap(),
        "export './ol/control/control.dart';\n"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    let out = temp.path().join("out");
    write(&input, "view.d.ts", "export declare class View {}\n");

    let output = dartify()
        .arg(&input)
        .arg(&out)
        .arg("--dry-run")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Dry run"));
    assert!(!out.exists());
}

#[test]
fn test_unparsable_file_is_skipped() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in");
    let out = temp.path().join("out");
    write(&input, "view.d.ts", "export declare class View {}\n");
    write(&input, "broken.d.ts", "export declare class {");

    let output = dartify().arg(&input).arg(&out).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("view/view.dart").is_file());
    assert!(!out.join("broken").exists());
}
