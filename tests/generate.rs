use std::fs;
use std::path::{Path, PathBuf};

use pkggen::codegen::{CSharpEmitter, CppEmitter, Emitter};
use pkggen::{GenError, GeneratorConfig, ModuleDescriptor, run};

const FOO: &str = r#"{
    "types": [
        { "name": "Foo", "members": [
            { "name": "id", "type": "int64" },
            { "name": "name", "type": "string" }
        ] }
    ]
}"#;

fn workspace() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let scan = root.path().join("templates");
    let out = root.path().join("pkg");
    fs::create_dir(&scan).unwrap();
    (root, scan, out)
}

fn write_module(scan: &Path, file_name: &str, src: &str) {
    fs::write(scan.join(file_name), src).unwrap();
}

fn read_dir_sorted(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn zero_matches_writes_nothing() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "unrelated.json", FOO);

    let report = run(&GeneratorConfig::new(&scan, &out)).unwrap();
    assert_eq!(report.modules, 0);
    assert!(report.files.is_empty());
    assert!(!out.exists());
}

#[test]
fn foo_is_emitted_in_both_languages() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "pkggen_template_Shop.json", FOO);

    let report = run(&GeneratorConfig::new(&scan, &out)).unwrap();
    assert_eq!(report.modules, 1);
    assert_eq!(report.files, vec![out.join("Shop.h"), out.join("Shop.cs")]);

    let header = fs::read_to_string(out.join("Shop.h")).unwrap();
    assert!(header.contains("namespace Shop\n"));
    assert!(header.contains("int64_t id = 0;"));
    assert!(header.contains("xx::String_p name;"));

    let class = fs::read_to_string(out.join("Shop.cs")).unwrap();
    assert!(class.contains("public partial class Foo"));
    assert!(class.contains("public long Id { get; set; }"));
    assert!(class.contains("public string Name { get; set; } = string.Empty;"));
}

#[test]
fn second_run_is_byte_identical() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "pkggen_template_A.json", FOO);
    write_module(&scan, "pkggen_template_B.json", r#"{ "namespace": "Other", "types": [ { "name": "Bar" } ] }"#);
    let config = GeneratorConfig::new(&scan, &out);

    run(&config).unwrap();
    let first: Vec<Vec<u8>> = read_dir_sorted(&out).iter().map(|n| fs::read(out.join(n)).unwrap()).collect();
    run(&config).unwrap();
    let second: Vec<Vec<u8>> = read_dir_sorted(&out).iter().map(|n| fs::read(out.join(n)).unwrap()).collect();

    assert_eq!(read_dir_sorted(&out), ["A.cs", "A.h", "B.cs", "B.h"]);
    assert_eq!(first, second);
}

#[test]
fn parallel_run_matches_sequential_run() {
    let (root, scan, out) = workspace();
    for name in ["One", "Two", "Three", "Four"] {
        write_module(&scan, &format!("pkggen_template_{name}.json"), FOO);
    }
    let par_out = root.path().join("pkg-par");

    let sequential = run(&GeneratorConfig::new(&scan, &out)).unwrap();
    let parallel = run(&GeneratorConfig::new(&scan, &par_out).with_parallel(true)).unwrap();
    assert_eq!(sequential.files.len(), 8);
    assert_eq!(parallel.files.len(), 8);

    for name in read_dir_sorted(&out) {
        assert_eq!(fs::read(out.join(&name)).unwrap(), fs::read(par_out.join(&name)).unwrap(), "{name}");
    }
}

#[test]
fn empty_module_writes_no_files() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "pkggen_template_Empty.json", r#"{ "types": [] }"#);

    let report = run(&GeneratorConfig::new(&scan, &out)).unwrap();
    assert_eq!(report.modules, 1);
    assert!(report.files.is_empty());
    assert!(read_dir_sorted(&out).is_empty());
}

#[test]
fn unmapped_member_aborts_before_writing_the_module() {
    let (_root, scan, out) = workspace();
    write_module(
        &scan,
        "pkggen_template_Broken.json",
        r#"{ "types": [ { "name": "Foo", "members": [ { "name": "x", "type": "Unknown" } ] } ] }"#,
    );

    let err = run(&GeneratorConfig::new(&scan, &out)).unwrap_err();
    assert!(matches!(err, GenError::Metadata { .. }), "{err}");
    assert!(!out.join("Broken.h").exists());
    assert!(!out.join("Broken.cs").exists());
}

#[test]
fn invalid_manifest_aborts_the_run() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "pkggen_template_Bad.json", r#"{ "types": "nope" }"#);

    let err = run(&GeneratorConfig::new(&scan, &out)).unwrap_err();
    match err {
        GenError::InvalidModule { path, message } => {
            assert!(path.ends_with("pkggen_template_Bad.json"));
            assert!(message.contains("types"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn emit_writes_to_a_deterministic_path() {
    let (_root, scan, out) = workspace();
    write_module(&scan, "pkggen_template_Shop.json", FOO);
    fs::create_dir(&out).unwrap();

    let module = ModuleDescriptor::from_path(&scan.join("pkggen_template_Shop.json"), "pkggen_template_").unwrap();
    let metadata = module.load_metadata().unwrap();

    let cpp = CppEmitter.emit(&metadata, &out, &module.target_name, "").unwrap();
    let cs = CSharpEmitter.emit(&metadata, &out, &module.target_name, "_class").unwrap();
    assert_eq!(cpp, Some(out.join("Shop.h")));
    assert_eq!(cs, Some(out.join("Shop_class.cs")));
}

#[test]
fn unwritable_output_is_a_write_error() {
    let (root, scan, _out) = workspace();
    write_module(&scan, "pkggen_template_Shop.json", FOO);
    // a regular file where the output directory should be
    let blocked = root.path().join("blocked");
    fs::write(&blocked, "").unwrap();

    let err = run(&GeneratorConfig::new(&scan, &blocked)).unwrap_err();
    assert!(matches!(err, GenError::Write { .. }), "{err}");
}

#[test]
fn bundled_db_template_reproduces_the_account_artifacts() {
    let scan = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    let out = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new(&scan, out.path()).with_file_suffix("_class");

    let report = run(&config).unwrap();
    assert_eq!(report.modules, 1);

    let header = fs::read_to_string(out.path().join("DB_class.h")).unwrap();
    assert!(header.contains("namespace DB\n{\n"));
    assert!(header.contains("    // account table\n    struct Account : xx::MPObject\n"));
    assert!(header.contains("        // auto-increment primary key\n        int64_t id = 0;\n"));
    assert!(header.contains("        xx::String_p username;\n"));
    assert!(header.contains("        xx::String_p password;\n"));
    assert!(header.contains("    using Account_v = xx::Dock<Account>;\n"));
    assert!(header.contains("struct MemmoveSupport<DB::Account_v>"));

    let class = fs::read_to_string(out.path().join("DB_class.cs")).unwrap();
    assert!(class.starts_with("using System;\nnamespace DB\n{\n"));
    assert!(class.contains("public long Id { get; set; }"));
    assert!(class.contains("public string Username { get; set; } = string.Empty;"));
    assert!(class.contains("public string Password { get; set; } = string.Empty;"));
}
