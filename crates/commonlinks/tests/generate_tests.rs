use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Integration tests for `commonlinks generate`
struct TestContext {
    #[allow(dead_code)]
    temp_dir: TempDir,
    docs_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let docs_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            docs_path,
        }
    }

    /// A docs directory with a small Javadoc tree under apidocs/veslo.
    fn with_apidocs() -> Self {
        let ctx = Self::new();
        for page in [
            "apidocs/veslo/AResponse.html",
            "apidocs/veslo/AResponse.Builder.html",
            "apidocs/veslo/client/ClientBuilder.html",
            "apidocs/veslo/client/class-use/ClientBuilder.html",
            "apidocs/veslo/client/package-summary.html",
            "apidocs/veslo/client/package-tree.html",
            "apidocs/veslo/client/package-use.html",
        ] {
            ctx.write(page, "<html></html>");
        }
        ctx
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.docs_path.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.docs_path.join(rel)).unwrap()
    }

    fn path(&self) -> &Path {
        &self.docs_path
    }

    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        Command::new(env!("CARGO_BIN_EXE_commonlinks"))
            .current_dir(&self.docs_path)
            .env_remove("RUST_LOG")
            .args(args)
            .assert()
    }
}

#[test]
fn test_generate_with_defaults_appends_to_conf_py() {
    let ctx = TestContext::with_apidocs();
    ctx.write("conf.py", "project = 'veslo'\nextensions = ['commonlinks']\n");

    ctx.run(&["generate"])
        .success()
        .stdout(predicate::str::contains("Wrote 3 link(s)"));

    assert_eq!(
        ctx.read("conf.py"),
        "project = 'veslo'\n\
         extensions = ['commonlinks']\n\
         commonlinks = {\n    \
         'AResponse': 'apidocs/veslo/AResponse.html',\n    \
         'Builder': 'apidocs/veslo/AResponse.Builder.html',\n    \
         'ClientBuilder': 'apidocs/veslo/client/ClientBuilder.html',\n\
         }\n"
    );
}

#[test]
fn test_generate_twice_appends_two_blocks() {
    let ctx = TestContext::with_apidocs();

    ctx.run(&["generate", "--quiet"]).success().stdout("");
    ctx.write("apidocs/veslo/Extra.html", "");
    ctx.run(&["generate", "--quiet"]).success();

    let conf = ctx.read("conf.py");
    assert_eq!(conf.matches("commonlinks = {").count(), 2);

    ctx.run(&["list"])
        .success()
        .stdout(predicate::str::contains("Extra -> apidocs/veslo/Extra.html"));
}

#[test]
fn test_dry_run_prints_block_without_writing() {
    let ctx = TestContext::with_apidocs();

    ctx.run(&["generate", "--dry-run"])
        .success()
        .stdout(predicate::str::starts_with("commonlinks = {\n"))
        .stdout(predicate::str::contains(
            "'ClientBuilder': 'apidocs/veslo/client/ClientBuilder.html',",
        ));

    assert!(!ctx.path().join("conf.py").exists());
}

#[test]
fn test_generate_json_summary() {
    let ctx = TestContext::with_apidocs();

    let output = ctx.run(&["generate", "--json"]).success().get_output().clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["metadata"]["command"], "generate");
    assert_eq!(json["data"]["entries"], 3);
    assert_eq!(json["data"]["files_seen"], 7);
    assert_eq!(json["data"]["excluded"], 4);
    assert_eq!(json["data"]["format"], "python");
}

#[test]
fn test_generate_toml_output() {
    let ctx = TestContext::with_apidocs();
    ctx.write("book.toml", "[book]\ntitle = \"Veslo\"\n");

    ctx.run(&["generate", "--output", "book.toml"]).success();

    let content = ctx.read("book.toml");
    assert!(content.contains("[book]"));
    assert!(content.contains("[commonlinks]"));
    assert!(content.contains("AResponse = \"apidocs/veslo/AResponse.html\""));
}

#[test]
fn test_settings_file_changes_root_and_exclusions() {
    let ctx = TestContext::new();
    ctx.write("site/apidocs/api/Foo.html", "");
    ctx.write("site/apidocs/api/allclasses-index.html", "");
    ctx.write(
        "commonlinks.toml",
        "[scan]\nroot = \"site/apidocs\"\nexclude = [\"allclasses\"]\n\n[output]\npath = \"links.py\"\n",
    );

    ctx.run(&["generate"]).success();

    assert_eq!(
        ctx.read("links.py"),
        "commonlinks = {\n    'Foo': 'apidocs/api/Foo.html',\n}\n"
    );
}

#[test]
fn test_collisions_warn_and_keep_later_page() {
    let ctx = TestContext::new();
    ctx.write("apidocs/a/Foo.html", "");
    ctx.write("apidocs/b/Foo.html", "");

    ctx.run(&["generate", "--root", "apidocs"])
        .success()
        .stderr(predicate::str::contains("1 symbol name collision(s)"));

    assert!(ctx.read("conf.py").contains("'Foo': 'apidocs/b/Foo.html'"));
}

#[test]
fn test_missing_root_exits_not_found() {
    let ctx = TestContext::new();

    ctx.run(&["generate"])
        .code(3)
        .stderr(predicate::str::contains("API docs root not found"))
        .stderr(predicate::str::contains("To fix:"));
}

#[test]
fn test_malformed_settings_exit_invalid_argument() {
    let ctx = TestContext::with_apidocs();
    ctx.write("commonlinks.toml", "[scan]\nroot = 7\n");

    ctx.run(&["generate"])
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}
