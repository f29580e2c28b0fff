use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Integration tests for `list`, `resolve` and `expand`
struct TestContext {
    #[allow(dead_code)]
    temp_dir: TempDir,
    docs_path: PathBuf,
}

impl TestContext {
    /// A docs directory whose conf.py already carries a mapping.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let docs_path = temp_dir.path().to_path_buf();
        let ctx = Self {
            temp_dir,
            docs_path,
        };
        ctx.write(
            "conf.py",
            "project = 'veslo'\n\
             commonlinks = {\n    \
             'AResponse': 'apidocs/veslo/AResponse.html',\n    \
             'Foo': 'apidocs/x/Foo.html',\n\
             }\n",
        );
        ctx
    }

    fn write(&self, rel: &str, content: &str) {
        fs::write(self.docs_path.join(rel), content).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.docs_path.join(rel)).unwrap()
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
fn test_list_prints_mapping() {
    let ctx = TestContext::new();

    ctx.run(&["list"])
        .success()
        .stdout(predicate::str::contains(
            "AResponse -> apidocs/veslo/AResponse.html\nFoo -> apidocs/x/Foo.html\n",
        ))
        .stdout(predicate::str::contains("2 link(s) in"));
}

#[test]
fn test_list_json() {
    let ctx = TestContext::new();

    let output = ctx.run(&["list", "--json"]).success().get_output().clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["data"]["links"]["Foo"], "apidocs/x/Foo.html");
    assert_eq!(json["data"]["links"]["AResponse"], "apidocs/veslo/AResponse.html");
}

#[test]
fn test_list_without_mapping_exits_not_found() {
    let ctx = TestContext::new();
    ctx.write("empty.py", "project = 'veslo'\n");

    ctx.run(&["list", "--config", "empty.py"])
        .code(3)
        .stderr(predicate::str::contains("No commonlinks mapping found"));
}

#[test]
fn test_resolve_name_sentinel() {
    let ctx = TestContext::new();

    ctx.run(&["resolve", "Foo", "_"])
        .success()
        .stdout("Foo -> apidocs/x/Foo.html\n");
}

#[test]
fn test_resolve_url_sentinel() {
    let ctx = TestContext::new();

    ctx.run(&["resolve", "Foo", "_url_"])
        .success()
        .stdout("apidocs/x/Foo.html -> apidocs/x/Foo.html\n");
}

#[test]
fn test_resolve_literal_text_json() {
    let ctx = TestContext::new();

    let output = ctx
        .run(&["resolve", "Foo", "the Foo type", "--json"])
        .success()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["data"]["title"], "the Foo type");
    assert_eq!(json["data"]["refuri"], "apidocs/x/Foo.html");
    assert_eq!(json["data"]["internal"], false);
}

#[test]
fn test_resolve_unknown_role() {
    let ctx = TestContext::new();

    ctx.run(&["resolve", "Missing", "_"])
        .code(3)
        .stderr(predicate::str::contains("Role not found: 'Missing'"));
}

#[test]
fn test_resolve_unknown_role_json_error() {
    let ctx = TestContext::new();

    let output = ctx
        .run(&["resolve", "Missing", "_", "--json"])
        .code(3)
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_expand_to_stdout() {
    let ctx = TestContext::new();
    ctx.write(
        "index.rst",
        "Responses are wrapped in :AResponse:`_`.\nSee :Foo:`_url_`.\n",
    );

    ctx.run(&["expand", "index.rst"]).success().stdout(
        "Responses are wrapped in `AResponse <apidocs/veslo/AResponse.html>`__.\n\
         See `apidocs/x/Foo.html <apidocs/x/Foo.html>`__.\n",
    );
}

#[test]
fn test_expand_html_to_file() {
    let ctx = TestContext::new();
    ctx.write("index.rst", ":Foo:`Foo & friends`\n");

    ctx.run(&["expand", "index.rst", "--style", "html", "--output", "index.html"])
        .success();

    assert_eq!(
        ctx.read("index.html"),
        "<a class=\"reference external\" href=\"apidocs/x/Foo.html\">Foo &amp; friends</a>\n"
    );
}

#[test]
fn test_expand_strict_fails_on_unknown_roles() {
    let ctx = TestContext::new();
    ctx.write("index.rst", "See :ref:`intro` and :Foo:`_`.\n");

    ctx.run(&["expand", "index.rst"])
        .success()
        .stderr(predicate::str::contains("Unregistered roles left as-is: ref"));

    ctx.run(&["expand", "index.rst", "--strict"])
        .code(4)
        .stderr(predicate::str::contains("Unknown roles"));
}

#[test]
fn test_expand_with_config_lacking_mapping() {
    let ctx = TestContext::new();
    ctx.write("empty.py", "project = 'veslo'\ncommonlinks = {}\n");
    ctx.write("index.rst", "See :Foo:`_`.\n");

    ctx.run(&["expand", "index.rst", "--config", "empty.py"])
        .success()
        .stdout("See :Foo:`_`.\n")
        .stderr(predicate::str::contains("Unregistered roles left as-is: Foo"));

    ctx.run(&["expand", "index.rst", "--config", "empty.py", "--strict"])
        .code(4)
        .stderr(predicate::str::contains("Unknown roles in index.rst: Foo"));
}
