//! Integration tests for the persona command

use clap::Parser;
use persona_cli::cli::Cli;
use tempfile::TempDir;

const STORE: &str = r#"
recipients:
  - address: alice@example.com
    attributes:
      firstname: Alice
      age: 25
  - address: bob@example.com
    attributes:
      firstname: Bob
"#;

const TEMPLATE: &str = "Hello {%firstname%}, {if(%age%){you are %age%}{age unknown}}.";

fn setup() -> (TempDir, String, String) {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store.yaml");
    let template = dir.path().join("welcome.txt");
    std::fs::write(&store, STORE).unwrap();
    std::fs::write(&template, TEMPLATE).unwrap();
    let store = store.display().to_string();
    let template = template.display().to_string();
    (dir, store, template)
}

fn cli(store: &str, template: &str, recipients: &[&str]) -> Cli {
    let mut args = vec!["persona", "--store", store, "--template", template];
    for r in recipients {
        args.push("--recipient");
        args.push(r);
    }
    Cli::parse_from(args)
}

#[tokio::test]
async fn test_single_recipient() {
    let (_dir, store, template) = setup();
    let output = persona_cli::run(cli(&store, &template, &["alice@example.com"]))
        .await
        .unwrap();
    assert_eq!(output, "Hello Alice, you are 25.");
}

#[tokio::test]
async fn test_several_recipients() {
    let (_dir, store, template) = setup();
    let output = persona_cli::run(cli(
        &store,
        &template,
        &["alice@example.com", "bob@example.com"],
    ))
    .await
    .unwrap();

    assert_eq!(
        output,
        "==> alice@example.com <==\nHello Alice, you are 25.\n\
         ==> bob@example.com <==\nHello Bob, age unknown.\n"
    );
}

#[tokio::test]
async fn test_unknown_recipient_fails() {
    let (_dir, store, template) = setup();
    let err = persona_cli::run(cli(&store, &template, &["carol@example.com"]))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("carol@example.com"));
}

#[tokio::test]
async fn test_missing_template_fails() {
    let (dir, store, _template) = setup();
    let missing = dir.path().join("missing.txt").display().to_string();
    let err = persona_cli::run(cli(&store, &missing, &["alice@example.com"]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read template"));
}
