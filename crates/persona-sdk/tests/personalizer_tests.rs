//! Integration tests for the Personalizer built from snapshot files

use persona_sdk::{CacheSettings, EngineConfig, MessageParts, PersonalizerBuilder, SdkError};
use tempfile::TempDir;

const STORE: &str = r#"
attributes: [tier]
recipients:
  - address: alice@example.com
    attributes:
      firstname: Alice
      gender: f
      tier: gold
      country: BE
  - address: bob@example.com
    attributes:
      firstname: Bob
      gender: m
variables:
  - name: title
    attribute: gender
    conditions:
      - expression: m
        value: Mr.
      - expression: f
        value: Ms.
  - name: discount
    conditions:
      - expression: tier == "gold" AND (country == "FR" OR country == "BE")
        value: 25%
      - expression: tier == "gold"
        value: 20%
"#;

fn write_store(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("store.yaml");
    std::fs::write(&path, STORE).unwrap();
    path
}

#[tokio::test]
async fn test_personalize_from_file() {
    let dir = TempDir::new().unwrap();
    let personalizer = PersonalizerBuilder::new()
        .with_store_file(write_store(&dir))
        .build()
        .await
        .unwrap();

    let template = "Dear {%title%} {%firstname%},{if(%discount%){ you save %discount%!}{ see you soon.}}";
    assert_eq!(
        personalizer.personalize(template, "alice@example.com").unwrap(),
        "Dear Ms. Alice, you save 25%!"
    );
    assert_eq!(
        personalizer.personalize(template, "bob@example.com").unwrap(),
        "Dear Mr. Bob, see you soon."
    );
}

#[tokio::test]
async fn test_build_from_config() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::new()
        .with_store_file(write_store(&dir))
        .with_cache(CacheSettings::disabled())
        .enable_tracing(true);

    let personalizer = PersonalizerBuilder::new()
        .with_config(config)
        .build()
        .await
        .unwrap();

    let result = personalizer.personalize("Hi", "carol@example.com");
    assert!(matches!(result, Err(SdkError::RecipientNotFound(_))));
}

#[tokio::test]
async fn test_message_and_batch() {
    let dir = TempDir::new().unwrap();
    let personalizer = PersonalizerBuilder::new()
        .with_store_file(write_store(&dir))
        .build()
        .await
        .unwrap();

    let message = MessageParts::new("{%title%} {%firstname%}", "Offer: {%discount%}")
        .with_html("<b>{%discount%}</b>");
    let out = personalizer
        .personalize_message(&message, "alice@example.com")
        .unwrap();
    assert_eq!(out.subject, "Ms. Alice");
    assert_eq!(out.text, "Offer: 25%");
    assert_eq!(out.html.as_deref(), Some("<b>25%</b>"));

    let addresses = vec!["alice@example.com".to_string(), "bob@example.com".to_string()];
    let results = personalizer
        .personalize_batch("{%firstname%}", addresses.as_slice())
        .await;
    let texts: Vec<String> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(texts, vec!["Alice", "Bob"]);
}
