//! The personalization entry point

use persona_core::Template;
use persona_parser::TemplateParser;
use persona_repository::ValueStore;
use persona_runtime::{ReferenceResolver, TemplateRenderer};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Result, SdkError};
use crate::message::MessageParts;

/// Personalizes templates against a value store.
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct Personalizer {
    store: Arc<dyn ValueStore>,
    enable_tracing: bool,
}

impl Personalizer {
    /// Create a personalizer over an existing store
    pub fn new(store: Arc<dyn ValueStore>) -> Self {
        Self {
            store,
            enable_tracing: false,
        }
    }

    pub(crate) fn with_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    pub fn store(&self) -> &Arc<dyn ValueStore> {
        &self.store
    }

    /// Personalize `raw_text` for the recipient with `recipient_address`.
    ///
    /// Fails only when the address cannot be mapped to a recipient. Unknown
    /// names become empty and malformed syntax is left in place.
    pub fn personalize(&self, raw_text: &str, recipient_address: &str) -> Result<String> {
        self.render(&self.prepare(raw_text), recipient_address)
    }

    /// Parse a template once for rendering to many recipients
    pub fn prepare(&self, raw_text: &str) -> Template {
        TemplateParser::parse(raw_text)
    }

    /// Render a prepared template for one recipient
    pub fn render(&self, template: &Template, recipient_address: &str) -> Result<String> {
        let started = Instant::now();
        let resolver = ReferenceResolver::for_address(self.store.as_ref(), recipient_address)?;
        let text = TemplateRenderer::new(&resolver).render(template);

        if self.enable_tracing {
            tracing::info!(
                "Personalized template for {} (recipient {}) in {:?}",
                recipient_address,
                resolver.recipient(),
                started.elapsed()
            );
        }
        Ok(text)
    }

    /// Personalize the subject, text body and HTML body of a message
    pub fn personalize_message(
        &self,
        message: &MessageParts,
        recipient_address: &str,
    ) -> Result<MessageParts> {
        let resolver = ReferenceResolver::for_address(self.store.as_ref(), recipient_address)?;
        let renderer = TemplateRenderer::new(&resolver);
        let apply = |text: &str| renderer.render(&TemplateParser::parse(text));

        Ok(MessageParts {
            subject: if message.subject.is_empty() {
                String::new()
            } else {
                apply(&message.subject)
            },
            text: apply(&message.text),
            html: message.html.as_deref().map(apply),
        })
    }

    /// Personalize one template for many recipients concurrently.
    ///
    /// Each recipient is rendered on a blocking task; results come back in
    /// input order and a failing recipient does not affect the others.
    pub async fn personalize_batch<A>(&self, raw_text: &str, addresses: &[A]) -> Vec<Result<String>>
    where
        A: AsRef<str>,
    {
        let template = Arc::new(self.prepare(raw_text));

        let tasks = addresses.iter().map(|address| {
            let personalizer = self.clone();
            let template = Arc::clone(&template);
            let address = address.as_ref().to_string();
            tokio::task::spawn_blocking(move || personalizer.render(&template, &address))
        });

        let results: Vec<Result<String>> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(SdkError::TaskFailed(e.to_string())),
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!("{} of {} recipients could not be personalized", failed, results.len());
        }
        results
    }
}

impl std::fmt::Debug for Personalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Personalizer")
            .field("enable_tracing", &self.enable_tracing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_repository::MemoryStore;

    fn personalizer() -> Personalizer {
        let store = MemoryStore::new();
        let alice = store.add_recipient("alice@example.com");
        store.set_attribute(&alice, "firstname", "Alice").unwrap();
        store.set_attribute(&alice, "city", "Lyon").unwrap();
        let bob = store.add_recipient("bob@example.com");
        store.set_attribute(&bob, "firstname", "Bob").unwrap();
        Personalizer::new(Arc::new(store))
    }

    #[test]
    fn test_personalize() {
        let p = personalizer();
        assert_eq!(
            p.personalize("Hello {%firstname%}!", "alice@example.com").unwrap(),
            "Hello Alice!"
        );
    }

    #[test]
    fn test_unknown_recipient_is_error() {
        let p = personalizer();
        let err = p.personalize("Hello", "nobody@example.com").unwrap_err();
        assert!(matches!(err, SdkError::RecipientNotFound(_)));
    }

    #[test]
    fn test_prepared_template_reused() {
        let p = personalizer();
        let template = p.prepare("{if(%city%){From %city%}{Somewhere}}");
        assert_eq!(p.render(&template, "alice@example.com").unwrap(), "From Lyon");
        assert_eq!(p.render(&template, "bob@example.com").unwrap(), "Somewhere");
    }

    #[test]
    fn test_personalize_message() {
        let p = personalizer();
        let message = MessageParts::new("Hi {%firstname%}", "Dear {%firstname%},")
            .with_html("<p>{%firstname%}</p>");

        let out = p.personalize_message(&message, "alice@example.com").unwrap();
        assert_eq!(out.subject, "Hi Alice");
        assert_eq!(out.text, "Dear Alice,");
        assert_eq!(out.html.as_deref(), Some("<p>Alice</p>"));
    }

    #[test]
    fn test_personalize_message_empty_subject_and_no_html() {
        let p = personalizer();
        let message = MessageParts::new("", "Hello {%firstname%}");
        let out = p.personalize_message(&message, "bob@example.com").unwrap();
        assert_eq!(out.subject, "");
        assert_eq!(out.text, "Hello Bob");
        assert!(out.html.is_none());
    }

    #[tokio::test]
    async fn test_personalize_batch_keeps_order() {
        let p = personalizer();
        let addresses = ["bob@example.com", "nobody@example.com", "alice@example.com"];
        let results = p.personalize_batch("Hi {%firstname%}", &addresses[..]).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), "Hi Bob");
        assert!(matches!(results[1], Err(SdkError::RecipientNotFound(_))));
        assert_eq!(results[2].as_ref().unwrap(), "Hi Alice");
    }
}
