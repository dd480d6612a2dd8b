//! BoxIntentClassifier -- object-safe dynamic dispatch wrapper for
//! IntentClassifier.
//!
//! 1. Define an object-safe `IntentClassifierDyn` trait with boxed futures
//! 2. Blanket-impl `IntentClassifierDyn` for all `T: IntentClassifier`
//! 3. `BoxIntentClassifier` wraps `Box<dyn IntentClassifierDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::UpstreamError;

use super::classifier::{Classification, IntentClassifier};

/// Object-safe version of [`IntentClassifier`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch
/// (`dyn IntentClassifierDyn`). A blanket implementation is provided for all
/// types implementing `IntentClassifier`.
pub trait IntentClassifierDyn: Send + Sync {
    fn name(&self) -> &str;

    fn classify_boxed<'a>(
        &'a self,
        message: &'a str,
        history: &'a [ChatTurn],
        lang: Lang,
    ) -> Pin<Box<dyn Future<Output = Result<Classification, UpstreamError>> + Send + 'a>>;
}

/// Blanket implementation: any `IntentClassifier` automatically implements
/// `IntentClassifierDyn`.
impl<T: IntentClassifier> IntentClassifierDyn for T {
    fn name(&self) -> &str {
        IntentClassifier::name(self)
    }

    fn classify_boxed<'a>(
        &'a self,
        message: &'a str,
        history: &'a [ChatTurn],
        lang: Lang,
    ) -> Pin<Box<dyn Future<Output = Result<Classification, UpstreamError>> + Send + 'a>> {
        Box::pin(self.classify(message, history, lang))
    }
}

/// Type-erased intent classifier for runtime backend selection.
///
/// Since `IntentClassifier` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxIntentClassifier` provides equivalent methods that delegate
/// to the inner `IntentClassifierDyn` trait object, so the serving layer can
/// pick `local_rules` or `delegated` from configuration.
pub struct BoxIntentClassifier {
    inner: Box<dyn IntentClassifierDyn + Send + Sync>,
}

impl BoxIntentClassifier {
    /// Wrap a concrete `IntentClassifier` in a type-erased box.
    pub fn new<T: IntentClassifier + 'static>(classifier: T) -> Self {
        Self {
            inner: Box::new(classifier),
        }
    }

    /// Backend name, for logs.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Classify one user message.
    pub async fn classify(
        &self,
        message: &str,
        history: &[ChatTurn],
        lang: Lang,
    ) -> Result<Classification, UpstreamError> {
        self.inner.classify_boxed(message, history, lang).await
    }
}
