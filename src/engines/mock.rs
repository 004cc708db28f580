/*!
 * Mock translation engine for testing.
 *
 * Behaviors simulate what an opaque remote service may do to substituted
 * text:
 * - `MockEngine::identity()` - returns the input unchanged
 * - `MockEngine::uppercase()` - case-folds the whole text, the classic way
 *   a translation step breaks exact reverse substitution
 * - `MockEngine::failing()` - always fails with an error
 * - `MockEngine::slow(delay_ms)` - succeeds after a delay
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::EngineError;

use super::{TranslationEngine, TranslationRequest, TranslationResponse};

/// Behavior mode for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Return the input text unchanged
    Identity,
    /// Uppercase the whole text
    Uppercase,
    /// Always fail with an error
    Failing,
    /// Succeed after a delay (for timeout testing)
    Slow {
        /// Delay before responding, in milliseconds
        delay_ms: u64,
    },
}

/// Mock engine for exercising the pipeline without a remote service
#[derive(Debug)]
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,

    /// Number of translate calls served so far
    request_count: Arc<AtomicUsize>,

    /// Custom response generator (optional, overrides the behavior text)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a mock that echoes input back unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock that uppercases the text
    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that responds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of translate calls served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the request counter, for assertions after the
    /// engine has been boxed away
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        self.request_count.clone()
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, EngineError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(generator) = self.custom_response {
            return Ok(TranslationResponse {
                text: generator(&request),
            });
        }

        match self.behavior {
            MockBehavior::Identity => Ok(TranslationResponse { text: request.text }),
            MockBehavior::Uppercase => Ok(TranslationResponse {
                text: request.text.to_uppercase(),
            }),
            MockBehavior::Failing => Err(EngineError::RequestFailed(
                "mock engine configured to fail".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(TranslationResponse { text: request.text })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        match self.behavior {
            MockBehavior::Failing => Err(EngineError::ConnectionError(
                "mock engine configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
