//! Scripted provider for exercising the fallback chain without HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ProviderError, TextProvider};

pub enum Scripted {
    Text(String),
    Status(u16),
}

pub struct ScriptedProvider {
    name: &'static str,
    outcome: Scripted,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn replying(name: &'static str, text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome: Scripted::Text(text.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str, status: u16) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome: Scripted::Status(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Scripted::Text(text) => Ok(text.clone()),
            Scripted::Status(status) => Err(ProviderError::Api {
                status: *status,
                message: format!("scripted failure {status}"),
            }),
        }
    }
}
