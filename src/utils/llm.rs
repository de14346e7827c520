//! The endpoint of prompt construction: a generative model that replies to a prompt.

use anyhow::Result;
use async_trait::async_trait;

#[cfg(feature = "openai")]
pub mod openai;

/// The reply of a generative model to one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation<E = ()> {
    /// Generated text
    pub text: String,
    /// Anything else the model reports with the text, e.g. token usage
    pub extra: E,
}

impl Generation {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_extra(text, ())
    }
}

impl<E> Generation<E> {
    pub fn with_extra(text: impl Into<String>, extra: E) -> Self {
        Self {
            text: text.into(),
            extra,
        }
    }
}

//TODO: when async fn in trait is usable with dyn and Send bounds, remove async_trait macro

/// Trait for asynchronously generating a reply to a prompt.
#[async_trait]
pub trait AsyncGenerate: Send + Sync {
    type OutputExtra: Send;
    async fn generate(&self, prompt: &str) -> Result<Generation<Self::OutputExtra>>;
}

#[async_trait]
impl<'a, T: AsyncGenerate + ?Sized> AsyncGenerate for &'a T {
    type OutputExtra = T::OutputExtra;
    async fn generate(&self, prompt: &str) -> Result<Generation<Self::OutputExtra>> {
        (**self).generate(prompt).await
    }
}
