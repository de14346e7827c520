use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::Client;
use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CompletionUsage, CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use log::warn;
use url::Url;

use crate::utils::llm::{AsyncGenerate, Generation};

/// Chat model from OpenAI API. Each prompt is sent as a single user message.
#[derive(Clone, Debug)]
pub struct OpenAIChat {
    pub client: Client<OpenAIConfig>,
    pub model: String,
}

impl OpenAIChat {
    /// Use the API key from the `OPENAI_API_KEY` environment variable.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    /// Use an OpenAI-compatible endpoint other than the official one.
    pub fn with_api_base(model: impl Into<String>, api_base: Url, api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base.as_str().trim_end_matches('/'))
            .with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl AsyncGenerate for OpenAIChat {
    type OutputExtra = Option<CompletionUsage>;

    async fn generate(&self, prompt: &str) -> Result<Generation<Self::OutputExtra>> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()?
            .into();
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(vec![message])
            .build()?;
        let response = self.client.chat().create(request).await?;
        let text = response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| {
                warn!("Model {} replied without content, using an empty reply", self.model);
                String::new()
            });
        Ok(Generation::with_extra(text, response.usage))
    }
}
