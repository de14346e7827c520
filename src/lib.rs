//! # batchprompt
//!
//! Jailbreak-resistant prompt construction and rate-limited batched dispatch to LLMs
//!
//! ## Why `batchprompt`
//!
//! Evaluating how an LLM behaves under different prompt framings means building a lot of prompts, sending them
//! all to an endpoint that throttles you, and keeping track of which reply belongs to which prompt.
//! `batchprompt` does exactly that and nothing more.
//!
//! ## Concepts and Design
//! The crate is two independent halves that only share plain strings:
//!
//! `PromptCollector -> Vec<String> -> BatchDispatcher -> Vec<String>`
//!
//! ### Prompt Builder
//!
//! A [`PromptBuilder`](crate::prompt::PromptBuilder) combines a user's prompt with instructions for the LLM. It is
//! configured once with the role of the assistant and two separator characters, and then builds any number of prompts.
//!
//! How a prompt is framed is controlled by [`Settings`](crate::prompt::settings::Settings), usually written as a short
//! string of markers, so `"rp"` means "introduce the role and fence the user's prompt between two lines of the
//! paragraph separator".
//!
//! ### Prompt Collector
//!
//! A [`PromptCollector`](crate::collector::PromptCollector) builds a prompt for every combination of user's prompts,
//! instructions and settings, and remembers the [`Recipe`](crate::collector::Recipe) of each. The collected prompts can be
//! exported as a labeled [`Table`](crate::utils::table::Table).
//!
//! ### Endpoint or LLM
//!
//! Anything that implements [`AsyncGenerate`](crate::utils::llm::AsyncGenerate), which turns a prompt into a
//! [`Generation`](crate::utils::llm::Generation) with a `text` field. An OpenAI adaptor lives in
//! `utils::llm::openai` behind the `openai` feature.
//!
//! ### Batch Dispatcher
//!
//! A [`BatchDispatcher`](crate::dispatch::BatchDispatcher) sends prompts to the endpoint in batches. Requests in a batch
//! run concurrently, batches run one after another with a pause in between, and replies come back in the order of the
//! prompts.
//!
//! ## Features
//! * `openai` (default): [`AsyncGenerate`](crate::utils::llm::AsyncGenerate) for OpenAI chat models via `async-openai`
//! * `terminal_printing` (default): a progress line for the terminal via `termimad`
//!
//! ## Logging
//! `batchprompt` logs through the `log` facade and never installs a logger itself.
//!

pub mod prompt;
pub mod collector;
pub mod dispatch;
pub mod utils;
