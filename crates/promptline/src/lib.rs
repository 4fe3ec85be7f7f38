//! # `promptline` – The umbrella crate
//!
//! One-stop import gluing together the building-block crates of the
//! workspace:
//!
//! | Crate                     | What it provides                                                              |
//! |---------------------------|-------------------------------------------------------------------------------|
//! | **`promptline-core`**     | Provider-agnostic turns/roles, `Model` ids, provider trait, `ModelInvoker`    |
//! | **`promptline-prompt`**   | Text / vision prompt building, `PromptChain`, persona & history fragments     |
//! | **`promptline-pipeline`** | Sequential node runner with shared state and stop-on-failure semantics        |
//! | **`promptline-store`**    | Append-only conversation persistence (in-memory and JSON-lines backed)       |
//! | **`promptline-openai`**   | OpenAI-compatible HTTP backend adapter *(optional, on by default)*            |
//!
//! ## Design philosophy
//!
//! * **Pipelines stay linear** – a fixed node order, one evolving state
//!   record, stop at the first failure, keep partial progress.  No branching,
//!   no fan-out, no rollback.
//! * **Failures are values** – a provider outage degrades into a partial
//!   result with an error marker; it never crashes the serving process.
//! * **Opt-in providers** – enabling `openai` pulls in `reqwest` and TLS;
//!   without it your binary stays lean and fully provider-agnostic.
//! * **No ambient globals** – adapters and stores are constructed once at
//!   startup by the host and passed by handle into the core.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use promptline::{
//!     ModelInvoker,
//!     generic::Turn,
//!     model::{Model, OpenAiModel},
//!     provider::InvokeRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = promptline::openai::OpenAiAdapterBuilder::new_from_env().build()?;
//!     let invoker = ModelInvoker::new(backend);
//!
//!     let request = InvokeRequest::new(
//!         vec![Turn::user("Say hello!")],
//!         Model::OpenAi(OpenAiModel::Gpt4oMini),
//!     );
//!
//!     let result = invoker.invoke(request).await;
//!     match result.text() {
//!         Some(text) => println!("{text}"),
//!         None => eprintln!("call failed: {:?}", result.error_message()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The runnable programs under `examples/` show the full pattern: reading
//! history from a store, chaining fragments into a prompt, running a one- or
//! two-node pipeline and appending the reply.

pub use promptline_core::*;
pub use promptline_pipeline as pipeline;
pub use promptline_prompt as prompt;
pub use promptline_store as store;

#[cfg(feature = "openai")]
pub use promptline_openai as openai;
