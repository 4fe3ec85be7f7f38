//! # Queued chat – a single worker draining a job channel
//!
//! The handler layer of a queued chat service enqueues incoming queries and
//! returns immediately; a worker processes them one at a time.  Here the
//! queue is a bounded `tokio::sync::mpsc` channel and the worker is one task
//! running the same one-node chat pipeline as the interactive examples.  Each
//! job still executes strictly sequentially—the queue adds concurrency
//! *between* requests, never inside a pipeline run.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…
//! cargo run -p promptline --example queued_chat
//! ```

use std::sync::Arc;

use promptline::openai::OpenAiAdapterBuilder;
use promptline::pipeline::{FnNode, PartialUpdate, Pipeline, PipelineState, node::completion_text};
use promptline::prompt::chain::PromptChain;
use promptline::prompt::fragments::HistoryFragment;
use promptline::store::{ConversationStore, MemoryStore};
use promptline::{
    ModelInvoker,
    generic::Turn,
    model::{Model, OpenAiModel},
    provider::InvokeRequest,
};
use tokio::sync::mpsc;

struct ChatJob {
    conversation_id: String,
    query: String,
}

async fn process(
    invoker: &ModelInvoker<promptline::openai::OpenAiAdapter>,
    store: &Arc<MemoryStore>,
    job: ChatJob,
) -> anyhow::Result<()> {
    let history = store.read(&job.conversation_id)?;
    let invoker = invoker.clone();

    let pipeline = Pipeline::new().with_node(FnNode::new("chat", "reply", move |state| {
        let query = state.require_str("query").map(str::to_owned);
        let history = history.clone();
        let invoker = invoker.clone();
        async move {
            let messages = PromptChain::new()
                .with(HistoryFragment::new(history))
                .with(Turn::user(query?))
                .build();
            let request = InvokeRequest::new(messages, Model::OpenAi(OpenAiModel::Gpt4oMini));
            let text = completion_text(invoker.invoke(request).await)?;
            Ok(PartialUpdate::text("reply", text))
        }
    }));

    let out = pipeline
        .run(PipelineState::new().with_text("query", job.query.clone()))
        .await;

    match out.get_str("reply") {
        Some(reply) => {
            println!("[{}] {} -> {}", job.conversation_id, job.query, reply);
            store.append(&job.conversation_id, Turn::user(job.query))?;
            store.append(&job.conversation_id, Turn::assistant(reply))?;
        }
        None => {
            if let Some(failure) = out.error() {
                eprintln!("[{}] job failed: {}", job.conversation_id, failure.message);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let invoker = ModelInvoker::new(backend);
    let store = Arc::new(MemoryStore::new());

    let (tx, mut rx) = mpsc::channel::<ChatJob>(16);

    let worker_store = Arc::clone(&store);
    let worker = tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            if let Err(err) = process(&invoker, &worker_store, job).await {
                eprintln!("worker error: {err}");
            }
        }
    });

    for query in [
        "What is a linear pipeline?",
        "And why would I persist conversation turns?",
    ] {
        tx.send(ChatJob {
            conversation_id: "demo".to_owned(),
            query: query.to_owned(),
        })
        .await?;
        println!("queued: {query}");
    }

    drop(tx);
    worker.await?;
    Ok(())
}
