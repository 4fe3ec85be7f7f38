//! # Chatbot – persistent conversation over a one-node pipeline
//!
//! A line-based chat loop that keeps its history in a JSON-lines store, so a
//! restarted process continues the same conversation:
//!
//! 1. **Read** the stored history for the conversation id.
//! 2. **Run** a single `chat` node: history + fresh input → model → reply.
//! 3. **Append** the user turn and the assistant turn after a successful run.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…
//! cargo run -p promptline --example chatbot [conversation-id]
//! ```
//!
//! A provider failure prints the error marker and appends nothing; the loop
//! (and the process) keeps running.

use std::io::{self, BufRead, Write as _};

use promptline::openai::OpenAiAdapterBuilder;
use promptline::pipeline::{FnNode, PartialUpdate, Pipeline, PipelineState, node::completion_text};
use promptline::prompt::chain::PromptChain;
use promptline::prompt::fragments::HistoryFragment;
use promptline::store::{ConversationStore, JsonlStore};
use promptline::{
    ModelInvoker,
    generic::Turn,
    model::{Model, OpenAiModel},
    provider::InvokeRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let conversation_id = std::env::args().nth(1).unwrap_or_else(|| "1".to_owned());

    // Long-lived handles, built once and shared for the life of the process.
    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let invoker = ModelInvoker::new(backend);
    let store = JsonlStore::open("conversations")?;

    println!("Chatting on conversation `{conversation_id}`. Type 'exit' to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let input = line?.trim().to_owned();
        if input.is_empty() {
            continue;
        }
        if matches!(input.as_str(), "exit" | "quit") {
            println!("Bye!");
            break;
        }

        let history = store.read(&conversation_id)?;
        let invoker = invoker.clone();
        let pipeline = Pipeline::new().with_node(FnNode::new("chat", "reply", move |state| {
            let input = state.require_str("input").map(str::to_owned);
            let history = history.clone();
            let invoker = invoker.clone();
            async move {
                let messages = PromptChain::new()
                    .with(HistoryFragment::new(history))
                    .with(Turn::user(input?))
                    .build();
                let request =
                    InvokeRequest::new(messages, Model::OpenAi(OpenAiModel::Gpt41));
                let text = completion_text(invoker.invoke(request).await)?;
                Ok(PartialUpdate::text("reply", text))
            }
        }));

        let out = pipeline
            .run(PipelineState::new().with_text("input", input.clone()))
            .await;

        match out.get_str("reply") {
            Some(reply) => {
                println!("\nBot: {reply}\n");
                store.append(&conversation_id, Turn::user(input))?;
                store.append(&conversation_id, Turn::assistant(reply))?;
            }
            None => {
                if let Some(failure) = out.error() {
                    eprintln!("\n[{}] {}\n", failure.kind, failure.message);
                }
            }
        }
    }

    Ok(())
}
