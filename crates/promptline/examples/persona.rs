//! # Persona chat – an OpenAI-compatible gateway and a styled system prompt
//!
//! A terminal REPL that talks to Google’s Generative Language endpoint
//! through its OpenAI-compatible surface, demonstrating:
//!
//! * `Model::Custom` for a model name outside the OpenAI enum,
//! * a persona fragment prepended to every prompt,
//! * in-memory history (one session, nothing persisted).
//!
//! This example calls the invoker directly—no pipeline—since a single-step
//! conversation needs none.
//!
//! ```bash
//! export API_KEY=…    # Generative Language API key
//! cargo run -p promptline --example persona
//! ```

use std::io::{self, BufRead, Write as _};

use promptline::openai::OpenAiAdapterBuilder;
use promptline::prompt::chain::PromptChain;
use promptline::prompt::fragments::{HistoryFragment, PersonaFragment};
use promptline::store::{ConversationStore, MemoryStore};
use promptline::{ModelInvoker, generic::Turn, model::Model, provider::InvokeRequest};

const PERSONA: &str = "You are a seasoned software educator who runs a popular programming \
     YouTube channel. You are an expert in Python, JavaScript, React and Node.js.\n\
     Respond in a calm and friendly manner, as if chatting with a friend, using phrases \
     like \"Hey there!\", \"Sure thing!\" and \"No problem!\".";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("API_KEY")
        .map_err(|_| anyhow::anyhow!("API_KEY must be set in the environment"))?;

    let backend = OpenAiAdapterBuilder::new()
        .with_api_key(api_key)
        .with_base_url(BASE_URL)
        .build()?;
    let invoker = ModelInvoker::new(backend);
    let store = MemoryStore::new();
    let conversation_id = "repl";

    println!("Chat with the persona bot. Type 'exit' to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let query = line?.trim().to_owned();
        if query.is_empty() {
            continue;
        }
        if matches!(query.as_str(), "exit" | "quit") {
            println!("Bye bye! 👋");
            break;
        }

        let messages = PromptChain::new()
            .with(PersonaFragment::new(PERSONA))
            .with(HistoryFragment::new(store.read(conversation_id)?))
            .with(Turn::user(query.clone()))
            .build();

        let request = InvokeRequest::new(messages, Model::from("gemini-1.5-flash"));
        let result = invoker.invoke(request).await;

        match result.text() {
            Some(reply) => {
                println!("\n{reply}\n");
                store.append(conversation_id, Turn::user(query))?;
                store.append(conversation_id, Turn::assistant(reply))?;
            }
            None => {
                eprintln!(
                    "Oops! Something went wrong: {}",
                    result.error_message().unwrap_or("unknown error")
                );
            }
        }
    }

    Ok(())
}
