//! # Leaf doctor – the classic two-node describe → diagnose pipeline
//!
//! Takes a leaf photo (JPEG or PNG) and runs it through two sequential model
//! calls:
//!
//! 1. **describe** – a vision prompt asks for all visible features of the
//!    leaf, no diagnosis yet.  Output field: `description`.
//! 2. **diagnose** – a text prompt turns that exact description into a
//!    disease/pest assessment with treatment suggestions.  Output field:
//!    `diagnosis`.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…
//! cargo run -p promptline --example leaf_doctor path/to/leaf.jpg
//! ```
//!
//! If the second call fails you still get the description: the runner keeps
//! partial progress and reports which node failed.

use std::path::PathBuf;

use promptline::openai::OpenAiAdapterBuilder;
use promptline::pipeline::{
    FnNode, NodeFailure, PartialUpdate, Pipeline, PipelineState, node::completion_text,
};
use promptline::prompt::builder::{ImageMediaType, ImageSource, PromptPayload, build};
use promptline::{
    ModelInvoker,
    model::{Model, OpenAiModel},
    provider::InvokeRequest,
};

const DESCRIBE_INSTRUCTION: &str = "You are a plant pathology expert. Describe all visible \
     features of this leaf: color changes, spots, holes, edge damage, fungus, or insect \
     trails. Do not guess a diagnosis yet.";

fn diagnose_instruction(description: &str) -> String {
    format!(
        "You are a plant pathology expert. Given the following description of a plant leaf, answer:\n\
         1. What symptoms are visible?\n\
         2. What is the most likely disease?\n\
         3. What pest or pathogen might cause it?\n\
         4. What are recommended organic and chemical treatments?\n\
         \nDescription:\n{description}"
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path: PathBuf = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: leaf_doctor <image.jpg|image.png>"))?
        .into();

    let media_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageMediaType::from_extension)
        .ok_or_else(|| anyhow::anyhow!("only JPEG and PNG images are supported"))?;
    let bytes = std::fs::read(&path)?;
    let image = ImageSource::from_bytes(media_type, &bytes);

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let invoker = ModelInvoker::new(backend);

    let describe_invoker = invoker.clone();
    let diagnose_invoker = invoker;

    let pipeline = Pipeline::new()
        .with_node(FnNode::new("describe", "description", move |state| {
            let encoded = state.require_str("image").map(str::to_owned);
            let invoker = describe_invoker.clone();
            async move {
                let image = ImageSource::from_base64(media_type, encoded?);
                let messages = build(PromptPayload::vision(DESCRIBE_INSTRUCTION, image))
                    .map_err(|err| NodeFailure::invalid_payload(err.to_string()))?;
                let request = InvokeRequest::new(messages, Model::OpenAi(OpenAiModel::Gpt41))
                    .with_max_tokens(800);
                let text = completion_text(invoker.invoke(request).await)?;
                Ok(PartialUpdate::text("description", text))
            }
        }))
        .with_node(FnNode::new("diagnose", "diagnosis", move |state| {
            let description = state.require_str("description").map(str::to_owned);
            let invoker = diagnose_invoker.clone();
            async move {
                let messages = build(PromptPayload::text(diagnose_instruction(&description?)))
                    .map_err(|err| NodeFailure::invalid_payload(err.to_string()))?;
                let request = InvokeRequest::new(messages, Model::OpenAi(OpenAiModel::Gpt41))
                    .with_max_tokens(800);
                let text = completion_text(invoker.invoke(request).await)?;
                Ok(PartialUpdate::text("diagnosis", text))
            }
        }));

    let out = pipeline
        .run(PipelineState::new().with_text("image", image.base64()))
        .await;

    if let Some(description) = out.get_str("description") {
        println!("## Description\n\n{description}\n");
    }
    if let Some(diagnosis) = out.get_str("diagnosis") {
        println!("## Diagnosis\n\n{diagnosis}");
    }
    if let Some(failure) = out.error() {
        eprintln!("analysis incomplete – {} failed: {}", failure.node, failure.message);
    }

    Ok(())
}
