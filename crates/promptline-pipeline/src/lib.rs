//! Linear prompt pipelines for the *promptline* workspace.
//!
//! A pipeline is a fixed, acyclic sequence of [`node::PipelineNode`]s that
//! thread one evolving [`state::PipelineState`] record through each step.
//! Nodes run **strictly in order** (later nodes depend on earlier output);
//! the first unrecoverable failure stops the run and leaves a partial result
//! for the caller to inspect.
//!
//! ```rust
//! use promptline_pipeline::{
//!     node::{FnNode, NodeFailure},
//!     runner::Pipeline,
//!     state::{PartialUpdate, PipelineState},
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = Pipeline::new().with_node(FnNode::new("shout", "reply", |state| {
//!     let input = state.require_str("input").map(str::to_uppercase);
//!     async move { Ok(PartialUpdate::text("reply", input?)) }
//! }));
//!
//! let out = pipeline
//!     .run(PipelineState::new().with_text("input", "hello"))
//!     .await;
//! assert_eq!(out.get_str("reply"), Some("HELLO"));
//! # }
//! ```

pub mod node;
pub mod runner;
pub mod state;

pub use node::{FnNode, NodeFailure, PipelineNode};
pub use runner::Pipeline;
pub use state::{PartialUpdate, PipelineState};
