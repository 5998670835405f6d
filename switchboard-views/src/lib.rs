//! Per-view filter state for the Switchboard admin console.
//!
//! Every list page used to reimplement the same loop with small
//! inconsistencies: a draft copy of the filters the user is editing, an
//! applied copy that was last sent to the server, an apply trigger, and a
//! refetch. This crate implements it once:
//!
//! - [`FilterController`] — a pure state machine (no I/O) owning draft vs
//!   applied filter state, sequence-numbered dispatches, and the optional
//!   URL mirror. Results come back through [`FilterController::complete`],
//!   which discards stale responses.
//! - [`ListView`] — async glue tying a controller to a
//!   [`ResourceQueryEngine`]: dispatches become spawned fetch tasks, and
//!   outcomes are emitted as [`ViewEvent`]s over a channel.
//!
//! [`ResourceQueryEngine`]: switchboard_client::ResourceQueryEngine

mod controller;
mod view;

pub use controller::{
    ApplyMode, Completion, FieldSpec, FilterController, Phase, QueryDispatch, ViewConfig,
};
pub use view::{ListView, ViewEvent};
