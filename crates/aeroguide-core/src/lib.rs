//! Assistant logic and provider trait definitions for aeroguide.
//!
//! This crate defines the "ports" (completion, embedding, vector search,
//! music catalog, session store) that the infrastructure layer implements,
//! plus everything that needs no I/O of its own: the gazetteer, the zone
//! topology, the navigation dialogue machine, intent classification, and
//! response composition. It depends only on `aeroguide-types` -- never on
//! `aeroguide-infra` or any HTTP crate.

pub mod answer;
pub mod assistant;
pub mod compose;
pub mod currency;
pub mod gazetteer;
pub mod intent;
pub mod music;
pub mod nav;
pub mod reading_time;
pub mod session;
