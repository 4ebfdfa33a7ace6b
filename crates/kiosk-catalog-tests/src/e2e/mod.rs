//! End-to-end flows through the public facade: build an artifact, load it,
//! dispatch against the demo noticeboard catalog.

pub mod artifact;
pub mod site;
