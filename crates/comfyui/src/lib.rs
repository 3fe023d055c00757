//! Client for a ComfyUI-style node-graph generation service.
//!
//! The service executes submitted workflow graphs asynchronously: queue a
//! workflow, poll its history entry until it completes or errors, then
//! read the output file references. This crate builds the Wan2.2 video
//! workflows (image-to-video, lip-sync, first-last-frame), wraps the HTTP
//! API, and implements the `VideoProvider` contract on top.

pub mod api;
pub mod client;
pub mod workflow;

pub use api::{ComfyUiApi, ComfyUiApiError};
pub use client::{ComfyUiClient, ComfyUiConfig};
