//! HTTP adapters - REST client implementations of the ports.

mod checklist_client;

pub use checklist_client::{ChecklistApiConfig, ReqwestChecklistApi, REQUEST_ID_HEADER};
