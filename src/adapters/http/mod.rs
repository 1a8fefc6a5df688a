//! HTTP front end.

pub mod campaign_http;
mod page;

pub use campaign_http::{CampaignHttpConfig, CampaignHttpServer, GenerateRequest};
