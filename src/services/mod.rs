//! Service layer for the sampler.
//!
//! This module contains the business logic for:
//! - Sitemap byte sources (`SitemapSource`, `HttpSource`)
//! - Sitemap decoding and parsing (`sitemap`)
//! - Child sitemap selection (`select_children`)
//! - Fresh/stale URL extraction (`extract`)

mod extractor;
mod selector;
pub mod sitemap;
mod source;

pub use extractor::extract;
pub use selector::{order_by_recency, select_children};
pub use source::{HttpSource, SitemapSource};
