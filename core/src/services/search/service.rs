//! AI-assisted and fuzzy product search over the cached catalog

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use sf_shared::config::ConsultantConfig;

use crate::domain::entities::consultant::SearchLogEntry;
use crate::domain::entities::product::Product;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::{ConsultantRepository, ProductRepository};
use crate::services::cache::TtlCache;
use crate::services::chat::{ChatCompletion, ChatRequest};

use super::ai::{parse_reply, search_messages, SearchHit};
use super::fuzzy::best_score;

/// Scores above this are not reported by fuzzy search
pub const FUZZY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyHit {
    pub item: ProductSummary,
    /// Position of the product in the catalog listing
    #[serde(rename = "refIndex")]
    pub ref_index: usize,
    pub score: f64,
}

pub struct SearchService {
    products: Arc<dyn ProductRepository>,
    cache: Arc<TtlCache<Vec<Product>>>,
    chat: Arc<dyn ChatCompletion>,
    logs: Arc<dyn ConsultantRepository>,
    config: ConsultantConfig,
}

impl SearchService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        cache: Arc<TtlCache<Vec<Product>>>,
        chat: Arc<dyn ChatCompletion>,
        logs: Arc<dyn ConsultantRepository>,
        config: ConsultantConfig,
    ) -> Self {
        Self {
            products,
            cache,
            chat,
            logs,
            config,
        }
    }

    async fn catalog(&self) -> DomainResult<Arc<Vec<Product>>> {
        let products = Arc::clone(&self.products);
        self.cache.get_or_load(|| async move { products.list().await }).await
    }

    /// Ask the chat model which products match `query`; the exchange is logged
    pub async fn ai_search(&self, user_id: i64, query: &str) -> DomainResult<Vec<SearchHit>> {
        let query = required_query(query, "required fields")?;
        let catalog = self.catalog().await?;

        let request = ChatRequest {
            model: self.config.search_model.clone(),
            messages: search_messages(&catalog, query),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let reply = self.chat.complete(&request).await?;

        self.logs
            .log_search(SearchLogEntry {
                user_id,
                request_message: query.to_string(),
                response_message: reply.content.clone(),
                tokens_used: reply.total_tokens,
            })
            .await?;

        let hits = parse_reply(&reply.content);
        tracing::debug!(user_id, hits = hits.len(), "AI search answered");
        Ok(hits)
    }

    /// Match `query` against product names and descriptions, best first
    pub async fn fuzzy_search(&self, query: &str) -> DomainResult<Vec<FuzzyHit>> {
        let query = required_query(query, "requested fields")?;
        let catalog = self.catalog().await?;

        let mut hits: Vec<FuzzyHit> = catalog
            .iter()
            .enumerate()
            .filter_map(|(ref_index, product)| {
                let score = best_score(query, [product.name.as_str(), product.description.as_str()]);
                (score <= FUZZY_THRESHOLD).then(|| FuzzyHit {
                    item: ProductSummary {
                        id: product.id,
                        name: product.name.clone(),
                        description: product.description.clone(),
                    },
                    ref_index,
                    score,
                })
            })
            .collect();

        // Stable sort keeps catalog order among equal scores
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(hits)
    }
}

fn required_query<'a>(query: &'a str, field: &str) -> Result<&'a str, ValidationError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(query)
}
