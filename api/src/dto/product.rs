use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::product::{NewProduct, ProductPatch};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity_in_stock: i32,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl CreateProductRequest {
    /// `None` names the first missing required field
    pub fn into_new_product(self) -> Result<NewProduct, &'static str> {
        let name = super::non_empty(self.name).ok_or("name")?;
        let price = self.price.ok_or("price")?;
        Ok(NewProduct {
            name,
            description: self.description,
            price,
            quantity_in_stock: self.quantity_in_stock,
            key_words: self.key_words,
            image_urls: self.image_urls,
        })
    }
}

/// Product creation with images given as one comma-separated string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductWithUrlsRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity_in_stock: i32,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
}

impl From<CreateProductWithUrlsRequest> for CreateProductRequest {
    fn from(request: CreateProductWithUrlsRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            quantity_in_stock: request.quantity_in_stock,
            key_words: request.key_words,
            image_urls: split_urls(&request.image_url),
        }
    }
}

fn split_urls(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity_in_stock: Option<i32>,
    pub key_words: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            quantity_in_stock: request.quantity_in_stock,
            key_words: request.key_words,
            image_urls: request.image_urls,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSavedResponse {
    pub message: String,
    pub id: i64,
}
