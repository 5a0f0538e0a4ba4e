//! Catalog product.

use serde::{Deserialize, Serialize};

/// Separator used when keywords are stored as a single column
pub const KEY_WORDS_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity_in_stock: i32,
    pub key_words: Vec<String>,
    /// Image URLs
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity_in_stock: i32,
    pub key_words: Vec<String>,
    pub image_urls: Vec<String>,
}

/// Partial product update; `image_urls` replaces the whole image list when present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity_in_stock: Option<i32>,
    pub key_words: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity_in_stock {
            product.quantity_in_stock = quantity;
        }
        if let Some(key_words) = &self.key_words {
            product.key_words = key_words.clone();
        }
        if let Some(images) = &self.image_urls {
            product.images = images.clone();
        }
    }
}

/// Join keywords into their stored form
pub fn join_key_words(key_words: &[String]) -> String {
    key_words.join(KEY_WORDS_SEPARATOR)
}

/// Split a stored keyword column, dropping empty entries
pub fn split_key_words(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_words_survive_storage_form() {
        let words = vec!["phone".to_string(), "android".to_string()];
        let stored = join_key_words(&words);
        assert_eq!(stored, "phone, android");
        assert_eq!(split_key_words(&stored), words);
        assert!(split_key_words("").is_empty());
        assert_eq!(split_key_words("a,,b ,"), vec!["a", "b"]);
    }
}
