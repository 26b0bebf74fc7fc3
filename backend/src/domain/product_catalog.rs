//! Read-only product catalog.
//!
//! The catalog is built once at startup (from the built-in seed or a YAML
//! file) and handed to the services that need it. Nothing mutates it after
//! construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;

use super::errors::{AllocationError, AllocationResult};
use super::models::product::{Product, ProductValidationError};

#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting invalid or duplicated products
    pub fn new(products: Vec<Product>) -> Result<Self, ProductValidationError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id.clone(), position).is_some() {
                return Err(ProductValidationError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// The catalog shipped with the storefront
    pub fn seeded() -> Self {
        Self::new(seed_products()).expect("seed catalog is valid")
    }

    /// Load a catalog from a YAML file with a top-level `products` list
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> AllocationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_yaml_str(&content)?;
        info!("Loaded {} products from {}", catalog.products.len(), path.display());
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> AllocationResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)
            .map_err(|e| AllocationError::Validation(format!("Malformed catalog: {}", e)))?;
        Ok(Self::new(file.products)?)
    }

    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn get_product(&self, product_id: &str) -> Option<&Product> {
        let product = self.index.get(product_id).map(|&position| &self.products[position]);
        if product.is_none() {
            debug!("Product '{}' is not in the catalog", product_id);
        }
        product
    }

    /// Resolve a product or fail with `NotFound`
    pub fn require_product(&self, product_id: &str) -> AllocationResult<&Product> {
        self.get_product(product_id)
            .ok_or_else(|| AllocationError::product_not_found(product_id))
    }

    pub fn products_by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_product(
    id: &str,
    name: &str,
    category: &str,
    price: f64,
    image: &str,
    description: &str,
    daily_revenue: f64,
    withdrawal_period: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        image: image.to_string(),
        description: description.to_string(),
        daily_revenue,
        withdrawal_period,
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        seed_product(
            "iphone-15-pro",
            "iPhone 15 Pro",
            "iPhone",
            999.0,
            "https://images.pexels.com/photos/18525574/pexels-photo-18525574.jpeg?auto=compress&cs=tinysrgb&w=500",
            "The most advanced iPhone ever with titanium design and A17 Pro chip.",
            15.50,
            7,
        ),
        seed_product(
            "macbook-pro-m3",
            "MacBook Pro M3",
            "MacBook",
            1599.0,
            "https://images.pexels.com/photos/18105/pexels-photo.jpg?auto=compress&cs=tinysrgb&w=500",
            "Supercharged by M3 chip for incredible performance and battery life.",
            28.75,
            10,
        ),
        seed_product(
            "airpods-pro-2",
            "AirPods Pro (2nd generation)",
            "AirPods",
            249.0,
            "https://images.pexels.com/photos/8534088/pexels-photo-8534088.jpeg?auto=compress&cs=tinysrgb&w=500",
            "Adaptive Audio and Personalized Spatial Audio for immersive sound.",
            4.25,
            5,
        ),
        seed_product(
            "ipad-pro-m2",
            "iPad Pro M2",
            "iPad",
            799.0,
            "https://images.pexels.com/photos/1334597/pexels-photo-1334597.jpeg?auto=compress&cs=tinysrgb&w=500",
            "The ultimate iPad experience with M2 chip and Liquid Retina display.",
            12.80,
            6,
        ),
        seed_product(
            "apple-watch-ultra-2",
            "Apple Watch Ultra 2",
            "Apple Watch",
            799.0,
            "https://images.pexels.com/photos/437037/pexels-photo-437037.jpeg?auto=compress&cs=tinysrgb&w=500",
            "The most rugged and capable Apple Watch with precision GPS.",
            11.90,
            8,
        ),
        seed_product(
            "mac-studio-m2",
            "Mac Studio M2",
            "Mac",
            1999.0,
            "https://images.pexels.com/photos/4158/apple-iphone-smartphone-desk.jpg?auto=compress&cs=tinysrgb&w=500",
            "Outrageous performance in a compact design with M2 Ultra chip.",
            35.50,
            12,
        ),
    ]
}
