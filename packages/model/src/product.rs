use serde::{Deserialize, Serialize};

/// Product record supplied by the store's product data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Price as shown on the storefront
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Store-relative path of the product's detail page
    pub fn path(&self) -> String {
        if self.slug.is_empty() {
            format!("/products/{}", self.id)
        } else {
            format!("/products/{}", self.slug)
        }
    }
}

/// Distinct non-empty categories, in order of first appearance
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        let category = product.category.trim();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: 12.5,
            image: String::new(),
            slug: String::new(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_display_price() {
        assert_eq!(product("1", "").display_price(), "$12.50");
    }

    #[test]
    fn test_distinct_categories() {
        let products = vec![
            product("1", "Shoes"),
            product("2", "Hats"),
            product("3", "Shoes"),
            product("4", " "),
        ];
        assert_eq!(categories(&products), vec!["Shoes", "Hats"]);
    }

    #[test]
    fn test_path_falls_back_to_id() {
        assert_eq!(product("42", "").path(), "/products/42");
    }
}
