//! 商品实体

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 商品 ID，由数据库自增生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 商品
///
/// `id` 为空表示尚未持久化
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: bool,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        status: bool,
    ) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            name: name.into(),
            description,
            price,
            status,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// 用另一份表示全量覆盖可变字段，`id` 保持不变
    pub fn overwrite_with(&mut self, other: Product) {
        self.sku = other.sku;
        self.name = other.name;
        self.description = other.description;
        self.price = other.price;
        self.status = other.status;
    }
}

/// 请求中的商品表示
///
/// 所有字段均可缺省，缺失字段由 [`ProductDraft::validate`] 统一报告
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl ProductDraft {
    /// 校验并转换为未持久化的商品
    ///
    /// 返回全部违规描述；调用方提供的 `id` 被忽略
    pub fn validate(self) -> Result<Product, Vec<String>> {
        let mut violations = Vec::new();

        let sku = non_blank(self.sku);
        if sku.is_none() {
            violations.push("sku must not be blank".to_string());
        }

        let name = non_blank(self.name);
        if name.is_none() {
            violations.push("name must not be blank".to_string());
        }

        if self.price.is_none() {
            violations.push("price must not be null".to_string());
        }

        match (sku, name, self.price) {
            (Some(sku), Some(name), Some(price)) => Ok(Product::new(
                sku,
                name,
                self.description,
                price,
                self.status.unwrap_or(false),
            )),
            _ => Err(violations),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: None,
            sku: Some("A1".to_string()),
            name: Some("Widget".to_string()),
            description: Some("A small widget".to_string()),
            price: Some(Decimal::new(999, 2)),
            status: Some(true),
        }
    }

    #[test]
    fn test_valid_draft_becomes_unsaved_product() {
        let product = draft().validate().unwrap();

        assert_eq!(product.id, None);
        assert_eq!(product.sku, "A1");
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("A small widget"));
        assert_eq!(product.price, Decimal::new(999, 2));
        assert!(product.status);
    }

    #[test]
    fn test_incoming_id_is_ignored() {
        let product = ProductDraft {
            id: Some(ProductId(42)),
            ..draft()
        }
        .validate()
        .unwrap();

        assert_eq!(product.id, None);
    }

    #[test]
    fn test_missing_status_defaults_to_inactive() {
        let product = ProductDraft {
            status: None,
            ..draft()
        }
        .validate()
        .unwrap();

        assert!(!product.status);
    }

    #[test]
    fn test_blank_fields_are_reported() {
        let violations = ProductDraft {
            sku: Some("   ".to_string()),
            name: Some(String::new()),
            ..draft()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            violations,
            vec!["sku must not be blank", "name must not be blank"]
        );
    }

    #[test]
    fn test_empty_draft_reports_every_required_field() {
        let violations = ProductDraft::default().validate().unwrap_err();

        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&"price must not be null".to_string()));
    }

    #[test]
    fn test_negative_price_is_accepted() {
        let product = ProductDraft {
            price: Some(Decimal::new(-100, 2)),
            ..draft()
        }
        .validate()
        .unwrap();

        assert!(product.price.is_sign_negative());
    }

    #[test]
    fn test_draft_deserializes_json_numbers() {
        let draft: ProductDraft = serde_json::from_str(
            r#"{"sku":"A1","name":"Widget","price":12.5,"status":false}"#,
        )
        .unwrap();

        assert_eq!(draft.price, Some(Decimal::new(125, 1)));
        assert_eq!(draft.description, None);
        assert_eq!(draft.status, Some(false));
    }

    #[test]
    fn test_overwrite_keeps_id() {
        let mut stored = draft().validate().unwrap().with_id(ProductId(1));
        let incoming = Product::new("B2", "Gadget", None, Decimal::new(1250, 2), false);

        stored.overwrite_with(incoming);

        assert_eq!(stored.id, Some(ProductId(1)));
        assert_eq!(stored.sku, "B2");
        assert_eq!(stored.name, "Gadget");
        assert_eq!(stored.description, None);
        assert_eq!(stored.price, Decimal::new(1250, 2));
        assert!(!stored.status);
    }

    #[test]
    fn test_product_serializes_price_as_number() {
        let product = draft().validate().unwrap().with_id(ProductId(7));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 7);
        assert!((json["price"].as_f64().unwrap() - 9.99).abs() < 1e-9);
        assert_eq!(json["status"], true);
    }
}
