//! Product records and the request shapes that create and modify them.
//!
//! - [`NewProduct`] carries the six content fields, all required.
//! - [`ProductPatch`] carries the same fields, all optional. Absent (or `null`)
//!   fields are left untouched when the patch is applied.
//! - [`Product`] is a stored record: the content fields plus its [`ProductId`].

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::id::ProductId;
use super::price::Price;

/// Image references (URLs or static paths), kept in the shape the client sent.
///
/// Either a JSON array of strings or a single comma-separated string such as
/// `"cake-1.jpg,cake-2.jpg"`. Text is stored verbatim; [`Images::paths`]
/// splits it for callers that need individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Images {
    List(Vec<String>),
    Text(String),
}

impl Images {
    /// The individual image paths, splitting text on commas.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::List(images) => images.iter().map(String::as_str).collect(),
            Self::Text(text) => text.split(',').collect(),
        }
    }
}

impl From<Vec<String>> for Images {
    fn from(images: Vec<String>) -> Self {
        Self::List(images)
    }
}

/// Body of a create request: every content field must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub images: Images,
    pub category: String,
    /// Opaque size descriptor: a label like `"Large"` or a structured value.
    pub size: JsonValue,
    pub description: String,
}

impl NewProduct {
    /// Attach a store-assigned ID, producing a full record.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            images: self.images,
            category: self.category,
            size: self.size,
            description: self.description,
        }
    }
}

/// Body of an update request: only the fields present are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductPatch {
    /// Returns true if the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.images.is_none()
            && self.category.is_none()
            && self.size.is_none()
            && self.description.is_none()
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub images: Images,
    pub category: String,
    pub size: JsonValue,
    pub description: String,
}

impl Product {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vanilla_cake() -> JsonValue {
        json!({
            "name": "Vanilla Cake",
            "price": 25.0,
            "images": ["a.jpg"],
            "category": "Cake",
            "size": "Large",
            "description": "Classic"
        })
    }

    #[test]
    fn test_new_product_requires_every_field() {
        for field in ["name", "price", "images", "category", "size", "description"] {
            let mut body = vanilla_cake();
            body.as_object_mut().unwrap().remove(field);

            let err = serde_json::from_value::<NewProduct>(body).unwrap_err();
            assert!(
                err.to_string().contains(&format!("missing field `{field}`")),
                "unexpected error for {field}: {err}"
            );
        }
    }

    #[test]
    fn test_new_product_ignores_unknown_fields() {
        let mut body = vanilla_cake();
        body["_id"] = json!("should-not-be-kept");
        body["featured"] = json!(true);

        let product: NewProduct = serde_json::from_value(body).unwrap();
        let stored = serde_json::to_value(&product).unwrap();
        assert_eq!(stored, vanilla_cake());
    }

    #[test]
    fn test_size_is_opaque() {
        let mut body = vanilla_cake();
        body["size"] = json!({"diameter_in": 8, "servings": 12});

        let product: NewProduct = serde_json::from_value(body).unwrap();
        assert_eq!(product.size, json!({"diameter_in": 8, "servings": 12}));
    }

    #[test]
    fn test_images_keep_shape_as_sent() {
        for sent in [
            json!(["cake-1.jpg", "cake-2.jpg"]),
            json!("cake-1.jpg,cake-2.jpg"),
            json!(" cake-1.jpg , ,"),
            json!(""),
            json!([]),
        ] {
            let images: Images = serde_json::from_value(sent.clone()).unwrap();
            assert_eq!(serde_json::to_value(&images).unwrap(), sent);
        }
    }

    #[test]
    fn test_images_paths() {
        let text = Images::Text("cake-1.jpg,cake-2.jpg".to_string());
        assert_eq!(text.paths(), ["cake-1.jpg", "cake-2.jpg"]);

        let list = Images::from(vec!["a.jpg".to_string()]);
        assert_eq!(list.paths(), ["a.jpg"]);
    }

    #[test]
    fn test_images_rejects_non_text() {
        assert!(serde_json::from_value::<Images>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Images>(json!(42)).is_err());
    }

    #[test]
    fn test_patch_fields_are_optional() {
        let patch: ProductPatch = serde_json::from_value(json!({"price": 30.0})).unwrap();
        assert_eq!(patch.price, Some(Price::from_f64(30.0).unwrap()));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());

        let empty: ProductPatch = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_patch_null_is_absent() {
        let patch: ProductPatch =
            serde_json::from_value(json!({"name": null, "size": null})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ProductPatch {
            price: Some(Price::from_f64(30.0).unwrap()),
            category: Some("Cupcakes".to_string()),
            ..ProductPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"price": 30.0, "category": "Cupcakes"})
        );
    }

    #[test]
    fn test_apply_leaves_other_fields_untouched() {
        let new: NewProduct = serde_json::from_value(vanilla_cake()).unwrap();
        let id = ProductId::new_v4();
        let mut product = new.clone().into_product(id);

        product.apply(ProductPatch {
            price: Some(Price::from_f64(30.0).unwrap()),
            ..ProductPatch::default()
        });

        assert_eq!(product.id, id);
        assert_eq!(product.price, Price::from_f64(30.0).unwrap());
        assert_eq!(product.name, new.name);
        assert_eq!(product.images, new.images);
        assert_eq!(product.category, new.category);
        assert_eq!(product.size, new.size);
        assert_eq!(product.description, new.description);
    }

    #[test]
    fn test_product_wire_shape() {
        let id = ProductId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let product = serde_json::from_value::<NewProduct>(vanilla_cake())
            .unwrap()
            .into_product(id);

        let mut expected = vanilla_cake();
        expected["id"] = json!("67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(serde_json::to_value(&product).unwrap(), expected);
    }
}
