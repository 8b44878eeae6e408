/// Inventory domain types
use super::ids::{RecordId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Apparel sizes a record can be stocked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApparelSize {
    /// Extra small
    XS,
    /// Small
    S,
    /// Medium
    M,
    /// Large
    L,
    /// Extra large
    XL,
    /// Double extra large
    XXL,
}

impl ApparelSize {
    /// Every size, in ascending order
    pub const ALL: [ApparelSize; 6] = [
        ApparelSize::XS,
        ApparelSize::S,
        ApparelSize::M,
        ApparelSize::L,
        ApparelSize::XL,
        ApparelSize::XXL,
    ];

    /// Wire label of the size
    pub fn as_str(&self) -> &'static str {
        match self {
            ApparelSize::XS => "XS",
            ApparelSize::S => "S",
            ApparelSize::M => "M",
            ApparelSize::L => "L",
            ApparelSize::XL => "XL",
            ApparelSize::XXL => "XXL",
        }
    }
}

impl fmt::Display for ApparelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label does not name a known size
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown apparel size: {0}")]
pub struct UnknownSize(pub String);

impl FromStr for ApparelSize {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApparelSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| UnknownSize(s.to_string()))
    }
}

/// One stocked apparel item owned by a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Unique record identifier
    pub id: RecordId,

    /// Display title
    pub title: String,

    /// Optional long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Product code, shared by every size of a product
    pub code: String,

    /// Stocked size
    pub size: ApparelSize,

    /// Units in stock
    pub quantity: u32,

    /// Unit price
    pub price: f64,

    /// Owning vendor
    pub vendor_id: UserId,

    /// Identity of the last modifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<UserId>,
}

impl InventoryRecord {
    /// Whether this record stocks the given code and size
    pub fn matches(&self, code: &str, size: ApparelSize) -> bool {
        self.code == code && self.size == size
    }

    /// Whether `user_id` owns this record
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.vendor_id == user_id
    }

    /// Apply the fields present in `patch`, recording `editor` as last modifier
    ///
    /// An empty patch leaves the record untouched, `edited_by` included.
    pub fn apply(&mut self, patch: &RecordPatch, editor: &UserId) {
        if patch.is_empty() {
            return;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        self.edited_by = Some(editor.clone());
    }
}

/// A record as submitted for creation, before identity and ownership are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// Display title
    pub title: String,
    /// Optional long description
    pub description: Option<String>,
    /// Product code
    pub code: String,
    /// Stocked size
    pub size: ApparelSize,
    /// Units in stock
    pub quantity: u32,
    /// Unit price
    pub price: f64,
}

impl NewRecord {
    /// Assign a fresh id and the owning vendor
    pub fn into_record(self, vendor_id: UserId) -> InventoryRecord {
        InventoryRecord {
            id: RecordId::generate(),
            title: self.title,
            description: self.description,
            code: self.code,
            size: self.size,
            quantity: self.quantity,
            price: self.price,
            vendor_id,
            edited_by: None,
        }
    }
}

/// Partial update of a record; absent fields are left unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordPatch {
    /// New unit price
    pub price: Option<f64>,
    /// New units in stock
    pub quantity: Option<u32>,
}

impl RecordPatch {
    /// Whether the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.quantity.is_none()
    }
}
