//! Inventory rules: uniqueness, ownership, bulk updates and order fulfilment

use crate::error::{CoreError, Result};
use crate::store::DataStore;
use crate::types::{ApparelSize, InventoryRecord, NewRecord, RecordPatch, Role, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a listing query
///
/// `NoData` is not an error: it signals that nothing visible to the caller
/// matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// At least one record matched
    Found(Vec<InventoryRecord>),
    /// Nothing matched
    NoData,
}

impl Listing {
    fn from_records(records: Vec<InventoryRecord>) -> Self {
        if records.is_empty() {
            Listing::NoData
        } else {
            Listing::Found(records)
        }
    }

    /// Matched records, empty for `NoData`
    pub fn into_records(self) -> Vec<InventoryRecord> {
        match self {
            Listing::Found(records) => records,
            Listing::NoData => Vec::new(),
        }
    }
}

/// One line of a customer order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Requested product code
    pub code: String,
    /// Requested size
    pub size: ApparelSize,
    /// Requested units
    pub quantity: u32,
}

/// One item of a bulk update request
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdate {
    /// Product code of the record to update
    pub code: String,
    /// Size of the record to update
    pub size: ApparelSize,
    /// Fields to change
    pub patch: RecordPatch,
}

/// What happened to one bulk update item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkStatus {
    /// The record was updated and persisted
    Processed,
    /// No record owned by the caller matched
    NotFound,
}

impl BulkStatus {
    /// Human-readable outcome
    pub fn message(&self) -> &'static str {
        match self {
            BulkStatus::Processed => "Message processed",
            BulkStatus::NotFound => "No record found to update",
        }
    }
}

/// Per-item report of a bulk update, in request order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkOutcome {
    /// Product code from the request item
    pub code: String,
    /// Size from the request item
    pub size: ApparelSize,
    /// Outcome of the item
    pub status: BulkStatus,
    /// Human-readable outcome
    pub message: &'static str,
}

/// Inventory operations over a whole-snapshot store
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn DataStore>,
}

impl InventoryService {
    /// Create a service over `store`
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Stock a new record owned by `vendor_id`
    ///
    /// The code/size pair must be free across the whole inventory, not only
    /// among the vendor's own records.
    pub async fn create(&self, new: NewRecord, vendor_id: &UserId) -> Result<InventoryRecord> {
        let mut data = self.store.load().await?;

        let exists = data
            .inventory
            .iter()
            .any(|record| record.matches(&new.code, new.size));
        tracing::info!("Product existence for {} {}: {}", new.code, new.size, exists);

        if exists {
            return Err(CoreError::ProductExists {
                code: new.code,
                size: new.size,
            });
        }

        let record = new.into_record(vendor_id.clone());
        data.inventory.push(record.clone());
        self.store.save_all(&data).await?;

        Ok(record)
    }

    /// Update price and/or quantity of the caller's own record
    pub async fn update(
        &self,
        code: &str,
        size: ApparelSize,
        patch: RecordPatch,
        user_id: &UserId,
    ) -> Result<()> {
        let mut data = self.store.load().await?;

        let position = owned_position(&data.inventory, code, size, user_id);
        tracing::info!("Index for product {} {}: {:?}", code, size, position);

        let Some(index) = position else {
            return Err(CoreError::NoRecordToUpdate {
                code: code.to_string(),
                size,
            });
        };

        data.inventory[index].apply(&patch, user_id);
        self.store.save_all(&data).await
    }

    /// Update several of the caller's records, reporting each item separately
    ///
    /// The store is rewritten after every successful item, so earlier updates
    /// survive a later failure.
    pub async fn update_bulk(
        &self,
        items: Vec<BulkUpdate>,
        user_id: &UserId,
    ) -> Result<Vec<BulkOutcome>> {
        let mut data = self.store.load().await?;
        let mut outcomes = Vec::with_capacity(items.len());

        for item in items {
            let position = owned_position(&data.inventory, &item.code, item.size, user_id);
            tracing::debug!("Index for bulk item {} {}: {:?}", item.code, item.size, position);

            let status = match position {
                Some(index) => {
                    data.inventory[index].apply(&item.patch, user_id);
                    self.store.save_all(&data).await?;
                    BulkStatus::Processed
                }
                None => BulkStatus::NotFound,
            };

            outcomes.push(BulkOutcome {
                code: item.code,
                size: item.size,
                status,
                message: status.message(),
            });
        }

        Ok(outcomes)
    }

    /// Every record visible to the caller
    pub async fn list_all(&self, role: Role, user_id: &UserId) -> Result<Listing> {
        let data = self.store.load().await?;
        if data.inventory.is_empty() {
            return Ok(Listing::NoData);
        }

        Ok(Listing::from_records(visible_to(data.inventory, role, user_id)))
    }

    /// Records with `code` visible to the caller
    pub async fn list_by_code(&self, code: &str, role: Role, user_id: &UserId) -> Result<Listing> {
        let data = self.store.load().await?;

        let matches: Vec<InventoryRecord> = data
            .inventory
            .into_iter()
            .filter(|record| record.code == code)
            .collect();
        if matches.is_empty() {
            return Ok(Listing::NoData);
        }

        Ok(Listing::from_records(visible_to(matches, role, user_id)))
    }

    /// Whether every order line can be served from stock
    ///
    /// Stock is matched across all vendors. Every line is evaluated before
    /// the verdict is formed.
    pub async fn check_fulfilment(&self, lines: &[OrderLine]) -> Result<bool> {
        let data = self.store.load().await?;

        let fulfillable = lines.iter().fold(true, |all, line| {
            let covered = find_stock(&data.inventory, line)
                .is_some_and(|stock| stock.quantity >= line.quantity);
            covered && all
        });

        Ok(fulfillable)
    }

    /// Total price of serving the order from stock
    ///
    /// Stops at the first line that has no stock or not enough of it.
    pub async fn minimum_cost(&self, lines: &[OrderLine]) -> Result<f64> {
        let data = self.store.load().await?;
        let mut total = 0.0;

        for line in lines {
            let stock = find_stock(&data.inventory, line).ok_or_else(|| {
                CoreError::ProductUnavailable {
                    code: line.code.clone(),
                    size: line.size,
                }
            })?;

            if stock.quantity < line.quantity {
                return Err(CoreError::InsufficientStock {
                    code: line.code.clone(),
                    size: line.size,
                });
            }

            total += f64::from(line.quantity) * stock.price;
        }

        Ok(total)
    }
}

fn owned_position(
    inventory: &[InventoryRecord],
    code: &str,
    size: ApparelSize,
    user_id: &UserId,
) -> Option<usize> {
    inventory
        .iter()
        .position(|record| record.matches(code, size) && record.is_owned_by(user_id))
}

fn find_stock<'a>(inventory: &'a [InventoryRecord], line: &OrderLine) -> Option<&'a InventoryRecord> {
    inventory
        .iter()
        .find(|record| record.matches(&line.code, line.size))
}

fn visible_to(records: Vec<InventoryRecord>, role: Role, user_id: &UserId) -> Vec<InventoryRecord> {
    if role.sees_all_vendors() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.is_owned_by(user_id))
        .collect()
}
