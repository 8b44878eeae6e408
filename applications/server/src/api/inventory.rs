/// Inventory API routes
use super::{Envelope, NO_DATA_FOUND};
use crate::{
    error::{LogFailure, Result, ServerError},
    middleware::BearerToken,
    state::AppState,
    validation::{Valid, Validate, Violations},
};
use apparel_core::{
    ApparelSize, BulkOutcome, BulkUpdate, InventoryRecord, Listing, NewRecord, OrderLine,
    RecordPatch, Role,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateInventoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
}

impl Validate for CreateInventoryRequest {
    type Output = NewRecord;

    fn validate(self) -> std::result::Result<NewRecord, Violations> {
        let mut v = Violations::new();
        let title = v.text("title", self.title, 1, Some(50));
        let description = v.optional_text("description", self.description, 1, Some(200));
        let code = v.text("code", self.code, 1, None);
        let size = v.one_of("size", self.size, &ApparelSize::ALL);
        let quantity = v
            .required("quantity", self.quantity)
            .and_then(|q| v.count("quantity", q));
        let price = v
            .required("price", self.price)
            .and_then(|p| v.amount("price", p));

        v.finish(|| {
            Some(NewRecord {
                title: title?,
                description: description?,
                code: code?,
                size: size?,
                quantity: quantity?,
                price: price?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    pub price: Option<f64>,
    pub quantity: Option<f64>,
}

impl Validate for UpdateInventoryRequest {
    type Output = RecordPatch;

    fn validate(self) -> std::result::Result<RecordPatch, Violations> {
        let mut v = Violations::new();
        let price = v.optional_amount("price", self.price);
        let quantity = v.optional_count("quantity", self.quantity);

        v.finish(|| {
            Some(RecordPatch {
                price: price?,
                quantity: quantity?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkItemRequest {
    pub code: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub items: Option<Vec<BulkItemRequest>>,
}

impl Validate for BulkUpdateRequest {
    type Output = Vec<BulkUpdate>;

    fn validate(self) -> std::result::Result<Vec<BulkUpdate>, Violations> {
        let mut v = Violations::new();
        let Some(items) = v.required("items", self.items) else {
            return Err(v);
        };

        let mut updates = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let field = |name: &str| format!("items[{}].{}", index, name);
            let code = v.text(&field("code"), item.code, 1, None);
            let size = v.one_of(&field("size"), item.size, &ApparelSize::ALL);
            let price = v.optional_amount(&field("price"), item.price);
            let quantity = v.optional_count(&field("quantity"), item.quantity);

            if let (Some(code), Some(size), Some(price), Some(quantity)) =
                (code, size, price, quantity)
            {
                updates.push(BulkUpdate {
                    code,
                    size,
                    patch: RecordPatch { price, quantity },
                });
            }
        }

        v.finish(|| Some(updates))
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub code: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub items: Option<Vec<OrderItemRequest>>,
}

impl Validate for OrderRequest {
    type Output = Vec<OrderLine>;

    fn validate(self) -> std::result::Result<Vec<OrderLine>, Violations> {
        let mut v = Violations::new();
        let Some(items) = v.required("items", self.items) else {
            return Err(v);
        };

        let mut lines = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let field = |name: &str| format!("items[{}].{}", index, name);
            let code = v.text(&field("code"), item.code, 1, None);
            let size = v.one_of(&field("size"), item.size, &ApparelSize::ALL);
            let quantity = v
                .required(&field("quantity"), item.quantity)
                .and_then(|q| v.count(&field("quantity"), q));

            if let (Some(code), Some(size), Some(quantity)) = (code, size, quantity) {
                lines.push(OrderLine {
                    code,
                    size,
                    quantity,
                });
            }
        }

        v.finish(|| Some(lines))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCost {
    pub total_cost: f64,
}

fn parse_size(size: &str) -> Result<ApparelSize> {
    size.parse().map_err(|_| {
        let labels: Vec<&str> = ApparelSize::ALL.iter().map(|s| s.as_str()).collect();
        ServerError::Validation(format!(
            "\"size\" must be one of [{}]",
            labels.join(", ")
        ))
    })
}

fn listing_response(
    found_message: &'static str,
    listing: Listing,
) -> Json<Envelope<Vec<InventoryRecord>>> {
    match listing {
        Listing::Found(records) => Json(Envelope::with_data(found_message, records)),
        Listing::NoData => Json(Envelope {
            message: NO_DATA_FOUND,
            data: None,
        }),
    }
}

/// POST /api/inventory
/// Stock a new record owned by the caller
pub async fn create_inventory(
    State(app_state): State<AppState>,
    token: BearerToken,
    Valid(new_record): Valid<CreateInventoryRequest>,
) -> Result<(StatusCode, Json<Envelope<InventoryRecord>>)> {
    let auth = token.authenticate(&app_state.auth_service)?;
    auth.require(Role::can_manage_inventory)?;

    let record = app_state
        .inventory
        .create(new_record, auth.user_id())
        .await
        .log_failure("controller/inventory/create")?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("Apparel created", record)),
    ))
}

/// PUT /api/inventory/:code/:size
pub async fn update_inventory(
    State(app_state): State<AppState>,
    token: BearerToken,
    Path((code, size)): Path<(String, String)>,
    Valid(patch): Valid<UpdateInventoryRequest>,
) -> Result<Json<Envelope<()>>> {
    let size = parse_size(&size)?;
    let auth = token.authenticate(&app_state.auth_service)?;
    auth.require(Role::can_manage_inventory)?;

    app_state
        .inventory
        .update(&code, size, patch, auth.user_id())
        .await
        .log_failure("controller/inventory/update")?;

    Ok(Json(Envelope::message("Data updated")))
}

/// PUT /api/inventory/bulk
/// Each item succeeds or fails on its own
pub async fn update_inventory_bulk(
    State(app_state): State<AppState>,
    token: BearerToken,
    Valid(items): Valid<BulkUpdateRequest>,
) -> Result<Json<Envelope<Vec<BulkOutcome>>>> {
    let auth = token.authenticate(&app_state.auth_service)?;
    auth.require(Role::can_manage_inventory)?;

    let outcomes = app_state
        .inventory
        .update_bulk(items, auth.user_id())
        .await
        .log_failure("controller/inventory/updateBulk")?;

    Ok(Json(Envelope::with_data("Data processed", outcomes)))
}

/// GET /api/inventory
pub async fn list_inventory(
    State(app_state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Envelope<Vec<InventoryRecord>>>> {
    let auth = token.authenticate(&app_state.auth_service)?;
    let listing = app_state
        .inventory
        .list_all(auth.role(), auth.user_id())
        .await
        .log_failure("controller/inventory/getAll")?;

    Ok(listing_response("Data found", listing))
}

/// GET /api/inventory/code/:code
pub async fn list_inventory_by_code(
    State(app_state): State<AppState>,
    token: BearerToken,
    Path(code): Path<String>,
) -> Result<Json<Envelope<Vec<InventoryRecord>>>> {
    let auth = token.authenticate(&app_state.auth_service)?;
    let listing = app_state
        .inventory
        .list_by_code(&code, auth.role(), auth.user_id())
        .await
        .log_failure("controller/inventory/getAllByCode")?;

    Ok(listing_response("Products Found", listing))
}

/// POST /api/inventory/checkForOrderFulfilment
pub async fn check_order_fulfilment(
    State(app_state): State<AppState>,
    token: BearerToken,
    Valid(lines): Valid<OrderRequest>,
) -> Result<Json<Envelope<()>>> {
    token.authenticate(&app_state.auth_service)?;
    let fulfillable = app_state
        .inventory
        .check_fulfilment(&lines)
        .await
        .log_failure("controller/inventory/checkForInventory")?;

    if !fulfillable {
        return Err(ServerError::Unfulfillable);
    }

    Ok(Json(Envelope::message("Order Can be fulfilled")))
}

/// POST /api/inventory/minimumPriceForOrder
pub async fn minimum_price_for_order(
    State(app_state): State<AppState>,
    token: BearerToken,
    Valid(lines): Valid<OrderRequest>,
) -> Result<Json<Envelope<TotalCost>>> {
    token.authenticate(&app_state.auth_service)?;
    let total_cost = app_state
        .inventory
        .minimum_cost(&lines)
        .await
        .log_failure("controller/inventory/minPriceFetch")?;

    Ok(Json(Envelope::with_data(
        "Minimum Price Calculated",
        TotalCost { total_cost },
    )))
}
