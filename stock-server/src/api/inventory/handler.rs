//! Inventory API Handlers
//!
//! Thin boundary over [`StockService`]: deserialize, extract the actor
//! identity placed by the auth layer, call the service, serialize. No
//! business rules here.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::HeaderMap;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::inventory::StockService;
use crate::utils::{AppError, AppResult};
use shared::models::{
    DailyResetRequest, InventoryTypeUpdate, MenuItem, MenuItemCreate, Page, StockAddRequest,
    StockAdjustment, StockRemoveRequest, StockResetOutcome,
};

/// Actor identity header placed by the external auth layer
const HEADER_USER_ID: &str = "x-user-id";

fn current_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get(HEADER_USER_ID)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn require_user(headers: &HeaderMap) -> AppResult<String> {
    current_user(headers).ok_or_else(AppError::not_authenticated)
}

/// Query params for history listing
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// POST /api/inventory - 创建菜单项 (库存视图)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::insert(state.pool(), payload).await?;
    Ok(Json(item))
}

/// GET /api/inventory/:id - 获取单个菜单项的库存快照
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let service = StockService::new(state.pool().clone());
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// POST /api/inventory/daily-reset - 批量日初库存重置
pub async fn daily_reset(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<DailyResetRequest>,
) -> AppResult<Json<Vec<StockResetOutcome>>> {
    let user_id = current_user(&headers);
    let service = StockService::new(state.pool().clone());
    let outcomes = service
        .daily_stock_reset(payload, user_id.as_deref())
        .await;
    Ok(Json(outcomes))
}

/// POST /api/inventory/:id/stock/add - 手动加库存
pub async fn add_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<StockAddRequest>,
) -> AppResult<Json<MenuItem>> {
    let user_id = require_user(&headers)?;
    let service = StockService::new(state.pool().clone());
    let item = service.add_stock(id, payload, &user_id).await?;
    Ok(Json(item))
}

/// POST /api/inventory/:id/stock/remove - 手动减库存
pub async fn remove_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<StockRemoveRequest>,
) -> AppResult<Json<MenuItem>> {
    let user_id = require_user(&headers)?;
    let service = StockService::new(state.pool().clone());
    let item = service.remove_stock(id, payload, &user_id).await?;
    Ok(Json(item))
}

/// GET /api/inventory/low-stock - 低库存菜单项列表
pub async fn low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let service = StockService::new(state.pool().clone());
    let items = service.get_low_stock_items().await?;
    Ok(Json(items))
}

/// GET /api/inventory/out-of-stock - 零库存菜单项列表
pub async fn out_of_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let service = StockService::new(state.pool().clone());
    let items = service.get_out_of_stock_items().await?;
    Ok(Json(items))
}

/// GET /api/inventory/:id/history - 库存调整流水 (分页, 最新在前)
pub async fn history(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Page<StockAdjustment>>> {
    let service = StockService::new(state.pool().clone());
    let page = service
        .get_stock_history(id, query.page, query.limit)
        .await?;
    Ok(Json(page))
}

/// PUT /api/inventory/:id/type - 切换库存模式 (TRACKED / UNLIMITED)
pub async fn update_type(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryTypeUpdate>,
) -> AppResult<Json<MenuItem>> {
    let service = StockService::new(state.pool().clone());
    let item = service.update_inventory_type(id, payload).await?;
    Ok(Json(item))
}
