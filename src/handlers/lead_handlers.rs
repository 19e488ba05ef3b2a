use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::lead::{SubmitLeadRequest, UpdateLeadRequest};
use crate::AppState;

/// Public consultation funnel. Rate-limited at the route layer.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(request): Json<SubmitLeadRequest>,
) -> Result<Json<Value>> {
    let lead_id = state.lead_service.submit(request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Consultation request submitted!",
        "lead_id": lead_id,
    })))
}

pub async fn list_leads(State(state): State<AppState>) -> Result<Json<Value>> {
    let leads = state.lead_service.list().await?;

    Ok(Json(json!({
        "success": true,
        "count": leads.len(),
        "data": leads,
    })))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let lead = state.lead_service.get(id).await?;

    Ok(Json(json!({ "success": true, "data": lead })))
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<Value>> {
    state
        .lead_service
        .update(id, &request.status, request.notes.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "message": "Lead updated." })))
}

pub async fn lead_stats(State(state): State<AppState>) -> Result<Json<Value>> {
    let stats = state.lead_service.stats_by_status().await?;

    Ok(Json(json!({ "success": true, "data": stats })))
}

pub async fn leads_by_age(State(state): State<AppState>) -> Result<Json<Value>> {
    let rows = state.lead_service.stats_by_age().await?;

    let data: Vec<Value> = rows
        .into_iter()
        .map(|row| json!({ "age_group": row.label, "count": row.count }))
        .collect();

    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn leads_by_goal(State(state): State<AppState>) -> Result<Json<Value>> {
    let rows = state.lead_service.stats_by_goal().await?;

    let data: Vec<Value> = rows
        .into_iter()
        .map(|row| json!({ "financial_goal": row.label, "count": row.count }))
        .collect();

    Ok(Json(json!({ "success": true, "data": data })))
}
