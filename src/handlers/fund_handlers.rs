use axum::{extract::State, response::Json};

use crate::error::Result;
use crate::models::fund::MutualFund;
use crate::AppState;

pub async fn list_funds(State(state): State<AppState>) -> Result<Json<Vec<MutualFund>>> {
    let funds = MutualFund::list(&state.pool).await?;
    Ok(Json(funds))
}
