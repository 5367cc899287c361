//! Report Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use shared::models::{DailyOrderCount, PieSlice, ReportPeriod, SalesSummary};

use crate::core::ServerState;
use crate::reports;
use crate::utils::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(alias = "periodo")]
    period: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> ReportPeriod {
        self.period
            .as_deref()
            .map(ReportPeriod::parse)
            .unwrap_or_default()
    }
}

/// GET /relatorio/resumo
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<SalesSummary>> {
    let now = Utc::now();
    let summary = reports::sales_summary(&state.pool, query.period(), &state.clock, now).await?;
    Ok(Json(summary))
}

/// GET /relatorio/graficopizza
pub async fn pie(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<PieSlice>>> {
    let now = Utc::now();
    let slices = reports::revenue_pie(&state.pool, query.period(), &state.clock, now).await?;
    Ok(Json(slices))
}

/// GET /relatorio/graficolinha
pub async fn line(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<DailyOrderCount>>> {
    let now = Utc::now();
    let points = reports::orders_per_day(&state.pool, query.period(), &state.clock, now).await?;
    Ok(Json(points))
}
