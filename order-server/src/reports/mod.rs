//! Reporting aggregator
//!
//! Reads only the frozen order summaries and folds them into the dashboard
//! shapes. Read-only: nothing here writes.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    DailyOrderCount, OrderSummary, PieSlice, ProductSales, ReportPeriod, SalesSummary,
};
use sqlx::SqlitePool;

use crate::db::repository::order_summary::{self, SummaryFilter};
use crate::utils::AppResult;
use crate::utils::money::{to_decimal, to_f64};
use crate::utils::time::{BusinessClock, date_key, month_ago_millis, week_ago_millis};

/// Map a period onto a summary filter at instant `now`
///
/// `day` matches the business date; `week` and `month` are rolling windows
/// on the summary creation time.
pub fn filter_for(
    period: ReportPeriod,
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> SummaryFilter {
    match period {
        ReportPeriod::Day => SummaryFilter::Date(date_key(clock.business_date_at(now))),
        ReportPeriod::Week => SummaryFilter::Since(week_ago_millis(now)),
        ReportPeriod::Month => SummaryFilter::Since(month_ago_millis(now)),
        ReportPeriod::All => SummaryFilter::All,
    }
}

/// Fold summaries into totals and a per-product breakdown
///
/// Products are keyed by name; the breakdown is sorted by revenue, highest
/// first, then by name.
pub fn summarize(summaries: &[OrderSummary]) -> SalesSummary {
    let mut revenue = Decimal::ZERO;
    let mut total_items: i64 = 0;
    let mut per_product: HashMap<&str, (i64, Decimal)> = HashMap::new();

    for summary in summaries {
        revenue += to_decimal(summary.total_value);
        for item in &summary.items {
            let quantity = i64::from(item.quantity);
            total_items += quantity;
            let entry = per_product
                .entry(item.product_name.as_str())
                .or_insert((0, Decimal::ZERO));
            entry.0 += quantity;
            entry.1 += to_decimal(item.price) * Decimal::from(quantity);
        }
    }

    let mut items: Vec<(&str, i64, Decimal)> = per_product
        .into_iter()
        .map(|(name, (quantity, total))| (name, quantity, total))
        .collect();
    items.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    SalesSummary {
        total_orders: summaries.len() as i64,
        total_items,
        total_revenue: to_f64(revenue),
        items: items
            .into_iter()
            .map(|(name, quantity, total)| ProductSales {
                name: name.to_string(),
                quantity,
                total: to_f64(total),
            })
            .collect(),
    }
}

/// Revenue share per product
pub fn pie_chart(summary: &SalesSummary) -> Vec<PieSlice> {
    summary
        .items
        .iter()
        .map(|item| PieSlice {
            name: item.name.clone(),
            value: item.total,
        })
        .collect()
}

/// Order count per summary date, oldest first
pub fn line_chart(summaries: &[OrderSummary]) -> Vec<DailyOrderCount> {
    let mut per_day: BTreeMap<&str, i64> = BTreeMap::new();
    for summary in summaries {
        *per_day.entry(summary.summary_date.as_str()).or_default() += 1;
    }
    per_day
        .into_iter()
        .map(|(day, total)| DailyOrderCount {
            day: day.to_string(),
            total,
        })
        .collect()
}

async fn load(
    pool: &SqlitePool,
    period: ReportPeriod,
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> AppResult<Vec<OrderSummary>> {
    let filter = filter_for(period, clock, now);
    Ok(order_summary::list(pool, &filter).await?)
}

/// `resumo` report
pub async fn sales_summary(
    pool: &SqlitePool,
    period: ReportPeriod,
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> AppResult<SalesSummary> {
    Ok(summarize(&load(pool, period, clock, now).await?))
}

/// `graficopizza` report
pub async fn revenue_pie(
    pool: &SqlitePool,
    period: ReportPeriod,
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> AppResult<Vec<PieSlice>> {
    Ok(pie_chart(&sales_summary(pool, period, clock, now).await?))
}

/// `graficolinha` report
pub async fn orders_per_day(
    pool: &SqlitePool,
    period: ReportPeriod,
    clock: &BusinessClock,
    now: DateTime<Utc>,
) -> AppResult<Vec<DailyOrderCount>> {
    Ok(line_chart(&load(pool, period, clock, now).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use chrono::TimeZone;
    use shared::models::SummaryItem;

    fn summary(id: i64, date: &str, total: f64, items: &[(&str, i32, f64)]) -> OrderSummary {
        OrderSummary {
            id,
            order_id: id,
            order_number: id,
            summary_date: date.into(),
            total_value: total,
            items: items
                .iter()
                .map(|(name, quantity, price)| SummaryItem {
                    product_name: name.to_string(),
                    quantity: *quantity,
                    price: *price,
                })
                .collect(),
            created_at: 0,
        }
    }

    #[test]
    fn test_summarize_totals_and_breakdown() {
        let rows = vec![
            summary(1, "2025-03-14", 22.0, &[("Feijoada", 1, 10.0), ("Suco", 2, 5.0)]),
            summary(2, "2025-03-14", 30.0, &[("Feijoada", 3, 10.0)]),
        ];
        let result = summarize(&rows);
        assert_eq!(result.total_orders, 2);
        assert_eq!(result.total_items, 6);
        assert_eq!(result.total_revenue, 52.0);
        assert_eq!(result.items[0].name, "Feijoada");
        assert_eq!(result.items[0].quantity, 4);
        assert_eq!(result.items[0].total, 40.0);
        assert_eq!(result.items[1].total, 10.0);

        let pie = pie_chart(&result);
        assert_eq!(pie[0].name, "Feijoada");
        assert_eq!(pie[0].value, 40.0);
    }

    #[test]
    fn test_empty_summary() {
        let result = summarize(&[]);
        assert_eq!(result.total_orders, 0);
        assert_eq!(result.total_revenue, 0.0);
        assert!(result.items.is_empty());
        assert!(line_chart(&[]).is_empty());
    }

    #[test]
    fn test_line_chart_ascending_by_day() {
        let rows = vec![
            summary(1, "2025-03-15", 1.0, &[]),
            summary(2, "2025-03-13", 1.0, &[]),
            summary(3, "2025-03-15", 1.0, &[]),
        ];
        let points = line_chart(&rows);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].day, "2025-03-13");
        assert_eq!(points[0].total, 1);
        assert_eq!(points[1].day, "2025-03-15");
        assert_eq!(points[1].total, 2);
    }

    #[test]
    fn test_filter_for_period() {
        let clock = BusinessClock::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 1, 0, 0).unwrap();
        assert_eq!(
            filter_for(ReportPeriod::Day, &clock, now),
            SummaryFilter::Date("2025-03-14".into())
        );
        assert_eq!(filter_for(ReportPeriod::All, &clock, now), SummaryFilter::All);
        assert_eq!(
            filter_for(ReportPeriod::Week, &clock, now),
            SummaryFilter::Since(week_ago_millis(now))
        );
    }

    async fn store(pool: &SqlitePool, order_id: i64, date: &str, created_at: i64, total: f64) {
        let items = serde_json::to_string(&[SummaryItem {
            product_name: "Feijoada".into(),
            quantity: 1,
            price: total,
        }])
        .unwrap();
        sqlx::query(
            "INSERT INTO order_summaries (order_id, order_number, summary_date, total_value, items, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(order_id)
        .bind(date)
        .bind(total)
        .bind(items)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_periods_select_different_summaries() {
        let db = DbService::in_memory().await.unwrap();
        let clock = BusinessClock::default();
        // Noon in São Paulo
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 15, 0, 0).unwrap();
        let hour = 3_600_000;
        let day = 24 * hour;
        let millis = now.timestamp_millis();

        store(&db.pool, 1, "2025-03-15", millis - hour, 22.0).await;
        store(&db.pool, 2, "2025-03-14", millis - day, 30.0).await;
        store(&db.pool, 3, "2025-01-14", millis - 60 * day, 50.0).await;

        let today = sales_summary(&db.pool, ReportPeriod::Day, &clock, now).await.unwrap();
        assert_eq!((today.total_orders, today.total_revenue), (1, 22.0));

        let week = sales_summary(&db.pool, ReportPeriod::Week, &clock, now).await.unwrap();
        assert_eq!((week.total_orders, week.total_revenue), (2, 52.0));

        let month = sales_summary(&db.pool, ReportPeriod::Month, &clock, now).await.unwrap();
        assert_eq!((month.total_orders, month.total_revenue), (2, 52.0));

        let all = sales_summary(&db.pool, ReportPeriod::All, &clock, now).await.unwrap();
        assert_eq!((all.total_orders, all.total_revenue), (3, 102.0));
        assert_eq!(all.items[0].quantity, 3);

        let points = orders_per_day(&db.pool, ReportPeriod::Week, &clock, now).await.unwrap();
        let days: Vec<&str> = points.iter().map(|p| p.day.as_str()).collect();
        assert_eq!(days, vec!["2025-03-14", "2025-03-15"]);
    }

    #[tokio::test]
    async fn test_day_follows_business_date_not_creation_time() {
        let db = DbService::in_memory().await.unwrap();
        let clock = BusinessClock::default();
        // 01:00 UTC is still the 14th in São Paulo
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 1, 0, 0).unwrap();
        let millis = now.timestamp_millis();

        store(&db.pool, 1, "2025-03-14", millis - 1_000, 10.0).await;
        store(&db.pool, 2, "2025-03-15", millis - 2_000, 99.0).await;

        let today = sales_summary(&db.pool, ReportPeriod::Day, &clock, now).await.unwrap();
        assert_eq!(today.total_orders, 1);
        assert_eq!(today.total_revenue, 10.0);
    }
}
