//! Kanban view derivation
//!
//! Pure: same orders + filters + clock always produce the same columns.
//! Handlers pass today's date in so the derivation itself never reads the
//! wall clock.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use shared::order::{OrderStatus, OrderType};

use crate::db::models::Order;
use crate::utils::time::parse_order_time;

/// Date window applied before grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Calendar-day equality with today
    Today,
    /// Calendar week containing today, Sunday first
    Week,
    /// Calendar-day equality with a chosen date
    Custom(NaiveDate),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(OrderType),
}

/// One board column: which status lands here and what the header says
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    #[serde(flatten)]
    pub config: ColumnConfig,
    pub items: Vec<Order>,
}

/// The four standard columns, one per status, in board order
pub fn default_columns() -> Vec<ColumnConfig> {
    OrderStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| ColumnConfig {
            id: format!("col-{}", i + 1),
            title: status.as_str().to_string(),
            status: *status,
        })
        .collect()
}

/// Group orders into columns after applying the date and type filters
///
/// Orders whose `time` cannot be parsed are dropped by every date filter
/// except `All`. Buckets sort ascending by time; unparseable or equal
/// times keep their input order (the sort is stable).
pub fn derive_columns(
    orders: &[Order],
    date_filter: DateFilter,
    type_filter: TypeFilter,
    columns: &[ColumnConfig],
    today: NaiveDate,
) -> Vec<KanbanColumn> {
    let filtered: Vec<&Order> = orders
        .iter()
        .filter(|order| matches_date(order, date_filter, today))
        .filter(|order| match type_filter {
            TypeFilter::All => true,
            TypeFilter::Only(t) => order.order_type == t,
        })
        .collect();

    columns
        .iter()
        .map(|config| {
            let mut items: Vec<Order> = filtered
                .iter()
                .filter(|order| order.status == config.status)
                .map(|order| (*order).clone())
                .collect();
            items.sort_by(|a, b| {
                match (parse_order_time(&a.time), parse_order_time(&b.time)) {
                    (Some(ta), Some(tb)) => ta.cmp(&tb),
                    _ => std::cmp::Ordering::Equal,
                }
            });
            KanbanColumn {
                config: config.clone(),
                items,
            }
        })
        .collect()
}

fn matches_date(order: &Order, filter: DateFilter, today: NaiveDate) -> bool {
    if filter == DateFilter::All {
        return true;
    }
    let Some(time) = parse_order_time(&order.time) else {
        return false;
    };
    let date = time.date();
    match filter {
        DateFilter::Today => date == today,
        DateFilter::Custom(day) => date == day,
        DateFilter::Week => {
            let week = today.week(Weekday::Sun);
            date >= week.first_day() && date <= week.last_day()
        }
        DateFilter::All => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderLine;

    fn order(id_hint: &str, time: &str, status: OrderStatus, order_type: OrderType) -> Order {
        Order {
            id: None,
            tenant: "t1".to_string(),
            customer_name: id_hint.to_string(),
            time: time.to_string(),
            products: vec![OrderLine {
                name: "Pizza".to_string(),
                quantity: 1,
                observation: None,
            }],
            total: "30.00".to_string(),
            status,
            order_type,
            lead_source: None,
            table_number: None,
            address: None,
            phone: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn names(column: &KanbanColumn) -> Vec<&str> {
        column.items.iter().map(|o| o.customer_name.as_str()).collect()
    }

    #[test]
    fn custom_date_keeps_only_matching_day() {
        let orders = vec![
            order("a", "2024-03-01T10:00", OrderStatus::Recebido, OrderType::Delivery),
            order("b", "2024-03-02T10:00", OrderStatus::Recebido, OrderType::Delivery),
        ];
        let columns = derive_columns(
            &orders,
            DateFilter::Custom(day("2024-03-01")),
            TypeFilter::All,
            &default_columns(),
            day("2024-03-02"),
        );
        assert_eq!(names(&columns[0]), vec!["a"]);
    }

    #[test]
    fn today_filter_uses_calendar_day_equality() {
        let orders = vec![
            order("a", "2024-03-01T10:00", OrderStatus::Recebido, OrderType::Delivery),
            order("b", "2024-03-01T23:59", OrderStatus::Recebido, OrderType::Delivery),
            order("c", "2024-03-02T00:01", OrderStatus::Recebido, OrderType::Delivery),
        ];
        let columns = derive_columns(
            &orders,
            DateFilter::Today,
            TypeFilter::All,
            &default_columns(),
            day("2024-03-01"),
        );
        assert_eq!(names(&columns[0]), vec!["a", "b"]);
    }

    #[test]
    fn week_filter_runs_sunday_to_saturday() {
        // 2024-03-06 is a Wednesday; its Sunday-first week is 03-03 .. 03-09
        let orders = vec![
            order("sat-before", "2024-03-02T12:00", OrderStatus::Recebido, OrderType::Delivery),
            order("sun", "2024-03-03T12:00", OrderStatus::Recebido, OrderType::Delivery),
            order("sat", "2024-03-09T12:00", OrderStatus::Recebido, OrderType::Delivery),
            order("sun-after", "2024-03-10T12:00", OrderStatus::Recebido, OrderType::Delivery),
        ];
        let columns = derive_columns(
            &orders,
            DateFilter::Week,
            TypeFilter::All,
            &default_columns(),
            day("2024-03-06"),
        );
        assert_eq!(names(&columns[0]), vec!["sun", "sat"]);
    }

    #[test]
    fn type_filter_matches_exactly() {
        let orders = vec![
            order("d", "2024-03-01T10:00", OrderStatus::Pronto, OrderType::Delivery),
            order("r", "2024-03-01T11:00", OrderStatus::Pronto, OrderType::NoRestaurante),
        ];
        let columns = derive_columns(
            &orders,
            DateFilter::All,
            TypeFilter::Only(OrderType::NoRestaurante),
            &default_columns(),
            day("2024-03-01"),
        );
        assert_eq!(names(&columns[2]), vec!["r"]);
        assert!(columns[0].items.is_empty());
    }

    #[test]
    fn buckets_sort_ascending_by_time() {
        let orders = vec![
            order("late", "2024-03-01T18:00", OrderStatus::EmPreparo, OrderType::Delivery),
            order("early", "2024-03-01T09:00", OrderStatus::EmPreparo, OrderType::Delivery),
            order("noon", "2024-03-01T12:00", OrderStatus::EmPreparo, OrderType::Delivery),
        ];
        let columns = derive_columns(
            &orders,
            DateFilter::All,
            TypeFilter::All,
            &default_columns(),
            day("2024-03-01"),
        );
        assert_eq!(names(&columns[1]), vec!["early", "noon", "late"]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let orders = vec![
            order("a", "2024-03-01T10:00", OrderStatus::Recebido, OrderType::Delivery),
            order("b", "2024-03-01T10:00", OrderStatus::Recebido, OrderType::Delivery),
            order("c", "2024-03-01T11:00", OrderStatus::Pronto, OrderType::NoRestaurante),
        ];
        let run = || {
            derive_columns(
                &orders,
                DateFilter::Today,
                TypeFilter::All,
                &default_columns(),
                day("2024-03-01"),
            )
        };
        let first = run();
        let second = run();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(names(a), names(b));
        }
        // Equal timestamps keep input order
        assert_eq!(names(&first[0]), vec!["a", "b"]);
    }

    #[test]
    fn unparseable_time_is_excluded_by_date_filters_only() {
        let orders = vec![order(
            "reserva",
            "amanhã",
            OrderStatus::Recebido,
            OrderType::NoRestaurante,
        )];
        let today = day("2024-03-01");
        let cols = default_columns();

        let by_today = derive_columns(&orders, DateFilter::Today, TypeFilter::All, &cols, today);
        assert!(by_today[0].items.is_empty());

        let by_all = derive_columns(&orders, DateFilter::All, TypeFilter::All, &cols, today);
        assert_eq!(names(&by_all[0]), vec!["reserva"]);
    }
}
