//! `dashboard`: totals per status and the latest changes.

use std::fmt::Write;

use super::Context;
use crate::error::AppError;
use crate::projects::ProjectService;
use crate::projects::WorkOrder;
use crate::projects::constants::STATUS_OPTIONS;
use crate::projects::constants::messages;
use crate::render;

/// How many recently modified work orders to list.
const RECENT: usize = 5;

/// Label for work orders without a status.
const NO_STATUS: &str = "بدون حالة";

/// Counts over the fetched work orders.
#[derive(Debug, PartialEq)]
pub struct Summary<'a> {
    pub fetched: usize,
    /// Non-zero counts, known statuses in workflow order, then the rest.
    pub by_status: Vec<(String, usize)>,
    /// Newest `modified` first.
    pub recent: Vec<&'a WorkOrder>,
}

pub fn summarize(orders: &[WorkOrder]) -> Summary<'_> {
    let mut by_status: Vec<(String, usize)> = STATUS_OPTIONS
        .iter()
        .map(|status| (status.to_string(), 0))
        .collect();

    for order in orders {
        let status = order.status().unwrap_or(NO_STATUS);
        match by_status.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => by_status.push((status.to_string(), 1)),
        }
    }
    by_status.retain(|(_, count)| *count > 0);

    let mut recent: Vec<&WorkOrder> = orders.iter().collect();
    // Frappe timestamps sort lexically; missing ones go last.
    recent.sort_by(|a, b| b.modified.cmp(&a.modified));
    recent.truncate(RECENT);

    Summary {
        fetched: orders.len(),
        by_status,
        recent,
    }
}

pub async fn run(ctx: &Context) -> Result<(), AppError> {
    let session = ctx.require_session().await?;
    let service = ProjectService::new(ctx.client());

    let orders = service
        .list()
        .await
        .map_err(AppError::request(messages::FETCH_FAILED))?;
    let total = match service.count().await {
        Ok(total) => Some(total),
        Err(e) => {
            log::warn!("work order count failed: {}", e);
            None
        }
    };

    let summary = summarize(&orders);
    print!("{}", format_summary(session.display_name(), &summary, total));
    Ok(())
}

fn format_summary(user: &str, summary: &Summary<'_>, total: Option<u64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "مرحباً {}", user);
    let _ = writeln!(out);

    let total = total.map_or_else(|| summary.fetched.to_string(), |t| t.to_string());
    let mut rows: Vec<(&str, String)> = vec![("إجمالي أوامر العمل", total)];
    rows.extend(
        summary
            .by_status
            .iter()
            .map(|(status, count)| (status.as_str(), count.to_string())),
    );
    out.push_str(&render::pairs(&rows));

    if !summary.recent.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "آخر التعديلات");
        let recent: Vec<(&str, String)> = summary
            .recent
            .iter()
            .map(|o| {
                let when = o.modified.as_deref().unwrap_or("-");
                let who = o.acc_name1.as_deref().unwrap_or("-");
                (o.number(), format!("{}  {}  {}", who, o.status().unwrap_or(NO_STATUS), when))
            })
            .collect();
        out.push_str(&render::pairs(&recent));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(name: &str, status: Option<&str>, modified: Option<&str>) -> WorkOrder {
        WorkOrder {
            name: name.to_string(),
            work_order_status1: status.map(str::to_string),
            modified: modified.map(str::to_string),
            ..WorkOrder::default()
        }
    }

    #[test]
    fn test_counts_follow_workflow_order() {
        let orders = vec![
            order("WO-1", Some("مكتمل"), None),
            order("WO-2", Some("تم استلام الطلب"), None),
            order("WO-3", Some("مكتمل"), None),
            order("WO-4", None, None),
            order("WO-5", Some("حالة قديمة"), None),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary.fetched, 5);
        assert_eq!(
            summary.by_status,
            vec![
                ("تم استلام الطلب".to_string(), 1),
                ("مكتمل".to_string(), 2),
                (NO_STATUS.to_string(), 1),
                ("حالة قديمة".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_recent_is_newest_first() {
        let orders: Vec<WorkOrder> = (1..=7)
            .map(|i| order(&format!("WO-{}", i), None, Some(&format!("2026-02-0{} 10:00:00", i))))
            .chain([order("WO-0", None, None)])
            .collect();
        let summary = summarize(&orders);
        let names: Vec<&str> = summary.recent.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["WO-7", "WO-6", "WO-5", "WO-4", "WO-3"]);
    }

    #[test]
    fn test_format_uses_backend_total() {
        let orders = vec![order("WO-1", Some("مكتمل"), Some("2026-02-01 10:00:00"))];
        let text = format_summary("أحمد", &summarize(&orders), Some(240));
        assert!(text.starts_with("مرحباً أحمد\n"));
        assert!(text.contains("240"));
        assert!(text.contains("آخر التعديلات"));
    }
}
