//! Plain-text rendering for the one-shot CLI commands.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate};
use entity::{NumericField, PayrollRecord};
use platform_client::ServiceHealth;
use products_hr::{DashboardView, EnrichedEmployee, net_from_gross};

const UNKNOWN: &str = "-";

fn money(amount: Option<f64>) -> String {
    amount
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `~`-prefixed net estimate from the statutory split, only for rows the
/// payroll service has not computed yet. Blank otherwise.
fn estimated_net(net: Option<f64>, gross: Option<f64>) -> String {
    match (net, gross) {
        (None, Some(gross)) => format!("~{:.2}", net_from_gross(gross).net),
        _ => String::new(),
    }
}

/// `YYYY-MM-DD` when the value is a plain or HTTP-style date, raw otherwise.
fn hire_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN.to_string();
    };
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc2822(&trimmed.replace("GMT", "+0000"))
                .ok()
                .map(|dt| dt.date_naive())
        })
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    if view.stale {
        let _ = writeln!(out, "warning: latest load failed, figures may be outdated");
    }
    let _ = writeln!(
        out,
        "{:>5}  {:<24} {:>4}  {:<18} {:>12} {:>12} {:>10} {:>10}  {:<10}  {:>12}",
        "ID", "Employee", "Age", "Department", "Gross", "Net", "CNSS", "IRPP", "Hired", "Net (est.)"
    );
    if view.rows.is_empty() {
        let _ = writeln!(out, "(no employees to display)");
    }
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:>4}  {:<18} {:>12} {:>12} {:>10} {:>10}  {:<10}  {:>12}",
            row.id,
            row.full_name,
            row.age.map(|age| age.to_string()).unwrap_or_else(|| UNKNOWN.to_string()),
            row.dept_name,
            money(row.salaire_brut),
            money(row.salaire_net),
            money(row.cnss),
            money(row.irpp),
            hire_date(row.hire_date.as_deref()),
            estimated_net(row.salaire_net, row.salaire_brut),
        );
    }
    let _ = writeln!(
        out,
        "\nfilter: {}  employees: {}  gross total: {:.2}  net total: {:.2}",
        view.filter, view.totals.headcount, view.totals.gross_total, view.totals.net_total
    );
    out
}

pub fn render_payroll(record: &PayrollRecord) -> String {
    let amount = |field: &Option<NumericField>| money(field.as_ref().and_then(NumericField::as_f64));
    format!(
        "{} (#{})\n  gross: {}\n  net:   {}\n  CNSS:  {}\n  IRPP:  {}\n",
        record.full_name.as_deref().unwrap_or(UNKNOWN),
        record.id,
        amount(&record.salaire_brut),
        amount(&record.salaire_net),
        amount(&record.cnss),
        amount(&record.irpp),
    )
}

pub fn render_salary_list(entries: &[EnrichedEmployee]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:<16} {:>12} {:>12}", "First name", "Last name", "Gross", "Net");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<16} {:<16} {:>12} {:>12}",
            entry.employee.first_name.as_deref().unwrap_or(UNKNOWN),
            entry.employee.last_name.as_deref().unwrap_or(UNKNOWN),
            money(entry.brut),
            money(entry.net),
        );
    }
    out
}

pub fn render_health(results: &[(String, Result<ServiceHealth, String>)]) -> String {
    let mut out = String::new();
    for (service, result) in results {
        let status = match result {
            Ok(health) if health.ok => "up".to_string(),
            Ok(_) => "degraded".to_string(),
            Err(err) => format!("down ({err})"),
        };
        let _ = writeln!(out, "{service:<12} {status}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use products_hr::{DeptSelector, Totals, ViewRow};

    fn view(rows: Vec<ViewRow>, stale: bool) -> DashboardView {
        let totals = products_hr::aggregate(&rows);
        DashboardView {
            rows,
            totals,
            filter: DeptSelector::All,
            loaded: true,
            stale,
        }
    }

    fn row() -> ViewRow {
        ViewRow {
            id: 1,
            full_name: "A B".into(),
            age: None,
            dept_id: Some(1),
            dept_name: "IT".into(),
            base_salary: Some(1000.0),
            hire_date: Some("Sun, 01 Jan 2023 00:00:00 GMT".into()),
            salaire_brut: Some(1000.0),
            salaire_net: None,
            cnss: None,
            irpp: None,
        }
    }

    #[test]
    fn unknown_net_renders_as_unknown_with_separate_estimate() {
        let text = render_dashboard(&view(vec![row()], false));
        let line = text.lines().nth(1).unwrap();
        let cells: Vec<&str> = line.split_whitespace().collect();
        // ID, name (2 words), age, department, gross, net, CNSS, IRPP, hired, estimate
        assert_eq!(cells[6], "-", "{line}");
        assert_eq!(cells[10], "~858.20", "{line}");
        assert!(text.contains("net total: 0.00"), "{text}");
        assert!(text.contains("2023-01-01"), "{text}");
        assert!(text.contains("gross total: 1000.00"), "{text}");
    }

    #[test]
    fn known_net_leaves_estimate_blank() {
        assert_eq!(estimated_net(Some(858.2), Some(1000.0)), "");
        assert_eq!(estimated_net(None, None), "");
        assert_eq!(estimated_net(None, Some(1000.0)), "~858.20");
    }

    #[test]
    fn stale_views_carry_a_warning() {
        let empty = DashboardView {
            rows: Vec::new(),
            totals: Totals::default(),
            filter: DeptSelector::Department(3),
            loaded: false,
            stale: true,
        };
        let text = render_dashboard(&empty);
        assert!(text.starts_with("warning:"));
        assert!(text.contains("(no employees to display)"));
        assert!(text.contains("filter: 3"));
    }

    #[test]
    fn unparseable_dates_are_shown_raw() {
        assert_eq!(hire_date(Some("2024-03-09")), "2024-03-09");
        assert_eq!(hire_date(Some("sometime")), "sometime");
        assert_eq!(hire_date(None), UNKNOWN);
    }
}
