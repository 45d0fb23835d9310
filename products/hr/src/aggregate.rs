use serde::Serialize;

use crate::reconcile::ViewRow;

/// Payroll totals over the visible rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub headcount: usize,
    pub gross_total: f64,
    pub net_total: f64,
}

/// Sums gross and net amounts, counting unknown amounts as zero.
///
/// Amounts are added in ascending order so the result does not depend on
/// row order, even under floating point rounding.
pub fn aggregate(rows: &[ViewRow]) -> Totals {
    Totals {
        headcount: rows.len(),
        gross_total: order_independent_sum(rows.iter().map(|row| row.salaire_brut)),
        net_total: order_independent_sum(rows.iter().map(|row| row.salaire_net)),
    }
}

fn order_independent_sum(amounts: impl Iterator<Item = Option<f64>>) -> f64 {
    let mut values: Vec<f64> = amounts.map(|amount| amount.unwrap_or(0.0)).collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, value| acc + value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DeptSelector, select};

    fn row(id: i64, dept_id: i64, brut: Option<f64>, net: Option<f64>) -> ViewRow {
        ViewRow {
            id,
            full_name: String::new(),
            age: None,
            dept_id: Some(dept_id),
            dept_name: format!("Dept {dept_id}"),
            base_salary: brut,
            hire_date: None,
            salaire_brut: brut,
            salaire_net: net,
            cnss: None,
            irpp: None,
        }
    }

    #[test]
    fn unknown_amounts_count_as_zero() {
        let rows = vec![
            row(1, 1, Some(1000.0), None),
            row(2, 1, Some(500.0), Some(429.1)),
            row(3, 1, None, None),
        ];
        let totals = aggregate(&rows);
        assert_eq!(totals.headcount, 3);
        assert_eq!(totals.gross_total, 1500.0);
        assert_eq!(totals.net_total, 429.1);
        assert_eq!(rows[0].salaire_net, None);
    }

    #[test]
    fn empty_set_totals_zero() {
        let totals = aggregate(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(serde_json::to_value(totals).unwrap()["grossTotal"], 0.0);
    }

    #[test]
    fn totals_only_cover_the_filtered_rows() {
        let rows = vec![
            row(1, 1, Some(1000.0), Some(858.2)),
            row(2, 2, Some(2000.0), Some(1716.4)),
            row(3, 1, Some(300.0), None),
        ];
        let visible = select(rows, DeptSelector::Department(1));
        let totals = aggregate(&visible);
        assert_eq!(totals.headcount, 2);
        assert_eq!(totals.gross_total, 1300.0);
        assert_eq!(totals.net_total, 858.2);
    }

    #[test]
    fn row_order_does_not_change_totals() {
        let amounts = [0.1, 0.2, 0.3, 1e16, -1e16, 7.77, 1234.56, 0.07];
        let forward: Vec<ViewRow> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| row(i as i64, 1, Some(*a), Some(*a / 2.0)))
            .collect();
        let mut backward = forward.clone();
        backward.reverse();
        let mut shuffled = forward.clone();
        shuffled.swap(0, 5);
        shuffled.swap(2, 7);

        let expected = aggregate(&forward);
        assert_eq!(aggregate(&backward), expected);
        assert_eq!(aggregate(&shuffled), expected);
    }
}
