use entity::PayrollRecord;
use platform_client::HrClient;
use tracing::{info, warn};

use crate::error::{HrError, HrResult};

/// Finds the single payroll record whose `full_name` equals `"<first> <last>"`
/// ignoring case. Exact match only; several matches are reported as
/// ambiguous instead of picking one.
pub fn find_by_name<'a>(
    listing: &'a [PayrollRecord],
    first: &str,
    last: &str,
) -> HrResult<&'a PayrollRecord> {
    let wanted = format!("{first} {last}");
    let needle = wanted.to_lowercase();
    let mut matches = listing.iter().filter(|record| {
        record
            .full_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == needle)
    });
    let Some(found) = matches.next() else {
        return Err(HrError::NotFound(wanted));
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(HrError::Ambiguous {
            name: wanted,
            count: extra + 1,
        });
    }
    Ok(found)
}

/// Validates the names, fetches the payroll listing and matches against it.
/// Blank or whitespace-only names fail before any request is made; otherwise
/// the names are matched as given, surrounding spaces included.
pub async fn lookup_by_name(client: &HrClient, first: &str, last: &str) -> HrResult<PayrollRecord> {
    if first.trim().is_empty() || last.trim().is_empty() {
        return Err(HrError::validation("first and last name are both required"));
    }
    let listing = client.list_payroll().await.map_err(|err| {
        warn!(error = %err, "payroll listing unavailable for name lookup");
        HrError::unreachable(err)
    })?;
    let record = find_by_name(&listing, first, last)?;
    info!(id = record.id, "payroll record matched by name");
    Ok(record.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Vec<PayrollRecord> {
        serde_json::from_value(json!([
            {"id": 1, "full_name": "jane doe", "salaire_brut": 500, "salaire_net": 429.1},
            {"id": 2, "full_name": "John Smith", "salaire_brut": 900},
            {"id": 3, "salaire_brut": 100},
            {"id": 4, "full_name": "Ali Ben Salah", "salaire_brut": 1100},
            {"id": 5, "full_name": "ALI BEN SALAH", "salaire_brut": 1200}
        ]))
        .unwrap()
    }

    #[test]
    fn match_ignores_case() {
        let records = listing();
        let found = find_by_name(&records, "Jane", "Doe").unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn partial_names_do_not_match() {
        let records = listing();
        assert!(matches!(
            find_by_name(&records, "Jane", "Do"),
            Err(HrError::NotFound(name)) if name == "Jane Do"
        ));
        assert!(matches!(
            find_by_name(&records, "John", "Smith Jr"),
            Err(HrError::NotFound(_))
        ));
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_name() {
        let records = listing();
        assert!(matches!(
            find_by_name(&records, "  Jane ", " Doe"),
            Err(HrError::NotFound(name)) if name == "  Jane   Doe"
        ));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let records = listing();
        assert!(matches!(
            find_by_name(&records, "Ali Ben", "Salah"),
            Err(HrError::Ambiguous { count: 2, .. })
        ));
    }
}
