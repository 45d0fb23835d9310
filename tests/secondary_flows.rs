use entity::NumericField;
use platform_client::{ClientError, ClientSettings, HrClient, Service, ServiceEndpoints};
use products_hr::{Dashboard, HrError};
use serde_json::json;
use suite_tests::{DEAD_ENDPOINT, Route, StubData, StubServices};

async fn payroll_listing() -> StubServices {
    StubServices::spawn(StubData {
        employees: Some(vec![
            json!({"id": 1, "first_name": "Jane", "last_name": "Doe", "dept_id": 1, "base_salary": 500}),
            json!({"id": 2, "first_name": "John", "last_name": "Roe", "dept_id": 2, "base_salary": "900"}),
            json!({"id": 3, "first_name": "Amel", "last_name": "Trabelsi", "dept_id": 1, "base_salary": 1200}),
        ]),
        payroll: Some(vec![
            json!({"id": 1, "full_name": "jane doe", "salaire_brut": 500, "salaire_net": 429.1, "CNSS": 45.9, "IRPP": 25}),
            json!({"id": 2, "full_name": "John Roe", "salaire_brut": 900}),
        ]),
        departments: Some(vec![]),
        quotes: [(1, (500.0, 429.1)), (2, (900.0, 772.38)), (3, (1200.0, 1029.84))]
            .into_iter()
            .collect(),
        ..StubData::default()
    })
    .await
}

#[tokio::test]
async fn name_lookup_ignores_case() {
    let stubs = payroll_listing().await;
    let dashboard = stubs.dashboard();

    let record = dashboard.lookup_by_name("Jane", "Doe").await.unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(
        record.salaire_brut.as_ref().and_then(NumericField::as_f64),
        Some(500.0)
    );
}

#[tokio::test]
async fn unknown_name_is_not_found() {
    let stubs = payroll_listing().await;
    let dashboard = stubs.dashboard();

    let err = dashboard.lookup_by_name("Amel", "Trabelsi").await.unwrap_err();

    assert!(matches!(err, HrError::NotFound(name) if name == "Amel Trabelsi"));
}

#[tokio::test]
async fn padded_names_are_matched_verbatim() {
    let stubs = payroll_listing().await;
    let dashboard = stubs.dashboard();

    let err = dashboard.lookup_by_name("  Jane ", " Doe").await.unwrap_err();

    assert!(matches!(err, HrError::NotFound(_)));
    assert_eq!(stubs.hits(), 1);
}

#[tokio::test]
async fn payroll_outage_is_distinct_from_not_found() {
    let stubs = payroll_listing().await;
    stubs.set_failing(Route::Payroll, true);
    let dashboard = stubs.dashboard();

    let err = dashboard.lookup_by_name("Jane", "Doe").await.unwrap_err();

    assert!(matches!(err, HrError::Unreachable(_)));
    assert!(matches!(
        dashboard.last_error().await,
        Some(HrError::Unreachable(_))
    ));
}

#[tokio::test]
async fn blank_names_never_reach_the_service() {
    let stubs = payroll_listing().await;
    let dashboard = stubs.dashboard();

    let err = dashboard.lookup_by_name("  ", "Doe").await.unwrap_err();

    assert!(matches!(err, HrError::Validation(_)));
    assert_eq!(stubs.hits(), 0);
}

#[tokio::test]
async fn salary_list_merges_one_quote_per_employee() {
    let stubs = payroll_listing().await;
    let dashboard = stubs.dashboard().with_enrich_concurrency(2);

    let list = dashboard.salary_list().await.unwrap();

    let ids: Vec<i64> = list.iter().map(|e| e.employee.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(list[2].brut, Some(1200.0));
    assert_eq!(list[2].net, Some(1029.84));
    assert_eq!(list[1].employee.first_name.as_deref(), Some("John"));
    // one employee listing plus one quote per employee
    assert_eq!(stubs.hits(), 4);

    let merged = serde_json::to_value(&list[0]).unwrap();
    assert_eq!(merged["first_name"], json!("Jane"));
    assert_eq!(merged["brut"], json!(500.0));
}

#[tokio::test]
async fn one_failed_quote_fails_the_whole_list() {
    let stubs = payroll_listing().await;
    stubs.update(|data| {
        data.quotes.remove(&2);
    });
    let dashboard = stubs.dashboard();

    let err = dashboard.salary_list().await.unwrap_err();

    match err {
        HrError::Unreachable(source) => assert!(matches!(
            source.as_ref(),
            ClientError::Status { status: 404, service: Service::Payroll, .. }
        )),
        other => panic!("expected unreachable, got {other:?}"),
    }
}

#[tokio::test]
async fn quote_outage_fails_enrichment() {
    let stubs = payroll_listing().await;
    stubs.set_failing(Route::Calc, true);

    let err = stubs.dashboard().salary_list().await.unwrap_err();

    assert!(matches!(err, HrError::Unreachable(_)));
}

#[tokio::test]
async fn health_checks_each_service() {
    let stubs = payroll_listing().await;
    let client = stubs.client();

    let health = client.health(Service::Department).await.unwrap();
    assert!(health.ok);
    assert_eq!(health.detail.unwrap()["status"], json!("ok"));

    let dead = HrClient::new(ClientSettings::new(ServiceEndpoints {
        employee: DEAD_ENDPOINT.into(),
        ..stubs.endpoints()
    }))
    .unwrap();
    let err = dead.health(Service::Employee).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { service: Service::Employee, .. }));
}

#[tokio::test]
async fn unreachable_employee_store_fails_load_without_touching_state() {
    let stubs = payroll_listing().await;
    let client = HrClient::new(ClientSettings::new(ServiceEndpoints {
        employee: DEAD_ENDPOINT.into(),
        ..stubs.endpoints()
    }))
    .unwrap();
    let dashboard = Dashboard::new(client);

    let err = dashboard.refresh().await.unwrap_err();

    match err {
        HrError::Load(source) => assert_eq!(source.service(), Some(Service::Employee)),
        other => panic!("expected load failure, got {other:?}"),
    }
    assert!(!dashboard.view().await.loaded);
}
