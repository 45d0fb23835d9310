//! HTTP access to the employee, payroll and department services.
//!
//! No retries, deduplication or internal timeouts: a failed call is reported
//! once and the caller decides whether to trigger it again. A transport
//! timeout can be imposed through [`ClientSettings::timeout`].

use std::{fmt, time::Duration};

use entity::{
    CreatedEmployee, DepartmentRecord, EmployeePatch, EmployeeRecord, NewEmployee, PayrollRecord,
    SalaryQuote,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Upstream service a request is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Employee,
    Payroll,
    Department,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Employee, Service::Payroll, Service::Department];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Employee => "employee",
            Service::Payroll => "payroll",
            Service::Department => "department",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{service} service unreachable: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} service answered {status}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },
    #[error("{service} service sent an unreadable body: {source}")]
    Decode {
        service: Service,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {service} endpoint {url:?}")]
    InvalidUrl { service: Service, url: String },
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    pub fn service(&self) -> Option<Service> {
        match self {
            ClientError::Transport { service, .. }
            | ClientError::Status { service, .. }
            | ClientError::Decode { service, .. }
            | ClientError::InvalidUrl { service, .. } => Some(*service),
            ClientError::Build(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Base URLs of the three services.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServiceEndpoints {
    #[serde(default = "default_employee_api")]
    pub employee: String,
    #[serde(default = "default_payroll_api")]
    pub payroll: String,
    #[serde(default = "default_department_api")]
    pub department: String,
}

fn default_employee_api() -> String {
    "http://employee.local".to_string()
}

fn default_payroll_api() -> String {
    "http://payroll.local".to_string()
}

fn default_department_api() -> String {
    "http://department.local".to_string()
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            employee: default_employee_api(),
            payroll: default_payroll_api(),
            department: default_department_api(),
        }
    }
}

impl ServiceEndpoints {
    /// Reads `EMPLOYEE_API`, `PAYROLL_API` and `DEPARTMENT_API` through
    /// `lookup`, falling back to the cluster-local defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            employee: lookup("EMPLOYEE_API").unwrap_or(defaults.employee),
            payroll: lookup("PAYROLL_API").unwrap_or(defaults.payroll),
            department: lookup("DEPARTMENT_API").unwrap_or(defaults.department),
        }
    }

    pub fn base(&self, service: Service) -> &str {
        match service {
            Service::Employee => &self.employee,
            Service::Payroll => &self.payroll,
            Service::Department => &self.department,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub endpoints: ServiceEndpoints,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoints: ServiceEndpoints::default(),
            timeout: None,
            user_agent: concat!("teamflow-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    pub fn new(endpoints: ServiceEndpoints) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }
}

/// `GET /healthz` answer of one service.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceHealth {
    pub service: Service,
    pub ok: bool,
    pub detail: Option<Value>,
}

/// Client for every upstream operation the dashboard needs. Cheap to clone.
#[derive(Clone, Debug)]
pub struct HrClient {
    http: reqwest::Client,
    endpoints: ServiceEndpoints,
}

impl HrClient {
    pub fn new(settings: ClientSettings) -> ClientResult<Self> {
        for service in Service::ALL {
            let url = settings.endpoints.base(service);
            Url::parse(url).map_err(|_| ClientError::InvalidUrl {
                service,
                url: url.to_string(),
            })?;
        }
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;
        Ok(Self {
            http,
            endpoints: settings.endpoints,
        })
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    pub async fn list_employees(&self) -> ClientResult<Vec<EmployeeRecord>> {
        self.get_collection(Service::Employee, "/employees").await
    }

    pub async fn list_payroll(&self) -> ClientResult<Vec<PayrollRecord>> {
        self.get_collection(Service::Payroll, "/payroll").await
    }

    pub async fn list_departments(&self) -> ClientResult<Vec<DepartmentRecord>> {
        self.get_collection(Service::Department, "/departments").await
    }

    /// Per-employee computed salary (`GET /calc?id=<id>`).
    pub async fn salary_quote(&self, employee_id: i64) -> ClientResult<SalaryQuote> {
        let request = self
            .request(Method::GET, Service::Payroll, "/calc")
            .query(&[("id", employee_id)]);
        let bytes = self.send(Service::Payroll, request).await?;
        decode(Service::Payroll, &bytes)
    }

    /// Returns the acknowledgement when the service sent one.
    pub async fn create_employee(
        &self,
        employee: &NewEmployee,
    ) -> ClientResult<Option<CreatedEmployee>> {
        let request = self
            .request(Method::POST, Service::Employee, "/employees")
            .json(employee);
        let bytes = self.send(Service::Employee, request).await?;
        if is_blank(&bytes) {
            return Ok(None);
        }
        decode(Service::Employee, &bytes).map(Some)
    }

    pub async fn update_employee(&self, id: i64, patch: &EmployeePatch) -> ClientResult<()> {
        let path = format!("/employees/{id}");
        let request = self
            .request(Method::PUT, Service::Employee, &path)
            .json(patch);
        self.send(Service::Employee, request).await.map(|_| ())
    }

    pub async fn delete_employee(&self, id: i64) -> ClientResult<()> {
        let path = format!("/employees/{id}");
        let request = self.request(Method::DELETE, Service::Employee, &path);
        self.send(Service::Employee, request).await.map(|_| ())
    }

    pub async fn health(&self, service: Service) -> ClientResult<ServiceHealth> {
        let request = self.request(Method::GET, service, "/healthz");
        let bytes = self.send(service, request).await?;
        let detail = serde_json::from_slice(&bytes).ok();
        Ok(ServiceHealth {
            service,
            ok: true,
            detail,
        })
    }

    fn request(&self, method: Method, service: Service, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.endpoints.base(service).trim_end_matches('/'), path);
        debug!(%service, %method, %url, "upstream request");
        self.http.request(method, url)
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
    ) -> ClientResult<Vec<T>> {
        let request = self.request(Method::GET, service, path);
        let bytes = self.send(service, request).await?;
        decode_collection(service, &bytes)
    }

    async fn send(&self, service: Service, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { service, source })?;
        let response = check_status(service, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { service, source })?;
        Ok(bytes.to_vec())
    }
}

async fn check_status(service: Service, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn decode<T: DeserializeOwned>(service: Service, bytes: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(bytes).map_err(|source| ClientError::Decode { service, source })
}

/// Decodes a collection body. An empty body or a JSON `null` is an empty
/// collection, not an error. Entries that do not fit the record shape (no
/// usable `id`, say) are skipped one by one; only a body that is not a list
/// at all fails.
pub fn decode_collection<T: DeserializeOwned>(
    service: Service,
    bytes: &[u8],
) -> ClientResult<Vec<T>> {
    if is_blank(bytes) {
        return Ok(Vec::new());
    }
    let items = decode::<Option<Vec<Value>>>(service, bytes)?.unwrap_or_default();
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%service, index, error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect();
    if records.len() < total {
        debug!(%service, kept = records.len(), total, "collection decoded with gaps");
    }
    Ok(records)
}
