use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::database::Employee;

/// Thin HTTP client over the `/api/employees` resource
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

impl EmployeeClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("invalid API URL '{}': {}", base_url, e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn employees_url(&self) -> String {
        format!("{}/employees", self.base_url)
    }

    fn employee_url(&self, id: i64) -> String {
        format!("{}/employees/{}", self.base_url, id)
    }

    pub async fn list(&self, active: Option<&str>, search: Option<&str>) -> anyhow::Result<Vec<Employee>> {
        let mut params = Vec::new();
        if let Some(active) = active {
            params.push(("active", active));
        }
        if let Some(search) = search {
            params.push(("search", search));
        }

        let response = self.http.get(self.employees_url()).query(&params).send().await?;
        decode(response).await
    }

    pub async fn get(&self, id: i64) -> anyhow::Result<Employee> {
        let response = self.http.get(self.employee_url(id)).send().await?;
        decode(response).await
    }

    pub async fn create(&self, body: &Value) -> anyhow::Result<Employee> {
        let response = self.http.post(self.employees_url()).json(body).send().await?;
        decode(response).await
    }

    pub async fn update(&self, id: i64, body: &Value) -> anyhow::Result<Employee> {
        let response = self.http.put(self.employee_url(id)).json(body).send().await?;
        decode(response).await
    }

    /// Returns the server's confirmation message
    pub async fn delete(&self, id: i64) -> anyhow::Result<String> {
        let response = self.http.delete(self.employee_url(id)).send().await?;
        let body: MessageBody = decode(response).await?;
        Ok(body.message)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    Err(anyhow::anyhow!(server_error_message(status, &text)))
}

/// Prefer the server's `{"error": ...}` message; fall back to the raw body
fn server_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => format!("{} ({})", err.error, status.as_u16()),
        Err(_) if body.trim().is_empty() => format!("request failed with status {}", status),
        Err(_) => format!("request failed with status {}: {}", status, body.trim()),
    }
}
