//! `OrgApi` over the sObject, describe and query endpoints.

use super::http_client::auth_failure;
use super::*;

impl OrgApi for RestClient {
    fn instance_url(&self) -> &str {
        &self.instance_url
    }

    fn list_sobjects(&self) -> Result<SObjectListing> {
        let label = "list sobjects";
        let (status, body) = self.send(self.client.get(self.data_url("/sobjects")), label)?;
        let body = self.ensure_ok(status, body, label)?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|err| {
            debug!(%err, "sobject listing body is not a listing document");
            SObjectListing::default()
        }))
    }

    fn get_record(&self, path: &str) -> Result<Record> {
        let label = format!("get record {}", path);
        let (status, body) = self.send(self.client.get(self.url(path)), &label)?;
        let body = self.ensure_ok(status, body, &label)?;
        serde_json::from_str(&body)
            .map_err(|err| CloneError::network(&label, format!("malformed record body: {}", err)))
    }

    fn query_records(&self, soql: &str) -> Result<Vec<Record>> {
        let label = "query";
        let req = self.client.get(self.data_url("/query")).query(&[("q", soql)]);
        let (status, body) = self.send(req, label)?;
        let body = self.ensure_ok(status, body, label)?;
        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|err| CloneError::network(label, format!("malformed query body: {}", err)))?;
        Ok(parsed.records)
    }

    fn describe_fields(&self, object: &str) -> Result<Vec<FieldDescribe>> {
        let label = format!("describe {}", object);
        let (status, body) = self.send(
            self.client
                .get(self.data_url(&format!("/sobjects/{}/describe", object))),
            &label,
        )?;
        let body = self.ensure_ok(status, body, &label)?;
        let parsed: DescribeResponse = serde_json::from_str(&body).map_err(|err| {
            CloneError::network(&label, format!("malformed describe body ({}): {}", err, body))
        })?;
        Ok(parsed.fields)
    }

    fn create_record(&self, object: &str, record: &CleanRecord) -> Result<String> {
        let label = format!("insert {}", object);
        let req = self
            .client
            .post(self.data_url(&format!("/sobjects/{}", object)))
            .json(record);
        let (status, body) = self.send(req, &label)?;
        if let Some(err) = auth_failure(status, &body, &label) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(CloneError::InsertRejected {
                object: object.to_string(),
                body,
            });
        }
        Ok(body)
    }
}
