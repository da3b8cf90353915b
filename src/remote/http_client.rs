use super::*;

impl RestClient {
    pub(super) fn auth(&self) -> String {
        format!("OAuth {}", self.session_id)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.instance_url, path)
    }

    pub(super) fn data_url(&self, rest: &str) -> String {
        self.url(&format!("/services/data/{}{}", self.api_version, rest))
    }

    /// Sends with the session header and reads the whole body. Only transport
    /// failures are errors here; status handling is left to the caller.
    pub(super) fn send(&self, req: RequestBuilder, label: &str) -> Result<(StatusCode, String)> {
        let resp = req
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .map_err(|err| CloneError::network(label, transport_detail(&err)))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| CloneError::network(label, transport_detail(&err)))?;
        debug!(label, status = status.as_u16(), bytes = body.len(), "salesforce response");
        Ok((status, body))
    }

    pub(super) fn ensure_ok(&self, status: StatusCode, body: String, label: &str) -> Result<String> {
        if let Some(err) = auth_failure(status, &body, label) {
            return Err(err);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(CloneError::ObjectNotFound(format!("{}: {}", label, body)));
        }
        if !status.is_success() {
            return Err(CloneError::network(
                label,
                format!("unexpected status {}: {}", status, body),
            ));
        }
        Ok(body)
    }
}

pub(super) fn auth_failure(status: StatusCode, body: &str, label: &str) -> Option<CloneError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(CloneError::Auth {
            label: label.to_string(),
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    None
}

fn transport_detail(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out ({})", err)
    } else {
        err.to_string()
    }
}
