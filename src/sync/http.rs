use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::SyncError;

/// Longest response body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Sends the request and maps 404 and other non-2xx statuses to typed errors.
pub(super) async fn send(request: RequestBuilder, url: &str) -> Result<Response, SyncError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(SyncError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        tracing::warn!(status = status.as_u16(), url, body = %body, "upstream request failed");
        return Err(SyncError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
            body,
        });
    }

    Ok(response)
}

/// Sends the request and decodes the JSON body as `T`.
pub(super) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
    context: &str,
) -> Result<T, SyncError> {
    let response = send(request, url).await?;
    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| SyncError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Returns the `rel="next"` URL from a `Link` header, if any.
pub(super) fn next_link(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;
    header
        .split(',')
        .map(str::trim)
        .find(|segment| segment.contains(r#"rel="next""#))
        .and_then(|segment| {
            let start = segment.find('<')? + 1;
            let end = segment.find('>')?;
            (start < end).then(|| segment[start..end].to_owned())
        })
}
