//! Form intake: accepts `application/x-www-form-urlencoded` or
//! `multipart/form-data` submissions as a flat string map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;

use crate::errors::AppError;

/// The submitted field map, exactly as parsed. Every value is coerced to a
/// string; no constraints beyond what the client applies.
#[derive(Debug, Clone)]
pub struct SubmittedValues(pub BTreeMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for SubmittedValues
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;

            let mut values = BTreeMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                values.insert(name, text);
            }
            Ok(SubmittedValues(values))
        } else {
            let Form(values) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            Ok(SubmittedValues(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method};

    async fn extract(req: Request) -> Result<SubmittedValues, AppError> {
        SubmittedValues::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_urlencoded_body_parses_to_map() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=A&company=B&blurb=C"))
            .unwrap();
        let SubmittedValues(values) = extract(req).await.unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.get("name").unwrap(), "A");
        assert_eq!(values.get("blurb").unwrap(), "C");
    }

    #[tokio::test]
    async fn test_urlencoded_decodes_percent_escapes() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=drew%40dropbox.com&blurb=one%20two"))
            .unwrap();
        let SubmittedValues(values) = extract(req).await.unwrap();
        assert_eq!(values.get("email").unwrap(), "drew@dropbox.com");
        assert_eq!(values.get("blurb").unwrap(), "one two");
    }

    #[tokio::test]
    async fn test_multipart_body_parses_to_map() {
        let boundary = "test-boundary";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"name\"\r\n\r\n\
             A\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"blurb\"\r\n\r\n\
             line one\nline two\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let SubmittedValues(values) = extract(req).await.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("name").unwrap(), "A");
        assert_eq!(values.get("blurb").unwrap(), "line one\nline two");
    }

    #[tokio::test]
    async fn test_unparseable_body_is_rejected() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate")
            .header(header::CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("no boundary here"))
            .unwrap();
        assert!(extract(req).await.is_err());
    }
}
