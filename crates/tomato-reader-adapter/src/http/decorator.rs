/*
[INPUT]:  Outbound reqwest::Request, DeviceIdentity, Signer, entropy
[OUTPUT]: New, fully authenticated reqwest::Request
[POS]:    HTTP layer - request decoration before transmission
[UPDATE]: When adding headers/query parameters or changing decoration order
*/

use std::sync::Arc;

use chrono::Utc;
use reqwest::Request;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER,
    USER_AGENT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::http::{ReaderError, Result};
use crate::identity::{DeviceIdentity, DeviceProfile};
use crate::signing::{EntropySource, OsEntropy, Signer, SignerScheme, SigningContext};

pub const X_GORGON: HeaderName = HeaderName::from_static("x-gorgon");
pub const X_KHRONOS: HeaderName = HeaderName::from_static("x-khronos");
pub const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");
pub const X_SDK_VERSION: HeaderName = HeaderName::from_static("x-sdk-version");
pub const X_CLIENT_VERSION: HeaderName = HeaderName::from_static("x-client-version");
pub const X_APP_ID: HeaderName = HeaderName::from_static("x-app-id");
pub const X_DEVICE_TYPE: HeaderName = HeaderName::from_static("x-device-type");
pub const X_DEVICE_ID: HeaderName = HeaderName::from_static("x-device-id");
pub const X_ANDROID_ID: HeaderName = HeaderName::from_static("x-android-id");
pub const X_TIMESTAMP: HeaderName = HeaderName::from_static("x-timestamp");

pub const RTICKET_PARAM: &str = "_rticket";
pub const SIGNATURE_PARAM: &str = "_signature";

/// Fixed app-identity values sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppIdentity {
    pub aid: String,
    pub app_name: String,
    pub version_code: String,
    pub version_name: String,
    pub update_version_code: String,
    pub sdk_version: String,
    pub client_version: String,
    pub device_type: String,
    pub device_platform: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub accept_encoding: String,
    pub origin: String,
    pub referer: String,
    pub requested_with: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            aid: "1967".to_string(),
            app_name: "fanqie_android".to_string(),
            version_code: "100".to_string(),
            version_name: "4.7.0.1".to_string(),
            update_version_code: "100".to_string(),
            sdk_version: "2".to_string(),
            client_version: "4.7.0.1".to_string(),
            device_type: "android".to_string(),
            device_platform: "android".to_string(),
            user_agent: "Mozilla/5.0 (Linux; Android 13; SM-G991B) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/115.0.0.0 Mobile Safari/537.36 Fanqie/4.7.0.1"
                .to_string(),
            accept: "application/json, text/plain, */*".to_string(),
            accept_language: "zh-CN,zh;q=0.9,en;q=0.8".to_string(),
            accept_encoding: "gzip, deflate, br".to_string(),
            origin: "https://fanqienovel.com".to_string(),
            referer: "https://fanqienovel.com/".to_string(),
            requested_with: "XMLHttpRequest".to_string(),
        }
    }
}

/// Turns plain requests into authenticated ones.
///
/// Decoration never mutates its input and must run once per attempt:
/// every call draws a fresh nonce and timestamp.
#[derive(Clone)]
pub struct RequestDecorator {
    app: AppIdentity,
    identity: Arc<DeviceIdentity>,
    signer: Arc<dyn Signer>,
    entropy: Arc<dyn EntropySource>,
}

impl std::fmt::Debug for RequestDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDecorator")
            .field("app", &self.app)
            .field("identity", &self.identity)
            .field("signer", &self.signer.name())
            .finish_non_exhaustive()
    }
}

impl Default for RequestDecorator {
    fn default() -> Self {
        let entropy: Arc<dyn EntropySource> = Arc::new(OsEntropy);
        Self::new(
            AppIdentity::default(),
            Arc::new(DeviceIdentity::default()),
            SignerScheme::default().build(Arc::clone(&entropy)),
        )
        .with_entropy(entropy)
    }
}

impl RequestDecorator {
    pub fn new(app: AppIdentity, identity: Arc<DeviceIdentity>, signer: Arc<dyn Signer>) -> Self {
        Self {
            app,
            identity,
            signer,
            entropy: Arc::new(OsEntropy),
        }
    }

    /// Randomness used for `_rticket`
    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    /// Produce the authenticated form of `request`.
    ///
    /// Fails closed: any error means no signed request exists and nothing
    /// must be sent.
    pub fn decorate(&self, request: &Request) -> Result<Request> {
        let mut decorated = request
            .try_clone()
            .ok_or_else(|| ReaderError::signing("request body is not cloneable"))?;

        let timestamp_millis = Utc::now().timestamp_millis();
        let nonce = self.entropy.nonce();
        let profile = self.identity.descriptors();

        let mut fixed = self.identity_params(&profile);
        fixed.retain(|(key, _)| !has_query_key(decorated.url(), key));
        let mut params = vec![(RTICKET_PARAM, nonce.clone())];
        params.extend(fixed);
        merge_query(decorated.url_mut(), &params);

        let ctx = SigningContext {
            method: decorated.method().as_str().to_string(),
            url: decorated.url().to_string(),
            timestamp_millis,
            nonce,
        };
        let artifact = self.signer.sign(&ctx)?;
        merge_query(
            decorated.url_mut(),
            &[(SIGNATURE_PARAM, artifact.signature_header.clone())],
        );

        let headers = decorated.headers_mut();
        self.insert_fixed_headers(headers)?;
        insert(headers, X_DEVICE_ID, &profile.device_id)?;
        insert(headers, X_ANDROID_ID, &profile.android_id)?;
        insert(headers, X_TIMESTAMP, &ctx.timestamp_millis.to_string())?;
        insert(headers, X_GORGON, &artifact.signature_header)?;
        insert(headers, X_KHRONOS, &artifact.timestamp_header)?;

        debug!(
            method = %ctx.method,
            path = decorated.url().path(),
            rticket = %ctx.nonce,
            signer = self.signer.name(),
            "request decorated"
        );

        Ok(decorated)
    }

    fn identity_params(&self, profile: &DeviceProfile) -> Vec<(&'static str, String)> {
        vec![
            ("device_id", profile.device_id.clone()),
            ("android_id", profile.android_id.clone()),
            ("aid", self.app.aid.clone()),
            ("version_code", self.app.version_code.clone()),
            ("app_name", self.app.app_name.clone()),
            ("version_name", self.app.version_name.clone()),
            ("device_type", self.app.device_type.clone()),
            ("device_platform", self.app.device_platform.clone()),
            ("os_version", profile.os_version.clone()),
            ("device_brand", profile.brand.clone()),
            ("device_model", profile.model.clone()),
            ("resolution", profile.resolution.clone()),
            ("dpi", profile.dpi.clone()),
            ("update_version_code", self.app.update_version_code.clone()),
        ]
    }

    fn insert_fixed_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        insert(headers, USER_AGENT, &self.app.user_agent)?;
        insert(headers, ACCEPT, &self.app.accept)?;
        insert(headers, ACCEPT_LANGUAGE, &self.app.accept_language)?;
        insert(headers, ACCEPT_ENCODING, &self.app.accept_encoding)?;
        insert(headers, ORIGIN, &self.app.origin)?;
        insert(headers, REFERER, &self.app.referer)?;
        insert(headers, X_REQUESTED_WITH, &self.app.requested_with)?;
        insert(headers, X_SDK_VERSION, &self.app.sdk_version)?;
        insert(headers, X_CLIENT_VERSION, &self.app.client_version)?;
        insert(headers, X_APP_ID, &self.app.aid)?;
        insert(headers, X_DEVICE_TYPE, &self.app.device_type)?;
        Ok(())
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|err| ReaderError::signing(format!("invalid value for header {name}: {err}")))?;
    headers.insert(name, value);
    Ok(())
}

fn has_query_key(url: &Url, key: &str) -> bool {
    url.query_pairs().any(|(existing, _)| existing == key)
}

/// Set `params` on the query, replacing earlier values of the same keys.
///
/// Segments for other keys are kept byte-for-byte in their original order.
fn merge_query(url: &mut Url, params: &[(&str, String)]) {
    let mut segments: Vec<String> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            let key = form_urlencoded::parse(segment.as_bytes())
                .next()
                .map(|(key, _)| key.into_owned())
                .unwrap_or_default();
            !params.iter().any(|(name, _)| *name == key)
        })
        .map(str::to_string)
        .collect();

    let appended = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
        .finish();
    if !appended.is_empty() {
        segments.push(appended);
    }

    url.set_query(Some(&segments.join("&")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticPlatform;
    use crate::signing::{GorgonSigner, SeededEntropy, SignatureArtifact};
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use reqwest::{Body, Client, Method};
    use std::collections::HashSet;

    fn decorator() -> RequestDecorator {
        let identity = DeviceIdentity::new(StaticPlatform {
            hardware_id: Some("device-1".to_string()),
            android_id: Some("android-1".to_string()),
            ..Default::default()
        });
        RequestDecorator::new(
            AppIdentity::default(),
            Arc::new(identity),
            Arc::new(GorgonSigner::default()),
        )
    }

    fn get(url: &str) -> Request {
        Client::new().get(url).build().unwrap()
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn test_decorate_adds_identity_params_and_headers() {
        let request = get("https://api.example.com/reading/bookapi/detail/v/?item_id=42");
        let decorated = decorator().decorate(&request).unwrap();
        let url = decorated.url();

        assert_eq!(query_value(url, "item_id").as_deref(), Some("42"));
        assert_eq!(query_value(url, "device_id").as_deref(), Some("device-1"));
        assert_eq!(query_value(url, "android_id").as_deref(), Some("android-1"));
        assert_eq!(query_value(url, "aid").as_deref(), Some("1967"));
        assert_eq!(query_value(url, "resolution").as_deref(), Some("2400*1080"));
        assert_eq!(query_value(url, RTICKET_PARAM).unwrap().len(), 32);

        let headers = decorated.headers();
        assert_eq!(headers[X_DEVICE_ID], "device-1");
        assert_eq!(headers[X_APP_ID], "1967");
        assert_eq!(headers[X_DEVICE_TYPE], "android");
        assert!(headers.contains_key(USER_AGENT));
        assert_eq!(headers[X_KHRONOS], headers[X_TIMESTAMP]);
        assert_eq!(
            query_value(url, SIGNATURE_PARAM).as_deref(),
            headers[X_GORGON].to_str().ok()
        );
        assert!(BASE64.decode(headers[X_GORGON].as_bytes()).is_ok());
    }

    #[test]
    fn test_input_request_is_untouched() {
        let request = get("https://api.example.com/path/?keyword=a%20b&limit=20");
        let before = request.url().clone();
        let _ = decorator().decorate(&request).unwrap();
        assert_eq!(request.url(), &before);
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_existing_params_kept_byte_for_byte() {
        let request = get("https://api.example.com/p/?keyword=a%20b&limit=20&device_id=mine");
        let decorated = decorator().decorate(&request).unwrap();
        let query = decorated.url().query().unwrap();

        assert!(query.starts_with("keyword=a%20b&limit=20&device_id=mine&"));
        assert_eq!(decorated.url().host_str(), Some("api.example.com"));
        assert_eq!(decorated.url().path(), "/p/");
        assert_eq!(
            decorated
                .url()
                .query_pairs()
                .filter(|(key, _)| key == "device_id")
                .count(),
            1
        );
    }

    #[test]
    fn test_stale_rticket_is_replaced() {
        let request = get("https://api.example.com/p/?_rticket=stale&_signature=old");
        let decorated = decorator().decorate(&request).unwrap();
        let url = decorated.url();

        assert_ne!(query_value(url, RTICKET_PARAM).as_deref(), Some("stale"));
        assert_ne!(query_value(url, SIGNATURE_PARAM).as_deref(), Some("old"));
        assert_eq!(url.query_pairs().filter(|(k, _)| k == RTICKET_PARAM).count(), 1);
    }

    #[test]
    fn test_nonces_are_unique() {
        let decorator = decorator();
        let request = get("https://api.example.com/p/");
        let nonces: HashSet<String> = (0..10_000)
            .map(|_| {
                let decorated = decorator.decorate(&request).unwrap();
                query_value(decorated.url(), RTICKET_PARAM).unwrap()
            })
            .collect();
        assert_eq!(nonces.len(), 10_000);
    }

    #[test]
    fn test_timestamp_close_to_wall_clock() {
        let decorated = decorator().decorate(&get("https://api.example.com/p/")).unwrap();
        let khronos: i64 = decorated.headers()[X_KHRONOS].to_str().unwrap().parse().unwrap();
        assert!(khronos >= 0);
        assert!((Utc::now().timestamp_millis() - khronos).abs() < 5_000);
    }

    #[test]
    fn test_body_is_preserved() {
        let request = Client::new()
            .post("https://api.example.com/p/")
            .body("payload")
            .build()
            .unwrap();
        let decorated = decorator().decorate(&request).unwrap();
        assert_eq!(decorated.method(), Method::POST);
        assert_eq!(
            decorated.body().and_then(Body::as_bytes),
            Some(&b"payload"[..])
        );
    }

    #[test]
    fn test_seeded_entropy_fixes_rticket() {
        let a = decorator().with_entropy(Arc::new(SeededEntropy::new(5)));
        let b = decorator().with_entropy(Arc::new(SeededEntropy::new(5)));
        let request = get("https://api.example.com/p/");
        assert_eq!(
            query_value(a.decorate(&request).unwrap().url(), RTICKET_PARAM),
            query_value(b.decorate(&request).unwrap().url(), RTICKET_PARAM)
        );
    }

    struct FailingSigner;

    impl Signer for FailingSigner {
        fn sign(&self, _ctx: &SigningContext) -> Result<SignatureArtifact> {
            Err(ReaderError::signing("primitive unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_signer_failure_fails_closed() {
        let decorator = RequestDecorator::new(
            AppIdentity::default(),
            Arc::new(DeviceIdentity::new(StaticPlatform::default())),
            Arc::new(FailingSigner),
        );
        let err = decorator
            .decorate(&get("https://api.example.com/p/"))
            .unwrap_err();
        assert!(err.is_signing_error());
    }

    #[test]
    fn test_invalid_header_value_fails_closed() {
        let app = AppIdentity {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        let decorator = RequestDecorator::new(
            app,
            Arc::new(DeviceIdentity::new(StaticPlatform::default())),
            Arc::new(GorgonSigner::default()),
        );
        assert!(decorator.decorate(&get("https://api.example.com/p/")).is_err());
    }
}
