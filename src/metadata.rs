//! Namespace and route registration data.
//!
//! Purely declarative: the host serves it as JSON so feed directories can
//! list the route. Nothing here influences request handling.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// Mount point of the namespace.
pub const NAMESPACE_PATH: &str = "/generic_proxy";

#[derive(Debug, Clone, Serialize)]
pub struct Namespace {
    pub name: &'static str,
    pub description: &'static str,
    pub categories: Vec<&'static str>,
    pub lang: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFeatures {
    pub require_config: Vec<&'static str>,
    pub require_puppeteer: bool,
    pub anti_crawler: bool,
    #[serde(rename = "supportBT")]
    pub support_bt: bool,
    pub support_podcast: bool,
    pub support_scihub: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub categories: Vec<&'static str>,
    pub view: &'static str,
    pub parameters: BTreeMap<&'static str, &'static str>,
    pub maintainers: Vec<&'static str>,
    pub features: RouteFeatures,
}

/// Document served at [`NAMESPACE_PATH`].
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub namespace: Namespace,
    pub routes: Vec<Route>,
}

pub fn namespace() -> Namespace {
    Namespace {
        name: "Generic Proxy",
        description: "A utility route that proxies arbitrary HTTP/HTTPS resources. \
                      Useful for accessing files from remote servers through RSSHub.",
        categories: vec!["other"],
        lang: "en",
    }
}

pub fn proxy_route() -> Route {
    Route {
        path: "/:url{.+}",
        name: "Generic File Proxy",
        description: "Proxies arbitrary http/https resources. The target URL must be URL-encoded.",
        example: "/generic_proxy/https%3A%2F%2Fremote-server.com%2Frss.xml",
        categories: vec!["other"],
        view: "notifications",
        parameters: BTreeMap::from([(
            "url",
            "URL-encoded absolute http/https URL, e.g. `https%3A%2F%2Fremote-server.com%2Frss.xml`",
        )]),
        maintainers: vec!["synchrone"],
        features: RouteFeatures::default(),
    }
}

pub fn registration() -> Registration {
    Registration {
        namespace: namespace(),
        routes: vec![proxy_route()],
    }
}

pub async fn get_registration() -> Json<Registration> {
    Json(registration())
}
