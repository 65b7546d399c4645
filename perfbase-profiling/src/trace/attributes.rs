// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

/// Client IP headers set by proxies and CDNs, highest priority first.
const CLIENT_IP_HEADERS: [&str; 5] = [
    "CF-Connecting-IP",
    "Fastly-Client-IP",
    "True-Client-IP",
    "X-Forwarded-For",
    "X-Real-IP",
];

/// Descriptive fields sent alongside a trace. None of them are interpreted
/// by the SDK.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    /// What triggered the trace, e.g. `GET /users/:id` or `cron:daily-report`.
    pub action: Option<String>,
    pub user_id: Option<String>,
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub hostname: Option<String>,
    /// e.g. `production`, `staging`
    pub environment: Option<String>,
    /// A version number, commit hash or anything else identifying the build.
    pub app_version: Option<String>,
    /// Version of the runtime the traced application runs on.
    pub runtime_version: Option<String>,
    pub http_method: Option<String>,
    pub http_status_code: Option<u16>,
    pub http_url: Option<String>,
}

impl Attributes {
    /// Attributes with the fields the SDK can discover on its own filled in.
    pub fn collect() -> Self {
        Self {
            hostname: hostname(),
            ..Self::default()
        }
    }

    /// Derives `user_ip` and `user_agent` from incoming request headers.
    /// `REMOTE_ADDR` is used as the address of last resort. Fields are only
    /// overwritten when a value is found.
    pub fn apply_request_headers<'a, I>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let headers: Vec<(&str, &str)> = headers.into_iter().collect();
        let find = |name: &str| {
            headers
                .iter()
                .find(|(k, v)| k.eq_ignore_ascii_case(name) && !v.is_empty())
                .map(|(_, v)| *v)
        };

        let from_proxy = CLIENT_IP_HEADERS.iter().find_map(|&name| {
            let value = find(name)?;
            if name == "X-Forwarded-For" {
                value.split(',').next().map(str::trim)
            } else {
                Some(value)
            }
        });
        if let Some(ip) = from_proxy.or_else(|| find("REMOTE_ADDR")) {
            self.user_ip = Some(ip.to_owned());
        }

        if let Some(agent) = find("User-Agent") {
            self.user_agent = Some(agent.to_owned());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn hostname() -> Option<String> {
    sys_info::hostname().ok().filter(|h| !h.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn hostname() -> Option<String> {
    None
}
