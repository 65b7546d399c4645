// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use httpmock::prelude::*;
use perfbase_profiling::test_utils::RecordingProfiler;
use perfbase_profiling::transport::SUBMIT_ENDPOINT;
use perfbase_profiling::{
    ApiClient, Attributes, Config, Perfbase, Scalar, SubmissionPayload, TraceError, Transport,
    TransportError,
};
use std::time::Duration;

fn config_for(server: &MockServer) -> Config {
    Config {
        api_url: server.base_url(),
        timeout: Duration::from_secs(5),
        ..Config::with_api_key("test-api-key")
    }
}

#[cfg_attr(miri, ignore)]
#[test]
fn submit_trace_posts_json_with_credentials() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/submit")
            .header("Authorization", "Bearer test-api-key")
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                concat!("Perfbase-Rust-SDK/", env!("CARGO_PKG_VERSION")),
            );
        then.status(200).body("{}");
    });

    let client = ApiClient::new(&config_for(&server)).unwrap();
    let payload = SubmissionPayload {
        attributes: Attributes::default(),
        perf_data: "H4sIAAAAAAAA/6uuBQBDv6ajAgAAAA==".to_owned(),
        meta_data: None,
    };
    client.submit_trace(&payload).unwrap();

    mock.assert();
}

#[cfg_attr(miri, ignore)]
#[test]
fn rejected_submission_is_a_transport_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(SUBMIT_ENDPOINT);
        then.status(401).body("invalid api key");
    });

    let client = ApiClient::new(&config_for(&server)).unwrap();
    let err = client.post(SUBMIT_ENDPOINT, "{}").unwrap_err();
    match err {
        TransportError::Client(client_err) => assert_eq!(client_err.status(), Some(401)),
        other => panic!("expected a client error, got {other:?}"),
    }
    // One attempt, no retries.
    mock.assert();
}

#[cfg_attr(miri, ignore)]
#[test]
fn perfbase_delivers_a_finished_trace() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/submit")
            .header("Authorization", "Bearer test-api-key");
        then.status(202);
    });

    let mut perfbase = Perfbase::new(config_for(&server)).unwrap();
    let trace = perfbase
        .create_instance(Box::new(RecordingProfiler::with_records([(
            "Kernel::handle~Controller::index",
            vec![Scalar::Int(12), Scalar::Int(2048)],
        )])))
        .unwrap();
    trace.start().unwrap();
    trace.stop(true).unwrap();

    mock.assert();
}

#[cfg_attr(miri, ignore)]
#[test]
fn perfbase_surfaces_collector_errors() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/submit");
        then.status(500);
    });

    let mut perfbase = Perfbase::new(config_for(&server)).unwrap();
    let trace = perfbase
        .create_instance(Box::new(RecordingProfiler::new()))
        .unwrap();
    trace.start().unwrap();

    assert!(matches!(trace.stop(true), Err(TraceError::Transport(_))));
    assert!(trace.state().is_complete());
    mock.assert();
}

#[cfg_attr(miri, ignore)]
#[test]
fn post_from_inside_an_async_runtime() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/submit").body("{}");
        then.status(200);
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let client = ApiClient::new(&config_for(&server)).unwrap();
        client.post(SUBMIT_ENDPOINT, "{}").unwrap();
        // Dropping the client here must not block on its runtime.
        drop(client);
    });

    mock.assert();
}

#[cfg_attr(miri, ignore)]
#[test]
fn stop_and_send_from_inside_an_async_runtime() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/submit");
        then.status(202);
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut perfbase = Perfbase::new(config_for(&server)).unwrap();
        let trace = perfbase
            .create_instance(Box::new(RecordingProfiler::new()))
            .unwrap();
        trace.start().unwrap();
        trace.stop(true).unwrap();
        trace.send().unwrap();
    });

    mock.assert_hits(2);
}
