//! End-to-end relay tests against a mock controller.

use std::time::Duration;

use lbaas_relay::resource::{HealthMonitor, Listener, LoadBalancer, Resource};
use lbaas_relay::{LbaasDriver, OperationContext, RelayError};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_update_pool_issues_put_with_envelope() {
    let (server, driver) = common::start_mock_controller().await;
    let pool = common::pool("p1");

    Mock::given(method("PUT"))
        .and(path("/lbaas/pools/p1"))
        .and(basic_auth(common::USERNAME, common::PASSWORD))
        .and(header_exists("x-request-id"))
        .and(body_json(json!({ "pool": pool.to_api_dict().unwrap() })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    driver
        .pool
        .update(&OperationContext::new(), &pool)
        .await
        .expect("2xx must be success");
}

#[tokio::test]
async fn test_create_pool_posts_to_collection() {
    let (server, driver) = common::start_mock_controller().await;
    let pool = common::pool("p1");

    Mock::given(method("POST"))
        .and(path("/lbaas/pools"))
        .and(body_json(json!({ "pool": pool.to_api_dict().unwrap() })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    driver.pool.create(&OperationContext::new(), &pool).await.unwrap();
}

#[tokio::test]
async fn test_member_create_and_delete_nest_under_pool() {
    let (server, driver) = common::start_mock_controller().await;
    let member = common::member("p1", "m1");

    Mock::given(method("POST"))
        .and(path("/lbaas/pools/p1/members"))
        .and(body_json(json!({ "member": member.to_api_dict().unwrap() })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lbaas/pools/p1/members/m1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = OperationContext::new();
    driver.member.create(&ctx, &member).await.unwrap();
    driver.member.delete(&ctx, &member).await.unwrap();
}

#[tokio::test]
async fn test_delete_sends_no_body() {
    let (server, driver) = common::start_mock_controller().await;

    Mock::given(method("DELETE"))
        .and(path("/lbaas/listeners/l1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let listener = Listener {
        id: "l1".into(),
        protocol: "HTTP".into(),
        protocol_port: 80,
        ..Default::default()
    };
    driver.listener.delete(&OperationContext::new(), &listener).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty(), "DELETE must not carry a body");
}

#[tokio::test]
async fn test_every_kind_uses_its_collection() {
    let (server, driver) = common::start_mock_controller().await;

    for collection in ["loadbalancers", "listeners", "pools", "healthmonitors"] {
        Mock::given(method("PUT"))
            .and(path(format!("/lbaas/{}/x1", collection)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let ctx = OperationContext::new();
    let lb = LoadBalancer {
        id: "x1".into(),
        ..Default::default()
    };
    let listener = Listener {
        id: "x1".into(),
        ..Default::default()
    };
    let hm = HealthMonitor {
        id: "x1".into(),
        monitor_type: "PING".into(),
        ..Default::default()
    };
    driver.load_balancer.update(&ctx, &lb).await.unwrap();
    driver.listener.update(&ctx, &listener).await.unwrap();
    driver.pool.update(&ctx, &common::pool("x1")).await.unwrap();
    driver.health_monitor.update(&ctx, &hm).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    for (body, key) in bodies.iter().zip(["loadbalancer", "listener", "pool", "healthmonitor"]) {
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(key), "expected '{}' in {}", key, body);
    }
}

#[tokio::test]
async fn test_non_2xx_is_remote_rejected() {
    let (server, driver) = common::start_mock_controller().await;

    Mock::given(method("POST"))
        .and(path("/lbaas/pools"))
        .respond_with(ResponseTemplate::new(500).set_body_string("controller exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = driver
        .pool
        .create(&OperationContext::new(), &common::pool("p1"))
        .await
        .unwrap_err();

    match err {
        RelayError::RemoteRejected { status, body, method: http_method, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "controller exploded");
            assert_eq!(http_method, "POST");
        }
        other => panic!("expected RemoteRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_credentials_surface_as_rejection() {
    let (server, _) = common::start_mock_controller().await;

    Mock::given(basic_auth(common::USERNAME, common::PASSWORD))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(10)
        .mount(&server)
        .await;

    let mut config = common::config_for(&server.uri());
    config.controller.password = "wrong".into();
    let driver = LbaasDriver::new(&config).unwrap();

    let err = driver
        .pool
        .update(&OperationContext::new(), &common::pool("p1"))
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let addr = common::closed_addr().await;
    let driver = LbaasDriver::new(&common::config_for(&format!("http://{}", addr))).unwrap();
    let ctx = OperationContext::new();
    let member = common::member("p1", "m1");

    let results = [
        driver.member.create(&ctx, &member).await,
        driver.member.update(&ctx, &member).await,
        driver.member.delete(&ctx, &member).await,
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {err:?}");
        assert_eq!(err.status(), None);
    }
}

#[tokio::test]
async fn test_slow_controller_times_out() {
    let (server, _) = common::start_mock_controller().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut config = common::config_for(&server.uri());
    config.timeouts.request_secs = 1;
    let driver = LbaasDriver::new(&config).unwrap();

    let err = driver
        .pool
        .update(&OperationContext::new(), &common::pool("p1"))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn test_refresh_and_stats_send_nothing() {
    let (server, driver) = common::start_mock_controller().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = OperationContext::new().with_project("tenant-a");
    let lb = LoadBalancer {
        id: "lb1".into(),
        ..Default::default()
    };
    driver.load_balancer.refresh(&ctx, &lb).await.unwrap();
    assert_eq!(driver.load_balancer.stats(&ctx, &lb).await.unwrap(), None);
    driver.member.refresh(&ctx, &common::member("p1", "m1")).await.unwrap();
}

#[tokio::test]
async fn test_invalid_path_fails_before_any_request() {
    let (server, driver) = common::start_mock_controller().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orphan = common::member("", "m1");
    let err = driver
        .member
        .create(&OperationContext::new(), &orphan)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InvalidPath { .. }));
}

#[tokio::test]
async fn test_base_url_with_prefix_and_trailing_slash() {
    let (server, _) = common::start_mock_controller().await;
    Mock::given(method("DELETE"))
        .and(path("/onos/v1/lbaas/healthmonitors/hm1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let driver =
        LbaasDriver::new(&common::config_for(&format!("{}/onos/v1/", server.uri()))).unwrap();
    let hm = HealthMonitor {
        id: "hm1".into(),
        ..Default::default()
    };
    driver.health_monitor.delete(&OperationContext::new(), &hm).await.unwrap();
}

#[tokio::test]
async fn test_relative_ids_never_reach_the_controller() {
    let (server, driver) = common::start_mock_controller().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = OperationContext::new();
    for id in [".", ".."] {
        let err = driver.pool.delete(&ctx, &common::pool(id)).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidPath { .. }), "{id}: {err:?}");

        let err = driver.pool.update(&ctx, &common::pool(id)).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidPath { .. }), "{id}: {err:?}");

        let err = driver
            .member
            .delete(&ctx, &common::member(id, "m1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidPath { .. }), "{id}: {err:?}");
    }
}

#[tokio::test]
async fn test_reserved_characters_stay_inside_the_id_segment() {
    let (server, driver) = common::start_mock_controller().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(4)
        .mount(&server)
        .await;

    let ctx = OperationContext::new();
    for id in ["a?b", "a#b", "50%"] {
        driver.pool.delete(&ctx, &common::pool(id)).await.unwrap();
    }
    driver
        .member
        .delete(&ctx, &common::member("p?1", "m#1"))
        .await
        .unwrap();

    let paths: Vec<(String, Option<String>)> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| (r.url.path().to_string(), r.url.query().map(str::to_string)))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("/lbaas/pools/a%3Fb".to_string(), None),
            ("/lbaas/pools/a%23b".to_string(), None),
            ("/lbaas/pools/50%25".to_string(), None),
            ("/lbaas/pools/p%3F1/members/m%231".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn test_requests_use_http_1_1() {
    let (addr, head) = common::start_recording_controller().await;
    let driver = LbaasDriver::new(&common::config_for(&format!("http://{}", addr))).unwrap();

    driver
        .pool
        .delete(&OperationContext::new(), &common::pool("p1"))
        .await
        .unwrap();

    let head = head.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert_eq!(request_line, "DELETE /lbaas/pools/p1 HTTP/1.1");
    assert!(head.to_ascii_lowercase().contains("authorization: basic "));
}
