use std::net::SocketAddr;

use actix_ip_allowlist::{AllowlistConfig, IpAllowlist, Rejection, SharedChecker};
use actix_web::{App, HttpResponse, http::StatusCode, test, web};
use actix_web_lab::assert_response_matches;
use ip_allowlist::Checker;

fn peer(addr: &str) -> SocketAddr {
    addr.parse().unwrap()
}

#[actix_web::test]
async fn guards_routes_by_peer_address() {
    let allowlist = AllowlistConfig::new(["1.2.3.4/24", "2a03:4000:6:d080::/64"])
        .build()
        .unwrap();

    let app = test::init_service(
        App::new()
            .wrap(allowlist)
            .route("/", web::get().to(|| async { HttpResponse::Ok().body("content") })),
    )
    .await;

    for addr in [
        "1.2.3.1:123",
        "1.2.3.255:80",
        "[2a03:4000:6:d080::42]:443",
        "[::ffff:1.2.3.1]:80",
    ] {
        let req = test::TestRequest::default().peer_addr(peer(addr)).to_request();
        let res = test::call_service(&app, req).await;
        assert_response_matches!(res, OK; @raw "content");
    }

    for addr in ["10.2.3.1:123", "1.2.16.1:80", "[4242::1]:443", "[::ffff:10.2.3.1]:80"] {
        let req = test::TestRequest::default().peer_addr(peer(addr)).to_request();
        let res = test::call_service(&app, req).await;
        assert_response_matches!(res, FORBIDDEN; @raw "Forbidden");
    }
}

#[actix_web::test]
async fn dual_stack_listener_sees_ipv4_clients() {
    let allowlist = AllowlistConfig::new(["1.2.3.4/24"]).build().unwrap();

    let app = test::init_service(
        App::new()
            .wrap(allowlist)
            .default_service(web::to(HttpResponse::Ok)),
    )
    .await;

    let req = test::TestRequest::default()
        .peer_addr(peer("[::ffff:1.2.3.1]:5000"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::default()
        .peer_addr(peer("[::ffff:1.2.4.1]:5000"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN,
    );
}

#[actix_web::test]
async fn config_from_json() {
    let config: AllowlistConfig = serde_json::from_str(
        r#"{
            "name": "admin",
            "sourceRange": ["10.0.0.0/8"],
            "reject": {
                "kind": "redirect",
                "regex": "^http://([^/]+)/admin/(.*)$",
                "replacement": "http://$1/public/$2"
            }
        }"#,
    )
    .unwrap();

    let app = test::init_service(
        App::new()
            .wrap(config.build().unwrap())
            .default_service(web::to(HttpResponse::Ok)),
    )
    .await;

    let req = test::TestRequest::with_uri("http://example.com/admin/users")
        .peer_addr(peer("10.9.8.7:5000"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::with_uri("http://example.com/admin/users")
        .peer_addr(peer("11.9.8.7:5000"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_response_matches!(res, FOUND; "location" => "http://example.com/public/users");

    let req = test::TestRequest::with_uri("http://example.com/other")
        .peer_addr(peer("11.9.8.7:5000"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn reconfigure_without_restart() {
    let checker = SharedChecker::new(Checker::new(["127.0.0.1"]).unwrap());

    let app = test::init_service(
        App::new()
            .wrap(IpAllowlist::shared(checker.clone()).reject_with(Rejection::NotFound))
            .default_service(web::to(HttpResponse::Ok)),
    )
    .await;

    let req = test::TestRequest::default()
        .peer_addr(peer("127.0.0.1:8080"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    checker.store(Checker::new(["::1"]).unwrap());

    let req = test::TestRequest::default()
        .peer_addr(peer("127.0.0.1:8080"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND,
    );

    let req = test::TestRequest::default()
        .peer_addr(peer("[::1]:8080"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn stacked_allowlists() {
    let outer = IpAllowlist::new(Checker::new(["10.0.0.0/8"]).unwrap()).name("outer");
    let inner = IpAllowlist::new(Checker::new(["10.1.0.0/16"]).unwrap())
        .name("inner")
        .reject_with(Rejection::NotFound);

    let app = test::init_service(
        App::new()
            .service(
                web::scope("/internal")
                    .wrap(inner)
                    .default_service(web::to(HttpResponse::Ok)),
            )
            .default_service(web::to(HttpResponse::Ok))
            .wrap(outer),
    )
    .await;

    let cases = [
        ("/", "10.2.0.1:1", StatusCode::OK),
        ("/internal/x", "10.1.0.1:1", StatusCode::OK),
        ("/internal/x", "10.2.0.1:1", StatusCode::NOT_FOUND),
        ("/", "11.0.0.1:1", StatusCode::FORBIDDEN),
        ("/internal/x", "11.0.0.1:1", StatusCode::FORBIDDEN),
    ];

    for (path, addr, status) in cases {
        let req = test::TestRequest::with_uri(path)
            .peer_addr(peer(addr))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), status, "{path} from {addr}");
    }
}
