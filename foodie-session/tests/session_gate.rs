// foodie-session/tests/session_gate.rs
// Session gate against the mock backend's account endpoint

use std::sync::Arc;

use foodie_client::{ClientConfig, HttpClient};
use foodie_mock::MockServer;
use foodie_session::{AuthStore, RouteDecision, SIGN_IN_ROUTE, SessionError, SessionGate, SessionProvider, Tab};

fn client(server: &MockServer, jwt: Option<&str>) -> HttpClient {
    let config = ClientConfig::new(server.endpoint(), "foodie");
    let config = match jwt {
        Some(jwt) => config.with_jwt(jwt),
        None => config,
    };
    config.build_http_client().unwrap()
}

#[tokio::test]
async fn test_valid_session_renders_shell() {
    let server = MockServer::start().await.unwrap();
    server
        .state()
        .add_session("jwt-ada", "user-1", "Ada", "ada@example.com");

    let store = Arc::new(AuthStore::new(client(&server, Some("jwt-ada"))));
    let gate = SessionGate::new(store.clone());
    assert_eq!(gate.decide(Tab::Home), RouteDecision::Loading);

    match gate.resolve(Tab::Home).await {
        RouteDecision::Shell(shell) => {
            let routes: Vec<_> = shell.items().iter().map(|i| i.route).collect();
            assert_eq!(routes, ["index", "search", "cart", "profile"]);
            assert!(shell.items()[0].focused);
        }
        other => panic!("unexpected decision: {other:?}"),
    }
    assert_eq!(store.user().unwrap().id, "user-1");
}

#[tokio::test]
async fn test_missing_session_redirects_to_sign_in() {
    let server = MockServer::start().await.unwrap();
    let store = Arc::new(AuthStore::new(client(&server, None)));

    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, SessionError::NoSession(_)), "{err:?}");

    let gate = SessionGate::new(store);
    assert_eq!(
        gate.decide(Tab::Home),
        RouteDecision::Redirect { href: SIGN_IN_ROUTE }
    );
}

#[tokio::test]
async fn test_unknown_jwt_redirects_to_sign_in() {
    let server = MockServer::start().await.unwrap();
    let store = Arc::new(AuthStore::new(client(&server, Some("stale"))));
    let gate = SessionGate::new(store.clone());

    assert_eq!(
        gate.resolve(Tab::Cart).await,
        RouteDecision::Redirect { href: SIGN_IN_ROUTE }
    );
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_unreachable_backend_is_signed_out() {
    // Reserve a port, then free it so connections are refused
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = ClientConfig::new(format!("http://{addr}/v1"), "foodie")
        .with_jwt("jwt")
        .build_http_client()
        .unwrap();

    let store = Arc::new(AuthStore::new(client));
    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, SessionError::Fetch(_)), "{err:?}");

    let gate = SessionGate::new(store);
    assert_eq!(
        gate.decide(Tab::Home),
        RouteDecision::Redirect { href: SIGN_IN_ROUTE }
    );
}
