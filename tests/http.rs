// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use tenantview_lib::{
        api::{ApiError, HttpApi, TenantApi, TenantId},
        config::Config,
        session::{EditOutcome, SessionController, SessionKind},
        store::{Refresh, TenantStore},
        summary::{reconcile, HealthClass},
        tenant::Domains,
        test_env::*,
    };

    fn client(console: &MockConsole) -> HttpApi {
        let config = Config {
            api_url: format!("{}/", console.url),
            timeout_secs: 5,
            tenant: None,
        };
        HttpApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn get_tenant() {
        let console = MockConsole::start(vec![tenant_fixture()]).await;
        let api = client(&console);

        let tenant = api.get_tenant(&fixture_id()).await.unwrap();
        assert_eq!(tenant, tenant_fixture());
        assert_eq!(
            console.requests(),
            vec!["GET /api/v1/namespaces/tenant-lite/tenants/storage-lite"]
        );
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found() {
        let console = MockConsole::start(vec![tenant_fixture()]).await;
        let api = client(&console);

        let result = api.get_tenant(&TenantId::new("tenant-lite", "nope")).await;
        assert_eq!(result, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn server_errors_carry_status_and_body() {
        let console = MockConsole::start(vec![tenant_fixture()]).await;
        console.fail_with(Some(StatusCode::INTERNAL_SERVER_ERROR));
        let api = client(&console);

        let result = api.update_image(&fixture_id(), "minio/minio:latest").await;
        assert_eq!(
            result,
            Err(ApiError::Status(500, "injected failure".to_string()))
        );
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Grab a free port and release it again so that nothing is listening there.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let config = Config {
            api_url: format!("http://{addr}"),
            timeout_secs: 5,
            tenant: None,
        };
        let api = HttpApi::new(&config).unwrap();

        let result = api.get_tenant(&fixture_id()).await;
        assert!(matches!(result, Err(ApiError::Transport(_))), "{result:?}");
    }

    #[tokio::test]
    async fn update_routes() {
        let console = MockConsole::start(vec![tenant_fixture()]).await;
        let api = client(&console);

        api.update_image(&fixture_id(), "minio/minio:latest")
            .await
            .unwrap();
        let domains = Domains {
            console: None,
            minio: Some(vec!["https://s3.example".to_string()]),
        };
        api.update_domains(&fixture_id(), &domains).await.unwrap();

        assert_eq!(
            console.requests(),
            vec![
                "PUT /api/v1/namespaces/tenant-lite/tenants/storage-lite",
                "PUT /api/v1/namespaces/tenant-lite/tenants/storage-lite/domains",
            ]
        );

        let tenant = console.tenant(&fixture_id()).unwrap();
        assert_eq!(tenant.image.as_deref(), Some("minio/minio:latest"));
        assert_eq!(tenant.domains, Some(domains));
    }

    #[tokio::test]
    async fn edit_then_refresh_over_http() {
        let console = MockConsole::start(vec![tenant_fixture()]).await;
        let store = TenantStore::new(client(&console), fixture_id());
        store.refresh().await.unwrap();

        let summary = reconcile(store.current_tenant().as_deref()).unwrap();
        assert_eq!(summary.health, HealthClass::Healthy);

        let mut sessions = SessionController::new(fixture_id());
        let seed = sessions.open_version_update(store.current_tenant().as_deref()).clone();
        let mut editor = tenantview_lib::session::VersionEditor::new(store.api(), seed);
        let outcome = editor.commit("minio/minio:RELEASE.2022-02-07T08-17-33Z").await;
        assert_eq!(outcome, EditOutcome::Committed);

        sessions
            .finish(SessionKind::VersionUpdate, outcome, &store)
            .await
            .unwrap();

        let requests = console.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[1].starts_with("PUT "));
        assert!(requests[2].starts_with("GET "));

        let summary = reconcile(store.current_tenant().as_deref()).unwrap();
        assert_eq!(summary.image, "minio/minio:RELEASE.2022-02-07T08-17-33Z");
    }
}
