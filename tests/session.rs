// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use tenantview_lib::{
        api::ApiError,
        commands::{domains, version},
        session::*,
        store::{Refresh, TenantStore},
        summary::reconcile,
        tenant::Domains,
        test_env::*,
    };

    #[tokio::test]
    async fn close_with_refresh_refreshes_once() {
        let refresh = CountingRefresh::new();
        let mut sessions = SessionController::new(fixture_id());

        sessions.open_version_update(Some(&tenant_fixture()));
        sessions
            .close(
                SessionKind::VersionUpdate,
                SessionExit { refresh: true },
                &refresh,
            )
            .await
            .unwrap();

        assert_eq!(refresh.calls(), 1);
        assert!(!sessions.is_open(SessionKind::VersionUpdate));

        // The exit has been consumed; closing again is a no-op.
        sessions
            .close(
                SessionKind::VersionUpdate,
                SessionExit { refresh: true },
                &refresh,
            )
            .await
            .unwrap();
        assert_eq!(refresh.calls(), 1);
    }

    #[tokio::test]
    async fn close_without_refresh() {
        let refresh = CountingRefresh::new();
        let mut sessions = SessionController::new(fixture_id());

        sessions.open_domain_edit(None);
        sessions
            .close(
                SessionKind::DomainEdit,
                SessionExit { refresh: false },
                &refresh,
            )
            .await
            .unwrap();

        assert_eq!(refresh.calls(), 0);
        assert!(!sessions.is_open(SessionKind::DomainEdit));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let refresh = CountingRefresh::new();
        let mut sessions = SessionController::new(fixture_id());

        sessions.open_version_update(None);
        sessions.open_domain_edit(None);
        sessions
            .finish(SessionKind::DomainEdit, EditOutcome::Committed, &refresh)
            .await
            .unwrap();

        assert!(sessions.is_open(SessionKind::VersionUpdate));
        assert!(!sessions.is_open(SessionKind::DomainEdit));
        assert_eq!(refresh.calls(), 1);
    }

    #[test]
    fn seeds() {
        let tenant = tenant_fixture();
        let mut sessions = SessionController::new(fixture_id());

        let seed = sessions.open_version_update(Some(&tenant)).clone();
        assert_eq!(seed.tenant, fixture_id());
        assert_eq!(seed.image, tenant.image.clone().unwrap());

        let seed = sessions.open_domain_edit(Some(&tenant)).clone();
        assert_eq!(seed.domains, tenant.domains);

        let mut sessions = SessionController::new(fixture_id());
        assert_eq!(sessions.open_version_update(None).image, "");
        assert_eq!(sessions.open_domain_edit(None).domains, None);
    }

    #[test]
    fn opening_twice_keeps_the_first_seed() {
        let mut sessions = SessionController::new(fixture_id());
        sessions.open_version_update(Some(&tenant_fixture()));

        let seed = sessions.open_version_update(Some(&bare_tenant())).clone();
        assert_eq!(seed.image, tenant_fixture().image.unwrap());
    }

    #[tokio::test]
    async fn failed_outcome_keeps_session_open() {
        let refresh = CountingRefresh::new();
        let mut sessions = SessionController::new(fixture_id());

        sessions.open_version_update(None);
        sessions
            .finish(SessionKind::VersionUpdate, EditOutcome::Failed, &refresh)
            .await
            .unwrap();

        assert!(sessions.is_open(SessionKind::VersionUpdate));
        assert_eq!(refresh.calls(), 0);

        sessions
            .finish(SessionKind::VersionUpdate, EditOutcome::Cancelled, &refresh)
            .await
            .unwrap();
        assert!(!sessions.is_open(SessionKind::VersionUpdate));
        assert_eq!(refresh.calls(), 0);
    }

    #[tokio::test]
    async fn refresh_failure_still_closes() {
        let refresh = CountingRefresh::failing();
        let mut sessions = SessionController::new(fixture_id());

        sessions.open_version_update(None);
        let result = sessions
            .finish(SessionKind::VersionUpdate, EditOutcome::Committed, &refresh)
            .await;

        assert!(result.is_err());
        assert_eq!(refresh.calls(), 1);
        assert!(!sessions.is_open(SessionKind::VersionUpdate));
    }

    #[tokio::test]
    async fn version_update_refreshes_after_commit() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();
        assert_eq!(store.api().gets(), 1);

        let new_image = "minio/minio:RELEASE.2022-02-07T08-17-33Z";
        let mut sessions = SessionController::new(fixture_id());
        let outcome = version::run_version_update(&mut sessions, &store, new_image)
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Committed);
        assert_eq!(store.api().updates(), 1);
        assert_eq!(store.api().gets(), 2);
        assert!(!sessions.is_open(SessionKind::VersionUpdate));

        let summary = reconcile(store.current_tenant().as_deref()).unwrap();
        assert_eq!(summary.image, new_image);
    }

    #[tokio::test]
    async fn unchanged_version_cancels() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();

        let current = tenant_fixture().image.unwrap();
        let mut sessions = SessionController::new(fixture_id());
        let outcome = version::run_version_update(&mut sessions, &store, &current)
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Cancelled);
        assert_eq!(store.api().updates(), 0);
        assert_eq!(store.api().gets(), 1);
    }

    #[tokio::test]
    async fn failed_commit_does_not_refresh() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();
        store
            .api()
            .fail_next_update(ApiError::Status(500, "upgrade in progress".to_string()));

        let mut sessions = SessionController::new(fixture_id());
        let outcome = version::run_version_update(&mut sessions, &store, "minio/minio:latest")
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Failed);
        assert_eq!(store.api().gets(), 1);
        assert!(sessions.is_open(SessionKind::VersionUpdate));
        assert_eq!(
            store.current_tenant().unwrap().image,
            tenant_fixture().image
        );
    }

    #[tokio::test]
    async fn editor_rejects_empty_image() {
        let api = FakeApi::new(tenant_fixture());
        let mut sessions = SessionController::new(fixture_id());
        let seed = sessions.open_version_update(None).clone();

        let mut editor = VersionEditor::new(&api, seed);
        assert_eq!(editor.commit("  ").await, EditOutcome::Failed);
        assert!(editor.error().is_some());
        assert_eq!(api.updates(), 0);
    }

    #[tokio::test]
    async fn domain_edit_keeps_unmentioned_fields() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();

        let args = domains::EditDomainsArgs {
            console: Some("https://new-console.example".to_string()),
            ..Default::default()
        };
        let mut sessions = SessionController::new(fixture_id());
        let outcome = domains::run_domain_edit(&mut sessions, &store, &args)
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Committed);
        assert_eq!(store.api().gets(), 2);

        let domains = store.current_tenant().unwrap().domains.clone().unwrap();
        assert_eq!(
            domains.console.as_deref(),
            Some("https://new-console.example")
        );
        assert_eq!(domains.minio, tenant_fixture().domains.unwrap().minio);
    }

    #[tokio::test]
    async fn domain_edit_clear() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();

        let args = domains::EditDomainsArgs {
            clear: true,
            ..Default::default()
        };
        let mut sessions = SessionController::new(fixture_id());
        domains::run_domain_edit(&mut sessions, &store, &args)
            .await
            .unwrap();

        assert_eq!(
            store.current_tenant().unwrap().domains,
            Some(Domains::default())
        );

        // The endpoint links are still shown once the domains are gone.
        let summary = reconcile(store.current_tenant().as_deref()).unwrap();
        assert_eq!(summary.console.links.len(), 1);
        assert_eq!(summary.minio.links.len(), 1);
    }

    #[tokio::test]
    async fn domain_edit_without_changes_cancels() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();

        let mut sessions = SessionController::new(fixture_id());
        let outcome =
            domains::run_domain_edit(&mut sessions, &store, &domains::EditDomainsArgs::default())
                .await
                .unwrap();

        assert_eq!(outcome, EditOutcome::Cancelled);
        assert_eq!(store.api().updates(), 0);
        assert_eq!(store.api().gets(), 1);
    }

    #[tokio::test]
    async fn invalid_domain_never_reaches_the_api() {
        let store = TenantStore::new(FakeApi::new(tenant_fixture()), fixture_id());
        store.refresh().await.unwrap();

        let args = domains::EditDomainsArgs {
            minio: vec!["minio.example".to_string()],
            ..Default::default()
        };
        let mut sessions = SessionController::new(fixture_id());
        let outcome = domains::run_domain_edit(&mut sessions, &store, &args)
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Failed);
        assert_eq!(store.api().updates(), 0);
        assert!(sessions.is_open(SessionKind::DomainEdit));
    }
}
