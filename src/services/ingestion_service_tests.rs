// src/services/ingestion_service_tests.rs
//
// Ingestion pipeline tests
//
// PURPOSE:
// - Prove pagination follows cursors in order and stops on an empty cursor
// - Prove nothing is persisted when a page fails or the run is cancelled
// - Prove fixture mode runs the same pipeline against the bundled dataset

#[cfg(test)]
mod pipeline_tests {
    use chrono::{Duration, Utc};
    use mockall::Sequence;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    use crate::domain::{Credential, Member, Session};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::infrastructure::{StorageLayout, StorageProfile};
    use crate::integrations::patreon::client::MockMembershipApi;
    use crate::integrations::{FixtureMembershipApi, MembersPage, MembershipApi};
    use crate::repositories::{JsonSnapshotRepository, SnapshotRepository};
    use crate::services::ingestion_service::{IngestRequest, MembershipIngestionService};
    use crate::services::ingestion_types::IngestionMode;

    fn authenticated() -> Session {
        let mut session = Session::Unauthenticated;
        session.authenticate(Credential {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
        });
        session
    }

    fn live_request() -> IngestRequest {
        IngestRequest {
            mode: IngestionMode::Live,
            profile: StorageProfile::Live,
            campaign_id: "42".to_string(),
        }
    }

    fn page_one() -> MembersPage {
        serde_json::from_value(serde_json::json!({
            "data": [
                {
                    "id": "m1", "type": "member",
                    "attributes": {"full_name": "Ada", "patron_status": "active_patron", "last_charge_status": "Paid"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t1", "type": "tier"}]}}
                },
                {
                    "id": "m2", "type": "member",
                    "attributes": {"full_name": "Grace", "patron_status": "declined_patron", "last_charge_status": "Declined"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t1", "type": "tier"}]}}
                }
            ],
            "included": [
                {"id": "t1", "type": "tier", "attributes": {"title": "Bronze"}},
                {"id": "t2", "type": "tier", "attributes": {"title": "Silver"}}
            ],
            "meta": {"pagination": {"cursors": {"next": "abc"}, "total": 4}}
        }))
        .unwrap()
    }

    fn page_two() -> MembersPage {
        serde_json::from_value(serde_json::json!({
            "data": [
                {
                    "id": "m3", "type": "member",
                    "attributes": {"full_name": "Alan", "patron_status": "active_patron", "last_charge_status": "Paid"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t2", "type": "tier"}]}}
                },
                {
                    "id": "m4", "type": "member",
                    "attributes": {"full_name": "Edsger", "patron_status": "active_patron", "last_charge_status": "Paid"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t3", "type": "tier"}]}}
                }
            ],
            "included": [
                {"id": "t2", "type": "tier", "attributes": {"title": "Silver"}},
                {"id": "t3", "type": "tier", "attributes": {"title": "Gold"}}
            ],
            "meta": {"pagination": {"cursors": {"next": ""}, "total": 4}}
        }))
        .unwrap()
    }

    fn unused_api() -> Arc<dyn MembershipApi> {
        let mut api = MockMembershipApi::new();
        api.expect_fetch_members_page().times(0);
        Arc::new(api)
    }

    fn service(
        live_api: Arc<dyn MembershipApi>,
        fixture_api: Arc<dyn MembershipApi>,
        dir: &tempfile::TempDir,
    ) -> (MembershipIngestionService, Arc<JsonSnapshotRepository>, Arc<EventBus>) {
        let repo = Arc::new(JsonSnapshotRepository::new(StorageLayout::new(dir.path())));
        let bus = Arc::new(EventBus::new());
        let service =
            MembershipIngestionService::new(live_api, fixture_api, repo.clone(), bus.clone());
        (service, repo, bus)
    }

    #[tokio::test]
    async fn test_two_pages_follow_cursor_and_aggregate() {
        let mut api = MockMembershipApi::new();
        let mut seq = Sequence::new();
        api.expect_fetch_members_page()
            .withf(|req| req.cursor.is_none() && req.bearer_token == "token" && req.campaign_id == "42")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_one()));
        api.expect_fetch_members_page()
            .withf(|req| req.cursor.as_deref() == Some("abc"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_two()));

        let dir = tempfile::tempdir().unwrap();
        let (service, repo, bus) = service(Arc::new(api), unused_api(), &dir);

        let snapshot = service
            .ingest(&live_request(), &authenticated(), &CancellationToken::new())
            .await
            .unwrap();

        // Gold only appears on page 2, so Edsger cannot resolve
        assert_eq!(
            snapshot.members,
            vec![Member::new("Ada", "Bronze"), Member::new("Alan", "Silver")]
        );
        assert_eq!(snapshot.tiers.len(), 2);
        assert_eq!(snapshot.tier_colors.len(), 2);

        let stored = repo.load(StorageProfile::Live).unwrap().unwrap();
        assert_eq!(stored.members, snapshot.members);
        assert_eq!(stored.tiers, snapshot.tiers);

        let log = bus.get_event_log();
        assert!(log.iter().any(|e| e.event_type == "MemberDropped"));
        assert_eq!(log.last().unwrap().event_type, "MembersIngested");
    }

    #[tokio::test]
    async fn test_failed_page_persists_nothing() {
        let mut api = MockMembershipApi::new();
        let mut seq = Sequence::new();
        api.expect_fetch_members_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_one()));
        api.expect_fetch_members_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::Network("connection reset".to_string())));

        let dir = tempfile::tempdir().unwrap();
        let (service, repo, _) = service(Arc::new(api), unused_api(), &dir);

        let result = service
            .ingest(&live_request(), &authenticated(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(AppError::Network(_))));
        assert!(repo.load(StorageProfile::Live).unwrap().is_none());
        assert!(!dir.path().join("tiers.json").exists());
    }

    #[tokio::test]
    async fn test_malformed_second_page_persists_nothing() {
        let mut api = MockMembershipApi::new();
        let mut seq = Sequence::new();
        api.expect_fetch_members_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page_one()));
        api.expect_fetch_members_page()
            .withf(|req| req.cursor.as_deref() == Some("abc"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::Decode("Malformed members payload".to_string())));

        let dir = tempfile::tempdir().unwrap();
        let (service, repo, bus) = service(Arc::new(api), unused_api(), &dir);

        let result = service
            .ingest(&live_request(), &authenticated(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(AppError::Decode(_))));
        assert!(!dir.path().join("tiers.json").exists());
        assert!(!dir.path().join("eligible_patrons.json").exists());
        assert!(repo.load(StorageProfile::Live).unwrap().is_none());
        assert!(!bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "MembersIngested"));
    }

    #[tokio::test]
    async fn test_blank_unused_tier_does_not_abort_ingest() {
        let page: MembersPage = serde_json::from_value(serde_json::json!({
            "data": [
                {
                    "id": "m1", "type": "member",
                    "attributes": {"full_name": "Ada", "patron_status": "active_patron", "last_charge_status": "Paid"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t1", "type": "tier"}]}}
                },
                {
                    "id": "m2", "type": "member",
                    "attributes": {"full_name": "Charles", "patron_status": "active_patron", "last_charge_status": "Paid"},
                    "relationships": {"currently_entitled_tiers": {"data": [{"id": "t0", "type": "tier"}]}}
                }
            ],
            "included": [
                {"id": "t1", "type": "tier", "attributes": {"title": "Gold"}},
                {"id": "t0", "type": "tier", "attributes": {"title": ""}}
            ],
            "meta": {"pagination": {"cursors": {"next": ""}, "total": 2}}
        }))
        .unwrap();
        let mut api = MockMembershipApi::new();
        api.expect_fetch_members_page()
            .times(1)
            .returning(move |_| Ok(page.clone()));

        let dir = tempfile::tempdir().unwrap();
        let (service, repo, bus) = service(Arc::new(api), unused_api(), &dir);

        let snapshot = service
            .ingest(&live_request(), &authenticated(), &CancellationToken::new())
            .await
            .unwrap();

        // Charles sits on the untitled tier and drops as unknown-tier
        assert_eq!(snapshot.members, vec![Member::new("Ada", "Gold")]);
        assert_eq!(snapshot.tiers.len(), 1);
        assert_eq!(snapshot.tiers.resolve("t1"), Some("Gold"));
        assert!(repo.load(StorageProfile::Live).unwrap().is_some());
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "MemberDropped"));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_page() {
        let dir = tempfile::tempdir().unwrap();
        let (service, repo, _) = service(unused_api(), unused_api(), &dir);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service.ingest(&live_request(), &authenticated(), &cancel).await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(repo.load(StorageProfile::Live).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_live_mode_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service(unused_api(), unused_api(), &dir);

        let result = service
            .ingest(&live_request(), &Session::Unauthenticated, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[tokio::test]
    async fn test_fixture_mode_uses_bundled_data() {
        let dir = tempfile::tempdir().unwrap();
        let (service, repo, _) = service(unused_api(), Arc::new(FixtureMembershipApi::new()), &dir);
        let request = IngestRequest {
            mode: IngestionMode::Fixture,
            profile: StorageProfile::Rehearsal,
            campaign_id: String::new(),
        };

        let snapshot = service
            .ingest(&request, &Session::Unauthenticated, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.member_count(), 13);
        assert_eq!(snapshot.tiers.len(), 5);
        assert!(snapshot.members.iter().all(|m| snapshot.tiers.contains_title(&m.tier)));
        assert!(repo.load(StorageProfile::Rehearsal).unwrap().is_some());
        assert!(repo.load(StorageProfile::Live).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service(unused_api(), Arc::new(FixtureMembershipApi::new()), &dir);
        let request = IngestRequest {
            mode: IngestionMode::Fixture,
            profile: StorageProfile::Rehearsal,
            campaign_id: String::new(),
        };
        let ingested = service
            .ingest(&request, &Session::Unauthenticated, &CancellationToken::new())
            .await
            .unwrap();

        let loaded = service.load_snapshot(StorageProfile::Rehearsal).unwrap();

        assert_eq!(loaded.members, ingested.members);
        assert_eq!(loaded.tiers, ingested.tiers);
        assert_eq!(loaded.tier_colors.len(), loaded.tiers.len());
    }

    #[test]
    fn test_load_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service(unused_api(), unused_api(), &dir);
        assert!(matches!(
            service.load_snapshot(StorageProfile::Live),
            Err(AppError::MissingData(_))
        ));
    }

    #[test]
    fn test_load_inconsistent_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tiers.json"), r#"{"1": "Gold"}"#).unwrap();
        std::fs::write(
            dir.path().join("eligible_patrons.json"),
            r#"[{"fullName": "Ada", "tier": "Silver"}]"#,
        )
        .unwrap();
        let (service, _, _) = service(unused_api(), unused_api(), &dir);
        assert!(matches!(
            service.load_snapshot(StorageProfile::Live),
            Err(AppError::TierResolution(_))
        ));
    }

    #[test]
    fn test_replace_tiers_recolors_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tiers.json"), r#"{"1": "Gold"}"#).unwrap();
        std::fs::write(
            dir.path().join("eligible_patrons.json"),
            r#"[{"fullName": "Ada", "tier": "Gold"}]"#,
        )
        .unwrap();
        let (service, repo, _) = service(unused_api(), unused_api(), &dir);
        let tiers = crate::domain::TierMap::from_iter([
            ("1".to_string(), "Gold".to_string()),
            ("2".to_string(), "Silver".to_string()),
        ]);

        let snapshot = service.replace_tiers(StorageProfile::Live, tiers.clone()).unwrap();

        assert_eq!(snapshot.tier_colors.len(), 2);
        assert_eq!(repo.load(StorageProfile::Live).unwrap().unwrap().tiers, tiers);
    }

    #[test]
    fn test_replace_tiers_rejects_orphaned_members() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tiers.json"), r#"{"1": "Gold"}"#).unwrap();
        std::fs::write(
            dir.path().join("eligible_patrons.json"),
            r#"[{"fullName": "Ada", "tier": "Gold"}]"#,
        )
        .unwrap();
        let (service, repo, _) = service(unused_api(), unused_api(), &dir);
        let tiers = crate::domain::TierMap::from_iter([("2".to_string(), "Silver".to_string())]);

        assert!(matches!(
            service.replace_tiers(StorageProfile::Live, tiers),
            Err(AppError::TierResolution(_))
        ));
        let stored = repo.load(StorageProfile::Live).unwrap().unwrap();
        assert_eq!(stored.tiers.resolve("1"), Some("Gold"));
    }
}
