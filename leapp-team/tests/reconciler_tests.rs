mod support;

use leapp_storage::WorkspaceStore;
use leapp_team::{
    TeamError, WorkspacePointer, access_key_id_secret_name, secret_access_key_secret_name,
};
use leapp_types::{
    AwsSsoIntegrationRequest, AwsSsoIntegrationSecret, GlobalSettings, IntegrationRequest,
    IntegrationSecret, IntegrationType, Session, SessionRequest, SessionType,
};
use pretty_assertions::assert_eq;
use support::*;

const IAM_USER: &str = r#"{"secretType":"awsIamUserSession","sessionId":"user-1","profileName":"default",
    "sessionName":"dev","accessKey":"AK","secretKey":"SK","region":"eu-west-1","mfaDevice":"mfa"}"#;

fn list(items: &[&str]) -> Vec<leapp_types::LocalSecretDto> {
    secrets_from_json(&format!("[{}]", items.join(",")))
}

// ── sync_secrets preconditions ──

#[tokio::test]
async fn expired_token_signs_out_without_fetching() {
    let h = Harness::new();
    let mut user = make_user();
    user.access_token = token_expiring_in(-10);
    h.coordinator.set_signed_in_user(user).await.unwrap();

    h.coordinator.sync_secrets(false).await.unwrap();

    assert!(h.coordinator.state().signed_in_user().is_none());
    assert_eq!(h.keychain("team-signed-in-user").await, None);
    assert_eq!(h.log.count(|c| *c == Call::GetSecrets), 0);
    assert_eq!(h.log.store_calls("remove"), 0);
}

#[tokio::test]
async fn missing_user_does_nothing_destructive() {
    let h = Harness::new();

    h.coordinator.sync_secrets(false).await.unwrap();

    assert_eq!(h.log.count(|c| *c == Call::GetSecrets), 0);
    assert_eq!(h.log.store_calls("remove"), 0);
    assert_eq!(
        h.coordinator.get_current_workspace_pointer().await.unwrap(),
        WorkspacePointer::Local
    );
}

#[tokio::test]
async fn sync_points_at_team_and_publishes_identity() {
    let h = Harness::new();
    let mut events = h.coordinator.state().subscribe_events();

    h.enter_team(make_user()).await;

    assert_eq!(h.keychain("current-workspace").await, Some("acme".into()));
    let identity = h.coordinator.state().workspace().unwrap();
    assert_eq!((identity.name.as_str(), identity.id.as_str()), ("acme", "1"));
    assert_eq!(h.store.workspace_file_name().unwrap(), ".Leapp/Leapp-1-lock.json");
    assert!(events.try_recv().is_ok());
    assert!(!h.coordinator.state().is_switching_workspace());
}

// ── full vs read-only ──

#[tokio::test]
async fn full_sync_rebuilds_document() {
    let h = Harness::new();
    h.enter_team(make_user()).await;
    h.store
        .update_workspace(&mut |ws| ws.profiles.push(leapp_types::NamedProfile::new("stale")))
        .unwrap();
    h.log.clear();

    h.coordinator.sync_secrets(false).await.unwrap();

    assert_eq!(h.log.store_calls("remove"), 1);
    assert_eq!(h.log.store_calls("create"), 1);
    assert!(h.workspace().profile_by_name("stale").is_none());
}

#[tokio::test]
async fn read_only_sync_reloads_but_never_removes() {
    let h = Harness::new();
    h.enter_team(make_user()).await;
    h.store
        .update_workspace(&mut |ws| ws.profiles.push(leapp_types::NamedProfile::new("kept")))
        .unwrap();
    h.log.clear();

    h.coordinator.sync_secrets(true).await.unwrap();

    assert!(h.log.store_calls("reload") >= 1);
    assert_eq!(h.log.store_calls("remove"), 0);
    assert_eq!(h.log.store_calls("create"), 0);
    assert!(h.workspace().profile_by_name("kept").is_some());
}

#[tokio::test]
async fn local_global_settings_carry_into_team_document() {
    let h = Harness::new();
    h.coordinator.load_and_decrypt_workspace(None).unwrap();
    let settings = GlobalSettings {
        color_theme: "dark".into(),
        require_password: true,
        ..Default::default()
    };
    h.store.apply_global_settings(&settings).unwrap();

    h.enter_team(make_user()).await;

    assert_eq!(h.workspace().settings, settings);
}

#[tokio::test]
async fn notifications_do_not_survive_full_sync() {
    let h = Harness::new();
    h.enter_team(make_user()).await;
    h.store
        .update_workspace(&mut |ws| {
            ws.notifications.push(leapp_types::Notification::new(
                leapp_types::NotificationType::Info,
                "t",
                "d",
            ))
        })
        .unwrap();

    h.coordinator.sync_secrets(false).await.unwrap();

    assert!(h.workspace().notifications.is_empty());
}

// ── integrations ──

#[tokio::test]
async fn integration_replaced_by_delete_then_create() {
    let h = Harness::new();
    let secret = r#"{"secretType":"awsSsoIntegration","id":"X","alias":"a","portalUrl":"p","region":"r","browserOpening":"b"}"#;
    h.set_secrets(list(&[secret]));
    h.enter_team(make_user()).await;
    h.log.clear();

    let dto = AwsSsoIntegrationSecret {
        id: "X".into(),
        alias: "a".into(),
        portal_url: "p".into(),
        region: "r".into(),
        browser_opening: "b".into(),
    };
    h.coordinator
        .sync_integration_secret(IntegrationSecret::AwsSso(&dto))
        .await
        .unwrap();

    assert_eq!(
        h.log.all(),
        vec![
            Call::IntegrationGet(IntegrationType::AwsSso, "X".into()),
            Call::IntegrationDelete(IntegrationType::AwsSso, "X".into()),
            Call::IntegrationCreate(
                IntegrationType::AwsSso,
                IntegrationRequest::AwsSso(AwsSsoIntegrationRequest {
                    alias: "a".into(),
                    portal_url: "p".into(),
                    region: "r".into(),
                    browser_opening: "b".into(),
                }),
                "X".into()
            ),
        ]
    );
    assert_eq!(h.workspace().integrations().len(), 1);
}

#[tokio::test]
async fn azure_integration_created_with_remote_id() {
    let h = Harness::new();
    h.set_secrets(list(&[
        r#"{"secretType":"azureIntegration","id":"az-1","alias":"tenant","tenantId":"t-1","region":"westeurope"}"#,
    ]));

    h.enter_team(make_user()).await;

    let ws = h.workspace();
    assert_eq!(ws.azure_integrations.len(), 1);
    assert_eq!(ws.azure_integrations[0].id, "az-1");
    assert_eq!(ws.azure_integrations[0].tenant_id, "t-1");
    assert_eq!(
        h.log.count(|c| matches!(c, Call::IntegrationDelete(..))),
        0
    );
}

#[tokio::test]
async fn failed_integration_create_is_surfaced_with_id() {
    let h = Harness::new();
    h.set_secrets(list(&[
        r#"{"secretType":"awsSsoIntegration","id":"X","alias":"a","portalUrl":"p","region":"r","browserOpening":"b"}"#,
    ]));
    *h.fail_integration_create.lock().unwrap() = true;
    h.coordinator.set_signed_in_user(make_user()).await.unwrap();

    let err = h.coordinator.sync_secrets(false).await.unwrap_err();

    match err {
        TeamError::IntegrationSync { id, reason } => {
            assert_eq!(id, "X");
            assert!(reason.contains("portal unreachable"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!h.coordinator.state().is_switching_workspace());
}

// ── sessions ──

#[tokio::test]
async fn iam_user_session_created_with_merged_profile() {
    let h = Harness::new();
    h.set_secrets(list(&[IAM_USER]));

    h.enter_team(make_user()).await;

    let creates = h.log.session_creates();
    assert_eq!(creates.len(), 1);
    let SessionRequest::AwsIamUser(request) = &creates[0] else {
        panic!("expected IAM user request");
    };
    let profile = h.workspace().profile_by_name("default").cloned().unwrap();
    assert_eq!(request.profile_id, profile.id);
    assert_eq!(request.access_key, "AK");
    assert_eq!(request.secret_key, "SK");
    assert_eq!(request.mfa_device.as_deref(), Some("mfa"));
    assert_eq!(request.session_id, "user-1");
    assert!(h.workspace().session("user-1").is_some());
    assert_eq!(
        h.keychain(&access_key_id_secret_name("user-1")).await,
        Some("AK".into())
    );
    assert_eq!(
        h.keychain(&secret_access_key_secret_name("user-1")).await,
        Some("SK".into())
    );
}

#[tokio::test]
async fn first_profile_name_wins() {
    let h = Harness::new();
    let second = IAM_USER.replace("user-1", "user-2");
    h.set_secrets(list(&[IAM_USER, &second]));

    h.enter_team(make_user()).await;

    let ws = h.workspace();
    assert_eq!(ws.profiles.iter().filter(|p| p.name == "default").count(), 1);
    let ids: Vec<_> = ws.sessions.iter().map(|s| s.profile_id().to_string()).collect();
    assert_eq!(ids[0], ids[1]);
}

#[tokio::test]
async fn chained_session_uses_direct_assumer() {
    let h = Harness::new();
    h.set_secrets(list(&[
        IAM_USER,
        r#"{"secretType":"awsIamRoleChainedSession","sessionId":"chain-1","sessionName":"admin",
            "region":"eu-west-1","roleArn":"arn:aws:iam::1:role/Admin","profileName":"admin",
            "assumerSessionId":"user-1","roleSessionName":"dev-session"}"#,
    ]));

    h.enter_team(make_user()).await;

    let Some(Session::AwsIamRoleChained(chained)) = h.workspace().session("chain-1").cloned() else {
        panic!("chained session missing");
    };
    assert_eq!(chained.parent_session_id, "user-1");
    assert_eq!(chained.role_session_name.as_deref(), Some("dev-session"));
    assert_eq!(h.log.count(|c| matches!(c, Call::SyncSessions(_))), 0);
}

#[tokio::test]
async fn chained_session_resolved_through_sso_role() {
    let h = Harness::new();
    h.set_sso_roles(vec![make_sso_role("sso-role-1", "sso-1", "arn:aws:iam::123/Admin")]);
    h.set_secrets(list(&[
        r#"{"secretType":"awsIamRoleChainedSession","sessionId":"chain-1","sessionName":"admin",
            "region":"eu-west-1","roleArn":"arn:aws:iam::9:role/Ops","profileName":"ops",
            "assumerIntegrationId":"sso-1","assumerAccountId":"123","assumerRoleName":"Admin"}"#,
    ]));

    h.enter_team(make_user()).await;

    assert!(h.log.all().contains(&Call::SyncSessions("sso-1".into())));
    let Some(Session::AwsIamRoleChained(chained)) = h.workspace().session("chain-1").cloned() else {
        panic!("chained session missing");
    };
    assert_eq!(chained.parent_session_id, "sso-role-1");
}

#[tokio::test]
async fn orphaned_chain_is_skipped() {
    let h = Harness::new();
    h.set_secrets(list(&[
        r#"{"secretType":"awsIamRoleChainedSession","sessionId":"chain-1","sessionName":"admin",
            "region":"eu-west-1","roleArn":"arn","profileName":"admin"}"#,
    ]));

    h.enter_team(make_user()).await;

    assert!(h.log.session_creates().is_empty());
    assert!(h.workspace().sessions.is_empty());
    assert!(h.workspace().profile_by_name("admin").is_none());
}

#[tokio::test]
async fn unresolvable_chain_fails_the_pass() {
    let h = Harness::new();
    h.set_secrets(list(&[
        r#"{"secretType":"awsIamRoleChainedSession","sessionId":"chain-1","sessionName":"admin",
            "region":"eu-west-1","roleArn":"arn","profileName":"admin",
            "assumerIntegrationId":"sso-1","assumerAccountId":"123","assumerRoleName":"Admin"}"#,
    ]));
    h.coordinator.set_signed_in_user(make_user()).await.unwrap();

    let err = h.coordinator.sync_secrets(false).await.unwrap_err();

    assert!(matches!(err, TeamError::Resolution(_)));
    assert!(h.log.session_creates().is_empty());
    assert!(!h.coordinator.state().is_switching_workspace());
}

#[tokio::test]
async fn federated_session_merges_idp_url() {
    let h = Harness::new();
    let federated = r#"{"secretType":"awsIamRoleFederatedSession","sessionId":"fed-1","sessionName":"saml",
        "region":"eu-west-1","roleArn":"arn:aws:iam::1:role/Saml","samlUrl":"https://idp.acme.io",
        "idpArn":"arn:aws:iam::1:saml-provider/acme","profileName":"saml"}"#;
    let second = federated.replace("fed-1", "fed-2");
    h.set_secrets(list(&[federated, &second]));

    h.enter_team(make_user()).await;

    let ws = h.workspace();
    assert_eq!(ws.idp_urls.len(), 1);
    let idp = &ws.idp_urls[0];
    assert_eq!(idp.url, "https://idp.acme.io");
    for id in ["fed-1", "fed-2"] {
        let Some(Session::AwsIamRoleFederated(session)) = ws.session(id).cloned() else {
            panic!("federated session {id} missing");
        };
        assert_eq!(session.idp_url_id, idp.id);
        assert_eq!(session.idp_arn, "arn:aws:iam::1:saml-provider/acme");
    }
    assert_eq!(h.log.count(|c| matches!(c, Call::SyncSessions(_))), 0);
}

#[tokio::test]
async fn read_only_sync_replaces_colliding_session() {
    let h = Harness::new();
    h.set_secrets(list(&[IAM_USER]));
    h.enter_team(make_user()).await;
    h.log.clear();

    h.coordinator.sync_secrets(true).await.unwrap();

    assert_eq!(
        h.log.count(|c| *c == Call::SessionDelete(SessionType::AwsIamUser, "user-1".into())),
        1
    );
    assert_eq!(h.workspace().sessions.len(), 1);
}

// ── setup_aws_session ──

#[tokio::test]
async fn setup_aws_session_deletes_existing_and_merges_profile() {
    let h = Harness::new();
    h.set_secrets(list(&[IAM_USER]));
    h.enter_team(make_user()).await;
    let existing_profile = h.workspace().profile_by_name("default").cloned().unwrap();
    h.log.clear();

    let service = h.services();
    let profile_id = h
        .coordinator
        .setup_aws_session(&service, "user-1", "default")
        .await
        .unwrap();

    assert_eq!(profile_id, existing_profile.id);
    assert!(h.workspace().session("user-1").is_none());
    assert_eq!(h.keychain(&access_key_id_secret_name("user-1")).await, None);
    assert_eq!(h.keychain(&secret_access_key_secret_name("user-1")).await, None);
}

#[tokio::test]
async fn setup_aws_session_without_existing_session_creates_profile() {
    let h = Harness::new();
    h.enter_team(make_user()).await;

    let service = h.services();
    let profile_id = h
        .coordinator
        .setup_aws_session(&service, "missing", "fresh")
        .await
        .unwrap();

    assert_eq!(h.workspace().profile_by_name("fresh").unwrap().id, profile_id);
}
