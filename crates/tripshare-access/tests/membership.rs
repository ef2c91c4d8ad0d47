mod common;

use common::{harness, user};
use tripshare_access::{AccessError, EffectiveRole};
use tripshare_storage::MemberRole;

#[tokio::test]
async fn re_adding_a_member_keeps_one_row_with_the_latest_role() {
    let h = harness().await;
    let bob = user(&h.store, "bob@example.com").await;
    let carol = user(&h.store, "carol@example.com").await;

    let first = h
        .access
        .add_or_update_member(&h.trip.id, &bob.id, MemberRole::Viewer, &h.owner.id)
        .await
        .unwrap();
    h.access
        .add_or_update_member(&h.trip.id, &carol.id, MemberRole::Viewer, &h.owner.id)
        .await
        .unwrap();
    let second = h
        .access
        .add_or_update_member(&h.trip.id, &bob.id, MemberRole::Editor, &carol.id)
        .await
        .unwrap();

    assert_eq!(second.role, MemberRole::Editor);
    assert_eq!(second.invited_by, carol.id);
    assert_eq!(second.joined_at, first.joined_at);

    let members = h.access.list_members(&h.trip.id).await.unwrap();
    let ids: Vec<_> = members.iter().map(|m| m.user_id.clone()).collect();
    assert_eq!(ids, vec![h.owner.id.clone(), bob.id.clone(), carol.id.clone()]);
    assert_eq!(members[0].role, EffectiveRole::Owner);
    assert_eq!(members[0].invited_by, None);
    assert_eq!(members[1].role, EffectiveRole::Editor);
}

#[tokio::test]
async fn the_owner_cannot_be_added_demoted_or_removed() {
    let h = harness().await;

    assert_eq!(
        h.access
            .add_or_update_member(&h.trip.id, &h.owner.id, MemberRole::Viewer, &h.owner.id)
            .await
            .unwrap_err(),
        AccessError::OwnerNotAllowed
    );
    assert_eq!(
        h.access
            .remove_member(&h.trip.id, &h.owner.id)
            .await
            .unwrap_err(),
        AccessError::OwnerNotAllowed
    );
    assert_eq!(
        h.access
            .set_member_role(&h.trip.id, &h.owner.id, &h.owner.id, MemberRole::Viewer)
            .await
            .unwrap_err(),
        AccessError::OwnerNotAllowed
    );
    assert_eq!(
        h.access
            .remove_collaborator(&h.trip.id, &h.owner.id, &h.owner.id)
            .await
            .unwrap_err(),
        AccessError::OwnerNotAllowed
    );
    assert_eq!(
        h.access.leave_trip(&h.trip.id, &h.owner.id).await.unwrap_err(),
        AccessError::OwnerNotAllowed
    );
    assert_eq!(
        h.access.resolve_role(&h.trip.id, &h.owner.id).await.unwrap(),
        EffectiveRole::Owner
    );
}

#[tokio::test]
async fn removing_an_absent_member_is_a_no_op() {
    let h = harness().await;
    let bob = user(&h.store, "bob@example.com").await;

    h.access.remove_member(&h.trip.id, &bob.id).await.unwrap();
    h.access
        .add_or_update_member(&h.trip.id, &bob.id, MemberRole::Viewer, &h.owner.id)
        .await
        .unwrap();
    h.access.remove_member(&h.trip.id, &bob.id).await.unwrap();
    h.access.remove_member(&h.trip.id, &bob.id).await.unwrap();

    assert_eq!(
        h.access.resolve_role(&h.trip.id, &bob.id).await.unwrap(),
        EffectiveRole::None
    );
}

#[tokio::test]
async fn only_the_owner_manages_collaborators() {
    let h = harness().await;
    let editor = user(&h.store, "editor@example.com").await;
    let viewer = user(&h.store, "viewer@example.com").await;
    h.access
        .add_or_update_member(&h.trip.id, &editor.id, MemberRole::Editor, &h.owner.id)
        .await
        .unwrap();
    h.access
        .add_or_update_member(&h.trip.id, &viewer.id, MemberRole::Viewer, &h.owner.id)
        .await
        .unwrap();

    assert_eq!(
        h.access
            .set_member_role(&h.trip.id, &editor.id, &viewer.id, MemberRole::Editor)
            .await
            .unwrap_err(),
        AccessError::Forbidden
    );
    assert_eq!(
        h.access
            .remove_collaborator(&h.trip.id, &editor.id, &viewer.id)
            .await
            .unwrap_err(),
        AccessError::Forbidden
    );

    let promoted = h
        .access
        .set_member_role(&h.trip.id, &h.owner.id, &viewer.id, MemberRole::Editor)
        .await
        .unwrap();
    assert_eq!(promoted.role, MemberRole::Editor);
    assert_eq!(promoted.invited_by, h.owner.id);

    h.access
        .remove_collaborator(&h.trip.id, &h.owner.id, &editor.id)
        .await
        .unwrap();
    assert!(!h.access.has_access(&h.trip.id, &editor.id).await.unwrap());
}

#[tokio::test]
async fn changing_the_role_of_a_non_member_is_not_found() {
    let h = harness().await;
    let stranger = user(&h.store, "stranger@example.com").await;

    assert_eq!(
        h.access
            .set_member_role(&h.trip.id, &h.owner.id, &stranger.id, MemberRole::Viewer)
            .await
            .unwrap_err(),
        AccessError::NotFound
    );
    assert_eq!(
        h.access.resolve_role(&h.trip.id, &stranger.id).await.unwrap(),
        EffectiveRole::None
    );
}

#[tokio::test]
async fn member_list_is_visible_to_members_only() {
    let h = harness().await;
    let viewer = user(&h.store, "viewer@example.com").await;
    let stranger = user(&h.store, "stranger@example.com").await;
    h.access
        .add_or_update_member(&h.trip.id, &viewer.id, MemberRole::Viewer, &h.owner.id)
        .await
        .unwrap();

    assert_eq!(
        h.access
            .members_for(&h.trip.id, &viewer.id)
            .await
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        h.access
            .members_for(&h.trip.id, &stranger.id)
            .await
            .unwrap_err(),
        AccessError::Forbidden
    );
}

#[tokio::test]
async fn members_can_leave_on_their_own() {
    let h = harness().await;
    let bob = user(&h.store, "bob@example.com").await;
    h.access
        .add_or_update_member(&h.trip.id, &bob.id, MemberRole::Editor, &h.owner.id)
        .await
        .unwrap();

    h.access.leave_trip(&h.trip.id, &bob.id).await.unwrap();
    assert_eq!(
        h.access.resolve_role(&h.trip.id, &bob.id).await.unwrap(),
        EffectiveRole::None
    );
    assert_eq!(
        h.access.leave_trip(&h.trip.id, &bob.id).await.unwrap_err(),
        AccessError::NotFound
    );
}
