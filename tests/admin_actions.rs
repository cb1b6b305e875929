//! End-to-end dispatch scenarios for the admin action surface: token and
//! permission gates, the reset action itself, and the JSON envelope.

use platform_access::admin::{
    ActionRequest, ActionResponse, ActionToken, AdminDispatcher, Caller, RESET_ACTION,
};
use platform_access::provider::builtin::{caps, roles};
use platform_access::registry::RoleRegistry;
use platform_access::testkit;
use platform_access::types::{CapabilityName, RoleSlug};

fn dispatcher() -> AdminDispatcher {
    AdminDispatcher::new(testkit::builtin_reconciler())
}

fn admin_caller() -> Caller {
    Caller::new("alex", vec![RoleSlug::from(roles::PLATFORM_ADMIN)])
}

fn staff_caller() -> Caller {
    Caller::new("sam", vec![RoleSlug::from(roles::PLATFORM_STAFF)])
}

fn request(action: &str, token: ActionToken) -> ActionRequest {
    ActionRequest {
        action: action.to_string(),
        token,
    }
}

#[test]
fn reset_action_reconciles_and_reports_success() {
    let mut registry = testkit::marketplace_registry();
    // Drift: staff picked up delete_orders since activation.
    registry
        .add_cap(
            &RoleSlug::from(roles::PLATFORM_STAFF),
            &CapabilityName::from(caps::DELETE_ORDERS),
        )
        .unwrap();

    let mut dispatcher = dispatcher();
    let token = dispatcher.issue_token();
    let response = dispatcher.dispatch(&mut registry, &admin_caller(), &request(RESET_ACTION, token));

    assert!(response.success, "{}", response.message);
    assert!(!registry
        .has_cap(
            &RoleSlug::from(roles::PLATFORM_STAFF),
            &CapabilityName::from(caps::DELETE_ORDERS)
        )
        .unwrap());
    // The foreign agency role kept its separately granted platform capability.
    assert!(registry
        .has_cap(
            &RoleSlug::from("agency_admin"),
            &CapabilityName::from(caps::VIEW_ORDERS)
        )
        .unwrap());
}

#[test]
fn replayed_token_is_rejected_without_mutation() {
    let mut registry = testkit::marketplace_registry();
    let mut dispatcher = dispatcher();
    let token = dispatcher.issue_token();

    let first = dispatcher.dispatch(&mut registry, &admin_caller(), &request(RESET_ACTION, token));
    assert!(first.success);

    let before = registry.snapshot();
    let replay = dispatcher.dispatch(&mut registry, &admin_caller(), &request(RESET_ACTION, token));
    assert!(!replay.success);
    assert_eq!(before, registry.snapshot());
}

#[test]
fn forged_token_is_rejected_without_mutation() {
    let mut registry = testkit::marketplace_registry();
    let mut dispatcher = dispatcher();
    let forged: ActionToken =
        serde_json::from_str("\"5d1fb5fc-94e5-4bde-9f10-3b7c61f38c40\"").unwrap();

    let before = registry.snapshot();
    let response = dispatcher.dispatch(&mut registry, &admin_caller(), &request(RESET_ACTION, forged));

    assert!(!response.success);
    assert_eq!(before, registry.snapshot());
}

#[test]
fn unprivileged_caller_is_rejected_without_mutation() {
    let mut registry = testkit::marketplace_registry();
    // Drift that a successful reset would repair, proving nothing ran.
    registry
        .add_cap(
            &RoleSlug::from(roles::PLATFORM_STAFF),
            &CapabilityName::from(caps::DELETE_ORDERS),
        )
        .unwrap();

    let mut dispatcher = dispatcher();
    let token = dispatcher.issue_token();
    let before = registry.snapshot();
    let response = dispatcher.dispatch(&mut registry, &staff_caller(), &request(RESET_ACTION, token));

    assert!(!response.success);
    assert!(response.message.contains(caps::MANAGE_PLATFORM));
    assert_eq!(before, registry.snapshot());
}

#[test]
fn unknown_action_is_rejected_without_mutation() {
    let mut registry = testkit::marketplace_registry();
    let mut dispatcher = dispatcher();
    let token = dispatcher.issue_token();

    let before = registry.snapshot();
    let response = dispatcher.dispatch(
        &mut registry,
        &admin_caller(),
        &request("rebuild_everything", token),
    );

    assert!(!response.success);
    assert!(response.message.contains("rebuild_everything"));
    assert_eq!(before, registry.snapshot());
}

#[test]
fn envelope_round_trips_through_json() {
    let response = ActionResponse::fail("role registry unavailable: host down");
    let json = response.to_json().unwrap();
    let decoded: ActionResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(response, decoded);
}

#[test]
fn administrator_caller_qualifies_through_actual_state() {
    // The administrator role holds manage_platform via the activation grant,
    // so a caller with only that role clears the permission gate.
    let mut registry = testkit::marketplace_registry();
    let mut dispatcher = dispatcher();
    let token = dispatcher.issue_token();
    let caller = Caller::new("root", vec![RoleSlug::administrator()]);

    let response = dispatcher.dispatch(&mut registry, &caller, &request(RESET_ACTION, token));
    assert!(response.success);
}
